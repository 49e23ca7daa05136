use tracing::{debug, warn};

use crate::core::{BlockId, BlockIdAllocator, DayOfWeek, TimeBlock};
use crate::error::{ScheduleError, ScheduleResult};
use crate::interaction::{DetachedListeners, PointerListenerScope};

use super::template_contract::{LoadReport, PersistedTemplate, decode_template, encode_day};
use super::{
    DoctorDirectory, EditorConfig, NotificationKind, NotificationSink, ScheduleDayEditor,
    TemplateRepository,
};

pub const SAVE_SUCCESS_MESSAGE: &str = "Weekly schedule saved";
pub const SAVE_FAILURE_MESSAGE: &str = "Saving the weekly schedule failed, please retry";

/// Seven day editors plus load/save against an external weekly template.
///
/// Nothing here persists implicitly: drags and clicks only touch the day
/// editors, and [`WeeklyTemplateStore::save`] runs only when the host asks.
#[derive(Debug)]
pub struct WeeklyTemplateStore<S: PointerListenerScope + Default = DetachedListeners> {
    hospital_id: String,
    config: EditorConfig,
    ids: BlockIdAllocator,
    days: Vec<ScheduleDayEditor<S>>,
    saved_revisions: [u64; 7],
}

impl<S: PointerListenerScope + Default> WeeklyTemplateStore<S> {
    pub fn new(hospital_id: impl Into<String>, config: EditorConfig) -> ScheduleResult<Self> {
        config.validate()?;
        let ids = BlockIdAllocator::new();
        let days = DayOfWeek::ALL
            .into_iter()
            .map(|day| {
                ScheduleDayEditor::with_session(day, config.clone(), ids.clone(), S::default())
            })
            .collect::<ScheduleResult<Vec<_>>>()?;

        Ok(Self {
            hospital_id: hospital_id.into(),
            config,
            ids,
            days,
            saved_revisions: [0; 7],
        })
    }

    #[must_use]
    pub fn hospital_id(&self) -> &str {
        &self.hospital_id
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn day(&self, day: DayOfWeek) -> &ScheduleDayEditor<S> {
        &self.days[day.index()]
    }

    pub fn day_mut(&mut self, day: DayOfWeek) -> &mut ScheduleDayEditor<S> {
        &mut self.days[day.index()]
    }

    pub fn days(&self) -> impl Iterator<Item = &ScheduleDayEditor<S>> {
        self.days.iter()
    }

    /// Hydrates all seven days from an external template.
    ///
    /// Decoding happens before any day is touched, so a malformed template
    /// leaves the store exactly as it was. Loading is refused during a drag.
    pub fn load(&mut self, template: &PersistedTemplate) -> ScheduleResult<LoadReport> {
        if self.days.iter().any(|editor| editor.is_dragging()) {
            return Err(ScheduleError::InvalidData(
                "cannot load a template while a drag is in progress".to_owned(),
            ));
        }
        let decoded = decode_template(template, &self.ids, self.config.rules())?;

        for (editor, blocks) in self.days.iter_mut().zip(decoded.days) {
            editor.replace_blocks(blocks);
        }
        self.mark_saved();
        debug!(
            hospital_id = %self.hospital_id,
            loaded_blocks = decoded.report.loaded_blocks,
            dropped_records = decoded.report.dropped_records,
            "loaded weekly template"
        );
        Ok(decoded.report)
    }

    /// Fetches the template once from `repository` and loads it.
    pub fn refresh(
        &mut self,
        repository: &mut impl TemplateRepository,
    ) -> ScheduleResult<LoadReport> {
        let template = repository.load_template(&self.hospital_id)?;
        self.load(&template)
    }

    /// Serializes the committed state of all seven days.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedTemplate {
        let days = self
            .days
            .iter()
            .flat_map(|editor| {
                encode_day(
                    editor.day(),
                    editor.schedule().blocks(),
                    &self.config.closed_day_section_name,
                )
            })
            .collect();
        PersistedTemplate::new(days)
    }

    /// Explicit save: one persistence call, then one notification.
    ///
    /// A failure is reported through `notifications` and returned; in-memory
    /// edits are kept as they are so the user can retry.
    pub fn save(
        &mut self,
        repository: &mut impl TemplateRepository,
        notifications: &mut impl NotificationSink,
    ) -> ScheduleResult<()> {
        let template = self.to_persisted();
        match repository.save_template(&self.hospital_id, &template) {
            Ok(()) => {
                self.mark_saved();
                debug!(
                    hospital_id = %self.hospital_id,
                    records = template.days.len(),
                    "saved weekly template"
                );
                notifications.notify(NotificationKind::Success, SAVE_SUCCESS_MESSAGE);
                Ok(())
            }
            Err(err) => {
                warn!(
                    hospital_id = %self.hospital_id,
                    error = %err,
                    "weekly template save failed, keeping in-memory edits"
                );
                notifications.notify(NotificationKind::Failure, SAVE_FAILURE_MESSAGE);
                Err(err)
            }
        }
    }

    /// Replaces one day's blocks; `false` when they do not form a valid day.
    pub fn replace_day(&mut self, day: DayOfWeek, blocks: Vec<TimeBlock>) -> bool {
        self.day_mut(day).replace_blocks(blocks)
    }

    /// Whether the copy-previous action should be offered for `day`.
    #[must_use]
    pub fn can_copy_previous(&self, day: DayOfWeek) -> bool {
        day.previous()
            .is_some_and(|previous| !self.day(previous).schedule().is_empty())
    }

    /// Overwrites `day` with the previous day's committed blocks under fresh ids.
    pub fn copy_from_previous_day(&mut self, day: DayOfWeek) -> ScheduleResult<bool> {
        let previous = day.previous().ok_or(ScheduleError::NoPreviousDay)?;
        let source = self.day(previous).schedule().blocks().to_vec();
        Ok(self.day_mut(day).copy_from_previous_day(&source))
    }

    /// Staffs one work of one block with a doctor looked up by name.
    pub fn assign_doctor(
        &mut self,
        day: DayOfWeek,
        block_id: BlockId,
        work_index: usize,
        doctor_name: &str,
        directory: &impl DoctorDirectory,
    ) -> ScheduleResult<bool> {
        let doctor = directory
            .find_by_name(doctor_name)
            .cloned()
            .ok_or_else(|| ScheduleError::UnknownDoctor(doctor_name.to_owned()))?;
        let editor = self.day_mut(day);
        let block = editor
            .schedule()
            .get(block_id)
            .ok_or(ScheduleError::UnknownBlock(block_id))?;

        let mut works = block.works.clone();
        let Some(work) = works.get_mut(work_index) else {
            return Err(ScheduleError::InvalidData(format!(
                "block {block_id} has no work at index {work_index}"
            )));
        };
        work.doctor = Some(doctor);
        Ok(editor.set_block_works(block_id, works))
    }

    /// True when any day changed since the last successful load or save.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.days
            .iter()
            .zip(self.saved_revisions)
            .any(|(editor, saved)| editor.revision() != saved)
    }

    fn mark_saved(&mut self) {
        for (saved, editor) in self.saved_revisions.iter_mut().zip(&self.days) {
            *saved = editor.revision();
        }
    }
}
