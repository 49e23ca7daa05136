use tracing::{debug, trace};

use crate::core::{
    BarGeometry, BlockId, BlockIdAllocator, DayOfWeek, DaySchedule, IntervalRules, MAX_MINUTE,
    TimeBlock, TimeCoordinateMapper, Work,
};
use crate::error::ScheduleResult;
use crate::interaction::{
    ClickSuppression, DetachedListeners, DragKind, DragSession, DragState, DragUpdate,
    ListenerLease, PointerListenerScope,
};
use crate::render::{DayFrame, build_day_frame};

use super::EditorConfig;

/// Editing facade for one day of the weekly template.
///
/// The editor exclusively owns its [`DaySchedule`]. Every mutation builds a
/// proposed block list and commits it only when it is a valid day; rejected
/// proposals leave the committed state untouched and are not reported as
/// errors. While a drag runs, the drag session is the only mutator and the
/// CRUD entry points return without effect.
#[derive(Debug)]
pub struct ScheduleDayEditor<S: PointerListenerScope = DetachedListeners> {
    config: EditorConfig,
    rules: IntervalRules,
    mapper: TimeCoordinateMapper,
    ids: BlockIdAllocator,
    schedule: DaySchedule,
    drag: DragSession,
    listeners: ListenerLease<S>,
    suppression: ClickSuppression,
    revision: u64,
}

impl ScheduleDayEditor<DetachedListeners> {
    /// Standalone editor with its own id allocator and headless listeners.
    pub fn new(day: DayOfWeek, config: EditorConfig) -> ScheduleResult<Self> {
        Self::with_session(day, config, BlockIdAllocator::new(), DetachedListeners::default())
    }
}

impl<S: PointerListenerScope> ScheduleDayEditor<S> {
    /// Editor sharing `ids` with the rest of an editing session.
    pub fn with_session(
        day: DayOfWeek,
        config: EditorConfig,
        ids: BlockIdAllocator,
        listener_scope: S,
    ) -> ScheduleResult<Self> {
        config.validate()?;
        let mapper = TimeCoordinateMapper::new(BarGeometry::default(), config.grain_minutes)?;
        Ok(Self {
            rules: config.rules(),
            suppression: ClickSuppression::new(config.click_suppression_window()),
            config,
            mapper,
            ids,
            schedule: DaySchedule::empty(day),
            drag: DragSession::default(),
            listeners: ListenerLease::new(listener_scope),
            revision: 0,
        })
    }

    #[must_use]
    pub fn day(&self) -> DayOfWeek {
        self.schedule.day()
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn rules(&self) -> IntervalRules {
        self.rules
    }

    #[must_use]
    pub fn mapper(&self) -> TimeCoordinateMapper {
        self.mapper
    }

    /// Updates the bar rectangle used to map pointer positions.
    pub fn set_bar_geometry(&mut self, left: f64, width: f64) -> ScheduleResult<()> {
        self.mapper.set_bar(BarGeometry::new(left, width))
    }

    /// Blocks currently visible: the drag preview while dragging, else the committed day.
    #[must_use]
    pub fn blocks(&self) -> &[TimeBlock] {
        self.drag.preview().unwrap_or(self.schedule.blocks())
    }

    #[must_use]
    pub fn schedule(&self) -> &DaySchedule {
        &self.schedule
    }

    #[must_use]
    pub fn block(&self, id: BlockId) -> Option<&TimeBlock> {
        self.blocks().iter().find(|block| block.id == id)
    }

    /// Incremented on every committed change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    #[must_use]
    pub fn is_click_suppressed(&self) -> bool {
        self.suppression.is_active()
    }

    #[must_use]
    pub fn listener_scope(&self) -> &S {
        self.listeners.scope()
    }

    #[must_use]
    pub fn listeners_held(&self) -> bool {
        self.listeners.is_held()
    }

    /// Click on empty bar space: creates a minimum-length block starting at the snapped minute.
    ///
    /// No-op near the end of day, on overlap, during a drag, or while a
    /// post-drag click is being suppressed.
    pub fn create_block_at(&mut self, client_x: f64) -> Option<BlockId> {
        if self.drag.is_active() || self.suppression.is_active() {
            trace!(day = %self.day(), "bar click ignored");
            return None;
        }
        if !client_x.is_finite() {
            return None;
        }

        let min_duration = self.rules.min_duration();
        let start_minute = self.mapper.pixel_to_minutes(client_x);
        let end_minute = start_minute.saturating_add(min_duration).min(MAX_MINUTE);
        if end_minute - start_minute < min_duration {
            trace!(day = %self.day(), start_minute, "no room for a new block");
            return None;
        }

        let name = format!(
            "{} {}",
            self.config.placeholder_prefix,
            self.schedule.len() + 1
        );
        let block = TimeBlock::new(self.ids.next_id(), name, start_minute, end_minute);
        let id = block.id;
        let mut proposed = self.schedule.blocks().to_vec();
        proposed.push(block);

        self.commit(proposed, "create block").then_some(id)
    }

    /// Click on a block: returns it for a detail view unless the click is suppressed.
    #[must_use]
    pub fn select_block(&self, id: BlockId) -> Option<&TimeBlock> {
        if self.drag.is_active() || self.suppression.is_active() {
            return None;
        }
        self.schedule.get(id)
    }

    /// Overwrites the day with clones of `source`, each with a fresh id.
    pub fn copy_from_previous_day(&mut self, source: &[TimeBlock]) -> bool {
        if self.drag.is_active() {
            return false;
        }
        let copied = source
            .iter()
            .map(|block| TimeBlock {
                id: self.ids.next_id(),
                ..block.clone()
            })
            .collect();
        self.commit(copied, "copy from previous day")
    }

    /// Replaces the whole day with caller-built blocks (load and bulk edits).
    ///
    /// Ids must be unique within the day; adopted ids are reserved in the
    /// session allocator.
    pub fn replace_blocks(&mut self, blocks: Vec<TimeBlock>) -> bool {
        if self.drag.is_active() {
            return false;
        }
        self.commit(blocks, "replace day")
    }

    pub fn rename_block(&mut self, id: BlockId, name: impl Into<String>) -> bool {
        let name = name.into();
        self.update_block(id, "rename block", |block| block.name = name)
    }

    pub fn set_block_works(&mut self, id: BlockId, works: Vec<Work>) -> bool {
        self.update_block(id, "set block works", |block| block.works = works)
    }

    pub fn delete_block(&mut self, id: BlockId) -> bool {
        if self.drag.is_active() || self.schedule.get(id).is_none() {
            return false;
        }
        let remaining = self
            .schedule
            .blocks()
            .iter()
            .filter(|block| block.id != id)
            .cloned()
            .collect();
        self.commit(remaining, "delete block")
    }

    /// Pointer-down on a block handle.
    ///
    /// Starts a drag session and binds the document-scoped listeners.
    pub fn pointer_down(&mut self, id: BlockId, kind: DragKind, client_x: f64) -> bool {
        if !client_x.is_finite() {
            return false;
        }
        if !self
            .drag
            .begin(kind, id, client_x, self.schedule.blocks())
        {
            return false;
        }
        self.listeners.acquire();
        debug!(day = %self.day(), block = %id, ?kind, client_x, "drag started");
        true
    }

    pub fn pointer_move(&mut self, client_x: f64) -> DragUpdate {
        self.drag.update(client_x, self.mapper, self.rules)
    }

    /// Ends the drag, commits the last valid preview and suppresses the trailing click.
    pub fn pointer_up(&mut self) -> bool {
        self.end_drag(true)
    }

    /// Pointer left the interactive surface; commits like pointer-up, no click follows.
    pub fn pointer_leave(&mut self) -> bool {
        self.end_drag(false)
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.end_drag(false)
    }

    /// Next event-loop turn: clears any pending click suppression.
    pub fn tick(&mut self) {
        self.suppression.clear();
    }

    #[must_use]
    pub fn build_frame(&self) -> DayFrame {
        build_day_frame(self.day(), self.blocks(), self.drag.origin())
    }

    fn end_drag(&mut self, suppress_click: bool) -> bool {
        let finished = self.drag.finish();
        self.listeners.release();
        let Some(blocks) = finished else {
            return false;
        };

        if blocks.as_slice() != self.schedule.blocks() {
            self.commit(blocks, "commit drag");
        }
        if suppress_click {
            self.suppression.arm();
        }
        true
    }

    fn update_block(
        &mut self,
        id: BlockId,
        action: &'static str,
        apply: impl FnOnce(&mut TimeBlock),
    ) -> bool {
        if self.drag.is_active() {
            return false;
        }
        let mut proposed = self.schedule.blocks().to_vec();
        let Some(block) = proposed.iter_mut().find(|block| block.id == id) else {
            return false;
        };
        apply(block);
        self.commit(proposed, action)
    }

    fn commit(&mut self, proposed: Vec<TimeBlock>, action: &'static str) -> bool {
        if !self.schedule.try_replace(proposed, self.rules) {
            debug!(day = %self.day(), action, "rejected invalid day proposal");
            return false;
        }
        for block in self.schedule.blocks() {
            self.ids.reserve(block.id);
        }
        self.revision += 1;
        debug!(
            day = %self.day(),
            action,
            blocks = self.schedule.len(),
            revision = self.revision,
            "committed day"
        );
        true
    }
}
