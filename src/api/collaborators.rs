use std::collections::HashMap;

use crate::core::Doctor;
use crate::error::{ScheduleError, ScheduleResult};

use super::PersistedTemplate;

/// Relational persistence behind the weekly template screen.
pub trait TemplateRepository {
    fn load_template(&mut self, hospital_id: &str) -> ScheduleResult<PersistedTemplate>;
    fn save_template(
        &mut self,
        hospital_id: &str,
        template: &PersistedTemplate,
    ) -> ScheduleResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Failure,
}

/// Toast-style user feedback, invoked once per resolved save.
pub trait NotificationSink {
    fn notify(&mut self, kind: NotificationKind, message: &str);
}

/// Read-only doctor lookup used to staff a block's works.
pub trait DoctorDirectory {
    fn doctors(&self) -> &[Doctor];

    fn find_by_name(&self, name: &str) -> Option<&Doctor> {
        self.doctors().iter().find(|doctor| doctor.name == name)
    }
}

impl DoctorDirectory for Vec<Doctor> {
    fn doctors(&self) -> &[Doctor] {
        self
    }
}

/// Map-backed repository for headless hosts and tests.
#[derive(Debug, Default)]
pub struct InMemoryTemplateRepository {
    templates: HashMap<String, PersistedTemplate>,
    pub load_calls: usize,
    pub save_calls: usize,
}

impl InMemoryTemplateRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_template(
        mut self,
        hospital_id: impl Into<String>,
        template: PersistedTemplate,
    ) -> Self {
        self.templates.insert(hospital_id.into(), template);
        self
    }

    #[must_use]
    pub fn stored(&self, hospital_id: &str) -> Option<&PersistedTemplate> {
        self.templates.get(hospital_id)
    }
}

impl TemplateRepository for InMemoryTemplateRepository {
    fn load_template(&mut self, hospital_id: &str) -> ScheduleResult<PersistedTemplate> {
        self.load_calls += 1;
        self.templates.get(hospital_id).cloned().ok_or_else(|| {
            ScheduleError::Persistence(format!("no template stored for hospital {hospital_id:?}"))
        })
    }

    fn save_template(
        &mut self,
        hospital_id: &str,
        template: &PersistedTemplate,
    ) -> ScheduleResult<()> {
        self.save_calls += 1;
        self.templates.insert(hospital_id.to_owned(), template.clone());
        Ok(())
    }
}
