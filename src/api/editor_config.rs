use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{
    GRAIN_MINUTES, IntervalRules, MAX_MINUTE, MIN_DURATION_MINUTES, MINUTES_PER_DAY,
};
use crate::error::{ScheduleError, ScheduleResult};

/// Tunables shared by every day editor of a weekly template.
///
/// Serializable so hosts can keep editor setup alongside their own settings.
/// Missing fields fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_grain_minutes")]
    pub grain_minutes: u16,
    #[serde(default = "default_min_duration_minutes")]
    pub min_duration_minutes: u16,
    #[serde(default = "default_click_suppression_ms")]
    pub click_suppression_ms: u64,
    #[serde(default = "default_placeholder_prefix")]
    pub placeholder_prefix: String,
    #[serde(default = "default_closed_day_section_name")]
    pub closed_day_section_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grain_minutes: default_grain_minutes(),
            min_duration_minutes: default_min_duration_minutes(),
            click_suppression_ms: default_click_suppression_ms(),
            placeholder_prefix: default_placeholder_prefix(),
            closed_day_section_name: default_closed_day_section_name(),
        }
    }
}

impl EditorConfig {
    #[must_use]
    pub fn with_grain_minutes(mut self, grain_minutes: u16) -> Self {
        self.grain_minutes = grain_minutes;
        self
    }

    #[must_use]
    pub fn with_min_duration_minutes(mut self, min_duration_minutes: u16) -> Self {
        self.min_duration_minutes = min_duration_minutes;
        self
    }

    #[must_use]
    pub fn with_click_suppression_ms(mut self, click_suppression_ms: u64) -> Self {
        self.click_suppression_ms = click_suppression_ms;
        self
    }

    #[must_use]
    pub fn with_placeholder_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.placeholder_prefix = prefix.into();
        self
    }

    pub fn validate(&self) -> ScheduleResult<()> {
        if self.grain_minutes == 0 || self.grain_minutes >= MINUTES_PER_DAY {
            return Err(ScheduleError::InvalidConfig(format!(
                "grain_minutes must be in 1..{MINUTES_PER_DAY}, got {}",
                self.grain_minutes
            )));
        }
        if self.min_duration_minutes == 0 || self.min_duration_minutes > MAX_MINUTE {
            return Err(ScheduleError::InvalidConfig(format!(
                "min_duration_minutes must be in 1..={MAX_MINUTE}, got {}",
                self.min_duration_minutes
            )));
        }
        if self.placeholder_prefix.trim().is_empty() {
            return Err(ScheduleError::InvalidConfig(
                "placeholder_prefix must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ScheduleResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ScheduleError::InvalidConfig(format!("failed to parse editor config json: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn rules(&self) -> IntervalRules {
        IntervalRules::new(self.min_duration_minutes)
    }

    #[must_use]
    pub fn click_suppression_window(&self) -> Duration {
        Duration::from_millis(self.click_suppression_ms)
    }
}

fn default_grain_minutes() -> u16 {
    GRAIN_MINUTES
}

fn default_min_duration_minutes() -> u16 {
    MIN_DURATION_MINUTES
}

fn default_click_suppression_ms() -> u64 {
    100
}

fn default_placeholder_prefix() -> String {
    "Shift".to_owned()
}

fn default_closed_day_section_name() -> String {
    "Closed".to_owned()
}
