use serde::{Deserialize, Serialize};

use crate::core::{BlockId, DayOfWeek, TimeBlock, minutes_to_hhmm, minutes_to_percent};
use crate::error::{ScheduleError, ScheduleResult};
use crate::interaction::{DragKind, DragOrigin};

/// Paint-ready placement of one block on its day bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockFrame {
    pub id: BlockId,
    pub name: String,
    pub left_percent: f64,
    pub width_percent: f64,
    /// `HH:MM-HH:MM` label shown under the name.
    pub label: String,
    /// Handle currently held, when this block is being dragged.
    pub active_drag: Option<DragKind>,
}

impl BlockFrame {
    pub fn validate(&self) -> ScheduleResult<()> {
        let right = self.left_percent + self.width_percent;
        if !self.left_percent.is_finite()
            || !self.width_percent.is_finite()
            || self.left_percent < 0.0
            || self.width_percent < 0.0
            || right > 100.0 + 1e-9
        {
            return Err(ScheduleError::InvalidData(format!(
                "block frame {} lies outside the bar: left={}, width={}",
                self.id, self.left_percent, self.width_percent
            )));
        }
        Ok(())
    }
}

/// Backend-agnostic scene for one day bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayFrame {
    pub day: DayOfWeek,
    pub label: String,
    /// No blocks: the bar shows the closed-day hint.
    pub closed: bool,
    pub blocks: Vec<BlockFrame>,
}

impl DayFrame {
    pub fn validate(&self) -> ScheduleResult<()> {
        for block in &self.blocks {
            block.validate()?;
        }
        Ok(())
    }
}

#[must_use]
pub fn build_day_frame(
    day: DayOfWeek,
    blocks: &[TimeBlock],
    drag: Option<DragOrigin>,
) -> DayFrame {
    let blocks = blocks
        .iter()
        .map(|block| {
            let left_percent = minutes_to_percent(block.start_minute);
            let right_percent = minutes_to_percent(block.end_minute);
            BlockFrame {
                id: block.id,
                name: block.name.clone(),
                left_percent,
                width_percent: right_percent - left_percent,
                label: format!(
                    "{}-{}",
                    minutes_to_hhmm(block.start_minute),
                    minutes_to_hhmm(block.end_minute)
                ),
                active_drag: drag
                    .filter(|origin| origin.block_id == block.id)
                    .map(|origin| origin.kind),
            }
        })
        .collect::<Vec<_>>();

    DayFrame {
        day,
        label: day.short_name().to_owned(),
        closed: blocks.is_empty(),
        blocks,
    }
}
