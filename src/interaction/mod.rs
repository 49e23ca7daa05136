//! Pointer-driven editing state.
//!
//! `DragSession` turns pointer events into candidate block lists and only ever
//! exposes candidates that pass the day validity rules.

mod listeners;

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::day_schedule::sort_by_start;
use crate::core::{BlockId, IntervalRules, MAX_MINUTE, TimeBlock, TimeCoordinateMapper};

pub use listeners::{DetachedListeners, ListenerLease, PointerListenerScope};

/// Which handle of a block a drag grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragKind {
    /// Grip in the block body: shifts the block, duration fixed.
    Move,
    /// Left edge handle.
    ResizeStart,
    /// Right edge handle.
    ResizeEnd,
}

/// Values captured on pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragOrigin {
    pub kind: DragKind,
    pub block_id: BlockId,
    pub origin_x: f64,
    pub origin_start: u16,
    pub origin_end: u16,
}

impl DragOrigin {
    /// Span proposed by a pointer at `current_x`, before day validation.
    #[must_use]
    pub fn candidate_span(
        self,
        current_x: f64,
        mapper: TimeCoordinateMapper,
        rules: IntervalRules,
    ) -> (u16, u16) {
        let min_duration = i32::from(rules.min_duration());
        let origin_start = i32::from(self.origin_start);
        let origin_end = i32::from(self.origin_end);
        let max_minute = i32::from(MAX_MINUTE);

        let (start, end) = match self.kind {
            DragKind::Move => {
                let duration = origin_end - origin_start;
                let delta = mapper.pixel_delta_to_minutes(current_x - self.origin_x);
                let start = (origin_start + delta).clamp(0, (max_minute - duration).max(0));
                (start, start + duration)
            }
            DragKind::ResizeStart => {
                let start = i32::from(mapper.pixel_to_minutes(current_x))
                    .min(origin_end - min_duration)
                    .max(0);
                (start, origin_end)
            }
            DragKind::ResizeEnd => {
                let end = i32::from(mapper.pixel_to_minutes(current_x))
                    .max(origin_start + min_duration)
                    .min(max_minute);
                (origin_start, end)
            }
        };

        (to_minute(start), to_minute(end))
    }
}

fn to_minute(value: i32) -> u16 {
    value.clamp(0, i32::from(u16::MAX)) as u16
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragOrigin),
}

/// Result of feeding one pointer-move into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragUpdate {
    /// No drag in progress.
    Idle,
    /// Candidate was valid and is now visible.
    Applied { start_minute: u16, end_minute: u16 },
    /// Candidate equals what is already visible.
    Unchanged,
    /// Candidate broke a day invariant; the previous list stays visible.
    Rejected,
}

/// Idle/Dragging state machine over one day's blocks.
///
/// While dragging, the session owns the visible block list (`preview`), which
/// always holds the last valid candidate.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
    preview: Vec<TimeBlock>,
}

impl DragSession {
    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    #[must_use]
    pub fn origin(&self) -> Option<DragOrigin> {
        match self.state {
            DragState::Dragging(origin) => Some(origin),
            DragState::Idle => None,
        }
    }

    /// Visible list while dragging; `None` when idle.
    #[must_use]
    pub fn preview(&self) -> Option<&[TimeBlock]> {
        self.is_active().then_some(self.preview.as_slice())
    }

    /// `Idle --pointerDown--> Dragging`.
    ///
    /// Returns `false` when a drag is already running or `block_id` is not in `blocks`.
    pub fn begin(
        &mut self,
        kind: DragKind,
        block_id: BlockId,
        client_x: f64,
        blocks: &[TimeBlock],
    ) -> bool {
        if self.is_active() {
            return false;
        }
        let Some(block) = blocks.iter().find(|block| block.id == block_id) else {
            return false;
        };

        self.state = DragState::Dragging(DragOrigin {
            kind,
            block_id,
            origin_x: client_x,
            origin_start: block.start_minute,
            origin_end: block.end_minute,
        });
        self.preview = blocks.to_vec();
        true
    }

    /// `Dragging --pointerMove--> Dragging`.
    pub fn update(
        &mut self,
        current_x: f64,
        mapper: TimeCoordinateMapper,
        rules: IntervalRules,
    ) -> DragUpdate {
        let DragState::Dragging(origin) = self.state else {
            return DragUpdate::Idle;
        };
        if !current_x.is_finite() {
            return DragUpdate::Rejected;
        }

        let (start_minute, end_minute) = origin.candidate_span(current_x, mapper, rules);
        let Some(current) = self
            .preview
            .iter()
            .find(|block| block.id == origin.block_id)
        else {
            return DragUpdate::Rejected;
        };
        if current.start_minute == start_minute && current.end_minute == end_minute {
            return DragUpdate::Unchanged;
        }

        let mut candidate: Vec<TimeBlock> = self
            .preview
            .iter()
            .map(|block| {
                if block.id == origin.block_id {
                    block.with_span(start_minute, end_minute)
                } else {
                    block.clone()
                }
            })
            .collect();
        sort_by_start(&mut candidate);

        if !rules.is_valid_day(&candidate) {
            trace!(
                block = %origin.block_id,
                start_minute,
                end_minute,
                "drag candidate rejected"
            );
            return DragUpdate::Rejected;
        }

        trace!(
            block = %origin.block_id,
            start_minute,
            end_minute,
            "drag candidate applied"
        );
        self.preview = candidate;
        DragUpdate::Applied {
            start_minute,
            end_minute,
        }
    }

    /// `Dragging --pointerUp/pointerLeave/cancel--> Idle`.
    ///
    /// Returns the last valid candidate list, or `None` when no drag was active.
    pub fn finish(&mut self) -> Option<Vec<TimeBlock>> {
        if !self.is_active() {
            return None;
        }
        self.state = DragState::Idle;
        Some(std::mem::take(&mut self.preview))
    }
}

/// Swallows the click a pointer-up may trigger right after a drag.
///
/// Armed on drag release; cleared by the next event-loop tick or once the
/// window elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickSuppression {
    window: Duration,
    armed_at: Option<Instant>,
}

impl ClickSuppression {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            armed_at: None,
        }
    }

    pub fn arm(&mut self) {
        self.arm_at(Instant::now());
    }

    pub fn arm_at(&mut self, now: Instant) {
        self.armed_at = Some(now);
    }

    pub fn clear(&mut self) {
        self.armed_at = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active_at(Instant::now())
    }

    /// Whether a click arriving at `now` should be swallowed.
    #[must_use]
    pub fn is_active_at(&self, now: Instant) -> bool {
        self.armed_at
            .is_some_and(|armed_at| now.saturating_duration_since(armed_at) < self.window)
    }
}
