use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::day_schedule::sort_by_start;
use crate::core::{
    BlockIdAllocator, DayOfWeek, IntervalRules, TimeBlock, Work, minutes_to_clock, parse_clock,
};
use crate::error::{ScheduleError, ScheduleResult};

/// Shared time range of a persisted day record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

/// One persisted record: a section with the works staffed inside it.
///
/// A day with several blocks persists as several records sharing `day_of_week`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedDay {
    pub day_of_week: u8,
    pub section: Section,
    #[serde(default)]
    pub works: Vec<Work>,
}

/// Weekly template as exchanged with the persistence API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedTemplate {
    pub days: Vec<PersistedDay>,
}

impl PersistedTemplate {
    #[must_use]
    pub fn new(days: Vec<PersistedDay>) -> Self {
        Self { days }
    }

    pub fn to_json_pretty(&self) -> ScheduleResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ScheduleError::InvalidData(format!("failed to serialize weekly template: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ScheduleResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ScheduleError::InvalidData(format!("failed to parse weekly template json: {e}"))
        })
    }
}

/// Outcome of hydrating a weekly template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub loaded_blocks: usize,
    pub closed_markers: usize,
    pub dropped_records: usize,
}

/// Block lists per day, indexed by [`DayOfWeek::index`].
pub(crate) struct DecodedTemplate {
    pub days: [Vec<TimeBlock>; 7],
    pub report: LoadReport,
}

/// Encodes one day: one record per block, or a single closed marker.
#[must_use]
pub fn encode_day(day: DayOfWeek, blocks: &[TimeBlock], closed_name: &str) -> Vec<PersistedDay> {
    if blocks.is_empty() {
        return vec![PersistedDay {
            day_of_week: day.value(),
            section: Section {
                name: closed_name.to_owned(),
                start_time: minutes_to_clock(0),
                end_time: minutes_to_clock(0),
            },
            works: Vec::new(),
        }];
    }

    blocks
        .iter()
        .map(|block| PersistedDay {
            day_of_week: day.value(),
            section: Section {
                name: block.name.clone(),
                start_time: minutes_to_clock(block.start_minute),
                end_time: minutes_to_clock(block.end_minute),
            },
            works: block.works.clone(),
        })
        .collect()
}

struct ParsedRecord {
    day: DayOfWeek,
    name: String,
    start_minute: u16,
    end_minute: u16,
    works: Vec<Work>,
}

/// Decodes every record, assigning fresh ids.
///
/// Malformed days or clock strings fail the whole decode. Records that would
/// break the day invariants are dropped, earliest start wins.
pub(crate) fn decode_template(
    template: &PersistedTemplate,
    ids: &BlockIdAllocator,
    rules: IntervalRules,
) -> ScheduleResult<DecodedTemplate> {
    let mut report = LoadReport::default();
    let mut parsed = Vec::with_capacity(template.days.len());

    for record in &template.days {
        let day = DayOfWeek::new(record.day_of_week)?;
        let start_minute = parse_clock(&record.section.start_time)?;
        let end_minute = parse_clock(&record.section.end_time)?;
        // Zero-length section without works marks a closed day.
        if start_minute == end_minute && record.works.is_empty() {
            report.closed_markers += 1;
            continue;
        }
        parsed.push(ParsedRecord {
            day,
            name: record.section.name.clone(),
            start_minute,
            end_minute,
            works: record.works.clone(),
        });
    }

    let mut days: [Vec<TimeBlock>; 7] = Default::default();
    for record in parsed {
        let block = TimeBlock::new(
            ids.next_id(),
            record.name,
            record.start_minute,
            record.end_minute,
        )
        .with_works(record.works);
        days[record.day.index()].push(block);
    }

    for (index, blocks) in days.iter_mut().enumerate() {
        sort_by_start(blocks);
        let mut kept: Vec<TimeBlock> = Vec::with_capacity(blocks.len());
        for block in blocks.drain(..) {
            if rules.is_valid_block(&block) && !rules.would_overlap(&block, &kept, None) {
                kept.push(block);
            } else {
                warn!(
                    day = index,
                    name = %block.name,
                    start_minute = block.start_minute,
                    end_minute = block.end_minute,
                    "dropping persisted section that breaks day invariants"
                );
                report.dropped_records += 1;
            }
        }
        report.loaded_blocks += kept.len();
        *blocks = kept;
    }

    Ok(DecodedTemplate { days, report })
}
