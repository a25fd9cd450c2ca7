//! Derived chronological timeline.
//!
//! Every vital reading and every lab test projects into one event; the
//! combined list is sorted descending by date (most recent first). Event
//! urgency is a deliberate simplification: critical iff the source flag was
//! critical, otherwise low — per-category refinement belongs to the UI.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ClinicalRecord, Flag, Urgency};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventType {
    Vital,
    Lab,
}

/// One point on the merged timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Deterministic composite of kind, source name, date, and ordinal.
    pub id: String,
    pub date: NaiveDate,
    pub event_type: TimelineEventType,
    pub title: String,
    pub description: String,
    pub urgency: Urgency,
}

/// Project a record's vitals and labs onto a single descending timeline.
pub fn derive_timeline(record: &ClinicalRecord) -> Vec<TimelineEvent> {
    let mut events = Vec::new();

    for group in &record.vitals {
        for (ordinal, reading) in group.readings.iter().enumerate() {
            events.push(TimelineEvent {
                id: format!("vital-{}-{}-{}", slug(&group.name), reading.date, ordinal),
                date: reading.date,
                event_type: TimelineEventType::Vital,
                title: group.name.clone(),
                description: describe(&reading.value, &reading.unit, &reading.reference_range),
                urgency: urgency_from_flag(reading.flag),
            });
        }
    }

    for category in &record.labs {
        for (ordinal, test) in category.tests.iter().enumerate() {
            events.push(TimelineEvent {
                id: format!("lab-{}-{}-{}", slug(&test.name), test.date, ordinal),
                date: test.date,
                event_type: TimelineEventType::Lab,
                title: test.name.clone(),
                description: describe(&test.value, &test.unit, &test.reference_range),
                urgency: urgency_from_flag(test.flag),
            });
        }
    }

    // Stable sort: events sharing a date keep vitals-then-labs input order.
    events.sort_by(|a, b| b.date.cmp(&a.date));
    events
}

fn urgency_from_flag(flag: Flag) -> Urgency {
    match flag {
        Flag::Critical => Urgency::Critical,
        _ => Urgency::Low,
    }
}

fn describe(value: &str, unit: &str, reference_range: &str) -> String {
    let measured = if unit.is_empty() {
        value.to_string()
    } else {
        format!("{value} {unit}")
    };
    let range = reference_range.trim();
    if range.is_empty() || range.eq_ignore_ascii_case("n/a") {
        measured
    } else {
        format!("{measured} (ref {range})")
    }
}

fn slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}
