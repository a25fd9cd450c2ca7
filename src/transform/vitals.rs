//! Vitals grouping.
//!
//! The backend serves vitals as a flat list of rows; the canvas wants one
//! trend series per vital, flagged and chronologically ordered.

use chrono::NaiveDate;

use super::flags::flag_for;
use crate::client::ClinicalEntryPayload;
use crate::models::{VitalGroup, VitalReading};

/// "blood_pressure_systolic" → "Blood Pressure Systolic".
pub fn prettify_name(raw: &str) -> String {
    raw.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a clinical date, dropping rows a trend series cannot place.
pub(super) fn parse_date(raw: &str, context: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::warn!(date = raw, context, "Dropping entry with unparseable date");
            None
        }
    }
}

/// Group flat vitals rows into per-vital trend series.
///
/// Groups keep the order their vital first appeared in; readings within a
/// group are sorted ascending by date. Each reading is flagged against its
/// own reference range.
pub fn group_vitals(entries: &[ClinicalEntryPayload]) -> Vec<VitalGroup> {
    let mut groups: Vec<(String, VitalGroup)> = Vec::new();

    for entry in entries {
        let Some(date) = parse_date(&entry.date_recorded, "vital") else {
            continue;
        };
        let reading = VitalReading {
            date,
            value: entry.value.clone(),
            unit: entry.unit.clone(),
            reference_range: entry.reference_range.clone(),
            flag: flag_for(&entry.value, &entry.reference_range),
        };

        match groups.iter_mut().find(|(raw, _)| *raw == entry.name) {
            Some((_, group)) => group.readings.push(reading),
            None => groups.push((
                entry.name.clone(),
                VitalGroup {
                    name: prettify_name(&entry.name),
                    readings: vec![reading],
                },
            )),
        }
    }

    let mut groups: Vec<VitalGroup> = groups.into_iter().map(|(_, g)| g).collect();
    for group in &mut groups {
        group.readings.sort_by_key(|r| r.date);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Flag;

    fn entry(name: &str, value: &str, range: &str, date: &str) -> ClinicalEntryPayload {
        ClinicalEntryPayload {
            name: name.into(),
            value: value.into(),
            unit: "mmHg".into(),
            reference_range: range.into(),
            date_recorded: date.into(),
        }
    }

    #[test]
    fn prettify_title_cases_underscored_names() {
        assert_eq!(prettify_name("blood_pressure_systolic"), "Blood Pressure Systolic");
        assert_eq!(prettify_name("heart_rate"), "Heart Rate");
        assert_eq!(prettify_name("temperature"), "Temperature");
        assert_eq!(prettify_name(""), "");
    }

    #[test]
    fn groups_by_name_preserving_first_seen_order() {
        let entries = vec![
            entry("heart_rate", "78", "60-100", "2024-07-28"),
            entry("blood_pressure_systolic", "142", "90-140", "2024-07-28"),
            entry("heart_rate", "82", "60-100", "2024-07-29"),
        ];
        let groups = group_vitals(&entries);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Heart Rate");
        assert_eq!(groups[0].readings.len(), 2);
        assert_eq!(groups[1].name, "Blood Pressure Systolic");
    }

    #[test]
    fn readings_sorted_ascending_by_date() {
        let entries = vec![
            entry("heart_rate", "82", "60-100", "2024-07-29"),
            entry("heart_rate", "78", "60-100", "2024-07-27"),
            entry("heart_rate", "80", "60-100", "2024-07-28"),
        ];
        let groups = group_vitals(&entries);
        let dates: Vec<String> = groups[0]
            .readings
            .iter()
            .map(|r| r.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2024-07-27", "2024-07-28", "2024-07-29"]);
    }

    #[test]
    fn each_reading_is_flagged_independently() {
        let entries = vec![
            entry("blood_pressure_systolic", "142", "90-140", "2024-07-28"),
            entry("blood_pressure_systolic", "120", "90-140", "2024-07-29"),
        ];
        let groups = group_vitals(&entries);
        assert_eq!(groups[0].readings[0].flag, Flag::High);
        assert_eq!(groups[0].readings[1].flag, Flag::Normal);
    }

    #[test]
    fn unparseable_dates_are_dropped() {
        let entries = vec![
            entry("heart_rate", "78", "60-100", "2024-07-28"),
            entry("heart_rate", "80", "60-100", "yesterday"),
        ];
        let groups = group_vitals(&entries);
        assert_eq!(groups[0].readings.len(), 1);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_vitals(&[]).is_empty());
    }
}
