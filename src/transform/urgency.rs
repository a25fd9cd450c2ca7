//! Urgency inference from summary text.
//!
//! The backend's urgency field is not trusted; urgency is re-derived by a
//! case-insensitive keyword scan of the clinical summary. This is an
//! illustrative heuristic, not validated medical decision support: the
//! keyword sets are data so they can be reviewed and swapped without
//! touching transport or transformation code. `Critical` is never inferred.

use crate::models::Urgency;

/// Any of these in the summary reads as high urgency.
const HIGH_URGENCY_KEYWORDS: &[&str] = &["urgent", "critical", "severe", "acute", "emergency"];

/// Any of these (with no high-urgency hit) reads as medium urgency.
const MEDIUM_URGENCY_KEYWORDS: &[&str] = &["moderate", "concerning", "requires", "follow-up"];

/// Infer urgency from a free-text clinical summary.
pub fn infer_urgency(summary: Option<&str>) -> Urgency {
    let Some(summary) = summary else {
        return Urgency::Low;
    };
    let lowered = summary.to_lowercase();

    if HIGH_URGENCY_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return Urgency::High;
    }
    if MEDIUM_URGENCY_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return Urgency::Medium;
    }
    Urgency::Low
}
