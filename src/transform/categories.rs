//! Lab test categorization.
//!
//! Category assignment is a total, deterministic function of test name:
//! case-insensitive substring match against per-category keyword lists,
//! evaluated in a fixed priority order, first match wins. Unmatched tests
//! land in the default category.

/// Fallback category for tests no keyword list claims.
pub const DEFAULT_CATEGORY: &str = "General/Other";

/// Priority-ordered category keyword table. Order matters: a test name
/// matching several lists is assigned to the first.
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("Renal Function", &["creatinine", "bun", "egfr", "urea", "cystatin"]),
    (
        "Electrolytes",
        &["sodium", "potassium", "chloride", "bicarbonate", "magnesium", "co2"],
    ),
    (
        "Hematology",
        &["hemoglobin", "hematocrit", "wbc", "rbc", "platelet", "mcv", "ferritin"],
    ),
    (
        "Endocrine",
        &["glucose", "hba1c", "tsh", "t3", "t4", "insulin", "parathyroid", "cortisol"],
    ),
    ("Protein Studies", &["albumin", "globulin", "protein"]),
    ("Bone/Mineral", &["calcium", "phosphorus", "phosphate", "vitamin d"]),
];

/// Resolve the category for a lab test name.
pub fn category_for(test_name: &str) -> &'static str {
    let lowered = test_name.to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|k| lowered.contains(k)) {
            return category;
        }
    }
    DEFAULT_CATEGORY
}

/// All category names in display order, default last.
pub fn category_order() -> Vec<&'static str> {
    CATEGORY_KEYWORDS
        .iter()
        .map(|(name, _)| *name)
        .chain(std::iter::once(DEFAULT_CATEGORY))
        .collect()
}
