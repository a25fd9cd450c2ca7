use serde::{Deserialize, Serialize};

/// Error raised when a wire string does not match any enum variant.
#[derive(Debug, thiserror::Error)]
#[error("Invalid {field}: '{value}'")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr + Display pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Flag {
    Normal => "normal",
    Low => "low",
    High => "high",
    Critical => "critical",
});

str_enum!(Urgency {
    Low => "low",
    Medium => "medium",
    High => "high",
    Critical => "critical",
});

str_enum!(Role {
    Clinician => "clinician",
    Analyst => "analyst",
    Admin => "admin",
});

/// Widget kinds the canvas knows how to hydrate.
///
/// Wire strings match the node `type` field emitted by the layout service.
/// `Unknown` absorbs node types from newer layouts; the projector passes
/// their stored data through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    #[serde(rename = "patientSummary")]
    PatientSummary,
    #[serde(rename = "vitalsChart")]
    VitalsChart,
    #[serde(rename = "labResults")]
    LabResults,
    #[serde(rename = "documentViewer")]
    DocumentViewer,
    #[serde(rename = "aiQuestionBox")]
    QuestionBox,
    #[serde(rename = "SOAPGenerator")]
    NoteGenerator,
    #[serde(rename = "Timeline")]
    Timeline,
    #[serde(rename = "analyticsReport")]
    AnalyticsReport,
    #[serde(rename = "systemAdmin")]
    SystemAdmin,
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn flag_round_trip() {
        for (variant, s) in [
            (Flag::Normal, "normal"),
            (Flag::Low, "low"),
            (Flag::High, "high"),
            (Flag::Critical, "critical"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Flag::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn urgency_round_trip() {
        for (variant, s) in [
            (Urgency::Low, "low"),
            (Urgency::Medium, "medium"),
            (Urgency::High, "high"),
            (Urgency::Critical, "critical"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Urgency::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn role_round_trip() {
        for (variant, s) in [
            (Role::Clinician, "clinician"),
            (Role::Analyst, "analyst"),
            (Role::Admin, "admin"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Role::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(Flag::from_str("elevated").is_err());
        assert!(Role::from_str("nurse").is_err());
        assert!(Urgency::from_str("").is_err());
    }

    #[test]
    fn enums_serialize_as_wire_strings() {
        assert_eq!(serde_json::to_string(&Flag::High).unwrap(), "\"high\"");
        assert_eq!(
            serde_json::to_string(&Urgency::Critical).unwrap(),
            "\"critical\""
        );
        assert_eq!(
            serde_json::to_string(&Role::Clinician).unwrap(),
            "\"clinician\""
        );
    }

    #[test]
    fn widget_kind_deserializes_wire_names() {
        for (json, kind) in [
            ("\"patientSummary\"", WidgetKind::PatientSummary),
            ("\"vitalsChart\"", WidgetKind::VitalsChart),
            ("\"labResults\"", WidgetKind::LabResults),
            ("\"documentViewer\"", WidgetKind::DocumentViewer),
            ("\"aiQuestionBox\"", WidgetKind::QuestionBox),
            ("\"SOAPGenerator\"", WidgetKind::NoteGenerator),
            ("\"Timeline\"", WidgetKind::Timeline),
            ("\"analyticsReport\"", WidgetKind::AnalyticsReport),
            ("\"systemAdmin\"", WidgetKind::SystemAdmin),
        ] {
            let parsed: WidgetKind = serde_json::from_str(json).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn unknown_widget_kind_absorbs_new_types() {
        let parsed: WidgetKind = serde_json::from_str("\"holoProjector\"").unwrap();
        assert_eq!(parsed, WidgetKind::Unknown);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Role::Analyst.to_string(), "analyst");
        assert_eq!(Flag::Critical.to_string(), "critical");
    }
}
