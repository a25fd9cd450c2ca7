use serde::{Deserialize, Serialize};

/// Patient identity as served by `GET /patients`.
///
/// Immutable for the duration of a session; replaced wholesale when the
/// active patient changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
}
