use serde::{Deserialize, Serialize};

use super::enums::WidgetKind;

/// Canvas coordinates of a widget's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Widget dimensions in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Default for Size {
    fn default() -> Self {
        // Layouts persisted before resizing shipped carry no size field.
        Self {
            width: 320.0,
            height: 240.0,
        }
    }
}

/// The visible canvas region. Zoom is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// One widget placement on the canvas.
///
/// `data` is the widget's opaque stored state: whatever the layout service
/// persisted for it. The hydration projector replaces it with a typed
/// payload once a clinical record is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    pub position: Position,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// A visual link between two widgets. Both endpoints must reference
/// existing node ids; the store cascades removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type", default = "Connection::default_kind")]
    pub kind: String,
}

impl Connection {
    fn default_kind() -> String {
        "related".to_string()
    }
}

/// A complete canvas arrangement, as suggested by the remote record or
/// owned by the local store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasLayout {
    #[serde(default)]
    pub nodes: Vec<LayoutNode>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub viewport: Viewport,
}
