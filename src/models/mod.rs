pub mod enums;
pub mod layout;
pub mod patient;
pub mod record;

pub use enums::{Flag, InvalidEnum, Role, Urgency, WidgetKind};
pub use layout::{CanvasLayout, Connection, LayoutNode, Position, Size, Viewport};
pub use patient::Patient;
pub use record::{
    ClinicalRecord, DocumentRef, LabCategory, LabTest, QaPair, SoapNote, SoapSections,
    VitalGroup, VitalReading,
};
