pub mod engine;
pub mod systems;
mod visibility;

pub use engine::{LayoutEngine, PROPERTIES_PROPERTY, WidgetInvalidation};
pub use systems::{
    FibonacciLayoutSystem, FloatingLayoutSystem, LayoutKind, LayoutSystem, LayoutSystemKind,
    MaxLayoutSystem, TileLayoutSystem,
};
