use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::common::config::LayoutSettings;
use crate::model::client::ClientId;
use crate::sys::geometry::Rect;

/// Widget-facing identifier for a layout strategy.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LayoutKind {
    Tile,
    Max,
    Spiral,
    Dwindle,
    Floating,
}

/// A placement strategy. `calculate` is pure: given the screen frame and the
/// visible clients in stacking order, produce target frames. The engine
/// applies the result without inspecting it; a strategy that returns no
/// placements (floating) leaves geometry alone.
#[enum_dispatch]
pub trait LayoutSystem {
    fn kind(&self) -> LayoutKind;

    fn calculate(&self, frame: Rect, clients: &[ClientId]) -> Vec<(ClientId, Rect)>;
}

mod fibonacci;
mod floating;
mod max;
mod tile;
pub use fibonacci::{FibonacciLayoutSystem, FibonacciVariant};
pub use floating::FloatingLayoutSystem;
pub use max::MaxLayoutSystem;
pub use tile::TileLayoutSystem;

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[enum_dispatch(LayoutSystem)]
pub enum LayoutSystemKind {
    Tile(TileLayoutSystem),
    Max(MaxLayoutSystem),
    Fibonacci(FibonacciLayoutSystem),
    Floating(FloatingLayoutSystem),
}

impl LayoutSystemKind {
    pub fn from_kind(kind: LayoutKind, settings: &LayoutSettings) -> Self {
        match kind {
            LayoutKind::Tile => LayoutSystemKind::Tile(TileLayoutSystem::new(
                settings.master_width_factor,
                settings.master_count,
            )),
            LayoutKind::Max => LayoutSystemKind::Max(MaxLayoutSystem::default()),
            LayoutKind::Spiral => {
                LayoutSystemKind::Fibonacci(FibonacciLayoutSystem::new(FibonacciVariant::Spiral))
            }
            LayoutKind::Dwindle => {
                LayoutSystemKind::Fibonacci(FibonacciLayoutSystem::new(FibonacciVariant::Dwindle))
            }
            LayoutKind::Floating => LayoutSystemKind::Floating(FloatingLayoutSystem::default()),
        }
    }
}
