use serde::{Deserialize, Serialize};

use crate::layout_engine::systems::{LayoutKind, LayoutSystem};
use crate::model::client::ClientId;
use crate::sys::geometry::Rect;

/// Floating placement: client geometry is left wherever the user (or the
/// client itself) put it, so no placements are produced.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FloatingLayoutSystem {}

impl LayoutSystem for FloatingLayoutSystem {
    fn kind(&self) -> LayoutKind { LayoutKind::Floating }

    fn calculate(&self, _frame: Rect, _clients: &[ClientId]) -> Vec<(ClientId, Rect)> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use slotmap::KeyData;

    use super::*;

    #[test]
    fn floating_never_places_anything() {
        let clients: Vec<ClientId> =
            (1..=2u64).map(|i| ClientId::from(KeyData::from_ffi(i << 32 | i))).collect();
        let placements =
            FloatingLayoutSystem::default().calculate(Rect::new(0.0, 0.0, 100.0, 100.0), &clients);
        assert!(placements.is_empty());
    }
}
