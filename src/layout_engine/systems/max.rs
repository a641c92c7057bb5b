use serde::{Deserialize, Serialize};

use crate::layout_engine::systems::{LayoutKind, LayoutSystem};
use crate::model::client::ClientId;
use crate::sys::geometry::Rect;

/// Every visible client gets the full screen frame; stacking order decides
/// which one is actually seen.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MaxLayoutSystem {}

impl LayoutSystem for MaxLayoutSystem {
    fn kind(&self) -> LayoutKind { LayoutKind::Max }

    fn calculate(&self, frame: Rect, clients: &[ClientId]) -> Vec<(ClientId, Rect)> {
        clients.iter().map(|&c| (c, frame)).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use slotmap::KeyData;

    use super::*;

    #[test]
    fn every_client_is_maximized() {
        let frame = Rect::new(10.0, 20.0, 1280.0, 720.0);
        let clients: Vec<ClientId> =
            (1..=3u64).map(|i| ClientId::from(KeyData::from_ffi(i << 32 | i))).collect();

        let placements = MaxLayoutSystem::default().calculate(frame, &clients);
        assert_eq!(placements.len(), 3);
        for (_, rect) in placements {
            assert_eq!(rect, frame);
        }
    }
}
