use serde::{Deserialize, Serialize};

use crate::layout_engine::systems::{LayoutKind, LayoutSystem};
use crate::model::client::ClientId;
use crate::sys::geometry::Rect;

/// Master/stack tiling: the first `master_count` clients share a master
/// column sized by `master_width_factor`, the rest stack in the remaining
/// column. With no stack clients the masters take the full width.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TileLayoutSystem {
    master_width_factor: f64,
    master_count: usize,
}

impl Default for TileLayoutSystem {
    fn default() -> Self { Self::new(0.6, 1) }
}

impl TileLayoutSystem {
    pub fn new(master_width_factor: f64, master_count: usize) -> Self {
        Self {
            master_width_factor: master_width_factor.clamp(0.05, 0.95),
            master_count: master_count.max(1),
        }
    }

    fn column(frame: Rect, x: f64, width: f64, clients: &[ClientId], out: &mut Vec<(ClientId, Rect)>) {
        if clients.is_empty() {
            return;
        }
        let height = frame.size.height / clients.len() as f64;
        for (i, &client) in clients.iter().enumerate() {
            out.push((
                client,
                Rect::new(x, frame.origin.y + height * i as f64, width, height),
            ));
        }
    }
}

impl LayoutSystem for TileLayoutSystem {
    fn kind(&self) -> LayoutKind { LayoutKind::Tile }

    fn calculate(&self, frame: Rect, clients: &[ClientId]) -> Vec<(ClientId, Rect)> {
        let mut out = Vec::with_capacity(clients.len());
        let nmaster = self.master_count.min(clients.len());
        let (masters, stack) = clients.split_at(nmaster);

        let master_width = if stack.is_empty() {
            frame.size.width
        } else {
            frame.size.width * self.master_width_factor
        };

        Self::column(frame, frame.origin.x, master_width, masters, &mut out);
        Self::column(
            frame,
            frame.origin.x + master_width,
            frame.size.width - master_width,
            stack,
            &mut out,
        );
        out
    }
}
