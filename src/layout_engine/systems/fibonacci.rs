use serde::{Deserialize, Serialize};

use crate::layout_engine::systems::{LayoutKind, LayoutSystem};
use crate::model::client::ClientId;
use crate::sys::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FibonacciVariant {
    /// The remainder area rotates around the screen center.
    Spiral,
    /// The remainder area always dwindles toward the bottom-right.
    Dwindle,
}

/// Fibonacci tiling: each client takes half of the remaining area, split
/// axis alternating between vertical and horizontal; the last client takes
/// whatever is left.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FibonacciLayoutSystem {
    variant: FibonacciVariant,
}

impl FibonacciLayoutSystem {
    pub fn new(variant: FibonacciVariant) -> Self { Self { variant } }

    /// Split `rest` in two along the axis for step `i`, returning the
    /// client's half and leaving the remainder in `rest`.
    fn split(&self, rest: &mut Rect, i: usize) -> Rect {
        let mut slot = *rest;
        if i % 2 == 0 {
            let half = rest.size.width / 2.0;
            slot.size.width = half;
            rest.size.width -= half;
            // Spiral steps 2 (mod 4) hand the client the far half so the
            // remainder curls back toward the origin.
            if self.variant == FibonacciVariant::Spiral && i % 4 == 2 {
                slot.origin.x = rest.origin.x + half;
            } else {
                rest.origin.x += half;
            }
        } else {
            let half = rest.size.height / 2.0;
            slot.size.height = half;
            rest.size.height -= half;
            if self.variant == FibonacciVariant::Spiral && i % 4 == 3 {
                slot.origin.y = rest.origin.y + half;
            } else {
                rest.origin.y += half;
            }
        }
        slot
    }
}

impl LayoutSystem for FibonacciLayoutSystem {
    fn kind(&self) -> LayoutKind {
        match self.variant {
            FibonacciVariant::Spiral => LayoutKind::Spiral,
            FibonacciVariant::Dwindle => LayoutKind::Dwindle,
        }
    }

    fn calculate(&self, frame: Rect, clients: &[ClientId]) -> Vec<(ClientId, Rect)> {
        let mut out = Vec::with_capacity(clients.len());
        let mut rest = frame;
        for (i, &client) in clients.iter().enumerate() {
            let slot = if i + 1 == clients.len() { rest } else { self.split(&mut rest, i) };
            out.push((client, slot));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use slotmap::KeyData;

    use super::*;

    fn ids(n: usize) -> Vec<ClientId> {
        (1..=n as u64).map(|i| ClientId::from(KeyData::from_ffi(i << 32 | i))).collect()
    }

    fn area(r: Rect) -> f64 { r.size.width * r.size.height }

    #[test]
    fn dwindle_halves_toward_bottom_right() {
        let frame = Rect::new(0.0, 0.0, 100.0, 100.0);
        let clients = ids(4);
        let placements =
            FibonacciLayoutSystem::new(FibonacciVariant::Dwindle).calculate(frame, &clients);

        assert_eq!(placements[0].1, Rect::new(0.0, 0.0, 50.0, 100.0));
        assert_eq!(placements[1].1, Rect::new(50.0, 0.0, 50.0, 50.0));
        assert_eq!(placements[2].1, Rect::new(50.0, 50.0, 25.0, 50.0));
        assert_eq!(placements[3].1, Rect::new(75.0, 50.0, 25.0, 50.0));
    }

    #[test]
    fn spiral_curls_back_toward_the_origin() {
        let frame = Rect::new(0.0, 0.0, 100.0, 100.0);
        let clients = ids(4);
        let placements =
            FibonacciLayoutSystem::new(FibonacciVariant::Spiral).calculate(frame, &clients);

        assert_eq!(placements[0].1, Rect::new(0.0, 0.0, 50.0, 100.0));
        assert_eq!(placements[1].1, Rect::new(50.0, 0.0, 50.0, 50.0));
        assert_eq!(placements[2].1, Rect::new(75.0, 50.0, 25.0, 50.0));
        assert_eq!(placements[3].1, Rect::new(50.0, 50.0, 25.0, 50.0));
    }

    #[test]
    fn placements_cover_the_frame() {
        let frame = Rect::new(0.0, 0.0, 128.0, 64.0);
        for variant in [FibonacciVariant::Spiral, FibonacciVariant::Dwindle] {
            for n in 1..=5 {
                let clients = ids(n);
                let placements = FibonacciLayoutSystem::new(variant).calculate(frame, &clients);
                let total: f64 = placements.iter().map(|&(_, r)| area(r)).sum();
                assert_eq!(total, area(frame), "{variant:?} with {n} clients");
            }
        }
    }

    #[test]
    fn single_client_fills_frame() {
        let frame = Rect::new(0.0, 0.0, 100.0, 100.0);
        let clients = ids(1);
        let placements =
            FibonacciLayoutSystem::new(FibonacciVariant::Spiral).calculate(frame, &clients);
        assert_eq!(placements, vec![(clients[0], frame)]);
    }
}
