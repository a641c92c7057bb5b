use serde::{Deserialize, Serialize};

use crate::common::config::Config;
use crate::layout_engine::LayoutSystemKind;
use crate::model::tag::TagRegistry;
use crate::sys::geometry::Rect;

/// Index into the process-wide screen list. Screen cardinality is fixed at
/// startup, so indices stay valid for the lifetime of the manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScreenId(usize);

impl ScreenId {
    pub fn new(index: usize) -> Self { Self(index) }

    pub fn index(self) -> usize { self.0 }
}

impl std::fmt::Display for ScreenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { self.0.fmt(f) }
}

/// Ordered roster of layout strategies for one screen, traversed circularly.
/// Configuration guarantees at least one entry; the degenerate empty case is
/// tolerated with head/no-op fallbacks rather than panics.
#[derive(Debug, Serialize, Deserialize)]
pub struct LayoutRegistry {
    systems: Vec<LayoutSystemKind>,
}

impl LayoutRegistry {
    pub fn new(systems: Vec<LayoutSystemKind>) -> Self { Self { systems } }

    pub fn len(&self) -> usize { self.systems.len() }

    pub fn is_empty(&self) -> bool { self.systems.is_empty() }

    pub fn get(&self, index: usize) -> Option<&LayoutSystemKind> { self.systems.get(index) }

    pub fn iter(&self) -> impl Iterator<Item = &LayoutSystemKind> { self.systems.iter() }

    /// Clamp a possibly-stale binding back into range. Index 0 is the
    /// defensive fallback when a bound layout no longer resolves.
    pub fn resolve(&self, index: usize) -> usize {
        if index < self.systems.len() { index } else { 0 }
    }

    /// Step `delta` entries from `from`, wrapping in either direction.
    pub fn cycle(&self, from: usize, delta: i64) -> usize {
        let n = self.systems.len() as i64;
        if n == 0 {
            return 0;
        }
        // Reduce the delta first so extreme offsets cannot overflow the sum.
        (self.resolve(from) as i64 + delta.rem_euclid(n)).rem_euclid(n) as usize
    }
}

/// One managed display region: its tag set, layout roster, and the dirty
/// flag that gates arrangement.
#[derive(Debug)]
pub struct Screen {
    pub frame: Rect,
    pub tags: TagRegistry,
    pub layouts: LayoutRegistry,
    /// Sole trigger for an arrangement pass; cleared only when a pass
    /// completes.
    pub needs_arrange: bool,
    /// Whether freshly mapped clients receive focus after their first
    /// reconciliation.
    pub focus_new_clients: bool,
}

impl Screen {
    pub fn new(frame: Rect, tags: TagRegistry, layouts: LayoutRegistry) -> Self {
        Self {
            frame,
            tags,
            layouts,
            needs_arrange: true,
            focus_new_clients: true,
        }
    }

    pub fn from_config(frame: Rect, config: &Config) -> Self {
        let tags = TagRegistry::from_names(config.tags.names.iter().cloned());
        let systems = config
            .layout
            .roster
            .iter()
            .map(|kind| LayoutSystemKind::from_kind(*kind, &config.layout))
            .collect();
        let mut screen = Self::new(frame, tags, LayoutRegistry::new(systems));
        screen.focus_new_clients = config.layout.focus_new_clients;
        screen
    }

    /// Index of the layout governing this screen: the effective tag's
    /// binding, clamped to the registry. Falls back to the registry head
    /// when the screen has no tags at all.
    pub fn current_layout_index(&self) -> usize {
        self.layouts.resolve(self.tags.current_layout().unwrap_or(0))
    }

    pub fn current_layout(&self) -> Option<&LayoutSystemKind> {
        self.layouts.get(self.current_layout_index())
    }
}
