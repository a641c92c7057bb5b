use crate::model::client::ClientId;
use crate::model::screen::ScreenId;
use crate::sys::geometry::Rect;

/// Opaque handle for a surface known to the window server. The root surface
/// of a screen and client windows both appear here; the layout core never
/// interprets the value beyond equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Result of a pointer query: which surfaces sit under the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerQuery {
    pub root: Option<SurfaceId>,
    pub child: Option<SurfaceId>,
}

impl PointerQuery {
    /// True when the pointer rests on the root surface rather than on a
    /// client window.
    pub fn over_root(&self) -> bool {
        match (self.root, self.child) {
            (None, _) | (_, None) => true,
            (Some(root), Some(child)) => root == child,
        }
    }
}

/// Boundary to the windowing system. The layout core only needs property
/// storage, a pointer query, and per-window show/hide/frame/focus/grab
/// primitives; everything else about the display connection stays behind
/// this trait.
pub trait WindowServer {
    fn show_window(&mut self, id: ClientId);
    fn hide_window(&mut self, id: ClientId);
    fn apply_frame(&mut self, id: ClientId, frame: Rect);
    fn focus_window(&mut self, id: ClientId);

    /// Re-bind button grabs to the root surface of `screen`.
    fn grab_root_buttons(&mut self, screen: ScreenId);

    /// Query pointer position on `screen`. `None` means the query failed and
    /// callers should skip pointer-dependent work.
    fn query_pointer(&mut self, screen: ScreenId) -> Option<PointerQuery>;

    fn get_property(&self, screen: ScreenId, name: &str) -> Option<Vec<u8>>;
    fn set_property(&mut self, screen: ScreenId, name: &str, value: &[u8]);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::common::collections::HashMap;

    /// Records every call so tests can assert on the exact window-server
    /// traffic an operation produced.
    #[derive(Default)]
    pub(crate) struct RecordingServer {
        pub shown: Vec<ClientId>,
        pub hidden: Vec<ClientId>,
        pub frames: Vec<(ClientId, Rect)>,
        pub focused: Vec<ClientId>,
        pub grabs: Vec<ScreenId>,
        pub properties: HashMap<(ScreenId, String), Vec<u8>>,
        pub pointer: Option<PointerQuery>,
    }

    impl RecordingServer {
        pub(crate) fn clear_log(&mut self) {
            self.shown.clear();
            self.hidden.clear();
            self.frames.clear();
            self.focused.clear();
            self.grabs.clear();
        }
    }

    impl WindowServer for RecordingServer {
        fn show_window(&mut self, id: ClientId) { self.shown.push(id); }

        fn hide_window(&mut self, id: ClientId) { self.hidden.push(id); }

        fn apply_frame(&mut self, id: ClientId, frame: Rect) { self.frames.push((id, frame)); }

        fn focus_window(&mut self, id: ClientId) { self.focused.push(id); }

        fn grab_root_buttons(&mut self, screen: ScreenId) { self.grabs.push(screen); }

        fn query_pointer(&mut self, _screen: ScreenId) -> Option<PointerQuery> { self.pointer }

        fn get_property(&self, screen: ScreenId, name: &str) -> Option<Vec<u8>> {
            self.properties.get(&(screen, name.to_string())).cloned()
        }

        fn set_property(&mut self, screen: ScreenId, name: &str, value: &[u8]) {
            self.properties.insert((screen, name.to_string()), value.to_vec());
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn pointer_over_root_when_child_missing_or_equal() {
        let root = SurfaceId(1);
        let child = SurfaceId(7);

        assert!(PointerQuery { root: None, child: None }.over_root());
        assert!(PointerQuery { root: Some(root), child: None }.over_root());
        assert!(PointerQuery { root: Some(root), child: Some(root) }.over_root());
        assert_eq!(
            PointerQuery {
                root: Some(root),
                child: Some(child)
            }
            .over_root(),
            false
        );
    }
}
