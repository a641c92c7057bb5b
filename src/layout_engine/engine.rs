use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::layout_engine::systems::LayoutSystem;
use crate::layout_engine::visibility;
use crate::model::client::{Client, ClientId, ClientList};
use crate::model::screen::{Screen, ScreenId};
use crate::sys::geometry::Rect;
use crate::sys::window_server::WindowServer;

/// Well-known root-surface property holding the persisted tag selection:
/// one ASCII '1'/'0' per tag in registry order.
pub const PROPERTIES_PROPERTY: &str = "_ATRIUM_PROPERTIES";

/// Fire-and-forget notification that layout-derived widget state went
/// stale and caches should be rebuilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "scope")]
pub enum WidgetInvalidation {
    Layouts { screen: ScreenId },
}

/// The arrangement core: owns the screen list, the client list, and the
/// process-wide focus note, and drives every arrangement pass through the
/// window-server boundary.
///
/// Single-threaded by design; `needs_arrange` doubles as the scheduling
/// signal and the de-duplication mechanism for repeated dirtying events.
pub struct LayoutEngine<S: WindowServer> {
    screens: Vec<Screen>,
    clients: ClientList,
    /// Which client currently holds input focus anywhere, per the last
    /// focus event the window server delivered.
    focused: Option<ClientId>,
    server: S,
    invalidations: Option<Sender<WidgetInvalidation>>,
}

impl<S: WindowServer> LayoutEngine<S> {
    pub fn new(server: S, screens: Vec<Screen>) -> Self {
        Self {
            screens,
            clients: ClientList::default(),
            focused: None,
            server,
            invalidations: None,
        }
    }

    /// Open the widget-invalidation stream. Dropping the receiver is fine;
    /// sends are fire-and-forget.
    pub fn subscribe_widget_invalidations(&mut self) -> Receiver<WidgetInvalidation> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.invalidations = Some(tx);
        rx
    }

    pub fn screens(&self) -> &[Screen] { &self.screens }

    pub fn screen(&self, id: ScreenId) -> Option<&Screen> { self.screens.get(id.index()) }

    pub fn screen_mut(&mut self, id: ScreenId) -> Option<&mut Screen> {
        self.screens.get_mut(id.index())
    }

    pub fn screen_id(&self, index: usize) -> Option<ScreenId> {
        (index < self.screens.len()).then(|| ScreenId::new(index))
    }

    pub fn clients(&self) -> &ClientList { &self.clients }

    pub fn focused(&self) -> Option<ClientId> { self.focused }

    pub fn server(&self) -> &S { &self.server }

    pub fn server_mut(&mut self) -> &mut S { &mut self.server }

    pub fn mark_dirty(&mut self, id: ScreenId) {
        if let Some(screen) = self.screens.get_mut(id.index()) {
            screen.needs_arrange = true;
        }
    }

    /// A newly mapped client enters as a newcomer and dirties its screen;
    /// the next refresh bans it, places it, and reveals it.
    pub fn manage_client(&mut self, screen: ScreenId, tags: Vec<usize>, frame: Rect) -> ClientId {
        let id = self.clients.insert(Client::new(screen, tags, frame));
        debug!(?id, %screen, "managing client");
        self.mark_dirty(screen);
        id
    }

    pub fn unmanage_client(&mut self, id: ClientId) {
        if let Some(client) = self.clients.remove(id) {
            debug!(?id, "unmanaging client");
            if self.focused == Some(id) {
                self.focused = None;
            }
            self.mark_dirty(client.screen);
        }
    }

    /// Record a focus change reported by the window server.
    pub fn note_focus(&mut self, focus: Option<ClientId>) {
        self.focused = focus.filter(|&id| self.clients.contains(id));
    }

    pub fn set_tag_selected(&mut self, id: ScreenId, tag: usize, selected: bool) {
        if let Some(screen) = self.screens.get_mut(id.index()) {
            if screen.tags.set_selected(tag, selected) {
                screen.needs_arrange = true;
            }
        }
    }

    /// One full arrangement pass for `id`: reconcile visibility, let the
    /// active layout place the visible clients, reveal newcomers, reassert
    /// focus, re-evaluate root button grabs, and clear the dirty flag.
    ///
    /// Infallible by design: the only fallible step is the pointer query,
    /// and a failed query just skips the grab re-bind.
    pub fn arrange(&mut self, id: ScreenId) {
        if id.index() >= self.screens.len() {
            return;
        }
        trace!(%id, "arrange");

        {
            let screen = &self.screens[id.index()];
            visibility::ban_pass(&mut self.clients, &mut self.server, id, &screen.tags);
        }

        let placements = {
            let screen = &self.screens[id.index()];
            let visible: Vec<ClientId> = self
                .clients
                .iter()
                .filter(|(_, c)| c.visible_on(id, &screen.tags))
                .map(|(cid, _)| cid)
                .collect();
            match screen.current_layout() {
                Some(layout) => layout.calculate(screen.frame, &visible),
                None => Vec::new(),
            }
        };
        // Apply blindly; the strategy owns geometry decisions.
        for (cid, frame) in placements {
            if let Some(client) = self.clients.get_mut(cid) {
                client.frame = frame;
            }
            self.server.apply_frame(cid, frame);
        }

        let revealed = {
            let screen = &self.screens[id.index()];
            visibility::reveal_newcomers(&mut self.clients, &mut self.server, id, &screen.tags)
        };
        if self.screens[id.index()].focus_new_clients {
            for cid in revealed {
                self.server.focus_window(cid);
                self.focused = Some(cid);
            }
        }

        // If anything on this screen is focusable while nothing holds focus,
        // focus it: after every pass, "some focusable client exists" implies
        // "some client holds focus".
        if self.focused.is_none() {
            if let Some(cid) = self.focus_candidate(id) {
                self.server.focus_window(cid);
                self.focused = Some(cid);
            }
        }

        // Stale button grabs must not leak into a window that no longer owns
        // the pointer position.
        if let Some(pointer) = self.server.query_pointer(id) {
            if pointer.over_root() {
                self.server.grab_root_buttons(id);
            }
        }

        self.screens[id.index()].needs_arrange = false;
    }

    /// Drain dirty screens in registry order. Returns how many passes ran.
    pub fn refresh(&mut self) -> usize {
        let mut arranged = 0;
        for index in 0..self.screens.len() {
            if self.screens[index].needs_arrange {
                self.arrange(ScreenId::new(index));
                arranged += 1;
            }
        }
        arranged
    }

    /// Rebind the layout of every selected tag on `id`, stepping `offset`
    /// entries from the current layout with wraparound (`None` re-applies
    /// the current binding). Arranges synchronously when a client holds
    /// focus, notifies the widget layer, and persists the tag selection.
    pub fn set_layout(&mut self, id: ScreenId, offset: Option<i64>) {
        if id.index() >= self.screens.len() {
            return;
        }
        {
            let screen = &mut self.screens[id.index()];
            let current = screen.current_layout_index();
            let target = match offset {
                None => current,
                Some(delta) => screen.layouts.cycle(current, delta),
            };
            debug!(%id, current, target, "set layout");
            screen.tags.bind_layout_to_selected(target);
        }

        if self.focused.is_some() {
            self.arrange(id);
        }

        self.invalidate_widgets(WidgetInvalidation::Layouts { screen: id });
        self.save_properties(id);
    }

    /// Persist the tag selection string on the screen's root surface.
    pub fn save_properties(&mut self, id: ScreenId) {
        let Some(screen) = self.screens.get(id.index()) else {
            return;
        };
        let prop = screen.tags.selection_string();
        trace!(%id, %prop, "saving tag selection");
        self.server.set_property(id, PROPERTIES_PROPERTY, prop.as_bytes());
    }

    /// Restore tag selection from the root-surface property. Absent or
    /// malformed values are not errors; restoration is best effort per
    /// character.
    pub fn load_properties(&mut self, id: ScreenId) {
        let Some(raw) = self.server.get_property(id, PROPERTIES_PROPERTY) else {
            return;
        };
        let Some(screen) = self.screens.get_mut(id.index()) else {
            return;
        };
        match std::str::from_utf8(&raw) {
            Ok(prop) => {
                let prop = prop.trim_end_matches('\0');
                trace!(%id, %prop, "restoring tag selection");
                screen.tags.apply_selection_string(prop);
                screen.needs_arrange = true;
            }
            Err(_) => warn!(%id, "ignoring non-utf8 tag selection property"),
        }
    }

    /// Some focusable client on `id`, in client-list order. The ranking
    /// here is deliberately simple; a richer focus history can replace it
    /// without touching the arrangement flow.
    fn focus_candidate(&self, id: ScreenId) -> Option<ClientId> {
        let screen = self.screens.get(id.index())?;
        self.clients
            .iter()
            .find(|(_, c)| !c.banned && c.visible_on(id, &screen.tags))
            .map(|(cid, _)| cid)
    }

    fn invalidate_widgets(&self, event: WidgetInvalidation) {
        if let Some(tx) = &self.invalidations {
            // Receiver may be gone; the signal is fire-and-forget.
            let _ = tx.send(event);
        }
    }
}
