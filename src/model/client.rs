use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::model::screen::ScreenId;
use crate::model::tag::TagRegistry;
use crate::sys::geometry::Rect;

slotmap::new_key_type! {
    pub struct ClientId;
}

/// Externally owned window state the layout core reads and toggles. The
/// core never creates or destroys clients; it only flips visibility and the
/// newcomer flag and records the last applied frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Client {
    pub screen: ScreenId,
    /// Indices into the owning screen's tag registry.
    pub tags: Vec<usize>,
    /// Mapped but not yet passed through a reconciliation pass.
    pub newcomer: bool,
    /// Hidden (banned) as opposed to shown on its screen.
    pub banned: bool,
    pub frame: Rect,
}

impl Client {
    pub fn new(screen: ScreenId, tags: Vec<usize>, frame: Rect) -> Self {
        Self {
            screen,
            tags,
            newcomer: true,
            // Just mapped, so still on screen; the next ban pass hides it
            // until the layout has placed it.
            banned: false,
            frame,
        }
    }

    /// A client is visible on `screen` iff it belongs to that screen and at
    /// least one of its tags is selected there.
    pub fn visible_on(&self, screen: ScreenId, tags: &TagRegistry) -> bool {
        self.screen == screen && self.tags.iter().any(|&i| tags.is_selected(i))
    }
}

/// Client storage with explicit insertion order. Slotmap iteration order is
/// not part of its contract, and both reconciliation and focus candidacy
/// must walk clients deterministically.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ClientList {
    map: SlotMap<ClientId, Client>,
    order: Vec<ClientId>,
}

impl ClientList {
    pub fn insert(&mut self, client: Client) -> ClientId {
        let id = self.map.insert(client);
        self.order.push(id);
        id
    }

    pub fn remove(&mut self, id: ClientId) -> Option<Client> {
        self.order.retain(|&c| c != id);
        self.map.remove(id)
    }

    pub fn get(&self, id: ClientId) -> Option<&Client> { self.map.get(id) }

    pub fn get_mut(&mut self, id: ClientId) -> Option<&mut Client> { self.map.get_mut(id) }

    pub fn contains(&self, id: ClientId) -> bool { self.map.contains_key(id) }

    pub fn len(&self) -> usize { self.order.len() }

    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (ClientId, &Client)> {
        self.order.iter().filter_map(|&id| self.map.get(id).map(|c| (id, c)))
    }

    pub(crate) fn for_each_mut(&mut self, mut f: impl FnMut(ClientId, &mut Client)) {
        for &id in &self.order {
            if let Some(client) = self.map.get_mut(id) {
                f(id, client);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tags() -> TagRegistry {
        // index 0 selected, index 1 not
        crate::model::tag::TagRegistry::from_names(["a", "b"])
    }

    #[test]
    fn visibility_requires_screen_and_selected_tag() {
        let tags = tags();
        let here = ScreenId::new(0);
        let there = ScreenId::new(1);

        let on_selected = Client::new(here, vec![0], Rect::default());
        let on_unselected = Client::new(here, vec![1], Rect::default());
        let elsewhere = Client::new(there, vec![0], Rect::default());

        assert!(on_selected.visible_on(here, &tags));
        assert!(!on_unselected.visible_on(here, &tags));
        assert!(!elsewhere.visible_on(here, &tags));
    }

    #[test]
    fn out_of_range_tag_indices_are_ignored() {
        let tags = tags();
        let client = Client::new(ScreenId::new(0), vec![9], Rect::default());
        assert!(!client.visible_on(ScreenId::new(0), &tags));
    }

    #[test]
    fn list_iterates_in_insertion_order() {
        let mut list = ClientList::default();
        let a = list.insert(Client::new(ScreenId::new(0), vec![0], Rect::default()));
        let b = list.insert(Client::new(ScreenId::new(0), vec![0], Rect::default()));
        let c = list.insert(Client::new(ScreenId::new(0), vec![0], Rect::default()));

        assert_eq!(list.iter().map(|(id, _)| id).collect::<Vec<_>>(), vec![a, b, c]);

        list.remove(b);
        assert_eq!(list.iter().map(|(id, _)| id).collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(list.len(), 2);
    }
}
