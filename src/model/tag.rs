use serde::{Deserialize, Serialize};
use tracing::trace;

/// A named grouping of clients. Selection controls visibility of its
/// members; `layout` indexes into the owning screen's layout registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub selected: bool,
    layout: usize,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selected: false,
            layout: 0,
        }
    }

    pub fn layout(&self) -> usize { self.layout }

    pub(crate) fn set_layout(&mut self, layout: usize) { self.layout = layout; }
}

/// Ordered per-screen tag collection. Order is stable for the lifetime of
/// the screen; persistence and the effective-tag rule both depend on it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TagRegistry {
    tags: Vec<Tag>,
}

impl TagRegistry {
    pub fn from_names<I, T>(names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut tags: Vec<Tag> = names.into_iter().map(Tag::new).collect();
        // Convention: the first tag starts out selected so a fresh screen is
        // never tagless-by-selection.
        if let Some(first) = tags.first_mut() {
            first.selected = true;
        }
        Self { tags }
    }

    pub fn len(&self) -> usize { self.tags.len() }

    pub fn is_empty(&self) -> bool { self.tags.is_empty() }

    pub fn get(&self, index: usize) -> Option<&Tag> { self.tags.get(index) }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> { self.tags.iter() }

    pub fn is_selected(&self, index: usize) -> bool {
        self.tags.get(index).is_some_and(|t| t.selected)
    }

    pub fn set_selected(&mut self, index: usize, selected: bool) -> bool {
        match self.tags.get_mut(index) {
            Some(tag) => {
                tag.selected = selected;
                true
            }
            None => false,
        }
    }

    /// The tag whose layout binding governs the screen: the first selected
    /// tag in registry order. When nothing is selected the first tag stands
    /// in, so a screen always reports a deterministic layout.
    pub fn effective_index(&self) -> Option<usize> {
        match self.tags.iter().position(|t| t.selected) {
            Some(i) => Some(i),
            None if !self.tags.is_empty() => Some(0),
            None => None,
        }
    }

    pub fn effective(&self) -> Option<&Tag> { self.effective_index().map(|i| &self.tags[i]) }

    /// Layout index bound to the effective tag, if any tag exists.
    pub fn current_layout(&self) -> Option<usize> { self.effective().map(|t| t.layout) }

    /// Bulk reassignment: every currently-selected tag gets `layout`.
    /// Switching layouts with several tags selected moves them together.
    pub fn bind_layout_to_selected(&mut self, layout: usize) {
        for tag in self.tags.iter_mut().filter(|t| t.selected) {
            trace!(tag = %tag.name, layout, "rebinding tag layout");
            tag.layout = layout;
        }
    }

    /// One byte per tag in registry order, '1' for selected.
    pub fn selection_string(&self) -> String {
        self.tags.iter().map(|t| if t.selected { '1' } else { '0' }).collect()
    }

    /// Restore selection from a persisted string, best effort per position.
    /// Extra characters are ignored; missing characters leave the tail of
    /// the registry untouched. Any byte other than '1' deselects.
    pub fn apply_selection_string(&mut self, prop: &str) {
        for (tag, ch) in self.tags.iter_mut().zip(prop.chars()) {
            tag.selected = ch == '1';
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn registry() -> TagRegistry { TagRegistry::from_names(["one", "two", "three"]) }

    #[test]
    fn first_tag_starts_selected() {
        let tags = registry();
        assert!(tags.is_selected(0));
        assert!(!tags.is_selected(1));
        assert!(!tags.is_selected(2));
    }

    #[test]
    fn effective_tag_is_first_selected() {
        let mut tags = registry();
        tags.set_selected(0, false);
        tags.set_selected(1, true);
        tags.set_selected(2, true);
        assert_eq!(tags.effective_index(), Some(1));
    }

    #[test]
    fn effective_tag_falls_back_to_head_when_nothing_selected() {
        let mut tags = registry();
        tags.set_selected(0, false);
        assert_eq!(tags.effective_index(), Some(0));
        assert_eq!(tags.current_layout(), Some(0));
    }

    #[test]
    fn effective_tag_absent_on_empty_registry() {
        let tags = TagRegistry::default();
        assert_eq!(tags.effective_index(), None);
        assert_eq!(tags.current_layout(), None);
    }

    #[test]
    fn bulk_rebind_only_touches_selected_tags() {
        let mut tags = registry();
        tags.set_selected(2, true);
        tags.bind_layout_to_selected(3);
        assert_eq!(tags.get(0).unwrap().layout(), 3);
        assert_eq!(tags.get(1).unwrap().layout(), 0);
        assert_eq!(tags.get(2).unwrap().layout(), 3);
    }

    #[test]
    fn selection_string_round_trips() {
        let mut tags = registry();
        tags.set_selected(0, true);
        tags.set_selected(1, false);
        tags.set_selected(2, true);
        assert_eq!(tags.selection_string(), "101");

        let mut fresh = registry();
        fresh.apply_selection_string("101");
        assert_eq!(
            fresh.iter().map(|t| t.selected).collect::<Vec<_>>(),
            vec![true, false, true]
        );
    }

    #[test]
    fn short_property_leaves_tail_untouched() {
        let mut tags = registry();
        tags.set_selected(2, true);
        tags.apply_selection_string("0");
        assert!(!tags.is_selected(0));
        assert!(tags.is_selected(2));
    }

    #[test]
    fn long_property_ignores_extra_characters() {
        let mut tags = registry();
        tags.apply_selection_string("011111");
        assert_eq!(tags.selection_string(), "011");
    }

    #[test]
    fn garbage_characters_deselect() {
        let mut tags = registry();
        tags.apply_selection_string("x1?");
        assert_eq!(tags.selection_string(), "010");
    }
}
