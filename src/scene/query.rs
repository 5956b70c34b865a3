use std::collections::HashSet;

use crate::scene::element::Element;
use crate::scene::registry::Selector;
use crate::scene::store::Scene;

/// Set algebra over resolved elements, used by `AnimationBuilder::query`.
///
/// The selection is an ordered list; `add` keeps duplicates, the filtering operations keep
/// the relative order of what remains.
pub struct QueryBuilder<'a> {
    scene: &'a mut Scene,
    selection: Vec<Element>,
}

impl<'a> QueryBuilder<'a> {
    /// An empty selection over `scene`.
    pub fn new(scene: &'a mut Scene) -> Self {
        Self {
            scene,
            selection: Vec::new(),
        }
    }

    fn request(&mut self, selector: impl Into<Selector>) -> HashSet<Element> {
        self.scene.elements(selector).into_iter().collect()
    }

    /// Keep only the selected elements that `selector` also addresses.
    pub fn select(&mut self, selector: impl Into<Selector>) -> &mut Self {
        let keep = self.request(selector);
        self.selection.retain(|e| keep.contains(e));
        self
    }

    /// Append the elements addressed by `selector`.
    pub fn add(&mut self, selector: impl Into<Selector>) -> &mut Self {
        let added = self.scene.elements(selector);
        self.selection.extend(added);
        self
    }

    /// Add the integer identifiers `from..=to`.
    pub fn add_range(&mut self, from: i64, to: i64) -> &mut Self {
        self.add(from..=to)
    }

    /// Drop every selected element that `selector` addresses.
    pub fn remove(&mut self, selector: impl Into<Selector>) -> &mut Self {
        let drop = self.request(selector);
        self.selection.retain(|e| !drop.contains(e));
        self
    }

    /// Remove elements registered under an integer identifier within `from..=to`.
    pub fn remove_range(&mut self, from: i64, to: i64) -> &mut Self {
        let registry = &self.scene.registry;
        self.selection.retain(|e| {
            !registry
                .identifier_of(e)
                .and_then(|id| id.as_index())
                .is_some_and(|i| (from..=to).contains(&i))
        });
        self
    }

    /// Empty the selection.
    pub fn clear(&mut self) -> &mut Self {
        self.selection.clear();
        self
    }

    /// Replace the selection with every known element.
    pub fn all(&mut self) -> &mut Self {
        self.selection = self.scene.all_elements();
        self
    }

    /// The selected elements, in order.
    pub fn build(self) -> Vec<Element> {
        self.selection
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/query.rs"]
mod tests;
