use std::collections::HashMap;

use indexmap::IndexMap;

use crate::foundation::ids::Identifier;
use crate::reactive::graph::CellGraph;
use crate::scene::element::{Element, ElementKey};

/// What a caller can hand over to address elements.
///
/// Nested selectors flatten depth-first, preserving order and duplicates.
#[derive(Clone, Debug, PartialEq)]
pub enum Selector {
    /// An identifier, created on first reference.
    Id(Identifier),
    /// An element handle, registered under a fresh token if unseen.
    Element(Element),
    /// Several selectors, in order.
    Many(Vec<Selector>),
}

impl From<Identifier> for Selector {
    fn from(id: Identifier) -> Self {
        Self::Id(id)
    }
}

impl From<&Identifier> for Selector {
    fn from(id: &Identifier) -> Self {
        Self::Id(id.clone())
    }
}

impl From<Element> for Selector {
    fn from(e: Element) -> Self {
        Self::Element(e)
    }
}

impl From<&Element> for Selector {
    fn from(e: &Element) -> Self {
        Self::Element(*e)
    }
}

impl From<&[Element]> for Selector {
    fn from(elements: &[Element]) -> Self {
        Self::Many(elements.iter().map(Self::from).collect())
    }
}

impl<T: Into<Selector>> From<Vec<T>> for Selector {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Selector>, const N: usize> From<[T; N]> for Selector {
    fn from(items: [T; N]) -> Self {
        Self::Many(items.into_iter().map(Into::into).collect())
    }
}

impl From<std::ops::RangeInclusive<i64>> for Selector {
    fn from(range: std::ops::RangeInclusive<i64>) -> Self {
        Self::Many(range.map(|i| Self::Id(Identifier::Index(i))).collect())
    }
}

macro_rules! selector_from_id {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Selector {
                fn from(v: $t) -> Self {
                    Self::Id(Identifier::from(v))
                }
            }
        )+
    };
}

selector_from_id!(&str, String, &String, i8, i16, i32, i64, u8, u16, u32);

/// Identifier to element mapping of a scene. Append-only.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    by_id: IndexMap<Identifier, Element>,
    ids: HashMap<ElementKey, Identifier>,
}

impl ElementRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Resolve `selector`, creating elements for unseen identifiers and minting a
    /// [`Identifier::Token`] for element handles the registry has not seen yet.
    pub fn request(&mut self, graph: &mut CellGraph, selector: impl Into<Selector>) -> Vec<Element> {
        let mut out = Vec::new();
        self.resolve(graph, selector.into(), &mut out);
        out
    }

    fn resolve(&mut self, graph: &mut CellGraph, selector: Selector, out: &mut Vec<Element>) {
        match selector {
            Selector::Id(id) => {
                let element = match self.by_id.get(&id) {
                    Some(e) => *e,
                    None => {
                        let e = Element::new(graph);
                        self.insert(id, e);
                        e
                    }
                };
                out.push(element);
            }
            Selector::Element(e) => {
                if !self.ids.contains_key(&e.key()) {
                    self.insert(Identifier::Token(graph.mint_token()), e);
                }
                out.push(e);
            }
            Selector::Many(items) => {
                for item in items {
                    self.resolve(graph, item, out);
                }
            }
        }
    }

    fn insert(&mut self, id: Identifier, element: Element) {
        tracing::trace!(%id, key = element.key().0, "register element");
        self.ids.insert(element.key(), id.clone());
        self.by_id.insert(id, element);
    }

    /// Element registered under `id`. Never creates one.
    pub fn get(&self, id: &Identifier) -> Option<Element> {
        self.by_id.get(id).copied()
    }

    /// Identifier `element` was registered under.
    pub fn identifier_of(&self, element: &Element) -> Option<&Identifier> {
        self.ids.get(&element.key())
    }

    /// Every known element, in registration order.
    pub fn all(&self) -> Vec<Element> {
        self.by_id.values().copied().collect()
    }

    /// Identifiers and elements in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &Element)> {
        self.by_id.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/registry.rs"]
mod tests;
