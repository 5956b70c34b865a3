use crate::foundation::error::MotionResult;
use crate::reactive::graph::CellGraph;
use crate::scene::element::{Element, ElementSnapshot};
use crate::scene::registry::{ElementRegistry, Selector};

/// Cell graph plus the elements living in it.
#[derive(Debug, Default)]
pub struct Scene {
    pub(crate) graph: CellGraph,
    pub(crate) registry: ElementRegistry,
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cell graph.
    pub fn graph(&self) -> &CellGraph {
        &self.graph
    }

    /// The cell graph, mutably.
    pub fn graph_mut(&mut self) -> &mut CellGraph {
        &mut self.graph
    }

    /// The element registry.
    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// A new element that is not yet registered under any identifier.
    ///
    /// It joins the registry the first time it is selected.
    pub fn new_element(&mut self) -> Element {
        Element::new(&mut self.graph)
    }

    /// Resolve `selector`, creating elements on first reference.
    pub fn elements(&mut self, selector: impl Into<Selector>) -> Vec<Element> {
        self.registry.request(&mut self.graph, selector)
    }

    /// First element addressed by `selector`, if any.
    pub fn element(&mut self, selector: impl Into<Selector>) -> Option<Element> {
        self.elements(selector).into_iter().next()
    }

    /// Every registered element, in registration order.
    pub fn all_elements(&self) -> Vec<Element> {
        self.registry.all()
    }

    /// Capture the current value of every property.
    pub fn snapshot(&self) -> SceneSnapshot {
        let elements = self
            .registry
            .iter()
            .map(|(id, element)| ElementSnapshot {
                id: Some(id.clone()),
                ..element.snapshot(&self.graph)
            })
            .collect();
        SceneSnapshot { elements }
    }
}

/// Current state of every registered element, in registration order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneSnapshot {
    /// One entry per registered element.
    pub elements: Vec<ElementSnapshot>,
}

impl SceneSnapshot {
    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> MotionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
