use crate::reactive::graph::CellGraph;
use crate::scene::element::Element;

/// Render collaborator invoked by the player after every progress change.
///
/// Receives every known element in registration order; filtering deleted elements and
/// ordering by z-index is the implementation's job.
pub trait Drawing {
    /// Draw one frame from the current cell values.
    fn draw(&mut self, graph: &CellGraph, elements: &[Element]);
}

impl<F> Drawing for F
where
    F: FnMut(&CellGraph, &[Element]),
{
    fn draw(&mut self, graph: &CellGraph, elements: &[Element]) {
        self(graph, elements)
    }
}

/// Drawing that does nothing, for headless playback.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDrawing;

impl Drawing for NoDrawing {
    fn draw(&mut self, _graph: &CellGraph, _elements: &[Element]) {}
}

/// Elements a renderer should draw, in paint order: deleted ones dropped, the rest stably
/// sorted by ascending z-index.
pub fn paint_order(graph: &CellGraph, elements: &[Element]) -> Vec<Element> {
    let mut visible: Vec<(f64, Element)> = elements
        .iter()
        .filter(|e| !graph.get(e.deleted))
        .map(|&e| (graph.get(e.z_index), e))
        .collect();
    visible.sort_by(|a, b| a.0.total_cmp(&b.0));
    visible.into_iter().map(|(_, e)| e).collect()
}
