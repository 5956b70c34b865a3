use std::collections::HashSet;
use std::fmt::{Display, Write as _};

use crate::foundation::color::Color;
use crate::reactive::graph::CellGraph;
use crate::render::drawing::{Drawing, paint_order};
use crate::scene::element::{Element, ElementKey};
use crate::scene::shape::Shape;

/// Document settings for [`SvgDrawing`].
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SvgDrawingOpts {
    /// Document width in user units.
    pub width: f64,
    /// Document height in user units.
    pub height: f64,
    /// Fill painted behind every element.
    pub background: Option<Color>,
}

impl Default for SvgDrawingOpts {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            background: None,
        }
    }
}

/// Renders every frame into a standalone SVG document and keeps the latest one.
#[derive(Debug, Default)]
pub struct SvgDrawing {
    opts: SvgDrawingOpts,
    last: String,
    frames: u64,
}

impl SvgDrawing {
    /// A drawing with no frame yet.
    pub fn new(opts: SvgDrawingOpts) -> Self {
        Self {
            opts,
            last: String::new(),
            frames: 0,
        }
    }

    /// Settings this drawing was built with.
    pub fn opts(&self) -> &SvgDrawingOpts {
        &self.opts
    }

    /// Markup of the most recent frame; empty before the first draw.
    pub fn last_frame(&self) -> &str {
        &self.last
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Drawing for SvgDrawing {
    fn draw(&mut self, graph: &CellGraph, elements: &[Element]) {
        self.last = render_svg(graph, elements, &self.opts);
        self.frames += 1;
        tracing::trace!(frame = self.frames, bytes = self.last.len(), "svg frame");
    }
}

/// Render `elements` as an SVG document.
///
/// Deleted elements are skipped and the rest are painted in ascending z-index order. An
/// element that is the child of a drawn container is painted inside that container only.
pub fn render_svg(graph: &CellGraph, elements: &[Element], opts: &SvgDrawingOpts) -> String {
    let ordered = paint_order(graph, elements);
    let nested: HashSet<ElementKey> = ordered
        .iter()
        .filter_map(|e| graph.with(e.shape, Shape::child))
        .map(|child| child.key())
        .collect();

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = opts.width,
        h = opts.height,
    );
    if let Some(bg) = opts.background {
        let _ = write!(out, r#"<rect width="100%" height="100%" fill="{bg}"/>"#);
    }

    let mut stack = Vec::new();
    for element in ordered.iter().filter(|e| !nested.contains(&e.key())) {
        write_element(&mut out, graph, element, &mut stack);
    }
    out.push_str("</svg>");
    out
}

fn write_element(out: &mut String, graph: &CellGraph, element: &Element, stack: &mut Vec<ElementKey>) {
    // A container chain that loops back onto itself is cut at the repeat.
    if graph.get(element.deleted) || stack.contains(&element.key()) {
        return;
    }
    let shape = graph.get(element.shape);
    let mut body = String::new();
    match &shape {
        Shape::Empty => return,
        Shape::Circle(c) => {
            body.push_str("<circle");
            attr(&mut body, "cx", c.center_x.map(|v| v.0));
            attr(&mut body, "cy", c.center_y.map(|v| v.0));
            attr(&mut body, "r", c.radius.map(|v| v.get()));
            body.push_str("/>");
        }
        Shape::Rectangle(r) => {
            body.push_str("<rect");
            attr(&mut body, "x", r.x.map(|v| v.0));
            attr(&mut body, "y", r.y.map(|v| v.0));
            attr(&mut body, "width", r.width.map(|v| v.get()));
            attr(&mut body, "height", r.height.map(|v| v.get()));
            attr(&mut body, "rx", r.corner_radius_x.map(|v| v.get()));
            attr(&mut body, "ry", r.corner_radius_y.map(|v| v.get()));
            body.push_str("/>");
        }
        Shape::Line(l) => {
            body.push_str("<line");
            attr(&mut body, "x1", l.start_x.map(|v| v.0));
            attr(&mut body, "y1", l.start_y.map(|v| v.0));
            attr(&mut body, "x2", l.end_x.map(|v| v.0));
            attr(&mut body, "y2", l.end_y.map(|v| v.0));
            attr(&mut body, "pathLength", l.path_length.map(|v| v.get()));
            body.push_str("/>");
        }
        Shape::CubicBezier(b) => {
            let (Some(sx), Some(sy), Some(c1x), Some(c1y), Some(c2x), Some(c2y), Some(ex), Some(ey)) = (
                b.start_x, b.start_y, b.control1_x, b.control1_y, b.control2_x, b.control2_y, b.end_x,
                b.end_y,
            ) else {
                return;
            };
            let _ = write!(
                body,
                r#"<path d="M {} {} C {} {}, {} {}, {} {}"/>"#,
                sx.0, sy.0, c1x.0, c1y.0, c2x.0, c2y.0, ex.0, ey.0
            );
        }
        Shape::Container(c) => {
            body.push_str("<svg");
            attr(&mut body, "x", c.x.map(|v| v.0));
            attr(&mut body, "y", c.y.map(|v| v.0));
            attr(&mut body, "width", c.width.map(|v| v.get()));
            attr(&mut body, "height", c.height.map(|v| v.get()));
            body.push('>');
            if let Some(child) = &c.child {
                stack.push(element.key());
                write_element(&mut body, graph, child, stack);
                stack.pop();
            }
            body.push_str("</svg>");
        }
    }

    out.push_str("<g");
    attr(out, "fill", graph.get(element.fill));
    attr(out, "fill-opacity", graph.get(element.fill_opacity));
    attr(out, "opacity", graph.get(element.opacity));
    attr(out, "stroke", graph.get(element.stroke));
    attr(out, "stroke-opacity", graph.get(element.stroke_opacity));
    attr(out, "stroke-width", graph.get(element.stroke_width).map(|v| v.get()));
    attr(out, "stroke-linecap", graph.get(element.stroke_linecap));
    attr(out, "stroke-linejoin", graph.get(element.stroke_linejoin));
    attr(out, "stroke-miterlimit", graph.get(element.stroke_miterlimit).map(|v| v.0));
    attr(out, "stroke-dasharray", graph.get(element.stroke_dasharray));
    attr(out, "stroke-dashoffset", graph.get(element.stroke_dashoffset).map(|v| v.get()));
    attr(out, "cursor", graph.get(element.cursor));
    attr(out, "visibility", graph.get(element.visibility));
    out.push('>');
    out.push_str(&body);
    out.push_str("</g>");
}

fn attr(out: &mut String, name: &str, value: Option<impl Display>) {
    if let Some(value) = value {
        let _ = write!(out, r#" {name}="{value}""#);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
