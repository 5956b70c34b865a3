use super::*;
use crate::foundation::core::AlphaValue;
use crate::reactive::graph::{CellValue, Wrapper};
use crate::scene::store::Scene;

fn pin<T: CellValue>(scene: &mut Scene, wrapper: Wrapper<T>, value: T) {
    let source = scene.graph.primitive(value);
    scene.graph.wrap(wrapper, source);
}

fn circle(scene: &mut Scene, id: &str, r: f64) -> Element {
    let e = scene.element(id).unwrap();
    pin(scene, e.shape, Shape::circle(0.0, 0.0, r));
    e
}

#[test]
fn empty_scene_is_a_bare_document() {
    let scene = Scene::new();
    let svg = render_svg(&scene.graph, &[], &SvgDrawingOpts::default());
    assert_eq!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="600" viewBox="0 0 800 600"></svg>"#
    );
}

#[test]
fn background_and_presentation_attributes() {
    let mut scene = Scene::new();
    let dot = circle(&mut scene, "dot", 5.0);
    pin(&mut scene, dot.fill, Some("red".parse::<Color>().unwrap()));
    pin(&mut scene, dot.opacity, Some(AlphaValue::new(0.5)));

    let opts = SvgDrawingOpts {
        width: 10.0,
        height: 10.0,
        background: Some(Color::BLACK),
    };
    let svg = render_svg(&scene.graph, &scene.all_elements(), &opts);
    assert!(svg.contains(r##"<rect width="100%" height="100%" fill="#000000"/>"##));
    assert!(svg.contains(r##"<g fill="#ff0000" opacity="0.5"><circle cx="0" cy="0" r="5"/></g>"##));
}

#[test]
fn elements_paint_in_z_order_and_deleted_ones_are_skipped() {
    let mut scene = Scene::new();
    let a = circle(&mut scene, "a", 1.0);
    let b = circle(&mut scene, "b", 2.0);
    let c = circle(&mut scene, "c", 3.0);
    pin(&mut scene, a.z_index, 2.0);
    pin(&mut scene, c.deleted, true);

    let svg = render_svg(&scene.graph, &scene.all_elements(), &SvgDrawingOpts::default());
    let first = svg.find(r#"r="2""#).unwrap();
    let second = svg.find(r#"r="1""#).unwrap();
    assert!(first < second);
    assert!(!svg.contains(r#"r="3""#));

    let order: Vec<Element> = paint_order(&scene.graph, &[a, b, c]);
    assert_eq!(order, vec![b, a]);
}

#[test]
fn empty_shapes_draw_nothing() {
    let mut scene = Scene::new();
    scene.element("ghost").unwrap();
    let svg = render_svg(&scene.graph, &scene.all_elements(), &SvgDrawingOpts::default());
    assert!(!svg.contains("<g"));
}

#[test]
fn container_children_are_drawn_only_inside_their_container() {
    let mut scene = Scene::new();
    let inner = circle(&mut scene, "inner", 4.0);
    let frame = scene.element("frame").unwrap();
    pin(
        &mut scene,
        frame.shape,
        Shape::container(1.0, 2.0, 30.0, 40.0, Some(inner)),
    );

    let svg = render_svg(&scene.graph, &scene.all_elements(), &SvgDrawingOpts::default());
    assert_eq!(svg.matches(r#"r="4""#).count(), 1);
    assert!(svg.contains(
        r#"<g><svg x="1" y="2" width="30" height="40"><g><circle cx="0" cy="0" r="4"/></g></svg></g>"#
    ));
}

#[test]
fn self_containing_chain_is_cut() {
    let mut scene = Scene::new();
    let a = scene.element("a").unwrap();
    pin(&mut scene, a.shape, Shape::container(0.0, 0.0, 1.0, 1.0, Some(a)));

    let svg = render_svg(&scene.graph, &[a], &SvgDrawingOpts::default());
    // `a` is its own child, so nothing remains at the top level.
    assert!(!svg.contains("<g"));

    let mut out = String::new();
    write_element(&mut out, &scene.graph, &a, &mut Vec::new());
    assert_eq!(out.matches("<svg").count(), 1);
}

#[test]
fn bezier_needs_every_point() {
    let mut scene = Scene::new();
    let curve = scene.element("curve").unwrap();
    let shape = Shape::cubic_bezier((0.0, 0.0), (1.0, 2.0), (3.0, 4.0), (5.0, 6.0));
    pin(&mut scene, curve.shape, shape.clone());
    let svg = render_svg(&scene.graph, &[curve], &SvgDrawingOpts::default());
    assert!(svg.contains(r#"<path d="M 0 0 C 1 2, 3 4, 5 6"/>"#));

    let Shape::CubicBezier(mut partial) = shape else {
        unreachable!()
    };
    partial.control1_x = None;
    pin(&mut scene, curve.shape, Shape::CubicBezier(partial));
    let svg = render_svg(&scene.graph, &[curve], &SvgDrawingOpts::default());
    assert!(!svg.contains("<path"));
}

#[test]
fn drawing_keeps_the_latest_frame() {
    let mut scene = Scene::new();
    circle(&mut scene, "dot", 5.0);
    let mut drawing = SvgDrawing::default();
    assert_eq!(drawing.last_frame(), "");

    drawing.draw(&scene.graph, &scene.all_elements());
    drawing.draw(&scene.graph, &scene.all_elements());
    assert_eq!(drawing.frames(), 2);
    assert!(drawing.last_frame().contains("<circle"));
}

#[test]
fn opts_deserialize_with_defaults() {
    let opts: SvgDrawingOpts = serde_json::from_str(r#"{"width": 100}"#).unwrap();
    assert_eq!(opts.width, 100.0);
    assert_eq!(opts.height, 600.0);
    assert!(serde_json::from_str::<SvgDrawingOpts>(r#"{"depth": 1}"#).is_err());
}
