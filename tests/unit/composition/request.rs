use super::*;
use crate::foundation::ids::Identifier;

#[test]
fn property_requests_follow_the_live_wrapper() {
    let mut scene = Scene::new();
    let a = scene.element("a").unwrap();
    let cell = fill("a").resolve(&mut scene);
    assert_eq!(scene.graph.get(cell), None);

    let red = scene.graph.constant(Some(Color::RED));
    scene.graph.wrap(a.fill, red);
    assert_eq!(scene.graph.get(cell), Some(Color::RED));
}

#[test]
fn derived_requests_track_shape_changes() {
    let mut scene = Scene::new();
    let a = scene.element("a").unwrap();
    let r = radius("a").resolve(&mut scene);
    assert_eq!(scene.graph.get(r), None);

    let circle = scene.graph.constant(Shape::circle(0.0, 0.0, 12.0));
    scene.graph.wrap(a.shape, circle);
    assert_eq!(scene.graph.get(r), Some(Length::new(12.0)));
}

#[test]
fn requests_create_missing_elements_like_selection() {
    let mut scene = Scene::new();
    let z = z_index(7).resolve(&mut scene);
    assert_eq!(scene.graph.get(z), 0.0);
    assert!(scene.registry().get(&Identifier::Index(7)).is_some());
}

#[test]
fn map_transforms_the_resolved_value() {
    let mut scene = Scene::new();
    let a = scene.element("a").unwrap();
    let doubled = radius("a").map(|r| r.map(|r| Length::new(r.get() * 2.0)));
    let cell = doubled.resolve(&mut scene);

    let circle = scene.graph.constant(Shape::circle(0.0, 0.0, 5.0));
    scene.graph.wrap(a.shape, circle);
    assert_eq!(scene.graph.get(cell), Some(Length::new(10.0)));
}

#[test]
fn string_targets_parse_or_defer_an_error() {
    let mut scene = Scene::new();
    let ok: Target<Option<Color>> = "#00ff00".into_target();
    let cell = ok.resolve(&mut scene).unwrap();
    assert_eq!(scene.graph.get(cell), Some(Color::rgb(0.0, 1.0, 0.0)));

    let bad: Target<Option<Cursor>> = "sideways".into_target();
    assert!(matches!(bad.resolve(&mut scene), Err(MotionError::Validation(_))));
}

#[test]
fn numbers_convert_into_wrapped_targets() {
    let mut scene = Scene::new();
    let t: Target<Option<Length>> = (-3.0_f64).into_target();
    let cell = t.resolve(&mut scene).unwrap();
    assert_eq!(scene.graph.get(cell), Some(Length::new(0.0)));

    let t: Target<Option<Position>> = (1.0_f64, 2.0_f64).into_target();
    let cell = t.resolve(&mut scene).unwrap();
    assert_eq!(scene.graph.get(cell), Some(Position::new(1.0, 2.0)));
}
