use super::*;

fn close(a: Option<f64>, b: f64) -> bool {
    a.is_some_and(|a| (a - b).abs() < 1e-6)
}

#[test]
fn circle_derives_box_geometry() {
    let s = Shape::circle(10.0, 20.0, 5.0);
    assert_eq!(s.top_left(), Some(Position::new(5.0, 15.0)));
    assert_eq!(s.width(), Some(Length::new(10.0)));
    assert_eq!(s.radius_x(), s.radius());
    assert_eq!(s.start(), None);
}

#[test]
fn circle_without_radius_keeps_center_as_top_left() {
    let s = Shape::Circle(Circle {
        center_x: Some(Coordinate(3.0)),
        center_y: None,
        radius: None,
    });
    assert_eq!(s.top_left_x(), Some(Coordinate(3.0)));
    assert_eq!(s.top_left_y(), None);
    assert_eq!(s.width(), None);
}

#[test]
fn rectangle_center_and_radius() {
    let s = Shape::rectangle(0.0, 10.0, 40.0, 20.0);
    assert_eq!(s.center(), Some(Position::new(20.0, 20.0)));
    assert_eq!(s.radius(), Some(Length::new(15.0)));
    assert_eq!(s.radius_x(), None);
}

#[test]
fn line_center_needs_both_ends() {
    let s = Shape::line((0.0, 0.0), (10.0, 4.0));
    assert_eq!(s.center(), Some(Position::new(5.0, 2.0)));
    assert!(close(s.outline_length().map(Length::get), 116f64.sqrt()));

    let half = Shape::Line(Line {
        start_x: Some(Coordinate(1.0)),
        ..Line::default()
    });
    assert_eq!(half.center_x(), None);
}

#[test]
fn bezier_center_is_midpoint_of_curve() {
    let s = Shape::cubic_bezier((0.0, 0.0), (0.0, 8.0), (8.0, 8.0), (8.0, 0.0));
    // (P0 + 3 P1 + 3 P2 + P3) / 8
    assert!(close(s.center_x().map(|c| c.0), 4.0));
    assert!(close(s.center_y().map(|c| c.0), 6.0));
}

#[test]
fn outline_lengths() {
    let circle = Shape::circle(0.0, 0.0, 1.0);
    assert!(close(
        circle.outline_length().map(Length::get),
        2.0 * std::f64::consts::PI
    ));
    let rect = Shape::rectangle(0.0, 0.0, 3.0, 4.0);
    assert!(close(rect.outline_length().map(Length::get), 14.0));
    let straight = Shape::cubic_bezier((0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0));
    assert!(close(straight.outline_length().map(Length::get), 3.0));
    assert_eq!(Shape::Empty.outline_length(), None);
}

#[test]
fn lerp_blends_within_a_variant() {
    let a = Shape::circle(0.0, 0.0, 10.0);
    let b = Shape::circle(10.0, 20.0, 20.0);
    assert_eq!(Shape::lerp(&a, &b, 0.5), Shape::circle(5.0, 10.0, 15.0));
}

#[test]
fn lerp_across_variants_jump_cuts() {
    let a = Shape::circle(0.0, 0.0, 10.0);
    let b = Shape::rectangle(0.0, 0.0, 5.0, 5.0);
    assert_eq!(Shape::lerp(&a, &b, 0.1), b);
    assert_eq!(Shape::lerp(&Shape::Empty, &a, 0.5), a);
}

#[test]
fn shape_serializes_with_kind_tag() {
    let json = serde_json::to_value(Shape::circle(1.0, 2.0, 3.0)).unwrap();
    assert_eq!(json["kind"], "circle");
    assert_eq!(json["radius"], 3.0);
}
