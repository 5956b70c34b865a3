use super::*;
use crate::compile::compiler::{Timeline, compile};
use crate::composition::animatable::Animatable;
use crate::composition::builder::AnimationBuilder;
use crate::composition::transition::ShapeOpts;
use crate::foundation::ids::Identifier;

fn build(scene: &mut Scene, f: impl FnOnce(&mut AnimationBuilder<'_>) + 'static) -> Timeline {
    compile(scene, vec![Animatable::step(f)]).unwrap()
}

fn seek(scene: &mut Scene, timeline: &Timeline, p: f64) {
    let clock = scene.graph.primitive(AlphaValue::new(p));
    scene.graph.wrap(timeline.progress, clock);
}

fn shape_of(scene: &Scene, id: &str) -> Shape {
    let e = scene.registry().get(&Identifier::from(id)).unwrap();
    scene.graph.get(e.shape)
}

#[test]
fn drafting_from_empty_jump_cuts_to_the_target() {
    let mut scene = Scene::new();
    let t = build(&mut scene, |b| {
        b.duration(1.0);
        b.select("dot").circle(|c| {
            c.center((50.0, 50.0)).radius(40.0);
        });
    });

    seek(&mut scene, &t, 0.0);
    assert_eq!(shape_of(&scene, "dot"), Shape::Empty);
    seek(&mut scene, &t, 0.01);
    assert_eq!(shape_of(&scene, "dot"), Shape::circle(50.0, 50.0, 40.0));
}

#[test]
fn same_variant_fields_interpolate_with_their_own_ease() {
    let mut scene = Scene::new();
    let t = compile(
        &mut scene,
        vec![
            Animatable::step(|b| {
                b.select("dot").circle(|c| {
                    c.center((0.0, 0.0)).radius(10.0);
                });
            }),
            Animatable::step(|b| {
                b.duration(1.0);
                b.select("dot").circle_with(
                    |c| {
                        c.radius_with(30.0, Ease::Linear.into());
                        c.center_x(100.0);
                    },
                    Ease::Linear.into(),
                );
            }),
        ],
    )
    .unwrap();

    seek(&mut scene, &t, 0.5);
    let Shape::Circle(circle) = shape_of(&scene, "dot") else {
        panic!("expected a circle");
    };
    assert_eq!(circle.radius, Some(Length::new(20.0)));
    // Default field easing holds until the step completes.
    assert_eq!(circle.center_x, Some(Coordinate(0.0)));

    seek(&mut scene, &t, 1.0);
    assert_eq!(shape_of(&scene, "dot"), Shape::circle(100.0, 0.0, 30.0));
}

#[test]
fn sine_eased_shape_reaches_its_targets() {
    let mut scene = Scene::new();
    let t = compile(
        &mut scene,
        vec![
            Animatable::step(|b| {
                b.duration(1.0);
                b.select("c").circle(|c| {
                    c.center((0.0, 0.0)).radius(10.0);
                });
            }),
            Animatable::step(|b| {
                b.duration(1.0);
                b.select("c").circle_with(
                    |c| {
                        c.radius(40.0);
                    },
                    ShapeOpts::from(Ease::InSine),
                );
            }),
        ],
    )
    .unwrap();

    seek(&mut scene, &t, 1.0);
    assert_eq!(shape_of(&scene, "c"), Shape::circle(0.0, 0.0, 40.0));
}

#[test]
fn unset_fields_inherit_from_the_previous_shape() {
    let mut scene = Scene::new();
    let t = compile(
        &mut scene,
        vec![
            Animatable::step(|b| {
                b.select("box").rectangle(|r| {
                    r.top_left((1.0, 2.0)).width(3.0).height(4.0);
                });
            }),
            Animatable::step(|b| {
                b.duration(1.0);
                b.select("box").rectangle(|r| {
                    r.width(9.0);
                });
            }),
        ],
    )
    .unwrap();

    seek(&mut scene, &t, 1.0);
    assert_eq!(shape_of(&scene, "box"), Shape::rectangle(1.0, 2.0, 9.0, 4.0));
}

#[test]
fn variant_change_takes_geometry_from_derived_accessors() {
    let mut scene = Scene::new();
    let t = compile(
        &mut scene,
        vec![
            Animatable::step(|b| {
                b.select("x").rectangle(|r| {
                    r.top_left((0.0, 0.0)).width(20.0).height(20.0);
                });
            }),
            Animatable::step(|b| {
                b.duration(1.0);
                b.select("x").circle(|_| {});
            }),
        ],
    )
    .unwrap();

    seek(&mut scene, &t, 0.5);
    assert_eq!(shape_of(&scene, "x"), Shape::circle(10.0, 10.0, 10.0));
}

#[test]
fn line_and_bezier_points_are_set_together() {
    let mut scene = Scene::new();
    let t = build(&mut scene, |b| {
        b.duration(1.0);
        b.select("l").line(|l| {
            l.start((0.0, 0.0)).end((3.0, 4.0));
        });
        b.select("c").cubic_bezier(|c| {
            c.start((0.0, 0.0))
                .control1((0.0, 1.0))
                .control2((1.0, 1.0))
                .end((1.0, 0.0));
        });
    });

    seek(&mut scene, &t, 1.0);
    assert_eq!(
        shape_of(&scene, "l"),
        Shape::line((0.0, 0.0), (3.0, 4.0))
    );
    assert_eq!(
        shape_of(&scene, "c"),
        Shape::cubic_bezier((0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0))
    );
}

#[test]
fn container_holds_a_child_element() {
    let mut scene = Scene::new();
    let t = build(&mut scene, |b| {
        b.duration(1.0);
        let child = b.element("inner").unwrap();
        b.select("frame").container(move |c| {
            c.top_left((0.0, 0.0)).width(100.0).height(50.0).child(child);
        });
    });

    seek(&mut scene, &t, 1.0);
    let inner = scene.registry().get(&Identifier::from("inner")).unwrap();
    assert_eq!(
        shape_of(&scene, "frame"),
        Shape::container(0.0, 0.0, 100.0, 50.0, Some(inner))
    );
}
