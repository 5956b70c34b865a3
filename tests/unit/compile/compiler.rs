use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::animation::ease::Ease;
use crate::composition::request;

type Probes = Rc<RefCell<Vec<Wrapper<AlphaValue>>>>;

/// A step of `secs` seconds that records its own progress wrapper.
fn probe(probes: &Probes, secs: f64) -> Animatable {
    let probes = Rc::clone(probes);
    Animatable::step(move |b| {
        b.duration(secs);
        probes.borrow_mut().push(b.progress());
    })
}

fn seek(scene: &mut Scene, timeline: &Timeline, p: f64) {
    let clock = scene.graph.primitive(AlphaValue::new(p));
    scene.graph.wrap(timeline.progress, clock);
}

fn progress_of(scene: &Scene, probes: &Probes) -> Vec<f64> {
    probes
        .borrow()
        .iter()
        .map(|&w| scene.graph.get(w).get())
        .collect()
}

fn z(scene: &Scene, id: &str) -> f64 {
    let e = scene.registry().get(&Identifier::from(id)).unwrap();
    scene.graph.get(e.z_index)
}

#[test]
fn sequence_splits_root_progress_by_duration() {
    let mut scene = Scene::new();
    let probes = Probes::default();
    let t = compile(&mut scene, vec![probe(&probes, 1.0), probe(&probes, 2.0)]).unwrap();
    assert_eq!(t.duration, 3.0);

    seek(&mut scene, &t, 1.0 / 3.0);
    let p = progress_of(&scene, &probes);
    assert!((p[0] - 1.0).abs() < 1e-12);
    assert!(p[1].abs() < 1e-12);

    seek(&mut scene, &t, 0.5);
    assert_eq!(progress_of(&scene, &probes), vec![1.0, 0.25]);
}

#[test]
fn zero_duration_child_snaps_at_its_start() {
    let mut scene = Scene::new();
    let probes = Probes::default();
    let t = compile(
        &mut scene,
        vec![probe(&probes, 1.0), probe(&probes, 0.0), probe(&probes, 1.0)],
    )
    .unwrap();

    seek(&mut scene, &t, 0.25);
    assert_eq!(progress_of(&scene, &probes)[1], 0.0);
    seek(&mut scene, &t, 0.5);
    assert_eq!(progress_of(&scene, &probes)[1], 1.0);
}

#[test]
fn parallel_runs_for_the_longest_branch() {
    let mut scene = Scene::new();
    let probes = Probes::default();
    let t = compile(
        &mut scene,
        vec![Animatable::par([
            probe(&probes, 1.0),
            probe(&probes, 4.0),
            probe(&probes, 0.0),
        ])],
    )
    .unwrap();
    assert_eq!(t.duration, 4.0);

    seek(&mut scene, &t, 0.0);
    assert_eq!(progress_of(&scene, &probes), vec![0.0, 0.0, 1.0]);
    seek(&mut scene, &t, 0.5);
    assert_eq!(progress_of(&scene, &probes), vec![1.0, 0.5, 1.0]);
}

#[test]
fn nested_marks_are_rescaled_to_root_progress() {
    let mut scene = Scene::new();
    let t = compile(
        &mut scene,
        vec![
            Animatable::step(|b| {
                b.duration(2.0).mark_start("intro");
            }),
            Animatable::step(|b| {
                b.duration(4.0).mark_at(0.5, "middle");
            }),
            Animatable::step(|b| {
                b.duration(4.0).mark_end("outro");
            }),
        ],
    )
    .unwrap();

    assert_eq!(t.marks[&Identifier::from("intro")], AlphaValue::ZERO);
    assert_eq!(t.marks[&Identifier::from("middle")], AlphaValue::new(0.4));
    assert_eq!(t.marks[&Identifier::from("outro")], AlphaValue::ONE);
}

#[test]
fn parallel_mark_collision_keeps_the_later_branch() {
    let mut scene = Scene::new();
    let t = compile(
        &mut scene,
        vec![Animatable::par([
            Animatable::step(|b| {
                b.duration(2.0).mark_end("done");
            }),
            Animatable::step(|b| {
                b.duration(4.0).mark_at(0.25, "done");
            }),
        ])],
    )
    .unwrap();

    assert_eq!(t.marks.len(), 1);
    assert_eq!(t.marks[&Identifier::from("done")], AlphaValue::new(0.25));
}

#[test]
fn later_steps_start_from_earlier_results() {
    let mut scene = Scene::new();
    let t = compile(
        &mut scene,
        vec![
            Animatable::step(|b| {
                b.duration(1.0);
                b.select("a").z_index_with(10.0, Ease::Linear.into());
            }),
            Animatable::step(|b| {
                b.duration(1.0);
                b.select("a").z_index_with(20.0, Ease::Linear.into());
            }),
        ],
    )
    .unwrap();

    seek(&mut scene, &t, 0.25);
    assert_eq!(z(&scene, "a"), 5.0);
    seek(&mut scene, &t, 0.75);
    assert_eq!(z(&scene, "a"), 15.0);
}

#[test]
fn parallel_branches_do_not_see_each_other() {
    let mut scene = Scene::new();
    let t = compile(
        &mut scene,
        vec![
            Animatable::step(|b| {
                b.select("a").z_index(5.0);
            }),
            Animatable::par([
                Animatable::step(|b| {
                    b.duration(1.0);
                    b.select("a").z_index_with(10.0, Ease::Linear.into());
                }),
                Animatable::step(|b| {
                    b.duration(1.0);
                    b.select("a").z_index_with(20.0, Ease::Linear.into());
                }),
            ]),
        ],
    )
    .unwrap();

    // The later branch wins and interpolates from the value before the group.
    seek(&mut scene, &t, 0.5);
    assert_eq!(z(&scene, "a"), 12.5);
    seek(&mut scene, &t, 1.0);
    assert_eq!(z(&scene, "a"), 20.0);
}

#[test]
fn self_referencing_target_is_rejected() {
    let mut scene = Scene::new();
    let err = compile(
        &mut scene,
        vec![Animatable::step(|b| {
            b.duration(1.0);
            b.select("a").z_index(request::z_index("a"));
        })],
    )
    .unwrap_err();
    assert!(matches!(err, MotionError::Animation(_)));
}

#[test]
fn step_errors_abort_compilation() {
    let mut scene = Scene::new();
    let err = compile(
        &mut scene,
        vec![
            Animatable::step(|b| {
                b.duration(1.0);
            }),
            Animatable::step(|b| {
                b.duration(f64::NAN);
            }),
        ],
    )
    .unwrap_err();
    assert!(matches!(err, MotionError::Validation(_)));
}

#[test]
fn failed_compilation_restores_committed_properties() {
    let mut scene = Scene::new();
    let a = scene.element("a").unwrap();
    let err = compile(
        &mut scene,
        vec![
            Animatable::step(|b| {
                b.duration(1.0);
                b.select("a").fill("red").z_index(3.0);
            }),
            Animatable::par([
                Animatable::step(|b| {
                    b.select("a").z_index(4.0);
                }),
                Animatable::step(|b| {
                    b.select("a").fill("not a color");
                }),
            ]),
        ],
    )
    .unwrap_err();
    assert!(matches!(err, MotionError::Validation(_)));

    assert_eq!(scene.graph.get(a.fill), None);
    assert_eq!(scene.graph.get(a.z_index), 0.0);

    // The scene is still usable for a later, valid timeline.
    let t = compile(
        &mut scene,
        vec![Animatable::step(|b| {
            b.duration(1.0);
            b.select("a").z_index_with(8.0, Ease::Linear.into());
        })],
    )
    .unwrap();
    seek(&mut scene, &t, 0.5);
    assert_eq!(z(&scene, "a"), 4.0);
}

#[test]
fn empty_tree_compiles_to_an_instant() {
    let mut scene = Scene::new();
    let t = compile(&mut scene, Vec::new()).unwrap();
    assert_eq!(t.duration, 0.0);
    assert!(t.marks.is_empty());
}
