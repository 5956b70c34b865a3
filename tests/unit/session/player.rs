use super::*;
use crate::render::svg::SvgDrawing;

fn player(secs: f64) -> Player<SvgDrawing> {
    let step = Animatable::step(move |b| {
        b.duration(secs).mark_at(0.5, "half");
        b.select("dot").z_index(1.0);
    });
    Player::new(Scene::new(), vec![step], SvgDrawing::default()).unwrap()
}

#[test]
fn starts_at_the_beginning_and_draws_once() {
    let p = player(2.0);
    assert_eq!(p.progress(), AlphaValue::ZERO);
    assert_eq!(p.duration(), 2.0);
    assert!(!p.is_running());
    assert_eq!(p.drawing().frames(), 1);
    assert!(p.element("dot").is_some());
    assert!(p.element("nobody").is_none());
}

#[test]
fn seeking_in_seconds_normalizes_and_clamps() {
    let mut p = player(2.0);
    p.seek(1.0);
    assert_eq!(p.progress().get(), 0.5);
    p.seek(10.0);
    assert_eq!(p.progress(), AlphaValue::ONE);
    p.seek(-1.0);
    assert_eq!(p.progress(), AlphaValue::ZERO);
    assert_eq!(p.drawing().frames(), 4);
}

#[test]
fn seek_to_mark() {
    let mut p = player(2.0);
    p.seek_mark("half").unwrap();
    assert_eq!(p.progress().get(), 0.5);

    let err = p.seek_mark("missing").unwrap_err();
    assert!(matches!(err, MotionError::UnknownMark(_)));
    assert_eq!(p.progress().get(), 0.5);
}

#[test]
fn play_rejects_bad_arguments_without_side_effects() {
    let mut p = player(2.0);
    let running = p.play(PlayOpts::default()).unwrap();

    let cases = [
        PlayOpts::default().to(1.0).progress(0.5),
        PlayOpts::default().playback_rate(0.0),
        PlayOpts::default().playback_rate(f64::INFINITY),
        PlayOpts::default().to(f64::NAN),
    ];
    for opts in cases {
        let err = p.play(opts).unwrap_err();
        assert!(matches!(err, MotionError::Playback(_)), "{err}");
    }
    let err = p.play(PlayOpts::default().mark("missing")).unwrap_err();
    assert!(matches!(err, MotionError::UnknownMark(_)));

    // The run in flight is untouched.
    assert!(p.is_running());
    let mut running = running;
    assert_eq!(p.on_frame(&mut running, 0.0), FrameStatus::Running);
}

#[test]
fn frames_advance_by_elapsed_time() {
    let mut p = player(2.0);
    let mut run = p.play(PlayOpts::default()).unwrap();
    assert_eq!(run.target(), AlphaValue::ONE);
    assert_eq!(run.direction(), PlaybackDirection::Forward);

    assert_eq!(p.on_frame(&mut run, 1000.0), FrameStatus::Running);
    assert_eq!(p.progress(), AlphaValue::ZERO);
    assert_eq!(p.on_frame(&mut run, 1500.0), FrameStatus::Running);
    assert_eq!(p.progress().get(), 0.25);

    assert_eq!(p.on_frame(&mut run, 9000.0), FrameStatus::Finished);
    assert_eq!(p.progress(), AlphaValue::ONE);
    assert!(!p.is_running());
    assert_eq!(p.on_frame(&mut run, 9500.0), FrameStatus::Cancelled);
}

#[test]
fn playback_rate_scales_speed() {
    let mut p = player(2.0);
    let mut run = p.play(PlayOpts::default().playback_rate(2.0)).unwrap();
    p.on_frame(&mut run, 0.0);
    p.on_frame(&mut run, 500.0);
    assert_eq!(p.progress().get(), 0.5);
}

#[test]
fn direction_follows_the_target() {
    let mut p = player(2.0);
    p.seek(1.0);
    let mut run = p.play(PlayOpts::default().progress(0.0)).unwrap();
    assert_eq!(run.direction(), PlaybackDirection::Backward);

    p.on_frame(&mut run, 0.0);
    p.on_frame(&mut run, 500.0);
    assert_eq!(p.progress().get(), 0.25);
    assert_eq!(p.on_frame(&mut run, 2000.0), FrameStatus::Finished);
    assert_eq!(p.progress(), AlphaValue::ZERO);
}

#[test]
fn backward_without_target_rewinds_to_start() {
    let mut p = player(2.0);
    p.seek(2.0);
    let run = p
        .play(PlayOpts::default().direction(PlaybackDirection::Backward))
        .unwrap();
    assert_eq!(run.target(), AlphaValue::ZERO);
}

#[test]
fn playing_to_a_mark_stops_there() {
    let mut p = player(2.0);
    let mut run = p.play(PlayOpts::default().mark("half")).unwrap();
    p.on_frame(&mut run, 0.0);
    assert_eq!(p.on_frame(&mut run, 1500.0), FrameStatus::Finished);
    assert_eq!(p.progress().get(), 0.5);
}

#[test]
fn newer_runs_and_seeks_cancel_older_ones() {
    let mut p = player(2.0);
    let mut first = p.play(PlayOpts::default()).unwrap();
    let mut second = p.play(PlayOpts::default()).unwrap();
    assert_eq!(p.on_frame(&mut first, 0.0), FrameStatus::Cancelled);
    assert_eq!(p.on_frame(&mut second, 0.0), FrameStatus::Running);

    p.seek(0.5);
    assert!(!p.is_running());
    assert_eq!(p.on_frame(&mut second, 100.0), FrameStatus::Cancelled);

    let mut third = p.play(PlayOpts::default()).unwrap();
    p.stop();
    assert_eq!(p.on_frame(&mut third, 0.0), FrameStatus::Cancelled);
}

#[test]
fn running_cell_tracks_playback() {
    let mut p = player(2.0);
    let running = p.running();
    assert!(!p.graph().get(running));
    let _run = p.play(PlayOpts::default()).unwrap();
    assert!(p.graph().get(running));
    p.stop();
    assert!(!p.graph().get(running));
}

#[test]
fn zero_duration_timeline_finishes_on_the_second_frame() {
    let mut p = player(0.0);
    let mut run = p.play(PlayOpts::default()).unwrap();
    assert_eq!(p.on_frame(&mut run, 0.0), FrameStatus::Running);
    assert_eq!(p.on_frame(&mut run, 16.0), FrameStatus::Finished);
    assert_eq!(p.progress(), AlphaValue::ONE);
}

#[test]
fn play_opts_from_json() {
    let opts = PlayOpts::from_json(r#"{"progress": 0.5, "direction": "backward"}"#).unwrap();
    assert_eq!(opts.progress, Some(AlphaValue::new(0.5)));
    assert_eq!(opts.direction, Some(PlaybackDirection::Backward));
    assert_eq!(opts.playback_rate, 1.0);

    let opts = PlayOpts::from_json(r#"{"mark": "intro"}"#).unwrap();
    assert_eq!(opts.mark, Some(Identifier::from("intro")));

    let err = PlayOpts::from_json(r#"{"speed": 2}"#).unwrap_err();
    assert!(matches!(err, MotionError::Serde(_)));
}
