use super::*;

const SMOOTH: [Ease; 13] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InSine,
    Ease::OutSine,
    Ease::InOutSine,
    Ease::InBounce,
    Ease::OutBounce,
    Ease::InOutBounce,
];

#[test]
fn endpoints_are_stable() {
    for ease in SMOOTH {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?} at 0");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?} at 1");
        assert_eq!(ease.apply(-0.5), 0.0, "{ease:?} below 0");
        assert_eq!(ease.apply(2.0), 1.0, "{ease:?} above 1");
    }
    assert_eq!(Ease::JumpToEnd.apply(0.0), 0.0);
    assert_eq!(Ease::JumpToEnd.apply(1.0), 1.0);
}

#[test]
fn monotonic_spot_check() {
    for ease in [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InSine,
        Ease::OutSine,
        Ease::InOutSine,
    ] {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn jump_to_end_holds_until_exactly_one() {
    assert_eq!(Ease::JumpToEnd.apply(0.5), 0.0);
    assert_eq!(Ease::JumpToEnd.apply(0.999_999), 0.0);
}

#[test]
fn bounce_stays_in_unit_range() {
    for i in 0..=100 {
        let t = f64::from(i) / 100.0;
        for ease in [Ease::InBounce, Ease::OutBounce, Ease::InOutBounce] {
            let v = ease.apply(t);
            assert!((-1e-9..=1.0 + 1e-9).contains(&v), "{ease:?}({t}) = {v}");
        }
    }
    assert!((Ease::InOutBounce.apply(0.5) - 0.5).abs() < 1e-9);
}

#[test]
fn eased_cell_follows_its_input() {
    let mut g = CellGraph::new();
    let p = g.primitive(AlphaValue::ZERO);
    let eased = Ease::InCubic.cell(&mut g, p);
    g.set(p, AlphaValue::new(0.5));
    assert_eq!(g.get(eased).get(), 0.125);

    let same = Ease::Linear.cell(&mut g, p);
    assert_eq!(same, p.as_cell());
}
