use motion_curves_core::{CurveDescriptor, Easing, Motion, MotionCurve};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CurveFixture {
    curve: CurveDescriptor,
    tolerance: f64,
    samples: Vec<Sample>,
}

#[derive(Debug, Deserialize)]
struct Sample {
    t: f64,
    pos: Vec<f64>,
}

fn assert_close(name: &str, t: f64, got: &[f64], want: &[f64], eps: f64) {
    assert_eq!(got.len(), want.len(), "{name} @ t={t}: dims");
    for (axis, (g, w)) in got.iter().zip(want).enumerate() {
        assert!(
            (g - w).abs() <= eps,
            "{name} @ t={t} axis {axis}: got {g}, want {w} (eps {eps})"
        );
    }
}

#[test]
fn every_curve_fixture_matches_its_samples() {
    let keys = motion_curves_test_fixtures::curves::keys();
    assert!(!keys.is_empty());
    for name in keys {
        let fixture: CurveFixture =
            motion_curves_test_fixtures::curves::load(&name).expect("load curve fixture");
        let curve = fixture.curve.build().expect("build fixture curve");
        for sample in &fixture.samples {
            let got = curve.pos(sample.t);
            assert_close(&name, sample.t, &got, &sample.pos, fixture.tolerance);
        }
    }
}

#[test]
fn natural_fixture_builds_a_path_curve() {
    let fixture: CurveFixture =
        motion_curves_test_fixtures::curves::load("natural-diagonal").expect("load fixture");
    let curve = fixture.curve.build().expect("build");
    assert!(matches!(curve, MotionCurve::Natural(_)));
    assert!(curve.as_keyed().is_none());
}

#[test]
fn card_enter_motion_loads_cleanly() {
    let json = motion_curves_test_fixtures::motions::json("card-enter").expect("load motion");
    let motion = Motion::from_json(&json).expect("build motion");
    assert!(motion.diagnostics.is_empty());
    assert_eq!(motion.curves.len(), 4);
    assert_eq!(motion.cycles.len(), 2);
    assert_eq!(motion.easings.len(), 4);

    // Waypoints are hit exactly.
    let slide = &motion.curves["slide"];
    assert_close("slide", 0.6, &slide.pos(0.6), &[80.0, 20.0], 1e-12);
    // Clamped fade holds its end values.
    assert_eq!(motion.curves["fade"].pos(2.0), vec![1.0]);
    assert_eq!(motion.curves["fade"].pos(-1.0), vec![0.0]);

    let wobble = &motion.cycles["wobble"];
    assert!(wobble.is_normalized());
    assert!((wobble.phase(1.0) - 4.0).abs() < 1e-9);

    let pulse = &motion.cycles["pulse"];
    assert!((pulse.value(0.0, 0.0) - 0.0).abs() < 1e-12);
    // Four turns over the schedule: a quarter turn lands on the second level.
    assert!((pulse.value(0.0625, 0.0) - 1.0).abs() < 1e-12);

    for easing in motion.easings.values() {
        assert!(!matches!(easing, Easing::Identity));
    }
}

#[test]
fn bad_easings_are_reported_not_fatal() {
    let name = "bad-easing";
    let json = motion_curves_test_fixtures::motions::json(name).expect("load motion");
    let expected = motion_curves_test_fixtures::motions::expected_diagnostics(name).unwrap();
    let motion = Motion::from_json(&json).expect("bad easings must not fail the load");
    assert_eq!(motion.diagnostics.len(), expected);
    assert_eq!(motion.easings["enter"], Easing::Identity);
    assert_eq!(motion.easings["exit"], Easing::Identity);
    assert!(matches!(motion.easings["ok"], Easing::Cubic(_)));
}

#[test]
fn unknown_fixture_names_are_errors() {
    assert!(motion_curves_test_fixtures::curves::load::<CurveFixture>("nope").is_err());
}

#[test]
fn manifest_entries_resolve_to_files() {
    for name in motion_curves_test_fixtures::curves::keys() {
        assert!(motion_curves_test_fixtures::curves::path(&name).unwrap().is_file());
        let raw = motion_curves_test_fixtures::curves::json(&name).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let desc = CurveDescriptor::from_json(&doc["curve"].to_string()).unwrap();
        assert!(desc.build().is_ok(), "{name}");
    }
    for name in motion_curves_test_fixtures::motions::keys() {
        assert!(motion_curves_test_fixtures::motions::path(&name).unwrap().is_file());
        let desc: motion_curves_core::MotionDescriptor =
            motion_curves_test_fixtures::motions::load(&name).unwrap();
        assert!(!desc.easings.is_empty(), "{name}");
    }
}
