use super::*;

fn ramp() -> BreakpointCurve<f64> {
    BreakpointCurve::from_pairs(&[0.0, 1.0], vec![0.0, 100.0]).unwrap()
}

#[test]
fn midpoint_of_two_point_curve() {
    assert_eq!(ramp().evaluate(0.5), 50.0);
}

#[test]
fn out_of_range_input_flat_extrapolates() {
    let curve = ramp();
    assert_eq!(curve.evaluate(-0.5), curve.evaluate(0.0));
    assert_eq!(curve.evaluate(1.7), curve.evaluate(1.0));
    assert_eq!(curve.evaluate(f64::NAN), 0.0);
}

#[test]
fn progress_is_clamped_before_lookup() {
    let curve = BreakpointCurve::from_pairs(&[0.25, 0.75], vec![0.0, 100.0]).unwrap();
    assert_eq!(curve.evaluate(1.7), curve.evaluate(1.0));
    assert_eq!(curve.evaluate(-0.5), curve.evaluate(0.0));
    assert_eq!(curve.evaluate(1.7), 100.0);
    assert_eq!(curve.evaluate(0.5), 50.0);
}

#[test]
fn multi_segment_fade_in_hold_fade_out() {
    let curve =
        BreakpointCurve::from_pairs(&[0.0, 0.2, 0.8, 1.0], vec![0.0, 1.0, 1.0, 0.0]).unwrap();
    assert!((curve.evaluate(0.1) - 0.5).abs() < 1e-12);
    assert_eq!(curve.evaluate(0.5), 1.0);
    assert!((curve.evaluate(0.9) - 0.5).abs() < 1e-12);
    assert_eq!(curve.evaluate(0.2), 1.0);
}

#[test]
fn segment_ease_is_applied() {
    let curve = BreakpointCurve::new(vec![
        Breakpoint {
            at: 0.0,
            value: 0.0,
            ease: Ease::InQuad,
        },
        Breakpoint::new(1.0, 1.0),
    ])
    .unwrap();
    assert_eq!(curve.evaluate(0.5), 0.25);
}

#[test]
fn single_point_curve_is_constant() {
    let curve = BreakpointCurve::from_pairs(&[0.3], vec![7.0]).unwrap();
    assert_eq!(curve.evaluate(0.0), 7.0);
    assert_eq!(curve.evaluate(0.3), 7.0);
    assert_eq!(curve.evaluate(1.0), 7.0);
}

#[test]
fn invalid_curves_fail_fast() {
    assert!(matches!(
        BreakpointCurve::<f64>::new(vec![]),
        Err(KineticError::Config(_))
    ));
    assert!(BreakpointCurve::from_pairs(&[0.0, 0.0], vec![1.0, 2.0]).is_err());
    assert!(BreakpointCurve::from_pairs(&[0.5, 0.2], vec![1.0, 2.0]).is_err());
    assert!(BreakpointCurve::from_pairs(&[0.0, 1.0], vec![1.0]).is_err());
    assert!(BreakpointCurve::from_pairs(&[0.0, f64::INFINITY], vec![1.0, 2.0]).is_err());
    assert!(BreakpointCurve::from_pairs(&[0.0, 2.0], vec![0.0, 200.0]).is_err());
    assert!(BreakpointCurve::from_pairs(&[-0.5, 1.0], vec![0.0, 100.0]).is_err());
    assert!(
        BreakpointCurve::from_pairs(
            &[0.0, 1.0],
            vec![Value::Number(0.0), Value::Color(Rgba8::rgb(0, 0, 0))]
        )
        .is_err()
    );
}

#[test]
fn evenly_spaced_keyframes() {
    let curve = BreakpointCurve::evenly_spaced(vec![0.0, 5.0, 0.0], Ease::Linear).unwrap();
    let at: Vec<f64> = curve.points().iter().map(|p| p.at).collect();
    assert_eq!(at, vec![0.0, 0.5, 1.0]);
    assert_eq!(curve.evaluate(0.25), 2.5);
    assert!(BreakpointCurve::<f64>::evenly_spaced(vec![], Ease::Linear).is_err());
}

#[test]
fn color_curve_interpolates_components() {
    let curve = BreakpointCurve::from_pairs(
        &[0.0, 1.0],
        vec![Rgba8::rgb(0, 0, 0), Rgba8::rgb(255, 255, 255)],
    )
    .unwrap();
    assert_eq!(curve.evaluate(0.5), Rgba8::rgb(128, 128, 128));
}

#[test]
fn json_shape_is_a_list_of_points() {
    let curve: BreakpointCurve<Value> = serde_json::from_str(
        r#"[{"at":0.0,"value":0.8},{"at":0.2,"value":1.0,"ease":"out_cubic"}]"#,
    )
    .unwrap();
    assert_eq!(curve.evaluate(1.0), Value::Number(1.0));
    assert_eq!(curve.points()[1].ease, Ease::OutCubic);
}

#[test]
fn invalid_json_curves_fail_to_load() {
    assert!(serde_json::from_str::<BreakpointCurve<f64>>("[]").is_err());
    assert!(
        serde_json::from_str::<BreakpointCurve<f64>>(
            r#"[{"at":1,"value":0},{"at":0,"value":100}]"#
        )
        .is_err()
    );
    assert!(
        serde_json::from_str::<BreakpointCurve<f64>>(
            r#"[{"at":0,"value":0},{"at":2,"value":200}]"#
        )
        .is_err()
    );

    let curve = ramp();
    let back: BreakpointCurve<f64> =
        serde_json::from_str(&serde_json::to_string(&curve).unwrap()).unwrap();
    assert_eq!(back, curve);
}
