use super::*;

#[test]
fn millis_from_secs_rounds_to_nearest() {
    assert_eq!(Millis::from_secs_f64(0.05).unwrap(), Millis(50));
    assert_eq!(Millis::from_secs_f64(1.5).unwrap(), Millis(1500));
    assert!(Millis::from_secs_f64(-1.0).is_err());
    assert!(Millis::from_secs_f64(f64::NAN).is_err());
}

#[test]
fn millis_since_saturates() {
    assert_eq!(Millis(300).since(Millis(100)), Millis(200));
    assert_eq!(Millis(100).since(Millis(300)), Millis::ZERO);
}

#[test]
fn viewport_rect_follows_scroll() {
    let vp = ViewportSize::new(1280.0, 800.0).unwrap();
    let r = vp.rect_at(400.0);
    assert_eq!(r.y0, 400.0);
    assert_eq!(r.y1, 1200.0);
    assert_eq!(r.width(), 1280.0);
    assert!(ViewportSize::new(0.0, 800.0).is_err());
}
