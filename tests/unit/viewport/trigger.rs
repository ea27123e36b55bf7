use super::*;

const VP_H: f64 = 800.0;

fn viewport_at(scroll: f64) -> Rect {
    Rect::new(0.0, scroll, 1280.0, scroll + VP_H)
}

fn card() -> Rect {
    Rect::new(100.0, 1500.0, 500.0, 1900.0)
}

#[test]
fn idle_until_element_intersects() {
    let mut trig = ViewportTrigger::new(ViewportOptions::once()).unwrap();
    assert_eq!(
        trig.observe(Some(card()), viewport_at(0.0), Millis(0)),
        Observation::Unchanged
    );
    assert_eq!(trig.state(), TriggerState::Idle);
    assert_eq!(trig.fired_at(), None);
}

#[test]
fn fires_synchronously_on_entry() {
    let mut trig = ViewportTrigger::new(ViewportOptions::once()).unwrap();
    let obs = trig.observe(Some(card()), viewport_at(800.0), Millis(40));
    assert_eq!(
        obs,
        Observation::Fired(FireEvent {
            at: Millis(40),
            count: 1
        })
    );
    assert_eq!(trig.state(), TriggerState::Fired);
    assert_eq!(trig.fired_at(), Some(Millis(40)));
}

#[test]
fn already_visible_at_mount_fires_on_first_observation() {
    let mut trig = ViewportTrigger::new(ViewportOptions::default()).unwrap();
    let obs = trig.observe(Some(Rect::new(0.0, 10.0, 100.0, 50.0)), viewport_at(0.0), Millis(0));
    assert!(matches!(obs, Observation::Fired(_)));
}

#[test]
fn once_never_refires() {
    let mut trig = ViewportTrigger::new(ViewportOptions::once()).unwrap();
    let mut now = 0;
    for _ in 0..5 {
        trig.observe(Some(card()), viewport_at(1400.0), Millis(now));
        now += 16;
        trig.observe(Some(card()), viewport_at(0.0), Millis(now));
        now += 16;
    }
    assert_eq!(trig.fire_count(), 1);
    assert_eq!(trig.state(), TriggerState::Fired);
    assert_eq!(trig.fired_at(), Some(Millis(0)));
}

#[test]
fn repeatable_refires_once_per_reentry() {
    let mut trig = ViewportTrigger::new(ViewportOptions::default()).unwrap();
    assert!(matches!(
        trig.observe(Some(card()), viewport_at(1400.0), Millis(0)),
        Observation::Fired(_)
    ));
    // Staying in view does not refire.
    trig.observe(Some(card()), viewport_at(1410.0), Millis(16));
    assert_eq!(trig.fire_count(), 1);

    for cycle in 1..=3u32 {
        let exit = trig.observe(Some(card()), viewport_at(0.0), Millis(u64::from(cycle) * 100));
        assert_eq!(exit, Observation::Reset);
        assert_eq!(trig.state(), TriggerState::Idle);

        let at = Millis(u64::from(cycle) * 100 + 50);
        let enter = trig.observe(Some(card()), viewport_at(1400.0), at);
        assert_eq!(
            enter,
            Observation::Fired(FireEvent {
                at,
                count: cycle + 1
            })
        );
        // Re-entry restarts the run from the new fire time.
        assert_eq!(trig.fired_at(), Some(at));
    }
    assert_eq!(trig.fire_count(), 4);
}

#[test]
fn missing_geometry_is_unavailable_and_keeps_state() {
    let mut trig = ViewportTrigger::new(ViewportOptions::default()).unwrap();
    trig.observe(Some(card()), viewport_at(1400.0), Millis(0));
    assert_eq!(
        trig.observe(None, viewport_at(0.0), Millis(16)),
        Observation::Unavailable
    );
    assert_eq!(trig.state(), TriggerState::Fired);
}

#[test]
fn negative_margin_delays_arming() {
    let opts = ViewportOptions::once().with_margin(Margin::uniform(-100.0));
    let mut trig = ViewportTrigger::new(opts).unwrap();
    // Card top at 1500; viewport bottom at 1550 overlaps by 50px only.
    assert_eq!(
        trig.observe(Some(card()), viewport_at(750.0), Millis(0)),
        Observation::Unchanged
    );
    // Shrunk top edge is at 1600; viewport bottom at 1650 overlaps.
    assert!(matches!(
        trig.observe(Some(card()), viewport_at(850.0), Millis(16)),
        Observation::Fired(_)
    ));
}

#[test]
fn amount_thresholds() {
    let element = Rect::new(0.0, 0.0, 100.0, 100.0);
    let half = Rect::new(0.0, 50.0, 1280.0, 850.0);
    assert!(in_view(element, half, Margin::default(), Amount::Some));
    assert!(!in_view(element, half, Margin::default(), Amount::All));
    assert!(in_view(element, half, Margin::default(), Amount::Fraction(0.5)));
    assert!(!in_view(element, half, Margin::default(), Amount::Fraction(0.6)));
    assert!(in_view(
        element,
        Rect::new(0.0, 0.0, 1280.0, 800.0),
        Margin::default(),
        Amount::All
    ));
}

#[test]
fn margin_larger_than_element_never_fires() {
    let element = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(!in_view(
        element,
        viewport_at(0.0),
        Margin::uniform(-60.0),
        Amount::Some
    ));
}

#[test]
fn options_json_forms() {
    let opts: ViewportOptions =
        serde_json::from_str(r#"{"once": true, "margin": -100, "amount": "all"}"#).unwrap();
    assert!(opts.once);
    assert_eq!(opts.margin, Margin::uniform(-100.0));
    assert_eq!(opts.amount, Amount::All);

    let opts: ViewportOptions =
        serde_json::from_str(r#"{"margin": [10, 20], "amount": 0.3}"#).unwrap();
    assert_eq!(opts.margin.left, 20.0);
    assert_eq!(opts.margin.top, 10.0);
    assert_eq!(opts.amount, Amount::Fraction(0.3));
    assert!(!opts.once);

    let opts: ViewportOptions = serde_json::from_str(r#"{"margin": {"bottom": 5}}"#).unwrap();
    assert_eq!(opts.margin.bottom, 5.0);

    assert!(serde_json::from_str::<ViewportOptions>(r#"{"margin": [1, 2, 3]}"#).is_err());
}

#[test]
fn invalid_options_fail_at_construction() {
    let opts = ViewportOptions::default().with_amount(Amount::Fraction(1.5));
    assert!(matches!(
        ViewportTrigger::new(opts),
        Err(KineticError::Config(_))
    ));
}
