use super::*;

fn scene() -> Scene {
    let page = PageSpec::from_json(include_str!("../../data/page.json")).unwrap();
    Scene::build(&page).unwrap()
}

fn number(snap: &FrameSnapshot, key: &str) -> f64 {
    snap.values[key].as_number().unwrap()
}

#[test]
fn shares_ranged_sources_between_bindings() {
    let scene = scene();
    let stats = scene.engine().stats();
    // global + one ranged source shared by card.fade and card.tint
    assert_eq!(stats.progress_sources, 2);
    assert_eq!(stats.elements, 3);
    assert_eq!(stats.triggers, 1);
    assert_eq!(stats.loops, 2);
    assert_eq!(stats.values, 7);
}

#[test]
fn frames_follow_scroll_and_time() {
    let mut scene = scene();

    let snap = scene.frame(Millis(0), 0.0).unwrap();
    assert_eq!(snap.progress, 0.0);
    assert_eq!(number(&snap, "card.fade"), 0.0);
    assert_eq!(snap.triggers["card#0"].state, TriggerState::Idle);
    assert!(snap.fired.is_empty());

    // entry = 1000 - 500, exit = 1200
    let snap = scene.frame(Millis(250), 850.0).unwrap();
    assert_eq!(number(&snap, "card.fade"), 0.5);
    assert_eq!(
        snap.values["card.tint"],
        Value::Color(crate::Rgba8::rgb(128, 128, 128))
    );
    assert_eq!(snap.fired, vec!["card#0".to_string()]);
    assert_eq!(snap.triggers["card#0"].fired_at, Some(Millis(250)));
    assert_eq!(number(&snap, "card.a"), 0.0);

    let snap = scene.frame(Millis(300), 850.0).unwrap();
    assert_eq!(number(&snap, "card.a"), 0.5);
    assert_eq!(number(&snap, "card.b"), 0.0);
    assert!((number(&snap, "spinner.rotate") - 108.0).abs() < 1e-9);
    assert!(snap.fired.is_empty());
}

#[test]
fn cleared_bounds_hold_scroll_values() {
    let mut scene = scene();
    scene.frame(Millis(0), 850.0).unwrap();
    scene.set_bounds("card", None).unwrap();

    let snap = scene.frame(Millis(16), 1400.0).unwrap();
    assert_eq!(number(&snap, "card.fade"), 0.5);
    assert!(scene.set_bounds("ghost", None).is_err());
}

#[test]
fn loops_hold_first_keyframe_until_mounted() {
    let mut scene = scene();
    let first = scene.frame(Millis(0), 0.0).unwrap().values["dot.x"];
    let again = scene.frame(Millis(100), 0.0).unwrap().values["dot.x"];
    assert_eq!(first, again);
    let value = first.as_number().unwrap();
    assert!((0.0..=100.0).contains(&value));
}

#[test]
fn snapshots_serialize_with_stable_keys() {
    let mut scene = scene();
    let snap = scene.frame(Millis(250), 850.0).unwrap();
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["triggers"]["card#0"]["state"], "fired");
    assert_eq!(json["values"]["card.tint"], "#808080");
    assert_eq!(json["fired"][0], "card#0");
}
