use super::*;

const FIXTURE: &str = include_str!("../../data/page.json");

fn fixture() -> PageSpec {
    PageSpec::from_json(FIXTURE).unwrap()
}

#[test]
fn fixture_parses_with_defaults() {
    let page = fixture();
    assert_eq!(page.settings.seed, 11);
    assert_eq!(page.elements.len(), 3);
    assert_eq!(page.elements["spinner"], ElementSpec::default());
    assert_eq!(page.elements["dot"].mount_at, Millis(100));
    assert_eq!(page.scroll[0].element, None);
    assert_eq!(page.scroll[2].offsets, ScrollOffsets::ENTER_EXIT);
    assert!(page.reveals[0].options.once);
    assert_eq!(page.reveals[0].options.margin.top, -10.0);
    assert_eq!(page.reveals[0].sequence.stagger, Millis(50));
    assert_eq!(page.max_scroll(), 1500.0);
}

#[test]
fn json_round_trip_preserves_page() {
    let page = fixture();
    let again = PageSpec::from_json(&page.to_json_pretty().unwrap()).unwrap();
    assert_eq!(page, again);
}

#[test]
fn rejects_missing_element_reference() {
    let mut page = fixture();
    page.reveals[0].element = "ghost".into();
    let err = page.validate().unwrap_err().to_string();
    assert!(err.contains("missing element 'ghost'"), "{err}");
}

#[test]
fn rejects_duplicate_property() {
    let mut page = fixture();
    page.loops[0].animation.property = "card.fade".into();
    let err = page.validate().unwrap_err();
    assert!(matches!(err, KineticError::Config(_)));
    assert!(err.to_string().contains("bound more than once"));
}

#[test]
fn rejects_bad_geometry_and_viewport() {
    let mut page = fixture();
    page.elements.get_mut("card").unwrap().bounds = Some(Bounds::new(0.0, 0.0, -1.0, 10.0));
    assert!(matches!(page.validate(), Err(KineticError::Validation(_))));

    let mut page = fixture();
    page.viewport.height = 0.0;
    assert!(page.validate().is_err());

    let mut page = fixture();
    page.document_height = f64::INFINITY;
    assert!(page.validate().is_err());
}

#[test]
fn rejects_invalid_bindings() {
    let mut page = fixture();
    page.reveals[0].sequence.children.clear();
    assert!(page.validate().is_err());

    let mut page = fixture();
    page.loops[0].animation.period = Millis::ZERO.into();
    assert!(page.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(
        PageSpec::from_json("{ \"viewport\": 3 }"),
        Err(KineticError::Serde(_))
    ));
}

#[test]
fn bad_curve_in_page_fails_on_load() {
    let reversed = FIXTURE.replacen(
        r#"[ { "at": 0, "value": 0 }, { "at": 1, "value": 1 } ]"#,
        r#"[ { "at": 1, "value": 0 }, { "at": 0, "value": 1 } ]"#,
        1,
    );
    assert_ne!(reversed, FIXTURE);
    assert!(matches!(
        PageSpec::from_json(&reversed),
        Err(KineticError::Serde(_))
    ));
}

#[test]
fn bounds_convert_to_rect() {
    assert_eq!(
        Bounds::new(10.0, 20.0, 30.0, 40.0).to_rect(),
        Rect::new(10.0, 20.0, 40.0, 60.0)
    );
}
