use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        KineticError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        KineticError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        KineticError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        KineticError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = KineticError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: KineticError = serde_json::from_str::<u64>("nope").unwrap_err().into();
    assert!(matches!(err, KineticError::Serde(_)));
}
