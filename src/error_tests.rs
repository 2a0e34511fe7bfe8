use super::*;

// ============================================================================
// Display formatting
// ============================================================================

#[test]
fn test_error_display() {
    assert_eq!(
        Error::SceneNotSet.to_string(),
        "Traversal started before set_scene"
    );
    assert_eq!(
        Error::InvalidNode("root gone".to_string()).to_string(),
        "Invalid node: root gone"
    );
    assert_eq!(
        Error::InvalidScene("cycle".to_string()).to_string(),
        "Invalid scene edit: cycle"
    );
}

#[test]
fn test_error_is_std_error() {
    fn assert_std_error<E: std::error::Error>(_e: &E) {}
    assert_std_error(&Error::SceneNotSet);
}

#[test]
fn test_result_alias() {
    fn produces() -> Result<u32> {
        Err(Error::SceneNotSet)
    }
    assert!(produces().is_err());
}
