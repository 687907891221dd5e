use super::*;

#[test]
fn exit_codes_are_distinct() {
    assert_eq!(EXIT_SUCCESS, 0);
    assert_eq!(EXIT_CHECK_FAILED, 1);
    assert_eq!(EXIT_CONFIG_ERROR, 2);
}

#[test]
fn artifact_subdir_is_relative() {
    assert!(!ARTIFACT_SUBDIR.starts_with('/'));
    assert!(ARTIFACT_SUBDIR.contains("semver-checks"));
}
