use cry_relay::infrastructure::observability::sanitize_backend_message;

#[test]
fn given_bearer_token_in_message_when_sanitizing_then_token_is_redacted() {
    let sanitized = sanitize_backend_message("auth failed for Bearer ghp_abcdef123456 on repo");

    assert!(!sanitized.contains("ghp_abcdef123456"));
    assert!(sanitized.contains("auth failed"));
}

#[test]
fn given_fine_grained_token_when_sanitizing_then_it_is_redacted() {
    let sanitized = sanitize_backend_message("token github_pat_11ABCDEF_xyz leaked");

    assert!(!sanitized.contains("github_pat_11ABCDEF_xyz"));
}

#[test]
fn given_signed_url_when_sanitizing_then_signature_is_redacted() {
    let sanitized =
        sanitize_backend_message("GET https://blob.example/a.zip?sv=2021&sig=SECRETSIG failed");

    assert!(!sanitized.contains("SECRETSIG"));
}

#[test]
fn given_long_message_when_sanitizing_then_it_is_truncated() {
    let long = "é".repeat(2_000);

    let sanitized = sanitize_backend_message(&long);

    assert!(sanitized.chars().count() < 600);
    assert!(sanitized.ends_with("(2000 chars total)"));
}

#[test]
fn given_plain_message_when_sanitizing_then_it_is_unchanged() {
    assert_eq!(sanitize_backend_message("Not Found"), "Not Found");
}
