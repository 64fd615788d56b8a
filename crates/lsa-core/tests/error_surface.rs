use lsa_core::{ErrorInfo, LsaError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("rowid", "7")
        .with_context("model", "gpt-4o")
}

#[test]
fn alphabet_error_surface() {
    let err = LsaError::Alphabet(sample_info("alphabet.unknown-symbol", "symbol not in alphabet"));
    assert_eq!(err.info().code, "alphabet.unknown-symbol");
    assert!(err.info().context.contains_key("rowid"));
}

#[test]
fn provider_error_surface() {
    let err = LsaError::Provider(sample_info("provider.bad-status", "status 429"));
    assert_eq!(err.info().code, "provider.bad-status");
    assert!(err.info().context.contains_key("model"));
}

#[test]
fn run_error_surface() {
    let err = LsaError::Run(sample_info("run.resume-carry-over", "cannot resume"));
    assert_eq!(err.info().code, "run.resume-carry-over");
}

#[test]
fn display_includes_context_and_hint() {
    let err = LsaError::Template(
        ErrorInfo::new("template.unknown", "unknown template nr")
            .with_context("template_nr", "9")
            .with_hint("expected 1-5"),
    );
    let rendered = err.to_string();
    assert!(rendered.contains("template.unknown"));
    assert!(rendered.contains("template_nr=9"));
    assert!(rendered.contains("expected 1-5"));
}

#[test]
fn errors_round_trip_through_serde() {
    let err = LsaError::Items(sample_info("items.missing-column", "missing column"));
    let json = serde_json::to_string(&err).unwrap();
    let restored: LsaError = serde_json::from_str(&json).unwrap();
    assert_eq!(err, restored);
}
