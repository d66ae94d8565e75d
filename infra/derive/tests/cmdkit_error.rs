use cmdkit_derive::cmdkit_error;
use std::borrow::Cow;
use std::error::Error as _;

#[cmdkit_error]
pub enum StoreError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Bad number '{raw}'{}: {source}", format_context(.context))]
    Number { raw: String, source: std::num::ParseIntError, context: Option<Cow<'static, str>> },

    #[error("Missing key '{key}'")]
    Missing { key: String },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn io_failure() -> Result<(), std::io::Error> {
    Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
}

fn read_with_question_mark() -> Result<(), StoreError> {
    io_failure()?;
    Ok(())
}

#[test]
fn cmdkit_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/cmdkit_error_pass.rs");
    t.compile_fail("tests/ui/cmdkit_error_tuple_variant.rs");
    t.compile_fail("tests/ui/cmdkit_error_no_context.rs");
    t.compile_fail("tests/ui/cmdkit_error_bad_context_type.rs");
}

#[test]
fn source_converts_with_question_mark() {
    let err = read_with_question_mark().unwrap_err();
    assert!(matches!(err, StoreError::Io { context: None, .. }));
    assert_eq!(err.to_string(), "IO error: gone");
    assert!(err.source().is_some());
}

#[test]
fn context_is_attached_to_source_results() {
    let err = io_failure().context("Opening store").unwrap_err();
    assert_eq!(err.to_string(), "IO error (Opening store): gone");
}

#[test]
fn context_is_attached_to_own_results() {
    let result: Result<(), StoreError> = Err("boom".into());
    let err = result.context("Loading").unwrap_err();
    assert_eq!(err.to_string(), "Internal error (Loading): boom");
}

#[test]
fn payload_variants_keep_their_fields() {
    let source = "x".parse::<u8>().unwrap_err();
    let err = StoreError::Number { raw: "x".to_owned(), source, context: None };
    assert!(err.to_string().starts_with("Bad number 'x': "));

    let err = StoreError::Missing { key: "port".to_owned() };
    let err: Result<(), StoreError> = Err(err);
    assert_eq!(err.context("ignored").unwrap_err().to_string(), "Missing key 'port'");
}

#[test]
fn internal_accepts_owned_strings() {
    let err = StoreError::from(format!("code {}", 7));
    assert!(matches!(err, StoreError::Internal { .. }));
    assert_eq!(err.to_string(), "Internal error: code 7");
}
