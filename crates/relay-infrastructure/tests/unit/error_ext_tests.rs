//! Error Extension Tests

use std::error::Error as _;
use std::io;

use relay_domain::error::{Error, Result};
use relay_infrastructure::error_ext::ErrorContext;

fn not_found() -> std::result::Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "file not found"))
}

#[test]
fn test_config_context() {
    let result: Result<()> = not_found().config_context("failed to read config");

    match result {
        Err(Error::Config { message }) => {
            assert_eq!(message, "failed to read config: file not found");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_network_context_keeps_source() {
    let err = not_found().network_context("connect failed").unwrap_err();

    assert!(matches!(err, Error::Transport { .. }));
    assert!(err.source().is_some());
}

#[test]
fn test_lazy_context_is_internal() {
    let err = not_found()
        .with_context(|| format!("step {}", 3))
        .unwrap_err();

    assert_eq!(err.to_string(), "Internal error: step 3: file not found");
}

#[test]
fn test_success_passes_through() {
    let ok: std::result::Result<u8, io::Error> = Ok(7);
    assert_eq!(ok.context("unused").unwrap(), 7);
}
