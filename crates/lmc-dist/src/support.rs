use lmc_core::errors::ErrorInfo;
use lmc_core::{LmcError, Value};

pub(crate) fn invalid_parameter(family: &str, message: impl Into<String>) -> LmcError {
    LmcError::Precondition(
        ErrorInfo::new("invalid-parameter", message).with_context("family", family),
    )
}

pub(crate) fn kind_mismatch(name: &str, expected: &str, found: &Value) -> LmcError {
    LmcError::Value(
        ErrorInfo::new("kind-mismatch", format!("expected a {expected} value"))
            .with_context("name", name)
            .with_context("found", found.kind()),
    )
}

pub(crate) fn check_probability(family: &str, p: f64) -> Result<(), LmcError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(invalid_parameter(family, format!("probability {p} is outside [0, 1]")))
    }
}
