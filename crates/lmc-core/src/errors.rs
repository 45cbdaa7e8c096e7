//! Structured error types shared across lightmc crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to the non-contract [`LmcError`] variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable code, e.g. `no-proposable-draws`.
    pub code: String,
    /// Diagnostic message.
    pub message: String,
    /// Draw names, counts, paths and similar details.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggested remedy, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with no context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records one context entry. Later entries replace earlier ones with the same key.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches a remedy hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// Canonical error type for the lightmc engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum LmcError {
    /// A draw scored zero under its (possibly just rebound) distribution.
    #[error("zero probability at `{name}` ({label}, conditioned: {conditioned})")]
    ZeroProbability {
        /// Name of the offending draw.
        name: String,
        /// Label of the choice the draw was bound to.
        label: String,
        /// True when the zero was raised while conditioning on a fixed value.
        conditioned: bool,
    },
    /// An operation was invoked outside of its contract.
    #[error("precondition error: {0}")]
    Precondition(ErrorInfo),
    /// A stored value did not have the kind a typed accessor expected.
    #[error("value error: {0}")]
    Value(ErrorInfo),
    /// Configuration parsing or validation errors.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Parallel execution backend errors.
    #[error("dispatch error: {0}")]
    Dispatch(ErrorInfo),
    /// The run observed a cancellation request.
    #[error("cancelled: {0}")]
    Cancelled(ErrorInfo),
}

impl LmcError {
    /// Builds a [`LmcError::ZeroProbability`] for the named draw.
    pub fn zero_probability(
        name: impl Into<String>,
        label: impl Into<String>,
        conditioned: bool,
    ) -> Self {
        LmcError::ZeroProbability {
            name: name.into(),
            label: label.into(),
            conditioned,
        }
    }

    /// Returns true for the zero-probability contract error.
    pub fn is_zero_probability(&self) -> bool {
        matches!(self, LmcError::ZeroProbability { .. })
    }

    /// Returns true when a fixed (observed) value scored zero.
    pub fn is_conditioning_zero(&self) -> bool {
        matches!(
            self,
            LmcError::ZeroProbability {
                conditioned: true,
                ..
            }
        )
    }

    /// Returns the structured payload, if the variant carries one.
    pub fn info(&self) -> Option<&ErrorInfo> {
        match self {
            LmcError::ZeroProbability { .. } => None,
            LmcError::Precondition(info)
            | LmcError::Value(info)
            | LmcError::Config(info)
            | LmcError::Dispatch(info)
            | LmcError::Cancelled(info) => Some(info),
        }
    }
}
