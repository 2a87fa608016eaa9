//! User-input validation errors.
//!
//! Every validator in this crate reports a bad invocation through
//! [`ValidationError`]. Mistakes in how validators were wired against a
//! command (an undeclared flag name, a broadcast value without destinations)
//! are never reported here: those panic, so they cannot be mistaken for a
//! rejected invocation.

use thiserror::Error;

/// Reasons a command invocation was rejected.
///
/// The `Display` impl renders the message a CLI prints before exiting with a
/// non-zero status.
///
/// # Examples
///
/// ```
/// use command_guard_core::ValidationError;
///
/// let err = ValidationError::AtLeastOneOf(vec!["image".into(), "git-repo".into()]);
/// assert_eq!(err.to_string(), "at least one of --image, --git-repo must be set");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A positional argument broke one or more naming rules.
    #[error("{}", .0.join(", "))]
    InvalidArgument(Vec<String>),
    /// No argument exists at the position a validator inspects.
    #[error("missing argument at position {position}")]
    MissingArgument { position: usize },
    /// The number of positional arguments is outside the accepted range.
    #[error("accepts {expected} arg(s), received {actual}")]
    ArgumentCount { expected: String, actual: usize },
    /// None of the listed flags was set.
    #[error("at least one of {} must be set", flag_list(.0))]
    AtLeastOneOf(Vec<String>),
    /// More than one of the listed flags was set.
    #[error("at most one of {} must be set", flag_list(.0))]
    AtMostOneOf(Vec<String>),
    /// Free-form failure from a caller-defined validator.
    #[error("{0}")]
    Invalid(String),
}

impl ValidationError {
    /// Creates a free-form validation failure.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Convenience alias for results with [`ValidationError`].
pub type Result<T> = std::result::Result<T, ValidationError>;

fn flag_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("--{name}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_joins_violations() {
        let err = ValidationError::InvalidArgument(vec![
            "must be no more than 253 characters".to_string(),
            "must start with a letter".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "must be no more than 253 characters, must start with a letter"
        );
    }

    #[test]
    fn test_at_most_one_of_message() {
        let err = ValidationError::AtMostOneOf(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "at most one of --a, --b must be set");
    }

    #[test]
    fn test_argument_count_message() {
        let err = ValidationError::ArgumentCount {
            expected: "1".to_string(),
            actual: 2,
        };
        assert_eq!(err.to_string(), "accepts 1 arg(s), received 2");
    }
}
