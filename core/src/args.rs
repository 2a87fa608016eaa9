//! Positional argument validators.
//!
//! An [`ArgsValidator`] sees the whole ordered list of positional arguments
//! of one invocation; an [`ArgValidator`] sees a single argument in
//! isolation. [`at_position`] bridges the two, and [`args_conjunction`]
//! composes many list validators into one.
//!
//! # Example
//!
//! ```
//! use command_guard_core::{args_conjunction, at_position, exact_args, valid_name};
//!
//! let validator = args_conjunction([exact_args(1), at_position(0, valid_name())]);
//!
//! assert!(validator.validate(&["hello-world".to_string()]).is_ok());
//! assert!(validator.validate(&["Hello_World".to_string()]).is_err());
//! assert!(validator.validate(&[]).is_err());
//! ```

use std::fmt;

use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::naming::{is_dns1123_label, is_dns1123_subdomain};

type ArgsFn = dyn Fn(&[String]) -> Result<()> + Send + Sync;
type ArgFn = dyn Fn(&str) -> Result<()> + Send + Sync;

/// Validates the ordered positional arguments of an invocation.
pub struct ArgsValidator(Box<ArgsFn>);

impl ArgsValidator {
    /// Wraps a closure as a validator.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[String]) -> Result<()> + Send + Sync + 'static,
    {
        Self(Box::new(f))
    }

    /// Runs the validator against `args`.
    pub fn validate(&self, args: &[String]) -> Result<()> {
        (self.0)(args)
    }
}

impl fmt::Debug for ArgsValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ArgsValidator")
    }
}

/// Validates one positional argument, without knowledge of its position or
/// siblings.
pub struct ArgValidator(Box<ArgFn>);

impl ArgValidator {
    /// Wraps a closure as a validator.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<()> + Send + Sync + 'static,
    {
        Self(Box::new(f))
    }

    /// Runs the validator against `arg`.
    pub fn validate(&self, arg: &str) -> Result<()> {
        (self.0)(arg)
    }
}

impl fmt::Debug for ArgValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ArgValidator")
    }
}

/// Returns a validator that runs `validators` in order and fails with the
/// first error, without running the rest. An empty conjunction always passes.
pub fn args_conjunction(validators: impl IntoIterator<Item = ArgsValidator>) -> ArgsValidator {
    let validators: Vec<ArgsValidator> = validators.into_iter().collect();
    ArgsValidator::new(move |args| {
        for (index, validator) in validators.iter().enumerate() {
            if let Err(err) = validator.validate(args) {
                debug!(index, error = %err, "positional validation failed");
                return Err(err);
            }
        }
        Ok(())
    })
}

/// Applies `validator` to the argument at `position` only.
///
/// The number of arguments is not checked beyond `position` existing; pair
/// with [`exact_args`] or [`minimum_args`] for that. When the list is too
/// short this reports [`ValidationError::MissingArgument`].
pub fn at_position(position: usize, validator: ArgValidator) -> ArgsValidator {
    ArgsValidator::new(move |args| match args.get(position) {
        Some(arg) => validator.validate(arg),
        None => Err(ValidationError::MissingArgument { position }),
    })
}

/// Adapts a rule check returning human-readable violations into an
/// [`ArgValidator`]. No violations means success; otherwise the violations
/// are reported together, comma-joined.
pub fn from_rule_check<F>(check: F) -> ArgValidator
where
    F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
{
    ArgValidator::new(move |arg| {
        let violations = check(arg);
        if violations.is_empty() {
            Ok(())
        } else {
            debug!(arg, count = violations.len(), "argument broke naming rules");
            Err(ValidationError::InvalidArgument(violations))
        }
    })
}

/// Accepts lowercase RFC 1123 subdomain names such as `my-service.example`.
pub fn valid_name() -> ArgValidator {
    from_rule_check(is_dns1123_subdomain)
}

/// Accepts lowercase RFC 1123 labels such as `my-service`.
pub fn valid_label() -> ArgValidator {
    from_rule_check(is_dns1123_label)
}

/// Requires exactly `n` positional arguments.
pub fn exact_args(n: usize) -> ArgsValidator {
    count_in_range(n, Some(n), n.to_string())
}

/// Requires at least `n` positional arguments.
pub fn minimum_args(n: usize) -> ArgsValidator {
    count_in_range(n, None, format!("at least {n}"))
}

/// Allows at most `n` positional arguments.
pub fn maximum_args(n: usize) -> ArgsValidator {
    count_in_range(0, Some(n), format!("at most {n}"))
}

/// Requires between `min` and `max` positional arguments, inclusive.
pub fn range_args(min: usize, max: usize) -> ArgsValidator {
    count_in_range(min, Some(max), format!("between {min} and {max}"))
}

fn count_in_range(min: usize, max: Option<usize>, expected: String) -> ArgsValidator {
    ArgsValidator::new(move |args| {
        let actual = args.len();
        if actual < min || max.is_some_and(|max| actual > max) {
            return Err(ValidationError::ArgumentCount {
                expected: expected.clone(),
                actual,
            });
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn failing(message: &'static str) -> ArgsValidator {
        ArgsValidator::new(move |_| Err(ValidationError::invalid(message)))
    }

    fn spy(calls: Arc<AtomicUsize>) -> ArgsValidator {
        ArgsValidator::new(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    #[test]
    fn test_empty_conjunction_passes() {
        let validator = args_conjunction(Vec::<ArgsValidator>::new());
        assert!(validator.validate(&args(&["anything"])).is_ok());
        assert!(validator.validate(&[]).is_ok());
    }

    #[test]
    fn test_conjunction_returns_first_error_and_stops() {
        let before = Arc::new(AtomicUsize::new(0));
        let after = Arc::new(AtomicUsize::new(0));
        let validator = args_conjunction([
            spy(before.clone()),
            failing("second"),
            failing("third"),
            spy(after.clone()),
        ]);

        let err = validator.validate(&args(&["x"])).unwrap_err();
        assert_eq!(err, ValidationError::invalid("second"));
        assert_eq!(before.load(Ordering::SeqCst), 1);
        assert_eq!(after.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_conjunction_runs_all_when_passing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let validator = args_conjunction([spy(calls.clone()), spy(calls.clone())]);
        assert!(validator.validate(&args(&["x"])).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_at_position_only_sees_its_argument() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let recorder = {
            let seen = seen.clone();
            ArgValidator::new(move |arg| {
                seen.lock().unwrap().push(arg.to_string());
                if arg == "bad" {
                    Err(ValidationError::invalid("bad argument"))
                } else {
                    Ok(())
                }
            })
        };
        let validator = at_position(1, recorder);

        assert!(validator.validate(&args(&["bad", "good", "bad"])).is_ok());
        assert!(validator.validate(&args(&["good", "good"])).is_ok());
        assert!(validator.validate(&args(&["good", "bad"])).is_err());
        assert_eq!(*seen.lock().unwrap(), args(&["good", "good", "bad"]));
    }

    #[test]
    fn test_at_position_out_of_range() {
        let validator = at_position(2, valid_name());
        let err = validator.validate(&args(&["a", "b"])).unwrap_err();
        assert_eq!(err, ValidationError::MissingArgument { position: 2 });
    }

    #[test]
    fn test_valid_name() {
        let validator = valid_name();
        assert!(validator.validate("my-service").is_ok());
        assert!(validator.validate("my-service.example").is_ok());

        let err = validator.validate("My_Service").unwrap_err();
        assert!(!err.to_string().is_empty());

        let err = validator.validate(&"a".repeat(254)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "must be no more than 253 characters, each label must be no more than 63 characters"
        );
    }

    #[test]
    fn test_valid_label_rejects_subdomain() {
        assert!(valid_label().validate("my-service").is_ok());
        assert!(valid_label().validate("my-service.example").is_err());
    }

    #[test]
    fn test_from_rule_check_joins_messages() {
        let validator = from_rule_check(|arg| {
            let mut violations = Vec::new();
            if arg.len() < 3 {
                violations.push("too short".to_string());
            }
            if arg.contains(' ') {
                violations.push("contains a space".to_string());
            }
            violations
        });
        assert!(validator.validate("hello").is_ok());
        assert_eq!(
            validator.validate("a ").unwrap_err().to_string(),
            "too short, contains a space"
        );
    }

    #[test]
    fn test_count_validators() {
        assert!(exact_args(2).validate(&args(&["a", "b"])).is_ok());
        assert_eq!(
            exact_args(2).validate(&args(&["a"])).unwrap_err().to_string(),
            "accepts 2 arg(s), received 1"
        );
        assert!(minimum_args(1).validate(&args(&["a", "b"])).is_ok());
        assert!(minimum_args(1).validate(&[]).is_err());
        assert!(maximum_args(1).validate(&[]).is_ok());
        assert_eq!(
            maximum_args(1).validate(&args(&["a", "b"])).unwrap_err().to_string(),
            "accepts at most 1 arg(s), received 2"
        );
        assert!(range_args(1, 2).validate(&args(&["a", "b"])).is_ok());
        assert!(range_args(1, 2).validate(&args(&["a", "b", "c"])).is_err());
    }
}
