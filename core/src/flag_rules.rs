//! Flag set validators.
//!
//! A [`FlagsValidator`] inspects the flags declared on a command and rejects
//! invalid combinations: a flag that requires another, flags that are
//! mutually exclusive, or a group of which at least one must be given.
//!
//! Every validator that names a flag panics when the command does not
//! declare it. That is a wiring mistake in the CLI definition, never a
//! user error.
//!
//! # Example
//!
//! ```
//! use command_guard_core::{
//!     FlagTable, at_least_one_of, at_most_one_of, flags_conjunction, flags_dependency,
//! };
//!
//! let validator = flags_conjunction([
//!     at_least_one_of(&["image", "git-repo"]),
//!     at_most_one_of(&["image", "git-repo"]),
//!     flags_dependency("git-revision", at_least_one_of(&["git-repo"])),
//! ]);
//!
//! let flags = FlagTable::new("create")
//!     .declare("image", None)
//!     .declare("git-repo", None)
//!     .declare("git-revision", Some("main"));
//!
//! let ok = flags.clone().with_set("image", "registry.local/hello");
//! assert!(validator.validate(&ok).is_ok());
//!
//! let missing_repo = flags.clone()
//!     .with_set("image", "registry.local/hello")
//!     .with_set("git-revision", "v1");
//! assert_eq!(
//!     validator.validate(&missing_repo).unwrap_err().to_string(),
//!     "at least one of --git-repo must be set",
//! );
//! ```

use std::fmt;

use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::flags::{FlagSet, require_flag};

type FlagsFn = dyn Fn(&dyn FlagSet) -> Result<()> + Send + Sync;
type PreRunFn = dyn Fn(&dyn FlagSet, &[String]) -> Result<()> + Send + Sync;

/// Validates the flags of an invocation.
pub struct FlagsValidator(Box<FlagsFn>);

impl FlagsValidator {
    /// Wraps a closure as a validator.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&dyn FlagSet) -> Result<()> + Send + Sync + 'static,
    {
        Self(Box::new(f))
    }

    /// Runs the validator against `flags`.
    pub fn validate(&self, flags: &dyn FlagSet) -> Result<()> {
        (self.0)(flags)
    }
}

impl fmt::Debug for FlagsValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FlagsValidator")
    }
}

/// A pre-execution hook receiving the command's flags and its positional
/// arguments, run before the command body.
pub struct PreRunHook(Box<PreRunFn>);

impl PreRunHook {
    /// Wraps a closure as a hook.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&dyn FlagSet, &[String]) -> Result<()> + Send + Sync + 'static,
    {
        Self(Box::new(f))
    }

    /// Runs the hook.
    pub fn run(&self, flags: &dyn FlagSet, args: &[String]) -> Result<()> {
        (self.0)(flags, args)
    }
}

impl fmt::Debug for PreRunHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PreRunHook")
    }
}

/// Installs a flags validator as a pre-run hook. Positional arguments are
/// ignored.
pub fn as_pre_run(validator: FlagsValidator) -> PreRunHook {
    PreRunHook::new(move |flags, _args| validator.validate(flags))
}

/// Returns a validator that runs `validators` in order and fails with the
/// first error, without running the rest. An empty conjunction always passes.
pub fn flags_conjunction(validators: impl IntoIterator<Item = FlagsValidator>) -> FlagsValidator {
    let validators: Vec<FlagsValidator> = validators.into_iter().collect();
    FlagsValidator::new(move |flags| {
        for (index, validator) in validators.iter().enumerate() {
            if let Err(err) = validator.validate(flags) {
                debug!(
                    command = flags.command_name(),
                    index,
                    error = %err,
                    "flag validation failed"
                );
                return Err(err);
            }
        }
        Ok(())
    })
}

/// Runs `delegate` only when `flag` was set on the command line.
///
/// Use to express "if `--foo` is set, then `--bar` must be set as well":
/// `flags_dependency("foo", at_least_one_of(&["bar"]))`.
///
/// # Panics
///
/// The returned validator panics if the command does not declare `flag`.
pub fn flags_dependency(flag: &str, delegate: FlagsValidator) -> FlagsValidator {
    let flag = flag.to_string();
    FlagsValidator::new(move |flags| {
        if require_flag(flags, &flag).changed {
            delegate.validate(flags)
        } else {
            debug!(flag = %flag, "flag not set; skipping dependent validation");
            Ok(())
        }
    })
}

/// Requires at least one of `names` to be set.
///
/// Flags are checked in order and the first one found set ends the check, so
/// flags after it are not looked up.
///
/// # Panics
///
/// Panics if `names` is empty. The returned validator panics if the command
/// does not declare a flag it looks up.
pub fn at_least_one_of(names: &[&str]) -> FlagsValidator {
    assert!(
        !names.is_empty(),
        "at_least_one_of requires at least one flag name"
    );
    let names = owned(names);
    FlagsValidator::new(move |flags| {
        for name in &names {
            if require_flag(flags, name).changed {
                return Ok(());
            }
        }
        Err(ValidationError::AtLeastOneOf(names.clone()))
    })
}

/// Allows at most one of `names` to be set.
///
/// # Panics
///
/// The returned validator panics if the command does not declare one of
/// `names`.
pub fn at_most_one_of(names: &[&str]) -> FlagsValidator {
    let names = owned(names);
    FlagsValidator::new(move |flags| {
        let set = names
            .iter()
            .filter(|name| require_flag(flags, name).changed)
            .count();
        if set > 1 {
            Err(ValidationError::AtMostOneOf(names.clone()))
        } else {
            Ok(())
        }
    })
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::flags::FlagTable;

    fn table() -> FlagTable {
        FlagTable::new("test")
            .declare("a", None)
            .declare("b", Some("default-b"))
            .declare("c", None)
            .declare("foo", None)
    }

    fn always(result: Result<()>) -> FlagsValidator {
        FlagsValidator::new(move |_| result.clone())
    }

    fn spy(calls: Arc<AtomicUsize>) -> FlagsValidator {
        FlagsValidator::new(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    #[test]
    fn test_empty_conjunction_passes() {
        assert!(flags_conjunction(Vec::<FlagsValidator>::new()).validate(&table()).is_ok());
    }

    #[test]
    fn test_conjunction_short_circuits() {
        let after = Arc::new(AtomicUsize::new(0));
        let validator = flags_conjunction([
            always(Ok(())),
            always(Err(ValidationError::invalid("boom"))),
            spy(after.clone()),
        ]);
        assert_eq!(
            validator.validate(&table()),
            Err(ValidationError::invalid("boom"))
        );
        assert_eq!(after.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_dependency_skips_delegate_when_unset() {
        let calls = Arc::new(AtomicUsize::new(0));
        let validator = flags_dependency("foo", spy(calls.clone()));
        assert!(validator.validate(&table()).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let failing = flags_dependency("foo", always(Err(ValidationError::invalid("no"))));
        assert!(failing.validate(&table()).is_ok());
    }

    #[test]
    fn test_dependency_returns_delegate_verdict_when_set() {
        let flags = table().with_set("foo", "1");

        let passing = flags_dependency("foo", always(Ok(())));
        assert!(passing.validate(&flags).is_ok());

        let failing = flags_dependency("foo", always(Err(ValidationError::invalid("no"))));
        assert_eq!(
            failing.validate(&flags),
            Err(ValidationError::invalid("no"))
        );
    }

    #[test]
    #[should_panic(expected = "expected to find flag named \"missing\" in command \"test\"")]
    fn test_dependency_on_undeclared_flag_panics() {
        let _ = flags_dependency("missing", always(Ok(()))).validate(&table());
    }

    #[test]
    fn test_at_least_one_of() {
        let validator = at_least_one_of(&["a", "b", "c"]);

        let err = validator.validate(&table()).unwrap_err();
        let message = err.to_string();
        assert_eq!(message, "at least one of --a, --b, --c must be set");
        for name in ["--a", "--b", "--c"] {
            assert!(message.contains(name));
        }

        assert!(validator.validate(&table().with_set("b", "x")).is_ok());
        let all = table()
            .with_set("a", "x")
            .with_set("b", "y")
            .with_set("c", "z");
        assert!(validator.validate(&all).is_ok());
    }

    #[test]
    fn test_at_least_one_of_ignores_defaults() {
        // "b" carries a default value but was not set by the user.
        let validator = at_least_one_of(&["b"]);
        assert!(validator.validate(&table()).is_err());
    }

    #[test]
    #[should_panic(expected = "expected to find flag named \"nope\"")]
    fn test_at_least_one_of_undeclared_panics() {
        let _ = at_least_one_of(&["a", "nope"]).validate(&table());
    }

    #[test]
    fn test_at_least_one_of_stops_at_first_set_flag() {
        // "nope" is undeclared but never looked up once "a" is found set.
        let flags = table().with_set("a", "x");
        assert!(at_least_one_of(&["a", "nope"]).validate(&flags).is_ok());
    }

    #[test]
    #[should_panic(expected = "at_least_one_of requires at least one flag name")]
    fn test_at_least_one_of_empty_panics() {
        at_least_one_of(&[]);
    }

    #[test]
    fn test_at_most_one_of() {
        let validator = at_most_one_of(&["a", "b"]);
        assert!(validator.validate(&table()).is_ok());
        assert!(validator.validate(&table().with_set("a", "x")).is_ok());

        let both = table().with_set("a", "x").with_set("b", "y");
        let err = validator.validate(&both).unwrap_err();
        assert_eq!(err, ValidationError::AtMostOneOf(vec!["a".into(), "b".into()]));
        assert_eq!(err.to_string(), "at most one of --a, --b must be set");
    }

    #[test]
    #[should_panic(expected = "expected to find flag named \"nope\"")]
    fn test_at_most_one_of_checks_every_flag() {
        let flags = table().with_set("a", "x");
        let _ = at_most_one_of(&["a", "nope"]).validate(&flags);
    }

    #[test]
    fn test_as_pre_run_ignores_args() {
        let hook = as_pre_run(at_least_one_of(&["a"]));
        let args = vec!["ignored".to_string()];
        assert!(hook.run(&table().with_set("a", "x"), &args).is_ok());
        assert!(hook.run(&table(), &args).is_err());
        assert!(hook.run(&table(), &[]).is_err());
    }
}
