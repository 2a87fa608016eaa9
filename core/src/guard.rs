//! Validation attached to a command definition.

use tracing::debug;

use crate::args::ArgsValidator;
use crate::error::Result;
use crate::flag_rules::PreRunHook;
use crate::flags::FlagSet;

/// The validators a command runs before its body: positional arguments
/// first, then the pre-run hook. Either may be absent.
///
/// # Examples
///
/// ```
/// use command_guard_core::{
///     CommandGuard, FlagTable, as_pre_run, at_position, exact_args, args_conjunction,
///     at_least_one_of, valid_name,
/// };
///
/// let guard = CommandGuard::new()
///     .with_args(args_conjunction([exact_args(1), at_position(0, valid_name())]))
///     .with_pre_run(as_pre_run(at_least_one_of(&["image"])));
///
/// let flags = FlagTable::new("create").declare("image", None);
/// let args = vec!["hello".to_string()];
///
/// assert!(guard.check(&flags.clone().with_set("image", "nginx"), &args).is_ok());
/// assert!(guard.check(&flags, &args).is_err());
/// ```
#[derive(Debug, Default)]
pub struct CommandGuard {
    args: Option<ArgsValidator>,
    pre_run: Option<PreRunHook>,
}

impl CommandGuard {
    /// Creates a guard that accepts every invocation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the positional argument validator.
    pub fn with_args(mut self, validator: ArgsValidator) -> Self {
        self.args = Some(validator);
        self
    }

    /// Sets the pre-run hook.
    pub fn with_pre_run(mut self, hook: PreRunHook) -> Self {
        self.pre_run = Some(hook);
        self
    }

    /// Validates one invocation.
    pub fn check(&self, flags: &dyn FlagSet, args: &[String]) -> Result<()> {
        debug!(command = flags.command_name(), args = ?args, "validating invocation");
        if let Some(validator) = &self.args {
            validator.validate(args)?;
        }
        if let Some(hook) = &self.pre_run {
            hook.run(flags, args)?;
        }
        Ok(())
    }
}
