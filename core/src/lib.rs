//! Composable validators for command-line invocations.
//!
//! A CLI framework parses the command line; this crate decides whether the
//! parsed invocation is acceptable before the command body runs:
//!
//! - [`ArgsValidator`] / [`ArgValidator`] check positional arguments, composed
//!   with [`args_conjunction`] and [`at_position`]. [`valid_name`] enforces
//!   RFC 1123 resource names.
//! - [`FlagsValidator`] checks flag combinations: [`flags_dependency`],
//!   [`at_least_one_of`], [`at_most_one_of`], composed with
//!   [`flags_conjunction`] and installed via [`as_pre_run`].
//! - [`BroadcastString`] copies a single flag value into several
//!   destinations.
//!
//! Rejected invocations are reported as [`ValidationError`]. Validators
//! that name a flag the command never declared panic instead, since that is
//! a bug in the CLI definition rather than bad input.
//!
//! # Example
//!
//! ```
//! use command_guard_core::*;
//!
//! let guard = CommandGuard::new()
//!     .with_args(args_conjunction([exact_args(1), at_position(0, valid_name())]))
//!     .with_pre_run(as_pre_run(flags_conjunction([
//!         at_least_one_of(&["image", "git-repo"]),
//!         at_most_one_of(&["image", "git-repo"]),
//!     ])));
//!
//! let flags = FlagTable::new("create")
//!     .declare("image", None)
//!     .declare("git-repo", None)
//!     .with_set("image", "registry.local/hello");
//!
//! assert!(guard.check(&flags, &["hello".to_string()]).is_ok());
//!
//! let both = flags.with_set("git-repo", "https://example.com/hello.git");
//! assert_eq!(
//!     guard.check(&both, &["hello".to_string()]).unwrap_err().to_string(),
//!     "at most one of --image, --git-repo must be set",
//! );
//! ```

mod args;
mod broadcast;
#[cfg(feature = "clap")]
mod clap_support;
mod error;
mod flag_rules;
mod flags;
mod guard;
pub mod naming;

pub use args::{
    ArgValidator, ArgsValidator, args_conjunction, at_position, exact_args, from_rule_check,
    maximum_args, minimum_args, range_args, valid_label, valid_name,
};
pub use broadcast::{BroadcastString, FlagValue};
#[cfg(feature = "clap")]
pub use clap_support::{ClapFlags, invoked_subcommand, positional_args};
pub use error::{Result, ValidationError};
pub use flag_rules::{
    FlagsValidator, PreRunHook, as_pre_run, at_least_one_of, at_most_one_of, flags_conjunction,
    flags_dependency,
};
pub use flags::{Flag, FlagSet, FlagTable};
pub use guard::CommandGuard;
