//! Running validators against a parsed `clap` command.
//!
//! [`ClapFlags`] exposes the named options of a [`Command`] through
//! [`FlagSet`]. A flag counts as set only when its value came from the
//! command line; defaults and environment variables do not count.

use clap::parser::ValueSource;
use clap::{ArgMatches, Command};

use crate::error::Result;
use crate::flags::{Flag, FlagSet};
use crate::guard::CommandGuard;

/// [`FlagSet`] view over a command and the matches it produced.
///
/// Flags are looked up by long name first, then by argument id. Positional
/// arguments are never treated as flags.
#[derive(Debug, Clone, Copy)]
pub struct ClapFlags<'a> {
    command: &'a Command,
    matches: &'a ArgMatches,
}

impl<'a> ClapFlags<'a> {
    /// Pairs `command` with the `matches` parsed from it.
    pub fn new(command: &'a Command, matches: &'a ArgMatches) -> Self {
        Self { command, matches }
    }
}

impl FlagSet for ClapFlags<'_> {
    fn command_name(&self) -> &str {
        self.command.get_name()
    }

    fn flag(&self, name: &str) -> Option<Flag> {
        let arg = self
            .command
            .get_arguments()
            .filter(|arg| !arg.is_positional())
            .find(|arg| arg.get_long() == Some(name))
            .or_else(|| {
                self.command
                    .get_arguments()
                    .filter(|arg| !arg.is_positional())
                    .find(|arg| arg.get_id().as_str() == name)
            })?;
        let id = arg.get_id().as_str();
        let changed = self.matches.value_source(id) == Some(ValueSource::CommandLine);
        let value = raw_values(self.matches, id).into_iter().next();
        Some(Flag {
            name: name.to_string(),
            changed,
            value,
        })
    }
}

/// Positional argument values in declaration order.
pub fn positional_args(command: &Command, matches: &ArgMatches) -> Vec<String> {
    command
        .get_positionals()
        .flat_map(|arg| raw_values(matches, arg.get_id().as_str()))
        .collect()
}

/// Descends from `command` into the subcommand the user invoked, returning
/// the innermost command and its matches.
///
/// Returns `None` if `matches` names a subcommand that `command` does not
/// declare, which means the two were not produced together.
pub fn invoked_subcommand<'a>(
    command: &'a Command,
    matches: &'a ArgMatches,
) -> Option<(&'a Command, &'a ArgMatches)> {
    let mut current = (command, matches);
    while let Some((name, sub_matches)) = current.1.subcommand() {
        let sub_command = current.0.find_subcommand(name)?;
        current = (sub_command, sub_matches);
    }
    Some(current)
}

impl CommandGuard {
    /// Validates a parsed `clap` invocation of `command`.
    pub fn check_matches(&self, command: &Command, matches: &ArgMatches) -> Result<()> {
        let args = positional_args(command, matches);
        self.check(&ClapFlags::new(command, matches), &args)
    }
}

fn raw_values(matches: &ArgMatches, id: &str) -> Vec<String> {
    match matches.try_get_raw(id) {
        Ok(Some(values)) => values
            .map(|value| value.to_string_lossy().into_owned())
            .collect(),
        _ => Vec::new(),
    }
}
