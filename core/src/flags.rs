//! Read access to the flags declared on a command.
//!
//! Validators never parse command lines. They inspect flags that a CLI
//! framework already parsed through the [`FlagSet`] trait: lookup by name,
//! whether the user set the flag on this invocation, and its current value.
//!
//! [`FlagTable`] is a framework-agnostic, in-memory implementation. The
//! `clap` feature adds [`ClapFlags`](crate::ClapFlags).

/// Snapshot of one declared flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    /// Flag name without leading dashes (e.g. `"image"`).
    pub name: String,
    /// Whether the user supplied the flag on this invocation, as opposed to
    /// the flag carrying a default.
    pub changed: bool,
    /// Current value, whether supplied or defaulted.
    pub value: Option<String>,
}

/// Flags declared on a single command.
pub trait FlagSet {
    /// Name of the command the flags belong to, used in wiring diagnostics.
    fn command_name(&self) -> &str;

    /// Looks up a declared flag by name. `None` means the command never
    /// declared it.
    fn flag(&self, name: &str) -> Option<Flag>;
}

/// Looks up `name`, panicking when the command does not declare it.
///
/// A validator naming an undeclared flag is a defect in how the command was
/// assembled, so there is no recoverable error for it.
pub(crate) fn require_flag(flags: &dyn FlagSet, name: &str) -> Flag {
    match flags.flag(name) {
        Some(flag) => flag,
        None => panic!(
            "expected to find flag named {name:?} in command {:?}",
            flags.command_name()
        ),
    }
}

/// In-memory [`FlagSet`].
///
/// # Examples
///
/// ```
/// use command_guard_core::{FlagSet, FlagTable};
///
/// let mut flags = FlagTable::new("create")
///     .declare("namespace", Some("default"))
///     .declare("image", None);
/// flags.set("image", "registry.local/hello");
///
/// let image = flags.flag("image").unwrap();
/// assert!(image.changed);
/// assert_eq!(image.value.as_deref(), Some("registry.local/hello"));
///
/// let namespace = flags.flag("namespace").unwrap();
/// assert!(!namespace.changed);
/// assert_eq!(namespace.value.as_deref(), Some("default"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlagTable {
    command: String,
    flags: Vec<Flag>,
}

impl FlagTable {
    /// Creates an empty table for `command`.
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            flags: Vec::new(),
        }
    }

    /// Declares a flag with an optional default value. Re-declaring a flag
    /// replaces its default and clears its set state.
    pub fn declare(mut self, name: &str, default: Option<&str>) -> Self {
        let flag = Flag {
            name: name.to_string(),
            changed: false,
            value: default.map(String::from),
        };
        match self.flags.iter_mut().find(|f| f.name == name) {
            Some(existing) => *existing = flag,
            None => self.flags.push(flag),
        }
        self
    }

    /// Records that the user supplied `name` with `value`.
    ///
    /// # Panics
    ///
    /// Panics if `name` was never declared.
    pub fn set(&mut self, name: &str, value: &str) {
        let command = &self.command;
        let Some(flag) = self.flags.iter_mut().find(|f| f.name == name) else {
            panic!("expected to find flag named {name:?} in command {command:?}");
        };
        flag.changed = true;
        flag.value = Some(value.to_string());
    }

    /// Builder form of [`set`](FlagTable::set).
    pub fn with_set(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    /// Names of all declared flags, in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.flags.iter().map(|f| f.name.as_str()).collect()
    }
}

impl FlagSet for FlagTable {
    fn command_name(&self) -> &str {
        &self.command
    }

    fn flag(&self, name: &str) -> Option<Flag> {
        self.flags.iter().find(|f| f.name == name).cloned()
    }
}
