//! One flag value written to several destinations.
//!
//! [`BroadcastString`] lets a single flag occurrence populate several
//! related option fields, e.g. the namespace of both a deploy step and a
//! build step. It holds a mutable borrow of every destination, so nothing
//! else can write to them while the broadcast value is alive and they cannot
//! drift apart.
//!
//! # Example
//!
//! ```
//! use command_guard_core::{BroadcastString, FlagValue};
//!
//! let mut deploy_namespace = String::new();
//! let mut build_namespace = String::new();
//! {
//!     let mut namespace = BroadcastString::new(
//!         "default",
//!         [&mut deploy_namespace, &mut build_namespace],
//!     );
//!     namespace.set("staging").unwrap();
//!     assert_eq!(namespace.value(), "staging");
//! }
//! assert_eq!(deploy_namespace, "staging");
//! assert_eq!(build_namespace, "staging");
//! ```

use std::fmt;

use tracing::debug;

use crate::error::Result;

/// A value a flag can be bound to.
pub trait FlagValue {
    /// Replaces the value from its textual form.
    fn set(&mut self, value: &str) -> Result<()>;

    /// Current textual form of the value.
    fn value(&self) -> &str;

    /// Kind of value, as reported to help and completion tooling.
    fn type_name(&self) -> &'static str;
}

/// A string value mirrored into every one of its destinations.
pub struct BroadcastString<'a> {
    destinations: Vec<&'a mut String>,
}

impl<'a> BroadcastString<'a> {
    /// Creates a broadcast value and writes `value` to every destination.
    ///
    /// # Panics
    ///
    /// Panics if `destinations` is empty.
    pub fn new(value: &str, destinations: impl IntoIterator<Item = &'a mut String>) -> Self {
        let destinations: Vec<&'a mut String> = destinations.into_iter().collect();
        assert!(
            !destinations.is_empty(),
            "at least one string destination must be provided"
        );
        let mut broadcast = Self { destinations };
        broadcast.write(value);
        broadcast
    }

    /// Number of destinations kept in sync.
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    /// Always `false`: construction requires a destination.
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    /// Current content of every destination, in order.
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.destinations.iter().map(|d| d.as_str())
    }

    fn write(&mut self, value: &str) {
        for destination in self.destinations.iter_mut() {
            destination.clear();
            destination.push_str(value);
        }
    }
}

impl FlagValue for BroadcastString<'_> {
    fn set(&mut self, value: &str) -> Result<()> {
        debug!(value, destinations = self.destinations.len(), "broadcasting flag value");
        self.write(value);
        Ok(())
    }

    /// Reads the first destination; the others hold the same value.
    fn value(&self) -> &str {
        self.destinations[0].as_str()
    }

    fn type_name(&self) -> &'static str {
        "string"
    }
}

impl fmt::Display for BroadcastString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl fmt::Debug for BroadcastString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BroadcastString")
            .field("value", &self.value())
            .field("destinations", &self.destinations.len())
            .finish()
    }
}
