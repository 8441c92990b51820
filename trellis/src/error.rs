//! Error types for menu configuration and assembly.

use std::fmt;

use thiserror::Error;

use crate::document::ElementId;

/// A single configuration problem found during validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{option}: {message}")]
pub struct ConfigIssue {
    /// Name of the offending option (as spelled in the configuration object).
    pub option: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl ConfigIssue {
    /// Creates a new issue for the given option.
    pub fn new(option: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            option: option.into(),
            message: message.into(),
        }
    }
}

/// Every problem found by one validation pass, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigErrors(Vec<ConfigIssue>);

impl ConfigErrors {
    /// Creates an empty error list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a problem with an option.
    pub fn push(&mut self, option: impl Into<String>, message: impl Into<String>) {
        self.0.push(ConfigIssue::new(option, message));
    }

    /// Returns true if no problems were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded problems.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the recorded problems.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigIssue> {
        self.0.iter()
    }

    /// Converts the accumulated list into a result.
    pub fn into_result<T>(self, value: T) -> Result<T, MenuError> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(MenuError::InvalidConfig(self))
        }
    }
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, issue) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {}", issue)?;
        }
        Ok(())
    }
}

/// Errors that can occur while constructing a menu.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// The configuration failed pre-flight validation.
    #[error("invalid menu configuration:\n{0}")]
    InvalidConfig(ConfigErrors),

    /// An element option points at the wrong kind of element.
    #[error("`{option}` must be one of {expected}, found <{found}>")]
    InvalidElement {
        /// The option holding the element.
        option: &'static str,
        /// Accepted tag names.
        expected: &'static str,
        /// Tag name that was found.
        found: String,
    },

    /// An element option refers to an element the document doesn't contain.
    #[error("`{0}` refers to an element that does not exist")]
    MissingElement(&'static str),

    /// A menu item has no link element.
    #[error("menu item {item} has no child matching `{selector}`")]
    MissingLink {
        /// The item element.
        item: ElementId,
        /// The link selector in use.
        selector: String,
    },

    /// A submenu item has no toggle element.
    #[error("submenu item {item} has no toggle matching `{selector}`")]
    MissingToggle {
        /// The submenu item element.
        item: ElementId,
        /// The toggle selector in use.
        selector: String,
    },

    /// A submenu item has no submenu element.
    #[error("submenu item {item} has no submenu matching `{selector}`")]
    MissingSubmenu {
        /// The submenu item element.
        item: ElementId,
        /// The submenu selector in use.
        selector: String,
    },
}
