//! Domain value objects: Mode, Owner, ConfigFormat.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity.
//! Each one is parsed once, at the edge, from the string the user wrote in
//! the tree description. After that the rest of the crate only handles
//! validated values.

use crate::domain::error::DomainError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// ── Mode ──────────────────────────────────────────────────────────────────────

/// Unix permission bits for a directory, e.g. `0o755`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mode(u32);

impl Mode {
    /// Highest representable mode (setuid, setgid, sticky, rwxrwxrwx).
    pub const MAX: u32 = 0o7777;

    pub fn new(bits: u32) -> Result<Self, DomainError> {
        if bits > Self::MAX {
            return Err(DomainError::InvalidPermissions {
                value: format!("{bits:o}"),
                reason: "mode exceeds 7777".into(),
            });
        }
        Ok(Self(bits))
    }

    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03o}", self.0)
    }
}

impl FromStr for Mode {
    type Err = DomainError;

    /// Accepts 3 or 4 octal digits, optionally prefixed with `0o`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DomainError::InvalidPermissions {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0o")
            .or_else(|| trimmed.strip_prefix("0O"))
            .unwrap_or(trimmed);

        if !(3..=4).contains(&digits.len()) {
            return Err(invalid("expected 3 or 4 octal digits"));
        }
        if !digits.chars().all(|c| ('0'..='7').contains(&c)) {
            return Err(invalid("only digits 0-7 are allowed"));
        }

        let bits = u32::from_str_radix(digits, 8).map_err(|e| invalid(&e.to_string()))?;
        Self::new(bits)
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── Owner ─────────────────────────────────────────────────────────────────────

/// A `chown` target: `user`, `user:group`, or `:group`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Owner {
    user: Option<String>,
    group: Option<String>,
}

impl Owner {
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Numeric `(uid, gid)` when every side present is a plain number.
    ///
    /// Returns `None` as soon as one side is a name, since resolving names
    /// needs the system user database.
    pub fn numeric_ids(&self) -> Option<(Option<u32>, Option<u32>)> {
        let parse = |side: Option<&str>| match side {
            None => Some(None),
            Some(s) => s.parse::<u32>().ok().map(Some),
        };
        Some((parse(self.user())?, parse(self.group())?))
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(user) = &self.user {
            f.write_str(user)?;
        }
        if let Some(group) = &self.group {
            write!(f, ":{group}")?;
        }
        Ok(())
    }
}

impl FromStr for Owner {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DomainError::InvalidOwner {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        if trimmed.chars().any(char::is_whitespace) {
            return Err(invalid("whitespace is not allowed"));
        }

        let (user, group) = match trimmed.split_once(':') {
            Some((user, group)) => (user, Some(group)),
            None => (trimmed, None),
        };

        if group.is_some_and(|g| g.contains(':')) {
            return Err(invalid("expected at most one ':'"));
        }

        if group == Some("") {
            return Err(invalid("group is missing after ':'"));
        }

        let user = (!user.is_empty()).then(|| user.to_string());
        let group = group.map(str::to_string);

        if user.is_none() && group.is_none() {
            return Err(invalid("user or group is required"));
        }

        Ok(Self { user, group })
    }
}

impl Serialize for Owner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── ConfigFormat ──────────────────────────────────────────────────────────────

/// The syntax a tree description is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    /// One name per line, nesting by indentation.
    Indent,
    /// YAML mapping with per-node metadata.
    Yaml,
}

impl ConfigFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Indent => "indent",
            Self::Yaml => "yaml",
        }
    }

    /// Pick a format from the file extension; anything that isn't YAML is
    /// treated as indentation-based text.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Indent,
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "indent" | "text" | "txt" => Ok(Self::Indent),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(DomainError::Syntax(format!("unknown format: {other}"))),
        }
    }
}
