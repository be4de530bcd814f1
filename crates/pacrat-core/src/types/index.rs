//! Package index identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PacratError;

/// Identifies one upstream package index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Index {
    Pypi,
    Npm,
    Crates,
    Docker,
}

impl Index {
    /// Canonical lowercase name used in cache keys and error messages
    pub fn as_str(self) -> &'static str {
        match self {
            Index::Pypi => "pypi",
            Index::Npm => "npm",
            Index::Crates => "crates",
            Index::Docker => "docker",
        }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Index {
    type Err = PacratError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pypi" => Ok(Index::Pypi),
            "npm" => Ok(Index::Npm),
            "crates" | "crates.io" => Ok(Index::Crates),
            "docker" | "dockerhub" => Ok(Index::Docker),
            other => Err(PacratError::validation(format!(
                "unknown package index '{other}' (expected pypi, npm, crates, or docker)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_and_alias_names() {
        assert_eq!("pypi".parse::<Index>().unwrap(), Index::Pypi);
        assert_eq!("NPM".parse::<Index>().unwrap(), Index::Npm);
        assert_eq!("crates.io".parse::<Index>().unwrap(), Index::Crates);
        assert_eq!("dockerhub".parse::<Index>().unwrap(), Index::Docker);
    }

    #[test]
    fn unknown_name_is_a_validation_error() {
        let error = "maven".parse::<Index>().unwrap_err();
        assert!(error.is_user_error());
        assert!(error.to_string().contains("maven"));
    }

    #[test]
    fn display_matches_canonical_name() {
        assert_eq!(Index::Crates.to_string(), "crates");
        assert_eq!(Index::Docker.to_string(), "docker");
    }
}
