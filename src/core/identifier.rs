//! Namespaced identifiers for blocks and entity kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;

/// Namespace assumed when an identifier is written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A `namespace:path` identifier, e.g. `minecraft:grass_block`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier {
    namespace: String,
    path: String,
}

impl Identifier {
    /// Build an identifier from its parts, validating both.
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Result<Self, Error> {
        let namespace = namespace.into();
        let path = path.into();
        let input = || format!("{}:{}", namespace, path);

        if namespace.is_empty() {
            return Err(Error::InvalidIdentifier { input: input(), reason: "empty namespace" });
        }
        if path.is_empty() {
            return Err(Error::InvalidIdentifier { input: input(), reason: "empty path" });
        }
        if !namespace.chars().all(is_namespace_char) {
            return Err(Error::InvalidIdentifier {
                input: input(),
                reason: "namespace may only contain [a-z0-9_.-]",
            });
        }
        if !path.chars().all(|c| is_namespace_char(c) || c == '/') {
            return Err(Error::InvalidIdentifier {
                input: input(),
                reason: "path may only contain [a-z0-9_.-/]",
            });
        }

        Ok(Self { namespace, path })
    }

    /// Identifier in the default namespace.
    pub fn minecraft(path: impl Into<String>) -> Result<Self, Error> {
        Self::new(DEFAULT_NAMESPACE, path)
    }

    /// Default-namespace identifier from a literal path known to be valid.
    pub(crate) fn vanilla(path: &'static str) -> Self {
        debug_assert!(path.chars().all(|c| is_namespace_char(c) || c == '/'));
        Self { namespace: DEFAULT_NAMESPACE.to_string(), path: path.to_string() }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

impl FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::minecraft(s),
        }
    }
}

impl TryFrom<String> for Identifier {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_string()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_namespaced() {
        let id: Identifier = "mymod:trail/worn".parse().unwrap();
        assert_eq!(id.namespace(), "mymod");
        assert_eq!(id.path(), "trail/worn");
        assert_eq!(id.to_string(), "mymod:trail/worn");
    }

    #[test]
    fn test_default_namespace() {
        let id: Identifier = "grass_block".parse().unwrap();
        assert_eq!(id, Identifier::minecraft("grass_block").unwrap());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!("".parse::<Identifier>().is_err());
        assert!("minecraft:".parse::<Identifier>().is_err());
        assert!(":dirt".parse::<Identifier>().is_err());
        assert!("Minecraft:dirt".parse::<Identifier>().is_err());
        assert!("minecraft:dirt path".parse::<Identifier>().is_err());
        assert!("a/b:dirt".parse::<Identifier>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let id = Identifier::minecraft("dirt_path").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"minecraft:dirt_path\"");

        let back: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<Identifier>("\"BAD ID\"").is_err());
    }
}
