//! On-disk JSON configuration.
//!
//! Each entry in `rules` applies to every block in its `block_ids`. Fields an
//! entry leaves out fall back to `defaults`; an explicitly empty
//! `entity_ids` or `spawn_groups` list leaves that axis unrestricted for the
//! entry.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::identifier::Identifier;
use crate::core::types::{Result, Tick};
use crate::trample::eligibility::EntityFilter;
use super::rule::{BlockRule, RuntimeConfig};

/// Values used for fields a rule entry omits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleDefaults {
    pub step_count: u32,
    pub timeout_ticks: Tick,
    pub entity_ids: Vec<Identifier>,
    pub spawn_groups: Vec<String>,
}

impl Default for RuleDefaults {
    fn default() -> Self {
        Self {
            step_count: 5,
            timeout_ticks: 72_000, // one in-game hour at 20 TPS
            entity_ids: Vec::new(),
            spawn_groups: vec!["creature".into(), "monster".into()],
        }
    }
}

/// One rule entry as written in the file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub block_ids: Vec<Identifier>,
    pub next_block_id: Identifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ticks: Option<Tick>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_ids: Option<Vec<Identifier>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn_groups: Option<Vec<String>>,
}

impl RuleEntry {
    /// Entry that takes every optional field from the defaults.
    pub fn new(block_ids: Vec<Identifier>, next_block_id: Identifier) -> Self {
        Self {
            block_ids,
            next_block_id,
            step_count: None,
            timeout_ticks: None,
            entity_ids: None,
            spawn_groups: None,
        }
    }

    /// Resolve against `defaults` into a runtime rule.
    pub fn resolve(&self, defaults: &RuleDefaults) -> BlockRule {
        let entity_ids = self.entity_ids.as_ref().unwrap_or(&defaults.entity_ids);
        let spawn_groups = self.spawn_groups.as_ref().unwrap_or(&defaults.spawn_groups);
        BlockRule {
            step_count: self.step_count.unwrap_or(defaults.step_count),
            timeout_ticks: self.timeout_ticks.unwrap_or(defaults.timeout_ticks),
            next_block_id: self.next_block_id.clone(),
            filter: EntityFilter::new(entity_ids.iter().cloned(), spawn_groups.iter().cloned()),
        }
    }
}

/// Top-level configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub defaults: RuleDefaults,
    pub rules: Vec<RuleEntry>,
}

impl ConfigFile {
    /// Configuration written when none exists: grass wears into a dirt path
    /// under players and ordinary mobs.
    pub fn builtin() -> Self {
        Self {
            defaults: RuleDefaults {
                entity_ids: vec![Identifier::vanilla("player")],
                ..RuleDefaults::default()
            },
            rules: vec![RuleEntry::new(
                vec![Identifier::vanilla("grass_block")],
                Identifier::vanilla("dirt_path"),
            )],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Save as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Load `path`, writing [`builtin`](Self::builtin) there first if the
    /// file does not exist.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("No config at {}, writing defaults", path.display());
            let config = Self::builtin();
            config.save(path)?;
            Ok(config)
        }
    }
}

impl RuntimeConfig {
    /// Expand file entries into per-block rules.
    pub fn from_file(file: &ConfigFile) -> Result<Self> {
        let mut config = RuntimeConfig::new();
        for entry in &file.rules {
            if entry.block_ids.is_empty() {
                return Err(Error::EmptyRule(entry.next_block_id.clone()));
            }
            let rule = entry.resolve(&file.defaults);
            for block_id in &entry.block_ids {
                config.insert(block_id.clone(), rule.clone())?;
            }
        }
        log::info!("Loaded {} trampling rules", config.len());
        Ok(config)
    }

    /// Load and expand a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file(&ConfigFile::load(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn id(s: &str) -> Identifier {
        s.parse().unwrap()
    }

    const SAMPLE: &str = r#"{
        "defaults": {
            "step_count": 5,
            "timeout_ticks": 72000,
            "entity_ids": ["minecraft:player"],
            "spawn_groups": ["creature", "monster"]
        },
        "rules": [
            { "block_ids": ["minecraft:grass_block", "minecraft:podzol"],
              "next_block_id": "minecraft:dirt_path" },
            { "block_ids": ["minecraft:dirt_path"],
              "next_block_id": "minecraft:coarse_dirt",
              "step_count": 20, "timeout_ticks": 0, "spawn_groups": [] }
        ]
    }"#;

    #[test]
    fn test_parse_and_expand() {
        let file = ConfigFile::from_json_str(SAMPLE).unwrap();
        let config = RuntimeConfig::from_file(&file).unwrap();
        assert_eq!(config.len(), 3);

        let grass = config.rule(&id("grass_block")).unwrap();
        assert_eq!(grass.step_count, 5);
        assert_eq!(grass.timeout_ticks, 72_000);
        assert_eq!(grass.next_block_id, id("dirt_path"));
        assert!(grass.filter.spawn_groups().unwrap().contains("monster"));
        assert_eq!(config.rule(&id("podzol")), Some(grass));

        let path = config.rule(&id("dirt_path")).unwrap();
        assert_eq!(path.step_count, 20);
        assert_eq!(path.timeout_ticks, 0);
        assert_eq!(path.filter.spawn_groups(), None);
        assert!(path.filter.entity_ids().unwrap().contains(&id("player")));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let file = ConfigFile::from_json_str("{}").unwrap();
        assert_eq!(file.defaults, RuleDefaults::default());
        assert!(file.rules.is_empty());
        assert!(RuntimeConfig::from_file(&file).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_bad_files() {
        assert!(matches!(
            ConfigFile::from_json_str(r#"{"rules": [{"block_ids": ["Grass"], "next_block_id": "dirt"}]}"#),
            Err(Error::Json(_))
        ));

        let empty = ConfigFile::from_json_str(r#"{"rules": [{"block_ids": [], "next_block_id": "dirt"}]}"#).unwrap();
        assert!(matches!(RuntimeConfig::from_file(&empty), Err(Error::EmptyRule(_))));

        let dup = ConfigFile::from_json_str(
            r#"{"rules": [
                {"block_ids": ["sand"], "next_block_id": "dirt"},
                {"block_ids": ["sand"], "next_block_id": "gravel"}
            ]}"#,
        )
        .unwrap();
        assert!(matches!(RuntimeConfig::from_file(&dup), Err(Error::DuplicateRule(_))));

        let unrestricted = ConfigFile::from_json_str(
            r#"{"rules": [{"block_ids": ["sand"], "next_block_id": "dirt",
                           "entity_ids": [], "spawn_groups": []}]}"#,
        )
        .unwrap();
        assert!(matches!(
            RuntimeConfig::from_file(&unrestricted),
            Err(Error::RuleMatchesNothing(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("nested").join("trample.json");

        let file = ConfigFile::from_json_str(SAMPLE).unwrap();
        file.save(&path).expect("save failed");
        assert_eq!(ConfigFile::load(&path).expect("load failed"), file);
    }

    #[test]
    fn test_load_or_create_writes_builtin() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("trample.json");

        let created = ConfigFile::load_or_create(&path).expect("create failed");
        assert!(path.exists());
        assert_eq!(created, ConfigFile::builtin());

        let config = RuntimeConfig::load(&path).expect("load failed");
        assert_eq!(
            config.rule(&id("grass_block")).map(|r| r.next_block_id.clone()),
            Some(id("dirt_path"))
        );
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        assert!(matches!(
            ConfigFile::load(temp_dir.path().join("absent.json")),
            Err(Error::Io(_))
        ));
    }
}
