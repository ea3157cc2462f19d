use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Threshold value meaning "this check is switched off".
pub const DISABLED: i32 = -1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Auto-paste rules for one guild.
///
/// A read-only snapshot: the engine only ever borrows it. Thresholds use
/// [`DISABLED`] (any negative value) to switch the corresponding check off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationConfig {
    /// Paste codeblocks even when the message also carries plain text.
    #[serde(default)]
    pub auto_paste_if_text: bool,
    /// More than this many codeblocks in one message pastes all of them.
    #[serde(default = "disabled")]
    pub count_threshold: i32,
    /// A codeblock with more than this many lines is pasted.
    #[serde(default = "disabled")]
    pub line_threshold: i32,
    /// Channels exempt from auto-pasting.
    #[serde(default)]
    pub ignored_channels: BTreeSet<u64>,
    /// Paste `text/plain` and `message.txt` attachments.
    #[serde(default = "enabled")]
    pub paste_attachments: bool,
}

fn disabled() -> i32 {
    DISABLED
}

fn enabled() -> bool {
    true
}

impl Default for DestinationConfig {
    /// The configuration used for guilds with no entry: every threshold off
    /// and attachment pasting disabled.
    fn default() -> Self {
        Self {
            auto_paste_if_text: false,
            count_threshold: DISABLED,
            line_threshold: DISABLED,
            ignored_channels: BTreeSet::new(),
            paste_attachments: false,
        }
    }
}

impl DestinationConfig {
    /// The count threshold, or `None` when disabled.
    pub fn count_limit(&self) -> Option<usize> {
        usize::try_from(self.count_threshold).ok()
    }

    /// The line threshold, or `None` when disabled.
    pub fn line_limit(&self) -> Option<usize> {
        usize::try_from(self.line_threshold).ok()
    }

    pub fn is_ignored(&self, channel: u64) -> bool {
        self.ignored_channels.contains(&channel)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildConfig {
    pub id: u64,
    #[serde(flatten)]
    pub settings: DestinationConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub guilds: Vec<GuildConfig>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/codepaste");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Snapshot of the rules for `guild`, falling back to the defaults when the
    /// guild has no entry.
    pub fn for_guild(&self, guild: u64) -> DestinationConfig {
        self.guilds
            .iter()
            .find(|g| g.id == guild)
            .map(|g| g.settings.clone())
            .unwrap_or_default()
    }

    /// Mutable access to a guild's rules, inserting the per-guild defaults
    /// (attachment pasting on) when missing.
    pub fn guild_mut(&mut self, guild: u64) -> &mut DestinationConfig {
        let index = match self.guilds.iter().position(|g| g.id == guild) {
            Some(index) => index,
            None => {
                self.guilds.push(GuildConfig {
                    id: guild,
                    settings: DestinationConfig {
                        paste_attachments: true,
                        ..DestinationConfig::default()
                    },
                });
                self.guilds.len() - 1
            }
        };
        &mut self.guilds[index].settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/codepaste/config.toml"));
    }

    #[test]
    fn test_default_disables_everything() {
        let config = DestinationConfig::default();

        assert_eq!(config.count_limit(), None);
        assert_eq!(config.line_limit(), None);
        assert!(!config.auto_paste_if_text);
        assert!(!config.paste_attachments);
        assert!(!config.is_ignored(1));
    }

    #[test]
    fn test_negative_thresholds_are_disabled() {
        let config = DestinationConfig {
            count_threshold: -7,
            line_threshold: 0,
            ..DestinationConfig::default()
        };

        assert_eq!(config.count_limit(), None);
        assert_eq!(config.line_limit(), Some(0));
    }

    #[test]
    fn test_guild_entry_field_defaults() {
        let config: Config = toml::from_str(
            r#"
[[guilds]]
id = 1234
line_threshold = 20
"#,
        )
        .unwrap();

        let guild = config.for_guild(1234);
        assert_eq!(guild.line_limit(), Some(20));
        assert_eq!(guild.count_limit(), None);
        assert!(guild.paste_attachments);
        assert!(!guild.auto_paste_if_text);
        assert!(guild.ignored_channels.is_empty());
    }

    #[test]
    fn test_ignored_channels_from_toml() {
        let config: Config = toml::from_str(
            r#"
[[guilds]]
id = 1
ignored_channels = [10, 11]
"#,
        )
        .unwrap();

        let guild = config.for_guild(1);
        assert!(guild.is_ignored(10));
        assert!(guild.is_ignored(11));
        assert!(!guild.is_ignored(12));
    }

    #[test]
    fn test_unknown_guild_gets_defaults() {
        let config = Config::default();

        assert_eq!(config.for_guild(99), DestinationConfig::default());
    }

    #[test]
    fn test_guild_mut_inserts_once() {
        let mut config = Config::default();
        config.guild_mut(5).count_threshold = 3;
        config.guild_mut(5).auto_paste_if_text = true;

        assert_eq!(config.guilds.len(), 1);
        let guild = config.for_guild(5);
        assert_eq!(guild.count_limit(), Some(3));
        assert!(guild.auto_paste_if_text);
        assert!(guild.paste_attachments);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_config_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "guilds = 5").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let mut test_config = Config::default();
        let guild = test_config.guild_mut(42);
        guild.line_threshold = 10;
        guild.ignored_channels.insert(7);

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config.guilds, test_config.guilds);
    }
}
