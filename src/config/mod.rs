use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::Date;

use crate::timeline::sample::SampleOptions;
use crate::views::StandoutConfig;

pub mod themes;

pub use themes::{Palette, ThemeName};

const APP_DOMAIN: &str = "io";
const APP_ORG: &str = "TimelineTui";
const APP_NAME: &str = "timelinetui";

pub const CONFIG_ENV: &str = "TIMELINETUI_CONFIG";
pub const DATA_ENV: &str = "TIMELINETUI_DATA";

pub struct ConfigLoader {
    paths: ConfigPaths,
}

impl ConfigLoader {
    pub fn discover() -> Result<Self> {
        let paths = ConfigPaths::discover()?;
        Ok(Self { paths })
    }

    pub fn with_paths(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    pub fn load_or_init(&self) -> Result<AppConfig> {
        self.paths.ensure_directories()?;
        if !self.paths.config_file.exists() {
            let mut default_cfg = AppConfig::default();
            default_cfg.post_load(&self.paths);
            self.write_default_config(&default_cfg)?;
            return Ok(default_cfg);
        }

        self.load()
    }

    pub fn load(&self) -> Result<AppConfig> {
        let raw = fs::read_to_string(&self.paths.config_file)
            .with_context(|| format!("reading config {}", self.paths.config_file.display()))?;
        let mut cfg: AppConfig = toml::from_str(&raw).context("parsing config toml")?;
        cfg.post_load(&self.paths);
        Ok(cfg)
    }

    fn write_default_config(&self, cfg: &AppConfig) -> Result<()> {
        let toml = toml::to_string_pretty(cfg).context("serializing default config")?;
        if let Some(parent) = self.paths.config_file.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        let mut file = fs::File::create(&self.paths.config_file)
            .with_context(|| format!("creating config {}", self.paths.config_file.display()))?;
        file.write_all(toml.as_bytes())
            .context("writing default config")?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub data_dir: PathBuf,
    /// Timeline picked up from the data directory when `data_file` is unset.
    pub timeline_file: PathBuf,
    pub log_dir: PathBuf,
    pub state_dir: PathBuf,
}

impl ConfigPaths {
    pub fn discover() -> Result<Self> {
        let override_config = env::var(CONFIG_ENV).ok().map(PathBuf::from);
        let override_data = env::var(DATA_ENV).ok().map(PathBuf::from);

        let project_dirs = ProjectDirs::from(APP_DOMAIN, APP_ORG, APP_NAME)
            .context("resolving XDG project directories")?;

        let config_dir = override_config
            .clone()
            .map(|p| {
                if p.is_dir() {
                    p
                } else {
                    p.parent().map(Path::to_path_buf).unwrap_or(p)
                }
            })
            .unwrap_or_else(|| project_dirs.config_dir().to_path_buf());

        let config_file = override_config
            .filter(|p| p.is_file() || p.extension().is_some())
            .unwrap_or_else(|| config_dir.join("config.toml"));

        let data_root = override_data.unwrap_or_else(|| project_dirs.data_dir().to_path_buf());
        let state_dir = project_dirs
            .state_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| data_root.join("state"));

        Ok(Self::from_roots(config_dir, config_file, data_root, state_dir))
    }

    /// Lays out every derived path under explicit roots.
    pub fn from_roots(
        config_dir: PathBuf,
        config_file: PathBuf,
        data_dir: PathBuf,
        state_dir: PathBuf,
    ) -> Self {
        Self {
            timeline_file: data_dir.join("timeline.json"),
            log_dir: state_dir.join("logs"),
            config_dir,
            config_file,
            data_dir,
            state_dir,
        }
    }

    /// Everything beneath `root`, as used by `--data-dir` and tests.
    pub fn rooted_at(root: &Path) -> Self {
        let config_dir = root.join("config");
        Self::from_roots(
            config_dir.clone(),
            config_dir.join("config.toml"),
            root.join("data"),
            root.join("state"),
        )
    }

    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [
            &self.config_dir,
            &self.data_dir,
            &self.log_dir,
            &self.state_dir,
        ] {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating application directory {}", dir.display()))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub user_name: String,
    pub sidebar_open: bool,
    pub theme: ThemeName,
    /// Fixed "today" as `YYYY-MM-DD`; the local date when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<String>,
    /// JSON timeline to load instead of generated sample data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    pub sample: SampleOptions,
    pub standouts: StandoutConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_name: "there".to_string(),
            sidebar_open: false,
            theme: ThemeName::Dark,
            reference_date: None,
            data_file: None,
            sample: SampleOptions::default(),
            standouts: StandoutConfig::default(),
        }
    }
}

impl AppConfig {
    fn post_load(&mut self, paths: &ConfigPaths) {
        if let Some(raw) = self.reference_date.as_deref() {
            if parse_date(raw).is_none() {
                tracing::warn!(raw, "invalid reference_date in config, using the local date");
                self.reference_date = None;
            }
        }
        if let Some(file) = self.data_file.take() {
            self.data_file = Some(if file.is_relative() {
                paths.config_dir.join(file)
            } else {
                file
            });
        }
        if self.user_name.trim().is_empty() {
            tracing::warn!("empty user_name in config, falling back to default greeting");
            self.user_name = AppConfig::default().user_name;
        }
    }

    pub fn reference_date(&self) -> Option<Date> {
        self.reference_date.as_deref().and_then(parse_date)
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn first_run_writes_a_default_config() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let loader = ConfigLoader::with_paths(ConfigPaths::rooted_at(dir.path()));
        let cfg = loader.load_or_init()?;
        assert_eq!(cfg.user_name, "there");
        assert!(loader.paths().config_file.exists());
        assert!(loader.paths().log_dir.is_dir());

        let reloaded = loader.load()?;
        assert_eq!(reloaded.standouts, StandoutConfig::default());
        assert_eq!(reloaded.sample.seed, SampleOptions::default().seed);
        Ok(())
    }

    #[test]
    fn partial_config_keeps_defaults_for_missing_fields() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let paths = ConfigPaths::rooted_at(dir.path());
        paths.ensure_directories()?;
        fs::write(
            &paths.config_file,
            r#"
user_name = "Ada"
reference_date = "2025-07-04"
data_file = "timeline.json"

[standouts]
client_domains = ["acme.io"]
day_limit = 5
"#,
        )?;
        let cfg = ConfigLoader::with_paths(paths.clone()).load()?;
        assert_eq!(cfg.user_name, "Ada");
        assert_eq!(cfg.reference_date(), Some(date!(2025-07-04)));
        assert_eq!(cfg.data_file, Some(paths.config_dir.join("timeline.json")));
        assert_eq!(cfg.standouts.client_domains, vec!["acme.io".to_string()]);
        assert_eq!(cfg.standouts.day_limit, 5);
        assert_eq!(cfg.standouts.week_limit, 4);
        assert_eq!(cfg.theme, ThemeName::Dark);
        Ok(())
    }

    #[test]
    fn invalid_reference_date_falls_back_to_local_date() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let paths = ConfigPaths::rooted_at(dir.path());
        paths.ensure_directories()?;
        fs::write(&paths.config_file, "reference_date = \"July 4th\"\nuser_name = \"  \"\n")?;
        let cfg = ConfigLoader::with_paths(paths).load()?;
        assert_eq!(cfg.reference_date, None);
        assert_eq!(cfg.user_name, "there");
        Ok(())
    }

    #[test]
    fn malformed_toml_is_an_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let paths = ConfigPaths::rooted_at(dir.path());
        paths.ensure_directories()?;
        fs::write(&paths.config_file, "user_name = [")?;
        assert!(ConfigLoader::with_paths(paths).load().is_err());
        Ok(())
    }

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(parse_date(" 2025-07-04 "), Some(date!(2025-07-04)));
        assert_eq!(parse_date("07/04/2025"), None);
    }
}
