//! Loader for daybrief configuration with YAML + environment overlays.
//!
//! Precedence: `DAYBRIEF_`-prefixed environment variables win over the YAML
//! file, which wins over the serde defaults. String values may reference
//! `${VAR}` placeholders, expanded recursively after all sources merge.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Top-level runtime configuration for the daybrief server.
#[derive(Debug, Clone, Deserialize)]
pub struct DaybriefConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub capture: CaptureConfig,
}

impl Default for DaybriefConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            browser: BrowserConfig::default(),
            capture: CaptureConfig::default(),
        }
    }
}

/// Listen address for the HTTP surface.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Browser session settings. The user data dir carries the persisted Google
/// login between runs, so wiping it means logging in again by hand.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
    #[serde(default)]
    pub headless: bool,
    #[serde(default = "default_user_data_dir")]
    pub user_data_dir: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            headless: false,
            user_data_dir: default_user_data_dir(),
        }
    }
}

/// Per-source capture settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptureConfig {
    #[serde(default = "default_screenshots_dir")]
    pub screenshots_dir: String,
    /// How many unread inbox rows to scrape at most.
    #[serde(default = "default_max_inbox_rows")]
    pub max_inbox_rows: usize,
    /// Settle delays after navigation, in milliseconds. Gmail renders the
    /// slowest of the three, hence the larger default.
    #[serde(default = "default_calendar_settle_ms")]
    pub calendar_settle_ms: u64,
    #[serde(default = "default_inbox_settle_ms")]
    pub inbox_settle_ms: u64,
    #[serde(default = "default_weather_settle_ms")]
    pub weather_settle_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            screenshots_dir: default_screenshots_dir(),
            max_inbox_rows: default_max_inbox_rows(),
            calendar_settle_ms: default_calendar_settle_ms(),
            inbox_settle_ms: default_inbox_settle_ms(),
            weather_settle_ms: default_weather_settle_ms(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:5001".into()
}
fn default_webdriver_url() -> String {
    "http://localhost:9515".into()
}
fn default_user_data_dir() -> String {
    "chrome-profile".into()
}
fn default_screenshots_dir() -> String {
    "screenshots".into()
}
fn default_max_inbox_rows() -> usize {
    5
}
fn default_calendar_settle_ms() -> u64 {
    2000
}
fn default_inbox_settle_ms() -> u64 {
    4000
}
fn default_weather_settle_ms() -> u64 {
    3000
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct DaybriefConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for DaybriefConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DaybriefConfigLoader {
    /// Start with an empty source list; `load` appends the `DAYBRIEF_` env
    /// source last so environment variables beat any attached file.
    ///
    /// ```
    /// use daybrief_config::DaybriefConfigLoader;
    ///
    /// let config = DaybriefConfigLoader::new().load().expect("defaults load");
    /// assert_eq!(config.server.bind, "0.0.0.0:5001");
    /// assert_eq!(config.capture.max_inbox_rows, 5);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a config file; missing files are skipped so headless
    /// deployments can rely purely on environment variables.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use daybrief_config::DaybriefConfigLoader;
    ///
    /// let cfg = DaybriefConfigLoader::new()
    ///     .with_yaml_str("browser:\n  headless: true")
    ///     .load()
    ///     .unwrap();
    ///
    /// assert!(cfg.browser.headless);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources, expanding
    /// `${VAR}` placeholders before materialising the typed config.
    ///
    /// The env source joins last: in `config`, later sources override
    /// earlier ones, and env must win over files.
    pub fn load(self) -> Result<DaybriefConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(Environment::with_prefix("DAYBRIEF").separator("__"))
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: DaybriefConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;

    #[test]
    fn defaults_match_the_original_deployment() {
        let cfg = DaybriefConfigLoader::new().load().unwrap();
        assert_eq!(cfg.server.bind, "0.0.0.0:5001");
        assert_eq!(cfg.browser.webdriver_url, "http://localhost:9515");
        assert!(!cfg.browser.headless);
        assert_eq!(cfg.browser.user_data_dir, "chrome-profile");
        assert_eq!(cfg.capture.screenshots_dir, "screenshots");
        assert_eq!(cfg.capture.max_inbox_rows, 5);
    }

    #[test]
    fn yaml_overrides_defaults() {
        let cfg = DaybriefConfigLoader::new()
            .with_yaml_str(
                r#"
server:
  bind: "127.0.0.1:8080"
capture:
  max_inbox_rows: 10
"#,
            )
            .load()
            .unwrap();

        assert_eq!(cfg.server.bind, "127.0.0.1:8080");
        assert_eq!(cfg.capture.max_inbox_rows, 10);
        // untouched sections keep their defaults
        assert_eq!(cfg.browser.webdriver_url, "http://localhost:9515");
    }

    #[test]
    #[serial]
    fn env_overrides_yaml() {
        temp_env::with_var("DAYBRIEF_SERVER__BIND", Some("0.0.0.0:9000"), || {
            let cfg = DaybriefConfigLoader::new()
                .with_yaml_str("server:\n  bind: \"127.0.0.1:8080\"")
                .load()
                .unwrap();
            assert_eq!(cfg.server.bind, "0.0.0.0:9000");
        });
    }

    #[test]
    #[serial]
    fn expands_placeholders_from_env() {
        temp_env::with_var("PROFILE_ROOT", Some("/srv/daybrief"), || {
            let cfg = DaybriefConfigLoader::new()
                .with_yaml_str("browser:\n  user_data_dir: \"${PROFILE_ROOT}/chrome\"")
                .load()
                .unwrap();
            assert_eq!(cfg.browser.user_data_dir, "/srv/daybrief/chrome");
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${DOES_NOT_EXIST}"));
    }

    #[test]
    #[serial]
    fn expansion_terminates_on_cycles() {
        temp_env::with_vars([("A", Some("${B}")), ("B", Some("${A}"))], || {
            let mut v = json!("x=${A}-y");
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }
}
