//! Configuration management for Quill.
//!
//! Parses `quill.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [site]
//! content_dir = "content"
//! static_dir = "static"
//! output_dir = "public"
//! template = "template.html"
//!
//! [template]
//! title_token = "{{ Title }}"
//! content_token = "{{ Content }}"
//! ```

use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override markdown content directory.
    pub content_dir: Option<PathBuf>,
    /// Override static assets directory.
    pub static_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override page template file.
    pub template: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quill.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site paths (relative strings from TOML).
    site: SiteConfigRaw,
    /// Template placeholder configuration.
    pub template: TemplateConfig,

    /// Resolved site paths (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    content_dir: Option<String>,
    static_dir: Option<String>,
    output_dir: Option<String>,
    template: Option<String>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Directory holding markdown pages.
    pub content_dir: PathBuf,
    /// Directory copied verbatim into the output.
    pub static_dir: PathBuf,
    /// Directory the site is written to. Cleared on every build.
    pub output_dir: PathBuf,
    /// Page template file.
    pub template: PathBuf,
}

/// Template placeholder configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TemplateConfig {
    /// Placeholder replaced with the page title.
    pub title_token: String,
    /// Placeholder replaced with the rendered page body.
    pub content_token: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            title_token: "{{ Title }}".to_owned(),
            content_token: "{{ Content }}".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `quill.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            let cwd = std::env::current_dir().unwrap_or_default();
            config.apply_cli_settings(settings, &cwd);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    ///
    /// Relative override paths are resolved against `cwd`.
    fn apply_cli_settings(&mut self, settings: &CliSettings, cwd: &Path) {
        let site = &mut self.site_resolved;
        if let Some(content_dir) = &settings.content_dir {
            site.content_dir = absolutize(content_dir, cwd);
        }
        if let Some(static_dir) = &settings.static_dir {
            site.static_dir = absolutize(static_dir, cwd);
        }
        if let Some(output_dir) = &settings.output_dir {
            site.output_dir = absolutize(output_dir, cwd);
        }
        if let Some(template) = &settings.template {
            site.template = absolutize(template, cwd);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            site: SiteConfigRaw::default(),
            template: TemplateConfig::default(),
            site_resolved: SiteConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let cwd = std::env::current_dir().unwrap_or_default();
        let path = absolutize(path, &cwd);
        let config_dir = path.parent().unwrap_or(Path::new("/"));
        config.resolve_paths(config_dir);
        config.config_path = Some(path);

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_template()?;
        self.validate_site()?;
        Ok(())
    }

    /// Validate template placeholders.
    fn validate_template(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.template.title_token, "template.title_token")?;
        require_non_empty(&self.template.content_token, "template.content_token")?;
        if self.template.title_token == self.template.content_token {
            return Err(ConfigError::Validation(
                "template.title_token and template.content_token must differ".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate site directories.
    ///
    /// The output directory is deleted on every build, so it must neither be
    /// nor contain any source path.
    fn validate_site(&self) -> Result<(), ConfigError> {
        let site = &self.site_resolved;
        let mut sources = vec![
            ("site.content_dir", site.content_dir.as_path()),
            ("site.static_dir", site.static_dir.as_path()),
            ("site.template", site.template.as_path()),
        ];
        if let Some(config_path) = &self.config_path {
            sources.push(("configuration file", config_path.as_path()));
        }

        for (name, source) in sources {
            if source.starts_with(&site.output_dir) {
                return Err(ConfigError::Validation(format!(
                    "site.output_dir {} cannot contain {name}",
                    site.output_dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| {
            absolutize(Path::new(path.unwrap_or(default)), config_dir)
        };

        self.site_resolved = SiteConfig {
            content_dir: resolve(self.site.content_dir.as_deref(), "content"),
            static_dir: resolve(self.site.static_dir.as_deref(), "static"),
            output_dir: resolve(self.site.output_dir.as_deref(), "public"),
            template: resolve(self.site.template.as_deref(), "template.html"),
        };
    }
}

/// Join `path` onto `base` and fold away `.` and `..` components.
///
/// Purely lexical: symlinks are not followed and the path need not exist.
fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in base.join(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
