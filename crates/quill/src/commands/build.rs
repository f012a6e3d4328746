//! `quill build` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_config::{CliSettings, Config};
use quill_site::SiteBuilder;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown content directory (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Static assets directory (overrides config).
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Output directory, cleared before each build (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Page template file (overrides config).
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Enable verbose output (log each build phase).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any page fails to build.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            content_dir: self.content_dir,
            static_dir: self.static_dir,
            output_dir: self.output_dir,
            template: self.template,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(config_path = ?config.config_path, "Configuration loaded");

        let site = &config.site_resolved;
        output.info(&format!("Content: {}", site.content_dir.display()));
        output.info(&format!("Output: {}", site.output_dir.display()));
        let output_dir = site.output_dir.clone();

        let summary = SiteBuilder::new(config).build()?;

        output.success(&format!(
            "Built {} pages and copied {} static files to {}",
            summary.pages,
            summary.static_files,
            output_dir.display()
        ));
        Ok(())
    }
}
