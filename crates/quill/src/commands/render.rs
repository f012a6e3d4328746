//! `quill render` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    file: PathBuf,

    /// Print the page title instead of the body HTML.
    #[arg(long)]
    title: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails to render.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let rendered = render_file(&self.file, self.title)?;
        Output::new().document(&rendered);
        Ok(())
    }
}

/// Render a markdown file to body HTML, or extract its title.
fn render_file(path: &Path, title: bool) -> Result<String, CliError> {
    let markdown = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let rendered = if title {
        quill_renderer::extract_title(&markdown)?
    } else {
        quill_renderer::render(&markdown)?
    };
    Ok(rendered)
}
