//! Site build error types.

use std::path::PathBuf;

use quill_renderer::RenderError;

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Filesystem operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Page template file is missing.
    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// Markdown page failed to render.
    #[error("Failed to render {}: {source}", path.display())]
    Page {
        /// Markdown source file.
        path: PathBuf,
        #[source]
        source: RenderError,
    },
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
