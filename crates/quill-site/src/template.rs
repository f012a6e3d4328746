//! Page template with literal placeholder substitution.

use std::path::Path;

use quill_config::TemplateConfig;

use crate::error::BuildError;

/// HTML page template.
///
/// Placeholders are plain strings (by default `{{ Title }}` and
/// `{{ Content }}`); there is no expression language.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    tokens: TemplateConfig,
}

impl Template {
    /// Create a template from source text.
    #[must_use]
    pub fn new(source: impl Into<String>, tokens: TemplateConfig) -> Self {
        Self {
            source: source.into(),
            tokens,
        }
    }

    /// Read a template from disk.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::TemplateNotFound`] if the file does not exist, or
    /// [`BuildError::Io`] if it cannot be read.
    pub fn load(path: &Path, tokens: TemplateConfig) -> Result<Self, BuildError> {
        if !path.exists() {
            return Err(BuildError::TemplateNotFound(path.to_path_buf()));
        }
        let source = std::fs::read_to_string(path).map_err(|e| BuildError::io(path, e))?;
        Ok(Self::new(source, tokens))
    }

    /// Fill in the title, then the content.
    ///
    /// Every occurrence of each placeholder is replaced. The title is
    /// substituted first, so a title placeholder appearing inside page
    /// content is left untouched.
    #[must_use]
    pub fn render(&self, title: &str, content: &str) -> String {
        self.source
            .replace(&self.tokens.title_token, title)
            .replace(&self.tokens.content_token, content)
    }
}
