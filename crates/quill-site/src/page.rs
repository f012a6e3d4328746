//! Single page generation.

use std::fs;
use std::path::Path;

use crate::error::BuildError;
use crate::template::Template;

/// Render one markdown file through the template and write the result.
///
/// Parent directories of `dest` are created as needed. Returns the page title.
///
/// # Errors
///
/// - [`BuildError::Io`] if the source cannot be read or the output written
/// - [`BuildError::Page`] if the markdown fails to render or has no title
pub fn generate_page(from: &Path, template: &Template, dest: &Path) -> Result<String, BuildError> {
    tracing::debug!(from = %from.display(), to = %dest.display(), "Generating page");

    let markdown = fs::read_to_string(from).map_err(|e| BuildError::io(from, e))?;
    let page = quill_renderer::render_page(&markdown).map_err(|source| BuildError::Page {
        path: from.to_path_buf(),
        source,
    })?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
    }
    fs::write(dest, template.render(&page.title, &page.html))
        .map_err(|e| BuildError::io(dest, e))?;

    Ok(page.title)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quill_config::TemplateConfig;
    use quill_renderer::RenderError;

    use super::*;

    fn template() -> Template {
        Template::new(
            "<title>{{ Title }}</title><main>{{ Content }}</main>",
            TemplateConfig::default(),
        )
    }

    #[test]
    fn writes_rendered_page() {
        let temp_dir = tempfile::tempdir().unwrap();
        let from = temp_dir.path().join("index.md");
        let dest = temp_dir.path().join("out/nested/index.html");
        fs::write(&from, "# Welcome\n\nHello _there_").unwrap();

        let title = generate_page(&from, &template(), &dest).unwrap();

        assert_eq!(title, "Welcome");
        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            "<title>Welcome</title><main><div><h1>Welcome</h1><p>Hello <i>there</i></p></div></main>"
        );
    }

    #[test]
    fn page_without_title_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let from = temp_dir.path().join("notes.md");
        let dest = temp_dir.path().join("notes.html");
        fs::write(&from, "just notes").unwrap();

        let err = generate_page(&from, &template(), &dest).unwrap_err();

        assert!(matches!(
            err,
            BuildError::Page {
                source: RenderError::NoTitleFound,
                ..
            }
        ));
        assert!(!dest.exists());
    }

    #[test]
    fn missing_source_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let from = temp_dir.path().join("missing.md");

        let err = generate_page(&from, &template(), &temp_dir.path().join("x.html")).unwrap_err();

        assert!(matches!(err, BuildError::Io { path, .. } if path == from));
    }
}
