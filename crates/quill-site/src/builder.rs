//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};

use quill_config::Config;
use rayon::prelude::*;

use crate::assets::copy_static;
use crate::error::BuildError;
use crate::page::generate_page;
use crate::template::Template;

/// Markdown page discovered in the content directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSource {
    /// Markdown file.
    pub source: PathBuf,
    /// HTML file it is written to.
    pub output: PathBuf,
}

/// Outcome of a successful build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Number of pages generated.
    pub pages: usize,
    /// Number of static files copied.
    pub static_files: usize,
}

/// Builds a static site from a content directory, a static directory and a
/// page template.
///
/// Build steps:
/// 1. Replace the output directory with a copy of the static directory
/// 2. Discover every `.md` file under the content directory
/// 3. Render pages in parallel on the rayon global pool
pub struct SiteBuilder {
    config: Config,
}

impl SiteBuilder {
    /// Create a builder from a loaded configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the build.
    ///
    /// Every page is rendered; if any fail, the error of the first failing
    /// page in sorted source order is returned. Pages already written stay on
    /// disk.
    ///
    /// # Errors
    ///
    /// Returns the first I/O, template or page error encountered.
    pub fn build(&self) -> Result<BuildSummary, BuildError> {
        let site = &self.config.site_resolved;

        tracing::info!(
            static_dir = %site.static_dir.display(),
            output_dir = %site.output_dir.display(),
            "Copying static files"
        );
        let static_files = copy_static(&site.static_dir, &site.output_dir)?;

        let template = Template::load(&site.template, self.config.template.clone())?;
        let pages = discover_pages(&site.content_dir, &site.output_dir)?;

        tracing::info!(
            content_dir = %site.content_dir.display(),
            page_count = pages.len(),
            "Generating pages"
        );
        // Collected in source order so the reported failure is the first page
        // by path, not the first to finish.
        let results: Vec<_> = pages
            .par_iter()
            .map(|page| generate_page(&page.source, &template, &page.output))
            .collect();
        results.into_iter().collect::<Result<Vec<_>, _>>()?;

        tracing::info!(pages = pages.len(), static_files, "Site build completed");
        Ok(BuildSummary {
            pages: pages.len(),
            static_files,
        })
    }
}

/// Find all markdown pages under `content_dir`, sorted by source path.
///
/// `content_dir/a/b.md` maps to `output_dir/a/b.html`. Hidden files and
/// directories are skipped. A missing content directory yields no pages.
///
/// # Errors
///
/// Returns [`BuildError::Io`] if a directory cannot be read.
pub fn discover_pages(content_dir: &Path, output_dir: &Path) -> Result<Vec<PageSource>, BuildError> {
    let mut sources = Vec::new();
    if content_dir.is_dir() {
        collect_markdown(content_dir, &mut sources)?;
    } else {
        tracing::warn!(path = %content_dir.display(), "Content directory not found");
    }
    sources.sort();

    Ok(sources
        .into_iter()
        .map(|source| {
            let relative = source.strip_prefix(content_dir).unwrap_or(source.as_path());
            let output = output_dir.join(relative).with_extension("html");
            PageSource { source, output }
        })
        .collect())
}

fn collect_markdown(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), BuildError> {
    let entries = fs::read_dir(dir).map_err(|e| BuildError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| BuildError::io(dir, e))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        if is_dir {
            collect_markdown(&path, out)?;
        } else if path.extension().is_some_and(|e| e == "md") {
            out.push(path);
        } else {
            tracing::debug!(path = %path.display(), "Skipping non-markdown file");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quill_config::CliSettings;
    use quill_renderer::RenderError;

    use super::*;

    static_assertions::assert_impl_all!(super::SiteBuilder: Send, Sync);

    const TEMPLATE: &str = "<title>{{ Title }}</title>{{ Content }}";

    /// Lay out a project with `quill.toml`, a template and one static file.
    fn create_project() -> tempfile::TempDir {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("quill.toml"), "").unwrap();
        fs::write(root.join("template.html"), TEMPLATE).unwrap();
        fs::create_dir_all(root.join("static")).unwrap();
        fs::write(root.join("static/index.css"), "body {}").unwrap();
        fs::create_dir_all(root.join("content")).unwrap();
        temp_dir
    }

    fn load_config(root: &Path) -> Config {
        Config::load(Some(&root.join("quill.toml")), None).unwrap()
    }

    #[test]
    fn discover_maps_output_paths() {
        let temp_dir = tempfile::tempdir().unwrap();
        let content = temp_dir.path().join("content");
        fs::create_dir_all(content.join("blog/post")).unwrap();
        fs::write(content.join("index.md"), "# Home").unwrap();
        fs::write(content.join("blog/post/index.md"), "# Post").unwrap();
        fs::write(content.join("notes.txt"), "ignored").unwrap();
        fs::write(content.join(".draft.md"), "# hidden").unwrap();

        let pages = discover_pages(&content, Path::new("/out")).unwrap();

        assert_eq!(
            pages,
            vec![
                PageSource {
                    source: content.join("blog/post/index.md"),
                    output: PathBuf::from("/out/blog/post/index.html"),
                },
                PageSource {
                    source: content.join("index.md"),
                    output: PathBuf::from("/out/index.html"),
                },
            ]
        );
    }

    #[test]
    fn discover_missing_content_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let pages = discover_pages(&temp_dir.path().join("nope"), Path::new("/out")).unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn build_generates_site() {
        let temp_dir = create_project();
        let root = temp_dir.path();
        fs::write(root.join("content/index.md"), "# Home\n\n- one\n- two").unwrap();
        fs::create_dir_all(root.join("content/about")).unwrap();
        fs::write(root.join("content/about/index.md"), "# About\n\n> quoted").unwrap();

        let summary = SiteBuilder::new(load_config(root)).build().unwrap();

        assert_eq!(
            summary,
            BuildSummary {
                pages: 2,
                static_files: 1,
            }
        );
        assert_eq!(
            fs::read_to_string(root.join("public/index.html")).unwrap(),
            "<title>Home</title><div><h1>Home</h1><ul><li>one</li><li>two</li></ul></div>"
        );
        assert_eq!(
            fs::read_to_string(root.join("public/about/index.html")).unwrap(),
            "<title>About</title><div><h1>About</h1><blockquote>quoted</blockquote></div>"
        );
        assert!(root.join("public/index.css").exists());
    }

    #[test]
    fn build_fails_on_bad_page() {
        let temp_dir = create_project();
        let root = temp_dir.path();
        fs::write(root.join("content/index.md"), "# Home\n\n**unclosed").unwrap();

        let err = SiteBuilder::new(load_config(root)).build().unwrap_err();

        assert!(matches!(
            err,
            BuildError::Page {
                source: RenderError::UnterminatedInlineMarker { .. },
                ..
            }
        ));
    }

    #[test]
    fn build_reports_first_failing_page_in_source_order() {
        let temp_dir = create_project();
        let root = temp_dir.path();
        fs::write(root.join("content/a.md"), "# A\n\n**unclosed").unwrap();
        fs::write(root.join("content/b.md"), "no title").unwrap();
        fs::write(root.join("content/c.md"), "# C\n\n_open").unwrap();

        for _ in 0..8 {
            let err = SiteBuilder::new(load_config(root)).build().unwrap_err();
            match err {
                BuildError::Page { path, source } => {
                    assert_eq!(path, root.join("content/a.md"));
                    assert_eq!(
                        source,
                        RenderError::UnterminatedInlineMarker {
                            delimiter: "**".to_owned()
                        }
                    );
                }
                other => panic!("Expected BuildError::Page, got {other:?}"),
            }
        }
    }

    #[test]
    fn build_requires_template() {
        let temp_dir = create_project();
        let root = temp_dir.path();
        fs::remove_file(root.join("template.html")).unwrap();

        let err = SiteBuilder::new(load_config(root)).build().unwrap_err();

        assert!(matches!(err, BuildError::TemplateNotFound(_)));
    }

    #[test]
    fn build_honours_cli_overrides() {
        let temp_dir = create_project();
        let root = temp_dir.path();
        fs::write(root.join("content/index.md"), "# Home").unwrap();
        let settings = CliSettings {
            output_dir: Some(root.join("dist")),
            ..Default::default()
        };
        let config = Config::load(Some(&root.join("quill.toml")), Some(&settings)).unwrap();

        SiteBuilder::new(config).build().unwrap();

        assert!(root.join("dist/index.html").exists());
        assert!(!root.join("public").exists());
    }
}
