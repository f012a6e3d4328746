//! Whole-document rendering and title extraction.

use crate::block::{BlockType, classify, render_block, render_heading};
use crate::error::RenderError;
use crate::node::HtmlNode;

/// Result of rendering a markdown page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPage {
    /// Body HTML wrapped in a single `<div>`.
    pub html: String,
    /// Text of the first level 1 heading.
    pub title: String,
}

/// Split a document into trimmed blocks on blank lines.
///
/// Runs of more than one blank line yield empty blocks, which render to nothing.
pub fn split_blocks(markdown: &str) -> impl Iterator<Item = &str> {
    markdown.split("\n\n").map(str::trim)
}

/// Render a document into a `div` node holding one child per block.
///
/// # Errors
///
/// Returns the first block error; no partial tree is produced.
pub fn render_document(markdown: &str) -> Result<HtmlNode, RenderError> {
    let children = split_blocks(markdown)
        .map(render_block)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HtmlNode::parent("div", children))
}

/// Render a document to an HTML string.
///
/// # Errors
///
/// Returns the first block or serialization error.
///
/// # Example
///
/// ```
/// let html = quill_renderer::render("# Title\n\nSome **bold** text.").unwrap();
/// assert_eq!(html, "<div><h1>Title</h1><p>Some <b>bold</b> text.</p></div>");
/// ```
pub fn render(markdown: &str) -> Result<String, RenderError> {
    render_document(markdown)?.serialize()
}

/// Extract the page title from the first `h1` heading.
///
/// The title is the literal value of the heading's first inline span, so
/// `# **Bold** title` yields `Bold`.
///
/// # Errors
///
/// - [`RenderError::NoTitleFound`] when no `h1` heading exists
/// - errors from rendering any heading scanned before the title
pub fn extract_title(markdown: &str) -> Result<String, RenderError> {
    for block in split_blocks(markdown) {
        if classify(block) != BlockType::Heading {
            continue;
        }
        let heading = render_heading(block)?;
        if heading.tag() != Some("h1") {
            continue;
        }
        if let Some(value) = heading.children().first().and_then(HtmlNode::value) {
            return Ok(value.to_owned());
        }
    }
    Err(RenderError::NoTitleFound)
}

/// Render a document and extract its title in one call.
///
/// # Errors
///
/// Returns rendering errors, or [`RenderError::NoTitleFound`].
pub fn render_page(markdown: &str) -> Result<RenderedPage, RenderError> {
    Ok(RenderedPage {
        html: render(markdown)?,
        title: extract_title(markdown)?,
    })
}
