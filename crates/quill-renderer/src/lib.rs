//! Markdown to HTML renderer for Quill.
//!
//! Converts a small markdown dialect into an [`HtmlNode`] tree and serializes
//! it to a string for embedding into a page template.
//!
//! # Architecture
//!
//! - [`HtmlNode`]: leaf/parent output tree with a single serialization rule
//! - [`tokenize`]: inline spans (bold, italic, code, images, links)
//! - [`classify`] and [`render_block`]: per-block type detection and rendering
//! - [`render`] and [`extract_title`]: whole-document entry points
//!
//! Text is never HTML-escaped. Callers are responsible for input trust.
//!
//! # Example
//!
//! ```
//! use quill_renderer::{extract_title, render};
//!
//! let markdown = "# Hello\n\n**Bold** text";
//! assert_eq!(
//!     render(markdown).unwrap(),
//!     "<div><h1>Hello</h1><p><b>Bold</b> text</p></div>"
//! );
//! assert_eq!(extract_title(markdown).unwrap(), "Hello");
//! ```

mod block;
mod document;
mod error;
mod inline;
mod node;

pub use block::{
    BlockType, classify, render_block, render_code, render_heading, render_ordered_list,
    render_paragraph, render_quote, render_unordered_list,
};
pub use document::{RenderedPage, extract_title, render, render_document, render_page, split_blocks};
pub use error::RenderError;
pub use inline::{SpanKind, TextSpan, text_to_children, tokenize};
pub use node::{Attributes, HtmlNode};
