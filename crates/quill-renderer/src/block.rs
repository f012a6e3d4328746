//! Block classification and rendering.
//!
//! A block is a trimmed chunk of markdown between blank lines. [`classify`]
//! assigns it a [`BlockType`] and [`render_block`] turns it into an
//! [`HtmlNode`].

use std::fmt;
use std::str::FromStr;

use crate::error::RenderError;
use crate::inline::text_to_children;
use crate::node::HtmlNode;

/// Fence marking both ends of a code block.
const CODE_FENCE: &str = "```";

/// Deepest heading level.
const MAX_HEADING_LEVEL: usize = 6;

/// Kind of a markdown block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BlockType {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

impl BlockType {
    /// Stable `snake_case` name of the block type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::Code => "code",
            Self::Quote => "quote",
            Self::UnorderedList => "unordered_list",
            Self::OrderedList => "ordered_list",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paragraph" => Ok(Self::Paragraph),
            "heading" => Ok(Self::Heading),
            "code" => Ok(Self::Code),
            "quote" => Ok(Self::Quote),
            "unordered_list" => Ok(Self::UnorderedList),
            "ordered_list" => Ok(Self::OrderedList),
            other => Err(RenderError::UnknownBlockType(other.to_owned())),
        }
    }
}

/// Classify a block.
///
/// Checks run in priority order and the first match wins: code fence, quote,
/// unordered list, ordered list, heading. Anything else, including the empty
/// block, is a paragraph.
///
/// The fence check comes first so that lines inside a code block are never
/// read as quote or list markers.
#[must_use]
pub fn classify(block: &str) -> BlockType {
    let block = block.trim();
    if block.starts_with(CODE_FENCE) && block.ends_with(CODE_FENCE) {
        return BlockType::Code;
    }

    // Only `\n` and `\r\n` end a line; U+2028, form feed and a lone `\r`
    // stay inside the line.
    let lines: Vec<&str> = block.lines().collect();
    if lines.is_empty() {
        return BlockType::Paragraph;
    }

    if lines.iter().all(|line| line.starts_with('>')) {
        return BlockType::Quote;
    }

    if lines.iter().all(|line| line.starts_with("- ")) {
        return BlockType::UnorderedList;
    }

    // Numbering must run 1, 2, 3, ... without gaps; otherwise fall through.
    if lines
        .iter()
        .enumerate()
        .all(|(i, line)| line.starts_with(&format!("{}. ", i + 1)))
    {
        return BlockType::OrderedList;
    }

    if is_heading_line(lines[0]) {
        return BlockType::Heading;
    }

    BlockType::Paragraph
}

/// `#` run of 1 to 6 characters followed directly by a space.
fn is_heading_line(line: &str) -> bool {
    let level = heading_level(line);
    (1..=MAX_HEADING_LEVEL).contains(&level) && line[level..].starts_with(' ')
}

fn heading_level(block: &str) -> usize {
    block.chars().take_while(|&c| c == '#').count()
}

/// Render a block according to its [`classify`] result.
///
/// The block is trimmed before classification and rendering.
///
/// # Errors
///
/// Propagates the error of the block type's renderer.
pub fn render_block(block: &str) -> Result<HtmlNode, RenderError> {
    let block = block.trim();
    match classify(block) {
        BlockType::Paragraph => render_paragraph(block),
        BlockType::Heading => render_heading(block),
        BlockType::Code => render_code(block),
        BlockType::Quote => render_quote(block),
        BlockType::UnorderedList => render_unordered_list(block),
        BlockType::OrderedList => render_ordered_list(block),
    }
}

/// Render a paragraph. Soft line breaks collapse to single spaces.
///
/// An empty block renders as a transparent node with no children.
///
/// # Errors
///
/// Propagates inline tokenizer errors.
pub fn render_paragraph(block: &str) -> Result<HtmlNode, RenderError> {
    if block.is_empty() {
        return Ok(HtmlNode::parent("", Vec::new()));
    }
    let text = block.replace('\n', " ");
    Ok(HtmlNode::parent("p", text_to_children(&text)?))
}

/// Render an ATX heading (`# Title` through `###### Title`).
///
/// # Errors
///
/// - [`RenderError::InvalidHeadingLevel`] for zero or more than six `#`, or no text
/// - [`RenderError::MalformedHeading`] when the text contains another `#`
pub fn render_heading(block: &str) -> Result<HtmlNode, RenderError> {
    let level = heading_level(block);
    if level == 0 || level > MAX_HEADING_LEVEL {
        return Err(RenderError::InvalidHeadingLevel(level));
    }

    let text = block[level..].trim();
    if text.is_empty() {
        return Err(RenderError::InvalidHeadingLevel(level));
    }
    if text.contains('#') {
        return Err(RenderError::MalformedHeading(format!(
            "{} {text}",
            "#".repeat(level)
        )));
    }

    Ok(HtmlNode::parent(format!("h{level}"), text_to_children(text)?))
}

/// Render a fenced code block as `<pre><code>`.
///
/// The interior is emitted verbatim, without inline formatting.
///
/// # Errors
///
/// Returns [`RenderError::InvalidCodeBlock`] when either fence is missing.
pub fn render_code(block: &str) -> Result<HtmlNode, RenderError> {
    let block = block.trim();
    if !block.starts_with(CODE_FENCE) || !block.ends_with(CODE_FENCE) {
        return Err(RenderError::InvalidCodeBlock);
    }

    // A lone fence is both opening and closing, leaving nothing inside.
    let interior = block
        .get(CODE_FENCE.len()..block.len().saturating_sub(CODE_FENCE.len()))
        .unwrap_or_default()
        .trim();

    let code = HtmlNode::parent("code", vec![HtmlNode::text(interior)]);
    Ok(HtmlNode::parent("pre", vec![code]))
}

/// Render a quote block. Lines are joined with single spaces.
///
/// # Errors
///
/// - [`RenderError::InvalidQuoteBlock`] when a line does not start with `>`
/// - inline tokenizer errors
pub fn render_quote(block: &str) -> Result<HtmlNode, RenderError> {
    let mut lines = Vec::new();
    for line in block.split('\n') {
        if !line.starts_with('>') {
            return Err(RenderError::InvalidQuoteBlock);
        }
        lines.push(line.trim_start_matches('>').trim());
    }
    let text = lines.join(" ");
    Ok(HtmlNode::parent("blockquote", text_to_children(&text)?))
}

/// Render a `- item` list.
///
/// # Errors
///
/// Propagates inline tokenizer errors.
pub fn render_unordered_list(block: &str) -> Result<HtmlNode, RenderError> {
    let items = block
        .split('\n')
        .map(|line| list_item(skip_chars(line, 2)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HtmlNode::parent("ul", items))
}

/// Render a `1. item` list.
///
/// Each line loses a prefix as wide as its expected `{n}. ` marker.
///
/// # Errors
///
/// Propagates inline tokenizer errors.
pub fn render_ordered_list(block: &str) -> Result<HtmlNode, RenderError> {
    let items = block
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            let prefix_len = (i + 1).to_string().len() + 2;
            list_item(skip_chars(line, prefix_len))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HtmlNode::parent("ol", items))
}

fn list_item(text: &str) -> Result<HtmlNode, RenderError> {
    Ok(HtmlNode::parent("li", text_to_children(text)?))
}

/// Drop the first `n` characters of `line`.
fn skip_chars(line: &str, n: usize) -> &str {
    match line.char_indices().nth(n) {
        Some((idx, _)) => &line[idx..],
        None => "",
    }
}
