//! Inline tokenizer.
//!
//! Splits span text into typed [`TextSpan`]s through a fixed sequence of
//! passes: bold `**`, italic `_`, code `` ` ``, images `![alt](url)`, then
//! links `[text](url)`. Each pass only refines spans that are still plain,
//! so the pass order is the precedence order.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::RenderError;
use crate::node::HtmlNode;

/// Image syntax: `![alt](src)`.
static IMAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("invalid image regex")
});

/// Link syntax: `[text](href)`. Matches preceded by `!` are images and get skipped.
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("invalid link regex")
});

/// Formatting of a [`TextSpan`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link { url: String },
    Image { url: String },
}

/// Run of inline text with a single formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TextSpan {
    /// Span text without markup. Alt text for images.
    pub text: String,
    /// Span formatting.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: SpanKind,
}

impl TextSpan {
    /// Create a span.
    #[must_use]
    pub fn new(text: impl Into<String>, kind: SpanKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// Create a plain span.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SpanKind::Plain)
    }

    /// Target URL of a link or image.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            SpanKind::Link { url } | SpanKind::Image { url } => Some(url),
            SpanKind::Plain | SpanKind::Bold | SpanKind::Italic | SpanKind::Code => None,
        }
    }

    fn is_plain(&self) -> bool {
        self.kind == SpanKind::Plain
    }

    /// Convert the span to an HTML leaf node.
    #[must_use]
    pub fn to_html_node(&self) -> HtmlNode {
        match &self.kind {
            SpanKind::Plain => HtmlNode::text(self.text.as_str()),
            SpanKind::Bold => HtmlNode::leaf("b", self.text.as_str()),
            SpanKind::Italic => HtmlNode::leaf("i", self.text.as_str()),
            SpanKind::Code => HtmlNode::leaf("code", self.text.as_str()),
            SpanKind::Link { url } => {
                HtmlNode::leaf("a", self.text.as_str()).with_attribute("href", url.as_str())
            }
            SpanKind::Image { url } => HtmlNode::leaf("img", "")
                .with_attribute("src", url.as_str())
                .with_attribute("alt", self.text.as_str()),
        }
    }
}

/// Tokenize inline markdown into spans.
///
/// # Errors
///
/// Returns [`RenderError::UnterminatedInlineMarker`] when a `**`, `_` or
/// `` ` `` section is not closed.
///
/// # Example
///
/// ```
/// use quill_renderer::{SpanKind, TextSpan, tokenize};
///
/// let spans = tokenize("a **b**").unwrap();
/// assert_eq!(
///     spans,
///     vec![TextSpan::plain("a "), TextSpan::new("b", SpanKind::Bold)]
/// );
/// ```
pub fn tokenize(text: &str) -> Result<Vec<TextSpan>, RenderError> {
    let spans = vec![TextSpan::plain(text)];
    let spans = split_delimited(spans, "**", &SpanKind::Bold)?;
    let spans = split_delimited(spans, "_", &SpanKind::Italic)?;
    let spans = split_delimited(spans, "`", &SpanKind::Code)?;
    let spans = split_pattern(spans, &IMAGE_PATTERN, false, |alt, url| {
        TextSpan::new(alt, SpanKind::Image { url: url.to_owned() })
    });
    let spans = split_pattern(spans, &LINK_PATTERN, true, |text, url| {
        TextSpan::new(text, SpanKind::Link { url: url.to_owned() })
    });
    Ok(spans)
}

/// Tokenize inline markdown and convert each span to an HTML node.
///
/// # Errors
///
/// Same as [`tokenize`].
pub fn text_to_children(text: &str) -> Result<Vec<HtmlNode>, RenderError> {
    Ok(tokenize(text)?.iter().map(TextSpan::to_html_node).collect())
}

/// Split plain spans on a delimiter, alternating plain and `kind` segments.
///
/// Empty segments produce no span.
fn split_delimited(
    spans: Vec<TextSpan>,
    delimiter: &str,
    kind: &SpanKind,
) -> Result<Vec<TextSpan>, RenderError> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }

        let sections: Vec<&str> = span.text.split(delimiter).collect();
        if sections.len() % 2 == 0 {
            return Err(RenderError::UnterminatedInlineMarker {
                delimiter: delimiter.to_owned(),
            });
        }

        for (i, section) in sections.into_iter().enumerate() {
            if section.is_empty() {
                continue;
            }
            let section_kind = if i % 2 == 0 {
                SpanKind::Plain
            } else {
                kind.clone()
            };
            out.push(TextSpan::new(section, section_kind));
        }
    }
    Ok(out)
}

/// Split plain spans on every match of a bracket-paren pattern.
///
/// `make` receives the bracket text and the paren target of each match.
fn split_pattern(
    spans: Vec<TextSpan>,
    pattern: &Regex,
    skip_after_bang: bool,
    make: impl Fn(&str, &str) -> TextSpan,
) -> Vec<TextSpan> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }

        let matches = find_matches(&span.text, pattern, skip_after_bang);
        if matches.is_empty() {
            out.push(span);
            continue;
        }

        let mut rest = span.text.as_str();
        for (whole, label, target) in matches {
            let Some((before, after)) = rest.split_once(whole) else {
                break;
            };
            if !before.is_empty() {
                out.push(TextSpan::plain(before));
            }
            out.push(make(label, target));
            rest = after;
        }
        if !rest.is_empty() {
            out.push(TextSpan::plain(rest));
        }
    }
    out
}

/// Collect `(whole, label, target)` for each non-overlapping match, left to right.
///
/// With `skip_after_bang`, a match whose opening bracket follows `!` is
/// rejected and the scan resumes at the next character.
fn find_matches<'t>(
    text: &'t str,
    pattern: &Regex,
    skip_after_bang: bool,
) -> Vec<(&'t str, &'t str, &'t str)> {
    let mut found = Vec::new();
    let mut pos = 0;
    while pos <= text.len() {
        let Some(caps) = pattern.captures_at(text, pos) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };
        if skip_after_bang && text[..whole.start()].ends_with('!') {
            // `[` is ASCII, so the next char boundary is one byte on.
            pos = whole.start() + 1;
            continue;
        }
        found.push((whole.as_str(), group(&caps, 1), group(&caps, 2)));
        pos = whole.end();
    }
    found
}

fn group<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map_or("", |m| m.as_str())
}
