//! Render error types.

/// Error returned when markdown cannot be rendered.
///
/// Rendering is all-or-nothing: any error aborts the whole document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// An inline delimiter (`**`, `_`, `` ` ``) was opened but never closed.
    #[error("invalid markdown: unterminated `{delimiter}` section")]
    UnterminatedInlineMarker {
        /// The delimiter that was left open.
        delimiter: String,
    },

    /// Heading with zero or more than six `#`, or with no text.
    #[error("invalid heading level: {0}")]
    InvalidHeadingLevel(usize),

    /// Heading text contains stray `#` characters.
    #[error("invalid heading: `{0}` contains extra '#' characters")]
    MalformedHeading(String),

    /// Code block without a triple-backtick fence at both ends.
    #[error("invalid code block")]
    InvalidCodeBlock,

    /// Quote block with a line that does not start with `>`.
    #[error("invalid quote block")]
    InvalidQuoteBlock,

    /// Untagged leaf node carrying attributes.
    #[error("leaf node must have a tag when using attributes")]
    LeafRequiresTagForAttributes,

    /// Parent node without a tag.
    #[error("parent node has no tag")]
    MissingTag,

    /// Parent node without a children list.
    #[error("parent node has no children")]
    MissingChildren,

    /// Block type name that does not match any known type.
    #[error("unknown block type: {0}")]
    UnknownBlockType(String),

    /// Document has no level 1 heading.
    #[error("no title found")]
    NoTitleFound,
}
