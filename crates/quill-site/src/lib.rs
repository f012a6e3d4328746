//! Static site generation for Quill.
//!
//! Copies static assets, renders every markdown page under the content
//! directory with [`quill_renderer`], and fills the page template.

mod assets;
mod builder;
mod error;
mod page;
mod template;

pub use assets::copy_static;
pub use builder::{BuildSummary, PageSource, SiteBuilder, discover_pages};
pub use error::BuildError;
pub use page::generate_page;
pub use template::Template;
