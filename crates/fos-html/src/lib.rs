//! fOS HTML
//!
//! Markup fragments in and out of a `fos_dom::DomTree`: parsing is done by
//! html5ever, serialization is hand-written.

mod parser;
mod serializer;

pub use parser::HtmlParser;
pub use serializer::{HtmlSerializer, inner_html, outer_html};

use fos_dom::{DomError, DomTree, NodeId};

/// Parse a markup fragment into detached nodes of `tree`
pub fn parse_fragment(tree: &mut DomTree, markup: &str) -> Result<Vec<NodeId>, HtmlError> {
    HtmlParser::new().parse_fragment(tree, markup)
}

/// Markup errors
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error(transparent)]
    Dom(#[from] DomError),
}
