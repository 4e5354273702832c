//! Binding errors
//!
//! Only the markup-facing entry points can fail. Structural operations on
//! containers are total and treat invalid requests as no-ops.

use fos_dom::DomError;
use fos_html::HtmlError;

use crate::ContainerId;

pub type BindResult<T> = Result<T, BindError>;

#[derive(Debug, thiserror::Error)]
pub enum BindError {
    #[error("markup error: {0}")]
    Html(#[from] HtmlError),

    #[error("tree error: {0}")]
    Dom(#[from] DomError),

    #[error("unknown container {0:?}")]
    UnknownContainer(ContainerId),
}
