//! Error types of the lowering stage.

use wt_ast::StringConversionError;
use wt_site::TitleError;

/// A fatal error while lowering a page.
///
/// Lowering has no partial success: any of these aborts the page and no
/// output tree is produced. All of them indicate bugs or bad data upstream
/// of the lowering stage, not recoverable conditions.
#[derive(Debug, thiserror::Error)]
pub enum LowerError {
    /// A closed-set value (signature tilde count, page root kind, ...) fell
    /// outside its known set. The upstream grammar should make this
    /// unreachable.
    #[error("illegal {what}: {value}")]
    IllegalValue {
        /// What the value was supposed to be.
        what: &'static str,
        /// The offending value.
        value: String,
    },

    /// A node appeared outside the only context that can absorb it (e.g. a
    /// table caption with no table open).
    #[error("{node} node outside {expected} context")]
    StrayNode {
        node: &'static str,
        expected: &'static str,
    },

    /// An internal link target did not resolve to a page title.
    #[error("cannot resolve link target {target:?}")]
    LinkTarget {
        target: String,
        #[source]
        source: TitleError,
    },

    /// An external link target did not compose into a valid URI.
    #[error("invalid URI {uri:?}")]
    InvalidUri { uri: String },

    /// Content that must stringify to plain text could not be converted.
    #[error("cannot convert content to text")]
    TextConversion(#[from] StringConversionError),
}
