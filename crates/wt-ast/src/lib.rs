//! Syntax tree for parsed and expanded wikitext.
//!
//! This crate defines [`WtNode`], the tree produced by the upstream parser
//! and template-expansion stages. The tree is immutable from the point of
//! view of downstream consumers: the lowering stage reads it and builds a
//! separate object-model tree from it.
//!
//! Two text utilities accompany the node types:
//!
//! - [`rt::print`]: renders a node back to its textual wikitext form. Used
//!   for markup the object model has no structural representation for, so
//!   the original text survives lowering verbatim.
//! - [`text::to_text`]: strict plain-text extraction for attribute values
//!   and image alt text. Fails with [`StringConversionError`] when the
//!   content contains anything that is not text.

mod nodes;
pub mod rt;
pub mod text;

pub use nodes::{
    ImageHorizAlign, ImageLinkTarget, ImageVertAlign, ImageViewFormat, WtImageLink, WtNode,
    WtUrl, WtXmlElement,
};
pub use text::StringConversionError;
