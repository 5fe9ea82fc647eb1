//! The wikitext object model (WOM).
//!
//! A small, uniform document tree that lowering produces from the ~70-kind
//! syntax tree: every node is a [`WomNode`] with a [`WomKind`], an attribute
//! map and ordered children. The tree is mutable while it is being built and
//! is handed to the XML printer (or other consumers) afterwards.
//!
//! # Example
//!
//! ```
//! use wt_wom::{WomKind, WomNode};
//!
//! let mut para = WomNode::new(WomKind::Paragraph);
//! para.append_child(WomNode::text("Hello"));
//! assert_eq!(para.kind.name(), "paragraph");
//! assert_eq!(wt_wom::xml::print(&para).unwrap().lines().count(), 3);
//! ```

mod node;
pub mod xml;

pub use node::{WomKind, WomNode};
pub use xml::PrintError;
