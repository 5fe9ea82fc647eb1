//! Lowers parsed-and-expanded wikitext syntax trees into the object model.
//!
//! The entry point is [`lower`]: a single depth-first pass that turns the
//! dirty parts of wiki markup (stray XML tags, raw tables, image options,
//! link targets, signatures, entity references) into the small set of node
//! kinds of [`wt_wom`]. A page either lowers completely or fails with a
//! [`LowerError`]; there is no partial output.
//!
//! ```
//! use wt_ast::WtNode;
//! use wt_site::SiteConfig;
//!
//! let config = SiteConfig::default();
//! let title = config.resolve_title("Sandbox").unwrap();
//! let tree = WtNode::Page {
//!     content: vec![WtNode::Paragraph {
//!         content: vec![WtNode::text("Hello, wiki.")],
//!     }],
//! };
//!
//! let page = wt_lower::lower(&tree, &title, "Alice", "2012-09-26T20:45:12Z", &config).unwrap();
//! assert_eq!(page.attr("title"), Some("Sandbox"));
//! ```

mod classifier;
mod engine;
mod error;
mod gaps;
mod links;

pub use engine::lower;
pub use error::LowerError;
