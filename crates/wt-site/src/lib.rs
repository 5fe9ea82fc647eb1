//! Site configuration for wikitext processing.
//!
//! This crate holds everything the lowering stage consumes from its
//! environment rather than from the syntax tree:
//!
//! - [`SiteConfig`]: site name, namespace table, character-entity table.
//!   Defaults cover a standard wiki; a TOML file can override or extend
//!   them via [`SiteConfig::load`].
//! - [`PageTitle`]: the title-resolution service. [`SiteConfig::resolve_title`]
//!   normalizes a raw link target into namespace + title + fragment and
//!   fails with [`TitleError`] on malformed input.
//!
//! # Example
//!
//! ```
//! use wt_site::SiteConfig;
//!
//! let config = SiteConfig::default();
//! let title = config.resolve_title("help:page_titles#Syntax").unwrap();
//! assert_eq!(title.namespace.as_deref(), Some("Help"));
//! assert_eq!(title.title, "Page titles");
//! assert_eq!(title.fragment.as_deref(), Some("Syntax"));
//! ```

mod config;
mod entities;
mod title;

pub use config::{ConfigError, Namespace, SiteConfig};
pub use title::{PageTitle, TitleError};
