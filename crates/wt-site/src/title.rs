//! Page-title resolution and normalization.

use tracing::trace;

use crate::SiteConfig;

/// Characters that may never appear in a page title.
const FORBIDDEN: &[char] = &['<', '>', '[', ']', '{', '}', '|'];

/// A resolved and normalized page title.
///
/// Resolution is idempotent: feeding [`PageTitle::normalized_full`] back
/// through [`SiteConfig::resolve_title`] yields an equal title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTitle {
    /// Canonical namespace name, `None` for the main namespace.
    pub namespace: Option<String>,
    /// Normalized title without namespace or fragment.
    pub title: String,
    /// Fragment (the part after `#`), if any.
    pub fragment: Option<String>,
    /// The original target as written, whitespace-trimmed.
    pub denormalized: String,
}

/// A link target that cannot be a page title.
#[derive(Debug, thiserror::Error)]
pub enum TitleError {
    /// The target is empty, or empty once namespace and fragment are split off.
    #[error("empty link target: {0:?}")]
    Empty(String),

    /// The target contains a character that is forbidden in titles.
    #[error("invalid character {ch:?} in link target {target:?}")]
    InvalidCharacter { target: String, ch: char },
}

impl PageTitle {
    /// Resolve a raw link target against a site configuration.
    pub(crate) fn resolve(config: &SiteConfig, raw: &str) -> Result<Self, TitleError> {
        let denormalized = raw.trim().to_owned();
        if denormalized.is_empty() {
            return Err(TitleError::Empty(raw.to_owned()));
        }
        if let Some(ch) = denormalized.chars().find(|c| FORBIDDEN.contains(c)) {
            return Err(TitleError::InvalidCharacter {
                target: denormalized,
                ch,
            });
        }

        let (before_fragment, fragment) = match denormalized.split_once('#') {
            Some((title, frag)) => (title, Some(frag.trim().to_owned())),
            None => (denormalized.as_str(), None),
        };

        let (namespace, rest) = match before_fragment.split_once(':') {
            Some((prefix, rest)) if config.namespace_by_name(prefix).is_some() => {
                let ns = config
                    .namespace_by_name(prefix)
                    .map(|ns| ns.name.clone());
                (ns, rest)
            }
            _ => (None, before_fragment),
        };

        let title = normalize(rest);
        if title.is_empty() {
            return Err(TitleError::Empty(raw.to_owned()));
        }

        trace!(raw, ?namespace, title, "resolved link target");
        Ok(Self {
            namespace,
            title,
            fragment,
            denormalized,
        })
    }

    /// The normalized full title: `Namespace:Title` or just `Title`.
    pub fn normalized_full(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}:{}", self.title),
            None => self.title.clone(),
        }
    }

    /// The title as written in the source, trimmed only.
    pub fn denormalized(&self) -> &str {
        &self.denormalized
    }
}

/// Normalize a bare title: underscores to spaces, whitespace collapsed and
/// trimmed, first letter uppercased.
fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in raw.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            if out.is_empty() {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
        }
    }
    out
}
