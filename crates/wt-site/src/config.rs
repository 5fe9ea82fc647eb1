//! Site configuration: namespaces and character entities.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::entities;
use crate::title::{PageTitle, TitleError};

/// Configuration of the wiki a page belongs to.
///
/// [`SiteConfig::default`] describes a standard wiki; a TOML file can add
/// namespaces and entity names on top.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Human-readable site name, used as the project namespace name.
    pub site_name: String,
    /// Namespace table. Replaces the default table when non-empty.
    pub namespaces: Vec<Namespace>,
    /// Additional entity names (name → literal replacement). These shadow
    /// the built-in table on conflict.
    pub entities: HashMap<String, String>,
}

/// A wiki namespace with its canonical name and aliases.
#[derive(Debug, Clone, Deserialize)]
pub struct Namespace {
    /// Numeric namespace id (0 = main).
    pub id: i32,
    /// Canonical name, empty for the main namespace.
    pub name: String,
    /// Alternative names that resolve to this namespace.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Wiki".to_owned(),
            namespaces: default_namespaces(),
            entities: HashMap::new(),
        }
    }
}

fn default_namespaces() -> Vec<Namespace> {
    let ns = |id: i32, name: &str, aliases: &[&str]| Namespace {
        id,
        name: name.to_owned(),
        aliases: aliases.iter().map(|&a| a.to_owned()).collect(),
    };
    vec![
        ns(0, "", &[]),
        ns(1, "Talk", &[]),
        ns(2, "User", &[]),
        ns(3, "User talk", &[]),
        ns(4, "Project", &[]),
        ns(6, "File", &["Image"]),
        ns(10, "Template", &[]),
        ns(12, "Help", &[]),
        ns(14, "Category", &[]),
    ]
}

impl SiteConfig {
    /// Load a config file, layering it over the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut config: SiteConfig = toml::from_str(&content)?;
        if config.namespaces.is_empty() {
            config.namespaces = default_namespaces();
        }
        debug!(
            site = %config.site_name,
            namespaces = config.namespaces.len(),
            "loaded site config"
        );
        Ok(config)
    }

    /// Resolve a named entity reference to its literal replacement.
    ///
    /// Config-supplied names shadow the built-in XHTML table.
    pub fn resolve_entity(&self, name: &str) -> Option<&str> {
        self.entities
            .get(name)
            .map(String::as_str)
            .or_else(|| entities::builtin(name))
    }

    /// Resolve a raw link target into a normalized [`PageTitle`].
    pub fn resolve_title(&self, raw: &str) -> Result<PageTitle, TitleError> {
        PageTitle::resolve(self, raw)
    }

    /// Find a namespace by any of its names, case-insensitively.
    pub fn namespace_by_name(&self, name: &str) -> Option<&Namespace> {
        let wanted = name.trim().replace('_', " ");
        self.namespaces.iter().find(|ns| {
            !ns.name.is_empty()
                && (ns.name.eq_ignore_ascii_case(&wanted)
                    || ns.aliases.iter().any(|a| a.eq_ignore_ascii_case(&wanted)))
        })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("site config not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_config_knows_standard_namespaces() {
        let config = SiteConfig::default();
        assert!(config.namespace_by_name("File").is_some());
        assert!(config.namespace_by_name("image").is_some());
        assert!(config.namespace_by_name("Nonsense").is_none());
    }

    #[test]
    fn main_namespace_is_never_found_by_name() {
        let config = SiteConfig::default();
        assert!(config.namespace_by_name("").is_none());
    }

    #[test]
    fn config_entities_shadow_builtins() {
        let mut config = SiteConfig::default();
        assert_eq!(config.resolve_entity("mdash"), Some("\u{2014}"));
        config
            .entities
            .insert("mdash".to_owned(), "--".to_owned());
        assert_eq!(config.resolve_entity("mdash"), Some("--"));
    }

    #[test]
    fn load_layers_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
site_name = "Testwiki"

[entities]
wiki = "Testwiki"
"#
        )
        .unwrap();

        let config = SiteConfig::load(file.path()).unwrap();
        assert_eq!(config.site_name, "Testwiki");
        assert_eq!(config.resolve_entity("wiki"), Some("Testwiki"));
        // Namespace table falls back to the defaults.
        assert!(config.namespace_by_name("Template").is_some());
    }

    #[test]
    fn load_missing_file_fails() {
        let err = SiteConfig::load(Path::new("/nonexistent/site.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
