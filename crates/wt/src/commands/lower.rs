//! `wt lower` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::debug;
use wt_ast::WtNode;
use wt_site::SiteConfig;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the lower command.
#[derive(Args)]
pub(crate) struct LowerArgs {
    /// Path to the serialized syntax tree (JSON).
    ast: PathBuf,

    /// Page title (default: derived from the input file name).
    #[arg(short, long)]
    title: Option<String>,

    /// Author recorded on signature nodes.
    #[arg(long, env = "WT_AUTHOR", default_value = "unknown")]
    author: String,

    /// Timestamp recorded on signature nodes.
    #[arg(long, default_value = "1970-01-01T00:00:00Z")]
    timestamp: String,

    /// Path to a site configuration file (default: builtin site defaults).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the XML document to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl LowerArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = match &self.config {
            Some(path) => SiteConfig::load(path)?,
            None => SiteConfig::default(),
        };

        let raw_title = match &self.title {
            Some(title) => title.clone(),
            None => title_from_path(&self.ast),
        };
        let title = config.resolve_title(&raw_title)?;

        debug!(path = %self.ast.display(), title = %title.normalized_full(), "reading syntax tree");
        let json = fs::read_to_string(&self.ast)?;
        let tree: WtNode = serde_json::from_str(&json)?;

        let page = wt_lower::lower(&tree, &title, &self.author, &self.timestamp, &config)?;
        let xml = wt_wom::xml::print(&page)?;

        match &self.output {
            Some(path) => {
                fs::write(path, &xml)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => println!("{xml}"),
        }
        Ok(())
    }
}

/// Falls back to the input file stem when no title is given.
fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| "Untitled".to_owned(), |stem| stem.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::title_from_path;

    #[test]
    fn title_falls_back_to_the_file_stem() {
        assert_eq!(title_from_path(Path::new("pages/Main_Page.json")), "Main_Page");
        assert_eq!(title_from_path(Path::new("/")), "Untitled");
    }
}
