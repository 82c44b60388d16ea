//! Documentation refresh for every configured server.
//!
//! Servers are processed one at a time in configuration order. A server that
//! fails at any step is reported and skipped; the rest are still rendered.

use std::io::Write;
use std::path::{Path, PathBuf};

use mcp::{Client, Tool};
use tracing::{info, warn};

use crate::config::Config;
use crate::docs::{self, DocOptions};
use crate::error::{Error, Result};
use crate::render::ParamsRenderer;

/// Identity announced to servers by the refresher.
pub const CLIENT_NAME: &str = "refresh-tool-docs";

/// Output directory name, created next to the executable by default.
pub const TOOLS_DIR: &str = "tools";

/// What happened to one server.
#[derive(Debug)]
pub enum ServerOutcome {
    /// Documentation was written to this path.
    Rendered(PathBuf),
    /// Listing or writing failed; nothing was written.
    Skipped(Error),
}

#[derive(Debug)]
pub struct ServerReport {
    pub server: String,
    pub outcome: ServerOutcome,
}

/// Per-server outcomes of a refresh, in processing order.
#[derive(Debug, Default)]
pub struct RefreshReport {
    pub servers: Vec<ServerReport>,
}

impl RefreshReport {
    pub fn rendered(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.servers.iter().filter_map(|r| match &r.outcome {
            ServerOutcome::Rendered(path) => Some((r.server.as_str(), path.as_path())),
            ServerOutcome::Skipped(_) => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.servers.iter().filter_map(|r| match &r.outcome {
            ServerOutcome::Skipped(err) => Some((r.server.as_str(), err)),
            ServerOutcome::Rendered(_) => None,
        })
    }
}

/// Renders and writes documentation pages.
pub struct Refresher {
    renderer: Box<dyn ParamsRenderer>,
    output_dir: PathBuf,
    options: DocOptions,
}

impl Refresher {
    pub fn new(renderer: Box<dyn ParamsRenderer>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            output_dir: output_dir.into(),
            options: DocOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DocOptions) -> Self {
        self.options = options;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Refresh every configured server, writing progress lines to `out`.
    ///
    /// Only failing to create the output directory or to write to `out`
    /// aborts the run.
    pub async fn run(&self, config: &Config, out: &mut impl Write) -> Result<RefreshReport> {
        std::fs::create_dir_all(&self.output_dir)?;

        let mut report = RefreshReport::default();
        for (name, entry) in config.servers() {
            let outcome = match self.refresh_server(name, &entry.url).await {
                Ok(path) => {
                    info!(server = name, path = %path.display(), "documentation updated");
                    writeln!(out, "Updated: {}", path.display())?;
                    ServerOutcome::Rendered(path)
                }
                Err(err) => {
                    warn!(server = name, error = %err, "skipping server");
                    writeln!(out, "Error fetching tools for {name}: {err}")?;
                    ServerOutcome::Skipped(err)
                }
            };
            report.servers.push(ServerReport {
                server: name.to_string(),
                outcome,
            });
        }

        writeln!(out, "Tool docs refreshed")?;
        Ok(report)
    }

    async fn refresh_server(&self, name: &str, url: &str) -> Result<PathBuf> {
        // Reject a bad name before contacting the server.
        docs::tools_markdown_path(&self.output_dir, name)?;
        let tools = fetch_tools(url).await?;
        let page = docs::render_tools_markdown(name, &tools, self.renderer.as_ref(), self.options)?;
        docs::write_tools_markdown(&self.output_dir, name, &page)
    }
}

/// List a server's tools on a fresh session.
pub async fn fetch_tools(url: &str) -> mcp::Result<Vec<Tool>> {
    let mut client = Client::builder(url)
        .client_info(CLIENT_NAME, env!("CARGO_PKG_VERSION"))
        .build();
    client.list_tools().await
}
