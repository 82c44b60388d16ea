use std::path::PathBuf;

use clap::Parser;
use skill::docs::DocOptions;
use skill::refresh::{Refresher, TOOLS_DIR};
use skill::render::Format;
use skill::{Config, Result, config, logging};

#[derive(Parser)]
#[command(name = "refresh-tool-docs")]
#[command(about = "Regenerate Markdown docs for the tools of every configured MCP server", long_about = None)]
#[command(version)]
struct Cli {
    /// Server config file [default: mcp-config.json next to this executable]
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for the generated pages [default: tools/ next to this executable]
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Parameter block format
    #[arg(short, long, value_enum, default_value_t = Format::Auto)]
    format: Format,

    /// Add an example mcp-exec invocation to each tool
    #[arg(long)]
    examples: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let config = Config::load(&config_path)?;

    let output_dir = cli
        .output_dir
        .unwrap_or_else(|| config::executable_dir().join(TOOLS_DIR));
    let refresher = Refresher::new(cli.format.renderer()?, output_dir).with_options(DocOptions {
        examples: cli.examples,
    });

    refresher.run(&config, &mut std::io::stdout()).await?;
    Ok(())
}
