use std::path::PathBuf;

use clap::Parser;
use skill::invoke::{self, Invocation};
use skill::{Config, Result, config, logging};

#[derive(Parser)]
#[command(name = "mcp-exec")]
#[command(about = "Execute a single MCP tool call and print the result", long_about = None)]
#[command(version)]
struct Cli {
    /// Server config file [default: mcp-config.json next to this executable]
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Server name as listed under mcpServers
    server: String,

    /// Tool to call
    tool: String,

    /// Tool arguments as a JSON object, e.g. '{"repo": "owner/repo"}'
    params: String,
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

    // Validate input before touching config or network.
    let arguments = invoke::parse_arguments(&cli.params)?;

    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let config = Config::load(&config_path)?;

    let invocation = Invocation {
        server: cli.server,
        tool: cli.tool,
        arguments,
    };
    let response = invoke::invoke(&config, invocation).await?;

    let rendered = serde_json::to_string_pretty(&response).map_err(mcp::Error::from)?;
    println!("{rendered}");
    Ok(())
}
