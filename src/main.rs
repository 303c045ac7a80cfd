//! mcp-bridge binary entry point.

use std::io::Write;

use mcp_bridge::cli::{run_repl, Cli, ReadlineSource};
use mcp_bridge::error::BridgeError;
use mcp_bridge::mcp::{McpClient, StdioTransport};
use mcp_bridge::orchestrator::Orchestrator;
use mcp_bridge::provider::create_provider;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())))
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.resolve_config()?;
    tracing::debug!(?config, "resolved configuration");
    let model = create_provider(&config)?;

    let client = McpClient::connect(StdioTransport::for_script(&cli.server_script)).await?;
    let orchestrator = Orchestrator::new(model, client);

    let outcome = session(&orchestrator).await;

    let (_, mut client) = orchestrator.into_parts();
    finish(outcome, client.close().await)
}

/// The session's own error wins over a failed shutdown, which is only logged.
fn finish(
    outcome: Result<(), Box<dyn std::error::Error>>,
    closed: Result<(), BridgeError>,
) -> Result<(), Box<dyn std::error::Error>> {
    match (outcome, closed) {
        (Err(e), Err(close_err)) => {
            tracing::warn!(error = %close_err, "failed to close MCP session");
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), closed) => closed.map_err(Into::into),
    }
}

async fn session(
    orchestrator: &Orchestrator<Box<dyn mcp_bridge::provider::ChatModel>, McpClient>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tools = orchestrator.tool_server().tool_names().await?;
    let mut stdout = std::io::stdout();
    writeln!(stdout, "\nConnected to server with tools: {tools:?}")?;

    let mut source = ReadlineSource::new()?;
    let answered = run_repl(orchestrator, &mut source, &mut stdout).await?;
    tracing::info!(answered, "session finished");
    Ok(())
}
