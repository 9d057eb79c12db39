//! graphmind: terminal chat client for the GraphMind QA backend.
//! With a question argument, asks once and exits; otherwise reads one question
//! per line from stdin and prints the conversation to stdout.

use std::error::Error;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use graphmind_client::config::{self, CONFIG_ENV};
use graphmind_client::{chat_box, session, Client, RenderOptions, SessionOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "graphmind",
    version,
    about = "Ask the GraphMind backend questions about MetaKGP"
)]
struct Cli {
    /// Config file (default: ~/.graphmind/config.yaml).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Backend base URL; overrides the config file.
    #[arg(long)]
    backend_url: Option<String>,
    /// Print source URLs as plain text even on a terminal.
    #[arg(long)]
    no_hyperlinks: bool,
    /// Ask this question and exit instead of starting a session.
    question: Vec<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let env_path = std::env::var(CONFIG_ENV).ok();
    let source = config::resolve_config_source(cli.config.as_deref(), env_path.as_deref());
    let cfg = config::load_from(&source)?;

    let backend_url = cli
        .backend_url
        .as_deref()
        .unwrap_or_else(|| cfg.backend_url());
    let client = Client::new(backend_url);
    info!(config = ?source, endpoint = %client.endpoint(), "starting graphmind");

    let stdout = io::stdout();
    let render = RenderOptions {
        hyperlinks: !cli.no_hyperlinks && cfg.hyperlinks_enabled() && stdout.is_terminal(),
    };

    if !cli.question.is_empty() {
        let question = cli.question.join(" ");
        let mut out = stdout.lock();
        let result = session::ask_once(&client, &question, &mut out, &render).await?;
        if result.transcript.is_empty() || result.answered {
            return Ok(ExitCode::SUCCESS);
        }
        return Ok(ExitCode::FAILURE);
    }

    let interactive = io::stdin().is_terminal();
    let mut out = stdout.lock();
    if interactive && cfg.banner_enabled() {
        chat_box::banner(&mut out)?;
    }
    out.flush()?;

    let opts = SessionOptions {
        render,
        prompt: interactive,
    };
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    session::run(Arc::new(client), input, &mut out, opts).await?;
    Ok(ExitCode::SUCCESS)
}
