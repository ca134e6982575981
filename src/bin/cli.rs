//! CLI binary for voxcart.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;
use voxcart::{AppConfig, FileStore, ScriptedCapture, SearchResponse, SearchService, VOICE_TIPS};

/// voxcart: voice-driven product search.
#[derive(Parser)]
#[command(name = "voxcart", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search every provider and print the results as JSON.
    Search {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Print the search intent extracted from TEXT as JSON.
    Intent {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Run one scripted voice capture and search its transcript.
    Voice {
        /// Simulate a denied microphone permission.
        #[arg(long)]
        denied: bool,
    },

    /// Print example voice commands.
    Tips,

    /// Show or clear recent searches.
    History {
        #[arg(long)]
        clear: bool,
    },

    /// Read one query per line from stdin until EOF.
    Interactive,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean JSON.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("voxcart=info,voxcart_search=info")),
        )
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(AppConfig::default_config_path);
    let config = AppConfig::load_or_default(&config_path)?;

    match cli.command {
        Command::Search { text } => {
            let service = build_service(&config)?;
            run_search(&service, &text.join(" ")).await
        }
        Command::Intent { text } => {
            let intent = voxcart::voxcart_search::extract(&text.join(" "));
            print_json(&intent)
        }
        Command::Voice { denied } => {
            let service = build_service(&config)?;
            let mut capture = if denied {
                ScriptedCapture::denied()
            } else {
                ScriptedCapture::default()
            };
            let response = service.search_voice(&mut capture).await;
            print_json(&response)
        }
        Command::Tips => {
            println!("Try saying:");
            for tip in VOICE_TIPS {
                println!("  \"{tip}\"");
            }
            Ok(())
        }
        Command::History { clear } => {
            let service = build_service(&config)?;
            if clear {
                service.history().clear()?;
            }
            print_json(&service.history().list())
        }
        Command::Interactive => {
            let service = build_service(&config)?;
            run_interactive(&service).await
        }
    }
}

fn build_service(config: &AppConfig) -> anyhow::Result<SearchService> {
    let store = Arc::new(FileStore::new(AppConfig::default_history_path()));
    Ok(SearchService::new(config, store)?)
}

/// Cancels its token on Ctrl+C until dropped.
struct CtrlCGuard {
    cancel: CancellationToken,
    listener: tokio::task::JoinHandle<()>,
}

impl CtrlCGuard {
    fn install() -> Self {
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();
        let listener = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("received Ctrl+C, cancelling search...");
                cancel_clone.cancel();
            }
        });
        Self { cancel, listener }
    }
}

impl Drop for CtrlCGuard {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

async fn run_search(service: &SearchService, text: &str) -> anyhow::Result<()> {
    let guard = CtrlCGuard::install();
    match service.search_cancellable(text, &guard.cancel).await {
        Some(response) => print_json(&response),
        None => {
            eprintln!("Search cancelled.");
            Ok(())
        }
    }
}

async fn run_interactive(service: &SearchService) -> anyhow::Result<()> {
    eprintln!("voxcart v{}. One query per line, Ctrl+D to quit.", env!("CARGO_PKG_VERSION"));
    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        eprint!("> ");
        std::io::stderr().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let guard = CtrlCGuard::install();
        match service.search_cancellable(line.trim(), &guard.cancel).await {
            Some(response) => print_summary(&response),
            None => eprintln!("Search cancelled."),
        }
    }
    Ok(())
}

fn print_summary(response: &SearchResponse) {
    if let Some(ref error) = response.error {
        println!("{error}");
        return;
    }
    for (source, total) in response.summary() {
        println!("{source}: {total} results");
    }
    for product in response.products() {
        println!(
            "  {:>10.2} {}  {}  [{}]",
            product.price, product.currency, product.title, product.source
        );
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
