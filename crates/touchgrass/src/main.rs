use std::io::Write;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tg_config::AppConfig;
use tg_nav::{NavigationController, Route};
use tg_store::{FileStore, MemoryStore, SharedStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use touchgrass::render::render_view;
use touchgrass::shell::{execute, parse_line, Outcome};

#[derive(Parser)]
#[command(
    name = "touchgrass",
    version = touchgrass::VERSION,
    about = "Project and agent workspace shell"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session
    Shell {
        /// Keep everything in memory instead of the store file
        #[arg(long)]
        in_memory: bool,
    },
    /// Print version
    Version,
}

fn open_store(config: &AppConfig, in_memory: bool) -> anyhow::Result<SharedStore> {
    let capacity = config.store.capacity_bytes;
    if in_memory {
        return Ok(Arc::new(MemoryStore::with_capacity(capacity)));
    }
    let paths = config.paths()?;
    paths.ensure_config_dir()?;
    let path = paths.store_path(&config.store.file_name);
    tracing::info!(path = %path.display(), "Using store file");
    Ok(Arc::new(FileStore::open(path, capacity)))
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

async fn run_shell(config: AppConfig, in_memory: bool) -> anyhow::Result<()> {
    let store = open_store(&config, in_memory)?;
    let mut nav = NavigationController::from_config(store, &config);
    let view = nav.navigate(Route::Root);
    println!("{}", render_view(&view, nav.theme()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!();
                tracing::info!("Interrupted");
                break;
            }
        };
        let Some(line) = line else {
            break;
        };

        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(command)) => match execute(&mut nav, command) {
                Outcome::Continue(text) => {
                    if !text.is_empty() {
                        println!("{text}");
                    }
                }
                Outcome::Quit => break,
            },
            Err(e) => {
                let _ = e.print();
            }
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let in_memory = match cli.command {
        Commands::Shell { in_memory } => in_memory,
        Commands::Version => {
            println!("touchgrass {}", touchgrass::VERSION);
            return Ok(());
        }
    };

    let loaded = AppConfig::load();
    let fallback = loaded
        .as_ref()
        .ok()
        .and_then(|config| config.log_filter.clone())
        .unwrap_or_else(|| touchgrass::DEFAULT_LOG_FILTER.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = touchgrass::shell_config(loaded, in_memory)?;
    run_shell(config, in_memory).await
}
