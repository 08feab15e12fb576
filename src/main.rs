use anyhow::Result;
use clap::{Parser, ValueEnum};
use redisctl::config::Config;
use redisctl::process::{select_inspector, InspectorBackend, ServiceController};
use redisctl::repl;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "redisctl")]
#[command(about = "Interactive lifecycle controller for a local redis-server", long_about = None)]
struct Args {
    /// Path to the service executable (overrides config)
    #[arg(long)]
    exec: Option<PathBuf>,

    /// Process image name to match (overrides config)
    #[arg(long)]
    process_name: Option<String>,

    /// Process table backend (overrides config)
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    Native,
    Pgrep,
}

impl From<BackendArg> for InspectorBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Native => InspectorBackend::Native,
            BackendArg::Pgrep => InspectorBackend::Pgrep,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the interactive protocol
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = Config::load();

    // CLI flags override the config file
    let mut identity = config.identity();
    if let Some(exec) = args.exec {
        identity.executable = exec;
    }
    if let Some(process_name) = args.process_name {
        identity.process_name = process_name;
    }

    let backend = args
        .backend
        .map(InspectorBackend::from)
        .unwrap_or(config.inspector);
    let inspector = select_inspector(backend)?;

    let mut controller = ServiceController::new(identity, inspector);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let result = repl::run_loop(stdin.lock(), &mut stdout, &mut controller);

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}
