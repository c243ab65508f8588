//! The cantor binary: a local REPL, one-shot queries, or the HTTP server.

use std::io::{self, BufRead, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cantor::database::{BackendRegistry, Database};
use cantor::error::{CantorError, Result};
use cantor::persist;
use cantor::server::{self, ServerState};

/// A database engine for named sets of strings.
#[derive(Parser, Debug)]
#[command(name = "cantor", version, about)]
struct Args {
    /// Serve the HTTP interface on this address instead of running the REPL.
    #[arg(long)]
    listen: Option<SocketAddr>,

    /// Database to open in REPL or one-shot mode.
    #[arg(long, default_value = "default")]
    database: String,

    /// Directory where database files are kept.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// One-shot query; the REPL reads from stdin when omitted.
    expression: Option<String>,
}

fn main() {
    let args = Args::parse();
    init_logging();
    if let Err(e) = run(args) {
        eprintln!("ERR: {e}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    // the first subscriber wins if one was set already
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(args: Args) -> Result<()> {
    let mut registry = BackendRegistry::new();
    registry.register("sqlite", persist::sqlite_factory(args.data_dir.clone()))?;

    if let Some(addr) = args.listen {
        return serve(registry, addr);
    }

    let mut db = registry.open("sqlite", &args.database)?;
    match args.expression {
        Some(expression) => {
            let result = db.query(&expression)?;
            println!("{:?}", result.items());
        }
        None => repl(&mut db)?,
    }
    db.close()
}

fn repl(db: &mut Database) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    prompt(&mut stdout)?;
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| CantorError::Config(e.to_string()))?;
        let line = line.trim();
        if line == "quit" {
            break;
        }
        if !line.is_empty() {
            match db.query(line) {
                Ok(result) => println!("{:?}", result.items()),
                Err(e) => eprintln!("ERR: {e}"),
            }
        }
        prompt(&mut stdout)?;
    }
    Ok(())
}

fn prompt(stdout: &mut io::Stdout) -> Result<()> {
    write!(stdout, "cantor> ").map_err(|e| CantorError::Config(e.to_string()))?;
    stdout.flush().map_err(|e| CantorError::Config(e.to_string()))
}

fn serve(registry: BackendRegistry, addr: SocketAddr) -> Result<()> {
    let state = Arc::new(ServerState::new(registry, "sqlite"));
    let app = server::router(state);

    info!(%addr, "serving the HTTP interface");
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CantorError::Config(e.to_string()))?
        .block_on(async move {
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .map_err(|e| CantorError::Config(e.to_string()))?;
            axum::serve(listener, app)
                .await
                .map_err(|e| CantorError::Config(e.to_string()))
        })
}
