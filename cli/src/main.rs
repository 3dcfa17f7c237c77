mod client;
mod transfer;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use mapview::csv::{ExportError, ImportError};
use mapview::hotspot::DecodeError;
use mapview::map::MapId;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::client::ApiClient;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {message}")]
    Server { status: u16, message: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "mappinner", about = "Image hotspot map service CLI")]
struct Cli {
    #[arg(long, env = "MAPPINNER_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Log requests and responses to stderr.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the service is up.
    Ping,
    /// List maps, newest first.
    List,
    /// Print one map as JSON.
    Show { id: MapId },
    /// Delete one map.
    Delete { id: MapId },
    /// Create a map, or update it when `--id` is given.
    Save {
        #[arg(long)]
        id: Option<MapId>,
        #[arg(long)]
        title: String,
        #[arg(long)]
        image_url: String,
        #[arg(long, help = "JSON file holding the hotspot list; updates keep the stored list without it")]
        hotspots: Option<PathBuf>,
    },
    /// Write the active hotspots of a map to `hotspots_<timestamp>.csv`.
    Export {
        id: MapId,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Replace the hotspots of a map with the rows of a CSV file.
    Import { id: MapId, file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let client = ApiClient::new(&cli.base_url);
    run(&client, cli.command).await
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "mappinner_cli=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(client: &ApiClient, command: Command) -> Result<(), CliError> {
    match command {
        Command::Ping => {
            client.health().await?;
            println!("ok");
        }
        Command::List => {
            for map in client.list_maps().await? {
                println!("{}\t{}\t{} hotspots\t{}", map.id, map.title, map.hotspot_count, map.image_url);
            }
        }
        Command::Show { id } => {
            let record = client.get_map(id).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Command::Delete { id } => {
            client.delete_map(id).await?;
            println!("deleted {id}");
        }
        Command::Save { id, title, image_url, hotspots } => {
            // an update without a file keeps the stored hotspots
            let existing = match (id, &hotspots) {
                (Some(id), None) => Some(client.get_map(id).await?),
                _ => None,
            };
            let req = transfer::save_request(id, title, image_url, hotspots.as_deref(), existing.as_ref())?;
            let saved = client.save_map(&req).await?;
            println!("{}", saved.id);
        }
        Command::Export { id, out } => {
            let model = client.get_map(id).await?.hotspot_model()?;
            let csv = match model.to_csv() {
                Ok(csv) => csv,
                Err(ExportError::NothingToExport) => {
                    println!("nothing to export");
                    return Ok(());
                }
            };
            let path = transfer::export_path(&out, now_ms());
            std::fs::write(&path, csv)?;
            info!(%id, path = %path.display(), "exported");
            println!("{}", path.display());
        }
        Command::Import { id, file } => {
            let text = std::fs::read_to_string(&file)?;
            let record = client.get_map(id).await?;
            let req = transfer::import_request(&record, &text)?;
            let saved = client.save_map(&req).await?;
            info!(id = %saved.id, file = %file.display(), "imported");
            println!("imported into {}", saved.id);
        }
    }
    Ok(())
}

fn now_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_millis())
}
