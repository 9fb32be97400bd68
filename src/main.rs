use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use nostos::config::AppConfig;
use nostos::geo::GeoFilter;
use nostos::import::{run_import, ImportOptions};
use nostos::photo::{GeoPoint, Privacy};
use nostos::store::PhotoStore;
use nostos::store_clients::open_store;
use nostos::web_server;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "nostos", about = "Browse geotagged photographs on a map")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve,
    /// Import geotagged photos from a directory
    Import {
        directory: PathBuf,
        #[arg(long)]
        owner: String,
        #[arg(long)]
        private: bool,
    },
    /// Print public photos near a point as JSON
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long)]
        radius_km: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::new()?;

    env_logger::Builder::new()
        .filter_level(config.log_level.parse().unwrap_or(log::LevelFilter::Info))
        .init();

    info!("Starting nostos");

    let store = open_store(&config)?;

    match cli.command {
        Command::Serve => {
            if let Err(e) = web_server::start_web_server(Arc::new(config), store).await {
                log::error!("Web server error: {}", e);
            }
        }
        Command::Import { directory, owner, private } => {
            let options = ImportOptions {
                owner,
                privacy: if private { Privacy::Private } else { Privacy::Public },
                media_base_url: config.import.media_base_url.clone(),
            };
            let stored = run_import(directory, config.import.allowed_extensions.clone(), options, store).await?;
            info!("Imported {} photos", stored);
        }
        Command::Nearby { lat, lon, radius_km } => {
            let reference = GeoPoint::new(lat, lon)?;
            let radius_km = radius_km.unwrap_or(config.geo.default_radius_km);
            let limit = config.geo.candidate_limit;
            let candidates = store.fetch_public_photos_ordered_by_upload_desc(limit).await?;
            let photos = GeoFilter::new(limit).filter_nearby(reference, &candidates, radius_km)?;
            println!("{}", serde_json::to_string_pretty(&photos)?);
        }
    }

    info!("nostos finished");

    Ok(())
}
