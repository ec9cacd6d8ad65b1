use clap::Parser;
use gourmet::core::config::{self, CliOverrides};
use gourmet::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gourmet", about = "Restaurant search with local favorites")]
struct Args {
    /// Keyword for the startup search (empty searches the default keyword)
    #[arg(short, long)]
    keyword: Option<String>,

    /// Favorites file (defaults to ~/.gourmet/favorites.json)
    #[arg(long)]
    favorites: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to gourmet.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("gourmet.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Gourmet starting up");

    let cli = CliOverrides {
        keyword: args.keyword,
        favorites_path: args.favorites,
    };
    let resolved = match config::load_config().and_then(|file| config::resolve(&file, &cli)) {
        Ok(resolved) => resolved,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            eprintln!("gourmet: {e}");
            std::process::exit(2);
        }
    };

    tui::run(resolved)
}
