use std::path::PathBuf;

use santa::config::{log_level_from_env, Config};
use tracing_subscriber::EnvFilter;
use url::Url;

fn main() {
    let mut args = std::env::args().skip(1);
    let mut db_path: Option<PathBuf> = None;
    let mut entry_link: Option<Url> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--file" | "-f" => {
                db_path = args.next().map(PathBuf::from);
                if db_path.is_none() {
                    eprintln!("Error: --file requires a path argument");
                    std::process::exit(1);
                }
            }
            "--url" => {
                let raw = match args.next() {
                    Some(raw) => raw,
                    None => {
                        eprintln!("Error: --url requires a link argument");
                        std::process::exit(1);
                    }
                };
                match Url::parse(&raw) {
                    Ok(url) => entry_link = Some(url),
                    Err(e) => {
                        eprintln!("Error: invalid link '{}': {}", raw, e);
                        std::process::exit(1);
                    }
                }
            }
            "--help" | "-h" => {
                println!("Amigo Invisível - Secret Santa organizer");
                println!();
                println!("Usage: santa [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --file <PATH>   Database file path (default: .data/santa.db)");
                println!("  --url <LINK>        Open an invitation or group link on start");
                println!("  -h, --help          Show this help");
                println!();
                println!("Environment: SANTA_DB_PATH, SANTA_BASE_URL, OLLAMA_HOST, SANTA_MODEL,");
                println!("SANTA_LOG_LEVEL (RUST_LOG takes precedence). A .env file is read.");
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Use --help for usage information.");
                std::process::exit(1);
            }
        }
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level_from_env()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::from_env();
    if let Some(path) = db_path {
        config.db_path = path;
    }

    if let Some(dir) = config.db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                eprintln!("Failed to create {}: {}", dir.display(), e);
                std::process::exit(1);
            }
        }
    }

    santa::cli::run(config, entry_link);
}
