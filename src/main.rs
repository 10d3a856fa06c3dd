use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use logshell::Theme;
use logshell::core::action::{Action, update};
use logshell::core::config::{CliOverrides, load_config, resolve};
use logshell::core::state::App;
use logshell::core::storage::{self, LocalStorage};
use logshell::site::site_fetcher;

#[derive(Parser)]
#[command(name = "logshell", about = "Terminal front-end for a static blog")]
struct Args {
    /// Site to browse: a base URL or a built site directory
    #[arg(long)]
    site: Option<String>,

    /// Render all text immediately, without the typing animation
    #[arg(long)]
    reduced_motion: bool,

    /// Switch to this theme and remember it
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Log file path
    #[arg(long, default_value = "logshell.log")]
    log_file: PathBuf,

    /// Log at info level instead of debug
    #[arg(short, long)]
    quiet: bool,
}

fn open_storage() -> LocalStorage {
    let Some(path) = storage::default_path() else {
        warn!("Could not determine home directory, preferences will not persist");
        return LocalStorage::in_memory();
    };
    match LocalStorage::open(path) {
        Ok(storage) => storage,
        Err(e) => {
            warn!("Failed to open preference storage: {}", e);
            LocalStorage::in_memory()
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger only: the terminal belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = if args.quiet {
        LevelFilter::Info
    } else {
        LevelFilter::Debug
    };
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            warn!("Config error: {}", e);
            eprintln!("logshell: {e}; using defaults");
            Default::default()
        }
    };
    let resolved = resolve(
        &config,
        &CliOverrides {
            site: args.site,
            reduced_motion: args.reduced_motion,
        },
    );
    info!(
        "logshell starting: site={} theme={} reduced_motion={}",
        resolved.base_url, resolved.theme, resolved.reduced_motion
    );

    let fetcher = site_fetcher(&resolved.base_url);
    let mut app = App::from_config(&resolved, open_storage());
    if let Some(theme) = args.theme {
        update(&mut app, Action::SwitchTheme(theme));
    }

    logshell::tui::run(app, fetcher)
}
