use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

use tcg_browser::Language;
use tcg_browser::core::config::{self, CliOverrides};
use tcg_browser::tui;

#[derive(Parser)]
#[command(name = "tcg-browser", about = "Browse TCGdex card sets and pick cards")]
struct Args {
    /// Card database language
    #[arg(short, long, value_enum)]
    language: Option<Language>,

    /// TCGdex API base URL (without the language segment)
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {e}, using defaults");
            config::BrowserConfig::default()
        }
    };
    let cli = CliOverrides {
        language: args.language,
        base_url: args.base_url,
    };
    let resolved = config::resolve(&file_config, &cli);

    // File logger - the terminal belongs to the TUI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("tcg-browser.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "tcg-browser starting: language={}, base_url={}",
        resolved.language.code(),
        resolved.base_url
    );

    tui::run(resolved)
}
