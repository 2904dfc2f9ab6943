use std::io::{self, BufRead, Write};

use clap::Parser;
use client::{
    app::Flow,
    command::{Command, HELP},
    prompt::TerminalPrompter,
    CatalogApi, CatalogApp,
};
use tracing::error;

/// Terminal page for the product catalog.
#[derive(Debug, Parser)]
#[command(name = "client", version, about)]
struct Args {
    /// Catalog service base URL; defaults to `[client] base_url` in config.toml
    #[arg(long, env = "CATALOG_API_URL")]
    base_url: Option<String>,
}

fn read_line() -> Option<String> {
    print!("> ");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    // stdout belongs to the page
    common::utils::logging::init_logging_stderr("warn");

    let args = Args::parse();
    let base_url = match args.base_url {
        Some(url) => url,
        None => {
            let mut cfg = configs::load_default().unwrap_or_else(|_| configs::AppConfig::from_env());
            cfg.client.normalize_from_env();
            cfg.client.base_url
        }
    };

    let api = CatalogApi::new(base_url)?;
    let mut app = CatalogApp::new(api, TerminalPrompter);
    if let Err(e) = app.refresh().await {
        error!(error = %e, "initial load failed");
    }
    println!("{}", app.render());
    println!("{HELP}");

    while let Some(line) = read_line() {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                if app.dispatch(command).await == Flow::Quit {
                    break;
                }
                println!("{}", app.render());
            }
            Err(e) => println!("! {e} (type `help`)"),
        }
    }
    Ok(())
}
