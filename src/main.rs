use anyhow::Context;
use comic_reposter::configuration::Settings;
use comic_reposter::models::Cli;
use comic_reposter::run::run;
use env_logger::{Builder, Env, Target};
use log::{debug, error};
use std::process;

const CONFIG_FILE: &str = "comic_reposter";

#[tokio::main]
async fn main() {
    // Init logging
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.target(Target::Stdout);
    builder.init();

    // Parse Args
    let cli = Cli::new();

    // Parse Settings
    let settings = match load_settings() {
        Ok(s) => s,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            process::exit(1);
        }
    };

    // Run
    if let Err(e) = run(settings, cli).await {
        error!("Application error: {}", e);
        process::exit(1);
    }
}

fn load_settings() -> anyhow::Result<Settings> {
    // Credentials may live in a .env file in the working directory
    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env loaded: {}", e);
    }
    Settings::new(CONFIG_FILE)
        .with_context(|| format!("loading {} settings and VK_* variables", CONFIG_FILE))
}
