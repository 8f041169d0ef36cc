mod config;
mod terminal_output;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use media::{fetch_image, load_image};
use packlens_core::Credential;
use packlens_extractor::{verify_credential, Extractor, OpenAiTransport};

use config::Config;
use terminal_output::{note_error, note_info, note_success, render_record};

#[derive(Parser)]
#[command(name = "packlens")]
#[command(about = "PackLens - structured feature extraction from vape/cannabis package photos")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract product features from a package photo
    Extract {
        /// Path to a local image file
        image: Option<PathBuf>,
        /// Fetch the image from a URL instead (Google Drive share links work)
        #[arg(long, conflicts_with = "image")]
        url: Option<String>,
        /// API key; prompted on stdin when omitted
        #[arg(long)]
        api_key: Option<String>,
        /// Override the configured model
        #[arg(long)]
        model: Option<String>,
        /// Override the request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Write the extracted record as pretty JSON to this file
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print raw JSON instead of the feature table
        #[arg(long)]
        json: bool,
    },
    /// Probe whether an API key is accepted by the upstream
    Keycheck {
        /// API key; prompted on stdin when omitted
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init_logger(
        config.log_dir.as_deref().map(std::path::Path::new),
        &config.log_level,
    );

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract {
            image,
            url,
            api_key,
            model,
            timeout_secs,
            out,
            json,
        } => {
            run_extract(&config, image, url, api_key, model, timeout_secs, out, json).await
        }
        Commands::Keycheck { api_key } => run_keycheck(&config, api_key).await,
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_extract(
    config: &Config,
    image: Option<PathBuf>,
    url: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
    out: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let payload = match (image, url) {
        (Some(path), None) => load_image(&path)?,
        (None, Some(url)) => {
            let client = reqwest::Client::new();
            fetch_image(&client, &url).await?
        }
        _ => bail!("provide exactly one image source: a file path or --url"),
    };

    let credential = read_credential(api_key)?;
    let transport = Arc::new(OpenAiTransport::new().with_base_url(&config.base_url));
    let extractor = Extractor::new(transport)
        .with_model(model.unwrap_or_else(|| config.model.clone()))
        .with_timeout(Duration::from_secs(timeout_secs.unwrap_or(config.timeout_secs)));

    match extractor.extract(&payload, &credential).await {
        Ok(record) => {
            let pretty = serde_json::to_string_pretty(&record)?;
            if json {
                println!("{pretty}");
            } else {
                note_success("extraction complete");
                print!("{}", render_record(&record));
            }
            if let Some(path) = out {
                std::fs::write(&path, &pretty)?;
                note_info(&format!("record written to {}", path.display()));
            }
            Ok(())
        }
        Err(err) => {
            note_error(&err.to_string());
            std::process::exit(1);
        }
    }
}

async fn run_keycheck(config: &Config, api_key: Option<String>) -> Result<()> {
    let credential = read_credential(api_key)?;
    let transport = OpenAiTransport::new().with_base_url(&config.base_url);

    match verify_credential(&transport, &credential).await {
        Ok(()) => {
            note_success("API key looks valid");
            Ok(())
        }
        Err(err) => {
            note_error(&err.to_string());
            std::process::exit(1);
        }
    }
}

/// Take the key from the flag or prompt for it. It is used for this one
/// invocation and never stored anywhere.
fn read_credential(flag: Option<String>) -> Result<Credential> {
    let key = match flag {
        Some(key) => key,
        None => {
            eprint!("API key: ");
            io::stderr().flush()?;
            let mut line = String::new();
            io::stdin().read_line(&mut line)?;
            line.trim().to_string()
        }
    };
    Ok(Credential::new(key))
}
