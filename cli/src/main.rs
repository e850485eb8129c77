//! Satchel host binary.
//!
//! ```text
//! main() -> init_tracing() -> PackagedConfig::packaged()
//!        -> RuntimeBootstrap::run()  (exit 1 on fatal native load failure)
//!        -> print host summary
//!        -> optional: HEAD <url> through the transfer subsystem
//! ```
//!
//! Usage: `satchel [URL]`. With a URL, issues one HEAD request using the
//! transfer subsystem's HTTP client and prints the response status.

use anyhow::{Context, Result};
use std::{
    env,
    fs::{self, OpenOptions},
    path::PathBuf,
    process::ExitCode,
    sync::Mutex,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use satchel_config::PackagedConfig;
use satchel_core::{LibraryDirLoader, RuntimeBootstrap};
use satchel_trust::TransferTls;

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (log_file, init_warnings) = open_satchel_log_file();
    let log_path = log_file.as_ref().map(|(path, _)| path.clone());
    let file_layer = log_file
        .map(|(_, file)| fmt::layer().with_ansi(false).with_writer(Mutex::new(file)));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(env_filter)
        .init();

    if let Some(path) = log_path {
        tracing::info!(path = %path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
    }
}

/// Opens the first writable log file under `~/.satchel/logs`, then `./.satchel/logs`.
fn open_satchel_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let roots = dirs::home_dir()
        .into_iter()
        .chain(std::iter::once(PathBuf::from(".")));

    let mut warnings = Vec::new();
    for root in roots {
        let dir = root.join(".satchel").join("logs");
        if let Err(e) = fs::create_dir_all(&dir) {
            warnings.push(format!("Failed to create log dir {}: {e}", dir.display()));
            continue;
        }

        let path = dir.join("satchel.log");
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => return (Some((path, file)), warnings),
            Err(e) => warnings.push(format!("Failed to open log file {}: {e}", path.display())),
        }
    }

    (None, warnings)
}

/// Directory native library paths are resolved against: the executable's own.
fn native_base_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

async fn check_endpoint(tls: &TransferTls, url: &str) -> Result<()> {
    let client = tls
        .http_client()
        .context("failed to build transfer client")?;
    let response = client
        .head(url)
        .send()
        .await
        .with_context(|| format!("HEAD request to {url} failed"))?;
    println!("{} {url}", response.status());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let config = PackagedConfig::packaged().context("packaged host configuration is invalid")?;
    let bootstrap = RuntimeBootstrap::builder(config)
        .native_loader(LibraryDirLoader::new(native_base_dir()))
        .build()
        .context("failed to assemble host bootstrap")?;

    let host = match bootstrap.run() {
        Ok(host) => host,
        Err(err) if err.is_fatal() => {
            eprintln!("Error: {err}");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err).context("host bootstrap failed"),
    };

    print!("{}", host.summary());

    if let Some(url) = env::args().nth(1) {
        check_endpoint(bootstrap.transfer_tls(), &url).await?;
    }

    Ok(ExitCode::SUCCESS)
}
