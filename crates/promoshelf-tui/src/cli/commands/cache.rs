//! Offline cache worker commands

use anyhow::{Context, Result};
use clap::Subcommand;
use promoshelf_core::net::{Method, Network, Request};
use promoshelf_core::worker::{ServiceWorker, WorkerState};
use promoshelf_core::Config;
use serde::Serialize;

use crate::cli::output::{format_size, print_formatted, OutputFormat};
use crate::site;

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Cache the app shell and activate the worker
    Install,

    /// Purge caches left by older versions
    Activate,

    /// Fetch a site path through the worker
    Fetch {
        /// Path below the site root, e.g. /styles.css
        path: String,

        /// Treat as a page navigation (gets the offline page on failure)
        #[arg(long)]
        navigate: bool,

        /// Treat as an image request
        #[arg(long)]
        image: bool,

        /// HTTP method
        #[arg(long, default_value = "GET")]
        method: String,

        /// Print the response body
        #[arg(long)]
        body: bool,
    },

    /// Show worker state and cached entries
    Status,
}

#[derive(Serialize)]
struct FetchResult {
    url: String,
    status: u16,
    content_type: Option<String>,
    size_bytes: usize,
}

#[derive(Serialize)]
struct CacheStatus {
    state: String,
    caches: Vec<CacheSummary>,
}

#[derive(Serialize)]
struct CacheSummary {
    name: String,
    entries: Vec<EntrySummary>,
}

#[derive(Serialize)]
struct EntrySummary {
    url: String,
    status: u16,
    size_bytes: usize,
    cached_at: String,
    age: String,
}

pub async fn run(command: CacheCommands, config: &Config, format: OutputFormat) -> Result<()> {
    let site = site::connect(config)?;
    let mut worker = site::open_worker(config, &site)?;

    match command {
        CacheCommands::Install => {
            worker.install().await.context("Install failed")?;
            let deleted = worker.activate()?;
            print_formatted(&deleted, format, |deleted| {
                format!(
                    "Cached {} shell assets; removed {} old caches",
                    worker.config().shell_assets.len(),
                    deleted.len()
                )
            });
        }
        CacheCommands::Activate => {
            let deleted = worker.activate()?;
            print_formatted(&deleted, format, |deleted| {
                if deleted.is_empty() {
                    "No old caches".to_string()
                } else {
                    format!("Removed: {}", deleted.join(", "))
                }
            });
        }
        CacheCommands::Fetch { path, navigate, image, method, body } => {
            let request = build_request(&worker, &path, navigate, image, &method)?;
            let response = worker.fetch(&request).await?;
            worker.settle().await;

            let result = FetchResult {
                url: request.url.to_string(),
                status: response.status,
                content_type: response.content_type.clone(),
                size_bytes: response.body.len(),
            };
            print_formatted(&result, format, |r| {
                format!(
                    "{} {} {} ({})",
                    r.status,
                    r.content_type.as_deref().unwrap_or("-"),
                    format_size(r.size_bytes as u64),
                    r.url
                )
            });
            if body {
                println!("{}", response.text());
            }
        }
        CacheCommands::Status => {
            let status = status(&worker);
            print_formatted(&status, format, format_status);
        }
    }
    Ok(())
}

fn build_request<N: Network>(
    worker: &ServiceWorker<N>,
    path: &str,
    navigate: bool,
    image: bool,
    method: &str,
) -> Result<Request> {
    let url = worker.asset_url(path)?;
    let request = if navigate {
        Request::navigate(url)
    } else if image {
        Request::image(url)
    } else {
        Request::get(url)
    };
    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("Invalid method: {}", method))?;
    Ok(request.with_method(method))
}

fn status<N: Network>(worker: &ServiceWorker<N>) -> CacheStatus {
    let caches = worker.caches();
    CacheStatus {
        state: state_name(worker.state()).to_string(),
        caches: caches
            .keys()
            .into_iter()
            .map(|name| CacheSummary {
                entries: caches
                    .entries(&name)
                    .into_iter()
                    .map(|e| EntrySummary {
                        age: e.age_display(),
                        url: e.key,
                        status: e.response.status,
                        size_bytes: e.response.body.len(),
                        cached_at: e.cached_at.to_rfc3339(),
                    })
                    .collect(),
                name,
            })
            .collect(),
    }
}

fn state_name(state: WorkerState) -> &'static str {
    match state {
        WorkerState::NotInstalled => "not installed",
        WorkerState::Installed => "installed",
        WorkerState::Activated => "activated",
        WorkerState::Serving => "serving",
    }
}

fn format_status(status: &CacheStatus) -> String {
    let mut out = format!("Worker: {}\n", status.state);
    if status.caches.is_empty() {
        out.push_str("No caches\n");
    }
    for cache in &status.caches {
        out.push_str(&format!("\n{} ({} entries)\n", cache.name, cache.entries.len()));
        for entry in &cache.entries {
            out.push_str(&format!(
                "  {:>3}  {:>9}  {:<9} {}\n",
                entry.status,
                format_size(entry.size_bytes as u64),
                entry.age,
                entry.url
            ));
        }
    }
    out.trim_end().to_string()
}
