//! Relays Sentry alert webhooks to chat platforms.
//!
//! For a high-level introduction see the project README.
//!
//! Alerts can be posted to [Slack][slack] and to a [Discord][discord] webhook,
//! whichever are configured. See [config] for the available settings.

use config::{Config, LogFormat};
use dotenvy::dotenv;
use error::StartupError;
use filter::ExclusionFilter;
use notifier::Notifier;
use router::Deps;
use slack::{api::API_BASE, SlackClient};
use std::{process::ExitCode, sync::Arc};
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod de;
mod discord;
mod error;
mod filter;
mod notifier;
mod router;
mod sentry;
mod slack;

/// How the server came to stop.
enum Shutdown {
    Graceful,
    Forced,
}

/// Application entrypoint. Initialises tracing, loads config, verifies the
/// configured platforms, and starts the server.
#[tokio::main]
async fn main() -> ExitCode {
    let has_dotenv = dotenv().is_ok();

    init_tracing(LogFormat::from_env());

    if !has_dotenv {
        warn!("No .env found");
    }

    match run().await {
        Ok(Shutdown::Graceful) => ExitCode::SUCCESS,
        Ok(Shutdown::Forced) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.compact().init(),
    }
}

async fn run() -> Result<Shutdown, StartupError> {
    let cfg = Config::from_env()?;
    info!(
        addr = %cfg.addr,
        grace_period = ?cfg.grace_period,
        slack = cfg.slack_token.is_some(),
        discord = cfg.discord_webhook_url.is_some(),
        excluded_fields = ?cfg.excluded_fields,
        "Config loaded"
    );

    let deps = build_deps(&cfg, API_BASE).await?;

    let listener = TcpListener::bind(&cfg.addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: cfg.addr.clone(),
            source,
        })?;
    info!("Listening on {}", cfg.addr);

    let (tx, rx) = oneshot::channel::<()>();
    let srv = server(listener, deps, rx);
    tokio::pin!(srv);

    tokio::select! {
        res = &mut srv => return res.map(|_| Shutdown::Graceful).map_err(StartupError::Serve),
        _ = shutdown_signal() => {}
    }

    info!("Shutting down. Kill again to force");
    let _ = tx.send(());

    tokio::select! {
        res = &mut srv => res.map(|_| Shutdown::Graceful).map_err(StartupError::Serve),
        _ = tokio::time::sleep(cfg.grace_period) => {
            warn!("Grace period elapsed, forcing shutdown");
            Ok(Shutdown::Forced)
        }
        _ = shutdown_signal() => {
            warn!("Forced shutdown");
            Ok(Shutdown::Forced)
        }
    }
}

/// Compile the exclusion filter and build a notifier for each configured
/// platform, checking that each is reachable with the credentials given.
async fn build_deps(cfg: &Config, slack_api_base: &str) -> Result<Deps, StartupError> {
    let filter = ExclusionFilter::new(&cfg.excluded_fields)?;
    info!("Compiled {} excluded field patterns", filter.len());

    let http = reqwest::Client::builder()
        .timeout(cfg.outbound_timeout)
        .build()
        .map_err(StartupError::HttpClient)?;

    let mut notifiers = Vec::new();

    if let Some(token) = &cfg.slack_token {
        let client = SlackClient::new(slack_api_base.to_owned(), token.clone(), http.clone());
        let id = client.auth_test().await.map_err(StartupError::SlackAuth)?;
        info!(team = %id.team, user = %id.user, "Slack token verified");

        notifiers.push(Notifier::Slack(client));
    }

    if let Some(url) = &cfg.discord_webhook_url {
        let client = discord::DiscordClient::new(url.clone(), http.clone());
        client.probe().await.map_err(StartupError::DiscordProbe)?;
        info!("Discord webhook verified");

        notifiers.push(Notifier::Discord(client));
    }

    if notifiers.is_empty() {
        warn!("Neither Slack nor Discord is configured, alerts will be dropped");
    }

    Ok(Deps {
        notifiers: notifiers.into(),
        filter: Arc::new(filter),
    })
}

/// Serve on `listener` until `rx` resolves, then wait for in-flight requests.
async fn server(
    listener: TcpListener,
    deps: Deps,
    rx: oneshot::Receiver<()>,
) -> std::io::Result<()> {
    axum::serve(listener, router::new(deps))
        .with_graceful_shutdown(async {
            rx.await.ok();
        })
        .await
}

/// Resolves on the first SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Could not listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Could not listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
