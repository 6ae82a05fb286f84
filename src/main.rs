//! Company search service.
//!
//! Serves `GET /api/companies?q=<term>` over a company repository loaded
//! from a JSON file (or the built-in sample data).
//!
//! # Environment Variables
//! - `COMPANY_DATA_PATH` - Path to the company JSON file (required unless MOCK_COMPANIES=true)
//! - `HTTP_PORT` - HTTP listen port (default: 3000)
//! - `METRICS_PORT` - Prometheus metrics port (default: 9090)
//! - `BIND_ADDRESS` - Bind address (default: auto)
//! - `ALLOWED_ORIGINS` - Comma-separated CORS origins (default: none)
//! - `MOCK_COMPANIES` - Use sample companies for testing (default: false)
//! - `HEALTHCHECK_URL` - Health URL queried in healthcheck mode
//! - `RUST_LOG` - Log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use company_search::company::{CompanyRepository, FileCompanyRepository, MockCompanyRepository};
use company_search::config::Config;
use company_search::healthcheck::run_healthcheck;
use company_search::http::{router, AppState};
use company_search::metrics;

/// Bind the HTTP listener, probing for dual-stack support when set to auto.
async fn bind_listener(config: &Config) -> anyhow::Result<TcpListener> {
    if let Some(addr) = config.explicit_socket_addr(config.http_port)? {
        return TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {}", addr));
    }

    let dual_stack = SocketAddr::from((std::net::Ipv6Addr::UNSPECIFIED, config.http_port));
    match TcpListener::bind(dual_stack).await {
        Ok(listener) => {
            info!("Auto-detected dual-stack support, using [::]");
            Ok(listener)
        }
        Err(_) => {
            info!("IPv6 not available, falling back to IPv4 (0.0.0.0)");
            let addr = SocketAddr::from((std::net::Ipv4Addr::UNSPECIFIED, config.http_port));
            TcpListener::bind(addr)
                .await
                .with_context(|| format!("failed to bind {}", addr))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let program_name = std::env::args()
        .next()
        .and_then(|path| {
            std::path::Path::new(&path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
        })
        .unwrap_or_default();

    if program_name == "healthcheck" {
        std::process::exit(run_healthcheck().await);
    }

    let config = Config::from_env();

    let log_filter = config
        .as_ref()
        .map(Config::log_filter)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(log_filter)
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting company search service");

    let config = config.map_err(|e| {
        error!("Configuration error: {}", e);
        e
    })?;

    info!(
        http_port = config.http_port,
        metrics_port = config.metrics_port,
        mock_companies = config.mock_companies,
        log_level = %config.log_level,
        "Configuration loaded"
    );

    let metrics_handle = metrics::init_metrics().context("failed to install metrics recorder")?;

    // No silent fallback to sample data when the data file fails to load
    let repository: Arc<dyn CompanyRepository> = if config.mock_companies {
        info!("MOCK_COMPANIES=true: Using sample company repository");
        Arc::new(MockCompanyRepository::new())
    } else {
        match FileCompanyRepository::open(&config.company_data_path).await {
            Ok(repository) => {
                info!(
                    company_count = repository.company_count(),
                    "Company repository loaded successfully"
                );
                Arc::new(repository)
            }
            Err(e) => {
                error!(
                    error = %e,
                    company_data_path = %config.company_data_path,
                    "FATAL: Failed to load company data. Set MOCK_COMPANIES=true for testing."
                );
                return Err(e.into());
            }
        }
    };

    let metrics_port = config.metrics_port;
    tokio::spawn(async move {
        if let Err(e) = metrics::start_metrics_server(metrics_port, metrics_handle).await {
            error!(error = %e, "Metrics server failed");
        }
    });

    let app = router(AppState::new(repository), &config.allowed_origins);
    let listener = bind_listener(&config).await?;

    info!(addr = %listener.local_addr()?, "Starting HTTP server");

    axum::serve(listener, app).await?;

    Ok(())
}
