//! Container healthcheck client.
//!
//! Used when the binary is invoked as `healthcheck`: queries the HTTP
//! `/health` endpoint and reports the result as a process exit code.

use std::time::Duration;

use anyhow::Context;
use http_body_util::Empty;
use hyper::body::Bytes;

/// Probe the service and return the process exit code (0 healthy, 1 not).
///
/// Uses `HEALTHCHECK_URL` when set; otherwise tries IPv6 then IPv4
/// loopback on `HTTP_PORT` (default 3000).
pub async fn run_healthcheck() -> i32 {
    if let Ok(url) = std::env::var("HEALTHCHECK_URL") {
        return match tokio::time::timeout(Duration::from_secs(5), check_http_health(&url)).await {
            Ok(Ok(())) => {
                eprintln!("healthcheck: service is healthy");
                0
            }
            Ok(Err(e)) => {
                eprintln!("healthcheck: health check failed: {}", e);
                1
            }
            Err(_) => {
                eprintln!("healthcheck: timeout connecting to service");
                1
            }
        };
    }

    let port = std::env::var("HTTP_PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(3000);

    for url in loopback_health_urls(port) {
        if let Ok(Ok(())) =
            tokio::time::timeout(Duration::from_secs(2), check_http_health(&url)).await
        {
            eprintln!("healthcheck: service is healthy (via {})", url);
            return 0;
        }
    }

    eprintln!("healthcheck: failed to connect via IPv4 or IPv6");
    1
}

/// Health URLs on IPv6 and IPv4 loopback, in the order they are tried.
pub fn loopback_health_urls(port: u16) -> [String; 2] {
    [
        format!("http://[::1]:{}/health", port),
        format!("http://127.0.0.1:{}/health", port),
    ]
}

/// GET the health endpoint and require a 2xx status.
pub async fn check_http_health(url: &str) -> anyhow::Result<()> {
    let client: hyper_util::client::legacy::Client<_, Empty<Bytes>> =
        hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
            .build_http();

    let uri: hyper::Uri = url.parse().context("invalid healthcheck URL")?;
    let response = client.get(uri).await?;

    if response.status().is_success() {
        Ok(())
    } else {
        anyhow::bail!("service not serving (status {})", response.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::{CompanyRepository, CompanyResult, MockCompanyRepository};
    use crate::error::ServiceError;
    use crate::http::{router, AppState};
    use async_trait::async_trait;
    use serial_test::serial;
    use std::sync::Arc;

    struct UnreadyRepository;

    #[async_trait]
    impl CompanyRepository for UnreadyRepository {
        async fn search(
            &self,
            _query: &str,
            _limit: usize,
        ) -> Result<Vec<CompanyResult>, ServiceError> {
            Ok(Vec::new())
        }

        fn company_count(&self) -> usize {
            0
        }

        fn source(&self) -> &str {
            "unready://"
        }

        fn is_ready(&self) -> bool {
            false
        }
    }

    async fn spawn_server(repository: Arc<dyn CompanyRepository>) -> (u16, tokio::task::JoinHandle<()>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let app = router(AppState::new(repository), &[]);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (port, handle)
    }

    fn unused_port() -> u16 {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    #[tokio::test]
    async fn test_check_healthy_service() {
        let (port, server) = spawn_server(Arc::new(MockCompanyRepository::new())).await;

        let result = check_http_health(&format!("http://127.0.0.1:{}/health", port)).await;
        assert!(result.is_ok());

        server.abort();
    }

    #[tokio::test]
    async fn test_check_unready_service() {
        let (port, server) = spawn_server(Arc::new(UnreadyRepository)).await;

        let result = check_http_health(&format!("http://127.0.0.1:{}/health", port)).await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("503"));

        server.abort();
    }

    #[tokio::test]
    async fn test_check_unavailable_service() {
        let port = unused_port();

        let result = check_http_health(&format!("http://127.0.0.1:{}/health", port)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_check_invalid_url() {
        assert!(check_http_health("not a url").await.is_err());
    }

    #[test]
    fn test_loopback_health_urls() {
        let urls = loopback_health_urls(3000);
        assert_eq!(urls[0], "http://[::1]:3000/health");
        assert_eq!(urls[1], "http://127.0.0.1:3000/health");
    }

    #[tokio::test]
    #[serial]
    async fn test_run_healthcheck_exit_codes() {
        let (port, server) = spawn_server(Arc::new(MockCompanyRepository::new())).await;

        std::env::set_var("HEALTHCHECK_URL", format!("http://127.0.0.1:{}/health", port));
        assert_eq!(run_healthcheck().await, 0);

        std::env::set_var("HEALTHCHECK_URL", format!("http://127.0.0.1:{}/health", unused_port()));
        assert_eq!(run_healthcheck().await, 1);

        std::env::remove_var("HEALTHCHECK_URL");
        server.abort();
    }
}
