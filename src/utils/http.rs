use anyhow::{Context, Result};
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, warn};

use crate::config::Config;

pub fn create_client(config: &Config) -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(&config.user_agent)
        .timeout(config.request_timeout())
        .pool_max_idle_per_host(6)
        .build()?;

    Ok(client)
}

/// GET `url`, retrying transport failures only. Any HTTP status is returned
/// to the caller; error pages are parsed like any other page.
pub async fn fetch_with_retry(client: &Client, url: &str, max_attempts: u32) -> Result<Response> {
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < max_attempts {
        match client.get(url).send().await {
            Ok(response) => {
                if !response.status().is_success() {
                    warn!("HTTP {} for {}, parsing the body anyway", response.status(), url);
                }
                return Ok(response);
            }
            Err(e) => {
                error!("Request failed for {}: {}", url, e);
                last_error = Some(e.into());
            }
        }

        attempts += 1;
        if attempts < max_attempts {
            let delay = Duration::from_secs(2u64.pow(attempts));
            warn!("Retrying in {:?}... (attempt {}/{})", delay, attempts + 1, max_attempts);
            sleep(delay).await;
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("No attempts made")))
        .context(format!("Failed to fetch {} after {} attempts", url, max_attempts))
}

/// GET a page and return its body as text.
pub async fn fetch_html(client: &Client, url: &str, max_attempts: u32) -> Result<String> {
    let response = fetch_with_retry(client, url, max_attempts).await?;
    let body = response
        .text()
        .await
        .with_context(|| format!("Failed to read body of {}", url))?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetches_page_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/catalog"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let client = create_client(&Config::default()).unwrap();
        let body = fetch_html(&client, &format!("{}/catalog", server.uri()), 1)
            .await
            .unwrap();
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn error_status_still_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("<html>not found</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_client(&Config::default()).unwrap();
        let body = fetch_html(&client, &server.uri(), 3).await.unwrap();
        assert_eq!(body, "<html>not found</html>");
    }

    #[tokio::test]
    async fn connection_failure_is_an_error() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let client = create_client(&Config::default()).unwrap();
        let result = fetch_html(&client, &uri, 1).await;
        assert!(result.is_err());
    }
}
