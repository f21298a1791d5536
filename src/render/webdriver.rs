use anyhow::Result;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

use super::{PageRenderer, RenderedPage};
use crate::config::Config;
use crate::error::ScrapeError;

/// Cycles the size `<select>` and reads the page's `price_product` global
/// after each change handler has run.
const PRICE_SCRIPT: &str = r#"
    var values = arguments[0];
    var prices = [];
    for (var i = 0; i < values.length; i++) {
        $("select").val(values[i]).change();
        prices.push(price_product);
    }
    return prices;
"#;

/// Renders pages in a fresh WebDriver session per call.
pub struct WebDriverRenderer {
    webdriver_url: String,
    headless: bool,
    user_agent: String,
    timeout: Duration,
}

impl WebDriverRenderer {
    pub fn new(config: &Config) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            headless: config.headless,
            user_agent: config.user_agent.clone(),
            timeout: config.render_timeout(),
        }
    }

    fn capabilities(&self) -> Map<String, Value> {
        let mut args = vec![
            "--no-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--window-size=1920,1080".to_string(),
            format!("--user-agent={}", self.user_agent),
        ];
        if self.headless {
            args.push("--headless".to_string());
        }

        let mut caps = Map::new();
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
        caps
    }

    async fn open_session(&self) -> Result<Client, ScrapeError> {
        ClientBuilder::native()
            .capabilities(self.capabilities())
            .connect(&self.webdriver_url)
            .await
            .map_err(|e| ScrapeError::Session {
                url: self.webdriver_url.clone(),
                message: e.to_string(),
            })
    }

    async fn drive(&self, client: &Client, url: &str, size_values: &[String]) -> Result<RenderedPage, ScrapeError> {
        let render_error = |e: fantoccini::error::CmdError| ScrapeError::Render {
            url: url.to_string(),
            message: e.to_string(),
        };

        // goto returns once the page has loaded.
        client.goto(url).await.map_err(render_error)?;

        let result = client
            .execute(PRICE_SCRIPT, vec![json!(size_values)])
            .await
            .map_err(render_error)?;
        let prices = prices_from_value(result)?;
        debug!("Collected {} prices from {}", prices.len(), url);

        let html = client.source().await.map_err(render_error)?;

        Ok(RenderedPage { html, prices })
    }
}

#[async_trait]
impl PageRenderer for WebDriverRenderer {
    async fn render(&self, url: &str, size_values: &[String]) -> Result<RenderedPage> {
        let client = self.open_session().await?;

        let outcome = tokio::time::timeout(self.timeout, self.drive(&client, url, size_values)).await;

        // The session is released whatever happened above.
        if let Err(e) = client.close().await {
            warn!("Failed to close browser session for {}: {}", url, e);
        }

        match outcome {
            Ok(page) => Ok(page?),
            Err(_) => Err(ScrapeError::RenderTimeout {
                url: url.to_string(),
                secs: self.timeout.as_secs(),
            }
            .into()),
        }
    }
}

/// Prices come back as JSON; strings are kept verbatim, numbers use their JSON text.
fn prices_from_value(value: Value) -> Result<Vec<String>, ScrapeError> {
    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect()),
        other => Err(ScrapeError::UnexpectedScriptResult(other.to_string())),
    }
}
