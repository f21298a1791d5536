use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

mod webdriver;
pub use webdriver::WebDriverRenderer;

/// Page state captured after the size selector has been cycled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub html: String,
    pub prices: Vec<String>,
}

#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Load `url`, select each of `size_values` in turn and record the
    /// displayed price after every change.
    async fn render(&self, url: &str, size_values: &[String]) -> Result<RenderedPage>;
}

/// Render with up to `max_attempts` tries, no backoff between them.
pub async fn render_with_retry(
    renderer: &dyn PageRenderer,
    url: &str,
    size_values: &[String],
    max_attempts: u32,
) -> Result<RenderedPage> {
    let mut attempt = 1;
    loop {
        match renderer.render(url, size_values).await {
            Ok(page) => return Ok(page),
            Err(e) if attempt < max_attempts => {
                warn!("Render of {} failed ({:#}), retrying (attempt {}/{})", url, e, attempt + 1, max_attempts);
                attempt += 1;
            }
            Err(e) => return Err(e.context(format!("Failed to render {} after {} attempts", url, attempt))),
        }
    }
}
