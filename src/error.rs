use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("element `{selector}` not found in {context}")]
    MissingElement {
        selector: &'static str,
        context: String,
    },

    #[error("element `{selector}` has no `{attribute}` attribute")]
    MissingAttribute {
        selector: &'static str,
        attribute: &'static str,
    },

    #[error("could not start a browser session at {url}: {message}")]
    Session { url: String, message: String },

    #[error("rendering {url} failed: {message}")]
    Render { url: String, message: String },

    #[error("rendering {url} timed out after {secs}s")]
    RenderTimeout { url: String, secs: u64 },

    #[error("price script returned {0}, expected an array")]
    UnexpectedScriptResult(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not read template {path}: {message}")]
    ReadTemplate { path: String, message: String },

    #[error("sheet `{0}` not found in template")]
    MissingSheet(String),

    #[error("could not write workbook {path}: {message}")]
    Write { path: String, message: String },
}
