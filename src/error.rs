use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while constructing or configuring a viewer.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("given target is not a canvas element")]
    NotACanvas,

    #[error("canvas does not provide a WebGL2 context")]
    NoWebGl2,

    #[error("failed to create rendering context: {0}")]
    Context(String),

    #[error("invalid viewer config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("DOM error: {0}")]
    Dom(String),
}

impl From<ViewerError> for JsValue {
    fn from(e: ViewerError) -> JsValue {
        js_sys::Error::new(&e.to_string()).into()
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
