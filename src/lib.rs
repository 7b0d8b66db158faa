use wasm_bindgen::prelude::*;

pub mod app;
pub mod config;
pub mod error;
#[cfg(target_arch = "wasm32")]
mod renderer;
pub mod scene;
mod utils;
#[cfg(target_arch = "wasm32")]
mod viewer;

pub use app::{boot, BootError, BootOptions, Host, SceneViewer, ViewerFactory};
pub use config::ViewerConfig;
pub use error::ViewerError;
pub use scene::ObjectRegistry;
#[cfg(target_arch = "wasm32")]
pub use viewer::Viewer;

#[wasm_bindgen(start)]
pub fn start() {
    utils::set_panic_hook();
}

/// Runs the example application: binds a viewer to the `"viewer"` canvas and
/// adds object 42 to it.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn run() -> Result<Viewer, JsValue> {
    log!("run(): initializing viewer...");

    let host = utils::BrowserHost::new()?;
    let viewer = boot(&host, &viewer::DefaultFactory, &BootOptions::default())
        .await
        .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;

    log!("run(): done, {} object(s) registered", viewer.object_count());
    Ok(viewer)
}
