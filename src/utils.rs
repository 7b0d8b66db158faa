#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{Document, HtmlCanvasElement, Window};

#[cfg(target_arch = "wasm32")]
use crate::app::Host;

/// Writes a formatted line to the browser console (stdout off-wasm).
#[macro_export]
macro_rules! log {
    ( $( $t:tt )* ) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&format!( $( $t )* ).into());
        #[cfg(not(target_arch = "wasm32"))]
        println!( $( $t )* );
    }}
}

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[cfg(target_arch = "wasm32")]
pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))
}

#[cfg(target_arch = "wasm32")]
pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("`window` has no document"))
}

/// The page document, looked up through `document.getElementById`.
#[cfg(target_arch = "wasm32")]
pub struct BrowserHost {
    document: Document,
}

#[cfg(target_arch = "wasm32")]
impl BrowserHost {
    pub fn new() -> Result<Self, JsValue> {
        Ok(Self {
            document: document()?,
        })
    }
}

#[cfg(target_arch = "wasm32")]
impl Host for BrowserHost {
    type Canvas = JsValue;

    fn canvas_by_id(&self, id: &str) -> Option<JsValue> {
        self.document.get_element_by_id(id).map(JsValue::from)
    }
}

/// Casts an arbitrary JS value to a canvas element, if it is one.
#[cfg(target_arch = "wasm32")]
pub fn as_canvas(target: JsValue) -> Option<HtmlCanvasElement> {
    target.dyn_into::<HtmlCanvasElement>().ok()
}
