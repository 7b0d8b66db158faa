use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::prelude::*;

use crate::app::{SceneViewer, ViewerFactory};
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::log;
use crate::renderer::ViewerRenderer;
use crate::utils;

/// omfobj-viewer web instance.
#[wasm_bindgen]
pub struct Viewer {
    handle: ViewerHandle,
}

#[wasm_bindgen]
impl Viewer {
    /// Create a new instance that renders to a given target canvas.
    pub async fn from_canvas(target: JsValue) -> Result<Viewer, JsValue> {
        Self::create(target, ViewerConfig::default())
            .await
            .map_err(JsValue::from)
    }

    /// Like `from_canvas`, with a JSON-encoded `ViewerConfig`.
    pub async fn from_canvas_with_config(
        target: JsValue,
        config_json: String,
    ) -> Result<Viewer, JsValue> {
        let config = ViewerConfig::from_json(&config_json)?;
        Self::create(target, config).await.map_err(JsValue::from)
    }

    pub fn add_object(&self, object: u32) {
        let added = self.handle.borrow_mut().renderer.add_object(object);
        if added {
            log!("Viewer::add_object(): added object {}", object);
        } else {
            log!("Viewer::add_object(): WARNING: object {} already present", object);
        }
    }

    pub fn object_count(&self) -> usize {
        self.handle.borrow().renderer.object_count()
    }

    /// Frames drawn so far.
    pub fn frame_count(&self) -> u64 {
        self.handle.borrow().frames
    }

    /// Stops the render loop. The viewer keeps its objects but no longer
    /// draws; without this the loop runs for the lifetime of the page.
    pub fn destroy(&self) {
        log!("Viewer::destroy(): stopping render loop");
        let mut wrapper = self.handle.borrow_mut();
        if let Some(id) = wrapper.pending.take() {
            if let Err(e) = utils::window().and_then(|w| w.cancel_animation_frame(id)) {
                log!("Viewer::destroy(): ERROR: failed to cancel frame: {:?}", e);
            }
        }
        drop(wrapper.keepalive.take());
    }
}

impl Viewer {
    async fn create(target: JsValue, config: ViewerConfig) -> Result<Viewer, ViewerError> {
        utils::set_panic_hook();

        log!("Viewer::create(): creating omfobj-viewer");

        let canvas = utils::as_canvas(target).ok_or(ViewerError::NotACanvas)?;
        let renderer = ViewerRenderer::new(canvas, config)?;

        let handle = create_handle(renderer);
        schedule_tick(&handle).map_err(|e| ViewerError::Dom(format!("{:?}", e)))?;

        Ok(Self { handle })
    }
}

type ViewerHandle = Rc<RefCell<ViewerWrapper>>;
type FrameCallback = Closure<dyn FnMut(f64)>;

struct ViewerWrapper {
    renderer: ViewerRenderer,
    keepalive: Option<FrameCallback>,
    pending: Option<i32>,
    frames: u64,
}

fn create_handle(renderer: ViewerRenderer) -> ViewerHandle {
    let wrapper = ViewerWrapper {
        renderer,
        keepalive: None,
        pending: None,
        frames: 0,
    };
    Rc::new(RefCell::new(wrapper))
}

/// Starts the `requestAnimationFrame` loop. The callback owns a strong handle
/// and is itself owned by the handle's keepalive slot, so the loop keeps
/// running after JS lets go of the `Viewer`, until `destroy` breaks the cycle.
fn schedule_tick(handle: &ViewerHandle) -> Result<(), JsValue> {
    let handle_c = handle.clone();
    let callback: FrameCallback =
        Closure::new(move |timestamp: f64| tick(&handle_c, timestamp));
    let id = request_animation_frame(&callback)?;

    let mut wrapper = handle.borrow_mut();
    wrapper.keepalive = Some(callback);
    wrapper.pending = Some(id);
    Ok(())
}

fn tick(handle: &ViewerHandle, timestamp: f64) {
    {
        let mut wrapper = handle.borrow_mut();
        wrapper.renderer.tick(timestamp);
        wrapper.frames += 1;
    }

    let next = match handle.borrow().keepalive.as_ref() {
        Some(callback) => request_animation_frame(callback),
        None => return,
    };
    match next {
        Ok(id) => handle.borrow_mut().pending = Some(id),
        Err(e) => log!("tick(): ERROR: failed to reschedule: {:?}", e),
    }
}

fn request_animation_frame(callback: &FrameCallback) -> Result<i32, JsValue> {
    utils::window()?.request_animation_frame(callback.as_ref().unchecked_ref())
}

impl SceneViewer for Viewer {
    fn add_object(&mut self, id: u32) {
        Viewer::add_object(self, id);
    }
}

/// Builds viewers with the default config, for the boot sequence.
pub struct DefaultFactory;

impl ViewerFactory for DefaultFactory {
    type Canvas = JsValue;
    type Viewer = Viewer;
    type Error = ViewerError;

    async fn from_canvas(&self, canvas: JsValue) -> Result<Viewer, ViewerError> {
        Viewer::create(canvas, ViewerConfig::default()).await
    }
}
