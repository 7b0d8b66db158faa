use std::sync::Arc;

use three_d::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

use crate::config::ViewerConfig;
use crate::error::{Result, ViewerError};
use crate::log;
use crate::scene::{object_color, ObjectRegistry};

/// GPU side of a viewer: one unit cube per registered object, drawn with an
/// unlit color material into the canvas' default framebuffer.
pub struct ViewerRenderer {
    context: Context,
    canvas: HtmlCanvasElement,
    camera: Camera,
    config: ViewerConfig,
    registry: ObjectRegistry,
    objects: Vec<Gm<Mesh, ColorMaterial>>,
    // Grid positions, same order as `objects`. Only change on insert.
    positions: Vec<Vec3>,
    start_time: Option<f64>,
}

impl ViewerRenderer {
    pub fn new(canvas: HtmlCanvasElement, config: ViewerConfig) -> Result<Self> {
        let gl = canvas
            .get_context("webgl2")
            .map_err(|e| ViewerError::Dom(format!("{:?}", e)))?
            .ok_or(ViewerError::NoWebGl2)?
            .dyn_into::<WebGl2RenderingContext>()
            .map_err(|_| ViewerError::NoWebGl2)?;

        let gl = context::Context::from_webgl2_context(gl);
        let context = Context::from_gl_context(Arc::new(gl))
            .map_err(|e| ViewerError::Context(e.to_string()))?;

        let distance = config.fitted_camera_distance(0.0);
        let camera = Camera::new_perspective(
            canvas_viewport(&canvas),
            eye(distance),
            vec3(0.0, 0.0, 0.0),
            vec3(0.0, 1.0, 0.0),
            degrees(config.field_of_view),
            0.1,
            1000.0,
        );

        log!(
            "ViewerRenderer::new(): canvas={}x{}",
            canvas.width(),
            canvas.height()
        );

        Ok(Self {
            context,
            canvas,
            camera,
            config,
            registry: ObjectRegistry::new(),
            objects: Vec::new(),
            positions: Vec::new(),
            start_time: None,
        })
    }

    /// Registers an object and uploads its mesh. Returns `false` for an id
    /// that is already shown.
    pub fn add_object(&mut self, id: u32) -> bool {
        if !self.registry.insert(id) {
            return false;
        }

        let [r, g, b] = object_color(id);
        let mesh = Mesh::new(&self.context, &CpuMesh::cube());
        let material = ColorMaterial {
            color: Srgba::new(r, g, b, 255),
            ..Default::default()
        };
        self.objects.push(Gm::new(mesh, material));
        self.positions = self
            .registry
            .layout(self.config.object_spacing)
            .into_iter()
            .map(|[x, y, z]| vec3(x, y, z))
            .collect();

        // Pull the camera back so the whole grid stays in view.
        let extent = self.registry.extent(self.config.object_spacing);
        let distance = self.config.fitted_camera_distance(extent);
        self.camera
            .set_view(eye(distance), vec3(0.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0));

        true
    }

    pub fn object_count(&self) -> usize {
        self.registry.len()
    }

    /// Draws one frame. `timestamp` is the `requestAnimationFrame` time in
    /// milliseconds.
    pub fn tick(&mut self, timestamp: f64) {
        let start = *self.start_time.get_or_insert(timestamp);
        let seconds = ((timestamp - start) / 1000.0) as f32;

        let viewport = canvas_viewport(&self.canvas);
        self.camera.set_viewport(viewport);

        let spin = Mat4::from_angle_y(degrees(self.config.spin_speed * seconds));
        let scale = Mat4::from_scale(self.config.object_scale);
        for (object, position) in self.objects.iter_mut().zip(&self.positions) {
            object.set_transformation(Mat4::from_translation(*position) * spin * scale);
        }

        let [r, g, b, a] = self.config.clear_color;
        RenderTarget::screen(&self.context, viewport.width, viewport.height)
            .clear(ClearState::color_and_depth(r, g, b, a, 1.0))
            .render(&self.camera, &self.objects, &[]);
    }
}

fn canvas_viewport(canvas: &HtmlCanvasElement) -> Viewport {
    Viewport::new_at_origo(canvas.width().max(1), canvas.height().max(1))
}

fn eye(distance: f32) -> Vec3 {
    vec3(0.0, distance * 0.5, distance)
}
