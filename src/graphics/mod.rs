use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};
use winit::{
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use crate::model::SimulationModel;

pub mod camera;
pub mod geometry;
pub mod renderer;
pub mod scene;

pub use camera::*;
pub use renderer::*;
pub use scene::*;

// Pan distance per polled frame for a held key, before zoom scaling.
const KEY_PAN_SPEED: f32 = 1.0;
const DRAG_SENSITIVITY: f32 = 0.1;

#[derive(Default)]
struct PanKeys {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

/// Owns the window, the quad renderer, the camera, and the attached
/// simulation model; routes input to the camera and drives the per-frame
/// compose-and-draw cycle.
pub struct GraphicsSystem {
    pub window: Arc<Window>,
    pub renderer: QuadRenderer,
    pub camera: Camera,
    scene: Scene,
    model: Option<Box<dyn SimulationModel>>,
    pan_keys: PanKeys,
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
    exit_requested: bool,
}

impl GraphicsSystem {
    pub async fn new(
        event_loop: &EventLoop<()>,
        width: u32,
        height: u32,
    ) -> Result<Self, InitError> {
        let window = Arc::new(
            winit::window::WindowBuilder::new()
                .with_title("Traffic Viewer")
                .with_inner_size(winit::dpi::LogicalSize::new(width, height))
                .build(event_loop)?,
        );

        let renderer = QuadRenderer::new(window.clone()).await?;

        Ok(Self {
            window,
            renderer,
            camera: Camera::new(),
            scene: Scene::new(),
            model: None,
            pan_keys: PanKeys::default(),
            dragging: false,
            last_cursor: None,
            exit_requested: false,
        })
    }

    pub fn attach_model(&mut self, model: Box<dyn SimulationModel>) {
        self.model = Some(model);
    }

    /// Forwards the host's update tick to the attached model. The renderer
    /// itself never mutates the model.
    pub fn advance_model(&mut self, dt: f32) {
        if let Some(model) = &mut self.model {
            model.advance(dt);
        }
    }

    pub fn handle_scroll(&mut self, offset: f32) {
        self.camera.apply_zoom(offset);
    }

    pub fn handle_drag(&mut self, delta_x: f32, delta_z: f32) {
        self.camera.pan(delta_x, delta_z);
    }

    /// Routes a window event to the camera. Returns true when consumed.
    pub fn handle_input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseWheel { delta, .. } => {
                let offset = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                self.handle_scroll(offset);
                true
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = *state == ElementState::Pressed;
                if !self.dragging {
                    self.last_cursor = None;
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.dragging {
                    if let Some((last_x, last_y)) = self.last_cursor {
                        let delta_x = (position.x - last_x) as f32;
                        let delta_y = (position.y - last_y) as f32;
                        // Dragging moves the world with the cursor.
                        self.handle_drag(
                            -delta_x * DRAG_SENSITIVITY,
                            -delta_y * DRAG_SENSITIVITY,
                        );
                    }
                    self.last_cursor = Some((position.x, position.y));
                    true
                } else {
                    false
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let pressed = event.state == ElementState::Pressed;
                if let PhysicalKey::Code(keycode) = event.physical_key {
                    match keycode {
                        KeyCode::KeyW | KeyCode::ArrowUp => {
                            self.pan_keys.up = pressed;
                            true
                        }
                        KeyCode::KeyS | KeyCode::ArrowDown => {
                            self.pan_keys.down = pressed;
                            true
                        }
                        KeyCode::KeyA | KeyCode::ArrowLeft => {
                            self.pan_keys.left = pressed;
                            true
                        }
                        KeyCode::KeyD | KeyCode::ArrowRight => {
                            self.pan_keys.right = pressed;
                            true
                        }
                        KeyCode::Escape => {
                            if pressed {
                                self.exit_requested = true;
                            }
                            true
                        }
                        _ => false,
                    }
                } else {
                    false
                }
            }
            WindowEvent::Resized(physical_size) => {
                self.renderer.resize(*physical_size);
                true
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = self.renderer.size;
                self.renderer.resize(size);
                true
            }
            _ => false,
        }
    }

    /// Applies held-key panning for this frame. Returns false once an exit
    /// has been requested.
    pub fn poll_input_and_advance_camera(&mut self) -> bool {
        if self.pan_keys.up {
            self.camera.pan(0.0, -KEY_PAN_SPEED);
        }
        if self.pan_keys.down {
            self.camera.pan(0.0, KEY_PAN_SPEED);
        }
        if self.pan_keys.left {
            self.camera.pan(-KEY_PAN_SPEED, 0.0);
        }
        if self.pan_keys.right {
            self.camera.pan(KEY_PAN_SPEED, 0.0);
        }

        !self.exit_requested
    }

    /// Composes and draws one frame from the attached model. With no model
    /// attached the frame is skipped with a logged notice.
    pub fn render_frame(&mut self) -> Result<()> {
        let Some(model) = &self.model else {
            warn!("no simulation model attached, skipping frame");
            return Ok(());
        };

        let instances = self.scene.compose(model.as_ref(), self.camera.ortho_width());
        let view_proj = self.camera.view_projection();
        self.renderer.render(&view_proj, instances)
    }

    /// Consumes the system; every GPU resource is released exactly once when
    /// the renderer drops here.
    pub fn shutdown(self) {
        info!("shutting down graphics system");
    }
}
