use nalgebra::{Matrix4, Point3, Vector3};

/// Hard world limits for the orthographic bounds.
pub const WORLD_LIMIT_HORIZONTAL: f32 = 3200.0;
pub const WORLD_LIMIT_VERTICAL: f32 = 1800.0;

const ZOOM_SENSITIVITY: f32 = 10.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 200.0;

/// Top-down orthographic camera. The camera hangs above the ground plane
/// looking straight down; the target always mirrors the camera's x/z and
/// stays at ground level, so only the orthographic bounds and the x/z
/// position ever change.
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,

    // Orthographic bounds, kept ordered (left < right, bottom < top) and
    // inside the world limits.
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self::with_bounds(-120.0, 120.0, -67.5, 67.5)
    }

    pub fn with_bounds(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            position: Point3::new(0.0, 100.0, 0.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 0.0, -1.0),
            left,
            right,
            bottom,
            top,
        }
    }

    /// Scales all four bounds around the view center, then clamps them to the
    /// world limits. Clamping happens after scaling and per side, so a clamp
    /// can trim one side only; that asymmetry is intentional. A scroll large
    /// enough to produce a non-positive factor would invert the bounds and is
    /// rejected outright.
    pub fn apply_zoom(&mut self, scroll_delta: f32) {
        let zoom_factor = 1.0 + (-scroll_delta * ZOOM_SENSITIVITY / 100.0);
        if zoom_factor <= 0.0 || !zoom_factor.is_finite() {
            return;
        }

        self.left *= zoom_factor;
        self.right *= zoom_factor;
        self.bottom *= zoom_factor;
        self.top *= zoom_factor;

        self.left = self.left.max(-WORLD_LIMIT_HORIZONTAL);
        self.right = self.right.min(WORLD_LIMIT_HORIZONTAL);
        self.bottom = self.bottom.max(-WORLD_LIMIT_VERTICAL);
        self.top = self.top.min(WORLD_LIMIT_VERTICAL);
    }

    /// Translates the camera in the ground plane. The delta is scaled by the
    /// current zoom level so panning covers the same fraction of the screen
    /// at every zoom.
    pub fn pan(&mut self, delta_x: f32, delta_z: f32) {
        let zoom_level = self.zoom_level();

        self.position.x += delta_x * zoom_level;
        self.position.z += delta_z * zoom_level;
        self.target.x = self.position.x;
        self.target.z = self.position.z;
        self.target.y = 0.0;
    }

    /// Scalar shared with pan speed and lane-marking stroke floors.
    pub fn zoom_level(&self) -> f32 {
        (self.right - self.left) / 200.0
    }

    pub fn ortho_width(&self) -> f32 {
        self.right - self.left
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_orthographic(
            self.left,
            self.right,
            self.bottom,
            self.top,
            NEAR_PLANE,
            FAR_PLANE,
        )
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
