use glam::{Mat3, Mat4, Vec3};
use log::debug;

use super::transform::Axis;
use crate::error::{ShadeError, ShadeResult};

/// Orbit step for the theta/phi adjustments: 5 degrees.
pub const ORBIT_STEP: f32 = 5.0 * std::f32::consts::PI / 180.0;

/// Rotation applied by one `ViewTransform::turn`, in radians.
pub const TURN_STEP: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    #[default]
    Orthographic,
    Perspective,
}

/// The camera setups offered by the color cube demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPreset {
    Perspective,
    OrthographicXY,
    ObliqueCavalier,
}

impl ViewPreset {
    pub const ALL: [ViewPreset; 3] = [
        ViewPreset::Perspective,
        ViewPreset::OrthographicXY,
        ViewPreset::ObliqueCavalier,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ViewPreset::Perspective => "Perspective",
            ViewPreset::OrthographicXY => "Parallel Orthographic XY",
            ViewPreset::ObliqueCavalier => "Parallel Oblique Cavalier",
        }
    }
}

/// Camera orbiting the origin on a sphere, looking at the origin with +Y up.
///
/// Angles are in radians and are fed straight to the trig functions, so the
/// preset values below are radians too.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Distance from the origin
    pub radius: f32,
    /// Polar angle measured from +Z
    pub theta: f32,
    /// Azimuth in the XY plane
    pub phi: f32,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    /// The near plane of the camera, anything closer than this will not be rendered
    pub z_near: f32,
    /// The far plane of the camera, anything beyond this will not be rendered
    pub z_far: f32,
    /// Vertical field of view in degrees, perspective only
    pub fovy: f32,
    pub aspect: f32,
    pub projection: Projection,
    /// Overrides the spherical eye position (cavalier preset)
    eye_override: Option<Vec3>,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            radius: 1.0,
            theta: 0.0,
            phi: 0.0,
            left: -1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
            z_near: 0.5,
            z_far: 3.0,
            fovy: 30.0,
            aspect: 1.0,
            projection: Projection::Orthographic,
            eye_override: None,
        }
    }
}

impl OrbitCamera {
    pub fn from_preset(preset: ViewPreset) -> Self {
        let mut cam = Self::default();
        cam.apply_preset(preset);
        cam
    }

    /// Switch to a preset, keeping the viewport aspect ratio and the
    /// orthographic extents.
    pub fn apply_preset(&mut self, preset: ViewPreset) {
        self.eye_override = None;
        match preset {
            ViewPreset::Perspective => {
                self.radius = 4.0;
                self.theta = 16.5;
                self.phi = 5.5;
                self.z_near = 3.05;
                self.z_far = 18.5;
                self.projection = Projection::Perspective;
            }
            ViewPreset::OrthographicXY => {
                self.radius = 1.0;
                self.theta = 0.0;
                self.phi = 0.0;
                self.z_near = 0.5;
                self.z_far = 3.0;
                self.projection = Projection::Orthographic;
            }
            ViewPreset::ObliqueCavalier => {
                self.radius = 2.0;
                self.theta = 45.0;
                self.phi = 45.0;
                self.z_near = 0.5;
                self.z_far = 3.0;
                self.projection = Projection::Orthographic;
                let cot = self.phi.cos() / self.phi.sin();
                self.eye_override = Some(Vec3::new(cot, cot, 0.0));
            }
        }
        debug!("camera preset {:?}, eye {}", preset, self.eye());
    }

    pub fn eye(&self) -> Vec3 {
        if let Some(eye) = self.eye_override {
            return eye;
        }
        Vec3::new(
            self.radius * self.theta.sin() * self.phi.cos(),
            self.radius * self.theta.sin() * self.phi.sin(),
            self.radius * self.theta.cos(),
        )
    }

    pub fn model_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Orthographic => Mat4::orthographic_rh_gl(
                self.left,
                self.right,
                self.bottom,
                self.top,
                self.z_near,
                self.z_far,
            ),
            Projection::Perspective => Mat4::perspective_rh_gl(
                self.fovy.to_radians(),
                self.aspect,
                self.z_near,
                self.z_far,
            ),
        }
    }

    pub fn scale_horizontal(&mut self, factor: f32) {
        self.left *= factor;
        self.right *= factor;
    }

    pub fn scale_vertical(&mut self, factor: f32) {
        self.bottom *= factor;
        self.top *= factor;
    }

    pub fn scale_depth(&mut self, factor: f32) {
        self.z_near *= factor;
        self.z_far *= factor;
    }

    pub fn scale_radius(&mut self, factor: f32) {
        self.eye_override = None;
        self.radius *= factor;
    }

    pub fn orbit_theta(&mut self, delta: f32) {
        self.eye_override = None;
        self.theta += delta;
    }

    pub fn orbit_phi(&mut self, delta: f32) {
        self.eye_override = None;
        self.phi += delta;
    }

    /// Back to the default extents and orbit; aspect and projection stay.
    pub fn reset(&mut self) {
        *self = Self {
            aspect: self.aspect,
            projection: self.projection,
            ..Self::default()
        };
    }

    pub fn reshape(&mut self, width: u32, height: u32) -> ShadeResult<()> {
        if height == 0 {
            return Err(ShadeError::InvalidInput(format!(
                "viewport {width}x{height} has zero height"
            )));
        }
        self.aspect = width as f32 / height as f32;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    fn sign(self) -> f32 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }
}

/// Projection, view and model matrices of the teapot demo.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
}

impl ViewTransform {
    /// Defaults for a `width` x `height` window: an orthographic box in pixel
    /// units, and the model pushed down and away from the eye.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            projection: Mat4::orthographic_rh_gl(
                -width * 0.5,
                width * 0.5,
                -height * 0.5,
                height * 0.5,
                -1.0,
                400.0,
            ),
            view: Self::default_view(),
            model: Mat4::IDENTITY,
        }
    }

    pub fn default_view() -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, -60.0, -300.0))
    }

    /// Transpose of the inverse of the upper 3x3 of `view * model`.
    pub fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(self.view * self.model).inverse().transpose()
    }

    /// Move one unit along `axis` in view space.
    pub fn nudge(&mut self, axis: Axis, direction: Direction) {
        self.view *= Mat4::from_translation(axis.unit() * direction.sign());
    }

    /// Rotate the view by `TURN_STEP` about `axis`.
    pub fn turn(&mut self, axis: Axis, direction: Direction) {
        self.view *= Mat4::from_axis_angle(axis.unit() * direction.sign(), TURN_STEP);
    }

    pub fn reset_view(&mut self) {
        self.view = Self::default_view();
    }
}
