use glam::{Mat4, Vec3};

/// Degrees added to the active axis on every `Spin::step`.
pub const SPIN_STEP: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Name used by the cube demo's transformation menu.
    pub fn motion_label(self) -> &'static str {
        match self {
            Axis::X => "Roll",
            Axis::Y => "Yaw",
            Axis::Z => "Pitch",
        }
    }
}

/// Continuous rotation of the color cube about one axis at a time.
#[derive(Debug, Clone)]
pub struct Spin {
    /// Accumulated angle per axis, in degrees
    theta: [f32; 3],
    axis: Axis,
    model_mat: Mat4,
    model_mat_dirty: bool,
}

impl Default for Spin {
    fn default() -> Self {
        Self::new()
    }
}

impl Spin {
    pub fn new() -> Self {
        Spin {
            theta: [0.0; 3],
            axis: Axis::X,
            model_mat: Mat4::IDENTITY,
            model_mat_dirty: false,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn set_axis(&mut self, axis: Axis) {
        self.axis = axis;
    }

    pub fn angles(&self) -> [f32; 3] {
        self.theta
    }

    /// Advance the active axis by `SPIN_STEP`, wrapping past 360.
    pub fn step(&mut self) {
        let angle = &mut self.theta[self.axis.index()];
        *angle += SPIN_STEP;
        if *angle > 360.0 {
            *angle -= 360.0;
        }
        self.mark_dirty();
    }

    /// `Rx * Ry * Rz` of the accumulated angles.
    pub fn model_mat(&mut self) -> Mat4 {
        if self.model_mat_dirty {
            self.update_model_mat();
        }
        self.model_mat
    }

    fn update_model_mat(&mut self) {
        let [x, y, z] = self.theta.map(f32::to_radians);
        self.model_mat = Mat4::from_rotation_x(x) * Mat4::from_rotation_y(y) * Mat4::from_rotation_z(z);
        self.model_mat_dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.model_mat_dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn starts_at_identity() {
        let mut spin = Spin::new();
        assert_eq!(spin.model_mat(), Mat4::IDENTITY);
        assert_eq!(spin.axis(), Axis::X);
    }

    #[test]
    fn steps_only_the_active_axis() {
        let mut spin = Spin::new();
        spin.set_axis(Axis::Y);
        for _ in 0..20 {
            spin.step();
        }
        let [x, y, z] = spin.angles();
        assert_eq!(x, 0.0);
        assert_eq!(z, 0.0);
        assert!((y - 1.0).abs() < EPS);

        let expected = Mat4::from_rotation_y(y.to_radians());
        assert!(spin.model_mat().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn wraps_after_a_full_turn() {
        let mut spin = Spin::new();
        spin.set_axis(Axis::Z);
        // a bit more than 360 degrees
        for _ in 0..7210 {
            spin.step();
        }
        let z = spin.angles()[2];
        assert!(z > 0.0 && z < 1.0, "{z}");
    }

    #[test]
    fn cached_matrix_tracks_changes() {
        let mut spin = Spin::new();
        let before = spin.model_mat();
        spin.step();
        assert_ne!(spin.model_mat(), before);
        assert_eq!(Axis::Z.motion_label(), "Pitch");
        assert_eq!(Axis::Y.unit(), Vec3::Y);
    }
}
