/// Linear RGBA color, each channel in 0.0 - 1.0. Laid out like a `vec4`
/// vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Opaque color from RGB components.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);
    pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const CYAN: Color = Color::new(0.0, 1.0, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_opaque_primaries() {
        assert_eq!(Color::BLACK, Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 });
        assert_eq!(Color::YELLOW, Color { r: 1.0, g: 1.0, b: 0.0, a: 1.0 });
        assert_eq!(Color::MAGENTA.a, 1.0);
    }
}
