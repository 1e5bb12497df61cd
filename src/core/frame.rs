use glam::{Mat3, Mat4, Vec2, Vec3};
use log::info;

use super::camera::ViewTransform;
use super::geometry::{DegeneratePolicy, NormalOptions, NormalStats, TriangleSoup};
use super::shading::RenderConfig;
use crate::error::ShadeResult;

/// Per-draw uniform values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniforms {
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
    pub normal_matrix: Mat3,
    pub use_texture: bool,
}

impl Uniforms {
    pub fn new(view: &ViewTransform, use_texture: bool) -> Self {
        Self {
            projection: view.projection,
            view: view.view,
            model: view.model,
            normal_matrix: view.normal_matrix(),
            use_texture,
        }
    }
}

/// The vertex buffers and uniforms for one render configuration. Rebuilt
/// whenever the configuration changes; the view may be refreshed on its own.
#[derive(Debug, Clone)]
pub struct FrameSetup {
    pub config: RenderConfig,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub uniforms: Uniforms,
    pub stats: NormalStats,
}

impl FrameSetup {
    pub fn build(
        config: &RenderConfig,
        soup: &TriangleSoup,
        view: &ViewTransform,
        degenerate: DegeneratePolicy,
    ) -> ShadeResult<Self> {
        let options = NormalOptions {
            smoothed: config.smoothed_normals,
            degenerate,
        };
        let (normals, stats) = soup.normals_with_stats(&options)?;

        info!(
            "frame setup: {} vertices, smoothed normals: {}, texture: {}",
            soup.vertex_count(),
            config.smoothed_normals,
            config
                .texture
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none".to_string())
        );

        Ok(Self {
            config: config.clone(),
            positions: soup.positions().to_vec(),
            normals,
            uvs: soup.uvs().to_vec(),
            uniforms: Uniforms::new(view, config.use_texture),
            stats,
        })
    }

    /// Refresh the matrices after the view moved; buffers are untouched.
    pub fn update_view(&mut self, view: &ViewTransform) {
        self.uniforms = Uniforms::new(view, self.config.use_texture);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::Direction;
    use crate::core::shading::{ResourcePaths, ShadingMode, TextureMode};
    use crate::core::transform::Axis;
    use crate::error::ShadeError;

    #[test]
    fn buffers_line_up() {
        let paths = ResourcePaths::default();
        let config = RenderConfig::initial(&paths);
        let soup = TriangleSoup::color_cube();
        let view = ViewTransform::new(512.0, 512.0);

        let frame = FrameSetup::build(&config, &soup, &view, DegeneratePolicy::Reject).unwrap();
        assert_eq!(frame.vertex_count(), 36);
        assert_eq!(frame.normals.len(), frame.positions.len());
        assert!(frame.uvs.is_empty());
        assert!(!frame.uniforms.use_texture);
        assert_eq!(frame.uniforms.view, view.view);
        assert_eq!(frame.stats.unique_positions, None);
    }

    #[test]
    fn smoothing_follows_the_config() {
        let paths = ResourcePaths::default();
        let soup = TriangleSoup::color_cube();
        let view = ViewTransform::new(512.0, 512.0);

        let flat = RenderConfig::initial(&paths);
        let gouraud = flat.with_shading(ShadingMode::Gouraud, &paths);
        let flat_frame = FrameSetup::build(&flat, &soup, &view, DegeneratePolicy::Reject).unwrap();
        let smooth_frame = FrameSetup::build(&gouraud, &soup, &view, DegeneratePolicy::Reject).unwrap();

        assert_ne!(flat_frame.normals, smooth_frame.normals);
        assert_eq!(smooth_frame.stats.unique_positions, Some(8));

        let textured = gouraud.with_texture(TextureMode::Decal, &paths);
        let frame = FrameSetup::build(&textured, &soup, &view, DegeneratePolicy::Reject).unwrap();
        assert!(frame.uniforms.use_texture);
        assert_eq!(frame.normals, smooth_frame.normals);
    }

    #[test]
    fn degenerate_geometry_fails_the_whole_setup() {
        let paths = ResourcePaths::default();
        let soup = TriangleSoup::new(vec![Vec3::ZERO, Vec3::X, Vec3::X * 2.0]).unwrap();
        let view = ViewTransform::new(512.0, 512.0);
        let config = RenderConfig::initial(&paths);

        let err = FrameSetup::build(&config, &soup, &view, DegeneratePolicy::Reject).unwrap_err();
        assert!(matches!(err, ShadeError::DegenerateTriangle { triangle: 0 }));

        let frame = FrameSetup::build(&config, &soup, &view, DegeneratePolicy::ZeroVector).unwrap();
        assert_eq!(frame.normals, vec![Vec3::ZERO; 3]);
    }

    #[test]
    fn view_updates_keep_buffers() {
        let paths = ResourcePaths::default();
        let soup = TriangleSoup::color_cube();
        let mut view = ViewTransform::new(512.0, 512.0);
        let config = RenderConfig::initial(&paths);
        let mut frame = FrameSetup::build(&config, &soup, &view, DegeneratePolicy::Reject).unwrap();
        let normals = frame.normals.clone();

        view.turn(Axis::X, Direction::Positive);
        frame.update_view(&view);
        assert_eq!(frame.uniforms.view, view.view);
        assert_eq!(frame.uniforms.normal_matrix, view.normal_matrix());
        assert_eq!(frame.normals, normals);
    }
}
