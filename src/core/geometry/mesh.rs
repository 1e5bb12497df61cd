use std::path::Path;

use glam::{Mat4, Vec2, Vec3};
use log::{debug, info};

use super::normals::{compute_normals_with_stats, NormalOptions, NormalStats};
use crate::core::Color;
use crate::error::{ShadeError, ShadeResult};

/// Unindexed triangle list: every three consecutive positions form one
/// triangle, in winding order. Optional per-vertex attributes run parallel to
/// `positions`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleSoup {
    positions: Vec<Vec3>,
    uvs: Vec<Vec2>,
    colors: Vec<Color>,
}

impl TriangleSoup {
    pub fn new(positions: Vec<Vec3>) -> ShadeResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(ShadeError::InvalidInput(format!(
                "triangle soup has {} positions, which is not a multiple of 3",
                positions.len()
            )));
        }
        Ok(Self {
            positions,
            uvs: Vec::new(),
            colors: Vec::new(),
        })
    }

    pub fn with_uvs(mut self, uvs: Vec<Vec2>) -> ShadeResult<Self> {
        check_attribute_len("uv", uvs.len(), self.positions.len())?;
        self.uvs = uvs;
        Ok(self)
    }

    pub fn with_colors(mut self, colors: Vec<Color>) -> ShadeResult<Self> {
        check_attribute_len("color", colors.len(), self.positions.len())?;
        self.colors = colors;
        Ok(self)
    }

    /// The 36-vertex color cube: a unit cube centred at the origin, two
    /// triangles per side, each corner carrying its own color.
    pub fn color_cube() -> Self {
        #[rustfmt::skip]
        let corners = [
            Vec3::new(-0.5, -0.5,  0.5),
            Vec3::new(-0.5,  0.5,  0.5),
            Vec3::new( 0.5,  0.5,  0.5),
            Vec3::new( 0.5, -0.5,  0.5),
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(-0.5,  0.5, -0.5),
            Vec3::new( 0.5,  0.5, -0.5),
            Vec3::new( 0.5, -0.5, -0.5),
        ];
        let corner_colors = [
            Color::BLACK,
            Color::RED,
            Color::YELLOW,
            Color::GREEN,
            Color::BLUE,
            Color::MAGENTA,
            Color::WHITE,
            Color::CYAN,
        ];
        let sides: [[usize; 4]; 6] = [
            [1, 0, 3, 2],
            [2, 3, 7, 6],
            [3, 0, 4, 7],
            [6, 5, 1, 2],
            [4, 5, 6, 7],
            [5, 4, 0, 1],
        ];

        let mut positions = Vec::with_capacity(36);
        let mut colors = Vec::with_capacity(36);
        for [a, b, c, d] in sides {
            // quad a-b-c-d becomes a-b-c, a-c-d
            for i in [a, b, c, a, c, d] {
                positions.push(corners[i]);
                colors.push(corner_colors[i]);
            }
        }

        Self {
            positions,
            uvs: Vec::new(),
            colors,
        }
    }

    /// Load every model in an OBJ file and flatten it into one soup.
    /// Texture coordinates are kept only if every model has them.
    pub fn from_obj(path: impl AsRef<Path>) -> ShadeResult<Self> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|source| ShadeError::ObjLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let has_uvs = !models.is_empty() && models.iter().all(|m| !m.mesh.texcoords.is_empty());
        let mut positions = Vec::new();
        let mut uvs = Vec::new();

        for model in &models {
            let mesh = &model.mesh;
            debug!(
                "model {:?}: {} positions, {} indices",
                model.name,
                mesh.positions.len() / 3,
                mesh.indices.len()
            );

            for &index in &mesh.indices {
                let i = index as usize;
                let pos = mesh.positions.get(3 * i..3 * i + 3).ok_or_else(|| {
                    ShadeError::InvalidInput(format!(
                        "model {:?} references missing vertex {i}",
                        model.name
                    ))
                })?;
                positions.push(Vec3::new(pos[0], pos[1], pos[2]));

                if has_uvs {
                    let uv = mesh.texcoords.get(2 * i..2 * i + 2).ok_or_else(|| {
                        ShadeError::InvalidInput(format!(
                            "model {:?} references missing texture coordinate {i}",
                            model.name
                        ))
                    })?;
                    uvs.push(Vec2::new(uv[0], uv[1]));
                }
            }
        }

        let soup = Self::new(positions)?.with_uvs(uvs)?;
        info!(
            "loaded {} triangles from {} ({} models, uvs: {})",
            soup.triangle_count(),
            path.display(),
            models.len(),
            soup.has_uvs()
        );
        Ok(soup)
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    pub fn normals(&self, options: &NormalOptions) -> ShadeResult<Vec<Vec3>> {
        self.normals_with_stats(options).map(|(normals, _)| normals)
    }

    pub fn normals_with_stats(&self, options: &NormalOptions) -> ShadeResult<(Vec<Vec3>, NormalStats)> {
        compute_normals_with_stats(&self.positions, options)
    }

    /// Positions moved by `mat`, e.g. the spin applied on the CPU each frame.
    pub fn transformed(&self, mat: &Mat4) -> Vec<Vec3> {
        self.positions
            .iter()
            .map(|&p| mat.transform_point3(p))
            .collect()
    }
}

fn check_attribute_len(name: &str, len: usize, expected: usize) -> ShadeResult<()> {
    if len != 0 && len != expected {
        return Err(ShadeError::InvalidInput(format!(
            "{name} buffer has {len} entries but the soup has {expected} positions"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::normals::DegeneratePolicy;
    use std::io::Write;

    const EPS: f32 = 1e-5;

    #[test]
    fn cube_has_twelve_triangles() {
        let cube = TriangleSoup::color_cube();
        assert_eq!(cube.vertex_count(), 36);
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.colors().len(), 36);
        assert!(!cube.has_uvs());
        // first quad (1, 0, 3, 2)
        assert_eq!(cube.positions()[0], Vec3::new(-0.5, 0.5, 0.5));
        assert_eq!(cube.colors()[0], Color::RED);
        assert_eq!(cube.colors()[5], Color::YELLOW);
    }

    #[test]
    fn cube_flat_normals_point_outward() {
        let cube = TriangleSoup::color_cube();
        let normals = cube.normals(&NormalOptions::flat()).unwrap();

        for (tri, n) in cube.triangles().zip(normals.chunks_exact(3)) {
            let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
            assert!(n[0].dot(centroid) > 0.0, "inward normal {} at {}", n[0], centroid);
            // axis aligned
            assert!((n[0].abs().max_element() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn cube_smoothed_normals_lean_toward_corners() {
        let cube = TriangleSoup::color_cube();
        let normals = cube.normals(&NormalOptions::smoothed()).unwrap();

        for (pos, n) in cube.positions().iter().zip(&normals) {
            assert!(n.dot(*pos) > 0.0, "{n} at {pos}");
            assert!((n.length() - 1.0).abs() < EPS);
        }

        // corner 1 is split by two triangles on +z and +y but only one on -x
        let expected = Vec3::new(-1.0, 2.0, 2.0) / 3.0;
        assert!((normals[0] - expected).length() < EPS, "{}", normals[0]);
    }

    #[test]
    fn rejects_ragged_input() {
        assert!(TriangleSoup::new(vec![Vec3::ZERO; 4]).is_err());
        let soup = TriangleSoup::new(vec![Vec3::ZERO; 3]).unwrap();
        assert!(soup.clone().with_uvs(vec![Vec2::ZERO; 2]).is_err());
        assert!(soup.with_colors(vec![Color::WHITE; 3]).is_ok());
    }

    #[test]
    fn transformed_applies_the_matrix() {
        let cube = TriangleSoup::color_cube();
        let moved = cube.transformed(&Mat4::from_translation(Vec3::X));
        assert_eq!(moved.len(), 36);
        assert_eq!(moved[0], cube.positions()[0] + Vec3::X);
    }

    #[test]
    fn loads_an_obj_quad() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("shading_lab_quad_{}.obj", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\nf 1/1 2/2 3/3 4/4"
        )
        .unwrap();
        drop(file);

        let soup = TriangleSoup::from_obj(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(soup.triangle_count(), 2);
        assert!(soup.has_uvs());
        assert_eq!(soup.uvs().len(), 6);

        let options = NormalOptions::smoothed().with_policy(DegeneratePolicy::Reject);
        let normals = soup.normals(&options).unwrap();
        assert!(normals.iter().all(|n| (*n - Vec3::Z).length() < EPS));
    }

    #[test]
    fn missing_obj_is_a_load_error() {
        let err = TriangleSoup::from_obj("/definitely/not/here.obj").unwrap_err();
        assert!(matches!(err, ShadeError::ObjLoad { .. }), "{err}");
    }
}
