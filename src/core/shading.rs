use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ShadeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    #[default]
    Flat,
    Gouraud,
    Phong,
}

impl ShadingMode {
    pub fn smoothed_normals(self) -> bool {
        !matches!(self, ShadingMode::Flat)
    }
}

impl Display for ShadingMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ShadingMode::Flat => write!(f, "Flat"),
            ShadingMode::Gouraud => write!(f, "Gouraud"),
            ShadingMode::Phong => write!(f, "Phong"),
        }
    }
}

impl FromStr for ShadingMode {
    type Err = ShadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" => Ok(ShadingMode::Flat),
            "gouraud" => Ok(ShadingMode::Gouraud),
            "phong" => Ok(ShadingMode::Phong),
            _ => Err(ShadeError::InvalidInput(format!("unknown shading mode {s:?}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureMode {
    Decal,
    Bump,
    Spherical,
}

impl Display for TextureMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TextureMode::Decal => write!(f, "Decal"),
            TextureMode::Bump => write!(f, "Bump"),
            TextureMode::Spherical => write!(f, "Spherical"),
        }
    }
}

impl FromStr for TextureMode {
    type Err = ShadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "decal" => Ok(TextureMode::Decal),
            "bump" => Ok(TextureMode::Bump),
            "spherical" => Ok(TextureMode::Spherical),
            _ => Err(ShadeError::InvalidInput(format!("unknown texture mode {s:?}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPair {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl ShaderPair {
    fn under(root: &Path, vertex: &str, fragment: &str) -> Self {
        Self {
            vertex: root.join(vertex),
            fragment: root.join(fragment),
        }
    }
}

/// Where the teapot demo finds its model, textures and shader sources.
/// Nothing here is opened; the paths are handed to whoever renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePaths {
    pub model: PathBuf,
    pub decal: PathBuf,
    pub sphere_map: PathBuf,
    pub bump_maps: [PathBuf; 3],
    pub simple_shader: ShaderPair,
    pub phong_shader: ShaderPair,
    pub bump_map_shader: ShaderPair,
    pub environment_shader: ShaderPair,
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self::under(".")
    }
}

impl ResourcePaths {
    /// The standard layout (`res/`, `shaders/`) below `root`.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            model: root.join("res/teapot.obj"),
            decal: root.join("res/texture_map.bmp"),
            sphere_map: root.join("res/sphere_map.bmp"),
            bump_maps: [
                root.join("res/bump_map.bmp"),
                root.join("res/brickwall_normal.bmp"),
                root.join("res/texture_normal.bmp"),
            ],
            simple_shader: ShaderPair::under(root, "shaders/simpleShader.vert", "shaders/simpleShader.frag"),
            phong_shader: ShaderPair::under(root, "shaders/phongShader.vert", "shaders/phongShader.frag"),
            bump_map_shader: ShaderPair::under(root, "shaders/bumpmapShader.vert", "shaders/bumpmapShader.frag"),
            environment_shader: ShaderPair::under(
                root,
                "shaders/environmentmapShader.vert",
                "shaders/environmentmapShader.frag",
            ),
        }
    }
}

/// Everything the menus can change, as one immutable value. A menu
/// selection produces a new config instead of mutating the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub shaders: ShaderPair,
    pub texture: Option<PathBuf>,
    pub use_texture: bool,
    pub smoothed_normals: bool,
}

impl RenderConfig {
    /// Flat shading, no texture.
    pub fn initial(paths: &ResourcePaths) -> Self {
        Self {
            shaders: paths.simple_shader.clone(),
            texture: None,
            use_texture: false,
            smoothed_normals: false,
        }
    }

    /// Shader menu: always drops the texture.
    pub fn with_shading(&self, mode: ShadingMode, paths: &ResourcePaths) -> Self {
        let shaders = match mode {
            ShadingMode::Flat | ShadingMode::Gouraud => paths.simple_shader.clone(),
            ShadingMode::Phong => paths.phong_shader.clone(),
        };
        Self {
            shaders,
            texture: None,
            use_texture: false,
            smoothed_normals: mode.smoothed_normals(),
        }
    }

    /// Texture menu. Decal keeps the current shaders and normals; the other
    /// two bring their own shaders and need smoothed normals.
    pub fn with_texture(&self, mode: TextureMode, paths: &ResourcePaths) -> Self {
        match mode {
            TextureMode::Decal => Self {
                texture: Some(paths.decal.clone()),
                use_texture: true,
                ..self.clone()
            },
            TextureMode::Bump => Self {
                shaders: paths.bump_map_shader.clone(),
                texture: Some(paths.bump_maps[2].clone()),
                use_texture: true,
                smoothed_normals: true,
            },
            TextureMode::Spherical => Self {
                shaders: paths.environment_shader.clone(),
                texture: Some(paths.sphere_map.clone()),
                use_texture: true,
                smoothed_normals: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_flat_without_texture() {
        let paths = ResourcePaths::default();
        let config = RenderConfig::initial(&paths);
        assert_eq!(config.shaders, paths.simple_shader);
        assert!(!config.smoothed_normals);
        assert!(!config.use_texture);
        assert!(config.texture.is_none());
    }

    #[test]
    fn shading_menu() {
        let paths = ResourcePaths::under("/demo");
        let base = RenderConfig::initial(&paths).with_texture(TextureMode::Spherical, &paths);

        let gouraud = base.with_shading(ShadingMode::Gouraud, &paths);
        assert_eq!(gouraud.shaders, paths.simple_shader);
        assert!(gouraud.smoothed_normals);
        assert!(gouraud.texture.is_none() && !gouraud.use_texture);

        let phong = base.with_shading(ShadingMode::Phong, &paths);
        assert_eq!(phong.shaders.vertex, PathBuf::from("/demo/shaders/phongShader.vert"));
        assert!(phong.smoothed_normals);

        let flat = phong.with_shading(ShadingMode::Flat, &paths);
        assert_eq!(flat, RenderConfig::initial(&paths));
    }

    #[test]
    fn decal_keeps_shaders_and_normals() {
        let paths = ResourcePaths::default();
        let phong = RenderConfig::initial(&paths).with_shading(ShadingMode::Phong, &paths);
        let decal = phong.with_texture(TextureMode::Decal, &paths);
        assert_eq!(decal.shaders, phong.shaders);
        assert_eq!(decal.smoothed_normals, phong.smoothed_normals);
        assert_eq!(decal.texture.as_deref(), Some(paths.decal.as_path()));
        assert!(decal.use_texture);

        let flat_decal = RenderConfig::initial(&paths).with_texture(TextureMode::Decal, &paths);
        assert!(!flat_decal.smoothed_normals);
    }

    #[test]
    fn bump_and_spherical_bring_their_own_shaders() {
        let paths = ResourcePaths::default();
        let config = RenderConfig::initial(&paths);

        let bump = config.with_texture(TextureMode::Bump, &paths);
        assert_eq!(bump.shaders, paths.bump_map_shader);
        assert_eq!(bump.texture, Some(paths.bump_maps[2].clone()));
        assert!(bump.smoothed_normals && bump.use_texture);
        assert!(bump.texture.unwrap().ends_with("res/texture_normal.bmp"));

        let sphere = config.with_texture(TextureMode::Spherical, &paths);
        assert_eq!(sphere.shaders, paths.environment_shader);
        assert_eq!(sphere.texture, Some(paths.sphere_map.clone()));
        assert!(sphere.smoothed_normals);
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("Phong".parse::<ShadingMode>().unwrap(), ShadingMode::Phong);
        assert_eq!("bump".parse::<TextureMode>().unwrap(), TextureMode::Bump);
        assert!("toon".parse::<ShadingMode>().is_err());
        assert_eq!(ShadingMode::Gouraud.to_string(), "Gouraud");
    }
}
