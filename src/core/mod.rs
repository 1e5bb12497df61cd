pub mod camera;
pub mod color;
pub mod frame;
pub mod geometry;
pub mod shading;
pub mod transform;

pub use camera::{Direction, OrbitCamera, Projection, ViewPreset, ViewTransform};
pub use color::Color;
pub use frame::{FrameSetup, Uniforms};
pub use shading::{RenderConfig, ResourcePaths, ShaderPair, ShadingMode, TextureMode};
pub use transform::{Axis, Spin};
