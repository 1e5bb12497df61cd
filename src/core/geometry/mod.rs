mod key;
mod mesh;
pub mod normals;

pub use key::VertexKey;
pub use mesh::TriangleSoup;
pub use normals::{
    compute_normals, compute_normals_with, compute_normals_with_stats, face_normal,
    DegeneratePolicy, NormalOptions, NormalStats,
};
