use std::collections::HashMap;

use glam::Vec3;
use log::{debug, warn};

use super::key::VertexKey;
use crate::error::{ShadeError, ShadeResult};

/// What to do when a normal has no direction (collinear triangle, or face
/// normals around a vertex that cancel out).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Fail the whole computation.
    #[default]
    Reject,
    /// Emit `Vec3::ZERO` in place of the normal.
    ZeroVector,
}

impl DegeneratePolicy {
    fn resolve(self, err: ShadeError) -> ShadeResult<Vec3> {
        match self {
            DegeneratePolicy::Reject => Err(err),
            DegeneratePolicy::ZeroVector => Ok(Vec3::ZERO),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalOptions {
    /// Average face normals over vertices with identical coordinates.
    pub smoothed: bool,
    pub degenerate: DegeneratePolicy,
}

impl NormalOptions {
    pub fn flat() -> Self {
        Self {
            smoothed: false,
            ..Default::default()
        }
    }

    pub fn smoothed() -> Self {
        Self {
            smoothed: true,
            ..Default::default()
        }
    }

    pub fn with_policy(mut self, degenerate: DegeneratePolicy) -> Self {
        self.degenerate = degenerate;
        self
    }
}

/// Bookkeeping from one pass of the engine, mostly for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalStats {
    pub triangles: usize,
    /// Number of accumulator slots; only known in smoothed mode.
    pub unique_positions: Option<usize>,
    pub degenerate_faces: usize,
    /// Distinct positions whose accumulated normal had zero length.
    pub degenerate_vertices: usize,
}

/// Unit normal of the triangle `(v1, v2, v3)`, oriented by
/// `cross(v3 - v2, v1 - v2)`. `None` if the triangle is degenerate.
pub fn face_normal(v1: Vec3, v2: Vec3, v3: Vec3) -> Option<Vec3> {
    direction((v3 - v2).cross(v1 - v2))
}

/// Unit vector along `v`, or `None` if `v` has zero length or is not finite.
/// Scaled by its largest component first so tiny or huge vectors do not
/// underflow or overflow in `length_squared`.
fn direction(v: Vec3) -> Option<Vec3> {
    let largest = v.abs().max_element();
    if largest > 0.0 && largest.is_finite() {
        (v / largest).try_normalize()
    } else {
        None
    }
}

/// Per-vertex normals for a triangle soup, rejecting degenerate geometry.
///
/// `positions` is read three at a time; the result has the same length and
/// order. With `smoothed` set, every instance of a position receives the
/// normalised sum of the face normals of all triangles that touch it.
pub fn compute_normals(positions: &[Vec3], smoothed: bool) -> ShadeResult<Vec<Vec3>> {
    let options = NormalOptions {
        smoothed,
        degenerate: DegeneratePolicy::Reject,
    };
    compute_normals_with(positions, &options)
}

pub fn compute_normals_with(positions: &[Vec3], options: &NormalOptions) -> ShadeResult<Vec<Vec3>> {
    compute_normals_with_stats(positions, options).map(|(normals, _)| normals)
}

pub fn compute_normals_with_stats(
    positions: &[Vec3],
    options: &NormalOptions,
) -> ShadeResult<(Vec<Vec3>, NormalStats)> {
    if positions.len() % 3 != 0 {
        return Err(ShadeError::InvalidInput(format!(
            "triangle soup has {} positions, which is not a multiple of 3",
            positions.len()
        )));
    }

    let (normals, stats) = if options.smoothed {
        smoothed_normals(positions, options.degenerate)?
    } else {
        flat_normals(positions, options.degenerate)?
    };

    debug!(
        "computed {} {} normals for {} triangles",
        normals.len(),
        if options.smoothed { "smoothed" } else { "flat" },
        stats.triangles
    );
    if stats.degenerate_faces + stats.degenerate_vertices > 0 {
        warn!(
            "zeroed normals for {} degenerate faces and {} degenerate vertices",
            stats.degenerate_faces, stats.degenerate_vertices
        );
    }

    Ok((normals, stats))
}

fn flat_normals(
    positions: &[Vec3],
    policy: DegeneratePolicy,
) -> ShadeResult<(Vec<Vec3>, NormalStats)> {
    let mut stats = NormalStats::default();
    let mut normals = Vec::with_capacity(positions.len());

    for (triangle, tri) in positions.chunks_exact(3).enumerate() {
        let normal = match face_normal(tri[0], tri[1], tri[2]) {
            Some(n) => n,
            None => {
                stats.degenerate_faces += 1;
                policy.resolve(ShadeError::DegenerateTriangle { triangle })?
            }
        };
        normals.extend([normal; 3]);
        stats.triangles += 1;
    }

    Ok((normals, stats))
}

fn smoothed_normals(
    positions: &[Vec3],
    policy: DegeneratePolicy,
) -> ShadeResult<(Vec<Vec3>, NormalStats)> {
    let mut stats = NormalStats::default();

    // Accumulation: one slot per distinct key, plus the slot of every instance.
    let mut slot_of_key: HashMap<VertexKey, usize> = HashMap::new();
    let mut sums: Vec<Vec3> = Vec::new();
    let mut instance_slots: Vec<usize> = Vec::with_capacity(positions.len());

    for (triangle, tri) in positions.chunks_exact(3).enumerate() {
        let normal = match face_normal(tri[0], tri[1], tri[2]) {
            Some(n) => n,
            None => {
                stats.degenerate_faces += 1;
                policy.resolve(ShadeError::DegenerateTriangle { triangle })?
            }
        };

        for &pos in tri {
            let slot = *slot_of_key.entry(VertexKey::new(pos)).or_insert_with(|| {
                sums.push(Vec3::ZERO);
                sums.len() - 1
            });
            sums[slot] += normal;
            instance_slots.push(slot);
        }
        stats.triangles += 1;
    }

    // Normalise each slot once so every instance of a key gets identical bits.
    let averaged: Vec<Option<Vec3>> = sums.iter().map(|&sum| direction(sum)).collect();
    stats.unique_positions = Some(sums.len());
    stats.degenerate_vertices = averaged.iter().filter(|n| n.is_none()).count();

    let mut normals = Vec::with_capacity(positions.len());
    for (vertex, &slot) in instance_slots.iter().enumerate() {
        let normal = match averaged[slot] {
            Some(n) => n,
            None => policy.resolve(ShadeError::DegenerateVertex { vertex })?,
        };
        normals.push(normal);
    }

    Ok((normals, stats))
}
