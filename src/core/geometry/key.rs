use glam::Vec3;

/// Hashable identity of a vertex position, compared bit for bit.
///
/// Two positions share a key only if every coordinate has the same bit
/// pattern, with the single exception that `-0.0` and `+0.0` are folded
/// together so the key agrees with `==` on finite coordinates. Positions that
/// are geometrically coincident but differ by even one ULP get distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexKey([u32; 3]);

impl VertexKey {
    pub fn new(pos: Vec3) -> Self {
        VertexKey([canonical_bits(pos.x), canonical_bits(pos.y), canonical_bits(pos.z)])
    }

    #[cfg(test)]
    fn bits(&self) -> [u32; 3] {
        self.0
    }
}

fn canonical_bits(v: f32) -> u32 {
    // -0.0 == 0.0
    if v == 0.0 {
        0
    } else {
        v.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_positions_share_a_key() {
        let a = VertexKey::new(Vec3::new(0.25, -1.0, 3.5));
        let b = VertexKey::new(Vec3::new(0.25, -1.0, 3.5));
        assert_eq!(a, b);
    }

    #[test]
    fn one_ulp_apart_is_a_different_key() {
        let x = 1.0_f32;
        let next = f32::from_bits(x.to_bits() + 1);
        assert_ne!(
            VertexKey::new(Vec3::new(x, 0.0, 0.0)),
            VertexKey::new(Vec3::new(next, 0.0, 0.0))
        );
    }

    #[test]
    fn signed_zeros_fold_together() {
        assert_eq!(
            VertexKey::new(Vec3::new(-0.0, 0.0, -0.0)),
            VertexKey::new(Vec3::ZERO)
        );
        assert_eq!(VertexKey::new(Vec3::new(-0.0, 2.0, 0.0)).bits()[0], 0);
    }
}
