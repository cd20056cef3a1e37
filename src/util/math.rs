//! Math type re-exports.
//!
//! Vectors decode into `glam` types. Components are stored exactly as read,
//! NaN and infinity included.

pub use glam::Vec3;

/// Bitwise equality of two vectors.
///
/// Unlike `==`, this treats two NaN components with the same bit pattern as
/// equal, which is what a lossless round trip guarantees.
#[inline]
pub fn vec3_bits_eq(a: Vec3, b: Vec3) -> bool {
    a.x.to_bits() == b.x.to_bits()
        && a.y.to_bits() == b.y.to_bits()
        && a.z.to_bits() == b.z.to_bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_eq_nan() {
        let a = Vec3::new(f32::NAN, 1.0, 2.0);
        assert_ne!(a, a);
        assert!(vec3_bits_eq(a, a));
        assert!(!vec3_bits_eq(a, Vec3::new(0.0, 1.0, 2.0)));
    }

    #[test]
    fn test_bits_eq_signed_zero() {
        assert!(!vec3_bits_eq(Vec3::new(0.0, 0.0, 0.0), Vec3::new(-0.0, 0.0, 0.0)));
    }
}
