use nalgebra::Point3;
use serde::Serialize;
use std::fmt;
use tracing::debug;

const TYPICAL_COVALENT_LIMIT: f64 = 2.0;
const RIGHT_ANGLE_TOLERANCE_DEG: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AngleClass {
    Acute,
    Right,
    Obtuse,
}

impl fmt::Display for AngleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AngleClass::Acute => "Acute",
            AngleClass::Right => "Right",
            AngleClass::Obtuse => "Obtuse",
        };
        f.write_str(name)
    }
}

/// Euclidean distance between two atoms in Å.
pub fn bond_length(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    let d = nalgebra::distance(a, b);
    if d >= TYPICAL_COVALENT_LIMIT {
        debug!(
            length = d,
            "Separation is atypical for a covalent bond (non-bonded contact)."
        );
    }
    d
}

/// Angle `a–vertex–c` in degrees.
pub fn bond_angle(a: &Point3<f64>, vertex: &Point3<f64>, c: &Point3<f64>) -> f64 {
    let v1 = a - vertex;
    let v2 = c - vertex;
    let cos_theta = (v1.dot(&v2) / (v1.norm() * v2.norm())).clamp(-1.0, 1.0);
    cos_theta.acos().to_degrees()
}

pub fn classify_angle(degrees: f64) -> AngleClass {
    if (degrees - 90.0).abs() <= RIGHT_ANGLE_TOLERANCE_DEG {
        AngleClass::Right
    } else if degrees < 90.0 {
        AngleClass::Acute
    } else {
        AngleClass::Obtuse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_length_is_euclidean_distance() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 4.0, 0.0);
        assert!((bond_length(&a, &b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn bond_angle_of_right_triangle_is_ninety_degrees() {
        let a = Point3::new(1.0, 0.0, 0.0);
        let o = Point3::origin();
        let c = Point3::new(0.0, 2.0, 0.0);
        let angle = bond_angle(&a, &o, &c);
        assert!((angle - 90.0).abs() < 1e-9);
        assert_eq!(classify_angle(angle), AngleClass::Right);
    }

    #[test]
    fn bond_angle_of_equilateral_triangle_is_sixty_degrees() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.5, 3f64.sqrt() / 2.0, 0.0);
        assert!((bond_angle(&b, &a, &c) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn straight_angle_does_not_produce_nan() {
        let a = Point3::new(-1.0, 0.0, 0.0);
        let o = Point3::origin();
        let c = Point3::new(1.0, 0.0, 0.0);
        let angle = bond_angle(&a, &o, &c);
        assert!((angle - 180.0).abs() < 1e-9);
        assert_eq!(classify_angle(angle), AngleClass::Obtuse);
    }

    #[test]
    fn classify_angle_distinguishes_acute_and_obtuse() {
        assert_eq!(classify_angle(45.0), AngleClass::Acute);
        assert_eq!(classify_angle(120.0), AngleClass::Obtuse);
        assert_eq!(AngleClass::Acute.to_string(), "Acute");
    }
}
