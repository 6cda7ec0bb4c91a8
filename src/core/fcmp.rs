//! Tolerant floating-point comparison
//!
//! McPAT rounds every printed quantity, so exact equality is useless when
//! validating sums or diffing two reports. All numeric comparisons in the
//! checker and the differ go through [`Tolerance::eq`].

/// Default relative tolerance, matched to the rounding of the upstream tool
pub const DEFAULT_TOLERANCE: f64 = 6.0e-6;

/// Relative-tolerance comparison configuration
///
/// Passed explicitly into the checker and the differ; there is no process
/// global, so independent runs over many reports stay isolated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub relative: f64,
}

impl Tolerance {
    pub fn new(relative: f64) -> Self {
        Self { relative }
    }

    /// Tolerant equality: `|a - b| / max(|a|, |b|) < relative`
    ///
    /// Two zeros compare equal; symmetric in its arguments.
    pub fn eq(&self, a: f64, b: f64) -> bool {
        let hi = a.abs().max(b.abs());
        if hi == 0.0 {
            return true;
        }
        (a - b).abs() / hi < self.relative
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            relative: DEFAULT_TOLERANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_equal() {
        let tol = Tolerance::default();
        assert!(tol.eq(1.0, 1.0));
        assert!(tol.eq(-3.25, -3.25));
    }

    #[test]
    fn test_both_zero() {
        let tol = Tolerance::default();
        assert!(tol.eq(0.0, 0.0));
        assert!(tol.eq(0.0, -0.0));
    }

    #[test]
    fn test_within_tolerance() {
        let tol = Tolerance::default();
        assert!(tol.eq(100.0, 100.0 + 100.0 * 1e-7));
        assert!(tol.eq(1e-12, 1.0000001e-12));
    }

    #[test]
    fn test_outside_tolerance() {
        let tol = Tolerance::default();
        assert!(!tol.eq(100.0, 100.1));
        assert!(!tol.eq(0.0, 1e-9));
        assert!(!tol.eq(1.0, -1.0));
    }

    #[test]
    fn test_symmetric() {
        let tol = Tolerance::default();
        for (a, b) in [(1.0, 1.0000001), (5.0, -5.0), (0.0, 0.0), (2.0, 3.0)] {
            assert_eq!(tol.eq(a, b), tol.eq(b, a));
        }
    }

    #[test]
    fn test_custom_tolerance() {
        let loose = Tolerance::new(0.05);
        assert!(loose.eq(100.0, 104.0));
        assert!(!loose.eq(100.0, 106.0));
    }
}
