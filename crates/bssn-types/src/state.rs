// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::Array1;

use crate::constants::DIM;
use crate::error::{BssnError, BssnResult};

/// Cell-centred 3D grid in curvilinear coordinates (xx0, xx1, xx2).
///
/// Points sit at `min + (i + 1/2) * dx`, so no point lands on the
/// coordinate boundary (origin, polar axis) where the Jacobian degenerates.
#[derive(Debug, Clone)]
pub struct Grid3D {
    pub n: [usize; DIM],
    pub dx: [f64; DIM],
    pub xx: [Array1<f64>; DIM], // cell-centre coordinates per axis
}

impl Grid3D {
    pub fn new(n: [usize; DIM], xx_min: [f64; DIM], xx_max: [f64; DIM]) -> BssnResult<Self> {
        for d in 0..DIM {
            if n[d] == 0 {
                return Err(BssnError::ConfigError(format!(
                    "grid axis {d} must have at least one point"
                )));
            }
            if !(xx_max[d] > xx_min[d]) {
                return Err(BssnError::ConfigError(format!(
                    "grid axis {d} needs xx_max > xx_min, got [{}, {}]",
                    xx_min[d], xx_max[d]
                )));
            }
        }

        let dx: [f64; DIM] = std::array::from_fn(|d| (xx_max[d] - xx_min[d]) / n[d] as f64);
        let xx = std::array::from_fn(|d| {
            Array1::from_iter((0..n[d]).map(|i| xx_min[d] + (i as f64 + 0.5) * dx[d]))
        });

        Ok(Grid3D { n, dx, xx })
    }

    /// Total number of points.
    pub fn len(&self) -> usize {
        self.n.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.n[0], self.n[1], self.n[2])
    }

    /// Coordinates of point (i0, i1, i2).
    pub fn point(&self, i0: usize, i1: usize, i2: usize) -> [f64; DIM] {
        [self.xx[0][i0], self.xx[1][i1], self.xx[2][i2]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid3D::new([8, 4, 2], [0.0, 0.0, 0.0], [2.0, 1.0, 1.0]).unwrap();
        assert_eq!(grid.shape(), (8, 4, 2));
        assert_eq!(grid.len(), 64);
        assert!((grid.dx[0] - 0.25).abs() < 1e-15);
        assert!((grid.xx[0][0] - 0.125).abs() < 1e-15);
        assert!((grid.xx[0][7] - 1.875).abs() < 1e-15);
        assert!((grid.xx[2][1] - 0.75).abs() < 1e-15);
    }

    #[test]
    fn test_grid_avoids_boundaries() {
        let pi = std::f64::consts::PI;
        let grid = Grid3D::new([4, 4, 4], [0.0, 0.0, -pi], [1.0, pi, pi]).unwrap();
        assert!(grid.xx[0].iter().all(|&r| r > 0.0));
        assert!(grid.xx[1].iter().all(|&th| th > 0.0 && th < pi));
    }

    #[test]
    fn test_grid_point_lookup() {
        let grid = Grid3D::new([2, 3, 4], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).unwrap();
        let p = grid.point(1, 2, 3);
        assert!((p[0] - 0.75).abs() < 1e-15);
        assert!((p[1] - 5.0 / 6.0).abs() < 1e-15);
        assert!((p[2] - 0.875).abs() < 1e-15);
    }

    #[test]
    fn test_grid_rejects_degenerate_axes() {
        assert!(Grid3D::new([0, 1, 1], [0.0; 3], [1.0; 3]).is_err());
        assert!(Grid3D::new([1, 1, 1], [0.0, 1.0, 0.0], [1.0, 1.0, 1.0]).is_err());
        assert!(Grid3D::new([1, 1, 1], [0.0, f64::NAN, 0.0], [1.0; 3]).is_err());
    }
}
