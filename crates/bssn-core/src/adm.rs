// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — ADM Input Fields
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! ADM 3+1 fields and their spherical-coordinate wrapper.

use bssn_math::expr::{Expr, Symbol};
use bssn_math::tensor::{check_symmetric, Rank1, Rank2};
use bssn_types::constants::{DIM, SPHERICAL_COORDS};
use bssn_types::error::BssnResult;

/// ADM fields in one coordinate basis.
#[derive(Debug, Clone, PartialEq)]
pub struct AdmFields {
    /// Spatial 3-metric `gamma_ij`.
    pub gamma_dd: Rank2,
    /// Extrinsic curvature `K_ij`.
    pub k_dd: Rank2,
    pub alpha: Expr,
    pub beta_u: Rank1,
    /// Shift-evolution auxiliary vector `B^i`.
    pub b_u: Rank1,
}

impl AdmFields {
    pub fn check_symmetry(&self) -> BssnResult<()> {
        check_symmetric("gammaDD", &self.gamma_dd)?;
        check_symmetric("KDD", &self.k_dd)
    }
}

/// ADM data written in terms of spherical coordinates `(r, th, ph)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SphericalAdm {
    coords: [Symbol; DIM],
    fields: AdmFields,
}

impl SphericalAdm {
    /// Rejects a non-symmetric `gamma_ij` or `K_ij`.
    pub fn new(coords: [Symbol; DIM], fields: AdmFields) -> BssnResult<Self> {
        fields.check_symmetry()?;
        Ok(SphericalAdm { coords, fields })
    }

    /// Same as [`SphericalAdm::new`] with the default symbols `r, th, ph`.
    pub fn with_default_coords(fields: AdmFields) -> BssnResult<Self> {
        Self::new(default_spherical_coords(), fields)
    }

    /// For builders that produce symmetric tensors by construction.
    pub(crate) fn from_symmetric(coords: [Symbol; DIM], fields: AdmFields) -> Self {
        SphericalAdm { coords, fields }
    }

    pub fn coords(&self) -> &[Symbol; DIM] {
        &self.coords
    }

    pub fn fields(&self) -> &AdmFields {
        &self.fields
    }
}

pub fn default_spherical_coords() -> [Symbol; DIM] {
    std::array::from_fn(|i| Symbol::new(SPHERICAL_COORDS[i]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bssn_math::tensor::{zero_rank1, zero_rank2};
    use bssn_types::error::BssnError;

    fn flat_fields() -> AdmFields {
        AdmFields {
            gamma_dd: zero_rank2(),
            k_dd: zero_rank2(),
            alpha: Expr::one(),
            beta_u: zero_rank1(),
            b_u: zero_rank1(),
        }
    }

    #[test]
    fn test_accepts_symmetric_input() {
        let adm = SphericalAdm::with_default_coords(flat_fields()).unwrap();
        assert_eq!(adm.coords()[0].name(), "r");
        assert!(adm.fields().alpha.is_one());
    }

    #[test]
    fn test_rejects_asymmetric_curvature() {
        let mut fields = flat_fields();
        fields.k_dd[0][2] = Expr::symbol("r");
        let err = SphericalAdm::with_default_coords(fields).unwrap_err();
        match err {
            BssnError::AsymmetricTensor { name, i, j } => {
                assert_eq!(name, "KDD");
                assert_eq!((i, j), (0, 2));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
