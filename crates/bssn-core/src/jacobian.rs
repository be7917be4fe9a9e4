// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — Coordinate Jacobian
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Jacobian of the spherical-from-curvilinear map and the basis change
//! of ADM tensors it induces.
//!
//! With `J[i][j] = d(xx_sph[i])/d(xx[j])`:
//!   V^i   = sum_j Jinv[i][j] V_sph^j
//!   T_ij  = sum_kl J[k][i] J[l][j] T_sph_kl

use bssn_math::calculus::Differentiator;
use bssn_math::eval::{Bindings, Evaluator};
use bssn_math::expr::Expr;
use bssn_math::matrix::generic_inverse3x3;
use bssn_math::tensor::{rank1_from_fn, symmetric_rank2_from_fn, zero_rank2, Rank1, Rank2};
use bssn_types::constants::DIM;
use bssn_types::error::{BssnError, BssnResult};

use crate::adm::AdmFields;
use crate::reference_metric::ReferenceMetricOracle;

#[derive(Debug, Clone)]
pub struct CoordinateJacobian {
    /// `d(xx_sph[i]) / d(xx[j])`
    pub d_sph_d_curv: Rank2,
    /// `d(xx[i]) / d(xx_sph[j])`, the matrix inverse of the above.
    pub d_curv_d_sph: Rank2,
}

impl CoordinateJacobian {
    pub fn new(oracle: &impl ReferenceMetricOracle) -> Self {
        let xx_sph = oracle.xx_sph();
        let mut d_sph_d_curv = zero_rank2();
        for (j, coord) in oracle.coordinates().iter().enumerate() {
            let mut d = Differentiator::new(coord.clone());
            for i in 0..DIM {
                d_sph_d_curv[i][j] = d.diff(&xx_sph[i]);
            }
        }
        let (d_curv_d_sph, _) = generic_inverse3x3(&d_sph_d_curv);
        CoordinateJacobian {
            d_sph_d_curv,
            d_curv_d_sph,
        }
    }

    /// Contravariant vector: `V^i = Jinv[i][j] V_sph^j`.
    pub fn vector_to_curvilinear(&self, v_sph: &Rank1) -> Rank1 {
        let jinv = &self.d_curv_d_sph;
        rank1_from_fn(|i| Expr::sum_of((0..DIM).map(|j| &jinv[i][j] * &v_sph[j])))
    }

    /// Covariant symmetric rank-2: `T_ij = J[k][i] J[l][j] T_sph_kl`.
    pub fn covariant_to_curvilinear(&self, t_sph: &Rank2) -> Rank2 {
        let jac = &self.d_sph_d_curv;
        symmetric_rank2_from_fn(|i, j| {
            Expr::sum_of((0..DIM).flat_map(|k| {
                (0..DIM).map(move |l| Expr::product_of([
                    jac[k][i].clone(),
                    jac[l][j].clone(),
                    t_sph[k][l].clone(),
                ]))
            }))
        })
    }

    /// Applies the basis change to every field. The lapse is a scalar.
    pub fn transform(&self, fields: &AdmFields) -> AdmFields {
        AdmFields {
            gamma_dd: self.covariant_to_curvilinear(&fields.gamma_dd),
            k_dd: self.covariant_to_curvilinear(&fields.k_dd),
            alpha: fields.alpha.clone(),
            beta_u: self.vector_to_curvilinear(&fields.beta_u),
            b_u: self.vector_to_curvilinear(&fields.b_u),
        }
    }

    /// Numerical values of `J` at one point.
    pub fn evaluate(&self, bindings: &Bindings) -> BssnResult<[[f64; DIM]; DIM]> {
        let mut ev = Evaluator::new(bindings);
        let mut out = [[0.0; DIM]; DIM];
        for i in 0..DIM {
            for j in 0..DIM {
                out[i][j] = ev.eval(&self.d_sph_d_curv[i][j])?;
            }
        }
        Ok(out)
    }
}

/// Central-difference Jacobian of `xx_sph` at the point given by
/// `bindings`, for checking the analytical one.
pub fn finite_difference_jacobian(
    oracle: &impl ReferenceMetricOracle,
    bindings: &Bindings,
    step: f64,
) -> BssnResult<[[f64; DIM]; DIM]> {
    let coords = oracle.coordinates();
    let mut out = [[0.0; DIM]; DIM];
    for (j, coord) in coords.iter().enumerate() {
        let centre = bindings
            .get(coord)
            .ok_or_else(|| BssnError::UnboundSymbol(coord.name().to_string()))?;
        let mut plus = bindings.clone();
        plus.set(coord.name(), centre + step);
        let mut minus = bindings.clone();
        minus.set(coord.name(), centre - step);
        for i in 0..DIM {
            let hi = oracle.xx_sph()[i].eval(&plus)?;
            let lo = oracle.xx_sph()[i].eval(&minus)?;
            out[i][j] = (hi - lo) / (2.0 * step);
        }
    }
    Ok(out)
}
