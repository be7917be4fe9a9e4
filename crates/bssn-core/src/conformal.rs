// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — Conformal Decomposition
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Conformal split of the curvilinear ADM metric and extrinsic curvature.
//!
//! The conformal metric is normalised so that `det(gammabar) = det(ghat)`:
//!
//!   gammabar_ij = (det ghat / det gamma)^(1/3) gamma_ij
//!   trK         = gamma^ij K_ij
//!   Abar_ij     = (det ghat / det gamma)^(1/3) (K_ij - gamma_ij trK / 3)
//!   Lambdabar^i = gammabar^jk (Gammabar^i_jk - Gammahat^i_jk)

use bssn_math::expr::Expr;
use bssn_math::matrix::symmetric_inverse3x3;
use bssn_math::tensor::{
    christoffel_udd, full_contraction, rank1_from_fn, symmetric_rank2_from_fn, Rank1, Rank2, Rank3,
};
use bssn_types::constants::DIM;

use crate::reference_metric::ReferenceMetricOracle;

#[derive(Debug, Clone)]
pub struct ConformalDecomposition {
    pub gamma_uu: Rank2,
    pub gamma_det: Expr,
    pub gammabar_dd: Rank2,
    pub gammabar_uu: Rank2,
    pub gammabar_det: Expr,
    pub tr_k: Expr,
    pub abar_dd: Rank2,
    pub gammabar_udd: Rank3,
    pub lambdabar_u: Rank1,
}

impl ConformalDecomposition {
    /// `gamma_dd` and `k_dd` must already be in the curvilinear basis.
    pub fn new(gamma_dd: &Rank2, k_dd: &Rank2, oracle: &impl ReferenceMetricOracle) -> Self {
        let (gamma_uu, gamma_det) = symmetric_inverse3x3(gamma_dd);
        let scale = (oracle.detgammahat() / &gamma_det).pow_rational(1, 3);

        let gammabar_dd = symmetric_rank2_from_fn(|i, j| &scale * &gamma_dd[i][j]);
        let tr_k = full_contraction(&gamma_uu, k_dd);

        let third_tr_k = Expr::rational(1, 3) * &tr_k;
        let abar_dd = symmetric_rank2_from_fn(|i, j| {
            &scale * (&k_dd[i][j] - &gamma_dd[i][j] * &third_tr_k)
        });

        let (gammabar_uu, gammabar_det) = symmetric_inverse3x3(&gammabar_dd);
        let gammabar_udd = christoffel_udd(&gammabar_dd, &gammabar_uu, oracle.coordinates());
        let gammahat_udd = oracle.gammahat_udd();
        let lambdabar_u = rank1_from_fn(|i| {
            Expr::sum_of((0..DIM).flat_map(|j| {
                let gammabar_uu = &gammabar_uu;
                let gammabar_udd = &gammabar_udd;
                (0..DIM).map(move |k| {
                    &gammabar_uu[j][k] * (&gammabar_udd[i][j][k] - &gammahat_udd[i][j][k])
                })
            }))
        });

        ConformalDecomposition {
            gamma_uu,
            gamma_det,
            gammabar_dd,
            gammabar_uu,
            gammabar_det,
            tr_k,
            abar_dd,
            gammabar_udd,
            lambdabar_u,
        }
    }
}
