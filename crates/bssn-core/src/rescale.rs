// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — Rescaled BSSN Variables
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Removes the coordinate scale factors from the BSSN tensors so that
//! the evolved components stay regular at coordinate singularities.

use bssn_math::expr::Expr;
use bssn_math::tensor::{rank1_from_fn, symmetric_rank2_from_fn, Rank1, Rank2};
use bssn_types::constants::DIM;
use bssn_types::error::BssnResult;
use serde::Serialize;

use crate::reference_metric::ReferenceMetricOracle;

/// Rescaled BSSN initial data in curvilinear coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BssnCurvilinear {
    /// Conformal factor in the chosen representation (phi, chi or W).
    pub cf: Expr,
    pub h_dd: Rank2,
    pub lambda_u: Rank1,
    pub a_dd: Rank2,
    pub tr_k: Expr,
    pub alpha: Expr,
    pub vet_u: Rank1,
    pub bet_u: Rank1,
}

/// Inputs to [`rescale`], all in the curvilinear basis.
pub struct UnscaledBssn<'a> {
    pub cf: Expr,
    pub gammabar_dd: &'a Rank2,
    pub abar_dd: &'a Rank2,
    pub lambdabar_u: &'a Rank1,
    pub tr_k: &'a Expr,
    pub alpha: &'a Expr,
    pub beta_u: &'a Rank1,
    pub b_u: &'a Rank1,
}

pub fn rescale(input: UnscaledBssn<'_>, oracle: &impl ReferenceMetricOracle) -> BssnCurvilinear {
    let ghat = oracle.ghat_dd();
    let re_dd = oracle.re_dd();
    let re_u = oracle.re_u();

    let h_dd = symmetric_rank2_from_fn(|i, j| {
        (&input.gammabar_dd[i][j] - &ghat[i][j]) / &re_dd[i][j]
    });
    let a_dd = symmetric_rank2_from_fn(|i, j| &input.abar_dd[i][j] / &re_dd[i][j]);
    let per_re_u = |v: &Rank1| rank1_from_fn(|i| &v[i] / &re_u[i]);

    BssnCurvilinear {
        cf: input.cf,
        h_dd,
        lambda_u: per_re_u(input.lambdabar_u),
        a_dd,
        tr_k: input.tr_k.clone(),
        alpha: input.alpha.clone(),
        vet_u: per_re_u(input.beta_u),
        bet_u: per_re_u(input.b_u),
    }
}

#[derive(Serialize)]
struct FieldRecord {
    name: String,
    expression: String,
}

impl BssnCurvilinear {
    /// Every scalar component under its grid-function name, rank-2
    /// tensors as upper triangles.
    pub fn named_fields(&self) -> Vec<(String, Expr)> {
        let mut out = Vec::with_capacity(24);
        out.push(("cf".to_string(), self.cf.clone()));
        push_symmetric(&mut out, "hDD", &self.h_dd);
        push_vector(&mut out, "lambdaU", &self.lambda_u);
        push_symmetric(&mut out, "aDD", &self.a_dd);
        out.push(("trK".to_string(), self.tr_k.clone()));
        out.push(("alpha".to_string(), self.alpha.clone()));
        push_vector(&mut out, "vetU", &self.vet_u);
        push_vector(&mut out, "betU", &self.bet_u);
        out
    }

    pub fn to_json_pretty(&self) -> BssnResult<String> {
        let records: Vec<FieldRecord> = self
            .named_fields()
            .into_iter()
            .map(|(name, e)| FieldRecord {
                name,
                expression: e.to_string(),
            })
            .collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }
}

fn push_symmetric(out: &mut Vec<(String, Expr)>, prefix: &str, t: &Rank2) {
    for i in 0..DIM {
        for j in i..DIM {
            out.push((format!("{prefix}{i}{j}"), t[i][j].clone()));
        }
    }
}

fn push_vector(out: &mut Vec<(String, Expr)>, prefix: &str, v: &Rank1) {
    for (i, e) in v.iter().enumerate() {
        out.push((format!("{prefix}{i}"), e.clone()));
    }
}
