// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — Coordinate Substitution
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Re-expresses spherical ADM fields in the curvilinear coordinates.
//!
//! Components keep their spherical basis; only the independent variables
//! change. The basis change happens in [`crate::jacobian`].

use bssn_math::expr::{Expr, Symbol};
use bssn_math::tensor::{rank1_from_fn, symmetric_rank2_from_fn};
use bssn_types::constants::DIM;

use crate::adm::AdmFields;
use crate::reference_metric::ReferenceMetricOracle;

/// Replaces `(r, th, ph)` by `xx_sph(xx)` in every component.
pub fn substitute_spherical_coords(
    coords: &[Symbol; DIM],
    fields: &AdmFields,
    oracle: &impl ReferenceMetricOracle,
) -> AdmFields {
    let xx_sph = oracle.xx_sph();
    let replacements: Vec<(Symbol, Expr)> = coords
        .iter()
        .cloned()
        .zip(xx_sph.iter().cloned())
        .collect();
    let subs = |e: &Expr| e.subs(&replacements);

    AdmFields {
        gamma_dd: symmetric_rank2_from_fn(|i, j| subs(&fields.gamma_dd[i][j])),
        k_dd: symmetric_rank2_from_fn(|i, j| subs(&fields.k_dd[i][j])),
        alpha: subs(&fields.alpha),
        beta_u: rank1_from_fn(|i| subs(&fields.beta_u[i])),
        b_u: rank1_from_fn(|i| subs(&fields.b_u[i])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adm::default_spherical_coords;
    use crate::reference_metric::ReferenceMetric;
    use bssn_math::tensor::{diagonal_rank2, zero_rank1, zero_rank2};
    use bssn_types::config::{CoordParams, CoordSystem};

    fn fields_in_r() -> AdmFields {
        let r = Expr::symbol("r");
        AdmFields {
            gamma_dd: diagonal_rank2(&[Expr::one() + r.recip(), r.powi(2), Expr::int(3)]),
            k_dd: zero_rank2(),
            alpha: Expr::rational(1, 2),
            beta_u: [r.clone(), Expr::zero(), Expr::zero()],
            b_u: zero_rank1(),
        }
    }

    #[test]
    fn test_spherical_substitution_renames() {
        let rm = ReferenceMetric::new(CoordSystem::Spherical, CoordParams::default()).unwrap();
        let out = substitute_spherical_coords(&default_spherical_coords(), &fields_in_r(), &rm);
        let xx0 = Expr::symbol("xx0");
        assert_eq!(out.gamma_dd[1][1], xx0.powi(2));
        assert_eq!(out.beta_u[0], xx0);
        assert!(!out.gamma_dd[0][0].depends_on(&Symbol::new("r")));
    }

    #[test]
    fn test_literals_pass_through() {
        let rm = ReferenceMetric::new(CoordSystem::Cartesian, CoordParams::default()).unwrap();
        let input = fields_in_r();
        let out = substitute_spherical_coords(&default_spherical_coords(), &input, &rm);
        assert_eq!(out.alpha, Expr::rational(1, 2));
        assert_eq!(out.gamma_dd[2][2], Expr::int(3));
        assert!(out.k_dd[0][1].is_zero());
    }

    #[test]
    fn test_input_is_not_mutated() {
        let rm = ReferenceMetric::new(CoordSystem::Cylindrical, CoordParams::default()).unwrap();
        let input = fields_in_r();
        let snapshot = fields_in_r();
        let _ = substitute_spherical_coords(&default_spherical_coords(), &input, &rm);
        assert_eq!(input, snapshot);
    }
}
