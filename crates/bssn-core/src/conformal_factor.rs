// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — Conformal Factor
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Evolved conformal factor from the physical and conformal determinants.

use bssn_math::expr::Expr;
use bssn_types::config::ConformalFactor;

/// With `q = det(gamma) / det(gammabar)`:
///   phi = log(q) / 12,  chi = q^(-1/3),  W = q^(-1/6)
pub fn conformal_factor(kind: ConformalFactor, gamma_det: &Expr, gammabar_det: &Expr) -> Expr {
    let ratio = gamma_det / gammabar_det;
    match kind {
        ConformalFactor::Phi => Expr::rational(1, 12) * ratio.log(),
        ConformalFactor::Chi => ratio.pow_rational(-1, 3),
        ConformalFactor::W => ratio.pow_rational(-1, 6),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bssn_math::eval::Bindings;

    #[test]
    fn test_unit_ratio() {
        let d = Expr::symbol("d");
        assert!(conformal_factor(ConformalFactor::Phi, &d, &d).is_zero());
        assert!(conformal_factor(ConformalFactor::Chi, &d, &d).is_one());
        assert!(conformal_factor(ConformalFactor::W, &d, &d).is_one());
    }

    #[test]
    fn test_exact_powers() {
        let num = Expr::int(64);
        let den = Expr::one();
        assert_eq!(conformal_factor(ConformalFactor::Chi, &num, &den), Expr::rational(1, 4));
        assert_eq!(conformal_factor(ConformalFactor::W, &num, &den), Expr::rational(1, 2));
    }

    #[test]
    fn test_branches_agree_numerically() {
        let q = Expr::symbol("q");
        let one = Expr::one();
        let b = Bindings::new().with("q", 3.7);
        let phi = conformal_factor(ConformalFactor::Phi, &q, &one).eval(&b).unwrap();
        let chi = conformal_factor(ConformalFactor::Chi, &q, &one).eval(&b).unwrap();
        let w = conformal_factor(ConformalFactor::W, &q, &one).eval(&b).unwrap();
        assert_relative_eq!(chi, (-4.0 * phi).exp(), max_relative = 1e-14);
        assert_relative_eq!(w, (-2.0 * phi).exp(), max_relative = 1e-14);
    }
}
