// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — Closed-Form Spherical ADM Data
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Analytic spherical ADM data sets written in `(r, th, ph)`.
//!
//! The mass may be a number or a symbol; a symbolic mass must be bound
//! when the converted fields are evaluated.

use bssn_math::expr::Expr;
use bssn_math::tensor::{diagonal_rank2, zero_rank1, zero_rank2, Rank2};

use crate::adm::{default_spherical_coords, AdmFields, SphericalAdm};

/// `diag(1, r^2, r^2 sin^2 th)` and the coordinate expressions `(r, th)`.
fn flat_spherical() -> (Rank2, Expr, Expr) {
    let [r, th, _] = default_spherical_coords().map(|s| s.expr());
    let g = diagonal_rank2(&[Expr::one(), r.powi(2), r.powi(2) * th.sin().powi(2)]);
    (g, r, th)
}

/// Flat space with unit lapse and zero shift.
pub fn minkowski() -> SphericalAdm {
    let (gamma_dd, _, _) = flat_spherical();
    SphericalAdm::from_symmetric(
        default_spherical_coords(),
        AdmFields {
            gamma_dd,
            k_dd: zero_rank2(),
            alpha: Expr::one(),
            beta_u: zero_rank1(),
            b_u: zero_rank1(),
        },
    )
}

/// Time-symmetric Schwarzschild slice in isotropic coordinates:
/// `gamma = psi^4 flat`, `psi = 1 + M/(2r)`, `K = 0`, unit lapse.
pub fn schwarzschild_isotropic(mass: &Expr) -> SphericalAdm {
    let (flat, r, _) = flat_spherical();
    let psi4 = isotropic_psi(mass, &r).powi(4);
    let gamma_dd = diagonal_rank2(&[
        &psi4 * &flat[0][0],
        &psi4 * &flat[1][1],
        &psi4 * &flat[2][2],
    ]);
    SphericalAdm::from_symmetric(
        default_spherical_coords(),
        AdmFields {
            gamma_dd,
            k_dd: zero_rank2(),
            alpha: Expr::one(),
            beta_u: zero_rank1(),
            b_u: zero_rank1(),
        },
    )
}

/// `psi = 1 + M/(2r)`
pub fn isotropic_psi(mass: &Expr, r: &Expr) -> Expr {
    Expr::one() + mass / (Expr::int(2) * r)
}

/// Schwarzschild in ingoing Kerr-Schild coordinates; a stationary slice
/// with nonzero shift and extrinsic curvature.
pub fn schwarzschild_kerr_schild(mass: &Expr) -> SphericalAdm {
    let (flat, r, th) = flat_spherical();
    let h = Expr::int(2) * mass / &r;
    let one_plus_h = Expr::one() + &h;
    let alpha = one_plus_h.pow_rational(-1, 2);

    let gamma_dd = diagonal_rank2(&[one_plus_h.clone(), flat[1][1].clone(), flat[2][2].clone()]);

    let two_m_alpha = Expr::int(2) * mass * &alpha;
    let k_rr = -(Expr::int(2) * mass / r.powi(2)) * (Expr::one() + mass / &r) * &alpha;
    let k_dd = diagonal_rank2(&[k_rr, two_m_alpha.clone(), two_m_alpha * th.sin().powi(2)]);

    let beta_u = [&h / &one_plus_h, Expr::zero(), Expr::zero()];

    SphericalAdm::from_symmetric(
        default_spherical_coords(),
        AdmFields {
            gamma_dd,
            k_dd,
            alpha,
            beta_u,
            b_u: zero_rank1(),
        },
    )
}
