// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — 3x3 Symbolic Matrix Inversion
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Closed-form determinant and inverse of 3x3 symbolic matrices.
//!
//! Singular matrices are not detected: the inverse then carries a
//! vanishing determinant in its denominators, which evaluates to an
//! infinity or NaN at the singular point.

use crate::expr::Expr;
use crate::tensor::{rank2_from_fn, symmetric_rank2_from_fn, Rank2};

/// Cofactor expansion along the first row.
pub fn determinant3x3(m: &Rank2) -> Expr {
    let c0 = &m[1][1] * &m[2][2] - &m[1][2] * &m[2][1];
    let c1 = &m[1][0] * &m[2][2] - &m[1][2] * &m[2][0];
    let c2 = &m[1][0] * &m[2][1] - &m[1][1] * &m[2][0];
    &m[0][0] * c0 - &m[0][1] * c1 + &m[0][2] * c2
}

/// Inverse and determinant of an arbitrary 3x3 matrix.
pub fn generic_inverse3x3(m: &Rank2) -> (Rank2, Expr) {
    let det = determinant3x3(m);
    let inv_det = det.recip();
    // adjugate: transpose of the cofactor matrix
    let inv = rank2_from_fn(|i, j| {
        let (r0, r1) = others(j);
        let (c0, c1) = others(i);
        let minor = &m[r0][c0] * &m[r1][c1] - &m[r0][c1] * &m[r1][c0];
        let signed = if (i + j) % 2 == 0 { minor } else { -minor };
        signed * &inv_det
    });
    (inv, det)
}

fn others(k: usize) -> (usize, usize) {
    match k {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

/// Inverse and determinant of a symmetric 3x3 matrix; reads only the
/// upper triangle and returns an exactly symmetric result.
pub fn symmetric_inverse3x3(m: &Rank2) -> (Rank2, Expr) {
    let [a00, a01, a02] = &m[0];
    let a11 = &m[1][1];
    let a12 = &m[1][2];
    let a22 = &m[2][2];

    let det = Expr::sum_of([
        -(a02.powi(2) * a11),
        Expr::int(2) * a01 * a02 * a12,
        -(a00 * a12.powi(2)),
        -(a01.powi(2) * a22),
        a00 * a11 * a22,
    ]);
    let inv_det = det.recip();

    let inv = symmetric_rank2_from_fn(|i, j| {
        let numer = match (i, j) {
            (0, 0) => a11 * a22 - a12.powi(2),
            (0, 1) => a02 * a12 - a01 * a22,
            (0, 2) => a01 * a12 - a02 * a11,
            (1, 1) => a00 * a22 - a02.powi(2),
            (1, 2) => a01 * a02 - a00 * a12,
            _ => a00 * a11 - a01.powi(2),
        };
        numer * &inv_det
    });
    (inv, det)
}
