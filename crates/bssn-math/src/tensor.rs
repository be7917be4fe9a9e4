// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — Symbolic Tensors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fixed-size 3D tensors of symbolic components.
//!
//! Index naming follows the usual suffix convention: `_u` is one upper
//! index, `_dd` two lower, `_udd` one upper and two lower.

use bssn_types::constants::DIM;
use bssn_types::error::{BssnError, BssnResult};

use crate::calculus::Differentiator;
use crate::expr::{Expr, Symbol};

pub type Rank1 = [Expr; DIM];
pub type Rank2 = [[Expr; DIM]; DIM];
pub type Rank3 = [[[Expr; DIM]; DIM]; DIM];

pub fn zero_rank1() -> Rank1 {
    std::array::from_fn(|_| Expr::zero())
}

pub fn zero_rank2() -> Rank2 {
    std::array::from_fn(|_| zero_rank1())
}

pub fn zero_rank3() -> Rank3 {
    std::array::from_fn(|_| zero_rank2())
}

pub fn rank1_from_fn(mut f: impl FnMut(usize) -> Expr) -> Rank1 {
    std::array::from_fn(|i| f(i))
}

pub fn rank2_from_fn(mut f: impl FnMut(usize, usize) -> Expr) -> Rank2 {
    std::array::from_fn(|i| std::array::from_fn(|j| f(i, j)))
}

/// Builds the upper triangle with `f` and mirrors it, so the result is
/// symmetric by construction.
pub fn symmetric_rank2_from_fn(mut f: impl FnMut(usize, usize) -> Expr) -> Rank2 {
    let mut out = zero_rank2();
    for i in 0..DIM {
        for j in i..DIM {
            let v = f(i, j);
            out[j][i] = v.clone();
            out[i][j] = v;
        }
    }
    out
}

pub fn diagonal_rank2(diag: &Rank1) -> Rank2 {
    rank2_from_fn(|i, j| if i == j { diag[i].clone() } else { Expr::zero() })
}

/// Exact structural symmetry check.
pub fn is_symmetric(t: &Rank2) -> bool {
    first_asymmetry(t).is_none()
}

fn first_asymmetry(t: &Rank2) -> Option<(usize, usize)> {
    for i in 0..DIM {
        for j in (i + 1)..DIM {
            if t[i][j] != t[j][i] {
                return Some((i, j));
            }
        }
    }
    None
}

/// Symmetry check that reports the first offending component pair.
pub fn check_symmetric(name: &str, t: &Rank2) -> BssnResult<()> {
    match first_asymmetry(t) {
        None => Ok(()),
        Some((i, j)) => Err(BssnError::AsymmetricTensor {
            name: name.to_string(),
            i,
            j,
        }),
    }
}

/// `sum_ij a^ij b_ij`.
pub fn full_contraction(a: &Rank2, b: &Rank2) -> Expr {
    Expr::sum_of((0..DIM).flat_map(|i| (0..DIM).map(move |j| &a[i][j] * &b[i][j])))
}

/// `Gamma^i_jk = 1/2 g^il (d_k g_lj + d_j g_lk - d_l g_jk)` over the
/// given coordinates. Symmetric in the lower pair.
pub fn christoffel_udd(g_dd: &Rank2, g_uu: &Rank2, coords: &[Symbol; DIM]) -> Rank3 {
    let mut dg: [Rank2; DIM] = std::array::from_fn(|_| zero_rank2());
    for (k, coord) in coords.iter().enumerate() {
        let mut d = Differentiator::new(coord.clone());
        dg[k] = symmetric_rank2_from_fn(|i, j| d.diff(&g_dd[i][j]));
    }

    let half = Expr::rational(1, 2);
    let mut out = zero_rank3();
    for i in 0..DIM {
        for j in 0..DIM {
            for k in j..DIM {
                let v = Expr::sum_of((0..DIM).map(|l| {
                    let bracket = &dg[k][l][j] + &dg[j][l][k] - &dg[l][j][k];
                    &half * &g_uu[i][l] * bracket
                }));
                out[i][k][j] = v.clone();
                out[i][j][k] = v;
            }
        }
    }
    out
}
