// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — Property-Based Tests (proptest) for bssn-core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for bssn-core using proptest.
//!
//! Covers: conformal determinant, trace-free Abar, conformal factor
//! branch equivalence, Kerr-Schild trace, grid sampling.
//!
//! Symbolic conversions are built once per process; only the numeric
//! checks run per case.

use std::sync::OnceLock;

use bssn_core::initial_data::{schwarzschild_isotropic, schwarzschild_kerr_schild};
use bssn_core::reference_metric::{ReferenceMetric, ReferenceMetricOracle};
use bssn_core::rescale::BssnCurvilinear;
use bssn_core::sample::sample_on_grid;
use bssn_core::spherical_adm_to_bssn_curvilinear;
use bssn_math::eval::{Bindings, Evaluator};
use bssn_math::expr::Expr;
use bssn_math::matrix::symmetric_inverse3x3;
use bssn_math::tensor::symmetric_rank2_from_fn;
use bssn_types::config::{ConformalFactor, CoordParams, CoordSystem};
use bssn_types::state::Grid3D;
use proptest::prelude::*;

struct Converted {
    rm: ReferenceMetric,
    phi: BssnCurvilinear,
    chi: BssnCurvilinear,
    w: BssnCurvilinear,
}

/// Kerr-Schild Schwarzschild in sinh-spherical coordinates, all three
/// conformal factor choices.
fn kerr_schild_sinh() -> &'static Converted {
    static CELL: OnceLock<Converted> = OnceLock::new();
    CELL.get_or_init(|| {
        let rm = ReferenceMetric::new(CoordSystem::SinhSpherical, CoordParams::default()).unwrap();
        let adm = schwarzschild_kerr_schild(&Expr::symbol("M"));
        let run = |kind| spherical_adm_to_bssn_curvilinear(&adm, &rm, kind).unwrap();
        let (phi, chi, w) = (
            run(ConformalFactor::Phi),
            run(ConformalFactor::Chi),
            run(ConformalFactor::W),
        );
        Converted { rm, phi, chi, w }
    })
}

fn bindings(rm: &ReferenceMetric, mass: f64, xx: [f64; 3]) -> Bindings {
    rm.parameter_bindings()
        .with("M", mass)
        .with("xx0", xx[0])
        .with("xx1", xx[1])
        .with("xx2", xx[2])
}

/// `gammabar = ghat + h * ReDD`
fn gammabar_from(out: &BssnCurvilinear, rm: &ReferenceMetric) -> [[Expr; 3]; 3] {
    symmetric_rank2_from_fn(|i, j| &rm.ghat_dd()[i][j] + &out.h_dd[i][j] * &rm.re_dd()[i][j])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// det(gammabar) equals det(ghat).
    #[test]
    fn conformal_metric_has_reference_determinant(
        mass in 0.1f64..1.0,
        x0 in 0.2f64..1.0,
        x1 in 0.2f64..2.9,
        x2 in 0.0f64..6.2,
    ) {
        let c = kerr_schild_sinh();
        let gammabar = gammabar_from(&c.w, &c.rm);
        let (_, det) = symmetric_inverse3x3(&gammabar);
        let b = bindings(&c.rm, mass, [x0, x1, x2]);
        let mut ev = Evaluator::new(&b);
        let det_bar = ev.eval(&det).unwrap();
        let det_hat = ev.eval(c.rm.detgammahat()).unwrap();
        prop_assert!((det_bar - det_hat).abs() < 1e-9 * det_hat.abs(),
            "det(gammabar) = {}, det(ghat) = {}", det_bar, det_hat);
    }

    /// gammabar^ij Abar_ij vanishes.
    #[test]
    fn abar_is_trace_free(
        mass in 0.1f64..1.0,
        x0 in 0.2f64..1.0,
        x1 in 0.2f64..2.9,
        x2 in 0.0f64..6.2,
    ) {
        let c = kerr_schild_sinh();
        let gammabar = gammabar_from(&c.chi, &c.rm);
        let (gammabar_uu, _) = symmetric_inverse3x3(&gammabar);
        let b = bindings(&c.rm, mass, [x0, x1, x2]);
        let mut ev = Evaluator::new(&b);
        let mut trace = 0.0;
        let mut scale = 0.0;
        for i in 0..3 {
            for j in 0..3 {
                let abar = ev.eval(&(&c.chi.a_dd[i][j] * &c.rm.re_dd()[i][j])).unwrap();
                let term = ev.eval(&gammabar_uu[i][j]).unwrap() * abar;
                trace += term;
                scale += term.abs();
            }
        }
        prop_assert!(trace.abs() < 1e-9 * (1.0 + scale), "trace = {}", trace);
    }

    /// chi = exp(-4 phi) and W = exp(-2 phi).
    #[test]
    fn conformal_factor_branches_agree(
        mass in 0.1f64..1.0,
        x0 in 0.2f64..1.0,
        x1 in 0.2f64..2.9,
    ) {
        let c = kerr_schild_sinh();
        let b = bindings(&c.rm, mass, [x0, x1, 0.0]);
        let phi = c.phi.cf.eval(&b).unwrap();
        let chi = c.chi.cf.eval(&b).unwrap();
        let w = c.w.cf.eval(&b).unwrap();
        prop_assert!((chi - (-4.0 * phi).exp()).abs() < 1e-12 * chi.abs().max(1.0));
        prop_assert!((w - (-2.0 * phi).exp()).abs() < 1e-12 * w.abs().max(1.0));
    }

    /// trK is a scalar: the closed form in r holds in stretched coordinates.
    #[test]
    fn kerr_schild_trace_is_coordinate_independent(
        mass in 0.1f64..1.0,
        x0 in 0.2f64..1.0,
        x1 in 0.2f64..2.9,
    ) {
        let c = kerr_schild_sinh();
        let b = bindings(&c.rm, mass, [x0, x1, 0.3]);
        let r = c.rm.xx_sph()[0].eval(&b).unwrap();
        let alpha = 1.0 / (1.0 + 2.0 * mass / r).sqrt();
        let expected = 2.0 * mass * alpha.powi(3) * (1.0 + 3.0 * mass / r) / (r * r);
        let tr_k = c.w.tr_k.eval(&b).unwrap();
        prop_assert!((tr_k - expected).abs() < 1e-9 * (1.0 + expected.abs()),
            "trK = {}, expected {}", tr_k, expected);
    }

    /// Grid sampling agrees with direct evaluation at every cell centre.
    #[test]
    fn sampled_grid_matches_pointwise(
        n0 in 1usize..4,
        n1 in 1usize..3,
        mass in 0.1f64..1.0,
    ) {
        let c = kerr_schild_sinh();
        let grid = Grid3D::new([n0, n1, 1], [0.1, 0.2, 0.0], [1.0, 3.0, 6.2]).unwrap();
        let extra = Bindings::new().with("M", mass);
        let sampled = sample_on_grid(&c.chi, &c.rm, &grid, &extra).unwrap();
        let cf = &sampled["cf"];
        for i0 in 0..n0 {
            for i1 in 0..n1 {
                let xx = grid.point(i0, i1, 0);
                let direct = c.chi.cf.eval(&bindings(&c.rm, mass, xx)).unwrap();
                prop_assert!((cf[[i0, i1, 0]] - direct).abs() <= 1e-14 * direct.abs());
            }
        }
    }
}

#[test]
fn isotropic_conformal_factor_is_exact_in_every_branch() {
    let rm = ReferenceMetric::new(CoordSystem::Spherical, CoordParams::default()).unwrap();
    let m = Expr::symbol("M");
    let adm = schwarzschild_isotropic(&m);
    let psi = bssn_core::initial_data::isotropic_psi(&m, &Expr::symbol("xx0"));

    let phi = spherical_adm_to_bssn_curvilinear(&adm, &rm, ConformalFactor::Phi).unwrap();
    let w = spherical_adm_to_bssn_curvilinear(&adm, &rm, ConformalFactor::W).unwrap();
    assert_eq!(w.cf, psi.powi(-2));
    assert_eq!(phi.cf, Expr::rational(1, 12) * psi.powi(12).log());
}
