// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — Reference Metric
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Flat reference metric of an orthogonal curvilinear coordinate system.
//!
//! Every supported system is orthogonal, so the reference metric is
//! `ghat = diag(sf0^2, sf1^2, sf2^2)` for the scale factors `sf`, and the
//! rescaling factors are `ReU[i] = 1/sf[i]`, `ReDD[i][j] = sf[i]*sf[j]`.
//!
//! Stretching parameters (`AMPL`, `SINHW`, ...) stay symbolic in every
//! expression; [`ReferenceMetric::parameter_bindings`] supplies their
//! configured values for numerical evaluation.

use bssn_math::eval::Bindings;
use bssn_math::expr::{Expr, Symbol};
use bssn_math::matrix::symmetric_inverse3x3;
use bssn_math::tensor::{
    christoffel_udd, diagonal_rank2, rank1_from_fn, rank2_from_fn, Rank1, Rank2, Rank3,
};
use bssn_types::config::{ConversionConfig, CoordParams, CoordSystem};
use bssn_types::constants::{CURVILINEAR_COORDS, DIM};
use bssn_types::error::BssnResult;

/// Read-only view of a fully built reference metric.
///
/// The conversion pipeline only talks to this trait, so callers with their
/// own coordinate systems can supply an implementation.
pub trait ReferenceMetricOracle {
    fn coord_system(&self) -> CoordSystem;

    /// Curvilinear coordinate symbols `xx0, xx1, xx2`.
    fn coordinates(&self) -> &[Symbol; DIM];

    /// Spherical `(r, th, ph)` as functions of the curvilinear coordinates.
    fn xx_sph(&self) -> &Rank1;

    fn ghat_dd(&self) -> &Rank2;

    fn gammahat_udd(&self) -> &Rank3;

    fn detgammahat(&self) -> &Expr;

    fn re_u(&self) -> &Rank1;

    fn re_dd(&self) -> &Rank2;
}

#[derive(Debug, Clone)]
pub struct ReferenceMetric {
    coord_system: CoordSystem,
    params: CoordParams,
    xx: [Symbol; DIM],
    xx_sph: Rank1,
    scale_factors: Rank1,
    ghat_dd: Rank2,
    ghat_uu: Rank2,
    detgammahat: Expr,
    gammahat_udd: Rank3,
    re_u: Rank1,
    re_dd: Rank2,
}

/// `ampl * sinh(x/w) / sinh(1/w)` and its derivative in `x`.
fn sinh_stretch(x: &Expr, ampl: &Expr, width: &Expr) -> (Expr, Expr) {
    let norm = width.recip().sinh().recip();
    let value = ampl * (x / width).sinh() * &norm;
    let slope = ampl * width.recip() * (x / width).cosh() * norm;
    (value, slope)
}

/// Spherical `(r, th)` of a point given by cylindrical `(rho, z)`.
fn spherical_from_cylindrical(rho: &Expr, z: &Expr) -> (Expr, Expr) {
    let r = (rho.powi(2) + z.powi(2)).sqrt();
    let th = (z / &r).acos();
    (r, th)
}

impl ReferenceMetric {
    pub fn new(coord_system: CoordSystem, params: CoordParams) -> BssnResult<Self> {
        params.validate()?;

        let xx: [Symbol; DIM] = std::array::from_fn(|i| Symbol::new(CURVILINEAR_COORDS[i]));
        let [x0, x1, x2] = [xx[0].expr(), xx[1].expr(), xx[2].expr()];

        let (xx_sph, scale_factors): (Rank1, Rank1) = match coord_system {
            CoordSystem::Spherical => {
                let sf = [Expr::one(), x0.clone(), &x0 * x1.sin()];
                ([x0, x1, x2], sf)
            }
            CoordSystem::SinhSpherical => {
                let (r, dr) = sinh_stretch(&x0, &Expr::symbol("AMPL"), &Expr::symbol("SINHW"));
                let sf = [dr, r.clone(), &r * x1.sin()];
                ([r, x1, x2], sf)
            }
            CoordSystem::Cartesian => {
                let r = (x0.powi(2) + x1.powi(2) + x2.powi(2)).sqrt();
                let th = (&x2 / &r).acos();
                let ph = Expr::atan2(&x1, &x0);
                ([r, th, ph], [Expr::one(), Expr::one(), Expr::one()])
            }
            CoordSystem::Cylindrical => {
                let (r, th) = spherical_from_cylindrical(&x0, &x2);
                let sf = [Expr::one(), x0.clone(), Expr::one()];
                ([r, th, x1], sf)
            }
            CoordSystem::SinhCylindrical => {
                let (rho, drho) =
                    sinh_stretch(&x0, &Expr::symbol("AMPLRHO"), &Expr::symbol("SINHWRHO"));
                let (z, dz) = sinh_stretch(&x2, &Expr::symbol("AMPLZ"), &Expr::symbol("SINHWZ"));
                let (r, th) = spherical_from_cylindrical(&rho, &z);
                let sf = [drho, rho, dz];
                ([r, th, x1], sf)
            }
        };

        let ghat_dd = diagonal_rank2(&rank1_from_fn(|i| scale_factors[i].powi(2)));
        let (ghat_uu, detgammahat) = symmetric_inverse3x3(&ghat_dd);
        let gammahat_udd = christoffel_udd(&ghat_dd, &ghat_uu, &xx);
        let re_u = rank1_from_fn(|i| scale_factors[i].recip());
        let re_dd = rank2_from_fn(|i, j| &scale_factors[i] * &scale_factors[j]);

        Ok(ReferenceMetric {
            coord_system,
            params,
            xx,
            xx_sph,
            scale_factors,
            ghat_dd,
            ghat_uu,
            detgammahat,
            gammahat_udd,
            re_u,
            re_dd,
        })
    }

    pub fn from_config(config: &ConversionConfig) -> BssnResult<Self> {
        Self::new(config.coord_system, config.coord_params.clone())
    }

    pub fn params(&self) -> &CoordParams {
        &self.params
    }

    pub fn scale_factors(&self) -> &Rank1 {
        &self.scale_factors
    }

    pub fn ghat_uu(&self) -> &Rank2 {
        &self.ghat_uu
    }

    /// Numeric values of the stretching parameters.
    pub fn parameter_bindings(&self) -> Bindings {
        self.params
            .named_values()
            .into_iter()
            .fold(Bindings::new(), |b, (name, value)| b.with(name, value))
    }
}

impl ReferenceMetricOracle for ReferenceMetric {
    fn coord_system(&self) -> CoordSystem {
        self.coord_system
    }

    fn coordinates(&self) -> &[Symbol; DIM] {
        &self.xx
    }

    fn xx_sph(&self) -> &Rank1 {
        &self.xx_sph
    }

    fn ghat_dd(&self) -> &Rank2 {
        &self.ghat_dd
    }

    fn gammahat_udd(&self) -> &Rank3 {
        &self.gammahat_udd
    }

    fn detgammahat(&self) -> &Expr {
        &self.detgammahat
    }

    fn re_u(&self) -> &Rank1 {
        &self.re_u
    }

    fn re_dd(&self) -> &Rank2 {
        &self.re_dd
    }
}
