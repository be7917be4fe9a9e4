// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — ADM to BSSN Conversion
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Spherical ADM to rescaled curvilinear BSSN initial data.
//!
//! Stages run strictly in order:
//!   1. substitute `(r, th, ph) -> xx_sph(xx)`
//!   2. change basis with the coordinate Jacobian
//!   3. conformal decomposition
//!   4. conformal factor
//!   5. rescaling by the reference-metric scale factors

use bssn_types::config::{ConformalFactor, ConversionConfig};
use bssn_types::error::BssnResult;
use tracing::debug;

use crate::adm::SphericalAdm;
use crate::conformal::ConformalDecomposition;
use crate::conformal_factor::conformal_factor;
use crate::jacobian::CoordinateJacobian;
use crate::reference_metric::{ReferenceMetric, ReferenceMetricOracle};
use crate::rescale::{rescale, BssnCurvilinear, UnscaledBssn};
use crate::substitution::substitute_spherical_coords;

/// Runs the full pipeline. Inputs are only read.
pub fn spherical_adm_to_bssn_curvilinear(
    adm: &SphericalAdm,
    oracle: &impl ReferenceMetricOracle,
    cf_kind: ConformalFactor,
) -> BssnResult<BssnCurvilinear> {
    let span = tracing::debug_span!(
        "adm_to_bssn",
        coord_system = oracle.coord_system().name(),
        conformal_factor = cf_kind.tag()
    );
    let _guard = span.enter();

    let fields = substitute_spherical_coords(adm.coords(), adm.fields(), oracle);
    debug!(alpha_nodes = fields.alpha.dag_size(), "substituted spherical coordinates");

    let jacobian = CoordinateJacobian::new(oracle);
    let fields = jacobian.transform(&fields);
    debug!(
        gamma00_nodes = fields.gamma_dd[0][0].dag_size(),
        "transformed to curvilinear basis"
    );

    let dec = ConformalDecomposition::new(&fields.gamma_dd, &fields.k_dd, oracle);
    debug!(
        gammabar_det_nodes = dec.gammabar_det.dag_size(),
        tr_k_nodes = dec.tr_k.dag_size(),
        "conformal decomposition done"
    );

    let cf = conformal_factor(cf_kind, &dec.gamma_det, &dec.gammabar_det);
    debug!(cf_nodes = cf.dag_size(), "conformal factor computed");

    let out = rescale(
        UnscaledBssn {
            cf,
            gammabar_dd: &dec.gammabar_dd,
            abar_dd: &dec.abar_dd,
            lambdabar_u: &dec.lambdabar_u,
            tr_k: &dec.tr_k,
            alpha: &fields.alpha,
            beta_u: &fields.beta_u,
            b_u: &fields.b_u,
        },
        oracle,
    );
    debug!("rescaled BSSN variables");
    Ok(out)
}

/// Converter bound to a configuration and the reference metric it selects.
#[derive(Debug, Clone)]
pub struct IdConverter {
    config: ConversionConfig,
    reference_metric: ReferenceMetric,
}

impl IdConverter {
    pub fn new(config: ConversionConfig) -> BssnResult<Self> {
        let reference_metric = ReferenceMetric::from_config(&config)?;
        Ok(IdConverter {
            config,
            reference_metric,
        })
    }

    pub fn from_file(path: &str) -> BssnResult<Self> {
        Self::new(ConversionConfig::from_file(path)?)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn reference_metric(&self) -> &ReferenceMetric {
        &self.reference_metric
    }

    pub fn convert(&self, adm: &SphericalAdm) -> BssnResult<BssnCurvilinear> {
        spherical_adm_to_bssn_curvilinear(adm, &self.reference_metric, self.config.conformal_factor)
    }
}
