// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — Numerical Sampling
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Numerical values of converted BSSN fields at points and on grids.

use std::collections::BTreeMap;

use bssn_math::eval::{Bindings, Evaluator};
use bssn_types::constants::{CURVILINEAR_COORDS, DIM};
use bssn_types::error::BssnResult;
use bssn_types::state::Grid3D;
use ndarray::Array3;
use serde::Serialize;

use crate::reference_metric::ReferenceMetric;
use crate::rescale::BssnCurvilinear;

/// Every named field evaluated at one point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointValues {
    values: BTreeMap<String, f64>,
}

impl PointValues {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when every value is finite.
    pub fn all_finite(&self) -> bool {
        self.values.values().all(|v| v.is_finite())
    }
}

/// `bindings` must cover the curvilinear coordinates and every free
/// parameter (mass, stretching parameters, ...).
pub fn evaluate_at(fields: &BssnCurvilinear, bindings: &Bindings) -> BssnResult<PointValues> {
    let mut ev = Evaluator::new(bindings);
    let mut values = BTreeMap::new();
    for (name, e) in fields.named_fields() {
        values.insert(name, ev.eval(&e)?);
    }
    Ok(PointValues { values })
}

/// Samples every named field at the cell centres of `grid`.
///
/// The reference metric's parameter values and `extra` are bound at
/// every point; `extra` wins on a name clash.
pub fn sample_on_grid(
    fields: &BssnCurvilinear,
    reference_metric: &ReferenceMetric,
    grid: &Grid3D,
    extra: &Bindings,
) -> BssnResult<BTreeMap<String, Array3<f64>>> {
    let named = fields.named_fields();
    let mut out: BTreeMap<String, Array3<f64>> = named
        .iter()
        .map(|(name, _)| (name.clone(), Array3::zeros(grid.shape())))
        .collect();

    let mut base = reference_metric.parameter_bindings();
    base.extend(extra);

    let (n0, n1, n2) = grid.shape();
    for i0 in 0..n0 {
        for i1 in 0..n1 {
            for i2 in 0..n2 {
                let xx = grid.point(i0, i1, i2);
                let mut at = base.clone();
                for d in 0..DIM {
                    at.set(CURVILINEAR_COORDS[d], xx[d]);
                }
                let mut ev = Evaluator::new(&at);
                for (name, e) in &named {
                    let v = ev.eval(e)?;
                    if let Some(arr) = out.get_mut(name) {
                        arr[[i0, i1, i2]] = v;
                    }
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::IdConverter;
    use crate::initial_data::minkowski;
    use bssn_types::config::{ConformalFactor, ConversionConfig};
    use bssn_types::error::BssnError;

    fn flat_output() -> (IdConverter, BssnCurvilinear) {
        let conv = IdConverter::new(ConversionConfig {
            conformal_factor: ConformalFactor::W,
            ..ConversionConfig::default()
        })
        .unwrap();
        let out = conv.convert(&minkowski()).unwrap();
        (conv, out)
    }

    #[test]
    fn test_evaluate_at_point() {
        let (_, out) = flat_output();
        let b = Bindings::new().with("xx0", 1.0).with("xx1", 0.3).with("xx2", 0.1);
        let values = evaluate_at(&out, &b).unwrap();
        assert_eq!(values.len(), 24);
        assert_eq!(values.get("cf"), Some(1.0));
        assert_eq!(values.get("hDD11"), Some(0.0));
        assert!(values.all_finite());
    }

    #[test]
    fn test_sample_on_grid_shapes() {
        let (conv, out) = flat_output();
        let grid = Grid3D::new([4, 3, 2], [0.0, 0.0, 0.0], [2.0, 3.0, 6.0]).unwrap();
        let sampled = sample_on_grid(&out, conv.reference_metric(), &grid, &Bindings::new()).unwrap();
        assert_eq!(sampled.len(), 24);
        let alpha = &sampled["alpha"];
        assert_eq!(alpha.dim(), (4, 3, 2));
        assert!(alpha.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_unbound_parameter_is_reported() {
        let conv = IdConverter::new(ConversionConfig::default()).unwrap();
        let adm = crate::initial_data::schwarzschild_isotropic(&bssn_math::expr::Expr::symbol("M"));
        let out = conv.convert(&adm).unwrap();
        let grid = Grid3D::new([1, 1, 1], [0.5, 0.5, 0.5], [1.5, 1.5, 1.5]).unwrap();
        let err = sample_on_grid(&out, conv.reference_metric(), &grid, &Bindings::new()).unwrap_err();
        assert!(matches!(err, BssnError::UnboundSymbol(name) if name == "M"));
    }
}
