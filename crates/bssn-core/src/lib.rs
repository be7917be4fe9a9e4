//! Spherical ADM to rescaled BSSN curvilinear initial data.
//!
//! Stage 1: substitution, Jacobian basis change
//! Stage 2: conformal decomposition, conformal factor, rescaling
//! Support: reference metric, analytic data sets, numerical sampling

pub mod adm;
pub mod conformal;
pub mod conformal_factor;
pub mod convert;
pub mod initial_data;
pub mod jacobian;
pub mod reference_metric;
pub mod rescale;
pub mod sample;
pub mod substitution;

pub use convert::{spherical_adm_to_bssn_curvilinear, IdConverter};
