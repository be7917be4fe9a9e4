// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Spatial dimension of every ADM/BSSN quantity.
/// Axisymmetry or spherical symmetry is expressed by zero derivatives, never
/// by a smaller dimension.
pub const DIM: usize = 3;

/// Default outer-radius amplitude of the sinh-stretched radial coordinate.
pub const DEFAULT_AMPL: f64 = 10.0;

/// Default sinh width; smaller values concentrate resolution near the origin.
pub const DEFAULT_SINHW: f64 = 0.2;

/// Names of the curvilinear coordinate symbols, in index order.
pub const CURVILINEAR_COORDS: [&str; DIM] = ["xx0", "xx1", "xx2"];

/// Names of the spherical coordinate symbols used by the bundled initial data.
pub const SPHERICAL_COORDS: [&str; DIM] = ["r", "th", "ph"];
