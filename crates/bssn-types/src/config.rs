// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_AMPL, DEFAULT_SINHW};
use crate::error::{BssnError, BssnResult};

/// Top-level conversion configuration.
/// Every field is optional in JSON; missing fields take the defaults below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    #[serde(default)]
    pub conformal_factor: ConformalFactor,
    #[serde(default)]
    pub coord_system: CoordSystem,
    #[serde(default)]
    pub coord_params: CoordParams,
}

/// Definition of the evolved conformal factor.
///
/// - `Phi`: φ = (1/12) ln(γ/γ̄)
/// - `Chi`: χ = e^{-4φ}
/// - `W`:   W = e^{-2φ}
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ConformalFactor {
    Phi,
    Chi,
    #[default]
    W,
}

impl ConformalFactor {
    pub const ALL: [ConformalFactor; 3] = [Self::Phi, Self::Chi, Self::W];

    /// Tag used in configuration files.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Phi => "phi",
            Self::Chi => "chi",
            Self::W => "W",
        }
    }
}

impl fmt::Display for ConformalFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ConformalFactor {
    type Err = BssnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phi" => Ok(Self::Phi),
            "chi" => Ok(Self::Chi),
            "W" => Ok(Self::W),
            other => Err(BssnError::UnknownConformalFactor(other.to_string())),
        }
    }
}

impl TryFrom<String> for ConformalFactor {
    type Error = BssnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ConformalFactor> for String {
    fn from(value: ConformalFactor) -> Self {
        value.tag().to_string()
    }
}

/// Curvilinear coordinate system of the output fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CoordSystem {
    #[default]
    Spherical,
    SinhSpherical,
    Cartesian,
    Cylindrical,
    SinhCylindrical,
}

impl CoordSystem {
    pub const ALL: [CoordSystem; 5] = [
        Self::Spherical,
        Self::SinhSpherical,
        Self::Cartesian,
        Self::Cylindrical,
        Self::SinhCylindrical,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Spherical => "Spherical",
            Self::SinhSpherical => "SinhSpherical",
            Self::Cartesian => "Cartesian",
            Self::Cylindrical => "Cylindrical",
            Self::SinhCylindrical => "SinhCylindrical",
        }
    }
}

impl fmt::Display for CoordSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CoordSystem {
    type Err = BssnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| BssnError::UnknownCoordSystem(s.to_string()))
    }
}

impl TryFrom<String> for CoordSystem {
    type Error = BssnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CoordSystem> for String {
    fn from(value: CoordSystem) -> Self {
        value.name().to_string()
    }
}

/// Numeric values of the stretched-coordinate parameters.
/// The symbolic output keeps them as named symbols; these values are only
/// bound when fields are evaluated numerically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordParams {
    #[serde(rename = "AMPL", default = "default_ampl")]
    pub ampl: f64,
    #[serde(rename = "SINHW", default = "default_sinhw")]
    pub sinhw: f64,
    #[serde(rename = "AMPLRHO", default = "default_ampl")]
    pub ampl_rho: f64,
    #[serde(rename = "SINHWRHO", default = "default_sinhw")]
    pub sinhw_rho: f64,
    #[serde(rename = "AMPLZ", default = "default_ampl")]
    pub ampl_z: f64,
    #[serde(rename = "SINHWZ", default = "default_sinhw")]
    pub sinhw_z: f64,
}

fn default_ampl() -> f64 {
    DEFAULT_AMPL
}
fn default_sinhw() -> f64 {
    DEFAULT_SINHW
}

impl Default for CoordParams {
    fn default() -> Self {
        CoordParams {
            ampl: default_ampl(),
            sinhw: default_sinhw(),
            ampl_rho: default_ampl(),
            sinhw_rho: default_sinhw(),
            ampl_z: default_ampl(),
            sinhw_z: default_sinhw(),
        }
    }
}

impl CoordParams {
    /// (symbol name, value) pairs in declaration order.
    pub fn named_values(&self) -> [(&'static str, f64); 6] {
        [
            ("AMPL", self.ampl),
            ("SINHW", self.sinhw),
            ("AMPLRHO", self.ampl_rho),
            ("SINHWRHO", self.sinhw_rho),
            ("AMPLZ", self.ampl_z),
            ("SINHWZ", self.sinhw_z),
        ]
    }

    /// Every amplitude and width must be finite and strictly positive.
    pub fn validate(&self) -> BssnResult<()> {
        for (name, value) in self.named_values() {
            if !value.is_finite() || value <= 0.0 {
                return Err(BssnError::ConfigError(format!(
                    "coordinate parameter {name} must be finite and > 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl ConversionConfig {
    /// Load from a JSON file and validate the coordinate parameters.
    pub fn from_file(path: &str) -> BssnResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> BssnResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.coord_params.validate()?;
        Ok(config)
    }
}
