// ─────────────────────────────────────────────────────────────────────
// SCPN BSSN Initial Data — Errors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BssnError {
    #[error("Unknown conformal factor \"{0}\": expected one of \"phi\", \"chi\", \"W\"")]
    UnknownConformalFactor(String),

    #[error("Unknown coordinate system \"{0}\"")]
    UnknownCoordSystem(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Rank-2 tensor {name} is not symmetric: component [{i}][{j}] differs from [{j}][{i}]")]
    AsymmetricTensor { name: String, i: usize, j: usize },

    #[error("No numeric value bound for symbol \"{0}\"")]
    UnboundSymbol(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type BssnResult<T> = Result<T, BssnError>;
