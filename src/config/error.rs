use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("at least one wavelength is required")]
    NoWavelengths,

    #[error("wavelength must be positive, got {0} nm")]
    NonPositiveWavelength(f64),

    #[error("s_o2 must be between 0 and 1, got {0}")]
    SaturationOutOfRange(f64),

    #[error("melanin_fraction must be between 0 and 1, got {0}")]
    MelaninOutOfRange(f64),

    #[error("layer catalog cannot be empty")]
    EmptyCatalog,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}
