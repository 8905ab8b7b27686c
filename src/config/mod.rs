use serde::de::Error;
use serde::{Deserialize, Deserializer};

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::iop::constants::{DEFAULT_MELANIN_FRACTION, DEFAULT_S_O2};
use crate::tissue::{AssemblyParams, HemangiomaRule, LayerCatalog, LayerDefinition, TissueModel};

pub mod error;
pub use error::ConfigError;

/// Which tissue models to assemble
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ModelSelection {
    Healthy,
    Hemangioma,
    #[default]
    Both,
}

impl ModelSelection {
    pub fn models(&self) -> &'static [TissueModel] {
        match self {
            ModelSelection::Healthy => &[TissueModel::Healthy],
            ModelSelection::Hemangioma => &[TissueModel::Hemangioma],
            ModelSelection::Both => &[TissueModel::Healthy, TissueModel::Hemangioma],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    wavelengths: Vec<f64>,
    params: AssemblyParams,
    model: ModelSelection,
    hemangioma: HemangiomaRule,
    catalog: LayerCatalog,
}

fn validate_wavelengths(wavelengths: &[f64]) -> Result<(), ConfigError> {
    if wavelengths.is_empty() {
        return Err(ConfigError::NoWavelengths);
    }

    match wavelengths.iter().find(|wl| !wl.is_finite() || **wl <= 0.0) {
        Some(&wl) => Err(ConfigError::NonPositiveWavelength(wl)),
        None => Ok(()),
    }
}

fn validate_params(params: &AssemblyParams) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&params.s_o2) {
        return Err(ConfigError::SaturationOutOfRange(params.s_o2));
    }
    if !(0.0..=1.0).contains(&params.melanin_fraction) {
        return Err(ConfigError::MelaninOutOfRange(params.melanin_fraction));
    }
    Ok(())
}

// Deserializes a Config, checking the wavelengths and the global fractions before any
// stack is assembled from it.
impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        fn default_s_o2() -> f64 {
            DEFAULT_S_O2
        }

        fn default_melanin_fraction() -> f64 {
            DEFAULT_MELANIN_FRACTION
        }

        #[derive(Deserialize)]
        struct ConfigHelper {
            wavelengths: Vec<f64>,
            #[serde(default = "default_s_o2")]
            s_o2: f64,
            #[serde(default = "default_melanin_fraction")]
            melanin_fraction: f64,
            #[serde(default)]
            model: ModelSelection,
            #[serde(default)]
            hemangioma: HemangiomaRule,
            layers: Option<Vec<LayerDefinition>>,
        }

        let helper = ConfigHelper::deserialize(deserializer)?;

        validate_wavelengths(&helper.wavelengths).map_err(D::Error::custom)?;

        let params = AssemblyParams {
            s_o2: helper.s_o2,
            melanin_fraction: helper.melanin_fraction,
        };
        validate_params(&params).map_err(D::Error::custom)?;

        let catalog = match helper.layers {
            Some(layers) if layers.is_empty() => {
                return Err(D::Error::custom(ConfigError::EmptyCatalog));
            }
            Some(layers) => LayerCatalog::new(layers),
            None => LayerCatalog::skin_seven_layer(),
        };

        Ok(Config {
            wavelengths: helper.wavelengths,
            params,
            model: helper.model,
            hemangioma: helper.hemangioma,
            catalog,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wavelengths: vec![630.0],
            params: AssemblyParams::default(),
            model: ModelSelection::default(),
            hemangioma: HemangiomaRule::default(),
            catalog: LayerCatalog::skin_seven_layer(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: Config = serde_json::from_reader(reader).map_err(ConfigError::from)?;

        Ok(config)
    }

    pub fn with_wavelengths(mut self, wavelengths: Vec<f64>) -> Result<Self, ConfigError> {
        validate_wavelengths(&wavelengths)?;
        self.wavelengths = wavelengths;
        Ok(self)
    }

    pub fn with_model(mut self, model: ModelSelection) -> Self {
        self.model = model;
        self
    }

    pub fn wavelengths(&self) -> &[f64] {
        &self.wavelengths
    }

    pub fn params(&self) -> &AssemblyParams {
        &self.params
    }

    pub fn model(&self) -> ModelSelection {
        self.model
    }

    pub fn hemangioma(&self) -> &HemangiomaRule {
        &self.hemangioma
    }

    pub fn catalog(&self) -> &LayerCatalog {
        &self.catalog
    }
}
