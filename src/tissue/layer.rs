use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Anatomical category of a layer, used by rules that target a group of layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerClass {
    Boundary,
    Epidermal,
    Dermal,
    Subcutaneous,
}

impl Display for LayerClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerClass::Boundary => write!(f, "boundary"),
            LayerClass::Epidermal => write!(f, "epidermal"),
            LayerClass::Dermal => write!(f, "dermal"),
            LayerClass::Subcutaneous => write!(f, "subcutaneous"),
        }
    }
}

/// Physiological and geometric description of one tissue stratum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDefinition {
    pub name: String,
    pub class: LayerClass,
    pub d: f64,       // Thickness [mm]
    pub n: f64,       // Refractive index
    pub c_blood: f64, // Blood volume fraction
    pub c_water: f64, // Water volume fraction
    // Melanin volume fraction; the global melanin fraction applies when unset
    #[serde(default)]
    pub c_melanin: Option<f64>,
    pub g: f64, // Anisotropy factor
    pub a_scatter: f64, // Reduced scattering at 500 nm [mm^-1]
    pub b_scatter: f64, // Scattering power
    // Added to the global oxygen saturation when this layer is assembled
    #[serde(default)]
    pub s_o2_shift: f64,
}

impl LayerDefinition {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        class: LayerClass,
        d: f64,
        n: f64,
        c_blood: f64,
        c_water: f64,
        g: f64,
        a_scatter: f64,
        b_scatter: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            class,
            d,
            n,
            c_blood,
            c_water,
            c_melanin: None,
            g,
            a_scatter,
            b_scatter,
            s_o2_shift: 0.0,
        }
    }
}

/// Ordered layer definitions, superficial to deep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerCatalog {
    layers: Vec<LayerDefinition>,
}

impl LayerCatalog {
    pub fn new(layers: Vec<LayerDefinition>) -> Self {
        Self { layers }
    }

    /// Seven-layer skin model
    /// Parameters from "Computer simulation of the skin reflectance spectra" and Jacques (2013)
    pub fn skin_seven_layer() -> Self {
        use LayerClass::*;

        Self::new(vec![
            LayerDefinition::new("Stratum Corneum", Epidermal, 0.02, 1.5, 0.0, 0.05, 0.9, 1.2, 0.5),
            LayerDefinition::new("Epidermis", Epidermal, 0.08, 1.4, 0.0, 0.1, 0.8, 1.0, 0.6),
            LayerDefinition::new("Papillary Dermis", Dermal, 0.1, 1.4, 0.05, 0.2, 0.8, 1.5, 0.7),
            LayerDefinition::new("Reticular Dermis 1", Dermal, 0.2, 1.38, 0.03, 0.3, 0.7, 2.0, 0.8),
            LayerDefinition::new("Reticular Dermis 2", Dermal, 0.5, 1.38, 0.02, 0.4, 0.7, 2.5, 0.9),
            LayerDefinition::new("Deep Dermis", Dermal, 1.0, 1.36, 0.01, 0.5, 0.6, 3.0, 1.0),
            LayerDefinition::new("Subcutaneous Fat", Subcutaneous, 2.0, 1.44, 0.005, 0.6, 0.5, 4.0, 1.2),
        ])
    }

    pub fn layers(&self) -> &[LayerDefinition] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [LayerDefinition] {
        &mut self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&LayerDefinition> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayerDefinition> {
        self.layers.iter()
    }
}

impl Default for LayerCatalog {
    fn default() -> Self {
        Self::skin_seven_layer()
    }
}
