//! Hemangioma variant of a baseline catalog
//!
//! A hemangioma is modelled by raising the blood volume fraction and the oxygen saturation
//! of the vascular (dermal) layers. The baseline catalog is never touched; the rule returns
//! a new catalog.

use std::fmt::Display;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::tissue::layer::{LayerCatalog, LayerClass, LayerDefinition};

/// Which layers a pathology rule applies to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerSelector {
    Class(LayerClass),
    // Case-sensitive substring of the layer name
    NameContains(String),
}

impl LayerSelector {
    pub fn matches(&self, layer: &LayerDefinition) -> bool {
        match self {
            LayerSelector::Class(class) => layer.class == *class,
            LayerSelector::NameContains(pattern) => layer.name.contains(pattern.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HemangiomaRule {
    pub blood_multiplier: f64,
    pub s_o2_increase: f64,
    pub selector: LayerSelector,
}

impl Default for HemangiomaRule {
    fn default() -> Self {
        Self {
            blood_multiplier: 5.0,
            s_o2_increase: 0.05,
            selector: LayerSelector::Class(LayerClass::Dermal),
        }
    }
}

impl HemangiomaRule {
    pub fn apply(&self, baseline: &LayerCatalog) -> LayerCatalog {
        let mut catalog = baseline.clone();

        for layer in catalog
            .layers_mut()
            .iter_mut()
            .filter(|layer| self.selector.matches(layer))
        {
            layer.c_blood *= self.blood_multiplier;
            layer.s_o2_shift += self.s_o2_increase;
            debug!(
                "Hemangioma: {} C_blood -> {}, S_O2 shift -> {}",
                layer.name, layer.c_blood, layer.s_o2_shift
            );
        }

        catalog
    }
}

/// Hemangioma variant of `baseline` with the default rule
pub fn perturb_for_hemangioma(baseline: &LayerCatalog) -> LayerCatalog {
    HemangiomaRule::default().apply(baseline)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TissueModel {
    Healthy,
    Hemangioma,
}

impl TissueModel {
    pub fn catalog(&self, baseline: &LayerCatalog, rule: &HemangiomaRule) -> LayerCatalog {
        match self {
            TissueModel::Healthy => baseline.clone(),
            TissueModel::Hemangioma => rule.apply(baseline),
        }
    }
}

impl Display for TissueModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TissueModel::Healthy => write!(f, "healthy skin"),
            TissueModel::Hemangioma => write!(f, "hemangioma"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blood_multiplied_in_dermis_only() {
        let baseline = LayerCatalog::skin_seven_layer();
        let lesion = perturb_for_hemangioma(&baseline);

        assert_eq!(lesion.len(), baseline.len());

        for (base, modified) in baseline.iter().zip(lesion.iter()) {
            if base.name.contains("Dermis") {
                assert_eq!(modified.c_blood, base.c_blood * 5.0, "{}", base.name);
                assert_eq!(modified.s_o2_shift, 0.05, "{}", base.name);
            } else {
                assert_eq!(modified.c_blood, base.c_blood, "{}", base.name);
                assert_eq!(modified.s_o2_shift, 0.0, "{}", base.name);
            }
            assert_eq!(modified.c_water, base.c_water);
            assert_eq!(modified.g, base.g);
        }
    }

    #[test]
    fn test_baseline_untouched() {
        let baseline = LayerCatalog::skin_seven_layer();
        let _ = perturb_for_hemangioma(&baseline);
        let _ = perturb_for_hemangioma(&baseline);

        assert_eq!(baseline, LayerCatalog::skin_seven_layer());
    }

    #[test]
    fn test_name_selector_matches_class_selector() {
        let baseline = LayerCatalog::skin_seven_layer();
        let by_class = HemangiomaRule::default().apply(&baseline);
        let by_name = HemangiomaRule {
            selector: LayerSelector::NameContains("Dermis".to_string()),
            ..HemangiomaRule::default()
        }
        .apply(&baseline);

        assert_eq!(by_class, by_name);
    }

    #[test]
    fn test_name_selector_is_case_sensitive() {
        let selector = LayerSelector::NameContains("Dermis".to_string());
        let layer = LayerDefinition::new("papillary dermis", LayerClass::Dermal, 0.1, 1.4, 0.05, 0.2, 0.8, 1.5, 0.7);

        assert!(!selector.matches(&layer));
        assert!(LayerSelector::Class(LayerClass::Dermal).matches(&layer));
    }

    #[test]
    fn test_rule_from_json() {
        let rule: HemangiomaRule =
            serde_json::from_str(r#"{ "selector": { "name_contains": "Reticular" } }"#).unwrap();

        assert_eq!(rule.blood_multiplier, 5.0);
        assert_eq!(rule.s_o2_increase, 0.05);

        let lesion = rule.apply(&LayerCatalog::skin_seven_layer());
        let modified: Vec<&str> = lesion
            .iter()
            .filter(|l| l.s_o2_shift > 0.0)
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(modified, vec!["Reticular Dermis 1", "Reticular Dermis 2"]);
    }

    #[test]
    fn test_model_catalogs() {
        let baseline = LayerCatalog::skin_seven_layer();
        let rule = HemangiomaRule::default();

        assert_eq!(TissueModel::Healthy.catalog(&baseline, &rule), baseline);
        assert_eq!(
            TissueModel::Hemangioma.catalog(&baseline, &rule),
            perturb_for_hemangioma(&baseline)
        );
    }
}
