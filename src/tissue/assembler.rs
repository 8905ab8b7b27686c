//! Tissue stack assembly
//!
//! Turns a layer catalog into the ordered list of optical layers a Monte Carlo transport
//! simulator consumes. The stack always starts and ends with a semi-infinite ambient layer
//! (air: n = 1, no absorption, no scattering). Layer index is depth order.

use log::{debug, info};
use serde::{Serialize, Serializer};

use crate::iop::constants::{AMBIENT_N, DEFAULT_MELANIN_FRACTION, DEFAULT_S_O2};
use crate::iop::{SpectralTables, compute_mu_a, compute_mu_s};
use crate::tissue::layer::{LayerCatalog, LayerClass, LayerDefinition};

/// Scattering phase function of a layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhaseFunction {
    HenyeyGreenstein { g: f64 },
}

impl PhaseFunction {
    pub fn anisotropy(&self) -> f64 {
        match self {
            PhaseFunction::HenyeyGreenstein { g } => *g,
        }
    }
}

/// Global assumptions applied to every layer during assembly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssemblyParams {
    pub s_o2: f64,             // Oxygen saturation [0-1]
    pub melanin_fraction: f64, // Used by layers without their own melanin fraction
}

impl Default for AssemblyParams {
    fn default() -> Self {
        Self {
            s_o2: DEFAULT_S_O2,
            melanin_fraction: DEFAULT_MELANIN_FRACTION,
        }
    }
}

fn serialize_thickness<S: Serializer>(d: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if d.is_infinite() {
        serializer.serialize_str("inf")
    } else {
        serializer.serialize_f64(*d)
    }
}

/// One layer of an assembled stack
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackLayer {
    pub name: String,
    pub class: LayerClass,
    pub n: f64, // Refractive index
    #[serde(serialize_with = "serialize_thickness")]
    pub d: f64, // Thickness [mm], infinite for the ambient layers
    pub mu_a: f64, // Absorption coefficient [mm^-1]
    pub mu_s: f64, // Scattering coefficient [mm^-1]
    pub phase_function: PhaseFunction,
}

impl StackLayer {
    pub fn ambient(name: &str) -> Self {
        Self {
            name: name.to_string(),
            class: LayerClass::Boundary,
            n: AMBIENT_N,
            d: f64::INFINITY,
            mu_a: 0.0,
            mu_s: 0.0,
            phase_function: PhaseFunction::HenyeyGreenstein { g: 0.0 },
        }
    }

    pub fn g(&self) -> f64 {
        self.phase_function.anisotropy()
    }

    /// mu_s' = mu_s * (1 - g)
    pub fn reduced_scattering(&self) -> f64 {
        self.mu_s * (1.0 - self.g())
    }

    /// mu_t = mu_a + mu_s
    pub fn total_attenuation(&self) -> f64 {
        self.mu_a + self.mu_s
    }

    /// Single scattering albedo mu_s / mu_t, zero for a non-interacting layer
    pub fn albedo(&self) -> f64 {
        let mu_t = self.total_attenuation();
        if mu_t > 0.0 { self.mu_s / mu_t } else { 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TissueStack {
    wavelength: f64, // [nm]
    layers: Vec<StackLayer>,
}

impl TissueStack {
    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// All layers including the two ambient boundaries
    pub fn layers(&self) -> &[StackLayer] {
        &self.layers
    }

    /// Layers between the ambient boundaries
    pub fn tissue_layers(&self) -> &[StackLayer] {
        &self.layers[1..self.layers.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer(&self, name: &str) -> Option<&StackLayer> {
        self.tissue_layers().iter().find(|layer| layer.name == name)
    }

    /// Summed thickness of the tissue layers [mm]
    pub fn tissue_thickness(&self) -> f64 {
        self.tissue_layers().iter().map(|layer| layer.d).sum()
    }
}

fn assemble_layer(
    layer: &LayerDefinition,
    wavelength: f64,
    params: &AssemblyParams,
    tables: &SpectralTables,
) -> StackLayer {
    let s_o2 = params.s_o2 + layer.s_o2_shift;
    let c_melanin = layer.c_melanin.unwrap_or(params.melanin_fraction);

    let mu_a = compute_mu_a(
        tables,
        wavelength,
        layer.c_blood,
        layer.c_water,
        c_melanin,
        s_o2,
    );
    let mu_s = compute_mu_s(wavelength, layer.a_scatter, layer.b_scatter, layer.g);

    debug!(
        "{} @ {} nm: S_O2={:.3}, mu_a={:.5} mm^-1, mu_s={:.5} mm^-1",
        layer.name, wavelength, s_o2, mu_a, mu_s
    );

    StackLayer {
        name: layer.name.clone(),
        class: layer.class,
        n: layer.n,
        d: layer.d,
        mu_a,
        mu_s,
        phase_function: PhaseFunction::HenyeyGreenstein { g: layer.g },
    }
}

/// Builds the optical stack of `catalog` at `wavelength` [nm]
pub fn assemble(
    catalog: &LayerCatalog,
    wavelength: f64,
    params: &AssemblyParams,
    tables: &SpectralTables,
) -> TissueStack {
    let mut layers = Vec::with_capacity(catalog.len() + 2);

    layers.push(StackLayer::ambient("Ambient (top)"));
    layers.extend(
        catalog
            .iter()
            .map(|layer| assemble_layer(layer, wavelength, params, tables)),
    );
    layers.push(StackLayer::ambient("Ambient (bottom)"));

    info!(
        "Assembled {} layer stack at {} nm",
        layers.len(),
        wavelength
    );

    TissueStack { wavelength, layers }
}

/// One independent stack per wavelength, in input order
pub fn assemble_sweep(
    catalog: &LayerCatalog,
    wavelengths: &[f64],
    params: &AssemblyParams,
    tables: &SpectralTables,
) -> Vec<TissueStack> {
    wavelengths
        .iter()
        .map(|&wl| assemble(catalog, wl, params, tables))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iop::{Chromophore, Spectrum};

    fn tables() -> SpectralTables {
        SpectralTables::literature().unwrap()
    }

    #[test]
    fn test_stack_has_ambient_boundaries() {
        let stack = assemble(
            &LayerCatalog::skin_seven_layer(),
            630.0,
            &AssemblyParams::default(),
            &tables(),
        );

        assert_eq!(stack.len(), 9);
        assert_eq!(stack.tissue_layers().len(), 7);

        for ambient in [&stack.layers()[0], &stack.layers()[8]] {
            assert_eq!(ambient.class, LayerClass::Boundary);
            assert_eq!(ambient.n, 1.0);
            assert!(ambient.d.is_infinite());
            assert_eq!(ambient.mu_a, 0.0);
            assert_eq!(ambient.mu_s, 0.0);
            assert_eq!(ambient.g(), 0.0);
        }
    }

    #[test]
    fn test_stack_follows_catalog_order() {
        let catalog = LayerCatalog::skin_seven_layer();
        let stack = assemble(&catalog, 800.0, &AssemblyParams::default(), &tables());

        for (def, layer) in catalog.iter().zip(stack.tissue_layers()) {
            assert_eq!(def.name, layer.name);
            assert_eq!(def.n, layer.n);
            assert_eq!(def.d, layer.d);
            assert_eq!(def.g, layer.g());
        }
    }

    #[test]
    fn test_papillary_dermis_coefficients() {
        let stack = assemble(
            &LayerCatalog::skin_seven_layer(),
            630.0,
            &AssemblyParams::default(),
            &tables(),
        );
        let layer = stack.layer("Papillary Dermis").unwrap();

        let mu_a =
            0.05 * (0.7 * 0.7 + 0.3 * 2.8) + 0.2 * 0.003 + 7.84e7 * 630.0_f64.powf(-3.255);
        let mu_s = 1.5 * (630.0_f64 / 500.0).powf(-0.7) / (1.0 - 0.8);

        assert!((layer.mu_a - mu_a).abs() < 1e-12);
        assert!((layer.mu_s - mu_s).abs() < 1e-12);
    }

    #[test]
    fn test_layer_overrides() {
        let tables = tables();
        let params = AssemblyParams {
            s_o2: 0.7,
            melanin_fraction: 0.0,
        };

        let mut def = LayerDefinition::new("Test", LayerClass::Dermal, 0.1, 1.4, 0.05, 0.2, 0.8, 1.5, 0.7);
        let base = assemble_layer(&def, 630.0, &params, &tables);

        def.c_melanin = Some(0.1);
        let with_melanin = assemble_layer(&def, 630.0, &params, &tables);
        assert!((with_melanin.mu_a - base.mu_a - 0.1 * 0.02).abs() < 1e-12);

        def.c_melanin = None;
        def.s_o2_shift = 0.3;
        let saturated = assemble_layer(&def, 630.0, &params, &tables);
        let expected = compute_mu_a(&tables, 630.0, 0.05, 0.2, 0.0, 0.7 + 0.3);
        assert_eq!(saturated.mu_a, expected);
    }

    #[test]
    fn test_global_melanin_fraction() {
        let tables = tables();
        let catalog = LayerCatalog::skin_seven_layer();
        let plain = assemble(&catalog, 520.0, &AssemblyParams::default(), &tables);
        let pigmented = assemble(
            &catalog,
            520.0,
            &AssemblyParams {
                s_o2: 0.7,
                melanin_fraction: 0.1,
            },
            &tables,
        );

        for (a, b) in plain.tissue_layers().iter().zip(pigmented.tissue_layers()) {
            assert!((b.mu_a - a.mu_a - 0.1 * 0.05).abs() < 1e-12, "{}", a.name);
            assert_eq!(a.mu_s, b.mu_s);
        }
    }

    #[test]
    fn test_derived_quantities() {
        let stack = assemble(
            &LayerCatalog::skin_seven_layer(),
            630.0,
            &AssemblyParams::default(),
            &tables(),
        );

        let top = &stack.layers()[0];
        assert_eq!(top.albedo(), 0.0);
        assert_eq!(top.total_attenuation(), 0.0);

        let layer = stack.layer("Deep Dermis").unwrap();
        let expected = 3.0 * (630.0_f64 / 500.0).powf(-1.0);
        assert!((layer.reduced_scattering() - expected).abs() < 1e-12);
        assert!(layer.albedo() > 0.0 && layer.albedo() < 1.0);

        assert!((stack.tissue_thickness() - 3.9).abs() < 1e-12);
    }

    #[test]
    fn test_sweep_preserves_order() {
        let wavelengths = [800.0, 470.0, 630.0];
        let stacks = assemble_sweep(
            &LayerCatalog::skin_seven_layer(),
            &wavelengths,
            &AssemblyParams::default(),
            &tables(),
        );

        let got: Vec<f64> = stacks.iter().map(|s| s.wavelength()).collect();
        assert_eq!(got, wavelengths.to_vec());
    }

    #[test]
    fn test_substituted_tables() {
        let flat = |c| Spectrum::new(c, &[(400.0, 1.0), (900.0, 1.0)]).unwrap();
        let tables = SpectralTables::new(
            flat(Chromophore::Deoxyhemoglobin),
            flat(Chromophore::Oxyhemoglobin),
            flat(Chromophore::Water),
            flat(Chromophore::Melanin),
        );

        let catalog = LayerCatalog::new(vec![LayerDefinition::new(
            "Slab",
            LayerClass::Dermal,
            1.0,
            1.4,
            0.1,
            0.2,
            0.0,
            1.0,
            1.0,
        )]);
        let stack = assemble(&catalog, 600.0, &AssemblyParams::default(), &tables);
        let layer = stack.layer("Slab").unwrap();

        let background = crate::iop::background_absorption(600.0);
        assert!((layer.mu_a - (0.1 + 0.2 + background)).abs() < 1e-12);
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn test_infinite_thickness_serializes_as_string() {
        let json = serde_json::to_value(StackLayer::ambient("Air")).unwrap();

        assert_eq!(json["d"], "inf");
        assert_eq!(json["phase_function"]["type"], "henyey_greenstein");
        assert_eq!(json["phase_function"]["g"], 0.0);
    }
}
