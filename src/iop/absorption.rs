//! Additive absorption model
//!
//! mu_a = C_blood * (S_O2 * eps_HbO2 + (1 - S_O2) * eps_Hb)
//!      + C_water * eps_water
//!      + C_melanin * eps_melanin
//!      + 7.84e7 * lambda^-3.255
//!
//! The last term is the background absorption of bloodless tissue (Jacques, 2013) and is
//! independent of every layer parameter. Inputs are not range-checked.

use crate::iop::constants::{BACKGROUND_AMPLITUDE, BACKGROUND_EXPONENT};
use crate::iop::spectrum::{Chromophore, SpectralTables};

/// Background tissue absorption [mm^-1] at `wavelength` [nm]
pub fn background_absorption(wavelength: f64) -> f64 {
    BACKGROUND_AMPLITUDE * wavelength.powf(BACKGROUND_EXPONENT)
}

/// Whole-blood absorption [mm^-1] at a given oxygen saturation, before volume weighting
pub fn blood_absorption(tables: &SpectralTables, wavelength: f64, s_o2: f64) -> f64 {
    s_o2 * tables.interpolate(Chromophore::Oxyhemoglobin, wavelength)
        + (1.0 - s_o2) * tables.interpolate(Chromophore::Deoxyhemoglobin, wavelength)
}

/// Absorption coefficient mu_a [mm^-1] of one layer
pub fn compute_mu_a(
    tables: &SpectralTables,
    wavelength: f64,
    c_blood: f64,
    c_water: f64,
    c_melanin: f64,
    s_o2: f64,
) -> f64 {
    let blood = c_blood * blood_absorption(tables, wavelength, s_o2);
    let water = c_water * tables.interpolate(Chromophore::Water, wavelength);
    let melanin = c_melanin * tables.interpolate(Chromophore::Melanin, wavelength);

    blood + water + melanin + background_absorption(wavelength)
}
