//! Chromophore extinction data and model constants
//!
//! This module contains literature extinction coefficients for the four skin chromophores
//! at discrete wavelengths, plus the fixed constants of the absorption and scattering models.
//! Samples are `(wavelength [nm], extinction coefficient [mm^-1])`.

/// Deoxyhemoglobin (Hb) extinction coefficients
/// Data from Prahl's tabulated hemoglobin spectra and Jacques (2013),
/// Optical properties of biological tissues: a review. Phys. Med. Biol. 58(11), R37-R61
pub const HB_SAMPLES: [(f64, f64); 10] = [
    (470.0, 30.8),
    (495.0, 9.0),
    (520.0, 8.5),
    (560.0, 13.0),
    (580.0, 10.5),
    (630.0, 2.8),
    (660.0, 3.0),
    (800.0, 1.0),
    (850.0, 0.8),
    (880.0, 0.7),
];

/// Oxyhemoglobin (HbO2) extinction coefficients
/// Same sources as [`HB_SAMPLES`]
pub const HBO2_SAMPLES: [(f64, f64); 10] = [
    (470.0, 5.0),
    (495.0, 12.0),
    (520.0, 15.0),
    (540.0, 18.0),
    (580.0, 20.0),
    (630.0, 0.7),
    (660.0, 0.9),
    (800.0, 0.3),
    (850.0, 0.4),
    (880.0, 0.5),
];

/// Water absorption coefficients
pub const WATER_SAMPLES: [(f64, f64); 8] = [
    (470.0, 0.0002),
    (495.0, 0.0003),
    (520.0, 0.0005),
    (630.0, 0.003),
    (660.0, 0.004),
    (800.0, 0.01),
    (850.0, 0.02),
    (880.0, 0.03),
];

/// Melanin extinction coefficients
pub const MELANIN_SAMPLES: [(f64, f64); 8] = [
    (470.0, 0.08),
    (495.0, 0.06),
    (520.0, 0.05),
    (630.0, 0.02),
    (660.0, 0.015),
    (800.0, 0.005),
    (850.0, 0.004),
    (880.0, 0.003),
];

/// Background (bloodless, waterless) tissue absorption: `A * lambda^B`, lambda in nm
/// Empirical fit reported by Jacques (2013); must not be altered
pub const BACKGROUND_AMPLITUDE: f64 = 7.84e7;
pub const BACKGROUND_EXPONENT: f64 = -3.255;

/// Reference wavelength of the reduced scattering power law (nm)
pub const LAMBDA_REF: f64 = 500.0;

/// Below this value of `1 - g` the reduced coefficient is returned unconverted
pub const ANISOTROPY_GUARD: f64 = 1e-6;

/// Default oxygen saturation of the blood in every layer
pub const DEFAULT_S_O2: f64 = 0.7;

/// Default melanin volume fraction
pub const DEFAULT_MELANIN_FRACTION: f64 = 0.0;

/// Refractive index of the ambient medium (air)
pub const AMBIENT_N: f64 = 1.0;
