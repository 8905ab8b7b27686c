//! Piecewise-linear chromophore spectra
//!
//! A [`Spectrum`] is built once from sparse literature samples and then queried at any
//! wavelength. Queries between two samples are linearly interpolated, queries outside the
//! sampled range are linearly extrapolated with the slope of the nearest end segment.
//! [`SpectralTables`] bundles the four spectra used by the absorption model and is passed
//! explicitly to whatever needs it, so tests can substitute their own tables.

use std::fmt::Display;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::iop::constants;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Chromophore {
    Deoxyhemoglobin,
    Oxyhemoglobin,
    Water,
    Melanin,
}

impl Chromophore {
    pub const ALL: [Chromophore; 4] = [
        Chromophore::Deoxyhemoglobin,
        Chromophore::Oxyhemoglobin,
        Chromophore::Water,
        Chromophore::Melanin,
    ];
}

impl Display for Chromophore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chromophore::Deoxyhemoglobin => write!(f, "Hb"),
            Chromophore::Oxyhemoglobin => write!(f, "HbO2"),
            Chromophore::Water => write!(f, "water"),
            Chromophore::Melanin => write!(f, "melanin"),
        }
    }
}

/// Reasons a sample table cannot back an interpolation
#[derive(Debug, Error, PartialEq)]
pub enum SpectrumError {
    #[error("{chromophore} spectrum needs at least 2 samples, found {found}")]
    TooFewSamples { chromophore: Chromophore, found: usize },

    #[error("{chromophore} spectrum has duplicate wavelength {wavelength} nm")]
    DuplicateWavelength {
        chromophore: Chromophore,
        wavelength: f64,
    },

    #[error("{chromophore} spectrum has non-positive wavelength {wavelength} nm")]
    NonPositiveWavelength {
        chromophore: Chromophore,
        wavelength: f64,
    },
}

/// Extinction coefficient samples of one chromophore, sorted by wavelength
#[derive(Debug, Clone)]
pub struct Spectrum {
    chromophore: Chromophore,
    wavelengths: Vec<f64>, // [nm], strictly increasing
    values: Vec<f64>,      // [mm^-1]
}

impl Spectrum {
    pub fn new(chromophore: Chromophore, samples: &[(f64, f64)]) -> Result<Self, SpectrumError> {
        if samples.len() < 2 {
            return Err(SpectrumError::TooFewSamples {
                chromophore,
                found: samples.len(),
            });
        }

        if let Some(&(wavelength, _)) = samples
            .iter()
            .find(|(wl, _)| !wl.is_finite() || *wl <= 0.0)
        {
            return Err(SpectrumError::NonPositiveWavelength {
                chromophore,
                wavelength,
            });
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        if let Some(pair) = sorted.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(SpectrumError::DuplicateWavelength {
                chromophore,
                wavelength: pair[0].0,
            });
        }

        let (wavelengths, values) = sorted.into_iter().unzip();

        Ok(Self {
            chromophore,
            wavelengths,
            values,
        })
    }

    pub fn chromophore(&self) -> Chromophore {
        self.chromophore
    }

    /// Sampled wavelength range `(min, max)` in nm
    pub fn domain(&self) -> (f64, f64) {
        (self.wavelengths[0], self.wavelengths[self.wavelengths.len() - 1])
    }

    /// Whether `wavelength` can be answered without extrapolation
    pub fn contains(&self, wavelength: f64) -> bool {
        let (min, max) = self.domain();
        (min..=max).contains(&wavelength)
    }

    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.wavelengths
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Extinction coefficient [mm^-1] at `wavelength` [nm]
    pub fn interpolate(&self, wavelength: f64) -> f64 {
        if let Ok(idx) = self
            .wavelengths
            .binary_search_by(|wl| wl.total_cmp(&wavelength))
        {
            return self.values[idx];
        }

        // Segment [lo, lo + 1]; the end segments are reused outside the domain
        let last = self.wavelengths.len() - 1;
        let lo = match self.wavelengths.partition_point(|&wl| wl < wavelength) {
            0 => 0,
            p if p > last => last - 1,
            p => p - 1,
        };

        let (x0, x1) = (self.wavelengths[lo], self.wavelengths[lo + 1]);
        let (y0, y1) = (self.values[lo], self.values[lo + 1]);
        let slope = (y1 - y0) / (x1 - x0);

        y0 + slope * (wavelength - x0)
    }
}

/// The four chromophore spectra consumed by the absorption model
#[derive(Debug, Clone)]
pub struct SpectralTables {
    hb: Spectrum,
    hbo2: Spectrum,
    water: Spectrum,
    melanin: Spectrum,
}

impl SpectralTables {
    pub fn new(hb: Spectrum, hbo2: Spectrum, water: Spectrum, melanin: Spectrum) -> Self {
        Self {
            hb,
            hbo2,
            water,
            melanin,
        }
    }

    /// Tables built from the literature samples in [`constants`]
    pub fn literature() -> Result<Self, SpectrumError> {
        Ok(Self::new(
            Spectrum::new(Chromophore::Deoxyhemoglobin, &constants::HB_SAMPLES)?,
            Spectrum::new(Chromophore::Oxyhemoglobin, &constants::HBO2_SAMPLES)?,
            Spectrum::new(Chromophore::Water, &constants::WATER_SAMPLES)?,
            Spectrum::new(Chromophore::Melanin, &constants::MELANIN_SAMPLES)?,
        ))
    }

    pub fn spectrum(&self, chromophore: Chromophore) -> &Spectrum {
        match chromophore {
            Chromophore::Deoxyhemoglobin => &self.hb,
            Chromophore::Oxyhemoglobin => &self.hbo2,
            Chromophore::Water => &self.water,
            Chromophore::Melanin => &self.melanin,
        }
    }

    pub fn interpolate(&self, chromophore: Chromophore, wavelength: f64) -> f64 {
        self.spectrum(chromophore).interpolate(wavelength)
    }

    /// Logs a warning for every chromophore that has to extrapolate at `wavelength`.
    /// Returns true when all four spectra cover it.
    pub fn check_coverage(&self, wavelength: f64) -> bool {
        let mut covered = true;
        for chromophore in Chromophore::ALL {
            let spectrum = self.spectrum(chromophore);
            if !spectrum.contains(wavelength) {
                let (min, max) = spectrum.domain();
                warn!(
                    "{} nm is outside the {} samples [{}, {}] nm, extrapolating",
                    wavelength, chromophore, min, max
                );
                covered = false;
            }
        }
        covered
    }
}
