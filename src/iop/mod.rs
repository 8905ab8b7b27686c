//! Inherent Optical Properties (IOP) module
//!
//! This module contains the chromophore spectra and the functions deriving the absorption
//! and scattering coefficients of a tissue layer at a given wavelength.

pub mod absorption;
pub mod constants;
pub mod scattering;
pub mod spectrum;

pub use absorption::*;
pub use scattering::*;
pub use spectrum::*;
