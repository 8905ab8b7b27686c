//! Power-law scattering model
//!
//! mu_s' = a * (lambda / 500)^-b, converted to mu_s = mu_s' / (1 - g).

use log::warn;

use crate::iop::constants::{ANISOTROPY_GUARD, LAMBDA_REF};

/// Reduced scattering coefficient mu_s' [mm^-1]
pub fn reduced_scattering(wavelength: f64, a_scatter: f64, b_scatter: f64) -> f64 {
    a_scatter * (wavelength / LAMBDA_REF).powf(-b_scatter)
}

/// Scattering coefficient mu_s [mm^-1]
///
/// When `1 - g` is not above [`ANISOTROPY_GUARD`] the reduced coefficient is returned as is.
pub fn compute_mu_s(wavelength: f64, a_scatter: f64, b_scatter: f64, g: f64) -> f64 {
    let mu_s_prime = reduced_scattering(wavelength, a_scatter, b_scatter);

    if 1.0 - g > ANISOTROPY_GUARD {
        mu_s_prime / (1.0 - g)
    } else {
        warn!(
            "anisotropy g = {} too close to 1, using reduced scattering {} as mu_s",
            g, mu_s_prime
        );
        mu_s_prime
    }
}
