//! Optical properties of layered skin models
//!
//! Derives the absorption (mu_a) and scattering (mu_s) coefficients of each skin layer at a
//! given wavelength and assembles them into the layer stack consumed by Monte Carlo light
//! transport codes. Two models are provided: healthy skin and a hemangioma variant with
//! raised dermal blood content and oxygen saturation.
//!
//! ```rust
//! use tissue_optics::iop::SpectralTables;
//! use tissue_optics::tissue::{AssemblyParams, LayerCatalog, assemble, perturb_for_hemangioma};
//!
//! let tables = SpectralTables::literature().unwrap();
//! let skin = LayerCatalog::skin_seven_layer();
//! let lesion = perturb_for_hemangioma(&skin);
//!
//! let stack = assemble(&lesion, 630.0, &AssemblyParams::default(), &tables);
//! for layer in stack.layers() {
//!     println!("{}: mu_a={:.4} mu_s={:.4}", layer.name, layer.mu_a, layer.mu_s);
//! }
//! ```

pub mod config;
pub mod export;
pub mod iop;
pub mod tissue;
