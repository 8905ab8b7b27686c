//! Layered tissue models
//!
//! Layer catalogs, the hemangioma perturbation and the assembly of optical stacks.

pub mod assembler;
pub mod layer;
pub mod pathology;

pub use assembler::*;
pub use layer::*;
pub use pathology::*;
