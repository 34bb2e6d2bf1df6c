//! Ethos Core - genome, integrity guard, and decision types

pub mod error;
pub mod genome;
pub mod guard;
pub mod resonance;
pub mod types;

pub use error::{Error, Result};
pub use genome::{Genome, GenomeBuilder, GenomeSnapshot};
pub use guard::IntegrityGuard;
pub use resonance::{Collective, ResonanceNode};
pub use types::*;
