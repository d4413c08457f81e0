pub mod error;
pub mod rng;
pub mod types;

pub use error::{AnchorfallError, Result};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
