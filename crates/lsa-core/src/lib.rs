#![deny(missing_docs)]
#![doc = "Core alphabets, structured errors and deterministic RNG for the LSA toolkit."]

pub mod alphabet;
pub mod errors;
pub mod rng;

pub use alphabet::{Alphabet, AlphabetName, AlphabetSet};
pub use errors::{ErrorInfo, LsaError};
pub use rng::RngHandle;
