//! Candidate key discovery via bounded closure search.

mod cancel;
mod finder;

pub use cancel::CancelToken;
pub use finder::{CandidateKeyFinder, KeySearch, KeySearchConfig};
