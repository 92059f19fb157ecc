//! Persistent and in-process bookkeeping for analyzed matches

pub mod analyzed;
pub mod claims;

pub use analyzed::AnalyzedMatchStore;
pub use claims::{ClaimGuard, MatchClaims};
