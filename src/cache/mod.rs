//! In-memory result cache
//!
//! Deduplicates identical scan requests for a short window so copy-pasted
//! resubmissions don't burn remote calls. Best effort only: the pipeline
//! must work identically whether or not an entry survives.

pub mod key;
pub mod store;

pub use key::fingerprint;
pub use store::ResultCache;
