//! Proof-of-Work Module
//!
//! Algorithm dispatch for header PoW hashes. The hash functions themselves
//! are supplied through [`PowFunction`]; this module only decides which one
//! runs and what happens when a header carries an unknown tag.

mod dev;
mod dispatcher;

pub use dev::DomainHasher;
pub use dispatcher::{AlgorithmSet, IdentitySource, PowDispatcher, PowFunction};
