//! Limit policies, key derivation and the decision engine.

mod engine;
mod key;
mod policy;

pub use engine::{Outcome, RateGate};
pub use key::build_identifier;
pub use policy::{KeyMode, LimitPolicy, TimeUnit};
