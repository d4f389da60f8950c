//! Workspace aggregator; see the [`hmc`] facade.

pub use hmc::*;
