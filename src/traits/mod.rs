//! Core traits.
//!
//! [`ChainGateway`] is the single point through which the market reaches
//! the chain.

mod chain_gateway;

pub use chain_gateway::ChainGateway;
