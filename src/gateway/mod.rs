//! [`ChainGateway`](crate::traits::ChainGateway) implementations.
//!
//! Only the in-memory chain ships with the crate; production gateways wrap
//! an RPC client outside of it.

mod in_memory;

pub use in_memory::InMemoryChain;
