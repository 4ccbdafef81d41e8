//! In-memory reference implementations of the persistence traits.
//!
//! Production deployments put a database behind the same traits; these
//! implementations back the test suite and small single-process setups.

mod memory;


pub use memory::{InMemoryRateTableRepository, InMemorySettlementRepository};
