//! Rate table module - commercial rate programs and their resolution.

mod rates_errors;
mod rates_model;
mod rates_resolver;
mod rates_traits;


pub use rates_errors::RateTableError;
pub use rates_model::{RateProgram, RateTableEntry};
pub use rates_resolver::{RateCacheConfig, RateTableResolver};
pub use rates_traits::RateTableRepositoryTrait;
