//! State module for tracking harvest results
//!
//! # Components
//!
//! - `AggregateStore`: category-keyed buckets of stream cards, shared by every
//!   worker task of a run and read once the run's barrier has been crossed

mod aggregate;

pub use aggregate::AggregateStore;
