//! Table allocation engine
//!
//! Decides which table serves a party, commits the decision atomically and
//! estimates walk-in wait times. The engine only talks to storage through
//! [`SeatingStore`], so it runs the same against SQLite and [`MemoryStore`].
//!
//! # Modules
//!
//! - [`window`] - occupancy windows around reservation times
//! - [`availability`] - pure feasibility predicates and smallest-fit selection
//! - [`wait_time`] - walk-in wait estimate heuristic
//! - [`store`] - storage contract and guarded change sets
//! - [`memory`] - in-process store
//! - [`engine`] - the operations

pub mod availability;
pub mod engine;
pub mod memory;
pub mod outcome;
pub mod store;
pub mod wait_time;
pub mod window;

pub use engine::AllocationEngine;
pub use memory::MemoryStore;
pub use outcome::{Allocation, AllocationOutcome, EngineError, EngineResult, Rejection, RejectionKind};
pub use store::{ChangeSet, Mutation, SeatingStore, StoreError, StoreResult};
pub use window::OccupancyWindow;
