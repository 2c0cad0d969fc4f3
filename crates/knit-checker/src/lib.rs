//! The checker core: a virtual machine that simulates a component's
//! operation stream, a join validator that checks arithmetic laws between
//! components, and the top-level orchestrator that runs both over a full
//! garment manifest.
//!
//! Nothing here returns `Result` for domain failures — see [`error`] for why
//! a [`error::CheckerError`] is data, not an exception.

pub mod conversion;
pub mod error;
pub mod joins;
pub mod orchestrator;
pub mod simulate;
pub mod vm;

pub use error::{CheckResult, CheckerError, ErrorOrigin};
pub use orchestrator::check_all;
pub use simulate::{extract_edge_counts, simulate_component, SimulationResult};
pub use vm::{execute, InvalidOperation, VMState};
