//! The Topology Registry: five immutable lookup tables describing which
//! edge/join combinations are legal and what arithmetic law each join type
//! obeys.
//!
//! Loading cross-validates every table against the others and against the
//! closed enums in `knit-types`, collecting every violation found rather
//! than failing at the first one — see [`TopologyRegistry::load`].

pub mod error;
pub mod registry;
pub mod source;
pub mod tables;

pub use error::{RegistryError, RegistryViolation};
pub use registry::{CompatibilityKey, TopologyRegistry};
pub use source::RegistrySource;
pub use tables::{CompatibilityResult, EdgeTypeEntry, JoinTypeEntry};
