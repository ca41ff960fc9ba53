#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]
#![forbid(unsafe_code)]

//! Capability and extension requirement resolution for SPIR-V.
//!
//! An [`EnvironmentResolver`] describes what a target can use. The rule table
//! derives per-instruction [`Requirement`]s, and a [`RequirementAccumulator`]
//! folds them into the [`Declarations`] a unit must carry.

mod accumulator;
pub mod capability;
mod error;
mod graph;
pub mod operands;
mod pass;
mod profile;
mod requirement;
mod resolver;
pub mod rules;
mod table;
mod version;

pub use accumulator::{Declarations, RequirementAccumulator};
pub use capability::{Capability, ExtInstSet, Extension, CAPABILITIES};
pub use error::{GraphError, RequirementError, ResolveError};
pub use graph::CapabilityGraph;
pub use pass::{resolve_module, resolve_unit, resolve_units, with_prerequisites};
pub use profile::{Addressing, EnvironmentKind, EnvironmentProfile, ProfileError};
pub use requirement::Requirement;
pub use resolver::EnvironmentResolver;
pub use rules::{requirements_for, Rule};
pub use table::{EnumTable, Enumerant};
pub use version::{ParseVersionError, Version};
