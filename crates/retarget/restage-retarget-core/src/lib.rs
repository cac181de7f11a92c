//! restage-retarget-core
//!
//! Moves animation from an imported asset onto the standing target avatar.
//! [`ImportContainer`] quarantines one import and locates its source
//! actions, [`ActionBinder`] redirects the target's animation bindings at
//! those actions, and [`NodeSampler`] bakes placeholder-node motion onto
//! bones frame by frame when the asset carries no conventional action.
//! [`RetargetStrategy`] selects between the two transfer paths under a
//! shared result contract.

pub mod binder;
pub mod bone_rolls;
pub mod container;
pub mod error;
pub mod sampler;
pub mod strategy;

pub use binder::{ActionBinder, BindOutcome, BindReport, ChannelBind, MismatchPolicy};
pub use bone_rolls::copy_bone_rolls;
pub use container::{ContainerConfig, ImportContainer};
pub use error::RetargetError;
pub use sampler::{NodeSampler, SampleReport};
pub use strategy::{RetargetReport, RetargetStrategy};
