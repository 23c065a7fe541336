//! Resource model layer
//!
//! Structure:
//! - `kind.rs` - Kinds the relationship rules understand
//! - `selector.rs` - Label selector normalisation and matching
//! - `resource.rs` - Decoded Kubernetes objects

pub mod kind;
pub mod resource;
pub mod selector;

pub use kind::ResourceKind;
pub use resource::{
    Container, EnvFromSource, EnvVar, EnvVarSource, KeyRef, Metadata, NameRef, PodSpec,
    PodTemplate, Resource, ResourceError, ResourceSpec, SecretVolumeSource, Volume,
    VolumeClaimTemplate,
};
pub use selector::{Selector, SelectorError};
