//! Relationship inference engine
//!
//! Takes the flat, already-decoded resource set of a manifest and derives the
//! typed edges between its resources: Service selectors, volume and
//! environment references to ConfigMaps and Secrets, and StatefulSet claim
//! templates.

mod infer;
mod model;

pub use infer::infer;
pub use model::{EdgeProperties, EdgeType, Relationship};
