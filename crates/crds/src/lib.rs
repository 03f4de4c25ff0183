//! Operator status CRD definitions
//!
//! Kubernetes resource types used to publish an operator's status to the
//! cluster version authority.

pub mod cluster_operator;
pub mod references;

pub use cluster_operator::*;
pub use references::*;
