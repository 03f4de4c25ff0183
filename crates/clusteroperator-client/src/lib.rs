//! ClusterOperator Client
//!
//! Reads and writes `ClusterOperator` status records, the resource an
//! operator uses to report its health to the cluster version authority.
//!
//! # Example
//!
//! ```no_run
//! use clusteroperator_client::ClusterOperatorClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ClusterOperatorClient::new(kube::Client::try_default().await?);
//!
//! let machine_api = client.get("machine-api").await?;
//! println!("{:?}", machine_api.status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
#[path = "trait.rs"]
pub mod operator_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::ClusterOperatorClient;
pub use error::ClusterOperatorError;
pub use operator_trait::ClusterOperatorClientTrait;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockClusterOperatorClient;
