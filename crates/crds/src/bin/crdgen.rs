//! Prints the ClusterOperator CustomResourceDefinition as YAML.

use crds::ClusterOperator;
use kube::CustomResourceExt;

fn main() -> Result<(), serde_yaml::Error> {
    print!("{}", serde_yaml::to_string(&ClusterOperator::crd())?);
    Ok(())
}
