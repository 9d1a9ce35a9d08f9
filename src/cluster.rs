use crate::sizing::{self, error::Field, RawSizingInput, ResolvedSizing};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to parse cluster config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Missing value for config key {0}")]
    MissingValue(&'static str),
    #[error(transparent)]
    Sizing(#[from] sizing::error::Error),
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub cluster_name: String,
    pub region: String,
    #[serde(default)]
    pub subnets: Vec<Subnet>,
    controller_count: Option<i64>,
    controller: Option<Controller>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subnet {
    pub availability_zone: String,
    #[serde(rename = "instanceCIDR")]
    pub instance_cidr: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct Controller {
    count: Option<i64>,
    auto_scaling_group: Option<AutoScalingGroup>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct AutoScalingGroup {
    min_size: Option<i64>,
    max_size: Option<i64>,
    rolling_update_min_instances_in_service: Option<i64>,
}

impl Cluster {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let cluster: Cluster = serde_yaml::from_slice(bytes)?;

        if cluster.cluster_name.is_empty() {
            return Err(Error::MissingValue("clusterName"));
        }
        if cluster.region.is_empty() {
            return Err(Error::MissingValue("region"));
        }

        Ok(cluster)
    }

    pub fn controller_sizing_input(&self) -> sizing::Result<RawSizingInput> {
        let controller = self.controller.as_ref();
        let count = controller.and_then(|c| c.count);

        if self.controller_count.is_some() && count.is_some() {
            return Err(sizing::error::Error::DisjointConfiguration {
                field: Field::DeprecatedCount,
                other: Field::Count,
            });
        }

        let asg = controller.and_then(|c| c.auto_scaling_group.as_ref());

        Ok(RawSizingInput {
            count: self.controller_count.or(count),
            min: asg.and_then(|a| a.min_size),
            max: asg.and_then(|a| a.max_size),
            min_instances_in_service: asg.and_then(|a| a.rolling_update_min_instances_in_service),
        })
    }

    pub fn config(&self) -> Result<ClusterConfig> {
        let input = self.controller_sizing_input()?;
        debug!(?input, "Normalized controller sizing input");

        Ok(ClusterConfig {
            cluster_name: self.cluster_name.clone(),
            region: self.region.clone(),
            subnets: self.subnets.clone(),
            controller: sizing::resolve(input)?,
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterConfig {
    cluster_name: String,
    region: String,
    subnets: Vec<Subnet>,
    controller: ResolvedSizing,
}

impl ClusterConfig {
    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn subnets(&self) -> &[Subnet] {
        &self.subnets
    }

    pub fn controller_sizing(&self) -> ResolvedSizing {
        self.controller
    }

    pub fn min_controller_count(&self) -> u64 {
        self.controller.min_count()
    }

    pub fn max_controller_count(&self) -> u64 {
        self.controller.max_count()
    }

    pub fn controller_rolling_update_min_instances_in_service(&self) -> u64 {
        self.controller.rolling_update_min_instances_in_service()
    }
}

#[tracing::instrument(name = "cluster::from_bytes", skip(bytes), fields(len = bytes.len()))]
pub fn from_bytes(bytes: &[u8]) -> Result<ClusterConfig> {
    let config = Cluster::from_bytes(bytes)?.config()?;

    info!(
        cluster_name = config.cluster_name.as_str(),
        min = config.min_controller_count(),
        max = config.max_controller_count(),
        "Validated cluster config"
    );

    Ok(config)
}
