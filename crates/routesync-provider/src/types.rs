//! Records exchanged with the provider API.

use routesync_types::{AssociationId, RouteTableId, SubnetId, VpcId};
use serde::{Deserialize, Serialize};

/// Tag key whose value is the human-assigned route table name.
pub const NAME_TAG_KEY: &str = "Name";

/// A resource tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    /// Creates a new tag.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates the `Name` tag for a route table.
    pub fn name(value: impl Into<String>) -> Self {
        Self::new(NAME_TAG_KEY, value)
    }
}

/// Association between a route table and a subnet (or the VPC main flag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTableAssociation {
    /// Association identifier (`rtbassoc-...`).
    pub id: AssociationId,
    /// Associated subnet; absent for the main-table association.
    #[serde(default)]
    pub subnet_id: Option<SubnetId>,
    /// True for the VPC's main route table association.
    #[serde(default)]
    pub main: bool,
}

/// One route table as returned by `DescribeRouteTables`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTableDescription {
    pub id: RouteTableId,
    pub vpc_id: VpcId,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub associations: Vec<RouteTableAssociation>,
}

impl RouteTableDescription {
    /// Returns the value of the first `Name` tag, if any.
    pub fn name(&self) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.key == NAME_TAG_KEY)
            .map(|tag| tag.value.as_str())
    }

    /// Returns the subnet associations, skipping the main-table association.
    pub fn subnet_associations(&self) -> impl Iterator<Item = (&SubnetId, &AssociationId)> {
        self.associations
            .iter()
            .filter_map(|assoc| assoc.subnet_id.as_ref().map(|subnet| (subnet, &assoc.id)))
    }
}

/// One page of a `DescribeRouteTables` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeRouteTablesPage {
    pub route_tables: Vec<RouteTableDescription>,
    /// Token for the next page; `None` on the last page.
    #[serde(default)]
    pub next_token: Option<String>,
}
