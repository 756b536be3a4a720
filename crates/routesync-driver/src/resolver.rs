//! Read-through identifier cache.
//!
//! Translates caller-facing names into provider identifiers with as few
//! `DescribeRouteTables` round-trips as possible:
//!
//! - route table id by `(vpc, Name tag)`
//! - association id by subnet
//!
//! Each index is built from one full describe the first time it is needed
//! and then kept for the lifetime of the resolver. A later miss on a key
//! does not trigger a re-fetch. The two indexes are independent, so a
//! driver that needs both describes twice, once per index.

use std::collections::HashMap;

use routesync_provider::{RouteTableApi, RouteTableDescription};
use routesync_types::{AssociationId, RouteTableId, SubnetId, VpcId};
use tracing::debug;

use crate::error::{DriverError, DriverResult};

/// VPC -> route table name -> route table id.
pub type RouteTableIndex = HashMap<VpcId, HashMap<String, RouteTableId>>;

/// Subnet -> association id.
pub type AssociationIndex = HashMap<SubnetId, AssociationId>;

/// Builds the route table index from a describe response.
///
/// Tables without a `Name` tag are skipped. When two tables in one VPC carry
/// the same name, the one listed last wins.
pub fn index_route_tables(route_tables: &[RouteTableDescription]) -> RouteTableIndex {
    let mut index = RouteTableIndex::new();

    for rt in route_tables {
        let Some(name) = rt.name() else {
            continue;
        };

        let by_name = index.entry(rt.vpc_id.clone()).or_default();
        if let Some(previous) = by_name.insert(name.to_string(), rt.id.clone()) {
            debug!(
                "Route table name `{}` > `{}` maps to both {} and {}; keeping {}",
                rt.vpc_id, name, previous, rt.id, rt.id
            );
        }
    }

    index
}

/// Builds the association index from a describe response.
///
/// Associations without a subnet (the main-table association) are skipped.
pub fn index_associations(route_tables: &[RouteTableDescription]) -> AssociationIndex {
    route_tables
        .iter()
        .flat_map(|rt| rt.subnet_associations())
        .map(|(subnet, assoc)| (subnet.clone(), assoc.clone()))
        .collect()
}

/// Lazily populated identifier caches, owned by one driver.
#[derive(Debug, Default)]
pub struct IdResolver {
    /// Built from the first describe; `None` until then.
    route_table_ids: Option<RouteTableIndex>,

    /// Tables created through the driver. Consulted before the describe
    /// index and never requires a provider call.
    created_route_tables: RouteTableIndex,

    /// Built from its own describe; `None` until then.
    association_ids: Option<AssociationIndex>,
}

impl IdResolver {
    /// Creates a resolver with empty caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once the route table index has been fetched.
    pub fn has_route_table_index(&self) -> bool {
        self.route_table_ids.is_some()
    }

    /// Returns true once the association index has been fetched.
    pub fn has_association_index(&self) -> bool {
        self.association_ids.is_some()
    }

    /// Resolves a route table name within a VPC.
    ///
    /// Describes all route tables on the first call that is not answered by
    /// a registered table.
    pub fn route_table_id<A>(
        &mut self,
        api: &A,
        vpc_id: &VpcId,
        name: &str,
    ) -> DriverResult<RouteTableId>
    where
        A: RouteTableApi + ?Sized,
    {
        if let Some(id) = lookup(&self.created_route_tables, vpc_id, name) {
            return Ok(id.clone());
        }

        let index = match self.route_table_ids.take() {
            Some(index) => index,
            None => {
                let route_tables = api.describe_route_tables()?;
                let index = index_route_tables(&route_tables);
                debug!(
                    "Indexed named route tables in {} VPC(s) from {} table(s)",
                    index.len(),
                    route_tables.len()
                );
                index
            }
        };
        let index = self.route_table_ids.insert(index);

        lookup(index, vpc_id, name)
            .cloned()
            .ok_or_else(|| DriverError::route_table_not_found(vpc_id, name))
    }

    /// Resolves the association id of a subnet.
    ///
    /// Describes all route tables on the first call.
    pub fn association_id<A>(&mut self, api: &A, subnet_id: &SubnetId) -> DriverResult<AssociationId>
    where
        A: RouteTableApi + ?Sized,
    {
        let index = match self.association_ids.take() {
            Some(index) => index,
            None => {
                let route_tables = api.describe_route_tables()?;
                let index = index_associations(&route_tables);
                debug!("Indexed {} subnet association(s)", index.len());
                index
            }
        };
        let index = self.association_ids.insert(index);

        index
            .get(subnet_id)
            .cloned()
            .ok_or_else(|| DriverError::association_not_found(subnet_id))
    }

    /// Records a table created through the driver under `(vpc, name)`.
    pub fn register_route_table(&mut self, vpc_id: VpcId, name: impl Into<String>, id: RouteTableId) {
        self.created_route_tables
            .entry(vpc_id)
            .or_default()
            .insert(name.into(), id);
    }
}

fn lookup<'a>(index: &'a RouteTableIndex, vpc_id: &VpcId, name: &str) -> Option<&'a RouteTableId> {
    index.get(vpc_id).and_then(|by_name| by_name.get(name))
}
