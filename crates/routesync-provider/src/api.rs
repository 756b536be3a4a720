//! The provider API consumed by the reconciliation driver.

use crate::error::ProviderResult;
use crate::types::{DescribeRouteTablesPage, RouteTableDescription, Tag};
use log::debug;
use routesync_types::{AssociationId, Cidr, RouteTableId, RouteTarget, SubnetId, VpcId};
use std::sync::Arc;

/// Route table operations of a cloud provider's virtual-network API.
///
/// Every call is synchronous and blocks until the provider answers.
/// Implementations own transport concerns (credentials, timeouts, retries);
/// errors are returned unchanged to the caller.
pub trait RouteTableApi {
    /// `CreateRouteTable`: creates an empty route table in a VPC.
    fn create_route_table(&self, vpc_id: &VpcId) -> ProviderResult<RouteTableId>;

    /// `CreateTags`: attaches tags to the given route tables.
    fn create_tags(&self, resources: &[RouteTableId], tags: &[Tag]) -> ProviderResult<()>;

    /// `DescribeRouteTables`: returns one page of route tables.
    ///
    /// `next_token` is `None` for the first page and the token from the
    /// previous page afterwards.
    fn describe_route_tables_page(
        &self,
        next_token: Option<&str>,
    ) -> ProviderResult<DescribeRouteTablesPage>;

    /// Returns every route table, walking all pages.
    fn describe_route_tables(&self) -> ProviderResult<Vec<RouteTableDescription>> {
        let mut route_tables = Vec::new();
        let mut next_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self.describe_route_tables_page(next_token.as_deref())?;
            pages += 1;
            route_tables.extend(page.route_tables);

            match page.next_token {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }

        debug!(
            "DescribeRouteTables: {} route tables in {} page(s)",
            route_tables.len(),
            pages
        );
        Ok(route_tables)
    }

    /// `AssociateRouteTable`: associates a subnet with a route table.
    fn associate_route_table(
        &self,
        route_table_id: &RouteTableId,
        subnet_id: &SubnetId,
    ) -> ProviderResult<AssociationId>;

    /// `DisassociateRouteTable`: removes a subnet association.
    fn disassociate_route_table(&self, association_id: &AssociationId) -> ProviderResult<()>;

    /// `CreateRoute`: adds a route to a route table.
    fn create_route(
        &self,
        route_table_id: &RouteTableId,
        destination: &Cidr,
        target: &RouteTarget,
    ) -> ProviderResult<()>;

    /// `DeleteRoute`: removes the route for a destination.
    fn delete_route(&self, route_table_id: &RouteTableId, destination: &Cidr)
        -> ProviderResult<()>;

    /// `ReplaceRoute`: replaces the target of an existing route.
    fn replace_route(
        &self,
        route_table_id: &RouteTableId,
        destination: &Cidr,
        target: &RouteTarget,
    ) -> ProviderResult<()>;
}

macro_rules! forward_route_table_api {
    () => {
        fn create_route_table(&self, vpc_id: &VpcId) -> ProviderResult<RouteTableId> {
            (**self).create_route_table(vpc_id)
        }

        fn create_tags(&self, resources: &[RouteTableId], tags: &[Tag]) -> ProviderResult<()> {
            (**self).create_tags(resources, tags)
        }

        fn describe_route_tables_page(
            &self,
            next_token: Option<&str>,
        ) -> ProviderResult<DescribeRouteTablesPage> {
            (**self).describe_route_tables_page(next_token)
        }

        fn describe_route_tables(&self) -> ProviderResult<Vec<RouteTableDescription>> {
            (**self).describe_route_tables()
        }

        fn associate_route_table(
            &self,
            route_table_id: &RouteTableId,
            subnet_id: &SubnetId,
        ) -> ProviderResult<AssociationId> {
            (**self).associate_route_table(route_table_id, subnet_id)
        }

        fn disassociate_route_table(&self, association_id: &AssociationId) -> ProviderResult<()> {
            (**self).disassociate_route_table(association_id)
        }

        fn create_route(
            &self,
            route_table_id: &RouteTableId,
            destination: &Cidr,
            target: &RouteTarget,
        ) -> ProviderResult<()> {
            (**self).create_route(route_table_id, destination, target)
        }

        fn delete_route(
            &self,
            route_table_id: &RouteTableId,
            destination: &Cidr,
        ) -> ProviderResult<()> {
            (**self).delete_route(route_table_id, destination)
        }

        fn replace_route(
            &self,
            route_table_id: &RouteTableId,
            destination: &Cidr,
            target: &RouteTarget,
        ) -> ProviderResult<()> {
            (**self).replace_route(route_table_id, destination, target)
        }
    };
}

impl<T: RouteTableApi + ?Sized> RouteTableApi for &T {
    forward_route_table_api!();
}

impl<T: RouteTableApi + ?Sized> RouteTableApi for Box<T> {
    forward_route_table_api!();
}

impl<T: RouteTableApi + ?Sized> RouteTableApi for Arc<T> {
    forward_route_table_api!();
}
