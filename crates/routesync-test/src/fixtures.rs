//! Test fixtures for describe responses and routes
//!
//! Provides builders for the route tables a provider reports and the routes
//! a reconciler passes to the driver.

use routesync_provider::{RouteTableAssociation, RouteTableDescription, Tag};
use routesync_types::{Route, RouteTarget};

/// Builder for a [`RouteTableDescription`].
#[derive(Debug, Clone)]
pub struct RouteTableBuilder {
    description: RouteTableDescription,
}

/// Starts a route table with no tags and no associations.
pub fn route_table(id: &str, vpc_id: &str) -> RouteTableBuilder {
    RouteTableBuilder {
        description: RouteTableDescription {
            id: id.into(),
            vpc_id: vpc_id.into(),
            tags: Vec::new(),
            associations: Vec::new(),
        },
    }
}

impl RouteTableBuilder {
    /// Adds a `Name` tag.
    pub fn named(self, name: &str) -> Self {
        self.tagged(routesync_provider::NAME_TAG_KEY, name)
    }

    /// Adds an arbitrary tag.
    pub fn tagged(mut self, key: &str, value: &str) -> Self {
        self.description.tags.push(Tag::new(key, value));
        self
    }

    /// Adds a subnet association.
    pub fn with_association(mut self, association_id: &str, subnet_id: &str) -> Self {
        self.description.associations.push(RouteTableAssociation {
            id: association_id.into(),
            subnet_id: Some(subnet_id.into()),
            main: false,
        });
        self
    }

    /// Adds the VPC main-table association, which has no subnet.
    pub fn with_main_association(mut self, association_id: &str) -> Self {
        self.description.associations.push(RouteTableAssociation {
            id: association_id.into(),
            subnet_id: None,
            main: true,
        });
        self
    }

    pub fn build(self) -> RouteTableDescription {
        self.description
    }
}

/// Managed route through an internet gateway.
pub fn gateway_route(gateway_id: &str) -> Route {
    Route::new(RouteTarget::gateway(gateway_id))
}

/// Managed route through a NAT gateway.
pub fn nat_route(nat_gateway_id: &str) -> Route {
    Route::new(RouteTarget::nat_gateway(nat_gateway_id))
}

/// Managed route through a VPC peering connection.
pub fn peering_route(peering_connection_id: &str) -> Route {
    Route::new(RouteTarget::vpc_peering_connection(peering_connection_id))
}
