//! Common routesync types for route table reconciliation.
//!
//! This crate provides the value types shared by the provider boundary,
//! the reconciliation driver and its tests:
//!
//! - [`VpcId`], [`RouteTableId`], [`SubnetId`], [`AssociationId`]: typed
//!   provider identifiers
//! - [`Cidr`]: route destination in CIDR notation
//! - [`RouteTarget`] and [`Route`]: the attributes of a single route
//! - [`RouteTableState`]: the routes and subnets of one route table

mod cidr;
mod ids;
mod route;

pub use cidr::Cidr;
pub use ids::{AssociationId, ResourceId, ResourceKind, RouteTableId, SubnetId, VpcId};
pub use route::{Route, RouteTableState, RouteTarget};

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid IP address format: {0}")]
    InvalidIpAddress(String),

    #[error("invalid CIDR block: {0}")]
    InvalidCidr(String),
}
