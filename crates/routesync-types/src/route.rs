//! Route attributes and per-table state.

use crate::{Cidr, SubnetId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Provider-specific target of a route.
///
/// Exactly one field is normally set, but the type does not enforce it: the
/// provider is the authority on which combinations are valid and rejects the
/// rest with an invalid-parameter error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTarget {
    /// Internet or virtual private gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_id: Option<String>,
    /// NAT gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nat_gateway_id: Option<String>,
    /// Egress-only internet gateway (IPv6 only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub egress_only_internet_gateway_id: Option<String>,
    /// NAT instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    /// Network interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_interface_id: Option<String>,
    /// VPC peering connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_peering_connection_id: Option<String>,
    /// Transit gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit_gateway_id: Option<String>,
}

impl RouteTarget {
    /// Target an internet or virtual private gateway.
    pub fn gateway(id: impl Into<String>) -> Self {
        Self {
            gateway_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Target a NAT gateway.
    pub fn nat_gateway(id: impl Into<String>) -> Self {
        Self {
            nat_gateway_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Target a VPC peering connection.
    pub fn vpc_peering_connection(id: impl Into<String>) -> Self {
        Self {
            vpc_peering_connection_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Target a transit gateway.
    pub fn transit_gateway(id: impl Into<String>) -> Self {
        Self {
            transit_gateway_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Returns true if no target field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A single route: its target plus the operator's `ignore` override.
///
/// `ignore` marks a route managed out-of-band. It never reaches the provider
/// and is omitted from serialized output when unset, so a route read back
/// from the provider compares equal to a desired route minus the flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    #[serde(flatten)]
    pub target: RouteTarget,
    #[serde(default, skip_serializing_if = "is_false")]
    pub ignore: bool,
}

impl Route {
    /// Creates a managed route.
    pub fn new(target: RouteTarget) -> Self {
        Self {
            target,
            ignore: false,
        }
    }

    /// Creates a route flagged as managed out-of-band.
    pub fn ignored(target: RouteTarget) -> Self {
        Self {
            target,
            ignore: true,
        }
    }

    /// Returns a copy of this route with the `ignore` flag cleared.
    pub fn without_ignore(&self) -> Self {
        Self::new(self.target.clone())
    }

    /// Compares this route, minus its `ignore` flag, against `old`.
    pub fn differs_ignoring_flag(&self, old: &Route) -> bool {
        self.without_ignore() != *old
    }
}

/// Routes and associated subnets of one route table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTableState {
    /// Routes keyed by destination.
    #[serde(default)]
    pub routes: BTreeMap<Cidr, Route>,
    /// Explicitly associated subnets.
    #[serde(default)]
    pub subnets: Vec<SubnetId>,
}

impl RouteTableState {
    /// State of a freshly created table: no routes, no subnets.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if the table has neither routes nor subnets.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty() && self.subnets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_without_ignore() {
        let route = Route::ignored(RouteTarget::gateway("igw-1"));
        let stripped = route.without_ignore();

        assert!(!stripped.ignore);
        assert_eq!(stripped.target, route.target);
    }

    #[test]
    fn test_differs_ignoring_flag() {
        let old = Route::new(RouteTarget::gateway("igw-1"));

        assert!(!Route::ignored(RouteTarget::gateway("igw-1")).differs_ignoring_flag(&old));
        assert!(Route::ignored(RouteTarget::nat_gateway("nat-1")).differs_ignoring_flag(&old));
    }

    #[test]
    fn test_serialization_omits_unset_fields() {
        let route = Route::new(RouteTarget::nat_gateway("nat-1"));
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(json, serde_json::json!({ "nat_gateway_id": "nat-1" }));

        let ignored = Route::ignored(RouteTarget::gateway("igw-1"));
        let json = serde_json::to_value(&ignored).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "gateway_id": "igw-1", "ignore": true })
        );
    }

    #[test]
    fn test_deserialize_defaults_ignore() {
        let route: Route = serde_json::from_str(r#"{"gateway_id":"igw-1"}"#).unwrap();
        assert_eq!(route, Route::new(RouteTarget::gateway("igw-1")));
    }

    #[test]
    fn test_empty_state() {
        let state = RouteTableState::empty();
        assert!(state.is_empty());
        assert!(state.routes.is_empty());
        assert!(state.subnets.is_empty());
        assert!(RouteTarget::default().is_empty());
        assert!(!RouteTarget::transit_gateway("tgw-1").is_empty());
    }
}
