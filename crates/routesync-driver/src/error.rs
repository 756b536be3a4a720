//! Error types for driver operations.

use routesync_provider::ProviderError;
use routesync_types::{SubnetId, VpcId};
use thiserror::Error;

/// Result type alias for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;

/// Errors that can occur during driver operations.
#[derive(Debug, Error)]
pub enum DriverError {
    /// No route table with this `Name` tag exists in the VPC.
    #[error("Route table not found: `{vpc_id}` > `{name}`")]
    RouteTableNotFound {
        /// The VPC that was searched.
        vpc_id: VpcId,
        /// The route table name.
        name: String,
    },

    /// The subnet has no explicit route table association.
    #[error("Route table association not found for subnet `{subnet_id}`")]
    AssociationNotFound {
        /// The subnet that was looked up.
        subnet_id: SubnetId,
    },

    /// A provider call failed. Never retried here.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A route could not be rendered for the diff output.
    #[error("Failed to render route diff: {0}")]
    Render(#[from] serde_yaml::Error),
}

impl DriverError {
    /// Creates a route table not found error.
    pub fn route_table_not_found(vpc_id: &VpcId, name: impl Into<String>) -> Self {
        Self::RouteTableNotFound {
            vpc_id: vpc_id.clone(),
            name: name.into(),
        }
    }

    /// Creates an association not found error.
    pub fn association_not_found(subnet_id: &SubnetId) -> Self {
        Self::AssociationNotFound {
            subnet_id: subnet_id.clone(),
        }
    }

    /// Returns true if a name or subnet could not be resolved to a
    /// provider identifier.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DriverError::RouteTableNotFound { .. } | DriverError::AssociationNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routesync_provider::ProviderErrorKind;

    #[test]
    fn test_error_display() {
        let err = DriverError::route_table_not_found(&"vpc-1".into(), "public");
        assert_eq!(err.to_string(), "Route table not found: `vpc-1` > `public`");

        let err = DriverError::association_not_found(&"subnet-2".into());
        assert_eq!(
            err.to_string(),
            "Route table association not found for subnet `subnet-2`"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(DriverError::route_table_not_found(&"vpc-1".into(), "x").is_not_found());
        assert!(DriverError::association_not_found(&"subnet-1".into()).is_not_found());

        let provider = ProviderError::new(ProviderErrorKind::NotFound, "DeleteRoute", "gone");
        assert!(!DriverError::from(provider).is_not_found());
    }
}
