//! Provider client boundary for route table reconciliation.
//!
//! The reconciliation driver never talks to a cloud SDK directly. It consumes
//! the capability set defined here, which mirrors the eight route table calls
//! of the provider's virtual-network API:
//!
//! - [`api`]: the [`RouteTableApi`] trait, including page flattening for
//!   `DescribeRouteTables`
//! - [`types`]: tags, associations and route table descriptions
//! - [`error`]: [`ProviderError`] and its failure classes
//!
//! # Example
//!
//! ```ignore
//! use routesync_provider::{RouteTableApi, ProviderResult, Tag};
//!
//! fn create_named_table(api: &impl RouteTableApi, vpc: &VpcId, name: &str) -> ProviderResult<RouteTableId> {
//!     let id = api.create_route_table(vpc)?;
//!     api.create_tags(&[id.clone()], &[Tag::name(name)])?;
//!     Ok(id)
//! }
//! ```

pub mod api;
pub mod error;
pub mod types;

pub use api::RouteTableApi;
pub use error::{ProviderError, ProviderErrorKind, ProviderResult};
pub use types::{
    DescribeRouteTablesPage, RouteTableAssociation, RouteTableDescription, Tag, NAME_TAG_KEY,
};
