//! Route table reconciliation driver.
//!
//! Applies the changes computed by a reconciler to a cloud provider's route
//! tables: creating tables, associating and disassociating subnets, and
//! creating, replacing or deleting routes. Route tables are addressed by
//! their `Name` tag within a VPC; the driver resolves names to provider
//! identifiers through a lazily built cache.
//!
//! ```ignore
//! let options = DriverOptions::default().with_dry_run(true);
//! let mut driver = Driver::with_tracing(client, options);
//!
//! driver.create_route_table(&vpc_id, "public", &RouteTableState::empty())?;
//! driver.create_route(&vpc_id, "public", &"0.0.0.0/0".parse()?, &route)?;
//! ```

mod driver;
mod error;
mod resolver;

pub use driver::Driver;
pub use error::{DriverError, DriverResult};
pub use resolver::{index_associations, index_route_tables, AssociationIndex, IdResolver, RouteTableIndex};

pub use routesync_common::DriverOptions;
