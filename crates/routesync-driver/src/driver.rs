//! Reconciliation driver.
//!
//! [`Driver`] exposes the six mutating operations a reconciler issues after
//! diffing desired against observed route tables. Every operation first
//! reports what it is about to do through the injected [`LogSink`], then,
//! unless the driver runs in dry-run mode, performs the provider calls.
//!
//! Names are translated to provider identifiers through an [`IdResolver`]
//! owned by the driver, so one driver instance should be used for a whole
//! reconciliation pass.

use routesync_common::{Color, DriverOptions, LogRecord, LogSink, RouteDiff, TracingSink};
use routesync_provider::{RouteTableApi, Tag};
use routesync_types::{Cidr, Route, RouteTableState, SubnetId, VpcId};
use tracing::{debug, instrument};

use crate::error::DriverResult;
use crate::resolver::IdResolver;

const IGNORED_ROUTE_PREFIX: &str = "[Difference in ignored route]";

/// Applies route table changes to a provider.
pub struct Driver<P: RouteTableApi> {
    client: P,
    options: DriverOptions,
    sink: Box<dyn LogSink>,
    resolver: IdResolver,
}

impl<P: RouteTableApi> Driver<P> {
    /// Creates a driver that reports through `sink`.
    pub fn new(client: P, options: DriverOptions, sink: Box<dyn LogSink>) -> Self {
        Self {
            client,
            options,
            sink,
            resolver: IdResolver::new(),
        }
    }

    /// Creates a driver that reports through `tracing`, painting lines when
    /// `options.color` is set.
    pub fn with_tracing(client: P, options: DriverOptions) -> Self {
        Self::new(client, options, Box::new(TracingSink::new(options.color)))
    }

    pub fn options(&self) -> DriverOptions {
        self.options
    }

    pub fn client(&self) -> &P {
        &self.client
    }

    pub fn into_client(self) -> P {
        self.client
    }

    /// Identifier caches built so far.
    pub fn resolver(&self) -> &IdResolver {
        &self.resolver
    }

    /// Creates a route table named `name` in `vpc_id`.
    ///
    /// The new table is tagged with its name and registered with the
    /// resolver, so later operations on it need no describe call. Returns
    /// the empty state of the new table.
    #[instrument(skip_all, fields(vpc = %vpc_id, route_table = name))]
    pub fn create_route_table(
        &mut self,
        vpc_id: &VpcId,
        name: &str,
        _attrs: &RouteTableState,
    ) -> DriverResult<RouteTableState> {
        self.emit(
            LogRecord::info(format!("Create Route Table `{}` > `{}`", vpc_id, name))
                .with_color(Color::Cyan),
        );

        if !self.options.dry_run {
            let route_table_id = self.client.create_route_table(vpc_id)?;
            self.client
                .create_tags(std::slice::from_ref(&route_table_id), &[Tag::name(name)])?;
            debug!("Created route table {}", route_table_id);
            self.resolver
                .register_route_table(vpc_id.clone(), name, route_table_id);
        }

        Ok(RouteTableState::empty())
    }

    /// Associates each subnet with the named route table.
    ///
    /// Stops at the first failure; subnets associated before it stay
    /// associated.
    #[instrument(skip_all, fields(vpc = %vpc_id, route_table = rt_name, subnets = subnet_ids.len()))]
    pub fn associate_subnets(
        &mut self,
        vpc_id: &VpcId,
        rt_name: &str,
        subnet_ids: &[SubnetId],
    ) -> DriverResult<()> {
        self.emit(
            LogRecord::info(format!(
                "Associate Subnets `{}` > `{}`: {}",
                vpc_id,
                rt_name,
                join_ids(subnet_ids)
            ))
            .with_color(Color::Green),
        );

        if self.options.dry_run {
            return Ok(());
        }

        for subnet_id in subnet_ids {
            let route_table_id = self.resolver.route_table_id(&self.client, vpc_id, rt_name)?;
            let association_id = self.client.associate_route_table(&route_table_id, subnet_id)?;
            debug!("Associated {} with {} as {}", subnet_id, route_table_id, association_id);
        }

        Ok(())
    }

    /// Removes the association of each subnet.
    ///
    /// The association is looked up by subnet, not by route table name, so
    /// a subnet associated with some other table is still disassociated.
    #[instrument(skip_all, fields(vpc = %vpc_id, route_table = rt_name, subnets = subnet_ids.len()))]
    pub fn disassociate_subnets(
        &mut self,
        vpc_id: &VpcId,
        rt_name: &str,
        subnet_ids: &[SubnetId],
    ) -> DriverResult<()> {
        self.emit(
            LogRecord::info(format!(
                "Disassociate Subnets `{}` > `{}`: {}",
                vpc_id,
                rt_name,
                join_ids(subnet_ids)
            ))
            .with_color(Color::Red),
        );

        if self.options.dry_run {
            return Ok(());
        }

        for subnet_id in subnet_ids {
            let association_id = self.resolver.association_id(&self.client, subnet_id)?;
            self.client.disassociate_route_table(&association_id)?;
            debug!("Disassociated {} ({})", subnet_id, association_id);
        }

        Ok(())
    }

    /// Creates a route.
    ///
    /// Ignored routes are reported and never created.
    #[instrument(skip_all, fields(vpc = %vpc_id, route_table = rt_name, destination = %destination))]
    pub fn create_route(
        &mut self,
        vpc_id: &VpcId,
        rt_name: &str,
        destination: &Cidr,
        route: &Route,
    ) -> DriverResult<()> {
        let target = route_path(vpc_id, rt_name, destination);

        if route.ignore {
            self.emit(
                LogRecord::warn(format!("{} Create Route {}", IGNORED_ROUTE_PREFIX, target))
                    .with_color(Color::Yellow),
            );
            return Ok(());
        }

        self.emit(LogRecord::info(format!("Create Route {}", target)).with_color(Color::Cyan));

        if !self.options.dry_run {
            let route_table_id = self.resolver.route_table_id(&self.client, vpc_id, rt_name)?;
            self.client
                .create_route(&route_table_id, destination, &route.target)?;
        }

        Ok(())
    }

    /// Deletes a route. There is no ignore check on deletion.
    #[instrument(skip_all, fields(vpc = %vpc_id, route_table = rt_name, destination = %destination))]
    pub fn delete_route(
        &mut self,
        vpc_id: &VpcId,
        rt_name: &str,
        destination: &Cidr,
    ) -> DriverResult<()> {
        self.emit(
            LogRecord::info(format!(
                "Delete Route {}",
                route_path(vpc_id, rt_name, destination)
            ))
            .with_color(Color::Red),
        );

        if !self.options.dry_run {
            let route_table_id = self.resolver.route_table_id(&self.client, vpc_id, rt_name)?;
            self.client.delete_route(&route_table_id, destination)?;
        }

        Ok(())
    }

    /// Replaces the target of an existing route.
    ///
    /// For an ignored route nothing is ever replaced. Drift between `old`
    /// and `route` minus its ignore flag is reported as a warning with a
    /// diff; without drift nothing is logged. A managed route is always
    /// logged with its diff and replaced, even when unchanged.
    #[instrument(skip_all, fields(vpc = %vpc_id, route_table = rt_name, destination = %destination))]
    pub fn update_route(
        &mut self,
        vpc_id: &VpcId,
        rt_name: &str,
        destination: &Cidr,
        route: &Route,
        old: &Route,
    ) -> DriverResult<()> {
        let target = route_path(vpc_id, rt_name, destination);

        if route.ignore {
            let managed = route.without_ignore();
            if managed != *old {
                let diff = RouteDiff::between(old, &managed)?;
                self.emit(
                    LogRecord::warn(format!("{} Update Route {}", IGNORED_ROUTE_PREFIX, target))
                        .with_color(Color::Yellow),
                );
                self.emit(LogRecord::warn(diff.render(self.options.color)).with_diff(diff));
            }
            return Ok(());
        }

        let diff = RouteDiff::between(old, route)?;
        self.emit(LogRecord::info(format!("Update Route {}", target)).with_color(Color::Green));
        self.emit(LogRecord::info(diff.render(self.options.color)).with_diff(diff));

        if !self.options.dry_run {
            let route_table_id = self.resolver.route_table_id(&self.client, vpc_id, rt_name)?;
            self.client
                .replace_route(&route_table_id, destination, &route.target)?;
        }

        Ok(())
    }

    fn emit(&self, record: LogRecord) {
        self.sink.log(&record);
    }
}

fn route_path(vpc_id: &VpcId, rt_name: &str, destination: &Cidr) -> String {
    format!("`{}` > `{}` > `{}`", vpc_id, rt_name, destination)
}

fn join_ids(subnet_ids: &[SubnetId]) -> String {
    subnet_ids
        .iter()
        .map(SubnetId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use routesync_common::Level;
    use routesync_test::{gateway_route, CapturingSink, FakeProvider};
    use std::sync::Arc;

    fn driver(options: DriverOptions) -> (Driver<FakeProvider>, Arc<CapturingSink>) {
        let sink = Arc::new(CapturingSink::default());
        let driver = Driver::new(
            FakeProvider::default(),
            options,
            Box::new(Arc::clone(&sink)),
        );
        (driver, sink)
    }

    #[test]
    fn test_join_ids() {
        let ids: Vec<SubnetId> = vec!["subnet-1".into(), "subnet-2".into()];
        assert_eq!(join_ids(&ids), "subnet-1, subnet-2");
        assert_eq!(join_ids(&[]), "");
    }

    #[test]
    fn test_operation_messages() {
        let (mut driver, sink) = driver(DriverOptions::default().with_dry_run(true));
        let vpc: VpcId = "vpc-1".into();
        let cidr: Cidr = "10.0.0.0/16".parse().unwrap();
        let subnets: Vec<SubnetId> = vec!["subnet-1".into(), "subnet-2".into()];

        driver
            .create_route_table(&vpc, "public", &RouteTableState::empty())
            .unwrap();
        driver.associate_subnets(&vpc, "public", &subnets).unwrap();
        driver.disassociate_subnets(&vpc, "public", &subnets).unwrap();
        driver
            .create_route(&vpc, "public", &cidr, &gateway_route("igw-1"))
            .unwrap();
        driver.delete_route(&vpc, "public", &cidr).unwrap();

        let lines: Vec<(String, Option<Color>)> = sink
            .records()
            .into_iter()
            .map(|r| (r.message, r.color))
            .collect();

        assert_eq!(
            lines,
            vec![
                ("Create Route Table `vpc-1` > `public`".to_string(), Some(Color::Cyan)),
                (
                    "Associate Subnets `vpc-1` > `public`: subnet-1, subnet-2".to_string(),
                    Some(Color::Green)
                ),
                (
                    "Disassociate Subnets `vpc-1` > `public`: subnet-1, subnet-2".to_string(),
                    Some(Color::Red)
                ),
                (
                    "Create Route `vpc-1` > `public` > `10.0.0.0/16`".to_string(),
                    Some(Color::Cyan)
                ),
                (
                    "Delete Route `vpc-1` > `public` > `10.0.0.0/16`".to_string(),
                    Some(Color::Red)
                ),
            ]
        );
    }

    #[test]
    fn test_update_diff_follows_color_option() {
        let (mut driver, sink) = driver(DriverOptions::default().with_dry_run(true).with_color(true));
        let cidr: Cidr = "0.0.0.0/0".parse().unwrap();

        driver
            .update_route(
                &"vpc-1".into(),
                "public",
                &cidr,
                &gateway_route("igw-2"),
                &gateway_route("igw-1"),
            )
            .unwrap();

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].color, Some(Color::Green));

        let diff_record = &records[1];
        assert_eq!(diff_record.level, Level::Info);
        assert_eq!(diff_record.color, None);
        assert_eq!(
            diff_record.message,
            format!(
                "{}\n{}",
                Color::Red.paint("-gateway_id: igw-1"),
                Color::Green.paint("+gateway_id: igw-2")
            )
        );
        assert!(diff_record.diff.as_ref().is_some_and(RouteDiff::has_changes));
    }

    #[test]
    fn test_accessors() {
        let options = DriverOptions::default().with_color(true);
        let driver = Driver::with_tracing(FakeProvider::default(), options);

        assert_eq!(driver.options(), options);
        assert!(!driver.resolver().has_route_table_index());
        assert!(driver.client().calls().is_empty());
        assert!(driver.into_client().calls().is_empty());
    }
}
