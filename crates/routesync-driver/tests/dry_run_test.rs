//! Dry-run behaviour: every operation reports, nothing mutates.

use pretty_assertions::assert_eq;
use routesync_driver::{Driver, DriverOptions};
use routesync_test::{
    assert_no_mutations, gateway_route, nat_route, route_table, CapturingSink, FakeProvider,
};
use routesync_types::{Cidr, Route, RouteTableState, RouteTarget, SubnetId, VpcId};
use std::sync::Arc;

fn cidr(s: &str) -> Cidr {
    s.parse().unwrap()
}

fn dry_run_driver(provider: FakeProvider) -> (Driver<FakeProvider>, Arc<CapturingSink>) {
    let sink = Arc::new(CapturingSink::default());
    let driver = Driver::new(
        provider,
        DriverOptions::default().with_dry_run(true),
        Box::new(Arc::clone(&sink)),
    );
    (driver, sink)
}

fn scenario_provider() -> FakeProvider {
    FakeProvider::with_route_tables(vec![route_table("rt-1", "vpc-1")
        .named("public")
        .with_association("a-1", "subnet-1")
        .build()])
}

#[test]
fn test_dry_run_never_mutates() {
    let (mut driver, sink) = dry_run_driver(scenario_provider());
    let vpc: VpcId = "vpc-1".into();
    let subnets: Vec<SubnetId> = vec!["subnet-1".into()];

    driver
        .create_route_table(&vpc, "private", &RouteTableState::empty())
        .unwrap();
    driver.associate_subnets(&vpc, "public", &subnets).unwrap();
    driver.disassociate_subnets(&vpc, "public", &subnets).unwrap();
    driver
        .create_route(&vpc, "public", &cidr("0.0.0.0/0"), &gateway_route("igw-1"))
        .unwrap();
    driver
        .update_route(
            &vpc,
            "public",
            &cidr("0.0.0.0/0"),
            &nat_route("nat-1"),
            &gateway_route("igw-1"),
        )
        .unwrap();
    driver.delete_route(&vpc, "public", &cidr("0.0.0.0/0")).unwrap();

    assert!(driver.client().calls().is_empty());
    // Six action lines plus the update diff.
    assert_eq!(sink.records().len(), 7);
}

#[test]
fn test_dry_run_skips_resolution_of_unknown_names() {
    let (mut driver, sink) = dry_run_driver(FakeProvider::default());
    let vpc: VpcId = "vpc-missing".into();
    let subnets: Vec<SubnetId> = vec!["subnet-missing".into()];
    let dest = cidr("192.168.0.0/24");

    driver.associate_subnets(&vpc, "nowhere", &subnets).unwrap();
    driver.disassociate_subnets(&vpc, "nowhere", &subnets).unwrap();
    driver
        .create_route(&vpc, "nowhere", &dest, &gateway_route("igw-1"))
        .unwrap();
    driver
        .update_route(&vpc, "nowhere", &dest, &gateway_route("igw-1"), &gateway_route("igw-1"))
        .unwrap();
    driver.delete_route(&vpc, "nowhere", &dest).unwrap();

    let calls = driver.client().calls();
    assert_no_mutations(&calls).unwrap();
    assert_eq!(driver.client().describe_count(), 0);
    assert!(!driver.resolver().has_route_table_index());
    assert!(!driver.resolver().has_association_index());
    assert_eq!(sink.records().len(), 6);
}

#[test]
fn test_dry_run_create_table_returns_empty_state() {
    let (mut driver, sink) = dry_run_driver(FakeProvider::default());

    let state = driver
        .create_route_table(&"vpc-1".into(), "private", &RouteTableState::empty())
        .unwrap();

    assert!(state.is_empty());
    assert!(driver.client().route_tables().is_empty());
    assert_eq!(sink.messages(), vec!["Create Route Table `vpc-1` > `private`"]);
}

#[test]
fn test_dry_run_still_reports_ignored_drift() {
    let (mut driver, sink) = dry_run_driver(scenario_provider());

    driver
        .update_route(
            &"vpc-1".into(),
            "public",
            &cidr("0.0.0.0/0"),
            &Route::ignored(RouteTarget::nat_gateway("nat-1")),
            &gateway_route("igw-1"),
        )
        .unwrap();

    assert!(driver.client().calls().is_empty());
    assert_eq!(sink.diffs().len(), 1);
}

#[test]
fn test_into_client_after_dry_run() {
    let (mut driver, _sink) = dry_run_driver(scenario_provider());

    driver
        .delete_route(&"vpc-1".into(), "public", &cidr("10.0.0.0/8"))
        .unwrap();

    let provider = driver.into_client();
    assert!(provider.calls().is_empty());
    assert_eq!(provider.route_tables().len(), 1);
}
