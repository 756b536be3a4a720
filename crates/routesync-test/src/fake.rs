//! In-memory provider.
//!
//! [`FakeProvider`] keeps route tables, associations and routes in memory and
//! records every call it receives, failed ones included. It rejects requests
//! the way the real API does (unknown table, unknown association, duplicate
//! route) so tests see realistic error kinds.

use routesync_provider::{
    DescribeRouteTablesPage, ProviderError, ProviderErrorKind, ProviderResult, RouteTableApi,
    RouteTableAssociation, RouteTableDescription, Tag,
};
use routesync_types::{AssociationId, Cidr, RouteTableId, RouteTarget, SubnetId, VpcId};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use tracing::trace;

/// The eight API operations, without arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderOperation {
    CreateRouteTable,
    CreateTags,
    DescribeRouteTables,
    AssociateRouteTable,
    DisassociateRouteTable,
    CreateRoute,
    DeleteRoute,
    ReplaceRoute,
}

impl ProviderOperation {
    /// API name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            ProviderOperation::CreateRouteTable => "CreateRouteTable",
            ProviderOperation::CreateTags => "CreateTags",
            ProviderOperation::DescribeRouteTables => "DescribeRouteTables",
            ProviderOperation::AssociateRouteTable => "AssociateRouteTable",
            ProviderOperation::DisassociateRouteTable => "DisassociateRouteTable",
            ProviderOperation::CreateRoute => "CreateRoute",
            ProviderOperation::DeleteRoute => "DeleteRoute",
            ProviderOperation::ReplaceRoute => "ReplaceRoute",
        }
    }

    /// Returns true for every operation except `DescribeRouteTables`.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, ProviderOperation::DescribeRouteTables)
    }
}

/// One recorded API call with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    CreateRouteTable {
        vpc_id: VpcId,
    },
    CreateTags {
        resources: Vec<RouteTableId>,
        tags: Vec<Tag>,
    },
    DescribeRouteTables {
        next_token: Option<String>,
    },
    AssociateRouteTable {
        route_table_id: RouteTableId,
        subnet_id: SubnetId,
    },
    DisassociateRouteTable {
        association_id: AssociationId,
    },
    CreateRoute {
        route_table_id: RouteTableId,
        destination: Cidr,
        target: RouteTarget,
    },
    DeleteRoute {
        route_table_id: RouteTableId,
        destination: Cidr,
    },
    ReplaceRoute {
        route_table_id: RouteTableId,
        destination: Cidr,
        target: RouteTarget,
    },
}

impl ProviderCall {
    /// The operation this call invoked.
    pub fn operation(&self) -> ProviderOperation {
        match self {
            ProviderCall::CreateRouteTable { .. } => ProviderOperation::CreateRouteTable,
            ProviderCall::CreateTags { .. } => ProviderOperation::CreateTags,
            ProviderCall::DescribeRouteTables { .. } => ProviderOperation::DescribeRouteTables,
            ProviderCall::AssociateRouteTable { .. } => ProviderOperation::AssociateRouteTable,
            ProviderCall::DisassociateRouteTable { .. } => {
                ProviderOperation::DisassociateRouteTable
            }
            ProviderCall::CreateRoute { .. } => ProviderOperation::CreateRoute,
            ProviderCall::DeleteRoute { .. } => ProviderOperation::DeleteRoute,
            ProviderCall::ReplaceRoute { .. } => ProviderOperation::ReplaceRoute,
        }
    }

    pub fn is_mutating(&self) -> bool {
        self.operation().is_mutating()
    }
}

#[derive(Debug, Default)]
struct FakeState {
    route_tables: Vec<RouteTableDescription>,
    routes: HashMap<RouteTableId, BTreeMap<Cidr, RouteTarget>>,
    calls: Vec<ProviderCall>,
    failures: HashMap<ProviderOperation, VecDeque<ProviderError>>,
    next_route_table: u64,
    next_association: u64,
}

impl FakeState {
    fn route_table_mut(
        &mut self,
        operation: ProviderOperation,
        id: &RouteTableId,
    ) -> ProviderResult<&mut RouteTableDescription> {
        self.route_tables
            .iter_mut()
            .find(|rt| &rt.id == id)
            .ok_or_else(|| {
                ProviderError::from_code(
                    operation.name(),
                    "InvalidRouteTableID.NotFound",
                    format!("The routeTable ID '{}' does not exist", id),
                )
            })
    }

    fn routes_mut(
        &mut self,
        operation: ProviderOperation,
        id: &RouteTableId,
    ) -> ProviderResult<&mut BTreeMap<Cidr, RouteTarget>> {
        self.route_table_mut(operation, id)?;
        Ok(self.routes.entry(id.clone()).or_default())
    }
}

/// In-memory [`RouteTableApi`] implementation.
#[derive(Debug)]
pub struct FakeProvider {
    state: Mutex<FakeState>,
    page_size: usize,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self::with_route_tables(Vec::new())
    }
}

impl FakeProvider {
    /// Creates a provider already holding `route_tables`.
    pub fn with_route_tables(route_tables: Vec<RouteTableDescription>) -> Self {
        Self {
            state: Mutex::new(FakeState {
                route_tables,
                ..FakeState::default()
            }),
            page_size: usize::MAX,
        }
    }

    /// Serves `DescribeRouteTables` in pages of at most `page_size` tables.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Seeds an existing route.
    pub fn with_route(self, route_table_id: &str, destination: Cidr, target: RouteTarget) -> Self {
        self.lock()
            .routes
            .entry(route_table_id.into())
            .or_default()
            .insert(destination, target);
        self
    }

    /// Makes the next call of `operation` fail with `error`.
    ///
    /// Queued failures are consumed in order, one per call. The failing call
    /// is still recorded.
    pub fn fail_next(&self, operation: ProviderOperation, error: ProviderError) {
        self.lock()
            .failures
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.lock().calls.clone()
    }

    /// Number of full `DescribeRouteTables` walks (first-page requests).
    pub fn describe_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| matches!(call, ProviderCall::DescribeRouteTables { next_token: None }))
            .count()
    }

    /// Current route tables.
    pub fn route_tables(&self) -> Vec<RouteTableDescription> {
        self.lock().route_tables.clone()
    }

    /// Current routes of one table.
    pub fn routes(&self, route_table_id: &RouteTableId) -> BTreeMap<Cidr, RouteTarget> {
        self.lock()
            .routes
            .get(route_table_id)
            .cloned()
            .unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        // A test that panicked while holding the lock already failed.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Records `call` and pops a queued failure for it, if any.
    fn begin(&self, call: ProviderCall) -> ProviderResult<MutexGuard<'_, FakeState>> {
        let mut state = self.lock();
        let operation = call.operation();
        trace!("FakeProvider: {:?}", call);
        state.calls.push(call);

        if let Some(error) = state
            .failures
            .get_mut(&operation)
            .and_then(VecDeque::pop_front)
        {
            return Err(error);
        }
        Ok(state)
    }
}

impl RouteTableApi for FakeProvider {
    fn create_route_table(&self, vpc_id: &VpcId) -> ProviderResult<RouteTableId> {
        let mut state = self.begin(ProviderCall::CreateRouteTable {
            vpc_id: vpc_id.clone(),
        })?;

        state.next_route_table += 1;
        let id = RouteTableId::new(format!("rtb-{:06}", state.next_route_table));
        state.route_tables.push(RouteTableDescription {
            id: id.clone(),
            vpc_id: vpc_id.clone(),
            tags: Vec::new(),
            associations: Vec::new(),
        });
        Ok(id)
    }

    fn create_tags(&self, resources: &[RouteTableId], tags: &[Tag]) -> ProviderResult<()> {
        let mut state = self.begin(ProviderCall::CreateTags {
            resources: resources.to_vec(),
            tags: tags.to_vec(),
        })?;

        for id in resources {
            let rt = state.route_table_mut(ProviderOperation::CreateTags, id)?;
            for tag in tags {
                match rt.tags.iter_mut().find(|t| t.key == tag.key) {
                    Some(existing) => existing.value = tag.value.clone(),
                    None => rt.tags.push(tag.clone()),
                }
            }
        }
        Ok(())
    }

    fn describe_route_tables_page(
        &self,
        next_token: Option<&str>,
    ) -> ProviderResult<DescribeRouteTablesPage> {
        let state = self.begin(ProviderCall::DescribeRouteTables {
            next_token: next_token.map(str::to_string),
        })?;

        let start = match next_token {
            None => 0,
            Some(token) => token.parse::<usize>().map_err(|_| {
                ProviderError::from_code(
                    ProviderOperation::DescribeRouteTables.name(),
                    "InvalidParameterValue",
                    format!("Invalid NextToken '{}'", token),
                )
            })?,
        };

        let total = state.route_tables.len();
        let start = start.min(total);
        let end = start.saturating_add(self.page_size).min(total);

        Ok(DescribeRouteTablesPage {
            route_tables: state.route_tables[start..end].to_vec(),
            next_token: (end < total).then(|| end.to_string()),
        })
    }

    fn associate_route_table(
        &self,
        route_table_id: &RouteTableId,
        subnet_id: &SubnetId,
    ) -> ProviderResult<AssociationId> {
        let mut state = self.begin(ProviderCall::AssociateRouteTable {
            route_table_id: route_table_id.clone(),
            subnet_id: subnet_id.clone(),
        })?;

        let already_associated = state
            .route_tables
            .iter()
            .flat_map(|rt| rt.associations.iter())
            .any(|assoc| assoc.subnet_id.as_ref() == Some(subnet_id));
        if already_associated {
            return Err(ProviderError::from_code(
                ProviderOperation::AssociateRouteTable.name(),
                "Resource.AlreadyAssociated",
                format!("the specified association for subnet {} already exists", subnet_id),
            ));
        }

        state.next_association += 1;
        let id = AssociationId::new(format!("rtbassoc-{:06}", state.next_association));
        let rt = state.route_table_mut(ProviderOperation::AssociateRouteTable, route_table_id)?;
        rt.associations.push(RouteTableAssociation {
            id: id.clone(),
            subnet_id: Some(subnet_id.clone()),
            main: false,
        });
        Ok(id)
    }

    fn disassociate_route_table(&self, association_id: &AssociationId) -> ProviderResult<()> {
        let mut state = self.begin(ProviderCall::DisassociateRouteTable {
            association_id: association_id.clone(),
        })?;

        for rt in state.route_tables.iter_mut() {
            if let Some(pos) = rt.associations.iter().position(|a| &a.id == association_id) {
                rt.associations.remove(pos);
                return Ok(());
            }
        }

        Err(ProviderError::from_code(
            ProviderOperation::DisassociateRouteTable.name(),
            "InvalidAssociationID.NotFound",
            format!("The association ID '{}' does not exist", association_id),
        ))
    }

    fn create_route(
        &self,
        route_table_id: &RouteTableId,
        destination: &Cidr,
        target: &RouteTarget,
    ) -> ProviderResult<()> {
        let mut state = self.begin(ProviderCall::CreateRoute {
            route_table_id: route_table_id.clone(),
            destination: *destination,
            target: target.clone(),
        })?;

        if target.is_empty() {
            return Err(ProviderError::from_code(
                ProviderOperation::CreateRoute.name(),
                "MissingParameter",
                "The request must contain a route target",
            ));
        }

        let routes = state.routes_mut(ProviderOperation::CreateRoute, route_table_id)?;
        if routes.contains_key(destination) {
            return Err(ProviderError::from_code(
                ProviderOperation::CreateRoute.name(),
                "RouteAlreadyExists",
                format!("The route identified by {} already exists", destination),
            ));
        }
        routes.insert(*destination, target.clone());
        Ok(())
    }

    fn delete_route(&self, route_table_id: &RouteTableId, destination: &Cidr) -> ProviderResult<()> {
        let mut state = self.begin(ProviderCall::DeleteRoute {
            route_table_id: route_table_id.clone(),
            destination: *destination,
        })?;

        let routes = state.routes_mut(ProviderOperation::DeleteRoute, route_table_id)?;
        match routes.remove(destination) {
            Some(_) => Ok(()),
            None => Err(route_not_found(ProviderOperation::DeleteRoute, destination)),
        }
    }

    fn replace_route(
        &self,
        route_table_id: &RouteTableId,
        destination: &Cidr,
        target: &RouteTarget,
    ) -> ProviderResult<()> {
        let mut state = self.begin(ProviderCall::ReplaceRoute {
            route_table_id: route_table_id.clone(),
            destination: *destination,
            target: target.clone(),
        })?;

        let routes = state.routes_mut(ProviderOperation::ReplaceRoute, route_table_id)?;
        match routes.get_mut(destination) {
            Some(existing) => {
                *existing = target.clone();
                Ok(())
            }
            None => Err(route_not_found(ProviderOperation::ReplaceRoute, destination)),
        }
    }
}

fn route_not_found(operation: ProviderOperation, destination: &Cidr) -> ProviderError {
    ProviderError::new(
        ProviderErrorKind::NotFound,
        operation.name(),
        format!("no route with destination-cidr-block {} in route table", destination),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::route_table;
    use pretty_assertions::assert_eq;

    fn cidr(s: &str) -> Cidr {
        s.parse().unwrap()
    }

    #[test]
    fn test_sequential_ids() {
        let api = FakeProvider::default();
        let vpc: VpcId = "vpc-1".into();

        let rt1 = api.create_route_table(&vpc).unwrap();
        let rt2 = api.create_route_table(&vpc).unwrap();
        let assoc = api.associate_route_table(&rt1, &"subnet-1".into()).unwrap();

        assert_eq!(rt1.as_str(), "rtb-000001");
        assert_eq!(rt2.as_str(), "rtb-000002");
        assert_eq!(assoc.as_str(), "rtbassoc-000001");
    }

    #[test]
    fn test_tags_upsert() {
        let api = FakeProvider::with_route_tables(vec![route_table("rt-1", "vpc-1")
            .named("old")
            .build()]);

        api.create_tags(&["rt-1".into()], &[Tag::name("new")]).unwrap();

        assert_eq!(api.route_tables()[0].name(), Some("new"));
        assert_eq!(api.route_tables()[0].tags.len(), 1);
    }

    #[test]
    fn test_paged_describe() {
        let api = FakeProvider::with_route_tables(vec![
            route_table("rt-1", "vpc-1").build(),
            route_table("rt-2", "vpc-1").build(),
            route_table("rt-3", "vpc-1").build(),
        ])
        .with_page_size(2);

        let all = api.describe_route_tables().unwrap();

        assert_eq!(all.len(), 3);
        assert_eq!(api.describe_count(), 1);
        assert_eq!(
            api.calls(),
            vec![
                ProviderCall::DescribeRouteTables { next_token: None },
                ProviderCall::DescribeRouteTables {
                    next_token: Some("2".to_string())
                },
            ]
        );
    }

    #[test]
    fn test_disassociate_unknown_association() {
        let api = FakeProvider::default();

        let err = api
            .disassociate_route_table(&"rtbassoc-x".into())
            .unwrap_err();

        assert_eq!(err.kind, ProviderErrorKind::NotFound);
        assert_eq!(err.operation, "DisassociateRouteTable");
    }

    #[test]
    fn test_route_lifecycle() {
        let api = FakeProvider::with_route_tables(vec![route_table("rt-1", "vpc-1").build()]);
        let rt: RouteTableId = "rt-1".into();
        let dest = cidr("0.0.0.0/0");

        api.create_route(&rt, &dest, &RouteTarget::gateway("igw-1"))
            .unwrap();
        let dup = api
            .create_route(&rt, &dest, &RouteTarget::gateway("igw-1"))
            .unwrap_err();
        assert_eq!(dup.kind, ProviderErrorKind::AlreadyExists);

        api.replace_route(&rt, &dest, &RouteTarget::nat_gateway("nat-1"))
            .unwrap();
        assert_eq!(api.routes(&rt)[&dest], RouteTarget::nat_gateway("nat-1"));

        api.delete_route(&rt, &dest).unwrap();
        assert!(api.routes(&rt).is_empty());

        let gone = api.delete_route(&rt, &dest).unwrap_err();
        assert_eq!(gone.kind, ProviderErrorKind::NotFound);
    }

    #[test]
    fn test_unknown_route_table() {
        let api = FakeProvider::default();

        let err = api
            .create_route(&"rt-x".into(), &cidr("10.0.0.0/8"), &RouteTarget::gateway("igw-1"))
            .unwrap_err();

        assert_eq!(err.kind, ProviderErrorKind::NotFound);
    }

    #[test]
    fn test_fail_next_is_consumed_once() {
        let api = FakeProvider::default();
        api.fail_next(
            ProviderOperation::CreateRouteTable,
            ProviderError::transport("CreateRouteTable", "connection reset"),
        );

        assert!(api.create_route_table(&"vpc-1".into()).is_err());
        assert!(api.create_route_table(&"vpc-1".into()).is_ok());
        assert_eq!(api.calls().len(), 2);
    }

    #[test]
    fn test_seeded_route() {
        let api = FakeProvider::with_route_tables(vec![route_table("rt-1", "vpc-1").build()])
            .with_route(
                "rt-1",
                cidr("10.1.0.0/16"),
                RouteTarget::vpc_peering_connection("pcx-1"),
            );

        let routes = api.routes(&"rt-1".into());
        assert_eq!(
            routes.get(&cidr("10.1.0.0/16")),
            Some(&RouteTarget::vpc_peering_connection("pcx-1"))
        );
    }
}
