//! Fixture lifecycle orchestration.
//!
//! [`with_objs`] is the backbone of every CRUD suite: given an ordered
//! list of fixture kinds, it creates each kind through the API, runs the
//! test body, then deletes each kind in strictly reverse order — whether
//! the body returned, an assertion panicked, or creation itself failed
//! partway through. Creation order is dependency order (a server needs
//! its cachegroup, CDN, profile, status and type to exist first), and
//! reverse teardown is what keeps the referential-integrity guards of the
//! service satisfied.

use crate::env::TestEnv;
use crate::fixtures::TrafficControl;
use futures::FutureExt;
use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use to_client::{RequestOptions, Session};
use to_models::{Parameter, ProfileParameterCreationRequest};

/// The fixture kinds a suite can ask for, in the granularity the fixture
/// file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TcObj {
    Types,
    Statuses,
    Divisions,
    Regions,
    PhysLocations,
    Coordinates,
    Cdns,
    CacheGroups,
    Profiles,
    Parameters,
    ProfileParameters,
    Tenants,
    Users,
    ServerCapabilities,
    Servers,
    ServerServerCapabilities,
    DeliveryServices,
    DeliveryServiceServerAssignments,
    Asns,
}

impl fmt::Display for TcObj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Create the listed fixture kinds in order, run `body`, then delete the
/// kinds in reverse order.
///
/// `body` is an unpolled future; it does not start until every create
/// call has succeeded. Teardown always runs for every kind whose creation
/// was attempted: a panic in the body (a failed assertion) or in a create
/// function is captured, teardown completes, and the panic is then
/// re-raised so the test still fails. A panic during teardown itself
/// fails the test only when nothing earlier already had.
pub async fn with_objs<Fut>(env: &TestEnv, data: &TrafficControl, objs: &[TcObj], body: Fut)
where
    Fut: Future<Output = ()>,
{
    let mut created: Vec<TcObj> = Vec::new();
    let setup_result = {
        let created = &mut created;
        AssertUnwindSafe(async move {
            for obj in objs {
                // Registered before the create call so a kind that fails
                // partway through still gets torn down.
                created.push(*obj);
                create_obj(env, data, *obj).await;
            }
        })
        .catch_unwind()
        .await
    };

    let body_result = match &setup_result {
        Ok(()) => AssertUnwindSafe(body).catch_unwind().await,
        Err(_) => Ok(()),
    };

    let mut teardown_panic: Option<Box<dyn Any + Send>> = None;
    for obj in created.iter().rev() {
        if let Err(panic) = AssertUnwindSafe(delete_obj(env, *obj)).catch_unwind().await {
            tracing::error!(
                target: "env_tests.objs",
                kind = %obj,
                detail = panic_message(panic.as_ref()),
                "fixture teardown failed"
            );
            teardown_panic.get_or_insert(panic);
        }
    }

    if let Err(panic) = setup_result {
        std::panic::resume_unwind(panic);
    }
    if let Err(panic) = body_result {
        std::panic::resume_unwind(panic);
    }
    if let Some(panic) = teardown_panic {
        std::panic::resume_unwind(panic);
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

async fn create_obj(env: &TestEnv, data: &TrafficControl, obj: TcObj) {
    match obj {
        TcObj::Types => create_test_types(env, data).await,
        TcObj::Statuses => create_test_statuses(env, data).await,
        TcObj::Divisions => create_test_divisions(env, data).await,
        TcObj::Regions => create_test_regions(env, data).await,
        TcObj::PhysLocations => create_test_phys_locations(env, data).await,
        TcObj::Coordinates => create_test_coordinates(env, data).await,
        TcObj::Cdns => create_test_cdns(env, data).await,
        TcObj::CacheGroups => create_test_cachegroups(env, data).await,
        TcObj::Profiles => create_test_profiles(env, data).await,
        TcObj::Parameters => create_test_parameters(env, data).await,
        TcObj::ProfileParameters => create_test_profile_parameters(env, data).await,
        TcObj::Tenants => create_test_tenants(env, data).await,
        TcObj::Users => create_test_users(env, data).await,
        TcObj::ServerCapabilities => create_test_server_capabilities(env, data).await,
        TcObj::Servers => create_test_servers(env, data).await,
        TcObj::ServerServerCapabilities => create_test_server_server_capabilities(env, data).await,
        TcObj::DeliveryServices => create_test_delivery_services(env, data).await,
        TcObj::DeliveryServiceServerAssignments => {
            create_test_delivery_service_server_assignments(env, data).await
        }
        TcObj::Asns => create_test_asns(env, data).await,
    }
}

async fn delete_obj(env: &TestEnv, obj: TcObj) {
    match obj {
        TcObj::Types => delete_test_types(env).await,
        TcObj::Statuses => delete_test_statuses(env).await,
        TcObj::Divisions => delete_test_divisions(env).await,
        TcObj::Regions => delete_test_regions(env).await,
        TcObj::PhysLocations => delete_test_phys_locations(env).await,
        TcObj::Coordinates => delete_test_coordinates(env).await,
        TcObj::Cdns => delete_test_cdns(env).await,
        TcObj::CacheGroups => delete_test_cachegroups(env).await,
        TcObj::Profiles => delete_test_profiles(env).await,
        TcObj::Parameters => delete_test_parameters(env).await,
        TcObj::ProfileParameters => delete_test_profile_parameters(env).await,
        TcObj::Tenants => delete_test_tenants(env).await,
        TcObj::Users => delete_test_users(env).await,
        TcObj::ServerCapabilities => delete_test_server_capabilities(env).await,
        TcObj::Servers => delete_test_servers(env).await,
        TcObj::ServerServerCapabilities => delete_test_server_server_capabilities(env).await,
        TcObj::DeliveryServices => delete_test_delivery_services(env).await,
        TcObj::DeliveryServiceServerAssignments => {
            delete_test_delivery_service_server_assignments(env).await
        }
        TcObj::Asns => delete_test_asns(env).await,
    }
}

// ----------------------------------------------------------------------
// Lookup helpers: resolve the names fixture files use into the ids the
// API assigned at creation time.
// ----------------------------------------------------------------------

pub async fn get_type_id(session: &Session, name: &str) -> i64 {
    let opts = RequestOptions::new().with_param("name", name);
    let resp = session
        .get_types(&opts)
        .await
        .unwrap_or_else(|e| panic!("fetching type '{name}': {e}"));
    assert_eq!(resp.response.len(), 1, "expected exactly one type named '{name}'");
    resp.response[0].id.expect("type id")
}

pub async fn get_division_id(session: &Session, name: &str) -> i64 {
    let opts = RequestOptions::new().with_param("name", name);
    let resp = session
        .get_divisions(&opts)
        .await
        .unwrap_or_else(|e| panic!("fetching division '{name}': {e}"));
    assert_eq!(resp.response.len(), 1, "expected exactly one division named '{name}'");
    resp.response[0].id.expect("division id")
}

pub async fn get_status_id(session: &Session, name: &str) -> i64 {
    let opts = RequestOptions::new().with_param("name", name);
    let resp = session
        .get_statuses(&opts)
        .await
        .unwrap_or_else(|e| panic!("fetching status '{name}': {e}"));
    assert_eq!(resp.response.len(), 1, "expected exactly one status named '{name}'");
    resp.response[0].id.expect("status id")
}

pub async fn get_cdn_id(session: &Session, name: &str) -> i64 {
    let opts = RequestOptions::new().with_param("name", name);
    let resp = session
        .get_cdns(&opts)
        .await
        .unwrap_or_else(|e| panic!("fetching cdn '{name}': {e}"));
    assert_eq!(resp.response.len(), 1, "expected exactly one cdn named '{name}'");
    resp.response[0].id.expect("cdn id")
}

pub async fn get_cachegroup_id(session: &Session, name: &str) -> i64 {
    let opts = RequestOptions::new().with_param("name", name);
    let resp = session
        .get_cachegroups(&opts)
        .await
        .unwrap_or_else(|e| panic!("fetching cachegroup '{name}': {e}"));
    assert_eq!(resp.response.len(), 1, "expected exactly one cachegroup named '{name}'");
    resp.response[0].id.expect("cachegroup id")
}

pub async fn get_profile_id(session: &Session, name: &str) -> i64 {
    let opts = RequestOptions::new().with_param("name", name);
    let resp = session
        .get_profiles(&opts)
        .await
        .unwrap_or_else(|e| panic!("fetching profile '{name}': {e}"));
    assert_eq!(resp.response.len(), 1, "expected exactly one profile named '{name}'");
    resp.response[0].id.expect("profile id")
}

pub async fn get_tenant_id(session: &Session, name: &str) -> i64 {
    let opts = RequestOptions::new().with_param("name", name);
    let resp = session
        .get_tenants(&opts)
        .await
        .unwrap_or_else(|e| panic!("fetching tenant '{name}': {e}"));
    assert_eq!(resp.response.len(), 1, "expected exactly one tenant named '{name}'");
    resp.response[0].id.expect("tenant id")
}

pub async fn get_server_id(session: &Session, host_name: &str) -> i64 {
    let opts = RequestOptions::new().with_param("hostName", host_name);
    let resp = session
        .get_servers(&opts)
        .await
        .unwrap_or_else(|e| panic!("fetching server '{host_name}': {e}"));
    assert_eq!(resp.response.len(), 1, "expected exactly one server named '{host_name}'");
    resp.response[0].id.expect("server id")
}

pub async fn get_delivery_service_id(session: &Session, xml_id: &str) -> i64 {
    let opts = RequestOptions::new().with_param("xmlId", xml_id);
    let resp = session
        .get_delivery_services(&opts)
        .await
        .unwrap_or_else(|e| panic!("fetching delivery service '{xml_id}': {e}"));
    assert_eq!(
        resp.response.len(),
        1,
        "expected exactly one delivery service with xmlId '{xml_id}'"
    );
    resp.response[0].id.expect("delivery service id")
}

// ----------------------------------------------------------------------
// Create functions, one per fixture kind.
// ----------------------------------------------------------------------

pub async fn create_test_types(env: &TestEnv, data: &TrafficControl) {
    for typ in &data.types {
        env.session
            .create_type(typ, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not create type '{}': {e}", typ.name));
    }
}

pub async fn create_test_statuses(env: &TestEnv, data: &TrafficControl) {
    for status in &data.statuses {
        env.session
            .create_status(status, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not create status '{}': {e}", status.name));
    }
}

pub async fn create_test_divisions(env: &TestEnv, data: &TrafficControl) {
    for division in &data.divisions {
        env.session
            .create_division(division, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not create division '{}': {e}", division.name));
    }
}

pub async fn create_test_regions(env: &TestEnv, data: &TrafficControl) {
    for region in &data.regions {
        env.session
            .create_region(region, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not create region '{}': {e}", region.name));
    }
}

pub async fn create_test_phys_locations(env: &TestEnv, data: &TrafficControl) {
    for location in &data.phys_locations {
        env.session
            .create_phys_location(location, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not create phys location '{}': {e}", location.name));
    }
}

pub async fn create_test_coordinates(env: &TestEnv, data: &TrafficControl) {
    for coordinate in &data.coordinates {
        env.session
            .create_coordinate(coordinate, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not create coordinate '{}': {e}", coordinate.name));
    }
}

pub async fn create_test_cdns(env: &TestEnv, data: &TrafficControl) {
    for cdn in &data.cdns {
        env.session
            .create_cdn(cdn, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not create cdn '{}': {e}", cdn.name));
    }
}

pub async fn create_test_cachegroups(env: &TestEnv, data: &TrafficControl) {
    for cachegroup in &data.cachegroups {
        let name = cachegroup.name.as_deref().unwrap_or("<unnamed>");
        env.session
            .create_cachegroup(cachegroup, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not create cachegroup '{name}': {e}"));
    }
}

pub async fn create_test_profiles(env: &TestEnv, data: &TrafficControl) {
    for profile in &data.profiles {
        env.session
            .create_profile(profile, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not create profile '{}': {e}", profile.name));
    }
}

pub async fn create_test_parameters(env: &TestEnv, data: &TrafficControl) {
    env.session
        .create_multiple_parameters(&data.parameters, &RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not create parameters: {e}"));
}

/// Associate each profile's nested fixture parameters with it, creating
/// any parameter the Parameters kind did not already create.
pub async fn create_test_profile_parameters(env: &TestEnv, data: &TrafficControl) {
    for profile in &data.profiles {
        let Some(params) = &profile.params else {
            continue;
        };
        let profile_id = get_profile_id(&env.session, &profile.name).await;

        for param in params {
            let opts = RequestOptions::new()
                .with_param("name", &param.name)
                .with_param("configFile", &param.config_file)
                .with_param("value", &param.value);
            let mut found = env
                .session
                .get_parameters(&opts)
                .await
                .unwrap_or_else(|e| panic!("could not fetch parameter '{}': {e}", param.name));

            if found.response.is_empty() {
                env.session
                    .create_parameter(
                        &Parameter {
                            name: param.name.clone(),
                            config_file: param.config_file.clone(),
                            value: param.value.clone(),
                            ..Default::default()
                        },
                        &RequestOptions::new(),
                    )
                    .await
                    .unwrap_or_else(|e| panic!("could not create parameter '{}': {e}", param.name));
                found = env
                    .session
                    .get_parameters(&opts)
                    .await
                    .unwrap_or_else(|e| panic!("could not re-fetch parameter '{}': {e}", param.name));
            }
            assert!(
                !found.response.is_empty(),
                "parameter '{}' not found after creation",
                param.name
            );
            let parameter_id = found.response[0].id.expect("parameter id");

            env.session
                .create_profile_parameter(
                    &ProfileParameterCreationRequest {
                        profile_id,
                        parameter_id,
                    },
                    &RequestOptions::new(),
                )
                .await
                .unwrap_or_else(|e| {
                    panic!(
                        "could not associate parameter '{}' with profile '{}': {e}",
                        param.name, profile.name
                    )
                });
        }
    }
}

pub async fn create_test_tenants(env: &TestEnv, data: &TrafficControl) {
    for tenant in &data.tenants {
        env.session
            .create_tenant(tenant, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not create tenant '{}': {e}", tenant.name));
    }
}

pub async fn create_test_users(env: &TestEnv, data: &TrafficControl) {
    for user in &data.users {
        env.session
            .create_user(user, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not create user '{}': {e}", user.username));
    }
}

pub async fn create_test_server_capabilities(env: &TestEnv, data: &TrafficControl) {
    for capability in &data.server_capabilities {
        env.session
            .create_server_capability(capability, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| {
                panic!("could not create server capability '{}': {e}", capability.name)
            });
    }
}

pub async fn create_test_servers(env: &TestEnv, data: &TrafficControl) {
    for server in &data.servers {
        let host = server.host_name.as_deref().unwrap_or("<unnamed>");
        env.session
            .create_server(server, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not create server '{host}': {e}"));
    }
}

pub async fn create_test_server_server_capabilities(env: &TestEnv, data: &TrafficControl) {
    for assoc in &data.server_server_capabilities {
        let host = assoc
            .server
            .as_deref()
            .expect("fixture server capability assignment needs a server host name");
        let mut assoc = assoc.clone();
        assoc.server_id = Some(get_server_id(&env.session, host).await);
        env.session
            .create_server_server_capability(&assoc, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| {
                panic!(
                    "could not associate capability '{}' with server '{host}': {e}",
                    assoc.server_capability
                )
            });
    }
}

pub async fn create_test_delivery_services(env: &TestEnv, data: &TrafficControl) {
    for ds in &data.deliveryservices {
        let xml_id = ds
            .xml_id
            .as_deref()
            .expect("fixture delivery service needs an xmlId");
        env.session
            .create_delivery_service(ds, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not create delivery service '{xml_id}': {e}"));
    }
}

pub async fn create_test_delivery_service_server_assignments(env: &TestEnv, data: &TrafficControl) {
    for assignment in &data.delivery_service_server_assignments {
        let ds_id = get_delivery_service_id(&env.session, &assignment.xml_id).await;
        let mut servers = Vec::with_capacity(assignment.server_host_names.len());
        for host in &assignment.server_host_names {
            servers.push(get_server_id(&env.session, host).await);
        }
        env.session
            .assign_delivery_service_servers(
                &to_models::DeliveryServiceServers {
                    ds_id,
                    servers,
                    replace: assignment.replace,
                },
                &RequestOptions::new(),
            )
            .await
            .unwrap_or_else(|e| {
                panic!(
                    "could not assign servers to delivery service '{}': {e}",
                    assignment.xml_id
                )
            });
    }
}

pub async fn create_test_asns(env: &TestEnv, data: &TrafficControl) {
    for asn in &data.asns {
        let mut asn = asn.clone();
        if let Some(cachegroup) = asn.cachegroup.clone() {
            asn.cachegroup_id = Some(get_cachegroup_id(&env.session, &cachegroup).await);
        }
        env.session
            .create_asn(&asn, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not create ASN {}: {e}", asn.asn));
    }
}

// ----------------------------------------------------------------------
// Delete functions: list everything, delete each object, and verify with
// a filtered re-fetch that it is really gone.
// ----------------------------------------------------------------------

pub async fn delete_test_types(env: &TestEnv) {
    let types = env
        .session
        .get_types(&RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not fetch types for deletion: {e}"));
    for typ in types.response {
        let id = typ.id.expect("type id");
        env.session
            .delete_type(id, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not delete type '{}': {e}", typ.name));

        let remaining = env
            .session
            .get_types(&RequestOptions::new().with_param("id", id))
            .await
            .unwrap_or_else(|e| panic!("could not re-fetch type '{}': {e}", typ.name));
        assert!(
            remaining.response.is_empty(),
            "expected type '{}' to be deleted",
            typ.name
        );
    }
}

pub async fn delete_test_statuses(env: &TestEnv) {
    let statuses = env
        .session
        .get_statuses(&RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not fetch statuses for deletion: {e}"));
    for status in statuses.response {
        let id = status.id.expect("status id");
        env.session
            .delete_status(id, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not delete status '{}': {e}", status.name));

        let remaining = env
            .session
            .get_statuses(&RequestOptions::new().with_param("id", id))
            .await
            .unwrap_or_else(|e| panic!("could not re-fetch status '{}': {e}", status.name));
        assert!(
            remaining.response.is_empty(),
            "expected status '{}' to be deleted",
            status.name
        );
    }
}

pub async fn delete_test_divisions(env: &TestEnv) {
    let divisions = env
        .session
        .get_divisions(&RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not fetch divisions for deletion: {e}"));
    for division in divisions.response {
        let id = division.id.expect("division id");
        env.session
            .delete_division(id, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not delete division '{}': {e}", division.name));

        let remaining = env
            .session
            .get_divisions(&RequestOptions::new().with_param("id", id))
            .await
            .unwrap_or_else(|e| panic!("could not re-fetch division '{}': {e}", division.name));
        assert!(
            remaining.response.is_empty(),
            "expected division '{}' to be deleted",
            division.name
        );
    }
}

pub async fn delete_test_regions(env: &TestEnv) {
    let regions = env
        .session
        .get_regions(&RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not fetch regions for deletion: {e}"));
    for region in regions.response {
        env.session
            .delete_region(&region.name, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not delete region '{}': {e}", region.name));

        let remaining = env
            .session
            .get_regions(&RequestOptions::new().with_param("name", &region.name))
            .await
            .unwrap_or_else(|e| panic!("could not re-fetch region '{}': {e}", region.name));
        assert!(
            remaining.response.is_empty(),
            "expected region '{}' to be deleted",
            region.name
        );
    }
}

pub async fn delete_test_phys_locations(env: &TestEnv) {
    let locations = env
        .session
        .get_phys_locations(&RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not fetch phys locations for deletion: {e}"));
    for location in locations.response {
        let id = location.id.expect("phys location id");
        env.session
            .delete_phys_location(id, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not delete phys location '{}': {e}", location.name));

        let remaining = env
            .session
            .get_phys_locations(&RequestOptions::new().with_param("id", id))
            .await
            .unwrap_or_else(|e| panic!("could not re-fetch phys location '{}': {e}", location.name));
        assert!(
            remaining.response.is_empty(),
            "expected phys location '{}' to be deleted",
            location.name
        );
    }
}

pub async fn delete_test_coordinates(env: &TestEnv) {
    let coordinates = env
        .session
        .get_coordinates(&RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not fetch coordinates for deletion: {e}"));
    for coordinate in coordinates.response {
        let id = coordinate.id.expect("coordinate id");
        env.session
            .delete_coordinate(id, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not delete coordinate '{}': {e}", coordinate.name));

        let remaining = env
            .session
            .get_coordinates(&RequestOptions::new().with_param("id", id))
            .await
            .unwrap_or_else(|e| panic!("could not re-fetch coordinate '{}': {e}", coordinate.name));
        assert!(
            remaining.response.is_empty(),
            "expected coordinate '{}' to be deleted",
            coordinate.name
        );
    }
}

pub async fn delete_test_cdns(env: &TestEnv) {
    let cdns = env
        .session
        .get_cdns(&RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not fetch cdns for deletion: {e}"));
    for cdn in cdns.response {
        let id = cdn.id.expect("cdn id");
        env.session
            .delete_cdn(id, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not delete cdn '{}': {e}", cdn.name));

        let remaining = env
            .session
            .get_cdns(&RequestOptions::new().with_param("id", id))
            .await
            .unwrap_or_else(|e| panic!("could not re-fetch cdn '{}': {e}", cdn.name));
        assert!(
            remaining.response.is_empty(),
            "expected cdn '{}' to be deleted",
            cdn.name
        );
    }
}

pub async fn delete_test_cachegroups(env: &TestEnv) {
    // Children must go before parents. Each pass deletes every cachegroup
    // nothing else claims as a parent, until none remain.
    loop {
        let remaining = env
            .session
            .get_cachegroups(&RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not fetch cachegroups for deletion: {e}"))
            .response;
        if remaining.is_empty() {
            break;
        }

        let parent_ids: HashSet<i64> = remaining
            .iter()
            .flat_map(|cg| {
                [cg.parent_cachegroup_id, cg.secondary_parent_cachegroup_id]
            })
            .flatten()
            .collect();
        let deletable: Vec<_> = remaining
            .iter()
            .filter(|cg| cg.id.map(|id| !parent_ids.contains(&id)).unwrap_or(false))
            .collect();
        assert!(
            !deletable.is_empty(),
            "cachegroup parent references form a cycle; cannot finish teardown"
        );

        for cachegroup in deletable {
            let id = cachegroup.id.expect("cachegroup id");
            let name = cachegroup.name.as_deref().unwrap_or("<unnamed>");
            env.session
                .delete_cachegroup(id, &RequestOptions::new())
                .await
                .unwrap_or_else(|e| panic!("could not delete cachegroup '{name}': {e}"));

            let refetched = env
                .session
                .get_cachegroups(&RequestOptions::new().with_param("id", id))
                .await
                .unwrap_or_else(|e| panic!("could not re-fetch cachegroup '{name}': {e}"));
            assert!(
                refetched.response.is_empty(),
                "expected cachegroup '{name}' to be deleted"
            );
        }
    }
}

pub async fn delete_test_profiles(env: &TestEnv) {
    let profiles = env
        .session
        .get_profiles(&RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not fetch profiles for deletion: {e}"));
    for profile in profiles.response {
        let id = profile.id.expect("profile id");
        env.session
            .delete_profile(id, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not delete profile '{}': {e}", profile.name));

        let remaining = env
            .session
            .get_profiles(&RequestOptions::new().with_param("id", id))
            .await
            .unwrap_or_else(|e| panic!("could not re-fetch profile '{}': {e}", profile.name));
        assert!(
            remaining.response.is_empty(),
            "expected profile '{}' to be deleted",
            profile.name
        );
    }
}

pub async fn delete_test_parameters(env: &TestEnv) {
    let parameters = env
        .session
        .get_parameters(&RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not fetch parameters for deletion: {e}"));
    for parameter in parameters.response {
        let id = parameter.id.expect("parameter id");
        env.session
            .delete_parameter(id, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not delete parameter '{}': {e}", parameter.name));

        let remaining = env
            .session
            .get_parameters(&RequestOptions::new().with_param("id", id))
            .await
            .unwrap_or_else(|e| panic!("could not re-fetch parameter '{}': {e}", parameter.name));
        assert!(
            remaining.response.is_empty(),
            "expected parameter '{}' to be deleted",
            parameter.name
        );
    }
}

pub async fn delete_test_profile_parameters(env: &TestEnv) {
    let associations = env
        .session
        .get_profile_parameters(&RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not fetch profile parameters for deletion: {e}"));
    for assoc in &associations.response {
        let profile_id = assoc.profile_id.expect("profile id");
        let parameter_id = assoc.parameter_id.expect("parameter id");
        env.session
            .delete_profile_parameter(profile_id, parameter_id, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| {
                panic!("could not delete profile parameter {profile_id}/{parameter_id}: {e}")
            });
    }

    let remaining = env
        .session
        .get_profile_parameters(&RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not re-fetch profile parameters: {e}"));
    assert!(
        remaining.response.is_empty(),
        "expected all profile parameters to be deleted, found {}",
        remaining.response.len()
    );
}

pub async fn delete_test_tenants(env: &TestEnv) {
    // Child tenants must go before their parents; the root tenant stays.
    loop {
        let remaining: Vec<_> = env
            .session
            .get_tenants(&RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not fetch tenants for deletion: {e}"))
            .response
            .into_iter()
            .filter(|t| t.name != "root")
            .collect();
        if remaining.is_empty() {
            break;
        }

        let parent_ids: HashSet<i64> = remaining.iter().filter_map(|t| t.parent_id).collect();
        let deletable: Vec<_> = remaining
            .iter()
            .filter(|t| t.id.map(|id| !parent_ids.contains(&id)).unwrap_or(false))
            .collect();
        assert!(
            !deletable.is_empty(),
            "tenant parent references form a cycle; cannot finish teardown"
        );

        for tenant in deletable {
            let id = tenant.id.expect("tenant id");
            env.session
                .delete_tenant(id, &RequestOptions::new())
                .await
                .unwrap_or_else(|e| panic!("could not delete tenant '{}': {e}", tenant.name));

            let refetched = env
                .session
                .get_tenants(&RequestOptions::new().with_param("id", id))
                .await
                .unwrap_or_else(|e| panic!("could not re-fetch tenant '{}': {e}", tenant.name));
            assert!(
                refetched.response.is_empty(),
                "expected tenant '{}' to be deleted",
                tenant.name
            );
        }
    }
}

pub async fn delete_test_users(env: &TestEnv) {
    let users = env
        .session
        .get_users(&RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not fetch users for deletion: {e}"));
    for user in users.response {
        // The session's own account stays.
        if user.username == env.config.username {
            continue;
        }
        let id = user.id.expect("user id");
        env.session
            .delete_user(id, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not delete user '{}': {e}", user.username));

        let remaining = env
            .session
            .get_users(&RequestOptions::new().with_param("id", id))
            .await
            .unwrap_or_else(|e| panic!("could not re-fetch user '{}': {e}", user.username));
        assert!(
            remaining.response.is_empty(),
            "expected user '{}' to be deleted",
            user.username
        );
    }
}

pub async fn delete_test_server_capabilities(env: &TestEnv) {
    let capabilities = env
        .session
        .get_server_capabilities(&RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not fetch server capabilities for deletion: {e}"));
    for capability in capabilities.response {
        env.session
            .delete_server_capability(&capability.name, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| {
                panic!("could not delete server capability '{}': {e}", capability.name)
            });

        let remaining = env
            .session
            .get_server_capabilities(&RequestOptions::new().with_param("name", &capability.name))
            .await
            .unwrap_or_else(|e| {
                panic!("could not re-fetch server capability '{}': {e}", capability.name)
            });
        assert!(
            remaining.response.is_empty(),
            "expected server capability '{}' to be deleted",
            capability.name
        );
    }
}

pub async fn delete_test_servers(env: &TestEnv) {
    let servers = env
        .session
        .get_servers(&RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not fetch servers for deletion: {e}"));
    for server in servers.response {
        let id = server.id.expect("server id");
        let host = server.host_name.as_deref().unwrap_or("<unnamed>");
        env.session
            .delete_server(id, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not delete server '{host}': {e}"));

        let remaining = env
            .session
            .get_servers(&RequestOptions::new().with_param("id", id))
            .await
            .unwrap_or_else(|e| panic!("could not re-fetch server '{host}': {e}"));
        assert!(
            remaining.response.is_empty(),
            "expected server '{host}' to be deleted"
        );
    }
}

pub async fn delete_test_server_server_capabilities(env: &TestEnv) {
    let associations = env
        .session
        .get_server_server_capabilities(&RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not fetch server capability assignments: {e}"));
    for assoc in &associations.response {
        let server_id = assoc.server_id.expect("server id");
        env.session
            .delete_server_server_capability(
                server_id,
                &assoc.server_capability,
                &RequestOptions::new(),
            )
            .await
            .unwrap_or_else(|e| {
                panic!(
                    "could not remove capability '{}' from server {server_id}: {e}",
                    assoc.server_capability
                )
            });
    }
}

pub async fn delete_test_delivery_services(env: &TestEnv) {
    let services = env
        .session
        .get_delivery_services(&RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not fetch delivery services for deletion: {e}"));
    for ds in services.response {
        let id = ds.id.expect("delivery service id");
        let xml_id = ds.xml_id.as_deref().unwrap_or("<unnamed>");
        env.session
            .delete_delivery_service(id, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not delete delivery service '{xml_id}': {e}"));

        let remaining = env
            .session
            .get_delivery_services(&RequestOptions::new().with_param("id", id))
            .await
            .unwrap_or_else(|e| panic!("could not re-fetch delivery service '{xml_id}': {e}"));
        assert!(
            remaining.response.is_empty(),
            "expected delivery service '{xml_id}' to be deleted"
        );
    }
}

pub async fn delete_test_delivery_service_server_assignments(env: &TestEnv) {
    let assignments = env
        .session
        .get_delivery_service_servers(&RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not fetch delivery service servers: {e}"));
    for row in &assignments.response {
        let ds_id = row.delivery_service.expect("delivery service id");
        let server_id = row.server.expect("server id");
        env.session
            .delete_delivery_service_server(ds_id, server_id, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| {
                panic!("could not unassign server {server_id} from delivery service {ds_id}: {e}")
            });
    }
}

pub async fn delete_test_asns(env: &TestEnv) {
    let asns = env
        .session
        .get_asns(&RequestOptions::new())
        .await
        .unwrap_or_else(|e| panic!("could not fetch ASNs for deletion: {e}"));
    for asn in asns.response {
        let id = asn.id.expect("asn id");
        env.session
            .delete_asn(id, &RequestOptions::new())
            .await
            .unwrap_or_else(|e| panic!("could not delete ASN {}: {e}", asn.asn));

        let remaining = env
            .session
            .get_asns(&RequestOptions::new().with_param("id", id))
            .await
            .unwrap_or_else(|e| panic!("could not re-fetch ASN {}: {e}", asn.asn));
        assert!(
            remaining.response.is_empty(),
            "expected ASN {} to be deleted",
            asn.asn
        );
    }
}
