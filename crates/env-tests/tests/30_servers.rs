//! CRUD suite for servers and server capabilities.

#![cfg(feature = "crud")]

use env_tests::env::TestEnv;
use env_tests::fixtures::{load_configured_fixtures, TrafficControl};
use env_tests::objs::{get_cdn_id, get_server_id, get_status_id, with_objs, TcObj};
use serial_test::serial;
use to_client::RequestOptions;

async fn env() -> TestEnv {
    TestEnv::connect()
        .await
        .expect("Failed to connect to Traffic Ops - set TO_URL to a running deployment")
}

fn data() -> TrafficControl {
    let config = env_tests::config::TestConfig::from_env();
    load_configured_fixtures(&config).expect("fixture data must load")
}

/// Everything a server depends on, in dependency order.
const SERVER_OBJS: &[TcObj] = &[
    TcObj::Types,
    TcObj::Statuses,
    TcObj::Divisions,
    TcObj::Regions,
    TcObj::PhysLocations,
    TcObj::Cdns,
    TcObj::CacheGroups,
    TcObj::Profiles,
    TcObj::ServerCapabilities,
    TcObj::Servers,
    TcObj::ServerServerCapabilities,
];

#[tokio::test]
#[serial]
async fn test_server_references_resolve() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, SERVER_OBJS, async {
        let cdn_id = get_cdn_id(&env.session, "cdn1").await;
        let reported_id = get_status_id(&env.session, "REPORTED").await;

        let resp = env
            .session
            .get_servers(&RequestOptions::new().with_param("hostName", "atlanta-edge-01"))
            .await
            .expect("get server");
        assert_eq!(resp.response.len(), 1);
        let server = &resp.response[0];

        assert_eq!(server.cdn_id, Some(cdn_id));
        assert!(server.cachegroup_id.is_some());
        assert_eq!(server.status_id, Some(reported_id));
        assert!(server.type_id.is_some());
        assert!(server.phys_location_id.is_some());
        assert_eq!(server.profile_names, vec!["ATS_EDGE_TIER_CACHE".to_string()]);

        // The interface set survives the round trip.
        assert_eq!(server.interfaces.len(), 1);
        assert_eq!(server.interfaces[0].name, "eth0");
        assert!(server.interfaces[0].ip_addresses[0].service_address);
    })
    .await;
}

#[tokio::test]
#[serial]
async fn test_server_update_round_trip() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, SERVER_OBJS, async {
        let resp = env
            .session
            .get_servers(&RequestOptions::new().with_param("hostName", "atlanta-mid-01"))
            .await
            .expect("get server");
        let mut server = resp.response[0].clone();
        let id = server.id.expect("server id");

        server.rack = Some("RR 121.03".into());
        env.session
            .update_server(id, &server, &RequestOptions::new())
            .await
            .expect("update server");

        let refetched = env
            .session
            .get_servers(&RequestOptions::new().with_param("id", id))
            .await
            .expect("re-fetch server");
        assert_eq!(refetched.response[0].rack.as_deref(), Some("RR 121.03"));
    })
    .await;
}

#[tokio::test]
#[serial]
async fn test_server_capability_assignment() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, SERVER_OBJS, async {
        let server_id = get_server_id(&env.session, "atlanta-edge-01").await;

        let rows = env
            .session
            .get_server_server_capabilities(
                &RequestOptions::new().with_param("serverId", server_id),
            )
            .await
            .expect("get capability assignments");
        assert_eq!(rows.response.len(), 1);
        assert_eq!(rows.response[0].server_capability, "ram");
        assert_eq!(rows.response[0].server_id, Some(server_id));
    })
    .await;
}

#[tokio::test]
#[serial]
async fn test_assigned_capability_is_not_deletable() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, SERVER_OBJS, async {
        let err = env
            .session
            .delete_server_capability("ram", &RequestOptions::new())
            .await
            .expect_err("assigned capability must not be deletable");
        assert_eq!(err.status().map(|s| s.as_u16()), Some(400));

        // The unassigned capability deletes cleanly; recreate it so the
        // fixture teardown finds what it expects.
        env.session
            .delete_server_capability("ssd", &RequestOptions::new())
            .await
            .expect("unassigned capability should delete");
        env.session
            .create_server_capability(
                &to_models::ServerCapability {
                    name: "ssd".into(),
                    ..Default::default()
                },
                &RequestOptions::new(),
            )
            .await
            .expect("recreate capability");
    })
    .await;
}

#[tokio::test]
#[serial]
async fn test_server_with_capability_assignment_is_not_deletable() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, SERVER_OBJS, async {
        let server_id = get_server_id(&env.session, "atlanta-edge-01").await;

        let err = env
            .session
            .delete_server(server_id, &RequestOptions::new())
            .await
            .expect_err("server with a capability assignment must not be deletable");
        assert_eq!(err.status().map(|s| s.as_u16()), Some(400));

        // After removing the assignment the server deletes; recreate both
        // so teardown finds the fixture state.
        env.session
            .delete_server_server_capability(server_id, "ram", &RequestOptions::new())
            .await
            .expect("remove capability assignment");
        env.session
            .delete_server(server_id, &RequestOptions::new())
            .await
            .expect("delete server");

        let edge = data
            .servers
            .iter()
            .find(|s| s.host_name.as_deref() == Some("atlanta-edge-01"))
            .expect("fixture server");
        env.session
            .create_server(edge, &RequestOptions::new())
            .await
            .expect("recreate server");
        let new_id = get_server_id(&env.session, "atlanta-edge-01").await;
        env.session
            .create_server_server_capability(
                &to_models::ServerServerCapability {
                    server_id: Some(new_id),
                    server: Some("atlanta-edge-01".into()),
                    server_capability: "ram".into(),
                    ..Default::default()
                },
                &RequestOptions::new(),
            )
            .await
            .expect("recreate capability assignment");
    })
    .await;
}
