//! Round-trip tests for the client against the in-process mock control
//! plane: session lifecycle, CRUD, filtering, If-Modified-Since,
//! pagination validation, and the alerts envelope.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::panic)]

use chrono::{Duration, Utc};
use to_client::reqwest::header::IF_MODIFIED_SINCE;
use to_client::{ClientError, ClientOpts, RequestOptions, Session};
use to_models::{AlertLevel, Cdn, Coordinate, Parameter, Tenant, User};
use to_test_utils::{TestToServer, DEFAULT_PASSWORD, DEFAULT_USERNAME};

const UA: &str = "to-client-tests/0.1";

async fn logged_in(server: &TestToServer) -> Session {
    Session::login(
        server.url(),
        DEFAULT_USERNAME,
        DEFAULT_PASSWORD,
        ClientOpts::new(UA),
    )
    .await
    .expect("login to mock control plane")
}

fn http_date(when: chrono::DateTime<Utc>) -> String {
    when.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[tokio::test]
async fn test_ping_without_session() {
    let server = TestToServer::spawn().await.expect("spawn mock");
    let session = Session::unauthenticated(server.url(), ClientOpts::new(UA)).expect("session");
    let pong = session.ping().await.expect("ping");
    assert_eq!(pong.ping, "pong");
}

#[tokio::test]
async fn test_login_with_custom_credentials() {
    let server = TestToServer::spawn_with("operator", "hunter2hunter2")
        .await
        .expect("spawn mock");

    let session = Session::login(server.url(), "operator", "hunter2hunter2", ClientOpts::new(UA))
        .await
        .expect("login with the configured credentials");
    assert_eq!(session.username(), "operator");

    // The defaults no longer work.
    let err = Session::login(
        server.url(),
        DEFAULT_USERNAME,
        DEFAULT_PASSWORD,
        ClientOpts::new(UA),
    )
    .await
    .expect_err("default credentials must be rejected");
    assert!(matches!(err, ClientError::LoginFailed(_)));
}

#[tokio::test]
async fn test_login_rejected_with_bad_password() {
    let server = TestToServer::spawn().await.expect("spawn mock");
    let err = Session::login(server.url(), DEFAULT_USERNAME, "wrong", ClientOpts::new(UA))
        .await
        .expect_err("bad password must be rejected");
    assert!(matches!(err, ClientError::LoginFailed(_)));
}

#[tokio::test]
async fn test_unauthenticated_request_is_401_with_alerts() {
    let server = TestToServer::spawn().await.expect("spawn mock");
    let session = Session::unauthenticated(server.url(), ClientOpts::new(UA)).expect("session");

    let err = session
        .get_cdns(&RequestOptions::new())
        .await
        .expect_err("unauthenticated request must fail");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));
    let alerts = err.alerts().expect("alerts on API error");
    assert!(alerts.has_level(AlertLevel::Error));
}

#[tokio::test]
async fn test_cdn_crud_round_trip() {
    let server = TestToServer::spawn().await.expect("spawn mock");
    let session = logged_in(&server).await;

    let created = session
        .create_cdn(
            &Cdn {
                name: "cdn1".into(),
                domain_name: "test.cdn1.net".into(),
                dnssec_enabled: false,
                ..Default::default()
            },
            &RequestOptions::new(),
        )
        .await
        .expect("create cdn");
    assert!(created
        .alerts
        .iter()
        .any(|a| a.level == AlertLevel::Success && a.text == "cdn was created."));
    let created = created.response.expect("created cdn echoed back");
    let id = created.id.expect("assigned id");
    assert!(created.last_updated.is_some());

    // Filter by name.
    let by_name = session
        .get_cdns(&RequestOptions::new().with_param("name", "cdn1"))
        .await
        .expect("get by name");
    assert_eq!(by_name.response.len(), 1);
    assert_eq!(by_name.response[0].id, Some(id));

    // Update and verify.
    session
        .update_cdn(
            id,
            &Cdn {
                name: "cdn1".into(),
                domain_name: "updated.cdn1.net".into(),
                dnssec_enabled: true,
                ..Default::default()
            },
            &RequestOptions::new(),
        )
        .await
        .expect("update cdn");
    let refetched = session
        .get_cdns(&RequestOptions::new().with_param("id", id))
        .await
        .expect("re-fetch");
    assert_eq!(refetched.response[0].domain_name, "updated.cdn1.net");

    // Duplicate name rejected.
    let err = session
        .create_cdn(
            &Cdn {
                name: "cdn1".into(),
                domain_name: "dup.net".into(),
                dnssec_enabled: false,
                ..Default::default()
            },
            &RequestOptions::new(),
        )
        .await
        .expect_err("duplicate name");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));

    // Delete and verify.
    let deleted = session
        .delete_cdn(id, &RequestOptions::new())
        .await
        .expect("delete cdn");
    assert!(deleted
        .alerts
        .iter()
        .any(|a| a.level == AlertLevel::Success && a.text == "cdn was deleted."));
    let gone = session
        .get_cdns(&RequestOptions::new().with_param("id", id))
        .await
        .expect("fetch after delete");
    assert!(gone.response.is_empty());

    // Deleting again is a 404.
    let err = session
        .delete_cdn(id, &RequestOptions::new())
        .await
        .expect_err("second delete");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
}

#[tokio::test]
async fn test_if_modified_since() {
    let server = TestToServer::spawn().await.expect("spawn mock");
    let session = logged_in(&server).await;

    session
        .create_cdn(
            &Cdn {
                name: "ims-cdn".into(),
                domain_name: "ims.net".into(),
                dnssec_enabled: false,
                ..Default::default()
            },
            &RequestOptions::new(),
        )
        .await
        .expect("create cdn");

    // Nothing changed since tomorrow.
    let tomorrow = http_date(Utc::now() + Duration::days(1));
    let not_modified = session
        .get_cdns(&RequestOptions::new().with_header(IF_MODIFIED_SINCE, &tomorrow))
        .await
        .expect("IMS request");
    assert_eq!(not_modified.status.as_u16(), 304);
    assert!(not_modified.not_modified());
    assert!(not_modified.response.is_empty());

    // Changes happened since a minute ago.
    let past = http_date(Utc::now() - Duration::minutes(1));
    let modified = session
        .get_cdns(&RequestOptions::new().with_header(IF_MODIFIED_SINCE, &past))
        .await
        .expect("IMS request");
    assert_eq!(modified.status.as_u16(), 200);
    assert_eq!(modified.response.len(), 1);
}

#[tokio::test]
async fn test_pagination_and_validation() {
    let server = TestToServer::spawn().await.expect("spawn mock");
    let session = logged_in(&server).await;

    for name in ["alpha", "beta", "gamma"] {
        session
            .create_cdn(
                &Cdn {
                    name: name.into(),
                    domain_name: format!("{name}.net"),
                    dnssec_enabled: false,
                    ..Default::default()
                },
                &RequestOptions::new(),
            )
            .await
            .expect("create cdn");
    }

    let first = session
        .get_cdns(&RequestOptions::new().with_param("orderby", "id").with_param("limit", 1))
        .await
        .expect("limit=1");
    assert_eq!(first.response.len(), 1);
    assert_eq!(first.response[0].name, "alpha");

    let second = session
        .get_cdns(
            &RequestOptions::new()
                .with_param("orderby", "id")
                .with_param("limit", 1)
                .with_param("offset", 1),
        )
        .await
        .expect("offset=1");
    assert_eq!(second.response[0].name, "beta");

    let paged = session
        .get_cdns(
            &RequestOptions::new()
                .with_param("orderby", "id")
                .with_param("limit", 1)
                .with_param("page", 2),
        )
        .await
        .expect("page=2");
    assert_eq!(paged.response[0].name, "beta");

    let desc = session
        .get_cdns(&RequestOptions::new().with_param("sortOrder", "desc"))
        .await
        .expect("sortOrder=desc");
    assert_eq!(desc.response[0].name, "gamma");

    for opts in [
        RequestOptions::new().with_param("limit", -2),
        RequestOptions::new().with_param("limit", 0),
        RequestOptions::new().with_param("limit", "abc"),
        RequestOptions::new().with_param("limit", 1).with_param("offset", 0),
        RequestOptions::new().with_param("limit", 1).with_param("page", -1),
        RequestOptions::new().with_param("page", 2),
    ] {
        let err = session
            .get_cdns(&opts)
            .await
            .expect_err("invalid pagination must be rejected");
        assert_eq!(err.status().map(|s| s.as_u16()), Some(400), "opts: {opts:?}");
    }
}

#[tokio::test]
async fn test_referential_delete_guard() {
    let server = TestToServer::spawn().await.expect("spawn mock");
    let session = logged_in(&server).await;

    let cdn = session
        .create_cdn(
            &Cdn {
                name: "guarded".into(),
                domain_name: "guarded.net".into(),
                dnssec_enabled: false,
                ..Default::default()
            },
            &RequestOptions::new(),
        )
        .await
        .expect("create cdn")
        .response
        .expect("created cdn");
    let cdn_id = cdn.id.expect("cdn id");

    let profile = session
        .create_profile(
            &to_models::Profile {
                name: "edge-profile".into(),
                description: "guard test".into(),
                cdn_name: Some("guarded".into()),
                profile_type: "ATS_PROFILE".into(),
                routing_disabled: false,
                ..Default::default()
            },
            &RequestOptions::new(),
        )
        .await
        .expect("create profile")
        .response
        .expect("created profile");

    let err = session
        .delete_cdn(cdn_id, &RequestOptions::new())
        .await
        .expect_err("cdn in use must not delete");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));

    session
        .delete_profile(profile.id.expect("profile id"), &RequestOptions::new())
        .await
        .expect("delete profile");
    session
        .delete_cdn(cdn_id, &RequestOptions::new())
        .await
        .expect("cdn deletes once unreferenced");
}

#[tokio::test]
async fn test_logout_invalidates_cookie() {
    let server = TestToServer::spawn().await.expect("spawn mock");
    let session = logged_in(&server).await;

    session
        .get_cdns(&RequestOptions::new())
        .await
        .expect("request before logout");
    session.logout().await.expect("logout");

    let err = session
        .get_cdns(&RequestOptions::new())
        .await
        .expect_err("request after logout must fail");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));
}

#[tokio::test]
async fn test_bulk_parameter_create() {
    let server = TestToServer::spawn().await.expect("spawn mock");
    let session = logged_in(&server).await;

    let parameters = vec![
        Parameter {
            name: "history.count".into(),
            config_file: "rascal.properties".into(),
            value: "30".into(),
            ..Default::default()
        },
        Parameter {
            name: "health.polling.interval".into(),
            config_file: "rascal.properties".into(),
            value: "8000".into(),
            ..Default::default()
        },
    ];
    let created = session
        .create_multiple_parameters(&parameters, &RequestOptions::new())
        .await
        .expect("bulk create");
    assert_eq!(created.response.map(|p| p.len()), Some(2));

    let listed = session
        .get_parameters(&RequestOptions::new().with_param("configFile", "rascal.properties"))
        .await
        .expect("list parameters");
    assert_eq!(listed.response.len(), 2);
}

#[tokio::test]
async fn test_coordinate_query_addressed_update_and_delete() {
    let server = TestToServer::spawn().await.expect("spawn mock");
    let session = logged_in(&server).await;

    let id = session
        .create_coordinate(
            &Coordinate {
                name: "coord".into(),
                latitude: 1.5,
                longitude: -2.5,
                ..Default::default()
            },
            &RequestOptions::new(),
        )
        .await
        .expect("create coordinate")
        .response
        .and_then(|c| c.id)
        .expect("coordinate id");

    session
        .update_coordinate(
            id,
            &Coordinate {
                name: "coord".into(),
                latitude: 3.25,
                longitude: -2.5,
                ..Default::default()
            },
            &RequestOptions::new(),
        )
        .await
        .expect("update coordinate by query id");

    let refetched = session
        .get_coordinates(&RequestOptions::new().with_param("id", id))
        .await
        .expect("re-fetch");
    assert_eq!(refetched.response[0].latitude, 3.25);

    session
        .delete_coordinate(id, &RequestOptions::new())
        .await
        .expect("delete coordinate by query id");
    let gone = session
        .get_coordinates(&RequestOptions::new().with_param("id", id))
        .await
        .expect("fetch after delete");
    assert!(gone.response.is_empty());
}

#[tokio::test]
async fn test_user_password_never_echoed() {
    let server = TestToServer::spawn().await.expect("spawn mock");
    let session = logged_in(&server).await;

    session
        .create_tenant(
            &Tenant {
                name: "tenant1".into(),
                active: true,
                parent_name: Some("root".into()),
                ..Default::default()
            },
            &RequestOptions::new(),
        )
        .await
        .expect("create tenant");

    let created = session
        .create_user(
            &User {
                username: "secretive".into(),
                role: "operations".into(),
                tenant: Some("tenant1".into()),
                local_passwd: Some("hunter2".into()),
                ..Default::default()
            },
            &RequestOptions::new(),
        )
        .await
        .expect("create user");
    assert!(created.response.expect("created user").local_passwd.is_none());

    let listed = session
        .get_users(&RequestOptions::new().with_param("username", "secretive"))
        .await
        .expect("list users");
    assert!(listed.response[0].local_passwd.is_none());
}
