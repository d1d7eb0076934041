//! CRUD suite for tenants and users.

#![cfg(feature = "crud")]

use env_tests::env::TestEnv;
use env_tests::fixtures::{load_configured_fixtures, TrafficControl};
use env_tests::objs::{get_tenant_id, with_objs, TcObj};
use serial_test::serial;
use to_client::RequestOptions;
use to_models::User;

async fn env() -> TestEnv {
    TestEnv::connect()
        .await
        .expect("Failed to connect to Traffic Ops - set TO_URL to a running deployment")
}

fn data() -> TrafficControl {
    let config = env_tests::config::TestConfig::from_env();
    load_configured_fixtures(&config).expect("fixture data must load")
}

#[tokio::test]
#[serial]
async fn test_tenant_tree_resolves_parents() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, &[TcObj::Tenants], async {
        let root_id = get_tenant_id(&env.session, "root").await;
        let tenant1_id = get_tenant_id(&env.session, "tenant1").await;

        let resp = env
            .session
            .get_tenants(&RequestOptions::new().with_param("name", "tenant1-child"))
            .await
            .expect("get child tenant");
        assert_eq!(resp.response.len(), 1);
        assert_eq!(resp.response[0].parent_id, Some(tenant1_id));

        let parent = env
            .session
            .get_tenants(&RequestOptions::new().with_param("name", "tenant1"))
            .await
            .expect("get parent tenant");
        assert_eq!(parent.response[0].parent_id, Some(root_id));
    })
    .await;
}

#[tokio::test]
#[serial]
async fn test_root_tenant_is_protected() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, &[TcObj::Tenants], async {
        let root_id = get_tenant_id(&env.session, "root").await;

        let err = env
            .session
            .delete_tenant(root_id, &RequestOptions::new())
            .await
            .expect_err("the root tenant must not be deletable");
        assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
    })
    .await;
}

#[tokio::test]
#[serial]
async fn test_tenant_with_children_is_not_deletable() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, &[TcObj::Tenants], async {
        let tenant1_id = get_tenant_id(&env.session, "tenant1").await;

        let err = env
            .session
            .delete_tenant(tenant1_id, &RequestOptions::new())
            .await
            .expect_err("tenant with children must not be deletable");
        assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
    })
    .await;
}

#[tokio::test]
#[serial]
async fn test_users_resolve_tenant_and_hide_password() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, &[TcObj::Tenants, TcObj::Users], async {
        let tenant1_id = get_tenant_id(&env.session, "tenant1").await;

        let resp = env
            .session
            .get_users(&RequestOptions::new().with_param("username", "opsuser"))
            .await
            .expect("get user");
        assert_eq!(resp.response.len(), 1);
        let user = &resp.response[0];
        assert_eq!(user.tenant_id, Some(tenant1_id));
        assert_eq!(user.role, "operations");
        assert!(
            user.local_passwd.is_none(),
            "the service must never echo a password"
        );
    })
    .await;
}

#[tokio::test]
#[serial]
async fn test_user_update_round_trip() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, &[TcObj::Tenants, TcObj::Users], async {
        let resp = env
            .session
            .get_users(&RequestOptions::new().with_param("username", "readonlyuser"))
            .await
            .expect("get user");
        let mut user = resp.response[0].clone();
        let id = user.id.expect("user id");

        user.full_name = Some("Renamed Read Only User".into());
        env.session
            .update_user(id, &user, &RequestOptions::new())
            .await
            .expect("update user");

        let refetched = env
            .session
            .get_users(&RequestOptions::new().with_param("id", id))
            .await
            .expect("re-fetch user");
        assert_eq!(
            refetched.response[0].full_name.as_deref(),
            Some("Renamed Read Only User")
        );
    })
    .await;
}

#[tokio::test]
#[serial]
async fn test_duplicate_username_rejected() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, &[TcObj::Tenants, TcObj::Users], async {
        let err = env
            .session
            .create_user(
                &User {
                    username: "opsuser".into(),
                    role: "operations".into(),
                    tenant: Some("tenant1".into()),
                    local_passwd: Some("pa$$word".into()),
                    ..Default::default()
                },
                &RequestOptions::new(),
            )
            .await
            .expect_err("duplicate username must be rejected");
        assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
    })
    .await;
}
