//! CRUD suite for ASNs.

#![cfg(feature = "crud")]

use env_tests::env::TestEnv;
use env_tests::fixtures::{load_configured_fixtures, TrafficControl};
use env_tests::objs::{get_cachegroup_id, with_objs, TcObj};
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

const ASN_OBJS: &[TcObj] = &[TcObj::Types, TcObj::CacheGroups, TcObj::Asns];

#[tokio::test]
#[serial]
async fn test_asn_resolves_cachegroup() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, ASN_OBJS, async {
        let cachegroup_id = get_cachegroup_id(&env.session, "cachegroup1").await;

        let resp = env
            .session
            .get_asns(&RequestOptions::new().with_param("asn", 9939))
            .await
            .expect("get asn");
        assert_eq!(resp.response.len(), 1);
        assert_eq!(resp.response[0].asn, 9939);
        assert_eq!(resp.response[0].cachegroup_id, Some(cachegroup_id));
    })
    .await;
}

#[tokio::test]
#[serial]
async fn test_asn_update_moves_cachegroup() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, ASN_OBJS, async {
        let origin_id = get_cachegroup_id(&env.session, "originCachegroup").await;

        let resp = env
            .session
            .get_asns(&RequestOptions::new().with_param("asn", 272111))
            .await
            .expect("get asn");
        let mut asn = resp.response[0].clone();
        let id = asn.id.expect("asn id");

        asn.cachegroup = Some("originCachegroup".into());
        asn.cachegroup_id = Some(origin_id);
        env.session
            .update_asn(id, &asn, &RequestOptions::new())
            .await
            .expect("update asn");

        let refetched = env
            .session
            .get_asns(&RequestOptions::new().with_param("id", id))
            .await
            .expect("re-fetch asn");
        assert_eq!(refetched.response[0].cachegroup_id, Some(origin_id));
    })
    .await;
}

#[tokio::test]
#[serial]
async fn test_cachegroup_delete_rejected_while_asn_references_it() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, ASN_OBJS, async {
        let cachegroup_id = get_cachegroup_id(&env.session, "cachegroup1").await;

        let err = env
            .session
            .delete_cachegroup(cachegroup_id, &RequestOptions::new())
            .await
            .expect_err("cachegroup with ASNs must not be deletable");
        assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
    })
    .await;
}
