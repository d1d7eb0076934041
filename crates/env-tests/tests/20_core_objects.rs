//! CRUD suites for the location-and-taxonomy object kinds: types,
//! statuses, divisions, regions, physical locations, coordinates.

#![cfg(feature = "crud")]

use chrono::{Duration, Utc};
use env_tests::env::TestEnv;
use env_tests::fixtures::{load_configured_fixtures, TrafficControl};
use env_tests::objs::{get_division_id, with_objs, TcObj};
use serial_test::serial;
use to_client::reqwest::header::IF_MODIFIED_SINCE;
use to_client::RequestOptions;
use to_models::{Coordinate, Type};

async fn env() -> TestEnv {
    TestEnv::connect()
        .await
        .expect("Failed to connect to Traffic Ops - set TO_URL to a running deployment")
}

fn data() -> TrafficControl {
    let config = env_tests::config::TestConfig::from_env();
    load_configured_fixtures(&config).expect("fixture data must load")
}

fn http_date(when: chrono::DateTime<Utc>) -> String {
    when.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[tokio::test]
#[serial]
async fn test_types_filter_and_round_trip() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, &[TcObj::Types], async {
        // Filter by name returns exactly the one type.
        let opts = RequestOptions::new().with_param("name", "EDGE_LOC");
        let resp = env.session.get_types(&opts).await.expect("get types");
        assert_eq!(resp.status.as_u16(), 200);
        assert_eq!(resp.response.len(), 1);
        assert_eq!(resp.response[0].name, "EDGE_LOC");
        assert_eq!(resp.response[0].use_in_table, "cachegroup");

        // Create, update, delete one extra type.
        let created = env
            .session
            .create_type(
                &Type {
                    name: "TEST_TYPE".into(),
                    description: "round trip".into(),
                    use_in_table: "server".into(),
                    ..Default::default()
                },
                &RequestOptions::new(),
            )
            .await
            .expect("create type");
        let id = created.response.and_then(|t| t.id).expect("created type id");

        let mut updated = Type {
            name: "TEST_TYPE".into(),
            description: "updated description".into(),
            use_in_table: "server".into(),
            ..Default::default()
        };
        updated.id = Some(id);
        env.session
            .update_type(id, &updated, &RequestOptions::new())
            .await
            .expect("update type");

        let refetched = env
            .session
            .get_types(&RequestOptions::new().with_param("id", id))
            .await
            .expect("re-fetch type");
        assert_eq!(refetched.response[0].description, "updated description");

        env.session
            .delete_type(id, &RequestOptions::new())
            .await
            .expect("delete type");
        let gone = env
            .session
            .get_types(&RequestOptions::new().with_param("id", id))
            .await
            .expect("re-fetch after delete");
        assert!(gone.response.is_empty());
    })
    .await;
}

#[tokio::test]
#[serial]
async fn test_types_not_modified_and_pagination() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, &[TcObj::Types], async {
        let tomorrow = http_date(Utc::now() + Duration::days(1));
        let recent = http_date(Utc::now() - Duration::seconds(15));

        // Nothing changed since tomorrow: 304 with an empty payload.
        let opts = RequestOptions::new().with_header(IF_MODIFIED_SINCE, &tomorrow);
        let resp = env.session.get_types(&opts).await.expect("IMS request");
        assert_eq!(resp.status.as_u16(), 304);
        assert!(resp.response.is_empty());

        // The fixtures were created after `recent`: full 200 response.
        let opts = RequestOptions::new().with_header(IF_MODIFIED_SINCE, &recent);
        let resp = env.session.get_types(&opts).await.expect("IMS request");
        assert_eq!(resp.status.as_u16(), 200);
        assert!(!resp.response.is_empty());

        // Pagination: first and second results by id.
        let first = env
            .session
            .get_types(&RequestOptions::new().with_param("orderby", "id").with_param("limit", 1))
            .await
            .expect("limit=1");
        assert_eq!(first.response.len(), 1);

        let second = env
            .session
            .get_types(
                &RequestOptions::new()
                    .with_param("orderby", "id")
                    .with_param("limit", 1)
                    .with_param("offset", 1),
            )
            .await
            .expect("limit=1 offset=1");
        assert_eq!(second.response.len(), 1);
        assert_ne!(first.response[0].id, second.response[0].id);

        let paged = env
            .session
            .get_types(
                &RequestOptions::new()
                    .with_param("orderby", "id")
                    .with_param("limit", 1)
                    .with_param("page", 2),
            )
            .await
            .expect("limit=1 page=2");
        assert_eq!(paged.response[0].id, second.response[0].id);
    })
    .await;
}

#[tokio::test]
#[serial]
async fn test_types_pagination_validation() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, &[TcObj::Types], async {
        for opts in [
            RequestOptions::new().with_param("limit", -2),
            RequestOptions::new().with_param("limit", 1).with_param("offset", 0),
            RequestOptions::new().with_param("limit", 1).with_param("page", 0),
            RequestOptions::new().with_param("offset", 1),
        ] {
            let err = env
                .session
                .get_types(&opts)
                .await
                .expect_err("invalid pagination must be rejected");
            assert_eq!(err.status().map(|s| s.as_u16()), Some(400), "opts: {opts:?}");
        }
    })
    .await;
}

#[tokio::test]
#[serial]
async fn test_regions_resolve_their_division() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, &[TcObj::Divisions, TcObj::Regions], async {
        let division_id = get_division_id(&env.session, "division1").await;

        let resp = env
            .session
            .get_regions(&RequestOptions::new().with_param("name", "region1"))
            .await
            .expect("get region");
        assert_eq!(resp.response.len(), 1);
        assert_eq!(resp.response[0].division, Some(division_id));
        assert_eq!(resp.response[0].division_name.as_deref(), Some("division1"));
    })
    .await;
}

#[tokio::test]
#[serial]
async fn test_division_delete_rejected_while_region_exists() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, &[TcObj::Divisions, TcObj::Regions], async {
        let division_id = get_division_id(&env.session, "division1").await;

        let err = env
            .session
            .delete_division(division_id, &RequestOptions::new())
            .await
            .expect_err("division with regions must not be deletable");
        assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
    })
    .await;
}

#[tokio::test]
#[serial]
async fn test_phys_locations_resolve_region_and_update() {
    let env = env().await;
    let data = data();
    with_objs(
        &env,
        &data,
        &[TcObj::Divisions, TcObj::Regions, TcObj::PhysLocations],
        async {
            let resp = env
                .session
                .get_phys_locations(&RequestOptions::new().with_param("name", "Denver"))
                .await
                .expect("get phys location");
            assert_eq!(resp.response.len(), 1);
            let mut location = resp.response[0].clone();
            assert!(location.region_id.is_some(), "region name must resolve to an id");

            let id = location.id.expect("phys location id");
            location.address = "4321 mile high circle".into();
            env.session
                .update_phys_location(id, &location, &RequestOptions::new())
                .await
                .expect("update phys location");

            let refetched = env
                .session
                .get_phys_locations(&RequestOptions::new().with_param("id", id))
                .await
                .expect("re-fetch phys location");
            assert_eq!(refetched.response[0].address, "4321 mile high circle");
        },
    )
    .await;
}

#[tokio::test]
#[serial]
async fn test_coordinates_update_and_delete_by_query_id() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, &[TcObj::Coordinates], async {
        let resp = env
            .session
            .get_coordinates(&RequestOptions::new().with_param("name", "coordinate1"))
            .await
            .expect("get coordinate");
        let id = resp.response[0].id.expect("coordinate id");

        env.session
            .update_coordinate(
                id,
                &Coordinate {
                    name: "coordinate1".into(),
                    latitude: 12.5,
                    longitude: -30.25,
                    ..Default::default()
                },
                &RequestOptions::new(),
            )
            .await
            .expect("update coordinate");

        let refetched = env
            .session
            .get_coordinates(&RequestOptions::new().with_param("id", id))
            .await
            .expect("re-fetch coordinate");
        assert_eq!(refetched.response[0].latitude, 12.5);

        // Zero lat/long is legal data, not an absent field.
        let zero = env
            .session
            .get_coordinates(&RequestOptions::new().with_param("name", "coordinate2"))
            .await
            .expect("get zero coordinate");
        assert_eq!(zero.response[0].latitude, 0.0);
        assert_eq!(zero.response[0].longitude, 0.0);
    })
    .await;
}

#[tokio::test]
#[serial]
async fn test_statuses_filter_by_name() {
    let env = env().await;
    let data = data();
    with_objs(&env, &data, &[TcObj::Statuses], async {
        let resp = env
            .session
            .get_statuses(&RequestOptions::new().with_param("name", "REPORTED"))
            .await
            .expect("get status");
        assert_eq!(resp.response.len(), 1);
        assert_eq!(resp.response[0].name, "REPORTED");

        // An id that matches nothing is an empty 200, not an error.
        let none = env
            .session
            .get_statuses(&RequestOptions::new().with_param("id", 10000))
            .await
            .expect("unknown id is not an error");
        assert_eq!(none.status.as_u16(), 200);
        assert!(none.response.is_empty());
    })
    .await;
}
