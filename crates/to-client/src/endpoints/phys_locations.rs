//! `/phys_locations` endpoints.

use crate::{ApiResult, ClientError, RequestOptions, Session};
use to_models::PhysLocation;

const API_PHYS_LOCATIONS: &str = "/phys_locations";

impl Session {
    pub async fn get_phys_locations(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<PhysLocation>>, ClientError> {
        self.api_get(API_PHYS_LOCATIONS, opts).await
    }

    pub async fn create_phys_location(
        &self,
        location: &PhysLocation,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<PhysLocation>>, ClientError> {
        self.api_post(API_PHYS_LOCATIONS, location, opts).await
    }

    pub async fn update_phys_location(
        &self,
        id: i64,
        location: &PhysLocation,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<PhysLocation>>, ClientError> {
        self.api_put(&format!("{API_PHYS_LOCATIONS}/{id}"), location, opts)
            .await
    }

    pub async fn delete_phys_location(
        &self,
        id: i64,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        self.api_delete(&format!("{API_PHYS_LOCATIONS}/{id}"), opts)
            .await
    }
}
