//! `/divisions` and `/regions` endpoints.
//!
//! Regions are the one kind the service deletes by query parameter name
//! rather than by path id.

use crate::{ApiResult, ClientError, RequestOptions, Session};
use to_models::{Division, Region};

const API_DIVISIONS: &str = "/divisions";
const API_REGIONS: &str = "/regions";

impl Session {
    pub async fn get_divisions(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<Division>>, ClientError> {
        self.api_get(API_DIVISIONS, opts).await
    }

    pub async fn create_division(
        &self,
        division: &Division,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Division>>, ClientError> {
        self.api_post(API_DIVISIONS, division, opts).await
    }

    pub async fn update_division(
        &self,
        id: i64,
        division: &Division,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Division>>, ClientError> {
        self.api_put(&format!("{API_DIVISIONS}/{id}"), division, opts)
            .await
    }

    pub async fn delete_division(
        &self,
        id: i64,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        self.api_delete(&format!("{API_DIVISIONS}/{id}"), opts)
            .await
    }

    pub async fn get_regions(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<Region>>, ClientError> {
        self.api_get(API_REGIONS, opts).await
    }

    pub async fn create_region(
        &self,
        region: &Region,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Region>>, ClientError> {
        self.api_post(API_REGIONS, region, opts).await
    }

    pub async fn update_region(
        &self,
        id: i64,
        region: &Region,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Region>>, ClientError> {
        self.api_put(&format!("{API_REGIONS}/{id}"), region, opts)
            .await
    }

    /// `DELETE /regions?name={name}`.
    pub async fn delete_region(
        &self,
        name: &str,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        let opts = opts.clone().with_param("name", name);
        self.api_delete(API_REGIONS, &opts).await
    }
}
