//! `/cachegroups` endpoints.

use crate::{ApiResult, ClientError, RequestOptions, Session};
use to_models::CacheGroup;

const API_CACHEGROUPS: &str = "/cachegroups";

impl Session {
    pub async fn get_cachegroups(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<CacheGroup>>, ClientError> {
        self.api_get(API_CACHEGROUPS, opts).await
    }

    pub async fn create_cachegroup(
        &self,
        cachegroup: &CacheGroup,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<CacheGroup>>, ClientError> {
        self.api_post(API_CACHEGROUPS, cachegroup, opts).await
    }

    pub async fn update_cachegroup(
        &self,
        id: i64,
        cachegroup: &CacheGroup,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<CacheGroup>>, ClientError> {
        self.api_put(&format!("{API_CACHEGROUPS}/{id}"), cachegroup, opts)
            .await
    }

    pub async fn delete_cachegroup(
        &self,
        id: i64,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        self.api_delete(&format!("{API_CACHEGROUPS}/{id}"), opts)
            .await
    }
}
