//! `/cdns` endpoints.

use crate::{ApiResult, ClientError, RequestOptions, Session};
use to_models::Cdn;

const API_CDNS: &str = "/cdns";

impl Session {
    pub async fn get_cdns(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<Cdn>>, ClientError> {
        self.api_get(API_CDNS, opts).await
    }

    pub async fn create_cdn(
        &self,
        cdn: &Cdn,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Cdn>>, ClientError> {
        self.api_post(API_CDNS, cdn, opts).await
    }

    pub async fn update_cdn(
        &self,
        id: i64,
        cdn: &Cdn,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Cdn>>, ClientError> {
        self.api_put(&format!("{API_CDNS}/{id}"), cdn, opts).await
    }

    pub async fn delete_cdn(
        &self,
        id: i64,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        self.api_delete(&format!("{API_CDNS}/{id}"), opts).await
    }
}
