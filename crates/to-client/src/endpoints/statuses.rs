//! `/statuses` endpoints.

use crate::{ApiResult, ClientError, RequestOptions, Session};
use to_models::Status;

const API_STATUSES: &str = "/statuses";

impl Session {
    pub async fn get_statuses(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<Status>>, ClientError> {
        self.api_get(API_STATUSES, opts).await
    }

    pub async fn create_status(
        &self,
        status: &Status,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Status>>, ClientError> {
        self.api_post(API_STATUSES, status, opts).await
    }

    pub async fn update_status(
        &self,
        id: i64,
        status: &Status,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Status>>, ClientError> {
        self.api_put(&format!("{API_STATUSES}/{id}"), status, opts)
            .await
    }

    pub async fn delete_status(
        &self,
        id: i64,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        self.api_delete(&format!("{API_STATUSES}/{id}"), opts).await
    }
}
