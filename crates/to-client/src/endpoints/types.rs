//! `/types` endpoints.

use crate::{ApiResult, ClientError, RequestOptions, Session};
use to_models::Type;

const API_TYPES: &str = "/types";

impl Session {
    pub async fn get_types(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<Type>>, ClientError> {
        self.api_get(API_TYPES, opts).await
    }

    pub async fn create_type(
        &self,
        typ: &Type,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Type>>, ClientError> {
        self.api_post(API_TYPES, typ, opts).await
    }

    pub async fn update_type(
        &self,
        id: i64,
        typ: &Type,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Type>>, ClientError> {
        self.api_put(&format!("{API_TYPES}/{id}"), typ, opts).await
    }

    pub async fn delete_type(
        &self,
        id: i64,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        self.api_delete(&format!("{API_TYPES}/{id}"), opts).await
    }
}
