//! `/tenants` endpoints.

use crate::{ApiResult, ClientError, RequestOptions, Session};
use to_models::Tenant;

const API_TENANTS: &str = "/tenants";

impl Session {
    pub async fn get_tenants(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<Tenant>>, ClientError> {
        self.api_get(API_TENANTS, opts).await
    }

    pub async fn create_tenant(
        &self,
        tenant: &Tenant,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Tenant>>, ClientError> {
        self.api_post(API_TENANTS, tenant, opts).await
    }

    pub async fn update_tenant(
        &self,
        id: i64,
        tenant: &Tenant,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Tenant>>, ClientError> {
        self.api_put(&format!("{API_TENANTS}/{id}"), tenant, opts)
            .await
    }

    pub async fn delete_tenant(
        &self,
        id: i64,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        self.api_delete(&format!("{API_TENANTS}/{id}"), opts).await
    }
}
