//! `/asns` endpoints.

use crate::{ApiResult, ClientError, RequestOptions, Session};
use to_models::Asn;

const API_ASNS: &str = "/asns";

impl Session {
    pub async fn get_asns(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<Asn>>, ClientError> {
        self.api_get(API_ASNS, opts).await
    }

    pub async fn create_asn(
        &self,
        asn: &Asn,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Asn>>, ClientError> {
        self.api_post(API_ASNS, asn, opts).await
    }

    pub async fn update_asn(
        &self,
        id: i64,
        asn: &Asn,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Asn>>, ClientError> {
        self.api_put(&format!("{API_ASNS}/{id}"), asn, opts).await
    }

    pub async fn delete_asn(
        &self,
        id: i64,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        self.api_delete(&format!("{API_ASNS}/{id}"), opts).await
    }
}
