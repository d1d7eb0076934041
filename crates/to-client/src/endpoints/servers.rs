//! `/servers` endpoints.

use crate::{ApiResult, ClientError, RequestOptions, Session};
use to_models::Server;

const API_SERVERS: &str = "/servers";

impl Session {
    pub async fn get_servers(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<Server>>, ClientError> {
        self.api_get(API_SERVERS, opts).await
    }

    pub async fn create_server(
        &self,
        server: &Server,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Server>>, ClientError> {
        self.api_post(API_SERVERS, server, opts).await
    }

    pub async fn update_server(
        &self,
        id: i64,
        server: &Server,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Server>>, ClientError> {
        self.api_put(&format!("{API_SERVERS}/{id}"), server, opts)
            .await
    }

    pub async fn delete_server(
        &self,
        id: i64,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        self.api_delete(&format!("{API_SERVERS}/{id}"), opts).await
    }
}
