//! `/server_capabilities` and `/server_server_capabilities` endpoints.
//!
//! Capabilities are keyed by name, so deletion addresses by query
//! parameter; assignments delete by the (server, capability) pair.

use crate::{ApiResult, ClientError, RequestOptions, Session};
use to_models::{ServerCapability, ServerServerCapability};

const API_SERVER_CAPABILITIES: &str = "/server_capabilities";
const API_SERVER_SERVER_CAPABILITIES: &str = "/server_server_capabilities";

impl Session {
    pub async fn get_server_capabilities(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<ServerCapability>>, ClientError> {
        self.api_get(API_SERVER_CAPABILITIES, opts).await
    }

    pub async fn create_server_capability(
        &self,
        capability: &ServerCapability,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<ServerCapability>>, ClientError> {
        self.api_post(API_SERVER_CAPABILITIES, capability, opts)
            .await
    }

    /// `DELETE /server_capabilities?name={name}`.
    pub async fn delete_server_capability(
        &self,
        name: &str,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        let opts = opts.clone().with_param("name", name);
        self.api_delete(API_SERVER_CAPABILITIES, &opts).await
    }

    pub async fn get_server_server_capabilities(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<ServerServerCapability>>, ClientError> {
        self.api_get(API_SERVER_SERVER_CAPABILITIES, opts).await
    }

    pub async fn create_server_server_capability(
        &self,
        association: &ServerServerCapability,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<ServerServerCapability>>, ClientError> {
        self.api_post(API_SERVER_SERVER_CAPABILITIES, association, opts)
            .await
    }

    /// `DELETE /server_server_capabilities?serverId={id}&serverCapability={name}`.
    pub async fn delete_server_server_capability(
        &self,
        server_id: i64,
        capability: &str,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        let opts = opts
            .clone()
            .with_param("serverId", server_id)
            .with_param("serverCapability", capability);
        self.api_delete(API_SERVER_SERVER_CAPABILITIES, &opts).await
    }
}
