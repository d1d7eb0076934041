//! `/deliveryservices` and `/deliveryserviceserver` endpoints.

use crate::{ApiResult, ClientError, RequestOptions, Session};
use to_models::{DeliveryService, DeliveryServiceServer, DeliveryServiceServers};

const API_DELIVERY_SERVICES: &str = "/deliveryservices";
const API_DELIVERY_SERVICE_SERVER: &str = "/deliveryserviceserver";

impl Session {
    pub async fn get_delivery_services(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<DeliveryService>>, ClientError> {
        self.api_get(API_DELIVERY_SERVICES, opts).await
    }

    pub async fn create_delivery_service(
        &self,
        ds: &DeliveryService,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<DeliveryService>>, ClientError> {
        self.api_post(API_DELIVERY_SERVICES, ds, opts).await
    }

    pub async fn update_delivery_service(
        &self,
        id: i64,
        ds: &DeliveryService,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<DeliveryService>>, ClientError> {
        self.api_put(&format!("{API_DELIVERY_SERVICES}/{id}"), ds, opts)
            .await
    }

    pub async fn delete_delivery_service(
        &self,
        id: i64,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        self.api_delete(&format!("{API_DELIVERY_SERVICES}/{id}"), opts)
            .await
    }

    /// List (delivery service, server) assignment pairs.
    pub async fn get_delivery_service_servers(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<DeliveryServiceServer>>, ClientError> {
        self.api_get(API_DELIVERY_SERVICE_SERVER, opts).await
    }

    /// Assign servers to a delivery service, optionally replacing the
    /// existing assignment set.
    pub async fn assign_delivery_service_servers(
        &self,
        assignment: &DeliveryServiceServers,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<DeliveryServiceServers>>, ClientError> {
        self.api_post(API_DELIVERY_SERVICE_SERVER, assignment, opts)
            .await
    }

    /// `DELETE /deliveryserviceserver/{dsId}/{serverId}`.
    pub async fn delete_delivery_service_server(
        &self,
        ds_id: i64,
        server_id: i64,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        self.api_delete(
            &format!("{API_DELIVERY_SERVICE_SERVER}/{ds_id}/{server_id}"),
            opts,
        )
        .await
    }
}
