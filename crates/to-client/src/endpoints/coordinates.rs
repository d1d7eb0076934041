//! `/coordinates` endpoints. Updates and deletes address by `?id=`.

use crate::{ApiResult, ClientError, RequestOptions, Session};
use to_models::Coordinate;

const API_COORDINATES: &str = "/coordinates";

impl Session {
    pub async fn get_coordinates(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<Coordinate>>, ClientError> {
        self.api_get(API_COORDINATES, opts).await
    }

    pub async fn create_coordinate(
        &self,
        coordinate: &Coordinate,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Coordinate>>, ClientError> {
        self.api_post(API_COORDINATES, coordinate, opts).await
    }

    /// `PUT /coordinates?id={id}`.
    pub async fn update_coordinate(
        &self,
        id: i64,
        coordinate: &Coordinate,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Coordinate>>, ClientError> {
        let opts = opts.clone().with_param("id", id);
        self.api_put(API_COORDINATES, coordinate, &opts).await
    }

    /// `DELETE /coordinates?id={id}`.
    pub async fn delete_coordinate(
        &self,
        id: i64,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        let opts = opts.clone().with_param("id", id);
        self.api_delete(API_COORDINATES, &opts).await
    }
}
