//! `/users` endpoints.

use crate::{ApiResult, ClientError, RequestOptions, Session};
use to_models::User;

const API_USERS: &str = "/users";

impl Session {
    pub async fn get_users(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<User>>, ClientError> {
        self.api_get(API_USERS, opts).await
    }

    pub async fn create_user(
        &self,
        user: &User,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<User>>, ClientError> {
        self.api_post(API_USERS, user, opts).await
    }

    pub async fn update_user(
        &self,
        id: i64,
        user: &User,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<User>>, ClientError> {
        self.api_put(&format!("{API_USERS}/{id}"), user, opts).await
    }

    pub async fn delete_user(
        &self,
        id: i64,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        self.api_delete(&format!("{API_USERS}/{id}"), opts).await
    }
}
