//! `/profiles`, `/parameters`, and `/profileparameters` endpoints.

use crate::{ApiResult, ClientError, RequestOptions, Session};
use to_models::{Parameter, Profile, ProfileParameter, ProfileParameterCreationRequest};

const API_PROFILES: &str = "/profiles";
const API_PARAMETERS: &str = "/parameters";
const API_PROFILE_PARAMETERS: &str = "/profileparameters";

impl Session {
    pub async fn get_profiles(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<Profile>>, ClientError> {
        self.api_get(API_PROFILES, opts).await
    }

    pub async fn create_profile(
        &self,
        profile: &Profile,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Profile>>, ClientError> {
        self.api_post(API_PROFILES, profile, opts).await
    }

    pub async fn update_profile(
        &self,
        id: i64,
        profile: &Profile,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Profile>>, ClientError> {
        self.api_put(&format!("{API_PROFILES}/{id}"), profile, opts)
            .await
    }

    pub async fn delete_profile(
        &self,
        id: i64,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        self.api_delete(&format!("{API_PROFILES}/{id}"), opts).await
    }

    pub async fn get_parameters(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<Parameter>>, ClientError> {
        self.api_get(API_PARAMETERS, opts).await
    }

    pub async fn create_parameter(
        &self,
        parameter: &Parameter,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Parameter>>, ClientError> {
        self.api_post(API_PARAMETERS, parameter, opts).await
    }

    /// The one bulk-create endpoint: posts an array of parameters.
    pub async fn create_multiple_parameters(
        &self,
        parameters: &[Parameter],
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Vec<Parameter>>>, ClientError> {
        self.api_post(API_PARAMETERS, parameters, opts).await
    }

    pub async fn update_parameter(
        &self,
        id: i64,
        parameter: &Parameter,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<Parameter>>, ClientError> {
        self.api_put(&format!("{API_PARAMETERS}/{id}"), parameter, opts)
            .await
    }

    pub async fn delete_parameter(
        &self,
        id: i64,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        self.api_delete(&format!("{API_PARAMETERS}/{id}"), opts)
            .await
    }

    pub async fn get_profile_parameters(
        &self,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Vec<ProfileParameter>>, ClientError> {
        self.api_get(API_PROFILE_PARAMETERS, opts).await
    }

    pub async fn create_profile_parameter(
        &self,
        association: &ProfileParameterCreationRequest,
        opts: &RequestOptions,
    ) -> Result<ApiResult<Option<ProfileParameter>>, ClientError> {
        self.api_post(API_PROFILE_PARAMETERS, association, opts)
            .await
    }

    /// `DELETE /profileparameters/{profileId}/{parameterId}`.
    pub async fn delete_profile_parameter(
        &self,
        profile_id: i64,
        parameter_id: i64,
        opts: &RequestOptions,
    ) -> Result<ApiResult<()>, ClientError> {
        self.api_delete(
            &format!("{API_PROFILE_PARAMETERS}/{profile_id}/{parameter_id}"),
            opts,
        )
        .await
    }
}
