use seed::{prelude::*, *};
use serde::de::DeserializeOwned;
use shared::{
    ApiReply, OverpassReport, SavedLocation, SceneQuery, SceneReport, SubmitLocationRequest,
};

fn api_root() -> String {
    option_env!("FRONTEND_API_ROOT")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_default()
}

fn endpoint(path: &str) -> String {
    format!("{}{path}", api_root())
}

pub async fn submit_location(
    payload: SubmitLocationRequest,
) -> Result<ApiReply<OverpassReport>, String> {
    web_sys::console::debug_1(
        &format!(
            "[frontend] submitting location '{}' at ({}, {})",
            payload.name, payload.latitude, payload.longitude
        )
        .into(),
    );
    post_json("/submit_location", &payload).await
}

pub async fn query_scenes(query: SceneQuery) -> Result<ApiReply<SceneReport>, String> {
    post_json("/get_landsat_data", &query).await
}

pub async fn fetch_locations() -> Result<Vec<SavedLocation>, String> {
    match Request::new(endpoint("/get_locations"))
        .method(Method::Get)
        .fetch()
        .await
    {
        Err(err) => Err(format!("{err:?}")),
        Ok(raw) => match raw.check_status() {
            Err(status_err) => Err(format!("{status_err:?}")),
            Ok(resp) => resp
                .json::<Vec<SavedLocation>>()
                .await
                .map_err(|err| format!("{err:?}")),
        },
    }
}

/// Error statuses still carry an `{error}` body, so the status is not checked
/// here and decoding decides.
async fn post_json<B, T>(path: &str, body: &B) -> Result<ApiReply<T>, String>
where
    B: serde::Serialize,
    T: DeserializeOwned + 'static,
{
    match Request::new(endpoint(path)).method(Method::Post).json(body) {
        Err(err) => Err(format!("{err:?}")),
        Ok(request) => match request.fetch().await {
            Err(err) => Err(format!("{err:?}")),
            Ok(resp) => resp
                .json::<ApiReply<T>>()
                .await
                .map_err(|err| format!("{err:?}")),
        },
    }
}
