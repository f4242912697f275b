//! Assignment API
//!
//! The remote authority for course/area assignments. The trait is the seam
//! between the synchronizer and the network; `HttpAssignmentApi` talks to the
//! Curso REST API with reqwest (fetch-backed in the browser).

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{Area, AreaIdBody, AreaIdsBody};

/// Remote operations consumed by the synchronizer
///
/// Futures are not `Send`: everything runs on the browser's single thread.
#[async_trait(?Send)]
pub trait AssignmentApi {
    /// `GET /area/`: the full area universe
    async fn list_areas(&self) -> ApiResult<Vec<Area>>;

    /// `GET /cursoArea/{curso_id}`: areas currently assigned to a course
    async fn list_assigned(&self, curso_id: i64) -> ApiResult<Vec<Area>>;

    /// `POST /cursoArea/{curso_id}`: replace the whole assignment list
    async fn replace_assignment(&self, curso_id: i64, area_ids: &[i64]) -> ApiResult<()>;

    /// `DELETE /cursoArea/{curso_id}`: remove one assignment
    async fn remove_assignment(&self, curso_id: i64, area_id: i64) -> ApiResult<()>;
}

/// REST implementation of [`AssignmentApi`]
#[derive(Debug, Clone)]
pub struct HttpAssignmentApi {
    client: Client,
    config: ApiConfig,
}

impl HttpAssignmentApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { client: Client::new(), config }
    }

    fn curso_area_url(&self, curso_id: i64) -> String {
        self.config.endpoint(&format!("cursoArea/{}", curso_id))
    }
}

/// Turn a non-2xx response into `ApiError::Status`, keeping the body as the message
pub(crate) async fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status { status: status.as_u16(), message: error_message(&body) })
}

/// Pull `message` (or `error`) out of a JSON error body, else use the raw text
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let response = ensure_success(response).await?;
    response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl AssignmentApi for HttpAssignmentApi {
    async fn list_areas(&self) -> ApiResult<Vec<Area>> {
        let url = self.config.endpoint("area/");
        debug!("[API] GET {}", url);
        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }

    async fn list_assigned(&self, curso_id: i64) -> ApiResult<Vec<Area>> {
        let url = self.curso_area_url(curso_id);
        debug!("[API] GET {}", url);
        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }

    async fn replace_assignment(&self, curso_id: i64, area_ids: &[i64]) -> ApiResult<()> {
        let url = self.curso_area_url(curso_id);
        debug!("[API] POST {} ({} areas)", url, area_ids.len());
        let response = self.client.post(&url).json(&AreaIdsBody { area_ids }).send().await?;
        ensure_success(response).await.map(|_| ())
    }

    async fn remove_assignment(&self, curso_id: i64, area_id: i64) -> ApiResult<()> {
        let url = self.curso_area_url(curso_id);
        debug!("[API] DELETE {} area={}", url, area_id);
        let response = self.client.delete(&url).json(&AreaIdBody { area_id }).send().await?;
        ensure_success(response).await.map(|_| ())
    }
}
