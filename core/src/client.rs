//! Stateless HTTP request builder and response parser for the foods API.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and carries no mutable state between
//! calls. Every operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The generic builders work on any path; the `*_foods`/`*_food` helpers
//! pin the endpoints of the foods resource.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Food, FoodId, NewFood};

const FOODS_PATH: &str = "/foods";

/// Synchronous, stateless client for the foods API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    pub fn build_get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.url(path),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_post<B: Serialize>(&self, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        self.build_with_body(HttpMethod::Post, path, body)
    }

    pub fn build_put<B: Serialize>(&self, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        self.build_with_body(HttpMethod::Put, path, body)
    }

    pub fn build_delete(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.url(path),
            headers: Vec::new(),
            body: None,
        }
    }

    fn build_with_body<B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: self.url(path),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// Check the status and deserialize the JSON body.
    pub fn parse_json<R: DeserializeOwned>(&self, response: HttpResponse) -> Result<R, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Check the status and discard the body.
    pub fn parse_empty(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn build_list_foods(&self) -> HttpRequest {
        self.build_get(FOODS_PATH)
    }

    pub fn build_create_food(&self, input: &NewFood) -> Result<HttpRequest, ApiError> {
        self.build_post(FOODS_PATH, input)
    }

    /// PUT the full record to `/foods/{id}`.
    pub fn build_update_food(&self, food: &Food) -> Result<HttpRequest, ApiError> {
        self.build_put(&food_path(food.id), food)
    }

    pub fn build_delete_food(&self, id: FoodId) -> HttpRequest {
        self.build_delete(&food_path(id))
    }

    pub fn parse_list_foods(&self, response: HttpResponse) -> Result<Vec<Food>, ApiError> {
        self.parse_json(response)
    }

    pub fn parse_create_food(&self, response: HttpResponse) -> Result<Food, ApiError> {
        self.parse_json(response)
    }

    pub fn parse_update_food(&self, response: HttpResponse) -> Result<Food, ApiError> {
        self.parse_json(response)
    }

    pub fn parse_delete_food(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.parse_empty(response)
    }
}

pub(crate) fn food_path(id: FoodId) -> String {
    format!("{FOODS_PATH}/{id}")
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
