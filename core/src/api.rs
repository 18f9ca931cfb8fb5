//! The API client proper: `ApiClient` requests executed over a `Transport`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Food, FoodId, NewFood};

/// Issues requests against the configured base URL and returns parsed
/// payloads. Any transport failure or non-2xx status is an `Err`.
pub struct Api<T: Transport> {
    client: ApiClient,
    transport: T,
}

impl Api<UreqTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url, UreqTransport::new(config))
    }
}

impl<T: Transport> Api<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: ApiClient::new(base_url),
            transport,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self.transport.execute(&self.client.build_get(path))?;
        self.client.parse_json(response)
    }

    pub fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let response = self.transport.execute(&self.client.build_post(path, body)?)?;
        self.client.parse_json(response)
    }

    pub fn put<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let response = self.transport.execute(&self.client.build_put(path, body)?)?;
        self.client.parse_json(response)
    }

    /// The response body is ignored.
    pub fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.transport.execute(&self.client.build_delete(path))?;
        self.client.parse_empty(response)
    }

    pub fn list_foods(&self) -> Result<Vec<Food>, ApiError> {
        let response = self.transport.execute(&self.client.build_list_foods())?;
        let foods = self.client.parse_list_foods(response)?;
        debug!(count = foods.len(), "listed foods");
        Ok(foods)
    }

    pub fn create_food(&self, input: &NewFood) -> Result<Food, ApiError> {
        let response = self.transport.execute(&self.client.build_create_food(input)?)?;
        self.client.parse_create_food(response)
    }

    pub fn update_food(&self, food: &Food) -> Result<Food, ApiError> {
        let response = self.transport.execute(&self.client.build_update_food(food)?)?;
        self.client.parse_update_food(response)
    }

    pub fn delete_food(&self, id: FoodId) -> Result<(), ApiError> {
        let response = self.transport.execute(&self.client.build_delete_food(id))?;
        self.client.parse_delete_food(response)
    }
}
