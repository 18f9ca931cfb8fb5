//! Headless controller for a restaurant menu dashboard.
//!
//! # Overview
//! Lists, creates, edits, toggles and deletes the foods of a menu through a
//! REST backend. The UI is represented by view models (`AddFoodForm`,
//! `EditFoodForm`, `FoodCard`) and the `Dashboard` whose methods are the
//! event handlers a front-end calls.
//!
//! # Design
//! - `ApiClient` is stateless and only builds `HttpRequest` / parses
//!   `HttpResponse` values (host-does-IO).
//! - `Transport` performs the round-trip; `UreqTransport` is the blocking
//!   HTTP implementation.
//! - `Api` combines the two into `get`/`post`/`put`/`delete` calls.
//! - `Dashboard` owns the cached list and reconciles it after every
//!   successful mutation.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod http;
pub mod list_item;
pub mod transport;
pub mod types;

pub use api::Api;
pub use client::ApiClient;
pub use config::ClientConfig;
pub use dashboard::{Dashboard, Modal};
pub use error::{format_api_error, ApiError};
pub use forms::{AddFoodForm, EditFoodForm, FoodField};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list_item::{FoodAction, FoodCard};
pub use transport::{Transport, UreqTransport};
pub use types::{Food, FoodDraft, FoodId, NewFood};
