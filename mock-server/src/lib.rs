use std::{collections::HashSet, io, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

pub mod config;

pub use config::Config;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub available: bool,
    pub image: String,
}

#[derive(Deserialize)]
pub struct CreateFood {
    pub name: String,
    pub description: String,
    pub price: String,
    #[serde(default = "default_available")]
    pub available: bool,
    pub image: String,
}

/// Full replacement body. Any `id` in the body is ignored in favor of the
/// path id.
#[derive(Deserialize)]
pub struct UpdateFood {
    pub name: String,
    pub description: String,
    pub price: String,
    pub available: bool,
    pub image: String,
}

fn default_available() -> bool {
    true
}

/// Foods in insertion order. Ids are handed out sequentially and never
/// reused.
#[derive(Debug)]
pub struct FoodStore {
    foods: Vec<Food>,
    next_id: u64,
}

impl Default for FoodStore {
    fn default() -> Self {
        Self {
            foods: Vec::new(),
            next_id: 1,
        }
    }
}

impl FoodStore {
    /// Store serving `seed` as given. Rejects duplicate ids and ids that
    /// leave no room for another one.
    pub fn new(seed: Vec<Food>) -> Result<Self, io::Error> {
        let mut seen = HashSet::new();
        if let Some(dup) = seed.iter().find(|f| !seen.insert(f.id)) {
            return Err(invalid_seed(format!("duplicate food id {}", dup.id)));
        }
        let next_id = match seed.iter().map(|f| f.id).max() {
            Some(max) => max.checked_add(1).ok_or_else(|| {
                invalid_seed(format!("food id {max} leaves no room for new ids"))
            })?,
            None => 1,
        };
        Ok(Self {
            foods: seed,
            next_id,
        })
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut Food> {
        self.foods.iter_mut().find(|f| f.id == id)
    }

    /// `None` once the id space is exhausted.
    fn insert(&mut self, input: CreateFood) -> Option<Food> {
        let id = self.next_id;
        self.next_id = id.checked_add(1)?;
        let food = Food {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            available: input.available,
            image: input.image,
        };
        self.foods.push(food.clone());
        Some(food)
    }

    fn remove(&mut self, id: u64) -> Option<Food> {
        let index = self.foods.iter().position(|f| f.id == id)?;
        Some(self.foods.remove(index))
    }
}

fn invalid_seed(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

pub type Db = Arc<RwLock<FoodStore>>;

pub fn app() -> Router {
    router(FoodStore::default())
}

pub fn app_with_foods(seed: Vec<Food>) -> Result<Router, io::Error> {
    Ok(router(FoodStore::new(seed)?))
}

fn router(store: FoodStore) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route("/foods/{id}", put(update_food).delete(delete_food))
        .with_state(db)
}

pub async fn run_with_foods(listener: TcpListener, seed: Vec<Food>) -> Result<(), io::Error> {
    info!(count = seed.len(), "serving foods");
    axum::serve(listener, app_with_foods(seed)?).await
}

async fn list_foods(State(db): State<Db>) -> Json<Vec<Food>> {
    let store = db.read().await;
    Json(store.foods.clone())
}

async fn create_food(
    State(db): State<Db>,
    Json(input): Json<CreateFood>,
) -> Result<(StatusCode, Json<Food>), StatusCode> {
    let food = db
        .write()
        .await
        .insert(input)
        .ok_or(StatusCode::INSUFFICIENT_STORAGE)?;
    debug!(id = food.id, name = %food.name, "created food");
    Ok((StatusCode::CREATED, Json(food)))
}

async fn update_food(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateFood>,
) -> Result<Json<Food>, StatusCode> {
    let mut store = db.write().await;
    let food = store.get_mut(id).ok_or(StatusCode::NOT_FOUND)?;
    *food = Food {
        id,
        name: input.name,
        description: input.description,
        price: input.price,
        available: input.available,
        image: input.image,
    };
    debug!(id, "updated food");
    Ok(Json(food.clone()))
}

async fn delete_food(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    let removed = store.remove(id).ok_or(StatusCode::NOT_FOUND)?;
    debug!(id = removed.id, "deleted food");
    Ok(StatusCode::NO_CONTENT)
}
