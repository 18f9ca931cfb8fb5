//! Domain DTOs for the foods API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! the integration tests catch any schema drift between the two crates.
//!
//! A food goes through three shapes: a `FoodDraft` (what a form collects),
//! a `NewFood` (the create payload, availability forced on) and a `Food`
//! (what the backend stores and echoes back, identity included).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend-assigned identifier of a food. Serialized as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodId(pub u64);

impl fmt::Display for FoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A menu item as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Food {
    pub id: FoodId,
    pub name: String,
    pub description: String,
    /// Decimal amount kept as text; never parsed on the client.
    pub price: String,
    pub available: bool,
    pub image: String,
}

/// Request payload for creating a food. The backend assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewFood {
    pub name: String,
    pub description: String,
    pub price: String,
    pub available: bool,
    pub image: String,
}

/// The four user-editable fields of a food, as collected by a form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FoodDraft {
    pub image: String,
    pub name: String,
    pub price: String,
    pub description: String,
}

impl FoodDraft {
    /// Create payload for this draft. New foods always start available.
    pub fn into_new_food(self) -> NewFood {
        NewFood {
            name: self.name,
            description: self.description,
            price: self.price,
            available: true,
            image: self.image,
        }
    }

    /// Full food built from this draft plus the identity and availability
    /// preserved from the record being edited.
    pub fn into_food(self, id: FoodId, available: bool) -> Food {
        Food {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            available,
            image: self.image,
        }
    }
}

impl From<&Food> for FoodDraft {
    fn from(food: &Food) -> Self {
        Self {
            image: food.image.clone(),
            name: food.name.clone(),
            price: food.price.clone(),
            description: food.description.clone(),
        }
    }
}
