//! Read-only view of one food in the dashboard list.

use std::fmt;

use crate::types::{Food, FoodId};

/// What a user can do to a listed food.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodAction {
    ToggleAvailable(FoodId),
    Edit(FoodId),
    Delete(FoodId),
}

impl FoodAction {
    pub fn id(&self) -> FoodId {
        match self {
            FoodAction::ToggleAvailable(id) | FoodAction::Edit(id) | FoodAction::Delete(id) => *id,
        }
    }
}

/// Renders a single food and exposes its three actions.
#[derive(Debug, Clone, Copy)]
pub struct FoodCard<'a> {
    food: &'a Food,
}

impl<'a> FoodCard<'a> {
    pub fn new(food: &'a Food) -> Self {
        Self { food }
    }

    pub fn food(&self) -> &'a Food {
        self.food
    }

    pub fn title(&self) -> &'a str {
        &self.food.name
    }

    pub fn description(&self) -> &'a str {
        &self.food.description
    }

    pub fn image(&self) -> &'a str {
        &self.food.image
    }

    /// Price as entered, prefixed with the currency marker.
    pub fn price_label(&self) -> String {
        format!("R$ {}", self.food.price)
    }

    pub fn availability_label(&self) -> &'static str {
        if self.food.available {
            "Available"
        } else {
            "Unavailable"
        }
    }

    pub fn toggle(&self) -> FoodAction {
        FoodAction::ToggleAvailable(self.food.id)
    }

    pub fn edit(&self) -> FoodAction {
        FoodAction::Edit(self.food.id)
    }

    pub fn delete(&self) -> FoodAction {
        FoodAction::Delete(self.food.id)
    }

    pub fn actions(&self) -> [FoodAction; 3] {
        [self.toggle(), self.edit(), self.delete()]
    }
}

impl fmt::Display for FoodCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} - {} [{}]",
            self.food.id,
            self.title(),
            self.price_label(),
            self.availability_label()
        )?;
        if !self.food.description.is_empty() {
            write!(f, "\n    {}", self.food.description)?;
        }
        Ok(())
    }
}
