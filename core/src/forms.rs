//! Add and edit forms for a food.
//!
//! Both forms hold the four free-text fields and nothing else decides
//! whether they can be submitted: an empty field is submitted as an empty
//! string. Opening, closing and submitting are driven by the `Dashboard`.

use crate::types::{Food, FoodDraft};

/// One of the four editable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodField {
    Image,
    Name,
    Price,
    Description,
}

impl FoodField {
    pub const ALL: [FoodField; 4] = [
        FoodField::Image,
        FoodField::Name,
        FoodField::Price,
        FoodField::Description,
    ];

    /// Hint shown in an empty input.
    pub fn placeholder(&self) -> &'static str {
        match self {
            FoodField::Image => "Paste the image link here",
            FoodField::Name => "e.g. Italian style",
            FoodField::Price => "e.g. 19.90",
            FoodField::Description => "Description",
        }
    }
}

fn field_mut(draft: &mut FoodDraft, field: FoodField) -> &mut String {
    match field {
        FoodField::Image => &mut draft.image,
        FoodField::Name => &mut draft.name,
        FoodField::Price => &mut draft.price,
        FoodField::Description => &mut draft.description,
    }
}

fn field_ref(draft: &FoodDraft, field: FoodField) -> &str {
    match field {
        FoodField::Image => &draft.image,
        FoodField::Name => &draft.name,
        FoodField::Price => &draft.price,
        FoodField::Description => &draft.description,
    }
}

/// Form for a new food. Starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddFoodForm {
    fields: FoodDraft,
}

impl AddFoodForm {
    pub const TITLE: &'static str = "New dish";
    pub const SUBMIT_LABEL: &'static str = "Add dish";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: FoodField, value: impl Into<String>) {
        *field_mut(&mut self.fields, field) = value.into();
    }

    pub fn get(&self, field: FoodField) -> &str {
        field_ref(&self.fields, field)
    }

    /// The creation intent: the four fields as entered.
    pub fn draft(&self) -> FoodDraft {
        self.fields.clone()
    }
}

/// Form for an existing food, pre-filled from the record being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditFoodForm {
    editing: Food,
    fields: FoodDraft,
}

impl EditFoodForm {
    pub const TITLE: &'static str = "Edit dish";
    pub const SUBMIT_LABEL: &'static str = "Save changes";

    pub fn new(editing: Food) -> Self {
        let fields = FoodDraft::from(&editing);
        Self { editing, fields }
    }

    /// The food as it was when editing began.
    pub fn editing(&self) -> &Food {
        &self.editing
    }

    pub fn set(&mut self, field: FoodField, value: impl Into<String>) {
        *field_mut(&mut self.fields, field) = value.into();
    }

    pub fn get(&self, field: FoodField) -> &str {
        field_ref(&self.fields, field)
    }

    /// The edited fields. Identity and availability are merged in by the
    /// dashboard from `editing()`.
    pub fn draft(&self) -> FoodDraft {
        self.fields.clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.fields != FoodDraft::from(&self.editing)
    }
}
