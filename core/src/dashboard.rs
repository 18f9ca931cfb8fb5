//! The dashboard controller.
//!
//! # Design
//! `Dashboard` owns the cached list of foods, the form currently open and
//! the message of the last failure. Every operation takes `&mut self`, runs
//! its round-trip to completion and only then touches the list, so the list
//! always reflects the last successful server response. There are no
//! optimistic updates and therefore nothing to roll back.
//!
//! The add and edit forms are mutually exclusive: `Modal` holds at most one
//! of them, and opening either replaces whatever was open. A form closes
//! only when its submission succeeds; on failure it stays open with the
//! user's input intact.
//!
//! Every failure is returned to the caller, logged, and kept in
//! `last_error()` for display. The next successful operation clears it.

use tracing::{info, warn};

use crate::api::Api;
use crate::config::ClientConfig;
use crate::error::{format_api_error, ApiError};
use crate::forms::{AddFoodForm, EditFoodForm};
use crate::list_item::{FoodAction, FoodCard};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Food, FoodDraft, FoodId};

/// Which form, if any, is open on top of the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Closed,
    Adding(AddFoodForm),
    Editing(EditFoodForm),
}

pub struct Dashboard<T: Transport> {
    api: Api<T>,
    foods: Vec<Food>,
    modal: Modal,
    last_error: Option<String>,
}

impl Dashboard<UreqTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(Api::from_config(config))
    }
}

impl<T: Transport> Dashboard<T> {
    /// An empty dashboard. Call `load` to fetch the list.
    pub fn new(api: Api<T>) -> Self {
        Self {
            api,
            foods: Vec::new(),
            modal: Modal::Closed,
            last_error: None,
        }
    }

    pub fn api(&self) -> &Api<T> {
        &self.api
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn cards(&self) -> impl Iterator<Item = FoodCard<'_>> {
        self.foods.iter().map(FoodCard::new)
    }

    pub fn find(&self, id: FoodId) -> Option<&Food> {
        self.foods.iter().find(|f| f.id == id)
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn is_add_open(&self) -> bool {
        matches!(self.modal, Modal::Adding(_))
    }

    pub fn is_edit_open(&self) -> bool {
        matches!(self.modal, Modal::Editing(_))
    }

    pub fn add_form_mut(&mut self) -> Option<&mut AddFoodForm> {
        match &mut self.modal {
            Modal::Adding(form) => Some(form),
            _ => None,
        }
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut EditFoodForm> {
        match &mut self.modal {
            Modal::Editing(form) => Some(form),
            _ => None,
        }
    }

    /// The food captured by `begin_edit`, while the edit form is open.
    pub fn editing_food(&self) -> Option<&Food> {
        match &self.modal {
            Modal::Editing(form) => Some(form.editing()),
            _ => None,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Fetch the full list and replace the cache with it.
    pub fn load(&mut self) -> Result<(), ApiError> {
        let result = self.api.list_foods();
        let foods = self.record("load foods", result)?;
        info!(count = foods.len(), "loaded foods");
        self.foods = foods;
        Ok(())
    }

    /// Open an empty add form, replacing any open form.
    pub fn open_add_form(&mut self) {
        self.modal = Modal::Adding(AddFoodForm::new());
        self.last_error = None;
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
        self.last_error = None;
    }

    /// Capture a listed food and open the edit form pre-filled with it.
    pub fn begin_edit(&mut self, id: FoodId) -> Result<(), ApiError> {
        let food = self.require("edit", id)?.clone();
        self.modal = Modal::Editing(EditFoodForm::new(food));
        self.last_error = None;
        Ok(())
    }

    /// Create a food from `draft`, always as available. On success the
    /// echoed food is appended and an open add form is closed.
    pub fn handle_add_food(&mut self, draft: FoodDraft) -> Result<Food, ApiError> {
        let result = self.api.create_food(&draft.into_new_food());
        let created = self.record("create food", result)?;

        match self.foods.iter().position(|f| f.id == created.id) {
            Some(index) => {
                warn!(id = %created.id, "created food id already listed, replacing entry");
                self.foods[index] = created.clone();
            }
            None => self.foods.push(created.clone()),
        }
        if self.is_add_open() {
            self.modal = Modal::Closed;
        }
        info!(id = %created.id, name = %created.name, "created food");
        Ok(created)
    }

    /// Submit the open add form.
    pub fn submit_add_form(&mut self) -> Result<Food, ApiError> {
        let draft = match &self.modal {
            Modal::Adding(form) => form.draft(),
            _ => return Err(self.fail("submit add form", ApiError::FormNotOpen("add"))),
        };
        self.handle_add_food(draft)
    }

    /// Save `draft` over the food being edited, keeping its id and
    /// availability. On success the entry is replaced in place and the edit
    /// form closes.
    pub fn handle_update_food(&mut self, draft: FoodDraft) -> Result<Food, ApiError> {
        let (id, available) = match &self.modal {
            Modal::Editing(form) => (form.editing().id, form.editing().available),
            _ => return Err(self.fail("update food", ApiError::FormNotOpen("edit"))),
        };
        let result = self.api.update_food(&draft.into_food(id, available));
        let updated = self.record("update food", result)?;

        self.replace(id, updated.clone());
        self.modal = Modal::Closed;
        info!(%id, "updated food");
        Ok(updated)
    }

    /// Submit the open edit form.
    pub fn submit_edit_form(&mut self) -> Result<Food, ApiError> {
        let draft = match &self.modal {
            Modal::Editing(form) => form.draft(),
            _ => return Err(self.fail("submit edit form", ApiError::FormNotOpen("edit"))),
        };
        self.handle_update_food(draft)
    }

    /// Flip a food's availability and store the echoed record in place.
    pub fn toggle_available(&mut self, id: FoodId) -> Result<Food, ApiError> {
        let mut food = self.require("toggle availability", id)?.clone();
        food.available = !food.available;

        let result = self.api.update_food(&food);
        let updated = self.record("toggle availability", result)?;

        self.replace(id, updated.clone());
        info!(%id, available = updated.available, "toggled availability");
        Ok(updated)
    }

    /// Delete a food. A 404 means the backend already lost it, so the entry
    /// is dropped from the list as well.
    pub fn delete_food(&mut self, id: FoodId) -> Result<(), ApiError> {
        self.require("delete food", id)?;

        match self.api.delete_food(id) {
            Ok(()) => info!(%id, "deleted food"),
            Err(ApiError::NotFound) => info!(%id, "food already gone on the server"),
            Err(err) => return Err(self.fail("delete food", err)),
        }
        self.foods.retain(|f| f.id != id);
        if self.editing_food().is_some_and(|f| f.id == id) {
            self.modal = Modal::Closed;
        }
        self.last_error = None;
        Ok(())
    }

    /// Route a list item's action to the matching operation.
    pub fn dispatch(&mut self, action: FoodAction) -> Result<(), ApiError> {
        match action {
            FoodAction::ToggleAvailable(id) => self.toggle_available(id).map(|_| ()),
            FoodAction::Edit(id) => self.begin_edit(id),
            FoodAction::Delete(id) => self.delete_food(id),
        }
    }

    fn require(&mut self, op: &str, id: FoodId) -> Result<&Food, ApiError> {
        match self.foods.iter().position(|f| f.id == id) {
            Some(index) => Ok(&self.foods[index]),
            None => Err(self.fail(op, ApiError::UnknownFood(id))),
        }
    }

    /// Store the echoed record where `id` was listed. An echo carrying a
    /// different id takes over that slot and any other entry with its id is
    /// dropped, so ids stay unique.
    fn replace(&mut self, id: FoodId, food: Food) {
        if food.id != id {
            warn!(%id, echoed = %food.id, "server echoed a different id, re-keying entry");
            self.foods.retain(|f| f.id != food.id);
        }
        match self.foods.iter().position(|f| f.id == id) {
            Some(index) => self.foods[index] = food,
            None => {
                warn!(%id, "updated food no longer listed, appending");
                self.foods.push(food);
            }
        }
    }

    fn record<R>(&mut self, op: &str, result: Result<R, ApiError>) -> Result<R, ApiError> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Ok(value)
            }
            Err(err) => Err(self.fail(op, err)),
        }
    }

    fn fail(&mut self, op: &str, err: ApiError) -> ApiError {
        warn!(error = %err, "{op} failed");
        self.last_error = Some(format_api_error(&err));
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FoodField;
    use crate::http::HttpMethod;
    use crate::transport::scripted::ScriptedTransport;

    fn food(id: u64, name: &str, available: bool) -> Food {
        Food {
            id: FoodId(id),
            name: name.to_string(),
            description: format!("{name} description"),
            price: "19.90".to_string(),
            available,
            image: format!("http://img/{id}.png"),
        }
    }

    /// A dashboard whose first scripted reply is the initial list.
    fn loaded(foods: &[Food], transport: ScriptedTransport) -> Dashboard<ScriptedTransport> {
        let transport = transport.reply_first_json(200, &foods);
        let mut dashboard = Dashboard::new(Api::new("http://api.test", transport));
        dashboard.load().unwrap();
        dashboard
    }

    fn requests(dashboard: &Dashboard<ScriptedTransport>) -> Vec<crate::http::HttpRequest> {
        dashboard.api().transport().requests()
    }

    fn burger_draft() -> FoodDraft {
        FoodDraft {
            image: "url".to_string(),
            name: "Burger".to_string(),
            price: "10.00".to_string(),
            description: "tasty".to_string(),
        }
    }

    #[test]
    fn load_replaces_list_wholesale() {
        let dashboard = loaded(
            &[food(1, "Pizza", true), food(2, "Soup", false)],
            ScriptedTransport::default(),
        );
        assert_eq!(dashboard.foods().len(), 2);
        assert_eq!(dashboard.foods()[1].name, "Soup");
        assert_eq!(requests(&dashboard)[0].path, "http://api.test/foods");
        assert!(dashboard.last_error().is_none());
    }

    #[test]
    fn load_failure_leaves_list_empty_and_records_error() {
        let mut dashboard = Dashboard::new(Api::new(
            "http://api.test",
            ScriptedTransport::default().fail("Connection refused"),
        ));
        let err = dashboard.load().unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(dashboard.foods().is_empty());
        assert!(dashboard.last_error().unwrap().contains("refused"));
    }

    #[test]
    fn reload_failure_keeps_cached_list() {
        let foods = [food(1, "Pizza", true), food(2, "Soup", false)];
        let mut dashboard = loaded(&foods, ScriptedTransport::default().fail("Connection refused"));

        let err = dashboard.load().unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(dashboard.foods(), &foods);
        assert!(dashboard.last_error().is_some());
    }

    #[test]
    fn add_form_submission_appends_echo_and_closes() {
        let echoed = burger_draft().into_food(FoodId(2), true);
        let mut dashboard = loaded(
            &[food(1, "Pizza", true)],
            ScriptedTransport::default().reply_json(201, &echoed),
        );

        dashboard.open_add_form();
        let form = dashboard.add_form_mut().unwrap();
        form.set(FoodField::Name, "Burger");
        form.set(FoodField::Price, "10.00");
        form.set(FoodField::Image, "url");
        form.set(FoodField::Description, "tasty");

        let created = dashboard.submit_add_form().unwrap();
        assert_eq!(created, echoed);
        assert_eq!(dashboard.foods().len(), 2);
        assert_eq!(dashboard.foods()[1], echoed);
        assert!(!dashboard.is_add_open());

        let sent = &requests(&dashboard)[1];
        assert_eq!(sent.method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["available"], true);
        assert_eq!(body["name"], "Burger");
        assert!(body.get("id").is_none());
    }

    #[test]
    fn empty_fields_are_still_submitted() {
        let echoed = FoodDraft::default().into_food(FoodId(1), true);
        let mut dashboard = loaded(&[], ScriptedTransport::default().reply_json(201, &echoed));
        dashboard.open_add_form();
        dashboard.submit_add_form().unwrap();
        assert_eq!(dashboard.foods(), &[echoed]);
        assert!(dashboard.foods()[0].available);
    }

    #[test]
    fn create_failure_keeps_list_and_form() {
        let mut dashboard = loaded(
            &[food(1, "Pizza", true)],
            ScriptedTransport::default().reply(500, "boom"),
        );
        dashboard.open_add_form();
        dashboard.add_form_mut().unwrap().set(FoodField::Name, "Burger");

        let err = dashboard.submit_add_form().unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
        assert_eq!(dashboard.foods(), &[food(1, "Pizza", true)]);
        assert!(dashboard.is_add_open());
        assert_eq!(dashboard.add_form_mut().unwrap().get(FoodField::Name), "Burger");
        assert!(dashboard.last_error().unwrap().contains("500"));
    }

    #[test]
    fn duplicate_echo_id_is_not_listed_twice() {
        let echoed = burger_draft().into_food(FoodId(1), true);
        let mut dashboard = loaded(
            &[food(1, "Pizza", true)],
            ScriptedTransport::default().reply_json(201, &echoed),
        );
        dashboard.handle_add_food(burger_draft()).unwrap();
        assert_eq!(dashboard.foods(), &[echoed]);
    }

    #[test]
    fn update_keeps_id_position_and_availability() {
        let foods = [food(1, "Pizza", true), food(2, "Soup", false), food(3, "Cake", true)];
        let mut draft = FoodDraft::from(&foods[1]);
        draft.name = "Onion soup".to_string();
        let echoed = draft.into_food(FoodId(2), false);
        let mut dashboard = loaded(&foods, ScriptedTransport::default().reply_json(200, &echoed));

        dashboard.begin_edit(FoodId(2)).unwrap();
        assert_eq!(dashboard.editing_food(), Some(&foods[1]));
        dashboard
            .edit_form_mut()
            .unwrap()
            .set(FoodField::Name, "Onion soup");
        dashboard.submit_edit_form().unwrap();

        assert_eq!(dashboard.foods().len(), 3);
        assert_eq!(dashboard.foods()[1], echoed);
        assert_eq!(dashboard.foods()[0], foods[0]);
        assert_eq!(dashboard.foods()[2], foods[2]);
        assert!(!dashboard.is_edit_open());

        let sent = &requests(&dashboard)[1];
        assert_eq!(sent.method, HttpMethod::Put);
        assert_eq!(sent.path, "http://api.test/foods/2");
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], 2);
        assert_eq!(body["available"], false);
        assert_eq!(body["name"], "Onion soup");
    }

    #[test]
    fn update_failure_keeps_entry_and_form_open() {
        let mut dashboard = loaded(
            &[food(1, "Pizza", true)],
            ScriptedTransport::default().fail("timed out"),
        );
        dashboard.begin_edit(FoodId(1)).unwrap();
        dashboard.edit_form_mut().unwrap().set(FoodField::Price, "25.00");
        assert!(dashboard.submit_edit_form().is_err());
        assert_eq!(dashboard.foods(), &[food(1, "Pizza", true)]);
        assert!(dashboard.is_edit_open());
        assert_eq!(dashboard.last_error(), Some("Request timed out"));
    }

    #[test]
    fn update_without_open_form_is_rejected_locally() {
        let mut dashboard = loaded(&[food(1, "Pizza", true)], ScriptedTransport::default());
        let err = dashboard.handle_update_food(burger_draft()).unwrap_err();
        assert!(matches!(err, ApiError::FormNotOpen("edit")));
        assert_eq!(requests(&dashboard).len(), 1);
    }

    #[test]
    fn forms_are_mutually_exclusive() {
        let mut dashboard = loaded(&[food(1, "Pizza", true)], ScriptedTransport::default());
        dashboard.open_add_form();
        dashboard.begin_edit(FoodId(1)).unwrap();
        assert!(dashboard.is_edit_open());
        assert!(!dashboard.is_add_open());
        dashboard.open_add_form();
        assert!(dashboard.is_add_open());
        assert!(dashboard.editing_food().is_none());
        dashboard.close_modal();
        assert_eq!(dashboard.modal(), &Modal::Closed);
    }

    #[test]
    fn toggling_twice_restores_availability() {
        let pizza = food(1, "Pizza", true);
        let off = Food {
            available: false,
            ..pizza.clone()
        };
        let mut dashboard = loaded(
            &[pizza.clone(), food(2, "Soup", true)],
            ScriptedTransport::default()
                .reply_json(200, &off)
                .reply_json(200, &pizza),
        );

        dashboard.dispatch(FoodAction::ToggleAvailable(FoodId(1))).unwrap();
        assert!(!dashboard.foods()[0].available);
        dashboard.dispatch(FoodAction::ToggleAvailable(FoodId(1))).unwrap();
        assert_eq!(dashboard.foods()[0], pizza);
        assert_eq!(dashboard.foods().len(), 2);

        let sent = &requests(&dashboard)[1];
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["available"], false);
        assert_eq!(body["name"], "Pizza");
    }

    #[test]
    fn toggle_failure_is_returned_not_swallowed() {
        let mut dashboard = loaded(
            &[food(1, "Pizza", true)],
            ScriptedTransport::default().reply(503, "down"),
        );
        let err = dashboard.toggle_available(FoodId(1)).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 503, .. }));
        assert!(dashboard.foods()[0].available);
        assert!(dashboard.last_error().is_some());
    }

    #[test]
    fn delete_removes_only_target() {
        let mut dashboard = loaded(
            &[food(1, "Pizza", true)],
            ScriptedTransport::default().reply(204, ""),
        );
        dashboard.dispatch(FoodAction::Delete(FoodId(1))).unwrap();
        assert!(dashboard.foods().is_empty());

        let sent = &requests(&dashboard)[1];
        assert_eq!(sent.method, HttpMethod::Delete);
        assert_eq!(sent.path, "http://api.test/foods/1");
    }

    #[test]
    fn delete_keeps_other_entries_in_order() {
        let foods = [food(1, "Pizza", true), food(2, "Soup", true), food(3, "Cake", false)];
        let mut dashboard = loaded(&foods, ScriptedTransport::default().reply(200, "{}"));
        dashboard.delete_food(FoodId(2)).unwrap();
        assert_eq!(dashboard.foods(), &[foods[0].clone(), foods[2].clone()]);
    }

    #[test]
    fn delete_of_missing_server_record_still_drops_entry() {
        let mut dashboard = loaded(
            &[food(1, "Pizza", true)],
            ScriptedTransport::default().reply(404, ""),
        );
        dashboard.delete_food(FoodId(1)).unwrap();
        assert!(dashboard.foods().is_empty());
    }

    #[test]
    fn delete_failure_keeps_entry() {
        let mut dashboard = loaded(
            &[food(1, "Pizza", true)],
            ScriptedTransport::default().fail("Connection refused"),
        );
        assert!(dashboard.delete_food(FoodId(1)).is_err());
        assert_eq!(dashboard.foods().len(), 1);
        assert!(dashboard.last_error().is_some());
    }

    #[test]
    fn delete_closes_edit_form_of_same_food() {
        let mut dashboard = loaded(
            &[food(1, "Pizza", true)],
            ScriptedTransport::default().reply(204, ""),
        );
        dashboard.dispatch(FoodAction::Edit(FoodId(1))).unwrap();
        dashboard.delete_food(FoodId(1)).unwrap();
        assert_eq!(dashboard.modal(), &Modal::Closed);
    }

    #[test]
    fn unknown_id_never_reaches_the_network() {
        let mut dashboard = loaded(&[food(1, "Pizza", true)], ScriptedTransport::default());
        assert!(matches!(
            dashboard.delete_food(FoodId(9)),
            Err(ApiError::UnknownFood(FoodId(9)))
        ));
        assert!(dashboard.toggle_available(FoodId(9)).is_err());
        assert!(dashboard.begin_edit(FoodId(9)).is_err());
        assert_eq!(requests(&dashboard).len(), 1);
        assert_eq!(dashboard.last_error(), Some("Food 9 is not on the dashboard"));
    }

    #[test]
    fn success_clears_previous_error() {
        let mut dashboard = loaded(
            &[food(1, "Pizza", true)],
            ScriptedTransport::default()
                .reply(500, "")
                .reply_json(200, &food(1, "Pizza", false)),
        );
        assert!(dashboard.toggle_available(FoodId(1)).is_err());
        assert!(dashboard.last_error().is_some());
        dashboard.toggle_available(FoodId(1)).unwrap();
        assert!(dashboard.last_error().is_none());
    }

    #[test]
    fn dismiss_error_clears_message() {
        let mut dashboard =
            Dashboard::new(Api::new("http://api.test", ScriptedTransport::default()));
        assert!(dashboard.load().is_err());
        dashboard.dismiss_error();
        assert!(dashboard.last_error().is_none());
    }

    #[test]
    fn cards_follow_list_order() {
        let dashboard = loaded(
            &[food(1, "Pizza", true), food(2, "Soup", false)],
            ScriptedTransport::default(),
        );
        let titles: Vec<_> = dashboard.cards().map(|c| c.title()).collect();
        assert_eq!(titles, ["Pizza", "Soup"]);
    }

    #[test]
    fn opening_a_form_clears_previous_error() {
        let mut dashboard = loaded(&[food(1, "Pizza", true)], ScriptedTransport::default());
        assert!(dashboard.begin_edit(FoodId(9)).is_err());
        assert!(dashboard.last_error().is_some());

        dashboard.begin_edit(FoodId(1)).unwrap();
        assert!(dashboard.last_error().is_none());

        assert!(dashboard.begin_edit(FoodId(9)).is_err());
        dashboard.open_add_form();
        assert!(dashboard.last_error().is_none());

        assert!(dashboard.submit_edit_form().is_err());
        dashboard.close_modal();
        assert!(dashboard.last_error().is_none());
    }

    #[test]
    fn echo_with_different_id_does_not_duplicate_entries() {
        let foods = [food(1, "Pizza", true), food(2, "Soup", true), food(3, "Cake", true)];
        let echoed = food(2, "Pizza", false);
        let mut dashboard = loaded(&foods, ScriptedTransport::default().reply_json(200, &echoed));

        dashboard.toggle_available(FoodId(1)).unwrap();
        assert_eq!(dashboard.foods(), &[echoed, foods[2].clone()]);
    }
}
