//! Category resolution coordinator
//!
//! Each form that references a category owns one [`CategoryCoordinator`].
//! The coordinator lets the user pick an existing category, leave it
//! unassigned, or type a new one inline; once the new category is created
//! its id is bound back into the same form that asked for it.

use tracing::{info, warn};

use super::loader::{AggregateLoader, AggregateView};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{CategoryId, NewCategory};

/// Choice value a picker uses for "create a new category"
pub const CREATE_NEW_SENTINEL: &str = "__custom";

/// What the user picked in a category selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySelection {
    Existing(CategoryId),
    Unassigned,
    CreateNew,
}

impl CategorySelection {
    /// Interpret a raw picker value
    ///
    /// The sentinel opens inline creation, an empty value means no category,
    /// and anything else must be a category id.
    pub fn from_choice(choice: &str) -> TrackerResult<Self> {
        let choice = choice.trim();
        if choice == CREATE_NEW_SENTINEL {
            return Ok(Self::CreateNew);
        }
        if choice.is_empty() {
            return Ok(Self::Unassigned);
        }
        choice
            .parse::<CategoryId>()
            .map(Self::Existing)
            .map_err(|_| TrackerError::category_not_found(choice))
    }
}

/// A form with a category slot the coordinator can write into
pub trait CategoryBinding {
    fn category_id(&self) -> Option<CategoryId>;

    fn bind_category(&mut self, id: Option<CategoryId>);
}

/// Pairs a form with its pending inline-category state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCoordinator<F> {
    form: F,
    pending_name: Option<String>,
}

impl<F: CategoryBinding> CategoryCoordinator<F> {
    pub fn new(form: F) -> Self {
        Self {
            form,
            pending_name: None,
        }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Swap in a new form, dropping any pending inline creation
    pub fn replace_form(&mut self, form: F) {
        self.form = form;
        self.pending_name = None;
    }

    /// Whether the inline "new category" entry is open
    pub fn is_creating(&self) -> bool {
        self.pending_name.is_some()
    }

    pub fn pending_name(&self) -> Option<&str> {
        self.pending_name.as_deref()
    }

    /// Apply a picker selection
    pub fn select(&mut self, selection: CategorySelection) {
        match selection {
            CategorySelection::Existing(id) => {
                self.form.bind_category(Some(id));
                self.pending_name = None;
            }
            CategorySelection::Unassigned => {
                self.form.bind_category(None);
                self.pending_name = None;
            }
            CategorySelection::CreateNew => {
                if self.pending_name.is_none() {
                    self.pending_name = Some(String::new());
                }
            }
        }
    }

    /// Update the name typed into the inline entry; ignored when it is closed
    pub fn set_pending_name(&mut self, name: impl Into<String>) {
        if let Some(pending) = self.pending_name.as_mut() {
            *pending = name.into();
        }
    }

    /// Close the inline entry without touching the form's category
    pub fn cancel_new_category(&mut self) {
        self.pending_name = None;
    }

    /// Create the typed category, reload, and bind the new id into the form
    ///
    /// Returns `Ok(None)` when there is nothing to create (entry closed or
    /// name blank). If the store rejects the creation the entry stays open
    /// with its name and the form is left as it was.
    ///
    /// Once the category exists its id is bound and the entry closed before
    /// the reload runs. A failed reload is still returned as
    /// `AggregateLoadFailed` and recorded on `view`.
    pub async fn confirm_new_category(
        &mut self,
        loader: &AggregateLoader,
        view: &mut AggregateView,
    ) -> TrackerResult<Option<CategoryId>> {
        let name = match self.pending_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Ok(None),
        };

        let created = loader
            .stores()
            .categories
            .create_category(NewCategory::expense(&name))
            .await
            .map_err(|e| {
                warn!(name = %name, error = %e, "inline category creation rejected");
                TrackerError::CategoryCreationFailed(e.reason())
            })?;
        info!(category_id = %created.id, name = %created.name, "created category inline");

        self.form.bind_category(Some(created.id));
        self.pending_name = None;

        loader.refresh(view).await?;
        Ok(Some(created.id))
    }
}

impl<F: CategoryBinding + Default> CategoryCoordinator<F> {
    /// Back to an empty form with no pending creation
    pub fn reset(&mut self) {
        self.replace_form(F::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StoreCall, Stores};
    use std::sync::Arc;

    #[derive(Debug, Default, Clone, PartialEq, Eq)]
    struct TestForm {
        label: String,
        category_id: Option<CategoryId>,
    }

    impl CategoryBinding for TestForm {
        fn category_id(&self) -> Option<CategoryId> {
            self.category_id
        }

        fn bind_category(&mut self, id: Option<CategoryId>) {
            self.category_id = id;
        }
    }

    fn setup() -> (Arc<MemoryStore>, AggregateLoader) {
        let store = Arc::new(MemoryStore::new());
        let loader = AggregateLoader::new(Stores::shared(store.clone()));
        (store, loader)
    }

    #[test]
    fn test_from_choice() {
        let id = CategoryId::new();
        assert_eq!(
            CategorySelection::from_choice(CREATE_NEW_SENTINEL).unwrap(),
            CategorySelection::CreateNew
        );
        assert_eq!(
            CategorySelection::from_choice("").unwrap(),
            CategorySelection::Unassigned
        );
        assert_eq!(
            CategorySelection::from_choice(&id.as_uuid().to_string()).unwrap(),
            CategorySelection::Existing(id)
        );
        assert!(CategorySelection::from_choice("groceries")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_select_existing_binds_without_store() {
        let mut coord = CategoryCoordinator::new(TestForm::default());
        let id = CategoryId::new();

        coord.select(CategorySelection::CreateNew);
        coord.set_pending_name("Pets");
        coord.select(CategorySelection::Existing(id));

        assert_eq!(coord.form().category_id(), Some(id));
        assert!(!coord.is_creating());
    }

    #[test]
    fn test_cancel_keeps_category() {
        let id = CategoryId::new();
        let mut coord = CategoryCoordinator::new(TestForm {
            category_id: Some(id),
            ..TestForm::default()
        });

        coord.select(CategorySelection::CreateNew);
        coord.set_pending_name("Pets");
        coord.form_mut().label = "still editable".into();
        coord.cancel_new_category();

        assert!(!coord.is_creating());
        assert_eq!(coord.pending_name(), None);
        assert_eq!(coord.form().category_id(), Some(id));
        assert_eq!(coord.form().label, "still editable");
    }

    #[test]
    fn test_pending_name_ignored_when_closed() {
        let mut coord = CategoryCoordinator::new(TestForm::default());
        coord.set_pending_name("Pets");
        assert!(!coord.is_creating());
    }

    #[tokio::test]
    async fn test_confirm_creates_reloads_and_binds() {
        let (_store, loader) = setup();
        let mut view = AggregateView::default();
        let mut coord = CategoryCoordinator::new(TestForm::default());

        coord.select(CategorySelection::CreateNew);
        coord.set_pending_name("  Pets  ");
        let id = coord
            .confirm_new_category(&loader, &mut view)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(coord.form().category_id(), Some(id));
        assert!(!coord.is_creating());
        let created = view.find_category(id).unwrap();
        assert_eq!(created.name, "Pets");
        assert_eq!(created.kind, crate::models::CategoryKind::Expense);
    }

    #[tokio::test]
    async fn test_blank_name_is_noop() {
        let (_store, loader) = setup();
        let mut view = AggregateView::default();
        let mut coord = CategoryCoordinator::new(TestForm::default());

        coord.select(CategorySelection::CreateNew);
        coord.set_pending_name("   ");
        assert_eq!(
            coord.confirm_new_category(&loader, &mut view).await.unwrap(),
            None
        );
        assert!(coord.is_creating());
        assert!(view.categories.is_empty());
    }

    #[tokio::test]
    async fn test_creation_failure_leaves_form_and_entry_open() {
        let (store, loader) = setup();
        store.inject_failure(StoreCall::CreateCategory).unwrap();

        let original = CategoryId::new();
        let mut view = AggregateView::default();
        let mut coord = CategoryCoordinator::new(TestForm {
            label: "Groceries budget".into(),
            category_id: Some(original),
        });

        coord.select(CategorySelection::CreateNew);
        coord.set_pending_name("Pets");
        let err = coord
            .confirm_new_category(&loader, &mut view)
            .await
            .unwrap_err();

        assert!(matches!(err, TrackerError::CategoryCreationFailed(_)));
        assert_eq!(coord.form().category_id(), Some(original));
        assert_eq!(coord.form().label, "Groceries budget");
        assert!(coord.is_creating());
        assert_eq!(coord.pending_name(), Some("Pets"));
    }

    #[tokio::test]
    async fn test_reload_failure_is_reported_after_binding() {
        let (store, loader) = setup();
        store.inject_failure(StoreCall::ListGoals).unwrap();

        let mut view = AggregateView::default();
        let mut coord = CategoryCoordinator::new(TestForm::default());
        coord.select(CategorySelection::CreateNew);
        coord.set_pending_name("Pets");

        let err = coord
            .confirm_new_category(&loader, &mut view)
            .await
            .unwrap_err();

        assert!(matches!(err, TrackerError::AggregateLoadFailed(_)));
        assert!(matches!(
            view.error,
            Some(TrackerError::AggregateLoadFailed(_))
        ));
        assert!(view.categories.is_empty());

        // The category exists, so the form keeps it and a retry creates nothing
        let bound = coord.form().category_id().unwrap();
        assert!(!coord.is_creating());
        assert_eq!(coord.confirm_new_category(&loader, &mut view).await.unwrap(), None);

        store.restore(StoreCall::ListGoals).unwrap();
        loader.refresh(&mut view).await.unwrap();
        assert_eq!(view.find_category(bound).unwrap().name, "Pets");
    }

    #[tokio::test]
    async fn test_coordinators_are_independent() {
        let (_store, loader) = setup();
        let mut view = AggregateView::default();
        let mut budget = CategoryCoordinator::new(TestForm::default());
        let mut goal = CategoryCoordinator::new(TestForm::default());

        budget.select(CategorySelection::CreateNew);
        budget.set_pending_name("Pets");
        goal.select(CategorySelection::CreateNew);
        goal.set_pending_name("Gifts");

        let id = budget
            .confirm_new_category(&loader, &mut view)
            .await
            .unwrap();

        assert_eq!(budget.form().category_id(), id);
        assert_eq!(goal.form().category_id(), None);
        assert_eq!(goal.pending_name(), Some("Gifts"));
    }
}
