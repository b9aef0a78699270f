use std::sync::Arc;

use tahfeez_core::{AppResult, Locale};
use tahfeez_domain::{PaginationControls, Resource, ResourceDraft, ResourceFilter};
use tracing::{debug, warn};

use crate::error_messages::user_facing_message;
use crate::resource_api::{ListPage, RecordAction, ResourceApi};
use crate::ui_ports::{Confirmation, Notifier};

mod state;

pub use state::{CommandOutcome, FetchTicket, ListState, ListView, ModalMode, ModalState};

/// State and commands of one list/filter/paginate/mutate page.
///
/// Every state change goes through a command; callers only read
/// [`ListController::state`].
pub struct ListController<R: Resource> {
    api: ResourceApi<R>,
    notifier: Arc<dyn Notifier>,
    confirmation: Arc<dyn Confirmation>,
    state: ListState<R>,
    generation: u64,
}

impl<R: Resource> ListController<R> {
    /// Creates a controller using the resource's default page size.
    #[must_use]
    pub fn new(
        api: ResourceApi<R>,
        notifier: Arc<dyn Notifier>,
        confirmation: Arc<dyn Confirmation>,
    ) -> Self {
        Self {
            api,
            notifier,
            confirmation,
            state: ListState::new(R::DEFAULT_PER_PAGE),
            generation: 0,
        }
    }

    /// Overrides the page size before mounting.
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.state.per_page = per_page.max(1);
        self
    }

    /// Sets initial filters without fetching.
    #[must_use]
    pub fn with_filters(mut self, filters: R::Filter) -> Self {
        self.state.filters = filters;
        self
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &ListState<R> {
        &self.state
    }

    /// Returns the API this controller sends through.
    #[must_use]
    pub fn api(&self) -> &ResourceApi<R> {
        &self.api
    }

    fn locale(&self) -> Locale {
        self.api.gateway().locale()
    }

    /// Performs the initial fetch.
    pub async fn mount(&mut self) -> AppResult<()> {
        self.refresh().await
    }

    /// Replaces the filters, resets to the first page and fetches.
    pub async fn set_filters(&mut self, filters: R::Filter) -> AppResult<()> {
        self.state.filters = filters;
        self.state.page = 1;
        self.refresh().await
    }

    /// Replaces only the free-text search term.
    pub async fn set_search(&mut self, search: Option<String>) -> AppResult<()> {
        let filters = self.state.filters.clone().with_search(search);
        self.set_filters(filters).await
    }

    /// Moves to a page, clamped to the known page range.
    pub async fn set_page(&mut self, page: u32) -> AppResult<()> {
        let last_page = self
            .state
            .pagination
            .map_or(u32::MAX, |pagination| pagination.total_pages.max(1));
        self.state.page = page.clamp(1, last_page);
        self.refresh().await
    }

    /// Moves to the next page.
    pub async fn next_page(&mut self) -> AppResult<()> {
        self.set_page(self.state.page.saturating_add(1)).await
    }

    /// Moves to the previous page.
    pub async fn previous_page(&mut self) -> AppResult<()> {
        self.set_page(self.state.page.saturating_sub(1)).await
    }

    /// Refetches the current filters and page.
    pub async fn refresh(&mut self) -> AppResult<()> {
        let ticket = self.begin_fetch();
        let result = self.fetch(&ticket).await;
        self.apply_fetch(ticket, result).map(|_| ())
    }

    /// Starts a fetch and supersedes every fetch started before it.
    pub fn begin_fetch(&mut self) -> FetchTicket<R::Filter> {
        self.generation += 1;
        self.state.loading = true;
        FetchTicket {
            generation: self.generation,
            filters: self.state.filters.clone(),
            page: self.state.page_request(),
        }
    }

    /// Runs the request described by a ticket without touching the state.
    pub async fn fetch(&self, ticket: &FetchTicket<R::Filter>) -> AppResult<ListPage<R>> {
        self.api.list(&ticket.filters, ticket.page).await
    }

    /// Writes a fetch result into the state unless a newer fetch has started.
    ///
    /// Returns `Ok(false)` when the result was discarded as stale. On failure
    /// the previous items stay in place.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket<R::Filter>,
        result: AppResult<ListPage<R>>,
    ) -> AppResult<bool> {
        if ticket.generation != self.generation {
            debug!(
                resource = R::PATH,
                generation = ticket.generation,
                latest = self.generation,
                "discarding stale list response"
            );
            return Ok(false);
        }

        self.state.loading = false;
        match result {
            Ok(page) => {
                self.state.items = page.items;
                self.state.pagination = Some(page.pagination);
                self.state.error = None;
                Ok(true)
            }
            Err(error) => {
                warn!(resource = R::PATH, error = %error, "list fetch failed");
                self.state.error = Some(user_facing_message(&error, self.locale()));
                Err(error)
            }
        }
    }

    /// Opens an empty create form.
    pub fn open_create(&mut self) {
        self.state.modal = ModalState {
            open: true,
            mode: ModalMode::Create,
            draft: R::Draft::default(),
            error: None,
        };
    }

    /// Opens the edit form seeded from a record.
    pub fn open_edit(&mut self, record: &R) {
        self.state.modal = ModalState {
            open: true,
            mode: ModalMode::Edit(record.id()),
            draft: <R::Draft as ResourceDraft<R>>::from_record(record),
            error: None,
        };
    }

    /// Applies a change to the open form.
    pub fn edit_draft(&mut self, edit: impl FnOnce(&mut R::Draft)) {
        if self.state.modal.open {
            edit(&mut self.state.modal.draft);
        }
    }

    /// Closes the form and discards the draft.
    pub fn close_modal(&mut self) {
        self.state.modal = ModalState::default();
    }

    /// Validates and submits the open form.
    ///
    /// A draft failing local validation is never sent. On server failure the
    /// modal stays open with the draft intact and the message is alerted.
    pub async fn submit(&mut self) -> AppResult<CommandOutcome> {
        if !self.state.modal.open || self.state.is_submitting {
            return Ok(CommandOutcome::Ignored);
        }

        let mode = self.state.modal.mode;
        if let Err(error) = self.state.modal.draft.validate(mode.draft_mode()) {
            self.state.modal.error = Some(user_facing_message(&error, self.locale()));
            return Err(error);
        }

        self.state.is_submitting = true;
        self.state.modal.error = None;
        let draft = self.state.modal.draft.clone();
        let result = match mode {
            ModalMode::Create => self.api.create(draft).await,
            ModalMode::Edit(id) => self.api.update(id, draft).await,
        };
        self.state.is_submitting = false;

        match result {
            Ok(_) => {
                self.close_modal();
                self.refetch_after_mutation().await;
                Ok(CommandOutcome::Completed)
            }
            Err(error) => {
                let message = user_facing_message(&error, self.locale());
                self.state.modal.error = Some(message.clone());
                self.notifier.alert(&message).await;
                Err(error)
            }
        }
    }

    /// Deletes a record after the user confirms.
    pub async fn delete(&mut self, id: u64) -> AppResult<CommandOutcome> {
        if self.state.processing_id.is_some() {
            return Ok(CommandOutcome::Ignored);
        }

        let prompt = self.delete_prompt(id);
        if !self.confirmation.confirm(&prompt).await {
            return Ok(CommandOutcome::Cancelled);
        }

        self.state.processing_id = Some(id);
        let result = self.api.delete(id).await;
        self.state.processing_id = None;

        match result {
            Ok(()) => {
                self.refetch_after_mutation().await;
                Ok(CommandOutcome::Completed)
            }
            Err(error) => {
                self.alert(&error).await;
                Err(error)
            }
        }
    }

    /// Runs a workflow action, confirming first when the action asks for it.
    pub async fn perform(&mut self, id: u64, action: RecordAction) -> AppResult<CommandOutcome> {
        if self.state.processing_id.is_some() {
            return Ok(CommandOutcome::Ignored);
        }

        if let Err(error) = action.validate() {
            self.alert(&error).await;
            return Err(error);
        }

        if let Some(prompt) = action.confirmation_prompt(self.locale())
            && !self.confirmation.confirm(prompt).await
        {
            return Ok(CommandOutcome::Cancelled);
        }

        self.state.processing_id = Some(id);
        let result = self.api.perform(id, &action).await;
        self.state.processing_id = None;

        match result {
            Ok(_) => {
                self.refetch_after_mutation().await;
                Ok(CommandOutcome::Completed)
            }
            Err(error) => {
                self.alert(&error).await;
                Err(error)
            }
        }
    }

    /// Returns what the page should render.
    #[must_use]
    pub fn view(&self) -> ListView<'_, R> {
        if self.state.loading {
            return ListView::Loading;
        }
        if self.state.items.is_empty() {
            return ListView::Empty {
                filtered: self.state.filters.is_active(),
            };
        }

        ListView::Items(&self.state.items)
    }

    /// Returns the pagination controls for the last loaded page.
    #[must_use]
    pub fn controls(&self) -> PaginationControls {
        self.state
            .pagination
            .map_or_else(PaginationControls::hidden, |pagination| {
                pagination.controls()
            })
    }

    fn delete_prompt(&self, id: u64) -> String {
        let locale = self.locale();
        let name = self
            .state
            .items
            .iter()
            .find(|item| item.id() == id)
            .map(|item| item.display_name(locale))
            .filter(|name| !name.trim().is_empty());

        match (name, locale) {
            (Some(name), Locale::Ar) => format!("هل أنت متأكد من حذف \"{name}\"؟"),
            (Some(name), Locale::En) => format!("Are you sure you want to delete \"{name}\"?"),
            (None, Locale::Ar) => "هل أنت متأكد من الحذف؟".to_owned(),
            (None, Locale::En) => "Are you sure you want to delete this item?".to_owned(),
        }
    }

    async fn alert(&self, error: &tahfeez_core::AppError) {
        let message = user_facing_message(error, self.locale());
        self.notifier.alert(&message).await;
    }

    async fn refetch_after_mutation(&mut self) {
        if let Err(error) = self.refresh().await {
            warn!(
                resource = R::PATH,
                error = %error,
                "refetch after mutation failed"
            );
        }
    }
}
