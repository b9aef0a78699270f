use tahfeez_domain::{DraftMode, PageRequest, Pagination, Resource};

/// Whether the form modal creates a record or edits one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    /// New record.
    Create,
    /// Existing record with this identifier.
    Edit(u64),
}

impl ModalMode {
    /// Returns the matching validation mode.
    #[must_use]
    pub fn draft_mode(&self) -> DraftMode {
        match self {
            Self::Create => DraftMode::Create,
            Self::Edit(_) => DraftMode::Edit,
        }
    }
}

/// Create/edit modal of a list page.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalState<D> {
    /// Whether the modal is shown.
    pub open: bool,
    /// Create or edit.
    pub mode: ModalMode,
    /// Form values being edited.
    pub draft: D,
    /// Message of the last failed submit.
    pub error: Option<String>,
}

impl<D: Default> Default for ModalState<D> {
    fn default() -> Self {
        Self {
            open: false,
            mode: ModalMode::Create,
            draft: D::default(),
            error: None,
        }
    }
}

/// Complete state of one list page.
#[derive(Debug, Clone)]
pub struct ListState<R: Resource> {
    /// Records of the current page.
    pub items: Vec<R>,
    /// Pagination of the last successful fetch.
    pub pagination: Option<Pagination>,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Message of the last failed fetch.
    pub error: Option<String>,
    /// Current filters.
    pub filters: R::Filter,
    /// Requested one-based page.
    pub page: u32,
    /// Requested page size.
    pub per_page: u32,
    /// Create/edit modal.
    pub modal: ModalState<R::Draft>,
    /// Whether the modal form is being submitted.
    pub is_submitting: bool,
    /// Record whose delete or workflow action is in flight.
    pub processing_id: Option<u64>,
}

impl<R: Resource> ListState<R> {
    pub(super) fn new(per_page: u32) -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
            loading: false,
            error: None,
            filters: R::Filter::default(),
            page: 1,
            per_page: per_page.max(1),
            modal: ModalState::default(),
            is_submitting: false,
            processing_id: None,
        }
    }

    /// Returns the request for the current page.
    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }

    /// Returns whether a delete or action is in flight for `id`.
    #[must_use]
    pub fn is_processing(&self, id: u64) -> bool {
        self.processing_id == Some(id)
    }
}

/// What a list page renders.
#[derive(Debug, PartialEq)]
pub enum ListView<'a, R> {
    /// Spinner; hides both the table and the empty state.
    Loading,
    /// No records; `filtered` tells "no results for this filter" apart from
    /// "nothing created yet".
    Empty {
        /// Whether any filter is active.
        filtered: bool,
    },
    /// Table rows.
    Items(&'a [R]),
}

/// Result of a mutating command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The request succeeded and the list was refetched.
    Completed,
    /// The user declined the confirmation; nothing was sent.
    Cancelled,
    /// Refused because another submit or action is in flight.
    Ignored,
}

/// Claim on the list state taken when a fetch starts.
///
/// Only the most recent ticket may write its response into the state.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket<F> {
    pub(super) generation: u64,
    pub(super) filters: F,
    pub(super) page: PageRequest,
}

impl<F> FetchTicket<F> {
    /// Returns the generation number of this fetch.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the page requested by this fetch.
    #[must_use]
    pub fn page(&self) -> PageRequest {
        self.page
    }
}
