use tahfeez_core::{AppError, AppResult, Locale};
use tahfeez_domain::{Resource, Student, Teacher};

/// Gap in pixels between the anchor and the dropdown.
pub const POPUP_GAP: f64 = 4.0;

/// Record selectable from a searchable dropdown.
pub trait PickerOption: Clone + Send + Sync {
    /// Returns the identifier submitted with the form.
    fn option_id(&self) -> u64;

    /// Returns the main label.
    fn option_label(&self) -> String;

    /// Returns secondary text shown under the label and matched by search.
    fn option_detail(&self) -> Option<String> {
        None
    }
}

impl PickerOption for Teacher {
    fn option_id(&self) -> u64 {
        self.id
    }

    fn option_label(&self) -> String {
        self.display_name(Locale::Ar)
    }

    fn option_detail(&self) -> Option<String> {
        self.email.clone()
    }
}

impl PickerOption for Student {
    fn option_id(&self) -> u64 {
        self.id
    }

    fn option_label(&self) -> String {
        self.display_name(Locale::Ar)
    }

    fn option_detail(&self) -> Option<String> {
        self.email.clone().or_else(|| self.phone.clone())
    }
}

/// Dropdown with a client-side text filter over a fully loaded option list.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchablePicker<T> {
    label: String,
    options: Vec<T>,
    selected_id: Option<u64>,
    query: String,
    open: bool,
    required: bool,
}

impl<T: PickerOption> SearchablePicker<T> {
    /// Creates a closed picker with nothing selected.
    #[must_use]
    pub fn new(label: impl Into<String>, options: Vec<T>, required: bool) -> Self {
        Self {
            label: label.into(),
            options,
            selected_id: None,
            query: String::new(),
            open: false,
            required,
        }
    }

    /// Replaces the options, dropping a selection that no longer exists.
    pub fn set_options(&mut self, options: Vec<T>) {
        self.options = options;
        if let Some(id) = self.selected_id
            && !self.options.iter().any(|option| option.option_id() == id)
        {
            self.selected_id = None;
        }
    }

    /// Returns whether the dropdown is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns the current search text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the selected identifier.
    #[must_use]
    pub fn selected_id(&self) -> Option<u64> {
        self.selected_id
    }

    /// Returns the selected option.
    #[must_use]
    pub fn selected(&self) -> Option<&T> {
        let id = self.selected_id?;
        self.options.iter().find(|option| option.option_id() == id)
    }

    /// Pre-selects an option, e.g. when an edit form opens.
    pub fn preselect(&mut self, id: Option<u64>) {
        self.selected_id =
            id.filter(|id| self.options.iter().any(|option| option.option_id() == *id));
    }

    /// Returns the options matching the search text.
    #[must_use]
    pub fn visible_options(&self) -> Vec<&T> {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return self.options.iter().collect();
        }

        self.options
            .iter()
            .filter(|option| {
                option.option_label().to_lowercase().contains(&needle)
                    || option
                        .option_detail()
                        .is_some_and(|detail| detail.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Opens or closes the dropdown.
    pub fn toggle(&mut self) {
        if self.open {
            self.dismiss();
        } else {
            self.open = true;
        }
    }

    /// Opens the dropdown.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the dropdown and clears the search, as a click outside does.
    pub fn dismiss(&mut self) {
        self.open = false;
        self.query.clear();
    }

    /// Updates the search text and opens the dropdown.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.open = true;
    }

    /// Selects an option; unknown identifiers are ignored.
    ///
    /// Returns whether the selection changed.
    pub fn select(&mut self, id: u64) -> bool {
        if !self.options.iter().any(|option| option.option_id() == id) {
            return false;
        }

        self.selected_id = Some(id);
        self.dismiss();
        true
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.selected_id = None;
        self.query.clear();
    }

    /// Enforces the required flag.
    pub fn validate(&self) -> AppResult<()> {
        if self.required && self.selected().is_none() {
            return Err(AppError::Validation(format!("يرجى اختيار {}", self.label)));
        }

        Ok(())
    }
}

/// Viewport rectangle of the element the dropdown is attached to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorRect {
    /// Distance from the viewport top to the anchor's top edge.
    pub top: f64,
    /// Distance from the viewport top to the anchor's bottom edge.
    pub bottom: f64,
    /// Distance from the viewport left edge.
    pub left: f64,
    /// Anchor width; the dropdown matches it.
    pub width: f64,
}

/// Viewport coordinates of a dropdown rendered outside its container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupPlacement {
    /// Distance from the viewport top.
    pub top: f64,
    /// Distance from the viewport left edge.
    pub left: f64,
    /// Dropdown width.
    pub width: f64,
    /// Height available to the dropdown.
    pub max_height: f64,
    /// Whether the dropdown opens above the anchor.
    pub above: bool,
}

/// Places a dropdown below its anchor when it fits, otherwise on the side
/// with more room, clamped to the viewport.
#[must_use]
pub fn popup_placement(
    anchor: AnchorRect,
    viewport_height: f64,
    max_height: f64,
) -> PopupPlacement {
    let space_below = (viewport_height - anchor.bottom - POPUP_GAP).max(0.0);
    let space_above = (anchor.top - POPUP_GAP).max(0.0);
    let above = space_below < max_height && space_above > space_below;

    if above {
        let height = max_height.min(space_above);
        PopupPlacement {
            top: (anchor.top - POPUP_GAP - height).max(0.0),
            left: anchor.left,
            width: anchor.width,
            max_height: height,
            above: true,
        }
    } else {
        PopupPlacement {
            top: (anchor.bottom + POPUP_GAP).min(viewport_height),
            left: anchor.left,
            width: anchor.width,
            max_height: max_height.min(space_below),
            above: false,
        }
    }
}
