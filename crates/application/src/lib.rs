//! Admin and website state management over the academy REST API.

#![forbid(unsafe_code)]

mod admin_store;
mod api_ports;
mod auth_api;
mod dashboard_api;
mod error_messages;
mod list_controller;
mod picker;
mod resource_api;
mod salary_api;
mod slice;
mod ui_ports;
mod website_api;
mod website_store;

#[cfg(test)]
mod test_support;

pub use admin_store::{AdminStore, DASHBOARD_PANEL_SIZE, DashboardState, OPTIONS_PAGE_SIZE};
pub use api_ports::{ApiGateway, ApiMethod, ApiRequest, ApiTransport};
pub use auth_api::AuthApi;
pub use dashboard_api::DashboardApi;
pub use error_messages::user_facing_message;
pub use list_controller::{
    CommandOutcome, FetchTicket, ListController, ListState, ListView, ModalMode, ModalState,
};
pub use picker::{
    AnchorRect, POPUP_GAP, PickerOption, PopupPlacement, SearchablePicker, popup_placement,
};
pub use resource_api::{ListPage, METHOD_OVERRIDE_FIELD, RecordAction, ResourceApi};
pub use salary_api::SalaryApi;
pub use slice::Slice;
pub use ui_ports::{
    Confirmation, LOCALE_STORAGE_KEY, Notifier, SESSION_STORAGE_KEY, SessionStorage,
};
pub use website_api::WebsiteApi;
pub use website_store::{HomeContent, RegistrationState, WebsiteStore};
