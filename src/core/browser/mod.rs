//! Catalog list browsing: the pure state record and the controller that
//! feeds it from the catalog service.

pub mod controller;
pub mod state;

pub use controller::{
    not_found_message, BrowserController, BrowserEvent, Dispatch, LoadStatus, LOAD_FAILED_MESSAGE,
};
pub use state::{filter_by_name, page_window, BrowseMode, BrowserState, FetchPlan};
