///! Satellite selector
///!
///! - `SatSelector`: category tables, active category, activation callbacks
///! - `DisplaySurface`: the list widget the selector drives
///! - `ListView`: in-memory surface with live search, used by the CLI

mod sort;
pub use sort::{ascii_casecmp, compare_by_name};

mod surface;
pub use surface::DisplaySurface;

mod list_view;
pub use list_view::{ListView, RenderedRow, SUGGEST_THRESHOLD};

#[allow(clippy::module_inception)]
mod selector;
pub use selector::{SatSelector, SubscriptionId};
