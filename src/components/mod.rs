//! UI Components
//!
//! Reusable Leptos components.

mod amount_input;
mod bill_item_list;
mod delete_confirm_button;
mod error_banner;
mod new_item_form;
mod people_column;
mod summary_panel;
mod tax_tip_form;

pub use amount_input::AmountInput;
pub use bill_item_list::BillItemList;
pub use delete_confirm_button::DeleteConfirmButton;
pub use error_banner::ErrorBanner;
pub use new_item_form::NewItemForm;
pub use people_column::PeopleColumn;
pub use summary_panel::SummaryPanel;
pub use tax_tip_form::TaxTipForm;
