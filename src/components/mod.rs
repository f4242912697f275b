//! UI Components
//!
//! Leptos components for the admin screens.

mod assign_areas;
mod confirmation_modal;
mod curso_picker;
mod login_page;
mod toaster;

pub use assign_areas::AssignAreasCard;
pub use curso_picker::CursoPicker;
pub use login_page::LoginPage;
pub use toaster::{show_toast, Toaster};
