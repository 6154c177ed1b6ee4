mod add_task_modal;
mod date_picker;
mod main_content;
mod navbar;
mod sidebar;
mod task_card;
mod toaster;

pub use add_task_modal::AddTaskModal;
pub use date_picker::DatePickerField;
pub use main_content::MainContent;
pub use navbar::Navbar;
pub use sidebar::Sidebar;
pub use task_card::TaskCard;
pub use toaster::Toaster;
