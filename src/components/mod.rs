//! UI Components
//!
//! Leptos components for the task list.

mod placeholders;
mod task_input;
mod task_item;
mod task_list;
mod task_stats;
mod toaster;

pub use placeholders::{EmptyState, ErrorState, LoadingState};
pub use task_input::TaskInput;
pub use task_item::TaskItem;
pub use task_list::TaskList;
pub use task_stats::TaskStats;
pub use toaster::Toaster;
