//! UI Components

mod task_card;
mod day_column;
mod week_board;
mod day_view;
mod add_task_form;

pub use task_card::TaskCard;
pub use day_column::DayColumn;
pub use week_board::WeekBoard;
pub use day_view::DayView;
pub use add_task_form::AddTaskForm;
