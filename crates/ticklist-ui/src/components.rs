mod add_task_form;
mod task_list;
mod task_row;

pub use add_task_form::AddTaskForm;
pub use task_list::TaskList;
pub use task_row::TaskRow;
