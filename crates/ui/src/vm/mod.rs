mod task_vm;
mod time_fmt;
mod user_vm;

pub use task_vm::{CardPanelsVm, PendingTaskVm, TaskCardVm, map_pending, map_task_cards};
pub use time_fmt::{format_date, format_joined};
pub use user_vm::{UserRowVm, map_user_rows};
