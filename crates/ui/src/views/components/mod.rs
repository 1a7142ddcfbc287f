mod capacity_bar;
mod pending_tasks;
mod profile_card;
mod quick_add;
mod task_card;
mod toasts;
mod weekly_goals;

pub use capacity_bar::CapacityBar;
pub use pending_tasks::PendingTasks;
pub use profile_card::ProfileCard;
pub use quick_add::QuickAddBar;
pub use task_card::TaskCard;
pub use toasts::Toasts;
pub use weekly_goals::WeeklyGoals;
