mod auth;
mod components;
mod dashboard;
mod state;
mod today;
mod users;

pub use auth::AuthView;
pub use dashboard::DashboardView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use today::TodayView;
pub use users::UsersView;

pub(crate) use components::Toasts;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
