mod ids;
mod project;
mod session;
mod task;
mod tiers;
mod user;

pub use ids::{ProfileId, ProjectId, TaskId, UserId};

pub use project::{NewProject, Project, Trend, attach_tasks, flatten_tasks, projects_of_user};
pub use session::{
    PERSISTENCE_COOKIE, Session, SessionPersistence, TOKEN_COOKIE, bearer_header,
    clear_persistence_cookie, clear_session_cookie, parse_bearer, persistence_cookie,
    persistence_from_cookies, session_cookie, token_from_cookies,
};
pub use task::{
    Difficulty, EodOutcome, MiddayStatus, NewTask, PendingTask, Task, TaskStatus,
};
pub use tiers::{Effort, Priority, TierError};
pub use user::{MIN_PASSWORD_LEN, Profile, Role, User, UserError, UserForm, filter_by_role};
