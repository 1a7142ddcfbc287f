//! Backend contract for the task board and its adapters.

pub mod config;
pub mod http;
pub mod memory;
pub mod repository;

pub use config::ApiConfig;
pub use http::HttpBackend;
pub use memory::InMemoryBackend;
pub use repository::{
    AuthApi, AuthToken, Backend, BackendError, Credentials, ProfileApi, ProfileUpdate,
    ProjectApi, TaskApi, TaskDetails, TaskPatch, UserApi,
};
