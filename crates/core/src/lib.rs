#![forbid(unsafe_code)]

pub mod model;
pub mod quick_add;
pub mod review;
pub mod summary;
pub mod time;

pub use time::{Clock, Greeting};
