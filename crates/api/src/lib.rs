#![forbid(unsafe_code)]

pub mod client;
pub mod http;
pub mod memory;

pub use client::{ApiError, CourseApi, ProgressApi, SubchapterBundle};
pub use http::{HttpApi, HttpApiConfig};
pub use memory::InMemoryApi;
