pub mod api;
pub mod documents;

mod status;
pub use status::Status;

mod tracing;
pub use crate::tracing::Tracing;
