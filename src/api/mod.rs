mod catalog;
mod fallback;
mod transport;

pub use catalog::CatalogApi;
pub use fallback::fallback_games;
pub use transport::{CallbackTransport, DirectTransport, Transport};
