mod app;
mod config;
mod request;
mod transport;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use request::{CloseError, EncodingError, RequestError};
pub use transport::TransportError;
