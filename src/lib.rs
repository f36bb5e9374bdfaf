//! Concurrent batch HTTP request executor.
//!
//! Callers describe a batch as a [`RequestSet`] of named [`Request`]s. The
//! [`Executor`] sends all of them concurrently, one task per request, and
//! returns a [`ResponseSet`] once every request has finished. Failures never
//! abort a batch: encoding, transport and status-code errors are recorded on
//! the [`Response`] of the request they concern.
//!
//! ```no_run
//! use volley::{Executor, ExecutorConfig, Method, Request, RequestSet};
//!
//! # async fn run() -> volley::error::AppResult<()> {
//! let mut requests = RequestSet::new();
//! let mut users = Request::new("users", Method::Get, "http://localhost:8080/users");
//! users.add_query("page", "1");
//! requests.add_request(users);
//!
//! let executor = Executor::new(ExecutorConfig::default().with_max_body_size(1 << 20))?;
//! let responses = executor.exec(&requests).await;
//! if let Some(users) = responses.get_response("users") {
//!     if users.is_ok() {
//!         let _body = users.body().await;
//!     }
//! }
//! responses.close_all().await;
//! # Ok(())
//! # }
//! ```
pub mod config;
pub mod error;
pub mod executor;
pub mod logger;
pub mod request;
pub mod response;
pub mod transport;

pub use config::{ExecutorConfig, TransportConfig};
pub use executor::{BatchTimings, Executor, RequestTimings};
pub use request::{Method, Request, RequestSet};
pub use response::{Response, ResponseSet};
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};
