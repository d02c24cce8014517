//! Alma Record Server - HTTP front for the Alma SRU record lookup
//!
//! Given a person's authority identifier (`scn`) and display name
//! (`creatorName`), looks up the matching bibliographic record in the Alma
//! union catalog and answers with its title.
//!
//! # Features
//!
//! - **Validation**: Missing parameters are reported precisely with HTTP 400
//! - **Envelope**: Every outcome is a `{statusCode, headers, body}` envelope with a JSON body
//! - **CORS**: Optional `Access-Control-Allow-Origin` from configuration
//! - **Configuration**: Environment variable and file-based configuration
//! - **Graceful Shutdown**: Proper signal handling for production deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /alma?scn=..&creatorName=..` - Record lookup
//! - `POST /invoke` - Record lookup from a raw gateway event, answered with the envelope as JSON

pub mod config;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod validate;

pub use config::AppConfig;
pub use envelope::GatewayResponse;
pub use error::{ServerError, ServerResult};
pub use handler::RecordHandler;
pub use server::{build_router, start_server};
pub use state::ServerState;
pub use validate::{validate, ValidRequest, ValidationError};
