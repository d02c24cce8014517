use crate::config::AppConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::RecordHandler;
use alma_record::{HttpRecordFetcher, MarcXmlExtractor, SruEndpoint};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<AppConfig>,

    /// Lookup handler (shared across requests)
    pub handler: RecordHandler,
}

impl ServerState {
    /// Create new server state talking to the configured SRU endpoint
    pub fn new(config: AppConfig) -> ServerResult<Self> {
        let config = Arc::new(config);
        let endpoint = SruEndpoint::new(config.sru_base_url());
        let fetcher = HttpRecordFetcher::new(endpoint, config.fetch_timeout())
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let handler = RecordHandler::new(
            config.clone(),
            Arc::new(fetcher),
            Arc::new(MarcXmlExtractor),
        );

        Ok(Self { config, handler })
    }

    /// State around an already assembled handler, sharing its configuration
    pub fn with_handler(handler: RecordHandler) -> Self {
        Self {
            config: Arc::clone(handler.config()),
            handler,
        }
    }

    pub fn cors_origin(&self) -> Option<&str> {
        self.config.cors_origin()
    }
}
