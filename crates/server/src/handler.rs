//! Request orchestration.
//!
//! ```text
//! Start ──validate──▶ Validated ──build──▶ QueryBuilt ──fetch──▶ Fetched ──extract──▶ Extracted
//!   │                                          │                    │                    │
//!   └─ 400 ◀───────────────────────────────────┴─ 500 ◀─────────────┴─ 500               └─ 200
//! ```
//!
//! Every path ends in a [`GatewayResponse`]; nothing propagates past
//! [`RecordHandler::handle_request`].

use std::sync::Arc;
use std::time::Instant;

use alma_record::{
    lookup_record, AlmaRecord, Clock, CqlQuery, RecordExtractor, RecordFetcher, SearchCriteria,
    SystemClock,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::envelope::GatewayResponse;
use crate::error::{ServerError, ServerResult};
use crate::validate::{validate, ValidRequest};

/// Answers one lookup request at a time; cheap to clone and share.
#[derive(Clone)]
pub struct RecordHandler {
    config: Arc<AppConfig>,
    fetcher: Arc<dyn RecordFetcher>,
    extractor: Arc<dyn RecordExtractor>,
    clock: Arc<dyn Clock>,
}

impl RecordHandler {
    pub fn new(
        config: Arc<AppConfig>,
        fetcher: Arc<dyn RecordFetcher>,
        extractor: Arc<dyn RecordExtractor>,
    ) -> Self {
        Self {
            config,
            fetcher,
            extractor,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the date source used for the recency window.
    pub fn with_clock(self, clock: Arc<dyn Clock>) -> Self {
        Self { clock, ..self }
    }

    pub fn config(&self) -> &Arc<AppConfig> {
        &self.config
    }

    /// Run one lookup. `_context` carries caller identity and is not used.
    pub async fn handle_request(
        &self,
        event: Option<&Value>,
        _context: Option<&Value>,
    ) -> GatewayResponse {
        let start = Instant::now();
        let outcome = self.lookup(event).await;
        let cors_origin = self.config.cors_origin();

        match outcome {
            Ok(record) => {
                info!(
                    status = 200,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "record lookup succeeded"
                );
                GatewayResponse::success(&record, cors_origin)
            }
            Err(err) => {
                let status = err.status_code();
                warn!(
                    status = status.as_u16(),
                    error = %err,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "record lookup failed"
                );
                err.into_gateway_response(cors_origin)
            }
        }
    }

    async fn lookup(&self, event: Option<&Value>) -> ServerResult<AlmaRecord> {
        let request = validate(event)?;
        let query = CqlQuery::new(&search_criteria(&request), self.clock.today());
        if query.is_empty() {
            return Err(ServerError::Internal("built an empty CQL query".into()));
        }

        info!(scn = %request.scn, query = %query, "looking up Alma record");
        let record =
            lookup_record(self.fetcher.as_ref(), self.extractor.as_ref(), &query).await?;
        Ok(record)
    }
}

/// Criteria for a validated request: both identity fields, last 41 years, newest first.
pub fn search_criteria(request: &ValidRequest) -> SearchCriteria {
    SearchCriteria::for_person(
        Some(request.scn.as_str()),
        Some(request.creator_name.as_str()),
    )
    .with_recency_filter(true)
    .with_sorting(true)
}
