//! Umbrella crate for the Alma SRU record lookup.
//!
//! This crate stitches together CQL query construction and the SRU
//! collaborators so callers can go from search criteria to a bibliographic
//! record with a single call.

pub use cql::{
    build, encode, Clock, CqlQuery, FixedClock, SearchCriteria, SystemClock, RECENCY_WINDOW_YEARS,
};
pub use sru::{
    AlmaRecord, ExtractionError, FetchError, HttpRecordFetcher, MarcXmlExtractor, RecordExtractor,
    RecordFetcher, SruEndpoint,
};

pub use async_trait::async_trait;

use std::error::Error;
use std::fmt;
use std::time::Instant;

use tracing::{debug, warn};

/// Errors that can occur after a query has been built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    Fetch(FetchError),
    Extract(ExtractionError),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Fetch(err) => write!(f, "fetch failure: {err}"),
            LookupError::Extract(err) => write!(f, "extraction failure: {err}"),
        }
    }
}

impl Error for LookupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LookupError::Fetch(err) => Some(err),
            LookupError::Extract(err) => Some(err),
        }
    }
}

impl From<FetchError> for LookupError {
    fn from(value: FetchError) -> Self {
        LookupError::Fetch(value)
    }
}

impl From<ExtractionError> for LookupError {
    fn from(value: ExtractionError) -> Self {
        LookupError::Extract(value)
    }
}

/// Fetch the records matching `query` and extract the first one.
///
/// Single shot: a transport or extraction failure is returned as-is, nothing
/// is retried.
pub async fn lookup_record<F, E>(
    fetcher: &F,
    extractor: &E,
    query: &CqlQuery,
) -> Result<AlmaRecord, LookupError>
where
    F: RecordFetcher + ?Sized,
    E: RecordExtractor + ?Sized,
{
    let start = Instant::now();

    let payload = fetcher.fetch(query.encoded()).await.inspect_err(|err| {
        warn!(error = %err, query = %query, "record fetch failed");
    })?;
    let fetched_ms = start.elapsed().as_millis() as u64;

    let record = extractor.extract(&payload).inspect_err(|err| {
        warn!(error = %err, query = %query, "record extraction failed");
    })?;

    debug!(
        query = %query,
        fetch_ms = fetched_ms,
        total_ms = start.elapsed().as_millis() as u64,
        "record lookup complete"
    );
    Ok(record)
}
