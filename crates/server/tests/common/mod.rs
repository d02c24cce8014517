#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use alma_record::{
    async_trait, AlmaRecord, ExtractionError, FetchError, FixedClock, MarcXmlExtractor,
    RecordExtractor, RecordFetcher,
};
use chrono::NaiveDate;
use server::{AppConfig, RecordHandler};

pub const SRU_RESPONSE_2_HITS: &str = include_str!("../fixtures/sru_response_2_hits.xml");
pub const SRU_RESPONSE_0_HITS: &str = include_str!("../fixtures/sru_response_0_hits.xml");
pub const ALLOWED_ORIGIN: &str = "https://frontend.example.org";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 5, 17).unwrap()
}

/// Fetcher answering every call with the same outcome and recording the queries it saw.
pub struct StubFetcher {
    outcome: Result<String, FetchError>,
    seen: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn ok(payload: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(payload.to_owned()),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: FetchError) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(err),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordFetcher for StubFetcher {
    async fn fetch(&self, encoded_query: &str) -> Result<String, FetchError> {
        self.seen.lock().unwrap().push(encoded_query.to_owned());
        self.outcome.clone()
    }
}

pub struct FailingExtractor(pub ExtractionError);

impl RecordExtractor for FailingExtractor {
    fn extract(&self, _payload: &str) -> Result<AlmaRecord, ExtractionError> {
        Err(self.0.clone())
    }
}

pub fn config(allowed_origin: Option<&str>) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        allowed_origin: allowed_origin.map(str::to_owned),
        ..AppConfig::default()
    })
}

pub fn handler(fetcher: Arc<StubFetcher>, allowed_origin: Option<&str>) -> RecordHandler {
    RecordHandler::new(config(allowed_origin), fetcher, Arc::new(MarcXmlExtractor))
        .with_clock(Arc::new(FixedClock(today())))
}

pub fn handler_with_extractor(
    fetcher: Arc<StubFetcher>,
    extractor: Arc<dyn RecordExtractor>,
) -> RecordHandler {
    RecordHandler::new(config(None), fetcher, extractor).with_clock(Arc::new(FixedClock(today())))
}
