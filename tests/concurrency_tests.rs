//! Concurrency and thread safety tests for the record lookup

use std::sync::Arc;
use std::thread;

use alma_record::{
    async_trait, build, lookup_record, AlmaRecord, CqlQuery, FetchError, MarcXmlExtractor,
    RecordExtractor, RecordFetcher, SearchCriteria,
};
use chrono::NaiveDate;

const SRU_RESPONSE_2_HITS: &str = include_str!("fixtures/sru_response_2_hits.xml");

struct StaticFetcher;

#[async_trait]
impl RecordFetcher for StaticFetcher {
    async fn fetch(&self, _encoded_query: &str) -> Result<String, FetchError> {
        tokio::task::yield_now().await;
        Ok(SRU_RESPONSE_2_HITS.to_owned())
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 5, 17).unwrap()
}

#[test]
fn concurrent_build_same_criteria() {
    let criteria = Arc::new(
        SearchCriteria::for_person(Some("1123456789"), Some("Creator, Mock"))
            .with_recency_filter(true)
            .with_sorting(true),
    );

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let criteria = Arc::clone(&criteria);
            thread::spawn(move || build(&criteria, today()))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let first = &results[0];
    for (i, result) in results.iter().enumerate().skip(1) {
        assert_eq!(first, result, "Thread {i} produced a different query");
    }
}

#[test]
fn concurrent_build_distinct_creators() {
    let handles: Vec<_> = (0..10)
        .map(|i| {
            thread::spawn(move || {
                let creator = format!("Creator{i}, Mock");
                let criteria = SearchCriteria::for_person(Some("1123456789"), Some(&creator));
                (creator, build(&criteria, today()))
            })
        })
        .collect();

    for handle in handles {
        let (creator, query) = handle.join().unwrap();
        assert_eq!(
            query,
            format!("alma.authority_id=1123456789 AND alma.creator=\"{creator}\"")
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_lookups_share_collaborators() {
    let fetcher: Arc<dyn RecordFetcher> = Arc::new(StaticFetcher);
    let extractor: Arc<dyn RecordExtractor> = Arc::new(MarcXmlExtractor);

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let fetcher = Arc::clone(&fetcher);
            let extractor = Arc::clone(&extractor);
            tokio::spawn(async move {
                let authority_id = format!("11234567{i:02}");
                let criteria = SearchCriteria::for_person(Some(&authority_id), Some("Mock"))
                    .with_recency_filter(true)
                    .with_sorting(true);
                let query = CqlQuery::new(&criteria, today());
                lookup_record(fetcher.as_ref(), extractor.as_ref(), &query).await
            })
        })
        .collect();

    for task in tasks {
        let record = task.await.unwrap().unwrap();
        assert_eq!(record, AlmaRecord::new("Example Title"));
    }
}
