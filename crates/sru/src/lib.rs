//! Alma SRU collaborators.
//!
//! Two seams sit between a finished CQL query and a bibliographic record:
//!
//! - [`RecordFetcher`] sends the encoded query to an SRU endpoint and hands back
//!   the raw response text. [`HttpRecordFetcher`] is the `reqwest` implementation.
//! - [`RecordExtractor`] turns that text into an [`AlmaRecord`].
//!   [`MarcXmlExtractor`] reads the title from the first MARCXML record.
//!
//! Both are traits so callers can swap in stubs; nothing here retries or caches.

mod error;
mod extract;
mod fetch;
mod record;

pub use crate::error::{ExtractionError, FetchError};
pub use crate::extract::{MarcXmlExtractor, RecordExtractor};
pub use crate::fetch::{HttpRecordFetcher, RecordFetcher, SruEndpoint};
pub use crate::record::AlmaRecord;
