//! CQL query layer for the Alma SRU interface.
//!
//! Turns a small set of typed search inputs into the exact CQL text the Alma
//! SRU endpoint expects, plus the percent-encoded form that goes into the
//! request URL.
//!
//! ## What we do
//!
//! - Identity match on `alma.authority_id` and `alma.creator`
//! - Optional recency filter over the last 41 publication years
//! - Optional descending sort on `alma.main_pub_date`
//! - URL path segment encoding of the finished query
//!
//! ## Pure function guarantee
//!
//! No I/O and no clock calls inside [`build`]. "Today" is an argument, so the
//! same criteria and date give the same query string on any machine. Callers
//! that need the current date go through a [`Clock`].
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use cql::{build, SearchCriteria};
//!
//! let criteria = SearchCriteria::for_person(Some("1123456789"), Some("Creator, Mock"));
//! let today = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
//!
//! assert_eq!(
//!     build(&criteria, today),
//!     r#"alma.authority_id=1123456789 AND alma.creator="Creator, Mock""#
//! );
//! ```

mod clock;
mod criteria;
mod query;

pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::criteria::SearchCriteria;
pub use crate::query::{
    build, encode, index, CqlQuery, AUTHORITY_ID_INDEX, CREATOR_INDEX, PUBLICATION_DATE_INDEX,
    RECENCY_WINDOW_YEARS, SORT_MODIFIER, TERM_SET,
};
