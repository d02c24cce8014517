//! MARCXML title extraction from SRU searchRetrieve responses.
//!
//! # Response layout
//!
//! ```text
//! searchRetrieveResponse
//! ├── numberOfRecords          0 → NotFound
//! ├── records
//! │   └── record
//! │       └── recordData       only the first one is read
//! │           └── record       MARC21 slim
//! │               └── datafield tag="245"
//! │                   ├── subfield code="a"   title proper
//! │                   └── subfield code="b"   remainder of title
//! └── diagnostics/diagnostic/message          → MalformedPayload
//! ```
//!
//! Namespace prefixes are ignored; elements are matched on their local name.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::{AlmaRecord, ExtractionError};

const TITLE_TAG: &[u8] = b"245";
const TITLE_PROPER: u8 = b'a';
const TITLE_REMAINDER: u8 = b'b';
const TITLE_PART_SEPARATOR: &str = " : ";

/// Turns raw response text into an [`AlmaRecord`].
pub trait RecordExtractor: Send + Sync {
    fn extract(&self, payload: &str) -> Result<AlmaRecord, ExtractionError>;
}

/// Reads the title of the first MARCXML record in an SRU response.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarcXmlExtractor;

impl RecordExtractor for MarcXmlExtractor {
    fn extract(&self, payload: &str) -> Result<AlmaRecord, ExtractionError> {
        let scan = Scan::run(payload)?;

        if !scan.saw_response {
            return Err(ExtractionError::MalformedPayload(
                "not an SRU searchRetrieve response".into(),
            ));
        }
        if let Some(message) = scan.diagnostic {
            return Err(ExtractionError::MalformedPayload(format!(
                "SRU diagnostic: {message}"
            )));
        }
        if scan.number_of_records == Some(0) || scan.records_seen == 0 {
            return Err(ExtractionError::NotFound);
        }

        debug!(
            number_of_records = scan.number_of_records,
            "reading title from first SRU record"
        );
        compose_title(&scan.title_proper, &scan.title_remainder)
            .map(AlmaRecord::new)
            .ok_or_else(|| {
                ExtractionError::MalformedPayload("first record has no title (MARC 245)".into())
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    Ignore,
    NumberOfRecords,
    DiagnosticMessage,
    TitleSubfield(u8),
}

#[derive(Debug)]
struct Scan {
    saw_response: bool,
    number_of_records: Option<u64>,
    records_seen: usize,
    in_first_record: bool,
    in_diagnostic: bool,
    in_title_field: bool,
    target: TextTarget,
    diagnostic: Option<String>,
    title_proper: String,
    title_remainder: String,
}

impl Scan {
    fn run(payload: &str) -> Result<Self, ExtractionError> {
        let mut scan = Scan {
            saw_response: false,
            number_of_records: None,
            records_seen: 0,
            in_first_record: false,
            in_diagnostic: false,
            in_title_field: false,
            target: TextTarget::Ignore,
            diagnostic: None,
            title_proper: String::new(),
            title_remainder: String::new(),
        };

        let mut reader = Reader::from_str(payload);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event()? {
                Event::Start(element) => scan.open(&element)?,
                Event::End(element) => {
                    let name = element.local_name();
                    if scan.close(name.as_ref()) {
                        break;
                    }
                }
                Event::Text(text) => scan.text(&text.unescape()?)?,
                Event::CData(data) => scan.text(&String::from_utf8_lossy(&data))?,
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(scan)
    }

    fn open(&mut self, element: &BytesStart<'_>) -> Result<(), ExtractionError> {
        match element.local_name().as_ref() {
            b"searchRetrieveResponse" => self.saw_response = true,
            b"numberOfRecords" => self.target = TextTarget::NumberOfRecords,
            b"diagnostic" => self.in_diagnostic = true,
            b"message" if self.in_diagnostic => self.target = TextTarget::DiagnosticMessage,
            b"recordData" => {
                self.records_seen += 1;
                self.in_first_record = self.records_seen == 1;
            }
            b"datafield" if self.in_first_record => {
                let tag = element
                    .try_get_attribute("tag")
                    .map_err(|e| ExtractionError::MalformedPayload(e.to_string()))?;
                self.in_title_field = tag.is_some_and(|attr| attr.value.as_ref() == TITLE_TAG);
            }
            b"subfield" if self.in_title_field => {
                let code = element
                    .try_get_attribute("code")
                    .map_err(|e| ExtractionError::MalformedPayload(e.to_string()))?;
                if let Some(code) = code.and_then(|attr| attr.value.first().copied()) {
                    self.target = TextTarget::TitleSubfield(code);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Returns true once the first record has been fully read.
    fn close(&mut self, name: &[u8]) -> bool {
        match name {
            b"numberOfRecords" | b"message" | b"subfield" => self.target = TextTarget::Ignore,
            b"diagnostic" => self.in_diagnostic = false,
            b"datafield" => self.in_title_field = false,
            b"recordData" if self.in_first_record => {
                self.in_first_record = false;
                return true;
            }
            _ => {}
        }
        false
    }

    fn text(&mut self, text: &str) -> Result<(), ExtractionError> {
        match self.target {
            TextTarget::Ignore => {}
            TextTarget::NumberOfRecords => {
                let count = text.trim().parse().map_err(|_| {
                    ExtractionError::MalformedPayload(format!(
                        "numberOfRecords is not a count: {text:?}"
                    ))
                })?;
                self.number_of_records = Some(count);
            }
            TextTarget::DiagnosticMessage => {
                self.diagnostic.get_or_insert_with(String::new).push_str(text);
            }
            TextTarget::TitleSubfield(TITLE_PROPER) => self.title_proper.push_str(text),
            TextTarget::TitleSubfield(TITLE_REMAINDER) => self.title_remainder.push_str(text),
            TextTarget::TitleSubfield(_) => {}
        }
        Ok(())
    }
}

/// Joins 245 $a and $b, dropping trailing ISBD punctuation from each part.
fn compose_title(proper: &str, remainder: &str) -> Option<String> {
    let parts: Vec<&str> = [proper, remainder]
        .into_iter()
        .map(strip_isbd_punctuation)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(TITLE_PART_SEPARATOR))
    }
}

fn strip_isbd_punctuation(part: &str) -> &str {
    part.trim()
        .trim_end_matches(|c: char| matches!(c, '/' | ':' | ';' | ',' | '=') || c.is_whitespace())
}
