//! Batch classification of a directory of documents.
//!
//! The batch driver pairs every PDF in a directory with its companion text
//! file and runs each pair through cleaning, feature extraction and
//! classification. Documents are independent: a missing companion or a
//! failed prediction is recorded for that document and the run moves on.
//! Only configuration problems abort a run.

pub mod discovery;
pub mod driver;
pub mod outcome;

pub use discovery::{DiscoveredDocument, discover};
pub use driver::{BatchDriver, run};
pub use outcome::{BatchReport, BatchSummary, DocumentOutcome, DocumentState};
