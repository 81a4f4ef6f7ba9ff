//! `agroqc`:
//! One-shot generator that serializes the QC rule catalogue and operator
//! legend into a single workbook.
//!
//! - `run` : workbook assembly entry point and its error taxonomy
pub mod run;

pub use run::{CreateQcWorkbookError, SpecQcRunSummary, create_qc_workbook};
