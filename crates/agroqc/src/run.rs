//! Workbook assembly entry point.
//!
//! Builds the rule and legend tables, writes them as the "QC" and
//! "Operators" sheets of one workbook, and maps writer failures onto a
//! two-case taxonomy so callers can message a held file lock separately
//! from everything else.

use std::fmt;
use std::path::{Path, PathBuf};

use agroqc_io_xlsx::{SpecXlsxWriteOptions, XlsxWriteError, XlsxWriter};
use agroqc_rules::{
    C_FILE_WORKBOOK_OUT, C_SHEET_OPERATORS, C_SHEET_QC, create_legend_entries, create_qc_rules,
    derive_legend_dataframe, derive_qc_dataframe,
};

////////////////////////////////////////////////////////////////////////////////
// #region RunModels

/// Facts about one completed workbook run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecQcRunSummary {
    /// Path the workbook was written to.
    pub path_file_out: PathBuf,
    /// Non-fatal warnings collected during the write.
    pub warnings: Vec<String>,
}

/// Run failures, split so the caller can message a held lock separately.
#[derive(Debug)]
pub enum CreateQcWorkbookError {
    /// The output file is held open/locked by another process.
    OutputLocked(PathBuf),
    /// Any other table-build or write failure.
    Generation(String),
}

impl fmt::Display for CreateQcWorkbookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutputLocked(path) => {
                write!(
                    f,
                    "Output file is locked by another process: {}",
                    path.display()
                )
            }
            Self::Generation(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for CreateQcWorkbookError {}

impl From<XlsxWriteError> for CreateQcWorkbookError {
    fn from(err: XlsxWriteError) -> Self {
        match err {
            XlsxWriteError::OutputLocked(path) => Self::OutputLocked(path),
            other => Self::Generation(other.to_string()),
        }
    }
}

impl From<String> for CreateQcWorkbookError {
    fn from(message: String) -> Self {
        Self::Generation(message)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RunEntry

/// Build both tables and commit them to `ITC_QC.xlsx` under `dir_out`.
///
/// A pre-existing workbook at the output path is replaced. The rule table
/// lands on the "QC" sheet and the operator legend on "Operators", in that
/// order.
pub fn create_qc_workbook(dir_out: &Path) -> Result<SpecQcRunSummary, CreateQcWorkbookError> {
    let path_file_out = dir_out.join(C_FILE_WORKBOOK_OUT);

    let df_qc = derive_qc_dataframe(&create_qc_rules())?;
    let df_legend = derive_legend_dataframe(&create_legend_entries())?;

    let mut writer = XlsxWriter::with_default_formats(
        path_file_out.clone(),
        SpecXlsxWriteOptions::default(),
    );
    writer.write_sheet_from_dataframe(&df_qc, C_SHEET_QC)?;
    writer.write_sheet_from_dataframe(&df_legend, C_SHEET_OPERATORS)?;
    writer.close()?;

    Ok(SpecQcRunSummary {
        path_file_out,
        warnings: writer.report().warnings.clone(),
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
