//! Shared XLSX specification models and write error types.

use std::fmt;
use std::path::PathBuf;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification used by the writer presets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Background fill color.
    pub bg_color: Option<String>,
    /// Text wrap.
    pub text_wrap: Option<bool>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            text_wrap: other.text_wrap.or(self.text_wrap),
        }
    }
}

/// Normalized cell value during the write pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriteOptions

/// Column autofit policy for per-sheet write calls.
///
/// Width is inferred from header and body text lengths, then clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitCellsPolicy {
    /// Minimum final width.
    pub width_cell_min: usize,
    /// Maximum final width.
    pub width_cell_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        Self {
            width_cell_min: 8,
            width_cell_max: 60,
            width_cell_padding: 2,
        }
    }
}

/// Writer-wide options controlling value conversion and overwrite behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxWriteOptions {
    /// Prefix formula-looking text cells with the literal escape marker.
    pub if_escape_formula_text: bool,
    /// Best-effort delete of a pre-existing file at the output path on close.
    pub if_overwrite_existing: bool,
    /// Column autofit policy.
    pub policy_autofit: SpecAutofitCellsPolicy,
}

impl Default for SpecXlsxWriteOptions {
    fn default() -> Self {
        Self {
            if_escape_formula_text: true,
            if_overwrite_existing: true,
            policy_autofit: SpecAutofitCellsPolicy::default(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Facts about one sheet committed to the workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetWritten {
    /// Actual unique sheet name in workbook.
    pub sheet_name: String,
    /// Number of data rows written (header excluded).
    pub n_rows_data: usize,
    /// Number of columns written.
    pub n_cols: usize,
}

/// Per-run report with non-fatal warnings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sheets committed so far.
    pub sheets: Vec<SpecSheetWritten>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriteErrors

/// Workbook write failures, split so callers can message each case.
#[derive(Debug)]
pub enum XlsxWriteError {
    /// The output file is held open/locked by another process.
    OutputLocked(PathBuf),
    /// Sheet/table assembly failed before anything reached disk.
    SheetBuild {
        /// Requested sheet name.
        sheet_name: String,
        /// Underlying failure text.
        message: String,
    },
    /// Workbook flush failed for a reason other than a held lock.
    WorkbookSave {
        /// Output path that failed to save.
        path: PathBuf,
        /// Underlying failure text.
        message: String,
    },
    /// Write attempted after `close()`.
    WriterClosed,
}

impl fmt::Display for XlsxWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutputLocked(path) => {
                write!(
                    f,
                    "Output file is locked by another process: {}",
                    path.display()
                )
            }
            Self::SheetBuild {
                sheet_name,
                message,
            } => write!(f, "Failed to build sheet {sheet_name:?}: {message}"),
            Self::WorkbookSave { path, message } => {
                write!(f, "Failed to save workbook {}: {message}", path.display())
            }
            Self::WriterClosed => write!(f, "Cannot write after close()."),
        }
    }
}

impl std::error::Error for XlsxWriteError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
