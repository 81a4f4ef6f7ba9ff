//! `agroqc_io_xlsx`:
//! XLSX output kernel for tabular rule data.
//!
//! - `conf`   : constants and default format presets
//! - `spec`   : specs/models/options and write errors
//! - `util`   : pure helper functions
//! - `writer` : stateful workbook writer
pub mod conf;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_FORMULA_ESCAPE_MARKER, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    TUP_EXCEL_ILLEGAL, TUP_FORMULA_TRIGGER,
};
pub use spec::{
    EnumCellValue, SpecAutofitCellsPolicy, SpecCellFormat, SpecSheetWritten, SpecXlsxReport,
    SpecXlsxWriteOptions, XlsxWriteError,
};
pub use util::{escape_formula_text, sanitize_sheet_name, validate_unique_columns};
pub use writer::XlsxWriter;
