//! XLSX writer kernel that commits DataFrame tables into workbook output.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use polars::prelude::{AnyValue, DataFrame};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, derive_default_xlsx_formats,
};
use crate::spec::{
    EnumCellValue, SpecCellFormat, SpecSheetWritten, SpecXlsxReport, SpecXlsxWriteOptions,
    XlsxWriteError,
};
use crate::util::{
    escape_formula_text, estimate_width_len, sanitize_sheet_name, validate_unique_columns,
};

/// Stateful workbook writer.
///
/// The workbook is buffered in memory until [`Self::close`] is called; only
/// `close()` touches the filesystem.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    fmt_text: SpecCellFormat,
    fmt_header: SpecCellFormat,
    write_options: SpecXlsxWriteOptions,
    set_sheet_names_existing: BTreeSet<String>,
    report: SpecXlsxReport,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path and explicit format presets.
    pub fn new(
        path_file_out: PathBuf,
        fmt_text: SpecCellFormat,
        fmt_header: SpecCellFormat,
        write_options: SpecXlsxWriteOptions,
    ) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            fmt_text,
            fmt_header,
            write_options,
            set_sheet_names_existing: BTreeSet::new(),
            report: SpecXlsxReport::default(),
            if_closed: false,
        }
    }

    /// Create writer with the default "text"/"header" presets.
    pub fn with_default_formats(path_file_out: PathBuf, write_options: SpecXlsxWriteOptions) -> Self {
        let dict_fmt = derive_default_xlsx_formats();
        let fmt_text = dict_fmt.get("text").cloned().unwrap_or_default();
        let fmt_header = dict_fmt.get("header").cloned().unwrap_or_default();
        Self::new(path_file_out, fmt_text, fmt_header, write_options)
    }

    /// Return output file path as string.
    pub fn file_out(&self) -> String {
        self.path_file_out.to_string_lossy().to_string()
    }

    /// Return snapshot of sheets written so far and collected warnings.
    pub fn report(&self) -> &SpecXlsxReport {
        &self.report
    }

    /// Write one sheet with a single header row followed by the data rows.
    ///
    /// String cells whose first character would trigger formula evaluation
    /// are escaped at this point when `if_escape_formula_text` is set; the
    /// in-memory table stays unescaped.
    pub fn write_sheet_from_dataframe(
        &mut self,
        df_data: &DataFrame,
        sheet_name: &str,
    ) -> Result<(), XlsxWriteError> {
        if self.if_closed {
            return Err(XlsxWriteError::WriterClosed);
        }

        let build_err = |message: String| XlsxWriteError::SheetBuild {
            sheet_name: sheet_name.to_string(),
            message,
        };

        let l_colnames_df: Vec<String> = df_data
            .get_column_names_str()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        validate_unique_columns(&l_colnames_df).map_err(build_err)?;

        let n_width_df = l_colnames_df.len();
        let n_height_df = df_data.height();
        if n_width_df > N_NCOLS_EXCEL_MAX {
            return Err(build_err(format!(
                "Table width {n_width_df} exceeds Excel column limit {N_NCOLS_EXCEL_MAX}."
            )));
        }
        if n_height_df + 1 > N_NROWS_EXCEL_MAX {
            return Err(build_err(format!(
                "Table height {n_height_df} exceeds Excel row limit {N_NROWS_EXCEL_MAX}."
            )));
        }

        let sheet_name_unique =
            self.derive_unique_sheet_name(&sanitize_sheet_name(sheet_name, "_"));
        let worksheet = self.workbook.add_worksheet();
        worksheet
            .set_name(&sheet_name_unique)
            .map_err(|err| build_err(derive_xlsx_error_text(err)))?;

        let fmt_text = derive_rust_xlsx_format(&self.fmt_text);
        let fmt_header = derive_rust_xlsx_format(&self.fmt_header);

        let mut l_width_by_col: Vec<usize> = l_colnames_df
            .iter()
            .map(|c_name| estimate_width_len(&EnumCellValue::String(c_name.clone())))
            .collect();

        for (n_idx_col, c_name) in l_colnames_df.iter().enumerate() {
            worksheet
                .write_string_with_format(0, cast_col_num(n_idx_col).map_err(build_err)?, c_name, &fmt_header)
                .map_err(|err| build_err(derive_xlsx_error_text(err)))?;
        }

        let l_cols = df_data.get_columns();
        for n_idx_row in 0..n_height_df {
            for (n_idx_col, col) in l_cols.iter().enumerate() {
                let value_raw = col
                    .get(n_idx_row)
                    .map_err(|err| build_err(format!("Failed to access cell value: {err}")))?;
                let mut value = derive_cell_value_from_any_value(value_raw);
                if self.write_options.if_escape_formula_text
                    && let EnumCellValue::String(text) = &value
                {
                    value = EnumCellValue::String(escape_formula_text(text));
                }

                l_width_by_col[n_idx_col] =
                    usize::max(l_width_by_col[n_idx_col], estimate_width_len(&value));

                write_cell_with_format(
                    worksheet,
                    cast_row_num(n_idx_row + 1).map_err(build_err)?,
                    cast_col_num(n_idx_col).map_err(build_err)?,
                    &value,
                    &fmt_text,
                )
                .map_err(build_err)?;
            }
        }

        worksheet
            .set_freeze_panes(1, 0)
            .map_err(|err| build_err(derive_xlsx_error_text(err)))?;

        let policy_autofit = &self.write_options.policy_autofit;
        let n_min = usize::max(1, policy_autofit.width_cell_min);
        let n_max = usize::min(255, usize::max(n_min, policy_autofit.width_cell_max));
        for (n_idx_col, n_width_recorded) in l_width_by_col.iter().enumerate() {
            let n_width_final = usize::min(
                n_max,
                usize::max(n_min, n_width_recorded + policy_autofit.width_cell_padding),
            );
            worksheet
                .set_column_width(cast_col_num(n_idx_col).map_err(build_err)?, n_width_final as f64)
                .map_err(|err| build_err(derive_xlsx_error_text(err)))?;
        }

        self.report.sheets.push(SpecSheetWritten {
            sheet_name: sheet_name_unique,
            n_rows_data: n_height_df,
            n_cols: n_width_df,
        });
        Ok(())
    }

    /// Flush workbook to disk. Idempotent.
    ///
    /// With `if_overwrite_existing` set, a pre-existing file at the output
    /// path is removed best-effort first; a failed removal is recorded as a
    /// warning and the save is attempted anyway.
    pub fn close(&mut self) -> Result<(), XlsxWriteError> {
        if self.if_closed {
            return Ok(());
        }

        if self.write_options.if_overwrite_existing
            && self.path_file_out.exists()
            && let Err(err) = fs::remove_file(&self.path_file_out)
        {
            self.report.warn(format!(
                "Failed to remove existing output {} ({err}); attempting save anyway.",
                self.path_file_out.display()
            ));
        }

        self.workbook
            .save(&self.path_file_out)
            .map_err(|err| match err {
                XlsxError::IoError(ref io_err) if io_err.kind() == ErrorKind::PermissionDenied => {
                    XlsxWriteError::OutputLocked(self.path_file_out.clone())
                }
                other => XlsxWriteError::WorkbookSave {
                    path: self.path_file_out.clone(),
                    message: derive_xlsx_error_text(other),
                },
            })?;
        self.if_closed = true;
        Ok(())
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        if !self.set_sheet_names_existing.contains(name) {
            self.set_sheet_names_existing.insert(name.to_string());
            return name.to_string();
        }

        let base_name: String = name
            .chars()
            .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
            .collect();

        let mut n_idx = 2usize;
        loop {
            let candidate: String = format!("{base_name}__{n_idx}")
                .chars()
                .take(N_LEN_EXCEL_SHEET_NAME_MAX)
                .collect();
            if !self.set_sheet_names_existing.contains(&candidate) {
                self.set_sheet_names_existing.insert(candidate.clone());
                return candidate;
            }
            n_idx += 1;
        }
    }
}

fn derive_cell_value_from_any_value(value: AnyValue<'_>) -> EnumCellValue {
    match value {
        AnyValue::Null => EnumCellValue::None,
        AnyValue::String(val) => EnumCellValue::String(val.to_string()),
        AnyValue::StringOwned(val) => EnumCellValue::String(val.to_string()),
        AnyValue::Boolean(val) => {
            EnumCellValue::String(if val { "True" } else { "False" }.to_string())
        }
        AnyValue::UInt8(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt16(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt32(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int8(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int16(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float64(val) => EnumCellValue::Number(val),
        _ => EnumCellValue::String(value.to_string()),
    }
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_num: u32,
    col_num: u16,
    value: &EnumCellValue,
    format: &Format,
) -> Result<(), String> {
    match value {
        EnumCellValue::None => {
            worksheet
                .write_blank(row_num, col_num, format)
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCellValue::String(val) => {
            worksheet
                .write_string_with_format(row_num, col_num, val, format)
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCellValue::Number(val) => {
            worksheet
                .write_number_with_format(row_num, col_num, *val, format)
                .map_err(derive_xlsx_error_text)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }
    if spec.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    match align.trim().to_ascii_lowercase().as_str() {
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("row index overflow: {value}"))
}

fn cast_col_num(value: usize) -> Result<u16, String> {
    u16::try_from(value).map_err(|_| format!("column index overflow: {value}"))
}

fn derive_xlsx_error_text(err: XlsxError) -> String {
    format!("xlsx write error: {err}")
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    use calamine::{Reader, Xlsx, open_workbook};
    use polars::prelude::{Column, DataFrame};

    use super::XlsxWriter;
    use crate::spec::{SpecXlsxWriteOptions, XlsxWriteError};

    struct TestDir {
        path: PathBuf,
    }

    impl TestDir {
        fn new() -> Self {
            let n = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos();
            let path = std::env::temp_dir().join(format!("agroqc_xlsx_test_{n}"));
            std::fs::create_dir_all(&path).expect("create test dir");
            Self { path }
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for TestDir {
        fn drop(&mut self) {
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let _ = std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o755));
            }
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }

    fn make_table() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Name".into(), vec!["a".to_string(), "b".to_string()]),
            Column::new("Condition".into(), vec!["<=".to_string(), ">".to_string()]),
            Column::new("Threshold".into(), vec!["100".to_string(), "0".to_string()]),
        ])
        .expect("build table")
    }

    fn read_sheet_rows(path: &Path, sheet_name: &str) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = open_workbook(path).expect("open workbook");
        let range = workbook.worksheet_range(sheet_name).expect("sheet range");
        range
            .rows()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect()
    }

    #[test]
    fn write_sheet_round_trips_with_escaped_operators() {
        let tmp = TestDir::new();
        let path = tmp.path().join("out.xlsx");

        let mut writer =
            XlsxWriter::with_default_formats(path.clone(), SpecXlsxWriteOptions::default());
        writer
            .write_sheet_from_dataframe(&make_table(), "QC")
            .expect("write sheet");
        writer.close().expect("close");

        let l_rows = read_sheet_rows(&path, "QC");
        assert_eq!(l_rows.len(), 3);
        assert_eq!(l_rows[0], vec!["Name", "Condition", "Threshold"]);
        assert_eq!(l_rows[1], vec!["a", "'<=", "100"]);
        assert_eq!(l_rows[2], vec!["b", "'>", "0"]);
    }

    #[test]
    fn write_sheet_keeps_operators_verbatim_when_escaping_disabled() {
        let tmp = TestDir::new();
        let path = tmp.path().join("out.xlsx");

        let write_options = SpecXlsxWriteOptions {
            if_escape_formula_text: false,
            ..SpecXlsxWriteOptions::default()
        };
        let mut writer = XlsxWriter::with_default_formats(path.clone(), write_options);
        writer
            .write_sheet_from_dataframe(&make_table(), "QC")
            .expect("write sheet");
        writer.close().expect("close");

        let l_rows = read_sheet_rows(&path, "QC");
        assert_eq!(l_rows[1][1], "<=");
    }

    #[test]
    fn close_replaces_pre_existing_output_file() {
        let tmp = TestDir::new();
        let path = tmp.path().join("out.xlsx");
        std::fs::write(&path, b"stale bytes").expect("seed stale file");

        let mut writer =
            XlsxWriter::with_default_formats(path.clone(), SpecXlsxWriteOptions::default());
        writer
            .write_sheet_from_dataframe(&make_table(), "QC")
            .expect("write sheet");
        writer.close().expect("close");

        // Stale content is gone and a readable workbook is in its place.
        let l_rows = read_sheet_rows(&path, "QC");
        assert_eq!(l_rows.len(), 3);
    }

    #[test]
    fn close_is_idempotent() {
        let tmp = TestDir::new();
        let path = tmp.path().join("out.xlsx");

        let mut writer =
            XlsxWriter::with_default_formats(path, SpecXlsxWriteOptions::default());
        writer
            .write_sheet_from_dataframe(&make_table(), "QC")
            .expect("write sheet");
        writer.close().expect("first close");
        writer.close().expect("second close");
    }

    #[test]
    fn write_after_close_is_rejected() {
        let tmp = TestDir::new();
        let path = tmp.path().join("out.xlsx");

        let mut writer =
            XlsxWriter::with_default_formats(path, SpecXlsxWriteOptions::default());
        writer
            .write_sheet_from_dataframe(&make_table(), "QC")
            .expect("write sheet");
        writer.close().expect("close");

        let err = writer
            .write_sheet_from_dataframe(&make_table(), "More")
            .expect_err("must fail");
        assert!(matches!(err, XlsxWriteError::WriterClosed));
    }

    #[test]
    fn duplicate_column_names_are_rejected() {
        let tmp = TestDir::new();
        let path = tmp.path().join("out.xlsx");

        let mut df = DataFrame::new(vec![
            Column::new("A".into(), vec!["x".to_string()]),
            Column::new("A2".into(), vec!["y".to_string()]),
        ])
        .expect("build table");
        if df.rename("A2", "A".into()).is_err() {
            // Polars itself refuses the duplicate; writer-side validation is
            // then unreachable through the public DataFrame API.
            return;
        }

        let mut writer =
            XlsxWriter::with_default_formats(path, SpecXlsxWriteOptions::default());
        let err = writer
            .write_sheet_from_dataframe(&df, "QC")
            .expect_err("must fail");
        assert!(matches!(err, XlsxWriteError::SheetBuild { .. }));
    }

    #[test]
    fn repeated_sheet_names_are_deduplicated() {
        let tmp = TestDir::new();
        let path = tmp.path().join("out.xlsx");

        let mut writer =
            XlsxWriter::with_default_formats(path.clone(), SpecXlsxWriteOptions::default());
        writer
            .write_sheet_from_dataframe(&make_table(), "QC")
            .expect("write first");
        writer
            .write_sheet_from_dataframe(&make_table(), "QC")
            .expect("write second");
        writer.close().expect("close");

        let l_sheet_names: Vec<String> = writer
            .report()
            .sheets
            .iter()
            .map(|s| s.sheet_name.clone())
            .collect();
        assert_eq!(l_sheet_names, vec!["QC".to_string(), "QC__2".to_string()]);
        assert_eq!(read_sheet_rows(&path, "QC__2").len(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn unwritable_output_location_reports_locked() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TestDir::new();
        let path = tmp.path().join("out.xlsx");
        std::fs::set_permissions(tmp.path(), std::fs::Permissions::from_mode(0o555))
            .expect("make dir read-only");

        let mut writer =
            XlsxWriter::with_default_formats(path, SpecXlsxWriteOptions::default());
        writer
            .write_sheet_from_dataframe(&make_table(), "QC")
            .expect("write sheet");
        let err = writer.close().expect_err("save must fail");
        assert!(matches!(err, XlsxWriteError::OutputLocked(_)));
    }
}
