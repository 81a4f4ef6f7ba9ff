//! Command-line entry point. Writes `ITC_QC.xlsx` into the current working
//! directory, replacing any previous copy.

use std::process::ExitCode;

use agroqc::{CreateQcWorkbookError, create_qc_workbook};

fn main() -> ExitCode {
    let dir_out = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            println!("An error occurred: {err}");
            return ExitCode::FAILURE;
        }
    };

    match create_qc_workbook(&dir_out) {
        Ok(summary) => {
            for warning in &summary.warnings {
                eprintln!("WARNING: {warning}");
            }
            println!("ITC Rules created at: {}", summary.path_file_out.display());
            ExitCode::SUCCESS
        }
        Err(CreateQcWorkbookError::OutputLocked(path)) => {
            println!(
                "ERROR: Could not write to {}. Please close the Excel file if it is open.",
                path.display()
            );
            ExitCode::FAILURE
        }
        Err(err) => {
            println!("An error occurred: {err}");
            ExitCode::FAILURE
        }
    }
}
