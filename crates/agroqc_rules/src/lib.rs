//! `agroqc_rules` v1:
//! Canonical QC rule catalogue for the agricultural collections dataset.
//!
//! - `conf`    : canonical column-name and workbook constants
//! - `spec`    : rule/legend models and enums
//! - `catalog` : hardcoded rule and legend tables
//! - `table`   : DataFrame derivation for serialization
pub mod catalog;
pub mod conf;
pub mod spec;
pub mod table;

pub use catalog::{create_legend_entries, create_qc_rules};
pub use conf::{C_FILE_WORKBOOK_OUT, C_SHEET_OPERATORS, C_SHEET_QC, TUP_HDR_LEGEND, TUP_HDR_QC};
pub use spec::{
    EnumLegendCategory, EnumQcAggregation, EnumQcComparand, EnumQcCondition, EnumQcLevel,
    SpecLegendEntry, SpecQcRule,
};
pub use table::{derive_legend_dataframe, derive_qc_dataframe};
