//! Canonical column-name and workbook constants.
//!
//! Column spellings mirror the upstream dataset headers verbatim, including
//! irregular spacing (`Sowing2 Area (ha)`, the double space in
//! `Crop  Area (ha) K025`, the missing space in `Harvest 1 Area(ha)`).
//! Downstream rule application resolves these as literal keys.

/// Governing geographical area total. Compare-only column.
pub const C_COL_AREA_GEO: &str = "Total Geographical Area (ha)";
/// Governing agriculture area total.
pub const C_COL_AREA_AGRI: &str = "Total Agriculture Area (ha)";
/// Record identifier used as aggregate group-by key.
pub const C_COL_RID: &str = "RID";

/// Sowing stage 1 area.
pub const C_COL_SOWING_1: &str = "Sowing 1 Area (ha)";
/// Sowing stage 1 percentage.
pub const C_COL_SOWING_1_PCT: &str = "Sowing 1 Percentage";
/// Sowing stage 2 area.
pub const C_COL_SOWING_2: &str = "Sowing2 Area (ha)";
/// Sowing stage 2 percentage.
pub const C_COL_SOWING_2_PCT: &str = "Sowing 2 Percentage";
/// Sowing stage 3 area.
pub const C_COL_SOWING_3: &str = "Sowing 3 Area (ha)";
/// Sowing stage 3 percentage.
pub const C_COL_SOWING_3_PCT: &str = "Sowing 3 Percentage";

/// Crop acreage for the K025 crop entry.
pub const C_COL_CROP_ACRE: &str = "Crop  Area (ha) K025";
/// Crop acreage percentage for the K025 crop entry.
pub const C_COL_CROP_ACRE_PCT: &str = "Crop  Area Percentage K025";

/// Harvest stage 1 area.
pub const C_COL_HARVEST_1: &str = "Harvest 1 Area(ha)";
/// Harvest stage 1 percentage.
pub const C_COL_HARVEST_1_PCT: &str = "Harvest 1 Area Percentage";
/// Harvest stage 2 area.
pub const C_COL_HARVEST_2: &str = "Harvest 2 Area(ha)";
/// Harvest stage 2 percentage.
pub const C_COL_HARVEST_2_PCT: &str = "Harvest 2 Area Percentage";
/// Harvest stage 3 area.
pub const C_COL_HARVEST_3: &str = "Harvest 3 Area (ha)";
/// Harvest stage 3 percentage.
pub const C_COL_HARVEST_3_PCT: &str = "Harvest 3 Area Percentage";
/// Harvest stage 4 area.
pub const C_COL_HARVEST_4: &str = "Harvest 4 Area (ha)";
/// Harvest stage 4 percentage.
pub const C_COL_HARVEST_4_PCT: &str = "Harvest 4 Area Percentage";

/// Output workbook filename, resolved against the current working directory.
pub const C_FILE_WORKBOOK_OUT: &str = "ITC_QC.xlsx";
/// Sheet holding the rule table.
pub const C_SHEET_QC: &str = "QC";
/// Sheet holding the operator legend.
pub const C_SHEET_OPERATORS: &str = "Operators";

/// Rule-table header labels, in sheet column order.
pub const TUP_HDR_QC: [&str; 9] = [
    "QC_Check_Name",
    "Level",
    "Target_Column",
    "Aggregation",
    "Condition",
    "Compare_Against",
    "Is_Compare_Column",
    "Group_By",
    "Distinct",
];

/// Legend-table header labels, in sheet column order.
pub const TUP_HDR_LEGEND: [&str; 3] = ["Category", "Type", "Description"];

/// Every canonical dataset column the catalogue may reference.
pub const TUP_COLS_CANONICAL: [&str; 19] = [
    C_COL_AREA_GEO,
    C_COL_AREA_AGRI,
    C_COL_RID,
    C_COL_SOWING_1,
    C_COL_SOWING_1_PCT,
    C_COL_SOWING_2,
    C_COL_SOWING_2_PCT,
    C_COL_SOWING_3,
    C_COL_SOWING_3_PCT,
    C_COL_CROP_ACRE,
    C_COL_CROP_ACRE_PCT,
    C_COL_HARVEST_1,
    C_COL_HARVEST_1_PCT,
    C_COL_HARVEST_2,
    C_COL_HARVEST_2_PCT,
    C_COL_HARVEST_3,
    C_COL_HARVEST_3_PCT,
    C_COL_HARVEST_4,
    C_COL_HARVEST_4_PCT,
];
