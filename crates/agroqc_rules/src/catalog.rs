//! Hardcoded QC rule catalogue and operator legend.
//!
//! The catalogue is a literal enumeration. Order is part of the contract:
//! callers and tests may rely on positional stability across runs.

use crate::conf::{
    C_COL_AREA_AGRI, C_COL_AREA_GEO, C_COL_CROP_ACRE, C_COL_CROP_ACRE_PCT, C_COL_HARVEST_1,
    C_COL_HARVEST_1_PCT, C_COL_HARVEST_2, C_COL_HARVEST_2_PCT, C_COL_HARVEST_3,
    C_COL_HARVEST_3_PCT, C_COL_HARVEST_4, C_COL_HARVEST_4_PCT, C_COL_RID, C_COL_SOWING_1,
    C_COL_SOWING_1_PCT, C_COL_SOWING_2, C_COL_SOWING_2_PCT, C_COL_SOWING_3, C_COL_SOWING_3_PCT,
};
use crate::spec::{
    EnumLegendCategory, EnumQcAggregation, EnumQcComparand, EnumQcCondition, EnumQcLevel,
    SpecLegendEntry, SpecQcRule,
};

fn create_row_rule(
    name: &'static str,
    target_column: &'static str,
    condition: EnumQcCondition,
    compare_against: EnumQcComparand,
) -> SpecQcRule {
    SpecQcRule {
        name,
        level: EnumQcLevel::Row,
        target_column,
        aggregation: None,
        condition,
        compare_against,
        group_by: None,
        if_distinct: false,
    }
}

fn create_table_agg_rule(
    name: &'static str,
    target_column: &'static str,
    aggregation: EnumQcAggregation,
    condition: EnumQcCondition,
    compare_against: EnumQcComparand,
) -> SpecQcRule {
    SpecQcRule {
        name,
        level: EnumQcLevel::Agg,
        target_column,
        aggregation: Some(aggregation),
        condition,
        compare_against,
        group_by: None,
        if_distinct: false,
    }
}

fn create_grouped_agg_rule(
    name: &'static str,
    target_column: &'static str,
    aggregation: EnumQcAggregation,
    condition: EnumQcCondition,
    compare_against: EnumQcComparand,
    group_by: &'static str,
) -> SpecQcRule {
    SpecQcRule {
        name,
        level: EnumQcLevel::Agg,
        target_column,
        aggregation: Some(aggregation),
        condition,
        compare_against,
        group_by: Some(group_by),
        if_distinct: true,
    }
}

/// Build the canonical ordered rule catalogue.
///
/// Covers bounds checks on percentage fields, monotonicity between successive
/// sowing/harvest stages, coverage checks against governing area totals, and
/// aggregate checks (whole-table and grouped-by-record). Harvest percentage
/// fields carry only the upper bound; that asymmetry is inherited from the
/// source catalogue.
pub fn create_qc_rules() -> Vec<SpecQcRule> {
    use EnumQcComparand::{Column, Literal};
    use EnumQcCondition::{Ge, Le};

    vec![
        // Sowing 1
        create_row_rule("Sowing 1 vs Geographical", C_COL_AREA_AGRI, Le, Column(C_COL_AREA_GEO)),
        create_row_rule("Sowing 1 vs Agri Area", C_COL_SOWING_1, Le, Column(C_COL_AREA_AGRI)),
        create_row_rule("Sowing 1 % Max", C_COL_SOWING_1_PCT, Le, Literal("100")),
        create_row_rule("Sowing 1 % Min", C_COL_SOWING_1_PCT, Ge, Literal("0")),
        // Sowing 2
        create_row_rule("Sowing 2 vs Agri Area", C_COL_SOWING_2, Le, Column(C_COL_AREA_AGRI)),
        create_row_rule("Sowing 2 vs Sowing 1", C_COL_SOWING_2, Ge, Column(C_COL_SOWING_1)),
        create_row_rule("Sowing 2 % Max", C_COL_SOWING_2_PCT, Le, Literal("100")),
        create_row_rule("Sowing 2 % Min", C_COL_SOWING_2_PCT, Ge, Literal("0")),
        // Sowing 3
        create_row_rule("Sowing 3 vs Agri Area", C_COL_SOWING_3, Le, Column(C_COL_AREA_AGRI)),
        create_row_rule("Sowing 3 vs Sowing 2", C_COL_SOWING_3, Ge, Column(C_COL_SOWING_2)),
        create_row_rule("Sowing 3 % Max", C_COL_SOWING_3_PCT, Le, Literal("100")),
        create_row_rule("Sowing 3 % Min", C_COL_SOWING_3_PCT, Ge, Literal("0")),
        // Crop acreage
        create_row_rule("Acreage vs Agri Area", C_COL_CROP_ACRE, Le, Column(C_COL_AREA_AGRI)),
        create_row_rule("Acreage vs Sowing 3", C_COL_CROP_ACRE, Le, Column(C_COL_SOWING_3)),
        create_row_rule("Acreage % Max", C_COL_CROP_ACRE_PCT, Le, Literal("100")),
        create_row_rule("Acreage % Min", C_COL_CROP_ACRE_PCT, Ge, Literal("0")),
        // Harvest 1
        create_row_rule("Harvest 1 vs Agri Area", C_COL_HARVEST_1, Le, Column(C_COL_AREA_AGRI)),
        create_row_rule("Harvest 1 vs Acreage", C_COL_HARVEST_1, Le, Column(C_COL_CROP_ACRE)),
        create_row_rule("Harvest 1 % Max", C_COL_HARVEST_1_PCT, Le, Literal("100")),
        // Harvest 2
        create_row_rule("Harvest 2 vs Agri Area", C_COL_HARVEST_2, Le, Column(C_COL_AREA_AGRI)),
        create_row_rule("Harvest 2 vs Acreage", C_COL_HARVEST_2, Le, Column(C_COL_CROP_ACRE)),
        create_row_rule("Harvest 2 vs Harvest 1", C_COL_HARVEST_2, Ge, Column(C_COL_HARVEST_1)),
        create_row_rule("Harvest 2 % Max", C_COL_HARVEST_2_PCT, Le, Literal("100")),
        // Harvest 3
        create_row_rule("Harvest 3 vs Agri Area", C_COL_HARVEST_3, Le, Column(C_COL_AREA_AGRI)),
        create_row_rule("Harvest 3 vs Acreage", C_COL_HARVEST_3, Le, Column(C_COL_CROP_ACRE)),
        create_row_rule("Harvest 3 vs Harvest 2", C_COL_HARVEST_3, Ge, Column(C_COL_HARVEST_2)),
        create_row_rule("Harvest 3 % Max", C_COL_HARVEST_3_PCT, Le, Literal("100")),
        // Harvest 4
        create_row_rule("Harvest 4 vs Agri Area", C_COL_HARVEST_4, Le, Column(C_COL_AREA_AGRI)),
        create_row_rule("Harvest 4 vs Acreage", C_COL_HARVEST_4, Le, Column(C_COL_CROP_ACRE)),
        create_row_rule("Harvest 4 vs Harvest 3", C_COL_HARVEST_4, Ge, Column(C_COL_HARVEST_3)),
        create_row_rule("Harvest 4 % Max", C_COL_HARVEST_4_PCT, Le, Literal("100")),
        // Whole-table aggregate checks
        create_table_agg_rule(
            "Total Agri Area vs Geographical",
            C_COL_AREA_AGRI,
            EnumQcAggregation::Sum,
            Le,
            Column(C_COL_AREA_GEO),
        ),
        create_table_agg_rule(
            "Total Acreage vs Sowing 3",
            C_COL_CROP_ACRE,
            EnumQcAggregation::Sum,
            Le,
            Column(C_COL_SOWING_3),
        ),
        // Per-record grouped aggregate checks. The agriculture total repeats
        // across a record's crop rows, so the aggregation deduplicates first.
        create_grouped_agg_rule(
            "RID: Total Agri >= Sum(Crop Area)",
            C_COL_AREA_AGRI,
            EnumQcAggregation::Sum,
            Ge,
            Column(C_COL_CROP_ACRE),
            C_COL_RID,
        ),
    ]
}

/// Build the fixed operator legend: six comparison operators, five
/// aggregation functions. Static reference material; never derived from the
/// rule table.
pub fn create_legend_entries() -> Vec<SpecLegendEntry> {
    use EnumLegendCategory::{Aggregate, Logical};

    let l_descriptions_logical = [
        "Less than or Equal to",
        "Greater than or Equal to",
        "Exactly Equal to",
        "Not Equal to",
        "Strictly Less than",
        "Strictly Greater than",
    ];

    let mut l_entries: Vec<SpecLegendEntry> = EnumQcCondition::tokens_all()
        .iter()
        .zip(l_descriptions_logical)
        .map(|(token, description)| SpecLegendEntry {
            category: Logical,
            token,
            description,
        })
        .collect();

    let l_aggregates = [
        ("Sum", "Total sum of all values"),
        ("Avg", "Average of all values"),
        ("Min", "Lowest value in column"),
        ("Max", "Highest value in column"),
        ("Count", "Number of entries"),
    ];
    for (token, description) in l_aggregates {
        l_entries.push(SpecLegendEntry {
            category: Aggregate,
            token,
            description,
        });
    }

    l_entries
}
