//! DataFrame derivation for the rule and legend tables.
//!
//! All cells serialize as text. The condition operator stays unescaped here;
//! the writer applies the spreadsheet-safety escape when the cell is emitted.

use polars::prelude::{Column, DataFrame};

use crate::conf::{TUP_HDR_LEGEND, TUP_HDR_QC};
use crate::spec::{SpecLegendEntry, SpecQcRule};

/// Serialize the rule catalogue into the nine-column QC table.
pub fn derive_qc_dataframe(rules: &[SpecQcRule]) -> Result<DataFrame, String> {
    let mut l_names = Vec::with_capacity(rules.len());
    let mut l_levels = Vec::with_capacity(rules.len());
    let mut l_targets = Vec::with_capacity(rules.len());
    let mut l_aggregations = Vec::with_capacity(rules.len());
    let mut l_conditions = Vec::with_capacity(rules.len());
    let mut l_comparands = Vec::with_capacity(rules.len());
    let mut l_if_compare_col = Vec::with_capacity(rules.len());
    let mut l_group_by = Vec::with_capacity(rules.len());
    let mut l_distinct = Vec::with_capacity(rules.len());

    for rule in rules {
        l_names.push(rule.name.to_string());
        l_levels.push(rule.level.token().to_string());
        l_targets.push(rule.target_column.to_string());
        l_aggregations.push(
            rule.aggregation
                .map(|agg| agg.token().to_string())
                .unwrap_or_default(),
        );
        l_conditions.push(rule.condition.token().to_string());
        l_comparands.push(rule.compare_against.value().to_string());
        l_if_compare_col.push(if rule.compare_against.if_column() { "Yes" } else { "No" }.to_string());
        l_group_by.push(rule.group_by.map(ToString::to_string).unwrap_or_default());
        l_distinct.push(if rule.if_distinct { "TRUE" } else { "" }.to_string());
    }

    let l_columns = vec![
        Column::new(TUP_HDR_QC[0].into(), l_names),
        Column::new(TUP_HDR_QC[1].into(), l_levels),
        Column::new(TUP_HDR_QC[2].into(), l_targets),
        Column::new(TUP_HDR_QC[3].into(), l_aggregations),
        Column::new(TUP_HDR_QC[4].into(), l_conditions),
        Column::new(TUP_HDR_QC[5].into(), l_comparands),
        Column::new(TUP_HDR_QC[6].into(), l_if_compare_col),
        Column::new(TUP_HDR_QC[7].into(), l_group_by),
        Column::new(TUP_HDR_QC[8].into(), l_distinct),
    ];

    DataFrame::new(l_columns).map_err(|err| format!("Failed to assemble QC rule table: {err}"))
}

/// Serialize the operator legend into the three-column Operators table.
pub fn derive_legend_dataframe(entries: &[SpecLegendEntry]) -> Result<DataFrame, String> {
    let mut l_categories = Vec::with_capacity(entries.len());
    let mut l_tokens = Vec::with_capacity(entries.len());
    let mut l_descriptions = Vec::with_capacity(entries.len());

    for entry in entries {
        l_categories.push(entry.category.token().to_string());
        l_tokens.push(entry.token.to_string());
        l_descriptions.push(entry.description.to_string());
    }

    let l_columns = vec![
        Column::new(TUP_HDR_LEGEND[0].into(), l_categories),
        Column::new(TUP_HDR_LEGEND[1].into(), l_tokens),
        Column::new(TUP_HDR_LEGEND[2].into(), l_descriptions),
    ];

    DataFrame::new(l_columns)
        .map_err(|err| format!("Failed to assemble operator legend table: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{create_legend_entries, create_qc_rules};

    fn cell_text(df: &DataFrame, column: &str, idx: usize) -> String {
        let value = df
            .column(column)
            .expect("column exists")
            .get(idx)
            .expect("row exists");
        // Display for string values adds surrounding quotes.
        value
            .get_str()
            .map(ToString::to_string)
            .unwrap_or_else(|| value.to_string())
    }

    #[test]
    fn qc_dataframe_has_expected_shape_and_headers() {
        let df = derive_qc_dataframe(&create_qc_rules()).expect("derive qc table");
        assert_eq!(df.height(), create_qc_rules().len());
        let l_headers: Vec<String> = df
            .get_column_names_str()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(l_headers, TUP_HDR_QC.map(ToString::to_string).to_vec());
    }

    #[test]
    fn qc_dataframe_serializes_row_level_rule_fields() {
        let df = derive_qc_dataframe(&create_qc_rules()).expect("derive qc table");
        // Row 2 is "Sowing 1 % Max".
        assert_eq!(cell_text(&df, "QC_Check_Name", 2), "Sowing 1 % Max");
        assert_eq!(cell_text(&df, "Level", 2), "Row");
        assert_eq!(cell_text(&df, "Aggregation", 2), "");
        assert_eq!(cell_text(&df, "Condition", 2), "<=");
        assert_eq!(cell_text(&df, "Compare_Against", 2), "100");
        assert_eq!(cell_text(&df, "Is_Compare_Column", 2), "No");
        assert_eq!(cell_text(&df, "Group_By", 2), "");
        assert_eq!(cell_text(&df, "Distinct", 2), "");
    }

    #[test]
    fn qc_dataframe_serializes_grouped_aggregate_rule_fields() {
        let l_rules = create_qc_rules();
        let df = derive_qc_dataframe(&l_rules).expect("derive qc table");
        let n_idx = l_rules
            .iter()
            .position(|r| r.name == "RID: Total Agri >= Sum(Crop Area)")
            .expect("rule present");
        assert_eq!(cell_text(&df, "Level", n_idx), "Agg");
        assert_eq!(cell_text(&df, "Aggregation", n_idx), "Sum");
        assert_eq!(cell_text(&df, "Condition", n_idx), ">=");
        assert_eq!(cell_text(&df, "Is_Compare_Column", n_idx), "Yes");
        assert_eq!(cell_text(&df, "Group_By", n_idx), "RID");
        assert_eq!(cell_text(&df, "Distinct", n_idx), "TRUE");
    }

    #[test]
    fn legend_dataframe_has_expected_shape_and_first_row() {
        let df = derive_legend_dataframe(&create_legend_entries()).expect("derive legend table");
        assert_eq!(df.height(), 11);
        let l_headers: Vec<String> = df
            .get_column_names_str()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(l_headers, TUP_HDR_LEGEND.map(ToString::to_string).to_vec());
        assert_eq!(cell_text(&df, "Category", 0), "Logical");
        assert_eq!(cell_text(&df, "Type", 0), "<=");
        assert_eq!(cell_text(&df, "Description", 0), "Less than or Equal to");
    }
}
