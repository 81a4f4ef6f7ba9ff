//! Rule and legend data models.

////////////////////////////////////////////////////////////////////////////////
// #region RuleEnums

/// Scope a rule applies at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumQcLevel {
    /// Rule applies independently to each record.
    Row,
    /// Rule applies to a value computed over a group of records.
    Agg,
}

impl EnumQcLevel {
    /// Serialized token for the `Level` column.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Row => "Row",
            Self::Agg => "Agg",
        }
    }
}

/// Aggregation function applied to the target column when level is `Agg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumQcAggregation {
    /// Total sum of all values.
    Sum,
    /// Average of all values.
    Avg,
    /// Lowest value in column.
    Min,
    /// Highest value in column.
    Max,
    /// Number of entries.
    Count,
}

impl EnumQcAggregation {
    /// Serialized token for the `Aggregation` column.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Sum => "Sum",
            Self::Avg => "Avg",
            Self::Min => "Min",
            Self::Max => "Max",
            Self::Count => "Count",
        }
    }
}

/// Comparison operator, stored unescaped; escaping for spreadsheet safety is
/// applied at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumQcCondition {
    /// Less than or equal to.
    Le,
    /// Greater than or equal to.
    Ge,
    /// Exactly equal to.
    Eq,
    /// Not equal to.
    Ne,
    /// Strictly less than.
    Lt,
    /// Strictly greater than.
    Gt,
}

impl EnumQcCondition {
    /// Serialized token for the `Condition` column.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
        }
    }

    /// All recognized comparison tokens, in legend order.
    pub fn tokens_all() -> [&'static str; 6] {
        ["<=", ">=", "==", "!=", "<", ">"]
    }
}

/// Right-hand side of a rule comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumQcComparand {
    /// Compare against another column's value (row-wise, or aggregated the
    /// same way as the target for `Agg` rules).
    Column(&'static str),
    /// Compare against a literal numeric threshold, kept as text.
    Literal(&'static str),
}

impl EnumQcComparand {
    /// Serialized text for the `Compare_Against` column.
    pub fn value(&self) -> &'static str {
        match self {
            Self::Column(name) => name,
            Self::Literal(text) => text,
        }
    }

    /// Whether `Compare_Against` names a column.
    pub fn if_column(&self) -> bool {
        matches!(self, Self::Column(_))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RuleAndLegendRows

/// One QC check in the canonical catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecQcRule {
    /// Human-readable check identifier, unique within the table.
    pub name: &'static str,
    /// Row-level or aggregate-level scope.
    pub level: EnumQcLevel,
    /// Dataset column the rule inspects.
    pub target_column: &'static str,
    /// Aggregation applied to the target column; `None` for row-level rules.
    pub aggregation: Option<EnumQcAggregation>,
    /// Comparison operator.
    pub condition: EnumQcCondition,
    /// Threshold or column the target is compared against.
    pub compare_against: EnumQcComparand,
    /// Optional grouping key column for aggregate rules.
    pub group_by: Option<&'static str>,
    /// Deduplicate values within each group before aggregating.
    pub if_distinct: bool,
}

/// Legend category for an operator/function token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumLegendCategory {
    /// Comparison operator.
    Logical,
    /// Aggregation function.
    Aggregate,
}

impl EnumLegendCategory {
    /// Serialized token for the `Category` column.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Logical => "Logical",
            Self::Aggregate => "Aggregate",
        }
    }
}

/// One row of the operator legend sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecLegendEntry {
    /// Logical or Aggregate.
    pub category: EnumLegendCategory,
    /// Operator or function token as shown in the workbook.
    pub token: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
