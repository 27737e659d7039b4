//! Lexical data-source classification.
//!
//! Infers which upstream systems a SQL statement touches from substring
//! cues alone. This is a best-effort heuristic: false positives and false
//! negatives are expected and acceptable. The keyword tables are policy,
//! not a semantic contract, and can be swapped per deployment.

use vantage_core::DataSourceTag;

/// System-name keywords, matched first, in table order.
const SYSTEM_KEYWORDS: &[(&str, DataSourceTag)] = &[
    ("salesforce", DataSourceTag::Crm),
    ("sfdc", DataSourceTag::Crm),
    ("netsuite", DataSourceTag::ErpPartner),
    ("erp", DataSourceTag::ErpPartner),
    ("snowflake", DataSourceTag::Warehouse),
    ("redshift", DataSourceTag::Warehouse),
    ("warehouse", DataSourceTag::Warehouse),
];

/// Domain-noun fallback, consulted only when no system keyword matches.
const DOMAIN_KEYWORDS: &[(&str, DataSourceTag)] = &[
    ("account", DataSourceTag::Crm),
    ("lead", DataSourceTag::Crm),
    ("opportunity", DataSourceTag::Crm),
    ("contact", DataSourceTag::Crm),
    ("invoice", DataSourceTag::ErpPartner),
    ("purchase_order", DataSourceTag::ErpPartner),
    ("shipment", DataSourceTag::ErpPartner),
    ("vendor", DataSourceTag::ErpPartner),
];

/// Classifies SQL text into provenance tags.
pub struct SourceClassifier {
    system_table: Vec<(String, DataSourceTag)>,
    domain_table: Vec<(String, DataSourceTag)>,
}

impl Default for SourceClassifier {
    fn default() -> Self {
        let to_owned = |table: &[(&str, DataSourceTag)]| {
            table
                .iter()
                .map(|(kw, tag)| (kw.to_string(), *tag))
                .collect()
        };
        Self {
            system_table: to_owned(SYSTEM_KEYWORDS),
            domain_table: to_owned(DOMAIN_KEYWORDS),
        }
    }
}

impl SourceClassifier {
    /// Build a classifier with custom keyword tables. Keywords are matched
    /// case-insensitively, in the order given; each table entry contributes
    /// its tag at most once.
    pub fn with_tables(
        system_table: Vec<(String, DataSourceTag)>,
        domain_table: Vec<(String, DataSourceTag)>,
    ) -> Self {
        Self {
            system_table,
            domain_table,
        }
    }

    /// Classify a statement into an ordered, deduplicated tag list.
    ///
    /// System keywords are tried first; if none match, the domain-noun
    /// fallback runs; if that also yields nothing, the single default
    /// `warehouse` tag is emitted.
    pub fn classify(&self, sql: &str) -> Vec<DataSourceTag> {
        let lower = sql.to_lowercase();

        let mut tags = match_table(&self.system_table, &lower);
        if tags.is_empty() {
            tags = match_table(&self.domain_table, &lower);
        }
        if tags.is_empty() {
            tags.push(DataSourceTag::Warehouse);
        }
        tags
    }
}

/// Collect each matching keyword's tag once, preserving table order.
fn match_table(table: &[(String, DataSourceTag)], lower_sql: &str) -> Vec<DataSourceTag> {
    let mut tags = Vec::new();
    for (keyword, tag) in table {
        if lower_sql.contains(keyword.as_str()) && !tags.contains(tag) {
            tags.push(*tag);
        }
    }
    tags
}

// =============================================================================
// Tests
// =============================================================================
