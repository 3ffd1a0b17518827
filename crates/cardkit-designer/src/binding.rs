//! Template-to-row data binding.
//!
//! [`bind`] is a pure function of template and row: it deep-clones the
//! template's document and substitutes mapped values into element
//! content fields. The template itself is never mutated, which is the
//! invariant that keeps batch export safe to run against a document the
//! editor also holds.
//!
//! Missing mapping targets, absent columns, and unmatched conditionals
//! all leave the element's prior value in place. That "fall back to the
//! template default" behavior is deliberate and surfaced only on the
//! debug log channel.

use crate::dataset::Row;
use crate::document::Document;
use crate::template::{Condition, Mapping, MappingOperator, Template};

/// Produce a bound document for one dataset row.
pub fn bind(template: &Template, row: &Row) -> Document {
    let mut doc = template.document.clone();
    let Some(source) = &template.data_source else {
        return doc;
    };

    for (element_id, mapping) in &source.mappings {
        let Some(element) = doc
            .elements
            .iter_mut()
            .find(|el| el.id.as_deref() == Some(element_id.as_str()))
        else {
            tracing::debug!("Mapping target {:?} not found in template", element_id);
            continue;
        };

        let value = match mapping {
            Mapping::Direct { column } => match row.non_empty(column) {
                Some(cell) => Some(cell.to_string()),
                None => {
                    tracing::debug!(
                        "Column {:?} absent or empty; element {:?} keeps its value",
                        column,
                        element_id
                    );
                    None
                }
            },
            Mapping::Conditional { conditions } => {
                let result = first_match(conditions, row);
                if result.is_none() {
                    tracing::debug!(
                        "No condition matched for element {:?}; keeping template value",
                        element_id
                    );
                }
                result
            }
            Mapping::Macro { expression } => Some(expand_macro(expression, row)),
        };

        if let Some(value) = value {
            if !element.set_primary_content(&value) {
                tracing::debug!(
                    "Element {:?} has no content field; mapping ignored",
                    element_id
                );
            }
        }
    }

    doc
}

/// Evaluate conditions in declared order; the first true one wins.
fn first_match(conditions: &[Condition], row: &Row) -> Option<String> {
    conditions
        .iter()
        .find(|c| evaluate(c, row))
        .map(|c| c.result.clone())
}

fn evaluate(condition: &Condition, row: &Row) -> bool {
    let Some(cell) = row.get(&condition.column) else {
        tracing::debug!("Condition column {:?} absent from row", condition.column);
        return false;
    };
    let value = condition.value.as_str();
    match condition.operator {
        MappingOperator::Equals => cell == value,
        MappingOperator::NotEquals => cell != value,
        MappingOperator::Contains => cell.to_lowercase().contains(&value.to_lowercase()),
        MappingOperator::GreaterThan => match (cell.parse::<f64>(), value.parse::<f64>()) {
            (Ok(a), Ok(b)) => a > b,
            _ => false,
        },
        MappingOperator::LessThan => match (cell.parse::<f64>(), value.parse::<f64>()) {
            (Ok(a), Ok(b)) => a < b,
            _ => false,
        },
    }
}

/// Replace every `${column}` for columns present in the row. Null cells
/// substitute the empty string; placeholders naming unknown columns are
/// left literal.
fn expand_macro(expression: &str, row: &Row) -> String {
    let mut out = expression.to_string();
    for column in row.columns() {
        let placeholder = format!("${{{}}}", column);
        if out.contains(&placeholder) {
            out = out.replace(&placeholder, row.get(column).unwrap_or_default());
        }
    }
    out
}
