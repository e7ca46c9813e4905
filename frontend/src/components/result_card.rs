//! Result card - summary, extracted fields and the original message body.

use leptos::*;

use crate::config::UNKNOWN_CLASSIFICATION;
use crate::types::{Classification, ExtractedFields, ExtractionResult, FieldKey};

/// Classification badge text.
#[derive(Clone, Debug, PartialEq)]
pub struct Badge {
    pub label: String,
    /// Risk-type code, shown in parentheses after the label
    pub code: Option<String>,
}

impl Badge {
    pub fn from_classification(classification: Option<&Classification>) -> Self {
        let non_blank = |s: &Option<String>| s.clone().filter(|s| !s.trim().is_empty());

        let (label, code) = match classification {
            Some(Classification::Label(label)) => (Some(label.clone()), None),
            Some(Classification::RiskType { code, name }) => (non_blank(name), non_blank(code)),
            None => (None, None),
        };

        Self {
            label: label
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_CLASSIFICATION.to_string()),
            code,
        }
    }
}

/// One label/value row of the fields table.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldRow {
    pub key: FieldKey,
    pub label: String,
    pub value: String,
}

/// Rows for every field that has a value, in schema order.
pub fn field_rows(fields: &ExtractedFields) -> Vec<FieldRow> {
    fields
        .present()
        .map(|(key, value)| FieldRow {
            key,
            label: key.label(),
            value: value.to_string(),
        })
        .collect()
}

/// Everything the card displays.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultCardModel {
    pub badge: Badge,
    pub sender: String,
    pub subject: String,
    /// `None` when no field has a value: the table is not rendered at all
    pub rows: Option<Vec<FieldRow>>,
    pub raw_body: String,
}

impl ResultCardModel {
    pub fn from_result(result: &ExtractionResult) -> Self {
        let rows = field_rows(&result.fields);
        Self {
            badge: Badge::from_classification(result.classification.as_ref()),
            sender: result.sender.clone(),
            subject: result.subject.clone(),
            rows: (!rows.is_empty()).then_some(rows),
            raw_body: result.raw_body.clone(),
        }
    }
}

#[component]
pub fn ResultCard(result: ExtractionResult) -> impl IntoView {
    let model = ResultCardModel::from_result(&result);

    view! {
        <div class="result-card">
            <div class="result-summary">
                <span class="classification-badge">
                    {model.badge.label}
                    {model.badge.code.map(|code| view! {
                        <span class="classification-code">" (" {code} ")"</span>
                    })}
                </span>
                <span class="result-sender">{model.sender}</span>
            </div>

            <h2 class="result-subject">{model.subject}</h2>

            {model.rows.map(|rows| view! {
                <table class="result-fields">
                    <tbody>
                        {rows.into_iter().map(|row| view! {
                            <tr data-field=row.key.as_str()>
                                <td class="field-label">{row.label}</td>
                                <td class="field-value">{row.value}</td>
                            </tr>
                        }).collect_view()}
                    </tbody>
                </table>
            })}

            // Collapsed until the user opens it
            <details class="raw-body">
                <summary>"Raw body"</summary>
                <pre style="white-space: pre-wrap;">{model.raw_body}</pre>
            </details>
        </div>
    }
}
