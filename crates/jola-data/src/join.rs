//! Client-side left joins producing flat join rows.
//!
//! The backend exposes base relations and link tables. These joins produce
//! one row per parent × child pair (a single row with no child for a parent
//! without links), ready for [`jola_core::grouping`].

use std::collections::HashMap;

use jola_core::rows::{
    ActionItemInsightLink, ActionItemInsightRow, ActionItemRow, InsightLabelLink,
    InsightLabelRow, InsightRow, LabelRow,
};

/// `insights ⟕ insight_labels ⟕ labels`, in insight order then link order.
/// A link to an unknown label keeps the key with no name.
#[must_use]
pub fn join_insight_labels(
    insights: Vec<InsightRow>,
    links: &[InsightLabelLink],
    labels: &[LabelRow],
) -> Vec<InsightLabelRow> {
    let names: HashMap<&str, Option<&String>> = labels
        .iter()
        .map(|label| (label.label_key.as_str(), label.label.as_ref()))
        .collect();
    let mut by_insight: HashMap<&str, Vec<&str>> = HashMap::new();
    for link in links {
        by_insight
            .entry(link.insight_key.as_str())
            .or_default()
            .push(link.label_key.as_str());
    }

    let mut rows = Vec::new();
    for insight in insights {
        let label_keys = by_insight.get(insight.insight_key.as_str());
        match label_keys {
            None => rows.push(InsightLabelRow {
                insight_key: insight.insight_key,
                content: insight.content,
                title: insight.title,
                label_key: None,
                label: None,
            }),
            Some(keys) => {
                for key in keys {
                    rows.push(InsightLabelRow {
                        insight_key: insight.insight_key.clone(),
                        content: insight.content.clone(),
                        title: insight.title.clone(),
                        label_key: Some((*key).to_string()),
                        label: names.get(key).copied().flatten().cloned(),
                    });
                }
            }
        }
    }
    rows
}

/// `action_items ⟕ actionitems_insights ⟕ insights`, in action-item order
/// then link order.
#[must_use]
pub fn join_action_item_insights(
    items: Vec<ActionItemRow>,
    links: &[ActionItemInsightLink],
    insights: &[InsightRow],
) -> Vec<ActionItemInsightRow> {
    let contents: HashMap<&str, Option<&String>> = insights
        .iter()
        .map(|insight| (insight.insight_key.as_str(), insight.content.as_ref()))
        .collect();
    let mut by_item: HashMap<&str, Vec<&str>> = HashMap::new();
    for link in links {
        by_item
            .entry(link.actionitem_key.as_str())
            .or_default()
            .push(link.insight_key.as_str());
    }

    let mut rows = Vec::new();
    for item in items {
        match by_item.get(item.actionitem_key.as_str()) {
            None => rows.push(ActionItemInsightRow {
                actionitem_key: item.actionitem_key,
                content: item.content,
                created_at: item.created_at,
                insight_key: None,
                insight_content: None,
            }),
            Some(keys) => {
                for key in keys {
                    rows.push(ActionItemInsightRow {
                        actionitem_key: item.actionitem_key.clone(),
                        content: item.content.clone(),
                        created_at: item.created_at.clone(),
                        insight_key: Some((*key).to_string()),
                        insight_content: contents.get(key).copied().flatten().cloned(),
                    });
                }
            }
        }
    }
    rows
}
