//! Result grouper: fold flat join rows into nested view objects.
//!
//! Remote queries return one row per parent × child pair. [`group_rows`]
//! collapses those rows so each parent appears exactly once, in the order its
//! key was first seen, carrying every child contributed by its rows. The two
//! concrete groupings used by the pages ([`group_insight_labels`] and
//! [`group_action_item_insights`]) are thin parameterisations of it.

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Utc};

use crate::entities::{ActionItem, Insight, InsightSummary, Label};
use crate::rows::{ActionItemInsightRow, InsightLabelRow, timestamp_or};

/// A parent object with the children collected from its rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouped<P, C> {
    pub parent: P,
    pub children: Vec<C>,
}

/// Group `rows` by parent key.
///
/// - `parent_key` extracts the key; rows returning `None` contribute nothing
///   and are skipped without aborting the pass.
/// - `make_parent` builds the parent from the first row carrying a key.
/// - `child_of` builds the child; `None` means the row has no child (for
///   example a left-join row with a null child key), but the parent is still
///   created.
///
/// Output order is the order of first appearance of each key.
pub fn group_rows<R, K, P, C, I>(
    rows: I,
    parent_key: impl Fn(&R) -> Option<K>,
    make_parent: impl Fn(&R) -> P,
    child_of: impl Fn(&R) -> Option<C>,
) -> Vec<Grouped<P, C>>
where
    I: IntoIterator<Item = R>,
    K: Eq + Hash,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut grouped: Vec<Grouped<P, C>> = Vec::new();
    let mut skipped = 0usize;

    for row in rows {
        let Some(key) = parent_key(&row) else {
            skipped += 1;
            continue;
        };
        let slot = *slots.entry(key).or_insert_with(|| {
            grouped.push(Grouped {
                parent: make_parent(&row),
                children: Vec::new(),
            });
            grouped.len() - 1
        });
        if let Some(child) = child_of(&row) {
            grouped[slot].children.push(child);
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "grouping skipped rows without a parent key");
    }
    grouped
}

fn present(key: Option<&String>) -> Option<String> {
    key.filter(|k| !k.trim().is_empty()).cloned()
}

/// Group insight × label rows into insights with ordered `label_details`.
#[must_use]
pub fn group_insight_labels(rows: Vec<InsightLabelRow>) -> Vec<Insight> {
    group_rows(
        rows,
        |row| present(Some(&row.insight_key)),
        |row| Insight {
            id: row.insight_key.clone(),
            content: row.content.clone().unwrap_or_default(),
            title: row.title.clone(),
            label_details: Vec::new(),
        },
        |row| {
            present(row.label_key.as_ref()).map(|id| Label {
                id,
                name: row.label.clone(),
            })
        },
    )
    .into_iter()
    .map(|Grouped { mut parent, children }| {
        parent.label_details = children;
        parent
    })
    .collect()
}

/// Group action-item × insight rows into action items with ordered related
/// insights. `fetched_at` stands in for a missing creation date.
#[must_use]
pub fn group_action_item_insights(
    rows: Vec<ActionItemInsightRow>,
    fetched_at: DateTime<Utc>,
) -> Vec<ActionItem> {
    group_rows(
        rows,
        |row| present(Some(&row.actionitem_key)),
        |row| ActionItem {
            id: row.actionitem_key.clone(),
            content: row.content.clone().unwrap_or_default(),
            created_at: timestamp_or(row.created_at.as_deref(), fetched_at),
            related_insights: Vec::new(),
        },
        |row| {
            present(row.insight_key.as_ref()).map(|id| InsightSummary {
                id,
                content: row.insight_content.clone().unwrap_or_default(),
            })
        },
    )
    .into_iter()
    .map(|Grouped { mut parent, children }| {
        parent.related_insights = children;
        parent
    })
    .collect()
}

/// Keep the insights carrying `label_id` in their `label_details`.
#[must_use]
pub fn filter_insights_by_label(insights: Vec<Insight>, label_id: &str) -> Vec<Insight> {
    insights
        .into_iter()
        .filter(|insight| insight.has_label(label_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[derive(Debug, Clone)]
    struct Row {
        parent: Option<&'static str>,
        child: Option<&'static str>,
    }

    const fn row(parent: Option<&'static str>, child: Option<&'static str>) -> Row {
        Row { parent, child }
    }

    fn group(rows: Vec<Row>) -> Vec<Grouped<&'static str, &'static str>> {
        group_rows(rows, |r| r.parent, |r| r.parent.unwrap_or_default(), |r| r.child)
    }

    fn insight_row(key: &str, label: Option<(&str, &str)>) -> InsightLabelRow {
        InsightLabelRow {
            insight_key: key.to_string(),
            content: Some(format!("content {key}")),
            title: Some(format!("title {key}")),
            label_key: label.map(|(k, _)| k.to_string()),
            label: label.map(|(_, name)| name.to_string()),
        }
    }

    #[test]
    fn empty_input_groups_to_empty_output() {
        assert!(group(Vec::new()).is_empty());
    }

    #[test]
    fn parents_with_and_without_children() {
        let grouped = group(vec![
            row(Some("a"), Some("x")),
            row(Some("a"), Some("y")),
            row(Some("b"), None),
        ]);
        assert_eq!(
            grouped,
            vec![
                Grouped {
                    parent: "a",
                    children: vec!["x", "y"],
                },
                Grouped {
                    parent: "b",
                    children: vec![],
                },
            ]
        );
    }

    #[rstest]
    #[case(vec![row(Some("b"), Some("1")), row(Some("a"), Some("2")), row(Some("b"), Some("3"))], vec!["b", "a"])]
    #[case(vec![row(Some("c"), None), row(Some("a"), None), row(Some("b"), None), row(Some("a"), Some("z"))], vec!["c", "a", "b"])]
    #[case(vec![row(Some("a"), Some("1")), row(Some("a"), Some("1"))], vec!["a"])]
    fn order_follows_first_appearance(#[case] rows: Vec<Row>, #[case] expected: Vec<&str>) {
        let parents: Vec<&str> = group(rows).into_iter().map(|g| g.parent).collect();
        assert_eq!(parents, expected);
    }

    #[test]
    fn parent_count_equals_distinct_keys() {
        let rows = vec![
            row(Some("a"), Some("1")),
            row(Some("b"), None),
            row(Some("a"), None),
            row(Some("c"), Some("2")),
            row(Some("b"), Some("3")),
        ];
        let distinct: HashSet<_> = rows.iter().filter_map(|r| r.parent).collect();
        assert_eq!(group(rows).len(), distinct.len());
    }

    #[test]
    fn rows_without_parent_key_are_skipped() {
        let grouped = group(vec![
            row(None, Some("lost")),
            row(Some("a"), Some("kept")),
            row(None, None),
        ]);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].children, vec!["kept"]);
    }

    #[test]
    fn duplicate_children_are_kept() {
        let grouped = group(vec![row(Some("a"), Some("x")), row(Some("a"), Some("x"))]);
        assert_eq!(grouped[0].children, vec!["x", "x"]);
    }

    #[test]
    fn insight_labels_are_nested_in_row_order() {
        let insights = group_insight_labels(vec![
            insight_row("1", Some(("10", "Onboarding"))),
            insight_row("2", None),
            insight_row("1", Some(("11", "Pricing"))),
        ]);

        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].id, "1");
        assert_eq!(insights[0].content, "content 1");
        assert_eq!(insights[0].title.as_deref(), Some("title 1"));
        assert_eq!(
            insights[0].label_details,
            vec![
                Label {
                    id: "10".into(),
                    name: Some("Onboarding".into()),
                },
                Label {
                    id: "11".into(),
                    name: Some("Pricing".into()),
                },
            ]
        );
        assert_eq!(insights[0].labels(), vec!["Onboarding", "Pricing"]);
        assert!(insights[1].label_details.is_empty());
    }

    #[test]
    fn blank_label_key_adds_no_label() {
        let mut blank = insight_row("3", None);
        blank.label_key = Some("   ".into());
        blank.label = Some("ghost".into());
        let insights = group_insight_labels(vec![blank]);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].label_details.is_empty());
    }

    #[test]
    fn insight_attributes_come_from_first_row() {
        let mut later = insight_row("1", Some(("10", "Onboarding")));
        later.content = Some("different".into());
        let insights = group_insight_labels(vec![insight_row("1", None), later]);
        assert_eq!(insights[0].content, "content 1");
        assert_eq!(insights[0].label_details.len(), 1);
    }

    #[test]
    fn action_items_collect_related_insights() {
        let fetched_at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let rows = vec![
            ActionItemInsightRow {
                actionitem_key: "7".into(),
                content: Some("Ship CSV export".into()),
                created_at: Some("2024-05-20T08:00:00Z".into()),
                insight_key: Some("1".into()),
                insight_content: Some("Users want exports".into()),
            },
            ActionItemInsightRow {
                actionitem_key: "8".into(),
                content: None,
                created_at: None,
                insight_key: None,
                insight_content: None,
            },
            ActionItemInsightRow {
                actionitem_key: "7".into(),
                content: Some("Ship CSV export".into()),
                created_at: Some("2024-05-20T08:00:00Z".into()),
                insight_key: Some("2".into()),
                insight_content: None,
            },
        ];

        let items = group_action_item_insights(rows, fetched_at);
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].related_insights,
            vec![
                InsightSummary {
                    id: "1".into(),
                    content: "Users want exports".into(),
                },
                InsightSummary {
                    id: "2".into(),
                    content: String::new(),
                },
            ]
        );
        assert_eq!(
            items[0].created_at,
            Utc.with_ymd_and_hms(2024, 5, 20, 8, 0, 0).unwrap()
        );
        assert_eq!(items[1].content, "");
        assert_eq!(items[1].created_at, fetched_at);
        assert!(items[1].related_insights.is_empty());
    }

    #[test]
    fn filter_by_label_uses_label_details() {
        let insights = group_insight_labels(vec![
            insight_row("1", Some(("10", "Onboarding"))),
            insight_row("2", Some(("11", "Pricing"))),
            insight_row("3", None),
            insight_row("2", Some(("10", "Onboarding"))),
        ]);
        let filtered = filter_insights_by_label(insights, "10");
        let ids: Vec<&str> = filtered.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}
