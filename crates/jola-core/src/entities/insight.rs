use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A label attached to insights and action items.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Label {
    pub id: String,
    pub name: Option<String>,
}

/// An AI-derived insight with its labels, in the order the rows listed them.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Insight {
    pub id: String,
    pub content: String,
    pub title: Option<String>,
    pub label_details: Vec<Label>,
}

impl Insight {
    /// Label names, derived from `label_details`. Unnamed labels are skipped.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.label_details
            .iter()
            .filter_map(|label| label.name.as_deref())
            .collect()
    }

    #[must_use]
    pub fn has_label(&self, label_id: &str) -> bool {
        self.label_details.iter().any(|label| label.id == label_id)
    }

    /// Title for display.
    #[must_use]
    pub fn title_or_untitled(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled Insight")
    }
}
