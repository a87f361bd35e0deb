//! Remote query descriptions.
//!
//! A [`Select`] reads rows from a relation with equality filters; an [`Rpc`]
//! calls a stored procedure with named JSON arguments. Both are plain data so
//! a [`crate::DataSource`] can be faked in tests and inspected afterwards.

use serde_json::{Map, Value};

/// `select` from a relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    pub relation: String,
    pub columns: String,
    pub filters: Vec<(String, String)>,
}

impl Select {
    /// Select every column of `relation`.
    #[must_use]
    pub fn from(relation: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            columns: "*".to_string(),
            filters: Vec::new(),
        }
    }

    #[must_use]
    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    /// Add a `column = value` filter.
    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((column.into(), value.into()));
        self
    }

    /// Query string in PostgREST syntax, already percent-encoded.
    ///
    /// `select=a,b&col=eq.value`
    #[must_use]
    pub fn query_string(&self) -> String {
        let mut parts = vec![format!("select={}", encode_columns(&self.columns))];
        for (column, value) in &self.filters {
            parts.push(format!(
                "{}=eq.{}",
                urlencoding::encode(column),
                urlencoding::encode(value)
            ));
        }
        parts.join("&")
    }
}

/// Commas and `*` stay literal; everything else in a column name (spaces,
/// quotes) is encoded.
fn encode_columns(columns: &str) -> String {
    columns
        .split(',')
        .map(str::trim)
        .map(|column| {
            if column == "*" {
                column.to_string()
            } else {
                urlencoding::encode(column).into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Remote procedure call.
#[derive(Debug, Clone, PartialEq)]
pub struct Rpc {
    pub function: String,
    pub args: Map<String, Value>,
}

impl Rpc {
    #[must_use]
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            args: Map::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }

    /// Request body: the named arguments as one JSON object.
    #[must_use]
    pub fn body(&self) -> Value {
        Value::Object(self.args.clone())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn select_all_by_default() {
        assert_eq!(Select::from("insights").query_string(), "select=*");
    }

    #[test]
    fn select_columns_and_filters() {
        let select = Select::from("feature_evidence")
            .columns("id, content")
            .eq("feature_id", "fr 3");
        assert_eq!(
            select.query_string(),
            "select=id,content&feature_id=eq.fr%203"
        );
    }

    #[test]
    fn quoted_column_names_are_encoded() {
        let select = Select::from("feedbacks").columns(r#"feedback_key, "Creation Date""#);
        assert_eq!(
            select.query_string(),
            "select=feedback_key,%22Creation%20Date%22"
        );
    }

    #[test]
    fn rpc_body_holds_named_args() {
        let rpc = Rpc::new("get_feature_evidence").arg("p_feature_id", "fr-3");
        assert_eq!(rpc.body(), json!({"p_feature_id": "fr-3"}));
        assert_eq!(Rpc::new("get_feature_requests").body(), json!({}));
    }
}
