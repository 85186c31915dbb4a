use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct BatchBody {
    #[serde(default)]
    pub ids: Vec<serde_json::Value>,
}

impl BatchBody {
    /// Positive ids in first-seen order; numbers and numeric strings are
    /// accepted, anything else is skipped.
    pub fn valid_ids(&self) -> Vec<i64> {
        let mut ids = Vec::new();
        for raw in &self.ids {
            let id = match raw {
                serde_json::Value::Number(n) => n.as_i64(),
                serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
                _ => None,
            };
            if let Some(id) = id.filter(|id| *id >= 1) {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        ids
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub results: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn batch_ids_skip_invalid_and_duplicates() {
        let body: BatchBody =
            serde_json::from_value(json!({ "ids": [3, "7", -1, "x", 0, null, 3, 12.5] })).unwrap();
        assert_eq!(body.valid_ids(), vec![3, 7]);
    }
}
