//! Parser for the engine's summary report.
//!
//! The report is line oriented:
//!
//! ```text
//! parent: 0:5c095ad7e90f tip      <- fixed-width label, remainder is the parent
//!  initial import                 <- free text, trimmed, is the message
//! branch: default                 <- everything after is "key: value"
//! commit: (clean)
//! ```

use crate::errors::{HugError, Result};
use std::collections::BTreeMap;

/// Width of the label on the first line (`"parent: "`)
const PARENT_LABEL_WIDTH: usize = "parent: ".len();

/// Dictionary-shaped view of a summary report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub parent: String,
    pub message: String,
    /// Remaining `key: value` lines, in report order
    pub fields: Vec<(String, String)>,
}

impl Summary {
    pub fn parse(output: &str) -> Result<Self> {
        let mut lines = output.lines();

        let (Some(first), Some(second)) = (lines.next(), lines.next()) else {
            return Err(HugError::CorruptRepository(format!(
                "summary produced fewer than 2 lines: {:?}",
                output
            )));
        };

        let parent = first.get(PARENT_LABEL_WIDTH..).ok_or_else(|| {
            HugError::CorruptRepository(format!("malformed parent line: {:?}", first))
        })?;

        let mut fields = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            match line.split_once(": ") {
                Some((key, value)) => fields.push((key.to_string(), value.to_string())),
                None => tracing::debug!(line, "skipping summary line without a key"),
            }
        }

        Ok(Summary {
            parent: parent.to_string(),
            message: second.trim().to_string(),
            fields,
        })
    }

    /// Look up a field by key; `parent` and `message` included
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "parent" => Some(self.parent.as_str()),
            "message" => Some(self.message.as_str()),
            _ => self
                .fields
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
        }
    }

    /// Flatten into a single key/value map
    ///
    /// A later field with a repeated key replaces an earlier one.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("parent".to_string(), self.parent.clone());
        map.insert("message".to_string(), self.message.clone());
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.clone());
        }
        map
    }
}
