use std::collections::{BTreeMap, HashMap};

use serde::{ser::SerializeMap, Deserialize, Deserializer, Serialize, Serializer};

use crate::analysis::fields::{ResumeField, ERROR, NOT_AVAILABLE};

/// One interpreted résumé. Holds a value for every `ResumeField`.
///
/// Serializes as a JSON object keyed by column label in column order.
/// Deserializing accepts any subset of labels and backfills the rest with
/// `"Not Available"`; unknown keys are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRecord {
    values: BTreeMap<ResumeField, String>,
}

impl ExtractedRecord {
    /// Every field set to the same value.
    pub fn filled(value: &str) -> Self {
        Self {
            values: ResumeField::ALL
                .into_iter()
                .map(|f| (f, value.to_string()))
                .collect(),
        }
    }

    pub fn not_available() -> Self {
        Self::filled(NOT_AVAILABLE)
    }

    pub fn error() -> Self {
        Self::filled(ERROR)
    }

    /// Builds a record from whatever fields are known; the rest become
    /// `"Not Available"`.
    pub fn from_partial<I>(known: I) -> Self
    where
        I: IntoIterator<Item = (ResumeField, String)>,
    {
        let mut record = Self::not_available();
        for (field, value) in known {
            record.set(field, value);
        }
        record
    }

    pub fn get(&self, field: ResumeField) -> &str {
        self.values
            .get(&field)
            .map(String::as_str)
            .unwrap_or(NOT_AVAILABLE)
    }

    pub fn set(&mut self, field: ResumeField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// `(field, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (ResumeField, &str)> + '_ {
        ResumeField::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    pub fn name(&self) -> &str {
        self.get(ResumeField::Name)
    }

    pub fn suggested_role(&self) -> &str {
        self.get(ResumeField::SuggestedCareerRole)
    }

    /// `Label: value` lines, one per field. Used to hand a record back to
    /// the generator.
    pub fn to_prompt_lines(&self) -> String {
        self.iter()
            .map(|(f, v)| format!("{}: {}", f.label(), v))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ExtractedRecord {
    fn default() -> Self {
        Self::not_available()
    }
}

impl Serialize for ExtractedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ResumeField::ALL.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.label(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ExtractedRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let known = raw.into_iter().filter_map(|(label, value)| {
            let field = ResumeField::from_label(&label)?;
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => return None,
                other => other.to_string(),
            };
            Some((field, value))
        });
        Ok(ExtractedRecord::from_partial(known))
    }
}
