//! A JSON array of flat objects, one object per record.

use anyhow::{anyhow, bail};
use datofiks::{Field, FieldStore};
use serde_json::{Map, Value};

use super::Document;

pub struct JsonDocument {
    records: Vec<Map<String, Value>>,
}

pub fn load(text: &str) -> anyhow::Result<Box<dyn Document>> {
    Ok(Box::new(JsonDocument::parse(text)?))
}

impl JsonDocument {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Array(items) = value else {
            bail!("expected an array of objects");
        };
        let records = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(map),
                other => Err(anyhow!("record {i} is not an object: {other}")),
            })
            .collect::<anyhow::Result<_>>()?;
        Ok(Self { records })
    }
}

/// Name of a record in reports: its `id` or `key` if it has one, else its position.
fn record_name(map: &Map<String, Value>, index: usize) -> String {
    ["id", "key"]
        .iter()
        .find_map(|k| map.get(*k).and_then(scalar))
        .unwrap_or_else(|| format!("#{}", index + 1))
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl Document for JsonDocument {
    fn for_each_record(&mut self, f: &mut dyn FnMut(&str, &mut dyn FieldStore)) {
        for (i, map) in self.records.iter_mut().enumerate() {
            let name = record_name(map, i);
            f(&name, &mut JsonRecord(map));
        }
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }

    fn render(&self) -> anyhow::Result<String> {
        let mut out = serde_json::to_string_pretty(&self.records)?;
        out.push('\n');
        Ok(out)
    }
}

/// Strings and numbers are exposed as fields; nested values are left alone.
struct JsonRecord<'a>(&'a mut Map<String, Value>);

impl FieldStore for JsonRecord<'_> {
    fn fields(&self) -> Vec<Field> {
        self.0
            .iter()
            .filter_map(|(k, v)| scalar(v).map(|v| Field::new(k.as_str(), v)))
            .collect()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), Value::String(value.to_string()));
    }

    fn remove(&mut self, key: &str) {
        self.0.shift_remove(key);
    }
}
