//! BibLaTeX bibliographies, one entry per record.

use biblatex::{Bibliography, Chunk, ChunksExt, Entry, Spanned};
use datofiks::{Field, FieldStore};

use super::Document;

pub struct BibDocument {
    bibliography: Bibliography,
}

pub fn load(text: &str) -> anyhow::Result<Box<dyn Document>> {
    Ok(Box::new(BibDocument::parse(text)?))
}

impl BibDocument {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let bibliography = Bibliography::parse(text)
            .map_err(|e| anyhow::anyhow!("failed to parse BibLaTeX: {e}"))?;
        Ok(Self { bibliography })
    }
}

impl Document for BibDocument {
    fn for_each_record(&mut self, f: &mut dyn FnMut(&str, &mut dyn FieldStore)) {
        for entry in self.bibliography.iter_mut() {
            let key = entry.key.clone();
            f(&key, &mut BibRecord(entry));
        }
    }

    fn record_count(&self) -> usize {
        self.bibliography.len()
    }

    fn render(&self) -> anyhow::Result<String> {
        Ok(self.bibliography.to_biblatex_string())
    }
}

/// Field values are read verbatim, so `{{mai 2012}}` and `mai 2012` look the same, and written
/// back as plain text.
struct BibRecord<'a>(&'a mut Entry);

impl FieldStore for BibRecord<'_> {
    fn fields(&self) -> Vec<Field> {
        self.0
            .fields
            .iter()
            .map(|(k, v)| Field::new(k.as_str(), v.format_verbatim()))
            .collect()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.fields.insert(
            key.to_string(),
            vec![Spanned::detached(Chunk::Normal(value.to_string()))],
        );
    }

    fn remove(&mut self, key: &str) {
        self.0.fields.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datofiks::{ReconcileOptions, reconcile};

    const BIB: &str = r#"
@article{nilsen1951,
    author = {Nilsen, Kari},
    title = {Om fjell},
    year = {1951-53},
}

@online{aftenposten,
    title = {Nyhet},
    date = {30. november 2010 kl. 14:12},
    urldate = {May 2012},
}
"#;

    #[test]
    fn entries_are_records() {
        let mut doc = BibDocument::parse(BIB).expect("parse");
        assert_eq!(doc.record_count(), 2);

        let mut keys = Vec::new();
        doc.for_each_record(&mut |key, store| {
            keys.push(key.to_string());
            assert!(store.fields().iter().any(|f| f.key == "title"));
        });
        assert_eq!(keys, ["nilsen1951", "aftenposten"]);
    }

    #[test]
    fn fixes_are_written_back() {
        let mut doc = BibDocument::parse(BIB).expect("parse");
        doc.for_each_record(&mut |_, store| {
            reconcile(store, &ReconcileOptions { current_year: 2015 }, None);
        });

        let out = BibDocument::parse(&doc.render().expect("render")).expect("reparse");
        let fields: Vec<Vec<Field>> = out
            .bibliography
            .iter()
            .map(|e| {
                e.fields
                    .iter()
                    .map(|(k, v)| Field::new(k.as_str(), v.format_verbatim()))
                    .collect()
            })
            .collect();

        let value = |entry: usize, key: &str| {
            fields[entry]
                .iter()
                .find(|f| f.key == key)
                .map(|f| f.value.clone())
        };
        assert_eq!(value(0, "date").as_deref(), Some("1951–1953"));
        assert_eq!(value(0, "year"), None);
        assert_eq!(value(1, "date").as_deref(), Some("30. november 2010"));
        assert_eq!(value(1, "urldate").as_deref(), Some("mai 2012"));
    }

    #[test]
    fn invalid_bibliographies_are_refused() {
        assert!(BibDocument::parse("@article{broken, title = {unclosed").is_err());
    }
}
