//! Documents holding records whose date fields can be fixed in place.

use std::{fs, path::Path};

use anyhow::{Context, anyhow};
use datofiks::FieldStore;

pub mod bib;
pub mod json;

pub trait Document {
    /// Visit every record with a name to report it by.
    fn for_each_record(&mut self, f: &mut dyn FnMut(&str, &mut dyn FieldStore));

    fn record_count(&self) -> usize;

    /// The document in its original format, with any changes applied.
    fn render(&self) -> anyhow::Result<String>;
}

type LoadFn = fn(&str) -> anyhow::Result<Box<dyn Document>>;

/// Supported formats by file extension.
///
/// NOTE: Ordering is important here, as it signifies priority. If two formats claim the same
/// extension, the first one to show up in this list will be used.
static FORMATS: &[(&str, LoadFn)] = &[("bib", bib::load), ("json", json::load)];

/// Read and parse `path`, picking the format from its extension.
pub fn load(path: &Path) -> anyhow::Result<Box<dyn Document>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let (_, load) = FORMATS
        .iter()
        .find(|(e, _)| *e == ext)
        .ok_or_else(|| anyhow!("unsupported file type: {}", path.display()))?;

    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    load(&text).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn unknown_extensions_are_refused() {
        let err = load(&PathBuf::from("refs.txt")).err().expect("error");
        assert!(err.to_string().contains("unsupported file type"));
    }

    #[test]
    fn format_follows_extension() {
        let dir = TempDir::new().expect("tmp dir");
        let path = dir.path().join("refs.JSON");
        fs::write(&path, r#"[{"dato": "May 2012"}]"#).expect("write");
        let doc = load(&path).expect("load");
        assert_eq!(doc.record_count(), 1);
    }

    #[test]
    fn parse_errors_name_the_file() {
        let dir = TempDir::new().expect("tmp dir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{").expect("write");
        let err = load(&path).err().expect("error");
        assert!(format!("{err:#}").contains("broken.json"));
    }
}
