//! Manual review of values nothing automatic could fix, remembered between runs.

use std::{
    collections::HashMap,
    fs::{self, File, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, anyhow, ensure};
use tracing::{debug, warn};

/// Separates the original value from the reviewed one on a line of a memo file.
pub const SEPARATOR: &str = "===";

/// Answers given by a reviewer, keyed by the value they were asked about.
pub trait ReviewStore {
    fn get(&self, original: &str) -> Option<String>;

    /// Remember `corrected` for `original`. An empty `corrected` means "leave it as it is".
    fn append(&self, original: &str, corrected: &str) -> anyhow::Result<()>;
}

/// Answers kept in a text file, one `original===corrected` line each.
///
/// The whole file is read at [`MemoFile::open`]. New answers are appended one line at a time
/// while holding a lock, so a memo can be shared between threads.
#[derive(Debug)]
pub struct MemoFile {
    path: PathBuf,
    inner: Mutex<Memo>,
}

#[derive(Debug)]
struct Memo {
    entries: HashMap<String, String>,
    file: File,
}

impl MemoFile {
    /// Open or create the memo at `path`.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => parse(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("reading memo file {}", path.display()));
            }
        };
        debug!("read {} entries from {}", entries.len(), path.display());

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening memo file {} for appending", path.display()))?;

        Ok(Self {
            path,
            inner: Mutex::new(Memo { entries, file }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map_or(0, |m| m.entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReviewStore for MemoFile {
    fn get(&self, original: &str) -> Option<String> {
        self.inner.lock().ok()?.entries.get(original).cloned()
    }

    fn append(&self, original: &str, corrected: &str) -> anyhow::Result<()> {
        ensure!(
            !original.contains(['\n', '\r']) && !corrected.contains(['\n', '\r']),
            "memo entries must fit on one line"
        );
        ensure!(
            !original.contains(SEPARATOR),
            "value {original:?} contains the memo separator {SEPARATOR:?}"
        );

        let mut memo = self
            .inner
            .lock()
            .map_err(|_| anyhow!("memo file lock poisoned"))?;
        writeln!(memo.file, "{original}{SEPARATOR}{corrected}")
            .with_context(|| format!("appending to memo file {}", self.path.display()))?;
        memo.entries
            .insert(original.to_string(), corrected.to_string());
        Ok(())
    }
}

fn parse(text: &str) -> HashMap<String, String> {
    text.lines()
        .filter_map(|line| line.split_once(SEPARATOR))
        .map(|(original, corrected)| (original.to_string(), corrected.to_string()))
        .collect()
}

/// Asks `prompt` about a value unless `store` already has an answer, and remembers new answers.
pub struct Reviewer<S, P> {
    store: S,
    prompt: P,
}

impl<S, P> Reviewer<S, P>
where
    S: ReviewStore,
    P: FnMut(&str) -> String,
{
    pub fn new(store: S, prompt: P) -> Self {
        Self { store, prompt }
    }

    pub fn review(&mut self, original: &str) -> String {
        if let Some(answer) = self.store.get(original) {
            debug!("using remembered answer {answer:?} for {original:?}");
            return answer;
        }
        let answer = (self.prompt)(original).trim().to_string();
        if let Err(e) = self.store.append(original, &answer) {
            warn!("could not remember the answer for {original:?}: {e:#}");
        }
        answer
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
