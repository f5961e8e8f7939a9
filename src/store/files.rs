use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{GtdError, Result};
use crate::list::TaskList;
use crate::model::{DATE_FORMAT, Task, parse_due};

const BACKUP_SUFFIX: &str = ".bak";
const TEMP_SUFFIX: &str = ".tmp";

/// Flat-file task storage: one `description\tdone\tYYYY-MM-DD` line per task.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

/// Result of reading the task file.
#[derive(Debug, Default)]
pub struct Loaded {
    pub tasks: TaskList,
    pub skipped: Vec<SkippedLine>,
}

/// A line that could not be parsed and was left out of the loaded list.
///
/// The raw bytes are kept so that [`FileStore::save_loaded`] can write the
/// line back untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the task file.
    pub line_number: usize,
    pub reason: String,
    /// Line contents without the trailing newline.
    pub raw: Vec<u8>,
    /// Number of valid tasks that preceded this line.
    pub position: usize,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> PathBuf {
        with_suffix(&self.path, BACKUP_SUFFIX)
    }

    fn temp_path(&self) -> PathBuf {
        with_suffix(&self.path, TEMP_SUFFIX)
    }

    /// Read every task from disk, creating an empty file if none exists.
    ///
    /// Ids are assigned from line order. Malformed lines, including lines
    /// that are not valid UTF-8, are skipped and reported in
    /// [`Loaded::skipped`] rather than failing the load.
    pub fn load(&self) -> Result<Loaded> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.create_empty()?;
                debug!(path = %self.path.display(), "created empty task file");
                return Ok(Loaded::default());
            }
            Err(e) => return Err(GtdError::storage(&self.path, e)),
        };

        let mut loaded = Loaded::default();
        let body = data.strip_suffix(b"\n").unwrap_or(&data);
        if body.is_empty() {
            return Ok(loaded);
        }
        for (index, raw) in body.split(|&b| b == b'\n').enumerate() {
            let parsed = match std::str::from_utf8(raw) {
                Ok(line) => {
                    let line = line.strip_suffix('\r').unwrap_or(line);
                    if line.trim().is_empty() {
                        continue;
                    }
                    parse_line(line)
                }
                Err(e) => Err(format!("not valid UTF-8: {e}")),
            };
            match parsed {
                Ok(task) => {
                    loaded.tasks.append(task);
                }
                Err(reason) => {
                    let line_number = index + 1;
                    warn!(path = %self.path.display(), line_number, %reason, "skipping malformed task line");
                    loaded.skipped.push(SkippedLine {
                        line_number,
                        reason,
                        raw: raw.to_vec(),
                        position: loaded.tasks.len(),
                    });
                }
            }
        }

        debug!(
            path = %self.path.display(),
            tasks = loaded.tasks.len(),
            skipped = loaded.skipped.len(),
            "loaded tasks"
        );
        Ok(loaded)
    }

    /// Write the whole list back to disk.
    ///
    /// The new contents go to a temp file first and are renamed over the
    /// primary path, so a crash leaves either the old or the new file intact.
    /// The previous contents are copied to the backup path when the primary
    /// exists.
    pub fn save(&self, tasks: &TaskList) -> Result<()> {
        self.write(tasks, &[])
    }

    /// Write back a loaded file, keeping its unreadable lines where they were
    /// relative to the surrounding tasks.
    pub fn save_loaded(&self, loaded: &Loaded) -> Result<()> {
        self.write(&loaded.tasks, &loaded.skipped)
    }

    fn write(&self, tasks: &TaskList, skipped: &[SkippedLine]) -> Result<()> {
        let encoded = tasks
            .iter()
            .map(|(_, task)| encode_line(task).map(String::into_bytes))
            .collect::<Result<Vec<_>>>()?;

        let mut lines: Vec<&[u8]> = Vec::with_capacity(encoded.len() + skipped.len());
        let mut kept = skipped.iter().peekable();
        for (position, line) in encoded.iter().enumerate() {
            while let Some(skip) = kept.next_if(|s| s.position <= position) {
                lines.push(&skip.raw);
            }
            lines.push(line);
        }
        lines.extend(kept.map(|s| s.raw.as_slice()));

        self.ensure_parent_dir()?;
        let tmp = self.temp_path();
        write_synced(&tmp, &lines).map_err(|e| GtdError::storage(&tmp, e))?;

        if self.path.exists() {
            let backup = self.backup_path();
            fs::copy(&self.path, &backup).map_err(|e| GtdError::storage(&backup, e))?;
        } else {
            debug!(path = %self.path.display(), "task file missing at save; skipping backup");
        }

        fs::rename(&tmp, &self.path).map_err(|e| GtdError::storage(&self.path, e))?;
        debug!(
            path = %self.path.display(),
            tasks = tasks.len(),
            kept_unreadable = skipped.len(),
            "saved tasks"
        );
        Ok(())
    }

    fn create_empty(&self) -> Result<()> {
        self.ensure_parent_dir()?;
        File::create(&self.path).map_err(|e| GtdError::storage(&self.path, e))?;
        Ok(())
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| GtdError::storage(parent, e))?;
        }
        Ok(())
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn write_synced(path: &Path, lines: &[&[u8]]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
    }
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}

/// Render a task as a single tab-separated line, without the newline.
pub fn encode_line(task: &Task) -> Result<String> {
    if task.description.contains(['\t', '\n', '\r']) {
        return Err(GtdError::InvalidInput(format!(
            "description {:?} contains a tab or line break",
            task.description
        )));
    }
    let done = if task.done { "1" } else { "0" };
    Ok(format!(
        "{}\t{}\t{}",
        task.description,
        done,
        task.due.format(DATE_FORMAT)
    ))
}

/// Parse one line of the task file.
pub fn parse_line(line: &str) -> std::result::Result<Task, String> {
    let fields: Vec<&str> = line.split('\t').collect();
    let [description, done, due] = fields.as_slice() else {
        return Err(format!("expected 3 tab-separated fields, found {}", fields.len()));
    };
    let done = match *done {
        "0" => false,
        "1" => true,
        other => return Err(format!("invalid done flag '{other}'")),
    };
    let due = parse_due(due).map_err(|e| e.to_string())?;
    Ok(Task {
        description: (*description).to_string(),
        done,
        due,
    })
}
