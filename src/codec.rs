//! Plain-text task file.
//!
//! One task per line, four comma-separated fields and no escaping:
//!
//! ```text
//! <id>,<description>,<true|false>,<Low|Medium|High>
//! ```
//!
//! There is no header or version field; any change to the field order or count
//! breaks existing files.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{CodecError, FieldError, MalformedRecord};
use crate::fields::Priority;
use crate::task::{Task, MAX_TASK_ID};

/// Field separator. Descriptions must not contain it.
pub const DELIMITER: char = ',';

/// Default task file, relative to the working directory.
pub const DEFAULT_PATH: &str = "tasks.txt";

const FIELD_COUNT: usize = 4;

/// Result of reading the task file.
#[derive(Debug, Default)]
pub struct Loaded {
    pub tasks: Vec<Task>,
    pub warnings: Vec<MalformedRecord>,
    /// False when there was no file to read.
    pub existed: bool,
}

/// Handle on the task file at a fixed path.
#[derive(Debug, Clone)]
pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TaskFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every well-formed task from the file.
    ///
    /// A missing file is an empty, successful load. Malformed lines are
    /// skipped and reported in [`Loaded::warnings`].
    pub fn load(&self) -> Result<Loaded, CodecError> {
        let buf = match fs::read(&self.path) {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no task file, starting empty");
                return Ok(Loaded::default());
            }
            Err(source) => {
                return Err(CodecError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let (tasks, warnings) = decode_bytes(&buf);
        for w in &warnings {
            tracing::warn!("{w}");
        }
        tracing::info!(
            path = %self.path.display(),
            loaded = tasks.len(),
            skipped = warnings.len(),
            "loaded task file"
        );
        Ok(Loaded {
            tasks,
            warnings,
            existed: true,
        })
    }

    /// Overwrite the file with one line per task, in the given order.
    pub fn save(&self, tasks: &[Task]) -> Result<(), CodecError> {
        self.write_atomic(&encode(tasks)).map_err(|source| CodecError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), saved = tasks.len(), "saved task file");
        Ok(())
    }

    /// Atomic-ish write via temp + rename.
    fn write_atomic(&self, data: &str) -> io::Result<()> {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        {
            let mut f = File::create(&tmp)?;
            f.write_all(data.as_bytes())?;
            f.flush()?;
        }
        fs::rename(&tmp, &self.path)
    }
}

/// Encode a single task as a line without the trailing newline.
pub fn encode_line(task: &Task) -> String {
    format!(
        "{id}{d}{desc}{d}{completed}{d}{priority}",
        id = task.id,
        desc = task.description,
        completed = task.completed,
        priority = task.priority.label(),
        d = DELIMITER,
    )
}

/// Encode tasks as file contents, each line newline-terminated.
pub fn encode(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        out.push_str(&encode_line(task));
        out.push('\n');
    }
    out
}

/// Decode one line that has already been split into exactly four fields.
fn decode_fields(fields: &[&str]) -> Result<Task, FieldError> {
    let id_raw = fields[0].trim();
    let id = match id_raw.parse::<u64>() {
        Ok(id) if (1..=MAX_TASK_ID).contains(&id) => id,
        _ => return Err(FieldError::InvalidId(id_raw.to_string())),
    };

    let completed_raw = fields[2].trim();
    let completed = if completed_raw.eq_ignore_ascii_case("true") {
        true
    } else if completed_raw.eq_ignore_ascii_case("false") {
        false
    } else {
        return Err(FieldError::InvalidCompleted(completed_raw.to_string()));
    };

    let priority_raw = fields[3].trim();
    let priority = Priority::from_label(priority_raw)
        .ok_or_else(|| FieldError::UnknownPriority(priority_raw.to_string()))?;

    Ok(Task {
        id,
        description: fields[1].to_string(),
        completed,
        priority,
    })
}

/// Decode a single non-blank line. `line_no` is 1-based and only used in the
/// returned warning.
pub fn decode_line(line: &str, line_no: usize) -> Result<Task, MalformedRecord> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(MalformedRecord::FieldCount {
            line_no,
            line: line.to_string(),
            found: fields.len(),
        });
    }
    decode_fields(&fields).map_err(|source| MalformedRecord::Field {
        line_no,
        line: line.to_string(),
        source,
    })
}

/// Decode whole file contents, keeping good tasks and collecting a warning
/// for every line that had to be dropped.
pub fn decode(contents: &str) -> (Vec<Task>, Vec<MalformedRecord>) {
    decode_bytes(contents.as_bytes())
}

/// Decode raw file bytes. Encoding is checked per line, so a stray byte only
/// costs the line it sits on.
pub fn decode_bytes(contents: &[u8]) -> (Vec<Task>, Vec<MalformedRecord>) {
    let mut tasks = Vec::new();
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();

    for (idx, raw) in contents.split(|b| *b == b'\n').enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let line_no = idx + 1;
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line,
            Err(_) => {
                warnings.push(MalformedRecord::Encoding {
                    line_no,
                    line: String::from_utf8_lossy(raw).into_owned(),
                });
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match decode_line(line, line_no) {
            Ok(task) if !seen.insert(task.id) => warnings.push(MalformedRecord::DuplicateId {
                line_no,
                line: line.to_string(),
                id: task.id,
            }),
            Ok(task) => tasks.push(task),
            Err(w) => warnings.push(w),
        }
    }
    (tasks, warnings)
}
