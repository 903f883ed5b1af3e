use super::store::{DocumentStore, StoreError};
use chrono::NaiveDate;
use regex::Regex;
use std::path::PathBuf;

/// Daily notes (`<folder>/YYYY-MM-DD.md`) holding `name:: N` counters
#[derive(Debug, Clone)]
pub struct DailyNotes {
    folder: String,
}

impl DailyNotes {
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    pub fn note_path(&self, date: NaiveDate) -> PathBuf {
        let filename = format!("{}.md", date.format("%Y-%m-%d"));
        let folder = self.folder.trim_matches('/');
        if folder.is_empty() {
            PathBuf::from(filename)
        } else {
            PathBuf::from(folder).join(filename)
        }
    }

    /// Increment `name` in the note for `date`, creating the field (and the
    /// note) when missing. Returns the new value.
    pub fn increment(
        &self,
        store: &dyn DocumentStore,
        name: &str,
        date: NaiveDate,
    ) -> Result<i64, StoreError> {
        let path = self.note_path(date);
        let content = match store.read_document(&path) {
            Ok(content) => content,
            Err(StoreError::NotFound(_)) => String::new(),
            Err(e) => return Err(e),
        };

        let (updated, value) = increment_field(&content, name);
        store.write_document(&path, &updated)?;
        tracing::debug!(path = %path.display(), name, value, "daily note attribute updated");
        Ok(value)
    }
}

/// Increment the first `name:: N` line, or append `name:: 1`
pub fn increment_field(content: &str, name: &str) -> (String, i64) {
    let pattern = format!(r"^(?P<head>\s*{}::\s*)(?P<value>-?\d+)\s*$", regex::escape(name));
    let Ok(field_re) = Regex::new(&pattern) else {
        return append_field(content, name);
    };

    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
    for line in lines.iter_mut() {
        let (body, cr) = match line.strip_suffix('\r') {
            Some(body) => (body.to_string(), "\r"),
            None => (line.clone(), ""),
        };
        let Some(caps) = field_re.captures(&body) else {
            continue;
        };
        let Ok(current) = caps["value"].parse::<i64>() else {
            continue;
        };
        let value = current.saturating_add(1);
        *line = format!("{}{}{}", &caps["head"], value, cr);
        return (lines.join("\n"), value);
    }

    append_field(content, name)
}

fn append_field(content: &str, name: &str) -> (String, i64) {
    let mut updated = content.to_string();
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(&format!("{}:: 1\n", name));
    (updated, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_increment_existing_field() {
        let content = "# 2025-06-08\npages:: 3\nmood:: 4\n";
        let (updated, value) = increment_field(content, "pages");
        assert_eq!(value, 4);
        assert_eq!(updated, "# 2025-06-08\npages:: 4\nmood:: 4\n");
    }

    #[test]
    fn test_append_missing_field() {
        let (updated, value) = increment_field("# 2025-06-08", "pages");
        assert_eq!(value, 1);
        assert_eq!(updated, "# 2025-06-08\npages:: 1\n");

        let (updated, _) = increment_field("", "pages");
        assert_eq!(updated, "pages:: 1\n");
    }

    #[test]
    fn test_field_name_is_literal() {
        let (updated, value) = increment_field("a.b:: 2\naxb:: 7\n", "a.b");
        assert_eq!(value, 3);
        assert_eq!(updated, "a.b:: 3\naxb:: 7\n");
    }

    #[test]
    fn test_keeps_crlf() {
        let (updated, _) = increment_field("pages:: 1\r\nend\r\n", "pages");
        assert_eq!(updated, "pages:: 2\r\nend\r\n");
    }

    #[test]
    fn test_increment_creates_note() {
        let store = MemoryStore::default();
        let notes = DailyNotes::new("Daily/");

        assert_eq!(notes.increment(&store, "runs", date("2025-06-08")).unwrap(), 1);
        assert_eq!(notes.increment(&store, "runs", date("2025-06-08")).unwrap(), 2);
        assert_eq!(store.get("Daily/2025-06-08.md").as_deref(), Some("runs:: 2\n"));
    }

    #[test]
    fn test_note_path_without_folder() {
        let notes = DailyNotes::new("");
        assert_eq!(notes.note_path(date("2025-06-08")), PathBuf::from("2025-06-08.md"));
    }
}
