//! Tab-delimited source reading.
//!
//! Rows are tab-separated, one definition per line, short rows padded with
//! empty fields. Note fields get glossary substitution on the way in, so the
//! domain layer only ever sees finished text.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::application::{ExtraRow, GetaRow, OracleRow};
use crate::domain::RawRow;
use crate::infrastructure::error::{InfraError, InfraResult};

/// Typographic quote forms and bibliographic abbreviations expanded inside
/// free-text notes.
const GLOSSARY: &[(&str, &str)] = &[
    ("“", "「"),
    ("”", "」"),
    ("‘", "『"),
    ("’", "』"),
    ("·", "・"),
    ("…", "⋯"),
    ("SW", "《说文解字》"),
    ("GY", "《广韵》"),
    ("CY", "《常用漢字表》（日本）"),
    ("ZG", "《中国语言资源保护工程汉语方言用字规范》"),
    ("JY", "《集韵》"),
    ("WS", "《和製漢字の辞典（2014）》"),
    ("FY", "《汉语方言大字典》"),
];

/// Expand glossary abbreviations in note text.
pub fn apply_glossary(text: &str) -> String {
    let mut result = text.to_string();
    for (abbreviation, expansion) in GLOSSARY {
        result = result.replace(abbreviation, expansion);
    }
    result
}

/// Reads the tab-delimited source files of a data directory.
pub struct SourceReader {
    source_pattern: Regex,
}

impl Default for SourceReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceReader {
    pub fn new() -> Self {
        Self {
            source_pattern: Regex::new(r"^abstract_.+\.txt$").unwrap(),
        }
    }

    /// Resolve the main source files: explicit stems become
    /// `<data_dir>/abstract_<stem>.txt`; with no stems the directory is
    /// scanned for matching files instead, sorted for determinism.
    #[instrument(level = "debug", skip(self))]
    pub fn source_paths(&self, data_dir: &Path, stems: &[String]) -> Vec<PathBuf> {
        if !stems.is_empty() {
            return stems
                .iter()
                .map(|stem| data_dir.join(format!("abstract_{}.txt", stem)))
                .collect();
        }

        let mut paths: Vec<PathBuf> = WalkDir::new(data_dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| self.source_pattern.is_match(name))
            })
            .map(|entry| entry.into_path())
            .collect();
        paths.sort();
        debug!(found = paths.len(), "discovered source files");
        paths
    }

    /// Read every definition row from the given source files, in order.
    pub fn read_rows(&self, paths: &[PathBuf]) -> InfraResult<Vec<RawRow>> {
        let mut rows = Vec::new();
        for path in paths {
            for fields in read_lines::<4>(path)? {
                let [character, primary, secondary, note] = fields;
                rows.push(RawRow {
                    character,
                    primary,
                    secondary,
                    note: apply_glossary(note.trim()),
                });
            }
        }
        debug!(rows = rows.len(), "source rows read");
        Ok(rows)
    }

    /// Placeholder-glyph notes; absent file yields no rows.
    pub fn read_geta(&self, path: &Path) -> InfraResult<Vec<GetaRow>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut rows = Vec::new();
        for [key, text] in read_lines::<2>(path)? {
            rows.push(GetaRow {
                key,
                text: apply_glossary(text.trim()),
            });
        }
        Ok(rows)
    }

    /// Standalone shape rows; absent file yields no rows.
    pub fn read_extra(&self, path: &Path) -> InfraResult<Vec<ExtraRow>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut rows = Vec::new();
        for [shape, refer, note] in read_lines::<3>(path)? {
            rows.push(ExtraRow {
                shape,
                refer,
                note: apply_glossary(note.trim()),
            });
        }
        Ok(rows)
    }

    /// Oracle-bone rows; absent file yields no rows.
    pub fn read_oracle(&self, path: &Path) -> InfraResult<Vec<OracleRow>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut rows = Vec::new();
        for [code, glyph, construction, reconstruction, note] in read_lines::<5>(path)? {
            rows.push(OracleRow {
                code,
                glyph,
                construction,
                reconstruction,
                note: apply_glossary(note.trim()),
            });
        }
        Ok(rows)
    }
}

/// Read a tab-delimited file into `N` fields per line, padding short lines
/// and skipping blank ones.
fn read_lines<const N: usize>(path: &Path) -> InfraResult<Vec<[String; N]>> {
    let file = File::open(path)
        .map_err(|e| InfraError::io(format!("cannot open {}", path.display()), e))?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for line in reader.lines() {
        let line =
            line.map_err(|e| InfraError::io(format!("cannot read {}", path.display()), e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split('\t').map(str::to_string);
        lines.push(std::array::from_fn(|_| {
            fields.next().unwrap_or_default()
        }));
    }
    Ok(lines)
}
