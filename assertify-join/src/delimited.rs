//! Joins between two delimited text files.

use std::path::Path;

use crate::{inner_join, left_join, read_lines, JoinError};

/// A column of a delimited file. `index` is zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub separator: String,
    pub index: usize,
}

impl Column {
    pub fn new(separator: impl Into<String>, index: usize) -> Self {
        Self {
            separator: separator.into(),
            index,
        }
    }
}

/// One joined pair of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedLine {
    pub key: String,
    pub left: String,
    /// `None` in a left join when no right line matched.
    pub right: Option<String>,
}

/// Joins the lines of two files on one column each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedJoin {
    pub left: Column,
    pub right: Column,
}

struct KeyedLine {
    key: String,
    line: String,
}

impl DelimitedJoin {
    pub fn new(left: Column, right: Column) -> Self {
        Self { left, right }
    }

    /// Pairs of lines whose join columns are equal.
    pub fn inner(&self, left: &Path, right: &Path) -> Result<Vec<JoinedLine>, JoinError> {
        let left_lines = keyed_lines(left, &self.left)?;
        let right_lines = keyed_lines(right, &self.right)?;

        let joined = inner_join(&left_lines, &right_lines, key_of, key_of)
            .into_iter()
            .map(|row| JoinedLine {
                key: row.key,
                left: row.left.line.clone(),
                right: Some(row.right.line.clone()),
            })
            .collect();
        Ok(joined)
    }

    /// Like [`DelimitedJoin::inner`], keeping unmatched left lines.
    pub fn left(&self, left: &Path, right: &Path) -> Result<Vec<JoinedLine>, JoinError> {
        let left_lines = keyed_lines(left, &self.left)?;
        let right_lines = keyed_lines(right, &self.right)?;

        let joined = left_join(&left_lines, &right_lines, key_of, key_of)
            .into_iter()
            .map(|row| JoinedLine {
                key: row.key,
                left: row.left.line.clone(),
                right: row.right.map(|right| right.line.clone()),
            })
            .collect();
        Ok(joined)
    }
}

fn key_of(line: &KeyedLine) -> String {
    line.key.clone()
}

fn keyed_lines(path: &Path, column: &Column) -> Result<Vec<KeyedLine>, JoinError> {
    read_lines(path)?
        .into_iter()
        .enumerate()
        .map(|(number, line)| {
            let key = line
                .split(column.separator.as_str())
                .nth(column.index)
                .ok_or_else(|| JoinError::MissingColumn {
                    path: path.display().to_string(),
                    line: number + 1,
                    column: column.index,
                })?
                .to_string();
            Ok::<_, JoinError>(KeyedLine { key, line })
        })
        .collect()
}
