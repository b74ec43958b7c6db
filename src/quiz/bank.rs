//! The question bank
//!
//! An ordered list of records. A question's id is its position in the bank plus one; the
//! bank owns that numbering, so there is no counter shared between runs.

use crate::quiz::building::record::QuestionRecord;
use crate::quiz::error::QuizError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionBank {
    records: Vec<QuestionRecord>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its one-based id
    pub fn push(&mut self, record: QuestionRecord) -> usize {
        self.records.push(record);
        self.records.len()
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    /// Look a record up by its one-based id
    pub fn get(&self, id: usize) -> Option<&QuestionRecord> {
        id.checked_sub(1).and_then(|i| self.records.get(i))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<QuestionRecord> {
        self.records
    }

    pub fn to_json(&self) -> Result<String, QuizError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String, QuizError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, QuizError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the bank as JSON
    ///
    /// The bank is fully serialized before the file is created, so a failure never leaves
    /// a truncated file behind.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), QuizError> {
        let json = self.to_json()?;
        fs::write(path.as_ref(), json + "\n")?;
        tracing::info!(path = %path.as_ref().display(), records = self.len(), "wrote question bank");
        Ok(())
    }

    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl From<Vec<QuestionRecord>> for QuestionBank {
    fn from(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a QuestionBank {
    type Item = &'a QuestionRecord;
    type IntoIter = std::slice::Iter<'a, QuestionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
