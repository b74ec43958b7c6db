//! Fluent assertion API for question banks

use crate::quiz::bank::QuestionBank;
use crate::quiz::building::record::QuestionRecord;

// ============================================================================
// Entry Point
// ============================================================================

pub fn assert_bank(bank: &QuestionBank) -> BankAssertion<'_> {
    BankAssertion { bank }
}

// ============================================================================
// Bank Assertions
// ============================================================================

pub struct BankAssertion<'a> {
    bank: &'a QuestionBank,
}

impl<'a> BankAssertion<'a> {
    pub fn record_count(self, expected: usize) -> Self {
        let actual = self.bank.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} records, found {}: [{}]",
            expected,
            actual,
            summarize_records(self.bank.records())
        );
        self
    }

    /// Assert on the record at a zero-based index
    pub fn record<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(RecordAssertion<'a>),
    {
        assert!(
            index < self.bank.len(),
            "Record index {} out of bounds (bank has {} records)",
            index,
            self.bank.len()
        );

        assertion(RecordAssertion {
            record: &self.bank.records()[index],
            context: format!("records[{}]", index),
        });
        self
    }
}

// ============================================================================
// Record Assertions
// ============================================================================

pub struct RecordAssertion<'a> {
    record: &'a QuestionRecord,
    context: String,
}

impl<'a> RecordAssertion<'a> {
    pub fn before(self, expected: &str) -> Self {
        Text::Exact(expected).check(&self.record.question_before, &self.field("question_before"));
        self
    }

    pub fn before_starts_with(self, prefix: &str) -> Self {
        Text::Prefix(prefix).check(&self.record.question_before, &self.field("question_before"));
        self
    }

    pub fn after(self, expected: &str) -> Self {
        Text::Exact(expected).check(&self.record.question_after, &self.field("question_after"));
        self
    }

    pub fn code(self, expected: &[&str]) -> Self {
        assert_eq!(
            self.record.question_code, expected,
            "{}.question_code: lines differ",
            self.context
        );
        self
    }

    pub fn no_code(self) -> Self {
        assert!(
            self.record.question_code.is_empty(),
            "{}.question_code: expected no code, found {} line(s)",
            self.context,
            self.record.question_code.len()
        );
        self
    }

    pub fn answer_count(self, expected: usize) -> Self {
        assert_eq!(
            self.record.answers.len(),
            expected,
            "{}.answers: expected {} answers, found {}",
            self.context,
            expected,
            self.record.answers.len()
        );
        self
    }

    /// Assert the text of the answer at a zero-based index
    pub fn answer(self, index: usize, expected: &str) -> Self {
        let context = self.field(&format!("answers[{}]", index));
        let answer = self
            .record
            .answers
            .get(index)
            .unwrap_or_else(|| panic!("{}: no such answer", context));
        Text::Exact(expected).check(&answer.text, &context);
        self
    }

    /// Assert exactly which answers are marked correct
    pub fn correct(self, expected: &[usize]) -> Self {
        assert_eq!(
            self.record.correct_indices(),
            expected,
            "{}: correct answers differ",
            self.context
        );
        self
    }

    fn field(&self, name: &str) -> String {
        format!("{}.{}", self.context, name)
    }
}

enum Text<'e> {
    Exact(&'e str),
    Prefix(&'e str),
}

impl Text<'_> {
    fn check(&self, actual: &str, context: &str) {
        match *self {
            Text::Exact(expected) => assert_eq!(
                actual, expected,
                "{}: expected '{}', got '{}'",
                context, expected, actual
            ),
            Text::Prefix(prefix) => assert!(
                actual.starts_with(prefix),
                "{}: expected text starting with '{}', got '{}'",
                context,
                prefix,
                actual
            ),
        }
    }
}

fn summarize_records(records: &[QuestionRecord]) -> String {
    records
        .iter()
        .map(|r| {
            let text: String = r.question_before.chars().take(20).collect();
            format!("'{}' ({} answers)", text, r.answers.len())
        })
        .collect::<Vec<_>>()
        .join(", ")
}
