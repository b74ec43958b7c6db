//! Testing utilities for question bank assertions
//!
//! Bank tests should load their quiz content through
//! [`QuizSources`](crate::quiz::processor::quiz_sources::QuizSources) and check the result
//! with [`assert_bank`]. The fluent API checks a whole record in one chain, and its failure
//! messages name the record and answer that went wrong:
//!
//! ```rust,ignore
//! let source = QuizSources::get_string("010-code-block.quiz")?;
//! let bank = convert(&source, &ParseOptions::default())?;
//!
//! assert_bank(&bank)
//!     .record_count(1)
//!     .record(0, |r| {
//!         r.before_starts_with("What does")
//!             .code(&["print(1+1)"])
//!             .answer_count(2)
//!             .correct(&[1]);
//!     });
//! ```

mod testing_assertions;

pub use testing_assertions::{assert_bank, BankAssertion, RecordAssertion};
