//! # quizbank
//!
//! Converts plain-text quiz files into a JSON question bank.
//!
//! ## Testing
//!
//! Integration tests read the curated sources under `docs/samples/` through
//! [`QuizSources`](quiz::processor::quiz_sources::QuizSources) and check banks with the
//! fluent helpers in the [testing module](quiz::testing).

pub mod quiz;
