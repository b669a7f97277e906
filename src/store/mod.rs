//! In-memory survey state, held for the lifetime of the process.
//!
//! Two stores with different aggregation models live side by side:
//! [`LiveSurveyStore`] keeps the latest answer per question of one shared
//! survey, [`SurveyCatalog`] keeps every respondent's full submission for
//! many named surveys. All writes take the store's write lock, so
//! find-then-write sequences cannot interleave.

pub mod catalog;
pub mod live;

pub use catalog::SurveyCatalog;
pub use live::LiveSurveyStore;
