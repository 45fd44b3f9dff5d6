// ATS engine: keyword extraction, the five sub-score calculators and their
// aggregation, plus the advisory reports built from a computed score.
// Everything except `handlers` is pure and synchronous.

pub mod analysis;
pub mod handlers;
pub mod improvements;
pub mod industry;
pub mod keywords;
pub mod scoring;
