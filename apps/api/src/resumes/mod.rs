// Resume persistence adapter: storage backends, validation, and the write
// flows that run the ATS engine before anything is stored.

pub mod handlers;
pub mod repository;
pub mod service;
pub mod validation;
