//! CLI command implementations.

mod config;
mod doctor;
mod draft;
mod serve;
mod transcript;

pub use config::run_config;
pub use doctor::run_doctor;
pub use draft::{run_draft, DraftOptions};
pub use serve::run_serve;
pub use transcript::run_transcript;
