//! draftcast - Video Transcript to Article Draft
//!
//! A CLI tool that turns a video transcript into a news-style article draft
//! using a hosted language model.
//!
//! # Overview
//!
//! draftcast allows you to:
//! - Extract a video ID from a YouTube URL
//! - Fetch its English transcript, preferring manual captions over generated ones
//! - Wrap the transcript (or pasted notes) in an editorial instruction
//! - Generate a markdown article draft and save it as `article_draft.md`
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `source` - Video identifier extraction
//! - `transcript` - Transcript listing, selection and fetching
//! - `article` - Prompt assembly and draft generation
//! - `pipeline` - Wires the stages together
//! - `cli` - Command-line and HTTP front ends
//!
//! # Example
//!
//! ```rust,no_run
//! use draftcast::config::Settings;
//! use draftcast::pipeline::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(settings)?;
//!
//!     let draft = pipeline
//!         .draft_from_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
//!         .await?;
//!     println!("{}", draft.markdown());
//!
//!     Ok(())
//! }
//! ```

pub mod article;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod pipeline;
pub mod source;
pub mod transcript;

pub use error::{DraftError, Result};
