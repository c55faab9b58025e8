#![forbid(unsafe_code)]
//! Human translation of gettext catalogs through the Gengo API.
//!
//! A run either submits the untranslated entries of a `.po` file as one
//! Gengo order, or, when the catalog already remembers a pending order,
//! polls it, lets an operator review finished jobs, and merges the approved
//! translations back into the file.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::io;
//! use std::path::Path;
//! use potranslate::{ClientConfig, Console, Credentials, GengoClient, SubmitOptions, run};
//!
//! let config = ClientConfig::new(Credentials::new("public", "private")).with_sandbox(true);
//! let client = GengoClient::new(config)?;
//! let options = SubmitOptions::new("en", "de");
//! let mut console = Console::new(io::stdin().lock(), io::stdout(), 80);
//!
//! let outcome = run(Path::new("locale/de.po"), &client, &options, &mut console)?;
//! println!("{outcome:?}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # How entries are matched
//!
//! Every entry is identified by the SHA-1 of its `msgid`. That identifier is
//! sent as the job slug and used again to find the entry when the order is
//! merged, so editing a source text while an order is in flight means its
//! translation is not written back.

pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod formats;
pub mod identify;
pub mod merge;
pub mod poll;
pub mod review;
pub mod submit;
pub mod traits;
pub mod types;
pub mod workflow;

// Re-export most used types for easy consumption
pub use crate::{
    api::{GengoClient, JobAction, JobBatch, JobDescriptor, JobDetail, OrderJobs, Tier, TranslationService},
    classify::{WordBounds, fits_word_boundary, is_translatable, is_translated},
    config::{ClientConfig, Credentials, Endpoint},
    error::Error,
    identify::{identify, identify_entry},
    review::{Console, ReviewOutcome},
    submit::{SubmitOptions, Submission},
    types::{Catalog, Entry, Metadata, PENDING_ORDER_KEY},
    workflow::{RunOutcome, run},
};
