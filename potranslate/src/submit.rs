//! Building and submitting an order from the untranslated part of a catalog.

use tracing::{info, warn};
use unic_langid::LanguageIdentifier;

use crate::{
    api::{JobBatch, JobDescriptor, JobKind, Tier, TranslationService},
    classify::{WordBounds, is_eligible},
    error::Error,
    identify::identify_entry,
    types::{Catalog, Entry},
};

/// Options that shape the jobs of a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOptions {
    /// Locale code of the catalog's source texts.
    pub source: String,
    /// Locale code to translate into.
    pub target: String,
    pub tier: Tier,
    /// Comment attached to every job.
    pub comment: Option<String>,
    pub tone: Option<String>,
    pub bounds: WordBounds,
    /// Maximum number of jobs; the first eligible entries in file order win.
    pub limit: Option<usize>,
}

impl SubmitOptions {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        SubmitOptions {
            source: source.into(),
            target: target.into(),
            tier: Tier::default(),
            comment: None,
            tone: None,
            bounds: WordBounds::unbounded(),
            limit: None,
        }
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_tone(mut self, tone: Option<String>) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_bounds(mut self, bounds: WordBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub order_id: String,
    pub jobs: usize,
}

/// Checks that `code` is a well-formed BCP 47 language identifier.
pub fn validate_locale(code: &str) -> Result<(), Error> {
    if code.trim().is_empty() {
        return Err(Error::InvalidLocale(code.to_string()));
    }
    code.parse::<LanguageIdentifier>()
        .map(|_| ())
        .map_err(|_| Error::InvalidLocale(code.to_string()))
}

pub fn job_for_entry(entry: &Entry, options: &SubmitOptions) -> JobDescriptor {
    JobDescriptor {
        kind: JobKind::Text,
        slug: identify_entry(entry),
        body_src: entry.msgid.clone(),
        lc_src: options.source.clone(),
        lc_tgt: options.target.clone(),
        tier: options.tier,
        comment: options.comment.clone(),
        tone: options.tone.clone(),
    }
}

/// Builds a job for every eligible entry, in catalog order, up to the limit.
pub fn collect_jobs(catalog: &Catalog, options: &SubmitOptions) -> Vec<JobDescriptor> {
    catalog
        .active_entries()
        .filter(|entry| is_eligible(entry, options.bounds))
        .take(options.limit.unwrap_or(usize::MAX))
        .map(|entry| job_for_entry(entry, options))
        .collect()
}

/// Submits the eligible entries as one order and records the order id in
/// the catalog metadata. The caller persists the catalog.
///
/// A response with a status other than `ok`, or without a usable order id,
/// yields [`Error::Rejected`] and leaves the catalog untouched.
pub fn submit_order<S: TranslationService + ?Sized>(
    catalog: &mut Catalog,
    service: &S,
    options: &SubmitOptions,
) -> Result<Submission, Error> {
    if let Some(existing) = catalog.pending_order() {
        return Err(Error::OrderPending(existing.to_string()));
    }
    validate_locale(&options.source)?;
    validate_locale(&options.target)?;

    let batch = JobBatch::from_jobs(collect_jobs(catalog, options));
    if batch.is_empty() {
        warn!("no eligible entries, submitting an empty order");
    }
    info!(
        jobs = batch.len(),
        source = %options.source,
        target = %options.target,
        tier = %options.tier,
        "submitting order"
    );

    let receipt = service.submit_jobs(&batch)?;
    let order_id = match (receipt.is_ok(), receipt.order_id) {
        (true, Some(order_id)) if !order_id.trim().is_empty() => order_id,
        _ => {
            return Err(Error::Rejected {
                raw: receipt.raw.to_string(),
            });
        }
    };

    info!(%order_id, "order accepted");
    catalog.set_pending_order(order_id.clone());
    Ok(Submission {
        order_id,
        jobs: batch.len(),
    })
}
