//! One run of the tool against a catalog file.
//!
//! A catalog without a pending order gets its untranslated entries submitted.
//! A catalog with a pending order is polled, optionally reviewed, and merged
//! once the order is complete. The file is saved at most once per run.

use std::{
    io::{BufRead, Write},
    path::Path,
};

use tracing::info;

use crate::{
    api::TranslationService,
    error::Error,
    merge::complete_order,
    poll::fetch_order_jobs,
    review::{Console, ReviewOutcome, review_jobs},
    submit::{SubmitOptions, submit_order},
    traits::Parser,
    types::Catalog,
};

/// How a run ended. None of these is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// A new order was submitted and its id saved into the catalog.
    Submitted { order_id: String, jobs: usize },
    /// The pending order is not finished; the catalog was not touched.
    Incomplete { order_id: String },
    /// The operator quit during review; the catalog was not touched.
    Quit { order_id: String },
    /// The order was merged and the pending marker removed.
    Completed { order_id: String, updated: usize },
}

/// Loads the catalog at `path` and runs either the submit path or the resume
/// path, depending on whether it carries a pending order.
///
/// `options` only matter for the submit path.
pub fn run<S, R, W>(
    path: &Path,
    service: &S,
    options: &SubmitOptions,
    console: &mut Console<R, W>,
) -> Result<RunOutcome, Error>
where
    S: TranslationService + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut catalog = Catalog::read_from(path)?;

    match catalog.pending_order().map(str::to_string) {
        Some(order_id) => resume(path, &mut catalog, service, order_id, console),
        None => {
            let submission = submit_order(&mut catalog, service, options)?;
            catalog.write_to(path)?;
            info!(path = %path.display(), order_id = %submission.order_id, "catalog saved");
            Ok(RunOutcome::Submitted {
                order_id: submission.order_id,
                jobs: submission.jobs,
            })
        }
    }
}

fn resume<S, R, W>(
    path: &Path,
    catalog: &mut Catalog,
    service: &S,
    order_id: String,
    console: &mut Console<R, W>,
) -> Result<RunOutcome, Error>
where
    S: TranslationService + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut order = fetch_order_jobs(service, &order_id)?;

    if !order.is_complete() {
        let reviewable = std::mem::take(&mut order.jobs_reviewable);
        if review_jobs(service, &reviewable, console)? == ReviewOutcome::Quit {
            return Ok(RunOutcome::Quit { order_id });
        }

        order = fetch_order_jobs(service, &order_id)?;
        if !order.is_complete() {
            info!(%order_id, "order not yet complete");
            return Ok(RunOutcome::Incomplete { order_id });
        }
    }

    let updated = complete_order(catalog, service, &order)?;
    catalog.write_to(path)?;
    info!(path = %path.display(), %order_id, "catalog saved");
    Ok(RunOutcome::Completed { order_id, updated })
}
