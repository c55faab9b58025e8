//! Access to the remote translation service.
//!
//! [`TranslationService`] is the seam every workflow step talks through;
//! [`GengoClient`] is the HTTP implementation used by the command-line tool.

pub mod client;
pub mod types;

pub use client::GengoClient;
pub use types::{
    JobAction, JobBatch, JobDescriptor, JobDetail, JobKind, OrderJobs, SubmitReceipt, Tier,
};

use crate::error::Error;

/// The operations the translation workflow needs from a remote service.
///
/// Every call is attempted once; implementations do not retry.
pub trait TranslationService {
    /// Submits all jobs as a single order.
    ///
    /// A response whose status is not `ok` is still returned as a receipt so
    /// the caller can decide how to surface it.
    fn submit_jobs(&self, batch: &JobBatch) -> Result<SubmitReceipt, Error>;

    /// Fetches the job id lists and total job count of an order.
    fn order_jobs(&self, order_id: &str) -> Result<OrderJobs, Error>;

    /// Fetches one job, including its source and target bodies.
    fn job(&self, job_id: &str) -> Result<JobDetail, Error>;

    /// Approves a job or sends it back for revision.
    fn update_job(&self, job_id: &str, action: &JobAction) -> Result<(), Error>;
}

impl<T: TranslationService + ?Sized> TranslationService for &T {
    fn submit_jobs(&self, batch: &JobBatch) -> Result<SubmitReceipt, Error> {
        (**self).submit_jobs(batch)
    }

    fn order_jobs(&self, order_id: &str) -> Result<OrderJobs, Error> {
        (**self).order_jobs(order_id)
    }

    fn job(&self, job_id: &str) -> Result<JobDetail, Error> {
        (**self).job(job_id)
    }

    fn update_job(&self, job_id: &str, action: &JobAction) -> Result<(), Error> {
        (**self).update_job(job_id, action)
    }
}
