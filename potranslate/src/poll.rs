//! Querying the state of a pending order.

use tracing::debug;

use crate::{
    api::{OrderJobs, TranslationService},
    error::Error,
};

pub fn fetch_order_jobs<S: TranslationService + ?Sized>(
    service: &S,
    order_id: &str,
) -> Result<OrderJobs, Error> {
    let order = service.order_jobs(order_id)?;
    debug!(
        order_id,
        total = order.total_jobs,
        approved = order.jobs_approved.len(),
        reviewable = order.jobs_reviewable.len(),
        "fetched order"
    );
    Ok(order)
}

/// True when the number of approved jobs equals the order's total job count.
pub fn is_order_complete<S: TranslationService + ?Sized>(
    service: &S,
    order_id: &str,
) -> Result<bool, Error> {
    fetch_order_jobs(service, order_id).map(|order| order.is_complete())
}
