//! Writing the translations of a completed order back into the catalog.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::{
    api::{OrderJobs, TranslationService},
    error::Error,
    identify::identify_entry,
    types::Catalog,
};

/// Fetches every approved job of `order` and maps its slug to the translated
/// body.
pub fn fetch_translations<S: TranslationService + ?Sized>(
    service: &S,
    order: &OrderJobs,
) -> Result<HashMap<String, String>, Error> {
    let mut translations = HashMap::with_capacity(order.jobs_approved.len());
    for job_id in &order.jobs_approved {
        let job = service.job(job_id)?;
        debug!(%job_id, slug = %job.slug, "fetched approved job");
        translations.insert(job.slug, job.body_tgt);
    }
    Ok(translations)
}

/// Overwrites the target text of every entry whose identifier has a
/// translation. Returns the number of entries updated.
///
/// Entries whose source changed since submission no longer match and are
/// left alone.
pub fn merge_translations(catalog: &mut Catalog, translations: &HashMap<String, String>) -> usize {
    let mut updated = 0;
    for entry in catalog.active_entries_mut().filter(|e| !e.is_plural()) {
        if let Some(body) = translations.get(&identify_entry(entry)) {
            entry.msgstr = body.clone();
            updated += 1;
        }
    }
    updated
}

/// Merges a complete order into the catalog and clears the pending-order
/// marker. The caller persists the catalog.
pub fn complete_order<S: TranslationService + ?Sized>(
    catalog: &mut Catalog,
    service: &S,
    order: &OrderJobs,
) -> Result<usize, Error> {
    let translations = fetch_translations(service, order)?;
    let updated = merge_translations(catalog, &translations);
    catalog.clear_pending_order();
    info!(
        order_id = %order.order_id,
        fetched = translations.len(),
        updated,
        "order merged"
    );
    Ok(updated)
}
