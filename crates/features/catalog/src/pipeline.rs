use crate::filter::Predicate;
use confhub_domain::{ConferenceRecord, PageRequest, PageResult};

/// Filters `records` in their original order and cuts out the requested page.
///
/// Out-of-range pages are not an error: they come back with no items but with the correct
/// totals, so a caller can clamp its own index.
#[must_use]
pub fn paginate(
    records: &[ConferenceRecord],
    predicate: &Predicate,
    page: PageRequest,
) -> PageResult {
    let page = PageRequest::new(page.index, page.size);
    let offset = page.offset();

    let mut total_count = 0;
    let mut items = Vec::with_capacity(page.size.min(records.len()));

    for record in records.iter().filter(|r| predicate.matches(r)) {
        if total_count >= offset && items.len() < page.size {
            items.push(record.clone());
        }
        total_count += 1;
    }

    PageResult {
        items,
        total_count,
        page_count: page.page_count(total_count),
        index: page.index,
        size: page.size,
    }
}

/// Returns every matching record, in catalog order.
#[must_use]
pub fn filter_all(records: &[ConferenceRecord], predicate: &Predicate) -> Vec<ConferenceRecord> {
    records.iter().filter(|r| predicate.matches(r)).cloned().collect()
}
