//! Best-effort extraction of leads from a rendered search-results page.
//!
//! Field lookups are structural CSS selectors against the directory's
//! markup. Each field is an independent fallible lookup: a selector miss
//! degrades that field to `None` and never aborts the batch. Only a missing
//! business name drops a candidate.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use leadscout_core::{Lead, SourcePlatform};

use crate::pace::Pacer;

/// The container whose presence means listing data has rendered. Shared
/// with the fetcher's selector wait.
pub const RESULTS_SELECTOR: &str = ".box-result";

static RESULT_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(RESULTS_SELECTOR).expect("valid result-block selector"));
static BUSINESS_NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2.r-cl-h.dn-h").expect("valid name selector"));
static PHONE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".pns_h.g-call.l-f17").expect("valid phone selector"));
static ADDRESS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p.r-cl-l.pa").expect("valid address selector"));
static WEBSITE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a.ws-ic.cp.ws.g-call.l-f17.p-l15").expect("valid website selector")
});

/// Selects up to `limit` candidate result blocks in document order and
/// serializes each to an owned fragment.
///
/// The cap applies to raw candidates scanned; dropping unnamed candidates
/// happens later, so fewer than `limit` leads is a normal outcome.
#[must_use]
pub fn select_candidates(html: &str, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&RESULT_BLOCK)
        .take(limit)
        .map(|block| block.html())
        .collect()
}

/// Maps one candidate block to a lead.
///
/// Returns `None` when no non-empty business name can be extracted; all
/// other fields degrade to `None` individually.
#[must_use]
pub fn extract_candidate(fragment: &str, platform: SourcePlatform) -> Option<Lead> {
    let block = Html::parse_fragment(fragment);

    let business_name = block
        .select(&BUSINESS_NAME)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty())?;

    let phone = block
        .select(&PHONE)
        .next()
        .and_then(|el| el.value().attr("data-slno"))
        .map(str::to_owned)
        .filter(|v| !v.is_empty());

    let address = block
        .select(&ADDRESS)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|v| !v.is_empty());

    let website = block
        .select(&WEBSITE)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(str::to_owned)
        .filter(|v| !v.is_empty());

    Some(Lead {
        business_name,
        // This source's result blocks carry no owner or e-mail markup.
        owner_name: None,
        phone,
        address,
        website,
        email: None,
        source_platform: platform,
    })
}

/// Extracts up to `limit` leads from a rendered page, in document order,
/// yielding to the politeness pacer between successive candidates.
///
/// Never fails: a page with no candidates simply yields an empty batch.
pub async fn extract_leads(
    html: &str,
    limit: usize,
    platform: SourcePlatform,
    pacer: &Pacer,
) -> Vec<Lead> {
    // Candidates are serialized to owned fragments up front so no document
    // handle is held across the pacing awaits.
    let candidates = select_candidates(html, limit);
    let mut leads = Vec::with_capacity(candidates.len());

    for (index, fragment) in candidates.iter().enumerate() {
        if index > 0 {
            pacer.pace().await;
        }
        match extract_candidate(fragment, platform) {
            Some(lead) => leads.push(lead),
            None => tracing::debug!(index, "candidate has no business name, dropped"),
        }
    }

    tracing::debug!(
        candidates = candidates.len(),
        leads = leads.len(),
        "extracted leads from results page"
    );
    leads
}
