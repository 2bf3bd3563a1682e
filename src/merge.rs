//! Join of summaries and abstracts

use std::collections::HashMap;

use tracing::debug;

use crate::ids::PubMedId;
use crate::models::{ArticleAbstract, ArticleRecord, ArticleSummary};

/// Inner-join summaries with abstracts on PMID
///
/// Output follows summary order. Identifiers present on only one side are
/// dropped, and each identifier appears once even if a side repeats it.
///
/// # Example
///
/// ```
/// use pubmed_report::{merge_records, ArticleAbstract, ArticleSummary, PubMedId};
///
/// let pmid = PubMedId::parse("2").unwrap();
/// let summaries = vec![ArticleSummary {
///     pmid: pmid.clone(),
///     title: "T".into(),
///     first_author: "A".into(),
///     journal: "J".into(),
///     pub_date: "2024".into(),
/// }];
/// let abstracts = vec![ArticleAbstract { pmid, abstract_text: "text".into() }];
///
/// let records = merge_records(summaries, abstracts);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].abstract_text, "text");
/// ```
pub fn merge_records(
    summaries: Vec<ArticleSummary>,
    abstracts: Vec<ArticleAbstract>,
) -> Vec<ArticleRecord> {
    let summary_count = summaries.len();
    let abstract_count = abstracts.len();

    let mut by_pmid: HashMap<PubMedId, String> = abstracts
        .into_iter()
        .map(|a| (a.pmid, a.abstract_text))
        .collect();

    let records: Vec<ArticleRecord> = summaries
        .into_iter()
        .filter_map(|summary| {
            by_pmid
                .remove(&summary.pmid)
                .map(|text| ArticleRecord::from_parts(summary, text))
        })
        .collect();

    debug!(
        summaries = summary_count,
        abstracts = abstract_count,
        merged = records.len(),
        "Merged summaries with abstracts"
    );

    records
}
