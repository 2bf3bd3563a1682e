//! Records produced by each pipeline stage

use serde::{Deserialize, Serialize};

use crate::ids::PubMedId;

/// Bibliographic summary from ESummary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub pmid: PubMedId,
    pub title: String,
    /// ESummary `sortfirstauthor`
    pub first_author: String,
    /// ESummary `source` (abbreviated journal name)
    pub journal: String,
    /// ESummary `epubdate`, often empty for print-only articles
    pub pub_date: String,
}

/// Abstract text from EFetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleAbstract {
    pub pmid: PubMedId,
    /// Concatenated `AbstractText` content; empty when the article has none
    pub abstract_text: String,
}

/// One exported row: a summary joined with its abstract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub pmid: PubMedId,
    pub title: String,
    pub first_author: String,
    pub journal: String,
    pub pub_date: String,
    pub abstract_text: String,
}

impl ArticleRecord {
    /// Join a summary with the abstract of the same article
    pub fn from_parts(summary: ArticleSummary, abstract_text: String) -> Self {
        Self {
            pmid: summary.pmid,
            title: summary.title,
            first_author: summary.first_author,
            journal: summary.journal,
            pub_date: summary.pub_date,
            abstract_text,
        }
    }
}
