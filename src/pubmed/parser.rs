//! EFetch XML parsing
//!
//! Only two things are read from a `PubmedArticleSet` document: the first
//! `PMID` element and the text of every `AbstractText` element. A pull
//! reader is enough for that and tolerates the inline markup (`<i>`,
//! `<sup>`, `<b>`) PubMed leaves inside abstracts.

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::instrument;

use crate::error::RetrievalFailure;
use crate::ids::PubMedId;
use crate::models::ArticleAbstract;

/// Parse an EFetch document into its PMID and abstract text
///
/// Text of all `AbstractText` elements, including text inside nested
/// markup, is concatenated in document order with no separator. A document
/// without any `AbstractText` yields an empty abstract.
///
/// # Errors
///
/// * `RetrievalFailure::Xml` - the payload is not well-formed XML
/// * `RetrievalFailure::MissingField` - no `PMID` element
/// * `RetrievalFailure::MalformedField` - the `PMID` text is not a PMID
///
/// # Example
///
/// ```
/// use pubmed_report::pubmed::parser::parse_abstract;
///
/// let xml = r#"<PubmedArticleSet><PubmedArticle><MedlineCitation>
///   <PMID Version="1">12345678</PMID>
///   <Article><Abstract>
///     <AbstractText Label="BACKGROUND">Why.</AbstractText>
///     <AbstractText Label="RESULTS">What.</AbstractText>
///   </Abstract></Article>
/// </MedlineCitation></PubmedArticle></PubmedArticleSet>"#;
///
/// let parsed = parse_abstract(xml).unwrap();
/// assert_eq!(parsed.pmid.to_string(), "12345678");
/// assert_eq!(parsed.abstract_text, "Why.What.");
/// ```
#[instrument(skip(xml), fields(xml_size = xml.len()))]
pub fn parse_abstract(xml: &str) -> Result<ArticleAbstract, RetrievalFailure> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().expand_empty_elements = true;

    let mut pmid: Option<String> = None;
    let mut pmid_text = String::new();
    let mut in_pmid = false;

    let mut abstract_depth: u32 = 0;
    let mut abstract_text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"PMID" if pmid.is_none() => in_pmid = true,
                b"AbstractText" => abstract_depth += 1,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"PMID" if in_pmid => {
                    in_pmid = false;
                    pmid = Some(std::mem::take(&mut pmid_text));
                }
                b"AbstractText" => abstract_depth = abstract_depth.saturating_sub(1),
                _ => {}
            },
            Ok(Event::Text(e)) if in_pmid || abstract_depth > 0 => {
                let text = e
                    .unescape()
                    .map_err(|err| RetrievalFailure::Xml(err.to_string()))?;
                if in_pmid {
                    pmid_text.push_str(&text);
                }
                if abstract_depth > 0 {
                    abstract_text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) if in_pmid || abstract_depth > 0 => {
                let text = String::from_utf8_lossy(&e);
                if in_pmid {
                    pmid_text.push_str(&text);
                }
                if abstract_depth > 0 {
                    abstract_text.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(RetrievalFailure::Xml(format!(
                    "error at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    let raw_pmid = pmid.ok_or_else(|| RetrievalFailure::MissingField {
        field: "PMID".to_string(),
    })?;
    let pmid = PubMedId::parse(&raw_pmid).map_err(|_| RetrievalFailure::MalformedField {
        field: "PMID".to_string(),
        value: raw_pmid,
    })?;

    Ok(ArticleAbstract {
        pmid,
        abstract_text,
    })
}
