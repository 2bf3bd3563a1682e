//! PubMed E-utilities access: ESearch, ESummary and EFetch

pub mod client;
pub mod parser;
pub(crate) mod responses;

pub use client::PubMedClient;
pub use parser::parse_abstract;
