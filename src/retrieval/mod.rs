//! Knowledge retrieval for product inquiries.
//!
//! The dialogue loop consumes retrieval through the [`Retriever`] trait and
//! only ever sees pre-joined context text, so the scoring backend can change
//! without touching anything upstream. The bundled [`KnowledgeRetriever`]
//! ranks knowledge-base sections by query-term overlap.

pub mod knowledge;

pub use knowledge::{CompanyInfo, KnowledgeBase, PricingPlan};

use async_trait::async_trait;

use crate::error::RetrievalError;

/// How many sections a query returns.
const TOP_K: usize = 3;

/// Supplies context text for a query, ready to splice into a prompt.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn get_context(&self, query: &str) -> Result<String, RetrievalError>;
}

/// Term-overlap retriever over knowledge-base sections.
pub struct KnowledgeRetriever {
    sections: Vec<String>,
}

impl KnowledgeRetriever {
    /// Build a retriever from a loaded knowledge base.
    pub fn new(kb: &KnowledgeBase) -> Self {
        Self {
            sections: kb.sections(),
        }
    }

    /// Fraction of query terms the section contains.
    fn score(section: &str, terms: &[String]) -> f32 {
        if terms.is_empty() {
            return 0.0;
        }
        let haystack = section.to_lowercase();
        let matched = terms.iter().filter(|t| haystack.contains(t.as_str())).count();
        matched as f32 / terms.len() as f32
    }
}

#[async_trait]
impl Retriever for KnowledgeRetriever {
    async fn get_context(&self, query: &str) -> Result<String, RetrievalError> {
        let terms: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let mut scored: Vec<(f32, &str)> = self
            .sections
            .iter()
            .map(|s| (Self::score(s, &terms), s.as_str()))
            .collect();
        // Stable sort: ties keep knowledge-base order.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let top: Vec<&str> = scored.iter().take(TOP_K).map(|(_, s)| *s).collect();
        Ok(top.join("\n\n"))
    }
}
