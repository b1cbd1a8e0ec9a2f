//! Product knowledge base: schema and section formatting.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RetrievalError;

/// Root knowledge-base document, loaded from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(default)]
    pub company_info: Option<CompanyInfo>,
    #[serde(default)]
    pub pricing: BTreeMap<String, PricingPlan>,
    #[serde(default)]
    pub policies: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingPlan {
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub videos_per_month: String,
    #[serde(default)]
    pub resolution: String,
    #[serde(default)]
    pub features: Vec<String>,
}

impl KnowledgeBase {
    /// Load and parse a knowledge base file.
    pub fn load(path: &Path) -> Result<Self, RetrievalError> {
        if !path.exists() {
            return Err(RetrievalError::KnowledgeBaseMissing(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| RetrievalError::InvalidKnowledgeBase(e.to_string()))
    }

    /// Render the knowledge base into retrievable text sections: one for the
    /// company, one per pricing plan, one per policy.
    pub fn sections(&self) -> Vec<String> {
        let mut sections = Vec::new();

        if let Some(info) = &self.company_info {
            sections.push(format!(
                "Company: {}\nDescription: {}",
                info.name, info.description
            ));
        }

        for plan in self.pricing.values() {
            let mut lines = vec![
                format!("{}:", plan.name),
                format!("  Price: {}", plan.price),
                format!("  Videos per month: {}", plan.videos_per_month),
                format!("  Resolution: {}", plan.resolution),
            ];
            if !plan.features.is_empty() {
                lines.push(format!("  Features: {}", plan.features.join(", ")));
            }
            sections.push(lines.join("\n"));
        }

        for (key, value) in &self.policies {
            sections.push(match key.as_str() {
                "refund_policy" => format!("Refund Policy: {value}"),
                "support" => format!("Support: {value}"),
                _ => format!("{key}: {value}"),
            });
        }

        sections
    }
}
