//! Model usage: token share per model and prompt-cache reuse.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{percentage, rounded_div, saturating_sum};
use crate::types::{DailyModelTokens, ModelUsageMap};

/// Model usage for a period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetrics {
    /// Model with the most tokens
    pub preferred_model: Option<ModelShare>,
    pub total_tokens: u64,
    pub cache_efficiency: Option<CacheEfficiency>,
    /// Every model, most tokens first
    pub model_breakdown: Vec<ModelShare>,
}

/// One model's share of the period's tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelShare {
    /// Raw model identifier (e.g., "claude-sonnet-4-5-20250929")
    pub id: String,
    /// Display name
    pub name: String,
    pub tokens: u64,
    /// Rounded share of all tokens, 0-100
    pub percentage: u8,
}

/// Prompt-cache reads relative to cache writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEfficiency {
    pub cache_read_tokens: u64,
    pub cache_creation_tokens: u64,
    /// Reads per written token, rounded
    pub efficiency_ratio: u64,
}

/// Model families with a friendly display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    Opus,
    Sonnet,
    /// Anything else; displayed by its raw identifier
    Other,
}

impl ModelFamily {
    /// Classify a model identifier. `opus` is checked before `sonnet`.
    pub fn from_id(model_id: &str) -> Self {
        if model_id.contains("opus") {
            ModelFamily::Opus
        } else if model_id.contains("sonnet") {
            ModelFamily::Sonnet
        } else {
            ModelFamily::Other
        }
    }

    /// Friendly name, `None` for [`ModelFamily::Other`].
    pub fn display_name(&self) -> Option<&'static str> {
        match self {
            ModelFamily::Opus => Some("Claude Opus 4.5"),
            ModelFamily::Sonnet => Some("Claude Sonnet 4.5"),
            ModelFamily::Other => None,
        }
    }
}

/// Display name for a model identifier.
pub fn model_display_name(model_id: &str) -> String {
    ModelFamily::from_id(model_id)
        .display_name()
        .map(str::to_string)
        .unwrap_or_else(|| model_id.to_string())
}

/// Calculate model metrics from daily token records and lifetime usage.
pub fn model_metrics(daily: &[DailyModelTokens], usage: &ModelUsageMap) -> ModelMetrics {
    let per_model = daily
        .iter()
        .flat_map(|day| day.tokens_by_model.iter())
        .fold(IndexMap::<&str, u64>::new(), |mut acc, (model, tokens)| {
            let total = acc.entry(model.as_str()).or_insert(0);
            *total = total.saturating_add(*tokens);
            acc
        });

    let total_tokens = saturating_sum(per_model.values().copied());

    let mut ranked: Vec<(&str, u64)> = per_model.into_iter().collect();
    // Stable: equal totals keep first-seen order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let model_breakdown: Vec<ModelShare> = ranked
        .into_iter()
        .map(|(id, tokens)| ModelShare {
            id: id.to_string(),
            name: model_display_name(id),
            tokens,
            percentage: percentage(tokens, total_tokens),
        })
        .collect();

    ModelMetrics {
        preferred_model: model_breakdown.first().cloned(),
        total_tokens,
        cache_efficiency: cache_efficiency(usage),
        model_breakdown,
    }
}

/// Cache reuse across every model, `None` when nothing was ever written to the cache.
pub fn cache_efficiency(usage: &ModelUsageMap) -> Option<CacheEfficiency> {
    let cache_read_tokens = saturating_sum(usage.values().map(|u| u.cache_read_input_tokens));
    let cache_creation_tokens =
        saturating_sum(usage.values().map(|u| u.cache_creation_input_tokens));

    if cache_creation_tokens == 0 {
        return None;
    }

    Some(CacheEfficiency {
        cache_read_tokens,
        cache_creation_tokens,
        efficiency_ratio: rounded_div(cache_read_tokens, cache_creation_tokens),
    })
}
