//! Policy wire and storage types

use serde::{Deserialize, Serialize};

/// Block-list policy: the configurable set of keyword patterns.
///
/// Replaced wholesale on update; there is no partial merge. Keyword matching
/// is case-insensitive substring comparison against the prompt text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default)]
    pub block_keywords: Vec<String>,
}
