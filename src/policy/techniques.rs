//! Heuristic threat-technique inference
//!
//! Maps a prompt to zero-or-more technique tags by case-insensitive substring
//! matching against a fixed rule table. Deliberately simple: no regex, no
//! scoring, no ML. Tags follow the internal technique catalog naming.

/// One inference rule: any trigger substring emits the tag.
struct TechniqueRule {
    triggers: &'static [&'static str],
    tag: &'static str,
}

/// Rule table, evaluated in order. Emission order follows this table,
/// not the order triggers appear in the prompt.
const TECHNIQUE_RULES: &[TechniqueRule] = &[
    TechniqueRule {
        triggers: &["ignore", "leak", "injection", "override"],
        tag: "Prompt Injection (T1102)",
    },
    TechniqueRule {
        triggers: &["token", "api key"],
        tag: "Token Management (T1202)",
    },
    TechniqueRule {
        triggers: &["plugin", "supply chain"],
        tag: "Supply Chain (T1002)",
    },
    TechniqueRule {
        triggers: &["rate limit", "too many requests"],
        tag: "Rate Limiting",
    },
];

/// Tag emitted when no rule matches.
const DEFAULT_TAG: &str = "Prompt Injection (T1102)";

/// Infer technique tags for a prompt.
///
/// Rules are evaluated independently; a prompt may match several. If nothing
/// matches, the result is exactly `["Prompt Injection (T1102)"]` — the
/// catch-all classification for unrecognized input.
pub fn infer(prompt: &str) -> Vec<String> {
    let prompt_lower = prompt.to_lowercase();
    let mut tags = Vec::new();

    for rule in TECHNIQUE_RULES {
        if rule.triggers.iter().any(|t| prompt_lower.contains(t)) {
            tags.push(rule.tag.to_string());
        }
    }

    if tags.is_empty() {
        tags.push(DEFAULT_TAG.to_string());
    }

    tags
}
