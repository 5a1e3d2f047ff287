//! Built-in agent registry.
//!
//! Agents are compiled in; there is no dynamic registration. Lookups are
//! case-insensitive and check canonical keys before aliases.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// A bundled agent persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Agent {
    /// Canonical key (e.g., `backend`).
    pub key: &'static str,

    /// Human-readable name written into status files (e.g., `Backend Engineer`).
    pub name: &'static str,

    /// Markdown file inside the installed agents tree.
    pub file: &'static str,

    /// One-line summary shown by `list`.
    pub description: &'static str,
}

/// All agents in presentation order.
pub const AGENTS: &[Agent] = &[
    Agent {
        key: "backend",
        name: "Backend Engineer",
        file: "backend.md",
        description: "APIs, services, data models and persistence",
    },
    Agent {
        key: "frontend",
        name: "Frontend Engineer",
        file: "frontend.md",
        description: "Web UI, state management and accessibility",
    },
    Agent {
        key: "mobile",
        name: "Mobile Engineer",
        file: "mobile.md",
        description: "iOS and Android apps, offline-first flows",
    },
    Agent {
        key: "devops",
        name: "DevOps Engineer",
        file: "devops.md",
        description: "CI/CD, infrastructure as code and observability",
    },
    Agent {
        key: "backend-reviewer",
        name: "Backend Reviewer",
        file: "backend-reviewer.md",
        description: "Reviews server-side changes for correctness and safety",
    },
    Agent {
        key: "frontend-reviewer",
        name: "Frontend Reviewer",
        file: "frontend-reviewer.md",
        description: "Reviews UI changes for behavior, performance and a11y",
    },
    Agent {
        key: "mobile-reviewer",
        name: "Mobile Reviewer",
        file: "mobile-reviewer.md",
        description: "Reviews mobile changes for platform and release risks",
    },
    Agent {
        key: "devops-reviewer",
        name: "DevOps Reviewer",
        file: "devops-reviewer.md",
        description: "Reviews pipelines and infrastructure changes",
    },
    Agent {
        key: "consultant",
        name: "Consultant",
        file: "consultant.md",
        description: "Architecture trade-offs and delivery planning",
    },
    Agent {
        key: "ai-metrics",
        name: "AI Metrics Analyst",
        file: "ai-metrics.md",
        description: "Measures the delivery impact of AI-assisted work",
    },
];

/// Shorthand keys and the canonical key each resolves to.
pub const ALIASES: &[(&str, &str)] = &[
    ("be", "backend"),
    ("back", "backend"),
    ("fe", "frontend"),
    ("front", "frontend"),
    ("mob", "mobile"),
    ("ops", "devops"),
    ("ber", "backend-reviewer"),
    ("be-review", "backend-reviewer"),
    ("fer", "frontend-reviewer"),
    ("fe-review", "frontend-reviewer"),
    ("mobr", "mobile-reviewer"),
    ("mob-review", "mobile-reviewer"),
    ("opsr", "devops-reviewer"),
    ("ops-review", "devops-reviewer"),
    ("cons", "consultant"),
    ("metrics", "ai-metrics"),
    ("aim", "ai-metrics"),
];

static KEY_INDEX: LazyLock<HashMap<&'static str, &'static Agent>> =
    LazyLock::new(|| AGENTS.iter().map(|agent| (agent.key, agent)).collect());

static ALIAS_INDEX: LazyLock<HashMap<&'static str, &'static Agent>> = LazyLock::new(|| {
    ALIASES
        .iter()
        .filter_map(|(alias, key)| KEY_INDEX.get(key).map(|agent| (*alias, *agent)))
        .collect()
});

/// Resolve a key or alias to an agent.
///
/// Matching ignores ASCII case and surrounding whitespace. Exact keys win
/// over aliases; there is no partial matching.
pub fn resolve(input: &str) -> Option<&'static Agent> {
    let needle = input.trim().to_ascii_lowercase();
    KEY_INDEX
        .get(needle.as_str())
        .or_else(|| ALIAS_INDEX.get(needle.as_str()))
        .copied()
}

/// Aliases that resolve to `key`, in declaration order.
pub fn aliases_for(key: &str) -> Vec<&'static str> {
    ALIASES
        .iter()
        .filter(|(_, target)| *target == key)
        .map(|(alias, _)| *alias)
        .collect()
}

/// Comma-separated canonical keys, for error messages.
pub fn available_keys() -> String {
    AGENTS
        .iter()
        .map(|agent| agent.key)
        .collect::<Vec<_>>()
        .join(", ")
}
