//! Conversation Memory & Pronoun Resolver
//!
//! Per-session memory with a session-level TTL, refreshed on every turn.
//! Pronoun resolution replaces reference words with the last mentioned
//! entity of the matching type before the query is classified.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::conversation::{ConversationMemory, ConversationMessage, MessageRole};
use crate::models::entity::{EntityType, ExtractedEntity};
use crate::services::entity_extractor;
use crate::storage::KeyValueStore;

/// Which memory slot a reference points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Player,
    Team,
    Match,
}

struct ReferenceRule {
    pattern: Regex,
    slot: Slot,
    possessive: bool,
}

// phrases before single words so "that game" is not split
static REFERENCE_RULES: Lazy<Vec<ReferenceRule>> = Lazy::new(|| {
    let rule = |source: &str, slot, possessive| ReferenceRule {
        pattern: Regex::new(source).expect("reference pattern is valid"),
        slot,
        possessive,
    };
    vec![
        rule(r"(?i)\b(that|the|this|last) (game|match)\b", Slot::Match, false),
        rule(r"(?i)\b(he|him|she)\b", Slot::Player, false),
        rule(r"(?i)\bhis\b", Slot::Player, true),
        rule(r"(?i)\b(they|them)\b", Slot::Team, false),
        rule(r"(?i)\btheir\b", Slot::Team, true),
    ]
});

/// One replaced reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substitution {
    pub reference: String,
    pub replacement: String,
}

/// Result of pronoun resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PronounResolution {
    pub resolved_query: String,
    pub used_memory: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub substitutions: Vec<Substitution>,
}

impl PronounResolution {
    pub fn unchanged(query: &str) -> Self {
        Self {
            resolved_query: query.to_string(),
            used_memory: false,
            substitutions: Vec::new(),
        }
    }
}

/// Replace references in `query` using the memory slots
///
/// Player pronouns stay untouched when the query names a player itself
/// (`Did LeBron say he is retiring?`).
pub fn resolve_references(query: &str, memory: &ConversationMemory) -> PronounResolution {
    let mut resolved = query.to_string();
    let mut substitutions = Vec::new();
    let names_player = entity_extractor::extract(query)
        .iter()
        .any(|e| e.entity_type == EntityType::Player);

    for rule in REFERENCE_RULES.iter() {
        let target = match rule.slot {
            Slot::Player if names_player => None,
            Slot::Player => memory.last_player.as_deref(),
            Slot::Team => memory.last_team.as_deref(),
            Slot::Match => memory.last_match.as_deref(),
        };
        let Some(target) = target else {
            continue;
        };
        let replacement = if rule.possessive {
            format!("{}'s", target)
        } else {
            target.to_string()
        };
        let replaced = rule
            .pattern
            .replace_all(&resolved, |caps: &Captures| {
                substitutions.push(Substitution {
                    reference: caps[0].to_string(),
                    replacement: replacement.clone(),
                });
                replacement.clone()
            })
            .into_owned();
        resolved = replaced;
    }

    PronounResolution {
        used_memory: !substitutions.is_empty(),
        resolved_query: resolved,
        substitutions,
    }
}

/// Session memory store
pub struct ConversationStore {
    store: Arc<dyn KeyValueStore<ConversationMemory>>,
    ttl: Duration,
    max_messages: usize,
}

impl ConversationStore {
    pub fn new(store: Arc<dyn KeyValueStore<ConversationMemory>>, ttl: Duration, max_messages: usize) -> Self {
        Self {
            store,
            ttl,
            max_messages: max_messages.max(1),
        }
    }

    /// Current memory of a session, if any
    pub async fn load(&self, session_id: &str) -> Option<ConversationMemory> {
        match self.store.get(session_id).await {
            Ok(memory) => memory,
            Err(e) => {
                warn!("Conversation memory read failed for {}: {}", session_id, e);
                None
            }
        }
    }

    /// Resolve references against the session's memory
    pub async fn resolve_pronouns(&self, session_id: &str, query: &str) -> PronounResolution {
        match self.load(session_id).await {
            Some(memory) => {
                let resolution = resolve_references(query, &memory);
                if resolution.used_memory {
                    debug!(
                        "Resolved {} reference(s) for session {}",
                        resolution.substitutions.len(),
                        session_id
                    );
                }
                resolution
            }
            None => PronounResolution::unchanged(query),
        }
    }

    /// Record a user turn and refresh the "last mentioned" slots
    pub async fn record_turn(&self, session_id: &str, content: &str, entities: &[ExtractedEntity]) {
        let mut memory = self
            .load(session_id)
            .await
            .unwrap_or_else(|| ConversationMemory::new(session_id));
        memory.push_message(
            ConversationMessage::new(MessageRole::User, content, entities.to_vec()),
            self.max_messages,
        );
        memory.remember_entities(entities);

        if let Err(e) = self.store.set(session_id, memory, self.ttl).await {
            warn!("Conversation memory write failed for {}: {}", session_id, e);
        }
    }

    pub async fn clear(&self, session_id: &str) {
        if let Err(e) = self.store.delete(session_id).await {
            warn!("Conversation memory delete failed for {}: {}", session_id, e);
        }
    }
}
