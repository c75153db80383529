//! Threshold experiment cohorts
//!
//! Sessions are bound to a cohort on first sight and keep it. The initial
//! pick hashes the session id with FNV-1a so every replica agrees.

use dashmap::DashMap;
use tracing::debug;

use crate::config::config::{ExperimentConfig, ThresholdVariant};

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// 64-bit FNV-1a
pub fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Cohort and threshold in effect for one request
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub cohort: Option<String>,
    pub llm_threshold: f32,
}

pub struct ExperimentAssigner {
    enabled: bool,
    variants: Vec<ThresholdVariant>,
    default_threshold: f32,
    sessions: DashMap<String, String>,
}

impl ExperimentAssigner {
    pub fn new(config: &ExperimentConfig, default_threshold: f32) -> Self {
        Self {
            enabled: config.enabled && !config.variants.is_empty(),
            variants: config.variants.clone(),
            default_threshold,
            sessions: DashMap::new(),
        }
    }

    fn variant(&self, name: &str) -> Option<&ThresholdVariant> {
        self.variants.iter().find(|v| v.name.eq_ignore_ascii_case(name.trim()))
    }

    fn assignment(variant: &ThresholdVariant) -> Assignment {
        Assignment {
            cohort: Some(variant.name.clone()),
            llm_threshold: variant.llm_threshold,
        }
    }

    /// Resolve the cohort for a request
    ///
    /// An explicit known variant always wins and rebinds the session. Without
    /// one, a disabled experiment or a missing session id means no cohort.
    pub fn assign(&self, session_id: Option<&str>, requested: Option<&str>) -> Assignment {
        if let Some(variant) = requested.and_then(|name| self.variant(name)) {
            if let Some(session) = session_id {
                self.sessions.insert(session.to_string(), variant.name.clone());
            }
            return Self::assignment(variant);
        }

        let (true, Some(session)) = (self.enabled, session_id) else {
            return Assignment {
                cohort: None,
                llm_threshold: self.default_threshold,
            };
        };

        let name = self
            .sessions
            .entry(session.to_string())
            .or_insert_with(|| {
                let index = (fnv1a(session.as_bytes()) % self.variants.len() as u64) as usize;
                debug!("Session {} assigned to cohort {}", session, self.variants[index].name);
                self.variants[index].name.clone()
            })
            .clone();

        match self.variant(&name) {
            Some(variant) => Self::assignment(variant),
            None => Assignment {
                cohort: None,
                llm_threshold: self.default_threshold,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> ExperimentAssigner {
        let config = ExperimentConfig {
            enabled: true,
            ..ExperimentConfig::default()
        };
        ExperimentAssigner::new(&config, 0.6)
    }

    #[test]
    fn test_fnv1a_reference_values() {
        assert_eq!(fnv1a(b""), 0xcbf29ce484222325);
        assert_eq!(fnv1a(b"a"), 0xaf63dc4c8601ec8c);
    }

    #[test]
    fn test_disabled_has_no_cohort() {
        let assigner = ExperimentAssigner::new(&ExperimentConfig::default(), 0.6);
        let assignment = assigner.assign(Some("s1"), None);
        assert_eq!(assignment.cohort, None);
        assert_eq!(assignment.llm_threshold, 0.6);
    }

    #[test]
    fn test_sticky_per_session() {
        let assigner = enabled();
        let first = assigner.assign(Some("session-42"), None);
        assert!(first.cohort.is_some());
        for _ in 0..5 {
            assert_eq!(assigner.assign(Some("session-42"), None), first);
        }
        // a fresh assigner (another replica) agrees
        assert_eq!(enabled().assign(Some("session-42"), None), first);
    }

    #[test]
    fn test_explicit_variant_wins_and_rebinds() {
        let assigner = enabled();
        let strict = assigner.assign(Some("s1"), Some("STRICT"));
        assert_eq!(strict.cohort.as_deref(), Some("strict"));
        assert_eq!(strict.llm_threshold, 0.7);
        assert_eq!(assigner.assign(Some("s1"), None), strict);
    }

    #[test]
    fn test_unknown_variant_is_ignored() {
        let assigner = enabled();
        assert_eq!(assigner.assign(Some("s1"), Some("bogus")), assigner.assign(Some("s1"), None));
    }

    #[test]
    fn test_no_session_no_cohort() {
        assert_eq!(enabled().assign(None, None).cohort, None);
    }
}
