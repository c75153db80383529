//! Query Understanding Orchestrator
//!
//! Sequences the engine for one request:
//!
//! 1. pronoun resolution against the session memory
//! 2. cohort assignment and cache lookup (a hit short-circuits everything)
//! 3. entity extraction and the ambiguity check (clarifications are terminal
//!    and never cached)
//! 4. pattern classification, then context inference, then the language
//!    model, each only when the previous stage is not confident enough
//! 5. cache write, memory update and routing
//!
//! `understand` never fails; only construction can.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::config::{AppConfig, ClassifierConfig};
use crate::error::Result;
use crate::lexicon::keywords::BETTING_KEYWORDS;
use crate::lexicon::{FoldedText, LEXICON};
use crate::llm::{LlmClient, create_llm_client};
use crate::llm::repair::infer_sport;
use crate::models::classification::{
    ClassificationResult, ClassificationStage, QueryCategory, QueryUnderstanding,
};
use crate::models::conversation::ConversationMemory;
use crate::models::entity::{ExtractedEntity, Sport, merge_entities};
use crate::observability::{EngineMetrics, HealthCheckResult, DependencyCheck};
use crate::services::ambiguity::{self, AmbiguityReport};
use crate::services::classification_cache::{ClassificationCache, cache_key};
use crate::services::context_inference;
use crate::services::conversation::{ConversationStore, PronounResolution};
use crate::services::entity_extractor;
use crate::services::experiment::ExperimentAssigner;
use crate::services::fallback;
use crate::services::llm_classifier::{LlmClassifier, LlmFailure};
use crate::services::pattern_classifier::{NO_MATCH_CONFIDENCE, PatternClassifier};
use crate::services::router::DataSourceRouter;
use crate::storage::{KeyValueStore, StoreFactory};

const EMPTY_QUERY_QUESTION: &str = "What would you like to know? Ask about a player, a team or a match.";

pub struct QueryUnderstandingService {
    classifier: ClassifierConfig,
    patterns: PatternClassifier<'static>,
    llm: LlmClassifier,
    router: DataSourceRouter,
    cache: ClassificationCache,
    memory: ConversationStore,
    experiments: ExperimentAssigner,
    metrics: Arc<EngineMetrics>,
}

impl QueryUnderstandingService {
    pub fn new(
        config: &AppConfig,
        llm_client: Option<Arc<dyn LlmClient>>,
        classification_store: Arc<dyn KeyValueStore<ClassificationResult>>,
        memory_store: Arc<dyn KeyValueStore<ConversationMemory>>,
        metrics: Arc<EngineMetrics>,
    ) -> Self {
        Self {
            classifier: config.classifier.clone(),
            patterns: PatternClassifier::default(),
            llm: LlmClassifier::new(llm_client, Duration::from_millis(config.llm.timeout_ms.max(1))),
            router: DataSourceRouter::default(),
            cache: ClassificationCache::new(
                classification_store,
                Duration::from_secs(config.cache.classification_ttl_secs),
            ),
            memory: ConversationStore::new(
                memory_store,
                Duration::from_secs(config.memory.ttl_secs),
                config.memory.max_messages,
            ),
            experiments: ExperimentAssigner::new(&config.experiment, config.classifier.llm_threshold),
            metrics,
        }
    }

    /// Classify and route one query
    pub async fn understand(
        &self,
        query: &str,
        session_id: Option<&str>,
        variant: Option<&str>,
    ) -> QueryUnderstanding {
        let started = Instant::now();
        let session_id = session_id.map(str::trim).filter(|s| !s.is_empty());
        let query = query.trim();

        if query.is_empty() {
            self.metrics.record_outcome("clarification");
            return empty_query();
        }

        let resolution = match session_id {
            Some(session) => self.memory.resolve_pronouns(session, query).await,
            None => PronounResolution::unchanged(query),
        };
        let resolved = resolution.resolved_query.as_str();
        let assignment = self.experiments.assign(session_id, variant);
        let key = cache_key(resolved, assignment.cohort.as_deref());

        if let Some(cached) = self.cache.get(&key).await {
            self.metrics.record_cache(true);
            self.remember(session_id, resolved, &cached.entities).await;
            self.metrics.record_outcome("cache_hit");
            self.metrics.observe_latency(started.elapsed());
            let routing = self.router.route(&key_text(resolved), &cached);
            return QueryUnderstanding {
                classification: cached,
                routing: Some(routing),
                is_ambiguous: false,
                clarifying_question: None,
                candidates: Vec::new(),
                resolved_query: resolution.resolved_query.clone(),
                used_memory: resolution.used_memory,
                cohort: assignment.cohort,
                from_cache: true,
            };
        }
        self.metrics.record_cache(false);

        let entities = entity_extractor::extract(resolved);
        debug!("Extracted {} entities from {:?}", entities.len(), resolved);

        if let Some(report) = ambiguity::detect(resolved) {
            info!("Ambiguous place reference in {:?}: {}", resolved, report.places.join(", "));
            self.remember(session_id, resolved, &entities).await;
            self.metrics.record_outcome("clarification");
            self.metrics.observe_latency(started.elapsed());
            return self.clarification(resolved, entities, report, &resolution, assignment.cohort);
        }

        let classification = self.classify(resolved, entities, assignment.llm_threshold).await;
        self.cache.put(&key, &classification).await;
        self.remember(session_id, resolved, &classification.entities).await;

        let routing = self.router.route(&key_text(resolved), &classification);
        debug!(
            "Routed {:?} ({}, {}) to {:?}/{:?}: {}",
            resolved,
            classification.category,
            classification.stage.as_str(),
            routing.source,
            routing.recency,
            routing.reason
        );
        self.metrics.record_stage(classification.stage);
        self.metrics.record_outcome("classified");
        self.metrics.observe_latency(started.elapsed());

        QueryUnderstanding {
            classification,
            routing: Some(routing),
            is_ambiguous: false,
            clarifying_question: None,
            candidates: Vec::new(),
            resolved_query: resolution.resolved_query.clone(),
            used_memory: resolution.used_memory,
            cohort: assignment.cohort,
            from_cache: false,
        }
    }

    async fn classify(
        &self,
        text: &str,
        entities: Vec<ExtractedEntity>,
        llm_threshold: f32,
    ) -> ClassificationResult {
        let sport = resolve_sport(text, &entities);

        let pattern = self.patterns.classify(text);
        let mut result = ClassificationResult::new(
            pattern.category,
            sport,
            pattern.confidence,
            entities.clone(),
            ClassificationStage::Pattern,
        );
        if pattern.is_match() {
            let alternatives: Vec<&str> = pattern.alternatives.iter().map(|c| c.as_str()).collect();
            result.reasoning = Some(if alternatives.is_empty() {
                format!("pattern rule for {}", pattern.category)
            } else {
                format!("pattern rule for {} (alternatives: {})", pattern.category, alternatives.join(", "))
            });
        }

        if result.confidence < self.classifier.context_threshold {
            if let Some(inferred) = context_inference::infer(text, &entities) {
                if inferred.confidence > result.confidence {
                    debug!("Context inference: {} at {:.2}", inferred.category, inferred.confidence);
                    result = ClassificationResult::new(
                        inferred.category,
                        sport,
                        inferred.confidence,
                        entities.clone(),
                        ClassificationStage::ContextInference,
                    )
                    .with_reasoning(inferred.reason);
                }
            }
        }

        if result.confidence < llm_threshold {
            result = match self.llm.classify(text).await {
                Ok(mut classified) => {
                    self.metrics.record_llm("ok");
                    classified.entities = merge_entities(entities, classified.entities);
                    if classified.sport == Sport::General {
                        classified.sport = sport;
                    }
                    classified
                }
                Err(LlmFailure::Disabled) => {
                    self.metrics.record_llm(LlmFailure::Disabled.outcome());
                    let degraded = fallback::classify(text, &entities, sport, self.classifier.fallback_order);
                    if degraded.confidence > result.confidence || result.category == QueryCategory::Unclear {
                        degraded
                    } else {
                        result
                    }
                }
                Err(failure) => {
                    self.metrics.record_llm(failure.outcome());
                    warn!("Language model unavailable ({}), using local fallback", failure);
                    degrade(
                        fallback::classify(text, &entities, sport, self.classifier.fallback_order),
                        result,
                    )
                }
            };
        }

        if mentions_betting(text) {
            result.is_betting_related = true;
        }
        result
    }

    fn clarification(
        &self,
        resolved: &str,
        entities: Vec<ExtractedEntity>,
        report: AmbiguityReport,
        resolution: &PronounResolution,
        cohort: Option<String>,
    ) -> QueryUnderstanding {
        let pattern = self.patterns.classify(resolved);
        let classification = ClassificationResult::new(
            pattern.category,
            Sport::General,
            pattern.confidence,
            entities,
            ClassificationStage::Pattern,
        )
        .with_reasoning(format!("ambiguous place: {}", report.places.join(", ")));

        QueryUnderstanding {
            classification,
            routing: None,
            is_ambiguous: true,
            clarifying_question: Some(report.question),
            candidates: report.candidates,
            resolved_query: resolution.resolved_query.clone(),
            used_memory: resolution.used_memory,
            cohort,
            from_cache: false,
        }
    }

    async fn remember(&self, session_id: Option<&str>, content: &str, entities: &[ExtractedEntity]) {
        if let Some(session) = session_id {
            self.memory.record_turn(session, content, entities).await;
        }
    }

    /// De-reference a query without classifying it
    pub async fn resolve_pronouns(&self, session_id: &str, query: &str) -> PronounResolution {
        self.memory.resolve_pronouns(session_id, query.trim()).await
    }

    pub async fn clear_memory(&self, session_id: &str) {
        info!("Clearing conversation memory for {}", session_id);
        self.memory.clear(session_id).await;
    }

    pub async fn clear_classification_cache(&self) {
        info!("Clearing classification cache ({})", self.cache.backend());
        self.cache.clear().await;
    }

    pub async fn memory_snapshot(&self, session_id: &str) -> Option<ConversationMemory> {
        self.memory.load(session_id).await
    }

    /// Ping the classification store for readiness
    pub async fn health_check(&self) -> HealthCheckResult {
        let started = Instant::now();
        let outcome = self.cache.ping().await;
        HealthCheckResult {
            name: "classification_cache".to_string(),
            healthy: outcome.is_ok(),
            message: match outcome {
                Ok(()) => format!("{} store reachable", self.cache.backend()),
                Err(e) => e.to_string(),
            },
            latency_ms: started.elapsed().as_millis() as u64,
        }
    }

    pub fn metrics(&self) -> &Arc<EngineMetrics> {
        &self.metrics
    }
}

#[async_trait]
impl DependencyCheck for QueryUnderstandingService {
    async fn check(&self) -> HealthCheckResult {
        self.health_check().await
    }
}

/// Keyword sport first, then the entities, else general
fn resolve_sport(text: &str, entities: &[ExtractedEntity]) -> Sport {
    LEXICON
        .detect_sport(&FoldedText::new(text))
        .unwrap_or_else(|| infer_sport(entities))
}

/// Result after a failed language-model call, never above the degraded ceiling.
/// A local category survives only when the fallback found nothing.
fn degrade(degraded: ClassificationResult, local: ClassificationResult) -> ClassificationResult {
    if degraded.category != QueryCategory::Unclear || local.category == QueryCategory::Unclear {
        return degraded;
    }
    ClassificationResult::new(
        local.category,
        local.sport,
        local.confidence.min(fallback::MAX_DEGRADED_CONFIDENCE),
        local.entities,
        ClassificationStage::KeywordFallback,
    )
    .with_reasoning(format!("degraded: kept local {}", local.category))
}

fn mentions_betting(text: &str) -> bool {
    let folded = FoldedText::new(text);
    BETTING_KEYWORDS.iter().any(|word| folded.contains_word(word))
}

fn key_text(resolved: &str) -> String {
    crate::models::entity::normalize_name(resolved)
}

fn empty_query() -> QueryUnderstanding {
    QueryUnderstanding {
        classification: ClassificationResult::new(
            QueryCategory::Unclear,
            Sport::General,
            NO_MATCH_CONFIDENCE,
            Vec::new(),
            ClassificationStage::Pattern,
        )
        .with_reasoning("empty query"),
        routing: None,
        is_ambiguous: false,
        clarifying_question: Some(EMPTY_QUERY_QUESTION.to_string()),
        candidates: Vec::new(),
        resolved_query: String::new(),
        used_memory: false,
        cohort: None,
        from_cache: false,
    }
}

/// Build the service from configuration
///
/// Fails only on configuration problems, including a language-model provider
/// that needs credentials none were given for.
pub fn create_understanding_service(
    config: &AppConfig,
    metrics: Arc<EngineMetrics>,
) -> Result<Arc<QueryUnderstandingService>> {
    let llm_client = create_llm_client(&config.llm)?;
    let classification_store = StoreFactory::create::<ClassificationResult>(&config.cache, "courtside:classification")?;
    let memory_store = StoreFactory::create::<ConversationMemory>(&config.cache, "courtside:memory")?;

    info!(
        "Query understanding service ready (cache: {}, llm: {}, experiment: {})",
        classification_store.backend(),
        config.llm.provider,
        config.experiment.enabled
    );

    Ok(Arc::new(QueryUnderstandingService::new(
        config,
        llm_client,
        classification_store,
        memory_store,
        metrics,
    )))
}
