//! 服务模块
//!
//! 查询理解引擎的各个阶段与编排。

pub mod ambiguity;
pub mod classification_cache;
pub mod context_inference;
pub mod conversation;
pub mod entity_extractor;
pub mod experiment;
pub mod fallback;
pub mod intent_rules;
pub mod llm_classifier;
pub mod pattern_classifier;
pub mod router;
pub mod understanding;

pub use ambiguity::AmbiguityReport;
pub use classification_cache::{ClassificationCache, cache_key};
pub use conversation::{ConversationStore, PronounResolution};
pub use experiment::{Assignment, ExperimentAssigner};
pub use llm_classifier::{LlmClassifier, LlmFailure};
pub use pattern_classifier::{PatternClassification, PatternClassifier};
pub use router::DataSourceRouter;
pub use understanding::{QueryUnderstandingService, create_understanding_service};
