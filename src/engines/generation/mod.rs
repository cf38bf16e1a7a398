pub mod evolution_engine;
pub mod genome;
pub mod grid;
pub mod grid_search;
pub mod operators;
pub mod progress;
pub mod selector;

pub use evolution_engine::{
    CancellationHandle, GeneticSearchOrchestrator, SearchOutcome, SearchState,
};
pub use genome::{Configuration, ParameterSetting, StageGenes, StageSettings};
pub use grid::GridEnumerator;
pub use grid_search::GridSearch;
pub use operators::{GeneticOperators, DEFAULT_MUTATION_PROBABILITY};
pub use progress::{
    ChannelProgressCallback, GenerationReport, LogProgressCallback, ProgressCallback,
    ProgressMessage, SilentProgress,
};
pub use selector::{rank_candidates, ScoredCandidate, StrategySelector};
