pub mod browse_session;
pub mod decision_recorder;
pub mod model_builder;
pub mod ranker;
pub mod sync_worker;
pub mod tag_stats;

pub use browse_session::{BrowseSession, SessionEnd, SessionSettings};
pub use decision_recorder::{DecisionRecorder, RecordOutcome};
pub use model_builder::ModelBuilder;
pub use ranker::{predict, running_average, suggest_action, DEFAULT_SUGGESTION_THRESHOLD};
pub use sync_worker::{SyncReport, SyncWorker, DEFAULT_PUBLISH_DELAY};
pub use tag_stats::TagStatsAggregator;
