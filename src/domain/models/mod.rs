pub mod blacklist;
pub mod candidate;
pub mod config;
pub mod decision;
pub mod preference;
pub mod publish_task;
pub mod suggestion;
pub mod tag_stat;

pub use blacklist::Blacklist;
pub use candidate::{Candidate, MediaFile};
pub use config::{
    BrowseConfig, Config, DatabaseConfig, LoggingConfig, RemoteConfig, SyncConfig,
};
pub use decision::{Decision, Judgment};
pub use preference::{PreferenceModel, TagReport, TagReportEntry};
pub use publish_task::{PublishState, PublishTask};
pub use suggestion::SuggestedAction;
pub use tag_stat::TagStat;
