//! Contributor affiliation data for the project bots.
//! Loads the user data YAML document and persists its affiliations.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::date::{CalendarDate, DateFormatError, DateFormatErrorKind};
pub use model::userdata::{Affiliation, UserAffiliation, UserData, UserInfo};
pub use repo::affiliation_repo::{
    AffiliationStore, RepoError, RepoResult, SqliteAffiliationRepository,
};
pub use service::loader::{load, parse_user_data, LoadError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
