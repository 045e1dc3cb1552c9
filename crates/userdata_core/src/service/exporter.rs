//! Flattens loaded user data into export records and hands them to a sink.
//!
//! # Invariants
//! - One record per (user, affiliation) pair, in document order.
//! - The sink is called exactly once per `store`, also for an empty batch.
//! - Sink errors are returned unchanged.

use crate::model::userdata::{UserAffiliation, UserData};
use crate::repo::affiliation_repo::AffiliationStore;
use log::info;

impl UserData {
    /// Builds the flat export records for every user's affiliations.
    pub fn export_records(&self) -> Vec<UserAffiliation> {
        self.users
            .iter()
            .flat_map(|user| {
                user.affiliations
                    .iter()
                    .map(move |affiliation| UserAffiliation {
                        user_login: user.github_login.clone(),
                        organization: affiliation.organization.clone(),
                        start_time: affiliation.start,
                        end_time: affiliation.end,
                    })
            })
            .collect()
    }

    /// Writes all affiliations to `sink` in a single call.
    pub fn store<S: AffiliationStore + ?Sized>(&self, sink: &S) -> Result<(), S::Error> {
        let records = self.export_records();
        sink.write_all_user_affiliations(&records)?;

        info!(
            "event=userdata_store module=userdata status=ok records={}",
            records.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::date::CalendarDate;
    use crate::model::userdata::{Affiliation, UserData, UserInfo};

    #[test]
    fn inverted_period_passes_through() {
        let start = CalendarDate::decode("2021-05-01").expect("valid date");
        let end = CalendarDate::decode("2020-05-01").expect("valid date");
        let data = UserData {
            users: vec![UserInfo {
                github_login: "erin".to_string(),
                affiliations: vec![Affiliation {
                    organization: "Globex".to_string(),
                    start,
                    end,
                }],
                email_addresses: Vec::new(),
            }],
        };

        let records = data.export_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].start_time, start);
        assert_eq!(records[0].end_time, end);
    }
}
