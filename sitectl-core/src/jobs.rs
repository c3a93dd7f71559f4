//! Jobs grouped by country, as the admin client displays them.

use serde::Serialize;

use crate::models::Job;

/// One country's jobs, in store order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryGroup {
    pub country: String,
    pub jobs: Vec<Job>,
}

/// Transient, client-side copy of the job list grouped by country.
///
/// Groups appear in order of each country's first job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobBoard {
    groups: Vec<CountryGroup>,
}

impl JobBoard {
    pub fn group(jobs: impl IntoIterator<Item = Job>) -> Self {
        let mut groups: Vec<CountryGroup> = Vec::new();
        for job in jobs {
            match groups.iter_mut().find(|g| g.country == job.country) {
                Some(group) => group.jobs.push(job),
                None => groups.push(CountryGroup {
                    country: job.country.clone(),
                    jobs: vec![job],
                }),
            }
        }
        Self { groups }
    }

    pub fn groups(&self) -> &[CountryGroup] {
        &self.groups
    }

    pub fn country(&self, country: &str) -> Option<&CountryGroup> {
        self.groups.iter().find(|g| g.country == country)
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.jobs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Country of the first job with `id`, scanning groups in order.
    pub fn locate(&self, id: i64) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.jobs.iter().any(|j| j.id == Some(id)))
            .map(|g| g.country.as_str())
    }

    /// Remove one job with `id` from `country`, returning it.
    pub fn remove(&mut self, country: &str, id: i64) -> Option<Job> {
        let group = self.groups.iter_mut().find(|g| g.country == country)?;
        let pos = group.jobs.iter().position(|j| j.id == Some(id))?;
        Some(group.jobs.remove(pos))
    }

    /// Delete-by-id: find the first country holding `id` and remove the job
    /// from that group only. Returns the country it was removed from.
    ///
    /// If ids collide across countries only the first match is removed.
    pub fn delete_by_id(&mut self, id: i64) -> Option<(String, Job)> {
        let country = self.locate(id)?.to_string();
        let job = self.remove(&country, id)?;
        Some((country, job))
    }
}

/// Confirmation line shown after a delete-by-id.
pub fn deleted_message(id: i64, country: &str) -> String {
    format!("Deleted job {} from {}", id, country)
}
