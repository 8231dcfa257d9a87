use anyhow::{Context, Result};
use tracing::info;

use super::{Snapshot, SnapshotSource};
use crate::config::BackendConfig;
use crate::fetch::auth::ApiKey;
use crate::fetch::{BasicClient, HttpClient, fetch_json};
use crate::model::{Grade, Session, Subject};

/// Reads subjects and grades from the backend's REST tables.
pub struct RestSource<C> {
    client: C,
    base_url: String,
}

impl RestSource<ApiKey<BasicClient>> {
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let client = ApiKey::backend(BasicClient::new()?, &config.api_key, &config.access_token)?;
        Ok(Self::new(client, &config.base_url))
    }
}

impl<C: HttpClient> RestSource<C> {
    pub fn new(client: C, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn table_url(&self, table: &str, user_id: &str, order: &str) -> Result<String> {
        let mut url = reqwest::Url::parse(&format!("{}/rest/v1/{}", self.base_url, table))
            .with_context(|| format!("invalid backend url '{}'", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("user_id", &format!("eq.{user_id}"))
            .append_pair("order", order);
        Ok(url.into())
    }
}

#[async_trait::async_trait]
impl<C: HttpClient> SnapshotSource for RestSource<C> {
    #[tracing::instrument(skip(self, session), fields(base_url = %self.base_url))]
    async fn load(&self, session: &Session) -> Result<Snapshot> {
        let user_id = session.require_user()?;

        let subjects_url = self.table_url("subjects", user_id, "name.asc")?;
        let grades_url = self.table_url("grades", user_id, "test_date.desc")?;

        let (subjects, grades): (Vec<Subject>, Vec<Grade>) = tokio::try_join!(
            fetch_json(&self.client, &subjects_url),
            fetch_json(&self.client, &grades_url),
        )?;

        info!(
            subjects = subjects.len(),
            grades = grades.len(),
            "Fetched snapshot from backend"
        );

        Ok(Snapshot::new(subjects, grades))
    }
}
