//! REST-backed selection store.
//!
//! Client for a PostgREST-style row API: records live in a single table
//! addressed by the `(user_id, name)` composite key, with list-by-user,
//! insert and delete-by-key operations. Transient transport failures are
//! retried with exponential backoff before surfacing as
//! [`PlanError::StoreUnavailable`].

use crate::error::{PlanError, Result};
use crate::store::{SelectionRecord, SelectionStore, UserId};
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;

/// Configuration for the REST selection store.
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Service root, e.g. `https://project.example.co`.
    pub base_url: String,
    /// API key, sent as both `apikey` and bearer token.
    pub api_key: String,
    /// Table holding the selection records. Default: `selected_destinations`.
    pub table: String,
    /// Per-request timeout in seconds. Default: 30.
    pub timeout_secs: u64,
    /// Retries for transient failures before giving up. Default: 3.
    pub max_retries: u32,
}

impl RestStoreConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: "selected_destinations".to_string(),
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

/// Selection store talking to a remote row API.
pub struct RestSelectionStore {
    client: Client,
    config: RestStoreConfig,
}

impl RestSelectionStore {
    pub fn new(config: RestStoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PlanError::unavailable(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn rows_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.table
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    /// Issue a request, retrying transient failures (transport errors,
    /// 429 and 5xx responses) with exponential backoff.
    async fn send_with_retry(
        &self,
        build: impl Fn() -> RequestBuilder,
        context: &str,
    ) -> Result<Response> {
        let mut retries = 0;

        loop {
            let response = self.authorize(build()).send().await;

            match response {
                Ok(resp) if is_transient(resp.status()) => {
                    retries += 1;
                    if retries > self.config.max_retries {
                        return Err(PlanError::unavailable(format!(
                            "{}: HTTP {} after {} retries",
                            context,
                            resp.status(),
                            self.config.max_retries
                        )));
                    }
                    let backoff = backoff_delay(retries);
                    warn!(
                        "{}: HTTP {}, retry {} after {:?}",
                        context,
                        resp.status(),
                        retries,
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                }
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    retries += 1;
                    if retries > self.config.max_retries {
                        return Err(PlanError::unavailable(format!("{}: {}", context, e)));
                    }
                    let backoff = backoff_delay(retries);
                    warn!("{}: {}, retry {} after {:?}", context, e, retries, backoff);
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
}

impl SelectionStore for RestSelectionStore {
    async fn list_selections(&self, user: &UserId) -> Result<Vec<SelectionRecord>> {
        let url = self.rows_url();
        let resp = self
            .send_with_retry(
                || {
                    self.client.get(&url).query(&[
                        ("user_id", format!("eq.{}", user)),
                        ("select", "*".to_string()),
                        ("order", "created_at.asc".to_string()),
                    ])
                },
                "list selections",
            )
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(status_error(status, "list selections"));
        }

        let records: Vec<SelectionRecord> = resp
            .json()
            .await
            .map_err(|e| PlanError::unavailable(format!("list selections: {}", e)))?;
        debug!("listed {} selections for {}", records.len(), user);
        Ok(records)
    }

    async fn add_selection(&self, record: SelectionRecord) -> Result<()> {
        let url = self.rows_url();
        let payload = vec![record.clone()];
        let resp = self
            .send_with_retry(
                || {
                    self.client
                        .post(&url)
                        .header("Prefer", "return=minimal")
                        .json(&payload)
                },
                "add selection",
            )
            .await?;

        let status = resp.status();
        if status == StatusCode::CONFLICT {
            return Err(PlanError::AlreadyExists { name: record.name });
        }
        if !status.is_success() {
            return Err(status_error(status, "add selection"));
        }
        debug!("stored '{}' for {}", record.name, record.user_id);
        Ok(())
    }

    async fn remove_selection(&self, user: &UserId, name: &str) -> Result<()> {
        let url = self.rows_url();
        let resp = self
            .send_with_retry(
                || {
                    self.client
                        .delete(&url)
                        .header("Prefer", "return=representation")
                        .query(&[
                            ("user_id", format!("eq.{}", user)),
                            ("name", format!("eq.{}", name)),
                        ])
                },
                "remove selection",
            )
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(status_error(status, "remove selection"));
        }

        // The API reports the deleted rows; an empty set means the key
        // did not exist.
        let deleted: Vec<SelectionRecord> = resp
            .json()
            .await
            .map_err(|e| PlanError::unavailable(format!("remove selection: {}", e)))?;
        if deleted.is_empty() {
            return Err(PlanError::NotFound {
                name: name.to_string(),
            });
        }
        debug!("deleted '{}' for {}", name, user);
        Ok(())
    }
}

fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn backoff_delay(retries: u32) -> Duration {
    // 1s, 2s, 4s, 8s...
    Duration::from_millis(500 * (1 << retries.min(4)))
}

fn status_error(status: StatusCode, context: &str) -> PlanError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PlanError::Unauthenticated,
        _ => PlanError::unavailable(format!("{}: HTTP {}", context, status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = RestStoreConfig::new("https://project.example.co/", "key");
        assert_eq!(config.table, "selected_destinations");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_rows_url_strips_trailing_slash() {
        let store =
            RestSelectionStore::new(RestStoreConfig::new("https://project.example.co/", "key"))
                .unwrap();
        assert_eq!(
            store.rows_url(),
            "https://project.example.co/rest/v1/selected_destinations"
        );
    }

    #[test]
    fn test_status_classification() {
        assert!(is_transient(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_transient(StatusCode::BAD_GATEWAY));
        assert!(!is_transient(StatusCode::CONFLICT));
        assert!(!is_transient(StatusCode::OK));

        assert_eq!(
            status_error(StatusCode::UNAUTHORIZED, "x"),
            PlanError::Unauthenticated
        );
        assert!(matches!(
            status_error(StatusCode::IM_A_TEAPOT, "x"),
            PlanError::StoreUnavailable { .. }
        ));
    }

    #[test]
    fn test_backoff_growth() {
        assert!(backoff_delay(2) > backoff_delay(1));
        // Capped so repeated failures do not wait forever
        assert_eq!(backoff_delay(10), backoff_delay(4));
    }
}
