use crate::migration::RegionMigration;
use crate::transport::{MigrationSource, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

/// Thin REST client for the few lookups the streaming commands need before
/// they can open a stream.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct LogsUrlResponse {
    logs_url: String,
}

#[derive(Deserialize)]
struct AppResponse {
    app: AppBody,
}

#[derive(Deserialize)]
struct AppBody {
    links: AppLinks,
}

#[derive(Deserialize)]
struct AppLinks {
    deployments_stream: String,
}

#[derive(Deserialize)]
struct MigrationResponse {
    #[serde(alias = "region_migration")]
    migration: RegionMigration,
}

impl ApiClient {
    pub fn new(client: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub async fn logs_url(&self, app: &str) -> Result<String, TransportError> {
        let res: LogsUrlResponse = self.get_json(&["v1", "apps", app, "logs"]).await?;
        Ok(res.logs_url)
    }

    pub async fn deployments_stream_url(&self, app: &str) -> Result<String, TransportError> {
        let res: AppResponse = self.get_json(&["v1", "apps", app]).await?;
        Ok(res.app.links.deployments_stream)
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let invalid = |message: String| TransportError::InvalidUrl {
            url: self.base_url.clone(),
            message,
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base url".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T>(&self, segments: &[&str]) -> Result<T, TransportError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?.to_string();

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::connect(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| TransportError::Decode {
                url,
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl MigrationSource for ApiClient {
    async fn fetch(
        &self,
        app: &str,
        migration_id: &str,
    ) -> Result<RegionMigration, TransportError> {
        let res: MigrationResponse = self
            .get_json(&["v1", "apps", app, "region_migrations", migration_id])
            .await?;
        Ok(res.migration)
    }
}

#[cfg(test)]
mod tests {
    use super::ApiClient;
    use pretty_assertions::assert_eq;

    fn api(base: &str) -> ApiClient {
        ApiClient::new(reqwest::Client::new(), base, None)
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        // Arrange
        let api = api("https://api.test");

        // Act
        let url = api.endpoint(&["v1", "apps", "a/b c?", "logs"]).unwrap();

        // Assert
        assert_eq!(url.as_str(), "https://api.test/v1/apps/a%2Fb%20c%3F/logs");
    }

    #[test]
    fn base_path_is_kept() {
        // Arrange
        let api = api("https://api.test/prefix/");

        // Act
        let url = api.endpoint(&["v1", "apps", "shop"]).unwrap();

        // Assert
        assert_eq!(url.as_str(), "https://api.test/prefix/v1/apps/shop");
    }
}
