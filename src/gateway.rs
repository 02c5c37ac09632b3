use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::{
    config::SimulationConfig,
    error::{Error, Result},
};

/// One method per remote capability of the simulation engine.
///
/// Every call maps 1:1 to a single network round trip; nothing here batches,
/// retries or caches. Any transport error or non-2xx response surfaces as a
/// failure carrying a message, without interpreting the status further.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn submit(&self, config: &SimulationConfig) -> Result<String>;
    async fn start(&self) -> Result<String>;
    async fn stop(&self) -> Result<String>;
    async fn reset(&self) -> Result<String>;
    async fn save_config(&self, config: &SimulationConfig) -> Result<String>;
    async fn load_config(&self) -> Result<SimulationConfig>;
    async fn ticket_count(&self) -> Result<u64>;
    async fn logs(&self) -> Result<Vec<String>>;
}

/// [`Gateway`] over HTTP, rooted at the engine's `/api/tickets` base path.
#[derive(Clone)]
pub struct HttpGateway {
    base_url: String,
    http: Client,
}

impl HttpGateway {
    pub fn new<U: Into<String>>(base_url: U) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn ok(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();

        Err(Error::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn post_text(&self, path: &str) -> Result<String> {
        let response = self.http.post(self.url(path)).send().await?;

        Ok(Self::ok(response).await?.text().await?)
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn submit(&self, config: &SimulationConfig) -> Result<String> {
        let response = self.http.post(self.url("submit")).json(config).send().await?;

        Ok(Self::ok(response).await?.text().await?)
    }

    async fn start(&self) -> Result<String> {
        self.post_text("start").await
    }

    async fn stop(&self) -> Result<String> {
        self.post_text("stop").await
    }

    async fn reset(&self) -> Result<String> {
        self.post_text("reset").await
    }

    async fn save_config(&self, config: &SimulationConfig) -> Result<String> {
        let response = self
            .http
            .post(self.url("saveConfig"))
            .json(config)
            .send()
            .await?;

        Ok(Self::ok(response).await?.text().await?)
    }

    async fn load_config(&self) -> Result<SimulationConfig> {
        let response = self.http.get(self.url("loadConfig")).send().await?;

        Ok(Self::ok(response).await?.json().await?)
    }

    async fn ticket_count(&self) -> Result<u64> {
        let response = self.http.get(self.url("count")).send().await?;

        Ok(Self::ok(response).await?.json().await?)
    }

    async fn logs(&self) -> Result<Vec<String>> {
        let response = self.http.get(self.url("logs")).send().await?;

        Ok(Self::ok(response).await?.json().await?)
    }
}
