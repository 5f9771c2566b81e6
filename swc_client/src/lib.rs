//! Typed client for the SportsWorldCentral (SWC) fantasy football API.
//!
//! Every endpoint is one async method returning the same schema records the server uses.
//!
//! ```no_run
//! use swc_client::{ClientConfig, SwcClient};
//!
//! # async fn run() -> Result<(), swc_client::ClientError> {
//! let client = SwcClient::new(ClientConfig::from_env());
//! let health = client.health_check().await?;
//! println!("{}", health.message);
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::ClientError;
pub use swc_api::schemas;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use swc_api::schemas::{
    Counts, HealthCheck, League, LeagueQuery, Performance, PerformanceCreate, PerformanceQuery,
    PerformanceUpdate, Player, PlayerCreate, PlayerQuery, PlayerUpdate, Team, TeamQuery, Week,
    WeekRangeQuery,
};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const BASE_URL_ENV: &str = "SWC_API_BASE_URL";

pub const HEALTH_CHECK_ENDPOINT: &str = "/";
pub const PLAYERS_ENDPOINT: &str = "/v0/players";
pub const PERFORMANCES_ENDPOINT: &str = "/v0/performances";
pub const LEAGUES_ENDPOINT: &str = "/v0/leagues";
pub const TEAMS_ENDPOINT: &str = "/v0/teams";
pub const WEEKS_ENDPOINT: &str = "/v0/weeks";
pub const COUNTS_ENDPOINT: &str = "/v0/counts";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    /// Trailing slashes are dropped so endpoint paths join cleanly.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        ClientConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `SWC_API_BASE_URL` from the environment or a `.env` file, else [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        Self::new(dotenvy::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.into()))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig::new(DEFAULT_BASE_URL)
    }
}

#[derive(Clone, Debug)]
pub struct SwcClient {
    http: Client,
    base_url: String,
}

impl SwcClient {
    pub fn new(config: ClientConfig) -> Self {
        SwcClient {
            http: Client::new(),
            base_url: config.base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /. Succeeds when the API is up.
    pub async fn health_check(&self) -> Result<HealthCheck, ClientError> {
        self.call(self.http.get(self.url(HEALTH_CHECK_ENDPOINT))).await
    }

    pub async fn list_players(&self, query: &PlayerQuery) -> Result<Vec<Player>, ClientError> {
        self.call(self.http.get(self.url(PLAYERS_ENDPOINT)).query(query)).await
    }

    pub async fn get_player_by_id(&self, player_id: i64) -> Result<Player, ClientError> {
        let url = self.url(&format!("{}/{}", PLAYERS_ENDPOINT, player_id));
        self.call(self.http.get(url)).await
    }

    pub async fn create_player(&self, body: &PlayerCreate) -> Result<Player, ClientError> {
        self.call(self.http.post(self.url(PLAYERS_ENDPOINT)).json(body)).await
    }

    pub async fn update_player(&self, player_id: i64, body: &PlayerUpdate) -> Result<Player, ClientError> {
        let url = self.url(&format!("{}/{}", PLAYERS_ENDPOINT, player_id));
        self.call(self.http.patch(url).json(body)).await
    }

    pub async fn delete_player(&self, player_id: i64) -> Result<(), ClientError> {
        let url = self.url(&format!("{}/{}", PLAYERS_ENDPOINT, player_id));
        self.call_empty(self.http.delete(url)).await
    }

    /// Weekly performances of one player, optionally bounded by week.
    pub async fn list_player_weeks(
        &self,
        player_id: i64,
        range: &WeekRangeQuery,
    ) -> Result<Vec<Performance>, ClientError> {
        let url = self.url(&format!("{}/{}/weeks", PLAYERS_ENDPOINT, player_id));
        self.call(self.http.get(url).query(range)).await
    }

    pub async fn create_player_week(
        &self,
        player_id: i64,
        body: &PerformanceCreate,
    ) -> Result<Performance, ClientError> {
        let url = self.url(&format!("{}/{}/weeks", PLAYERS_ENDPOINT, player_id));
        self.call(self.http.post(url).json(body)).await
    }

    pub async fn list_performances(&self, query: &PerformanceQuery) -> Result<Vec<Performance>, ClientError> {
        self.call(self.http.get(self.url(PERFORMANCES_ENDPOINT)).query(query)).await
    }

    pub async fn update_performance(
        &self,
        performance_id: i64,
        body: &PerformanceUpdate,
    ) -> Result<Performance, ClientError> {
        let url = self.url(&format!("{}/{}", PERFORMANCES_ENDPOINT, performance_id));
        self.call(self.http.patch(url).json(body)).await
    }

    pub async fn delete_performance(&self, performance_id: i64) -> Result<(), ClientError> {
        let url = self.url(&format!("{}/{}", PERFORMANCES_ENDPOINT, performance_id));
        self.call_empty(self.http.delete(url)).await
    }

    pub async fn list_leagues(&self, query: &LeagueQuery) -> Result<Vec<League>, ClientError> {
        self.call(self.http.get(self.url(LEAGUES_ENDPOINT)).query(query)).await
    }

    pub async fn get_league_by_id(&self, league_id: i64) -> Result<League, ClientError> {
        let url = self.url(&format!("{}/{}", LEAGUES_ENDPOINT, league_id));
        self.call(self.http.get(url)).await
    }

    pub async fn list_teams(&self, query: &TeamQuery) -> Result<Vec<Team>, ClientError> {
        self.call(self.http.get(self.url(TEAMS_ENDPOINT)).query(query)).await
    }

    pub async fn list_weeks(&self) -> Result<Vec<Week>, ClientError> {
        self.call(self.http.get(self.url(WEEKS_ENDPOINT))).await
    }

    pub async fn get_week(&self, week_number: &str) -> Result<Week, ClientError> {
        let url = self.url(&format!("{}/{}", WEEKS_ENDPOINT, week_number));
        self.call(self.http.get(url)).await
    }

    pub async fn get_counts(&self) -> Result<Counts, ClientError> {
        self.call(self.http.get(self.url(COUNTS_ENDPOINT))).await
    }

    async fn call<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = Self::send(request).await?;
        Ok(response.json::<T>().await?)
    }

    async fn call_empty(&self, request: RequestBuilder) -> Result<(), ClientError> {
        Self::send(request).await?;
        Ok(())
    }

    /// Send and turn any non-2xx answer into [`ClientError::Status`].
    async fn send(request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "swc api call");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await?;
        Err(ClientError::from_status(status.as_u16(), &body))
    }
}
