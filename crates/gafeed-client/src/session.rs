//! An authenticated session: report queries plus cached account and segment
//! directories.

use gafeed_core::ClientConfig;

use crate::accounts::AccountDirectoryBuilder;
use crate::classify::classify;
use crate::error::ClientError;
use crate::feed::FeedDocument;
use crate::model::{Account, DataSet, Segment};
use crate::query::{append_api_key, QueryArgs, QueryBuilder};
use crate::report::ReportResultDecoder;
use crate::segments::SegmentCatalogBuilder;
use crate::transport::{HttpTransport, Transport};

pub const DATA_PATH: &str = "/analytics/v2.4/data";
pub const PROFILES_PATH: &str =
    "/analytics/v2.4/management/accounts/~all/webproperties/~all/profiles?max-results=10000";
pub const GOALS_PATH: &str =
    "/analytics/v2.4/management/accounts/~all/webproperties/~all/profiles/~all/goals?max-results=10000";
pub const ACCOUNTS_PATH: &str = "/analytics/v2.4/management/accounts?max-results=10000";
pub const SEGMENTS_PATH: &str = "/analytics/v2.4/management/segments?max-results=10000";

/// Client state for one authenticated user.
///
/// The account directory and segment catalog are fetched on first use and
/// kept until [`AnalyticsSession::invalidate_accounts`],
/// [`AnalyticsSession::invalidate_segments`], or
/// [`AnalyticsSession::reset_caches`] is called.
pub struct AnalyticsSession<T> {
    transport: T,
    profile_id: Option<u64>,
    api_key: Option<String>,
    accounts: Option<Vec<Account>>,
    segments: Option<Vec<Segment>>,
}

impl AnalyticsSession<HttpTransport> {
    /// Builds a session over HTTP using the profile id and API key from
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidAuthToken`] if the configured token
    /// cannot be sent as a header, or [`ClientError::Http`] if the HTTP
    /// client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(transport)
            .with_profile_id(config.profile_id)
            .with_api_key(config.api_key.clone()))
    }
}

impl<T: Transport> AnalyticsSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            profile_id: None,
            api_key: None,
            accounts: None,
            segments: None,
        }
    }

    #[must_use]
    pub fn with_profile_id(mut self, profile_id: Option<u64>) -> Self {
        self.profile_id = profile_id;
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    #[must_use]
    pub fn profile_id(&self) -> Option<u64> {
        self.profile_id
    }

    /// Selects the profile later [`AnalyticsSession::get`] calls report on.
    pub fn set_profile_id(&mut self, profile_id: u64) {
        self.profile_id = Some(profile_id);
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access, e.g. to replace the auth token.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Fetches one page of report data for the current profile.
    ///
    /// # Errors
    ///
    /// - [`ClientError::MissingProfileId`] if no profile is selected.
    /// - [`ClientError::Validation`] if `args` are invalid; nothing is sent.
    /// - [`ClientError::Transport`] for any non-200 response.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Xml`] / [`ClientError::Decode`] for malformed feeds.
    pub async fn get(&self, args: &QueryArgs) -> Result<DataSet, ClientError> {
        let profile_id = self.profile_id.ok_or(ClientError::MissingProfileId)?;
        let query = QueryBuilder::new(profile_id)
            .with_api_key(self.api_key.clone())
            .build(args)?;
        tracing::debug!(%query, "report query");

        let body = self.fetch(&format!("{DATA_PATH}?{query}")).await?;
        ReportResultDecoder::decode(&body)
    }

    /// Every profile the user can read, with goals and account names merged
    /// in. Fetched once and cached.
    ///
    /// # Errors
    ///
    /// Returns the first transport, network, or decode error from any of the
    /// three feeds; the cache stays empty in that case.
    pub async fn accounts(&mut self) -> Result<&[Account], ClientError> {
        let accounts = match self.accounts.take() {
            Some(accounts) => accounts,
            None => self.load_accounts().await?,
        };
        Ok(self.accounts.insert(accounts).as_slice())
    }

    /// Every segment available to the user. Fetched once and cached.
    ///
    /// # Errors
    ///
    /// Returns the transport, network, or decode error; the cache stays
    /// empty in that case.
    pub async fn segments(&mut self) -> Result<&[Segment], ClientError> {
        let segments = match self.segments.take() {
            Some(segments) => segments,
            None => self.load_segments().await?,
        };
        Ok(self.segments.insert(segments).as_slice())
    }

    pub fn invalidate_accounts(&mut self) {
        tracing::debug!("account directory invalidated");
        self.accounts = None;
    }

    pub fn invalidate_segments(&mut self) {
        tracing::debug!("segment catalog invalidated");
        self.segments = None;
    }

    pub fn reset_caches(&mut self) {
        self.invalidate_accounts();
        self.invalidate_segments();
    }

    async fn load_accounts(&self) -> Result<Vec<Account>, ClientError> {
        let profiles = FeedDocument::parse(&self.fetch(PROFILES_PATH).await?)?;
        let mut builder = AccountDirectoryBuilder::from_profiles(&profiles)?;

        let goals = FeedDocument::parse(&self.fetch(GOALS_PATH).await?)?;
        builder.merge_goals(&goals)?;

        let names = FeedDocument::parse(&self.fetch(ACCOUNTS_PATH).await?)?;
        builder.merge_account_names(&names)?;

        let accounts = builder.finish();
        tracing::info!(accounts = accounts.len(), "account directory built");
        Ok(accounts)
    }

    async fn load_segments(&self) -> Result<Vec<Segment>, ClientError> {
        let segments = SegmentCatalogBuilder::build(&self.fetch(SEGMENTS_PATH).await?)?;
        tracing::info!(segments = segments.len(), "segment catalog built");
        Ok(segments)
    }

    /// Sends one request and classifies the outcome.
    async fn fetch(&self, path_and_query: &str) -> Result<String, ClientError> {
        let path = if path_and_query.starts_with(DATA_PATH) {
            // The query builder has already appended the key.
            path_and_query.to_owned()
        } else {
            append_api_key(path_and_query.to_owned(), self.api_key.as_deref())
        };
        let response = self.transport.fetch(&path).await?;
        tracing::debug!(path = %path_and_query, status = response.status, "feed fetched");
        Ok(classify(response.status, response.body)?)
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
