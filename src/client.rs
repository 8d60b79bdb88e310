//! The public client facade and the request pipeline behind it.
//!
//! Every operation is a thin method over [`CrApi::request`]: resolve the
//! endpoint from the catalog, dispatch once through the transport, then
//! classify the outcome. A 2xx response is decoded straight into the
//! operation's type with no further validation; a non-2xx response becomes
//! [`Error::Api`]; a timeout or network failure becomes
//! [`Error::Transport`]. Nothing is retried.

use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::api_models::{
    ApiErrorPayload, BattleLog, Cards, ClanLeaderboard, ClanProfile, ClanSearchResponse,
    ClanWarLeaderboard, ClanWarLog, CurrentClanWar, Location, Locations, PlayerLeaderboard,
    PlayerProfile, Tournament, Tournaments, UpcomingChests, VerifyTokenResponse,
};
use crate::config::{ApiOptions, ClientConfig};
use crate::endpoints::{self, Endpoint, LocationId, PathArg};
use crate::error::Error;
use crate::transport::Transport;

/// Paging controls accepted by every listing operation.
///
/// Unset fields are omitted from the request entirely. `after` and `before`
/// are forwarded as given; their mutual exclusivity is the service's
/// contract, not checked here.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// Limit the number of items returned in the response.
    pub limit: Option<u32>,
    /// Opaque cursor from a previous response's `paging.cursors.after`.
    pub after: Option<String>,
    /// Opaque cursor from a previous response's `paging.cursors.before`.
    pub before: Option<String>,
}

impl PageRequest {
    /// Shorthand for the common "first n items" request.
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Shorthand for resuming after a cursor.
    pub fn after(cursor: impl Into<String>) -> Self {
        Self {
            after: Some(cursor.into()),
            ..Self::default()
        }
    }

    fn to_query(&self) -> [(&'static str, Option<String>); 3] {
        [
            ("limit", self.limit.map(|l| l.to_string())),
            ("after", self.after.clone()),
            ("before", self.before.clone()),
        ]
    }
}

/// Clan search filters. The service requires at least one filter to be set;
/// this client forwards whatever is given and lets the service decide.
#[derive(Debug, Clone, Default)]
pub struct ClanSearchOptions {
    /// Search clans by name; must be at least three characters long.
    pub name: Option<String>,
    /// Restrict the search to a specific numeric location id.
    pub location_id: Option<u32>,
    pub min_members: Option<u32>,
    pub max_members: Option<u32>,
    pub min_score: Option<u32>,
    pub page: PageRequest,
}

impl ClanSearchOptions {
    /// Search by clan name only.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    fn to_query(&self) -> Vec<(&'static str, Option<String>)> {
        let mut query = vec![
            ("name", self.name.clone()),
            ("locationId", self.location_id.map(|id| id.to_string())),
            ("minMembers", self.min_members.map(|m| m.to_string())),
            ("maxMembers", self.max_members.map(|m| m.to_string())),
            ("minScore", self.min_score.map(|s| s.to_string())),
        ];
        query.extend(self.page.to_query());
        query
    }
}

/// Asynchronous client for the Clash Royale API.
///
/// One value serves any number of concurrent calls: all shared state is the
/// immutable configuration captured at construction, and each call is an
/// independent unit of work that completes with its own result or error.
#[derive(Debug, Clone)]
pub struct CrApi {
    transport: Transport,
    validate_tags: bool,
}

impl CrApi {
    /// Build a client with default options.
    ///
    /// `base_uri` is the versioned API origin, e.g.
    /// `https://api.clashroyale.com/v1`; `token` is the JWT issued by the
    /// developer portal.
    pub fn new(base_uri: &str, token: &str) -> Result<Self, Error> {
        Self::with_options(base_uri, token, ApiOptions::default())
    }

    /// Build a client with explicit options. Unset options fall back to the
    /// defaults (6000 ms timeout, permissive tag handling).
    pub fn with_options(base_uri: &str, token: &str, options: ApiOptions) -> Result<Self, Error> {
        let config = ClientConfig::new(base_uri, token, options)?;
        let transport = Transport::new(&config)?;
        Ok(Self {
            transport,
            validate_tags: config.validate_tags,
        })
    }

    /// All available cards.
    pub async fn cards(&self) -> Result<Cards, Error> {
        self.request(&endpoints::CARDS, &[], &[], None).await
    }

    /// All locations, optionally paged.
    pub async fn locations(&self, page: PageRequest) -> Result<Locations, Error> {
        self.request(&endpoints::LOCATIONS, &[], &page.to_query(), None)
            .await
    }

    /// A single location by its numeric id.
    pub async fn location_by_id(&self, id: u32) -> Result<Location, Error> {
        self.request(
            &endpoints::LOCATION_BY_ID,
            &[PathArg::Location(LocationId::Id(id))],
            &[],
            None,
        )
        .await
    }

    /// Clan rankings for a location, or [`LocationId::Global`] for the
    /// worldwide leaderboard.
    pub async fn clan_leaderboard(
        &self,
        location: impl Into<LocationId>,
        page: PageRequest,
    ) -> Result<ClanLeaderboard, Error> {
        self.request(
            &endpoints::CLAN_RANKINGS,
            &[PathArg::Location(location.into())],
            &page.to_query(),
            None,
        )
        .await
    }

    /// Player rankings for a location, or [`LocationId::Global`] for the
    /// worldwide leaderboard.
    pub async fn player_leaderboard(
        &self,
        location: impl Into<LocationId>,
        page: PageRequest,
    ) -> Result<PlayerLeaderboard, Error> {
        self.request(
            &endpoints::PLAYER_RANKINGS,
            &[PathArg::Location(location.into())],
            &page.to_query(),
            None,
        )
        .await
    }

    /// Clan-war rankings for a location, or [`LocationId::Global`] for the
    /// worldwide leaderboard.
    pub async fn clan_war_leaderboard(
        &self,
        location: impl Into<LocationId>,
        page: PageRequest,
    ) -> Result<ClanWarLeaderboard, Error> {
        self.request(
            &endpoints::CLAN_WAR_RANKINGS,
            &[PathArg::Location(location.into())],
            &page.to_query(),
            None,
        )
        .await
    }

    /// Search clans by name and/or numeric filters.
    pub async fn search_clans(
        &self,
        options: ClanSearchOptions,
    ) -> Result<ClanSearchResponse, Error> {
        self.request(&endpoints::CLAN_SEARCH, &[], &options.to_query(), None)
            .await
    }

    /// A clan's profile by tag.
    pub async fn clan_profile(&self, clan_tag: &str) -> Result<ClanProfile, Error> {
        self.request(&endpoints::CLAN_PROFILE, &[PathArg::Tag(clan_tag)], &[], None)
            .await
    }

    /// The war a clan is currently participating in.
    pub async fn current_clan_war(&self, clan_tag: &str) -> Result<CurrentClanWar, Error> {
        self.request(
            &endpoints::CURRENT_CLAN_WAR,
            &[PathArg::Tag(clan_tag)],
            &[],
            None,
        )
        .await
    }

    /// A clan's finished wars, optionally paged.
    pub async fn clan_war_log(
        &self,
        clan_tag: &str,
        page: PageRequest,
    ) -> Result<ClanWarLog, Error> {
        self.request(
            &endpoints::CLAN_WAR_LOG,
            &[PathArg::Tag(clan_tag)],
            &page.to_query(),
            None,
        )
        .await
    }

    /// A player's profile by tag.
    pub async fn player_profile(&self, player_tag: &str) -> Result<PlayerProfile, Error> {
        self.request(
            &endpoints::PLAYER_PROFILE,
            &[PathArg::Tag(player_tag)],
            &[],
            None,
        )
        .await
    }

    /// A player's upcoming chest cycle.
    pub async fn upcoming_chests(&self, player_tag: &str) -> Result<UpcomingChests, Error> {
        self.request(
            &endpoints::UPCOMING_CHESTS,
            &[PathArg::Tag(player_tag)],
            &[],
            None,
        )
        .await
    }

    /// A player's recent battles.
    pub async fn battle_log(&self, player_tag: &str) -> Result<BattleLog, Error> {
        self.request(&endpoints::BATTLE_LOG, &[PathArg::Tag(player_tag)], &[], None)
            .await
    }

    /// Verify a player's in-game API token. Issues a POST with the JSON
    /// body `{"token": ...}`.
    pub async fn verify_player_token(
        &self,
        player_tag: &str,
        token: &str,
    ) -> Result<VerifyTokenResponse, Error> {
        self.request(
            &endpoints::VERIFY_TOKEN,
            &[PathArg::Tag(player_tag)],
            &[],
            Some(json!({ "token": token })),
        )
        .await
    }

    /// Search tournaments by name.
    pub async fn tournaments(
        &self,
        name: Option<&str>,
        page: PageRequest,
    ) -> Result<Tournaments, Error> {
        let mut query = vec![("name", name.map(str::to_string))];
        query.extend(page.to_query());
        self.request(&endpoints::TOURNAMENTS, &[], &query, None).await
    }

    /// A tournament by its tag.
    pub async fn tournament_by_tag(&self, tournament_tag: &str) -> Result<Tournament, Error> {
        self.request(
            &endpoints::TOURNAMENT_BY_TAG,
            &[PathArg::Tag(tournament_tag)],
            &[],
            None,
        )
        .await
    }

    /// The shared pipeline every operation funnels through.
    async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        path_args: &[PathArg<'_>],
        query_args: &[(&'static str, Option<String>)],
        body: Option<serde_json::Value>,
    ) -> Result<T, Error> {
        let call = endpoint.resolve(path_args, query_args, self.validate_tags)?;
        let response = self.transport.send(&call, body.as_ref()).await?;
        let status = response.status();
        debug!(endpoint = endpoint.name, status = status.as_u16(), "api call completed");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let payload: ApiErrorPayload = serde_json::from_str(&body).unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                reason: payload.reason,
                message: payload.message,
            });
        }
        Ok(response.json::<T>().await?)
    }
}
