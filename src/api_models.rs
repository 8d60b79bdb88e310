//! Response data shapes for every endpoint.
//!
//! Pure structure: these types mirror the upstream JSON and carry no
//! behavior. Decoding is the only validation performed; fields the service
//! adds later are ignored, and nothing is checked beyond types. All names
//! are camelCase on the wire.

use serde::Deserialize;

/// Listing envelope shared by the paged endpoints: `{ items, paging }`.
///
/// `paging` defaults to empty cursors for the few payloads (`cards`) that
/// omit the block entirely.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Listing<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub paging: Paging,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    #[serde(default)]
    pub cursors: Cursors,
}

/// Opaque pagination markers. Pass one back verbatim via `after`/`before`
/// to fetch the adjacent page; never parse or build these client-side.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cursors {
    pub after: Option<String>,
    pub before: Option<String>,
}

pub type Cards = Listing<Card>;
pub type Locations = Listing<Location>;
pub type PlayerLeaderboard = Listing<PlayerRanking>;
pub type ClanLeaderboard = Listing<ClanRanking>;
pub type ClanWarLeaderboard = Listing<ClanWarRanking>;
pub type ClanSearchResponse = Listing<ClanSearchEntry>;
pub type UpcomingChests = Listing<UpcomingChest>;
pub type ClanWarLog = Listing<ClanWarLogEntry>;
pub type Tournaments = Listing<Tournament>;

/// The battle log endpoint returns a bare JSON array, not an envelope.
pub type BattleLog = Vec<Battle>;

/// Card icon URLs by size.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconUrls {
    pub medium: String,
}

/// Abbreviated clan reference embedded in player-shaped payloads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanInfo {
    pub tag: String,
    pub name: String,
    pub badge_id: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arena {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMode {
    pub id: u32,
    pub name: String,
}

/// One entry of the card catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub name: String,
    pub max_level: u8,
    pub icon_urls: IconUrls,
}

/// A geographic ranking scope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: u32,
    pub name: String,
    pub is_country: bool,
    /// ISO code, only present when `is_country` is true.
    pub country_code: Option<String>,
}

/// One row of a player leaderboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRanking {
    pub tag: String,
    pub name: String,
    pub exp_level: u32,
    pub trophies: u32,
    pub rank: u32,
    pub previous_rank: u32,
    pub clan: Option<ClanInfo>,
    pub arena: Arena,
}

/// One row of a clan leaderboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanRanking {
    pub tag: String,
    pub name: String,
    pub rank: u32,
    pub previous_rank: u32,
    pub location: Location,
    pub badge_id: u32,
    pub clan_score: u32,
    pub members: u32,
}

/// One row of a clan-war leaderboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanWarRanking {
    pub tag: String,
    pub name: String,
    pub rank: u32,
    pub previous_rank: u32,
    pub location: Location,
    pub badge_id: u32,
    pub clan_score: u32,
    pub members: u32,
}

/// One clan returned by a clan search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanSearchEntry {
    pub tag: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub badge_id: u32,
    pub clan_score: u32,
    pub location: Option<Location>,
    pub required_trophies: u32,
    pub donations_per_week: u32,
    pub members: u32,
}

/// A full player profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub tag: String,
    pub name: String,
    pub exp_level: u32,
    pub trophies: u32,
    pub best_trophies: u32,
    pub wins: u32,
    pub losses: u32,
    pub battle_count: u32,
    pub three_crown_wins: u32,
    pub challenge_cards_won: u32,
    pub challenge_max_wins: u32,
    pub tournament_cards_won: u32,
    pub tournament_battle_count: u32,
    /// Clan role; absent for clanless players.
    pub role: Option<String>,
    pub donations: u32,
    pub donations_received: u32,
    pub total_donations: u32,
    pub clan: Option<ClanInfo>,
    pub arena: Arena,
    pub league_statistics: Option<LeagueStatistics>,
    pub achievements: Vec<Achievement>,
    pub cards: Vec<PlayerCard>,
    pub current_deck: Option<Vec<PlayerCard>>,
    pub current_favourite_card: Option<Card>,
}

/// Per-season trophy statistics. Which fields are present depends on the
/// season slot (current seasons carry no `id`, best seasons no
/// `best_trophies`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonStats {
    pub id: Option<String>,
    pub rank: Option<u32>,
    pub trophies: u32,
    pub best_trophies: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueStatistics {
    pub current_season: Option<SeasonStats>,
    pub previous_season: Option<SeasonStats>,
    pub best_season: Option<SeasonStats>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub name: String,
    pub stars: u8,
    pub value: u32,
    pub target: u32,
    pub info: String,
}

/// A card as it appears in a player's collection or deck.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerCard {
    pub name: String,
    pub level: u8,
    pub max_level: u8,
    pub count: u32,
    pub icon_urls: IconUrls,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingChest {
    /// Offset from the next chest to open; 0 is the very next one.
    pub index: u32,
    pub name: String,
}

/// A single battle from a player's battle log.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battle {
    #[serde(rename = "type")]
    pub kind: String,
    pub battle_time: String,
    pub arena: Option<Arena>,
    pub game_mode: GameMode,
    pub deck_selection: String,
    pub team: Vec<BattleParticipant>,
    pub opponent: Vec<BattleParticipant>,
    pub challenge_id: Option<u32>,
    pub challenge_win_count_before: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleParticipant {
    pub tag: String,
    pub name: String,
    pub crowns: u8,
    pub clan: Option<ClanInfo>,
    pub cards: Vec<BattleCard>,
    pub starting_trophies: Option<i32>,
    pub trophy_change: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleCard {
    pub name: String,
    pub level: u8,
    pub max_level: u8,
    pub icon_urls: IconUrls,
}

/// A full clan profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanProfile {
    pub tag: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub badge_id: u32,
    pub clan_score: u32,
    pub location: Option<Location>,
    pub required_trophies: u32,
    pub donations_per_week: u32,
    pub members: u32,
    pub member_list: Option<Vec<ClanMember>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanMember {
    pub tag: String,
    pub name: String,
    pub role: String,
    pub exp_level: u32,
    pub trophies: u32,
    pub arena: Arena,
    pub clan_rank: u32,
    pub previous_clan_rank: u32,
    pub donations: u32,
    pub donations_received: u32,
}

/// Clan-level aggregate inside war payloads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanWarClan {
    pub tag: String,
    pub name: String,
    pub badge_id: u32,
    pub clan_score: u32,
    pub participants: u32,
    pub battles_played: u32,
    pub wins: u32,
    pub crowns: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanWarParticipant {
    pub tag: String,
    pub name: String,
    pub cards_earned: u32,
    pub battles_played: u32,
    pub wins: u32,
}

/// The war a clan is currently in. Which end-time field is present depends
/// on `state` (collection day vs. war day).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentClanWar {
    pub state: String,
    pub collection_end_time: Option<String>,
    pub war_end_time: Option<String>,
    pub clan: ClanWarClan,
    #[serde(default)]
    pub participants: Vec<ClanWarParticipant>,
}

/// One finished war from a clan's war log.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanWarLogEntry {
    pub season_id: u32,
    pub created_date: String,
    pub participants: Vec<ClanWarParticipant>,
    pub standings: Vec<Standing>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub clan: ClanWarClan,
    pub trophy_change: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub tag: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub creator_tag: String,
    pub name: String,
    pub capacity: u32,
    pub max_capacity: u32,
    pub preparation_duration: u32,
    pub duration: u32,
    pub created_time: String,
}

/// Result of an in-game API token verification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTokenResponse {
    pub tag: String,
    pub token: String,
    /// `ok` or `invalid`.
    pub status: String,
}

/// Error payload the service attaches to non-2xx responses. Decoded
/// leniently: an unreadable body simply yields empty fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiErrorPayload {
    pub reason: Option<String>,
    pub message: Option<String>,
}
