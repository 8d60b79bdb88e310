//! End-to-end pipeline tests against an in-process mock of the service.
//!
//! The mock runs on a random port and speaks the same envelope, cursor, and
//! error-payload conventions as the real API, so every request here travels
//! through the full pipeline: catalog resolution, tag normalization,
//! percent-encoding, bearer-token transport, and error classification.

use std::collections::HashMap;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use cr_api::{ApiOptions, ClanSearchOptions, CrApi, Error, LocationId, PageRequest};

const TOKEN: &str = "test-token";

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "reason": "notFound", "message": "Not found" })),
    )
}

fn location_json(id: u32, name: &str) -> Value {
    json!({ "id": id, "name": name, "isCountry": false })
}

fn player_profile_json(tag: &str, name: &str) -> Value {
    json!({
        "tag": tag,
        "name": name,
        "expLevel": 13,
        "trophies": 6200,
        "bestTrophies": 6400,
        "wins": 2100,
        "losses": 1800,
        "battleCount": 4100,
        "threeCrownWins": 800,
        "challengeCardsWon": 1500,
        "challengeMaxWins": 12,
        "tournamentCardsWon": 40,
        "tournamentBattleCount": 60,
        "role": "member",
        "donations": 56,
        "donationsReceived": 40,
        "totalDonations": 9000,
        "clan": { "tag": "#LCVUYCR", "name": "Nova eSports", "badgeId": 16000064 },
        "arena": { "id": 54000050, "name": "Arena 15" },
        "achievements": [
            { "name": "Friend in Need", "stars": 3, "value": 9000, "target": 10000, "info": "Donate cards" }
        ],
        "cards": [
            { "name": "Knight", "level": 13, "maxLevel": 14, "count": 2000,
              "iconUrls": { "medium": "https://cdn.test/knight.png" } }
        ],
        "currentFavouriteCard": {
            "name": "Knight", "maxLevel": 14,
            "iconUrls": { "medium": "https://cdn.test/knight.png" }
        }
    })
}

fn war_clan_json(tag: &str, name: &str) -> Value {
    json!({
        "tag": tag, "name": name, "badgeId": 16000064, "clanScore": 54000,
        "participants": 40, "battlesPlayed": 38, "wins": 20, "crowns": 55
    })
}

async fn list_cards(headers: HeaderMap) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if !authorized(&headers) {
        return Err((
            StatusCode::FORBIDDEN,
            Json(json!({ "reason": "accessDenied", "message": "Invalid authorization" })),
        ));
    }
    Ok(Json(json!({
        "items": [
            { "name": "Knight", "maxLevel": 14, "iconUrls": { "medium": "https://cdn.test/knight.png" } },
            { "name": "Archers", "maxLevel": 14, "iconUrls": { "medium": "https://cdn.test/archers.png" } }
        ]
    })))
}

async fn list_locations(
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    for key in params.keys() {
        if !["limit", "after", "before"].contains(&key.as_str()) {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "reason": "badRequest", "message": format!("unexpected query key {key}") })),
            ));
        }
    }
    let all: Vec<Value> = (0..12)
        .map(|i| location_json(57000000 + i, &format!("Location {i}")))
        .collect();
    let start: usize = params
        .get("after")
        .and_then(|c| c.parse().ok())
        .unwrap_or(0);
    let limit: usize = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(all.len());
    let page: Vec<Value> = all.iter().skip(start).take(limit).cloned().collect();

    let mut cursors = serde_json::Map::new();
    if start + limit < all.len() {
        cursors.insert("after".into(), json!((start + limit).to_string()));
    }
    if start > 0 {
        cursors.insert("before".into(), json!(start.saturating_sub(limit).to_string()));
    }
    Ok(Json(json!({ "items": page, "paging": { "cursors": cursors } })))
}

async fn location_by_id(Path(id): Path<String>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if id == "57000094" {
        return Ok(Json(json!({
            "id": 57000094, "name": "Germany", "isCountry": true, "countryCode": "DE"
        })));
    }
    Err(not_found())
}

async fn rankings(
    Path((id, kind)): Path<(String, String)>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    // `global` must arrive verbatim; everything else must be digits
    if id != "global" && id.parse::<u32>().is_err() {
        return Err(not_found());
    }
    let items = match kind.as_str() {
        "players" => json!([{
            "tag": "#2PPP", "name": "Top Player", "expLevel": 14, "trophies": 9000,
            "rank": 1, "previousRank": 2, "arena": { "id": 54000050, "name": "Arena 15" }
        }]),
        "clans" | "clanwars" => json!([{
            "tag": "#LCVUYCR", "name": "Nova eSports", "rank": 1, "previousRank": 1,
            "location": { "id": 57000094, "name": "Germany", "isCountry": true, "countryCode": "DE" },
            "badgeId": 16000064, "clanScore": 60000, "members": 50
        }]),
        _ => return Err(not_found()),
    };
    Ok(Json(json!({ "items": items, "paging": { "cursors": {} } })))
}

async fn search_clans(
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    // The client must omit every unset filter: the only key this suite's
    // search sets is `name`, so anything else arriving is a filtering bug.
    if params.len() != 1 || !params.contains_key("name") {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "reason": "badRequest", "message": "unexpected query keys" })),
        ));
    }
    Ok(Json(json!({
        "items": [{
            "tag": "#LCVUYCR", "name": "Nova eSports", "type": "inviteOnly",
            "badgeId": 16000064, "clanScore": 60000,
            "location": { "id": 57000094, "name": "Germany", "isCountry": true, "countryCode": "DE" },
            "requiredTrophies": 6000, "donationsPerWeek": 10000, "members": 50
        }],
        "paging": { "cursors": {} }
    })))
}

async fn clan_profile(Path(tag): Path<String>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if tag != "#LCVUYCR" {
        return Err(not_found());
    }
    Ok(Json(json!({
        "tag": "#LCVUYCR", "name": "Nova eSports", "type": "inviteOnly",
        "description": "Professional esports clan", "badgeId": 16000064, "clanScore": 60000,
        "location": { "id": 57000094, "name": "Germany", "isCountry": true, "countryCode": "DE" },
        "requiredTrophies": 6000, "donationsPerWeek": 10000, "members": 50,
        "memberList": [{
            "tag": "#2PPP", "name": "Top Player", "role": "leader", "expLevel": 14,
            "trophies": 9000, "arena": { "id": 54000050, "name": "Arena 15" },
            "clanRank": 1, "previousClanRank": 1, "donations": 56, "donationsReceived": 40
        }]
    })))
}

async fn current_war(Path(tag): Path<String>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if tag != "#2LRU2J" {
        return Err(not_found());
    }
    Ok(Json(json!({
        "state": "collectionDay",
        "collectionEndTime": "20260807T221250.000Z",
        "clan": war_clan_json("#2LRU2J", "Crucible Wrath"),
        "participants": [{
            "tag": "#2PPP", "name": "Top Player",
            "cardsEarned": 1120, "battlesPlayed": 3, "wins": 2
        }]
    })))
}

async fn war_log(Path(tag): Path<String>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if tag != "#2LRU2J" {
        return Err(not_found());
    }
    Ok(Json(json!({
        "items": [{
            "seasonId": 26,
            "createdDate": "20260801T080000.000Z",
            "participants": [{
                "tag": "#2PPP", "name": "Top Player",
                "cardsEarned": 1120, "battlesPlayed": 3, "wins": 2
            }],
            "standings": [
                { "clan": war_clan_json("#2LRU2J", "Crucible Wrath"), "trophyChange": 118 }
            ]
        }],
        "paging": { "cursors": {} }
    })))
}

async fn player_profile(Path(tag): Path<String>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match tag.as_str() {
        "#2PPP" => Ok(Json(player_profile_json("#2PPP", "Top Player"))),
        // reachable only if the client mapped the letter O to the digit 0
        "#C0DE" => Ok(Json(player_profile_json("#C0DE", "Zero Not Oh"))),
        _ => Err(not_found()),
    }
}

async fn upcoming_chests(Path(tag): Path<String>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if tag != "#2PPP" {
        return Err(not_found());
    }
    Ok(Json(json!({
        "items": [
            { "index": 0, "name": "Silver Chest" },
            { "index": 1, "name": "Golden Chest" },
            { "index": 2, "name": "Magical Chest" }
        ]
    })))
}

async fn battle_log(Path(tag): Path<String>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if tag != "#2PPP" {
        return Err(not_found());
    }
    Ok(Json(json!([{
        "type": "PvP",
        "battleTime": "20260806T221250.000Z",
        "arena": { "id": 54000050, "name": "Arena 15" },
        "gameMode": { "id": 72000006, "name": "Ladder" },
        "deckSelection": "collection",
        "team": [{ "tag": "#2PPP", "name": "Top Player", "crowns": 3, "cards": [] }],
        "opponent": [{ "tag": "#8QQQ", "name": "Rival", "crowns": 1, "cards": [] }]
    }])))
}

async fn verify_token(
    Path(tag): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let Some(token) = body.get("token").and_then(Value::as_str) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "reason": "badRequest", "message": "missing token field" })),
        ));
    };
    Ok(Json(json!({ "tag": tag, "token": token, "status": "ok" })))
}

fn tournament_json(name: &str) -> Value {
    json!({
        "tag": "#2PP", "type": "open", "status": "ended", "creatorTag": "#2PPP",
        "name": name, "capacity": 50, "maxCapacity": 50,
        "preparationDuration": 900, "duration": 3600,
        "createdTime": "20260805T120000.000Z"
    })
}

async fn tournaments(
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let name = params.get("name").cloned().unwrap_or_default();
    Ok(Json(json!({
        "items": [tournament_json(&name)],
        "paging": { "cursors": {} }
    })))
}

async fn tournament_by_tag(
    Path(tag): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if tag != "#2PP" {
        return Err(not_found());
    }
    Ok(Json(tournament_json("nova cup")))
}

fn mock_app() -> Router {
    Router::new()
        .route("/cards", get(list_cards))
        .route("/locations", get(list_locations))
        .route("/locations/{id}", get(location_by_id))
        .route("/locations/{id}/rankings/{kind}", get(rankings))
        .route("/clans", get(search_clans))
        .route("/clans/{tag}", get(clan_profile))
        .route("/clans/{tag}/currentwar", get(current_war))
        .route("/clans/{tag}/warlog", get(war_log))
        .route("/players/{tag}", get(player_profile))
        .route("/players/{tag}/upcomingchests", get(upcoming_chests))
        .route("/players/{tag}/battlelog", get(battle_log))
        .route("/players/{tag}/verifytoken", post(verify_token))
        .route("/tournaments", get(tournaments))
        .route("/tournaments/{tag}", get(tournament_by_tag))
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn client() -> CrApi {
    let base = spawn(mock_app()).await;
    CrApi::new(&base, TOKEN).unwrap()
}

#[tokio::test]
async fn cards_travel_with_the_bearer_token() {
    let cards = client().await.cards().await.unwrap();
    assert_eq!(cards.items.len(), 2);
    assert_eq!(cards.items[0].name, "Knight");
}

#[tokio::test]
async fn a_wrong_token_surfaces_as_an_api_error() {
    let base = spawn(mock_app()).await;
    let api = CrApi::new(&base, "wrong-token").unwrap();
    let err = api.cards().await.unwrap_err();
    match err {
        Error::Api { status, reason, .. } => {
            assert_eq!(status, 403);
            assert_eq!(reason.as_deref(), Some("accessDenied"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn locations_page_through_disjoint_cursor_windows() {
    let api = client().await;

    let first = api.locations(PageRequest::with_limit(5)).await.unwrap();
    assert_eq!(first.items.len(), 5);
    let cursor = first.paging.cursors.after.clone().expect("after cursor");

    let second = api
        .locations(PageRequest {
            limit: Some(5),
            after: Some(cursor),
            before: None,
        })
        .await
        .unwrap();
    assert_eq!(second.items.len(), 5);

    let first_ids: Vec<u32> = first.items.iter().map(|l| l.id).collect();
    assert!(second.items.iter().all(|l| !first_ids.contains(&l.id)));
    assert!(second.paging.cursors.before.is_some());
}

#[tokio::test]
async fn location_by_id_returns_germany() {
    let germany = client().await.location_by_id(57000094).await.unwrap();
    assert_eq!(germany.country_code.as_deref(), Some("DE"));
    assert!(germany.is_country);
    assert_eq!(germany.name, "Germany");
}

#[tokio::test]
async fn global_rankings_use_the_literal_global_segment() {
    let api = client().await;

    let players = api
        .player_leaderboard(LocationId::Global, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(players.items[0].trophies, 9000);

    let wars = api
        .clan_war_leaderboard(LocationId::Global, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(wars.items[0].clan_score, 60000);
}

#[tokio::test]
async fn numeric_location_rankings_resolve_too() {
    let clans = client()
        .await
        .clan_leaderboard(57000094, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(clans.items[0].name, "Nova eSports");
}

#[tokio::test]
async fn player_tags_are_normalized_on_the_wire() {
    let api = client().await;

    // lowercase, spacing, and the leading # are all cleaned up
    let profile = api.player_profile("  #2ppp ").await.unwrap();
    assert_eq!(profile.name, "Top Player");

    // the letter O only reaches the mock as the digit 0
    let profile = api.player_profile("cOde").await.unwrap();
    assert_eq!(profile.tag, "#C0DE");
}

#[tokio::test]
async fn a_missing_clan_maps_to_an_api_error_with_the_upstream_status() {
    let err = client().await.clan_profile("AAAA").await.unwrap_err();
    match err {
        Error::Api { status, reason, message } => {
            assert_eq!(status, 404);
            assert_eq!(reason.as_deref(), Some("notFound"));
            assert_eq!(message.as_deref(), Some("Not found"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn clan_search_omits_every_unset_filter() {
    // the mock 400s if any key other than `name` arrives
    let found = client()
        .await
        .search_clans(ClanSearchOptions::by_name("nova"))
        .await
        .unwrap();
    assert_eq!(found.items[0].name, "Nova eSports");
    assert_eq!(found.items[0].kind, "inviteOnly");
}

#[tokio::test]
async fn clan_war_endpoints_round_trip() {
    let api = client().await;

    let war = api.current_clan_war("2lru2j").await.unwrap();
    assert_eq!(war.clan.name, "Crucible Wrath");
    assert_eq!(war.participants.len(), 1);

    let log = api.clan_war_log("#2LRU2J", PageRequest::default()).await.unwrap();
    assert_eq!(log.items[0].season_id, 26);
    assert_eq!(log.items[0].standings[0].trophy_change, 118);
}

#[tokio::test]
async fn upcoming_chests_and_battle_log_decode() {
    let api = client().await;

    let chests = api.upcoming_chests("2PPP").await.unwrap();
    assert_eq!(chests.items.len(), 3);
    assert_eq!(chests.items[0].index, 0);

    let log = api.battle_log("2PPP").await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].team[0].crowns, 3);
}

#[tokio::test]
async fn verify_player_token_posts_the_token_body() {
    let verified = client()
        .await
        .verify_player_token("8plqOg88g", "2jyax8cz")
        .await
        .unwrap();
    // the mock echoes the tag it saw and the token from the POST body
    assert_eq!(verified.tag, "#8PLQ0G88G");
    assert_eq!(verified.token, "2jyax8cz");
    assert_eq!(verified.status, "ok");
}

#[tokio::test]
async fn tournament_search_forwards_the_name_filter() {
    let found = client()
        .await
        .tournaments(Some("nova"), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(found.items[0].name, "nova");
    assert_eq!(found.items[0].status, "ended");
}

#[tokio::test]
async fn tournament_tags_are_normalized_like_any_other_tag() {
    let tournament = client().await.tournament_by_tag("2pp").await.unwrap();
    assert_eq!(tournament.tag, "#2PP");
    assert_eq!(tournament.kind, "open");
}

#[tokio::test]
async fn a_slow_response_fails_with_a_transport_timeout() {
    let slow = Router::new().route(
        "/cards",
        get(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Json(json!({ "items": [] }))
        }),
    );
    let base = spawn(slow).await;
    let api = CrApi::with_options(
        &base,
        TOKEN,
        ApiOptions {
            timeout_ms: Some(100),
            validate_tags: None,
        },
    )
    .unwrap();

    let err = api.cards().await.unwrap_err();
    match err {
        Error::Transport(inner) => assert!(inner.is_timeout()),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn validation_mode_rejects_a_bad_tag_before_the_network() {
    // no route for this tag exists; validation must fail first
    let base = spawn(mock_app()).await;
    let api = CrApi::with_options(
        &base,
        TOKEN,
        ApiOptions {
            timeout_ms: None,
            validate_tags: Some(true),
        },
    )
    .unwrap();

    let err = api.player_profile("#bad tag").await.unwrap_err();
    assert!(matches!(err, Error::TagValidation { .. }));

    // the permissive default sends the same tag through instead
    let api = CrApi::new(&base, TOKEN).unwrap();
    let err = api.player_profile("#bad tag").await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 404, .. }));
}
