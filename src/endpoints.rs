//! Static catalog of service endpoints and per-call resolution.
//!
//! The set of operations is closed and known at compile time; adding an
//! endpoint means adding a row here, never touching the request pipeline.

use std::fmt;

use crate::error::Error;
use crate::tag;

/// HTTP method of an endpoint. The service is GET throughout except for
/// token verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HttpMethod {
    Get,
    Post,
}

/// One element of a route template.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Segment {
    /// Fixed path element, substituted verbatim.
    Literal(&'static str),
    /// An entity tag: normalized, re-prefixed with `#`, percent-encoded
    /// when the final URL is assembled.
    Tag,
    /// A location scope: a numeric id or the literal `global`, substituted
    /// verbatim.
    Location,
}

/// A path argument supplied by the facade, matched positionally against the
/// non-literal segments of the template.
#[derive(Debug, Clone)]
pub(crate) enum PathArg<'a> {
    Tag(&'a str),
    Location(LocationId),
}

/// Geographic ranking scope: a numeric location id or worldwide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationId {
    /// The literal `global` scope.
    Global,
    /// A concrete location id, e.g. `57000094` for Germany.
    Id(u32),
}

impl From<u32> for LocationId {
    fn from(id: u32) -> Self {
        Self::Id(id)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

/// Descriptor of one operation: route template, method, and the query
/// parameters the operation accepts.
#[derive(Debug)]
pub(crate) struct Endpoint {
    pub name: &'static str,
    pub method: HttpMethod,
    pub segments: &'static [Segment],
    pub query: &'static [&'static str],
}

/// Paging parameters accepted by every listing operation. Mutual
/// exclusivity of `after`/`before` is the service's contract; both are
/// forwarded if both are supplied.
const PAGING: &[&str] = &["limit", "after", "before"];

pub(crate) const CARDS: Endpoint = Endpoint {
    name: "cards",
    method: HttpMethod::Get,
    segments: &[Segment::Literal("cards")],
    query: &[],
};

pub(crate) const LOCATIONS: Endpoint = Endpoint {
    name: "locations",
    method: HttpMethod::Get,
    segments: &[Segment::Literal("locations")],
    query: PAGING,
};

pub(crate) const LOCATION_BY_ID: Endpoint = Endpoint {
    name: "locationById",
    method: HttpMethod::Get,
    segments: &[Segment::Literal("locations"), Segment::Location],
    query: &[],
};

pub(crate) const CLAN_RANKINGS: Endpoint = Endpoint {
    name: "clanRankings",
    method: HttpMethod::Get,
    segments: &[
        Segment::Literal("locations"),
        Segment::Location,
        Segment::Literal("rankings"),
        Segment::Literal("clans"),
    ],
    query: PAGING,
};

pub(crate) const PLAYER_RANKINGS: Endpoint = Endpoint {
    name: "playerRankings",
    method: HttpMethod::Get,
    segments: &[
        Segment::Literal("locations"),
        Segment::Location,
        Segment::Literal("rankings"),
        Segment::Literal("players"),
    ],
    query: PAGING,
};

pub(crate) const CLAN_WAR_RANKINGS: Endpoint = Endpoint {
    name: "clanWarRankings",
    method: HttpMethod::Get,
    segments: &[
        Segment::Literal("locations"),
        Segment::Location,
        Segment::Literal("rankings"),
        Segment::Literal("clanwars"),
    ],
    query: PAGING,
};

pub(crate) const CLAN_SEARCH: Endpoint = Endpoint {
    name: "clanSearch",
    method: HttpMethod::Get,
    segments: &[Segment::Literal("clans")],
    query: &[
        "name",
        "locationId",
        "minMembers",
        "maxMembers",
        "minScore",
        "limit",
        "after",
        "before",
    ],
};

pub(crate) const CLAN_PROFILE: Endpoint = Endpoint {
    name: "clanProfile",
    method: HttpMethod::Get,
    segments: &[Segment::Literal("clans"), Segment::Tag],
    query: &[],
};

pub(crate) const CURRENT_CLAN_WAR: Endpoint = Endpoint {
    name: "currentClanWar",
    method: HttpMethod::Get,
    segments: &[
        Segment::Literal("clans"),
        Segment::Tag,
        Segment::Literal("currentwar"),
    ],
    query: &[],
};

pub(crate) const CLAN_WAR_LOG: Endpoint = Endpoint {
    name: "clanWarLog",
    method: HttpMethod::Get,
    segments: &[
        Segment::Literal("clans"),
        Segment::Tag,
        Segment::Literal("warlog"),
    ],
    query: PAGING,
};

pub(crate) const PLAYER_PROFILE: Endpoint = Endpoint {
    name: "playerProfile",
    method: HttpMethod::Get,
    segments: &[Segment::Literal("players"), Segment::Tag],
    query: &[],
};

pub(crate) const UPCOMING_CHESTS: Endpoint = Endpoint {
    name: "upcomingChests",
    method: HttpMethod::Get,
    segments: &[
        Segment::Literal("players"),
        Segment::Tag,
        Segment::Literal("upcomingchests"),
    ],
    query: &[],
};

pub(crate) const BATTLE_LOG: Endpoint = Endpoint {
    name: "battleLog",
    method: HttpMethod::Get,
    segments: &[
        Segment::Literal("players"),
        Segment::Tag,
        Segment::Literal("battlelog"),
    ],
    query: &[],
};

pub(crate) const VERIFY_TOKEN: Endpoint = Endpoint {
    name: "verifyToken",
    method: HttpMethod::Post,
    segments: &[
        Segment::Literal("players"),
        Segment::Tag,
        Segment::Literal("verifytoken"),
    ],
    query: &[],
};

pub(crate) const TOURNAMENTS: Endpoint = Endpoint {
    name: "tournaments",
    method: HttpMethod::Get,
    segments: &[Segment::Literal("tournaments")],
    query: &["name", "limit", "after", "before"],
};

pub(crate) const TOURNAMENT_BY_TAG: Endpoint = Endpoint {
    name: "tournamentByTag",
    method: HttpMethod::Get,
    segments: &[Segment::Literal("tournaments"), Segment::Tag],
    query: &[],
};

/// A fully resolved call, ready for the transport. Tag segments are already
/// normalized and `#`-prefixed; percent-encoding happens on URL assembly.
#[derive(Debug)]
pub(crate) struct ResolvedCall {
    pub method: HttpMethod,
    pub segments: Vec<String>,
    pub query: Vec<(&'static str, String)>,
}

impl Endpoint {
    /// Substitute path arguments into the template and drop every query
    /// parameter the caller left unset. Tag arguments are normalized here,
    /// and rejected here when `validate_tags` is on, so nothing malformed
    /// ever reaches the transport.
    pub(crate) fn resolve(
        &self,
        path_args: &[PathArg<'_>],
        query_args: &[(&'static str, Option<String>)],
        validate_tags: bool,
    ) -> Result<ResolvedCall, Error> {
        let mut args = path_args.iter();
        let mut segments = Vec::with_capacity(self.segments.len());
        for segment in self.segments {
            let rendered = match segment {
                Segment::Literal(part) => (*part).to_string(),
                Segment::Tag => match args.next() {
                    Some(PathArg::Tag(raw)) => {
                        let normalized = tag::normalize(raw);
                        if validate_tags {
                            tag::validate(&normalized)?;
                        }
                        format!("#{normalized}")
                    }
                    _ => unreachable!("endpoint {} expects a tag argument", self.name),
                },
                Segment::Location => match args.next() {
                    Some(PathArg::Location(id)) => id.to_string(),
                    _ => unreachable!("endpoint {} expects a location argument", self.name),
                },
            };
            segments.push(rendered);
        }

        // Absent values are dropped entirely: the service treats an empty
        // parameter differently from an omitted one.
        let query = query_args
            .iter()
            .filter_map(|(name, value)| {
                debug_assert!(
                    self.query.contains(name),
                    "endpoint {} does not accept query parameter {name}",
                    self.name
                );
                value.clone().map(|v| (*name, v))
            })
            .collect();

        Ok(ResolvedCall {
            method: self.method,
            segments,
            query,
        })
    }
}
