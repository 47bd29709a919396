use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const SIDES: usize = 2;
pub const ROLES: usize = 5;
pub const BANS_PER_SIDE: usize = 5;
pub const PICKS_PER_SIDE: usize = ROLES;
pub const SEQUENCE_LEN: usize = SIDES * (BANS_PER_SIDE + PICKS_PER_SIDE);

/// One of the two drafting sides. Rules are symmetric between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub const ALL: [Side; SIDES] = [Side::First, Side::Second];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    #[inline]
    pub const fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Side::First => "first",
            Side::Second => "second",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "blue" => Ok(Side::First),
            "second" | "red" => Ok(Side::Second),
            other => Err(format!("unknown side: {other:?}")),
        }
    }
}

/// Lane roles. Every team has exactly one slot per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "TOP")]
    Top,
    #[serde(rename = "JG")]
    Jungle,
    #[serde(rename = "MID")]
    Mid,
    #[serde(rename = "ADC")]
    Bottom,
    #[serde(rename = "SUP")]
    Support,
}

impl Role {
    pub const ALL: [Role; ROLES] = [
        Role::Top,
        Role::Jungle,
        Role::Mid,
        Role::Bottom,
        Role::Support,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Role::Top => 0,
            Role::Jungle => 1,
            Role::Mid => 2,
            Role::Bottom => 3,
            Role::Support => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Top => "TOP",
            Role::Jungle => "JG",
            Role::Mid => "MID",
            Role::Bottom => "ADC",
            Role::Support => "SUP",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TOP" => Ok(Role::Top),
            "JG" | "JUNGLE" => Ok(Role::Jungle),
            "MID" | "MIDDLE" => Ok(Role::Mid),
            "ADC" | "BOT" | "BOTTOM" => Ok(Role::Bottom),
            "SUP" | "SUPPORT" => Ok(Role::Support),
            other => Err(format!("unknown role: {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Ban,
    Pick,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Ban => f.write_str("ban"),
            ActionKind::Pick => f.write_str("pick"),
        }
    }
}

/// Which side acts, and how, at one position of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnEntry {
    pub kind: ActionKind,
    pub side: Side,
}

const fn ban(side: Side) -> TurnEntry {
    TurnEntry {
        kind: ActionKind::Ban,
        side,
    }
}

const fn pick(side: Side) -> TurnEntry {
    TurnEntry {
        kind: ActionKind::Pick,
        side,
    }
}

use Side::{First as F, Second as S};

/// Tournament draft order: 6 bans, 6 picks, 4 bans, 4 picks.
///
/// Shared by every session. The phase of a draft is always read from this
/// table at the draft's cursor and never stored alongside it.
pub const DRAFT_SEQUENCE: [TurnEntry; SEQUENCE_LEN] = [
    // ban phase one
    ban(F),
    ban(S),
    ban(F),
    ban(S),
    ban(F),
    ban(S),
    // pick phase one
    pick(F),
    pick(S),
    pick(S),
    pick(F),
    pick(F),
    pick(S),
    // ban phase two
    ban(S),
    ban(F),
    ban(S),
    ban(F),
    // pick phase two
    pick(S),
    pick(F),
    pick(F),
    pick(S),
];

/// Entry at `cursor`, or `None` once the draft has run past the last entry.
#[inline]
pub fn turn_entry(cursor: usize) -> Option<TurnEntry> {
    DRAFT_SEQUENCE.get(cursor).copied()
}
