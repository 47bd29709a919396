//! Public snapshot API for observing sessions without exposing internals.
//!
//! A `SessionSnapshot` is what participants receive after every accepted
//! mutation and what late or reconnecting clients fetch on demand.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::catalog::Item;
use crate::domain::rules::{Role, Side, TurnEntry, SEQUENCE_LEN};
use crate::domain::session::{ConnectionId, SessionId};
use crate::domain::state::{DraftPhase, DraftState, TeamSlots};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// One participant, waiting for an opponent.
    Pending,
    /// Both sides seated; draft attached.
    Active,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhasePublic {
    Banning,
    Picking,
    Complete,
}

impl From<DraftPhase> for PhasePublic {
    fn from(phase: DraftPhase) -> Self {
        match phase {
            DraftPhase::Banning => PhasePublic::Banning,
            DraftPhase::Picking => PhasePublic::Picking,
            DraftPhase::Complete => PhasePublic::Complete,
        }
    }
}

/// Lightweight reference to a catalog item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: String,
    pub name: String,
}

impl From<&Item> for ItemRef {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPublic {
    pub role: Role,
    pub item: Option<ItemRef>,
}

/// Per-side values keyed by side name on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerSide<T> {
    pub first: T,
    pub second: T,
}

impl<T> PerSide<T> {
    pub fn from_fn(mut f: impl FnMut(Side) -> T) -> Self {
        Self {
            first: f(Side::First),
            second: f(Side::Second),
        }
    }

    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSnapshot {
    pub turn_cursor: usize,
    pub sequence_len: usize,
    pub phase: PhasePublic,
    /// Who acts next and how; `None` once complete.
    pub to_act: Option<TurnEntry>,
    pub bans: PerSide<Vec<ItemRef>>,
    pub teams: PerSide<Vec<SlotPublic>>,
    pub used_items: Vec<String>,
    pub scores: PerSide<i32>,
    pub winner: Option<Side>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantPublic {
    pub connection_id: ConnectionId,
    pub side: Side,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub name: String,
    pub status: SessionStatus,
    pub version: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub participants: Vec<ParticipantPublic>,
    pub draft: Option<DraftSnapshot>,
}

/// Lobby listing entry for a session still waiting for an opponent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenSession {
    pub session_id: SessionId,
    pub name: String,
    pub open_side: Side,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

fn team_public(team: &TeamSlots) -> Vec<SlotPublic> {
    team.iter()
        .map(|(role, item)| SlotPublic {
            role,
            item: item.map(|i| ItemRef::from(i.as_ref())),
        })
        .collect()
}

pub fn snapshot_draft(state: &DraftState) -> DraftSnapshot {
    DraftSnapshot {
        turn_cursor: state.turn_cursor(),
        sequence_len: SEQUENCE_LEN,
        phase: state.phase().into(),
        to_act: state.current_turn(),
        bans: PerSide::from_fn(|side| {
            state
                .bans(side)
                .iter()
                .map(|i| ItemRef::from(i.as_ref()))
                .collect()
        }),
        teams: PerSide::from_fn(|side| team_public(state.team(side))),
        used_items: state.used_items().iter().cloned().collect(),
        scores: PerSide::from_fn(|side| state.score(side)),
        winner: state.winner(),
    }
}
