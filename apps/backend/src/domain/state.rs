use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::catalog::Item;
use crate::domain::rules::{turn_entry, ActionKind, Role, Side, TurnEntry, ROLES, SEQUENCE_LEN, SIDES};
use crate::domain::scoring::score_pick;
use crate::errors::domain::DraftError;

/// Draft progression, derived from the cursor position.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DraftPhase {
    /// Cursor sits on a ban entry.
    Banning,
    /// Cursor sits on a pick entry.
    Picking,
    /// Cursor has run past the last entry.
    Complete,
}

/// One team's line-up: exactly one slot per role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamSlots {
    slots: [Option<Arc<Item>>; ROLES],
}

impl TeamSlots {
    pub fn get(&self, role: Role) -> Option<&Arc<Item>> {
        self.slots[role.index()].as_ref()
    }

    pub fn is_open(&self, role: Role) -> bool {
        self.slots[role.index()].is_none()
    }

    /// Items currently filled, in role order.
    pub fn picks(&self) -> impl Iterator<Item = &Item> + '_ {
        self.slots.iter().filter_map(|slot| slot.as_deref())
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// `(role, slot)` pairs in role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, Option<&Arc<Item>>)> + '_ {
        Role::ALL.iter().map(move |&role| (role, self.get(role)))
    }

    fn fill(&mut self, role: Role, item: Arc<Item>) {
        debug_assert!(self.is_open(role));
        self.slots[role.index()] = Some(item);
    }
}

/// A ban or pick submitted by one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftAction {
    Ban { item: Arc<Item> },
    Pick { item: Arc<Item>, role: Role },
}

impl DraftAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            DraftAction::Ban { .. } => ActionKind::Ban,
            DraftAction::Pick { .. } => ActionKind::Pick,
        }
    }

    pub fn item(&self) -> &Arc<Item> {
        match self {
            DraftAction::Ban { item } | DraftAction::Pick { item, .. } => item,
        }
    }
}

/// What an accepted action did, for logging and callers that want the delta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedTurn {
    /// Cursor position the action consumed.
    pub cursor: usize,
    pub entry: TurnEntry,
    pub item_id: String,
    pub role: Option<Role>,
    /// Score added to the acting side (always 0 for bans).
    pub delta: i32,
}

/// Server-authoritative state of one draft.
///
/// Only `apply` and `reset` mutate it. Invariants:
/// - `turn_cursor <= SEQUENCE_LEN`
/// - every banned or picked id appears exactly once in `used_items`
/// - scores only grow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftState {
    turn_cursor: usize,
    bans: [Vec<Arc<Item>>; SIDES],
    teams: [TeamSlots; SIDES],
    used_items: BTreeSet<String>,
    scores: [i32; SIDES],
}

impl DraftState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turn_cursor(&self) -> usize {
        self.turn_cursor
    }

    /// Entry the next action must match, `None` once complete.
    pub fn current_turn(&self) -> Option<TurnEntry> {
        turn_entry(self.turn_cursor)
    }

    pub fn phase(&self) -> DraftPhase {
        match self.current_turn() {
            Some(TurnEntry {
                kind: ActionKind::Ban,
                ..
            }) => DraftPhase::Banning,
            Some(TurnEntry {
                kind: ActionKind::Pick,
                ..
            }) => DraftPhase::Picking,
            None => DraftPhase::Complete,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.turn_cursor >= SEQUENCE_LEN
    }

    pub fn bans(&self, side: Side) -> &[Arc<Item>] {
        &self.bans[side.index()]
    }

    pub fn team(&self, side: Side) -> &TeamSlots {
        &self.teams[side.index()]
    }

    pub fn used_items(&self) -> &BTreeSet<String> {
        &self.used_items
    }

    pub fn is_used(&self, item_id: &str) -> bool {
        self.used_items.contains(item_id)
    }

    pub fn score(&self, side: Side) -> i32 {
        self.scores[side.index()]
    }

    /// Side with the strictly higher score once the draft is complete.
    pub fn winner(&self) -> Option<Side> {
        if !self.is_complete() {
            return None;
        }
        let first = self.score(Side::First);
        let second = self.score(Side::Second);
        match first.cmp(&second) {
            std::cmp::Ordering::Greater => Some(Side::First),
            std::cmp::Ordering::Less => Some(Side::Second),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Validate `action` against the current turn and apply it.
    ///
    /// On error nothing is touched.
    pub fn apply(&mut self, side: Side, action: DraftAction) -> Result<AppliedTurn, DraftError> {
        let entry = self.current_turn().ok_or(DraftError::OutOfTurn { expected: None })?;

        // A consumed item is unavailable whoever asks for it, whatever the turn.
        let item_id = action.item().id.clone();
        if self.is_used(&item_id) {
            return Err(DraftError::ItemUnavailable(item_id));
        }

        if entry.kind != action.kind() || entry.side != side {
            return Err(DraftError::OutOfTurn {
                expected: Some(entry),
            });
        }

        let cursor = self.turn_cursor;
        let (role, delta) = match action {
            DraftAction::Ban { item } => {
                self.bans[side.index()].push(item);
                (None, 0)
            }
            DraftAction::Pick { item, role } => {
                if !self.team(side).is_open(role) {
                    return Err(DraftError::SlotOccupied(role));
                }
                let delta = {
                    let allied: Vec<&Item> = self.team(side).picks().collect();
                    let enemy: Vec<&Item> = self.team(side.other()).picks().collect();
                    score_pick(&item, &allied, &enemy)
                };
                self.teams[side.index()].fill(role, item);
                self.scores[side.index()] += delta;
                (Some(role), delta)
            }
        };

        self.used_items.insert(item_id.clone());
        self.turn_cursor += 1;

        Ok(AppliedTurn {
            cursor,
            entry,
            item_id,
            role,
            delta,
        })
    }

    /// Back to the empty draft, from any phase.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
