//! Action cube slots.
//!
//! Eleven fixed slots, each bound to one action kind. A turn moves one
//! cube: off a filled slot of some kind, onto an empty slot of a
//! different kind. The kind the cube lands on is the action taken.

use serde::{Deserialize, Serialize};

use crate::core::MoveRejected;

/// The six things a player can do on their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    BuildTrack,
    AuctionShare,
    TakeResources,
    IssueBond,
    Merge,
    PayDividend,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::BuildTrack,
        ActionKind::AuctionShare,
        ActionKind::TakeResources,
        ActionKind::IssueBond,
        ActionKind::Merge,
        ActionKind::PayDividend,
    ];

    /// Index used by `%A` log placeholders.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<ActionKind> {
        Self::ALL.get(index).copied()
    }
}

/// Slot index -> action kind. Configuration, never state.
pub const SLOT_ACTIONS: [ActionKind; 11] = [
    ActionKind::BuildTrack,
    ActionKind::BuildTrack,
    ActionKind::BuildTrack,
    ActionKind::AuctionShare,
    ActionKind::AuctionShare,
    ActionKind::TakeResources,
    ActionKind::TakeResources,
    ActionKind::TakeResources,
    ActionKind::IssueBond,
    ActionKind::Merge,
    ActionKind::PayDividend,
];

/// Which slots currently hold a cube.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionCubes {
    filled: [bool; 11],
}

impl Default for ActionCubes {
    /// Cubes start on the three TakeResources slots and PayDividend.
    fn default() -> Self {
        let mut filled = [false; 11];
        for (slot, kind) in SLOT_ACTIONS.iter().enumerate() {
            filled[slot] = matches!(kind, ActionKind::TakeResources | ActionKind::PayDividend);
        }
        Self { filled }
    }
}

impl ActionCubes {
    #[must_use]
    pub fn from_slots(filled: [bool; 11]) -> Self {
        Self { filled }
    }

    #[must_use]
    pub fn slots(&self) -> &[bool; 11] {
        &self.filled
    }

    #[must_use]
    pub fn cubes(&self) -> usize {
        self.filled.iter().filter(|f| **f).count()
    }

    fn first_slot(&self, kind: ActionKind, filled: bool) -> Option<usize> {
        SLOT_ACTIONS
            .iter()
            .enumerate()
            .find(|&(slot, &k)| k == kind && self.filled[slot] == filled)
            .map(|(slot, _)| slot)
    }

    /// A cube sits on at least one slot of `kind`.
    #[must_use]
    pub fn has_cube(&self, kind: ActionKind) -> bool {
        self.first_slot(kind, true).is_some()
    }

    /// At least one slot of `kind` is empty.
    #[must_use]
    pub fn has_space(&self, kind: ActionKind) -> bool {
        self.first_slot(kind, false).is_some()
    }

    /// Kinds with a cube that could be picked up.
    pub fn removable(&self) -> impl Iterator<Item = ActionKind> + '_ {
        ActionKind::ALL.into_iter().filter(|&k| self.has_cube(k))
    }

    /// Kinds with room for a cube.
    pub fn placeable(&self) -> impl Iterator<Item = ActionKind> + '_ {
        ActionKind::ALL.into_iter().filter(|&k| self.has_space(k))
    }

    /// Pick a cube up from the first filled slot of `kind`.
    pub fn remove(&mut self, kind: ActionKind) -> Result<usize, MoveRejected> {
        let slot = self
            .first_slot(kind, true)
            .ok_or(MoveRejected::NoCubeToRemove(kind))?;
        self.filled[slot] = false;
        Ok(slot)
    }

    /// Put the held cube down on the first empty slot of `kind`. The
    /// kind it was taken from is off limits.
    pub fn place(&mut self, kind: ActionKind, vacated: ActionKind) -> Result<usize, MoveRejected> {
        if kind == vacated {
            return Err(MoveRejected::SameActionAsRemoved(kind));
        }
        let slot = self.first_slot(kind, false).ok_or(MoveRejected::NoFreeSlot(kind))?;
        self.filled[slot] = true;
        Ok(slot)
    }
}
