// Proposal stages and the state shared across them.

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use strum::EnumIter;

/// Whether the proposal is live. Unmounting tears down every stage.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum ViewState {
    #[default]
    Mounted,
    Unmounted,
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, SubStates, EnumIter)]
#[source(ViewState = ViewState::Mounted)]
pub enum Stage {
    #[default]
    Acknowledgement,
    Teaser,
    Prompt,
    Accepted,
    Card,
}

impl Stage {
    /// Position of the stage in the sequence, 0 through 4.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stages that leave on their own once the stage delay elapses.
    pub fn is_timed(self) -> bool {
        matches!(self, Stage::Acknowledgement | Stage::Teaser | Stage::Accepted)
    }

    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Acknowledgement => Some(Stage::Teaser),
            Stage::Teaser => Some(Stage::Prompt),
            Stage::Prompt => Some(Stage::Accepted),
            Stage::Accepted => Some(Stage::Card),
            Stage::Card => None,
        }
    }
}

/// Latch for the floating-heart overlay. Once set it stays set until unmount.
#[derive(Resource, Debug, Default)]
pub struct Celebration {
    active: bool,
}

impl Celebration {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns true only for the call that flips the latch.
    pub fn activate(&mut self) -> bool {
        let flipped = !self.active;
        self.active = true;
        flipped
    }
}

/// Random source for every randomized placement in the proposal.
#[derive(Resource)]
pub struct ProposalRng(pub StdRng);

impl ProposalRng {
    pub fn from_os() -> Self {
        ProposalRng(StdRng::from_os_rng())
    }

    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        ProposalRng(StdRng::seed_from_u64(seed))
    }
}
