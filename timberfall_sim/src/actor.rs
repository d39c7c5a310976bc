// Actor seam: the player whose break triggered the fell.
//
// The felling core needs very little from the actor: the held item (to read
// and write its wear), a way to empty the hand when the item breaks, a hook
// for the break sound, and the game mode. `Player` is the in-crate
// implementation owned by `ChopSim`.

use crate::types::{GameMode, ToolStack};
use serde::{Deserialize, Serialize};

pub trait Actor {
    fn held_item(&self) -> Option<&ToolStack>;

    fn held_item_mut(&mut self) -> Option<&mut ToolStack>;

    fn clear_held_item(&mut self);

    /// Play the item-break sound / particles.
    fn play_break_feedback(&mut self);

    fn game_mode(&self) -> GameMode;
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub game_mode: GameMode,
    pub held: Option<ToolStack>,
    /// How many times the item-break feedback has played.
    pub break_feedback_count: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn holding(mut self, tool: ToolStack) -> Self {
        self.held = Some(tool);
        self
    }

}

impl Actor for Player {
    fn held_item(&self) -> Option<&ToolStack> {
        self.held.as_ref()
    }

    fn held_item_mut(&mut self) -> Option<&mut ToolStack> {
        self.held.as_mut()
    }

    fn clear_held_item(&mut self) {
        self.held = None;
    }

    fn play_break_feedback(&mut self) {
        self.break_feedback_count += 1;
        log::debug!("{}: item break sound", self.name);
    }

    fn game_mode(&self) -> GameMode {
        self.game_mode
    }
}
