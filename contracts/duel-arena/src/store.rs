use crate::error::{ArenaError, Result};
use crate::game::Game;
use crate::types::GameId;

/// Owns every game ever created. Ids start at 1, increase by one and are
/// never reused; games are never removed.
#[derive(Debug, Default)]
pub struct GameStore {
    games: Vec<Game>,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next inserted game will receive.
    pub fn next_id(&self) -> GameId {
        self.games.len() as GameId + 1
    }

    pub(crate) fn insert(&mut self, build: impl FnOnce(GameId) -> Game) -> GameId {
        let id = self.next_id();
        let game = build(id);
        debug_assert_eq!(game.id, id);
        self.games.push(game);
        id
    }

    fn slot(id: GameId) -> Option<usize> {
        id.checked_sub(1).map(|i| i as usize)
    }

    pub fn get(&self, id: GameId) -> Result<&Game> {
        Self::slot(id)
            .and_then(|i| self.games.get(i))
            .ok_or(ArenaError::GameNotFound(id))
    }

    pub(crate) fn get_mut(&mut self, id: GameId) -> Result<&mut Game> {
        Self::slot(id)
            .and_then(|i| self.games.get_mut(i))
            .ok_or(ArenaError::GameNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Game> {
        self.games.iter()
    }
}
