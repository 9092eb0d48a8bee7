//! Game phases and the transitions allowed between them.

use crate::outcome::Outcome;

/// Top-level game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for model bundles (third-person variant only).
    Loading,
    Playing,
    Dead,
    Win,
}

/// A transition that is not allowed from the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot {action} while {phase:?}")]
pub struct PhaseError {
    pub phase: GamePhase,
    pub action: &'static str,
}

impl GamePhase {
    /// Controllers, physics and outcome checks only run while playing.
    pub fn is_active(self) -> bool {
        self == GamePhase::Playing
    }

    /// Dead or won; waiting for a restart.
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Dead | GamePhase::Win)
    }

    /// Loading finished.
    pub fn begin(self) -> Result<GamePhase, PhaseError> {
        match self {
            GamePhase::Loading => Ok(GamePhase::Playing),
            phase => Err(PhaseError { phase, action: "begin play" }),
        }
    }

    /// The outcome checker fired.
    pub fn conclude(self, outcome: Outcome) -> Result<GamePhase, PhaseError> {
        match self {
            GamePhase::Playing if outcome.is_death() => Ok(GamePhase::Dead),
            GamePhase::Playing => Ok(GamePhase::Win),
            phase => Err(PhaseError { phase, action: "conclude a round" }),
        }
    }

    /// The restart control was used.
    pub fn restart(self) -> Result<GamePhase, PhaseError> {
        if self.is_terminal() {
            Ok(GamePhase::Playing)
        } else {
            Err(PhaseError { phase: self, action: "restart" })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_only_begins() {
        assert_eq!(GamePhase::Loading.begin(), Ok(GamePhase::Playing));
        assert!(GamePhase::Loading.restart().is_err());
        assert!(GamePhase::Loading.conclude(Outcome::ReachedGoal).is_err());
    }

    #[test]
    fn playing_concludes_by_outcome() {
        assert_eq!(GamePhase::Playing.conclude(Outcome::CaughtByTrap(2)), Ok(GamePhase::Dead));
        assert_eq!(GamePhase::Playing.conclude(Outcome::CaughtByHazard), Ok(GamePhase::Dead));
        assert_eq!(GamePhase::Playing.conclude(Outcome::ReachedGoal), Ok(GamePhase::Win));
        assert!(GamePhase::Playing.restart().is_err());
        assert!(GamePhase::Playing.begin().is_err());
    }

    #[test]
    fn terminal_phases_restart_into_play() {
        for phase in [GamePhase::Dead, GamePhase::Win] {
            assert!(phase.is_terminal());
            assert!(!phase.is_active());
            assert_eq!(phase.restart(), Ok(GamePhase::Playing));
            assert!(phase.conclude(Outcome::CaughtByHazard).is_err());
        }
    }
}
