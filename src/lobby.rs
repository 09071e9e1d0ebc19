//! Slot setup per mode and the rules a lineup must satisfy before a round

use thiserror::Error;

use crate::config::{Difficulty, GameMode, PlayerColor, Slot, MAX_ACTORS};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LobbyError {
    #[error("Endless mode: exactly 1 human player!")]
    EndlessNeedsOneHuman,

    #[error("Need at least 1 human player!")]
    NoHuman,

    #[error("Max 2 human players!")]
    TooManyHumans,

    #[error("Each player needs a unique color!")]
    DuplicateColor,

    #[error("Human players need different controls!")]
    DuplicateKeys,
}

/// Slot lineup for a mode, starting from the saved lobby setup
pub fn slots_for(mode: GameMode, saved: &[Slot]) -> Vec<Slot> {
    let n = mode.actor_count();
    match mode {
        GameMode::Auto => (0..n)
            .map(|i| Slot::ai(PlayerColor::for_index(i), Difficulty::Hard))
            .collect(),
        GameMode::Endless => (0..n)
            .map(|i| match i {
                0 => Slot::human(PlayerColor::for_index(0), 0),
                _ => Slot::ai(PlayerColor::for_index(i), Difficulty::Medium),
            })
            .collect(),
        _ => {
            let mut slots: Vec<Slot> = (0..MAX_ACTORS)
                .map(|i| {
                    let mut slot = saved.get(i).copied().unwrap_or_default();
                    slot.color = PlayerColor::for_index(i);
                    if i >= n {
                        slot.human = false;
                    }
                    slot
                })
                .collect();
            slots[0].human = true;
            if n == 2 {
                slots[1].human = false;
            }
            if mode == GameMode::Teams {
                for (slot, team) in slots.iter_mut().zip([0, 0, 1, 1]) {
                    slot.team = team;
                }
            }
            slots.truncate(n);
            slots
        }
    }
}

/// Check a lineup the way the lobby would before starting
pub fn validate(mode: GameMode, slots: &[Slot]) -> Result<(), LobbyError> {
    let lineup = &slots[..mode.actor_count().min(slots.len())];
    let humans = lineup.iter().filter(|s| s.human).count();

    if mode == GameMode::Endless && humans != 1 {
        return Err(LobbyError::EndlessNeedsOneHuman);
    }
    for (i, a) in lineup.iter().enumerate() {
        for b in &lineup[i + 1..] {
            if a.color == b.color {
                return Err(LobbyError::DuplicateColor);
            }
            if a.human && b.human && a.keyset == b.keyset {
                return Err(LobbyError::DuplicateKeys);
            }
        }
    }
    if mode != GameMode::Auto && mode != GameMode::Endless {
        if humans == 0 {
            return Err(LobbyError::NoHuman);
        }
        if humans > 2 {
            return Err(LobbyError::TooManyHumans);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn auto_is_six_hard_ais() {
        let slots = slots_for(GameMode::Auto, &[]);
        assert_eq!(slots.len(), 6);
        assert!(slots.iter().all(|s| !s.human && s.difficulty == Difficulty::Hard));
        assert_eq!(validate(GameMode::Auto, &slots), Ok(()));
    }

    #[test]
    fn endless_is_one_human_and_seven_ais() {
        let slots = slots_for(GameMode::Endless, &[]);
        assert_eq!(slots.len(), 8);
        assert_eq!(slots.iter().filter(|s| s.human).count(), 1);
        assert!(slots[0].human);
        assert_eq!(validate(GameMode::Endless, &slots), Ok(()));
    }

    #[test]
    fn teams_get_split_two_and_two() {
        let saved = Settings::default().slots;
        let slots = slots_for(GameMode::Teams, &saved);
        let teams: Vec<u8> = slots.iter().map(|s| s.team).collect();
        assert_eq!(teams, vec![0, 0, 1, 1]);
        assert_eq!(validate(GameMode::Teams, &slots), Ok(()));
    }

    #[test]
    fn duel_forces_human_versus_cpu() {
        let mut saved = Settings::default().slots;
        saved[0].human = false;
        saved[1].human = true;
        let slots = slots_for(GameMode::Duel, &saved);
        assert!(slots[0].human && !slots[1].human);
    }

    #[test]
    fn rejects_bad_lineups() {
        let mut slots = slots_for(GameMode::FreeForAll, &Settings::default().slots);
        slots[1].color = slots[0].color;
        assert_eq!(validate(GameMode::FreeForAll, &slots), Err(LobbyError::DuplicateColor));

        let mut slots = slots_for(GameMode::FreeForAll, &Settings::default().slots);
        slots[1].human = true;
        slots[1].keyset = slots[0].keyset;
        assert_eq!(validate(GameMode::FreeForAll, &slots), Err(LobbyError::DuplicateKeys));

        let mut slots = slots_for(GameMode::FreeForAll, &Settings::default().slots);
        for (i, s) in slots.iter_mut().enumerate() {
            s.human = true;
            s.keyset = i;
        }
        assert_eq!(validate(GameMode::FreeForAll, &slots), Err(LobbyError::TooManyHumans));

        let mut slots = slots_for(GameMode::Duel, &[]);
        slots[0].human = false;
        assert_eq!(validate(GameMode::Duel, &slots), Err(LobbyError::NoHuman));

        let mut slots = slots_for(GameMode::Endless, &[]);
        slots[3].human = true;
        slots[3].keyset = 2;
        assert_eq!(validate(GameMode::Endless, &slots), Err(LobbyError::EndlessNeedsOneHuman));
    }
}
