#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::components::{BrickColor, Position};
    use crate::config::{Config, Difficulty};
    use crate::game::{
        HARD_MOVE_INTERVAL_MS, MAX_ENERGY, NORMAL_MOVE_INTERVAL_MS, SPAWN_POSITION,
        TIME_SLOW_SPEED_FACTOR,
    };
    use crate::input::InputEvent;
    use crate::session::{GameSession, SessionEvent};
    use crate::skill::{ActiveSkill, SkillKind};
    use crate::tests::test_utils::{
        fill_row_except, prepare_blocked_spawn, seeded_session, vertical_i,
    };

    fn drop_i_at_column_four(session: &mut GameSession) -> Vec<SessionEvent> {
        session.set_current(vertical_i());
        let mut events = session.frame(0, &[InputEvent::HardDrop]);
        events.extend(session.frame(500, &[]));
        events
    }

    #[test]
    fn test_new_session_spawns_first_piece() {
        let session = seeded_session(42);

        let piece = session.current_piece().unwrap();
        assert_eq!(piece.position(), Position::from(SPAWN_POSITION));
        assert_eq!(session.score(), 0);
        assert_eq!(session.energy(), 0);
        assert!(!session.is_game_over());
        assert_eq!(session.final_score(), None);
        assert_eq!(session.grid().occupied_count(), 0);
    }

    #[test]
    fn test_same_seed_same_pieces() {
        let a = seeded_session(1234);
        let b = seeded_session(1234);

        assert_eq!(a.current_piece(), b.current_piece());
        assert_eq!(a.next_piece(), b.next_piece());
    }

    #[test]
    fn test_difficulty_sets_fall_interval() {
        let config = Config {
            difficulty: Difficulty::Hard,
            show_grid: true,
            seed: None,
        };
        let session = GameSession::new(&config, 9);

        assert_eq!(session.difficulty(), Difficulty::Hard);
        assert_eq!(
            session.current_piece().unwrap().move_interval_ms(),
            HARD_MOVE_INTERVAL_MS
        );
        assert_eq!(session.next_piece().move_interval_ms(), HARD_MOVE_INTERVAL_MS);
    }

    #[test]
    fn test_difficulty_change_applies_to_later_pieces() {
        let mut session = seeded_session(13);
        session.set_difficulty(Difficulty::Hard);
        assert_eq!(session.difficulty(), Difficulty::Hard);

        // The queued piece was generated before the change
        assert_eq!(session.next_piece().move_interval_ms(), NORMAL_MOVE_INTERVAL_MS);

        session.set_current(vertical_i());
        session.frame(0, &[InputEvent::HardDrop]);
        session.frame(500, &[]);

        assert_eq!(
            session.current_piece().unwrap().move_interval_ms(),
            NORMAL_MOVE_INTERVAL_MS
        );
        assert_eq!(session.next_piece().move_interval_ms(), HARD_MOVE_INTERVAL_MS);
    }

    #[test]
    fn test_time_slow_stretches_session_gravity() {
        let mut session = seeded_session(14);
        session.set_current(vertical_i());
        session.skill_mut().set_active(ActiveSkill {
            kind: SkillKind::TimeSlow,
            started_at_ms: 0,
            duration_ms: 20_000,
        });
        let slowed = NORMAL_MOVE_INTERVAL_MS * TIME_SLOW_SPEED_FACTOR;

        session.update(NORMAL_MOVE_INTERVAL_MS);
        assert_eq!(session.current_piece().unwrap().position().y, 0);

        session.update(slowed - 1);
        assert_eq!(session.current_piece().unwrap().position().y, 0);

        session.update(slowed);
        assert_eq!(session.current_piece().unwrap().position().y, 1);
        assert_eq!(session.active_skill().map(|s| s.kind), Some(SkillKind::TimeSlow));
    }

    #[test]
    fn test_gravity_returns_to_normal_after_time_slow() {
        let mut session = seeded_session(15);
        session.set_current(vertical_i());
        session.skill_mut().set_active(ActiveSkill {
            kind: SkillKind::TimeSlow,
            started_at_ms: 0,
            duration_ms: 1000,
        });

        let events = session.update(1001);
        assert!(events.contains(&SessionEvent::SkillExpired(SkillKind::TimeSlow)));
        assert_eq!(session.current_piece().unwrap().position().y, 0);

        session.update(1500);
        assert_eq!(session.current_piece().unwrap().position().y, 1);
    }

    #[test]
    fn test_single_line_clear() {
        let mut session = seeded_session(1);
        fill_row_except(session.grid_mut(), 15, &[4], BrickColor::Gray);

        let events = drop_i_at_column_four(&mut session);

        assert!(events.contains(&SessionEvent::Locked { cells: 4 }));
        assert!(events.contains(&SessionEvent::LinesCleared {
            count: 1,
            points: 100
        }));
        assert!(matches!(events.last(), Some(SessionEvent::Spawned(_))));
        assert_eq!(session.score(), 100);
        assert_eq!(session.energy(), 20);

        let grid = session.grid();
        assert_eq!(grid.occupied_count(), 3);
        for y in 13..16 {
            assert!(grid.is_occupied(Position::new(4, y)));
        }
    }

    #[test]
    fn test_quadruple_clear_reaches_milestone() {
        let mut session = seeded_session(2);
        for y in 12..16 {
            fill_row_except(session.grid_mut(), y, &[4], BrickColor::Gray);
        }

        let events = drop_i_at_column_four(&mut session);

        assert!(events.contains(&SessionEvent::LinesCleared {
            count: 4,
            points: 600
        }));
        assert!(events.contains(&SessionEvent::Milestone { score: 600 }));
        assert_eq!(session.score(), 600);
        assert_eq!(session.energy(), 80);
        assert_eq!(session.grid().occupied_count(), 0);
    }

    #[test]
    fn test_no_clear_when_row_has_gap() {
        let mut session = seeded_session(3);
        fill_row_except(session.grid_mut(), 15, &[0, 9], BrickColor::Gray);
        session.set_current(vertical_i());

        let moves = [InputEvent::MoveLeft; 4];
        session.frame(0, &moves);
        session.frame(0, &[InputEvent::HardDrop]);
        let events = session.frame(500, &[]);

        assert!(events.contains(&SessionEvent::Locked { cells: 4 }));
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, SessionEvent::LinesCleared { .. }))
        );
        assert_eq!(session.score(), 0);
        assert_eq!(session.energy(), 0);
        assert_eq!(session.grid().occupied_count(), 12);
    }

    #[test]
    fn test_gravity_clock_restarts_on_spawn() {
        let mut session = seeded_session(4);
        fill_row_except(session.grid_mut(), 15, &[4], BrickColor::Gray);
        drop_i_at_column_four(&mut session);

        session.update(999);
        assert_eq!(session.current_piece().unwrap().position().y, 0);
        session.update(1000);
        assert_eq!(session.current_piece().unwrap().position().y, 1);
    }

    #[test]
    fn test_soft_drop_does_not_lock() {
        let mut session = seeded_session(5);
        session.set_current(vertical_i());

        for _ in 0..20 {
            session.frame(0, &[InputEvent::SoftDrop]);
        }

        let piece = session.current_piece().unwrap();
        assert_eq!(piece.position().y, 12);
        assert!(!piece.is_locked());
        assert_eq!(session.grid().occupied_count(), 0);
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let mut session = seeded_session(6);
        prepare_blocked_spawn(&mut session);

        let events = session.frame(500, &[]);

        assert_eq!(events.last(), Some(&SessionEvent::GameOver { final_score: 0 }));
        assert!(session.is_game_over());
        assert_eq!(session.final_score(), Some(0));
        assert!(session.current_piece().is_none());

        // A finished session ignores further frames
        assert!(session.frame(1000, &[InputEvent::MoveLeft]).is_empty());
        assert!(session.update(5000).is_empty());
    }

    #[test]
    fn test_skill_activation_runs_before_movement() {
        let mut session = seeded_session(7);
        session.skill_mut().set_energy(MAX_ENERGY);
        let start_x = session.current_piece().unwrap().position().x;

        let events = session.frame(0, &[InputEvent::MoveLeft, InputEvent::ActivateSkill]);

        assert!(matches!(events.first(), Some(SessionEvent::SkillFizzled(_))));
        assert_eq!(session.energy(), 0);
        assert!(session.active_skill().is_none());
        assert_eq!(session.current_piece().unwrap().position().x, start_x - 1);
    }

    #[test]
    fn test_skill_activation_and_expiry() {
        let mut session = seeded_session(8);
        session
            .grid_mut()
            .commit(&[Position::new(0, 15)], BrickColor::Gray);
        session.skill_mut().set_energy(MAX_ENERGY);

        let events = session.frame(0, &[InputEvent::ActivateSkill]);
        let Some(SessionEvent::SkillActivated(kind)) = events.first().copied() else {
            panic!("expected an activation, got {events:?}");
        };
        assert_eq!(session.active_skill().map(|s| s.kind), Some(kind));

        // A second request while active does nothing
        session.skill_mut().set_energy(MAX_ENERGY);
        let events = session.frame(0, &[InputEvent::ActivateSkill]);
        assert!(events.is_empty());
        assert_eq!(session.energy(), MAX_ENERGY);

        let events = session.update(20_001);
        assert!(events.contains(&SessionEvent::SkillExpired(kind)));
        assert!(session.active_skill().is_none());
    }

    #[test]
    fn test_handle_input_moves_piece() {
        let mut session = seeded_session(10);
        let start = session.current_piece().unwrap().position();

        let events = session.handle_input(InputEvent::MoveRight, 0);

        assert!(events.is_empty());
        assert_eq!(
            session.current_piece().unwrap().position(),
            start.offset(1, 0)
        );
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut session = seeded_session(12);
        prepare_blocked_spawn(&mut session);
        session.skill_mut().set_energy(40);
        session.frame(500, &[]);
        assert!(session.is_game_over());

        let events = session.reset(2000);

        assert!(matches!(events.as_slice(), [SessionEvent::Spawned(_)]));
        assert!(!session.is_game_over());
        assert_eq!(session.final_score(), None);
        assert_eq!(session.score(), 0);
        assert_eq!(session.energy(), 0);
        assert_eq!(session.grid().occupied_count(), 0);

        // The fresh piece waits a full interval from the reset time
        session.update(2499);
        assert_eq!(session.current_piece().unwrap().position().y, 0);
    }
}
