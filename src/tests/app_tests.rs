#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::app::{App, View};
    use crate::components::BrickColor;
    use crate::config::{Config, Difficulty};
    use crate::input::{Command, InputEvent};
    use crate::leaderboard::{Leaderboard, LeaderboardEntry};
    use crate::session::{GameSession, SessionEvent};
    use crate::tests::test_utils::{fill_row_except, prepare_blocked_spawn, vertical_i};
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn test_app() -> (tempfile::TempDir, PathBuf, App) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let path = temp_dir.path().join("leaderboard.toml");
        let config = Config {
            difficulty: Difficulty::Normal,
            show_grid: true,
            seed: Some(21),
        };
        let app = App::new(config, Leaderboard::open(&path));
        (temp_dir, path, app)
    }

    #[test]
    fn test_new_app_starts_playing() {
        let (_temp_dir, _path, app) = test_app();

        assert_eq!(app.view, View::Playing);
        assert!(!app.should_quit);
        assert!(!app.celebrating);
        assert!(app.session().current_piece().is_some());
        assert!(app.settings().show_grid);
    }

    #[test]
    fn test_seeded_apps_match() {
        let (_a_dir, _a_path, a) = test_app();
        let (_b_dir, _b_path, b) = test_app();

        assert_eq!(a.session().current_piece(), b.session().current_piece());
        assert_eq!(a.session().next_piece(), b.session().next_piece());
    }

    #[test]
    fn test_game_commands_reach_session() {
        let (_temp_dir, _path, mut app) = test_app();
        let start = app.session().current_piece().unwrap().position();

        app.frame_at(0, &[Command::Game(InputEvent::MoveRight)]);

        assert_eq!(
            app.session().current_piece().unwrap().position(),
            start.offset(1, 0)
        );
    }

    #[test]
    fn test_leaderboard_view_pauses_play() {
        let (_temp_dir, _path, mut app) = test_app();
        let start = app.session().current_piece().unwrap().position();

        app.frame_at(0, &[Command::ToggleLeaderboard]);
        assert_eq!(app.view, View::Leaderboard);

        let report = app.frame_at(10_000, &[Command::Game(InputEvent::SoftDrop)]);
        assert!(report.events.is_empty());
        assert_eq!(app.session().current_piece().unwrap().position(), start);

        app.frame_at(10_000, &[Command::ToggleLeaderboard]);
        assert_eq!(app.view, View::Playing);
    }

    #[test]
    fn test_clear_leaderboard_only_from_leaderboard_view() {
        let (_temp_dir, path, mut app) = test_app();
        app.world
            .resource_mut::<Leaderboard>()
            .add_entry(LeaderboardEntry {
                score: 800,
                recorded_at: 1,
            });

        app.frame_at(0, &[Command::ClearLeaderboard]);
        assert_eq!(app.leaderboard().entries().len(), 1);

        app.frame_at(0, &[Command::ToggleLeaderboard, Command::ClearLeaderboard]);
        assert!(app.leaderboard().entries().is_empty());
        assert!(path.exists(), "Clearing should persist the board");
    }

    #[test]
    fn test_game_over_records_score() {
        let (_temp_dir, path, mut app) = test_app();
        prepare_blocked_spawn(&mut app.world.resource_mut::<GameSession>());

        let report = app.frame_at(500, &[]);

        assert!(report.events.contains(&SessionEvent::GameOver { final_score: 0 }));
        assert_eq!(app.last_rank, Some(1));
        assert_eq!(app.leaderboard().best(), Some(0));
        assert_eq!(Leaderboard::open(&path).entries().len(), 1);
    }

    #[test]
    fn test_restart_after_game_over() {
        let (_temp_dir, _path, mut app) = test_app();
        prepare_blocked_spawn(&mut app.world.resource_mut::<GameSession>());
        app.frame_at(500, &[]);
        assert!(app.session().is_game_over());

        app.frame_at(600, &[Command::Restart]);

        assert!(!app.session().is_game_over());
        assert_eq!(app.last_rank, None);
        assert_eq!(app.session().grid().occupied_count(), 0);
        assert!(app.session().current_piece().is_some());
    }

    #[test]
    fn test_milestone_requests_celebration() {
        let (_temp_dir, _path, mut app) = test_app();
        {
            let mut session = app.world.resource_mut::<GameSession>();
            for y in 12..16 {
                fill_row_except(session.grid_mut(), y, &[4], BrickColor::Gray);
            }
            session.set_current(vertical_i());
        }

        app.frame_at(0, &[Command::Game(InputEvent::HardDrop)]);
        let report = app.frame_at(500, &[]);

        assert!(report.celebrate);
        assert!(app.celebrating);
        assert!(report.events.contains(&SessionEvent::Milestone { score: 600 }));

        app.finish_celebration();
        assert!(!app.celebrating);
    }

    #[test]
    fn test_quit_stops_the_frame() {
        let (_temp_dir, _path, mut app) = test_app();

        let report = app.frame_at(0, &[Command::Quit, Command::Game(InputEvent::MoveLeft)]);

        assert!(app.should_quit);
        assert!(report.events.is_empty());
    }
}
