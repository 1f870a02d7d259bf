mod barrier;
mod bird;
mod collision;
mod game;
mod persistence;
mod rendering;
mod session;
mod ui;

use bevy::{prelude::*, window::WindowResolution};
use bevy_vector_shapes::prelude::*;

use barrier::BarrierPlugin;
use bird::BirdPlugin;
use collision::CollisionPlugin;
use game::{BACKGROUND_COLOR, FIELD_HEIGHT, FIELD_WIDTH, Settings};
use persistence::PersistencePlugin;
use rendering::RenderingPlugin;
use session::SessionPlugin;
use ui::UiPlugin;

fn main() -> AppExit {
    App::new()
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    resolution: WindowResolution::new(FIELD_WIDTH as u32, FIELD_HEIGHT as u32),
                    title: "Flappy Bird".to_string(),
                    resizable: false,
                    ..Default::default()
                }),
                ..default()
            }),
            Shape2dPlugin::default(),
        ))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(Settings::from_env())
        .add_plugins((
            PersistencePlugin,
            SessionPlugin,
            BirdPlugin,
            BarrierPlugin,
            CollisionPlugin,
            RenderingPlugin,
            UiPlugin,
        ))
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::input::ButtonState;
    use bevy::input::InputPlugin;
    use bevy::input::keyboard::{Key, KeyboardInput};
    use bevy::time::TimeUpdateStrategy;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    use crate::game::{GameAssets, GameOverUI, RestartEvent, ScorePanel};
    use crate::persistence::ScoreFile;
    use crate::session::{Session, SessionPhase};

    fn temp_save(name: &str) -> PathBuf {
        let file_name = format!("flappy_app_{}_{}", name, std::process::id());
        let path = std::env::temp_dir().join(file_name);
        std::fs::remove_file(&path).ok();
        path
    }

    /// Headless app with every gameplay plugin, run through its first frame.
    /// Time stands still until a test sets a frame duration.
    fn headless_app(save_path: &Path) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, InputPlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO))
            .insert_resource(Settings {
                save_path: save_path.to_path_buf(),
            })
            .add_plugins((
                PersistencePlugin,
                SessionPlugin,
                BirdPlugin,
                BarrierPlugin,
                CollisionPlugin,
            ));
        app.update();
        app
    }

    /// Adds the UI plugin with placeholder image handles.
    fn headless_app_with_ui(save_path: &Path) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, InputPlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO))
            .insert_resource(Settings {
                save_path: save_path.to_path_buf(),
            })
            .insert_resource(GameAssets {
                bird: Handle::default(),
                trophy: Handle::default(),
                star: Handle::default(),
            })
            .add_plugins((
                PersistencePlugin,
                SessionPlugin,
                BirdPlugin,
                BarrierPlugin,
                CollisionPlugin,
                UiPlugin,
            ));
        app.update();
        app
    }

    /// Lifts the bird out of the field and runs one 10 ms frame.
    fn crash_bird(app: &mut App) {
        app.world_mut().resource_mut::<Session>().bird.y = -50.0;
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(10)));
        app.update();
    }

    fn press(app: &mut App, key_code: KeyCode, logical_key: Key) {
        app.world_mut().write_message(KeyboardInput {
            key_code,
            logical_key,
            state: ButtonState::Pressed,
            text: None,
            repeat: false,
            window: Entity::PLACEHOLDER,
        });
        app.update();
    }

    fn count<T: Component>(app: &mut App) -> usize {
        let mut query = app.world_mut().query_filtered::<Entity, With<T>>();
        query.iter(app.world()).count()
    }

    #[test]
    fn test_first_frame_starts_a_run() {
        let path = temp_save("first_frame");
        let app = headless_app(&path);
        let session = app.world().resource::<Session>();
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.bird.y, 160.0);
        drop(app);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_crash_ends_run_and_saves_best() {
        let path = temp_save("crash");
        let mut app = headless_app(&path);
        {
            let mut session = app.world_mut().resource_mut::<Session>();
            for _ in 0..3 {
                session.score.record_pass();
            }
        }

        crash_bird(&mut app);

        assert_eq!(
            app.world().resource::<Session>().phase(),
            SessionPhase::GameOver
        );
        assert_eq!(ScoreFile::new(&path).load(), 3);
        drop(app);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_space_press_flaps_bird() {
        let path = temp_save("flap");
        let mut app = headless_app(&path);
        let before = app.world().resource::<Session>().bird.y;

        press(&mut app, KeyCode::Space, Key::Space);

        let after = app.world().resource::<Session>().bird.y;
        assert!((before - after - 26.0).abs() < 1e-3);

        // Non-flap keys are ignored
        press(&mut app, KeyCode::KeyB, Key::Character("b".into()));
        assert_eq!(app.world().resource::<Session>().bird.y, after);
        drop(app);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_restart_message_starts_new_run() {
        let path = temp_save("restart");
        let mut app = headless_app(&path);
        {
            let mut session = app.world_mut().resource_mut::<Session>();
            session.score.record_pass();
            session.score.record_pass();
            session.game_over();
        }

        app.world_mut().write_message(RestartEvent);
        app.update();

        let session = app.world().resource::<Session>();
        assert_eq!(session.phase(), SessionPhase::Running);
        assert_eq!(session.score.current, 0);
        assert_eq!(session.score.best, 2);
        drop(app);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_game_over_swaps_hud_for_result_screen() {
        let path = temp_save("ui");
        ScoreFile::new(&path).save(6).expect("seed save should succeed");
        let mut app = headless_app_with_ui(&path);
        assert_eq!(count::<ScorePanel>(&mut app), 1);
        assert_eq!(count::<GameOverUI>(&mut app), 0);

        crash_bird(&mut app);

        assert_eq!(count::<ScorePanel>(&mut app), 0);
        assert_eq!(count::<GameOverUI>(&mut app), 1);
        let mut text_query = app.world_mut().query::<&Text>();
        let texts: Vec<String> = text_query
            .iter(app.world())
            .map(|text| text.0.clone())
            .collect();
        assert!(texts.iter().any(|t| t == "Total score: 0 | Best score: 6"));

        // Restart brings the score panel back
        app.world_mut().write_message(RestartEvent);
        app.update();
        assert_eq!(count::<ScorePanel>(&mut app), 1);
        assert_eq!(count::<GameOverUI>(&mut app), 0);
        drop(app);

        std::fs::remove_file(path).ok();
    }
}
