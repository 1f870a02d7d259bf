//! UI plugin - handles the camera, score panel, game over screen, and restart control.

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;

use crate::game::{
    BestScoreText, CurrentScoreText, FIELD_BORDER_COLOR, FIELD_HEIGHT, FIELD_WIDTH, GameAssets,
    GameOverEvent, GameOverUI, GameSet, HUD_TEXT_COLOR, RESTART_BUTTON_COLOR,
    RESTART_BUTTON_HOVER_COLOR, RestartButton, RestartEvent, SQUARE_SIZE, ScorePanel, Z_BORDER,
};
use crate::persistence::HighScore;
use crate::session::{Session, SessionPhase, result_text};

/// Plugin for UI and game flow systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_system)
            .add_systems(
                Update,
                (restart_button_interaction, restart_from_keyboard).in_set(GameSet::Input),
            )
            .add_systems(
                Update,
                (
                    spawn_game_over_screen_system,
                    reset_ui_on_restart,
                    update_score_text,
                )
                    .chain()
                    .in_set(GameSet::Presentation),
            );
    }
}

// Type aliases for the two score texts
type CurrentTextQuery<'w, 's> =
    Query<'w, 's, &'static mut Text, (With<CurrentScoreText>, Without<BestScoreText>)>;
type BestTextQuery<'w, 's> =
    Query<'w, 's, &'static mut Text, (With<BestScoreText>, Without<CurrentScoreText>)>;

/// Initial setup system - camera, field border, score panel.
fn setup_system(mut commands: Commands, assets: Res<GameAssets>, high_score: Res<HighScore>) {
    commands.spawn(Camera2d);

    // Thin field outline on top of the barriers
    commands.spawn(ShapeBundle::rect(
        &ShapeConfig {
            color: FIELD_BORDER_COLOR,
            hollow: true,
            thickness: 1.0,
            transform: Transform::from_xyz(0.0, 0.0, Z_BORDER),
            ..ShapeConfig::default_2d()
        },
        Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
    ));

    spawn_score_panel(&mut commands, &assets, 0, high_score.best());
}

/// Spawns the live score panel: trophy + best score, star + current score.
fn spawn_score_panel(commands: &mut Commands, assets: &GameAssets, current: u32, best: u32) {
    let icon_node = || Node {
        width: Val::Px(SQUARE_SIZE),
        height: Val::Px(SQUARE_SIZE),
        margin: UiRect::right(Val::Px(6.0)),
        ..default()
    };
    let row_node = || Node {
        flex_direction: FlexDirection::Row,
        align_items: AlignItems::Center,
        ..default()
    };
    let score_font = || TextFont {
        font_size: 20.0,
        ..default()
    };

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                left: Val::Px(0.0),
                padding: UiRect::all(Val::Px(5.0)),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::WHITE),
            ScorePanel,
        ))
        .with_children(|parent| {
            parent.spawn(row_node()).with_children(|row| {
                row.spawn((ImageNode::new(assets.trophy.clone()), icon_node()));
                row.spawn((
                    Text::new(best.to_string()),
                    score_font(),
                    TextColor(HUD_TEXT_COLOR),
                    BestScoreText,
                ));
            });
            parent.spawn(row_node()).with_children(|row| {
                row.spawn((ImageNode::new(assets.star.clone()), icon_node()));
                row.spawn((
                    Text::new(current.to_string()),
                    score_font(),
                    TextColor(HUD_TEXT_COLOR),
                    CurrentScoreText,
                ));
            });
        });
}

/// Spawns the game over summary and the restart button.
fn spawn_game_over_screen(commands: &mut Commands, score: u32, best: u32) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            GameOverUI,
        ))
        .with_children(|parent| {
            // Final score text
            parent.spawn((
                Text::new(result_text(score, best)),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(HUD_TEXT_COLOR),
                BackgroundColor(Color::WHITE),
                Node {
                    width: Val::Percent(40.0),
                    padding: UiRect::all(Val::Px(8.0)),
                    justify_content: JustifyContent::Center,
                    ..default()
                },
            ));

            // Restart button
            parent
                .spawn((
                    Button,
                    Node {
                        width: Val::Percent(40.0),
                        height: Val::Percent(20.0),
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    BackgroundColor(RESTART_BUTTON_COLOR),
                    RestartButton,
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new("Restart"),
                        TextFont {
                            font_size: 32.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });
        });
}

/// System to swap the score panel for the game over screen when a run ends.
fn spawn_game_over_screen_system(
    mut commands: Commands,
    mut game_over_reader: MessageReader<GameOverEvent>,
    panels: Query<Entity, With<ScorePanel>>,
    game_over_ui: Query<Entity, With<GameOverUI>>,
) {
    let Some(event) = game_over_reader.read().last() else {
        return;
    };
    for entity in panels.iter() {
        commands.entity(entity).despawn();
    }
    if game_over_ui.is_empty() {
        spawn_game_over_screen(&mut commands, event.score, event.best);
    }
}

/// System to request a restart from the button.
fn restart_button_interaction(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<RestartButton>),
    >,
    mut restart_writer: MessageWriter<RestartEvent>,
) {
    for (interaction, mut color) in buttons.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                restart_writer.write(RestartEvent);
            }
            Interaction::Hovered => *color = BackgroundColor(RESTART_BUTTON_HOVER_COLOR),
            Interaction::None => *color = BackgroundColor(RESTART_BUTTON_COLOR),
        }
    }
}

/// System to request a restart with Enter while the game over screen is up.
fn restart_from_keyboard(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    session: Res<Session>,
    mut restart_writer: MessageWriter<RestartEvent>,
) {
    if session.phase() == SessionPhase::GameOver && keyboard_input.just_pressed(KeyCode::Enter) {
        restart_writer.write(RestartEvent);
    }
}

/// System to tear down the game over screen and bring back the score panel.
fn reset_ui_on_restart(
    mut commands: Commands,
    mut restart_reader: MessageReader<RestartEvent>,
    assets: Res<GameAssets>,
    session: Res<Session>,
    game_over_ui: Query<Entity, With<GameOverUI>>,
) {
    if restart_reader.read().last().is_none() || game_over_ui.is_empty() {
        return;
    }
    for entity in game_over_ui.iter() {
        commands.entity(entity).despawn();
    }
    spawn_score_panel(&mut commands, &assets, session.score.current, session.score.best);
}

/// System to update the score panel.
fn update_score_text(
    session: Res<Session>,
    mut current_text: CurrentTextQuery,
    mut best_text: BestTextQuery,
) {
    if !session.is_changed() {
        return;
    }
    if let Ok(mut text) = current_text.single_mut() {
        *text = Text::from(session.score.current.to_string());
    }
    if let Ok(mut text) = best_text.single_mut() {
        *text = Text::from(session.score.best.to_string());
    }
}
