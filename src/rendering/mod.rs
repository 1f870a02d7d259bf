//! Rendering plugin - loads sprites and mirrors the session model onto entities.

use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;
use std::collections::HashSet;

use crate::barrier::{Barrier, Extents};
use crate::bird::Bird;
use crate::game::{
    BARRIER_COLOR, BIRD_IMAGE, BIRD_SIZE, BarrierPart, BarrierVisual, BirdSprite, FIELD_HEIGHT,
    FIELD_WIDTH, GameAssets, GameSet, STAR_IMAGE, TROPHY_IMAGE, Z_BARRIER, Z_BIRD,
};
use crate::session::Session;

/// Plugin for sprites, barrier shapes, and asset checks.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_assets)
            .add_systems(Startup, spawn_bird_sprite)
            .add_systems(
                Update,
                (abort_on_missing_sprite, sync_bird_sprite, sync_barrier_shapes)
                    .chain()
                    .in_set(GameSet::Presentation),
            );
    }
}

/// Converts a field rectangle (top-left origin, y down) to the world
/// translation of its center (center origin, y up).
pub fn field_to_world(rect: &Extents, z: f32) -> Vec3 {
    Vec3::new(
        (rect.left + rect.right) / 2.0 - FIELD_WIDTH / 2.0,
        FIELD_HEIGHT / 2.0 - (rect.top + rect.bottom) / 2.0,
        z,
    )
}

fn barrier_rect(barrier: &Barrier, part: BarrierPart) -> &Extents {
    match part {
        BarrierPart::Top => &barrier.top,
        BarrierPart::Bottom => &barrier.bottom,
    }
}

/// PreStartup system - queues every image the game needs.
fn load_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(GameAssets {
        bird: asset_server.load(BIRD_IMAGE),
        trophy: asset_server.load(TROPHY_IMAGE),
        star: asset_server.load(STAR_IMAGE),
    });
}

/// Spawns the bird sprite; its position is synced every frame.
fn spawn_bird_sprite(mut commands: Commands, assets: Res<GameAssets>) {
    commands.spawn((
        Sprite {
            image: assets.bird.clone(),
            custom_size: Some(Vec2::splat(BIRD_SIZE)),
            ..default()
        },
        Transform::from_translation(field_to_world(&Bird::default().bounds(), Z_BIRD)),
        BirdSprite,
    ));
}

/// Spawns one filled rectangle for half of a barrier pair.
fn spawn_barrier_shape(commands: &mut Commands, barrier: &Barrier, part: BarrierPart) {
    let rect = barrier_rect(barrier, part);
    commands.spawn((
        ShapeBundle::rect(
            &ShapeConfig {
                color: BARRIER_COLOR,
                transform: Transform::from_translation(field_to_world(rect, Z_BARRIER)),
                ..ShapeConfig::default_2d()
            },
            Vec2::new(rect.width(), rect.height()),
        ),
        BarrierVisual {
            id: barrier.id,
            part,
        },
    ));
}

/// System to stop the game when the bird sprite cannot be loaded.
fn abort_on_missing_sprite(
    asset_server: Res<AssetServer>,
    assets: Res<GameAssets>,
    mut exit_writer: MessageWriter<AppExit>,
    mut reported: Local<bool>,
) {
    if *reported {
        return;
    }
    if let LoadState::Failed(err) = asset_server.load_state(assets.bird.id()) {
        error!("Cannot load bird sprite '{}': {}", BIRD_IMAGE, err);
        exit_writer.write(AppExit::error());
        *reported = true;
    }
}

/// System to move the bird sprite to the model position.
fn sync_bird_sprite(session: Res<Session>, mut birds: Query<&mut Transform, With<BirdSprite>>) {
    for mut transform in birds.iter_mut() {
        transform.translation = field_to_world(&session.bird.bounds(), Z_BIRD);
    }
}

/// System to spawn, move, and despawn barrier shapes to match the queues.
fn sync_barrier_shapes(
    mut commands: Commands,
    session: Res<Session>,
    mut visuals: Query<(Entity, &BarrierVisual, &mut Transform)>,
) {
    let mut shown = HashSet::new();
    for (entity, visual, mut transform) in visuals.iter_mut() {
        match session.barriers.get(visual.id) {
            Some(barrier) => {
                transform.translation =
                    field_to_world(barrier_rect(barrier, visual.part), Z_BARRIER);
                shown.insert(visual.id);
            }
            None => commands.entity(entity).despawn(),
        }
    }

    for barrier in session.barriers.iter() {
        if !shown.contains(&barrier.id) {
            spawn_barrier_shape(&mut commands, barrier, BarrierPart::Top);
            spawn_barrier_shape(&mut commands, barrier, BarrierPart::Bottom);
        }
    }
}
