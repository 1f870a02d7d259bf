//! Persistence plugin - loads the best score at startup and guarantees it is saved on exit.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::game::{GameOverEvent, GameSet, Settings};
use crate::session::Session;

/// Plugin for best-score persistence.
pub struct PersistencePlugin;

impl Plugin for PersistencePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, open_high_score).add_systems(
            Update,
            (track_best_score, save_on_game_over, save_on_exit)
                .chain()
                .in_set(GameSet::Presentation),
        );
    }
}

/// On-disk shape of the save file.
#[derive(Debug, Serialize, Deserialize)]
struct SaveRecord {
    best_score: u32,
}

/// Handle on the file holding the best score.
#[derive(Debug, Clone)]
pub struct ScoreFile {
    path: PathBuf,
}

impl ScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ScoreFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved best score, returning 0 if missing or invalid.
    pub fn load(&self) -> u32 {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return 0,
            Err(err) => {
                warn!("Could not read save file {}: {}", self.path.display(), err);
                return 0;
            }
        };
        match serde_json::from_str::<SaveRecord>(&json) {
            Ok(record) => record.best_score,
            Err(err) => {
                warn!("Ignoring corrupt save file {}: {}", self.path.display(), err);
                0
            }
        }
    }

    /// Save the best score, replacing any previous record.
    pub fn save(&self, best_score: u32) -> io::Result<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&SaveRecord { best_score })
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Best-score guard. Whatever it last observed is written back when it is
/// committed or dropped, so every shutdown path that drops the app saves.
#[derive(Resource, Debug)]
pub struct HighScore {
    file: ScoreFile,
    best: u32,
    saved: Option<u32>,
}

impl HighScore {
    pub fn open(file: ScoreFile) -> Self {
        let best = file.load();
        HighScore {
            file,
            best,
            saved: None,
        }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Raise the in-memory best score. Lower values are ignored.
    pub fn observe(&mut self, best: u32) {
        self.best = self.best.max(best);
    }

    /// Write the best score if it changed since the last successful save.
    pub fn commit(&mut self) -> io::Result<()> {
        if self.saved == Some(self.best) {
            return Ok(());
        }
        self.file.save(self.best)?;
        self.saved = Some(self.best);
        Ok(())
    }

    fn commit_or_warn(&mut self) {
        if let Err(err) = self.commit() {
            warn!(
                "Failed to save best score to {}: {}",
                self.file.path().display(),
                err
            );
        }
    }
}

impl Drop for HighScore {
    fn drop(&mut self) {
        self.commit_or_warn();
    }
}

/// PreStartup system - acquires the save file before the session is built.
fn open_high_score(mut commands: Commands, settings: Res<Settings>) {
    let file = ScoreFile::new(settings.save_path.clone());
    info!("Using save file {}", file.path().display());
    commands.insert_resource(HighScore::open(file));
}

/// System to mirror the session's best score into the guard.
fn track_best_score(session: Res<Session>, mut high_score: ResMut<HighScore>) {
    if session.is_changed() && session.score.best > high_score.best() {
        high_score.observe(session.score.best);
    }
}

/// System to save as soon as a run ends.
fn save_on_game_over(
    mut game_over_reader: MessageReader<GameOverEvent>,
    mut high_score: ResMut<HighScore>,
) {
    for event in game_over_reader.read() {
        high_score.observe(event.best);
        high_score.commit_or_warn();
    }
}

/// System to save when the app is asked to exit.
fn save_on_exit(mut exit_reader: MessageReader<AppExit>, mut high_score: ResMut<HighScore>) {
    if exit_reader.read().last().is_some() {
        high_score.commit_or_warn();
    }
}
