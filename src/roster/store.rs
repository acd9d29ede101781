// Roster collection: player ownership, id assignment, JSON persistence,
// CSV import.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::player::{
    Attribute, OffensiveRole, Player, PlayerAttributes, Position, TeamTempo,
};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid roster file {path}: {source}")]
    Format {
        path: String,
        source: serde_json::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("no player with id `{0}`")]
    UnknownPlayer(String),
}

// ---------------------------------------------------------------------------
// On-disk format
// ---------------------------------------------------------------------------

/// Roster file layout, shared with the CH 2K8 DRAM web tool:
/// `{"teamTempo": ..., "players": [...]}`. The `savedAt` stamp is our own
/// addition; the web tool ignores unknown fields and so do we on import.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RosterFile {
    team_tempo: TeamTempo,
    players: Vec<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// The owning collection of players plus the roster-wide tempo setting.
/// The only authoritative copy of every `Player`; engines receive borrows.
#[derive(Debug, Clone)]
pub struct Roster {
    pub team_tempo: TeamTempo,
    players: Vec<Player>,
    /// Monotonic counter for minting ids. Never reset, so a removed
    /// player's id is not reused within a session.
    next_id: u64,
}

impl Roster {
    pub fn new(team_tempo: TeamTempo) -> Self {
        Roster {
            team_tempo,
            players: Vec::new(),
            next_id: 1,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Mint an id no current player holds. Imported rosters may carry
    /// foreign ids (the web tool uses UUIDs), so each candidate is checked.
    fn mint_id(&mut self) -> String {
        loop {
            let candidate = format!("p{}", self.next_id);
            self.next_id += 1;
            if self.get(&candidate).is_none() {
                return candidate;
            }
        }
    }

    /// Add a player with a freshly assigned id; returns the id.
    pub fn add_player(&mut self, name: &str, attributes: PlayerAttributes) -> String {
        let id = self.mint_id();
        self.players.push(Player {
            id: id.clone(),
            name: name.to_string(),
            attributes,
        });
        id
    }

    pub fn remove_player(&mut self, id: &str) -> Result<Player, StoreError> {
        match self.players.iter().position(|p| p.id == id) {
            Some(idx) => Ok(self.players.remove(idx)),
            None => Err(StoreError::UnknownPlayer(id.to_string())),
        }
    }

    // -----------------------------------------------------------------------
    // JSON persistence
    // -----------------------------------------------------------------------

    /// Write the roster as pretty-printed JSON in the shared file format,
    /// stamped with the current time.
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        let file = RosterFile {
            team_tempo: self.team_tempo,
            players: self.players.clone(),
            saved_at: Some(Utc::now()),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| StoreError::Format {
            path: path.display().to_string(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| StoreError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Load a roster file, accepting both this tool's exports and the web
    /// tool's. Malformed files are rejected here, at the boundary; the
    /// engines never re-validate.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        let text = std::fs::read_to_string(path).map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let file: RosterFile = serde_json::from_str(&text).map_err(|e| StoreError::Format {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Roster {
            team_tempo: file.team_tempo,
            players: file.players,
            next_id: 1,
        })
    }

    // -----------------------------------------------------------------------
    // CSV import
    // -----------------------------------------------------------------------

    /// Import players from a CSV file (header row: name, position,
    /// offensiveRole, then the thirteen rating columns in camelCase).
    /// Malformed rows are skipped with a warning; ratings are clamped to
    /// each attribute's editable band. Returns the number imported.
    pub fn import_players_csv(&mut self, path: &Path) -> Result<usize, StoreError> {
        let file = std::fs::File::open(path).map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        self.import_players_from_reader(file)
            .map_err(|e| StoreError::Csv {
                path: path.display().to_string(),
                source: e,
            })
    }

    fn import_players_from_reader<R: Read>(&mut self, rdr: R) -> Result<usize, csv::Error> {
        let mut reader = csv::Reader::from_reader(rdr);
        let mut imported = 0;
        for result in reader.deserialize::<RawCsvPlayer>() {
            let raw = match result {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("skipping malformed player row: {e}");
                    continue;
                }
            };
            let name = raw.name.trim();
            if name.is_empty() {
                warn!("skipping player row with empty name");
                continue;
            }
            let Some(position) = Position::from_abbrev(raw.position.trim()) else {
                warn!("skipping player '{name}': unknown position '{}'", raw.position);
                continue;
            };
            let offensive_role = match raw.offensive_role.as_deref().map(str::trim) {
                None | Some("") => OffensiveRole::RolePlayer,
                Some(s) => match OffensiveRole::from_keyword(s) {
                    Some(role) => role,
                    None => {
                        warn!("skipping player '{name}': unknown role '{s}'");
                        continue;
                    }
                },
            };

            let attributes = PlayerAttributes {
                position,
                offensive_role,
                overall: Attribute::Overall.clamp(raw.overall),
                close_shot: Attribute::CloseShot.clamp(raw.close_shot),
                layup: Attribute::Layup.clamp(raw.layup),
                dunk: Attribute::Dunk.clamp(raw.dunk),
                standing_dunk: Attribute::StandingDunk.clamp(raw.standing_dunk),
                mid_range_shot: Attribute::MidRangeShot.clamp(raw.mid_range_shot),
                three_point_shot: Attribute::ThreePointShot.clamp(raw.three_point_shot),
                free_throw: Attribute::FreeThrow.clamp(raw.free_throw),
                handling: Attribute::Handling.clamp(raw.handling),
                passing: Attribute::Passing.clamp(raw.passing),
                shoot_in_traffic: Attribute::ShootInTraffic.clamp(raw.shoot_in_traffic),
                shoot_off_dribble: Attribute::ShootOffDribble.clamp(raw.shoot_off_dribble),
                consistency: Attribute::Consistency.clamp(raw.consistency),
            };

            self.add_player(name, attributes);
            imported += 1;
        }
        Ok(imported)
    }
}

/// CSV row as written by spreadsheet exports. Ratings are i64 so wildly
/// out-of-band numbers deserialize and get clamped rather than erroring.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCsvPlayer {
    name: String,
    position: String,
    #[serde(default)]
    offensive_role: Option<String>,
    overall: i64,
    close_shot: i64,
    layup: i64,
    dunk: i64,
    standing_dunk: i64,
    mid_range_shot: i64,
    three_point_shot: i64,
    free_throw: i64,
    handling: i64,
    passing: i64,
    shoot_in_traffic: i64,
    shoot_off_dribble: i64,
    consistency: i64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
