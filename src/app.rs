// Interactive roster editor: command dispatch over the store and engines.
//
// The app owns the only mutable state (the roster). Every display command
// recomputes role suggestions and tendencies from scratch -- nothing is
// cached, so edits are always reflected immediately.

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::config::Settings;
use crate::engine::ranking::{offensive_talent_score, suggest_roles};
use crate::engine::tendency::compute_tendencies;
use crate::roster::player::{
    Attribute, OffensiveRole, PlayerAttributes, Position, TeamTempo,
};
use crate::roster::store::Roster;

/// Whether the loop should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

pub struct App {
    settings: Settings,
    pub roster: Roster,
    /// Set on any mutation; cleared on save. Drives the autosave on quit.
    dirty: bool,
}

impl App {
    pub fn new(settings: Settings, roster: Roster) -> Self {
        App {
            settings,
            roster,
            dirty: false,
        }
    }

    /// Dispatch one line of input. Returns the loop outcome and the text to
    /// print (possibly multi-line, never a trailing newline).
    pub fn handle_line(&mut self, line: &str) -> (Outcome, String) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return (Outcome::Continue, String::new());
        }
        let (cmd, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (trimmed, ""),
        };

        let out = match cmd.to_lowercase().as_str() {
            "help" => help_text(),
            "list" => self.cmd_list(),
            "show" => self.cmd_show(rest),
            "add" => self.cmd_add(rest),
            "set" => self.cmd_set(rest),
            "pos" => self.cmd_pos(rest),
            "role" => self.cmd_role(rest),
            "tempo" => self.cmd_tempo(rest),
            "remove" => self.cmd_remove(rest),
            "export" => self.cmd_export(rest),
            "import" => self.cmd_import(rest),
            "import-csv" => self.cmd_import_csv(rest),
            "save" => self.cmd_save(),
            "quit" | "exit" | "q" => return (Outcome::Quit, String::new()),
            other => format!("unknown command `{other}` (try `help`)"),
        };
        (Outcome::Continue, out)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the roster to the configured autosave path.
    pub fn save(&mut self) -> Result<(), crate::roster::store::StoreError> {
        self.roster.save_to(Path::new(&self.settings.roster_path))?;
        self.dirty = false;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Display commands
    // -----------------------------------------------------------------------

    fn cmd_list(&self) -> String {
        if self.roster.is_empty() {
            return format!(
                "roster is empty (tempo: {})\nadd players with `add <name>`",
                self.roster.team_tempo
            );
        }

        let suggestions = suggest_roles(self.roster.players());
        let mut out = format!(
            "tempo: {}\n{:<6} {:<20} {:<4} {:<12} {:>5}  {:<12} CLS MID 3PT DRV",
            self.roster.team_tempo, "id", "name", "pos", "role", "OTS", "suggested"
        );
        for player in self.roster.players() {
            let t = compute_tendencies(&player.attributes, self.roster.team_tempo);
            let ots = offensive_talent_score(&player.attributes);
            let suggested = suggestions
                .get(&player.id)
                .map(|r| r.label())
                .unwrap_or("-");
            out.push_str(&format!(
                "\n{:<6} {:<20} {:<4} {:<12} {:>5.1}  {:<12} {:>3} {:>3} {:>3} {:>3}",
                player.id,
                truncate(&player.name, 20),
                player.attributes.position.abbrev(),
                player.attributes.offensive_role.label(),
                ots,
                suggested,
                t.close_shot.value,
                t.mid_range_shot.value,
                t.three_point_shot.value,
                t.drive_the_lane.value,
            ));
        }
        out
    }

    fn cmd_show(&self, id: &str) -> String {
        let Some(player) = self.roster.get(id) else {
            return format!("no player with id `{id}`");
        };
        let t = compute_tendencies(&player.attributes, self.roster.team_tempo);
        format!(
            "{} ({}, {})\n  Close Shot:  {}\n  Mid-Range:   {}\n  Three-Point: {}\n  Drive Lane:  {}",
            player.name,
            player.attributes.position.abbrev(),
            player.attributes.offensive_role,
            t.close_shot.breakdown,
            t.mid_range_shot.breakdown,
            t.three_point_shot.breakdown,
            t.drive_the_lane.breakdown,
        )
    }

    // -----------------------------------------------------------------------
    // Mutation commands
    // -----------------------------------------------------------------------

    fn cmd_add(&mut self, name: &str) -> String {
        if name.is_empty() {
            return "usage: add <name>".into();
        }
        let attrs = PlayerAttributes::with_default_rating(self.settings.default_rating);
        let id = self.roster.add_player(name, attrs);
        self.dirty = true;
        info!("added player {id} ({name})");
        format!("added {name} as {id}")
    }

    fn cmd_set(&mut self, rest: &str) -> String {
        let parts: Vec<&str> = rest.split_whitespace().collect();
        let &[id, attr_name, value] = parts.as_slice() else {
            return "usage: set <id> <attribute> <value>".into();
        };
        let Some(attr) = Attribute::from_name(attr_name) else {
            return format!("unknown attribute `{attr_name}`");
        };
        let Ok(value) = value.parse::<i64>() else {
            return format!("`{value}` is not a number");
        };
        let Some(player) = self.roster.get_mut(id) else {
            return format!("no player with id `{id}`");
        };
        let stored = player.attributes.set(attr, value);
        self.dirty = true;
        if i64::from(stored) == value {
            format!("{id}: {} = {stored}", attr.name())
        } else {
            format!(
                "{id}: {} = {stored} (clamped to {}-{})",
                attr.name(),
                attr.floor(),
                attr.ceiling()
            )
        }
    }

    fn cmd_pos(&mut self, rest: &str) -> String {
        let parts: Vec<&str> = rest.split_whitespace().collect();
        let &[id, pos_str] = parts.as_slice() else {
            return "usage: pos <id> <PG|SG|SF|PF|C>".into();
        };
        let Some(pos) = Position::from_abbrev(pos_str) else {
            return format!("unknown position `{pos_str}`");
        };
        let Some(player) = self.roster.get_mut(id) else {
            return format!("no player with id `{id}`");
        };
        player.attributes.position = pos;
        self.dirty = true;
        format!("{id}: position = {pos}")
    }

    fn cmd_role(&mut self, rest: &str) -> String {
        let parts: Vec<&str> = rest.split_whitespace().collect();
        let &[id, role_str] = parts.as_slice() else {
            return "usage: role <id> <1|2|3|rp>".into();
        };
        let Some(role) = OffensiveRole::from_keyword(role_str) else {
            return format!("unknown role `{role_str}`");
        };
        let Some(player) = self.roster.get_mut(id) else {
            return format!("no player with id `{id}`");
        };
        player.attributes.offensive_role = role;
        self.dirty = true;
        format!("{id}: role = {role}")
    }

    fn cmd_tempo(&mut self, rest: &str) -> String {
        if rest.is_empty() {
            return format!("tempo: {}", self.roster.team_tempo);
        }
        let Some(tempo) = TeamTempo::from_keyword(rest) else {
            return format!(
                "unknown tempo `{rest}` (very-slow, slow, balanced, fast, very-fast)"
            );
        };
        self.roster.team_tempo = tempo;
        self.dirty = true;
        format!("tempo = {tempo}")
    }

    fn cmd_remove(&mut self, id: &str) -> String {
        if id.is_empty() {
            return "usage: remove <id>".into();
        }
        match self.roster.remove_player(id) {
            Ok(player) => {
                self.dirty = true;
                info!("removed player {id} ({})", player.name);
                format!("removed {} ({id})", player.name)
            }
            Err(e) => e.to_string(),
        }
    }

    // -----------------------------------------------------------------------
    // File commands
    // -----------------------------------------------------------------------

    fn cmd_export(&self, path: &str) -> String {
        if path.is_empty() {
            return "usage: export <path>".into();
        }
        match self.roster.save_to(Path::new(path)) {
            Ok(()) => format!("exported {} players to {path}", self.roster.len()),
            Err(e) => {
                warn!("export failed: {e}");
                format!("export failed: {e}")
            }
        }
    }

    fn cmd_import(&mut self, path: &str) -> String {
        if path.is_empty() {
            return "usage: import <path>".into();
        }
        match Roster::load_from(Path::new(path)) {
            Ok(roster) => {
                self.roster = roster;
                self.dirty = true;
                format!(
                    "imported {} players (tempo: {})",
                    self.roster.len(),
                    self.roster.team_tempo
                )
            }
            Err(e) => {
                warn!("import failed: {e}");
                format!("import failed: {e}")
            }
        }
    }

    fn cmd_import_csv(&mut self, path: &str) -> String {
        if path.is_empty() {
            return "usage: import-csv <path>".into();
        }
        match self.roster.import_players_csv(Path::new(path)) {
            Ok(count) => {
                self.dirty = true;
                format!("imported {count} players from {path}")
            }
            Err(e) => {
                warn!("csv import failed: {e}");
                format!("csv import failed: {e}")
            }
        }
    }

    fn cmd_save(&mut self) -> String {
        match self.save() {
            Ok(()) => format!("saved to {}", self.settings.roster_path),
            Err(e) => {
                warn!("save failed: {e}");
                format!("save failed: {e}")
            }
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max - 1).chain(std::iter::once('~')).collect()
    }
}

fn help_text() -> String {
    "commands:\n\
     \x20 list                      roster table with OTS, suggested roles, tendencies\n\
     \x20 show <id>                 full tendency breakdowns for one player\n\
     \x20 add <name>                add a player with default ratings\n\
     \x20 set <id> <attr> <value>   set a rating (camelCase name, e.g. closeShot)\n\
     \x20 pos <id> <PG|SG|SF|PF|C>  set position\n\
     \x20 role <id> <1|2|3|rp>      set assigned offensive role\n\
     \x20 tempo [value]             show or set team tempo\n\
     \x20 remove <id>               remove a player\n\
     \x20 export <path>             write roster JSON\n\
     \x20 import <path>             replace roster from JSON\n\
     \x20 import-csv <path>         add players from a CSV sheet\n\
     \x20 save                      save to the configured roster path\n\
     \x20 quit                      save if dirty, then exit"
        .into()
}

/// Run the blocking prompt loop until the user quits. Saves on exit when
/// there are unsaved edits.
pub fn run(app: &mut App) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    writeln!(stdout, "DRAM roster assistant (type `help` for commands)")?;
    loop {
        write!(stdout, "dram> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let (outcome, output) = app.handle_line(&line);
        if !output.is_empty() {
            writeln!(stdout, "{output}")?;
        }
        if outcome == Outcome::Quit {
            break;
        }
    }

    if app.is_dirty() {
        app.save()?;
        writeln!(stdout, "saved")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
