// Player domain model: positions, tempo, roles, attribute records.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// The five on-court positions.
///
/// Serde tags match the CH 2K8 DRAM web tool's roster files exactly so
/// exported JSON round-trips between the two editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "Point Guard (PG)")]
    PointGuard,
    #[serde(rename = "Shooting Guard (SG)")]
    ShootingGuard,
    #[serde(rename = "Small Forward (SF)")]
    SmallForward,
    #[serde(rename = "Power Forward (PF)")]
    PowerForward,
    #[serde(rename = "Center (C)")]
    Center,
}

impl Position {
    /// Parse a position abbreviation ("PG", "sg", ...).
    pub fn from_abbrev(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PG" => Some(Position::PointGuard),
            "SG" => Some(Position::ShootingGuard),
            "SF" => Some(Position::SmallForward),
            "PF" => Some(Position::PowerForward),
            "C" => Some(Position::Center),
            _ => None,
        }
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            Position::PointGuard => "PG",
            Position::ShootingGuard => "SG",
            Position::SmallForward => "SF",
            Position::PowerForward => "PF",
            Position::Center => "C",
        }
    }

}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbrev())
    }
}

// ---------------------------------------------------------------------------
// TeamTempo
// ---------------------------------------------------------------------------

/// Roster-wide pace setting. One value per roster, not per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamTempo {
    #[serde(rename = "Very Slow (Grind it out)")]
    VerySlow,
    #[serde(rename = "Slow")]
    Slow,
    #[serde(rename = "Balanced")]
    Balanced,
    #[serde(rename = "Fast")]
    Fast,
    #[serde(rename = "Very Fast (Run and Gun)")]
    VeryFast,
}

impl TeamTempo {
    /// Parse a tempo keyword as typed at the prompt or in settings.toml.
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "veryslow" => Some(TeamTempo::VerySlow),
            "slow" => Some(TeamTempo::Slow),
            "balanced" => Some(TeamTempo::Balanced),
            "fast" => Some(TeamTempo::Fast),
            "veryfast" => Some(TeamTempo::VeryFast),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TeamTempo::VerySlow => "Very Slow (Grind it out)",
            TeamTempo::Slow => "Slow",
            TeamTempo::Balanced => "Balanced",
            TeamTempo::Fast => "Fast",
            TeamTempo::VeryFast => "Very Fast (Run and Gun)",
        }
    }
}

impl fmt::Display for TeamTempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// OffensiveRole
// ---------------------------------------------------------------------------

/// A player's place in the offensive pecking order. Stored on the player
/// (human-assigned); the ranking engine produces advisory suggestions of the
/// same type but never writes them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OffensiveRole {
    #[serde(rename = "1st Option")]
    First,
    #[serde(rename = "2nd Option")]
    Second,
    #[serde(rename = "3rd Option")]
    Third,
    #[serde(rename = "Role Player")]
    RolePlayer,
}

impl OffensiveRole {
    /// Parse a role keyword ("1", "2nd", "rp", "role", ...).
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "1" | "1st" | "first" => Some(OffensiveRole::First),
            "2" | "2nd" | "second" => Some(OffensiveRole::Second),
            "3" | "3rd" | "third" => Some(OffensiveRole::Third),
            "rp" | "role" | "roleplayer" => Some(OffensiveRole::RolePlayer),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OffensiveRole::First => "1st Option",
            OffensiveRole::Second => "2nd Option",
            OffensiveRole::Third => "3rd Option",
            OffensiveRole::RolePlayer => "Role Player",
        }
    }
}

impl fmt::Display for OffensiveRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Attribute names
// ---------------------------------------------------------------------------

/// The thirteen numeric ratings, addressable by name for the `set` command
/// and CSV import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Overall,
    CloseShot,
    Layup,
    Dunk,
    StandingDunk,
    MidRangeShot,
    ThreePointShot,
    FreeThrow,
    Handling,
    Passing,
    ShootInTraffic,
    ShootOffDribble,
    Consistency,
}

pub const ALL_ATTRIBUTES: [Attribute; 13] = [
    Attribute::Overall,
    Attribute::CloseShot,
    Attribute::Layup,
    Attribute::Dunk,
    Attribute::StandingDunk,
    Attribute::MidRangeShot,
    Attribute::ThreePointShot,
    Attribute::FreeThrow,
    Attribute::Handling,
    Attribute::Passing,
    Attribute::ShootInTraffic,
    Attribute::ShootOffDribble,
    Attribute::Consistency,
];

impl Attribute {
    /// Parse a camelCase attribute name (matching the roster file keys),
    /// case-insensitively.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "overall" => Some(Attribute::Overall),
            "closeshot" => Some(Attribute::CloseShot),
            "layup" => Some(Attribute::Layup),
            "dunk" => Some(Attribute::Dunk),
            "standingdunk" => Some(Attribute::StandingDunk),
            "midrangeshot" => Some(Attribute::MidRangeShot),
            "threepointshot" => Some(Attribute::ThreePointShot),
            "freethrow" => Some(Attribute::FreeThrow),
            "handling" => Some(Attribute::Handling),
            "passing" => Some(Attribute::Passing),
            "shootintraffic" => Some(Attribute::ShootInTraffic),
            "shootoffdribble" => Some(Attribute::ShootOffDribble),
            "consistency" => Some(Attribute::Consistency),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Overall => "overall",
            Attribute::CloseShot => "closeShot",
            Attribute::Layup => "layup",
            Attribute::Dunk => "dunk",
            Attribute::StandingDunk => "standingDunk",
            Attribute::MidRangeShot => "midRangeShot",
            Attribute::ThreePointShot => "threePointShot",
            Attribute::FreeThrow => "freeThrow",
            Attribute::Handling => "handling",
            Attribute::Passing => "passing",
            Attribute::ShootInTraffic => "shootInTraffic",
            Attribute::ShootOffDribble => "shootOffDribble",
            Attribute::Consistency => "consistency",
        }
    }

    /// Lowest editable value for this rating. Most ratings bottom out at 25;
    /// the situational ratings and consistency go to 0 (CH 2K8 allows true
    /// non-dunkers and pure-catch-and-shoot players).
    pub fn floor(&self) -> u8 {
        match self {
            Attribute::StandingDunk
            | Attribute::ShootInTraffic
            | Attribute::ShootOffDribble
            | Attribute::Consistency => 0,
            _ => 25,
        }
    }

    /// Highest editable value for every rating.
    pub fn ceiling(&self) -> u8 {
        99
    }

    /// Clamp a raw value into this rating's editable band.
    pub fn clamp(&self, value: i64) -> u8 {
        value.clamp(self.floor() as i64, self.ceiling() as i64) as u8
    }
}

// ---------------------------------------------------------------------------
// PlayerAttributes
// ---------------------------------------------------------------------------

/// An immutable snapshot of one player's ratings. Pure value, no identity.
///
/// Field names serialize in camelCase to match the web tool's roster files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAttributes {
    pub position: Position,
    pub offensive_role: OffensiveRole,
    pub overall: u8,
    pub close_shot: u8,
    pub layup: u8,
    pub dunk: u8,
    pub standing_dunk: u8,
    pub mid_range_shot: u8,
    pub three_point_shot: u8,
    pub free_throw: u8,
    pub handling: u8,
    pub passing: u8,
    pub shoot_in_traffic: u8,
    pub shoot_off_dribble: u8,
    pub consistency: u8,
}

impl PlayerAttributes {
    /// New-player form state: everything at the given rating, point guard,
    /// role player.
    pub fn with_default_rating(rating: u8) -> Self {
        PlayerAttributes {
            position: Position::PointGuard,
            offensive_role: OffensiveRole::RolePlayer,
            overall: rating,
            close_shot: rating,
            layup: rating,
            dunk: rating,
            standing_dunk: rating,
            mid_range_shot: rating,
            three_point_shot: rating,
            free_throw: rating,
            handling: rating,
            passing: rating,
            shoot_in_traffic: rating,
            shoot_off_dribble: rating,
            consistency: rating,
        }
    }

    pub fn get(&self, attr: Attribute) -> u8 {
        match attr {
            Attribute::Overall => self.overall,
            Attribute::CloseShot => self.close_shot,
            Attribute::Layup => self.layup,
            Attribute::Dunk => self.dunk,
            Attribute::StandingDunk => self.standing_dunk,
            Attribute::MidRangeShot => self.mid_range_shot,
            Attribute::ThreePointShot => self.three_point_shot,
            Attribute::FreeThrow => self.free_throw,
            Attribute::Handling => self.handling,
            Attribute::Passing => self.passing,
            Attribute::ShootInTraffic => self.shoot_in_traffic,
            Attribute::ShootOffDribble => self.shoot_off_dribble,
            Attribute::Consistency => self.consistency,
        }
    }

    /// Set a rating, clamping into the attribute's editable band.
    /// Returns the stored value.
    pub fn set(&mut self, attr: Attribute, value: i64) -> u8 {
        let clamped = attr.clamp(value);
        let slot = match attr {
            Attribute::Overall => &mut self.overall,
            Attribute::CloseShot => &mut self.close_shot,
            Attribute::Layup => &mut self.layup,
            Attribute::Dunk => &mut self.dunk,
            Attribute::StandingDunk => &mut self.standing_dunk,
            Attribute::MidRangeShot => &mut self.mid_range_shot,
            Attribute::ThreePointShot => &mut self.three_point_shot,
            Attribute::FreeThrow => &mut self.free_throw,
            Attribute::Handling => &mut self.handling,
            Attribute::Passing => &mut self.passing,
            Attribute::ShootInTraffic => &mut self.shoot_in_traffic,
            Attribute::ShootOffDribble => &mut self.shoot_off_dribble,
            Attribute::Consistency => &mut self.consistency,
        };
        *slot = clamped;
        clamped
    }
}

impl Default for PlayerAttributes {
    fn default() -> Self {
        PlayerAttributes::with_default_rating(75)
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A rostered player. Identity is `id`, assigned by the store at creation
/// and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub attributes: PlayerAttributes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_abbrev_roundtrip() {
        for pos in [
            Position::PointGuard,
            Position::ShootingGuard,
            Position::SmallForward,
            Position::PowerForward,
            Position::Center,
        ] {
            assert_eq!(Position::from_abbrev(pos.abbrev()), Some(pos));
        }
    }

    #[test]
    fn position_parse_case_insensitive() {
        assert_eq!(Position::from_abbrev("pg"), Some(Position::PointGuard));
        assert_eq!(Position::from_abbrev("Sf"), Some(Position::SmallForward));
        assert_eq!(Position::from_abbrev("c"), Some(Position::Center));
        assert_eq!(Position::from_abbrev("PF2"), None);
        assert_eq!(Position::from_abbrev(""), None);
    }

    #[test]
    fn position_serde_tags_match_web_tool() {
        let json = serde_json::to_string(&Position::PointGuard).unwrap();
        assert_eq!(json, "\"Point Guard (PG)\"");
        let parsed: Position = serde_json::from_str("\"Center (C)\"").unwrap();
        assert_eq!(parsed, Position::Center);
    }

    #[test]
    fn tempo_keywords() {
        assert_eq!(TeamTempo::from_keyword("very-slow"), Some(TeamTempo::VerySlow));
        assert_eq!(TeamTempo::from_keyword("Very Fast"), Some(TeamTempo::VeryFast));
        assert_eq!(TeamTempo::from_keyword("balanced"), Some(TeamTempo::Balanced));
        assert_eq!(TeamTempo::from_keyword("turbo"), None);
    }

    #[test]
    fn tempo_serde_tags_match_web_tool() {
        let json = serde_json::to_string(&TeamTempo::VerySlow).unwrap();
        assert_eq!(json, "\"Very Slow (Grind it out)\"");
        let json = serde_json::to_string(&TeamTempo::VeryFast).unwrap();
        assert_eq!(json, "\"Very Fast (Run and Gun)\"");
        let parsed: TeamTempo = serde_json::from_str("\"Slow\"").unwrap();
        assert_eq!(parsed, TeamTempo::Slow);
    }

    #[test]
    fn role_keywords() {
        assert_eq!(OffensiveRole::from_keyword("1"), Some(OffensiveRole::First));
        assert_eq!(OffensiveRole::from_keyword("2nd"), Some(OffensiveRole::Second));
        assert_eq!(OffensiveRole::from_keyword("third"), Some(OffensiveRole::Third));
        assert_eq!(OffensiveRole::from_keyword("rp"), Some(OffensiveRole::RolePlayer));
        assert_eq!(OffensiveRole::from_keyword("4th"), None);
    }

    #[test]
    fn role_serde_tags_match_web_tool() {
        assert_eq!(
            serde_json::to_string(&OffensiveRole::First).unwrap(),
            "\"1st Option\""
        );
        assert_eq!(
            serde_json::to_string(&OffensiveRole::RolePlayer).unwrap(),
            "\"Role Player\""
        );
        let parsed: OffensiveRole = serde_json::from_str("\"3rd Option\"").unwrap();
        assert_eq!(parsed, OffensiveRole::Third);
    }

    #[test]
    fn attribute_name_roundtrip() {
        for attr in ALL_ATTRIBUTES {
            assert_eq!(Attribute::from_name(attr.name()), Some(attr));
        }
        assert_eq!(Attribute::from_name("CLOSESHOT"), Some(Attribute::CloseShot));
        assert_eq!(Attribute::from_name("vertical"), None);
    }

    #[test]
    fn attribute_floors() {
        assert_eq!(Attribute::Overall.floor(), 25);
        assert_eq!(Attribute::Dunk.floor(), 25);
        assert_eq!(Attribute::StandingDunk.floor(), 0);
        assert_eq!(Attribute::ShootInTraffic.floor(), 0);
        assert_eq!(Attribute::ShootOffDribble.floor(), 0);
        assert_eq!(Attribute::Consistency.floor(), 0);
    }

    #[test]
    fn attribute_clamp_respects_band() {
        assert_eq!(Attribute::Layup.clamp(10), 25);
        assert_eq!(Attribute::Layup.clamp(150), 99);
        assert_eq!(Attribute::Layup.clamp(60), 60);
        assert_eq!(Attribute::Consistency.clamp(-5), 0);
        assert_eq!(Attribute::Consistency.clamp(10), 10);
    }

    #[test]
    fn get_set_every_attribute() {
        let mut attrs = PlayerAttributes::default();
        for (i, attr) in ALL_ATTRIBUTES.iter().enumerate() {
            let stored = attrs.set(*attr, 40 + i as i64);
            assert_eq!(stored, 40 + i as u8);
            assert_eq!(attrs.get(*attr), 40 + i as u8);
        }
    }

    #[test]
    fn set_clamps_below_floor() {
        let mut attrs = PlayerAttributes::default();
        assert_eq!(attrs.set(Attribute::Dunk, 3), 25);
        assert_eq!(attrs.set(Attribute::StandingDunk, 3), 3);
    }

    #[test]
    fn attributes_serialize_camel_case() {
        let attrs = PlayerAttributes::default();
        let json = serde_json::to_value(&attrs).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("closeShot"));
        assert!(obj.contains_key("midRangeShot"));
        assert!(obj.contains_key("threePointShot"));
        assert!(obj.contains_key("standingDunk"));
        assert!(obj.contains_key("shootInTraffic"));
        assert!(obj.contains_key("shootOffDribble"));
        assert!(obj.contains_key("offensiveRole"));
        assert!(!obj.contains_key("close_shot"));
    }

    #[test]
    fn player_deserializes_web_tool_record() {
        let json = r#"{
            "id": "2f9d8a1c",
            "name": "Test Guard",
            "attributes": {
                "position": "Shooting Guard (SG)",
                "offensiveRole": "2nd Option",
                "overall": 88, "closeShot": 80, "layup": 85, "dunk": 82,
                "standingDunk": 40, "midRangeShot": 87, "threePointShot": 90,
                "freeThrow": 84, "handling": 86, "passing": 78,
                "shootInTraffic": 70, "shootOffDribble": 88, "consistency": 81
            }
        }"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.id, "2f9d8a1c");
        assert_eq!(player.attributes.position, Position::ShootingGuard);
        assert_eq!(player.attributes.offensive_role, OffensiveRole::Second);
        assert_eq!(player.attributes.three_point_shot, 90);
        assert_eq!(player.attributes.standing_dunk, 40);
    }

    #[test]
    fn default_attributes_are_all_75() {
        let attrs = PlayerAttributes::default();
        for attr in ALL_ATTRIBUTES {
            assert_eq!(attrs.get(attr), 75, "{} should default to 75", attr.name());
        }
        assert_eq!(attrs.position, Position::PointGuard);
        assert_eq!(attrs.offensive_role, OffensiveRole::RolePlayer);
    }
}
