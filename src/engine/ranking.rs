// Role ranking engine: composite offensive talent score and suggested roles.

use std::collections::HashMap;

use crate::roster::player::{OffensiveRole, Player, PlayerAttributes};

/// Offensive Talent Score: a single composite number for ranking players.
///
/// 40% overall, 30% scoring prowess (mean of the three shot ratings),
/// 20% shot creation (mean of handling and shootOffDribble), 10% consistency.
pub fn offensive_talent_score(attributes: &PlayerAttributes) -> f64 {
    let overall_talent = attributes.overall as f64 * 0.4;
    let scoring_prowess = (attributes.close_shot as f64
        + attributes.mid_range_shot as f64
        + attributes.three_point_shot as f64)
        / 3.0
        * 0.3;
    let shot_creation =
        (attributes.handling as f64 + attributes.shoot_off_dribble as f64) / 2.0 * 0.2;
    let reliability = attributes.consistency as f64 * 0.1;

    overall_talent + scoring_prowess + shot_creation + reliability
}

/// Rank a roster by OTS and suggest an offensive role per player.
///
/// The top three players get 1st/2nd/3rd Option; everyone else is a Role
/// Player. Returns a fresh id -> role map; the suggestion is advisory and is
/// never written back onto the players' stored roles.
///
/// Ties in OTS keep original roster order (stable sort) -- this is part of
/// the contract, so recomputing from the same roster always yields the same
/// mapping.
pub fn suggest_roles(players: &[Player]) -> HashMap<String, OffensiveRole> {
    let mut scored: Vec<(&str, f64)> = players
        .iter()
        .map(|p| (p.id.as_str(), offensive_talent_score(&p.attributes)))
        .collect();

    // Vec::sort_by is stable; equal scores stay in roster order.
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    scored
        .into_iter()
        .enumerate()
        .map(|(rank, (id, _))| {
            let role = match rank {
                0 => OffensiveRole::First,
                1 => OffensiveRole::Second,
                2 => OffensiveRole::Third,
                _ => OffensiveRole::RolePlayer,
            };
            (id.to_string(), role)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::player::Attribute;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    /// Player whose OTS is exactly its flat rating (all terms equal).
    fn flat_player(id: &str, rating: u8) -> Player {
        Player {
            id: id.to_string(),
            name: format!("Player {id}"),
            attributes: PlayerAttributes::with_default_rating(rating),
        }
    }

    #[test]
    fn ots_known_value() {
        let mut attrs = PlayerAttributes::default();
        attrs.set(Attribute::Overall, 90);
        attrs.set(Attribute::CloseShot, 80);
        attrs.set(Attribute::MidRangeShot, 85);
        attrs.set(Attribute::ThreePointShot, 75);
        attrs.set(Attribute::Handling, 70);
        attrs.set(Attribute::ShootOffDribble, 90);
        attrs.set(Attribute::Consistency, 60);

        // 0.4*90 + 0.3*(80+85+75)/3 + 0.2*(70+90)/2 + 0.1*60
        // = 36 + 24 + 16 + 6 = 82
        let ots = offensive_talent_score(&attrs);
        assert!(approx_eq(ots, 82.0, 1e-9), "got {ots}");
    }

    #[test]
    fn ots_of_flat_ratings_equals_the_rating() {
        for rating in [25u8, 60, 75, 99] {
            let ots = offensive_talent_score(&PlayerAttributes::with_default_rating(rating));
            assert!(approx_eq(ots, rating as f64, 1e-9));
        }
    }

    #[test]
    fn empty_roster_yields_empty_map() {
        assert!(suggest_roles(&[]).is_empty());
    }

    #[test]
    fn four_players_ranked_by_ots() {
        // OTS equals the flat rating, so scores are [80, 75, 70, 60].
        // Shuffle input order to prove order independence.
        let players = vec![
            flat_player("c", 70),
            flat_player("a", 80),
            flat_player("d", 60),
            flat_player("b", 75),
        ];
        let roles = suggest_roles(&players);
        assert_eq!(roles.len(), 4);
        assert_eq!(roles["a"], OffensiveRole::First);
        assert_eq!(roles["b"], OffensiveRole::Second);
        assert_eq!(roles["c"], OffensiveRole::Third);
        assert_eq!(roles["d"], OffensiveRole::RolePlayer);
    }

    #[test]
    fn top_three_roles_assigned_exactly_once() {
        let players: Vec<Player> = (0..8)
            .map(|i| flat_player(&format!("p{i}"), 90 - i as u8 * 5))
            .collect();
        let roles = suggest_roles(&players);

        for role in [
            OffensiveRole::First,
            OffensiveRole::Second,
            OffensiveRole::Third,
        ] {
            assert_eq!(roles.values().filter(|&&r| r == role).count(), 1);
        }
        assert_eq!(
            roles
                .values()
                .filter(|&&r| r == OffensiveRole::RolePlayer)
                .count(),
            5
        );
    }

    #[test]
    fn small_rosters_fill_ranks_top_down() {
        let one = suggest_roles(&[flat_player("only", 70)]);
        assert_eq!(one["only"], OffensiveRole::First);

        let two = suggest_roles(&[flat_player("lo", 60), flat_player("hi", 80)]);
        assert_eq!(two["hi"], OffensiveRole::First);
        assert_eq!(two["lo"], OffensiveRole::Second);
    }

    #[test]
    fn ties_keep_roster_order() {
        let players = vec![
            flat_player("first_in", 75),
            flat_player("second_in", 75),
            flat_player("third_in", 75),
            flat_player("fourth_in", 75),
        ];
        let roles = suggest_roles(&players);
        assert_eq!(roles["first_in"], OffensiveRole::First);
        assert_eq!(roles["second_in"], OffensiveRole::Second);
        assert_eq!(roles["third_in"], OffensiveRole::Third);
        assert_eq!(roles["fourth_in"], OffensiveRole::RolePlayer);
    }

    #[test]
    fn recomputation_is_deterministic() {
        let players: Vec<Player> = (0..6)
            .map(|i| flat_player(&format!("p{i}"), 60 + (i as u8 * 7) % 30))
            .collect();
        assert_eq!(suggest_roles(&players), suggest_roles(&players));
    }

    #[test]
    fn suggestions_never_touch_stored_roles() {
        let players = vec![flat_player("star", 95), flat_player("bench", 40)];
        let before: Vec<OffensiveRole> = players
            .iter()
            .map(|p| p.attributes.offensive_role)
            .collect();
        let roles = suggest_roles(&players);
        assert_eq!(roles["star"], OffensiveRole::First);
        let after: Vec<OffensiveRole> = players
            .iter()
            .map(|p| p.attributes.offensive_role)
            .collect();
        assert_eq!(before, after);
    }
}
