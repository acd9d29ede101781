// Tendency engine: shot-tendency scores from attributes and team tempo.
//
// Implements the DRAM formula: per-category base average, additive tier
// modifiers (ASM plus FM or SM), then three multiplicative factors (OHM,
// CWF, STM), clamped to 0..=99. Every score carries a textual breakdown of
// the terms that produced it.

use crate::roster::player::{OffensiveRole, PlayerAttributes, TeamTempo};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One tendency score plus the ordered trace of every term that produced it.
/// The breakdown is an explanation artifact; nothing downstream parses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TendencyCalculation {
    pub value: u8,
    pub breakdown: String,
}

/// All four tendency scores for one player. Recomputed fresh on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatedTendencies {
    pub close_shot: TendencyCalculation,
    pub mid_range_shot: TendencyCalculation,
    pub three_point_shot: TendencyCalculation,
    pub drive_the_lane: TendencyCalculation,
}

// ---------------------------------------------------------------------------
// Additive modifiers
// ---------------------------------------------------------------------------

/// Attribute Scaling Modifier: additive bonus/penalty from the category's
/// primary rating tier.
pub fn attribute_scaling_modifier(rating: u8) -> i32 {
    if rating >= 90 {
        20
    } else if rating >= 80 {
        10
    } else if rating >= 70 {
        0
    } else if rating >= 60 {
        -10
    } else if rating >= 50 {
        -20
    } else {
        -30
    }
}

/// Finishing Modifier, driven by shootInTraffic. Applies to the close-shot
/// and drive-the-lane categories.
pub fn finishing_modifier(shoot_in_traffic: u8) -> i32 {
    if shoot_in_traffic >= 90 {
        15
    } else if shoot_in_traffic >= 80 {
        8
    } else if shoot_in_traffic < 70 {
        -10
    } else {
        0
    }
}

/// Shooting Modifier, driven by shootOffDribble. Applies to the mid-range
/// and three-point categories. Same tiers as the Finishing Modifier.
pub fn shooting_modifier(shoot_off_dribble: u8) -> i32 {
    if shoot_off_dribble >= 90 {
        15
    } else if shoot_off_dribble >= 80 {
        8
    } else if shoot_off_dribble < 70 {
        -10
    } else {
        0
    }
}

// ---------------------------------------------------------------------------
// Multiplicative factors
// ---------------------------------------------------------------------------

/// Offensive Hierarchy Multiplier from the player's assigned role.
pub fn offensive_hierarchy_multiplier(role: OffensiveRole) -> f64 {
    match role {
        OffensiveRole::First => 1.15,
        OffensiveRole::Second => 1.05,
        OffensiveRole::Third => 0.95,
        OffensiveRole::RolePlayer => 0.80,
    }
}

/// Consistency Weighting Factor.
///
/// The published DRAM formula lists a 1.00 default band for 60-79, but its
/// branch order puts every rating >= 60 into the 0.95 tier first, so the
/// default never fires. Kept as published; "fixing" it would shift every
/// mid-consistency tendency.
pub fn consistency_weighting_factor(consistency: u8) -> f64 {
    if consistency >= 90 {
        1.10
    } else if consistency >= 80 {
        1.05
    } else if consistency >= 60 {
        0.95
    } else {
        0.90
    }
}

/// System Tempo Modifier from the roster-wide pace setting.
pub fn system_tempo_modifier(tempo: TeamTempo) -> f64 {
    match tempo {
        TeamTempo::VerySlow => 0.85,
        TeamTempo::Slow => 0.95,
        TeamTempo::Balanced => 1.00,
        TeamTempo::Fast => 1.05,
        TeamTempo::VeryFast => 1.10,
    }
}

// ---------------------------------------------------------------------------
// Per-category calculation
// ---------------------------------------------------------------------------

fn mean4(a: u8, b: u8, c: u8, d: u8) -> f64 {
    (a as f64 + b as f64 + c as f64 + d as f64) / 4.0
}

/// Compute one tendency score and its breakdown. `situ_label` names which
/// situational modifier ("FM" or "SM") applies to this category.
fn single_tendency(
    base: f64,
    asm: i32,
    situ: i32,
    situ_label: &str,
    ohm: f64,
    cwf: f64,
    stm: f64,
) -> TendencyCalculation {
    let pre_multiplied = base + asm as f64 + situ as f64;
    let final_value = pre_multiplied * (ohm * cwf) * stm;
    // Clamp before rounding; round() is half-away-from-zero, which equals
    // half-up on the clamped non-negative range.
    let capped = final_value.clamp(0.0, 99.0).round() as u8;

    let breakdown = format!(
        "Base: {base:.1}, ASM: {asm:+}, {situ_label}: {situ:+}, \
         OHM: x{ohm:.2}, CWF: x{cwf:.2}, STM: x{stm:.2} => Final: {capped}"
    );

    TendencyCalculation {
        value: capped,
        breakdown,
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Compute all four shot tendencies for one player.
///
/// Pure and total: every attribute combination produces a value; bounds on
/// the inputs are the caller's responsibility and are not re-checked here.
pub fn compute_tendencies(
    attributes: &PlayerAttributes,
    tempo: TeamTempo,
) -> CalculatedTendencies {
    let ohm = offensive_hierarchy_multiplier(attributes.offensive_role);
    let cwf = consistency_weighting_factor(attributes.consistency);
    let stm = system_tempo_modifier(tempo);
    let fm = finishing_modifier(attributes.shoot_in_traffic);
    let sm = shooting_modifier(attributes.shoot_off_dribble);

    // Close shot: finishing package around the rim, keyed on closeShot.
    let close_base = mean4(
        attributes.close_shot,
        attributes.layup,
        attributes.dunk,
        attributes.standing_dunk,
    );
    let close_shot = single_tendency(
        close_base,
        attribute_scaling_modifier(attributes.close_shot),
        fm,
        "FM",
        ohm,
        cwf,
        stm,
    );

    // Mid-range and three-point: the rating alone is the base.
    let mid_range_shot = single_tendency(
        attributes.mid_range_shot as f64,
        attribute_scaling_modifier(attributes.mid_range_shot),
        sm,
        "SM",
        ohm,
        cwf,
        stm,
    );

    let three_point_shot = single_tendency(
        attributes.three_point_shot as f64,
        attribute_scaling_modifier(attributes.three_point_shot),
        sm,
        "SM",
        ohm,
        cwf,
        stm,
    );

    // Drive the lane: rim finishing plus ball skills, still keyed on closeShot.
    let drive_base = mean4(
        attributes.close_shot,
        attributes.layup,
        attributes.handling,
        attributes.passing,
    );
    let drive_the_lane = single_tendency(
        drive_base,
        attribute_scaling_modifier(attributes.close_shot),
        fm,
        "FM",
        ohm,
        cwf,
        stm,
    );

    CalculatedTendencies {
        close_shot,
        mid_range_shot,
        three_point_shot,
        drive_the_lane,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
