//! Shot value by zone, zone usage, and zone leaders.
//!
//! Backcourt heaves are excluded unless the caller asks for them; they
//! distort points per shot without saying anything about shot selection.

use bulls_common::{round1, FieldValue, PlayerId, ShotRecord, ShotZone, Tabular};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Zones counted as high value when the caller does not choose.
pub const DEFAULT_HIGH_VALUE_ZONES: [ShotZone; 4] = [
    ShotZone::RestrictedArea,
    ShotZone::LeftCorner3,
    ShotZone::RightCorner3,
    ShotZone::AboveTheBreak3,
];

/// Points produced per attempt over a set of shots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotValue {
    /// Points per shot
    pub pps: f64,
    /// Points scored
    pub total_points: u32,
    /// Attempts
    pub total_shots: usize,
    /// Makes
    pub made: usize,
    /// Field goal percentage, one decimal
    pub fg_pct: f64,
}

impl ShotValue {
    fn from_shots<'a>(shots: impl IntoIterator<Item = &'a ShotRecord>) -> Option<Self> {
        let (mut total_points, mut total_shots, mut made) = (0_u32, 0_usize, 0_usize);
        for shot in shots {
            total_points += shot.points();
            total_shots += 1;
            made += usize::from(shot.made);
        }
        if total_shots == 0 {
            return None;
        }
        Some(Self {
            pps: f64::from(total_points) / total_shots as f64,
            total_points,
            total_shots,
            made,
            fg_pct: round1(made as f64 / total_shots as f64 * 100.0),
        })
    }
}

fn kept(shots: &[ShotRecord], exclude_backcourt: bool) -> impl Iterator<Item = &ShotRecord> {
    shots
        .iter()
        .filter(move |shot| !(exclude_backcourt && shot.zone.is_backcourt()))
}

/// Overall shot value. Returns `None` when no shots remain.
#[must_use]
pub fn points_per_shot(shots: &[ShotRecord], exclude_backcourt: bool) -> Option<ShotValue> {
    ShotValue::from_shots(kept(shots, exclude_backcourt))
}

/// Overall shot value plus one entry per zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneBreakdown {
    /// All kept shots together
    pub overall: ShotValue,
    /// Shot value per zone
    pub by_zone: BTreeMap<ShotZone, ShotValue>,
}

/// Shot value overall and per zone. Returns `None` when no shots remain.
#[must_use]
pub fn points_per_shot_by_zone(
    shots: &[ShotRecord],
    exclude_backcourt: bool,
) -> Option<ZoneBreakdown> {
    let overall = points_per_shot(shots, exclude_backcourt)?;
    let mut grouped: BTreeMap<ShotZone, Vec<&ShotRecord>> = BTreeMap::new();
    for shot in kept(shots, exclude_backcourt) {
        grouped.entry(shot.zone.clone()).or_default().push(shot);
    }
    let by_zone = grouped
        .into_iter()
        .filter_map(|(zone, group)| ShotValue::from_shots(group).map(|value| (zone, value)))
        .collect();
    Some(ZoneBreakdown { overall, by_zone })
}

/// League-wide shot value per zone, backcourt excluded.
#[must_use]
pub fn league_pps_by_zone(league_shots: &[ShotRecord]) -> Option<ZoneBreakdown> {
    points_per_shot_by_zone(league_shots, true)
}

/// How a team distributes its attempts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneUsage {
    /// Team abbreviation
    pub team_abbr: String,
    /// Share of attempts from high-value zones
    pub high_value_pct: f64,
    /// Share of attempts at the rim
    pub restricted_area_pct: f64,
    /// Share of attempts from three-point zones
    pub three_point_pct: f64,
    /// Everything else
    pub low_value_pct: f64,
    /// Attempts counted
    pub total_shots: usize,
    /// 1 for the highest high-value share
    pub rank: usize,
}

impl Tabular for ZoneUsage {
    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "team_abbr" => self.team_abbr.clone().into(),
            "high_value_pct" => self.high_value_pct.into(),
            "restricted_area_pct" => self.restricted_area_pct.into(),
            "three_point_pct" => self.three_point_pct.into(),
            "low_value_pct" => self.low_value_pct.into(),
            "total_shots" => FieldValue::Number(self.total_shots as f64),
            "rank" => FieldValue::Number(self.rank as f64),
            _ => return None,
        })
    }
}

/// Zone usage per team, ranked by high-value share.
///
/// Shots without a team abbreviation are ignored; if none carry one the
/// result is empty. Ties keep alphabetical team order.
#[must_use]
pub fn high_value_zone_usage(
    shots: &[ShotRecord],
    high_value_zones: &[ShotZone],
    exclude_backcourt: bool,
) -> Vec<ZoneUsage> {
    let mut by_team: BTreeMap<&str, Vec<&ShotRecord>> = BTreeMap::new();
    for shot in kept(shots, exclude_backcourt) {
        if let Some(team) = shot.team_abbr.as_deref() {
            by_team.entry(team).or_default().push(shot);
        }
    }

    let mut rows: Vec<ZoneUsage> = by_team
        .into_iter()
        .map(|(team, team_shots)| {
            let total = team_shots.len();
            let share = |pred: &dyn Fn(&ShotZone) -> bool| {
                let count = team_shots.iter().filter(|s| pred(&s.zone)).count();
                round1(count as f64 / total as f64 * 100.0)
            };
            let high_value_pct = share(&|zone| high_value_zones.contains(zone));
            ZoneUsage {
                team_abbr: team.to_string(),
                high_value_pct,
                restricted_area_pct: share(&|zone| *zone == ShotZone::RestrictedArea),
                three_point_pct: share(&ShotZone::is_three),
                low_value_pct: round1(100.0 - high_value_pct),
                total_shots: total,
                rank: 0,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.high_value_pct.total_cmp(&a.high_value_pct));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}

/// The top scorer from one zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneLeader {
    /// Zone led
    pub zone: ShotZone,
    /// Player identifier
    pub player_id: PlayerId,
    /// Display name
    pub player_name: String,
    /// Points scored from the zone
    pub points: u32,
    /// Zone points per game played
    pub ppg: f64,
    /// Zone points per attempt
    pub pps: f64,
    /// Attempts from the zone
    pub shots: usize,
    /// Games the player appears in
    pub games: usize,
}

/// Highest zone points per game in each zone, among players with at least
/// `min_shots` attempts there. Backcourt is excluded; shots without a
/// shooter are ignored.
#[must_use]
pub fn zone_leaders(shots: &[ShotRecord], min_shots: usize) -> Vec<ZoneLeader> {
    let mut games_played: HashMap<PlayerId, BTreeSet<&str>> = HashMap::new();
    let mut per_zone: BTreeMap<ShotZone, HashMap<PlayerId, (String, u32, usize)>> =
        BTreeMap::new();

    for shot in kept(shots, true) {
        let Some(player_id) = shot.player_id else {
            continue;
        };
        games_played
            .entry(player_id)
            .or_default()
            .insert(shot.game_id.as_str());
        let entry = per_zone
            .entry(shot.zone.clone())
            .or_default()
            .entry(player_id)
            .or_insert_with(|| (shot.player_name.clone().unwrap_or_default(), 0, 0));
        entry.1 += shot.points();
        entry.2 += 1;
    }

    per_zone
        .into_iter()
        .filter_map(|(zone, players)| {
            players
                .into_iter()
                .filter(|(_, (_, _, attempts))| *attempts >= min_shots.max(1))
                .map(|(player_id, (player_name, points, attempts))| {
                    let games = games_played.get(&player_id).map_or(1, BTreeSet::len);
                    ZoneLeader {
                        zone: zone.clone(),
                        player_id,
                        player_name,
                        points,
                        ppg: f64::from(points) / games as f64,
                        pps: f64::from(points) / attempts as f64,
                        shots: attempts,
                        games,
                    }
                })
                .max_by(|a, b| {
                    a.ppg
                        .total_cmp(&b.ppg)
                        .then_with(|| a.pps.total_cmp(&b.pps))
                        .then_with(|| b.player_id.cmp(&a.player_id))
                })
        })
        .collect()
}

/// A team's shot value in one zone against the league
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneComparison {
    /// Zone compared
    pub zone: ShotZone,
    /// Team points per shot
    pub team_pps: f64,
    /// League points per shot
    pub league_pps: f64,
    /// `team_pps - league_pps`
    pub diff: f64,
    /// Team attempts in the zone
    pub team_shots: usize,
}

/// Per-zone comparison for every zone the team attempted from.
#[must_use]
pub fn team_zone_comparison(
    team_shots: &[ShotRecord],
    league_shots: &[ShotRecord],
) -> Vec<ZoneComparison> {
    let (Some(team), Some(league)) = (
        points_per_shot_by_zone(team_shots, true),
        league_pps_by_zone(league_shots),
    ) else {
        return Vec::new();
    };

    team.by_zone
        .into_iter()
        .filter_map(|(zone, value)| {
            let league_value = league.by_zone.get(&zone)?;
            Some(ZoneComparison {
                team_pps: value.pps,
                league_pps: league_value.pps,
                diff: value.pps - league_value.pps,
                team_shots: value.total_shots,
                zone,
            })
        })
        .collect()
}
