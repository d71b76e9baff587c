//! Integration tests for bulls-common crate.

use bulls_common::test_utils::fixtures;
use bulls_common::{
    parse_minutes, BullsError, FieldValue, GameId, GameRecord, GameResult, Metric, PlayerId,
    ShotType, ShotZone, Tabular, TeamId,
};
use proptest::prelude::*;

#[test]
fn test_id_display() {
    assert_eq!(format!("{}", TeamId(1_610_612_741)), "1610612741");
    assert_eq!(format!("{}", PlayerId(203_897)), "203897");
    assert_eq!(format!("{}", GameId::from("0022500503")), "0022500503");
}

#[test]
fn test_ids_serialize_transparently() {
    let json = serde_json::to_string(&PlayerId(42)).unwrap();
    assert_eq!(json, "42");
    let zone: ShotZone = serde_json::from_str("\"Left Corner 3\"").unwrap();
    assert_eq!(zone, ShotZone::LeftCorner3);
}

#[test]
fn test_matchup_parsing() {
    assert_eq!(
        GameRecord::parse_matchup("CHI vs. MIA"),
        (true, "MIA".to_string())
    );
    assert_eq!(GameRecord::parse_matchup("CHI @ BOS"), (false, "BOS".to_string()));
}

#[test]
fn test_game_table_view() {
    let game = &fixtures::sample_games()[0];
    assert_eq!(game.text("result").as_deref(), Some("W"));
    assert_eq!(game.number("points"), Some(112.0));
    assert!(matches!(game.field("date"), Some(FieldValue::Date(_))));
    assert!(game.field("no_such_column").is_none());
}

#[test]
fn test_box_score_to_player_game() {
    let game = &fixtures::sample_games()[0];
    let player = &fixtures::sample_box_score()[1];
    assert!(player.matches_name("zach lavine"));
    let row = player.to_player_game(game);
    assert_eq!(row.game_id, game.game_id);
    assert_eq!(row.result, GameResult::Win);
    assert!((row.metric(Metric::Points) - 28.0).abs() < f64::EPSILON);
}

#[test]
fn test_metric_aliases() {
    assert_eq!("AST".parse::<Metric>().unwrap(), Metric::Assists);
    assert_eq!("pts".parse::<Metric>().unwrap(), Metric::Points);
    assert!("wingspan".parse::<Metric>().is_err());
}

#[test]
fn test_shot_classification() {
    assert_eq!(ShotType::from_api("3PT Field Goal"), ShotType::Three);
    assert_eq!(ShotType::from_api("2PT Field Goal"), ShotType::Two);
    assert!(ShotZone::from("Above the Break 3").is_three());
    assert!(!ShotZone::from("Mid-Range").is_three());
    assert_eq!(
        ShotZone::from("Half Court"),
        ShotZone::Other("Half Court".to_string())
    );
}

#[test]
fn test_error_categories() {
    assert!(BullsError::network("connection reset").is_transient());
    assert!(!BullsError::not_found("no games").is_transient());
    assert!(BullsError::api_with_status("busy", 503).is_transient());
    assert_eq!(BullsError::graph("No data to render").category(), "graph");
}

#[test]
fn test_minutes_formats() {
    assert!((parse_minutes("32:15") - 32.25).abs() < 1e-9);
    assert!((parse_minutes("PT35M42.00S") - 35.7).abs() < 1e-9);
    assert!((parse_minutes("28") - 28.0).abs() < 1e-9);
    assert!(parse_minutes("").abs() < f64::EPSILON);
}

proptest! {
    #[test]
    fn prop_shot_zone_label_round_trip(index in 0usize..7) {
        let zone = ShotZone::NAMED[index].clone();
        prop_assert_eq!(ShotZone::from(zone.as_str()), zone);
    }

    #[test]
    fn prop_shooting_pct_bounded(made in 0u32..30, extra in 0u32..30) {
        let pct = bulls_common::shooting_pct(made, made + extra);
        prop_assert!((0.0..=100.0).contains(&pct));
    }
}
