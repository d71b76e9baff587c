//! Integration tests for bulls-graphs crate.
//!
//! These render real charts from fixture records and read the files back.

use bulls_analysis::{roster_efficiency, rolling_averages, season_averages, zone_leaders};
use bulls_common::test_utils::{fixtures, init_test_logging};
use bulls_common::{BullsError, Metric, ShotZone};
use bulls_graphs::{
    data_ranges, AnnotationPosition, BarChart, ChartConfig, ChartRenderer, EfficiencyMatrixChart, LineChart,
    RadarChart, RadarPlayer, RollingEfficiencyChart, ShotChart, SocialGraphic, WinLossChart,
    ZoneLeadersChart,
};
use proptest::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn small_config(title: &str) -> ChartConfig {
    ChartConfig::default().titled(title).with_size(640, 400)
}

fn assert_png(path: &Path, width: u32, height: u32) {
    assert!(path.exists(), "{} was not written", path.display());
    assert!(std::fs::metadata(path).unwrap().len() > 0);
    let img = image::open(path).unwrap();
    assert_eq!((img.width(), img.height()), (width, height));
}

#[test]
fn test_player_charts_round_trip() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let games = fixtures::sample_player_games();

    let bar = BarChart::from_rows(&games, "date", "points");
    let path = dir.path().join("charts/points.png");
    bar.render_to_file(&small_config("Points"), &path).unwrap();
    assert_png(&path, 640, 400);

    let line = LineChart::from_rows(&games, "date", &["points", "rebounds", "assists"]);
    let path = dir.path().join("line.png");
    line.render_to_file(&small_config("Trend"), &path).unwrap();
    assert_png(&path, 640, 400);

    let rows = rolling_averages(&games, &[Metric::TsPct], &[3]);
    let rolling = RollingEfficiencyChart::from_rows(&rows, "ts_pct_roll_3", 57.0);
    let path = dir.path().join("rolling.png");
    rolling.render_to_file(&small_config("Rolling TS%"), &path).unwrap();
    assert_png(&path, 640, 400);
}

#[test]
fn test_team_charts_round_trip() {
    let dir = TempDir::new().unwrap();
    let games = fixtures::sample_games();

    let chart = WinLossChart::from_rows(&games, "date", "points", "result");
    let path = dir.path().join("win_loss.png");
    chart.render_to_file(&small_config("Results"), &path).unwrap();
    assert_png(&path, 640, 400);

    let box_scores = vec![fixtures::sample_box_score(), fixtures::sample_box_score()];
    let matrix = EfficiencyMatrixChart::new(roster_efficiency(&box_scores, 0.0), 57.0);
    let bytes = matrix.render_to_bytes(&small_config("Roster")).unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (640, 400));
}

#[test]
fn test_shot_charts_round_trip() {
    let dir = TempDir::new().unwrap();
    let config = ChartConfig::default()
        .titled("Shot Chart")
        .with_size(500, 400)
        .for_court();

    let scatter = ShotChart::new(fixtures::sample_shots())
        .annotate("3/4 from the field", AnnotationPosition::TopLeft);
    let path = dir.path().join("shots.png");
    scatter.render_to_file(&config, &path).unwrap();
    assert_png(&path, config.width, config.height);

    let heat = ShotChart::new(fixtures::sample_shots()).with_heatmap(true);
    let path = dir.path().join("heat.png");
    heat.render_to_file(&config, &path).unwrap();
    assert_png(&path, config.width, config.height);

    let shots = vec![
        fixtures::tagged_shot(ShotZone::LeftCorner3, true, "g1", (7, "Coby White"), "CHI"),
        fixtures::tagged_shot(ShotZone::RestrictedArea, true, "g1", (9, "Nikola Vucevic"), "CHI"),
    ];
    let leaders = ZoneLeadersChart::new(zone_leaders(&shots, 1));
    let path = dir.path().join("leaders.png");
    leaders.render_to_file(&config, &path).unwrap();
    assert_png(&path, config.width, config.height);
}

#[test]
fn test_placeholder_charts_render_without_data() {
    let dir = TempDir::new().unwrap();

    let radar = RadarChart::new(Vec::new());
    let path = dir.path().join("radar_empty.png");
    radar.render_to_file(&small_config("Compare"), &path).unwrap();
    assert_png(&path, 640, 400);

    let leaders = ZoneLeadersChart::new(Vec::new());
    let path = dir.path().join("leaders_empty.png");
    leaders
        .render_to_file(&small_config("Zone Leaders").for_court(), &path)
        .unwrap();
    assert!(path.exists());
}

#[test]
fn test_radar_with_players() {
    let games = fixtures::sample_player_games();
    let averages = season_averages(&games).unwrap();
    let radar = RadarChart::new(vec![
        RadarPlayer::from_averages("Coby White", &averages),
        RadarPlayer::from_averages("Team", &averages),
    ]);
    let bytes = radar.render_to_bytes(&small_config("Compare")).unwrap();
    assert!(!bytes.is_empty());
}

#[test]
fn test_empty_input_is_a_graph_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("never.png");
    let empty: Vec<bulls_common::PlayerGame> = Vec::new();

    let err = BarChart::from_rows(&empty, "date", "points")
        .render_to_file(&small_config("Empty"), &path)
        .unwrap_err();
    assert!(matches!(err, BullsError::Graph { .. }));
    assert!(!path.exists());

    let err = ShotChart::new(Vec::new())
        .render_to_bytes(&small_config("Empty"))
        .unwrap_err();
    assert!(matches!(err, BullsError::Graph { .. }));
}

#[test]
fn test_social_graphic_round_trip() {
    let dir = TempDir::new().unwrap();
    let headshot = image::RgbaImage::from_pixel(300, 300, image::Rgba([206, 17, 65, 255]));
    let graphic = SocialGraphic::new("CLUTCH PERFORMANCE")
        .subtitle("Bulls vs Heat")
        .player_name("COBY WHITE")
        .headshot(headshot)
        .stat("PTS", 28)
        .stat("REB", 5)
        .stat("AST", 7)
        .stat("TS%", 64.2);

    let path = dir.path().join("out/graphic.png");
    graphic.save(&path).unwrap();
    assert_png(&path, 1080, 1350);

    // headshot center
    let img = image::open(&path).unwrap().to_rgb8();
    let pixel = img.get_pixel(540, 395);
    assert!(pixel[0] > 180 && pixel[1] < 60);
}

proptest! {
    #[test]
    fn prop_data_ranges_contain_every_point(
        points in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 1..30)
    ) {
        let (x_min, x_max, y_min, y_max) = data_ranges(&points);
        prop_assert!(x_min < x_max);
        prop_assert!(y_min < y_max);
        for &(x, y) in &points {
            prop_assert!(x_min <= x && x <= x_max);
            prop_assert!(y_min <= y && y <= y_max);
        }
    }
}
