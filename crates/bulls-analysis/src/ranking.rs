//! Top performer ordering for a single game.

use bulls_common::BoxScorePlayer;

/// Box score sorted by points, then assists, then rebounds, all descending.
///
/// The sort is stable: players tied on all three keys keep their input order.
#[must_use]
pub fn top_performers(box_score: &[BoxScorePlayer]) -> Vec<BoxScorePlayer> {
    let mut ranked = box_score.to_vec();
    ranked.sort_by(|a, b| {
        let key = |p: &BoxScorePlayer| (p.stats.points, p.stats.assists, p.stats.rebounds);
        key(b).cmp(&key(a))
    });
    ranked
}

/// The first `n` of [`top_performers`].
#[must_use]
pub fn top_n(box_score: &[BoxScorePlayer], n: usize) -> Vec<BoxScorePlayer> {
    let mut ranked = top_performers(box_score);
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulls_common::test_utils::fixtures::{box_player, line, sample_box_score};

    #[test]
    fn test_orders_by_points() {
        let ranked = top_performers(&sample_box_score());
        assert_eq!(ranked[0].name(), "Zach LaVine");
        assert_eq!(ranked[1].name(), "Coby White");
    }

    #[test]
    fn test_tie_breaks_assists_then_rebounds() {
        let players = vec![
            box_player(1, "A", "Rebounder", line(20, 12, 4)),
            box_player(2, "B", "Passer", line(20, 3, 9)),
            box_player(3, "C", "Balanced", line(20, 8, 4)),
        ];
        let ranked = top_performers(&players);
        let names: Vec<String> = ranked.iter().map(BoxScorePlayer::name).collect();
        assert_eq!(names, ["B Passer", "A Rebounder", "C Balanced"]);
    }

    #[test]
    fn test_full_tie_keeps_input_order() {
        let players = vec![
            box_player(1, "First", "Twin", line(15, 5, 5)),
            box_player(2, "Second", "Twin", line(15, 5, 5)),
        ];
        for _ in 0..3 {
            let ranked = top_performers(&players);
            assert_eq!(ranked[0].player_id.0, 1);
            assert_eq!(ranked[1].player_id.0, 2);
        }
    }

    #[test]
    fn test_empty_and_truncated() {
        assert!(top_performers(&[]).is_empty());
        assert_eq!(top_n(&sample_box_score(), 1).len(), 1);
        assert_eq!(top_n(&sample_box_score(), 10).len(), 2);
    }
}
