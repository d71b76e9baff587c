//! The thirty NBA franchises.

use bulls_common::TeamId;

/// One franchise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Team {
    /// Three-letter abbreviation
    pub abbreviation: &'static str,
    /// Franchise id used by the stats API
    pub id: TeamId,
    /// Full display name
    pub name: &'static str,
}

const fn team(abbreviation: &'static str, suffix: u32, name: &'static str) -> Team {
    Team {
        abbreviation,
        id: TeamId(1_610_612_000 + suffix),
        name,
    }
}

/// Every franchise, in franchise id order.
pub const NBA_TEAMS: [Team; 30] = [
    team("ATL", 737, "Atlanta Hawks"),
    team("BOS", 738, "Boston Celtics"),
    team("CLE", 739, "Cleveland Cavaliers"),
    team("NOP", 740, "New Orleans Pelicans"),
    team("CHI", 741, "Chicago Bulls"),
    team("DAL", 742, "Dallas Mavericks"),
    team("DEN", 743, "Denver Nuggets"),
    team("GSW", 744, "Golden State Warriors"),
    team("HOU", 745, "Houston Rockets"),
    team("LAC", 746, "LA Clippers"),
    team("LAL", 747, "Los Angeles Lakers"),
    team("MIA", 748, "Miami Heat"),
    team("MIL", 749, "Milwaukee Bucks"),
    team("MIN", 750, "Minnesota Timberwolves"),
    team("BKN", 751, "Brooklyn Nets"),
    team("NYK", 752, "New York Knicks"),
    team("ORL", 753, "Orlando Magic"),
    team("IND", 754, "Indiana Pacers"),
    team("PHI", 755, "Philadelphia 76ers"),
    team("PHX", 756, "Phoenix Suns"),
    team("POR", 757, "Portland Trail Blazers"),
    team("SAC", 758, "Sacramento Kings"),
    team("SAS", 759, "San Antonio Spurs"),
    team("OKC", 760, "Oklahoma City Thunder"),
    team("TOR", 761, "Toronto Raptors"),
    team("UTA", 762, "Utah Jazz"),
    team("MEM", 763, "Memphis Grizzlies"),
    team("WAS", 764, "Washington Wizards"),
    team("DET", 765, "Detroit Pistons"),
    team("CHA", 766, "Charlotte Hornets"),
];

/// Look up a franchise by abbreviation, ignoring case.
#[must_use]
pub fn find_team(abbreviation: &str) -> Option<&'static Team> {
    let wanted = abbreviation.trim();
    NBA_TEAMS
        .iter()
        .find(|team| team.abbreviation.eq_ignore_ascii_case(wanted))
}

/// Look up a franchise by id.
#[must_use]
pub fn team_by_id(id: TeamId) -> Option<&'static Team> {
    NBA_TEAMS.iter().find(|team| team.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_is_complete_and_unique() {
        let ids: HashSet<TeamId> = NBA_TEAMS.iter().map(|t| t.id).collect();
        let abbrs: HashSet<&str> = NBA_TEAMS.iter().map(|t| t.abbreviation).collect();
        assert_eq!(ids.len(), 30);
        assert_eq!(abbrs.len(), 30);
    }

    #[test]
    fn test_lookups() {
        let bulls = find_team("chi").unwrap();
        assert_eq!(bulls.id, TeamId(1_610_612_741));
        assert_eq!(bulls.name, "Chicago Bulls");
        assert_eq!(team_by_id(TeamId(1_610_612_738)).unwrap().abbreviation, "BOS");
        assert!(find_team("XYZ").is_none());
    }
}
