//! Player dictionary.

use crate::models::entity::League;

/// A known player and the aliases it is referred to by
#[derive(Debug, Clone, Copy)]
pub struct PlayerRecord {
    pub name: &'static str,
    pub league: League,
    pub aliases: &'static [&'static str],
}

pub static PLAYERS: &[PlayerRecord] = &[
    PlayerRecord {
        name: "Nikola Jokić",
        league: League::Nba,
        aliases: &["nikola jokic", "jokic", "the joker"],
    },
    PlayerRecord {
        name: "LeBron James",
        league: League::Nba,
        aliases: &["lebron james", "lebron", "king james"],
    },
    PlayerRecord {
        name: "Stephen Curry",
        league: League::Nba,
        aliases: &["stephen curry", "steph curry", "steph", "curry"],
    },
    PlayerRecord {
        name: "Luka Dončić",
        league: League::Nba,
        aliases: &["luka doncic", "doncic", "luka"],
    },
    PlayerRecord {
        name: "Giannis Antetokounmpo",
        league: League::Nba,
        aliases: &["giannis antetokounmpo", "giannis", "antetokounmpo"],
    },
    PlayerRecord {
        name: "Jayson Tatum",
        league: League::Nba,
        aliases: &["jayson tatum", "tatum"],
    },
    PlayerRecord {
        name: "Kevin Durant",
        league: League::Nba,
        aliases: &["kevin durant", "durant"],
    },
    PlayerRecord {
        name: "Victor Wembanyama",
        league: League::Nba,
        aliases: &["victor wembanyama", "wembanyama", "wemby"],
    },
    PlayerRecord {
        name: "Patrick Mahomes",
        league: League::Nfl,
        aliases: &["patrick mahomes", "mahomes"],
    },
    PlayerRecord {
        name: "Travis Kelce",
        league: League::Nfl,
        aliases: &["travis kelce", "kelce"],
    },
    PlayerRecord {
        name: "Josh Allen",
        league: League::Nfl,
        aliases: &["josh allen"],
    },
    PlayerRecord {
        name: "Connor McDavid",
        league: League::Nhl,
        aliases: &["connor mcdavid", "mcdavid"],
    },
    PlayerRecord {
        name: "Auston Matthews",
        league: League::Nhl,
        aliases: &["auston matthews"],
    },
    PlayerRecord {
        name: "Shohei Ohtani",
        league: League::Mlb,
        aliases: &["shohei ohtani", "ohtani"],
    },
    PlayerRecord {
        name: "Aaron Judge",
        league: League::Mlb,
        aliases: &["aaron judge"],
    },
    PlayerRecord {
        name: "Lionel Messi",
        league: League::Mls,
        aliases: &["lionel messi", "leo messi", "messi"],
    },
    PlayerRecord {
        name: "Erling Haaland",
        league: League::PremierLeague,
        aliases: &["erling haaland", "haaland"],
    },
    PlayerRecord {
        name: "Mohamed Salah",
        league: League::PremierLeague,
        aliases: &["mohamed salah", "mo salah", "salah"],
    },
    PlayerRecord {
        name: "Kylian Mbappé",
        league: League::LaLiga,
        aliases: &["kylian mbappe", "mbappe"],
    },
];
