//! Team dictionary.
//!
//! `place` is the home market used by the ambiguity detector. A place is only
//! listed as an alias when it hosts a single team across all leagues.

use crate::models::entity::League;

/// A known team
#[derive(Debug, Clone, Copy)]
pub struct TeamRecord {
    pub name: &'static str,
    pub nickname: &'static str,
    pub place: &'static str,
    pub league: League,
    pub aliases: &'static [&'static str],
}

macro_rules! team {
    ($name:expr, $nickname:expr, $place:expr, $league:expr, [$($alias:expr),* $(,)?]) => {
        TeamRecord {
            name: $name,
            nickname: $nickname,
            place: $place,
            league: $league,
            aliases: &[$($alias),*],
        }
    };
}

pub static TEAMS: &[TeamRecord] = &[
    // NBA
    team!("Dallas Mavericks", "Mavericks", "Dallas", League::Nba, ["dallas mavericks", "mavericks", "mavs"]),
    team!("Chicago Bulls", "Bulls", "Chicago", League::Nba, ["chicago bulls", "bulls"]),
    team!("Los Angeles Lakers", "Lakers", "Los Angeles", League::Nba, ["los angeles lakers", "la lakers", "lakers"]),
    team!("Boston Celtics", "Celtics", "Boston", League::Nba, ["boston celtics", "celtics"]),
    team!("New York Knicks", "Knicks", "New York", League::Nba, ["new york knicks", "ny knicks", "knicks"]),
    team!("Golden State Warriors", "Warriors", "San Francisco", League::Nba, ["golden state warriors", "golden state", "warriors", "dubs"]),
    team!("Denver Nuggets", "Nuggets", "Denver", League::Nba, ["denver nuggets", "nuggets"]),
    team!("Miami Heat", "Heat", "Miami", League::Nba, ["miami heat"]),
    team!("Milwaukee Bucks", "Bucks", "Milwaukee", League::Nba, ["milwaukee bucks", "bucks", "milwaukee"]),
    team!("Philadelphia 76ers", "76ers", "Philadelphia", League::Nba, ["philadelphia 76ers", "76ers", "sixers"]),
    team!("Phoenix Suns", "Suns", "Phoenix", League::Nba, ["phoenix suns", "suns", "phoenix"]),
    team!("Detroit Pistons", "Pistons", "Detroit", League::Nba, ["detroit pistons", "pistons"]),
    // NFL
    team!("Dallas Cowboys", "Cowboys", "Dallas", League::Nfl, ["dallas cowboys", "cowboys"]),
    team!("Chicago Bears", "Bears", "Chicago", League::Nfl, ["chicago bears", "bears"]),
    team!("Los Angeles Rams", "Rams", "Los Angeles", League::Nfl, ["los angeles rams", "la rams", "rams"]),
    team!("New England Patriots", "Patriots", "New England", League::Nfl, ["new england patriots", "new england", "patriots", "pats"]),
    team!("New York Giants", "Giants", "New York", League::Nfl, ["new york giants", "ny giants"]),
    team!("Kansas City Chiefs", "Chiefs", "Kansas City", League::Nfl, ["kansas city chiefs", "kansas city", "chiefs"]),
    team!("Philadelphia Eagles", "Eagles", "Philadelphia", League::Nfl, ["philadelphia eagles", "eagles"]),
    team!("Denver Broncos", "Broncos", "Denver", League::Nfl, ["denver broncos", "broncos"]),
    team!("Miami Dolphins", "Dolphins", "Miami", League::Nfl, ["miami dolphins", "dolphins"]),
    team!("Detroit Lions", "Lions", "Detroit", League::Nfl, ["detroit lions"]),
    team!("Buffalo Bills", "Bills", "Buffalo", League::Nfl, ["buffalo bills", "buffalo", "bills"]),
    team!("San Francisco 49ers", "49ers", "San Francisco", League::Nfl, ["san francisco 49ers", "49ers", "niners"]),
    // NHL
    team!("Dallas Stars", "Stars", "Dallas", League::Nhl, ["dallas stars"]),
    team!("Chicago Blackhawks", "Blackhawks", "Chicago", League::Nhl, ["chicago blackhawks", "blackhawks"]),
    team!("Los Angeles Kings", "Kings", "Los Angeles", League::Nhl, ["los angeles kings", "la kings"]),
    team!("Boston Bruins", "Bruins", "Boston", League::Nhl, ["boston bruins", "bruins"]),
    team!("New York Rangers", "Rangers", "New York", League::Nhl, ["new york rangers", "ny rangers"]),
    team!("Edmonton Oilers", "Oilers", "Edmonton", League::Nhl, ["edmonton oilers", "oilers", "edmonton"]),
    team!("Colorado Avalanche", "Avalanche", "Denver", League::Nhl, ["colorado avalanche", "avalanche"]),
    team!("Philadelphia Flyers", "Flyers", "Philadelphia", League::Nhl, ["philadelphia flyers", "flyers"]),
    team!("Detroit Red Wings", "Red Wings", "Detroit", League::Nhl, ["detroit red wings", "red wings"]),
    team!("Toronto Maple Leafs", "Maple Leafs", "Toronto", League::Nhl, ["toronto maple leafs", "maple leafs", "leafs", "toronto"]),
    // MLB
    team!("New York Yankees", "Yankees", "New York", League::Mlb, ["new york yankees", "yankees"]),
    team!("Los Angeles Dodgers", "Dodgers", "Los Angeles", League::Mlb, ["los angeles dodgers", "dodgers"]),
    team!("Boston Red Sox", "Red Sox", "Boston", League::Mlb, ["boston red sox", "red sox"]),
    // Soccer
    team!("Manchester United", "United", "Manchester", League::PremierLeague, ["manchester united", "man united", "man utd"]),
    team!("Manchester City", "City", "Manchester", League::PremierLeague, ["manchester city", "man city"]),
    team!("Arsenal", "Gunners", "London", League::PremierLeague, ["arsenal", "gunners"]),
    team!("Liverpool", "Reds", "Liverpool", League::PremierLeague, ["liverpool"]),
    team!("Real Madrid", "Los Blancos", "Madrid", League::LaLiga, ["real madrid"]),
    team!("FC Barcelona", "Barça", "Barcelona", League::LaLiga, ["fc barcelona", "barcelona", "barca"]),
    team!("Inter Miami", "Inter Miami", "Miami", League::Mls, ["inter miami"]),
];
