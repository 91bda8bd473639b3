//! Console table rendering for the league views.

use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};

use nova_core::{CardEntry, Fixture, KeeperEntry, ScorerEntry, StandingsRow, Team};

fn num_col() -> Col {
    Col::new(Styles::default().with(MinWidth(4)).with(HAlign::Right))
}

pub fn tabulate_standings(rows: &[StandingsRow]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            num_col(),
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            num_col(),
            num_col(),
            num_col(),
            num_col(),
            num_col(),
            num_col(),
            num_col(),
            num_col(),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "#".into(),
                "Team".into(),
                "P".into(),
                "W".into(),
                "D".into(),
                "L".into(),
                "GF".into(),
                "GA".into(),
                "GD".into(),
                "Pts".into(),
            ],
        ));
    for (index, row) in rows.iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", index + 1).into(),
                row.team_name.clone().into(),
                format!("{}", row.played).into(),
                format!("{}", row.won).into(),
                format!("{}", row.drawn).into(),
                format!("{}", row.lost).into(),
                format!("{}", row.goals_for).into(),
                format!("{}", row.goals_against).into(),
                format!("{:+}", row.goal_difference).into(),
                format!("{}", row.points).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_scorers(entries: &[ScorerEntry]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            num_col(),
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            num_col(),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["#".into(), "Player".into(), "Goals".into()],
        ));
    for (index, entry) in entries.iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", index + 1).into(),
                entry.player_name.clone().into(),
                format!("{}", entry.goals).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_cards(entries: &[CardEntry]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            num_col(),
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            num_col(),
            num_col(),
            num_col(),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["#".into(), "Player".into(), "Y".into(), "R".into(), "Score".into()],
        ));
    for (index, entry) in entries.iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", index + 1).into(),
                entry.player_name.clone().into(),
                format!("{}", entry.yellow_cards).into(),
                format!("{}", entry.red_cards).into(),
                format!("{}", entry.weighted).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_keepers(entries: &[KeeperEntry]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            num_col(),
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            num_col(),
            num_col(),
            num_col(),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "#".into(),
                "Goalkeeper".into(),
                "M".into(),
                "GA".into(),
                "CS".into(),
                "Avg".into(),
            ],
        ));
    for (index, entry) in entries.iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", index + 1).into(),
                entry.player_name.clone().into(),
                format!("{}", entry.matches).into(),
                format!("{}", entry.conceded).into(),
                format!("{}", entry.clean_sheets).into(),
                format!("{:.2}", entry.average).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_matches(matches: &[Fixture], teams: &[Team]) -> Table {
    let name_of = |id: &str| {
        teams.iter().find(|t| t.id == id).map(|t| t.name.clone()).unwrap_or_else(|| id.to_string())
    };

    let mut table = Table::default()
        .with_cols(vec![
            num_col(),
            Col::new(Styles::default().with(MinWidth(36)).with(Left)),
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(7)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Rnd".into(),
                "Id".into(),
                "Home".into(),
                "Score".into(),
                "Away".into(),
                "Status".into(),
            ],
        ));
    for fixture in matches {
        let score = if fixture.finalized {
            format!("{} - {}", fixture.home_goals, fixture.away_goals)
        } else {
            "-".to_string()
        };
        let status = if fixture.finalized { "final" } else { "scheduled" };
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", fixture.round).into(),
                fixture.id.clone().into(),
                name_of(&fixture.home_team_id).into(),
                score.into(),
                name_of(&fixture.away_team_id).into(),
                status.to_string().into(),
            ],
        ));
    }
    table
}
