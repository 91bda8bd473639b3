//! NovaCup league administration CLI.
//!
//! Loads the league from a snapshot file, applies one command, and saves it
//! back (mutating commands only). The CLI operates as the admin role.

mod print;

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use nova_core::{
    compute_standings, disciplinary, goalkeeper_ranking, record_result, top_scorers, EntityStore,
    Fixture, MemoryStore, Player, Position, ResultSubmission, StoreManager, Team,
};

#[derive(Debug, Parser)]
#[command(name = "nova", about = "NovaCup league administration")]
struct Args {
    /// league snapshot file
    #[clap(short = 'f', long, default_value = "league.nova")]
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// register a team
    AddTeam {
        name: String,
        #[clap(long)]
        group: Option<String>,
        #[clap(long)]
        logo: Option<String>,
    },
    /// register a player on a team
    AddPlayer {
        /// team name or id
        team: String,
        first_name: String,
        last_name: String,
        #[clap(long)]
        number: Option<u8>,
        /// goalkeeper, defender, full-back, midfielder, attacking-mid, winger, forward
        #[clap(long)]
        position: Option<String>,
    },
    /// schedule a match
    Schedule {
        /// home team name or id
        home: String,
        /// away team name or id
        away: String,
        #[clap(long, default_value_t = 1)]
        round: u32,
        /// kickoff date (YYYY-MM-DD), defaults to today
        #[clap(long)]
        date: Option<String>,
    },
    /// record a match result
    Record {
        /// match id (see `matches`)
        match_id: String,
        home_goals: u8,
        away_goals: u8,
        /// store the score without finalizing it
        #[clap(long)]
        provisional: bool,
        /// scorer attribution, repeatable: "<player> " or "<player>=<count>"
        #[clap(long = "scorer")]
        scorers: Vec<String>,
        /// booked player, repeatable (twice for two yellows)
        #[clap(long = "yellow")]
        yellows: Vec<String>,
        /// sent-off player, repeatable
        #[clap(long = "red")]
        reds: Vec<String>,
    },
    /// list teams
    Teams,
    /// list matches
    Matches,
    /// print the league table
    Standings,
    /// print the top scorers
    Scorers {
        #[clap(long, default_value_t = 10)]
        limit: usize,
    },
    /// print the card ranking
    Cards {
        #[clap(long, default_value_t = 10)]
        limit: usize,
    },
    /// print the goalkeeper ranking
    Keepers,
}

fn main() -> anyhow::Result<()> {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    debug!("args: {args:?}");

    let store = StoreManager::load_or_default(&args.file)?;

    match args.command {
        Command::AddTeam { name, group, logo } => {
            let mut team = Team::new(name);
            team.group = group;
            team.logo_url = logo;
            let team = store.insert_team(team)?;
            info!("registered team {} ({})", team.name, team.id);
            StoreManager::save(&args.file, &store)?;
        }
        Command::AddPlayer { team, first_name, last_name, number, position } => {
            let team = resolve_team(&store, &team)?;
            let mut player = Player::new(first_name, last_name, team.id.clone());
            player.shirt_number = number;
            player.position = match position.as_deref() {
                Some(p) => {
                    Some(Position::parse(p).ok_or_else(|| anyhow!("unknown position: {p}"))?)
                }
                None => None,
            };
            let player = store.insert_player(player)?;
            info!("registered {} for {} ({})", player.full_name(), team.name, player.id);
            StoreManager::save(&args.file, &store)?;
        }
        Command::Schedule { home, away, round, date } => {
            let home = resolve_team(&store, &home)?;
            let away = resolve_team(&store, &away)?;
            let kickoff = parse_kickoff(date.as_deref())?;
            let fixture =
                store.insert_match(Fixture::new(home.id.clone(), away.id.clone(), kickoff, round))?;
            info!("scheduled {} vs {} in round {} ({})", home.name, away.name, round, fixture.id);
            StoreManager::save(&args.file, &store)?;
        }
        Command::Record { match_id, home_goals, away_goals, provisional, scorers, yellows, reds } => {
            let players = store.list_players(None)?;
            let scorers = scorers
                .iter()
                .map(|spec| parse_scorer(spec, &players))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let yellows = yellows
                .iter()
                .map(|name| resolve_player(&players, name).map(|p| p.id.clone()))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let reds = reds
                .iter()
                .map(|name| resolve_player(&players, name).map(|p| p.id.clone()))
                .collect::<anyhow::Result<Vec<_>>>()?;

            let submission = ResultSubmission::from_parts(
                home_goals,
                away_goals,
                !provisional,
                scorers,
                yellows,
                reds,
            );
            let fixture = record_result(&store, &match_id, submission)
                .with_context(|| format!("recording result for match {match_id}"))?;
            info!(
                "recorded {} - {} ({})",
                fixture.home_goals,
                fixture.away_goals,
                if fixture.finalized { "final" } else { "provisional" }
            );
            StoreManager::save(&args.file, &store)?;
        }
        Command::Teams => {
            for team in store.list_teams()? {
                let group = team.group.as_deref().unwrap_or("-");
                println!("{}  group {}  {}", team.id, group, team.name);
            }
        }
        Command::Matches => {
            let teams = store.list_teams()?;
            let matches = store.list_matches()?;
            println!("{}", Console::default().render(&print::tabulate_matches(&matches, &teams)));
        }
        Command::Standings => {
            let teams = store.list_teams()?;
            let matches = store.list_finalized_matches()?;
            let table = compute_standings(&teams, &matches);
            println!("{}", Console::default().render(&print::tabulate_standings(&table)));
        }
        Command::Scorers { limit } => {
            let (players, matches) = roster_and_finalized(&store)?;
            let entries = top_scorers(&players, &matches, limit);
            println!("{}", Console::default().render(&print::tabulate_scorers(&entries)));
        }
        Command::Cards { limit } => {
            let (players, matches) = roster_and_finalized(&store)?;
            let entries = disciplinary(&players, &matches, limit);
            println!("{}", Console::default().render(&print::tabulate_cards(&entries)));
        }
        Command::Keepers => {
            let (players, matches) = roster_and_finalized(&store)?;
            let entries = goalkeeper_ranking(&players, &matches);
            println!("{}", Console::default().render(&print::tabulate_keepers(&entries)));
        }
    }

    Ok(())
}

fn roster_and_finalized(store: &MemoryStore) -> anyhow::Result<(Vec<Player>, Vec<Fixture>)> {
    Ok((store.list_players(None)?, store.list_finalized_matches()?))
}

fn resolve_team(store: &MemoryStore, name_or_id: &str) -> anyhow::Result<Team> {
    let teams = store.list_teams()?;
    teams
        .iter()
        .find(|t| t.id == name_or_id || t.name == name_or_id)
        .cloned()
        .ok_or_else(|| anyhow!("no such team: {name_or_id}"))
}

fn resolve_player<'a>(players: &'a [Player], name_or_id: &str) -> anyhow::Result<&'a Player> {
    players
        .iter()
        .find(|p| p.id == name_or_id || p.full_name() == name_or_id)
        .ok_or_else(|| anyhow!("no such player: {name_or_id}"))
}

/// Parse "<player>" (one goal) or "<player>=<count>".
fn parse_scorer(spec: &str, players: &[Player]) -> anyhow::Result<(String, u32)> {
    let (name, count) = match spec.split_once('=') {
        Some((name, count)) => {
            (name, count.parse::<u32>().with_context(|| format!("bad goal count in {spec:?}"))?)
        }
        None => (spec, 1),
    };
    if count == 0 {
        bail!("goal count must be at least 1 in {spec:?}");
    }
    let player = resolve_player(players, name.trim())?;
    Ok((player.id.clone(), count))
}

fn parse_kickoff(date: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match date {
        None => Ok(Utc::now()),
        Some(raw) => {
            let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("bad date {raw:?}, expected YYYY-MM-DD"))?;
            let midday = day.and_hms_opt(12, 0, 0).expect("valid time of day");
            Ok(DateTime::from_naive_utc_and_offset(midday, Utc))
        }
    }
}
