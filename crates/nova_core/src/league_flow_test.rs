//! End-to-end flow: seed a league, play a round, read every derived view.

use chrono::Utc;

use crate::models::{Fixture, Player, Position, Team};
use crate::recorder::{record_result, ResultSubmission};
use crate::stats::{compute_standings, disciplinary, goalkeeper_ranking, top_scorers};
use crate::store::{EntityStore, MemoryStore, StoreManager};

struct League {
    store: MemoryStore,
    nova: Team,
    racing: Team,
    centro: Team,
    nova_striker: Player,
    nova_keeper: Player,
    racing_keeper: Player,
    racing_defender: Player,
}

fn seed() -> League {
    let store = MemoryStore::new();
    let nova = store.insert_team(Team::new("Atlético Nova").with_group("A")).unwrap();
    let racing = store.insert_team(Team::new("Racing Sur").with_group("A")).unwrap();
    let centro = store.insert_team(Team::new("Deportivo Centro").with_group("A")).unwrap();

    let nova_striker = store
        .insert_player(
            Player::new("Marta", "Vidal", nova.id.clone())
                .with_position(Position::Forward)
                .with_shirt_number(9),
        )
        .unwrap();
    let nova_keeper = store
        .insert_player(Player::new("Iker", "Mora", nova.id.clone()).with_position(Position::Goalkeeper))
        .unwrap();
    let racing_keeper = store
        .insert_player(Player::new("Leo", "Funes", racing.id.clone()).with_position(Position::Goalkeeper))
        .unwrap();
    let racing_defender = store
        .insert_player(Player::new("Bea", "Sanz", racing.id.clone()).with_position(Position::Defender))
        .unwrap();

    League { store, nova, racing, centro, nova_striker, nova_keeper, racing_keeper, racing_defender }
}

#[test]
fn full_round_produces_consistent_views() {
    let league = seed();
    let store = &league.store;

    // Round 1: Nova 3-1 Racing, Centro idle.
    let m1 = store
        .insert_match(Fixture::new(league.nova.id.clone(), league.racing.id.clone(), Utc::now(), 1))
        .unwrap();
    record_result(
        store,
        &m1.id,
        ResultSubmission::from_parts(
            3,
            1,
            true,
            vec![(league.nova_striker.id.clone(), 3)],
            vec![league.racing_defender.id.clone()],
            vec![],
        ),
    )
    .unwrap();

    // Round 2: Racing 0-0 Centro; a scheduled-but-unplayed Nova match.
    let m2 = store
        .insert_match(Fixture::new(league.racing.id.clone(), league.centro.id.clone(), Utc::now(), 2))
        .unwrap();
    record_result(store, &m2.id, ResultSubmission::from_parts(0, 0, true, vec![], vec![], vec![]))
        .unwrap();
    store
        .insert_match(Fixture::new(league.centro.id.clone(), league.nova.id.clone(), Utc::now(), 3))
        .unwrap();

    let teams = store.list_teams().unwrap();
    let players = store.list_players(None).unwrap();
    let matches = store.list_finalized_matches().unwrap();
    assert_eq!(matches.len(), 2);

    // Standings: Nova 3 pts; Racing and Centro 1 each, Centro ahead on
    // goal difference (0 vs -2).
    let table = compute_standings(&teams, &matches);
    assert_eq!(table[0].team_id, league.nova.id);
    assert_eq!((table[0].points, table[0].goal_difference), (3, 2));
    assert_eq!(table[1].team_id, league.centro.id);
    assert_eq!(table[1].points, 1);
    assert_eq!(table[2].team_id, league.racing.id);
    assert_eq!(table[2].played, 2);
    assert_eq!(table[2].goal_difference, -2);

    let total_points: u32 = table.iter().map(|r| r.points).sum();
    let wins: u32 = table.iter().map(|r| r.won).sum();
    let draws: u32 = table.iter().map(|r| r.drawn).sum();
    assert_eq!(total_points, wins * 3 + draws);

    // Leaderboards.
    let scorers = top_scorers(&players, &matches, 10);
    assert_eq!(scorers.len(), 1);
    assert_eq!(scorers[0].player_id, league.nova_striker.id);
    assert_eq!(scorers[0].goals, 3);

    let cards = disciplinary(&players, &matches, 10);
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].player_id, league.racing_defender.id);
    assert_eq!(cards[0].weighted, 1);

    let keepers = goalkeeper_ranking(&players, &matches);
    assert_eq!(keepers.len(), 2);
    // Racing conceded 3 in 2 (avg 1.5), Nova conceded 1 in 1 (avg 1.0).
    assert_eq!(keepers[0].player_id, league.nova_keeper.id);
    assert_eq!(keepers[1].player_id, league.racing_keeper.id);
    assert_eq!(keepers[1].clean_sheets, 1);
}

#[test]
fn snapshot_persistence_preserves_every_view() {
    let league = seed();
    let store = &league.store;
    let m1 = store
        .insert_match(Fixture::new(league.nova.id.clone(), league.racing.id.clone(), Utc::now(), 1))
        .unwrap();
    record_result(
        store,
        &m1.id,
        ResultSubmission::from_parts(
            2,
            2,
            true,
            vec![(league.nova_striker.id.clone(), 2)],
            vec![],
            vec![],
        ),
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("league.nova");
    StoreManager::save(&path, store).unwrap();
    let restored = StoreManager::load(&path).unwrap();

    let before = compute_standings(
        &store.list_teams().unwrap(),
        &store.list_finalized_matches().unwrap(),
    );
    let after = compute_standings(
        &restored.list_teams().unwrap(),
        &restored.list_finalized_matches().unwrap(),
    );
    assert_eq!(before, after);
}
