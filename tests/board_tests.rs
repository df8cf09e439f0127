use battleships::{Board, BoardError, Cell, Coord, Fleet, Grid, ShotOutcome, NUM_SHIPS};

const VALID_MAP: &str = "\
####.###..
..........
###.##.##.
..........
##.#.#.#..
..........
#.........
..........
..........
..........";

fn c(s: &str) -> Coord {
    s.parse().unwrap()
}

fn with_cell(map: &str, at: &str, glyph: char) -> String {
    let mut cells: Vec<char> = map.chars().filter(|ch| !ch.is_whitespace()).collect();
    cells[c(at).index()] = glyph;
    cells.into_iter().collect()
}

#[test]
fn valid_map_passes_validation() {
    let board = Board::from_map_validated(VALID_MAP).unwrap();
    assert_eq!(board.fleet().ships().len(), NUM_SHIPS);
    assert_eq!(board.fleet().lengths(), vec![4, 3, 3, 2, 2, 2, 1, 1, 1, 1]);
    assert_eq!(board.grid().ship_cells(), 20);
}

#[test]
fn map_length_and_cells_are_checked() {
    assert_eq!(Grid::from_map("#."), Err(BoardError::InvalidLength(2)));
    let bad = with_cell(VALID_MAP, "B5", 'x');
    assert_eq!(
        Grid::from_map(&bad),
        Err(BoardError::InvalidCell { index: 14, found: 'x' })
    );
}

#[test]
fn map_encoding_survives_parsing() {
    let grid = Grid::from_map(VALID_MAP).unwrap();
    let flat: String = VALID_MAP.chars().filter(|ch| !ch.is_whitespace()).collect();
    assert_eq!(grid.to_map(), flat);
}

#[test]
fn missing_ship_is_a_fleet_mismatch() {
    let map = with_cell(VALID_MAP, "G1", '.');
    assert_eq!(Board::from_map_validated(&map).unwrap_err(), BoardError::FleetMismatch);
}

#[test]
fn diagonal_contact_is_rejected() {
    let map = with_cell(&with_cell(VALID_MAP, "G1", '.'), "B10", '#');
    assert_eq!(Board::from_map_validated(&map).unwrap_err(), BoardError::ShipsTouching);
}

#[test]
fn bent_ship_is_rejected() {
    let map = with_cell(&with_cell(VALID_MAP, "G2", '#'), "H1", '#');
    assert_eq!(Board::from_map_validated(&map).unwrap_err(), BoardError::ShipNotStraight);
}

#[test]
fn ship_detection_groups_orthogonal_runs() {
    let fleet = Fleet::detect(&Grid::from_map(VALID_MAP).unwrap());
    let ship = fleet.ship_at(c("A3")).unwrap();
    assert_eq!(ship.cells(), &[c("A1"), c("A2"), c("A3"), c("A4")]);
    assert!(ship.contains(c("A4")) && !ship.contains(c("A5")));
    assert!(fleet.ship_at(c("A5")).is_none());
    assert_eq!(fleet.ship_at(c("C8")).unwrap().len(), 2);
}

#[test]
fn miss_is_recorded_and_repeats_identically() {
    let mut board = Board::from_map(VALID_MAP).unwrap();
    assert_eq!(board.receive_shot(c("B1")), ShotOutcome::Miss);
    assert_eq!(board.grid().get(c("B1")), Cell::Miss);
    assert_eq!(board.receive_shot(c("B1")), ShotOutcome::Miss);
    assert_eq!(board.shots_received().count_ones(), 1);
}

#[test]
fn hits_then_sink() {
    let mut board = Board::from_map(VALID_MAP).unwrap();
    for at in ["A1", "A2", "A3"] {
        assert_eq!(board.receive_shot(c(at)), ShotOutcome::Hit);
    }
    assert_eq!(board.receive_shot(c("A2")), ShotOutcome::Hit);
    assert_eq!(board.receive_shot(c("A4")), ShotOutcome::HitSunk);
    assert_eq!(board.receive_shot(c("A1")), ShotOutcome::HitSunk);
    assert_eq!(board.grid().get(c("A4")), Cell::HitShip);
}

#[test]
fn single_cell_ship_sinks_at_once() {
    let mut board = Board::from_map(VALID_MAP).unwrap();
    assert_eq!(board.receive_shot(c("G1")), ShotOutcome::HitSunk);
    assert_eq!(board.receive_shot(c("G1")), ShotOutcome::HitSunk);
}

#[test]
fn last_ship_ends_the_game_once() {
    let mut board = Board::from_map(VALID_MAP).unwrap();
    let targets: Vec<Coord> = Coord::all()
        .filter(|&at| board.grid().get(at) == Cell::Ship)
        .collect();
    let (last, rest) = targets.split_last().unwrap();
    for &at in rest {
        assert_ne!(board.receive_shot(at), ShotOutcome::GameOver);
    }
    assert!(!board.all_sunk());
    assert_eq!(board.receive_shot(*last), ShotOutcome::GameOver);
    assert!(board.all_sunk());
    assert_eq!(board.receive_shot(*last), ShotOutcome::HitSunk);
}

#[test]
fn respond_carries_the_next_shot() {
    let mut board = Board::from_map(VALID_MAP).unwrap();
    let reply = board.respond(c("J10"), c("C3"));
    assert_eq!(reply.outcome(), Some(ShotOutcome::Miss));
    assert_eq!(reply.shot(), c("C3"));
    assert_eq!(reply.encode(), "miss;C3");
}

#[test]
fn hit_ships_persist_as_ships() {
    let mut board = Board::from_map(VALID_MAP).unwrap();
    board.receive_shot(c("A1"));
    board.receive_shot(c("J1"));
    assert_eq!(board.to_map(), Grid::from_map(VALID_MAP).unwrap().to_map());
}

#[test]
fn corner_single_ship_scenario() {
    let mut board = Board::from_map(&with_cell(VALID_MAP, "J10", '#')).unwrap();
    let mut knowledge = battleships::Knowledge::new();

    let outcome = board.receive_shot(c("J10"));
    assert_eq!(outcome, ShotOutcome::HitSunk);
    assert_eq!(knowledge.record_own_shot_result(c("J10"), outcome), 3);
    for at in ["I9", "I10", "J9"] {
        assert_eq!(knowledge.get(c(at)), battleships::Intel::Miss);
    }
}

#[test]
fn empty_cell_miss_leaves_ships_alone() {
    let mut board = Board::from_map(VALID_MAP).unwrap();
    let before = board.fleet().afloat(board.grid());
    assert_eq!(board.receive_shot(c("F5")), ShotOutcome::Miss);
    assert_eq!(board.fleet().afloat(board.grid()), before);
    assert_eq!(board.grid().ship_cells(), 20);
}
