use battleships::{generate, generate_map, Board, Fleet, TOTAL_SHIP_CELLS};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_grids_follow_fleet_rules(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = generate(&mut rng).unwrap();
        prop_assert_eq!(grid.ship_cells(), TOTAL_SHIP_CELLS);
        prop_assert!(Fleet::detect(&grid).validate().is_ok());
    }

    #[test]
    fn generated_maps_load_back(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let map = generate_map(&mut rng).unwrap();
        prop_assert_eq!(map.len(), 100);
        prop_assert!(map.chars().all(|ch| ch == '#' || ch == '.'));
        prop_assert!(Board::from_map_validated(&map).is_ok());
    }

    #[test]
    fn map_encoding_preserves_ship_partition(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = generate(&mut rng).unwrap();
        let reloaded = battleships::Grid::from_map(&grid.to_map()).unwrap();
        prop_assert_eq!(Fleet::detect(&grid), Fleet::detect(&reloaded));
    }

    #[test]
    fn repeated_shots_never_change_the_answer(seed in any::<u64>(), index in 0usize..100) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::from_map(&generate_map(&mut rng).unwrap()).unwrap();
        let at = battleships::Coord::from_index(index).unwrap();
        let first = board.receive_shot(at);
        let grid = board.grid().clone();
        let again = board.receive_shot(at);
        prop_assert_eq!(first, again);
        prop_assert_eq!(board.grid(), &grid);
        prop_assert_eq!(board.shots_received().count_ones(), 1);
    }
}

#[test]
fn same_seed_same_board() {
    let a = generate_map(&mut SmallRng::seed_from_u64(7)).unwrap();
    let b = generate_map(&mut SmallRng::seed_from_u64(7)).unwrap();
    assert_eq!(a, b);
}
