use battleships::{BitBoard, BitBoardError, Coord, CoordSet};

#[test]
fn set_and_get_bits() {
    let mut bb: BitBoard<u64, 8> = BitBoard::new();
    assert!(bb.is_empty());
    bb.set(3, 5).unwrap();
    assert!(bb.get(3, 5).unwrap());
    assert!(!bb.get(5, 3).unwrap());
    assert_eq!(bb.count_ones(), 1);
    assert_eq!(bb.iter_set_bits().collect::<Vec<_>>(), vec![(3, 5)]);
}

#[test]
fn out_of_bounds_is_an_error() {
    let mut bb: BitBoard<u16, 4> = BitBoard::new();
    assert_eq!(bb.set(4, 0), Err(BitBoardError::IndexOutOfBounds { row: 4, col: 0 }));
    assert!(bb.get(0, 4).is_err());
}

#[test]
fn coord_set_insert_reports_novelty() {
    let mut set = CoordSet::new();
    let j10: Coord = "J10".parse().unwrap();
    assert!(set.insert(j10));
    assert!(!set.insert(j10));
    assert!(set.contains(j10));
    assert_eq!(set.coords().collect::<Vec<_>>(), vec![j10]);
}

#[test]
fn union_and_intersection() {
    let mut a = CoordSet::new();
    let mut b = CoordSet::new();
    a.insert(Coord::ORIGIN);
    b.insert("B2".parse().unwrap());
    let both = a | b;
    assert_eq!(both.count_ones(), 2);
    assert!((both & a).contains(Coord::ORIGIN));
    assert_eq!((a & b).count_ones(), 0);
}
