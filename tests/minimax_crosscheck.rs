use krk_tablebase::core::board::Board;
use krk_tablebase::solve::minimax::MinimaxOracle;
use krk_tablebase::solve::optimal::solve_optimal;
use krk_tablebase::solve::Relaxation;
use krk_tablebase::table::TableStore;

fn crosscheck(board: Board, horizon: u16) -> usize {
    let mut table = TableStore::new(board).unwrap();
    solve_optimal(&mut table, Relaxation::GaussSeidel).unwrap();
    let mut oracle = MinimaxOracle::new(board);
    let mut checked = 0;
    for key in table.open_keys() {
        let p = table.position(key);
        let expected = table.get(key).optimal.distance();
        assert_eq!(oracle.distance(&p, horizon), expected, "key {key}");
        checked += 1;
    }
    checked
}

#[test]
fn table_matches_tree_search_on_3x3() {
    assert_eq!(crosscheck(Board::square(3).unwrap(), 9), 108);
}

#[test]
fn table_matches_tree_search_on_4x4() {
    assert_eq!(crosscheck(Board::square(4).unwrap(), 15), 1312);
}
