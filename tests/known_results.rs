use std::collections::BTreeMap;

use krk_tablebase::core::board::Board;
use krk_tablebase::solve::optimal::solve_optimal;
use krk_tablebase::solve::stats::histogram;
use krk_tablebase::solve::Relaxation;
use krk_tablebase::table::{Objective, TableStore};

fn solved(files: u32, ranks: u32) -> TableStore {
    let mut table = TableStore::new(Board::new(files, ranks).unwrap()).unwrap();
    let report = solve_optimal(&mut table, Relaxation::GaussSeidel).unwrap();
    assert_eq!(report.unknown(), 0, "{files}x{ranks}");
    table
}

#[test]
fn distance_histogram_4x4() {
    let table = solved(4, 4);
    let expected: BTreeMap<u16, usize> = [
        (1, 120),
        (3, 404),
        (5, 316),
        (7, 236),
        (9, 168),
        (11, 56),
        (13, 12),
    ]
    .into_iter()
    .collect();
    assert_eq!(histogram(&table, Objective::Optimal), expected);
    assert_eq!(table.open_keys().count(), 1312);
}

#[test]
fn gauss_seidel_converges_in_six_passes_on_4x4() {
    let mut table = TableStore::new(Board::square(4).unwrap()).unwrap();
    let report = solve_optimal(&mut table, Relaxation::GaussSeidel).unwrap();
    assert_eq!(report.pass_count(), 6);
    assert_eq!(report.final_pass().unwrap().updates, 0);
    assert_eq!(report.max_distance(), Some(13));
}

#[test]
fn distance_histogram_3x3() {
    let table = solved(3, 3);
    let expected: BTreeMap<u16, usize> = [(1, 32), (3, 40), (5, 36)].into_iter().collect();
    assert_eq!(histogram(&table, Objective::Optimal), expected);
}

#[test]
fn rectangular_boards_are_fully_resolved() {
    let t34 = solved(3, 4);
    let t43 = solved(4, 3);
    assert_eq!(t34.open_keys().count(), 402);
    assert_eq!(
        histogram(&t34, Objective::Optimal),
        histogram(&t43, Objective::Optimal)
    );

    let t45 = solved(4, 5);
    assert_eq!(t45.open_keys().count(), 3090);
    let hist = histogram(&t45, Objective::Optimal);
    assert_eq!(hist.keys().next_back(), Some(&17));
}

#[test]
fn open_position_count_5x5() {
    let table = solved(5, 5);
    assert_eq!(table.open_keys().count(), 7040);
}
