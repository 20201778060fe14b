use test_case::test_case;

use crate::{Error, WorkerGrid};

#[test]
fn test_grid_constructors() {
    let grid = WorkerGrid::new_2d(64, 32).unwrap();
    assert_eq!(grid.dims(), 2);
    assert_eq!(grid.global_work(), &[64, 32]);
    assert_eq!(grid.global_offset(), &[0, 0]);
    assert_eq!(grid.local_work(), None);
}

#[test]
fn test_grid_setters() {
    let mut grid = WorkerGrid::new_1d(128).unwrap();
    grid.set_global_work(&[256]).unwrap();
    grid.set_local_work(&[64]).unwrap();
    grid.set_global_offset(&[4]).unwrap();

    let plan = grid.to_plan();
    assert_eq!(plan.global_work.as_slice(), &[256]);
    assert_eq!(plan.local_work.as_deref(), Some(&[64][..]));
    assert_eq!(plan.global_offset.as_slice(), &[4]);

    grid.clear_local_work();
    assert_eq!(grid.local_work(), None);
}

#[test_case(&[] ; "no_dimensions")]
#[test_case(&[1, 1, 1, 1] ; "four_dimensions")]
#[test_case(&[16, 0] ; "zero_size")]
fn test_invalid_global_work(global: &[usize]) {
    assert!(matches!(WorkerGrid::new(global), Err(Error::InvalidWorkerGrid { .. })));
}

#[test]
fn test_mismatched_dimensionality() {
    let grid = WorkerGrid::new_2d(64, 64).unwrap();
    assert!(matches!(grid.clone().with_local_work(&[8]), Err(Error::InvalidWorkerGrid { .. })));
    assert!(matches!(grid.clone().with_global_offset(&[0, 0, 0]), Err(Error::InvalidWorkerGrid { .. })));
    assert!(matches!(grid.with_local_work(&[8, 0]), Err(Error::InvalidWorkerGrid { .. })));
}
