//! Cross-solver agreement and determinism over randomised maps.

mod common;

use marga_core::{
    BatchConfig, BatchSolver, Driver, DriverConfig, GridCoord, GridMap, RandomMapSource,
    SearchError, SequentialSolver, costs_agree, heuristic::octile, prepare,
};

use common::checked_path_cost;

#[test]
fn solvers_agree_across_seeds_and_densities() {
    for &density in &[0.3, 0.5, 0.8] {
        for seed in 0..25u64 {
            let mut source = RandomMapSource::new(12, 9, density, Some(seed)).unwrap();
            let map = prepare(12, 9, &mut source).unwrap();

            let report = match Driver::with_defaults().run(&map.grid, map.start, map.target) {
                Ok(report) => report,
                Err(SearchError::CostMismatch {
                    sequential,
                    parallel,
                }) => panic!(
                    "seed {seed} density {density}: mismatch {sequential:?} vs {parallel:?}"
                ),
                Err(e) => panic!("seed {seed}: {e}"),
            };

            let seq = report.sequential.unwrap();
            let par = report.parallel.unwrap();
            if seq.success {
                let seq_sum = checked_path_cost(&map.grid, map.start, map.target, &seq.path);
                let par_sum = checked_path_cost(&map.grid, map.start, map.target, &par.path);
                assert!((seq_sum - seq.cost).abs() < 1e-3);
                assert!((par_sum - par.cost).abs() < 1e-3);
            }
        }
    }
}

#[test]
fn batch_width_sweep_matches_sequential() {
    let mut source = RandomMapSource::seeded(16, 16, 42).unwrap();
    let map = prepare(16, 16, &mut source).unwrap();
    let reference = SequentialSolver::with_defaults().solve(&map.grid, map.start, map.target);

    for width in [1usize, 2, 7, 64, 1024] {
        let solver = BatchSolver::new(BatchConfig {
            batch_width: width,
            ..Default::default()
        });
        let result = solver.solve(&map.grid, map.start, map.target).unwrap();
        assert_eq!(
            reference.success, result.success,
            "batch width {width} changed the outcome"
        );
        if reference.success {
            assert!(
                costs_agree(reference.cost, result.cost),
                "batch width {width}: cost {} vs reference {}",
                result.cost,
                reference.cost
            );
        }
    }
}

#[test]
fn sequential_is_deterministic() {
    let mut source = RandomMapSource::seeded(14, 14, 7).unwrap();
    let map = prepare(14, 14, &mut source).unwrap();
    let solver = SequentialSolver::with_defaults();

    let first = solver.solve(&map.grid, map.start, map.target);
    let second = solver.solve(&map.grid, map.start, map.target);

    assert_eq!(first.success, second.success);
    assert_eq!(first.cost, second.cost);
    assert_eq!(first.path, second.path);
}

#[test]
fn octile_is_admissible_on_connected_map() {
    let grid = GridMap::open(9, 7).unwrap();
    let target = GridCoord::new(8, 6);
    let solver = SequentialSolver::with_defaults();

    for y in 0..7 {
        for x in 0..9 {
            let from = GridCoord::new(x, y);
            let result = solver.solve(&grid, from, target);
            assert!(result.success);
            assert!(
                octile(from, target) <= result.cost + 1e-4,
                "octile overestimates from ({x},{y}): {} > {}",
                octile(from, target),
                result.cost
            );
        }
    }
}

#[test]
fn parallel_only_driver_runs() {
    let grid = GridMap::open(5, 5).unwrap();
    let config = DriverConfig {
        solvers: marga_core::SolverSelection::ParallelOnly,
        ..Default::default()
    };
    let report = Driver::new(config)
        .run(&grid, GridCoord::new(0, 0), GridCoord::new(4, 4))
        .unwrap();
    assert!(report.sequential.is_none());
    assert!(report.parallel.unwrap().success);
}
