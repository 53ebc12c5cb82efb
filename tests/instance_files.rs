//! The bundled instance files load, run, and give the textbook answers.

use algotrace::prelude::*;
use std::path::PathBuf;

fn instance_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("instances")
        .join(name)
}

fn run_file(name: &str) -> Trace<Snapshot> {
    let instance = Instance::load(instance_path(name)).unwrap();
    run(&instance).unwrap()
}

#[test]
fn every_bundled_instance_runs() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("instances");
    let mut seen = Vec::new();
    for entry in std::fs::read_dir(&dir).unwrap() {
        let path = entry.unwrap().path();
        if path.file_stem().is_some_and(|s| s == "algotrace") {
            continue;
        }
        let instance = Instance::load(&path).unwrap();
        let trace = run(&instance).unwrap();
        trace.validate().unwrap();
        seen.push(instance.algorithm());
    }
    for algorithm in Algorithm::ALL {
        assert!(seen.contains(&algorithm), "no instance file for {algorithm}");
    }
}

#[test]
fn bundled_config_is_valid() {
    let config = VisualizerConfig::load(instance_path("algotrace.yaml")).unwrap();
    assert_eq!(config.playback.speed_ms, 250);
    assert_eq!(config.limits.max_permutation_items, 6);
}

#[test]
fn quicksort_sorts_classic_array() {
    let Some(Snapshot::Sort(last)) = run_file("quicksort.yaml").final_snapshot().cloned() else {
        panic!("expected sort snapshot");
    };
    assert_eq!(last.array, vec![11, 12, 22, 25, 34, 64, 90]);
}

#[test]
fn kruskal_picks_four_edges_of_weight_ten() {
    let trace = run_file("kruskal.yaml");
    let Some(Snapshot::Kruskal(last)) = trace.final_snapshot() else {
        panic!("expected Kruskal snapshot");
    };
    let picked: Vec<(usize, usize, i64)> = last.mst.iter().map(|e| (e.from, e.to, e.weight)).collect();
    // B-D, A-D, C-E, B-C
    assert_eq!(picked, vec![(1, 3, 1), (0, 3, 2), (2, 4, 2), (1, 2, 5)]);
    assert_eq!(last.total_weight, 10);
}

#[test]
fn bellman_ford_uses_negative_edge() {
    let trace = run_file("bellman_ford.yaml");
    assert_eq!(trace.outcome(), Some(StepKind::Complete));
    let Some(Snapshot::BellmanFord(last)) = trace.final_snapshot() else {
        panic!("expected Bellman-Ford snapshot");
    };
    let finite: Vec<Option<i64>> = last.distances.iter().map(|d| d.finite()).collect();
    assert_eq!(finite, vec![Some(0), Some(2), Some(5), Some(6)]);
}

#[test]
fn knapsack_reaches_ten() {
    let trace = run_file("knapsack.yaml");
    let Some(Snapshot::Knapsack(last)) = trace.final_snapshot() else {
        panic!("expected knapsack snapshot");
    };
    assert_eq!(last.selected_value, 10);
    assert!(last.selected_weight <= 8);
    let names: Vec<&str> = last
        .selected
        .iter()
        .filter_map(|&i| last.items[i].name.as_deref())
        .collect();
    assert!(names.contains(&"compass"));
    assert!(names.contains(&"tent"));
}

#[test]
fn greedy_coin_change_is_not_optimal_where_dp_is() {
    let Some(Snapshot::CoinChange(dp)) = run_file("coin_change_dp.yaml").final_snapshot().cloned()
    else {
        panic!("expected coin change snapshot");
    };
    let Some(Snapshot::GreedyCoin(greedy)) =
        run_file("coin_change_greedy.yaml").final_snapshot().cloned()
    else {
        panic!("expected greedy coin snapshot");
    };

    assert_eq!(dp.dp[6], Distance::Finite(2));
    assert_eq!(dp.used.get(&3), Some(&2));
    assert_eq!(greedy.coin_count, 3);
    assert_eq!(greedy.remaining, 0);
}

#[test]
fn lcs_json_instance() {
    let trace = run_file("lcs.json");
    let Some(Snapshot::Lcs(last)) = trace.final_snapshot() else {
        panic!("expected LCS snapshot");
    };
    assert_eq!(last.subsequence.chars().count(), 4);
}

#[test]
fn fibonacci_fifteen() {
    let trace = run_file("fibonacci.yaml");
    let Some(Snapshot::Fibonacci(last)) = trace.final_snapshot() else {
        panic!("expected Fibonacci snapshot");
    };
    assert_eq!(last.dp[15], 610);
}

#[test]
fn activity_selection_keeps_three() {
    let trace = run_file("activity_selection.yaml");
    let Some(Snapshot::Activity(last)) = trace.final_snapshot() else {
        panic!("expected activity snapshot");
    };
    let names: Vec<&str> = last
        .selected
        .iter()
        .filter_map(|&i| last.activities[i].name.as_deref())
        .collect();
    assert_eq!(names, vec!["standup", "lunch", "sync"]);
}

#[test]
fn fractional_knapsack_totals_240() {
    let trace = run_file("fractional_knapsack.yaml");
    let Some(Snapshot::Fractional(last)) = trace.final_snapshot() else {
        panic!("expected fractional snapshot");
    };
    assert!((last.total_value - 240.0).abs() < 1e-9);
}

#[test]
fn backtracking_solution_counts() {
    assert_eq!(run_file("subsets.yaml").count(StepKind::SolutionFound), 8);
    assert_eq!(run_file("permutations.yaml").count(StepKind::SolutionFound), 6);
    assert_eq!(run_file("combinations.yaml").count(StepKind::SolutionFound), 10);
}
