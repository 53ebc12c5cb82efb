use algotrace::algorithms::dp::{CoinChangeInstance, KnapsackInstance};
use algotrace::algorithms::greedy::Activity;
use algotrace::prelude::*;

fn sample_graph(directed: bool) -> GraphSpec {
    GraphSpec {
        nodes: ["A", "B", "C", "D"].map(String::from).to_vec(),
        edges: vec![
            ("A".into(), "B".into(), 4),
            ("A".into(), "C".into(), 1),
            ("C".into(), "B".into(), 2),
            ("B".into(), "D".into(), 1),
            ("C".into(), "D".into(), 5),
        ],
        directed,
    }
}

fn catalog() -> Vec<Instance> {
    vec![
        Instance::Quicksort {
            array: vec![64, 34, 25, 12, 22, 11, 90],
        },
        Instance::Heapsort {
            array: vec![5, 3, 8, 1, 9, 2],
        },
        Instance::Kruskal {
            graph: sample_graph(false),
        },
        Instance::BellmanFord {
            graph: sample_graph(true),
            source: "A".into(),
        },
        Instance::FloydWarshall {
            graph: sample_graph(true),
        },
        Instance::Dfs {
            graph: sample_graph(true),
            start: "A".into(),
        },
        Instance::Knapsack(KnapsackInstance::from_pairs(
            &[(2, 3), (3, 4), (4, 5), (5, 6)],
            8,
        )),
        Instance::CoinChangeDp(CoinChangeInstance::new(&[1, 3, 4], 6)),
        Instance::Lcs {
            a: "ABCBDAB".into(),
            b: "BDCABA".into(),
        },
        Instance::Fibonacci { n: 12 },
        Instance::CoinChangeGreedy(CoinChangeInstance::new(&[1, 5, 10, 25], 63)),
        Instance::ActivitySelection {
            activities: vec![
                Activity::new(1, 4),
                Activity::new(3, 5),
                Activity::new(0, 6),
                Activity::new(5, 7),
                Activity::new(8, 9),
            ],
        },
        Instance::FractionalKnapsack(KnapsackInstance::from_pairs(
            &[(10, 60), (20, 100), (30, 120)],
            45,
        )),
        Instance::Subsets {
            items: vec![1, 2, 3],
        },
        Instance::Permutations {
            items: vec![1, 2, 3],
        },
        Instance::Combinations {
            items: vec![1, 2, 3, 4],
            k: None,
        },
    ]
}

// H0: Running the same instance twice yields different traces
// Falsification: Run every algorithm twice; compare blake3 checksums
#[test]
fn h0_1_same_instance_produces_identical_traces() {
    for instance in catalog() {
        let first = run(&instance).unwrap();
        let second = run(&instance).unwrap();
        assert_eq!(first, second, "{} trace differs", instance.algorithm());
        assert_eq!(
            first.checksum().unwrap(),
            second.checksum().unwrap(),
            "{} checksum differs",
            instance.algorithm()
        );
    }
}

// H0: Different instances can collide on the same checksum
// Falsification: Perturb one input value and compare checksums
#[test]
fn h0_2_different_instances_produce_different_checksums() {
    let a = run(&Instance::Quicksort {
        array: vec![3, 1, 2],
    })
    .unwrap();
    let b = run(&Instance::Quicksort {
        array: vec![3, 1, 4],
    })
    .unwrap();
    assert_ne!(a.checksum().unwrap(), b.checksum().unwrap());
}

// H0: Replaying a trace after reset shows different snapshots
// Falsification: Step to the end, reset, step again; compare every step
#[test]
fn h0_3_replay_after_reset_is_idempotent() {
    for instance in catalog() {
        let trace = run(&instance).unwrap();
        let expected = trace.steps().to_vec();
        let checksum = trace.checksum().unwrap();

        let mut player = PlaybackController::new(VirtualScheduler::new());
        player.load(trace);

        for pass in 0..2 {
            let mut seen = vec![player.current_step().unwrap().clone()];
            while player.step_forward() {
                seen.push(player.current_step().unwrap().clone());
            }
            assert_eq!(seen, expected, "{} pass {pass}", instance.algorithm());
            assert_eq!(player.state(), PlaybackState::Finished);
            player.reset();
            assert_eq!(player.current_index(), 0);
        }

        assert_eq!(player.trace().unwrap().checksum().unwrap(), checksum);
    }
}

// H0: Automatic playback skips or repeats steps
// Falsification: Play to the end in virtual time; count advancing ticks
#[test]
fn h0_4_timed_playback_visits_every_step_once() {
    for instance in catalog() {
        let trace = run(&instance).unwrap();
        let len = trace.len();

        let mut player = PlaybackController::new(VirtualScheduler::new());
        player.set_speed_ms(100);
        player.load(trace);
        player.play();
        let advanced = player.run_until_idle();

        assert_eq!(advanced, len - 1, "{}", instance.algorithm());
        assert_eq!(player.current_index(), len - 1);
        assert_eq!(player.state(), PlaybackState::Finished);
        assert_eq!(
            player.scheduler().now().as_millis(),
            100 * (len as u128 - 1)
        );
    }
}

// H0: JSON export loses information
// Falsification: Export, re-import, compare structurally and by checksum
#[test]
fn h0_5_json_roundtrip_preserves_trace() {
    for instance in catalog() {
        let trace = run(&instance).unwrap();
        let json = trace.to_json().unwrap();
        let restored: Trace<Snapshot> = Trace::from_json(&json).unwrap();

        assert_eq!(restored, trace, "{}", instance.algorithm());
        assert_eq!(restored.checksum().unwrap(), trace.checksum().unwrap());
    }
}

// H0: Tampered trace documents are accepted
// Falsification: Drop the initialize step from an exported trace
#[test]
fn h0_6_truncated_trace_is_rejected() {
    let trace = run(&Instance::Fibonacci { n: 5 }).unwrap();
    let mut doc: serde_json::Value = serde_json::from_str(&trace.to_json().unwrap()).unwrap();
    doc["steps"].as_array_mut().unwrap().remove(0);

    let err = Trace::<Snapshot>::from_json(&doc.to_string()).unwrap_err();
    assert!(matches!(err, TraceError::MalformedTrace(_)));
}

// H0: Every trace violates the shape rules somewhere
// Falsification: Validate every catalog trace
#[test]
fn h0_7_every_trace_is_well_formed() {
    for instance in catalog() {
        let trace = run(&instance).unwrap();
        trace.validate().unwrap();
        assert_eq!(trace.steps()[0].kind(), StepKind::Initialize);
        assert!(trace.outcome().unwrap().is_terminal());
    }
}
