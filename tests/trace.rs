use std::fmt::Debug;

use sort_test_tools::patterns;
use sort_trace::unstable::{lomuto_stack, midpoint_recursive};
use sort_trace::{Range, Sorted, Step};

const SAMPLE: [i32; 7] = [64, 34, 25, 12, 22, 11, 90];

// Every step of a Lomuto trace, checked against the buffer it recorded.
fn check_partition_steps<T: Ord + Debug>(input: &[T], steps: &[Step<T>]) {
    assert!(
        steps.len() <= input.len(),
        "{} partitions for {} elements",
        steps.len(),
        input.len()
    );

    for step in steps {
        let Step::Partition {
            range,
            pivot,
            buffer,
            pivot_index,
            pending,
        } = step
        else {
            panic!("unexpected step {step:?}");
        };

        assert!(range.start <= *pivot_index && *pivot_index < range.end);
        assert_eq!(&buffer[*pivot_index], pivot);
        assert!(buffer[range.start..*pivot_index].iter().all(|e| e <= pivot));
        assert!(buffer[*pivot_index + 1..range.end].iter().all(|e| e > pivot));

        let sub_ranges = &pending[pending.len() - 2..];
        assert_eq!(
            sub_ranges,
            [
                Range::new(range.start, *pivot_index),
                Range::new(*pivot_index + 1, range.end)
            ]
        );
    }

    if let Some(Step::Partition { pending, .. }) = steps.last() {
        assert!(pending.iter().all(Range::is_trivial), "{pending:?}");
    }
}

#[test]
fn sample_sorts_with_five_partitions() {
    let Sorted { sorted, trace } = lomuto_stack::sort_traced(&SAMPLE);

    assert_eq!(sorted, [11, 12, 22, 25, 34, 64, 90]);
    assert_eq!(trace.len(), 5);
    assert_eq!(
        trace.lines()[..2],
        [
            "Partitioning range 0 to 6, pivot: 90. After partition: [64, 34, 25, 12, 22, 11, 90], \
             pivot position: 6. Work list: [0-5], [7-6]",
            "Partitioning range 0 to 5, pivot: 11. After partition: [11, 34, 25, 12, 22, 64, 90], \
             pivot position: 0. Work list: [0--1], [1-5]",
        ]
    );
    assert_eq!(
        trace.steps()[4],
        Step::Partition {
            range: Range::inclusive(3, 4),
            pivot: 25,
            buffer: vec![11, 12, 22, 25, 34, 64, 90],
            pivot_index: 3,
            pending: vec![
                Range::new(0, 0),
                Range::new(1, 2),
                Range::new(3, 3),
                Range::new(4, 5)
            ],
        }
    );

    check_partition_steps(&SAMPLE, trace.steps());
}

#[test]
fn equal_elements() {
    let Sorted { sorted, trace } = lomuto_stack::sort_traced(&[5, 5, 5]);

    assert_eq!(sorted, [5, 5, 5]);
    assert_eq!(trace.partitions().count(), 2);

    let pivot_positions: Vec<usize> = trace
        .iter()
        .map(|step| match step {
            Step::Partition { pivot_index, .. } => *pivot_index,
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(pivot_positions, [2, 1]);
}

#[test]
fn trivial_inputs_have_no_steps() {
    let empty: [i32; 0] = [];

    let Sorted { sorted, trace } = lomuto_stack::sort_traced(&empty);
    assert!(sorted.is_empty());
    assert!(trace.is_empty());

    let Sorted { sorted, trace } = lomuto_stack::sort_traced(&[42]);
    assert_eq!(sorted, [42]);
    assert!(trace.is_empty());

    assert!(midpoint_recursive::sort_traced(&empty).trace.is_empty());
    assert!(midpoint_recursive::sort_traced(&[42]).trace.is_empty());
}

#[test]
fn two_elements() {
    let Sorted { sorted, trace } = lomuto_stack::sort_traced(&[2, 1]);

    assert_eq!(sorted, [1, 2]);
    assert_eq!(
        trace.steps(),
        [Step::Partition {
            range: Range::inclusive(0, 1),
            pivot: 1,
            buffer: vec![1, 2],
            pivot_index: 0,
            pending: vec![Range::new(0, 0), Range::new(1, 2)],
        }]
    );
}

#[test]
fn three_elements_one_partition() {
    let Sorted { sorted, trace } = lomuto_stack::sort_traced(&[3, 1, 2]);

    assert_eq!(sorted, [1, 2, 3]);
    assert_eq!(
        trace.steps(),
        [Step::Partition {
            range: Range::inclusive(0, 2),
            pivot: 2,
            buffer: vec![1, 2, 3],
            pivot_index: 1,
            pending: vec![Range::inclusive(0, 0), Range::inclusive(2, 2)],
        }]
    );
    assert_eq!(
        trace.numbered(),
        ["1. Partitioning range 0 to 2, pivot: 2. After partition: [1, 2, 3], \
          pivot position: 1. Work list: [0-0], [2-2]"]
    );
}

#[test]
fn partition_invariants_hold_across_patterns() {
    let providers: [fn(usize) -> Vec<i32>; 7] = [
        patterns::random,
        patterns::classroom,
        patterns::all_equal,
        patterns::ascending,
        patterns::descending,
        patterns::pipe_organ,
        |len| patterns::saw_mixed(len, 3),
    ];

    for provider in providers {
        for len in [2, 3, 7, 16, 33, 64] {
            let input = provider(len);
            let before = input.clone();

            let Sorted { sorted, trace } = lomuto_stack::sort_traced(&input);

            assert_eq!(input, before, "input was modified");

            let mut expected = input.clone();
            expected.sort();
            assert_eq!(sorted, expected);

            check_partition_steps(&input, trace.steps());
        }
    }
}

#[test]
fn sorting_sorted_output_is_stable() {
    let input = patterns::random_uniform(50, -20..=20);

    let once = lomuto_stack::sort_traced(&input).sorted;
    let twice = lomuto_stack::sort_traced(&once).sorted;
    assert_eq!(once, twice);

    let mut in_place = input;
    lomuto_stack::sort(&mut in_place);
    assert_eq!(in_place, once);
}

#[test]
fn strings_sort_by_their_order() {
    let input = ["pear", "apple", "fig", "apple"];
    let Sorted { sorted, trace } = lomuto_stack::sort_traced(&input);

    assert_eq!(sorted, ["apple", "apple", "fig", "pear"]);
    assert!(trace.lines()[0].starts_with("Partitioning range 0 to 3, pivot: \"apple\"."));
}

#[test]
fn recursive_sample_trace() {
    let Sorted { sorted, trace } = midpoint_recursive::sort_traced(&SAMPLE);

    assert_eq!(sorted, [11, 12, 22, 25, 34, 64, 90]);
    assert_eq!(trace.len(), 12);
    assert_eq!(
        trace.steps()[..2],
        [
            Step::Pivot {
                pivot: 12,
                input: SAMPLE.to_vec(),
            },
            Step::Split {
                left: vec![11],
                right: vec![64, 34, 25, 22, 90],
            },
        ]
    );
    assert_eq!(
        trace.lines().last().map(String::as_str),
        Some("Merged: [11, 12, 22, 25, 34, 64, 90]")
    );
    assert_eq!(trace.partitions().count(), 0);
}

#[test]
fn variants_agree() {
    for len in [0, 1, 2, 5, 20, 100] {
        let input = patterns::random_uniform(len, 0..=10);

        assert_eq!(
            lomuto_stack::sort_traced(&input).sorted,
            midpoint_recursive::sort_traced(&input).sorted
        );
    }
}
