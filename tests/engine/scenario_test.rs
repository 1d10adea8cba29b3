/*!
 * Engine Scenario Tests
 * Fixed block layouts driven through single engine operations
 */

use memsim::{AllocOutcome, ReclaimOutcome, SimState};
use pretty_assertions::assert_eq;

fn free_sizes(state: &SimState) -> Vec<usize> {
    state.free().iter(state.arena()).map(|(_, b)| b.size).collect()
}

fn allocated_sizes(state: &SimState) -> Vec<usize> {
    state
        .allocated()
        .iter(state.arena())
        .map(|(_, b)| b.size)
        .collect()
}

#[test]
fn first_fit_split_against_mixed_free_list() {
    let mut state = SimState::from_layout(1024, &[5, 100, 30], &[]).unwrap();

    let outcome = state.allocate_tick(20).unwrap();

    // The 100-block is the first with size > 20, and 100 > 2*20 forces a split
    assert!(matches!(
        outcome,
        AllocOutcome::Split {
            requested: 20,
            remainder: 80,
            ..
        }
    ));
    assert_eq!(free_sizes(&state), vec![5, 80, 30]);
    assert_eq!(allocated_sizes(&state), vec![20]);
    state.verify().unwrap();
}

#[test]
fn whole_block_allocation_when_not_oversized() {
    let mut state = SimState::from_layout(1024, &[25], &[]).unwrap();

    let outcome = state.allocate_tick(20).unwrap();

    // 25 is not > 40, so the whole block relocates without splitting
    assert!(matches!(outcome, AllocOutcome::Whole { size: 25, .. }));
    assert_eq!(free_sizes(&state), Vec::<usize>::new());
    assert_eq!(allocated_sizes(&state), vec![25]);
    state.verify().unwrap();
}

#[test]
fn no_fit_is_a_no_op_tick() {
    let mut state = SimState::from_layout(1024, &[5, 30, 10], &[]).unwrap();
    let before = state.snapshot();

    let outcome = state.allocate_tick(60).unwrap();

    assert_eq!(outcome, AllocOutcome::NoFit { requested: 60 });
    assert_eq!(state.snapshot(), before);
}

#[test]
fn reclamation_selects_maximum_age_not_the_head() {
    let mut state =
        SimState::from_layout(1024, &[1024], &[(64, 3), (64, 7), (64, 1)]).unwrap();

    let outcome = state.reclaim_tick().unwrap();

    match outcome {
        ReclaimOutcome::Reclaimed { age, .. } => assert_eq!(age, 7),
        other => panic!("expected a reclamation, got {other:?}"),
    }
    // The survivor ages are untouched
    let ages: Vec<_> = state
        .allocated()
        .iter(state.arena())
        .map(|(_, b)| b.age)
        .collect();
    assert_eq!(ages, vec![3, 1]);
    state.verify().unwrap();
}

#[test]
fn coalescing_never_loses_free_capacity() {
    let mut state = SimState::from_layout(1024, &[1024, 300, 1024, 12], &[]).unwrap();
    let free_before: usize = free_sizes(&state).iter().sum();

    let stats = state.coalesce().unwrap();

    let free_after: usize = free_sizes(&state).iter().sum();
    assert_eq!(free_before, free_after);
    assert_eq!(stats.absorbed, 2);
    assert_eq!(stats.folded_units, 312);
    // Every surviving non-reservoir member is at least the uniform size
    assert_eq!(free_sizes(&state), vec![1336, 1024]);
    state.verify().unwrap();
}
