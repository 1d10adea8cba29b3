/*!
 * Invariant Audits
 * Conservation and structural invariants under randomized operation mixes
 */

use memsim::{DemandSource, SimConfig, SimState, UniformDemand};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn invariants_hold_under_random_operation_sequences(
        ops in prop::collection::vec((0u8..4, 1usize..300), 1..120)
    ) {
        let config = SimConfig::default()
            .with_initial_blocks(4)
            .with_block_size(256);
        let mut state = SimState::new(&config).unwrap();
        let total = state.total_units();

        for (op, demand) in ops {
            match op {
                0 => { state.allocate_tick(demand).unwrap(); }
                1 => { state.reclaim_tick().unwrap(); }
                2 => { state.age_tick().unwrap(); }
                _ => { state.coalesce().unwrap(); }
            }
            state.verify().unwrap();
            let snap = state.snapshot();
            prop_assert!(snap.conserves());
            prop_assert_eq!(snap.total_units, total);
        }
    }

    #[test]
    fn coalescing_is_idempotent(
        sizes in prop::collection::vec(1usize..600, 0..12)
    ) {
        let mut state = SimState::from_layout(256, &sizes, &[]).unwrap();
        state.coalesce().unwrap();
        let first = state.snapshot();
        let stats = state.coalesce().unwrap();
        prop_assert!(!stats.absorbed_any());
        prop_assert_eq!(state.snapshot(), first);
    }
}

#[test]
fn seeded_demand_run_conserves_capacity() {
    let config = SimConfig::default()
        .with_initial_blocks(3)
        .with_block_size(1024)
        .with_demand_bounds(10, 50);
    let mut state = SimState::new(&config).unwrap();
    let mut demand = UniformDemand::seeded(10, 50, 2024);

    // Interleave the actors the way their tick ratios do: the aging clock
    // and allocator every step, reclamation every second step
    for step in 0..1000 {
        state.allocate_tick(demand.next_demand()).unwrap();
        state.age_tick().unwrap();
        if step % 2 == 0 {
            state.reclaim_tick().unwrap();
        }
        state.verify().unwrap();
    }
    assert!(state.snapshot().conserves());
}
