use peak_alloc::PeakAlloc;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use u_makespan::bench::{measure_memory, MemoryProbe};
use u_makespan::generator::TaskGenerator;
use u_makespan::scheduler::Strategy;

#[global_allocator]
static PEAK_ALLOC: PeakAlloc = PeakAlloc;

#[test]
fn exhaustive_peak_growth_is_recorded() {
    let mut rng = SmallRng::seed_from_u64(42);
    let tasks = TaskGenerator::default().generate(7, &mut rng);

    let (result, m) =
        measure_memory(Strategy::Exhaustive, &tasks, &mut rng, &PEAK_ALLOC).unwrap();

    // Every candidate assignment allocates job lists.
    let peak = m.peak_bytes.unwrap();
    assert!(peak > 0);
    assert!(PEAK_ALLOC.peak_bytes() >= peak);
    assert_eq!(m.makespan, result.makespan());
    assert_eq!(m.task_count, 7);
}
