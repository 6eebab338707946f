/*!
 * Synthetic Code Generator
 * Builds a process's instruction stream at creation time
 */

use crate::core::limits::ADDR_SPACE;
use crate::process::types::{Instruction, ProcessType, SyscallKind};
use rand::Rng;

/// Generate `count` instructions for a process of the given type.
///
/// Each instruction is classified by drawing a uniform value in [0, 1)
/// against the type's long-call threshold; address references are uniform
/// over the simulated address space.
pub fn generate<R: Rng>(rng: &mut R, count: u32, ptype: ProcessType) -> Vec<Instruction> {
    let threshold = ptype.long_call_threshold();
    (0..count)
        .map(|num| {
            let syscall = if rng.gen::<f64>() < threshold {
                SyscallKind::Long
            } else {
                SyscallKind::Short
            };
            Instruction {
                num,
                syscall,
                addr_ref: rng.gen_range(0..ADDR_SPACE),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generates_requested_count_in_sequence() {
        let mut rng = StdRng::seed_from_u64(7);
        let code = generate(&mut rng, 100, ProcessType::Regular);
        assert_eq!(code.len(), 100);
        for (i, inst) in code.iter().enumerate() {
            assert_eq!(inst.num, i as u32);
            assert!(inst.addr_ref < ADDR_SPACE);
        }
    }

    #[test]
    fn same_seed_reproduces_stream() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(
            generate(&mut a, 50, ProcessType::IoBound),
            generate(&mut b, 50, ProcessType::IoBound)
        );
    }

    #[test]
    fn long_call_rate_tracks_process_type() {
        let mut rng = StdRng::seed_from_u64(11);
        let longs = |code: &[Instruction]| {
            code.iter()
                .filter(|i| i.syscall == SyscallKind::Long)
                .count()
        };

        // Expected ~200 of 1000 for IO-bound, ~1 for compute-bound.
        let io = generate(&mut rng, 1000, ProcessType::IoBound);
        assert!(longs(&io) > 50);

        let cmp = generate(&mut rng, 1000, ProcessType::ComputeBound);
        assert!(longs(&cmp) < 20);

        let reg = generate(&mut rng, 1000, ProcessType::Regular);
        assert!(longs(&reg) < longs(&io));
    }

    #[test]
    fn zero_count_yields_empty_stream() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate(&mut rng, 0, ProcessType::Regular).is_empty());
    }
}
