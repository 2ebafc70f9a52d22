//! Session 1: Transition Matrices from Binary Samples
//!
//! Run with: cargo run -p statemat-core --example session1_transitions
//!
//! This example demonstrates:
//! - State indices as big-endian readings of a sample
//! - The six matrices produced by one builder pass
//! - Timing the build with the const-generic tracer
//! - Keeping the latest result in a session

use statemat_core::sample::{encode, suffix_index, to_bit_string};
use statemat_core::timing::ComputationExt;
use statemat_core::{Computation, CoreError, MatrixKind, SampleSet, Session, TransitionMatrixBuilder};

fn main() -> Result<(), CoreError> {
    println!("=== Session 1: Transition Matrices from Binary Samples ===\n");

    // -------------------------------------------------------------------------
    // 1. Samples and state indices
    // -------------------------------------------------------------------------
    println!("1. Samples and State Indices");
    println!("----------------------------");

    let samples = SampleSet::new(vec![
        vec![0, 0, 1],
        vec![0, 1, 1],
        vec![1, 1, 1],
        vec![1, 1, 0],
        vec![0, 1, 1],
    ])?;

    for (i, s) in samples.samples().iter().enumerate() {
        println!(
            "  sample {}: {}  -> state {}  (suffixes: {}, {})",
            i,
            to_bit_string(s),
            encode(s),
            suffix_index(s, 0),
            suffix_index(s, 1)
        );
    }
    println!();

    // -------------------------------------------------------------------------
    // 2. Build with timing
    // -------------------------------------------------------------------------
    println!("2. Building (traced)");
    println!("--------------------");

    let (matrices, trace) = TransitionMatrixBuilder.traced().run(samples.clone())?;
    print!("{}", trace);
    println!();

    for (kind, matrix) in matrices.iter() {
        println!("{} (mass {:.4}):", kind, matrix.sum());
        print!("{}", matrix);
        println!();
    }

    // -------------------------------------------------------------------------
    // 3. Sessions
    // -------------------------------------------------------------------------
    println!("3. Sessions");
    println!("-----------");

    let mut session = Session::new();
    match session.matrix(MatrixKind::StatePast) {
        Err(e) => println!("  before loading: {}", e),
        Ok(_) => unreachable!(),
    }
    session.recompute(samples)?;
    let past = session.matrix(MatrixKind::StatePast)?;
    for (from, to, w) in past.nonzero() {
        println!("  {} -> {}: {:.4}", from, to, w);
    }

    // -------------------------------------------------------------------------
    // 4. Rejected input
    // -------------------------------------------------------------------------
    println!();
    println!("4. Rejected Input");
    println!("-----------------");
    for bad in [vec![vec![1, 0]], vec![vec![1, 0], vec![1]], vec![vec![1, 2], vec![0, 0]]] {
        let err = SampleSet::new(bad).unwrap_err();
        println!("  {:?}: {}", err.kind(), err);
    }

    Ok(())
}
