//! Session 2: From Counts to Kernels
//!
//! Run with: cargo run -p statemat-prob --example session2_kernels
//!
//! This example demonstrates:
//! - Estimating a Markov kernel from predecessor → successor counts
//! - Policies for states that were never followed by anything
//! - Marginalising a joint-state matrix onto single channels
//! - Multi-step prediction and stationary distributions

use statemat_core::sample::to_bit_string;
use statemat_core::build;
use statemat_prob::{
    empirical_chain, marginalize, normalize_table, occupancy, predict, EmptyRowPolicy, ProbError,
};

fn main() -> Result<(), ProbError> {
    println!("=== Session 2: From Counts to Kernels ===\n");

    // Channel 0 is sticky, channel 1 toggles every step
    let samples: Vec<Vec<u8>> = (0..24)
        .map(|t| vec![u8::from(t % 8 >= 4), (t % 2) as u8])
        .collect();
    let result = build(samples.len(), 2, &samples)?;

    // -------------------------------------------------------------------------
    // 1. Empirical chain
    // -------------------------------------------------------------------------
    println!("1. Empirical Chain (StatePast, rows normalised)");
    println!("-----------------------------------------------");
    let chain = empirical_chain(&result, EmptyRowPolicy::SelfLoop)?;
    for (i, row) in chain.k.iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|p| format!("{:.3}", p)).collect();
        println!("  {} -> [{}]", to_bit_string(&statemat_core::sample::decode(i, 2)), cells.join(", "));
    }
    println!();

    // -------------------------------------------------------------------------
    // 2. Occupancy and stationarity
    // -------------------------------------------------------------------------
    println!("2. Occupancy vs Stationary Distribution");
    println!("---------------------------------------");
    let occ = occupancy(&result)?;
    println!("  occupancy:  {:?}", occ.p);
    println!("  entropy:    {:.4} bits", occ.entropy_bits());
    match chain.stationary(10_000, 1e-12) {
        Some(pi) => {
            println!("  stationary: {:?}", pi.p);
            println!("  TV(occupancy, stationary) = {:.4}", occ.tv_distance(&pi)?);
        }
        None => println!("  stationary: power iteration did not converge"),
    }
    println!();

    // -------------------------------------------------------------------------
    // 3. Per-channel marginals
    // -------------------------------------------------------------------------
    println!("3. Per-Channel Marginals");
    println!("------------------------");
    for channel in 0..2 {
        let table = normalize_table(marginalize(&result.state_past, 2, &[channel], &[channel])?);
        println!("  channel {}: {:?}", channel, table);
    }
    println!();

    // -------------------------------------------------------------------------
    // 4. Prediction
    // -------------------------------------------------------------------------
    println!("4. Prediction from state 00");
    println!("---------------------------");
    for steps in [1, 2, 4, 8] {
        let d = predict(&result, 0, steps, EmptyRowPolicy::SelfLoop)?;
        println!("  after {} step(s): {:?}", steps, d.p);
    }

    Ok(())
}
