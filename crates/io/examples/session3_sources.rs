//! Session 3: Sources and Tables
//!
//! Samples typed in, read from CSV text and drawn at random, each pushed
//! through the builder and printed the way the `statemat` binary prints them.
//!
//! Run with: cargo run -p statemat-io --example session3_sources

use std::io::Cursor;

use statemat_core::{build, MatrixKind};
use statemat_io::render::render_table;
use statemat_io::{
    parse_manual, random_samples_seeded, read_csv, render_all, render_kernel, RenderOptions,
};
use statemat_prob::{empirical_chain, EmptyRowPolicy};

fn main() {
    println!("=== Session 3: Sources and Tables ===\n");

    // ------------------------------------------------------------------
    // 1. Typed-in samples
    // ------------------------------------------------------------------
    println!("1. Manual entry");
    let set = parse_manual(["00", "01", "11", "10"], 2).unwrap();
    let result = build(set.n(), set.m(), set.samples()).unwrap();
    let options = RenderOptions {
        precision: 3,
        bit_labels: true,
    };
    println!("{}", render_all(&result, &[MatrixKind::StatePast], &options));

    // ------------------------------------------------------------------
    // 2. CSV text
    // ------------------------------------------------------------------
    println!("2. CSV");
    let csv = "0,1,1\n1,1,0\n1,0,0\n0,0,1\n";
    let set = read_csv(Cursor::new(csv)).unwrap();
    let result = build(set.n(), set.m(), set.samples()).unwrap();
    println!(
        "{}",
        render_all(
            &result,
            &[MatrixKind::ChannelFwd, MatrixKind::ChannelPast],
            &RenderOptions::default()
        )
    );

    // ------------------------------------------------------------------
    // 3. Random samples and their chain
    // ------------------------------------------------------------------
    println!("3. Random (seed 7)");
    let set = random_samples_seeded(12, 2, 7).unwrap();
    let result = build(set.n(), set.m(), set.samples()).unwrap();
    let chain = empirical_chain(&result, EmptyRowPolicy::Uniform).unwrap();
    println!("{}", render_kernel(&chain, "Chain", &RenderOptions::default()));

    // ------------------------------------------------------------------
    // 4. Mass per matrix
    // ------------------------------------------------------------------
    println!("4. Totals");
    let header = vec!["Matrix".to_string(), "Sum".to_string()];
    let rows: Vec<Vec<String>> = MatrixKind::ALL
        .iter()
        .map(|&k| vec![k.label().to_string(), format!("{:.4}", result.get(k).sum())])
        .collect();
    println!("{}", render_table(&header, &rows));
}
