//! Plain-text tables for matrices, kernels and sample data.
//!
//! ```text
//! ChannelFwd
//! +----------+----------+----------+
//! |  States  | Future 0 | Future 1 |
//! +----------+----------+----------+
//! | Actual 0 |   0.50   |   0.00   |
//! | Actual 1 |   0.00   |   1.00   |
//! +----------+----------+----------+
//! ```

use std::iter;

use statemat_core::sample::{decode, to_bit_string};
use statemat_core::{MatrixKind, TransitionMatrices, TransitionMatrix};
use statemat_prob::Kernel;

use crate::config::{Config, DEFAULT_PRECISION};

/// How numbers and state labels are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Decimals per cell.
    pub precision: usize,
    /// Label states with their bit strings instead of their indices.
    pub bit_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            bit_labels: false,
        }
    }
}

impl From<&Config> for RenderOptions {
    fn from(config: &Config) -> Self {
        Self {
            precision: config.precision,
            bit_labels: config.bit_labels,
        }
    }
}

/// Render a grid of strings as a boxed table with centred cells.
pub fn render_table(header: &[String], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = (0..header.len())
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .chain(iter::once(&header[c]))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let separator = format!(
        "+{}+\n",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );
    let line = |cells: &[String]| {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(c, &w)| format!("{:^w$}", cells.get(c).map(String::as_str).unwrap_or(""), w = w))
            .collect();
        format!("| {} |\n", padded.join(" | "))
    };

    let mut out = String::new();
    out.push_str(&separator);
    out.push_str(&line(header));
    out.push_str(&separator);
    for row in rows {
        out.push_str(&line(row));
    }
    out.push_str(&separator);
    out
}

fn state_label(prefix: &str, index: usize, width: usize, options: &RenderOptions) -> String {
    if options.bit_labels {
        format!("{} {}", prefix, to_bit_string(&decode(index, width)))
    } else {
        format!("{} {}", prefix, index)
    }
}

fn numeric_table(
    title: &str,
    rows: &[Vec<f64>],
    (row_prefix, col_prefix): (&str, &str),
    (row_width, col_width): (usize, usize),
    options: &RenderOptions,
) -> String {
    let n_cols = rows.first().map(Vec::len).unwrap_or(0);
    let header: Vec<String> = iter::once("States".to_string())
        .chain((0..n_cols).map(|j| state_label(col_prefix, j, col_width, options)))
        .collect();

    let body: Vec<Vec<String>> = if rows.is_empty() {
        vec![vec!["No data".to_string()]]
    } else {
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                iter::once(state_label(row_prefix, i, row_width, options))
                    .chain(row.iter().map(|v| format!("{:.*}", options.precision, v)))
                    .collect()
            })
            .collect()
    };

    format!("{}\n{}", title, render_table(&header, &body))
}

/// Number of channels behind a power-of-two state count.
fn width_of(states: usize) -> usize {
    states.trailing_zeros() as usize
}

/// One transition matrix: rows `Actual i`, columns `Future j`.
pub fn render_matrix(matrix: &TransitionMatrix, title: &str, options: &RenderOptions) -> String {
    let m = width_of(matrix.dim());
    numeric_table(title, &matrix.to_rows(), ("Actual", "Future"), (m, m), options)
}

/// A kernel: rows `From i`, columns `To j`.
pub fn render_kernel(kernel: &Kernel, title: &str, options: &RenderOptions) -> String {
    numeric_table(
        title,
        &kernel.k,
        ("From", "To"),
        (width_of(kernel.n_inputs), width_of(kernel.n_outputs)),
        options,
    )
}

/// The sample data: rows `Sample k`, columns `Channel c` (both 1-based).
pub fn render_samples(samples: &[Vec<u8>]) -> String {
    let m = samples.first().map(Vec::len).unwrap_or(0);
    if m == 0 {
        let header = vec!["Sample".to_string(), "No data".to_string()];
        return render_table(&header, &[vec!["No data".to_string(), String::new()]]);
    }

    let header: Vec<String> = iter::once("Sample".to_string())
        .chain((1..=m).map(|c| format!("Channel {}", c)))
        .collect();
    let rows: Vec<Vec<String>> = samples
        .iter()
        .enumerate()
        .map(|(k, s)| {
            iter::once(format!("Sample {}", k + 1))
                .chain(s.iter().map(|b| b.to_string()))
                .collect()
        })
        .collect();
    render_table(&header, &rows)
}

/// The selected matrices (all of them when `kinds` is empty) followed by the
/// sample data.
pub fn render_all(result: &TransitionMatrices, kinds: &[MatrixKind], options: &RenderOptions) -> String {
    let kinds: &[MatrixKind] = if kinds.is_empty() {
        &MatrixKind::ALL
    } else {
        kinds
    };

    let mut out = String::new();
    for &kind in kinds {
        out.push_str(&render_matrix(result.get(kind), kind.label(), options));
        out.push('\n');
    }
    out.push_str("Data\n");
    out.push_str(&render_samples(&result.samples));
    out
}
