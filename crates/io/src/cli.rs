//! Argument parsing and dispatch for the `statemat` binary.

use statemat_core::timing::{Computation, ComputationExt};
use statemat_core::{MatrixKind, SampleSet, TransitionMatrixBuilder};
use statemat_prob::{empirical_chain, EmptyRowPolicy};
use tracing::info;

use crate::config::{parse_setting, Config};
use crate::error::IoError;
use crate::random::{random_samples_from_entropy, random_samples_seeded};
use crate::render::{render_all, render_kernel, RenderOptions};
use crate::source::{load_csv, parse_manual};

pub const USAGE: &str = "\
usage: statemat random <n> <m> [--seed S] [options]
       statemat csv <path> [options]
       statemat manual <m> <bits>... [options]

options:
  --precision P   decimals per cell
  --only KIND     show one matrix (ChannelFwd, StateFwd, ChannelPast,
                  StatePast, ChannelFwdAux, StateFwdAux); repeatable
  --chain         also print the empirical chain estimated from StatePast
  --trace         print build timings";

/// Where the samples come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Random { n: usize, m: usize, seed: Option<u64> },
    Csv { path: String },
    Manual { m: usize, entries: Vec<String> },
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub source: Source,
    pub precision: Option<usize>,
    pub only: Vec<MatrixKind>,
    pub chain: bool,
    pub trace: bool,
}

fn usage(message: impl Into<String>) -> IoError {
    IoError::Usage {
        message: message.into(),
        usage: USAGE,
    }
}

/// Look up the value following `flag`, if the flag is present.
pub fn parse_arg<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>, IoError> {
    match args.iter().position(|a| a == flag) {
        None => Ok(None),
        Some(i) => args
            .get(i + 1)
            .map(|v| Some(v.as_str()))
            .ok_or_else(|| usage(format!("{} needs a value", flag))),
    }
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<Invocation, IoError> {
    const VALUED: [&str; 3] = ["--seed", "--precision", "--only"];

    // Split positionals from flags.
    let mut positionals: Vec<&str> = Vec::new();
    let mut only = Vec::new();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if VALUED.contains(&arg) {
            let value = args
                .get(i + 1)
                .ok_or_else(|| usage(format!("{} needs a value", arg)))?;
            if arg == "--only" {
                only.push(
                    MatrixKind::from_label(value)
                        .ok_or_else(|| usage(format!("unknown matrix '{}'", value)))?,
                );
            }
            i += 2;
            continue;
        }
        if arg.starts_with("--") && arg != "--chain" && arg != "--trace" {
            return Err(usage(format!("unknown option '{}'", arg)));
        }
        if !arg.starts_with("--") {
            positionals.push(arg);
        }
        i += 1;
    }

    let number = |name: &'static str, value: Option<&&str>| -> Result<usize, IoError> {
        let value = value.ok_or_else(|| usage(format!("missing <{}>", name)))?;
        parse_setting(name, value)
    };

    let source = match positionals.first().copied() {
        Some("random") => Source::Random {
            n: number("n", positionals.get(1))?,
            m: number("m", positionals.get(2))?,
            seed: parse_arg(args, "--seed")?
                .map(|s| parse_setting("--seed", s))
                .transpose()?,
        },
        Some("csv") => Source::Csv {
            path: positionals
                .get(1)
                .ok_or_else(|| usage("missing <path>"))?
                .to_string(),
        },
        Some("manual") => Source::Manual {
            m: number("m", positionals.get(1))?,
            entries: positionals[2..].iter().map(|s| s.to_string()).collect(),
        },
        Some(other) => return Err(usage(format!("unknown command '{}'", other))),
        None => return Err(usage("missing command")),
    };

    Ok(Invocation {
        source,
        precision: parse_arg(args, "--precision")?
            .map(|p| parse_setting("--precision", p))
            .transpose()?,
        only,
        chain: args.iter().any(|a| a == "--chain"),
        trace: args.iter().any(|a| a == "--trace"),
    })
}

fn check_width(m: usize, config: &Config) -> Result<(), IoError> {
    if m > config.max_channels {
        return Err(usage(format!(
            "{} channels exceeds STATEMAT_MAX_CHANNELS={}",
            m, config.max_channels
        )));
    }
    Ok(())
}

/// Obtain the samples an invocation asks for.
pub fn load_samples(source: &Source, config: &Config) -> Result<SampleSet, IoError> {
    let set = match source {
        Source::Random { n, m, seed } => {
            check_width(*m, config)?;
            match seed.or(config.seed) {
                Some(seed) => random_samples_seeded(*n, *m, seed)?,
                None => random_samples_from_entropy(*n, *m)?,
            }
        }
        Source::Csv { path } => load_csv(path)?,
        Source::Manual { m, entries } => {
            check_width(*m, config)?;
            parse_manual(entries, *m)?
        }
    };
    check_width(set.m(), config)?;
    Ok(set)
}

/// Execute an invocation and return the text to print.
pub fn run(invocation: &Invocation, config: &Config) -> Result<String, IoError> {
    let samples = load_samples(&invocation.source, config)?;
    info!(n = samples.n(), m = samples.m(), "samples ready");

    let mut options = RenderOptions::from(config);
    if let Some(p) = invocation.precision {
        options.precision = p.min(crate::config::MAX_PRECISION);
    }

    let (result, trace) = TransitionMatrixBuilder.traced().run(samples)?;

    let mut out = render_all(&result, &invocation.only, &options);
    if invocation.chain {
        let chain = empirical_chain(&result, EmptyRowPolicy::SelfLoop)?;
        out.push('\n');
        out.push_str(&render_kernel(&chain, "Chain (StatePast, rows normalised)", &options));
    }
    if invocation.trace {
        out.push('\n');
        out.push_str(&trace.display());
    }
    Ok(out)
}
