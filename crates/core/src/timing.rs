//! # Zero-Cost Timing
//!
//! Compile-time configurable timing of computations using const generics.
//!
//! - `Traced<C, false>`: no timing code is generated; the wrapper compiles away
//!   and returns exactly what `C` returns.
//! - `Traced<C, true>`: returns `(output, TraceNode)`, the node holding the
//!   wall-clock duration and whatever phases `C` chose to record.
//!
//! [`AutoTraced`] picks one of the two from `debug_assertions`.
//!
//! ```rust
//! use statemat_core::timing::{Computation, ComputationExt};
//! use statemat_core::{SampleSet, TransitionMatrixBuilder};
//!
//! let samples = SampleSet::new(vec![vec![0, 1], vec![1, 1]]).unwrap();
//! let (matrices, trace) = TransitionMatrixBuilder.traced().run(samples).unwrap();
//! assert_eq!(matrices.dim(), 4);
//! println!("{}", trace);
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use crate::CoreError;

/// A synchronous computation with typed input and output.
pub trait Computation {
    /// The input type for this computation.
    type Input;

    /// The output type produced by this computation.
    type Output;

    /// Execute the computation.
    fn run(&self, input: Self::Input) -> Result<Self::Output, CoreError>;

    /// Execute while recording phase timings into `children`.
    ///
    /// The default records nothing and defers to [`run`](Self::run).
    fn run_recorded(
        &self,
        input: Self::Input,
        children: &mut Vec<TraceNode>,
    ) -> Result<Self::Output, CoreError> {
        let _ = children;
        self.run(input)
    }

    /// Get the name of this computation for tracing.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A node in the trace tree, recording timing and hierarchy.
#[derive(Debug, Clone)]
pub struct TraceNode {
    /// The name of the computation or phase
    pub name: String,
    /// How long it took
    pub duration: Duration,
    /// Recorded phases
    pub children: Vec<TraceNode>,
}

impl TraceNode {
    pub fn new(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            duration,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: TraceNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<TraceNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Pretty-print the trace tree.
    pub fn display(&self) -> String {
        let mut out = String::new();
        self.display_indent(0, &mut out);
        out
    }

    fn display_indent(&self, indent: usize, out: &mut String) {
        out.push_str(&"  ".repeat(indent));
        out.push_str(&format!("[{:?}] {}\n", self.duration, self.name));
        for child in &self.children {
            child.display_indent(indent + 1, out);
        }
    }

    /// Sum of the direct children's durations.
    pub fn children_duration(&self) -> Duration {
        self.children.iter().map(|c| c.duration).sum()
    }
}

impl fmt::Display for TraceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// A timing wrapper around a computation.
///
/// The const generic `ENABLED` selects whether timing is active.
#[derive(Debug, Clone)]
pub struct Traced<C, const ENABLED: bool> {
    inner: C,
}

impl<C, const ENABLED: bool> Traced<C, ENABLED> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

// ============================================================================
// Timing Disabled: Zero Overhead
// ============================================================================

impl<C: Computation> Computation for Traced<C, false> {
    type Input = C::Input;
    type Output = C::Output;

    fn run(&self, input: Self::Input) -> Result<Self::Output, CoreError> {
        self.inner.run(input)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

// ============================================================================
// Timing Enabled
// ============================================================================

impl<C: Computation> Computation for Traced<C, true> {
    type Input = C::Input;
    type Output = (C::Output, TraceNode);

    fn run(&self, input: Self::Input) -> Result<Self::Output, CoreError> {
        let mut children = Vec::new();
        let start = Instant::now();
        let output = self.inner.run_recorded(input, &mut children)?;
        let trace = TraceNode::new(self.inner.name(), start.elapsed()).with_children(children);
        Ok((output, trace))
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

/// Debug builds: timing on.
#[cfg(debug_assertions)]
pub type AutoTraced<C> = Traced<C, true>;

/// Release builds: timing off.
#[cfg(not(debug_assertions))]
pub type AutoTraced<C> = Traced<C, false>;

/// Extension trait for wrapping computations.
pub trait ComputationExt: Computation + Sized {
    fn traced(self) -> Traced<Self, true> {
        Traced::new(self)
    }

    fn untraced(self) -> Traced<Self, false> {
        Traced::new(self)
    }

    /// Wrap with auto-selected timing (debug = on, release = off).
    fn auto_traced(self) -> AutoTraced<Self> {
        Traced::new(self)
    }
}

impl<C: Computation + Sized> ComputationExt for C {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sum;

    impl Computation for Sum {
        type Input = Vec<u64>;
        type Output = u64;

        fn run(&self, input: Self::Input) -> Result<Self::Output, CoreError> {
            Ok(input.iter().sum())
        }

        fn name(&self) -> &'static str {
            "Sum"
        }
    }

    struct Sleepy {
        delay_ms: u64,
    }

    impl Computation for Sleepy {
        type Input = ();
        type Output = ();

        fn run(&self, _input: ()) -> Result<(), CoreError> {
            std::thread::sleep(Duration::from_millis(self.delay_ms));
            Ok(())
        }

        fn run_recorded(&self, input: (), children: &mut Vec<TraceNode>) -> Result<(), CoreError> {
            let start = Instant::now();
            self.run(input)?;
            children.push(TraceNode::new("sleep", start.elapsed()));
            Ok(())
        }
    }

    struct Failing;

    impl Computation for Failing {
        type Input = ();
        type Output = ();

        fn run(&self, _input: ()) -> Result<(), CoreError> {
            Err(CoreError::NoResults)
        }
    }

    #[test]
    fn test_untraced_same_output() {
        assert_eq!(Sum.untraced().run(vec![1, 2, 3]).unwrap(), 6);
    }

    #[test]
    fn test_traced_includes_trace() {
        let (total, trace) = Sum.traced().run(vec![4, 5]).unwrap();
        assert_eq!(total, 9);
        assert_eq!(trace.name, "Sum");
        assert!(trace.children.is_empty());
    }

    #[test]
    fn test_recorded_children_and_timing() {
        let ((), trace) = Sleepy { delay_ms: 20 }.traced().run(()).unwrap();
        assert_eq!(trace.children.len(), 1);
        assert!(trace.duration >= Duration::from_millis(20));
        assert!(trace.children_duration() <= trace.duration);
    }

    #[test]
    fn test_errors_pass_through() {
        assert_eq!(Failing.traced().run(()).unwrap_err(), CoreError::NoResults);
        assert_eq!(Failing.untraced().run(()).unwrap_err(), CoreError::NoResults);
    }

    #[test]
    fn test_default_name_is_type_name() {
        assert!(Failing.name().ends_with("Failing"));
    }

    #[test]
    fn test_trace_node_display() {
        let trace = TraceNode::new("build", Duration::from_millis(100))
            .with_child(TraceNode::new("validate", Duration::from_millis(30)))
            .with_child(TraceNode::new("accumulate", Duration::from_millis(40)));

        let display = trace.display();
        assert!(display.contains("build"));
        assert!(display.contains("  [30ms] validate"));
        assert!(display.contains("100ms"));
        assert_eq!(trace.children_duration(), Duration::from_millis(70));
    }

    #[test]
    fn test_wrapper_accessors() {
        let traced = Traced::<Sum, true>::new(Sum);
        assert_eq!(traced.inner().name(), "Sum");
        assert_eq!(traced.into_inner().name(), "Sum");
    }
}
