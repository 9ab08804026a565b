//! Rule abstraction and the single-pass chain executor.
//!
//! A diagnostic method is an ordered list of [`Rule`]s. The [`RuleChain`]
//! visits each rule once: an inapplicable rule is skipped, an applicable rule
//! returns a [`RuleEffect`] that the chain folds into its working state
//! (replacement samples, appended outputs, signals and fault codes) before
//! the next rule runs.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::failure::FailureCode;
use crate::sample::GasSample;

mod common;

pub use common::{ApplyDetectionLimits, CurrentSampleExists};

/// Name of the leading entry every chain emits.
pub const TITLE: &str = "Title";

// ============================================================================
// Outputs
// ============================================================================

/// One human-readable entry of a diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    /// Entry label.
    pub name: String,
    /// Entry text.
    pub description: String,
}

impl Output {
    /// Create a new entry.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { name: name.into(), description: description.into() }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {} => {} ]", self.name, self.description)
    }
}

/// Well-known boolean flags passed between rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Signal {
    /// A gas concentration is above its typical value.
    LimitExceeded,
    /// A gas is increasing faster than its typical rate.
    RateOfChangeExceeded,
    /// A gas is above its IEEE C57.104 Table 1 limit.
    TableOneLimitExceeded,
}

impl Signal {
    /// Entry name used when the signal is echoed to the output log.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::LimitExceeded => "LimitExceeded",
            Self::RateOfChangeExceeded => "RateOfChangeExceeded",
            Self::TableOneLimitExceeded => "Table1LimitExceeded",
        }
    }
    /// Signal whose echo entry is named `key`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        [Self::LimitExceeded, Self::RateOfChangeExceeded, Self::TableOneLimitExceeded]
            .into_iter()
            .find(|s| s.key() == key)
    }
}

/// Rules that produce a fault classification other rules may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Classifier {
    /// Duval Triangle 1.
    DuvalTriangle1,
    /// Duval Triangle 2 (OLTC).
    DuvalTriangle2,
    /// Duval Triangle 4.
    DuvalTriangle4,
    /// Duval Triangle 5.
    DuvalTriangle5,
    /// Duval Pentagon 1.
    DuvalPentagon1,
    /// Duval Pentagon 2.
    DuvalPentagon2,
    /// Rogers ratio table.
    RogersRatios,
    /// IEC 60599 ratio table.
    IecRatios,
}

/// Accumulated result of a chain run.
///
/// Holds the ordered, append-only entry log plus typed side channels for
/// signals and fault codes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outputs {
    entries: Vec<Output>,
    signals: BTreeMap<Signal, bool>,
    fault_codes: BTreeMap<Classifier, FailureCode>,
}

impl Outputs {
    /// Empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in emission order.
    #[must_use]
    pub fn entries(&self) -> &[Output] {
        &self.entries
    }

    /// Iterate entries in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Output> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry named `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Output> {
        self.entries.iter().find(|o| o.name == name)
    }

    /// Whether an entry named `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Value of a signal, `None` if no rule raised it.
    #[must_use]
    pub fn signal(&self, signal: Signal) -> Option<bool> {
        self.signals.get(&signal).copied()
    }

    /// Classification recorded by a rule, if it ran.
    #[must_use]
    pub fn fault_code(&self, classifier: Classifier) -> Option<FailureCode> {
        self.fault_codes.get(&classifier).copied()
    }

    /// Append an entry. An entry named after a signal also sets that signal,
    /// so the log and the side channel never disagree.
    fn push(&mut self, output: Output) {
        if let Some(signal) = Signal::from_key(&output.name) {
            self.signals.insert(signal, output.description == "True");
        }
        self.entries.push(output);
    }

    /// Record a signal and echo it as a `"True"`/`"False"` entry.
    pub fn raise(&mut self, signal: Signal, value: bool) {
        self.signals.insert(signal, value);
        self.entries.push(Output::new(signal.key(), if value { "True" } else { "False" }));
    }

    fn record(&mut self, classifier: Classifier, code: FailureCode) {
        self.fault_codes.insert(classifier, code);
    }
}

impl<'a> IntoIterator for &'a Outputs {
    type Item = &'a Output;
    type IntoIter = std::slice::Iter<'a, Output>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Rule contract
// ============================================================================

/// Read-only view a rule receives.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Working copy of the latest sample.
    pub current: Option<&'a GasSample>,
    /// Working copy of the earlier sample.
    pub previous: Option<&'a GasSample>,
    /// Everything emitted so far.
    pub outputs: &'a Outputs,
}

/// What an executed rule asks the chain to change.
///
/// The chain applies replacement samples first, then appends `outputs` in
/// order, then echoes `signals`, then records `fault_codes`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleEffect {
    /// Replacement for the working current sample.
    pub current: Option<GasSample>,
    /// Replacement for the working previous sample.
    pub previous: Option<GasSample>,
    /// Entries to append.
    pub outputs: Vec<Output>,
    /// Signals to raise.
    pub signals: Vec<(Signal, bool)>,
    /// Classifications to record.
    pub fault_codes: Vec<(Classifier, FailureCode)>,
}

impl RuleEffect {
    /// Effect that changes nothing.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Append an entry.
    #[must_use]
    pub fn with_output(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.outputs.push(Output::new(name, description));
        self
    }

    /// Raise a signal.
    #[must_use]
    pub fn with_signal(mut self, signal: Signal, value: bool) -> Self {
        self.signals.push((signal, value));
        self
    }

    /// Record a classification.
    #[must_use]
    pub fn with_fault_code(mut self, classifier: Classifier, code: FailureCode) -> Self {
        self.fault_codes.push((classifier, code));
        self
    }
}

/// One step of a diagnostic method.
///
/// # Example
///
/// ```rust,ignore
/// use dga_engine::rules::{Rule, RuleContext, RuleEffect};
///
/// struct Hello;
///
/// impl Rule for Hello {
///     fn name(&self) -> &'static str {
///         "hello"
///     }
///
///     fn is_applicable(&self, ctx: &RuleContext<'_>) -> bool {
///         ctx.current.is_some()
///     }
///
///     fn execute(&self, _ctx: &RuleContext<'_>) -> Result<RuleEffect> {
///         Ok(RuleEffect::none().with_output("Greeting", "hello"))
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &'static str;

    /// Whether the rule has what it needs to run. Must not have side effects.
    fn is_applicable(&self, ctx: &RuleContext<'_>) -> bool;

    /// Run the rule.
    ///
    /// # Errors
    ///
    /// An error aborts the whole chain.
    fn execute(&self, ctx: &RuleContext<'_>) -> Result<RuleEffect>;
}

/// A boxed rule for dynamic dispatch.
pub type BoxedRule = Box<dyn Rule>;

// ============================================================================
// Chain executor
// ============================================================================

/// Ordered list of rules run once, front to back.
#[derive(Default)]
pub struct RuleChain {
    rules: Vec<BoxedRule>,
}

impl fmt::Debug for RuleChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rules.iter().map(|r| r.name())).finish()
    }
}

impl RuleChain {
    /// Empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Names of the rules in execution order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name())
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the chain has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Emit the title entry, then run every applicable rule in order.
    ///
    /// # Errors
    ///
    /// Propagates the first rule error; nothing emitted afterwards.
    pub fn run(
        &self,
        mut current: Option<GasSample>,
        mut previous: Option<GasSample>,
        title: impl Into<String>,
    ) -> Result<Outputs> {
        let mut outputs = Outputs::new();
        outputs.push(Output::new(TITLE, title));

        for rule in &self.rules {
            let ctx = RuleContext {
                current: current.as_ref(),
                previous: previous.as_ref(),
                outputs: &outputs,
            };
            if !rule.is_applicable(&ctx) {
                debug!(rule = rule.name(), "rule not applicable, skipped");
                continue;
            }

            let effect = rule.execute(&ctx)?;
            if let Some(sample) = effect.current {
                debug!(rule = rule.name(), "current sample replaced");
                current = Some(sample);
            }
            if let Some(sample) = effect.previous {
                debug!(rule = rule.name(), "previous sample replaced");
                previous = Some(sample);
            }
            for output in effect.outputs {
                outputs.push(output);
            }
            for (signal, value) in effect.signals {
                outputs.raise(signal, value);
            }
            for (classifier, code) in effect.fault_codes {
                outputs.record(classifier, code);
            }
        }

        Ok(outputs)
    }
}
