use crate::error::{Result, VerifyError};
use crate::request::RequestContext;
use crate::runtime_config::{self, RuntimeConfig};
use crate::schema::{SchemaCache, SchemaDocument};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, info_span, warn};

/// Signature every scenario body implements.
pub type ScenarioFn = fn(&SuiteContext) -> Result<()>;

/// Everything a scenario may read: request defaults and compiled schemas.
#[derive(Debug, Clone)]
pub struct SuiteContext {
    request: RequestContext,
    schemas: SchemaCache,
}

impl SuiteContext {
    /// Build the context and compile `schemas` up front.
    ///
    /// A schema that cannot be loaded fails here, before any scenario runs.
    pub fn setup(config: &RuntimeConfig, schemas: &[&str]) -> Result<Self> {
        let request = RequestContext::from_config(config)?;
        let cache = SchemaCache::new(config.schema_dir.clone());
        let loaded = cache.preload(schemas.iter().copied())?;
        info!(
            root_uri = request.root_uri(),
            schemas = loaded,
            "Suite context ready"
        );
        Ok(Self {
            request,
            schemas: cache,
        })
    }

    /// [`SuiteContext::setup`] over the installed process-wide configuration.
    pub fn from_installed(schemas: &[&str]) -> Result<Self> {
        Self::setup(runtime_config::current()?, schemas)
    }

    pub fn request(&self) -> &RequestContext {
        &self.request
    }

    pub fn schema(&self, name: &str) -> Result<Arc<SchemaDocument>> {
        self.schemas.get_or_load(name)
    }
}

/// Run one named stage of a scenario inside a tracing span.
pub fn step<T>(description: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let span = info_span!("step", description = description);
    let _enter = span.enter();
    debug!("Step started");
    let result = f();
    match &result {
        Ok(_) => debug!("Step passed"),
        Err(e) => warn!(kind = e.kind(), error = %e, "Step failed"),
    }
    result
}

#[derive(Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    run: ScenarioFn,
}

impl Scenario {
    pub const fn new(name: &'static str, description: &'static str, run: ScenarioFn) -> Self {
        Self {
            name,
            description,
            run,
        }
    }

    pub fn run(&self, ctx: &SuiteContext) -> ScenarioOutcome {
        let span = info_span!("scenario", name = self.name);
        let _enter = span.enter();
        let started = Instant::now();
        let result = (self.run)(ctx);
        let duration = started.elapsed();
        match &result {
            Ok(()) => info!(elapsed_ms = duration.as_millis() as u64, "Scenario passed"),
            Err(e) => error!(
                elapsed_ms = duration.as_millis() as u64,
                kind = e.kind(),
                error = %e,
                "Scenario failed"
            ),
        }
        ScenarioOutcome {
            name: self.name,
            duration,
            result,
        }
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    pub duration: Duration,
    pub result: Result<()>,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&VerifyError> {
        self.result.as_ref().err()
    }
}

impl fmt::Display for ScenarioOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(()) => write!(f, "PASS {} ({} ms)", self.name, self.duration.as_millis()),
            Err(e) => write!(f, "FAIL {} [{}] {}", self.name, e.kind(), e),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Suite {
    scenarios: Vec<Scenario>,
}

impl Suite {
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn find(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    /// Keep only the named scenarios, in suite order. An empty filter keeps
    /// everything; an unknown name is a configuration error.
    pub fn filtered(&self, names: &[String]) -> Result<Self> {
        if let Some(unknown) = names.iter().find(|n| self.find(n).is_none()) {
            return Err(VerifyError::Config(format!("unknown scenario '{unknown}'")));
        }
        if names.is_empty() {
            return Ok(self.clone());
        }
        Ok(Self::new(
            self.scenarios
                .iter()
                .filter(|s| names.iter().any(|n| n == s.name))
                .copied()
                .collect(),
        ))
    }

    pub fn run(&self, ctx: &SuiteContext) -> SuiteReport {
        let mut report = SuiteReport::default();
        for scenario in &self.scenarios {
            let outcome = scenario.run(ctx);
            let fatal = outcome.error().is_some_and(VerifyError::is_fatal);
            report.outcomes.push(outcome);
            if fatal {
                report.aborted = true;
                break;
            }
        }
        info!(
            passed = report.passed(),
            failed = report.failed(),
            aborted = report.aborted,
            "Suite finished"
        );
        report
    }
}

#[derive(Debug, Default)]
pub struct SuiteReport {
    pub outcomes: Vec<ScenarioOutcome>,
    /// A fatal error stopped the run before every scenario executed
    pub aborted: bool,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        !self.aborted && self.outcomes.iter().all(ScenarioOutcome::passed)
    }

    pub fn summary(&self) -> String {
        let mut line = format!("{} passed, {} failed", self.passed(), self.failed());
        if self.aborted {
            line.push_str(" (aborted)");
        }
        line
    }
}
