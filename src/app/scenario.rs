use crate::config::toml_config::{Operation, ScenarioConfig, StepDefinition};
use crate::core::counter::CounterHandle;
use crate::core::factory::CellFactory;
use crate::domain::model::CellSnapshot;
use crate::utils::error::{CellError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    Ok,
    Mismatch {
        expected: i64,
        /// 同一步驟也碰到邊界時保留原訊息
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bound: Option<String>,
    },
    BoundExceeded { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub index: usize,
    pub counter: String,
    pub op: Operation,
    /// 每次重複操作後觀察到的值
    pub values: Vec<i64>,
    #[serde(flatten)]
    pub status: StepStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub name: String,
    pub started_at: String,
    pub steps: Vec<StepOutcome>,
    pub final_values: BTreeMap<String, CellSnapshot>,
    pub mismatches: usize,
}

impl ScenarioReport {
    pub fn is_success(&self) -> bool {
        self.mismatches == 0
    }

    /// Turns the first recorded mismatch into `ExpectationFailed`.
    pub fn ensure_success(&self) -> Result<()> {
        let mismatch = self.steps.iter().find_map(|step| match step.status {
            StepStatus::Mismatch { expected, .. } => Some(CellError::ExpectationFailed {
                step: step.index,
                expected,
                actual: step.values.last().copied().unwrap_or_default(),
            }),
            _ => None,
        });
        match mismatch {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs a scenario against freshly created counters.
///
/// The runner keeps one factory per declared counter; every `run` creates new
/// handles, so runs never observe each other's state.
pub struct ScenarioRunner {
    config: ScenarioConfig,
    factories: BTreeMap<String, CellFactory>,
}

impl ScenarioRunner {
    pub fn new(config: ScenarioConfig) -> Result<Self> {
        config.validate()?;

        let mut factories = BTreeMap::new();
        for definition in &config.counters {
            let factory = CellFactory::new(definition.to_spec())?;
            tracing::debug!(
                counter = %definition.name,
                bounded = factory.spec().bounds.is_bounded(),
                "registered counter"
            );
            factories.insert(definition.name.clone(), factory);
        }

        Ok(Self { config, factories })
    }

    pub fn run(&self) -> Result<ScenarioReport> {
        let started_at = chrono::Utc::now().to_rfc3339();
        let stop_on_mismatch = self.config.stop_on_mismatch();
        let counters: BTreeMap<String, CounterHandle> = self
            .factories
            .iter()
            .map(|(name, factory)| (name.clone(), factory.create()))
            .collect();
        tracing::info!(
            "🚀 Running scenario '{}' ({} counters, {} steps)",
            self.config.name(),
            counters.len(),
            self.config.steps.len()
        );

        let mut steps = Vec::with_capacity(self.config.steps.len());
        let mut mismatches = 0;

        for (index, step) in self.config.steps.iter().enumerate() {
            let outcome = Self::run_step(&counters, index, step)?;

            if let StepStatus::Mismatch { expected, .. } = outcome.status {
                let actual = outcome.values.last().copied().unwrap_or_default();
                tracing::warn!(
                    "❌ Step {} ({} on '{}'): expected {}, got {}",
                    index,
                    step.op,
                    step.counter,
                    expected,
                    actual
                );
                if stop_on_mismatch {
                    return Err(CellError::ExpectationFailed {
                        step: index,
                        expected,
                        actual,
                    });
                }
                mismatches += 1;
            }

            steps.push(outcome);
        }

        let final_values = counters
            .iter()
            .map(|(name, handle)| (name.clone(), handle.snapshot()))
            .collect();

        tracing::info!(
            "✅ Scenario '{}' finished with {} mismatch(es)",
            self.config.name(),
            mismatches
        );

        Ok(ScenarioReport {
            name: self.config.name().to_string(),
            started_at,
            steps,
            final_values,
            mismatches,
        })
    }

    fn run_step(
        counters: &BTreeMap<String, CounterHandle>,
        index: usize,
        step: &StepDefinition,
    ) -> Result<StepOutcome> {
        let handle = counters
            .get(&step.counter)
            .ok_or_else(|| CellError::UnknownCounter {
                name: step.counter.clone(),
            })?;
        let mut values = Vec::with_capacity(step.repeat());
        let mut status = StepStatus::Ok;

        for _ in 0..step.repeat() {
            let result = match step.op {
                Operation::Increment => Ok(handle.increment()),
                Operation::Decrement => Ok(handle.decrement()),
                Operation::Get => Ok(handle.get()),
                Operation::Reset => Ok(handle.reset()),
                Operation::TryIncrement => handle.try_increment(),
                Operation::TryDecrement => handle.try_decrement(),
            };

            match result {
                Ok(value) => values.push(value),
                // 越界不算情境失敗，記錄後停止這一步的重複
                Err(e @ CellError::BoundExceeded { .. }) => {
                    tracing::info!("⚠️ Step {} on '{}': {}", index, step.counter, e);
                    values.push(handle.get());
                    status = StepStatus::BoundExceeded {
                        message: e.to_string(),
                    };
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        tracing::debug!(index, counter = %step.counter, op = %step.op, ?values, "step done");

        if let Some(expected) = step.expect {
            if values.last().copied() != Some(expected) {
                let bound = match status {
                    StepStatus::BoundExceeded { message } => Some(message),
                    _ => None,
                };
                status = StepStatus::Mismatch { expected, bound };
            }
        }

        Ok(StepOutcome {
            index,
            counter: step.counter.clone(),
            op: step.op,
            values,
            status,
        })
    }
}
