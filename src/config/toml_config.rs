use crate::domain::model::{Bounds, CounterSpec};
use crate::utils::error::{CellError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_required_field,
    validate_unique_names, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub scenario: Option<ScenarioInfo>,
    #[serde(default)]
    pub counters: Vec<CounterDefinition>,
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInfo {
    pub name: String,
    pub description: Option<String>,
    pub stop_on_mismatch: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterDefinition {
    pub name: String,
    #[serde(default)]
    pub initial: i64,
    #[serde(default = "default_step")]
    pub step: i64,
    pub lower: Option<i64>,
    pub upper: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Increment,
    Decrement,
    Get,
    Reset,
    TryIncrement,
    TryDecrement,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDefinition {
    pub counter: String,
    pub op: Operation,
    pub repeat: Option<usize>,
    pub expect: Option<i64>,
}

fn default_step() -> i64 {
    1
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Increment => "increment",
            Operation::Decrement => "decrement",
            Operation::Get => "get",
            Operation::Reset => "reset",
            Operation::TryIncrement => "try_increment",
            Operation::TryDecrement => "try_decrement",
        };
        f.write_str(name)
    }
}

impl CounterDefinition {
    pub fn to_spec(&self) -> CounterSpec {
        CounterSpec::new(self.initial, self.step).with_bounds(Bounds::new(self.lower, self.upper))
    }
}

impl StepDefinition {
    pub fn repeat(&self) -> usize {
        self.repeat.unwrap_or(1)
    }
}

impl ScenarioConfig {
    /// 從 TOML 檔案載入情境
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CellError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析情境
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CellError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${INITIAL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CellError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證情境的合理性
    pub fn validate_config(&self) -> Result<()> {
        let info = validate_required_field("scenario", &self.scenario)?;
        validate_non_empty_string("scenario.name", &info.name)?;

        if self.counters.is_empty() {
            return Err(CellError::ConfigValidationError {
                field: "counters".to_string(),
                message: "At least one [[counters]] entry is required".to_string(),
            });
        }

        validate_unique_names("counters.name", self.counters.iter().map(|c| c.name.as_str()))?;

        for counter in &self.counters {
            validate_non_empty_string("counters.name", &counter.name)?;
            // 計數器本身的規則 (step 非零、邊界) 與建構時一致
            counter.to_spec().validate()?;
        }

        let declared: HashSet<&str> = self.counters.iter().map(|c| c.name.as_str()).collect();
        for (index, step) in self.steps.iter().enumerate() {
            if !declared.contains(step.counter.as_str()) {
                return Err(CellError::UnknownCounter {
                    name: step.counter.clone(),
                });
            }
            if let Some(repeat) = step.repeat {
                validate_positive_number(&format!("steps[{}].repeat", index), repeat, 1)?;
            }
        }

        Ok(())
    }

    /// 取得情境名稱
    pub fn name(&self) -> &str {
        self.scenario.as_ref().map(|s| s.name.as_str()).unwrap_or("unnamed")
    }

    /// 期望值不符時是否中止
    pub fn stop_on_mismatch(&self) -> bool {
        self.scenario
            .as_ref()
            .and_then(|s| s.stop_on_mismatch)
            .unwrap_or(true)
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
