use cell_factory::utils::error::CellError;
use cell_factory::utils::logger;
use cell_factory::{create_counter, CliConfig, ScenarioConfig, ScenarioRunner};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting cell-factory CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let outcome = match &config.scenario {
        Some(path) => run_scenario(path, config.json),
        None => run_ad_hoc(&config),
    };

    match outcome {
        Ok(()) => Ok(()),
        Err(e) => match e.downcast_ref::<CellError>() {
            Some(cell_error) => {
                tracing::error!(
                    "❌ Failed: {} (Category: {:?}, Severity: {:?})",
                    cell_error,
                    cell_error.category(),
                    cell_error.severity()
                );
                eprintln!("❌ {}", cell_error.user_friendly_message());
                eprintln!("💡 Suggestion: {}", cell_error.recovery_suggestion());

                let exit_code = cell_error.exit_code();
                if exit_code > 0 {
                    std::process::exit(exit_code);
                }
                Ok(())
            }
            None => Err(e),
        },
    }
}

fn run_scenario(path: &str, json: bool) -> anyhow::Result<()> {
    tracing::info!("📁 Loading scenario from: {}", path);
    let scenario = ScenarioConfig::from_file(path)?;
    let runner = ScenarioRunner::new(scenario)?;
    let report = runner.run()?;

    if json {
        println!("{}", report.to_json_pretty()?);
        report.ensure_success()?;
        return Ok(());
    }

    println!("Scenario: {}", report.name);
    for step in &report.steps {
        println!(
            "  [{}] {}.{} -> {:?} ({:?})",
            step.index, step.counter, step.op, step.values, step.status
        );
    }
    for (name, snapshot) in &report.final_values {
        println!("  {} = {}", name, snapshot.value);
    }
    if report.mismatches > 0 {
        println!("⚠️ {} mismatch(es)", report.mismatches);
    }
    // stop_on_mismatch = false 時仍以退出碼 2 回報不符
    report.ensure_success()?;
    Ok(())
}

fn run_ad_hoc(config: &CliConfig) -> anyhow::Result<()> {
    let counter = create_counter(config.initial, config.step)?;

    for _ in 0..config.times {
        let value = counter.increment();
        if !config.json {
            println!("{}", value);
        }
    }

    if config.json {
        let snapshot =
            serde_json::to_string_pretty(&counter.snapshot()).map_err(CellError::from)?;
        println!("{}", snapshot);
    } else {
        println!("get() = {}", counter.get());
    }
    Ok(())
}
