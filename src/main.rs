use anyhow::Context;
use clap::Parser;
use period_algebra::utils::{logger, validation::Validate};
use period_algebra::{
    CliConfig, Command, DateInput, Period, PeriodCollection, PeriodConfig, PeriodError,
    PeriodFactory,
};
use std::process::ExitCode;

/// What a subcommand produced, before rendering.
enum Outcome {
    Periods(PeriodCollection),
    Single(Option<Period>),
    Flag(bool),
    Count(u64),
}

impl Outcome {
    fn render(&self, json: bool) -> anyhow::Result<String> {
        if json {
            let rendered = match self {
                Outcome::Periods(periods) => serde_json::to_string_pretty(periods)?,
                Outcome::Single(period) => serde_json::to_string(period)?,
                Outcome::Flag(flag) => serde_json::to_string(flag)?,
                Outcome::Count(count) => serde_json::to_string(count)?,
            };
            return Ok(rendered);
        }

        Ok(match self {
            Outcome::Periods(periods) => periods
                .iter()
                .map(Period::as_string)
                .collect::<Vec<_>>()
                .join("\n"),
            Outcome::Single(Some(period)) => period.as_string(),
            Outcome::Single(None) => "none".to_string(),
            Outcome::Flag(flag) => flag.to_string(),
            Outcome::Count(count) => count.to_string(),
        })
    }
}

fn main() -> ExitCode {
    let cli = CliConfig::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            return failure(&e);
        }
    };

    if config.json_logging() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::debug!("🔧 Command: {:?}", cli.command);

    let factory = config.factory();
    match run(&cli.command, &factory).and_then(|outcome| outcome.render(cli.json)) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("❌ Command failed: {:#}", e);
            eprintln!("❌ {:#}", e);
            if let Some(error) = e.downcast_ref::<PeriodError>() {
                eprintln!("💡 {}", error.recovery_suggestion());
            }
            failure(&e)
        }
    }
}

fn load_config(cli: &CliConfig) -> anyhow::Result<PeriodConfig> {
    cli.validate()?;

    let config = match &cli.config {
        Some(path) => PeriodConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => PeriodConfig::default(),
    };
    config.validate()?;

    Ok(config)
}

fn failure(error: &anyhow::Error) -> ExitCode {
    let code = error
        .downcast_ref::<PeriodError>()
        .map_or(1, PeriodError::exit_code);
    ExitCode::from(code)
}

fn parse_period(text: &str) -> anyhow::Result<Period> {
    Period::from_string(text).with_context(|| format!("invalid period `{}`", text))
}

fn parse_all(texts: &[String]) -> anyhow::Result<Vec<Period>> {
    texts.iter().map(|text| parse_period(text)).collect()
}

fn run(command: &Command, factory: &PeriodFactory) -> anyhow::Result<Outcome> {
    let outcome = match command {
        Command::Make {
            start,
            end,
            precision,
            boundaries,
        } => {
            let period = factory.make_with(
                start,
                end,
                precision.unwrap_or(factory.precision()),
                boundaries.unwrap_or(factory.boundaries()),
            )?;
            Outcome::Single(Some(period))
        }
        Command::Length { period } => Outcome::Count(parse_period(period)?.length()),
        Command::Overlap { periods } => {
            let periods = parse_all(periods)?;
            let (first, rest) = periods.split_first().context("no periods given")?;
            Outcome::Single(first.overlap_all(rest)?)
        }
        Command::Gap { first, second } => {
            Outcome::Single(parse_period(first)?.gap(&parse_period(second)?)?)
        }
        Command::Subtract { period, others } => {
            Outcome::Periods(parse_period(period)?.subtract_all(&parse_all(others)?)?)
        }
        Command::Diff { first, second } => {
            Outcome::Periods(parse_period(first)?.diff_symmetric(&parse_period(second)?)?)
        }
        Command::Touches { first, second } => {
            Outcome::Flag(parse_period(first)?.touches_with(&parse_period(second)?)?)
        }
        Command::Contains { period, item } => {
            let period = parse_period(period)?;
            let contained = if item.trim_start().starts_with(['[', '(']) {
                period.contains(&parse_period(item)?)
            } else {
                let date = PeriodFactory::resolve_date(DateInput::from(item), factory.format())?;
                period.contains(&date)
            };
            Outcome::Flag(contained)
        }
        Command::Union { periods } => Outcome::Periods(collect(periods)?.union()?),
        Command::Gaps { periods } => Outcome::Periods(collect(periods)?.gaps()?),
        Command::UniqueIntervals { periods } => {
            Outcome::Periods(collect(periods)?.unique_intervals()?)
        }
        Command::Sort { periods } => Outcome::Periods(collect(periods)?.sort()),
        Command::Boundaries { periods } => Outcome::Single(collect(periods)?.boundaries()),
    };

    Ok(outcome)
}

fn collect(texts: &[String]) -> anyhow::Result<PeriodCollection> {
    let periods = parse_all(texts)?;
    tracing::debug!("📥 Parsed {} periods", periods.len());
    Ok(PeriodCollection::new(periods))
}
