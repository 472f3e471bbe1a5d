use clap::Parser;
use loto::utils::{logger, validation::Validate};
use loto::{CliConfig, LotoEngine, LotoError, OutputFormat};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    match config.output {
        OutputFormat::Text => logger::init_cli_logger(config.verbose),
        OutputFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::debug!("CLI config: {:?}", config);

    let output = config.output;
    let outcome = match prepare(config).and_then(|engine| engine.run()) {
        Ok(outcome) => outcome,
        Err(e) => exit_with(e),
    };

    match output {
        OutputFormat::Text => println!("{}", outcome),
        OutputFormat::Json => println!("{}", outcome.to_json()?),
    }

    Ok(())
}

fn prepare(config: CliConfig) -> loto::Result<LotoEngine<loto::CsvHistory, CliConfig>> {
    let config = config.resolve()?;
    config.validate()?;
    let history = config.history()?;
    tracing::debug!("Reading {} history file(s)", history.files().len());
    Ok(LotoEngine::new(history, config))
}

fn exit_with(e: LotoError) -> ! {
    tracing::debug!("{:?} (category: {:?})", e, e.category());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}
