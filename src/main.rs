use anyhow::{Context, Result};
use clap::Parser;
use fisherfit::cli::{Cli, OutputFormat};
use fisherfit::config::AnalysisConfig;
use fisherfit::regression::{assess_adequacy, CriticalValueTable};
use fisherfit::report::RegressionReport;
use fisherfit::source::{DataSource, FixedDataSource, JsonDataSource};
use fisherfit::RegressionEngine;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Merge the optional config file with command-line overrides
fn load_config(args: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    if let Some(precision) = args.precision {
        config.precision = precision;
    }
    if let Some(confidence) = args.confidence {
        config.confidence_override = Some(confidence);
    }

    config.validate()?;
    Ok(config)
}

/// Resolve input files and the demo dataset, in command-line order
fn collect_sources(args: &Cli) -> Result<Vec<Box<dyn DataSource>>> {
    if args.files.is_empty() && !args.demo {
        anyhow::bail!(
            "Must specify input files or the demo dataset. Usage: fisherfit -f FILE [FILE...] or fisherfit --demo"
        );
    }

    let mut sources: Vec<Box<dyn DataSource>> = Vec::new();
    for path in &args.files {
        let source = JsonDataSource::from_file(path)
            .with_context(|| format!("Failed to load input {}", path.display()))?;
        sources.push(Box::new(source));
    }
    if args.demo {
        sources.push(Box::new(FixedDataSource::demo()));
    }
    Ok(sources)
}

/// Fit, test and snapshot one dataset
fn analyze(source: &dyn DataSource, config: &AnalysisConfig) -> Result<RegressionReport> {
    let name = source.name();
    let samples = source.samples()?;
    let confidence = match config.confidence_override {
        Some(p) => p,
        None => source.confidence_probability()?,
    };

    let engine = RegressionEngine::new(&samples)
        .with_context(|| format!("Failed to fit model for {}", name))?;
    let assessment = assess_adequacy(&engine, confidence, CriticalValueTable::standard())
        .with_context(|| format!("Failed to test model adequacy for {}", name))?;

    Ok(RegressionReport::build(name, &engine, assessment))
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = load_config(&args)?;
    let sources = collect_sources(&args)?;

    let mut reports = Vec::with_capacity(sources.len());
    for source in &sources {
        let report = analyze(source.as_ref(), &config)?;
        match args.format {
            OutputFormat::Text => print!("{}", report.to_text(&config)),
            OutputFormat::Csv => print!("{}", report.to_csv(config.precision)),
            OutputFormat::Json => {}
        }
        reports.push(report);
    }

    if args.format == OutputFormat::Json {
        println!("{}", RegressionReport::to_json(&reports)?);
    }

    Ok(())
}
