use depviz::adapters::outbound::console::StderrProgressReporter;
use depviz::adapters::outbound::filesystem::{FileSystemWriter, FlatFileSource, StdoutPresenter};
use depviz::adapters::outbound::network::PackageIndexClient;
use depviz::application::dto::{ResolveRequest, ResolveResponse, Stage};
use depviz::application::use_cases::ResolveDependenciesUseCase;
use depviz::cli::Args;
use depviz::config::{load_config_from_path, Config};
use depviz::graph_resolution::services::RenderStyle;
use depviz::ports::outbound::{DependencyRecordScan, OutputPresenter, ProgressReporter};
use depviz::shared::error::ExitCode;
use depviz::shared::Result;
use std::path::Path;
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn run() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Load and echo the configuration
    let config = load_config_from_path(&args.config)?;
    let progress_reporter = StderrProgressReporter::new();
    for line in config.echo_lines() {
        progress_reporter.report(&line);
    }

    // Stage 1 stops here: the config loaded and validated.
    if args.stage == Stage::ConfigValidation {
        progress_reporter.report_completion("✅ Configuration validated. No issues found.");
        return Ok(());
    }

    let request = build_request(&config, args.stage);

    // Create the dependency source for the configured mode and execute
    // the use case (Dependency Injection)
    let response = if config.test_mode {
        let source = FlatFileSource::load(Path::new(&config.repository))?;
        for warning in source.warnings() {
            progress_reporter.report_error(&format!(
                "⚠️  Warning: Skipping mapping record ({})",
                warning
            ));
        }
        let records = Some(source.records().to_vec());
        let use_case = ResolveDependenciesUseCase::new(source, progress_reporter, records);
        use_case.execute(request)?
    } else {
        let source = PackageIndexClient::new(&config.repository)?;
        let use_case = ResolveDependenciesUseCase::new(source, progress_reporter, None);
        use_case.execute(request)?
    };

    present_payload(&config, &response)?;

    Ok(())
}

/// Builds the use case request from the validated config and the CLI
/// stage selection.
fn build_request(config: &Config, stage: Stage) -> ResolveRequest {
    let style = if config.ascii_tree {
        RenderStyle::Ascii
    } else {
        RenderStyle::List
    };

    ResolveRequest::new(
        config.package.clone(),
        config.reverse_target().clone(),
        config.filter_substring.clone(),
        style,
        stage,
    )
}

/// Writes the payload to the configured destination. Stages that
/// produce no payload leave stdout (and any output file) untouched.
fn present_payload(config: &Config, response: &ResolveResponse) -> Result<()> {
    if response.payload.is_empty() {
        return Ok(());
    }

    let presenter: Box<dyn OutputPresenter> = match &config.output_file {
        Some(path) => Box::new(FileSystemWriter::new(path.clone())),
        None => Box::new(StdoutPresenter::new()),
    };

    presenter.present(&format!("{}\n", response.payload))
}
