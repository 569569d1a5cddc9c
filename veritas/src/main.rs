//! Demo runner: drives one full analysis run from the command line and
//! prints the resulting pipeline, results, transcript, and verdict.
//!
//! Point `--base-url` at a live analysis service, or at nothing: an
//! unreachable service exercises the identical local-simulation run.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use veritas::{
    shared_context, AnalysisInput, EngineConfig, HttpAnalysisService, Orchestrator, TimingConfig,
};

#[derive(Parser, Debug)]
#[command(name = "veritas", about = "Run an information trust analysis end to end")]
struct Args {
    /// Topic to analyze; defaults to the built-in sample input
    #[arg(long)]
    topic: Option<String>,

    /// Free-text context for the topic
    #[arg(long)]
    context: Option<String>,

    /// Significance score in [0, 1]
    #[arg(long, default_value_t = 0.8)]
    significance: f64,

    /// Analysis service base URL
    #[arg(long, default_value = "http://localhost:8000")]
    base_url: String,

    /// Skip the pacing waits between stages and utterance reveals
    #[arg(long)]
    fast: bool,

    /// Use the extended seven-part fallback debate script
    #[arg(long)]
    extended_debate: bool,

    /// Append the judge's closing line to the fallback debate script
    #[arg(long)]
    closing_judge: bool,
}

/// Built-in sample input, used when no topic is given.
fn sample_input() -> AnalysisInput {
    AnalysisInput::new(
        "Reported equipment failure at the Northgate processing facility",
        "Initial reports describe a major equipment failure halting operations at the \
         facility. Coverage diverges sharply on the cause and severity: industry press \
         attributes it to deferred maintenance, advocacy outlets point to regulatory \
         rollbacks, and social media posts claim the incident was staged. Operator \
         statements confirm the halt but dispute the severity estimates.",
        0.99,
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("veritas=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let input = match args.topic {
        Some(topic) => AnalysisInput::new(topic, args.context.unwrap_or_default(), args.significance),
        None => sample_input(),
    };

    let mut config = EngineConfig::default();
    if args.fast {
        config.timing = TimingConfig::instant();
    }
    config.debate.script.extended = args.extended_debate;
    config.debate.script.closing_judge = args.closing_judge;

    let service = Arc::new(HttpAnalysisService::new(args.base_url));
    let orchestrator = Orchestrator::new(service, config, shared_context());

    println!("Analyzing: {}\n", input.topic);
    let report = orchestrator.start(input).await?;

    let ctx = orchestrator.context();
    let ctx = ctx.lock().await;

    println!("Pipeline (progress {}%):", ctx.pipeline.progress());
    for stage in ctx.pipeline.stages() {
        println!("  [{:>10}] {}: {}", stage.state.to_string(), stage.id, stage.message);
    }

    println!(
        "\nResults: {} total, {} relevant, average trust {}%{}",
        report.summary.total,
        report.summary.relevant,
        report.summary.average_trust_percent,
        if report.degraded { " (fallback data)" } else { "" },
    );
    for result in ctx.results().results() {
        println!(
            "  - {} [{} | {} | trust {:.0}%]",
            result.title,
            result.source_type,
            result.perspective,
            result.trust_score * 100.0
        );
    }

    println!("\nDebate transcript:");
    for utterance in ctx.session().utterances() {
        println!("  {:>2}. {}: {}", utterance.sequence + 1, utterance.speaker, utterance.content);
    }

    println!("\nVerdict: {}% trust", report.verdict.trust_score_percent);
    println!("{}", report.verdict.reasoning);
    if let Some(recommendation) = &report.verdict.recommendation {
        println!("Recommendation: {}", recommendation);
    }

    Ok(())
}
