//! Interactive diagnostic chat loop on stdin/stdout.

use anyhow::Result;
use colored::Colorize;
use eigenscope_application::{
    DiagnosticConfig, DiagnosticOrchestrator, OrchestratorError, TurnOutput,
};
use eigenscope_domain::GlobalAnalysis;
use eigenscope_infrastructure::{InMemorySessionStore, JsonlTranscriptLogger, OpenAiGateway};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Drive one interactive diagnostic session. Returns whether the session
/// reached completion.
#[allow(clippy::too_many_arguments)]
pub async fn run_diagnostic(
    gateway: Arc<OpenAiGateway>,
    sessions: Arc<InMemorySessionStore>,
    config: DiagnosticConfig,
    organization: &str,
    user: &str,
    department: &str,
    industry: &str,
    transcript: Option<PathBuf>,
) -> Result<bool> {
    let mut orchestrator = DiagnosticOrchestrator::new(gateway, sessions, config);
    if let Some(path) = transcript
        && let Some(logger) = JsonlTranscriptLogger::new(&path)
    {
        println!("{}", format!("Transcript: {}", path.display()).dimmed());
        orchestrator = orchestrator.with_logger(Arc::new(logger));
    }

    println!();
    println!("{}", "Eigenscope diagnostic".bold());
    println!(
        "{}",
        format!("Department: {department} | Industry: {industry}").dimmed()
    );
    println!("{}", "Type your answers; 'quit' to abort.".dimmed());
    println!();

    let started = orchestrator
        .start(organization, user, department, industry)
        .await?;
    let mut session = started.session;
    let mut state = started.state;
    print_turn(&started.output);

    let stdin = std::io::stdin();
    loop {
        print!("{} ", ">".bold());
        std::io::stdout().flush()?;

        let mut answer = String::new();
        if stdin.lock().read_line(&mut answer)? == 0 {
            println!("\n{}", "Input closed; session left in progress.".dimmed());
            return Ok(false);
        }
        let answer = answer.trim();
        if answer.is_empty() {
            continue;
        }
        if answer.eq_ignore_ascii_case("quit") || answer.eq_ignore_ascii_case("exit") {
            println!("{}", "Session left in progress.".dimmed());
            return Ok(false);
        }

        match orchestrator
            .next_turn(&mut session, &mut state, industry, answer)
            .await
        {
            Ok(output) => {
                print_turn(&output);
                if let Some(completion) = output.completion {
                    println!();
                    println!("{}", "EIGENQUESTION DISCOVERED".bold().green());
                    println!("\"{}\"", completion.eigenquestion.bold());
                    println!();
                    println!("{}", completion.reasoning);
                    println!();
                    println!(
                        "{}",
                        format!("Estimated value: {}", completion.total_value).dimmed()
                    );
                    return Ok(true);
                }
            }
            Err(OrchestratorError::Precondition(message)) => {
                println!("{}", message.yellow());
                return Ok(session.is_completed());
            }
            Err(error) => {
                // turn failed; state carries the error turn, answer can be resubmitted
                println!("{}", format!("{error}").red());
                println!("{}", "Please resubmit your answer.".dimmed());
            }
        }
    }
}

fn print_turn(output: &TurnOutput) {
    if let Some(pattern) = &output.pattern_notice {
        println!();
        println!(
            "{}",
            format!(
                "Pattern spotted ({}, {}): {}",
                pattern.pattern_type, pattern.confidence, pattern.description
            )
            .yellow()
        );
    }

    if !output.probing_questions.is_empty() {
        println!();
        println!("{}", "Before we lock this in:".dimmed());
        for question in &output.probing_questions {
            println!("  {} {}", "-".dimmed(), question.dimmed());
        }
    }

    println!();
    println!("{}", output.question.bold());
    if !output.explanation.is_empty() {
        println!("{}", output.explanation.dimmed());
    }

    if output.score_summary.is_high_priority {
        println!(
            "{}",
            format!(
                "high priority: cascade {}/10, specificity {}/10",
                output.score_summary.cascade_score, output.score_summary.specificity_score
            )
            .red()
            .dimmed()
        );
    }
}

/// Render the organization-wide report.
pub fn print_global_report(analysis: &GlobalAnalysis) {
    let report = &analysis.report;
    println!();
    println!("{}", "ORGANIZATION REPORT".bold());
    println!("{}", format!("generated {}", analysis.generated_at).dimmed());
    println!();
    println!("{}", report.global_eigenquestion.bold());
    println!();
    println!("{}", report.reasoning);

    if !report.cross_department_patterns.is_empty() {
        println!();
        println!("{}", "Cross-department patterns:".bold());
        for pattern in &report.cross_department_patterns {
            println!("  - {pattern}");
        }
    }

    if !report.priority_sequence.is_empty() {
        println!();
        println!("{}", "Automation priority:".bold());
        for (i, entry) in report.priority_sequence.iter().enumerate() {
            println!(
                "  {}. {} - {} ({})",
                i + 1,
                entry.department,
                entry.workflow,
                entry.value
            );
        }
    }

    println!();
    println!(
        "{}",
        format!("Total organization value: {}", report.total_organization_value).bold()
    );
}
