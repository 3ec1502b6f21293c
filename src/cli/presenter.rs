//! CLI presenter for output formatting

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::evaluation::{Confidence, EvaluationEnvelope, EvaluationResult, Severity};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
    is_spinner_active: Arc<AtomicBool>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self {
            spinner: None,
            is_spinner_active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start a spinner with message and hand back a handle to it
    pub fn start_spinner(&mut self, message: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner.clone());
        self.is_spinner_active.store(true, Ordering::SeqCst);
        spinner
    }

    /// Whether a spinner is currently drawing
    pub fn is_spinner_active(&self) -> bool {
        self.is_spinner_active.load(Ordering::SeqCst)
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print the envelope as pretty JSON to stdout
    pub fn envelope_json(&self, envelope: &EvaluationEnvelope) -> Result<(), serde_json::Error> {
        self.output(&serde_json::to_string_pretty(envelope)?);
        Ok(())
    }

    /// Print a human-readable report of a finished evaluation
    pub fn evaluation(&self, evaluation: &EvaluationResult, raw_response: Option<&str>) {
        let grade = &evaluation.grade;
        let analysis = &evaluation.analysis;
        let feedback = &evaluation.feedback;

        println!();
        println!(
            "{} {}  {}",
            "Grade:".bold(),
            grade_color(grade.final_grade, &format!("{:.1}/10", grade.final_grade)),
            confidence_badge(grade.confidence)
        );
        println!(
            "{} {} ({})",
            "Subject:".bold(),
            evaluation.detected_subject,
            evaluation.difficulty_level
        );
        println!("{} {:.0}%", "Coverage:".bold(), evaluation.coverage_percentage);
        println!(
            "{} {}  {} {}",
            "Duration:".bold(),
            format_duration(evaluation.audio_duration_seconds),
            "Words:".bold(),
            evaluation.word_count
        );
        if !grade.general_justification.is_empty() {
            println!("{}", grade.general_justification.dimmed());
        }

        section("Concepts");
        for concept in &analysis.correct_concepts {
            println!("  {} {}", "✓".green(), concept);
        }
        for concept in &analysis.omitted_concepts {
            println!("  {} {}", "✗".red(), concept);
        }

        if !analysis.factual_errors.is_empty() {
            section("Factual errors");
            for error in &analysis.factual_errors {
                println!("  {} {}", severity_tag(error.severity), error.description);
                if !error.student_quote.is_empty() {
                    println!("      \"{}\"", error.student_quote.italic());
                }
            }
        }

        if !analysis.fabricated_claims.is_empty() {
            section("Fabricated claims");
            bullets(&analysis.fabricated_claims);
        }

        let student = &feedback.student_feedback;
        section("Feedback for the student");
        if !student.summary.is_empty() {
            println!("  {}", student.summary);
        }
        labeled_bullets("Strengths", &student.strengths);
        labeled_bullets("To improve", &student.improvement_areas);
        if !student.corrected_errors.is_empty() {
            println!("  {}", "Corrections:".bold());
            for fix in &student.corrected_errors {
                println!(
                    "    {} {} {} {}",
                    "•".cyan(),
                    fix.said.strikethrough(),
                    "→".cyan(),
                    fix.correct
                );
                if !fix.why.is_empty() {
                    println!("      {}", fix.why.dimmed());
                }
            }
        }
        labeled_bullets("Study next", &student.study_recommendations);
        if !student.motivational_message.is_empty() {
            println!("  {}", student.motivational_message.green());
        }

        let note = &feedback.teacher_note;
        section("Teacher note");
        for (label, text) in [
            ("Observations", &note.observations),
            ("Error pattern", &note.error_pattern),
            ("Reinforce", &note.reinforcement_suggestion),
            ("Compared to expected", &note.comparison_to_expected),
        ] {
            if !text.is_empty() {
                println!("  {} {}", format!("{}:", label).bold(), text);
            }
        }

        if let Some(raw) = raw_response {
            section("Raw model output (fallback used)");
            println!("{}", raw.dimmed());
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

fn section(title: &str) {
    println!();
    println!("{}", title.bold().underline());
}

fn bullets(items: &[String]) {
    for item in items {
        println!("  {} {}", "•".cyan(), item);
    }
}

fn labeled_bullets(label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("  {}", format!("{}:", label).bold());
    for item in items {
        println!("    {} {}", "•".cyan(), item);
    }
}

fn grade_color(grade: f64, text: &str) -> ColoredString {
    if grade >= 7.0 {
        text.green().bold()
    } else if grade >= 5.0 {
        text.yellow().bold()
    } else {
        text.red().bold()
    }
}

fn confidence_badge(confidence: Confidence) -> ColoredString {
    let text = format!("[{} confidence]", confidence);
    match confidence {
        Confidence::High => text.green(),
        Confidence::Medium => text.normal(),
        Confidence::Low => text.red(),
    }
}

fn severity_tag(severity: Severity) -> ColoredString {
    let text = format!("[{}]", severity);
    match severity {
        Severity::Mild => text.yellow(),
        Severity::Moderate => text.magenta(),
        Severity::Severe => text.red().bold(),
    }
}

/// Format seconds as `m:ss`, or a dash when unknown
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s.is_finite() && s >= 0.0 => {
            let total = s.round() as u64;
            format!("{}:{:02}", total / 60, total % 60)
        }
        _ => "-".to_string(),
    }
}
