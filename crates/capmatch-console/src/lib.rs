//! Colored console output for allocation runs.
//!
//! Provides a `tracing` layer that renders engine and evaluator events.
//!
//! ## Log Levels
//!
//! - **INFO**: Run lifecycle (match start/end, round end)
//! - **DEBUG**: Round start, stability check, evaluation summary
//! - **TRACE**: Individual proposals

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Installs the console subscriber.
///
/// Safe to call multiple times; only the first call has effect. The filter
/// comes from `RUST_LOG` and defaults to `capmatch=info,capmatch_engine=info`.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(MatchConsoleLayer)
            .try_init();
    });
}

fn default_filter() -> EnvFilter {
    EnvFilter::new("capmatch=info,capmatch_engine=info,capmatch_eval=warn")
}

fn print_banner() {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(
        stdout,
        "{} {}",
        "capmatch".bright_cyan().bold(),
        format!("v{VERSION} - capstone project allocation").bright_white()
    );
    let _ = stdout.flush();
}

/// A tracing layer that formats allocation events with colors.
pub struct MatchConsoleLayer;

impl<S: Subscriber> Layer<S> for MatchConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !target.starts_with("capmatch_engine")
            && !target.starts_with("capmatch_eval")
            && !target.starts_with("capmatch::")
        {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    tie_break: Option<String>,
    student: Option<String>,
    topic: Option<String>,
    outcome: Option<String>,
    violation: Option<String>,
    message: Option<String>,
    students: Option<u64>,
    topics: Option<u64>,
    supervisors: Option<u64>,
    round: Option<u64>,
    candidates: Option<u64>,
    proposals: Option<u64>,
    accepted: Option<u64>,
    rejected: Option<u64>,
    rounds: Option<u64>,
    matched: Option<u64>,
    unmatched: Option<u64>,
    total: Option<u64>,
    duration_ms: Option<u64>,
    blocking_pairs: Option<u64>,
    violations: Option<u64>,
    match_rate: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "student" => self.student = Some(s),
            "topic" => self.topic = Some(s),
            "violation" => self.violation = Some(s),
            "message" => self.message = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let slot = match field.name() {
            "students" => &mut self.students,
            "topics" => &mut self.topics,
            "supervisors" => &mut self.supervisors,
            "round" => &mut self.round,
            "candidates" => &mut self.candidates,
            "proposals" => &mut self.proposals,
            "accepted" => &mut self.accepted,
            "rejected" => &mut self.rejected,
            "rounds" => &mut self.rounds,
            "matched" => &mut self.matched,
            "unmatched" => &mut self.unmatched,
            "total" => &mut self.total,
            "duration_ms" => &mut self.duration_ms,
            "blocking_pairs" => &mut self.blocking_pairs,
            "violations" => &mut self.violations,
            _ => return,
        };
        *slot = Some(value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "match_rate" {
            self.match_rate = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let value = value.to_string();
        match field.name() {
            "event" => self.event = Some(value),
            "tie_break" => self.tie_break = Some(value),
            "student" => self.student = Some(value),
            "topic" => self.topic = Some(value),
            "outcome" => self.outcome = Some(value),
            "violation" => self.violation = Some(value),
            "message" => self.message = Some(value),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "match_start" => format_match_start(v),
        "round_start" => format_round_start(v),
        "proposal" => format_proposal(v, level),
        "round_end" => format_round_end(v),
        "match_end" => format_match_end(v),
        "stability_check" => format_stability(v),
        "constraint_violation" => format_violation(v),
        "evaluation" => format_evaluation(v),
        "allocation_done" => format_allocation_done(v),
        "allocation_defect" => format_allocation_defect(v),
        _ => String::new(),
    }
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_match_start(v: &EventVisitor) -> String {
    format!(
        "{} Matching │ {} students │ {} topics │ {} supervisors │ {} order",
        "▶".bright_green().bold(),
        count(v.students).bright_yellow(),
        count(v.topics).bright_yellow(),
        count(v.supervisors).bright_yellow(),
        v.tie_break.as_deref().unwrap_or("ascending_id").bright_magenta()
    )
}

fn format_round_start(v: &EventVisitor) -> String {
    format!(
        "{} Round {} started │ {} candidates",
        "▶".bright_blue(),
        count(v.round).white().bold(),
        count(v.candidates).white()
    )
}

fn format_proposal(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }
    let outcome = v.outcome.as_deref().unwrap_or("unknown");
    let icon = if outcome == "accepted" {
        "✓".bright_green().to_string()
    } else {
        "✗".bright_red().to_string()
    };

    format!(
        "{} {:>12} → {:<8} │ {}",
        icon,
        v.student.as_deref().unwrap_or("?").bright_black(),
        v.topic.as_deref().unwrap_or("?").bright_black(),
        outcome.bright_black()
    )
}

fn format_round_end(v: &EventVisitor) -> String {
    format!(
        "{} Round {} ended │ {} proposals │ {} accepted │ {} rejected",
        "◀".bright_blue(),
        count(v.round).white().bold(),
        count(v.proposals).white(),
        count(v.accepted).bright_green(),
        count(v.rejected).yellow()
    )
}

fn format_match_end(v: &EventVisitor) -> String {
    let matched = v.matched.unwrap_or(0);
    let unmatched = v.unmatched.unwrap_or(0);
    let total = matched + unmatched;
    let rate = if total == 0 {
        0.0
    } else {
        matched as f64 / total as f64 * 100.0
    };

    let unmatched_str = if unmatched == 0 {
        count(v.unmatched).bright_green().to_string()
    } else {
        count(v.unmatched).bright_red().to_string()
    };

    format!(
        "{} Matching complete │ {} │ {} rounds │ {} matched │ {} unmatched │ {}",
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        count(v.rounds).white(),
        count(v.matched).bright_green(),
        unmatched_str,
        format!("{rate:.1}%").bright_magenta().bold()
    )
}

fn format_stability(v: &EventVisitor) -> String {
    match v.blocking_pairs.unwrap_or(0) {
        0 => format!("{} Stable │ no blocking pairs", "✓".bright_green()),
        n => format!(
            "{} Unstable │ {} blocking pairs",
            "✗".bright_red().bold(),
            n.to_formatted_string(&Locale::en).bright_red()
        ),
    }
}

fn format_violation(v: &EventVisitor) -> String {
    format!(
        "{} {}",
        "✗".bright_red().bold(),
        v.violation.as_deref().unwrap_or("constraint violated").bright_red()
    )
}

fn format_evaluation(v: &EventVisitor) -> String {
    format!(
        "{} Evaluated │ {} matched │ {} blocking pairs │ {} violations",
        "◆".bright_cyan(),
        format!("{:.1}%", v.match_rate.unwrap_or(0.0) * 100.0).bright_magenta(),
        count(v.blocking_pairs).white(),
        count(v.violations).white()
    )
}

fn format_allocation_done(v: &EventVisitor) -> String {
    format!(
        "{} Allocation done │ {} of {} students matched │ {}",
        "✓".bright_green().bold(),
        count(v.matched).bright_green(),
        count(v.total).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).bright_cyan()
    )
}

fn format_allocation_defect(v: &EventVisitor) -> String {
    format!(
        "{} Allocation defective │ {} blocking pairs │ {} violations",
        "✗".bright_red().bold(),
        count(v.blocking_pairs).bright_red(),
        count(v.violations).bright_red()
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
