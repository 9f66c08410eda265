use profile_core::{AppViewModel, CandidateRowView, DetailPanel, Phase, ServiceStatus};

use super::constants::RULE_WIDTH;

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("-".repeat(RULE_WIDTH));
    lines.push(format!(
        "Status: {} | Service: {}",
        phase_label(view.phase),
        service_label(&view.service_status)
    ));
    lines.push(format!(
        "Student's Name *: {}",
        if view.name.is_empty() {
            "(empty)"
        } else {
            view.name.as_str()
        }
    ));
    lines.push(format!(
        "University: {} ({})",
        view.affiliation,
        view.affiliation.full_name()
    ));
    lines.push(format!(
        "Degree Status: {} ({})",
        view.stage,
        view.stage.long_label()
    ));
    lines.push(button(view.search_label, view.search_enabled));

    if let Some(message) = &view.validation_message {
        lines.push(format!("! {message}"));
    }

    if !view.candidates.is_empty() {
        lines.push(String::new());
        lines.push(format!("Top {} LinkedIn Profiles", view.candidates.len()));
        if !view.selection_enabled {
            lines.push("  (selection disabled while loading)".to_string());
        }
        lines.extend(view.candidates.iter().flat_map(candidate_row));
    }

    match &view.detail {
        DetailPanel::Hidden => {}
        DetailPanel::Loading { url } => {
            lines.push(String::new());
            lines.push(format!("Selected Profile: {url}"));
            lines.push("  Loading...".to_string());
        }
        DetailPanel::Ready {
            url,
            summary,
            links,
        } => {
            lines.push(String::new());
            lines.push(format!("Selected Profile: {url}"));
            lines.push("Experience Summary".to_string());
            lines.push(format!("  {summary}"));
            if !links.is_empty() {
                lines.push("Links".to_string());
                lines.extend(links.iter().map(|link| format!("  - {link}")));
            }
        }
    }

    if let Some(message) = &view.error_message {
        lines.push(String::new());
        lines.push(format!("Error: {message}"));
    }

    lines
}

/// Boxed alert used for notifications the operator must acknowledge.
pub fn alert(message: &str) -> Vec<String> {
    let width = message.chars().count().max(28);
    vec![
        format!("+{}+", "-".repeat(width + 2)),
        format!("| {message:<width$} |"),
        format!("| {:<width$} |", "[press Enter to dismiss]"),
        format!("+{}+", "-".repeat(width + 2)),
    ]
}

fn button(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[ {label} ]")
    } else {
        format!("( {label} )  -- disabled")
    }
}

fn candidate_row(row: &CandidateRowView) -> [String; 2] {
    let marker = if row.selected { '*' } else { ' ' };
    [
        format!("{marker}{:>2}. {}", row.index, row.title),
        format!("     {}", row.url),
    ]
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "Idle",
        Phase::Searching => "Searching",
        Phase::ResultsReady => "Results ready",
        Phase::FetchingDetail => "Loading profile",
        Phase::DetailReady => "Profile ready",
        Phase::Error => "Error",
    }
}

fn service_label(status: &ServiceStatus) -> String {
    match status {
        ServiceStatus::Unknown => "checking".to_string(),
        ServiceStatus::Available => "available".to_string(),
        ServiceStatus::Unavailable(reason) => format!("unavailable ({reason})"),
    }
}
