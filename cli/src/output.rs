//! Console rendering of the process flow.

use opsdesk_domain::trace::TraceStep;

/// Render the process flow as a numbered, actor-labeled list.
pub fn format_trace(steps: &[TraceStep]) -> String {
    let mut out = String::from("Process flow:\n");
    for step in steps {
        out.push_str(&format!(
            "  {}. [{}] {} - {}\n",
            step.step_number, step.actor, step.action, step.description
        ));
    }
    out
}
