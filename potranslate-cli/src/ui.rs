use potranslate::RunOutcome;

const FALLBACK_WIDTH: usize = 80;

/// Width of the attached terminal, or 80 columns when there is none.
pub fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((columns, _)) if columns > 0 => columns as usize,
        _ => FALLBACK_WIDTH,
    }
}

/// The line printed once a run has finished.
pub fn outcome_message(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::Submitted { order_id, jobs } => {
            format!("✅ Submitted {jobs} job(s) as order {order_id}")
        }
        RunOutcome::Incomplete { order_id } => {
            format!("Order {order_id} is not yet complete")
        }
        RunOutcome::Quit { order_id } => {
            format!("Review stopped, order {order_id} is still pending")
        }
        RunOutcome::Completed { order_id, updated } => {
            format!("✅ Translation has been completed: order {order_id}, {updated} entries updated")
        }
    }
}
