use indicatif::{ProgressBar, ProgressStyle};

const JOIN_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] {msg} [{bar:40.cyan/blue}] {pos}/{len} drug products";

/// Progress bar for the join of one scope. Hidden when stderr is not a terminal.
pub fn join_progress_bar(total: usize, scope: &str) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template(JOIN_TEMPLATE) {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar.set_message(format!("joining {scope}"));
    bar
}
