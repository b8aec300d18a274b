use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for a per-item loop. Hidden automatically when stderr is not
/// a terminal.
pub fn progress_bar(len: usize, message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("█▓░"));
    }
    pb.set_message(message);
    pb
}
