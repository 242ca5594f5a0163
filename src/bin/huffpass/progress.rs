//! Progress reporting for the two slow phases of a run: loading the input file and
//! running the passes over it.
//!
//! Built on `indicatif`, see <https://docs.rs/indicatif>

use std::{
    fs::File,
    io::{self, Read},
    time::Duration,
};

use indicatif::{HumanBytes, HumanDuration, ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::info;

// https://docs.rs/indicatif/latest/indicatif/index.html#templates
const READ_TEMPLATE: &str =
    "{msg} {wide_bar} {binary_bytes}/{binary_total_bytes} ({binary_bytes_per_sec}, {eta} left)";
const WORK_TEMPLATE: &str = "{spinner} {msg} [{elapsed}]";

/// Load all of `file` into memory while drawing a byte counter on stderr.
///
/// `size` is only used to scale the bar, the whole file is read even if it grew since.
pub fn read_with_progress(file: File, size: u64, label: &str) -> io::Result<Vec<u8>> {
    let bar = ProgressBar::with_draw_target(Some(size), ProgressDrawTarget::stderr_with_hz(8))
        .with_message(format!("reading {label}"));
    if let Ok(style) = ProgressStyle::with_template(READ_TEMPLATE) {
        bar.set_style(style);
    }

    let mut buffer = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
    bar.wrap_read(file).read_to_end(&mut buffer)?;
    bar.finish_and_clear();

    let elapsed = bar.elapsed();
    info!(
        "read {} in {} ({}/s)",
        HumanBytes(buffer.len() as u64),
        HumanDuration(elapsed),
        HumanBytes(bytes_per_second(buffer.len() as u64, elapsed))
    );
    Ok(buffer)
}

/// A spinner shown while the passes run, since they report nothing until they are done.
///
/// Call [ProgressBar::finish_and_clear] on the result once the work is over.
pub fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner().with_message(message);
    if let Ok(style) = ProgressStyle::with_template(WORK_TEMPLATE) {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Average throughput, everything below a millisecond counts as a millisecond
fn bytes_per_second(bytes: u64, elapsed: Duration) -> u64 {
    let millis = elapsed.as_millis().max(1);
    u64::try_from(u128::from(bytes) * 1000 / millis).unwrap_or(u64::MAX)
}
