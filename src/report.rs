//! Textual rendering of merged benchmark results.

use crate::runner::MergedResults;

/// Render one environment's merged results. Pure function of the merged
/// structure so output can be asserted on directly.
pub fn render(name: &str, results: &MergedResults) -> String {
    let mut out = String::new();
    out.push_str(&banner(name));
    out.push('\n');
    for story in results.stories() {
        out.push_str(&format!("    Story: {}\n", story.name));
        for (label, times) in &story.scenarios {
            let mut message = format!("{label} took {} seconds", round4(mean(times)));
            if times.len() >= 3 {
                let best = times.iter().copied().fold(f64::INFINITY, f64::min);
                let worst = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                message.push_str(&format!(
                    " (best: {}, worst: {})",
                    round4(best),
                    round4(worst)
                ));
            }
            out.push_str(&format!("        {message}\n"));
        }
    }
    out
}

pub fn print(name: &str, results: &MergedResults) {
    print!("{}", render(name, results));
}

fn banner(name: &str) -> String {
    if name.len() >= 80 {
        return name.to_string();
    }
    let pad = 80 - name.len();
    let left = pad / 2;
    format!(
        "{}{}{}",
        "=".repeat(left),
        name,
        "=".repeat(pad - left)
    )
}

fn mean(times: &[f64]) -> f64 {
    if times.is_empty() {
        return 0.0;
    }
    times.iter().sum::<f64>() / times.len() as f64
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
