//! CLI output formatting.
//!
//! One block per candidate file, followed by a blank line. Resolutions are
//! printed height first.
//!
//! ```text
//! Path: ./IMG_0001.jpg
//! Resolution: 3000 x 4000
//! Scaled resolution: 1920 x 2560
//! Written to ./IMG_0001_scaled.jpg
//!
//! Path: ./icon.png
//! Resolution: 512 x 512
//! Image dimensions are smaller than the threshold
//!
//! Could not read ./broken.png: Processing failed: ...
//!
//! Rescaled 1 image, 1 below threshold, 1 failed
//! ```
//!
//! Format functions return `Vec<String>` for testability; the `print_*`
//! wrappers write to stdout.

use crate::imaging::Dimensions;
use crate::process::{ProcessEvent, RescaleSummary};
use std::path::Path;

fn resolution(dims: &Dimensions) -> String {
    format!("{} x {}", dims.height, dims.width)
}

fn header(path: &Path, dims: &Dimensions) -> Vec<String> {
    vec![
        format!("Path: {}", path.display()),
        format!("Resolution: {}", resolution(dims)),
    ]
}

/// Format the report block for one file, including the trailing blank line.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    let mut lines = match event {
        ProcessEvent::Unreadable { path, reason } => {
            vec![format!("Could not read {}: {}", path.display(), reason)]
        }
        ProcessEvent::BelowThreshold { path, dimensions } => {
            let mut lines = header(path, dimensions);
            lines.push("Image dimensions are smaller than the threshold".to_string());
            lines
        }
        ProcessEvent::Rescaled {
            path,
            dimensions,
            scaled,
            output,
        } => {
            let mut lines = header(path, dimensions);
            lines.push(format!("Scaled resolution: {}", resolution(scaled)));
            lines.push(format!("Written to {}", output.display()));
            lines
        }
        ProcessEvent::Failed {
            path,
            dimensions,
            scaled,
            reason,
        } => {
            let mut lines = header(path, dimensions);
            lines.push(format!("Scaled resolution: {}", resolution(scaled)));
            lines.push(format!("Could not rescale {}: {}", path.display(), reason));
            lines
        }
    };
    lines.push(String::new());
    lines
}

pub fn print_process_event(event: &ProcessEvent) {
    for line in format_process_event(event) {
        println!("{}", line);
    }
}

pub fn format_summary(summary: &RescaleSummary) -> Vec<String> {
    vec![summary.to_string()]
}

pub fn print_summary(summary: &RescaleSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    #[test]
    fn rescaled_block() {
        let event = ProcessEvent::Rescaled {
            path: PathBuf::from("./big.jpg"),
            dimensions: dims(4000, 3000),
            scaled: dims(2560, 1920),
            output: PathBuf::from("./big_scaled.jpg"),
        };
        assert_eq!(
            format_process_event(&event),
            vec![
                "Path: ./big.jpg",
                "Resolution: 3000 x 4000",
                "Scaled resolution: 1920 x 2560",
                "Written to ./big_scaled.jpg",
                "",
            ]
        );
    }

    #[test]
    fn below_threshold_block() {
        let event = ProcessEvent::BelowThreshold {
            path: PathBuf::from("./icon.png"),
            dimensions: dims(512, 256),
        };
        assert_eq!(
            format_process_event(&event),
            vec![
                "Path: ./icon.png",
                "Resolution: 256 x 512",
                "Image dimensions are smaller than the threshold",
                "",
            ]
        );
    }

    #[test]
    fn unreadable_block() {
        let event = ProcessEvent::Unreadable {
            path: PathBuf::from("./broken.png"),
            reason: "bad header".into(),
        };
        assert_eq!(
            format_process_event(&event),
            vec!["Could not read ./broken.png: bad header", ""]
        );
    }

    #[test]
    fn failed_block_names_reason() {
        let event = ProcessEvent::Failed {
            path: PathBuf::from("./big.png"),
            dimensions: dims(3000, 3000),
            scaled: dims(2560, 2560),
            reason: "disk full".into(),
        };
        let lines = format_process_event(&event);
        assert_eq!(lines[2], "Scaled resolution: 2560 x 2560");
        assert_eq!(lines[3], "Could not rescale ./big.png: disk full");
        assert_eq!(lines.last().unwrap(), "");
    }

    #[test]
    fn summary_line() {
        let summary = RescaleSummary {
            rescaled: 3,
            below_threshold: 0,
            failed: 1,
        };
        assert_eq!(
            format_summary(&summary),
            vec!["Rescaled 3 images, 0 below threshold, 1 failed"]
        );
    }
}
