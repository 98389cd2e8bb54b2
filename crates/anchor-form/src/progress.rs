use serde::Serialize;

use crate::spec::Step;

/// Completion ratio in `[0, 1]` for a 1-based `current` step out of `total`.
pub fn completion_ratio(current: usize, total: usize) -> f64 {
    if total <= 1 {
        return 1.0;
    }
    let current = current.clamp(1, total);
    (current - 1) as f64 / (total - 1) as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerState {
    Completed,
    Current,
    Upcoming,
}

/// One circle of the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepMarker {
    pub number: usize,
    pub label: &'static str,
    pub description: &'static str,
    pub state: MarkerState,
}

pub fn step_markers(current: Step) -> Vec<StepMarker> {
    Step::ALL
        .iter()
        .map(|step| StepMarker {
            number: step.number(),
            label: step.label(),
            description: step.description(),
            state: match step.number().cmp(&current.number()) {
                std::cmp::Ordering::Less => MarkerState::Completed,
                std::cmp::Ordering::Equal => MarkerState::Current,
                std::cmp::Ordering::Greater => MarkerState::Upcoming,
            },
        })
        .collect()
}

/// Fixed-width text bar, e.g. `[#####.....] 50%`.
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let ratio = ratio.clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        ".".repeat(width - filled),
        (ratio * 100.0).round() as u32
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_spans_first_to_last() {
        assert_eq!(completion_ratio(1, 5), 0.0);
        assert_eq!(completion_ratio(3, 5), 0.5);
        assert_eq!(completion_ratio(5, 5), 1.0);
    }

    #[test]
    fn ratio_handles_degenerate_totals() {
        assert_eq!(completion_ratio(1, 1), 1.0);
        assert_eq!(completion_ratio(0, 5), 0.0);
        assert_eq!(completion_ratio(9, 5), 1.0);
    }

    #[test]
    fn markers_split_around_current() {
        let markers = step_markers(Step::AnchorRequirements);
        let states: Vec<_> = markers.iter().map(|marker| marker.state).collect();
        assert_eq!(
            states,
            vec![
                MarkerState::Completed,
                MarkerState::Completed,
                MarkerState::Current,
                MarkerState::Upcoming,
                MarkerState::Upcoming,
            ]
        );
        assert_eq!(markers[2].label, "Requirements");
    }

    #[test]
    fn bar_renders_percentage() {
        assert_eq!(progress_bar(0.5, 10), "[#####.....]  50%");
        assert_eq!(progress_bar(1.0, 4), "[####] 100%");
    }
}
