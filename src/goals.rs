use crate::schema::{Goal, GoalType, RecordId};
use crate::utils::{finite_or_zero, round_to};
use serde::{Deserialize, Serialize};

/// Decimal places shown on the percentage label.
pub const LABEL_DECIMALS: u32 = 2;

/// Completion of a single goal.
///
/// `percent` is `None` when the goal has no usable target (a zero target, or a
/// ratio that is not finite). Such goals render an empty bar and a 0% label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub percent: Option<f64>,
    pub label_decimals: u32,
}

impl GoalProgress {
    pub fn from_amounts(current_amount: f64, target_amount: f64) -> Self {
        Self::with_decimals(current_amount, target_amount, LABEL_DECIMALS)
    }

    pub fn with_decimals(current_amount: f64, target_amount: f64, label_decimals: u32) -> Self {
        let current = finite_or_zero(current_amount);
        let target = finite_or_zero(target_amount);

        let percent = if target == 0.0 {
            None
        } else {
            Some(current / target * 100.0).filter(|p| p.is_finite())
        };

        Self {
            percent,
            label_decimals,
        }
    }

    pub fn for_goal(goal: &Goal) -> Self {
        Self::from_amounts(goal.current_amount, goal.target_amount)
    }

    pub fn is_applicable(&self) -> bool {
        self.percent.is_some()
    }

    /// Width of the progress bar, 0 to 100.
    pub fn bar_percent(&self) -> f64 {
        self.percent.map_or(0.0, |p| p.clamp(0.0, 100.0))
    }

    /// Unclamped percentage, rounded for display. May exceed 100.
    pub fn label_percent(&self) -> f64 {
        self.percent
            .map_or(0.0, |p| round_to(p, self.label_decimals))
    }

    pub fn label(&self) -> String {
        format!(
            "{:.*}%",
            self.label_decimals as usize,
            self.label_percent()
        )
    }

    pub fn is_complete(&self) -> bool {
        self.percent.map_or(false, |p| p >= 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSummary {
    pub id: RecordId,
    pub name: String,
    pub kind: GoalType,
    pub target_amount: f64,
    pub current_amount: f64,
    pub due_date: Option<String>,
    pub bar_percent: f64,
    pub label_percent: f64,
    pub label: String,
    pub applicable: bool,
    pub complete: bool,
}

impl GoalSummary {
    pub fn new(goal: &Goal, progress: GoalProgress) -> Self {
        Self {
            id: goal.id.clone(),
            name: goal.name.clone(),
            kind: goal.kind,
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            due_date: goal.due_date.clone(),
            bar_percent: progress.bar_percent(),
            label_percent: progress.label_percent(),
            label: progress.label(),
            applicable: progress.is_applicable(),
            complete: progress.is_complete(),
        }
    }
}

/// Progress for every goal, in input order.
pub fn summarize_goals(goals: &[Goal]) -> Vec<GoalSummary> {
    summarize_goals_with_decimals(goals, LABEL_DECIMALS)
}

pub(crate) fn summarize_goals_with_decimals(goals: &[Goal], label_decimals: u32) -> Vec<GoalSummary> {
    goals
        .iter()
        .map(|g| {
            let progress =
                GoalProgress::with_decimals(g.current_amount, g.target_amount, label_decimals);
            GoalSummary::new(g, progress)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_progress() {
        let p = GoalProgress::from_amounts(250.0, 1000.0);
        assert_eq!(p.bar_percent(), 25.0);
        assert_eq!(p.label_percent(), 25.0);
        assert_eq!(p.label(), "25.00%");
        assert!(p.is_applicable());
        assert!(!p.is_complete());
    }

    #[test]
    fn test_rounding_uses_two_places() {
        let p = GoalProgress::from_amounts(1.0, 3.0);
        assert_eq!(p.label_percent(), 33.33);
        assert_eq!(p.label(), "33.33%");
        assert!((p.bar_percent() - 33.333333).abs() < 1e-4);
    }

    #[test]
    fn test_exact_completion() {
        let p = GoalProgress::from_amounts(500.0, 500.0);
        assert_eq!(p.label_percent(), 100.0);
        assert_eq!(p.bar_percent(), 100.0);
        assert!(p.is_complete());
    }

    #[test]
    fn test_overachievement() {
        let p = GoalProgress::from_amounts(150.0, 100.0);
        assert_eq!(p.label_percent(), 150.0);
        assert_eq!(p.label(), "150.00%");
        assert_eq!(p.bar_percent(), 100.0);
    }

    #[test]
    fn test_zero_target_sentinel() {
        let p = GoalProgress::from_amounts(50.0, 0.0);
        assert!(!p.is_applicable());
        assert_eq!(p.percent, None);
        assert_eq!(p.bar_percent(), 0.0);
        assert_eq!(p.label_percent(), 0.0);
        assert_eq!(p.label(), "0.00%");
        assert!(!p.is_complete());

        let zero = GoalProgress::from_amounts(0.0, 0.0);
        assert!(!zero.is_applicable());
    }

    #[test]
    fn test_non_finite_inputs() {
        let p = GoalProgress::from_amounts(f64::NAN, 100.0);
        assert_eq!(p.percent, Some(0.0));

        let p = GoalProgress::from_amounts(10.0, f64::INFINITY);
        assert!(!p.is_applicable());

        // Tiny targets overflow the ratio.
        let p = GoalProgress::from_amounts(f64::MAX, 1e-300);
        assert!(!p.is_applicable());
        assert_eq!(p.bar_percent(), 0.0);
    }

    #[test]
    fn test_negative_target_keeps_bar_in_range() {
        let p = GoalProgress::from_amounts(50.0, -100.0);
        assert_eq!(p.label_percent(), -50.0);
        assert_eq!(p.bar_percent(), 0.0);
    }

    #[test]
    fn test_summaries() {
        let goals = vec![
            Goal {
                id: RecordId::new("g1"),
                name: "Emergency fund".to_string(),
                target_amount: 0.0,
                current_amount: 50.0,
                due_date: None,
                kind: GoalType::Saving,
            },
            Goal {
                id: RecordId::new("g2"),
                name: "Index fund".to_string(),
                target_amount: 200.0,
                current_amount: 50.0,
                due_date: Some("2025-12-31".to_string()),
                kind: GoalType::Investment,
            },
        ];

        let summaries = summarize_goals(&goals);
        assert_eq!(summaries.len(), 2);
        assert!(!summaries[0].applicable);
        assert_eq!(summaries[0].bar_percent, 0.0);
        assert_eq!(summaries[1].label, "25.00%");
        assert_eq!(summaries[1].kind, GoalType::Investment);

        let coarse = summarize_goals_with_decimals(&goals, 0);
        assert_eq!(coarse[1].label, "25%");
    }
}
