use crate::trend::{can_go_newer, can_go_older_sized, TREND_WINDOW_MONTHS};
use serde::{Deserialize, Serialize};

/// User-driven inputs to the dashboard.
///
/// `offset` pages the trend window (0 is the most recent page) and
/// `selected_month` scopes the income/expense category breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewControls {
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub selected_month: Option<String>,
}

impl ViewControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_selected_month(mut self, month: impl Into<String>) -> Self {
        self.selected_month = Some(month.into());
        self
    }

    /// Moves one page back in time. Returns `false` and leaves the offset alone
    /// when no older page exists.
    pub fn older(&mut self, total_months: usize) -> bool {
        self.older_sized(total_months, TREND_WINDOW_MONTHS)
    }

    pub(crate) fn older_sized(&mut self, total_months: usize, window: usize) -> bool {
        if can_go_older_sized(total_months, self.offset, window) {
            self.offset += 1;
            true
        } else {
            false
        }
    }

    /// Moves one page toward the present. No-op at offset 0.
    pub fn newer(&mut self) -> bool {
        if can_go_newer(self.offset) {
            self.offset -= 1;
            true
        } else {
            false
        }
    }

    pub fn select_month(&mut self, month: Option<String>) {
        self.selected_month = month.filter(|m| !m.is_empty());
    }

    /// The month the category breakdown is scoped to.
    ///
    /// An explicit, non-empty selection wins. Otherwise the most recent month in
    /// `months_desc` is used, and `None` (unscoped) when there is no history.
    pub fn resolve_selected_month<'a>(&'a self, months_desc: &'a [String]) -> Option<&'a str> {
        match self.selected_month.as_deref() {
            Some(month) if !month.is_empty() => Some(month),
            _ => months_desc.first().map(String::as_str),
        }
    }
}
