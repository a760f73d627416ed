//! Report presentation options.

/// Report presentation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Rows shown in the console preview.
    pub preview_rows: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { preview_rows: 20 }
    }
}

impl ReportOptions {
    #[must_use]
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_defaults_to_twenty_rows() {
        assert_eq!(ReportOptions::default().preview_rows, 20);
        assert_eq!(ReportOptions::default().with_preview_rows(5).preview_rows, 5);
    }
}
