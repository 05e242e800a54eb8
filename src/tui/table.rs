//! Table display state

/// Selection and scroll state for the results table.
pub struct TableState {
    pub selected: Option<usize>,
    pub scroll_offset: usize,
    pub visible_rows: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            selected: None,
            scroll_offset: 0,
            visible_rows: 20,
        }
    }
}

impl TableState {
    /// Reset after a new page of rows arrives.
    pub fn reset(&mut self, total: usize) {
        self.selected = if total == 0 { None } else { Some(0) };
        self.scroll_offset = 0;
    }

    pub fn select_next(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) => (i + 1).min(total - 1),
            None => 0,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn select_prev(&mut self) {
        let i = match self.selected {
            Some(0) | None => 0,
            Some(i) => i - 1,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn page_down(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let jump = self.visible_rows.saturating_sub(1);
        let i = match self.selected {
            Some(i) => (i + jump).min(total - 1),
            None => jump.min(total - 1),
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn page_up(&mut self) {
        let jump = self.visible_rows.saturating_sub(1);
        let i = match self.selected {
            Some(i) => i.saturating_sub(jump),
            None => 0,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn select_first(&mut self) {
        self.selected = Some(0);
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        self.selected = Some(total - 1);
        self.ensure_visible(total - 1);
    }

    fn ensure_visible(&mut self, index: usize) {
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if self.visible_rows > 0 && index >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = index - self.visible_rows + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_selects_first_row_when_any() {
        let mut table = TableState::default();
        table.selected = Some(7);
        table.scroll_offset = 3;
        table.reset(15);
        assert_eq!(table.selected, Some(0));
        assert_eq!(table.scroll_offset, 0);

        table.reset(0);
        assert_eq!(table.selected, None);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut table = TableState::default();
        table.reset(3);
        table.select_next(3);
        table.select_next(3);
        table.select_next(3);
        assert_eq!(table.selected, Some(2));
        table.select_prev();
        table.select_prev();
        table.select_prev();
        assert_eq!(table.selected, Some(0));
    }

    #[test]
    fn scroll_follows_selection() {
        let mut table = TableState {
            visible_rows: 5,
            ..Default::default()
        };
        table.reset(30);
        table.select_last(30);
        assert_eq!(table.selected, Some(29));
        assert_eq!(table.scroll_offset, 25);
        table.select_first();
        assert_eq!(table.scroll_offset, 0);
    }
}
