use ratatui::widgets::ListState;

use crate::domain::{FeedSnapshot, VideoItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Feed,
    Details,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Feed => ActivePane::Details,
            ActivePane::Details => ActivePane::Feed,
        }
    }

    pub fn prev(self) -> Self {
        // two panes: same as next
        self.next()
    }
}

pub struct TuiApp {
    pub active_pane: ActivePane,
    pub snapshot: FeedSnapshot,
    /// Selection by video id; positions shift whenever the window is trimmed.
    pub selected_id: Option<i64>,
    pub details_scroll: u16,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub maximized: bool,
    pub list_state: ListState,
}

impl TuiApp {
    pub fn new() -> Self {
        Self {
            active_pane: ActivePane::Feed,
            snapshot: FeedSnapshot::default(),
            selected_id: None,
            details_scroll: 0,
            should_quit: false,
            status_message: None,
            maximized: false,
            list_state: ListState::default(),
        }
    }

    /// Take the latest controller state and find the selected video in it.
    /// Falls back to the first item when the selection is gone.
    pub fn apply_snapshot(&mut self, snapshot: FeedSnapshot) {
        self.snapshot = snapshot;

        let position = self
            .selected_id
            .and_then(|id| self.snapshot.position_of(id));
        match position {
            Some(index) => self.list_state.select(Some(index)),
            None => {
                self.selected_id = self.snapshot.items.first().map(|item| item.id);
                self.list_state.select(self.selected_id.map(|_| 0));
                self.details_scroll = 0;
            }
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_id
            .and_then(|id| self.snapshot.position_of(id))
    }

    pub fn selected_item(&self) -> Option<&VideoItem> {
        self.selected_index()
            .and_then(|index| self.snapshot.items.get(index))
    }

    /// Move the selection up. Returns the index to report as visible.
    pub fn move_up(&mut self) -> Option<usize> {
        match self.active_pane {
            ActivePane::Feed => {
                let index = self.selected_index()?;
                if index == 0 {
                    return None;
                }
                self.select(index - 1)
            }
            ActivePane::Details => {
                self.details_scroll = self.details_scroll.saturating_sub(1);
                None
            }
        }
    }

    /// Move the selection down. At the bottom the current index is reported
    /// again, which retries a failed page load.
    pub fn move_down(&mut self) -> Option<usize> {
        match self.active_pane {
            ActivePane::Feed => {
                let index = self.selected_index()?;
                if index + 1 < self.snapshot.len() {
                    self.select(index + 1)
                } else {
                    Some(index)
                }
            }
            ActivePane::Details => {
                self.details_scroll = self.details_scroll.saturating_add(1);
                None
            }
        }
    }

    /// Forget the selection, e.g. before the feed is reset.
    pub fn clear_selection(&mut self) {
        self.selected_id = None;
        self.list_state.select(None);
        self.details_scroll = 0;
    }

    pub fn toggle_maximize(&mut self) {
        self.maximized = !self.maximized;
        if self.maximized {
            self.active_pane = ActivePane::Details;
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    fn select(&mut self, index: usize) -> Option<usize> {
        let item = self.snapshot.items.get(index)?;
        self.selected_id = Some(item.id);
        self.list_state.select(Some(index));
        self.details_scroll = 0;
        Some(index)
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::video::fixtures::video;

    fn snapshot(ids: &[i64]) -> FeedSnapshot {
        FeedSnapshot {
            items: ids.iter().copied().map(video).collect(),
            ..FeedSnapshot::default()
        }
    }

    #[test]
    fn test_first_snapshot_selects_head() {
        let mut app = TuiApp::new();
        app.apply_snapshot(snapshot(&[3, 4, 5]));
        assert_eq!(app.selected_id, Some(3));
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn test_selection_follows_id_across_trim() {
        let mut app = TuiApp::new();
        app.apply_snapshot(snapshot(&[1, 2, 3, 4, 5, 6, 7]));
        app.move_down();
        app.move_down();
        assert_eq!(app.selected_id, Some(3));

        app.apply_snapshot(snapshot(&[2, 3, 4, 5, 6]));
        assert_eq!(app.selected_index(), Some(1));
        assert_eq!(app.list_state.selected(), Some(1));
        assert_eq!(app.selected_item().map(|item| item.id), Some(3));
    }

    #[test]
    fn test_move_reports_new_index() {
        let mut app = TuiApp::new();
        app.apply_snapshot(snapshot(&[1, 2, 3]));

        assert_eq!(app.move_up(), None);
        assert_eq!(app.move_down(), Some(1));
        assert_eq!(app.move_down(), Some(2));
        // bottom: same index again
        assert_eq!(app.move_down(), Some(2));
        assert_eq!(app.move_up(), Some(1));
    }

    #[test]
    fn test_details_pane_scrolls_instead() {
        let mut app = TuiApp::new();
        app.apply_snapshot(snapshot(&[1, 2, 3]));
        app.active_pane = ActivePane::Details;

        assert_eq!(app.move_down(), None);
        assert_eq!(app.details_scroll, 1);
        assert_eq!(app.selected_id, Some(1));
    }

    #[test]
    fn test_cleared_selection_resets_to_head() {
        let mut app = TuiApp::new();
        app.apply_snapshot(snapshot(&[1, 2, 3]));
        app.move_down();
        app.clear_selection();

        app.apply_snapshot(snapshot(&[10, 11]));
        assert_eq!(app.selected_id, Some(10));
    }

    #[test]
    fn test_empty_snapshot_has_no_selection() {
        let mut app = TuiApp::new();
        app.apply_snapshot(FeedSnapshot::default());
        assert_eq!(app.selected_id, None);
        assert_eq!(app.move_down(), None);
    }
}
