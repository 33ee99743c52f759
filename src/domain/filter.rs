//! Filtered view over the request collection with a bounded selection.

use crate::models::Request;

/// Visible subset of the request collection plus selection and list scroll.
///
/// `visible` holds collection indices in collection order. The selection is a
/// position within `visible` and never wraps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterIndex {
    visible: Vec<usize>,
    selected: usize,
    scroll: usize,
}

/// Case-insensitive substring match on name or url. An empty filter matches.
pub fn matches_filter(request: &Request, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    let needle = filter.to_lowercase();
    request.name.to_lowercase().contains(&needle) || request.url.to_lowercase().contains(&needle)
}

impl FilterIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the visible set. The selection moves to `preferred_id` when it
    /// is visible, otherwise to the first item.
    pub fn apply(&mut self, requests: &[Request], filter: &str, preferred_id: Option<&str>) {
        self.visible = requests
            .iter()
            .enumerate()
            .filter(|(_, r)| matches_filter(r, filter))
            .map(|(i, _)| i)
            .collect();

        if self.visible.is_empty() {
            self.selected = 0;
            self.scroll = 0;
            return;
        }

        self.selected = preferred_id
            .and_then(|id| {
                self.visible
                    .iter()
                    .position(|&i| requests.get(i).map(|r| r.id.as_str()) == Some(id))
            })
            .unwrap_or(0);
        if self.scroll > self.selected {
            self.scroll = self.selected;
        }
    }

    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Selected position within the visible list.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Collection index of the selection.
    pub fn selected_index(&self) -> Option<usize> {
        self.visible.get(self.selected).copied()
    }

    pub fn selected_request<'a>(&self, requests: &'a [Request]) -> Option<&'a Request> {
        self.selected_index().and_then(|i| requests.get(i))
    }

    pub fn list_scroll(&self) -> usize {
        self.scroll
    }

    /// Move down one item. Returns true when the selection changed.
    pub fn next(&mut self) -> bool {
        if self.selected + 1 < self.visible.len() {
            self.selected += 1;
            true
        } else {
            false
        }
    }

    /// Move up one item. Returns true when the selection changed.
    pub fn prev(&mut self) -> bool {
        if self.selected > 0 {
            self.selected -= 1;
            true
        } else {
            false
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
        self.scroll = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.visible.len().saturating_sub(1);
    }

    /// Id to select once the current selection is deleted: the next visible
    /// item, else the previous one, else none.
    pub fn successor_after_delete(&self, requests: &[Request]) -> Option<String> {
        if self.visible.is_empty() {
            return None;
        }
        let pick = if self.selected + 1 < self.visible.len() {
            Some(self.selected + 1)
        } else if self.selected > 0 {
            Some(self.selected - 1)
        } else {
            None
        };
        pick.and_then(|pos| self.visible.get(pos))
            .and_then(|&i| requests.get(i))
            .map(|r| r.id.clone())
    }

    /// Adjust the list scroll so the selection is inside a window of `rows`.
    pub fn scroll_into_view(&mut self, rows: usize) {
        if rows == 0 {
            self.scroll = self.selected;
            return;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + rows {
            self.scroll = self.selected + 1 - rows;
        }
        let max_scroll = self.visible.len().saturating_sub(rows);
        self.scroll = self.scroll.min(max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(id: &str, name: &str, url: &str) -> Request {
        Request {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            ..Request::new()
        }
    }

    fn sample() -> Vec<Request> {
        vec![
            req("1", "Alpha users", "https://a.test/users"),
            req("2", "Beta", "https://b.test/Orders"),
            req("3", "Gamma users", "https://c.test/"),
        ]
    }

    #[test]
    fn test_empty_filter_matches_all_in_order() {
        let reqs = sample();
        let mut idx = FilterIndex::new();
        idx.apply(&reqs, "", None);
        assert_eq!(idx.visible(), &[0, 1, 2]);
        assert_eq!(idx.selected(), 0);
    }

    #[test]
    fn test_filter_is_case_insensitive_on_name_and_url() {
        let reqs = sample();
        let mut idx = FilterIndex::new();

        idx.apply(&reqs, "USERS", None);
        assert_eq!(idx.visible(), &[0, 2]);

        idx.apply(&reqs, "orders", None);
        assert_eq!(idx.visible(), &[1]);
    }

    #[test]
    fn test_preferred_id_selected_when_visible() {
        let reqs = sample();
        let mut idx = FilterIndex::new();
        idx.apply(&reqs, "", Some("3"));
        assert_eq!(idx.selected(), 2);
        assert_eq!(idx.selected_request(&reqs).map(|r| r.id.as_str()), Some("3"));

        idx.apply(&reqs, "beta", Some("3"));
        assert_eq!(idx.selected(), 0);
        assert_eq!(idx.selected_index(), Some(1));
    }

    #[test]
    fn test_no_matches_resets() {
        let reqs = sample();
        let mut idx = FilterIndex::new();
        idx.apply(&reqs, "", Some("3"));
        idx.apply(&reqs, "zzz", None);
        assert!(idx.is_empty());
        assert_eq!(idx.selected(), 0);
        assert_eq!(idx.list_scroll(), 0);
        assert_eq!(idx.selected_index(), None);
    }

    #[test]
    fn test_navigation_is_bounded() {
        let reqs = sample();
        let mut idx = FilterIndex::new();
        idx.apply(&reqs, "", None);

        assert!(!idx.prev());
        assert!(idx.next());
        assert!(idx.next());
        assert!(!idx.next());
        assert_eq!(idx.selected(), 2);

        idx.first();
        assert_eq!(idx.selected(), 0);
        idx.last();
        assert_eq!(idx.selected(), 2);
    }

    #[test]
    fn test_navigation_on_empty() {
        let mut idx = FilterIndex::new();
        idx.apply(&[], "", None);
        assert!(!idx.next());
        assert!(!idx.prev());
        idx.last();
        assert_eq!(idx.selected(), 0);
    }

    #[test]
    fn test_successor_after_delete() {
        let reqs = sample();
        let mut idx = FilterIndex::new();

        idx.apply(&reqs, "", Some("2"));
        assert_eq!(idx.successor_after_delete(&reqs).as_deref(), Some("3"));

        idx.apply(&reqs, "", Some("3"));
        assert_eq!(idx.successor_after_delete(&reqs).as_deref(), Some("2"));

        idx.apply(&reqs, "beta", None);
        assert_eq!(idx.successor_after_delete(&reqs), None);
    }

    #[test]
    fn test_scroll_into_view() {
        let reqs: Vec<Request> = (0..10).map(|i| req(&i.to_string(), "n", "u")).collect();
        let mut idx = FilterIndex::new();
        idx.apply(&reqs, "", None);

        idx.last();
        idx.scroll_into_view(4);
        assert_eq!(idx.list_scroll(), 6);

        idx.first();
        idx.scroll_into_view(4);
        assert_eq!(idx.list_scroll(), 0);

        for _ in 0..5 {
            idx.next();
        }
        idx.scroll_into_view(4);
        assert_eq!(idx.list_scroll(), 2);
    }
}
