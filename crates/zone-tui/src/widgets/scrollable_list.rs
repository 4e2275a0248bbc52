//! Generic scrollable + filterable list widget.
//!
//! Items keep the order they were given in; the filter only narrows the
//! visible subset, so the caller decides the ordering.

pub struct ScrollableList<T> {
    pub items: Vec<T>,
    pub filtered_indices: Vec<usize>,
    pub selected: usize,
    pub scroll_offset: usize,
    pub filter: String,
    filter_fn: Box<dyn Fn(&T, &str) -> bool + Send + Sync>,
}

impl<T> ScrollableList<T> {
    pub fn new(filter_fn: impl Fn(&T, &str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            items: Vec::new(),
            filtered_indices: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            filter: String::new(),
            filter_fn: Box::new(filter_fn),
        }
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.rebuild_filter();
    }

    pub fn set_filter(&mut self, query: &str) {
        self.filter = query.to_string();
        let previous = self.selected_original_index();
        self.rebuild_filter();
        self.selected = previous
            .and_then(|prev| self.filtered_indices.iter().position(|&i| i == prev))
            .unwrap_or(0);
        self.scroll_offset = 0;
    }

    pub fn rebuild_filter(&mut self) {
        let filter = &self.filter;
        let filter_fn = &self.filter_fn;
        self.filtered_indices = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| filter.is_empty() || filter_fn(item, filter))
            .map(|(i, _)| i)
            .collect();
        if self.selected >= self.filtered_indices.len() {
            self.selected = self.filtered_indices.len().saturating_sub(1);
        }
    }

    pub fn select_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn select_down(&mut self, n: usize) {
        if self.filtered_indices.is_empty() {
            return;
        }
        self.selected = (self.selected + n).min(self.filtered_indices.len() - 1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.filtered_indices.len().saturating_sub(1);
    }

    pub fn selected_item(&self) -> Option<&T> {
        let idx = self.filtered_indices.get(self.selected)?;
        self.items.get(*idx)
    }

    pub fn selected_original_index(&self) -> Option<usize> {
        self.filtered_indices.get(self.selected).copied()
    }

    /// Move the selection to the first visible item matching `pred`.
    /// Returns false (selection untouched) when nothing visible matches.
    pub fn select_where(&mut self, pred: impl Fn(&T) -> bool) -> bool {
        match self
            .filtered_indices
            .iter()
            .position(|&i| pred(&self.items[i]))
        {
            Some(pos) => {
                self.selected = pos;
                true
            }
            None => false,
        }
    }

    /// `(original_index, &item)` pairs visible in `height` rows.
    /// Call `ensure_visible` first to update `scroll_offset`.
    pub fn visible_items(&self, height: usize) -> Vec<(usize, &T)> {
        if height == 0 || self.filtered_indices.is_empty() {
            return Vec::new();
        }
        let start = self.scroll_offset.min(self.filtered_indices.len());
        let end = (start + height).min(self.filtered_indices.len());
        self.filtered_indices[start..end]
            .iter()
            .map(|&i| (i, &self.items[i]))
            .collect()
    }

    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected + 1 - height;
        }
    }

    /// Select the item drawn at `row` (relative to the first list row).
    /// Returns true if a row was hit.
    pub fn handle_click(&mut self, row: usize) -> bool {
        let target = self.scroll_offset + row;
        if target < self.filtered_indices.len() {
            self.selected = target;
            return true;
        }
        false
    }

    pub fn len(&self) -> usize {
        self.filtered_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered_indices.is_empty()
    }

    pub fn selected_in_view(&self) -> usize {
        self.selected.saturating_sub(self.scroll_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> ScrollableList<&'static str> {
        let mut list = ScrollableList::new(|s: &&str, q: &str| s.contains(q));
        list.set_items(vec!["alpha", "beta", "gamma", "delta"]);
        list
    }

    #[test]
    fn test_filter_keeps_item_order_and_selection() {
        let mut l = list();
        l.select_down(2); // gamma
        l.set_filter("a");
        assert_eq!(l.len(), 4);
        assert_eq!(l.selected_item(), Some(&"gamma"));
        l.set_filter("ta");
        assert_eq!(l.visible_items(10).iter().map(|(_, s)| **s).collect::<Vec<_>>(), vec!["beta", "delta"]);
        assert_eq!(l.selected, 0);
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut l = list();
        l.select_last();
        l.ensure_visible(2);
        assert_eq!(l.scroll_offset, 2);
        assert_eq!(l.selected_in_view(), 1);
        assert!(l.handle_click(0));
        assert_eq!(l.selected_item(), Some(&"gamma"));
        assert!(!l.handle_click(5));
    }

    #[test]
    fn test_select_where() {
        let mut l = list();
        assert!(l.select_where(|s| s.starts_with('d')));
        assert_eq!(l.selected_item(), Some(&"delta"));
        assert!(!l.select_where(|s| s.is_empty()));
        assert_eq!(l.selected_item(), Some(&"delta"));
    }
}
