use super::user::{Masquerade, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberListUiState {
    Loading,
    Ready,
    Empty,
}

/// One row of the member list: a user, optionally shown under a masquerade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberEntry {
    pub user_id: UserId,
    pub masquerade: Option<Masquerade>,
}

impl MemberEntry {
    pub fn plain(user_id: UserId) -> Self {
        Self {
            user_id,
            masquerade: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberListState {
    ui_state: MemberListUiState,
    entries: Vec<MemberEntry>,
    selected_index: Option<usize>,
}

impl Default for MemberListState {
    fn default() -> Self {
        Self {
            ui_state: MemberListUiState::Loading,
            entries: Vec::new(),
            selected_index: None,
        }
    }
}

impl MemberListState {
    pub fn ui_state(&self) -> MemberListUiState {
        self.ui_state.clone()
    }

    pub fn entries(&self) -> &[MemberEntry] {
        &self.entries
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected_entry(&self) -> Option<&MemberEntry> {
        self.selected_index
            .and_then(|index| self.entries.get(index))
    }

    pub fn set_ready(&mut self, entries: Vec<MemberEntry>) {
        if entries.is_empty() {
            self.set_empty();
            return;
        }

        let previous = self.selected_entry().cloned();
        self.ui_state = MemberListUiState::Ready;
        self.entries = entries;
        self.selected_index = resolve_selection_index(&self.entries, previous.as_ref());
    }

    pub fn set_empty(&mut self) {
        self.ui_state = MemberListUiState::Empty;
        self.entries.clear();
        self.selected_index = None;
    }

    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.selected_index = Some(index);
        }
    }

    pub fn select_next(&mut self) {
        let Some(index) = self.selected_index else {
            return;
        };

        let last_index = self.entries.len().saturating_sub(1);
        self.selected_index = Some(std::cmp::min(index.saturating_add(1), last_index));
    }

    pub fn select_previous(&mut self) {
        let Some(index) = self.selected_index else {
            return;
        };

        self.selected_index = Some(index.saturating_sub(1));
    }
}

fn resolve_selection_index(
    entries: &[MemberEntry],
    previous: Option<&MemberEntry>,
) -> Option<usize> {
    if entries.is_empty() {
        return None;
    }

    previous
        .and_then(|previous| entries.iter().position(|entry| entry == previous))
        .or(Some(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> MemberEntry {
        MemberEntry::plain(UserId::new(id))
    }

    #[test]
    fn default_state_is_loading_without_selection() {
        let state = MemberListState::default();

        assert_eq!(state.ui_state(), MemberListUiState::Loading);
        assert!(state.entries().is_empty());
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn set_ready_with_data_selects_first_entry() {
        let mut state = MemberListState::default();

        state.set_ready(vec![entry("U1"), entry("U2")]);

        assert_eq!(state.ui_state(), MemberListUiState::Ready);
        assert_eq!(
            state.selected_entry().map(|entry| entry.user_id.as_str()),
            Some("U1")
        );
    }

    #[test]
    fn set_ready_with_empty_list_transitions_to_empty_state() {
        let mut state = MemberListState::default();

        state.set_ready(vec![]);

        assert_eq!(state.ui_state(), MemberListUiState::Empty);
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn selection_moves_within_bounds() {
        let mut state = MemberListState::default();
        state.set_ready(vec![entry("U1"), entry("U2")]);

        state.select_next();
        state.select_next();
        state.select_previous();

        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn select_ignores_out_of_range_index() {
        let mut state = MemberListState::default();
        state.set_ready(vec![entry("U1"), entry("U2")]);

        state.select(1);
        state.select(7);

        assert_eq!(state.selected_index(), Some(1));
    }

    #[test]
    fn set_ready_preserves_selection_by_entry() {
        let mut state = MemberListState::default();
        state.set_ready(vec![entry("U1"), entry("U2"), entry("U3")]);
        state.select_next();

        state.set_ready(vec![entry("U8"), entry("U9"), entry("U2")]);

        assert_eq!(state.selected_index(), Some(2));
    }

    #[test]
    fn set_ready_falls_back_to_first_when_previous_selection_disappears() {
        let mut state = MemberListState::default();
        state.set_ready(vec![entry("U1"), entry("U2")]);
        state.select_next();

        state.set_ready(vec![entry("U5"), entry("U6")]);

        assert_eq!(state.selected_index(), Some(0));
    }
}
