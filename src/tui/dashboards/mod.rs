//! Dashboard view state
//!
//! Each dashboard is a row of tabbed sections plus a row cursor. Key presses
//! become [`DashboardAction`]s and are folded into the state by [`reduce`],
//! which never touches storage. Section data is loaded separately by the
//! `*View` types in the submodules.

pub mod admin;
pub mod provider;
pub mod user;

pub use admin::{AdminDashboard, AdminSection, AdminView};
pub use provider::{ProviderDashboard, ProviderSection, ProviderView};
pub use user::{UserDashboard, UserSection, UserView};

use std::fmt::Debug;

/// The tabs of one dashboard
pub trait Section: Copy + Eq + Debug + Default + 'static {
    /// All sections in tab order
    fn all() -> &'static [Self];

    fn title(self) -> &'static str;

    /// Key shown next to the tab title
    fn hotkey(self) -> char {
        let index = Self::all().iter().position(|s| *s == self).unwrap_or(0);
        char::from_digit(index as u32 + 1, 10).unwrap_or(' ')
    }

    fn from_hotkey(c: char) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.hotkey() == c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction<S> {
    NextSection,
    PrevSection,
    Select(S),
    MoveUp,
    MoveDown,
    /// The active section now has this many rows
    RowsLoaded(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardState<S> {
    pub section: S,
    /// Highlighted row within the section
    pub selected: usize,
    /// Row count of the section as last loaded
    pub rows: usize,
}

impl<S: Section> DashboardState<S> {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_section(section: S) -> Self {
        Self {
            section,
            selected: 0,
            rows: 0,
        }
    }

    fn position(&self) -> usize {
        S::all()
            .iter()
            .position(|s| *s == self.section)
            .unwrap_or(0)
    }
}

/// Apply one action. Section changes wrap around and reset the cursor; the
/// cursor never leaves `0..rows`.
pub fn reduce<S: Section>(state: DashboardState<S>, action: DashboardAction<S>) -> DashboardState<S> {
    let sections = S::all();
    match action {
        DashboardAction::NextSection => {
            let next = (state.position() + 1) % sections.len();
            DashboardState::with_section(sections[next])
        }
        DashboardAction::PrevSection => {
            let prev = (state.position() + sections.len() - 1) % sections.len();
            DashboardState::with_section(sections[prev])
        }
        DashboardAction::Select(section) if section == state.section => state,
        DashboardAction::Select(section) => DashboardState::with_section(section),
        DashboardAction::MoveUp => DashboardState {
            selected: state.selected.saturating_sub(1),
            ..state
        },
        DashboardAction::MoveDown => DashboardState {
            selected: if state.selected + 1 < state.rows {
                state.selected + 1
            } else {
                state.selected
            },
            ..state
        },
        DashboardAction::RowsLoaded(rows) => DashboardState {
            rows,
            selected: state.selected.min(rows.saturating_sub(1)),
            ..state
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Admin = DashboardState<AdminSection>;

    fn apply<S: Section>(
        state: DashboardState<S>,
        actions: &[DashboardAction<S>],
    ) -> DashboardState<S> {
        actions.iter().fold(state, |s, a| reduce(s, *a))
    }

    #[test]
    fn test_next_section_wraps() {
        let mut state = Admin::new();
        for _ in 0..AdminSection::all().len() {
            state = reduce(state, DashboardAction::NextSection);
        }
        assert_eq!(state.section, AdminSection::Overview);
    }

    #[test]
    fn test_prev_section_wraps() {
        let state = reduce(Admin::new(), DashboardAction::PrevSection);
        assert_eq!(state.section, AdminSection::Activity);

        let user = reduce(UserDashboard::new(), DashboardAction::PrevSection);
        assert_eq!(user.section, UserSection::Profile);
    }

    #[test]
    fn test_move_down_clamps_to_rows() {
        use DashboardAction::*;
        let state = apply(
            Admin::new(),
            &[Select(AdminSection::Users), RowsLoaded(3), MoveDown, MoveDown, MoveDown, MoveDown],
        );
        assert_eq!(state.selected, 2);

        let state = apply(state, &[MoveUp, MoveUp, MoveUp]);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_move_down_with_no_rows() {
        use DashboardAction::*;
        let state = apply(Admin::new(), &[RowsLoaded(0), MoveDown]);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_rows_shrinking_clamps_selection() {
        use DashboardAction::*;
        let state = apply(Admin::new(), &[RowsLoaded(5), MoveDown, MoveDown, MoveDown]);
        assert_eq!(state.selected, 3);

        let state = reduce(state, RowsLoaded(2));
        assert_eq!(state.selected, 1);
        assert_eq!(reduce(state, RowsLoaded(0)).selected, 0);
    }

    #[test]
    fn test_section_change_resets_cursor() {
        use DashboardAction::*;
        let state = apply(
            ProviderDashboard::new(),
            &[RowsLoaded(4), MoveDown, MoveDown],
        );
        assert_eq!(state.selected, 2);

        let same = reduce(state, Select(ProviderSection::Requests));
        assert_eq!(same, state);

        let moved = reduce(state, Select(ProviderSection::Earnings));
        assert_eq!(moved.section, ProviderSection::Earnings);
        assert_eq!(moved.selected, 0);
    }

    #[test]
    fn test_hotkeys() {
        assert_eq!(AdminSection::Overview.hotkey(), '1');
        assert_eq!(AdminSection::Activity.hotkey(), '5');
        assert_eq!(UserSection::from_hotkey('2'), Some(UserSection::History));
        assert_eq!(UserSection::from_hotkey('9'), None);
    }
}
