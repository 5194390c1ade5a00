//! # Menu Actions
//!
//! Every numbered menu entry becomes a `MenuAction`. The loop in
//! [`crate::console`] turns a typed choice into one of these and hands it to
//! the matching handler.

/// What the loop should do after a handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    ViewDriverStandings,
    ViewTeamStandings,
    ViewRaceResults,
    CompareDrivers,
    ViewSeasonCalendar,
    ViewDriverProfile,
    SearchRacesByLocation,
    ExitProgram,
}

impl MenuAction {
    /// Menu order.
    pub const ALL: [MenuAction; 8] = [
        MenuAction::ViewDriverStandings,
        MenuAction::ViewTeamStandings,
        MenuAction::ViewRaceResults,
        MenuAction::CompareDrivers,
        MenuAction::ViewSeasonCalendar,
        MenuAction::ViewDriverProfile,
        MenuAction::SearchRacesByLocation,
        MenuAction::ExitProgram,
    ];

    pub fn code(self) -> char {
        match self {
            MenuAction::ViewDriverStandings => '1',
            MenuAction::ViewTeamStandings => '2',
            MenuAction::ViewRaceResults => '3',
            MenuAction::CompareDrivers => '4',
            MenuAction::ViewSeasonCalendar => '5',
            MenuAction::ViewDriverProfile => '6',
            MenuAction::SearchRacesByLocation => '7',
            MenuAction::ExitProgram => '8',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::ViewDriverStandings => "View Driver Standings",
            MenuAction::ViewTeamStandings => "View Team Standings",
            MenuAction::ViewRaceResults => "View Race Results",
            MenuAction::CompareDrivers => "Compare Drivers",
            MenuAction::ViewSeasonCalendar => "View Season Calendar",
            MenuAction::ViewDriverProfile => "View Driver Profile",
            MenuAction::SearchRacesByLocation => "Search Races By Location",
            MenuAction::ExitProgram => "Exit Program",
        }
    }

    /// Maps a typed choice to an action. Surrounding whitespace is ignored;
    /// anything other than a single menu code is `None`.
    pub fn from_choice(choice: &str) -> Option<Self> {
        let mut chars = choice.trim().chars();
        let code = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::ALL.into_iter().find(|action| action.code() == code)
    }
}
