/// Selection and navigation state.
///
/// `Focus` makes "observing a body" and "travelling to a body" mutually
/// exclusive by construction: there is no way to hold both at once.

pub const TRAVEL_SPEED_MIN: f32 = 0.5;
pub const TRAVEL_SPEED_MAX: f32 = 5.0;
pub const TRAVEL_SPEED_STEP: f32 = 0.5;

/// What the camera is doing, keyed by catalog index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Overview of the whole system.
    #[default]
    Idle,
    /// A planet is selected and the camera follows it.
    Observing(usize),
    /// Scripted flight toward a planet; user camera input is disabled.
    Traveling { target: usize },
}

impl Focus {
    /// The selected body, if any (never the travel target).
    pub fn selected(&self) -> Option<usize> {
        match *self {
            Focus::Observing(body) => Some(body),
            _ => None,
        }
    }

    pub fn travel_target(&self) -> Option<usize> {
        match *self {
            Focus::Traveling { target } => Some(target),
            _ => None,
        }
    }

    pub fn is_traveling(&self) -> bool {
        matches!(self, Focus::Traveling { .. })
    }
}

/// Result of a click on a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Selection changed; a new fact should be requested.
    Changed,
    /// The body was already selected.
    Unchanged,
    /// Selection is locked during travel.
    Ignored,
}

/// Focus plus the presentation glue around it.
#[derive(Debug, Clone)]
pub struct Selection {
    focus: Focus,
    nav_open: bool,
    travel_speed: f32,
}

impl Selection {
    pub fn new() -> Self {
        Self {
            focus: Focus::Idle,
            nav_open: false,
            travel_speed: 1.0,
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn nav_open(&self) -> bool {
        self.nav_open
    }

    pub fn travel_speed(&self) -> f32 {
        self.travel_speed
    }

    pub fn select(&mut self, body: usize) -> SelectOutcome {
        match self.focus {
            Focus::Traveling { .. } => SelectOutcome::Ignored,
            Focus::Observing(current) if current == body => SelectOutcome::Unchanged,
            _ => {
                self.focus = Focus::Observing(body);
                self.nav_open = false;
                SelectOutcome::Changed
            }
        }
    }

    /// Close the info panel. Returns true if a selection was cleared.
    pub fn deselect(&mut self) -> bool {
        if let Focus::Observing(_) = self.focus {
            self.focus = Focus::Idle;
            true
        } else {
            false
        }
    }

    pub fn toggle_nav(&mut self) {
        // The menu is hidden while travelling.
        self.nav_open = !self.nav_open && !self.focus.is_traveling();
    }

    pub fn close_nav(&mut self) {
        self.nav_open = false;
    }

    /// Whether the menu entry for `body` is enabled.
    pub fn can_travel_to(&self, body: usize) -> bool {
        match self.focus {
            Focus::Traveling { .. } => false,
            Focus::Observing(current) => current != body,
            Focus::Idle => true,
        }
    }

    /// Begin a flight. Clears the selection in the same update.
    pub fn start_travel(&mut self, body: usize) -> bool {
        if !self.can_travel_to(body) {
            return false;
        }
        self.nav_open = false;
        self.focus = Focus::Traveling { target: body };
        true
    }

    /// Arrival: the travel target becomes the selection.
    pub fn complete_travel(&mut self) -> Option<usize> {
        let target = self.focus.travel_target()?;
        self.focus = Focus::Observing(target);
        Some(target)
    }

    /// Clamp to [0.5, 5.0] and snap to the 0.5 grid. Non-finite input is ignored.
    pub fn set_travel_speed(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        let snapped = (value / TRAVEL_SPEED_STEP).round() * TRAVEL_SPEED_STEP;
        self.travel_speed = snapped.clamp(TRAVEL_SPEED_MIN, TRAVEL_SPEED_MAX);
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}
