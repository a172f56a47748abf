/// A boolean that can be set once and never cleared.
///
/// When two paths race to set it, only the first write wins; `set` reports
/// which caller that was.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OnceFlag {
    set: bool,
}

impl OnceFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.set
    }

    /// Returns `true` only for the call that flipped the flag.
    pub fn set(&mut self) -> bool {
        !std::mem::replace(&mut self.set, true)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroPhase {
    Loading,
    Revealing,
    Done,
}

impl IntroPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Revealing => "revealing",
            Self::Done => "done",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillsToggle {
    pub previous: bool,
    pub expanded: bool,
}

/// Flags owned by the top-level view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    assets_loaded: OnceFlag,
    content_visible: OnceFlag,
    nav_open: bool,
    skills_expanded: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assets_loaded(&self) -> bool {
        self.assets_loaded.is_set()
    }

    pub fn content_visible(&self) -> bool {
        self.content_visible.is_set()
    }

    pub fn nav_open(&self) -> bool {
        self.nav_open
    }

    pub fn skills_expanded(&self) -> bool {
        self.skills_expanded
    }

    pub fn phase(&self) -> IntroPhase {
        if self.content_visible() {
            IntroPhase::Done
        } else if self.assets_loaded() {
            IntroPhase::Revealing
        } else {
            IntroPhase::Loading
        }
    }

    /// `true` if this call moved the page out of `Loading`.
    pub fn mark_assets_loaded(&mut self) -> bool {
        if self.content_visible() {
            // Already past the reveal; record the flag without a transition.
            self.assets_loaded.set();
            return false;
        }
        self.assets_loaded.set()
    }

    /// `true` if this call made the content visible.
    pub fn reveal_content(&mut self) -> bool {
        self.content_visible.set()
    }

    pub fn toggle_nav(&mut self) -> bool {
        self.nav_open = !self.nav_open;
        self.nav_open
    }

    /// Close the nav; `true` if it was open.
    pub fn close_nav(&mut self) -> bool {
        std::mem::replace(&mut self.nav_open, false)
    }

    pub fn toggle_skills(&mut self) -> SkillsToggle {
        let previous = self.skills_expanded;
        self.skills_expanded = !previous;
        SkillsToggle {
            previous,
            expanded: self.skills_expanded,
        }
    }
}
