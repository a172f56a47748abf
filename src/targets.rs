use crate::content::Section;

/// Named groups of animatable elements. What sits behind each name is the
/// presentation layer's business.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetGroup {
    IntroMask,
    HeroMain,
    HeroSky,
    HeroBackground,
    HeroCharacter,
    HeroHeadline,
    ProfileImage,
    ProfileOverlay,
    PortfolioTitle,
    ExperienceCards,
    SkillItems,
    SkillBars,
    FloatingNav,
    MobileNavButtons,
    MobileNavSocial,
}

impl TargetGroup {
    /// Class the markup puts on every member of the group.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::IntroMask => "vi-mask-group",
            Self::HeroMain => "main",
            Self::HeroSky => "sky",
            Self::HeroBackground => "bg",
            Self::HeroCharacter => "character",
            Self::HeroHeadline => "hero-text",
            Self::ProfileImage => "profile-image",
            Self::ProfileOverlay => "profile-overlay",
            Self::PortfolioTitle => "portfolio-title",
            Self::ExperienceCards => "experience-card",
            Self::SkillItems => "skill-item",
            Self::SkillBars => "skill-bar",
            Self::FloatingNav => "floating-nav",
            Self::MobileNavButtons => "mobile-nav-btn",
            Self::MobileNavSocial => "mobile-nav-social",
        }
    }
}

/// Document-space vertical extent of a section, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionBounds {
    pub top: f64,
    pub bottom: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

/// Looks up the live handles behind a target group.
///
/// Returning an empty list (or `None` for bounds) is always allowed; callers
/// treat it as "not rendered yet" and skip the work.
pub trait TargetResolver {
    type Handle: Clone + PartialEq;

    /// Handles in document order.
    fn resolve(&self, group: TargetGroup) -> Vec<Self::Handle>;

    fn section_bounds(&self, section: Section) -> Option<SectionBounds>;
}
