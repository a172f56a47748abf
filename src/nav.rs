//! Mobile navigation overlay: open/close, body scroll lock and delayed
//! scrolling to the chosen section.

use crate::animator::Animator;
use crate::content::Section;
use crate::motion::{Easing, Style, Tween};
use crate::state::UiState;
use crate::targets::{TargetGroup, TargetResolver};

/// Class on `<body>` while the overlay is open.
pub const BODY_LOCK_CLASS: &str = "mobile-nav-open";

/// Inline body declarations while the overlay is open.
pub const BODY_LOCK_STYLES: [(&str, &str); 3] =
    [("overflow", "hidden"), ("position", "fixed"), ("width", "100%")];

/// Value each locked declaration is reset to on release.
pub const BODY_RELEASE_VALUE: &str = "unset";

const ENTRANCE_STAGGER: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavTarget {
    Top,
    Section(Section),
}

impl NavTarget {
    /// Element id to scroll to; `None` means the top of the page.
    pub fn element_id(self) -> Option<&'static str> {
        match self {
            Self::Top => None,
            Self::Section(section) => Some(section.element_id()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavEffect {
    LockBody,
    ReleaseBody,
    PlayEntrance,
    ScrollTo { target: NavTarget, delay_ms: u32 },
}

pub fn toggle(ui: &mut UiState) -> Vec<NavEffect> {
    if ui.toggle_nav() {
        vec![NavEffect::LockBody, NavEffect::PlayEntrance]
    } else {
        vec![NavEffect::ReleaseBody]
    }
}

pub fn close(ui: &mut UiState) -> Vec<NavEffect> {
    if ui.close_nav() {
        vec![NavEffect::ReleaseBody]
    } else {
        Vec::new()
    }
}

/// Close the overlay, then scroll once it has had `delay_ms` to get out of
/// the way.
pub fn activate(ui: &mut UiState, target: NavTarget, delay_ms: u32) -> Vec<NavEffect> {
    let mut effects = close(ui);
    effects.push(NavEffect::ScrollTo { target, delay_ms });
    effects
}

/// Overlay buttons rise in, then the social links pop in behind them.
pub fn entrance() -> [(TargetGroup, Tween); 2] {
    [
        (
            TargetGroup::MobileNavButtons,
            Tween::from_to(
                Style::new().y(50.0).opacity(0.0),
                Style::new().y(0.0).opacity(1.0),
                0.4,
            )
            .ease(Easing::Power3Out)
            .delay(0.1),
        ),
        (
            TargetGroup::MobileNavSocial,
            Tween::from_to(
                Style::new().y(30.0).opacity(0.0).scale(0.8),
                Style::new().y(0.0).opacity(1.0).scale(1.0),
                0.4,
            )
            .ease(Easing::Power3Out)
            .delay(0.4),
        ),
    ]
}

pub fn play_entrance<R: TargetResolver>(resolver: &R, animator: &mut Animator<R::Handle>, now: f64) {
    for (group, tween) in entrance() {
        let handles = resolver.resolve(group);
        animator.to_staggered(&handles, tween, ENTRANCE_STAGGER, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Property;
    use crate::targets::fake::FakeTargets;

    #[test]
    fn opening_locks_and_plays_closing_releases() {
        let mut ui = UiState::new();

        assert_eq!(toggle(&mut ui), vec![NavEffect::LockBody, NavEffect::PlayEntrance]);
        assert_eq!(toggle(&mut ui), vec![NavEffect::ReleaseBody]);
        assert!(close(&mut ui).is_empty());
    }

    #[test]
    fn activation_closes_then_scrolls_after_delay() {
        let mut ui = UiState::new();
        toggle(&mut ui);

        let effects = activate(&mut ui, NavTarget::Section(Section::Skills), 300);

        assert_eq!(
            effects,
            vec![
                NavEffect::ReleaseBody,
                NavEffect::ScrollTo {
                    target: NavTarget::Section(Section::Skills),
                    delay_ms: 300
                },
            ]
        );
        assert!(!ui.nav_open());
    }

    #[test]
    fn activation_from_a_closed_nav_only_scrolls() {
        let mut ui = UiState::new();

        assert_eq!(
            activate(&mut ui, NavTarget::Top, 300),
            vec![NavEffect::ScrollTo {
                target: NavTarget::Top,
                delay_ms: 300
            }]
        );
        assert_eq!(NavTarget::Top.element_id(), None);
    }

    #[test]
    fn entrance_staggers_buttons_then_social_links() {
        let targets = FakeTargets::default()
            .with_group(TargetGroup::MobileNavButtons, [1, 2, 3])
            .with_group(TargetGroup::MobileNavSocial, [9]);
        let mut animator = Animator::new();

        play_entrance(&targets, &mut animator, 0.0);

        assert_eq!(animator.style(&3).and_then(|s| s.get(Property::Y)), Some(50.0));
        assert_eq!(animator.style(&9).and_then(|s| s.get(Property::Scale)), Some(0.8));

        animator.tick(0.25);
        let first = animator.style(&1).and_then(|s| s.get(Property::Opacity)).unwrap_or_default();
        let third = animator.style(&3).and_then(|s| s.get(Property::Opacity)).unwrap_or_default();
        assert!(first > 0.0);
        assert_eq!(third, 0.0);

        animator.tick(2.0);
        assert_eq!(animator.style(&9).and_then(|s| s.get(Property::Opacity)), Some(1.0));
    }
}
