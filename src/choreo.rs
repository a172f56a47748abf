//! Scroll-bound entrance animations.
//!
//! # Invariants
//!
//! - Bindings exist only after the content is visible; [`ScrollChoreographer::attach`]
//!   refuses otherwise.
//! - A once-binding fires `Enter` at most once for its lifetime.
//! - The floating-nav binding fires on every crossing, and each crossing
//!   re-issues the same end state through the animator's overwrite rule.
//! - Skill entrance eligibility is a pure function of
//!   [`plan_skills_transition`]'s inputs.
//!
//! # Failure Modes
//!
//! Groups that resolve to no handles, and sections without bounds, are
//! skipped silently and retried on the next scroll update.

use std::ops::Range;

use serde_json::json;
use thiserror::Error;

use crate::animator::Animator;
use crate::config::MotionConfig;
use crate::content::Section;
use crate::motion::{Easing, Style, Tween};
use crate::state::{SkillsToggle, UiState};
use crate::targets::{SectionBounds, TargetGroup, TargetResolver, Viewport};
use crate::telemetry::Logger;

const ENTRY_START: f64 = 0.8;
const NAV_START: f64 = 0.5;
const NAV_END: f64 = 0.5;

const HERO_SECONDS: f64 = 2.0;
const NAV_SECONDS: f64 = 0.5;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChoreographyError {
    #[error("scroll bindings cannot attach while the content is hidden")]
    ContentHidden,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BindingMode {
    Once,
    Bidirectional,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

/// What a binding animates when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Profile,
    PortfolioTitle,
    Cards,
    Skills,
    FloatingNav,
}

impl Cue {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::PortfolioTitle => "portfolio_title",
            Self::Cards => "cards",
            Self::Skills => "skills",
            Self::FloatingNav => "floating_nav",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Zone {
    Before,
    Inside,
    After,
}

/// One trigger region over a section.
///
/// The region starts when the section's top reaches `start` (a fraction of
/// the viewport height from its top edge) and ends when the section's bottom
/// reaches `end`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollBinding {
    cue: Cue,
    section: Section,
    start: f64,
    end: Option<f64>,
    mode: BindingMode,
    zone: Zone,
    fired: bool,
}

impl ScrollBinding {
    pub fn once(cue: Cue, section: Section, start: f64) -> Self {
        Self {
            cue,
            section,
            start,
            end: None,
            mode: BindingMode::Once,
            zone: Zone::Before,
            fired: false,
        }
    }

    pub fn bidirectional(cue: Cue, section: Section, start: f64, end: f64) -> Self {
        Self {
            end: Some(end),
            mode: BindingMode::Bidirectional,
            ..Self::once(cue, section, start)
        }
    }

    pub fn cue(&self) -> Cue {
        self.cue
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// `true` once a once-binding has fired; it never fires again.
    pub fn is_spent(&self) -> bool {
        self.mode == BindingMode::Once && self.fired
    }

    fn zone_for(&self, bounds: SectionBounds, viewport: Viewport) -> Zone {
        let start_px = bounds.top - self.start * viewport.height;
        if viewport.scroll_y < start_px {
            return Zone::Before;
        }
        match self.end {
            Some(end) if viewport.scroll_y >= bounds.bottom - end * viewport.height => Zone::After,
            _ => Zone::Inside,
        }
    }

    /// Move to the zone `viewport` puts the binding in and report the edges
    /// crossed on the way, in order.
    pub fn update(&mut self, bounds: SectionBounds, viewport: Viewport) -> Vec<TriggerEvent> {
        if self.is_spent() {
            return Vec::new();
        }

        let next = self.zone_for(bounds, viewport);
        let previous = std::mem::replace(&mut self.zone, next);

        let events = match (previous, next) {
            (Zone::Before, Zone::Inside) => vec![TriggerEvent::Enter],
            (Zone::Before, Zone::After) => vec![TriggerEvent::Enter, TriggerEvent::Leave],
            (Zone::Inside, Zone::After) => vec![TriggerEvent::Leave],
            (Zone::After, Zone::Inside) => vec![TriggerEvent::EnterBack],
            (Zone::After, Zone::Before) => vec![TriggerEvent::EnterBack, TriggerEvent::LeaveBack],
            (Zone::Inside, Zone::Before) => vec![TriggerEvent::LeaveBack],
            _ => Vec::new(),
        };

        if self.mode == BindingMode::Once {
            if events.contains(&TriggerEvent::Enter) {
                self.fired = true;
                return vec![TriggerEvent::Enter];
            }
            return Vec::new();
        }
        events
    }
}

/// Which skill rows a toggle touches, by index into the rows rendered after
/// the toggle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillsPlan {
    /// Rows to animate in.
    pub animate: Range<usize>,
    /// Rows whose overrides are removed.
    pub clear: Range<usize>,
    /// Rows set to the hidden entrance state.
    pub hide: Range<usize>,
}

impl SkillsPlan {
    pub fn is_empty(&self) -> bool {
        self.animate.is_empty() && self.clear.is_empty() && self.hide.is_empty()
    }
}

/// Decide what a skills toggle animates.
///
/// Rows below `limit` were visible before the expansion and must not replay
/// their entrance. Before the section has entered, new rows only need to
/// join the pending entrance.
pub fn plan_skills_transition(
    toggle: SkillsToggle,
    total: usize,
    limit: usize,
    section_entered: bool,
) -> SkillsPlan {
    let retained = limit.min(total);

    match (toggle.previous, toggle.expanded) {
        (false, true) if section_entered => {
            if retained == total {
                return SkillsPlan::default();
            }
            SkillsPlan {
                animate: retained..total,
                clear: 0..retained,
                ..SkillsPlan::default()
            }
        }
        (false, true) => SkillsPlan {
            hide: retained..total,
            ..SkillsPlan::default()
        },
        (true, false) if section_entered => SkillsPlan {
            clear: 0..retained,
            ..SkillsPlan::default()
        },
        _ => SkillsPlan::default(),
    }
}

fn slice<T>(items: &[T], range: Range<usize>) -> &[T] {
    let end = range.end.min(items.len());
    let start = range.start.min(end);
    &items[start..end]
}

fn skill_item_hidden() -> Style {
    Style::new().x(-50.0).opacity(0.0)
}

fn skill_bar_hidden() -> Style {
    Style::new().scale_x(0.0)
}

/// Hidden entrance state for every group a binding reveals.
fn hidden_states() -> [(TargetGroup, Style); 7] {
    [
        (TargetGroup::ExperienceCards, Style::new().y(100.0).opacity(0.0)),
        (TargetGroup::SkillBars, skill_bar_hidden()),
        (TargetGroup::SkillItems, skill_item_hidden()),
        (TargetGroup::ProfileImage, Style::new().scale(0.8).opacity(0.0)),
        (TargetGroup::ProfileOverlay, Style::new().y(50.0).opacity(0.0)),
        (TargetGroup::PortfolioTitle, Style::new().y(50.0).opacity(0.0)),
        (TargetGroup::FloatingNav, Style::new().y(100.0).opacity(0.0)),
    ]
}

/// Zoomed start and resting end of each hero layer.
fn hero_entrance() -> [(TargetGroup, Style, Style); 5] {
    [
        (
            TargetGroup::HeroMain,
            Style::new().scale(1.7).rotate(-10.0),
            Style::new().scale(1.0).rotate(0.0),
        ),
        (
            TargetGroup::HeroSky,
            Style::new().scale(1.5).rotate(-20.0),
            Style::new().scale(1.1).rotate(0.0),
        ),
        (
            TargetGroup::HeroBackground,
            Style::new().scale(1.8).rotate(-3.0),
            Style::new().scale(1.1).rotate(0.0),
        ),
        (
            TargetGroup::HeroCharacter,
            Style::new().scale(3.0).rotate(-20.0),
            Style::new().scale(1.2).rotate(0.0),
        ),
        (
            TargetGroup::HeroHeadline,
            Style::new().scale(1.4).rotate(-10.0),
            Style::new().scale(1.0).rotate(0.0),
        ),
    ]
}

#[derive(Debug)]
pub struct ScrollChoreographer<H> {
    bindings: Vec<ScrollBinding>,
    skills_limit: usize,
    skills_entered: bool,
    skill_rows: Vec<H>,
    skill_bars: Vec<H>,
    logger: Logger,
}

impl<H: Clone + PartialEq> ScrollChoreographer<H> {
    /// Put every entrance target in its hidden state, start the hero
    /// entrance and register the bindings. The host should follow up with
    /// [`on_scroll`](Self::on_scroll) for the current viewport so sections
    /// already in view fire immediately.
    pub fn attach<R>(
        ui: &UiState,
        resolver: &R,
        animator: &mut Animator<H>,
        config: &MotionConfig,
        logger: Logger,
        now: f64,
    ) -> Result<Self, ChoreographyError>
    where
        R: TargetResolver<Handle = H>,
    {
        if !ui.content_visible() {
            logger.warn("choreo.attach_refused", json!({ "phase": ui.phase().as_str() }));
            return Err(ChoreographyError::ContentHidden);
        }

        for (group, style) in hidden_states() {
            animator.set_all(&resolver.resolve(group), style);
        }

        for (group, from, to) in hero_entrance() {
            for handle in resolver.resolve(group) {
                animator.to(
                    &handle,
                    Tween::from_to(from, to, HERO_SECONDS).ease(Easing::ExpoInOut),
                    now,
                );
            }
        }

        let bindings = vec![
            ScrollBinding::once(Cue::Profile, Section::Profile, ENTRY_START),
            ScrollBinding::once(Cue::PortfolioTitle, Section::Portfolio, ENTRY_START),
            ScrollBinding::once(Cue::Cards, Section::Experience, ENTRY_START),
            ScrollBinding::once(Cue::Skills, Section::Skills, ENTRY_START),
            ScrollBinding::bidirectional(Cue::FloatingNav, Section::Portfolio, NAV_START, NAV_END),
        ];
        logger.info("choreo.attached", json!({ "bindings": bindings.len() }));

        Ok(Self {
            bindings,
            skills_limit: config.skills_limit,
            skills_entered: false,
            skill_rows: resolver.resolve(TargetGroup::SkillItems),
            skill_bars: resolver.resolve(TargetGroup::SkillBars),
            logger,
        })
    }

    pub fn bindings(&self) -> &[ScrollBinding] {
        &self.bindings
    }

    pub fn skills_entered(&self) -> bool {
        self.skills_entered
    }

    /// Update every binding for `viewport` and run the cues that fired.
    pub fn on_scroll<R>(
        &mut self,
        viewport: Viewport,
        resolver: &R,
        animator: &mut Animator<H>,
        now: f64,
    ) -> Vec<(Cue, TriggerEvent)>
    where
        R: TargetResolver<Handle = H>,
    {
        let mut fired = Vec::new();
        for binding in &mut self.bindings {
            let Some(bounds) = resolver.section_bounds(binding.section()) else {
                continue;
            };
            for event in binding.update(bounds, viewport) {
                fired.push((binding.cue(), event));
            }
        }

        for &(cue, event) in &fired {
            self.logger.debug(
                "choreo.trigger",
                json!({ "cue": cue.as_str(), "event": format!("{event:?}") }),
            );
            self.run_cue(cue, event, resolver, animator, now);
        }
        fired
    }

    fn run_cue<R>(&mut self, cue: Cue, event: TriggerEvent, resolver: &R, animator: &mut Animator<H>, now: f64)
    where
        R: TargetResolver<Handle = H>,
    {
        let out = Easing::Power3Out;
        match cue {
            Cue::Profile => {
                run_group(
                    animator,
                    &resolver.resolve(TargetGroup::ProfileImage),
                    Tween::to(Style::new().scale(1.0).opacity(1.0), 1.2).ease(out),
                    0.0,
                    now,
                );
                run_group(
                    animator,
                    &resolver.resolve(TargetGroup::ProfileOverlay),
                    Tween::to(Style::new().y(0.0).opacity(1.0), 1.0).ease(out).delay(0.3),
                    0.0,
                    now,
                );
            }
            Cue::PortfolioTitle => run_group(
                animator,
                &resolver.resolve(TargetGroup::PortfolioTitle),
                Tween::to(Style::new().y(0.0).opacity(1.0), 1.0).ease(out),
                0.0,
                now,
            ),
            Cue::Cards => run_group(
                animator,
                &resolver.resolve(TargetGroup::ExperienceCards),
                Tween::to(Style::new().y(0.0).opacity(1.0), 1.0).ease(out),
                0.2,
                now,
            ),
            Cue::Skills => {
                self.skills_entered = true;
                self.skill_rows = resolver.resolve(TargetGroup::SkillItems);
                run_group(
                    animator,
                    &self.skill_rows,
                    Tween::to(Style::new().x(0.0).opacity(1.0), 0.8)
                        .ease(out)
                        .clear_on_complete(),
                    0.1,
                    now,
                );
                self.skill_bars = resolver.resolve(TargetGroup::SkillBars);
                run_group(
                    animator,
                    &self.skill_bars,
                    Tween::to(Style::new().scale_x(1.0), 1.5).ease(out).delay(0.3),
                    0.1,
                    now,
                );
            }
            Cue::FloatingNav => {
                let tween = match event {
                    TriggerEvent::Enter | TriggerEvent::EnterBack => {
                        Tween::to(Style::new().y(0.0).opacity(1.0), NAV_SECONDS).ease(out)
                    }
                    TriggerEvent::Leave | TriggerEvent::LeaveBack => {
                        Tween::to(Style::new().y(100.0).opacity(0.0), NAV_SECONDS).ease(Easing::Power3In)
                    }
                };
                run_group(animator, &resolver.resolve(TargetGroup::FloatingNav), tween, 0.0, now);
            }
        }
    }

    /// Apply a skills toggle once the rows for the new state are rendered.
    pub fn on_skills_toggled<R>(
        &mut self,
        toggle: SkillsToggle,
        resolver: &R,
        animator: &mut Animator<H>,
        now: f64,
    ) -> SkillsPlan
    where
        R: TargetResolver<Handle = H>,
    {
        let rows = resolver.resolve(TargetGroup::SkillItems);
        let bars = resolver.resolve(TargetGroup::SkillBars);

        for stale in self.skill_rows.iter().filter(|row| !rows.contains(row)) {
            animator.forget(stale);
        }
        for stale in self.skill_bars.iter().filter(|bar| !bars.contains(bar)) {
            animator.forget(stale);
        }

        let plan = plan_skills_transition(toggle, rows.len(), self.skills_limit, self.skills_entered);
        self.logger.debug(
            "choreo.skills_toggled",
            json!({
                "expanded": toggle.expanded,
                "rows": rows.len(),
                "animate": [plan.animate.start, plan.animate.end],
                "clear": [plan.clear.start, plan.clear.end],
                "hide": [plan.hide.start, plan.hide.end],
            }),
        );

        for row in slice(&rows, plan.clear.clone()) {
            animator.clear_all(row);
        }

        animator.set_all(slice(&rows, plan.hide.clone()), skill_item_hidden());
        animator.set_all(slice(&bars, plan.hide.clone()), skill_bar_hidden());

        run_group(
            animator,
            slice(&rows, plan.animate.clone()),
            Tween::from_to(
                Style::new().y(30.0).opacity(0.0).scale(0.95),
                Style::new().y(0.0).opacity(1.0).scale(1.0),
                0.5,
            )
            .ease(Easing::Power2Out)
            .clear_on_complete(),
            0.08,
            now,
        );
        run_group(
            animator,
            slice(&bars, plan.animate.clone()),
            Tween::from_to(Style::new().scale_x(0.0), Style::new().scale_x(1.0), 0.8)
                .ease(Easing::Power2Out)
                .delay(0.2),
            0.08,
            now,
        );

        self.skill_rows = rows;
        self.skill_bars = bars;
        plan
    }
}

fn run_group<H: Clone + PartialEq>(animator: &mut Animator<H>, handles: &[H], tween: Tween, stagger: f64, now: f64) {
    if handles.is_empty() {
        return;
    }
    animator.to_staggered(handles, tween, stagger, now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Property;
    use crate::targets::fake::FakeTargets;

    const VIEWPORT_HEIGHT: f64 = 1000.0;

    fn viewport(scroll_y: f64) -> Viewport {
        Viewport {
            scroll_y,
            height: VIEWPORT_HEIGHT,
        }
    }

    fn visible_ui() -> UiState {
        let mut ui = UiState::new();
        ui.mark_assets_loaded();
        ui.reveal_content();
        ui
    }

    fn page(skill_rows: u32) -> FakeTargets {
        FakeTargets::default()
            .with_group(TargetGroup::HeroMain, [1])
            .with_group(TargetGroup::ProfileImage, [10])
            .with_group(TargetGroup::ProfileOverlay, [11])
            .with_group(TargetGroup::PortfolioTitle, [20])
            .with_group(TargetGroup::ExperienceCards, [30, 31])
            .with_group(TargetGroup::FloatingNav, [40])
            .with_group(TargetGroup::SkillItems, 100..100 + skill_rows)
            .with_group(TargetGroup::SkillBars, 200..200 + skill_rows)
            .with_section(Section::Profile, 1000.0, 2000.0)
            .with_section(Section::Portfolio, 2000.0, 4000.0)
            .with_section(Section::Experience, 2200.0, 3800.0)
            .with_section(Section::Skills, 4000.0, 5000.0)
            .with_section(Section::Contact, 5000.0, 5600.0)
    }

    fn attach(targets: &FakeTargets, animator: &mut Animator<u32>) -> ScrollChoreographer<u32> {
        ScrollChoreographer::attach(
            &visible_ui(),
            targets,
            animator,
            &MotionConfig::default(),
            Logger::disabled(),
            0.0,
        )
        .expect("content is visible")
    }

    fn toggle(previous: bool) -> SkillsToggle {
        SkillsToggle {
            previous,
            expanded: !previous,
        }
    }

    #[test]
    fn attach_requires_visible_content() {
        let targets = page(8);
        let mut animator = Animator::new();
        let mut ui = UiState::new();
        ui.mark_assets_loaded();

        let result = ScrollChoreographer::attach(
            &ui,
            &targets,
            &mut animator,
            &MotionConfig::default(),
            Logger::disabled(),
            0.0,
        );

        assert_eq!(result.err(), Some(ChoreographyError::ContentHidden));
        assert_eq!(animator.target_count(), 0);
    }

    #[test]
    fn attach_hides_entrance_targets_and_starts_hero() {
        let targets = page(8);
        let mut animator = Animator::new();
        attach(&targets, &mut animator);

        assert_eq!(animator.style(&30).and_then(|s| s.get(Property::Opacity)), Some(0.0));
        assert_eq!(animator.style(&100).and_then(|s| s.get(Property::X)), Some(-50.0));
        assert_eq!(animator.style(&200).and_then(|s| s.get(Property::ScaleX)), Some(0.0));
        assert_eq!(animator.style(&1).and_then(|s| s.get(Property::Scale)), Some(1.7));
        assert!(animator.is_animating(&1));
    }

    #[test]
    fn once_bindings_fire_a_single_time() {
        let targets = page(8);
        let mut animator = Animator::new();
        let mut choreo = attach(&targets, &mut animator);

        let fired = choreo.on_scroll(viewport(250.0), &targets, &mut animator, 0.0);
        assert_eq!(fired, vec![(Cue::Profile, TriggerEvent::Enter)]);

        choreo.on_scroll(viewport(0.0), &targets, &mut animator, 1.0);
        let again = choreo.on_scroll(viewport(250.0), &targets, &mut animator, 2.0);
        assert!(again.is_empty());
        assert!(choreo.bindings()[0].is_spent());
    }

    #[test]
    fn starting_deep_in_the_page_fires_everything_above() {
        let targets = page(8);
        let mut animator = Animator::new();
        let mut choreo = attach(&targets, &mut animator);

        let fired = choreo.on_scroll(viewport(4500.0), &targets, &mut animator, 0.0);

        assert!(fired.contains(&(Cue::Profile, TriggerEvent::Enter)));
        assert!(fired.contains(&(Cue::Cards, TriggerEvent::Enter)));
        assert!(fired.contains(&(Cue::Skills, TriggerEvent::Enter)));
        assert!(fired.contains(&(Cue::FloatingNav, TriggerEvent::Enter)));
        assert!(fired.contains(&(Cue::FloatingNav, TriggerEvent::Leave)));
        assert!(choreo.skills_entered());
    }

    #[test]
    fn floating_nav_follows_every_crossing() {
        let targets = page(8);
        let mut animator = Animator::new();
        let mut choreo = attach(&targets, &mut animator);

        let nav_events = |fired: Vec<(Cue, TriggerEvent)>| -> Vec<TriggerEvent> {
            fired
                .into_iter()
                .filter(|(cue, _)| *cue == Cue::FloatingNav)
                .map(|(_, event)| event)
                .collect()
        };

        // Region spans scroll 1500..3500.
        assert_eq!(
            nav_events(choreo.on_scroll(viewport(1600.0), &targets, &mut animator, 0.0)),
            vec![TriggerEvent::Enter]
        );
        assert_eq!(
            nav_events(choreo.on_scroll(viewport(3600.0), &targets, &mut animator, 1.0)),
            vec![TriggerEvent::Leave]
        );
        assert_eq!(
            nav_events(choreo.on_scroll(viewport(3000.0), &targets, &mut animator, 2.0)),
            vec![TriggerEvent::EnterBack]
        );
        assert_eq!(
            nav_events(choreo.on_scroll(viewport(100.0), &targets, &mut animator, 3.0)),
            vec![TriggerEvent::LeaveBack]
        );
        assert_eq!(
            nav_events(choreo.on_scroll(viewport(5000.0), &targets, &mut animator, 4.0)),
            vec![TriggerEvent::Enter, TriggerEvent::Leave]
        );
    }

    #[test]
    fn repeated_nav_crossings_do_not_stack_tracks() {
        let targets = page(8);
        let mut animator = Animator::new();
        let mut choreo = attach(&targets, &mut animator);

        for step in 0..6 {
            let scroll = if step % 2 == 0 { 1600.0 } else { 100.0 };
            choreo.on_scroll(viewport(scroll), &targets, &mut animator, step as f64 * 0.1);
        }

        animator.tick(0.6);
        assert!(animator.is_animating(&40));
        animator.tick(2.0);
        let nav = animator.style(&40).copied().unwrap_or_default();
        assert_eq!(nav.get(Property::Y), Some(100.0));
        assert_eq!(nav.get(Property::Opacity), Some(0.0));
    }

    #[test]
    fn missing_sections_are_retried_later() {
        let mut targets = page(8);
        targets.sections.remove(&Section::Skills);
        let mut animator = Animator::new();
        let mut choreo = attach(&targets, &mut animator);

        let fired = choreo.on_scroll(viewport(4500.0), &targets, &mut animator, 0.0);
        assert!(!fired.contains(&(Cue::Skills, TriggerEvent::Enter)));

        let targets = page(8);
        let fired = choreo.on_scroll(viewport(4500.0), &targets, &mut animator, 1.0);
        assert!(fired.contains(&(Cue::Skills, TriggerEvent::Enter)));
    }

    #[test]
    fn cards_stagger_in_document_order() {
        let targets = page(8);
        let mut animator = Animator::new();
        let mut choreo = attach(&targets, &mut animator);
        choreo.on_scroll(viewport(1500.0), &targets, &mut animator, 0.0);

        animator.tick(0.1);
        let first = animator.style(&30).and_then(|s| s.get(Property::Y)).unwrap_or_default();
        let second = animator.style(&31).and_then(|s| s.get(Property::Y)).unwrap_or_default();
        assert!(first < 100.0);
        assert_eq!(second, 100.0);
    }

    #[test]
    fn plan_expand_after_entry_animates_only_new_rows() {
        let plan = plan_skills_transition(toggle(false), 10, 8, true);
        assert_eq!(plan.animate, 8..10);
        assert_eq!(plan.clear, 0..8);
        assert!(plan.hide.is_empty());

        let plan = plan_skills_transition(toggle(false), 27, 8, true);
        assert_eq!(plan.animate, 8..27);
    }

    #[test]
    fn plan_collapse_clears_retained_rows_without_replay() {
        let plan = plan_skills_transition(toggle(true), 8, 8, true);
        assert!(plan.animate.is_empty());
        assert_eq!(plan.clear, 0..8);

        let short = plan_skills_transition(toggle(true), 5, 8, true);
        assert_eq!(short.clear, 0..5);
    }

    #[test]
    fn plan_before_entry_only_hides_new_rows() {
        let plan = plan_skills_transition(toggle(false), 10, 8, false);
        assert_eq!(plan.hide, 8..10);
        assert!(plan.animate.is_empty());
        assert!(plan.clear.is_empty());

        assert!(plan_skills_transition(toggle(true), 8, 8, false).is_empty());
    }

    #[test]
    fn plan_without_change_or_new_rows_is_empty() {
        let unchanged = SkillsToggle {
            previous: true,
            expanded: true,
        };
        assert!(plan_skills_transition(unchanged, 27, 8, true).is_empty());
        assert!(plan_skills_transition(toggle(false), 6, 8, true).is_empty());
    }

    #[test]
    fn expand_then_collapse_leaves_retained_rows_at_rest() {
        let mut targets = page(8);
        let mut animator = Animator::new();
        let mut choreo = attach(&targets, &mut animator);
        choreo.on_scroll(viewport(3300.0), &targets, &mut animator, 0.0);
        animator.tick(5.0);
        assert!(animator.style(&100).is_some_and(Style::is_empty));

        targets = page(10);
        let plan = choreo.on_skills_toggled(toggle(false), &targets, &mut animator, 6.0);
        assert_eq!(plan.animate, 8..10);
        assert!(!animator.is_animating(&100));
        assert!(animator.is_animating(&108));
        assert_eq!(animator.style(&108).and_then(|s| s.get(Property::Y)), Some(30.0));

        animator.tick(7.0);
        assert!(animator.style(&108).is_some_and(Style::is_empty));

        targets = page(8);
        let plan = choreo.on_skills_toggled(toggle(true), &targets, &mut animator, 8.0);
        assert!(plan.animate.is_empty());
        assert!(animator.style(&108).is_none());
        assert!(animator.style(&100).is_some_and(Style::is_empty));
        assert!(!animator.is_animating(&100));
    }

    fn rerendered_page(cycle: u32, skill_rows: u32) -> FakeTargets {
        let fresh = 1000 + cycle * 10;
        page(8)
            .with_group(
                TargetGroup::SkillItems,
                (100..108).chain(fresh..fresh + skill_rows.saturating_sub(8)),
            )
            .with_group(
                TargetGroup::SkillBars,
                (200..208).chain(fresh + 5000..fresh + 5000 + skill_rows.saturating_sub(8)),
            )
    }

    #[test]
    fn toggle_cycles_forget_rows_and_bars_that_left_the_page() {
        let targets = page(8);
        let mut animator = Animator::new();
        let mut choreo = attach(&targets, &mut animator);
        choreo.on_scroll(viewport(3300.0), &targets, &mut animator, 0.0);
        let settled = animator.target_count();

        for cycle in 0..5 {
            let now = 10.0 + f64::from(cycle) * 4.0;
            let expanded = rerendered_page(cycle, 10);
            choreo.on_skills_toggled(toggle(false), &expanded, &mut animator, now);
            assert_eq!(animator.target_count(), settled + 4);

            let collapsed = rerendered_page(cycle, 8);
            choreo.on_skills_toggled(toggle(true), &collapsed, &mut animator, now + 2.0);
            assert_eq!(animator.target_count(), settled);
        }
    }

    #[test]
    fn expanding_before_entry_joins_the_pending_entrance() {
        let mut targets = page(8);
        let mut animator = Animator::new();
        let mut choreo = attach(&targets, &mut animator);

        targets = page(10);
        choreo.on_skills_toggled(toggle(false), &targets, &mut animator, 0.0);
        assert_eq!(animator.style(&109).and_then(|s| s.get(Property::X)), Some(-50.0));

        let fired = choreo.on_scroll(viewport(3300.0), &targets, &mut animator, 1.0);
        assert!(fired.contains(&(Cue::Skills, TriggerEvent::Enter)));
        assert!(animator.is_animating(&109));
    }

    #[test]
    fn empty_groups_are_skipped() {
        let targets = FakeTargets::default().with_section(Section::Experience, 0.0, 500.0);
        let mut animator = Animator::new();
        let mut choreo = attach(&targets, &mut animator);

        let fired = choreo.on_scroll(viewport(0.0), &targets, &mut animator, 0.0);

        assert_eq!(fired, vec![(Cue::Cards, TriggerEvent::Enter)]);
        assert_eq!(animator.target_count(), 0);
    }
}
