//! Tween primitives: easing curves, animatable styles, tweens, timelines and
//! stagger offsets.
//!
//! Times are seconds as `f64`. A [`Tween`] only describes motion; the
//! [`Animator`](crate::animator::Animator) owns playback.
//!
//! # Invariants
//!
//! 1. Every easing maps 0 to 0 and 1 to 1, and clamps input to `[0, 1]`.
//! 2. A non-repeating tween's progress is 0 before its delay elapses and 1
//!    from `delay + duration` onward.
//! 3. A yoyo tween plays forward on even cycles and backward on odd ones.
//! 4. Timeline offsets never go below zero.

use std::f64::consts::PI;

/// Easing curves by their familiar power/expo/sine names.
///
/// `power1` is quadratic, `power2` cubic, `power3` quartic and `power4`
/// quintic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    Power2Out,
    Power2InOut,
    Power3In,
    Power3Out,
    Power4InOut,
    ExpoInOut,
    SineInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power2Out => ease_out(t, 3),
            Self::Power2InOut => ease_in_out(t, 3),
            Self::Power3In => ease_in(t, 4),
            Self::Power3Out => ease_out(t, 4),
            Self::Power4InOut => ease_in_out(t, 5),
            Self::ExpoInOut => expo_in_out(t),
            Self::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

fn ease_in(t: f64, power: i32) -> f64 {
    t.powi(power)
}

fn ease_out(t: f64, power: i32) -> f64 {
    1.0 - (1.0 - t).powi(power)
}

fn ease_in_out(t: f64, power: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(power - 1) * t.powi(power)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(power) / 2.0
    }
}

fn expo_in_out(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else if t < 0.5 {
        2f64.powf(20.0 * t - 10.0) / 2.0
    } else {
        (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    X,
    Y,
    XPercent,
    Scale,
    ScaleX,
    Rotate,
    Opacity,
}

impl Property {
    pub const ALL: [Property; 7] = [
        Property::X,
        Property::Y,
        Property::XPercent,
        Property::Scale,
        Property::ScaleX,
        Property::Rotate,
        Property::Opacity,
    ];

    /// Value an element has when no override is present.
    pub fn rest_value(self) -> f64 {
        match self {
            Self::Scale | Self::ScaleX | Self::Opacity => 1.0,
            Self::X | Self::Y | Self::XPercent | Self::Rotate => 0.0,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A sparse set of property overrides. An absent property is left to the
/// stylesheet.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Style {
    values: [Option<f64>; 7],
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x(self, value: f64) -> Self {
        self.with(Property::X, value)
    }

    pub fn y(self, value: f64) -> Self {
        self.with(Property::Y, value)
    }

    pub fn scale(self, value: f64) -> Self {
        self.with(Property::Scale, value)
    }

    pub fn scale_x(self, value: f64) -> Self {
        self.with(Property::ScaleX, value)
    }

    pub fn rotate(self, value: f64) -> Self {
        self.with(Property::Rotate, value)
    }

    pub fn opacity(self, value: f64) -> Self {
        self.with(Property::Opacity, value)
    }

    pub fn with(mut self, property: Property, value: f64) -> Self {
        self.set(property, value);
        self
    }

    pub fn get(&self, property: Property) -> Option<f64> {
        self.values[property.index()]
    }

    pub fn set(&mut self, property: Property, value: f64) {
        self.values[property.index()] = Some(value);
    }

    pub fn remove(&mut self, property: Property) {
        self.values[property.index()] = None;
    }

    pub fn contains(&self, property: Property) -> bool {
        self.get(property).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        Property::ALL
            .into_iter()
            .filter(|property| self.contains(*property))
    }

    /// Copy every property present in `other` over this style.
    pub fn merge(&mut self, other: &Style) {
        for property in other.properties() {
            if let Some(value) = other.get(property) {
                self.set(property, value);
            }
        }
    }

    /// CSS `transform` value, or `None` when no transform property is set.
    pub fn transform_css(&self) -> Option<String> {
        let mut parts = Vec::new();

        if self.contains(Property::X) || self.contains(Property::Y) {
            parts.push(format!(
                "translate({:.3}px, {:.3}px)",
                self.get(Property::X).unwrap_or(0.0),
                self.get(Property::Y).unwrap_or(0.0)
            ));
        }
        if let Some(value) = self.get(Property::XPercent) {
            parts.push(format!("translateX({value:.3}%)"));
        }
        if let Some(value) = self.get(Property::Rotate) {
            parts.push(format!("rotate({value:.3}deg)"));
        }
        if let Some(value) = self.get(Property::Scale) {
            parts.push(format!("scale({value:.4})"));
        }
        if let Some(value) = self.get(Property::ScaleX) {
            parts.push(format!("scaleX({value:.4})"));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    pub fn opacity_css(&self) -> Option<String> {
        self.get(Property::Opacity)
            .map(|value| format!("{:.4}", value.clamp(0.0, 1.0)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Once,
    Forever,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub to: Style,
    pub from: Option<Style>,
    pub duration: f64,
    pub delay: f64,
    pub ease: Easing,
    pub repeat: Repeat,
    pub yoyo: bool,
    pub clear_on_complete: bool,
}

impl Tween {
    pub fn to(to: Style, duration: f64) -> Self {
        Self {
            to,
            from: None,
            duration: duration.max(0.0),
            delay: 0.0,
            ease: Easing::Linear,
            repeat: Repeat::Once,
            yoyo: false,
            clear_on_complete: false,
        }
    }

    pub fn from_to(from: Style, to: Style, duration: f64) -> Self {
        Self {
            from: Some(from),
            ..Self::to(to, duration)
        }
    }

    pub fn ease(mut self, ease: Easing) -> Self {
        self.ease = ease;
        self
    }

    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn yoyo_forever(mut self) -> Self {
        self.repeat = Repeat::Forever;
        self.yoyo = true;
        self
    }

    pub fn clear_on_complete(mut self) -> Self {
        self.clear_on_complete = true;
        self
    }

    /// Linear progress through the current cycle at `elapsed` seconds after
    /// the tween was started, before easing.
    pub fn progress_at(&self, elapsed: f64) -> f64 {
        let local = elapsed - self.delay.max(0.0);
        if local <= 0.0 {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }

        match self.repeat {
            Repeat::Once => (local / self.duration).min(1.0),
            Repeat::Forever => {
                let cycle = (local / self.duration).floor();
                let fraction = local / self.duration - cycle;
                if self.yoyo && cycle as u64 % 2 == 1 {
                    1.0 - fraction
                } else {
                    fraction
                }
            }
        }
    }

    pub fn eased_at(&self, elapsed: f64) -> f64 {
        self.ease.apply(self.progress_at(elapsed))
    }

    pub fn has_started(&self, elapsed: f64) -> bool {
        elapsed >= self.delay.max(0.0)
    }

    pub fn is_complete_at(&self, elapsed: f64) -> bool {
        matches!(self.repeat, Repeat::Once) && elapsed >= self.delay.max(0.0) + self.duration
    }
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Linear stagger: the `index`-th member of a group starts `index * each`
/// seconds after the first.
pub fn stagger_offsets(count: usize, each: f64) -> impl Iterator<Item = f64> {
    (0..count).map(move |index| index as f64 * each)
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineEntry<K> {
    pub target: K,
    pub offset: f64,
    pub tween: Tween,
}

/// Tweens placed on a shared clock.
///
/// Each [`then`](Timeline::then) starts where the previous entry ends, shifted
/// by the tween's own delay; a negative delay overlaps the previous entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline<K> {
    entries: Vec<TimelineEntry<K>>,
    cursor: f64,
}

impl<K> Default for Timeline<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0.0,
        }
    }
}

impl<K> Timeline<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, target: K, tween: Tween) -> Self {
        let offset = (self.cursor + tween.delay).max(0.0);
        self.cursor = offset + tween.duration;
        self.entries.push(TimelineEntry {
            target,
            offset,
            tween: Tween { delay: 0.0, ..tween },
        });
        self
    }

    pub fn entries(&self) -> &[TimelineEntry<K>] {
        &self.entries
    }

    pub fn duration(&self) -> f64 {
        self.entries
            .iter()
            .map(|entry| entry.offset + entry.tween.duration)
            .fold(0.0, f64::max)
    }

    /// Linear progress of one entry at `elapsed` seconds into the timeline.
    pub fn entry_progress(&self, index: usize, elapsed: f64) -> Option<f64> {
        self.entries
            .get(index)
            .map(|entry| entry.tween.progress_at(elapsed - entry.offset))
    }

    /// Entries as standalone tweens, delays set to their timeline offsets.
    pub fn scheduled(&self) -> impl Iterator<Item = (&K, Tween)> + '_ {
        self.entries.iter().map(|entry| {
            (
                &entry.target,
                Tween {
                    delay: entry.offset,
                    ..entry.tween
                },
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EASINGS: [Easing; 8] = [
        Easing::Linear,
        Easing::Power2Out,
        Easing::Power2InOut,
        Easing::Power3In,
        Easing::Power3Out,
        Easing::Power4InOut,
        Easing::ExpoInOut,
        Easing::SineInOut,
    ];

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn easings_hit_both_endpoints() {
        for easing in EASINGS {
            assert!(approx(easing.apply(0.0), 0.0), "{easing:?} at 0");
            assert!(approx(easing.apply(1.0), 1.0), "{easing:?} at 1");
        }
    }

    #[test]
    fn in_out_easings_are_symmetric_at_midpoint() {
        for easing in [
            Easing::Power2InOut,
            Easing::Power4InOut,
            Easing::ExpoInOut,
            Easing::SineInOut,
        ] {
            assert!(approx(easing.apply(0.5), 0.5), "{easing:?}");
        }
    }

    #[test]
    fn out_easing_leads_in_easing() {
        assert!(Easing::Power3Out.apply(0.3) > Easing::Linear.apply(0.3));
        assert!(Easing::Power3In.apply(0.3) < Easing::Linear.apply(0.3));
    }

    #[test]
    fn easing_clamps_out_of_range_input() {
        assert_eq!(Easing::Power2Out.apply(-1.0), 0.0);
        assert_eq!(Easing::Power2Out.apply(3.0), 1.0);
    }

    #[test]
    fn tween_progress_respects_delay_and_duration() {
        let tween = Tween::to(Style::new().opacity(1.0), 2.0).delay(0.5);

        assert_eq!(tween.progress_at(0.25), 0.0);
        assert!(approx(tween.progress_at(1.5), 0.5));
        assert_eq!(tween.progress_at(9.0), 1.0);
        assert!(!tween.is_complete_at(2.4));
        assert!(tween.is_complete_at(2.5));
    }

    #[test]
    fn yoyo_reverses_on_odd_cycles_and_never_completes() {
        let tween = Tween::to(Style::new().x(10.0), 1.0).yoyo_forever();

        assert!(approx(tween.progress_at(0.25), 0.25));
        assert!(approx(tween.progress_at(1.25), 0.75));
        assert!(approx(tween.progress_at(2.25), 0.25));
        assert!(!tween.is_complete_at(1_000.0));
    }

    #[test]
    fn zero_duration_tween_jumps_to_the_end() {
        let tween = Tween::to(Style::new().scale(2.0), 0.0);

        assert_eq!(tween.progress_at(0.001), 1.0);
        assert!(tween.is_complete_at(0.0));
    }

    #[test]
    fn stagger_is_linear_from_zero() {
        let offsets: Vec<f64> = stagger_offsets(4, 0.2).collect();

        assert_eq!(offsets.len(), 4);
        assert!(approx(offsets[0], 0.0));
        assert!(approx(offsets[3], 0.6));
        assert_eq!(stagger_offsets(0, 0.2).count(), 0);
    }

    #[test]
    fn timeline_negative_delay_overlaps_previous_entry() {
        let timeline = Timeline::new()
            .then("mask", Tween::to(Style::new().rotate(10.0), 1.5))
            .then("mask", Tween::to(Style::new().scale(8.0), 1.5).delay(-1.2));

        assert!(approx(timeline.entries()[1].offset, 0.3));
        assert!(approx(timeline.duration(), 1.8));
        assert_eq!(timeline.entry_progress(1, 0.2), Some(0.0));
        assert!(approx(timeline.entry_progress(1, 1.05).unwrap_or(0.0), 0.5));
        assert_eq!(timeline.entry_progress(2, 1.0), None);
    }

    #[test]
    fn timeline_offsets_never_go_negative() {
        let timeline =
            Timeline::new().then((), Tween::to(Style::new().x(1.0), 0.5).delay(-3.0));

        assert_eq!(timeline.entries()[0].offset, 0.0);
    }

    #[test]
    fn scheduled_entries_carry_their_offsets_as_delays() {
        let timeline = Timeline::new()
            .then(1, Tween::to(Style::new().x(1.0), 1.0))
            .then(2, Tween::to(Style::new().y(1.0), 1.0).delay(0.5));
        let scheduled: Vec<(i32, f64)> = timeline
            .scheduled()
            .map(|(target, tween)| (*target, tween.delay))
            .collect();

        assert_eq!(scheduled, vec![(1, 0.0), (2, 1.5)]);
    }

    #[test]
    fn transform_css_orders_components() {
        let style = Style::new().y(100.0).rotate(10.0).scale(0.5).opacity(0.25);

        assert_eq!(
            style.transform_css().as_deref(),
            Some("translate(0.000px, 100.000px) rotate(10.000deg) scale(0.5000)")
        );
        assert_eq!(style.opacity_css().as_deref(), Some("0.2500"));
        assert_eq!(Style::new().opacity(1.0).transform_css(), None);
    }

    #[test]
    fn merge_overwrites_only_present_properties() {
        let mut base = Style::new().x(1.0).opacity(0.5);
        base.merge(&Style::new().opacity(1.0).scale(2.0));

        assert_eq!(base.get(Property::X), Some(1.0));
        assert_eq!(base.get(Property::Opacity), Some(1.0));
        assert_eq!(base.get(Property::Scale), Some(2.0));
    }
}
