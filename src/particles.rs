//! Decorative particle field.
//!
//! Specs come from an injected random source so a seeded generator
//! reproduces the same field. Each particle carries two endless yoyo
//! tweens, one for drift and one for fade.

use rand::Rng;

use crate::motion::{Easing, Style, Tween};

const TINT: (u8, u8, u8) = (245, 158, 11);
const DRIFT_RANGE_PX: f64 = 100.0;
const SECTION_ROTATION_DEGREES: f64 = 360.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleProfile {
    /// Full-page background field.
    Ambient,
    /// Sparser, larger particles inside a content section.
    Section,
}

impl ParticleProfile {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Ambient => "particle",
            Self::Section => "floating-particle",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSpec {
    pub profile: ParticleProfile,
    pub left_percent: f64,
    pub top_percent: f64,
    pub size_px: f64,
    pub tint_alpha: f64,
    pub initial_opacity: f64,
    pub initial_scale: f64,
    pub drift_x: f64,
    pub drift_y: f64,
    pub rotation: f64,
    pub drift_duration: f64,
    pub drift_delay: f64,
    pub fade_to: f64,
    pub fade_duration: f64,
    pub fade_delay: f64,
}

impl ParticleSpec {
    pub fn sample<R: Rng + ?Sized>(profile: ParticleProfile, rng: &mut R) -> Self {
        match profile {
            ParticleProfile::Ambient => Self {
                profile,
                left_percent: rng.random_range(0.0..100.0),
                top_percent: rng.random_range(0.0..100.0),
                size_px: 2.0,
                tint_alpha: 0.6,
                initial_opacity: rng.random_range(0.2..1.0),
                initial_scale: rng.random_range(0.5..2.0),
                drift_x: rng.random_range(-DRIFT_RANGE_PX..DRIFT_RANGE_PX),
                drift_y: rng.random_range(-DRIFT_RANGE_PX..DRIFT_RANGE_PX),
                rotation: 0.0,
                drift_duration: rng.random_range(5.0..15.0),
                drift_delay: rng.random_range(0.0..2.0),
                fade_to: rng.random_range(0.2..1.0),
                fade_duration: rng.random_range(2.0..5.0),
                fade_delay: rng.random_range(0.0..2.0),
            },
            ParticleProfile::Section => Self {
                profile,
                left_percent: rng.random_range(0.0..100.0),
                top_percent: rng.random_range(0.0..100.0),
                size_px: rng.random_range(2.0..6.0),
                tint_alpha: rng.random_range(0.2..0.7),
                initial_opacity: 1.0,
                initial_scale: 1.0,
                drift_x: rng.random_range(-DRIFT_RANGE_PX..DRIFT_RANGE_PX),
                drift_y: rng.random_range(-DRIFT_RANGE_PX..DRIFT_RANGE_PX),
                rotation: SECTION_ROTATION_DEGREES,
                drift_duration: rng.random_range(10.0..20.0),
                drift_delay: 0.0,
                fade_to: rng.random_range(0.2..1.0),
                fade_duration: rng.random_range(2.0..5.0),
                fade_delay: 0.0,
            },
        }
    }

    /// Overrides applied before either tween starts.
    pub fn initial_style(&self) -> Style {
        let style = Style::new().opacity(self.initial_opacity);
        match self.profile {
            ParticleProfile::Ambient => style.scale(self.initial_scale),
            ParticleProfile::Section => style,
        }
    }

    pub fn drift_tween(&self) -> Tween {
        let (to, ease) = match self.profile {
            ParticleProfile::Ambient => (
                Style::new().x(self.drift_x).y(self.drift_y),
                Easing::SineInOut,
            ),
            ParticleProfile::Section => (
                Style::new().x(self.drift_x).y(self.drift_y).rotate(self.rotation),
                Easing::Linear,
            ),
        };
        Tween::to(to, self.drift_duration)
            .ease(ease)
            .delay(self.drift_delay)
            .yoyo_forever()
    }

    pub fn fade_tween(&self) -> Tween {
        let ease = match self.profile {
            ParticleProfile::Ambient => Easing::SineInOut,
            ParticleProfile::Section => Easing::Power2InOut,
        };
        Tween::to(Style::new().opacity(self.fade_to), self.fade_duration)
            .ease(ease)
            .delay(self.fade_delay)
            .yoyo_forever()
    }

    /// Static inline declarations for the particle node.
    pub fn inline_css(&self) -> String {
        let (r, g, b) = TINT;
        format!(
            "position: absolute; width: {size:.2}px; height: {size:.2}px; \
             left: {left:.3}%; top: {top:.3}%; \
             background: rgba({r}, {g}, {b}, {alpha:.3}); border-radius: 50%; \
             pointer-events: none; z-index: 1;",
            size = self.size_px,
            left = self.left_percent,
            top = self.top_percent,
            alpha = self.tint_alpha,
        )
    }
}

/// Lazily sample `count` particles.
pub fn generate<'a, R: Rng + ?Sized>(
    profile: ParticleProfile,
    count: usize,
    rng: &'a mut R,
) -> impl Iterator<Item = ParticleSpec> + 'a {
    (0..count).map(move |_| ParticleSpec::sample(profile, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{Property, Repeat};
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn field(profile: ParticleProfile, count: usize, seed: u64) -> Vec<ParticleSpec> {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate(profile, count, &mut rng).collect()
    }

    #[test]
    fn same_seed_same_field() {
        assert_eq!(
            field(ParticleProfile::Section, 15, 7),
            field(ParticleProfile::Section, 15, 7)
        );
        assert_ne!(
            field(ParticleProfile::Ambient, 50, 7),
            field(ParticleProfile::Ambient, 50, 8)
        );
    }

    #[test]
    fn generator_yields_exactly_count() {
        assert_eq!(field(ParticleProfile::Ambient, 50, 1).len(), 50);
        assert!(field(ParticleProfile::Section, 0, 1).is_empty());
    }

    #[test]
    fn tweens_loop_forever_with_yoyo() {
        let spec = field(ParticleProfile::Section, 1, 3)[0];

        for tween in [spec.drift_tween(), spec.fade_tween()] {
            assert_eq!(tween.repeat, Repeat::Forever);
            assert!(tween.yoyo);
            assert!(!tween.is_complete_at(1_000.0));
        }
        assert_eq!(spec.drift_tween().to.get(Property::Rotate), Some(360.0));
    }

    #[test]
    fn ambient_particles_do_not_rotate() {
        let spec = field(ParticleProfile::Ambient, 1, 3)[0];

        assert!(!spec.drift_tween().to.contains(Property::Rotate));
        assert_eq!(spec.initial_style().get(Property::Scale), Some(spec.initial_scale));
    }

    #[test]
    fn inline_css_positions_the_node() {
        let spec = field(ParticleProfile::Section, 1, 11)[0];
        let css = spec.inline_css();

        assert!(css.starts_with("position: absolute;"));
        assert!(css.contains("rgba(245, 158, 11,"));
        assert!(css.contains(&format!("left: {:.3}%", spec.left_percent)));
    }

    proptest! {
        #[test]
        fn sampled_values_stay_in_range(seed in any::<u64>()) {
            for spec in field(ParticleProfile::Section, 12, seed) {
                prop_assert!((0.0..100.0).contains(&spec.left_percent));
                prop_assert!((0.0..100.0).contains(&spec.top_percent));
                prop_assert!((2.0..6.0).contains(&spec.size_px));
                prop_assert!((0.2..0.7).contains(&spec.tint_alpha));
                prop_assert!(spec.drift_x.abs() <= DRIFT_RANGE_PX);
                prop_assert!((10.0..20.0).contains(&spec.drift_duration));
                prop_assert!((0.2..1.0).contains(&spec.fade_to));
                prop_assert!((2.0..5.0).contains(&spec.fade_duration));
            }
            for spec in field(ParticleProfile::Ambient, 50, seed) {
                prop_assert_eq!(spec.size_px, 2.0);
                prop_assert!((5.0..15.0).contains(&spec.drift_duration));
                prop_assert!((0.0..2.0).contains(&spec.drift_delay));
                prop_assert!((0.0..2.0).contains(&spec.fade_delay));
                prop_assert!((0.5..2.0).contains(&spec.initial_scale));
            }
        }
    }
}
