//! Pointer-follow depth effect over the hero layers.
//!
//! Every move event fully determines the target offsets; nothing
//! accumulates between events.

use crate::config::{LayerResponse, MotionConfig, PointerProfile};
use crate::motion::{Easing, Property, Style, Tween};
use crate::targets::TargetGroup;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

impl PointerKind {
    pub fn profile(self, config: &MotionConfig) -> &PointerProfile {
        match self {
            Self::Mouse => &config.parallax.mouse,
            Self::Touch => &config.parallax.touch,
        }
    }
}

/// Target for one layer after a move event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerTarget {
    pub group: TargetGroup,
    pub property: Property,
    pub value: f64,
    pub duration: f64,
}

impl LayerTarget {
    pub fn tween(&self) -> Tween {
        Tween::to(Style::new().with(self.property, self.value), self.duration).ease(Easing::Power2Out)
    }
}

/// Signed distance from the horizontal center, scaled so the edges sit at
/// `±amplitude / 2`.
pub fn pointer_offset(client_x: f64, viewport_width: f64, amplitude: f64) -> f64 {
    if !(viewport_width.is_finite() && viewport_width > 0.0 && client_x.is_finite()) {
        return 0.0;
    }
    (client_x / viewport_width - 0.5) * amplitude
}

pub fn layer_targets(
    kind: PointerKind,
    client_x: f64,
    viewport_width: f64,
    config: &MotionConfig,
) -> [LayerTarget; 4] {
    let profile = kind.profile(config);
    let mobile = config.is_mobile(viewport_width);
    let offset = pointer_offset(client_x, viewport_width, profile.amplitude);

    let target = |group: TargetGroup, property: Property, response: LayerResponse| {
        let coefficient = if mobile {
            response.mobile_coefficient
        } else {
            response.coefficient
        };
        LayerTarget {
            group,
            property,
            value: offset * coefficient,
            duration: response.duration,
        }
    };

    [
        target(TargetGroup::HeroHeadline, Property::XPercent, profile.headline),
        target(TargetGroup::HeroSky, Property::X, profile.sky),
        target(TargetGroup::HeroBackground, Property::X, profile.background),
        target(TargetGroup::HeroCharacter, Property::X, profile.character),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DESKTOP: f64 = 1280.0;

    #[test]
    fn center_is_at_rest() {
        let config = MotionConfig::default();
        for kind in [PointerKind::Mouse, PointerKind::Touch] {
            for layer in layer_targets(kind, DESKTOP / 2.0, DESKTOP, &config) {
                assert_eq!(layer.value, 0.0);
            }
        }
    }

    #[test]
    fn degenerate_width_yields_zero() {
        assert_eq!(pointer_offset(100.0, 0.0, 40.0), 0.0);
        assert_eq!(pointer_offset(100.0, -5.0, 40.0), 0.0);
        assert_eq!(pointer_offset(f64::NAN, 800.0, 40.0), 0.0);
    }

    #[test]
    fn edges_scale_by_layer_coefficient() {
        let config = MotionConfig::default();
        let [headline, sky, background, character] =
            layer_targets(PointerKind::Mouse, DESKTOP, DESKTOP, &config);

        assert!((sky.value - 20.0).abs() < 1e-9);
        assert!((background.value - 34.0).abs() < 1e-9);
        assert!((character.value - 10.0).abs() < 1e-9);
        assert!((headline.value - 8.0).abs() < 1e-9);
        assert_eq!(headline.property, Property::XPercent);
        assert!((character.duration - 0.4).abs() < 1e-9);
    }

    #[test]
    fn mobile_widths_use_mobile_coefficients() {
        let config = MotionConfig::default();
        let [headline, _, _, character] = layer_targets(PointerKind::Touch, 0.0, 400.0, &config);

        assert!((headline.value + 1.5).abs() < 1e-9);
        assert!((character.value + 4.5).abs() < 1e-9);
        assert!((character.duration - 0.5).abs() < 1e-9);
    }

    #[test]
    fn layer_tween_eases_out() {
        let config = MotionConfig::default();
        let [_, sky, _, _] = layer_targets(PointerKind::Mouse, 0.0, DESKTOP, &config);
        let tween = sky.tween();

        assert_eq!(tween.ease, Easing::Power2Out);
        assert_eq!(tween.to.get(Property::X), Some(-20.0));
    }

    proptest! {
        #[test]
        fn offsets_share_the_pointer_side(
            fraction in 0.0f64..=1.0,
            width in 1.0f64..4000.0,
            touch in any::<bool>(),
        ) {
            let config = MotionConfig::default();
            let kind = if touch { PointerKind::Touch } else { PointerKind::Mouse };
            let client_x = fraction * width;
            let side = client_x - width / 2.0;

            for layer in layer_targets(kind, client_x, width, &config) {
                prop_assert!(layer.value * side >= 0.0);
                prop_assert!(layer.value.abs() <= kind.profile(&config).amplitude);
            }
        }
    }
}
