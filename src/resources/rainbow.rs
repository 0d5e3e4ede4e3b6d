use bevy::prelude::{Color, Resource};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RainbowMode {
    #[default]
    Off,
    Rainbow,
    Pulse,
    Darkness,
    Random,
}

impl RainbowMode {
    pub const ALL: [RainbowMode; 5] = [
        RainbowMode::Off,
        RainbowMode::Rainbow,
        RainbowMode::Pulse,
        RainbowMode::Darkness,
        RainbowMode::Random,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RainbowMode::Off => "Off",
            RainbowMode::Rainbow => "Rainbow",
            RainbowMode::Pulse => "Pulse",
            RainbowMode::Darkness => "Darkness",
            RainbowMode::Random => "Random",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Resource)]
#[serde(default)]
pub struct RainbowSettings {
    pub mode: RainbowMode,
    /// Cycle speed in percent.
    pub speed: u32,
    pub local: bool,
    pub others: bool,
}

impl Default for RainbowSettings {
    fn default() -> Self {
        Self {
            mode: RainbowMode::Off,
            speed: 100,
            local: false,
            others: false,
        }
    }
}

impl RainbowSettings {
    pub fn is_enabled(&self) -> bool {
        self.mode != RainbowMode::Off && (self.local || self.others)
    }

    pub fn applies_to(&self, local: bool) -> bool {
        if local {
            self.local
        } else {
            self.others
        }
    }
}

/// Hue, saturation, lightness and alpha, all in `0..=1`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct Hsla([f32; 4]);

impl Hsla {
    fn random(rng: &mut impl Rng) -> Self {
        Self([rng.gen::<f32>(), 1.0, rng.gen::<f32>(), 1.0])
    }

    fn lerp(self, other: Self, t: f32) -> Self {
        let mut result = self.0;
        for (value, target) in result.iter_mut().zip(other.0) {
            *value += t * (target - *value);
        }
        Self(result)
    }

    fn to_color(self) -> Color {
        let [h, s, l, a] = self.0;
        Color::hsla(h.rem_euclid(1.0) * 360.0, s, l, a)
    }
}

#[derive(Default, Resource)]
pub struct RainbowState {
    time: f32,
    from: Hsla,
    to: Option<Hsla>,
    last_swap: Option<f32>,
    color: Option<Color>,
}

impl RainbowState {
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Color of the current frame, `None` while the effect is off.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn advance(
        &mut self,
        settings: &RainbowSettings,
        delta_seconds: f32,
        rng: &mut impl Rng,
    ) -> Option<Color> {
        if !settings.is_enabled() {
            self.color = None;
            return None;
        }

        self.time += delta_seconds * settings.speed as f32 / 100.0;
        let tick = self.time.rem_euclid(1.0);

        let color = match settings.mode {
            RainbowMode::Off => return None,
            RainbowMode::Rainbow => Hsla([tick, 1.0, 0.5, 1.0]).to_color(),
            RainbowMode::Pulse => Hsla([
                (self.time.floor() * 0.1).rem_euclid(1.0),
                1.0,
                0.5 + (tick - 0.5).abs(),
                1.0,
            ])
            .to_color(),
            RainbowMode::Darkness => Color::BLACK,
            RainbowMode::Random => {
                let to = *self.to.get_or_insert_with(|| Hsla::random(rng));
                if self.last_swap.map_or(true, |last| self.time - last > 1.0) {
                    self.last_swap = Some(self.time);
                    self.from = to;
                    self.to = Some(Hsla::random(rng));
                }
                let to = self.to.unwrap_or(to);
                self.from.lerp(to, tick).to_color()
            }
        };

        self.color = Some(color);
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn settings(mode: RainbowMode) -> RainbowSettings {
        RainbowSettings {
            mode,
            local: true,
            ..Default::default()
        }
    }

    #[test]
    fn off_without_mode_or_targets() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = RainbowState::default();

        assert!(state
            .advance(&settings(RainbowMode::Off), 0.1, &mut rng)
            .is_none());

        let nobody = RainbowSettings {
            mode: RainbowMode::Rainbow,
            ..Default::default()
        };
        assert!(state.advance(&nobody, 0.1, &mut rng).is_none());
        assert_relative_eq!(state.time(), 0.0);
    }

    #[test]
    fn rainbow_hue_follows_time() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = RainbowState::default();
        let color = state
            .advance(&settings(RainbowMode::Rainbow), 0.25, &mut rng)
            .unwrap();

        // 0.25 of the way round is 90 degrees
        assert_eq!(color, Color::hsla(90.0, 1.0, 0.5, 1.0));
    }

    #[test]
    fn speed_scales_time() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = RainbowState::default();
        let fast = RainbowSettings {
            speed: 200,
            ..settings(RainbowMode::Rainbow)
        };
        state.advance(&fast, 0.5, &mut rng);
        assert_relative_eq!(state.time(), 1.0);
    }

    #[test]
    fn pulse_steps_hue_every_second() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = RainbowState::default();
        let color = state
            .advance(&settings(RainbowMode::Pulse), 2.5, &mut rng)
            .unwrap();

        let expected = Color::hsla(0.2 * 360.0, 1.0, 0.5, 1.0).as_rgba_f32();
        for (value, expected) in color.as_rgba_f32().into_iter().zip(expected) {
            assert_relative_eq!(value, expected, epsilon = 1e-4);
        }
    }

    #[test]
    fn darkness_is_black() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = RainbowState::default();
        let color = state
            .advance(&settings(RainbowMode::Darkness), 0.3, &mut rng)
            .unwrap();
        assert_eq!(color, Color::BLACK);
    }

    #[test]
    fn random_swaps_target_after_a_second() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut state = RainbowState::default();
        let random = settings(RainbowMode::Random);

        state.advance(&random, 0.1, &mut rng);
        let first_target = state.to;

        state.advance(&random, 0.5, &mut rng);
        assert_eq!(state.to, first_target);

        state.advance(&random, 0.6, &mut rng);
        assert_ne!(state.to, first_target);
        assert_eq!(Some(state.from), first_target);
    }

    #[test]
    fn applies_to_local_and_others_separately() {
        let settings = RainbowSettings {
            mode: RainbowMode::Rainbow,
            local: false,
            others: true,
            ..Default::default()
        };
        assert!(settings.is_enabled());
        assert!(settings.applies_to(false));
        assert!(!settings.applies_to(true));
    }
}
