use core::convert::Infallible;
use core::f32::consts::PI;
use core::str::FromStr;

/// Easing curves for snap interpolation.
///
/// `sample` maps normalized time `t` in `[0, 1]` to progress; every curve starts at `0` and ends
/// at `1`. `Back` and `Elastic` overshoot in between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ease {
    #[default]
    Linear,
    InSine,
    OutSine,
    InOutSine,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    InBack,
    OutBack,
    InOutBack,
    InElastic,
    OutElastic,
    InOutElastic,
    InBounce,
    OutBounce,
    InOutBounce,
}

const BACK: f32 = 1.70158;
const BACK_IN_OUT: f32 = BACK * 1.525;

impl Ease {
    pub const ALL: [Ease; 31] = [
        Self::Linear,
        Self::InSine,
        Self::OutSine,
        Self::InOutSine,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::InQuart,
        Self::OutQuart,
        Self::InOutQuart,
        Self::InQuint,
        Self::OutQuint,
        Self::InOutQuint,
        Self::InExpo,
        Self::OutExpo,
        Self::InOutExpo,
        Self::InCirc,
        Self::OutCirc,
        Self::InOutCirc,
        Self::InBack,
        Self::OutBack,
        Self::InOutBack,
        Self::InElastic,
        Self::OutElastic,
        Self::InOutElastic,
        Self::InBounce,
        Self::OutBounce,
        Self::InOutBounce,
    ];

    pub fn sample(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,

            Self::InSine => 1.0 - (t * PI / 2.0).cos(),
            Self::OutSine => (t * PI / 2.0).sin(),
            Self::InOutSine => 0.5 - (PI * t).cos() / 2.0,

            Self::InQuad => t.powi(2),
            Self::OutQuad => 1.0 - (1.0 - t).powi(2),
            Self::InOutQuad => in_out(t, |u| u.powi(2)),
            Self::InCubic => t.powi(3),
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => in_out(t, |u| u.powi(3)),
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => in_out(t, |u| u.powi(4)),
            Self::InQuint => t.powi(5),
            Self::OutQuint => 1.0 - (1.0 - t).powi(5),
            Self::InOutQuint => in_out(t, |u| u.powi(5)),

            Self::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f32.powf(10.0 * t - 10.0)
                }
            }
            Self::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Self::InOutExpo => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    2f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }

            Self::InCirc => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Self::OutCirc => (1.0 - (t - 1.0).powi(2)).max(0.0).sqrt(),
            Self::InOutCirc => {
                if t < 0.5 {
                    (1.0 - (1.0 - 4.0 * t * t).max(0.0).sqrt()) / 2.0
                } else {
                    (1.0 + (1.0 - 4.0 * (t - 1.0).powi(2)).max(0.0).sqrt()) / 2.0
                }
            }

            Self::InBack => t * t * ((BACK + 1.0) * t - BACK),
            Self::OutBack => {
                let u = t - 1.0;
                1.0 + u * u * ((BACK + 1.0) * u + BACK)
            }
            Self::InOutBack => {
                let c = BACK_IN_OUT;
                if t < 0.5 {
                    (2.0 * t).powi(2) * ((c + 1.0) * 2.0 * t - c) / 2.0
                } else {
                    let u = 2.0 * t - 2.0;
                    (u * u * ((c + 1.0) * u + c) + 2.0) / 2.0
                }
            }

            Self::InElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    -2f32.powf(10.0 * t - 10.0) * ((t * 10.0 - 10.75) * (2.0 * PI / 3.0)).sin()
                }
            }
            Self::OutElastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * (2.0 * PI / 3.0)).sin() + 1.0
                }
            }
            Self::InOutElastic => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let wave = ((20.0 * t - 11.125) * (2.0 * PI / 4.5)).sin();
                if t < 0.5 {
                    -(2f32.powf(20.0 * t - 10.0) * wave) / 2.0
                } else {
                    2f32.powf(-20.0 * t + 10.0) * wave / 2.0 + 1.0
                }
            }

            Self::InBounce => 1.0 - out_bounce(1.0 - t),
            Self::OutBounce => out_bounce(t),
            Self::InOutBounce => {
                if t < 0.5 {
                    (1.0 - out_bounce(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + out_bounce(2.0 * t - 1.0)) / 2.0
                }
            }
        }
    }

    /// The curve's name in `UpperCamelCase`, e.g. `"InOutCubic"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::InSine => "InSine",
            Self::OutSine => "OutSine",
            Self::InOutSine => "InOutSine",
            Self::InQuad => "InQuad",
            Self::OutQuad => "OutQuad",
            Self::InOutQuad => "InOutQuad",
            Self::InCubic => "InCubic",
            Self::OutCubic => "OutCubic",
            Self::InOutCubic => "InOutCubic",
            Self::InQuart => "InQuart",
            Self::OutQuart => "OutQuart",
            Self::InOutQuart => "InOutQuart",
            Self::InQuint => "InQuint",
            Self::OutQuint => "OutQuint",
            Self::InOutQuint => "InOutQuint",
            Self::InExpo => "InExpo",
            Self::OutExpo => "OutExpo",
            Self::InOutExpo => "InOutExpo",
            Self::InCirc => "InCirc",
            Self::OutCirc => "OutCirc",
            Self::InOutCirc => "InOutCirc",
            Self::InBack => "InBack",
            Self::OutBack => "OutBack",
            Self::InOutBack => "InOutBack",
            Self::InElastic => "InElastic",
            Self::OutElastic => "OutElastic",
            Self::InOutElastic => "InOutElastic",
            Self::InBounce => "InBounce",
            Self::OutBounce => "OutBounce",
            Self::InOutBounce => "InOutBounce",
        }
    }

    /// Resolves a curve by name.
    ///
    /// Matching ignores case, `_`, `-` and spaces, and an optional `ease` prefix, so
    /// `"InOutCubic"`, `"in_out_cubic"` and `"easeInOutCubic"` are the same curve. `"ExpoInOut"`
    /// is accepted for `InOutExpo`. Unknown names resolve to [`Ease::Linear`].
    pub fn from_name(name: &str) -> Self {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let key = key.strip_prefix("ease").unwrap_or(&key);
        if key == "expoinout" {
            return Self::InOutExpo;
        }
        Self::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(key))
            .unwrap_or_else(|| {
                swarn!(curve = name, "Ease::from_name: unknown curve, using Linear");
                Self::Linear
            })
    }
}

impl FromStr for Ease {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

/// Mirrors an ease-in curve into an ease-in-out curve.
fn in_out(t: f32, ease_in: impl Fn(f32) -> f32) -> f32 {
    if t < 0.5 {
        ease_in(2.0 * t) / 2.0
    } else {
        1.0 - ease_in(2.0 - 2.0 * t) / 2.0
    }
}

fn out_bounce(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let u = t - 1.5 / D;
        N * u * u + 0.75
    } else if t < 2.5 / D {
        let u = t - 2.25 / D;
        N * u * u + 0.9375
    } else {
        let u = t - 2.625 / D;
        N * u * u + 0.984375
    }
}
