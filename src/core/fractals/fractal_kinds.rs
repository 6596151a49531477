use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
#[error("unknown fractal type index {index} (expected 0..{count})", count = FractalKind::ALL.len())]
pub struct UnknownFractalKind {
    pub index: u32,
}

/// Selects the per-iteration map used by the distance estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FractalKind {
    #[default]
    Mandelbulb,
    Juliabulb,
    CosineBulb,
    BurningBulb,
}

impl FractalKind {
    /// In UI index order.
    pub const ALL: &'static [Self] = &[
        Self::Mandelbulb,
        Self::Juliabulb,
        Self::CosineBulb,
        Self::BurningBulb,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Mandelbulb => "Mandelbulb",
            Self::Juliabulb => "Julia bulb",
            Self::CosineBulb => "Cosine bulb",
            Self::BurningBulb => "Burning bulb",
        }
    }

    #[must_use]
    pub const fn index(self) -> u32 {
        match self {
            Self::Mandelbulb => 0,
            Self::Juliabulb => 1,
            Self::CosineBulb => 2,
            Self::BurningBulb => 3,
        }
    }
}

impl TryFrom<u32> for FractalKind {
    type Error = UnknownFractalKind;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or(UnknownFractalKind { index })
    }
}
