// SPDX-License-Identifier: MIT OR Apache-2.0

//! Evaluation mapper.
//!
//! Turns the AI's raw score (positive favours White, negative favours Black)
//! into a win probability for White, a pair of bar widths, and a discrete
//! advantage label. All functions here are pure.

use std::fmt;

use crate::Player;

/// Default logistic scale: a score of +-1000 moves the probability to ~73%/27%
pub const DEFAULT_SCALE: f64 = 1000.0;

/// Smallest share either side of the bar may shrink to
pub const MIN_SHARE: f64 = 0.01;

/// Percentage of the whole bar available to each side
const HALF_BAR_PERCENT: f64 = 50.0;

/// Discrete description of how lopsided a position is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AdvantageLabel {
    Equal,
    Slight,
    Advantage,
    Strong,
    Winning,
}

impl AdvantageLabel {
    /// Breakpoints on `|score|`, inclusive lower bounds, strongest first
    const BREAKPOINTS: [(f64, AdvantageLabel); 4] = [
        (100_000.0, AdvantageLabel::Winning),
        (10_000.0, AdvantageLabel::Strong),
        (1_000.0, AdvantageLabel::Advantage),
        (100.0, AdvantageLabel::Slight),
    ];

    pub fn from_score(score: f64) -> Self {
        let magnitude = score.abs();
        Self::BREAKPOINTS
            .iter()
            .find(|(floor, _)| magnitude >= *floor)
            .map(|(_, label)| *label)
            .unwrap_or(AdvantageLabel::Equal)
    }

    pub fn text(&self) -> &'static str {
        match self {
            AdvantageLabel::Equal => "Equal Position",
            AdvantageLabel::Slight => "Slight Advantage",
            AdvantageLabel::Advantage => "Advantage",
            AdvantageLabel::Strong => "Strong Advantage",
            AdvantageLabel::Winning => "Winning Position!",
        }
    }
}

impl fmt::Display for AdvantageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Widths of the two evaluation bar fills, in percent of the whole bar.
/// Both fills grow outward from the centre line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarWidths {
    pub white: f64,
    pub black: f64,
}

impl BarWidths {
    /// 50/50 bar
    pub fn neutral() -> Self {
        Self {
            white: HALF_BAR_PERCENT / 2.0,
            black: HALF_BAR_PERCENT / 2.0,
        }
    }
}

/// Everything derived from one score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationReading {
    pub score: f64,
    /// Probability that White wins, in `[0, 1]`
    pub white_probability: f64,
    pub label: AdvantageLabel,
    /// Side the score leans towards; a score of exactly 0 reads as Black
    pub advantage: Player,
    pub bar: BarWidths,
}

impl EvaluationReading {
    /// `Position Evaluation: 1200 (White (Advantage))`
    pub fn describe(&self) -> String {
        format!(
            "Position Evaluation: {:.0} ({} ({}))",
            self.score,
            self.advantage.name(),
            self.label
        )
    }
}

/// Logistic score mapper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationMapper {
    scale: f64,
}

impl Default for EvaluationMapper {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
        }
    }
}

impl EvaluationMapper {
    /// Mapper with a custom sensitivity. Non-positive or non-finite scales
    /// fall back to the default.
    pub fn with_scale(scale: f64) -> Self {
        if scale.is_finite() && scale > 0.0 {
            Self { scale }
        } else {
            tracing::warn!("Ignoring invalid evaluation scale {}", scale);
            Self::default()
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// `1 / (1 + exp(-score / K))`
    pub fn probability(&self, score: f64) -> f64 {
        1.0 / (1.0 + (-score / self.scale).exp())
    }

    /// Bar widths for a score, each share clamped to at least [`MIN_SHARE`]
    pub fn bar_widths(&self, score: f64) -> BarWidths {
        let white = self.probability(score);
        let black = 1.0 - white;
        BarWidths {
            white: clamp_share(white) * HALF_BAR_PERCENT,
            black: clamp_share(black) * HALF_BAR_PERCENT,
        }
    }

    pub fn read(&self, score: f64) -> EvaluationReading {
        EvaluationReading {
            score,
            white_probability: self.probability(score),
            label: AdvantageLabel::from_score(score),
            advantage: if score > 0.0 { Player::White } else { Player::Black },
            bar: self.bar_widths(score),
        }
    }
}

fn clamp_share(share: f64) -> f64 {
    share.clamp(MIN_SHARE, 1.0 - MIN_SHARE)
}
