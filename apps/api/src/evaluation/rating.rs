use std::fmt;

use serde::Serialize;

/// Qualitative bucket for a numeric rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RatingLabel {
    Excellent,
    Good,
    Average,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    Poor,
}

impl RatingLabel {
    /// Thresholds are checked top-down; boundaries land in the higher bucket.
    pub fn classify(rating: u32) -> Self {
        match rating {
            r if r >= 9 => RatingLabel::Excellent,
            r if r >= 7 => RatingLabel::Good,
            r if r >= 5 => RatingLabel::Average,
            r if r >= 3 => RatingLabel::NeedsImprovement,
            _ => RatingLabel::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RatingLabel::Excellent => "Excellent",
            RatingLabel::Good => "Good",
            RatingLabel::Average => "Average",
            RatingLabel::NeedsImprovement => "Needs Improvement",
            RatingLabel::Poor => "Poor",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            RatingLabel::Excellent => "🌟",
            RatingLabel::Good => "👍",
            RatingLabel::Average => "👌",
            RatingLabel::NeedsImprovement => "🤔",
            RatingLabel::Poor => "👎",
        }
    }
}

impl fmt::Display for RatingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.as_str())
    }
}
