//! Quick tips shown on the tips page and dashboard.

use chrono::{Datelike, NaiveDate};

/// What part of the craft a tip covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipCategory {
    /// Audience growth
    Growth,
    /// Filming and editing
    Production,
    /// Revenue
    Monetization,
    /// Community and comments
    Engagement,
}

impl TipCategory {
    /// Badge label for the category.
    pub fn label(&self) -> &'static str {
        match self {
            TipCategory::Growth => "Growth",
            TipCategory::Production => "Production",
            TipCategory::Monetization => "Monetization",
            TipCategory::Engagement => "Engagement",
        }
    }
}

/// A single quick tip.
#[derive(Debug, Clone)]
pub struct QuickTip {
    /// Short headline
    pub title: String,
    /// The tip itself
    pub body: String,
    /// Category for filtering
    pub category: TipCategory,
}

impl QuickTip {
    /// Create a new tip.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        category: TipCategory,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            category,
        }
    }
}

/// The quick-tips collection.
pub struct TipList {
    tips: Vec<QuickTip>,
}

impl Default for TipList {
    fn default() -> Self {
        Self::new()
    }
}

impl TipList {
    /// Create the collection with the default tips.
    pub fn new() -> Self {
        let tips = vec![
            QuickTip::new(
                "Hook in the first 15 seconds",
                "Viewers decide whether to stay almost immediately. Open with the \
                 payoff or the question, never with a channel intro.",
                TipCategory::Production,
            ),
            QuickTip::new(
                "Batch your filming days",
                "Film two or three videos in one session. Setup and teardown are \
                 the expensive part; amortize them.",
                TipCategory::Production,
            ),
            QuickTip::new(
                "Study your top performers",
                "Sort your uploads by click-through rate and make more of what \
                 already works before experimenting.",
                TipCategory::Growth,
            ),
            QuickTip::new(
                "Consistency beats intensity",
                "One video every week for a year grows a channel further than \
                 ten videos in one month followed by silence.",
                TipCategory::Growth,
            ),
            QuickTip::new(
                "Reply to early comments",
                "The first hour after upload is when the algorithm watches \
                 engagement hardest. Be in the comments for it.",
                TipCategory::Engagement,
            ),
            QuickTip::new(
                "Pin a question, not a thanks",
                "A pinned comment that asks viewers something specific doubles \
                 comment volume compared to a pinned thank-you.",
                TipCategory::Engagement,
            ),
            QuickTip::new(
                "Diversify beyond ad revenue",
                "Ads swing with the seasons. Affiliates, sponsors and your own \
                 products smooth the curve.",
                TipCategory::Monetization,
            ),
            QuickTip::new(
                "Know your RPM by format",
                "Long-form, Shorts and live streams monetize very differently. \
                 Check which formats actually pay before doubling down.",
                TipCategory::Monetization,
            ),
        ];

        Self { tips }
    }

    /// All tips in display order.
    pub fn all(&self) -> &[QuickTip] {
        &self.tips
    }

    /// Tips in one category, preserving display order.
    pub fn by_category(&self, category: TipCategory) -> Vec<&QuickTip> {
        self.tips
            .iter()
            .filter(|t| t.category == category)
            .collect()
    }

    /// The tip featured on a given day. Deterministic rotation so every
    /// visitor sees the same tip on the same date.
    pub fn tip_for_day(&self, date: NaiveDate) -> &QuickTip {
        let index = date.num_days_from_ce().rem_euclid(self.tips.len() as i32);
        &self.tips[index as usize]
    }
}
