/// Similarity weights for ranking careers against a target profile.
/// Skill overlap dominates; keyword hits only nudge the order.
pub const DEFAULT_WEIGHTS: SimilarityWeights = SimilarityWeights {
    skills: 0.40,
    title: 0.25,
    industry: 0.20,
    education: 0.10,
    keywords: 0.05,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityWeights {
    pub skills: f64,
    pub title: f64,
    pub industry: f64,
    pub education: f64,
    pub keywords: f64,
}

impl SimilarityWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.title + self.industry + self.education + self.keywords
    }
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}
