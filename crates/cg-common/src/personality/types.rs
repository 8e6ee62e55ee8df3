use std::cmp::Ordering;

use super::{
    dimensions::Axis,
    scoring::{DimensionScores, PersonalityConfig},
};

/// Axis pairs (E/I+S/N, S/N+T/F) flipped together when single-axis alternates
/// are not enough. No other pair is ever flipped jointly.
const FALLBACK_PAIRS: [(usize, usize); 2] = [(0, 1), (1, 2)];

type Letters = [char; 4];

fn pole_letter(axis: Axis, positive: bool) -> char {
    let (first, second) = axis.poles();
    if positive {
        first.letter()
    } else {
        second.letter()
    }
}

fn primary_letters(scores: &DimensionScores) -> Letters {
    let mut letters = ['E', 'S', 'T', 'J'];
    for (i, axis) in Axis::ALL.iter().enumerate() {
        letters[i] = pole_letter(*axis, scores.score(*axis) >= 0.0);
    }
    letters
}

fn flip(letters: Letters, index: usize) -> Letters {
    let axis = Axis::ALL[index];
    let (first, _) = axis.poles();
    let mut flipped = letters;
    flipped[index] = pole_letter(axis, letters[index] != first.letter());
    flipped
}

fn push_unique(codes: &mut Vec<String>, letters: Letters) {
    let code: String = letters.iter().collect();
    if !codes.contains(&code) {
        codes.push(code);
    }
}

pub(crate) fn derive_types_with_config(
    scores: &DimensionScores,
    config: &PersonalityConfig,
) -> Vec<String> {
    let primary = primary_letters(scores);
    let mut codes = Vec::new();
    push_unique(&mut codes, primary);

    // balanced axes: both poles with the other three held fixed
    for (i, axis) in Axis::ALL.iter().enumerate() {
        if scores.score(*axis).abs() <= config.type_margin {
            let mut positive = primary;
            positive[i] = pole_letter(*axis, true);
            let mut negative = primary;
            negative[i] = pole_letter(*axis, false);
            push_unique(&mut codes, positive);
            push_unique(&mut codes, negative);
        }
    }

    if codes.len() < config.max_types {
        // most balanced pair first; ties keep the E/I+S/N, S/N+T/F order
        let imbalance = |(a, b): (usize, usize)| {
            scores.score(Axis::ALL[a]).abs() + scores.score(Axis::ALL[b]).abs()
        };
        let mut pairs = FALLBACK_PAIRS;
        pairs.sort_by(|left, right| {
            imbalance(*left)
                .partial_cmp(&imbalance(*right))
                .unwrap_or(Ordering::Equal)
        });

        for (a, b) in pairs {
            push_unique(&mut codes, flip(flip(primary, a), b));
        }
    }

    codes.truncate(config.max_types);
    codes
}

/// Primary four-letter type first, followed by plausible alternates (at most
/// three codes in total with the default configuration).
pub fn derive_personality_types(scores: &DimensionScores) -> Vec<String> {
    derive_types_with_config(scores, &PersonalityConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(ei: f64, sn: f64, tf: f64, jp: f64) -> DimensionScores {
        DimensionScores {
            e_i_score: ei,
            s_n_score: sn,
            t_f_score: tf,
            j_p_score: jp,
            ..DimensionScores::default()
        }
    }

    #[test]
    fn primary_follows_score_signs() {
        let types = derive_personality_types(&scores(5.0, -5.0, 5.0, -5.0));
        assert_eq!(types[0], "ENTP");
    }

    #[test]
    fn clear_scores_fall_back_to_joint_flips() {
        let types = derive_personality_types(&scores(5.0, -5.0, 5.0, -5.0));
        // equally balanced pairs: E/I+S/N = ISTP, then S/N+T/F = ESFP
        assert_eq!(types, vec!["ENTP", "ISTP", "ESFP"]);
    }

    #[test]
    fn joint_flips_stay_within_the_fixed_pairs() {
        // T/F and J/P are the most balanced axes, but that pair is never flipped
        let types = derive_personality_types(&scores(9.0, -8.0, 5.0, 4.0));
        assert_eq!(types, vec!["ENTJ", "ESFJ", "ISTJ"]);
        assert!(!types.contains(&"ENFP".to_string()));
    }

    #[test]
    fn more_balanced_fixed_pair_comes_first() {
        // S/N+T/F (8.5) beats E/I+S/N (14)
        let types = derive_personality_types(&scores(-8.0, 6.0, 2.5, 9.0));
        assert_eq!(types, vec!["ISTJ", "ISFJ", "INFJ"]);
    }

    #[test]
    fn zero_scores_resolve_to_positive_poles() {
        let types = derive_personality_types(&DimensionScores::default());
        assert_eq!(types, vec!["ESTJ", "ISTJ", "ENTJ"]);
    }

    #[test]
    fn balanced_axis_produces_single_flip_alternate() {
        let types = derive_personality_types(&scores(-8.0, 6.0, 2.5, 9.0));
        assert_eq!(types[0], "ISTJ");
        assert_eq!(types[1], "ISFJ");
        assert_eq!(types.len(), 3);
    }

    #[test]
    fn margin_is_inclusive() {
        let types = derive_personality_types(&scores(3.0, 10.0, 10.0, 10.0));
        assert_eq!(types[0], "ESTJ");
        assert_eq!(types[1], "ISTJ");
    }

    #[test]
    fn respects_max_types() {
        let config = PersonalityConfig {
            max_types: 1,
            ..PersonalityConfig::default()
        };
        let types = derive_types_with_config(&DimensionScores::default(), &config);
        assert_eq!(types, vec!["ESTJ"]);
    }
}
