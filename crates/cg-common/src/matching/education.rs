use crate::skill_normalizer::normalize_text;

/// Substring → ordinal education level. Checked top to bottom, first hit wins.
const EDUCATION_LEVELS: &[(&str, u8)] = &[
    ("phd", 5),
    ("ph.d", 5),
    ("doctorate", 5),
    ("doctoral", 5),
    ("master", 4),
    ("mba", 4),
    ("graduate degree", 4),
    ("bachelor", 3),
    ("undergraduate", 3),
    ("college degree", 3),
    ("associate", 2),
    ("certificate", 2),
    ("certification", 2),
    ("vocational", 2),
    ("apprenticeship", 2),
    ("diploma", 1),
    ("high school", 1),
    ("ged", 1),
];

const DEFAULT_LEVEL: u8 = 3;
const COMPATIBLE_SCORE: f64 = 0.8;
const NEUTRAL_SCORE: f64 = 0.5;

/// Ordinal level (1〜5) of an education requirement; unknown text maps to 3.
pub fn education_level(requirement: &str) -> u8 {
    let normalized = normalize_text(requirement);
    EDUCATION_LEVELS
        .iter()
        .find(|(needle, _)| normalized.contains(needle))
        .map(|(_, level)| *level)
        .unwrap_or(DEFAULT_LEVEL)
}

#[derive(Debug, Clone, PartialEq)]
pub struct EducationFit {
    pub score: f64,
    pub average_level: Option<f64>,
}

/// Education compatibility: 0.8 when the mean required level sits in [2, 4],
/// 0.5 otherwise. A career without requirements is neutral (0.5), not absent.
pub fn education_fit(required_education: &[String]) -> EducationFit {
    let levels: Vec<u8> = required_education
        .iter()
        .filter(|r| !r.trim().is_empty())
        .map(|r| education_level(r))
        .collect();

    if levels.is_empty() {
        return EducationFit {
            score: NEUTRAL_SCORE,
            average_level: None,
        };
    }

    let average = levels.iter().map(|l| f64::from(*l)).sum::<f64>() / levels.len() as f64;
    let score = if (2.0..=4.0).contains(&average) {
        COMPATIBLE_SCORE
    } else {
        NEUTRAL_SCORE
    };

    EducationFit {
        score,
        average_level: Some(average),
    }
}

pub fn describe_education(fit: &EducationFit) -> Option<String> {
    (fit.score >= COMPATIBLE_SCORE).then(|| "Compatible education requirements".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_requirements_to_levels() {
        assert_eq!(education_level("High School Diploma"), 1);
        assert_eq!(education_level("Associate Degree in Nursing"), 2);
        assert_eq!(education_level("Bachelor's in Computer Science"), 3);
        assert_eq!(education_level("MBA preferred"), 4);
        assert_eq!(education_level("PhD in Chemistry"), 5);
        assert_eq!(education_level("Relevant experience"), 3);
    }

    #[test]
    fn mid_range_average_is_compatible() {
        let fit = education_fit(&["Bachelor's degree".into(), "Master's degree".into()]);
        assert_eq!(fit.score, 0.8);
        assert_eq!(fit.average_level, Some(3.5));
        assert!(describe_education(&fit).is_some());
    }

    #[test]
    fn extremes_and_missing_requirements_are_neutral() {
        assert_eq!(education_fit(&["Doctorate".into()]).score, 0.5);
        assert_eq!(education_fit(&["High school".into()]).score, 0.5);

        let none = education_fit(&[]);
        assert_eq!(none.score, 0.5);
        assert_eq!(none.average_level, None);
        assert!(describe_education(&none).is_none());
    }
}
