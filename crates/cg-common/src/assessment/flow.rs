use std::collections::BTreeSet;

use tracing::debug;

use super::question::{AssessmentQuestion, PathwayTier, ProfileType};

fn tier_questions<'a, F>(
    questions: &'a [AssessmentQuestion],
    tier: PathwayTier,
    keep: F,
) -> Vec<&'a AssessmentQuestion>
where
    F: Fn(&AssessmentQuestion) -> bool,
{
    let mut selected: Vec<&AssessmentQuestion> = questions
        .iter()
        .filter(|q| q.effective_tier() == tier && keep(*q))
        .collect();
    selected.sort_by_key(|q| q.order);
    selected
}

fn intersects(left: &BTreeSet<String>, right: &BTreeSet<String>) -> bool {
    left.iter().any(|id| right.contains(id))
}

/// Questions the user should currently see, grouped by tier and ordered by
/// `order` within each tier.
///
/// Profile detection questions are always shown. Everything past them waits
/// for a detected profile; subject cluster questions additionally need a
/// selected pathway they relate to, and refinement questions need at least one
/// selected cluster (restricted to related clusters when the question names any).
pub fn select_visible_questions<'a>(
    questions: &'a [AssessmentQuestion],
    detected_profile: Option<&ProfileType>,
    selected_pathway_ids: &BTreeSet<String>,
    selected_cluster_ids: &BTreeSet<String>,
) -> Vec<&'a AssessmentQuestion> {
    let mut visible = tier_questions(questions, PathwayTier::ProfileDetection, |_| true);

    let Some(profile) = detected_profile else {
        debug!(visible = visible.len(), "no profile detected yet");
        return visible;
    };

    visible.extend(tier_questions(questions, PathwayTier::CareerChoice, |q| {
        q.applies_to_profile(profile)
    }));

    if !selected_pathway_ids.is_empty() {
        visible.extend(tier_questions(questions, PathwayTier::SubjectCluster, |q| {
            q.applies_to_profile(profile)
                && intersects(&q.related_pathway_ids, selected_pathway_ids)
        }));
    }

    if !selected_cluster_ids.is_empty() {
        visible.extend(tier_questions(questions, PathwayTier::Refinement, |q| {
            q.applies_to_profile(profile)
                && (q.related_cluster_ids.is_empty()
                    || intersects(&q.related_cluster_ids, selected_cluster_ids))
        }));
    }

    visible.extend(tier_questions(questions, PathwayTier::Practical, |q| {
        q.applies_to_profile(profile)
    }));

    debug!(
        profile = %profile,
        pathways = selected_pathway_ids.len(),
        clusters = selected_cluster_ids.len(),
        visible = visible.len(),
        "selected visible questions"
    );
    visible
}
