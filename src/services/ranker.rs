//! Candidate scoring against the preference model.
//!
//! Stateless: every function takes the model it scores against.

use crate::domain::models::{Decision, PreferenceModel, SuggestedAction};

/// Minimum distance from the running average before an action is suggested
pub const DEFAULT_SUGGESTION_THRESHOLD: f64 = 0.01;

/// Mean model score of the tags the model knows about.
///
/// `None` when no tag is in the model, which is distinct from a
/// predicted score of zero.
pub fn predict<S: AsRef<str>>(tags: &[S], model: &PreferenceModel) -> Option<f64> {
    let (sum, count) = tags
        .iter()
        .filter_map(|tag| model.get(tag.as_ref()))
        .fold((0.0_f64, 0_u32), |(sum, count), score| (sum + score, count + 1));

    (count > 0).then(|| sum / f64::from(count))
}

/// Compare a prediction to the running average.
pub fn suggest_action(
    predicted: Option<f64>,
    running_average: f64,
    threshold: f64,
) -> SuggestedAction {
    let Some(predicted) = predicted else {
        return SuggestedAction::None;
    };

    let difference = predicted - running_average;
    if difference > threshold {
        SuggestedAction::Favor
    } else if difference < -threshold {
        SuggestedAction::Disfavor
    } else {
        SuggestedAction::None
    }
}

/// Mean prediction over past decisions that have one; `0.0` if none do.
pub fn running_average(decisions: &[Decision], model: &PreferenceModel) -> f64 {
    let (sum, count) = decisions
        .iter()
        .filter_map(|decision| predict(&decision.tags, model))
        .fold((0.0_f64, 0_u32), |(sum, count), p| (sum + p, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Judgment;

    fn model() -> PreferenceModel {
        vec![
            ("wolf".to_string(), 1.0),
            ("snow".to_string(), 0.5),
            ("meh".to_string(), 0.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_predict_averages_known_tags() {
        let p = predict(&["wolf", "snow", "unknown"], &model()).unwrap();
        assert!((p - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_predict_without_known_tags_is_none() {
        assert_eq!(predict(&["unknown"], &model()), None);
        assert_eq!(predict::<&str>(&[], &model()), None);
        assert_eq!(predict(&["wolf"], &PreferenceModel::new()), None);
    }

    #[test]
    fn test_predict_zero_is_not_none() {
        assert_eq!(predict(&["meh"], &model()), Some(0.0));
    }

    #[test]
    fn test_suggest_action() {
        let t = DEFAULT_SUGGESTION_THRESHOLD;
        assert_eq!(suggest_action(None, 0.5, t), SuggestedAction::None);
        assert_eq!(suggest_action(Some(0.6), 0.5, t), SuggestedAction::Favor);
        assert_eq!(suggest_action(Some(0.4), 0.5, t), SuggestedAction::Disfavor);
        assert_eq!(suggest_action(Some(0.505), 0.5, t), SuggestedAction::None);
        assert_eq!(suggest_action(Some(0.495), 0.5, t), SuggestedAction::None);
    }

    #[test]
    fn test_running_average_skips_unpredictable_decisions() {
        let decisions = vec![
            Decision::new(1, Judgment::Accept, vec!["wolf".into()]),
            Decision::new(2, Judgment::Reject, vec!["snow".into()]),
            Decision::new(3, Judgment::Reject, vec!["nothing".into(), "known".into()]),
        ];

        let avg = running_average(&decisions, &model());
        assert!((avg - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_running_average_without_predictions() {
        let decisions = vec![Decision::new(1, Judgment::Accept, vec!["x".into()])];
        assert!(running_average(&decisions, &model()).abs() < f64::EPSILON);
        assert!(running_average(&[], &model()).abs() < f64::EPSILON);
    }
}
