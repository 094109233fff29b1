//! Profile Relevance Scoring
//!
//! Pairwise compatibility between two profiles, used as a ranking key for
//! connection suggestions. The score is an unbounded heuristic:
//!
//! - 10 points per interest of `a` that `b` shares
//! - 5 points when both sun signs are known and equal
//! - 3 points when both primary doshas are known and equal
//!
//! Scores are computed from `a`'s side and are not guaranteed symmetric.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use super::metrics::PerformanceTimer;
use super::models::{Dosha, SunSign, UserProfile};

pub const SHARED_INTEREST_POINTS: u32 = 10;
pub const SUN_SIGN_POINTS: u32 = 5;
pub const DOSHA_POINTS: u32 = 3;

/// Why two profiles matched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    SharedInterests { interests: Vec<String> },
    SameSunSign { sign: SunSign },
    SameDosha { dosha: Dosha },
}

/// A scored connection suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub profile: UserProfile,
    pub score: u32,
    pub reasons: Vec<MatchReason>,
}

/// Interests of `a` also present in `b`, in `a`'s order, without repeats
fn shared_interests(a: &UserProfile, b: &UserProfile) -> Vec<String> {
    let theirs: HashSet<&str> = b.interests.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    a.interests
        .iter()
        .map(String::as_str)
        .filter(|i| theirs.contains(i) && seen.insert(*i))
        .map(str::to_string)
        .collect()
}

fn same_sun_sign(a: &UserProfile, b: &UserProfile) -> Option<SunSign> {
    match (a.astrological_summary.sun_sign, b.astrological_summary.sun_sign) {
        (Some(x), Some(y)) if x == y => Some(x),
        _ => None,
    }
}

fn same_primary_dosha(a: &UserProfile, b: &UserProfile) -> Option<Dosha> {
    match (a.ayurvedic_type.primary_dosha, b.ayurvedic_type.primary_dosha) {
        (Some(x), Some(y)) if x == y => Some(x),
        _ => None,
    }
}

/// Compatibility score of `b` from `a`'s perspective
pub fn score(a: &UserProfile, b: &UserProfile) -> u32 {
    let (total, _) = score_with_reasons(a, b);
    total
}

/// Score plus the matches that produced it
pub fn score_with_reasons(a: &UserProfile, b: &UserProfile) -> (u32, Vec<MatchReason>) {
    let mut total = 0u32;
    let mut reasons = Vec::new();

    let interests = shared_interests(a, b);
    if !interests.is_empty() {
        total += SHARED_INTEREST_POINTS * interests.len() as u32;
        reasons.push(MatchReason::SharedInterests { interests });
    }

    if let Some(sign) = same_sun_sign(a, b) {
        total += SUN_SIGN_POINTS;
        reasons.push(MatchReason::SameSunSign { sign });
    }

    if let Some(dosha) = same_primary_dosha(a, b) {
        total += DOSHA_POINTS;
        reasons.push(MatchReason::SameDosha { dosha });
    }

    (total, reasons)
}

/// Rank `candidates` for `me`, best first.
///
/// Skips `me` itself and anyone in `exclude_ids` (typically users already
/// followed). Equal scores are ordered by user id so results are repeatable.
pub fn suggest_connections(
    me: &UserProfile,
    candidates: &[UserProfile],
    exclude_ids: &HashSet<String>,
    limit: usize,
) -> Vec<Suggestion> {
    let _timer = PerformanceTimer::new("suggest_connections");

    let mut suggestions: Vec<Suggestion> = candidates
        .par_iter()
        .filter(|c| c.user_id != me.user_id && !exclude_ids.contains(&c.user_id))
        .map(|c| {
            let (score, reasons) = score_with_reasons(me, c);
            Suggestion {
                profile: c.clone(),
                score,
                reasons,
            }
        })
        .collect();

    suggestions.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.profile.user_id.cmp(&b.profile.user_id))
    });
    suggestions.truncate(limit);

    debug!(
        "Suggested {} connections for {} from {} candidates",
        suggestions.len(),
        me.user_id,
        candidates.len()
    );

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::social::factories::create_profile;
    use crate::social::models::{AstrologicalSummary, AyurvedicType};

    fn profile(id: &str, interests: &[&str], sun: Option<SunSign>, dosha: Option<Dosha>) -> UserProfile {
        let mut p = create_profile(id, "Seeker");
        p.interests = interests.iter().map(|s| s.to_string()).collect();
        p.astrological_summary = AstrologicalSummary {
            sun_sign: sun,
            ..Default::default()
        };
        p.ayurvedic_type = AyurvedicType {
            primary_dosha: dosha,
            ..Default::default()
        };
        p
    }

    #[test]
    fn test_score_components() {
        let a = profile("a", &["reiki", "yoga", "tarot"], Some(SunSign::Leo), Some(Dosha::Pitta));
        let b = profile("b", &["yoga", "tarot", "crystals"], Some(SunSign::Leo), Some(Dosha::Pitta));
        assert_eq!(score(&a, &b), 2 * 10 + 5 + 3);

        let c = profile("c", &["crystals"], Some(SunSign::Virgo), Some(Dosha::Kapha));
        assert_eq!(score(&a, &c), 0);
    }

    #[test]
    fn test_unknown_attributes_do_not_match() {
        let a = profile("a", &[], None, None);
        let b = profile("b", &[], None, None);
        assert_eq!(score(&a, &b), 0);
    }

    #[test]
    fn test_score_is_from_first_profile_perspective() {
        let a = profile("a", &["yoga", "yoga"], None, None);
        let b = profile("b", &["yoga"], None, None);
        // duplicated interests on a's side count once
        assert_eq!(score(&a, &b), 10);
        assert_eq!(score(&b, &a), 10);
    }

    #[test]
    fn test_reasons_reported() {
        let a = profile("a", &["breathwork"], Some(SunSign::Aries), Some(Dosha::Vata));
        let b = profile("b", &["breathwork"], Some(SunSign::Aries), Some(Dosha::Kapha));
        let (total, reasons) = score_with_reasons(&a, &b);
        assert_eq!(total, 15);
        assert_eq!(
            reasons,
            vec![
                MatchReason::SharedInterests {
                    interests: vec!["breathwork".to_string()]
                },
                MatchReason::SameSunSign { sign: SunSign::Aries },
            ]
        );
    }

    #[test]
    fn test_suggest_connections_orders_and_excludes() {
        let me = profile("me", &["reiki", "yoga"], Some(SunSign::Libra), Some(Dosha::Vata));
        let candidates = vec![
            profile("me", &["reiki", "yoga"], Some(SunSign::Libra), Some(Dosha::Vata)),
            profile("b", &["reiki"], None, None),
            profile("a", &["reiki"], None, None),
            profile("best", &["reiki", "yoga"], Some(SunSign::Libra), None),
            profile("followed", &["reiki", "yoga"], Some(SunSign::Libra), Some(Dosha::Vata)),
            profile("zero", &[], None, None),
        ];
        let exclude: HashSet<String> = ["followed".to_string()].into_iter().collect();

        let suggestions = suggest_connections(&me, &candidates, &exclude, 3);
        let ids: Vec<&str> = suggestions.iter().map(|s| s.profile.user_id.as_str()).collect();
        assert_eq!(ids, vec!["best", "a", "b"]);
        assert_eq!(suggestions[0].score, 25);
    }
}
