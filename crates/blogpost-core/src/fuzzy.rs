// crates/blogpost-core/src/fuzzy.rs - Suggestion filtering
//
// Narrows a candidate list to the entries containing the typed characters in
// order, though not necessarily next to each other ("gsb" matches "gatsby").
// Matching ignores case and candidates keep their original relative order;
// match scores are deliberately not used for ranking.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Candidates matching `input` as an ordered subsequence
///
/// Blank input returns every candidate. Both sides are lowercased with
/// Unicode rules first since the matcher only folds ASCII case, so `zoÉ`
/// still finds `Zoé`.
pub fn filter(input: &str, candidates: &[String]) -> Vec<String> {
    let pattern = input.trim().to_lowercase();
    if pattern.is_empty() {
        return candidates.to_vec();
    }

    let matcher = SkimMatcherV2::default().respect_case();
    candidates
        .iter()
        .filter(|candidate| {
            matcher
                .fuzzy_match(&candidate.to_lowercase(), &pattern)
                .is_some()
        })
        .cloned()
        .collect()
}
