use std::collections::BTreeSet;

use crate::models::Problem;

/// Canonicalize a skill so spelling variants compare equal
///
/// Lower-cases and strips whitespace, hyphens and underscores:
/// "Block Chain", "block-chain" and "blockchain" all become "blockchain".
pub fn normalize_skill(skill: &str) -> String {
    skill
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Two normalized skills match when either contains the other
///
/// Empty strings never match; an empty entry would otherwise be a
/// substring of every skill.
#[inline]
pub fn skills_match(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}

/// Unique lowercase words longer than three characters drawn from a
/// problem's title, description and required skills
pub fn problem_keywords(problem: &Problem) -> BTreeSet<String> {
    let skills = problem.required_skills.join(" ");

    [problem.title.as_str(), problem.description.as_str(), skills.as_str()]
        .iter()
        .flat_map(|text| text.split_whitespace())
        .map(str::to_lowercase)
        .filter(|word| word.chars().count() > 3)
        .collect()
}
