use serde::{Deserialize, Serialize};

/// Overlap between a student's skills and a problem's required skills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMatchReport {
    pub match_percentage: u8,
    pub feedback: String,
    pub matching_skills: Vec<String>,
}

/// Compare skills by case-insensitive equality
///
/// Unlike the recommender this does no normalization beyond case: it answers
/// "which of the listed skills do I already have" for a single problem.
pub fn match_skills(student_skills: &[String], problem_skills: &[String]) -> SkillMatchReport {
    let wanted: Vec<String> = problem_skills.iter().map(|s| s.to_lowercase()).collect();

    let matching_skills: Vec<String> = student_skills
        .iter()
        .filter(|skill| wanted.contains(&skill.to_lowercase()))
        .cloned()
        .collect();

    let match_percentage = if problem_skills.is_empty() {
        0
    } else {
        let pct = matching_skills.len() as f64 / problem_skills.len() as f64 * 100.0;
        pct.round().min(100.0) as u8
    };

    SkillMatchReport {
        match_percentage,
        feedback: feedback_for(match_percentage).to_string(),
        matching_skills,
    }
}

fn feedback_for(percentage: u8) -> &'static str {
    match percentage {
        p if p > 75 => "Excellent match! You have most required skills.",
        p if p > 50 => "Good match. You have the core skills.",
        p if p > 25 => "Partial match. You might need to upskill.",
        _ => "Low match.",
    }
}
