// Criterion benchmarks for the Campus Connect recommender

use campus_connect::core::{match_skills, normalize_skill, NoopObserver, Recommender};
use campus_connect::models::{Problem, ProblemStatus, StudentProfile};
use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use uuid::Uuid;

const SKILL_POOL: [&str; 8] = [
    "React", "Node.js", "Python", "Machine Learning", "Go", "Block Chain", "SQL", "Cloud",
];

fn create_problem(id: usize) -> Problem {
    let skills = (0..1 + id % 4)
        .map(|k| SKILL_POOL[(id + k * 3) % SKILL_POOL.len()].to_string())
        .collect();

    Problem {
        id: Uuid::new_v4(),
        title: format!("Problem {} for campus startups", id),
        description: "Build a prototype that small businesses can use on their phones".to_string(),
        domain: "Technology".to_string(),
        required_skills: skills,
        entrepreneur: Uuid::new_v4(),
        status: if id % 7 == 0 { ProblemStatus::Closed } else { ProblemStatus::Open },
        created_at: Some(Utc::now() - Duration::days((id % 45) as i64)),
    }
}

fn create_student() -> StudentProfile {
    StudentProfile::new(
        vec!["React".to_string(), "node-js".to_string(), "Python".to_string(), "SQL".to_string()],
        "Full stack developer building prototypes for small businesses",
    )
}

fn bench_normalize_skill(c: &mut Criterion) {
    c.bench_function("normalize_skill", |b| {
        b.iter(|| normalize_skill(black_box("Machine_Learning - Ops")));
    });
}

fn bench_match_skills(c: &mut Criterion) {
    let student: Vec<String> = SKILL_POOL[..4].iter().map(|s| s.to_string()).collect();
    let problem: Vec<String> = SKILL_POOL[2..].iter().map(|s| s.to_string()).collect();

    c.bench_function("match_skills", |b| {
        b.iter(|| match_skills(black_box(&student), black_box(&problem)));
    });
}

fn bench_recommend(c: &mut Criterion) {
    // Keep per-problem trace events out of the measurement
    let recommender = Recommender::with_default_settings().with_observer(Arc::new(NoopObserver));
    let student = create_student();
    let now = Utc::now();

    let mut group = c.benchmark_group("recommend");

    for problem_count in [10, 50, 100, 500, 1000].iter() {
        let catalog: Vec<Problem> = (0..*problem_count).map(create_problem).collect();

        group.bench_with_input(
            BenchmarkId::new("recommend_at", problem_count),
            problem_count,
            |b, _| {
                b.iter(|| recommender.recommend_at(black_box(&student), black_box(&catalog), now));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_normalize_skill, bench_match_skills, bench_recommend);

criterion_main!(benches);
