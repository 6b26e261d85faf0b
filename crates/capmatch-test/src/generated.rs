//! Seeded random problems.
//!
//! Ownership of each (topic, program) pair is drawn for at most one
//! supervisor, so generated problems never contain ambiguous routing.
//!
//! # Example
//!
//! ```
//! use capmatch_test::generated::{generate, GeneratorSpec};
//!
//! let spec = GeneratorSpec { students: 40, topics: 12, supervisors: 6, coverage: 0.5 };
//! let a = generate(7, &spec);
//! let b = generate(7, &spec);
//! assert_eq!(a.student_count(), 40);
//! assert_eq!(
//!     a.students().map(|s| s.preferences().clone()).collect::<Vec<_>>(),
//!     b.students().map(|s| s.preferences().clone()).collect::<Vec<_>>(),
//! );
//! ```

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use capmatch_core::{
    ExpertiseLevel, Problem, Program, Student, Supervisor, Topic, TopicId, MAX_CAPACITY,
    PREFERENCE_COUNT,
};

const PREFIXES: [&str; 5] = ["BDBA", "BCSAI", "BBA_BDBA", "BBA", "MBA"];
const AREAS: [&str; 4] = ["Data Science", "Machine Learning", "Finance", "Marketing"];

/// Size and density of a generated problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorSpec {
    pub students: usize,
    /// Number of topics; raised to 5 if smaller.
    pub topics: usize,
    pub supervisors: usize,
    /// Probability that a (topic, program) pair has an owner.
    pub coverage: f64,
}

impl Default for GeneratorSpec {
    fn default() -> Self {
        Self {
            students: 30,
            topics: 10,
            supervisors: 5,
            coverage: 0.6,
        }
    }
}

/// Generates a valid problem from a seed.
pub fn generate(seed: u64, spec: &GeneratorSpec) -> Problem {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let topic_count = spec.topics.max(PREFERENCE_COUNT);

    let topics: Vec<Topic> = (1..=topic_count)
        .map(|i| {
            let area = AREAS.choose(&mut rng).copied().unwrap_or("General");
            Topic::new(format!("T{i:02}"), area)
        })
        .collect();
    let topic_ids: Vec<TopicId> = topics.iter().map(|t| t.id.clone()).collect();

    let students: Vec<Student> = (0..spec.students)
        .filter_map(|i| {
            let prefix = PREFIXES.choose(&mut rng).copied().unwrap_or("Other");
            let picks = rand::seq::index::sample(&mut rng, topic_ids.len(), PREFERENCE_COUNT);
            let preferences: Vec<TopicId> =
                picks.into_iter().map(|j| topic_ids[j].clone()).collect();
            Student::new(format!("{prefix}{i:03}"), preferences).ok()
        })
        .collect();

    let mut expertise: Vec<Vec<(Program, TopicId, ExpertiseLevel)>> =
        vec![Vec::new(); spec.supervisors];
    if spec.supervisors > 0 {
        for topic in &topic_ids {
            for program in Program::ALL {
                if rng.random_bool(spec.coverage.clamp(0.0, 1.0)) {
                    let owner = rng.random_range(0..spec.supervisors);
                    let level = ExpertiseLevel::ALL
                        .choose(&mut rng)
                        .copied()
                        .unwrap_or(ExpertiseLevel::Intermediate);
                    expertise[owner].push((program, topic.clone(), level));
                }
            }
        }
    }

    let supervisors: Vec<Supervisor> = expertise
        .into_iter()
        .enumerate()
        .filter_map(|(i, entries)| {
            let capacity = rng.random_range(1..=MAX_CAPACITY);
            Supervisor::new(format!("SUP{:02}", i + 1), capacity, entries).ok()
        })
        .collect();

    Problem::from_entities(students, topics, supervisors).unwrap_or_default()
}
