//! Benchmark support utilities for pool ranking.
//!
//! Provides deterministic candidate pools so benchmark runs are comparable.

use kindred_core::{
    Answer, DiscretionLevel, Identity, Intent, Location, PartyProfile, Structure, SurveyAnswers,
    survey::questions,
};
use kindred_scorer::Candidate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

const IDENTITIES: [Identity; 4] = [
    Identity::Single,
    Identity::Couple,
    Identity::Woman,
    Identity::Man,
];

const SCALE_QUESTIONS: [&str; 7] = [
    questions::GOALS_READINESS,
    questions::BOUNDARIES_EXCLUSIVITY,
    questions::BOUNDARIES_DISCRETION,
    questions::BOUNDARIES_PACE,
    questions::OPENNESS_EXPLORATION,
    questions::OPENNESS_VARIETY,
    questions::CHEMISTRY_FREQUENCY,
];

const CURIOSITIES: [&str; 5] = ["travel", "dancing", "parties", "clubs", "retreats"];
const ROLES: [&str; 3] = ["dominant", "submissive", "switch"];

/// Latitude and longitude of the area candidates are scattered across.
const AREA_CENTRE: (f64, f64) = (52.52, 13.405);

#[expect(clippy::indexing_slicing, reason = "index is drawn from 0..len")]
fn pick<T: Copy>(rng: &mut ChaCha8Rng, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

/// Generate one complete profile with randomised answers.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "locations are jittered around the area centre"
)]
pub fn random_profile(rng: &mut ChaCha8Rng) -> PartyProfile {
    let mut answers = SurveyAnswers::new()
        .with_answer(questions::GOALS_TIMELINE, Answer::single("months"))
        .with_answer(
            questions::OPENNESS_CURIOSITIES,
            Answer::multi(CURIOSITIES.iter().copied().filter(|_| rng.gen_bool(0.5))),
        )
        .with_answer(questions::CHEMISTRY_ROLE, Answer::single(pick(rng, &ROLES)));
    for question in SCALE_QUESTIONS {
        if rng.gen_bool(0.9) {
            answers.insert(question, Answer::scale(rng.gen_range(1..=10)));
        }
    }

    let seeking: Vec<Identity> = IDENTITIES
        .iter()
        .copied()
        .filter(|_| rng.gen_bool(0.6))
        .collect();
    let (lat, lon) = AREA_CENTRE;
    PartyProfile::new(
        pick(rng, &IDENTITIES),
        seeking,
        pick(rng, &Structure::ALL),
    )
    .with_intent([Intent::Dating, pick(rng, &[Intent::Play, Intent::Social])])
    .with_discretion(pick(
        rng,
        &[
            DiscretionLevel::Low,
            DiscretionLevel::Medium,
            DiscretionLevel::High,
        ],
    ))
    .with_location(Location::Coordinates {
        latitude: lat + rng.gen_range(-0.5..0.5),
        longitude: lon + rng.gen_range(-0.5..0.5),
    })
    .with_answers(answers)
}

/// Generate a seeker and a pool of `size` candidates.
#[must_use]
pub fn generate_pool(size: usize, seed: u64) -> (PartyProfile, Vec<Candidate>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let seeker = PartyProfile::new(
        Identity::Single,
        [Identity::Couple, Identity::Woman, Identity::Single],
        Structure::Enm,
    )
    .with_answers(random_profile(&mut rng).answers);
    let pool = (0..size)
        .map(|index| Candidate::new(format!("candidate-{index:05}"), random_profile(&mut rng)))
        .collect();
    (seeker, pool)
}
