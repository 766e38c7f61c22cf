//! Random practice questions, one template per topic.
//!
//! Every template is O(1) arithmetic over a small operand range. Callers that
//! need reproducible output pass their own seeded RNG to [`generate_with`].

use rand::seq::{IndexedRandom, SliceRandom, index};
use rand::{Rng, RngCore};

use crate::model::{Question, QuestionId, Topic};

type Template = fn(&mut dyn RngCore) -> Question;

/// Topic → template dispatch. Topics without an entry use multiplication.
const TEMPLATES: [(Topic, Template); 5] = [
    (Topic::Multiplication, multiplication),
    (Topic::Squares, squares),
    (Topic::Cubes, cubes),
    (Topic::Fractions, fractions),
    (Topic::Powers, powers),
];

/// Generates a question for `topic` using the thread-local RNG.
#[must_use]
pub fn generate(topic: Topic) -> Question {
    generate_with(&mut rand::rng(), topic)
}

/// Generates a question for `topic` from the given RNG.
pub fn generate_with<R: RngCore>(rng: &mut R, topic: Topic) -> Question {
    let template = TEMPLATES
        .iter()
        .find(|(candidate, _)| *candidate == topic)
        .map_or(multiplication as Template, |(_, template)| *template);
    template(rng)
}

/// Generates a question for a topic given by name.
///
/// Names that are not in the catalog fall back to multiplication.
#[must_use]
pub fn generate_for_name(name: &str) -> Question {
    generate(name.parse().unwrap_or_default())
}

fn next_id(rng: &mut dyn RngCore) -> QuestionId {
    QuestionId::from_random_bytes(rng.random())
}

//
// ─── TEMPLATES ─────────────────────────────────────────────────────────────────
//

fn multiplication(rng: &mut dyn RngCore) -> Question {
    let a: i64 = rng.random_range(2..=16);
    let b: i64 = rng.random_range(2..=16);
    let hint = if b % 2 == 0 {
        format!("Try breaking it down: {a} × {b} = {a} × {} × 2", b / 2)
    } else {
        format!("Try breaking it down: {a} × {b} = {a} × {} + {a}", b - 1)
    };
    Question::new(
        next_id(rng),
        format!("{a} × {b}"),
        a * b,
        u32::try_from((a + b) / 4).unwrap_or_default(),
        Topic::Multiplication,
        Some(hint),
    )
}

fn squares(rng: &mut dyn RngCore) -> Question {
    let n: i64 = rng.random_range(1..=25);
    let hint = (n % 5 == 0).then(|| {
        format!(
            "Numbers ending in 5 or 0: {n}² = {} × {} + 25",
            n - 5,
            n + 5
        )
    });
    Question::new(
        next_id(rng),
        format!("{n}²"),
        n * n,
        u32::try_from(n / 5).unwrap_or_default(),
        Topic::Squares,
        hint,
    )
}

fn cubes(rng: &mut dyn RngCore) -> Question {
    let n: i64 = rng.random_range(1..=12);
    Question::new(
        next_id(rng),
        format!("{n}³"),
        n * n * n,
        u32::try_from(n / 3).unwrap_or_default(),
        Topic::Cubes,
        Some(format!("{n}³ = {n} × {n} × {n} = {} × {n}", n * n)),
    )
}

/// A common fraction with its decimal spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FractionRecord {
    pub numerator: i64,
    pub denominator: i64,
    pub decimal: &'static str,
}

impl FractionRecord {
    const fn new(numerator: i64, denominator: i64, decimal: &'static str) -> Self {
        Self {
            numerator,
            denominator,
            decimal,
        }
    }

    /// Percent rounded half up to a whole number.
    #[must_use]
    pub fn percent(&self) -> i64 {
        (200 * self.numerator + self.denominator) / (2 * self.denominator)
    }

    #[must_use]
    pub fn is_exact(&self) -> bool {
        (100 * self.numerator) % self.denominator == 0
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{}", self.numerator, self.denominator)
    }
}

pub const FRACTIONS: [FractionRecord; 13] = [
    FractionRecord::new(1, 2, "0.5"),
    FractionRecord::new(1, 3, "0.33"),
    FractionRecord::new(2, 3, "0.67"),
    FractionRecord::new(1, 4, "0.25"),
    FractionRecord::new(3, 4, "0.75"),
    FractionRecord::new(1, 5, "0.2"),
    FractionRecord::new(2, 5, "0.4"),
    FractionRecord::new(3, 5, "0.6"),
    FractionRecord::new(4, 5, "0.8"),
    FractionRecord::new(1, 8, "0.125"),
    FractionRecord::new(3, 8, "0.375"),
    FractionRecord::new(5, 8, "0.625"),
    FractionRecord::new(7, 8, "0.875"),
];

fn fractions(rng: &mut dyn RngCore) -> Question {
    let record = FRACTIONS.choose(rng).copied().unwrap_or(FRACTIONS[0]);
    let label = record.label();
    let exact = record.is_exact();
    let relation = if exact { "=" } else { "≈" };

    let (prompt, hint) = if rng.random_bool(0.5) {
        let rounding = if exact { "" } else { " (nearest whole)" };
        (
            format!("{label} {relation} ?%{rounding}"),
            format!("Convert to decimal first: {label} = {}", record.decimal),
        )
    } else {
        let scale = if exact {
            "decimal × 100"
        } else {
            "decimal × 100, nearest whole"
        };
        (
            format!("{label} {relation} ? ({scale})"),
            "Divide the numerator by the denominator".to_owned(),
        )
    };

    Question::new(
        next_id(rng),
        prompt,
        record.percent(),
        2,
        Topic::Fractions,
        Some(hint),
    )
}

const POWER_BASES: [i64; 4] = [2, 3, 5, 7];

fn powers(rng: &mut dyn RngCore) -> Question {
    let base = POWER_BASES.choose(rng).copied().unwrap_or(2);
    let exponent: u32 = rng.random_range(2..=5);
    let factors = vec![base.to_string(); exponent as usize].join(" × ");
    Question::new(
        next_id(rng),
        format!("{base}^{exponent}"),
        base.pow(exponent),
        exponent / 2,
        Topic::Powers,
        Some(format!("{base}^{exponent} = {factors}")),
    )
}

//
// ─── MULTIPLE CHOICE ──────────────────────────────────────────────────────────
//

/// Answer options for `question` using the thread-local RNG.
#[must_use]
pub fn generate_distractors(question: &Question, n: usize) -> Vec<i64> {
    generate_distractors_with(&mut rand::rng(), question, n)
}

/// Returns `n` shuffled, distinct options, one of which is the answer.
///
/// Wrong options are drawn without replacement from the positive integers
/// within ±50% of the answer (at least ±10). If that pool is smaller than
/// `n - 1`, every pool value is used.
pub fn generate_distractors_with<R: Rng + ?Sized>(
    rng: &mut R,
    question: &Question,
    n: usize,
) -> Vec<i64> {
    if n == 0 {
        return Vec::new();
    }
    let answer = question.correct_answer();
    let spread = (answer / 2).max(10);
    let lower = (answer - spread).max(1);
    let upper = answer + spread;

    let answer_in_pool = (lower..=upper).contains(&answer);
    let span = usize::try_from(upper - lower + 1).unwrap_or(0);
    let pool_len = span.saturating_sub(usize::from(answer_in_pool));
    let wanted = (n - 1).min(pool_len);

    let mut options: Vec<i64> = index::sample(rng, pool_len, wanted)
        .into_iter()
        .map(|offset| {
            let value = lower + offset as i64;
            if answer_in_pool && value >= answer {
                value + 1
            } else {
                value
            }
        })
        .collect();
    options.push(answer);
    options.shuffle(rng);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    fn operands(prompt: &str, sep: &str) -> (i64, i64) {
        let (a, b) = prompt.split_once(sep).unwrap();
        (a.trim().parse().unwrap(), b.trim().parse().unwrap())
    }

    #[test]
    fn multiplication_answers_are_products() {
        let mut rng = seeded();
        for _ in 0..500 {
            let q = generate_with(&mut rng, Topic::Multiplication);
            let (a, b) = operands(q.prompt_text(), "×");
            assert!((2..=16).contains(&a) && (2..=16).contains(&b));
            assert_eq!(q.correct_answer(), a * b);
            assert_eq!(q.difficulty() as i64, (a + b) / 4);
            assert!(q.hint_text().is_some());
        }
    }

    #[test]
    fn squares_answer_and_hint_rule() {
        let mut rng = seeded();
        for _ in 0..500 {
            let q = generate_with(&mut rng, Topic::Squares);
            let n: i64 = q.prompt_text().trim_end_matches('²').parse().unwrap();
            assert!((1..=25).contains(&n));
            assert_eq!(q.correct_answer(), n * n);
            assert_eq!(q.difficulty() as i64, n / 5);
            assert_eq!(q.hint_text().is_some(), n % 5 == 0);
        }
    }

    #[test]
    fn cubes_answer_is_cube() {
        let mut rng = seeded();
        for _ in 0..300 {
            let q = generate_with(&mut rng, Topic::Cubes);
            let n: i64 = q.prompt_text().trim_end_matches('³').parse().unwrap();
            assert!((1..=12).contains(&n));
            assert_eq!(q.correct_answer(), n * n * n);
            assert_eq!(q.difficulty() as i64, n / 3);
        }
    }

    #[test]
    fn powers_answer_and_repeated_hint() {
        let mut rng = seeded();
        for _ in 0..300 {
            let q = generate_with(&mut rng, Topic::Powers);
            let (base, exponent) = operands(q.prompt_text(), "^");
            assert!(POWER_BASES.contains(&base));
            assert!((2..=5).contains(&exponent));
            assert_eq!(q.correct_answer(), base.pow(exponent as u32));
            assert_eq!(q.difficulty() as i64, exponent / 2);
            let hint = q.hint_text().unwrap();
            assert_eq!(hint.matches('×').count() as i64, exponent - 1);
        }
    }

    #[test]
    fn fractions_answer_is_rounded_percent() {
        let mut rng = seeded();
        let mut saw_percent = false;
        let mut saw_decimal = false;
        for _ in 0..300 {
            let q = generate_with(&mut rng, Topic::Fractions);
            let label = q.prompt_text().split_whitespace().next().unwrap();
            let record = FRACTIONS.iter().find(|r| r.label() == label).unwrap();
            assert_eq!(q.correct_answer(), record.percent());
            assert_eq!(q.difficulty(), 2);
            saw_percent |= q.prompt_text().contains('%');
            saw_decimal |= q.prompt_text().contains("decimal");
        }
        assert!(saw_percent && saw_decimal);
    }

    #[test]
    fn fraction_rounding_matches_table() {
        let percents: Vec<i64> = FRACTIONS.iter().map(FractionRecord::percent).collect();
        assert_eq!(percents, vec![50, 33, 67, 25, 75, 20, 40, 60, 80, 13, 38, 63, 88]);
        assert!(FRACTIONS[0].is_exact());
        assert!(!FRACTIONS[1].is_exact());
    }

    #[test]
    fn untemplated_topics_fall_back_to_multiplication() {
        let mut rng = seeded();
        for topic in [Topic::SquareRoots, Topic::Percentages, Topic::Divisibility] {
            let q = generate_with(&mut rng, topic);
            assert_eq!(q.topic(), Topic::Multiplication);
        }
        assert_eq!(generate_for_name("trigonometry").topic(), Topic::Multiplication);
        assert_eq!(generate_for_name("cubes").topic(), Topic::Cubes);
    }

    #[test]
    fn ids_are_unique_per_generation() {
        let mut rng = seeded();
        let ids: HashSet<_> = (0..200)
            .map(|_| generate_with(&mut rng, Topic::Squares).id())
            .collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn distractors_are_distinct_positive_and_include_answer() {
        let mut rng = seeded();
        for topic in [Topic::Squares, Topic::Cubes, Topic::Powers, Topic::Fractions] {
            for _ in 0..200 {
                let q = generate_with(&mut rng, topic);
                let options = generate_distractors_with(&mut rng, &q, 4);
                assert_eq!(options.len(), 4);
                let unique: HashSet<_> = options.iter().copied().collect();
                assert_eq!(unique.len(), 4);
                assert!(options.iter().all(|v| *v > 0));
                assert!(options.contains(&q.correct_answer()));
                let spread = (q.correct_answer() / 2).max(10);
                assert!(options.iter().all(|v| (v - q.correct_answer()).abs() <= spread));
            }
        }
    }

    #[test]
    fn distractors_for_tiny_answer() {
        let mut rng = seeded();
        let one = Question::new(
            QuestionId::from_random_bytes([0; 16]),
            "1²",
            1,
            0,
            Topic::Squares,
            None,
        );
        let options = generate_distractors_with(&mut rng, &one, 6);
        assert_eq!(options.len(), 6);
        assert!(options.iter().all(|v| (1..=11).contains(v)));
        assert!(generate_distractors_with(&mut rng, &one, 0).is_empty());

        // Pool is 2..=11, so at most 10 wrong options exist.
        let capped = generate_distractors_with(&mut rng, &one, 50);
        assert_eq!(capped.len(), 11);
    }

    #[test]
    fn answer_position_is_uniform() {
        let mut rng = seeded();
        let q = generate_with(&mut rng, Topic::Multiplication);
        let mut positions = [0_u32; 4];
        for _ in 0..4000 {
            let options = generate_distractors_with(&mut rng, &q, 4);
            let at = options
                .iter()
                .position(|v| *v == q.correct_answer())
                .unwrap();
            positions[at] += 1;
        }
        for count in positions {
            assert!((850..=1150).contains(&count), "skewed positions: {positions:?}");
        }
    }
}
