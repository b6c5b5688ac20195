use super::types::{GameStats, ScoreBreakdown};
use crate::config::ScoringConfig;

#[inline(always)]
fn display(value: f64) -> u64 {
    // `as` saturates: NaN and negatives land on 0
    value.round() as u64
}

/// Scores a statistics snapshot.
///
/// Pure: the same `(stats, config)` always yields the same breakdown. The
/// subtotal is computed from unrounded components and clamped at zero before
/// the difficulty multiplier is applied; only the reported fields are rounded.
pub fn calculate_score(stats: &GameStats, config: &ScoringConfig) -> ScoreBreakdown {
    let correct = stats.correct_answers as f64;
    let accuracy = stats.accuracy();

    let base_score = config.base_score * correct;

    let average_time = stats.sanitized_elapsed() / stats.total_questions.max(1) as f64;
    let time_bonus = (config.time_bonus_cap - average_time).max(0.0);

    let accuracy_bonus = accuracy * config.accuracy_bonus_unit * correct;

    let hints_penalty = stats.hints_used as f64 * config.hint_penalty;
    let mistakes_penalty = stats.mistakes as f64 * config.mistake_penalty;

    let is_perfect_game = stats.is_perfect_game();
    let perfect_bonus = if is_perfect_game {
        config.perfect_game_bonus
    } else {
        0.0
    };

    let subtotal = (base_score + time_bonus + accuracy_bonus + perfect_bonus
        - hints_penalty
        - mistakes_penalty)
        .max(0.0);

    let difficulty_multiplier = config.difficulty_multiplier.get(stats.difficulty);
    let total_score = display(subtotal * difficulty_multiplier);

    ScoreBreakdown {
        accuracy,
        base_score: display(base_score),
        time_bonus: display(time_bonus),
        accuracy_bonus: display(accuracy_bonus),
        perfect_bonus: display(perfect_bonus),
        hints_penalty: display(hints_penalty),
        mistakes_penalty: display(mistakes_penalty),
        subtotal: display(subtotal),
        difficulty_multiplier,
        total_score,
        is_perfect_game,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Difficulty;

    fn stats(correct: u32, total: u32, mistakes: u32, hints: u32, time: f64) -> GameStats {
        GameStats::builder()
            .correct_answers(correct)
            .total_questions(total)
            .mistakes(mistakes)
            .hints_used(hints)
            .time_elapsed_seconds(time)
            .difficulty(Difficulty::Medium)
            .build()
    }

    #[test]
    fn perfect_run_collects_every_bonus() {
        let b = calculate_score(&stats(10, 10, 0, 0, 30.0), &ScoringConfig::default());
        assert_eq!(b.accuracy, 1.0);
        assert_eq!(b.base_score, 1000);
        assert_eq!(b.time_bonus, 47);
        assert_eq!(b.accuracy_bonus, 250);
        assert_eq!(b.perfect_bonus, 200);
        assert_eq!(b.subtotal, 1497);
        assert_eq!(b.total_score, 1497);
        assert!(b.is_perfect_game);
    }

    #[test]
    fn penalties_clamp_the_subtotal_at_zero() {
        let b = calculate_score(&stats(0, 10, 10, 3, 600.0), &ScoringConfig::default());
        assert_eq!(b.base_score, 0);
        assert_eq!(b.time_bonus, 0);
        assert_eq!(b.accuracy_bonus, 0);
        assert_eq!(b.perfect_bonus, 0);
        assert_eq!(b.hints_penalty, 30);
        assert_eq!(b.mistakes_penalty, 150);
        assert_eq!(b.subtotal, 0);
        assert_eq!(b.total_score, 0);
    }

    #[test]
    fn empty_game_degrades_gracefully() {
        let b = calculate_score(&stats(0, 0, 0, 0, 0.0), &ScoringConfig::default());
        assert_eq!(b.accuracy, 0.0);
        assert!(!b.is_perfect_game);
        // No questions: the average time is 0, so the whole cap is granted.
        assert_eq!(b.time_bonus, 50);
        assert_eq!(b.total_score, 50);
    }

    #[test]
    fn non_finite_time_is_treated_as_zero() {
        let config = ScoringConfig::default();
        let nan = calculate_score(&stats(2, 2, 0, 0, f64::NAN), &config);
        let zero = calculate_score(&stats(2, 2, 0, 0, 0.0), &config);
        assert_eq!(nan, zero);
    }

    #[test]
    fn unrounded_components_feed_the_subtotal() {
        // avg time 1/3 s -> time bonus 49.67, subtotal 4.67
        let b = calculate_score(&stats(0, 3, 3, 0, 1.0), &ScoringConfig::default());
        assert_eq!(b.time_bonus, 50);
        assert_eq!(b.mistakes_penalty, 45);
        assert_eq!(b.subtotal, 5);
        assert_eq!(b.total_score, 5);
    }
}
