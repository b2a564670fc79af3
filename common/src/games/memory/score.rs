const BASE_SCORE: u32 = 1000;
const ATTEMPT_PENALTY: u32 = 10;
const TIME_PENALTY_INTERVAL_SECS: u32 = 5;
const TIME_PENALTY: u32 = 5;

/// `max(0, 1000 - attempts*10 - floor(elapsed/5)*5)`
pub fn compute_score(attempts: u32, elapsed_seconds: u32) -> u32 {
    let attempt_penalty = attempts.saturating_mul(ATTEMPT_PENALTY);
    let time_penalty = (elapsed_seconds / TIME_PENALTY_INTERVAL_SECS).saturating_mul(TIME_PENALTY);
    BASE_SCORE
        .saturating_sub(attempt_penalty)
        .saturating_sub(time_penalty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_score() {
        assert_eq!(compute_score(0, 0), 1000);
    }

    #[test]
    fn test_time_penalty_is_stepped() {
        assert_eq!(compute_score(8, 4), 920);
        assert_eq!(compute_score(8, 5), 915);
        assert_eq!(compute_score(8, 14), 910);
    }

    #[test]
    fn test_score_floors_at_zero() {
        assert_eq!(compute_score(150, 0), 0);
        assert_eq!(compute_score(50, 10_000), 0);
        assert_eq!(compute_score(u32::MAX, u32::MAX), 0);
    }
}
