use super::enums::CounterDelta;

/// Apply a counter change.
///
/// Decrement floors at zero. Negative "warning" values only ever come from a
/// direct annotation, never from decrementing.
pub fn apply_delta(count: i64, delta: CounterDelta) -> i64 {
    match delta {
        CounterDelta::Increment => count.saturating_add(1),
        CounterDelta::Decrement => count.saturating_sub(1).max(0),
        CounterDelta::Reset => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment() {
        assert_eq!(apply_delta(7, CounterDelta::Increment), 8);
        assert_eq!(apply_delta(-3, CounterDelta::Increment), -2);
    }

    #[test]
    fn test_decrement_floors_at_zero() {
        assert_eq!(apply_delta(2, CounterDelta::Decrement), 1);
        assert_eq!(apply_delta(1, CounterDelta::Decrement), 0);
        assert_eq!(apply_delta(0, CounterDelta::Decrement), 0);
    }

    #[test]
    fn test_decrement_from_negative_lands_on_zero() {
        assert_eq!(apply_delta(-4, CounterDelta::Decrement), 0);
        assert_eq!(apply_delta(i64::MIN, CounterDelta::Decrement), 0);
    }

    #[test]
    fn test_reset() {
        assert_eq!(apply_delta(42, CounterDelta::Reset), 0);
        assert_eq!(apply_delta(-1, CounterDelta::Reset), 0);
    }
}
