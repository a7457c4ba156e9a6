//! Uniform `[0, 1)` draw sources used by placement.

/// Produces uniform draws in `[0, 1)`.
///
/// Placement is cosmetic and never replayed, so production code uses the
/// unseeded thread RNG. Tests inject closures for exact expectations.
pub trait UnitSource: Send {
    fn next_unit(&mut self) -> f64;
}

/// Unseeded draws from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl UnitSource for ThreadRandom {
    fn next_unit(&mut self) -> f64 {
        rand::random::<f64>()
    }
}

impl<F> UnitSource for F
where
    F: FnMut() -> f64 + Send,
{
    fn next_unit(&mut self) -> f64 {
        self()
    }
}

/// Draws one value and forces it into `[0, 1)`; NaN maps to `0`.
pub(crate) fn draw_unit(source: &mut dyn UnitSource) -> f64 {
    let value = source.next_unit();
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0 - f64::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::{draw_unit, ThreadRandom, UnitSource};

    #[test]
    fn thread_random_stays_in_unit_interval() {
        let mut source = ThreadRandom;
        for _ in 0..1_000 {
            let value = source.next_unit();
            assert!((0.0..1.0).contains(&value), "out of range: {value}");
        }
    }

    #[test]
    fn draw_unit_clamps_misbehaving_sources() {
        let mut values = vec![f64::NAN, -3.0, 1.0, 0.25].into_iter();
        let mut source = move || values.next().unwrap_or(0.0);
        assert_eq!(draw_unit(&mut source), 0.0);
        assert_eq!(draw_unit(&mut source), 0.0);
        assert!(draw_unit(&mut source) < 1.0);
        assert_eq!(draw_unit(&mut source), 0.25);
    }
}
