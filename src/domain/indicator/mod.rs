//! Technical indicator series and window predicates.

pub mod sma;
pub mod trend;

use super::error::IntrasimError;

/// A derived numeric sequence, one value per tick index of the series it was
/// computed from. Produced fresh per simulation run and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub duration: usize,
    pub values: Vec<f64>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn at(&self, index: usize) -> Result<f64, IntrasimError> {
        self.values
            .get(index)
            .copied()
            .ok_or(IntrasimError::OutOfRange {
                index: index as isize,
                len: self.values.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_bounds_checked() {
        let series = IndicatorSeries {
            duration: 2,
            values: vec![1.0, 2.0],
        };
        assert_eq!(series.at(1).unwrap(), 2.0);
        assert!(matches!(
            series.at(2).unwrap_err(),
            IntrasimError::OutOfRange { index: 2, len: 2 }
        ));
    }
}
