use serde::{Deserialize, Serialize};

use crate::model::Compartments;

/// One reported point of the trajectory. Values are full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub time: f64,
    pub susceptible: f64,
    pub infected: f64,
    pub recovered: f64,
}

impl SamplePoint {
    pub fn new(time: f64, state: &Compartments) -> SamplePoint {
        SamplePoint {
            time,
            susceptible: state.susceptible(),
            infected: state.infected(),
            recovered: state.recovered(),
        }
    }

    pub fn total(&self) -> f64 {
        self.susceptible + self.infected + self.recovered
    }
}

/// Counters collected while integrating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegrationStats {
    /// RK4 steps taken.
    pub steps: usize,
    /// Steps after which the state had to be clamped back into `[0, 1]`.
    pub clamped_steps: usize,
}

/// The reported trajectory of one solve, ordered by time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solution {
    points: Vec<SamplePoint>,
    stats: IntegrationStats,
}

impl Solution {
    pub(crate) fn with_capacity(capacity: usize) -> Solution {
        Solution {
            points: Vec::with_capacity(capacity),
            stats: IntegrationStats::default(),
        }
    }

    pub(crate) fn push(&mut self, point: SamplePoint) {
        self.points.push(point);
    }

    pub(crate) fn stats_mut(&mut self) -> &mut IntegrationStats {
        &mut self.stats
    }

    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<SamplePoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&SamplePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&SamplePoint> {
        self.points.last()
    }

    /// The sample at the end of the horizon.
    pub fn final_point(&self) -> Option<&SamplePoint> {
        self.last()
    }

    pub fn stats(&self) -> &IntegrationStats {
        &self.stats
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SamplePoint> {
        self.points.iter()
    }

    /// The sample with the largest infected fraction; the earliest wins ties.
    pub fn peak_infected(&self) -> Option<&SamplePoint> {
        self.points.iter().fold(None, |best, p| match best {
            Some(b) if b.infected >= p.infected => Some(b),
            _ => Some(p),
        })
    }
}

impl<'a> IntoIterator for &'a Solution {
    type Item = &'a SamplePoint;
    type IntoIter = std::slice::Iter<'a, SamplePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl IntoIterator for Solution {
    type Item = SamplePoint;
    type IntoIter = std::vec::IntoIter<SamplePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(time: f64, infected: f64) -> SamplePoint {
        SamplePoint {
            time,
            susceptible: 1. - infected,
            infected,
            recovered: 0.,
        }
    }

    fn solution(points: &[SamplePoint]) -> Solution {
        let mut solution = Solution::with_capacity(points.len());
        for p in points {
            solution.push(*p);
        }
        solution
    }

    #[test]
    fn test_peak_infected() {
        let s = solution(&[point(0., 0.1), point(1., 0.3), point(2., 0.2)]);
        assert_eq!(s.peak_infected().unwrap().time, 1.);
    }

    #[test]
    fn test_peak_infected_tie_takes_earliest() {
        let s = solution(&[point(0., 0.1), point(1., 0.3), point(2., 0.3)]);
        assert_eq!(s.peak_infected().unwrap().time, 1.);
    }

    #[test]
    fn test_empty_solution() {
        let s = Solution::default();
        assert!(s.is_empty());
        assert!(s.peak_infected().is_none());
        assert!(s.final_point().is_none());
    }

    #[test]
    fn test_iteration_order() {
        let s = solution(&[point(0., 0.1), point(1., 0.2)]);
        let times: Vec<f64> = (&s).into_iter().map(|p| p.time).collect();
        assert_eq!(times, vec![0., 1.]);
        assert_eq!(s.len(), 2);
        assert_eq!(s.into_points().len(), 2);
    }
}
