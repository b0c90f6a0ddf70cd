use ndarray::Array1;
use crate::Float;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Represents a single data point with features and a label.
///
/// L: The type of the label (e.g., usize, String, enum).
/// F: The float type for the features (e.g., f32, f64).
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint<L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    pub features: Array1<F>,
    pub label: L,
}

impl<L, F> DataPoint<L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    pub fn new(features: Array1<F>, label: L) -> Self {
        DataPoint { features, label }
    }

    /// Returns the `(x, y)` pair of a point with at least two features.
    pub fn xy(&self) -> Option<(F, F)> {
        Some((*self.features.get(0)?, *self.features.get(1)?))
    }
}

/// Number of samples per label, ordered by label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassCounts<L: Ord> {
    counts: BTreeMap<L, usize>,
}

impl<L: Ord + Clone> ClassCounts<L> {
    pub fn get(&self, label: &L) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&L, usize)> {
        self.counts.iter().map(|(label, &count)| (label, count))
    }

    /// The label with the most samples. Ties go to the smallest label.
    pub fn majority(&self) -> Option<(L, usize)> {
        let mut best: Option<(&L, usize)> = None;
        for (label, count) in self.iter() {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((label, count));
            }
        }
        best.map(|(label, count)| (label.clone(), count))
    }

    /// The label with the fewest samples. Ties go to the smallest label.
    pub fn minority(&self) -> Option<(L, usize)> {
        let mut best: Option<(&L, usize)> = None;
        for (label, count) in self.iter() {
            if best.map_or(true, |(_, c)| count < c) {
                best = Some((label, count));
            }
        }
        best.map(|(label, count)| (label.clone(), count))
    }
}

/// Counts the samples of each label in `data`.
pub fn class_counts<L, F>(data: &[DataPoint<L, F>]) -> ClassCounts<L>
where
    L: Clone + Eq + std::hash::Hash + Debug + Ord,
    F: Float,
{
    let mut counts = BTreeMap::new();
    for dp in data {
        *counts.entry(dp.label.clone()).or_insert(0) += 1;
    }
    ClassCounts { counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn imbalanced() -> Vec<DataPoint<&'static str, f64>> {
        vec![
            DataPoint::new(array![0.0, 0.0], "B"),
            DataPoint::new(array![1.0, 0.0], "B"),
            DataPoint::new(array![2.0, 0.0], "B"),
            DataPoint::new(array![5.0, 5.0], "A"),
        ]
    }

    #[test]
    fn test_class_counts() {
        let counts = class_counts(&imbalanced());
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get(&"A"), 1);
        assert_eq!(counts.get(&"B"), 3);
        assert_eq!(counts.get(&"C"), 0);
        assert_eq!(counts.majority(), Some(("B", 3)));
        assert_eq!(counts.minority(), Some(("A", 1)));
    }

    #[test]
    fn test_ties_prefer_smallest_label() {
        let data = vec![
            DataPoint::new(array![0.0], 2usize),
            DataPoint::new(array![1.0], 1usize),
        ];
        let counts = class_counts(&data);
        assert_eq!(counts.majority(), Some((1, 1)));
        assert_eq!(counts.minority(), Some((1, 1)));
    }

    #[test]
    fn test_empty_counts() {
        let data: Vec<DataPoint<usize, f64>> = vec![];
        let counts = class_counts(&data);
        assert!(counts.is_empty());
        assert_eq!(counts.majority(), None);
    }

    #[test]
    fn test_xy() {
        let point = DataPoint::new(array![3.0, 4.0], 0usize);
        assert_eq!(point.xy(), Some((3.0, 4.0)));
        let flat = DataPoint::new(array![3.0], 0usize);
        assert_eq!(flat.xy(), None);
    }
}
