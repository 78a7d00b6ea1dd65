//! Result containers for correlation curves

use std::collections::btree_map;
use std::collections::BTreeMap;

/// Key under which the isotropic (ring) result is stored.
pub const DEFAULT_KEY: i32 = 0;

/// One correlation curve: three parallel sequences of equal length.
///
/// `frequency` is normalized to [0, 1] by the Nyquist radius;
/// `points_per_bin` is the raw sample count of each bin.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CorrelationCurve {
    pub correlation: Vec<f64>,
    pub frequency: Vec<f64>,
    pub points_per_bin: Vec<f64>,
}

/// Correlation record produced by one engine execution.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FourierCorrelationData {
    pub correlation: CorrelationCurve,
}

/// Keyed container of correlation records.
///
/// The ring engine stores a single record under [`DEFAULT_KEY`]; the
/// directional engine stores one record per rotation angle, keyed by the
/// angle's physical value in degrees.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FourierCorrelationDataCollection {
    inner: BTreeMap<i32, FourierCorrelationData>,
}

impl FourierCorrelationDataCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: i32, data: FourierCorrelationData) {
        self.inner.insert(key, data);
    }

    pub fn get(&self, key: i32) -> Option<&FourierCorrelationData> {
        self.inner.get(&key)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, i32, FourierCorrelationData> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<'a> IntoIterator for &'a FourierCorrelationDataCollection {
    type Item = (&'a i32, &'a FourierCorrelationData);
    type IntoIter = btree_map::Iter<'a, i32, FourierCorrelationData>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
