//! Resource declarations of components.
//!
//! A [Manifest] states how many columns of each kind a component needs without
//! naming them; a layout planner picks concrete columns and hands them to the
//! component as a [ComponentLayout].

use num_integer::{ExtendedGcd, Integer};
use serde::{Deserialize, Serialize};

/// A column count requirement: one exact value, or every value of an
/// inclusive range with a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManifestParam {
    Single(usize),
    Range { min: usize, max: usize, step: usize },
}

impl ManifestParam {
    /// # Panics
    ///
    /// Will panic if the range is empty or `step` is zero.
    pub fn range(min: usize, max: usize, step: usize) -> Self {
        assert!(min <= max, "empty manifest range {min}..={max}");
        assert!(step > 0, "manifest ranges need a positive step");
        ManifestParam::Range { min, max, step }
    }

    pub fn min(&self) -> usize {
        match *self {
            ManifestParam::Single(value) => value,
            ManifestParam::Range { min, .. } => min,
        }
    }

    pub fn max(&self) -> usize {
        match *self {
            ManifestParam::Single(value) => value,
            ManifestParam::Range { max, .. } => max,
        }
    }

    pub fn contains(&self, value: usize) -> bool {
        match *self {
            ManifestParam::Single(single) => value == single,
            ManifestParam::Range { min, max, step } => {
                (min..=max).contains(&value) && (value - min) % step == 0
            }
        }
    }

    fn bounds(&self) -> (usize, usize, usize) {
        match *self {
            ManifestParam::Single(value) => (value, value, 1),
            ManifestParam::Range { min, max, step } => (min, max, step),
        }
    }

    /// The values accepted by both requirements, `None` if there are none.
    ///
    /// The common values of two stepped ranges are stepped by the lcm of the
    /// steps; the first one solves `v = min1 (mod step1)`, `v = min2 (mod step2)`.
    pub fn intersect(&self, other: &ManifestParam) -> Option<ManifestParam> {
        let (min1, max1, step1) = self.bounds();
        let (min2, max2, step2) = other.bounds();
        let (low, high) = (min1.max(min2), max1.min(max2));
        if low > high {
            return None;
        }

        let (step1, step2) = (step1 as i128, step2 as i128);
        let ExtendedGcd { gcd, x, .. } = Integer::extended_gcd(&step1, &step2);
        let gap = (min2 as i128 - min1 as i128).rem_euclid(step2);
        if gap % gcd != 0 {
            return None;
        }
        // step1 * k = gap (mod step2), and x inverts step1 / gcd modulo `modulus`
        let modulus = (step2 / gcd) as u128;
        let k = ((gap / gcd) as u128 * x.rem_euclid(modulus as i128) as u128) % modulus;

        let (step1, step2) = (step1 as u128, step2 as u128);
        let step = Integer::lcm(&step1, &step2);
        let (low, high) = (low as u128, high as u128);
        let anchor = min1 as u128 + step1 * k;
        let first = if anchor >= low {
            low + (anchor - low) % step
        } else {
            low + (step - (low - anchor) % step) % step
        };
        if first > high {
            return None;
        }
        let last = first + (high - first) / step * step;

        // both values are at most `high`, which came from a usize
        if first == last {
            Some(ManifestParam::Single(first as usize))
        } else {
            Some(ManifestParam::Range {
                min: first as usize,
                max: last as usize,
                step: step as usize,
            })
        }
    }
}

/// What a component needs from its layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Manifest {
    pub witness: ManifestParam,
    pub constant: usize,
    pub public_input: usize,
}

impl Manifest {
    pub fn new(witness: ManifestParam) -> Self {
        Self {
            witness,
            constant: 0,
            public_input: 0,
        }
    }

    #[must_use]
    pub fn constants(mut self, constant: usize) -> Self {
        self.constant = constant;
        self
    }

    #[must_use]
    pub fn public_inputs(mut self, public_input: usize) -> Self {
        self.public_input = public_input;
        self
    }

    /// The requirements of two components placed on the same columns:
    /// witness counts both accept, and the larger constant and public-input
    /// counts. `None` when no witness count suits both.
    pub fn merge_with(&self, other: &Manifest) -> Option<Manifest> {
        Some(Manifest {
            witness: self.witness.intersect(&other.witness)?,
            constant: self.constant.max(other.constant),
            public_input: self.public_input.max(other.public_input),
        })
    }

    pub fn is_satisfied_by(&self, layout: &ComponentLayout) -> bool {
        self.witness.contains(layout.witness.len())
            && layout.constant.len() >= self.constant
            && layout.public_input.len() >= self.public_input
            && layout.has_distinct_columns()
    }

    /// # Panics
    ///
    /// Will panic if the layout does not satisfy the manifest.
    pub fn check(&self, layout: &ComponentLayout) {
        assert!(
            self.is_satisfied_by(layout),
            "layout {layout:?} does not satisfy manifest {self:?}"
        );
    }
}

/// The concrete columns a component instance uses, by kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentLayout {
    pub witness: Vec<usize>,
    pub constant: Vec<usize>,
    pub public_input: Vec<usize>,
}

impl ComponentLayout {
    pub fn new(witness: Vec<usize>) -> Self {
        Self {
            witness,
            ..Default::default()
        }
    }

    /// Witness columns `0..amount`.
    pub fn witness_range(amount: usize) -> Self {
        Self::new((0..amount).collect())
    }

    #[must_use]
    pub fn constants(mut self, constant: Vec<usize>) -> Self {
        self.constant = constant;
        self
    }

    #[must_use]
    pub fn public_inputs(mut self, public_input: Vec<usize>) -> Self {
        self.public_input = public_input;
        self
    }

    fn has_distinct_columns(&self) -> bool {
        [&self.witness, &self.constant, &self.public_input]
            .iter()
            .all(|columns| {
                let mut sorted = columns.to_vec();
                sorted.sort_unstable();
                sorted.windows(2).all(|pair| pair[0] != pair[1])
            })
    }
}
