use serde::{Deserialize, Serialize};

/// An axis-aligned unit hypercube, identified by its minimum corner.
///
/// The pipeline accepts anything that is `AsRef<[i64]>`; `Cube` is the owned
/// form for callers that read cube sets from JSON or build them at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cube(Vec<i64>);

impl Cube {
    /// A cube with minimum corner `coordinates`.
    #[must_use]
    pub fn new(coordinates: impl Into<Vec<i64>>) -> Self {
        Self(coordinates.into())
    }

    /// Number of axes.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    /// Minimum-corner coordinates.
    #[must_use]
    pub fn coordinates(&self) -> &[i64] {
        &self.0
    }
}

impl AsRef<[i64]> for Cube {
    fn as_ref(&self) -> &[i64] {
        &self.0
    }
}

impl From<Vec<i64>> for Cube {
    fn from(coordinates: Vec<i64>) -> Self {
        Self(coordinates)
    }
}

impl<const N: usize> From<[i64; N]> for Cube {
    fn from(coordinates: [i64; N]) -> Self {
        Self(coordinates.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_coordinate_list() {
        let cube = Cube::from([3, -1, 4]);
        assert_eq!(serde_json::to_string(&cube).unwrap(), "[3,-1,4]");

        let parsed: Vec<Cube> = serde_json::from_str("[[0,0],[2,5]]").unwrap();
        assert_eq!(parsed, vec![Cube::new(vec![0, 0]), Cube::new(vec![2, 5])]);
        assert_eq!(parsed[1].dimension(), 2);
        assert_eq!(parsed[1].coordinates(), &[2, 5]);
    }
}
