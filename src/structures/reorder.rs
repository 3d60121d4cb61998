// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Implementation of the ReorderMap structure for permuting atoms of frames.

use std::fs;
use std::path::Path;

use crate::errors::ReorderError;

/// Permutation of atom indices applied identically to every frame.
///
/// After applying the map, the atom at index `i` holds the data previously stored at index `map[i]`.
/// Indices are 0-based internally, reorder map files use 1-based indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderMap {
    map: Vec<usize>,
}

impl ReorderMap {
    /// Create a `ReorderMap` from 1-based atom indices.
    ///
    /// ## Returns
    /// `ReorderMap` if the indices form a permutation of `1..=n`. Otherwise `ReorderError`.
    pub fn from_one_based(indices: &[i64]) -> Result<Self, ReorderError> {
        if indices.is_empty() {
            return Err(ReorderError::Empty);
        }

        let n_atoms = indices.len();
        let mut seen = vec![false; n_atoms];
        let mut map = Vec::with_capacity(n_atoms);

        for &index in indices {
            if index < 1 || index > n_atoms as i64 {
                return Err(ReorderError::OutOfRange { index, n_atoms });
            }

            let zero_based = (index - 1) as usize;
            if seen[zero_based] {
                return Err(ReorderError::Duplicate(index as usize));
            }

            seen[zero_based] = true;
            map.push(zero_based);
        }

        Ok(ReorderMap { map })
    }

    /// Parse a `ReorderMap` from whitespace-separated 1-based atom indices.
    pub fn parse(string: &str) -> Result<Self, ReorderError> {
        let indices = string
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<i64>()
                    .map_err(|_| ReorderError::ParseIndexErr(token.to_owned()))
            })
            .collect::<Result<Vec<i64>, ReorderError>>()?;

        ReorderMap::from_one_based(&indices)
    }

    /// Read a `ReorderMap` from a file containing whitespace-separated 1-based atom indices.
    pub fn from_file(filename: impl AsRef<Path>) -> Result<Self, ReorderError> {
        let content = fs::read_to_string(filename.as_ref())
            .map_err(|_| ReorderError::FileNotFound(Box::from(filename.as_ref())))?;

        ReorderMap::parse(&content)
    }

    /// Create a `ReorderMap` which leaves the order of `n_atoms` atoms unchanged.
    pub fn identity(n_atoms: usize) -> Self {
        ReorderMap {
            map: (0..n_atoms).collect(),
        }
    }

    /// Create a `ReorderMap` which undoes the effect of this map.
    pub fn inverse(&self) -> Self {
        let mut inverse = vec![0; self.map.len()];
        for (target, &source) in self.map.iter().enumerate() {
            inverse[source] = target;
        }

        ReorderMap { map: inverse }
    }

    /// Get the number of atoms the map applies to.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map contains no atoms. Never true for a successfully parsed map.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Get the 0-based source indices.
    #[inline(always)]
    pub fn as_slice(&self) -> &[usize] {
        &self.map
    }

    /// Build a new vector with permuted order of `values`.
    ///
    /// `values` is only read, never modified, so no element can be overwritten before it is copied.
    ///
    /// ## Panics
    /// Panics if the length of `values` does not match the length of the map.
    pub fn permute<T: Clone>(&self, values: &[T]) -> Vec<T> {
        if values.len() != self.map.len() {
            panic!(
                "FATAL VENUS_GMX ERROR | ReorderMap::permute | Reorder map covers {} atoms but {} values were provided.",
                self.map.len(),
                values.len()
            );
        }

        self.map.iter().map(|&source| values[source].clone()).collect()
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::vector3d::Vector3D;
    use rand::seq::SliceRandom;

    fn vectors(n: usize) -> Vec<Vector3D> {
        (0..n)
            .map(|i| Vector3D::new(i as f64, 2.0 * i as f64, -(i as f64)))
            .collect()
    }

    #[test]
    fn parse() {
        let map = ReorderMap::parse("2 3\n1\n").unwrap();
        assert_eq!(map.as_slice(), &[1, 2, 0]);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn from_file() {
        let map = ReorderMap::from_file("test_files/reorder.dat").unwrap();
        assert_eq!(map.as_slice(), &[1, 2, 0]);
    }

    #[test]
    fn from_file_nonexistent() {
        match ReorderMap::from_file("test_files/nonexistent.dat") {
            Err(ReorderError::FileNotFound(e)) => {
                assert_eq!(e, Box::from(Path::new("test_files/nonexistent.dat")))
            }
            Ok(_) => panic!("Reading should have failed, but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    macro_rules! parse_fails {
        ($name:ident, $string:expr, $expected:expr) => {
            #[test]
            fn $name() {
                match ReorderMap::parse($string) {
                    Err(e) => assert_eq!(e, $expected),
                    Ok(_) => panic!("Parsing should have failed, but it succeeded."),
                }
            }
        };
    }

    parse_fails!(parse_empty, " \n", ReorderError::Empty);
    parse_fails!(
        parse_invalid_token,
        "1 2 a3",
        ReorderError::ParseIndexErr("a3".to_owned())
    );
    parse_fails!(
        parse_zero,
        "0 1 2",
        ReorderError::OutOfRange {
            index: 0,
            n_atoms: 3
        }
    );
    parse_fails!(
        parse_too_large,
        "1 2 4",
        ReorderError::OutOfRange {
            index: 4,
            n_atoms: 3
        }
    );
    parse_fails!(
        parse_negative,
        "1 -2 3",
        ReorderError::OutOfRange {
            index: -2,
            n_atoms: 3
        }
    );
    parse_fails!(parse_duplicate, "1 3 3", ReorderError::Duplicate(3));

    #[test]
    fn permute() {
        let map = ReorderMap::parse("2 3 1").unwrap();
        let values = vectors(3);

        let permuted = map.permute(&values);

        assert_eq!(permuted[0], values[1]);
        assert_eq!(permuted[1], values[2]);
        assert_eq!(permuted[2], values[0]);
    }

    #[test]
    fn permute_swap_does_not_corrupt() {
        // an in-place swap would read already overwritten values
        let map = ReorderMap::parse("2 1").unwrap();
        let values = vec![10, 20];

        assert_eq!(map.permute(&values), vec![20, 10]);
        assert_eq!(values, vec![10, 20]);
    }

    #[test]
    fn permute_identity() {
        let values = vectors(17);
        let map = ReorderMap::identity(17);

        assert_eq!(map.permute(&values), values);
    }

    #[test]
    fn permute_inverse_restores() {
        let values = vectors(50);
        let map = ReorderMap::parse("3 1 4 5 2").unwrap();
        let small = vectors(5);
        assert_eq!(map.inverse().permute(&map.permute(&small)), small);

        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let mut indices: Vec<i64> = (1..=50).collect();
            indices.shuffle(&mut rng);
            let map = ReorderMap::from_one_based(&indices).unwrap();

            let restored = map.inverse().permute(&map.permute(&values));
            assert_eq!(restored, values);
        }
    }

    #[test]
    #[should_panic(expected = "Reorder map covers 3 atoms but 2 values were provided")]
    fn permute_wrong_length() {
        let map = ReorderMap::identity(3);
        map.permute(&[1, 2]);
    }
}
