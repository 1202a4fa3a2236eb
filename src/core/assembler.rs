use crate::core::generator::generate_subset;
use crate::core::{Datasets, Observation, Result, SubsetParams};
use crate::utils::validation::validate_non_empty_string;
use rand::Rng;

/// Shape of one subset before a count and label are attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubsetShape {
    pub mean: (f64, f64),
    pub sd: (f64, f64),
    pub rho: f64,
    pub value: u8,
}

impl SubsetShape {
    pub fn with(&self, count: usize, group: &str) -> SubsetParams {
        SubsetParams {
            count,
            mean_x: self.mean.0,
            mean_y: self.mean.1,
            sd_x: self.sd.0,
            sd_y: self.sd.1,
            rho: self.rho,
            value: self.value,
            group: group.to_string(),
        }
    }
}

pub const NORMAL_GROUP1: SubsetShape = SubsetShape {
    mean: (1.0, 12.0),
    sd: (1.5, 1.0),
    rho: 0.8,
    value: 0,
};

pub const NORMAL_GROUP2: SubsetShape = SubsetShape {
    mean: (2.0, 7.0),
    sd: (1.5, 1.0),
    rho: 0.9,
    value: 1,
};

pub const EXTREME_GROUP1: SubsetShape = SubsetShape {
    mean: (3.0, 35.0),
    sd: (1.0, 1.0),
    rho: -0.3,
    value: 0,
};

pub const EXTREME_GROUP2: SubsetShape = SubsetShape {
    mean: (-1.0, -15.0),
    sd: (1.0, 1.0),
    rho: -0.3,
    value: 1,
};

/// Splits `n` into `(round(n / 2), rest)`, rounding ties to even.
pub fn split_count(n: usize) -> (usize, usize) {
    let first = (n as f64 / 2.0).round_ties_even() as usize;
    (first, n - first)
}

pub fn assemble_datasets<R: Rng + ?Sized>(
    rng: &mut R,
    normal_count: usize,
    extreme_count: usize,
    label1: &str,
    label2: &str,
) -> Result<Datasets> {
    validate_non_empty_string("label1", label1)?;
    validate_non_empty_string("label2", label2)?;

    let (normal1, normal2) = split_count(normal_count);
    let (extreme1, extreme2) = split_count(extreme_count);

    tracing::debug!(
        "Splitting {} normal ({}/{}) and {} extreme ({}/{}) observations",
        normal_count,
        normal1,
        normal2,
        extreme_count,
        extreme1,
        extreme2
    );

    let mut without_extremes: Vec<Observation> = Vec::with_capacity(normal_count);
    without_extremes.extend(generate_subset(rng, &NORMAL_GROUP1.with(normal1, label1))?);
    without_extremes.extend(generate_subset(rng, &NORMAL_GROUP2.with(normal2, label2))?);

    let mut with_extremes = Vec::with_capacity(normal_count + extreme_count);
    with_extremes.extend_from_slice(&without_extremes);
    with_extremes.extend(generate_subset(rng, &EXTREME_GROUP1.with(extreme1, label1))?);
    with_extremes.extend(generate_subset(rng, &EXTREME_GROUP2.with(extreme2, label2))?);

    Ok(Datasets {
        without_extremes,
        with_extremes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::LpmError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_split_count_sums_to_total() {
        for n in 0..200 {
            let (a, b) = split_count(n);
            assert_eq!(a + b, n);
        }
    }

    #[test]
    fn test_split_count_rounds_half_to_even() {
        assert_eq!(split_count(0), (0, 0));
        assert_eq!(split_count(1), (0, 1));
        assert_eq!(split_count(2), (1, 1));
        assert_eq!(split_count(3), (2, 1));
        assert_eq!(split_count(5), (2, 3));
        assert_eq!(split_count(7), (4, 3));
        assert_eq!(split_count(60), (30, 30));
    }

    #[test]
    fn test_datasets_sizes_and_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let data = assemble_datasets(&mut rng, 61, 5, "A", "B").unwrap();

        let (n1, n2) = split_count(61);
        let (e1, e2) = split_count(5);
        assert_eq!(data.without_extremes.len(), n1 + n2);
        assert_eq!(data.with_extremes.len(), n1 + n2 + e1 + e2);
        assert_eq!(&data.with_extremes[..data.without_extremes.len()], &data.without_extremes[..]);

        let labels: Vec<(u8, &str)> = data
            .with_extremes
            .iter()
            .map(|o| (o.value, o.group.as_str()))
            .collect();
        let mut expected: Vec<(u8, &str)> = Vec::new();
        expected.extend(std::iter::repeat((0, "A")).take(n1));
        expected.extend(std::iter::repeat((1, "B")).take(n2));
        expected.extend(std::iter::repeat((0, "A")).take(e1));
        expected.extend(std::iter::repeat((1, "B")).take(e2));
        assert_eq!(labels, expected);
    }

    #[test]
    fn test_extremes_sit_far_from_the_bulk() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let data = assemble_datasets(&mut rng, 60, 2, "Group 1", "Group 2").unwrap();
        let extremes = &data.with_extremes[60..];
        assert_eq!(extremes.len(), 2);
        assert!(extremes[0].y > 25.0);
        assert!(extremes[1].y < -5.0);
    }

    #[test]
    fn test_zero_counts_give_empty_datasets() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let data = assemble_datasets(&mut rng, 0, 0, "A", "B").unwrap();
        assert!(data.without_extremes.is_empty());
        assert!(data.with_extremes.is_empty());
    }

    #[test]
    fn test_empty_label_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = assemble_datasets(&mut rng, 10, 2, "", "B").unwrap_err();
        assert!(matches!(err, LpmError::InvalidParameter { .. }));
    }
}
