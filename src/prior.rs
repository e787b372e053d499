use crate::dataset::{validate, DatasetView};
use crate::error::Result;

/// Empirical class distribution, plain and Laplace-smoothed.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassPrior {
    pub plain: Vec<f64>,
    /// Strictly positive for every class, observed or not.
    pub laplace: Vec<f64>,
}

pub fn estimate_priors<D: DatasetView + ?Sized>(dataset: &D) -> Result<ClassPrior> {
    validate(dataset)?;

    let num_classes = dataset.num_classes();
    let num_instances = dataset.num_instances() as f64;

    let mut counts = vec![0usize; num_classes];
    for i in 0..dataset.num_instances() {
        counts[dataset.class_value(i)] += 1;
    }

    let plain = counts
        .iter()
        .map(|&count| count as f64 / num_instances)
        .collect();
    let laplace = counts
        .iter()
        .map(|&count| (count as f64 + 1.0) / (num_instances + num_classes as f64))
        .collect();

    let prior = ClassPrior { plain, laplace };
    log::debug!("Class distribution: {:?}", prior.plain);
    log::debug!("Class distribution Laplacian: {:?}", prior.laplace);

    Ok(prior)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Table;
    use approx::assert_abs_diff_eq;

    #[test]
    fn counts_class_frequencies() {
        let table = Table::from_categories(
            &[2],
            2,
            &[(&[0], 0), (&[1], 0), (&[0], 0), (&[1], 1)],
        )
        .unwrap();

        let prior = estimate_priors(&table).unwrap();
        assert_abs_diff_eq!(prior.plain[0], 0.75);
        assert_abs_diff_eq!(prior.plain[1], 0.25);
        assert_abs_diff_eq!(prior.laplace[0], 4.0 / 6.0);
        assert_abs_diff_eq!(prior.laplace[1], 2.0 / 6.0);
    }

    #[test]
    fn laplace_keeps_unseen_class_positive() {
        let table = Table::from_categories(&[2], 3, &[(&[0], 0), (&[1], 1), (&[1], 1)]).unwrap();

        let prior = estimate_priors(&table).unwrap();
        assert_eq!(prior.plain[2], 0.0);
        assert!(prior.laplace.iter().all(|&p| p > 0.0));
        assert_abs_diff_eq!(prior.laplace.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(prior.plain.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn fails_on_invalid_dataset() {
        let table = Table::from_categories(&[2], 2, &[(&[0], 5)]).unwrap();
        assert!(estimate_priors(&table).is_err());
    }
}
