use crate::dataset::{validate, DatasetView};
use crate::error::{BayesError, Result};

/// Per-class conditional probability tables for categorical attributes,
/// indexed as `[class][attribute][value]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalTables {
    /// Relative frequencies. Rows of a class without training instances are all
    /// zero instead of the undefined 0/0.
    pub plain: Vec<Vec<Vec<f64>>>,
    /// Add-one smoothed frequencies, always strictly positive.
    pub laplace: Vec<Vec<Vec<f64>>>,
    /// Training instances per class.
    pub class_counts: Vec<usize>,
}

impl ConditionalTables {
    pub fn num_classes(&self) -> usize {
        self.class_counts.len()
    }

    pub fn num_attributes(&self) -> usize {
        self.plain.first().map_or(0, Vec::len)
    }

    pub fn domain_size(&self, attribute: usize) -> usize {
        self.plain.first().map_or(0, |tables| tables[attribute].len())
    }
}

pub fn estimate_categorical<D: DatasetView + ?Sized>(dataset: &D) -> Result<ConditionalTables> {
    validate(dataset)?;

    let num_classes = dataset.num_classes();
    let num_attributes = dataset.num_attributes();

    let domains = (0..num_attributes)
        .map(|a| {
            dataset.domain_size(a).ok_or_else(|| {
                BayesError::invalid_dataset(format!("attribute {a} is not categorical"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // counts[c][a][v]
    let mut counts: Vec<Vec<Vec<usize>>> = (0..num_classes)
        .map(|_| domains.iter().map(|&size| vec![0; size]).collect())
        .collect();
    let mut class_counts = vec![0usize; num_classes];

    for i in 0..dataset.num_instances() {
        let class = dataset.class_value(i);
        class_counts[class] += 1;

        for (a, &size) in domains.iter().enumerate() {
            let value = dataset.feature(i, a).category().ok_or_else(|| {
                BayesError::invalid_dataset(format!(
                    "instance {i} has a real value for categorical attribute {a}"
                ))
            })?;
            if value >= size {
                return Err(BayesError::invalid_dataset(format!(
                    "instance {i} has value {value} for attribute {a}, whose domain has {size} values"
                )));
            }
            counts[class][a][value] += 1;
        }
    }

    let mut plain = Vec::with_capacity(num_classes);
    let mut laplace = Vec::with_capacity(num_classes);
    for (class_tables, &total) in counts.iter().zip(class_counts.iter()) {
        let total = total as f64;
        // The smoothed denominator carries one extra unit on top of the class
        // count, plus one per class.
        let smoothed_total = total + 1.0 + num_classes as f64;

        plain.push(
            class_tables
                .iter()
                .map(|values| {
                    values
                        .iter()
                        .map(|&count| if total > 0.0 { count as f64 / total } else { 0.0 })
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>(),
        );
        laplace.push(
            class_tables
                .iter()
                .map(|values| {
                    values
                        .iter()
                        .map(|&count| (count as f64 + 1.0) / smoothed_total)
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>(),
        );
    }

    log::debug!("Conditional probabilities: {plain:?}");
    log::debug!("Conditional probabilities Laplacian: {laplace:?}");

    Ok(ConditionalTables {
        plain,
        laplace,
        class_counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Table;
    use approx::assert_abs_diff_eq;

    fn weather() -> Table {
        Table::from_categories(
            &[3, 2],
            2,
            &[
                (&[0, 0], 0),
                (&[0, 1], 0),
                (&[1, 0], 1),
                (&[2, 0], 1),
                (&[2, 1], 0),
                (&[1, 1], 1),
                (&[0, 0], 1),
            ],
        )
        .unwrap()
    }

    #[test]
    fn plain_rows_sum_to_one() {
        let tables = estimate_categorical(&weather()).unwrap();

        assert_eq!(tables.class_counts, vec![3, 4]);
        assert_eq!(tables.num_classes(), 2);
        assert_eq!(tables.num_attributes(), 2);
        assert_eq!(tables.domain_size(0), 3);
        for class in &tables.plain {
            for values in class {
                assert_abs_diff_eq!(values.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
            }
        }
        assert_abs_diff_eq!(tables.plain[0][0][0], 2.0 / 3.0);
        assert_abs_diff_eq!(tables.plain[1][0][1], 0.5);
        assert_abs_diff_eq!(tables.plain[0][0][1], 0.0);
    }

    #[test]
    fn laplace_uses_class_count_denominator() {
        let tables = estimate_categorical(&weather()).unwrap();

        // class 0: three instances, attribute 0 value 1 unseen
        assert_abs_diff_eq!(tables.laplace[0][0][1], 1.0 / 6.0);
        assert_abs_diff_eq!(tables.laplace[0][0][0], 3.0 / 6.0);
        // class 1: four instances, attribute 1 value 0 seen three times
        assert_abs_diff_eq!(tables.laplace[1][1][0], 4.0 / 7.0);
        assert!(tables.laplace.iter().flatten().flatten().all(|&p| p > 0.0));
    }

    #[test]
    fn unseen_class_has_zero_plain_and_positive_laplace() {
        let table = Table::from_categories(&[2], 3, &[(&[0], 0), (&[1], 1)]).unwrap();
        let tables = estimate_categorical(&table).unwrap();

        assert_eq!(tables.class_counts[2], 0);
        assert_eq!(tables.plain[2][0], vec![0.0, 0.0]);
        assert_abs_diff_eq!(tables.laplace[2][0][0], 1.0 / 4.0);
        assert!(tables.plain.iter().flatten().flatten().all(|p| p.is_finite()));
    }

    #[test]
    fn fitting_twice_is_identical() {
        let table = weather();
        assert_eq!(
            estimate_categorical(&table).unwrap(),
            estimate_categorical(&table).unwrap()
        );
    }

    #[test]
    fn rejects_value_outside_domain() {
        let table = Table::from_categories(&[2], 2, &[(&[0], 0), (&[2], 1)]).unwrap();
        assert!(matches!(
            estimate_categorical(&table),
            Err(BayesError::InvalidDataset { .. })
        ));
    }

    #[test]
    fn rejects_continuous_attributes() {
        let table = Table::from_reals(2, &[(&[0.5], 0), (&[1.5], 1)]).unwrap();
        assert!(matches!(
            estimate_categorical(&table),
            Err(BayesError::InvalidDataset { .. })
        ));
    }
}
