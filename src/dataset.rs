use crate::error::{BayesError, Result};

/// A single attribute cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Index into the attribute's value domain.
    Category(usize),
    Real(f64),
}

impl Value {
    pub fn category(self) -> Option<usize> {
        match self {
            Value::Category(v) => Some(v),
            Value::Real(_) => None,
        }
    }

    pub fn real(self) -> Option<f64> {
        match self {
            Value::Real(x) => Some(x),
            Value::Category(_) => None,
        }
    }
}

/// Read-only view of a labeled dataset.
///
/// Implementors must not change while a fit or classification pass borrows
/// them. Indices passed in are always within `num_instances()` and
/// `num_attributes()`.
pub trait DatasetView {
    fn num_instances(&self) -> usize;

    /// Number of feature columns, the class column excluded.
    fn num_attributes(&self) -> usize;

    fn num_classes(&self) -> usize;

    /// Size of a categorical attribute's value domain, `None` for continuous ones.
    fn domain_size(&self, attribute: usize) -> Option<usize>;

    fn feature(&self, instance: usize, attribute: usize) -> Value;

    fn class_value(&self, instance: usize) -> usize;
}

/// Checks the invariants every estimator relies on: at least one instance, at
/// least one class, and every class value inside `[0, num_classes)`.
pub fn validate<D: DatasetView + ?Sized>(dataset: &D) -> Result<()> {
    if dataset.num_instances() == 0 {
        return Err(BayesError::invalid_dataset("dataset has no instances"));
    }

    let num_classes = dataset.num_classes();
    if num_classes == 0 {
        return Err(BayesError::invalid_dataset("dataset has no classes"));
    }

    for i in 0..dataset.num_instances() {
        let class = dataset.class_value(i);
        if class >= num_classes {
            return Err(BayesError::invalid_dataset(format!(
                "instance {i} has class value {class}, expected less than {num_classes}"
            )));
        }
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeKind {
    /// Categorical attribute with its value names, in index order.
    Nominal(Vec<String>),
    Numeric,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
}

/// In-memory dataset, as produced by the loader.
#[derive(Debug, Clone)]
pub struct Table {
    attributes: Vec<Attribute>,
    class_name: String,
    classes: Vec<String>,
    rows: Vec<Vec<Value>>,
    labels: Vec<usize>,
}

impl Table {
    pub fn new(
        attributes: Vec<Attribute>,
        class_name: String,
        classes: Vec<String>,
        rows: Vec<Vec<Value>>,
        labels: Vec<usize>,
    ) -> Result<Self> {
        if rows.len() != labels.len() {
            return Err(BayesError::invalid_dataset(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }

        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != attributes.len())
        {
            return Err(BayesError::invalid_dataset(format!(
                "row {i} has {} values, expected {}",
                row.len(),
                attributes.len()
            )));
        }

        Ok(Table {
            attributes,
            class_name,
            classes,
            rows,
            labels,
        })
    }

    /// Builds a categorical table with generated names. `domains[a]` is the
    /// number of values attribute `a` can take.
    pub fn from_categories(
        domains: &[usize],
        num_classes: usize,
        rows: &[(&[usize], usize)],
    ) -> Result<Self> {
        let attributes = domains
            .iter()
            .enumerate()
            .map(|(a, &size)| Attribute {
                name: format!("attr{a}"),
                kind: AttributeKind::Nominal((0..size).map(|v| v.to_string()).collect()),
            })
            .collect();

        let (values, labels): (Vec<Vec<Value>>, Vec<usize>) = rows
            .iter()
            .map(|(features, class)| {
                let row: Vec<Value> = features.iter().map(|&v| Value::Category(v)).collect();
                (row, *class)
            })
            .unzip();

        Self::new(
            attributes,
            "class".to_string(),
            (0..num_classes).map(|c| c.to_string()).collect(),
            values,
            labels,
        )
    }

    /// Builds a continuous table with generated names.
    pub fn from_reals(num_classes: usize, rows: &[(&[f64], usize)]) -> Result<Self> {
        let width = rows.first().map_or(0, |(features, _)| features.len());
        let attributes = (0..width)
            .map(|a| Attribute {
                name: format!("attr{a}"),
                kind: AttributeKind::Numeric,
            })
            .collect();

        let (values, labels): (Vec<Vec<Value>>, Vec<usize>) = rows
            .iter()
            .map(|(features, class)| {
                let row: Vec<Value> = features.iter().map(|&x| Value::Real(x)).collect();
                (row, *class)
            })
            .unzip();

        Self::new(
            attributes,
            "class".to_string(),
            (0..num_classes).map(|c| c.to_string()).collect(),
            values,
            labels,
        )
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Class names, in index order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn instance(&self, index: usize) -> &[Value] {
        &self.rows[index]
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }
}

impl DatasetView for Table {
    fn num_instances(&self) -> usize {
        self.rows.len()
    }

    fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    fn num_classes(&self) -> usize {
        self.classes.len()
    }

    fn domain_size(&self, attribute: usize) -> Option<usize> {
        match &self.attributes[attribute].kind {
            AttributeKind::Nominal(values) => Some(values.len()),
            AttributeKind::Numeric => None,
        }
    }

    fn feature(&self, instance: usize, attribute: usize) -> Value {
        self.rows[instance][attribute]
    }

    fn class_value(&self, instance: usize) -> usize {
        self.labels[instance]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dataset() {
        let table = Table::from_categories(&[2], 2, &[]).unwrap();
        assert!(matches!(
            validate(&table),
            Err(BayesError::InvalidDataset { .. })
        ));
    }

    #[test]
    fn rejects_zero_classes() {
        let table = Table::from_categories(&[2], 0, &[(&[0], 0)]).unwrap();
        assert!(matches!(
            validate(&table),
            Err(BayesError::InvalidDataset { .. })
        ));
    }

    #[test]
    fn rejects_class_out_of_range() {
        let table = Table::from_categories(&[2], 2, &[(&[0], 0), (&[1], 2)]).unwrap();
        let err = validate(&table).unwrap_err();
        assert!(err.to_string().contains("instance 1"));
    }

    #[test]
    fn rejects_ragged_rows() {
        let result = Table::from_reals(2, &[(&[1.0, 2.0], 0), (&[1.0], 1)]);
        assert!(matches!(result, Err(BayesError::InvalidDataset { .. })));
    }

    #[test]
    fn exposes_view() {
        let table = Table::from_categories(&[2, 3], 2, &[(&[1, 2], 1), (&[0, 0], 0)]).unwrap();
        validate(&table).unwrap();

        assert_eq!(table.num_instances(), 2);
        assert_eq!(table.num_attributes(), 2);
        assert_eq!(table.num_classes(), 2);
        assert_eq!(table.domain_size(1), Some(3));
        assert_eq!(table.feature(0, 1), Value::Category(2));
        assert_eq!(table.class_value(0), 1);
        assert_eq!(table.instance(1), &[Value::Category(0), Value::Category(0)]);
    }
}
