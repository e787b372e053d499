use crate::categorical::{estimate_categorical, ConditionalTables};
use crate::classify;
use crate::dataset::{DatasetView, Value};
use crate::error::{BayesError, Result};
use crate::gaussian::{estimate_gaussian, GaussianParams, SigmaPolicy};
use crate::prior::{estimate_priors, ClassPrior};

/// How attributes are modeled. A run uses exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Multinomial frequency tables over value indices.
    #[default]
    Categorical,
    /// One normal distribution per class and attribute.
    Gaussian,
}

/// Which conditional table the categorical decision rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LikelihoodTable {
    /// Unsmoothed frequencies next to the smoothed prior. Values a class never
    /// produced in training rule that class out.
    #[default]
    Raw,
    /// Add-one smoothed frequencies.
    Laplace,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FitOptions {
    pub mode: Mode,
    pub likelihood: LikelihoodTable,
    /// Only consulted in gaussian mode.
    pub sigma_policy: SigmaPolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalModel {
    pub prior: ClassPrior,
    pub tables: ConditionalTables,
    pub likelihood: LikelihoodTable,
}

impl CategoricalModel {
    /// The table the decision rule reads, `[class][attribute][value]`.
    pub fn scoring_table(&self) -> &[Vec<Vec<f64>>] {
        match self.likelihood {
            LikelihoodTable::Raw => &self.tables.plain,
            LikelihoodTable::Laplace => &self.tables.laplace,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaussianModel {
    pub prior: ClassPrior,
    /// `[class][attribute]`, every sigma strictly positive.
    pub params: Vec<Vec<GaussianParams>>,
}

/// Parameters produced by one fitting pass. Immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum FittedModel {
    Categorical(CategoricalModel),
    Gaussian(GaussianModel),
}

impl FittedModel {
    pub fn mode(&self) -> Mode {
        match self {
            FittedModel::Categorical(_) => Mode::Categorical,
            FittedModel::Gaussian(_) => Mode::Gaussian,
        }
    }

    pub fn prior(&self) -> &ClassPrior {
        match self {
            FittedModel::Categorical(model) => &model.prior,
            FittedModel::Gaussian(model) => &model.prior,
        }
    }

    pub fn num_classes(&self) -> usize {
        self.prior().laplace.len()
    }

    pub fn num_attributes(&self) -> usize {
        match self {
            FittedModel::Categorical(model) => model.tables.num_attributes(),
            FittedModel::Gaussian(model) => model.params.first().map_or(0, Vec::len),
        }
    }
}

/// Fits a model of the requested mode. The dataset is only read.
pub fn fit<D: DatasetView + ?Sized>(dataset: &D, options: &FitOptions) -> Result<FittedModel> {
    let prior = estimate_priors(dataset)?;

    let model = match options.mode {
        Mode::Categorical => FittedModel::Categorical(CategoricalModel {
            prior,
            tables: estimate_categorical(dataset)?,
            likelihood: options.likelihood,
        }),
        Mode::Gaussian => FittedModel::Gaussian(GaussianModel {
            prior,
            params: estimate_gaussian(dataset, options.sigma_policy)?,
        }),
    };

    log::info!(
        "fitted {:?} model on {} instances ({} attributes, {} classes)",
        options.mode,
        dataset.num_instances(),
        dataset.num_attributes(),
        dataset.num_classes()
    );

    Ok(model)
}

/// Holds the options and, once `fit` has run, the fitted model.
#[derive(Debug, Clone, Default)]
pub struct NaiveBayesClassifier {
    options: FitOptions,
    model: Option<FittedModel>,
}

impl NaiveBayesClassifier {
    pub fn new(options: FitOptions) -> Self {
        NaiveBayesClassifier {
            options,
            model: None,
        }
    }

    /// Fits from scratch, replacing any previous model. Predictions made with
    /// the previous model are stale afterwards. On failure the previous model
    /// is discarded as well.
    pub fn fit<D: DatasetView + ?Sized>(&mut self, dataset: &D) -> Result<&FittedModel> {
        self.model = None;
        let model = fit(dataset, &self.options)?;
        Ok(&*self.model.insert(model))
    }

    pub fn model(&self) -> Result<&FittedModel> {
        self.model.as_ref().ok_or(BayesError::ModelNotFitted)
    }

    pub fn classify(&self, instance: &[Value]) -> Result<usize> {
        classify::classify(self.model()?, instance)
    }

    pub fn classify_all<D: DatasetView + ?Sized>(&self, dataset: &D) -> Result<Vec<usize>> {
        classify::classify_all(self.model()?, dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Table;
    use approx::assert_abs_diff_eq;

    #[test]
    fn classify_before_fit_fails() {
        let classifier = NaiveBayesClassifier::default();
        assert!(matches!(
            classifier.classify(&[Value::Category(0)]),
            Err(BayesError::ModelNotFitted)
        ));

        let table = Table::from_categories(&[2], 2, &[(&[0], 0)]).unwrap();
        assert!(matches!(
            classifier.classify_all(&table),
            Err(BayesError::ModelNotFitted)
        ));
    }

    #[test]
    fn failed_fit_discards_previous_model() {
        let good = Table::from_categories(&[2], 2, &[(&[0], 0), (&[1], 1)]).unwrap();
        let bad = Table::from_categories(&[2], 2, &[]).unwrap();

        let mut classifier = NaiveBayesClassifier::default();
        classifier.fit(&good).unwrap();
        assert!(classifier.model().is_ok());

        assert!(classifier.fit(&bad).is_err());
        assert!(matches!(classifier.model(), Err(BayesError::ModelNotFitted)));
    }

    #[test]
    fn fit_is_idempotent() {
        let table = Table::from_reals(
            2,
            &[(&[1.0, 0.5], 0), (&[2.0, 0.1], 0), (&[8.0, 3.0], 1), (&[9.5, 2.0], 1)],
        )
        .unwrap();
        let options = FitOptions {
            mode: Mode::Gaussian,
            ..FitOptions::default()
        };

        assert_eq!(fit(&table, &options).unwrap(), fit(&table, &options).unwrap());
    }

    #[test]
    fn priors_sum_to_one_in_both_modes() {
        let categorical = Table::from_categories(&[2], 3, &[(&[0], 0), (&[1], 1)]).unwrap();
        let model = fit(&categorical, &FitOptions::default()).unwrap();
        assert_eq!(model.mode(), Mode::Categorical);
        assert_eq!(model.num_classes(), 3);
        assert_abs_diff_eq!(model.prior().laplace.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert!(model.prior().laplace.iter().all(|&p| p > 0.0));

        let continuous =
            Table::from_reals(2, &[(&[1.0], 0), (&[2.0], 0), (&[5.0], 1), (&[7.0], 1)]).unwrap();
        let options = FitOptions {
            mode: Mode::Gaussian,
            ..FitOptions::default()
        };
        let model = fit(&continuous, &options).unwrap();
        assert_eq!(model.mode(), Mode::Gaussian);
        assert_eq!(model.num_attributes(), 1);
        assert_abs_diff_eq!(model.prior().laplace.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn likelihood_option_selects_table() {
        let table = Table::from_categories(&[2], 2, &[(&[0], 0), (&[1], 1)]).unwrap();
        let options = FitOptions {
            likelihood: LikelihoodTable::Laplace,
            ..FitOptions::default()
        };

        let FittedModel::Categorical(model) = fit(&table, &options).unwrap() else {
            panic!("expected a categorical model");
        };
        assert_eq!(model.scoring_table(), model.tables.laplace.as_slice());
    }
}
