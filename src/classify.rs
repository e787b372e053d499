use crate::dataset::{DatasetView, Value};
use crate::error::{BayesError, Result};
use crate::model::{CategoricalModel, FittedModel, GaussianModel};

/// Log-posterior score of every class for one instance, up to a shared
/// constant.
pub fn log_scores(model: &FittedModel, instance: &[Value]) -> Result<Vec<f64>> {
    let expected = model.num_attributes();
    if instance.len() != expected {
        return Err(BayesError::ShapeMismatch {
            expected: format!("{expected} attributes"),
            got: format!("{} attributes", instance.len()),
        });
    }

    match model {
        FittedModel::Categorical(model) => categorical_scores(model, instance),
        FittedModel::Gaussian(model) => gaussian_scores(model, instance),
    }
}

fn categorical_scores(model: &CategoricalModel, instance: &[Value]) -> Result<Vec<f64>> {
    let values = instance
        .iter()
        .enumerate()
        .map(|(attribute, value)| {
            let value = value.category().ok_or(BayesError::KindMismatch {
                attribute,
                expected: "categorical",
            })?;
            let domain_size = model.tables.domain_size(attribute);
            if value >= domain_size {
                return Err(BayesError::UnsupportedValue {
                    attribute,
                    value,
                    domain_size,
                });
            }
            Ok(value)
        })
        .collect::<Result<Vec<_>>>()?;

    let scores = model
        .scoring_table()
        .iter()
        .zip(model.prior.laplace.iter())
        .map(|(class_tables, prior)| {
            values
                .iter()
                .zip(class_tables.iter())
                .fold(prior.ln(), |score, (&value, probs)| score + probs[value].ln())
        })
        .collect();

    Ok(scores)
}

fn gaussian_scores(model: &GaussianModel, instance: &[Value]) -> Result<Vec<f64>> {
    let values = instance
        .iter()
        .enumerate()
        .map(|(attribute, value)| {
            value
                .real()
                .filter(|x| x.is_finite())
                .ok_or(BayesError::KindMismatch {
                    attribute,
                    expected: "a finite real",
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let scores = model
        .params
        .iter()
        .zip(model.prior.laplace.iter())
        .map(|(class_params, prior)| {
            values
                .iter()
                .zip(class_params.iter())
                .fold(prior.ln(), |score, (&x, params)| score + params.log_density(x))
        })
        .collect();

    Ok(scores)
}

/// Index of the highest score. The first class reaching the maximum wins ties.
fn arg_max(scores: &[f64]) -> Result<usize> {
    let mut best_score = f64::NEG_INFINITY;
    let mut best_class = None;
    for (class, &score) in scores.iter().enumerate() {
        if score > best_score {
            best_score = score;
            best_class = Some(class);
        }
    }

    // Nothing beat -inf: every class had a zero likelihood.
    best_class.ok_or(BayesError::ZeroLikelihood)
}

/// Predicts the class of one instance.
pub fn classify(model: &FittedModel, instance: &[Value]) -> Result<usize> {
    arg_max(&log_scores(model, instance)?)
}

/// Predicts every instance of `dataset` in order. Stops at the first
/// instance that can't be classified.
pub fn classify_all<D: DatasetView + ?Sized>(
    model: &FittedModel,
    dataset: &D,
) -> Result<Vec<usize>> {
    let num_attributes = dataset.num_attributes();
    if num_attributes != model.num_attributes() {
        return Err(BayesError::ShapeMismatch {
            expected: format!("{} attributes", model.num_attributes()),
            got: format!("{num_attributes} attributes"),
        });
    }

    let mut instance = Vec::with_capacity(num_attributes);
    let mut predictions = Vec::with_capacity(dataset.num_instances());
    for i in 0..dataset.num_instances() {
        instance.clear();
        instance.extend((0..num_attributes).map(|a| dataset.feature(i, a)));
        predictions.push(classify(model, &instance)?);
    }

    log::info!("classified {} instances", predictions.len());

    Ok(predictions)
}
