use crate::dataset::{Attribute, AttributeKind, Table, Value};
use crate::error::{BayesError, Result};
use crate::model::Mode;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::{collections::HashMap, io, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Decides whether feature columns are nominal or numeric. The class
    /// column is always nominal.
    pub mode: Mode,
    pub has_headers: bool,
    /// Defaults to the last column.
    pub class_column: Option<usize>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            mode: Mode::Categorical,
            has_headers: true,
            class_column: None,
        }
    }
}

/// Attribute and class domains of a loaded table, used to encode further
/// files with the same value indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub attributes: Vec<Attribute>,
    pub class_name: String,
    pub classes: Vec<String>,
}

impl Schema {
    pub fn of(table: &Table) -> Self {
        Schema {
            attributes: table.attributes().to_vec(),
            class_name: table.class_name().to_string(),
            classes: table.classes().to_vec(),
        }
    }
}

/// Value domain under construction. Unseen values are appended.
#[derive(Debug, Default)]
struct Domain {
    values: Vec<String>,
    index: HashMap<String, usize>,
}

impl Domain {
    fn from_values(values: &[String]) -> Self {
        let index = values
            .iter()
            .enumerate()
            .map(|(i, value)| (value.clone(), i))
            .collect();
        Domain {
            values: values.to_vec(),
            index,
        }
    }

    fn encode(&mut self, value: &str) -> usize {
        if let Some(&i) = self.index.get(value) {
            return i;
        }
        let i = self.values.len();
        self.values.push(value.to_string());
        self.index.insert(value.to_string(), i);
        i
    }
}

enum Column {
    Nominal(Domain),
    Numeric,
}

pub fn load_csv<R: io::Read>(reader: R, options: &LoadOptions) -> Result<Table> {
    let reader = builder(options).from_reader(reader);
    read_table(reader, options, None)
}

pub fn load_csv_path<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Table> {
    let reader = builder(options).from_path(path)?;
    read_table(reader, options, None)
}

/// Loads a file whose columns follow `schema`. Values and classes the schema
/// doesn't know get fresh indices past the end of its domains.
pub fn load_csv_with_schema<R: io::Read>(
    reader: R,
    options: &LoadOptions,
    schema: &Schema,
) -> Result<Table> {
    let reader = builder(options).from_reader(reader);
    read_table(reader, options, Some(schema))
}

pub fn load_csv_path_with_schema<P: AsRef<Path>>(
    path: P,
    options: &LoadOptions,
    schema: &Schema,
) -> Result<Table> {
    let reader = builder(options).from_path(path)?;
    read_table(reader, options, Some(schema))
}

fn builder(options: &LoadOptions) -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.has_headers(options.has_headers).trim(Trim::All);
    builder
}

fn read_table<R: io::Read>(
    mut reader: csv::Reader<R>,
    options: &LoadOptions,
    schema: Option<&Schema>,
) -> Result<Table> {
    let headers = if options.has_headers {
        Some(reader.headers()?.clone())
    } else {
        None
    };

    let records = reader.records().collect::<csv::Result<Vec<StringRecord>>>()?;
    let width = match (&headers, records.first()) {
        (Some(headers), _) => headers.len(),
        (None, Some(record)) => record.len(),
        (None, None) => return Err(BayesError::invalid_dataset("file has no rows")),
    };
    if width < 2 {
        return Err(BayesError::invalid_dataset(format!(
            "expected at least one attribute and a class column, found {width} columns"
        )));
    }

    let class_column = options.class_column.unwrap_or(width - 1);
    if class_column >= width {
        return Err(BayesError::InvalidParameter(format!(
            "class column {class_column} out of range for {width} columns"
        )));
    }
    let feature_columns: Vec<usize> = (0..width).filter(|&c| c != class_column).collect();

    let column_name = |c: usize| match &headers {
        Some(headers) => headers[c].to_string(),
        None => format!("attr{c}"),
    };

    let (names, mut columns, class_name, mut classes) = match schema {
        Some(schema) => {
            if schema.attributes.len() != feature_columns.len() {
                return Err(BayesError::ShapeMismatch {
                    expected: format!("{} attributes", schema.attributes.len()),
                    got: format!("{} attributes", feature_columns.len()),
                });
            }
            let columns = schema
                .attributes
                .iter()
                .map(|attribute| match &attribute.kind {
                    AttributeKind::Nominal(values) => Column::Nominal(Domain::from_values(values)),
                    AttributeKind::Numeric => Column::Numeric,
                })
                .collect::<Vec<_>>();
            let names = schema
                .attributes
                .iter()
                .map(|attribute| attribute.name.clone())
                .collect::<Vec<_>>();
            (
                names,
                columns,
                schema.class_name.clone(),
                Domain::from_values(&schema.classes),
            )
        }
        None => {
            let columns = feature_columns
                .iter()
                .map(|_| match options.mode {
                    Mode::Categorical => Column::Nominal(Domain::default()),
                    Mode::Gaussian => Column::Numeric,
                })
                .collect::<Vec<_>>();
            let names = feature_columns
                .iter()
                .map(|&c| column_name(c))
                .collect::<Vec<_>>();
            let class_name = match &headers {
                Some(headers) => headers[class_column].to_string(),
                None => "class".to_string(),
            };
            (names, columns, class_name, Domain::default())
        }
    };

    let mut rows = Vec::with_capacity(records.len());
    let mut labels = Vec::with_capacity(records.len());
    for record in &records {
        let line = record.position().map_or(0, |position| position.line());

        let mut row = Vec::with_capacity(feature_columns.len());
        for (&c, column) in feature_columns.iter().zip(columns.iter_mut()) {
            let field = &record[c];
            let value = match column {
                Column::Nominal(domain) => Value::Category(domain.encode(field)),
                Column::Numeric => {
                    let x = field.parse::<f64>().map_err(|_| BayesError::Parse {
                        line,
                        column: c,
                        value: field.to_string(),
                    })?;
                    Value::Real(x)
                }
            };
            row.push(value);
        }

        rows.push(row);
        labels.push(classes.encode(&record[class_column]));
    }

    let attributes = names
        .into_iter()
        .zip(columns)
        .map(|(name, column)| Attribute {
            name,
            kind: match column {
                Column::Nominal(domain) => AttributeKind::Nominal(domain.values),
                Column::Numeric => AttributeKind::Numeric,
            },
        })
        .collect();

    log::info!(
        "loaded {} instances with {} attributes and {} classes",
        rows.len(),
        feature_columns.len(),
        classes.values.len()
    );

    Table::new(attributes, class_name, classes.values, rows, labels)
}
