//! Tabular data passed into and out of [`classify`](crate::classify).
//!
//! A [`Frame`] is an ordered list of named columns over rows of JSON cells.
//! Input frames need a `text` column; training frames need `text` and
//! `label`. Results are the input frame with the prediction column appended.
//!
//! # Examples
//!
//! ```
//! use tailwiz::frame::{Frame, Label};
//!
//! let training = Frame::from_labeled(vec![("You are ugly", 0), ("Lovely weather today!", 1)]);
//! assert_eq!(training.len(), 2);
//! assert_eq!(training.columns(), &["text".to_string(), "label".to_string()]);
//!
//! let labels = training.labels("label").unwrap();
//! assert_eq!(labels, vec![Label::from(0), Label::from(1)]);
//! ```

use std::cmp::Ordering;
use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{Result, TailwizError};

/// Default name of the text column.
pub const TEXT_COLUMN: &str = "text";

/// Default name of the label column in training frames.
pub const LABEL_COLUMN: &str = "label";

/// Name of the column holding predicted labels.
pub const PREDICTION_COLUMN: &str = "label_from_tailwiz";

/// A class label.
///
/// Integers cover the common case of `0..N` class ids; text labels are kept
/// for tables that name their classes. Integers order before text.
///
/// Deserializing reads any string that parses as an `i64` as [`Label::Int`],
/// because JSON object keys (as in serialized [`Metrics`](crate::Metrics))
/// are always strings. A text label such as `"5"` therefore reads back as
/// `Label::Int(5)`. [`Label::from_value`] keeps table cells as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// Integer class id.
    Int(i64),
    /// Named class.
    Text(String),
}

impl Label {
    /// Interpret a JSON cell as a label.
    ///
    /// Integral numbers (including floats such as `1.0`) become [`Label::Int`],
    /// booleans become `0`/`1`, strings become [`Label::Text`]. Numbers outside
    /// the `i64` range are rejected rather than saturated.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Ok(Label::Int(i));
                }
                if n.is_u64() {
                    return Err(TailwizError::invalid_label(format!(
                        "{n} does not fit in a signed 64-bit integer"
                    )));
                }
                // `i64::MAX as f64` rounds up to 2^63, hence the strict bound.
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                        Ok(Label::Int(f as i64))
                    }
                    _ => Err(TailwizError::invalid_label(n.to_string())),
                }
            }
            Value::Bool(b) => Ok(Label::Int(i64::from(*b))),
            Value::String(s) => Ok(Label::Text(s.clone())),
            other => Err(TailwizError::invalid_label(other.to_string())),
        }
    }

    /// Convert this label back into a JSON cell.
    pub fn to_value(&self) -> Value {
        match self {
            Label::Int(i) => Value::from(*i),
            Label::Text(s) => Value::String(s.clone()),
        }
    }

    /// The integer id, if this is an integer label.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Label::Int(i) => Some(*i),
            Label::Text(_) => None,
        }
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Label::Int(a), Label::Int(b)) => a.cmp(b),
            (Label::Text(a), Label::Text(b)) => a.cmp(b),
            (Label::Int(_), Label::Text(_)) => Ordering::Less,
            (Label::Text(_), Label::Int(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(i) => write!(f, "{i}"),
            Label::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Int(value)
    }
}

impl From<i32> for Label {
    fn from(value: i32) -> Self {
        Label::Int(i64::from(value))
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Text(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Text(value)
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Label::Int(i) => serializer.serialize_i64(*i),
            Label::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        // Map keys arrive as strings; recover integer ids written by `serialize`.
        if let Value::String(s) = &value {
            if let Ok(i) = s.parse::<i64>() {
                return Ok(Label::Int(i));
            }
        }
        Label::from_value(&value).map_err(de::Error::custom)
    }
}

/// A training example: text plus its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledText {
    /// Example text.
    pub text: String,
    /// Class label.
    pub label: Label,
}

impl LabeledText {
    /// Create a new labeled example.
    pub fn new<T: Into<String>, L: Into<Label>>(text: T, label: L) -> Self {
        LabeledText {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// An ordered table of JSON cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Frame {
    /// Create an empty frame with the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Frame {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Create a single-column `text` frame.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Frame {
            columns: vec![TEXT_COLUMN.to_string()],
            rows: texts
                .into_iter()
                .map(|text| vec![Value::String(text.into())])
                .collect(),
        }
    }

    /// Create a `text`/`label` training frame.
    pub fn from_labeled<I, S, L>(examples: I) -> Self
    where
        I: IntoIterator<Item = (S, L)>,
        S: Into<String>,
        L: Into<Label>,
    {
        Frame {
            columns: vec![TEXT_COLUMN.to_string(), LABEL_COLUMN.to_string()],
            rows: examples
                .into_iter()
                .map(|(text, label)| vec![Value::String(text.into()), label.into().to_value()])
                .collect(),
        }
    }

    /// Build a frame from JSON objects.
    ///
    /// Columns appear in the order their keys are first seen; absent cells are null.
    pub fn from_records(records: Vec<Map<String, Value>>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|column| record.remove(column).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Frame { columns, rows }
    }

    /// Convert the frame into JSON objects, one per row.
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect::<Map<String, Value>>()
            })
            .collect()
    }

    /// Append a row. The row must have one cell per column.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(TailwizError::invalid_argument(format!(
                "row has {} cells but frame has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Whether the frame has the named column.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| TailwizError::missing_column(name))
    }

    /// All cells of one column.
    pub fn column(&self, name: &str) -> Result<Vec<&Value>> {
        let index = self.require_column(name)?;
        Ok(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// A single cell.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let index = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[index])
    }

    /// The named column read as text.
    ///
    /// Strings are taken as is, null becomes the empty string and any other
    /// cell is rendered as JSON.
    pub fn texts(&self, column: &str) -> Result<Vec<String>> {
        Ok(self
            .column(column)?
            .into_iter()
            .map(|value| match value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect())
    }

    /// The named column read as labels.
    pub fn labels(&self, column: &str) -> Result<Vec<Label>> {
        self.column(column)?
            .into_iter()
            .map(Label::from_value)
            .collect()
    }

    /// Extract training examples from a text column and a label column.
    pub fn labeled_texts(&self, text_column: &str, label_column: &str) -> Result<Vec<LabeledText>> {
        let texts = self.texts(text_column)?;
        let labels = self.labels(label_column)?;
        Ok(texts
            .into_iter()
            .zip(labels)
            .map(|(text, label)| LabeledText { text, label })
            .collect())
    }

    /// Return a copy of this frame with `name` set to `values`.
    ///
    /// An existing column of that name is overwritten in place; otherwise the
    /// column is appended. `values` must have one entry per row.
    pub fn with_column(&self, name: &str, values: Vec<Value>) -> Result<Frame> {
        if values.len() != self.rows.len() {
            return Err(TailwizError::invalid_argument(format!(
                "column '{name}' has {} values but frame has {} rows",
                values.len(),
                self.rows.len()
            )));
        }

        let mut frame = self.clone();
        match frame.column_index(name) {
            Some(index) => {
                for (row, value) in frame.rows.iter_mut().zip(values) {
                    row[index] = value;
                }
            }
            None => {
                frame.columns.push(name.to_string());
                for (row, value) in frame.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(frame)
    }
}

impl Serialize for Frame {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_records().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Frame {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let records = Vec::<Map<String, Value>>::deserialize(deserializer)?;
        Ok(Frame::from_records(records))
    }
}
