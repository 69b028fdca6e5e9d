//! Tagged-variant representation of nested statistical data
//!
//! Statistical-language objects (nested lists, vectors, data frames) are
//! modeled as an explicit sum type with one recursive conversion per
//! variant, instead of runtime type inspection. Tables are carried as
//! polars `DataFrame`s and serialize in rows-of-objects form.

use std::collections::BTreeMap;

use polars::prelude::*;
use serde_json::{json, Map, Value};

use crate::{PlotkitError, Result};

/// A nested statistical data value.
///
/// `Vector` holds homogeneous scalars; heterogeneous or nested collections
/// belong in `List`. Converting a `Vector` with non-scalar elements to its
/// serialized form is an `UnsupportedType` error, never a partial
/// conversion.
#[derive(Debug, Clone)]
pub enum DataValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Homogeneous array of scalar values
    Vector(Vec<DataValue>),
    /// Named mapping of nested values
    List(BTreeMap<String, DataValue>),
    /// Tabular data
    Table(DataFrame),
}

impl PartialEq for DataValue {
    fn eq(&self, other: &Self) -> bool {
        use DataValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (Vector(a), Vector(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Table(a), Table(b)) => a.equals_missing(b),
            _ => false,
        }
    }
}

impl DataValue {
    /// Human-readable variant name, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Null => "null",
            DataValue::Bool(_) => "bool",
            DataValue::Int(_) => "int",
            DataValue::Float(_) => "float",
            DataValue::Str(_) => "string",
            DataValue::Vector(_) => "vector",
            DataValue::List(_) => "list",
            DataValue::Table(_) => "table",
        }
    }

    /// True for the scalar variants (including null)
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            DataValue::Null
                | DataValue::Bool(_)
                | DataValue::Int(_)
                | DataValue::Float(_)
                | DataValue::Str(_)
        )
    }

    /// Convert to a serde_json::Value
    ///
    /// Fails with `UnsupportedType` if a vector holds non-scalar elements
    /// or a table column has a dtype outside the supported set.
    pub fn to_json(&self) -> Result<Value> {
        match self {
            DataValue::Null => Ok(Value::Null),
            DataValue::Bool(b) => Ok(json!(b)),
            DataValue::Int(i) => Ok(json!(i)),
            DataValue::Float(f) => Ok(json!(f)),
            DataValue::Str(s) => Ok(json!(s)),
            DataValue::Vector(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    if !item.is_scalar() {
                        return Err(PlotkitError::UnsupportedType(format!(
                            "Vectors may only hold scalars, found {}",
                            item.type_name()
                        )));
                    }
                    out.push(item.to_json()?);
                }
                Ok(Value::Array(out))
            }
            DataValue::List(map) => {
                let mut obj = Map::new();
                for (key, value) in map {
                    obj.insert(key.clone(), value.to_json()?);
                }
                Ok(Value::Object(obj))
            }
            DataValue::Table(df) => dataframe_to_rows(df),
        }
    }

    /// Build a `DataValue` from a serde_json::Value, recursively.
    ///
    /// Objects become lists; arrays of objects sharing one scalar-valued
    /// key set become tables; remaining arrays become vectors.
    pub fn from_json(value: &Value) -> Result<DataValue> {
        match value {
            Value::Null => Ok(DataValue::Null),
            Value::Bool(b) => Ok(DataValue::Bool(*b)),
            Value::Number(n) => Ok(match n.as_i64() {
                Some(i) => DataValue::Int(i),
                None => DataValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            Value::String(s) => Ok(DataValue::Str(s.clone())),
            Value::Array(items) => {
                if is_table_rows(items) {
                    Ok(DataValue::Table(table_from_rows(items)?))
                } else {
                    items
                        .iter()
                        .map(DataValue::from_json)
                        .collect::<Result<Vec<_>>>()
                        .map(DataValue::Vector)
                }
            }
            Value::Object(obj) => obj
                .iter()
                .map(|(k, v)| Ok((k.clone(), DataValue::from_json(v)?)))
                .collect::<Result<BTreeMap<_, _>>>()
                .map(DataValue::List),
        }
    }

    /// Collapse singleton vectors to their scalar, recursively.
    ///
    /// A one-element vector represents a scalar in the source language's
    /// vector-everything model; loading reduces it back.
    pub fn reduce(self) -> DataValue {
        match self {
            DataValue::Vector(items) => {
                let mut items: Vec<DataValue> =
                    items.into_iter().map(DataValue::reduce).collect();
                if items.len() == 1 {
                    items.pop().unwrap()
                } else {
                    DataValue::Vector(items)
                }
            }
            DataValue::List(map) => {
                DataValue::List(map.into_iter().map(|(k, v)| (k, v.reduce())).collect())
            }
            other => other,
        }
    }
}

impl From<bool> for DataValue {
    fn from(value: bool) -> Self {
        DataValue::Bool(value)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Int(value)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Float(value)
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::Str(value.to_string())
    }
}

/// Convert a DataFrame to its serialized rows-of-objects form
fn dataframe_to_rows(df: &DataFrame) -> Result<Value> {
    let mut rows = Vec::with_capacity(df.height());
    let column_names = df.get_column_names();

    for row_idx in 0..df.height() {
        let mut row_obj = Map::new();
        for (col_idx, col_name) in column_names.iter().enumerate() {
            let column = df.get_columns().get(col_idx).ok_or_else(|| {
                PlotkitError::DataError(format!("Failed to get column {}", col_name))
            })?;
            let value = series_value_at(column.as_materialized_series(), row_idx)?;
            row_obj.insert(col_name.to_string(), value);
        }
        rows.push(Value::Object(row_obj));
    }

    Ok(Value::Array(rows))
}

/// Get a single value from a series at a given index as JSON Value
fn series_value_at(series: &Series, idx: usize) -> Result<Value> {
    use DataType::*;

    macro_rules! cell {
        ($accessor:ident, $name:literal) => {{
            let ca = series.$accessor().map_err(|e| {
                PlotkitError::DataError(format!(concat!("Failed to cast to ", $name, ": {}"), e))
            })?;
            Ok(ca.get(idx).map(|v| json!(v)).unwrap_or(Value::Null))
        }};
    }

    match series.dtype() {
        Int8 => cell!(i8, "i8"),
        Int16 => cell!(i16, "i16"),
        Int32 => cell!(i32, "i32"),
        Int64 => cell!(i64, "i64"),
        UInt8 => cell!(u8, "u8"),
        UInt16 => cell!(u16, "u16"),
        UInt32 => cell!(u32, "u32"),
        UInt64 => cell!(u64, "u64"),
        Float32 => cell!(f32, "f32"),
        Float64 => cell!(f64, "f64"),
        Boolean => cell!(bool, "bool"),
        String => cell!(str, "str"),
        other => Err(PlotkitError::UnsupportedType(format!(
            "Cannot serialize table column of type {:?}",
            other
        ))),
    }
}

/// True if the array is in rows-of-objects table form: non-empty, every
/// element an object, every object sharing the first object's key set,
/// and every cell a scalar.
fn is_table_rows(items: &[Value]) -> bool {
    let first_keys: Vec<&std::string::String> = match items.first() {
        Some(Value::Object(obj)) => obj.keys().collect(),
        _ => return false,
    };
    items.iter().all(|item| match item {
        Value::Object(obj) => {
            obj.keys().collect::<Vec<_>>() == first_keys
                && obj
                    .values()
                    .all(|v| !matches!(v, Value::Array(_) | Value::Object(_)))
        }
        _ => false,
    })
}

/// Inferred column type during table reconstruction
#[derive(Debug, Clone, Copy, PartialEq)]
enum CellType {
    Int,
    Float,
    Bool,
    Str,
}

/// Rebuild a DataFrame from its rows-of-objects form
fn table_from_rows(rows: &[Value]) -> Result<DataFrame> {
    let first = match rows.first() {
        Some(Value::Object(obj)) => obj,
        _ => {
            return Err(PlotkitError::DataError(
                "Table rows must be objects".to_string(),
            ))
        }
    };
    let names: Vec<std::string::String> = first.keys().cloned().collect();

    let mut columns: Vec<Column> = Vec::with_capacity(names.len());
    for name in &names {
        let cells: Vec<&Value> = rows
            .iter()
            .map(|row| match row {
                Value::Object(obj) => obj.get(name).unwrap_or(&Value::Null),
                _ => &Value::Null,
            })
            .collect();
        columns.push(build_column(name, &cells)?);
    }

    DataFrame::new(columns)
        .map_err(|e| PlotkitError::DataError(format!("Failed to build table: {}", e)))
}

/// Infer a column's type from its cells and build a typed series
fn build_column(name: &str, cells: &[&Value]) -> Result<Column> {
    let mut cell_type: Option<CellType> = None;
    for cell in cells {
        let ty = match cell {
            Value::Null => continue,
            Value::Bool(_) => CellType::Bool,
            Value::Number(n) if n.as_i64().is_some() => CellType::Int,
            Value::Number(_) => CellType::Float,
            Value::String(_) => CellType::Str,
            other => {
                return Err(PlotkitError::UnsupportedType(format!(
                    "Unsupported table cell in column '{}': {}",
                    name, other
                )))
            }
        };
        cell_type = Some(match (cell_type, ty) {
            (None, ty) => ty,
            (Some(prev), ty) if prev == ty => ty,
            // Integers widen to float when the column mixes both.
            (Some(CellType::Int), CellType::Float) | (Some(CellType::Float), CellType::Int) => {
                CellType::Float
            }
            (Some(prev), ty) => {
                return Err(PlotkitError::DataError(format!(
                    "Mixed types in table column '{}': {:?} and {:?}",
                    name, prev, ty
                )))
            }
        });
    }

    // A column of nothing but nulls carries no type information; store it
    // as floats, the source language's NA default.
    let series = match cell_type.unwrap_or(CellType::Float) {
        CellType::Int => {
            let values: Vec<Option<i64>> = cells.iter().map(|c| c.as_i64()).collect();
            Series::new(name.into(), values)
        }
        CellType::Float => {
            let values: Vec<Option<f64>> = cells.iter().map(|c| c.as_f64()).collect();
            Series::new(name.into(), values)
        }
        CellType::Bool => {
            let values: Vec<Option<bool>> = cells.iter().map(|c| c.as_bool()).collect();
            Series::new(name.into(), values)
        }
        CellType::Str => {
            let values: Vec<Option<std::string::String>> = cells
                .iter()
                .map(|c| c.as_str().map(|s| s.to_string()))
                .collect();
            Series::new(name.into(), values)
        }
    };
    Ok(series.into_column())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> DataFrame {
        let n = Series::new("n".into(), vec![Some(1i64), Some(2), None]);
        let x = Series::new("x".into(), vec![Some(1.5f64), Some(2.5), None]);
        let s = Series::new(
            "s".into(),
            vec![Some("a".to_string()), None, Some("c".to_string())],
        );
        let b = Series::new("b".into(), vec![Some(true), Some(false), None]);
        DataFrame::new(vec![
            n.into_column(),
            x.into_column(),
            s.into_column(),
            b.into_column(),
        ])
        .unwrap()
    }

    // ==================== Scalar Conversion Tests ====================

    #[test]
    fn test_scalar_json_roundtrip() {
        let cases = [
            DataValue::Null,
            DataValue::Bool(true),
            DataValue::Int(-7),
            DataValue::Float(2.5),
            DataValue::Str("hello".to_string()),
        ];
        for value in cases {
            let json = value.to_json().unwrap();
            let back = DataValue::from_json(&json).unwrap();
            assert_eq!(back, value);
        }
    }

    #[test]
    fn test_from_impls() {
        assert_eq!(DataValue::from(3i64), DataValue::Int(3));
        assert_eq!(DataValue::from(2.5), DataValue::Float(2.5));
        assert_eq!(DataValue::from(true), DataValue::Bool(true));
        assert_eq!(DataValue::from("x"), DataValue::Str("x".to_string()));
    }

    // ==================== Vector and List Tests ====================

    #[test]
    fn test_vector_roundtrip() {
        let value = DataValue::Vector(vec![
            DataValue::Int(1),
            DataValue::Int(2),
            DataValue::Int(3),
        ]);
        let back = DataValue::from_json(&value.to_json().unwrap()).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_nested_list_roundtrip() {
        let mut inner = BTreeMap::new();
        inner.insert("pi".to_string(), DataValue::Float(3.14));
        let mut outer = BTreeMap::new();
        outer.insert("consts".to_string(), DataValue::List(inner));
        outer.insert(
            "flags".to_string(),
            DataValue::Vector(vec![DataValue::Bool(true), DataValue::Bool(false)]),
        );
        outer.insert("name".to_string(), DataValue::Str("demo".to_string()));

        let value = DataValue::List(outer);
        let back = DataValue::from_json(&value.to_json().unwrap()).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_vector_with_non_scalar_is_unsupported() {
        let value = DataValue::Vector(vec![
            DataValue::Int(1),
            DataValue::List(BTreeMap::new()),
        ]);
        assert!(matches!(
            value.to_json(),
            Err(PlotkitError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_singleton_reduction() {
        let json = serde_json::json!({ "a": [5], "b": [1, 2] });
        let value = DataValue::from_json(&json).unwrap().reduce();
        let DataValue::List(map) = value else {
            panic!("expected list");
        };
        assert_eq!(map["a"], DataValue::Int(5));
        assert_eq!(
            map["b"],
            DataValue::Vector(vec![DataValue::Int(1), DataValue::Int(2)])
        );
    }

    // ==================== Table Tests ====================

    #[test]
    fn test_table_roundtrip() {
        let value = DataValue::Table(sample_table());
        let json = value.to_json().unwrap();
        let back = DataValue::from_json(&json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_table_serializes_as_rows() {
        let json = DataValue::Table(sample_table()).to_json().unwrap();
        let rows = json.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["n"], serde_json::json!(1));
        assert_eq!(rows[0]["x"], serde_json::json!(1.5));
        assert_eq!(rows[2]["n"], Value::Null);
    }

    #[test]
    fn test_table_column_order_preserved() {
        let json = DataValue::Table(sample_table()).to_json().unwrap();
        let keys: Vec<&str> = json.as_array().unwrap()[0]
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        assert_eq!(keys, vec!["n", "x", "s", "b"]);
    }

    #[test]
    fn test_int_float_column_widens() {
        let json = serde_json::json!([{ "v": 1 }, { "v": 2.5 }]);
        let DataValue::Table(df) = DataValue::from_json(&json).unwrap() else {
            panic!("expected table");
        };
        assert_eq!(df.column("v").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_mixed_column_type_is_error() {
        let json = serde_json::json!([{ "v": 1 }, { "v": "x" }]);
        assert!(matches!(
            DataValue::from_json(&json),
            Err(PlotkitError::DataError(_))
        ));
    }

    #[test]
    fn test_objects_with_differing_keys_are_not_a_table() {
        let json = serde_json::json!([{ "a": 1 }, { "b": 2 }]);
        let value = DataValue::from_json(&json).unwrap();
        assert_eq!(value.type_name(), "vector");
    }

    #[test]
    fn test_objects_with_nested_values_are_not_a_table() {
        let json = serde_json::json!([{ "a": { "b": 1 } }, { "a": { "b": 2 } }]);
        let value = DataValue::from_json(&json).unwrap();
        assert_eq!(value.type_name(), "vector");
    }
}
