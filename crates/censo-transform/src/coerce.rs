//! Type coercion: untyped frames into the canonical typed schema.
//!
//! Every ambiguity becomes an explicit null — an unknown flag, a sentinel
//! code, an unmapped categorical value. The one deliberate exception is
//! count columns, where absence means zero enrollments rather than
//! "unknown".

use chrono::NaiveDateTime;
use polars::prelude::{AnyValue, Column, DataFrame, DataType, TimeUnit};

use censo_model::columns::{
    COUNT_PREFIX, DATE_PREFIX, FLAG_PREFIX, INT_ID_COLUMNS, METRICA, NU_ANO_CENSO,
    STRING_ID_COLUMNS, is_categorical_column,
};
use censo_model::{DatasetKind, any_to_string, parse_f64};
use censo_standards::{Registry, SENTINEL_CODES};

use crate::error::{Result, TransformError};

/// Timestamp layout of the microdados `DT_*` columns (e.g.
/// `13JUN2022:00:00:00`).
const DATE_FORMAT: &str = "%d%b%Y:%H:%M:%S";

/// Apply canonical types to a normalized frame.
pub fn coerce(df: DataFrame, kind: DatasetKind, registry: &Registry) -> Result<DataFrame> {
    match kind {
        DatasetKind::Indicator => coerce_indicator(df),
        DatasetKind::Microdados => coerce_microdados(df, registry),
    }
}

fn coerce_indicator(mut df: DataFrame) -> Result<DataFrame> {
    cast_required(&mut df, NU_ANO_CENSO, &DataType::Int16)?;
    // Metric values stay nullable and are never range-clamped here;
    // domain validation belongs to consumers.
    cast_required(&mut df, METRICA, &DataType::Float64)?;
    Ok(df)
}

fn coerce_microdados(mut df: DataFrame, registry: &Registry) -> Result<DataFrame> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();

    // The registry gate runs before any column is touched, so a half-coerced
    // frame never escapes.
    let unmapped: Vec<String> = names
        .iter()
        .filter(|name| is_categorical_column(name) && registry.categorical(name).is_none())
        .cloned()
        .collect();
    if !unmapped.is_empty() {
        return Err(TransformError::UnmappedCategoricalColumns { columns: unmapped });
    }

    for name in &names {
        if name == NU_ANO_CENSO {
            cast_required(&mut df, name, &DataType::Int16)?;
        } else if INT_ID_COLUMNS.contains(&name.as_str()) {
            cast_required(&mut df, name, &DataType::Int64)?;
        } else if STRING_ID_COLUMNS.contains(&name.as_str()) {
            // Opaque identifiers: phone numbers, CNPJs, postal and geography
            // codes keep their source text, leading zeros included.
            let cast = df.column(name)?.cast(&DataType::String)?;
            df.with_column(cast)?;
        } else if is_categorical_column(name) {
            // Coverage was checked up front; a miss here cannot happen.
            if let Some(map) = registry.categorical(name) {
                let column = recode_categorical(&df, name, map)?;
                df.with_column(column)?;
            }
        } else if name.starts_with(FLAG_PREFIX) {
            let column = coerce_flag(&df, name)?;
            df.with_column(column)?;
        } else if name.starts_with(COUNT_PREFIX) {
            let column = coerce_count(&df, name)?;
            df.with_column(column)?;
        } else if name.starts_with(DATE_PREFIX) {
            let column = coerce_date(&df, name)?;
            df.with_column(column)?;
        }
        // Everything else (names, opaque identifier strings) stays String.
    }

    Ok(df)
}

/// Cast a column, failing loudly if the cast nulls out any value.
fn cast_required(df: &mut DataFrame, name: &str, dtype: &DataType) -> Result<()> {
    let column = df.column(name)?;
    let nulls_before = column.null_count();
    let cast = column.cast(dtype)?;
    if cast.null_count() > nulls_before {
        let offending = first_lost_value(column, &cast);
        return Err(TransformError::ValueParse {
            column: name.to_string(),
            value: offending,
        });
    }
    df.with_column(cast)?;
    Ok(())
}

fn first_lost_value(original: &Column, cast: &Column) -> String {
    for idx in 0..original.len() {
        let before = original.get(idx).unwrap_or(AnyValue::Null);
        let after = cast.get(idx).unwrap_or(AnyValue::Null);
        if !matches!(before, AnyValue::Null) && matches!(after, AnyValue::Null) {
            return any_to_string(before);
        }
    }
    String::new()
}

/// Collapse a raw categorical value to its integer code string.
///
/// Source files encode the same code as `1`, `1.0`, or `"1"` depending on
/// the year; going through float keeps them all equal.
fn collapse_code(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match parse_f64(trimmed) {
        Some(f) => Some(format!("{}", f as i64)),
        None => Some(trimmed.to_string()),
    }
}

/// Recode one categorical column through the registry table.
///
/// Sentinel codes and codes absent from the table become null — a raw code
/// must never survive into the store.
fn recode_categorical(
    df: &DataFrame,
    name: &str,
    map: &std::collections::BTreeMap<String, String>,
) -> Result<Column> {
    let column = df.column(name)?;
    let mut unmapped_values = 0usize;
    let labels: Vec<Option<String>> = (0..column.len())
        .map(|idx| {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            let code = collapse_code(&any_to_string(value))?;
            if SENTINEL_CODES.contains(&code.as_str()) {
                return None;
            }
            match map.get(&code) {
                Some(label) => Some(label.clone()),
                None => {
                    unmapped_values += 1;
                    None
                }
            }
        })
        .collect();

    if unmapped_values > 0 {
        tracing::debug!(
            column = name,
            count = unmapped_values,
            "categorical values outside the recode table mapped to null"
        );
    }

    Ok(Column::new(name.into(), labels))
}

/// Tri-state flag: 9 and missing are unknown, 0 is false, any other numeric
/// value is true.
fn coerce_flag(df: &DataFrame, name: &str) -> Result<Column> {
    let column = df.column(name)?;
    let flags: Vec<Option<bool>> = (0..column.len())
        .map(|idx| {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            let text = any_to_string(value);
            let number = parse_f64(&text)?;
            if (number - 9.0).abs() < f64::EPSILON {
                None
            } else {
                Some(number != 0.0)
            }
        })
        .collect();
    Ok(Column::new(name.into(), flags))
}

/// Count column: missing means zero enrollments, not unknown.
fn coerce_count(df: &DataFrame, name: &str) -> Result<Column> {
    let column = df.column(name)?;
    let mut counts: Vec<i32> = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        let text = any_to_string(value);
        if text.trim().is_empty() {
            counts.push(0);
            continue;
        }
        match parse_f64(&text) {
            Some(number) => counts.push(number as i32),
            None => {
                return Err(TransformError::ValueParse {
                    column: name.to_string(),
                    value: text,
                });
            }
        }
    }
    Ok(Column::new(name.into(), counts))
}

/// Timestamp column. Malformed values become null rather than failing the
/// cell; the sources carry occasional free-text noise in these fields.
fn coerce_date(df: &DataFrame, name: &str) -> Result<Column> {
    let column = df.column(name)?;
    let millis: Vec<Option<i64>> = (0..column.len())
        .map(|idx| {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            let text = any_to_string(value);
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            NaiveDateTime::parse_from_str(trimmed, DATE_FORMAT)
                .ok()
                .map(|dt| dt.and_utc().timestamp_millis())
        })
        .collect();
    let column = Column::new(name.into(), millis)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
    Ok(column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn registry() -> Registry {
        Registry::load().expect("embedded registry")
    }

    #[test]
    fn flag_sentinel_nine_is_unknown_not_false() {
        let df = df![
            "NU_ANO_CENSO" => ["2020", "2020", "2020", "2020"],
            "IN_INTERNET" => [Some("1"), Some("0"), Some("9"), None],
        ]
        .unwrap();
        let typed = coerce(df, DatasetKind::Microdados, &registry()).unwrap();
        let flags = typed.column("IN_INTERNET").unwrap();
        let flags: Vec<Option<bool>> = flags.bool().unwrap().into_iter().collect();
        assert_eq!(flags, vec![Some(true), Some(false), None, None]);
    }

    #[test]
    fn count_missing_becomes_zero() {
        let df = df![
            "NU_ANO_CENSO" => ["2020", "2020"],
            "QT_MAT_BAS" => [Some("120"), None],
        ]
        .unwrap();
        let typed = coerce(df, DatasetKind::Microdados, &registry()).unwrap();
        let counts = typed.column("QT_MAT_BAS").unwrap();
        let counts: Vec<Option<i32>> = counts.i32().unwrap().into_iter().collect();
        assert_eq!(counts, vec![Some(120), Some(0)]);
    }

    #[test]
    fn count_garbage_fails_the_cell() {
        let df = df![
            "NU_ANO_CENSO" => ["2020"],
            "QT_MAT_BAS" => ["muitos"],
        ]
        .unwrap();
        let err = coerce(df, DatasetKind::Microdados, &registry()).unwrap_err();
        assert!(matches!(err, TransformError::ValueParse { .. }));
    }

    #[test]
    fn categorical_codes_recode_and_sentinels_null() {
        let df = df![
            "NU_ANO_CENSO" => ["2020", "2020", "2020", "2020", "2020"],
            "TP_DEPENDENCIA" => [Some("1"), Some("4.0"), Some("9"), Some("-1"), None],
        ]
        .unwrap();
        let typed = coerce(df, DatasetKind::Microdados, &registry()).unwrap();
        let labels = typed.column("TP_DEPENDENCIA").unwrap();
        let labels: Vec<Option<&str>> = labels.str().unwrap().into_iter().collect();
        assert_eq!(
            labels,
            vec![Some("Federal"), Some("Privada"), None, None, None]
        );
    }

    #[test]
    fn unmapped_categorical_column_is_fatal() {
        let df = df![
            "NU_ANO_CENSO" => ["2020"],
            "TP_COLUNA_NOVA" => ["1"],
            "TP_OUTRA_NOVA" => ["2"],
        ]
        .unwrap();
        let err = coerce(df, DatasetKind::Microdados, &registry()).unwrap_err();
        match err {
            TransformError::UnmappedCategoricalColumns { columns } => {
                assert_eq!(columns, vec!["TP_COLUNA_NOVA", "TP_OUTRA_NOVA"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn identifier_and_year_casts() {
        let df = df![
            "NU_ANO_CENSO" => ["2020"],
            "CO_ENTIDADE" => ["11000023"],
            "CO_MUNICIPIO" => ["1100023"],
            "CO_CEP" => ["69900000"],
        ]
        .unwrap();
        let typed = coerce(df, DatasetKind::Microdados, &registry()).unwrap();
        assert_eq!(typed.column("NU_ANO_CENSO").unwrap().dtype(), &DataType::Int16);
        assert_eq!(typed.column("CO_ENTIDADE").unwrap().dtype(), &DataType::Int64);
        assert_eq!(typed.column("CO_MUNICIPIO").unwrap().dtype(), &DataType::Int64);
        // Opaque identifiers stay strings.
        assert_eq!(typed.column("CO_CEP").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn date_columns_parse_and_tolerate_noise() {
        let df = df![
            "NU_ANO_CENSO" => ["2020", "2020", "2020"],
            "DT_ANO_LETIVO_INICIO" => [Some("03FEB2020:00:00:00"), Some("not a date"), None],
        ]
        .unwrap();
        let typed = coerce(df, DatasetKind::Microdados, &registry()).unwrap();
        let dates = typed.column("DT_ANO_LETIVO_INICIO").unwrap();
        assert_eq!(
            dates.dtype(),
            &DataType::Datetime(TimeUnit::Milliseconds, None)
        );
        assert_eq!(dates.null_count(), 2);
    }

    #[test]
    fn indicator_frame_gets_year_and_metric_types() {
        let df = df![
            "NU_ANO_CENSO" => ["2016", "2016"],
            "TP_GRUPO" => ["Nível 1", "Nível 2"],
            "METRICA" => [Some("10.5"), None],
        ]
        .unwrap();
        let typed = coerce(df, DatasetKind::Indicator, &registry()).unwrap();
        assert_eq!(typed.column("NU_ANO_CENSO").unwrap().dtype(), &DataType::Int16);
        assert_eq!(typed.column("METRICA").unwrap().dtype(), &DataType::Float64);
        let metrica: Vec<Option<f64>> =
            typed.column("METRICA").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(metrica, vec![Some(10.5), None]);
        // Indicator frames have no microdados prefixes; group labels pass through.
        assert_eq!(typed.column("TP_GRUPO").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn year_garbage_fails_required_cast() {
        let df = df![
            "NU_ANO_CENSO" => ["two thousand"],
            "METRICA" => ["1.0"],
        ]
        .unwrap();
        let err = coerce(df, DatasetKind::Indicator, &registry()).unwrap_err();
        assert!(matches!(err, TransformError::ValueParse { .. }));
    }
}
