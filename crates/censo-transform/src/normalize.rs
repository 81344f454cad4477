//! Schema normalization: raw wide frames into the canonical long layout.
//!
//! Header text varies across years but column *position* is stable within an
//! era, so identifier renaming is positional. Trailing metric columns are
//! matched positionally against the era's canonical group labels and melted
//! into (group, value) rows.

use polars::prelude::{Column, DataFrame};

use censo_model::columns::{
    INDICATOR_ID_COLUMNS, METRICA, NO_CATEGORIA, NO_DEPENDENCIA, NO_GEOGRAFIA, NO_INDICADOR,
    NO_PAIS, NU_ANO_CENSO, PAIS_BRASIL, SG_INDICADOR, TP_GRUPO, TP_NIVEL_GEOGRAFICO,
};
use censo_model::{GeographyBase, GeographyLevel};
use censo_standards::IndicatorDescriptor;

use crate::error::{Result, TransformError};

/// Canonical identifier columns of the long frame, in output order.
const LONG_ID_COLUMNS: [&str; 8] = [
    NU_ANO_CENSO,
    NO_PAIS,
    NO_GEOGRAFIA,
    TP_NIVEL_GEOGRAFICO,
    NO_CATEGORIA,
    NO_DEPENDENCIA,
    SG_INDICADOR,
    NO_INDICADOR,
];

/// Leading-column layout of one geography base.
///
/// Municipality workbooks prepend region/state/municipality-code columns the
/// aggregate workbooks do not have; dropping them first leaves both bases
/// with the same four identifier positions.
struct BaseLayout {
    leading: usize,
    dropped: &'static [usize],
}

fn base_layout(base: GeographyBase) -> BaseLayout {
    match base {
        GeographyBase::BrasilRegioesUfs => BaseLayout {
            leading: 4,
            dropped: &[],
        },
        GeographyBase::Municipios => BaseLayout {
            leading: 7,
            dropped: &[1, 2, 3],
        },
    }
}

/// Normalize one raw indicator frame into canonical long form.
///
/// Steps, in required order: drop the base-specific leading columns, rename
/// the remaining identifiers positionally, insert the derived columns,
/// verify the trailing width against the registry era, slice this
/// indicator's group block, and melt it into long rows.
pub fn normalize_indicator(
    raw: &DataFrame,
    descriptor: &IndicatorDescriptor,
    base: GeographyBase,
    year: i32,
) -> Result<DataFrame> {
    let era = descriptor.era_for(year)?;
    let layout = base_layout(base);

    let names: Vec<String> = raw
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();

    let trailing = names.len().saturating_sub(layout.leading);
    if names.len() < layout.leading || trailing != era.trailing_width() {
        return Err(TransformError::GroupCountMismatch {
            indicator: descriptor.code.clone(),
            year,
            expected: era.trailing_width(),
            actual: trailing,
        });
    }

    // Drop the base-specific extras, keep everything else in position.
    let kept: Vec<&str> = names
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx >= layout.leading || !layout.dropped.contains(idx))
        .map(|(_, name)| name.as_str())
        .collect();
    let mut df = raw.select(kept.iter().copied())?;

    // Positional rename of the identifier columns.
    let kept_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    for (old, new) in kept_names.iter().zip(INDICATOR_ID_COLUMNS) {
        df.rename(old, new.into())?;
    }

    tracing::debug!(
        indicator = %descriptor.code,
        base = %base,
        year,
        rows = df.height(),
        groups = era.groups.len(),
        "normalizing indicator frame"
    );

    let df = insert_derived_columns(df, descriptor, base)?;

    // This indicator's slice of the trailing block. Shared workbooks carry
    // several indicators side by side; offset selects the right one.
    let trailing_names: Vec<String> = df
        .get_column_names()
        .iter()
        .skip(LONG_ID_COLUMNS.len())
        .map(|n| n.to_string())
        .collect();
    let block = &trailing_names[era.group_offset..era.group_offset + era.groups.len()];

    melt_groups(&df, block, &era.groups)
}

/// Indicator name/code, country label, and the geography-level tag.
fn insert_derived_columns(
    mut df: DataFrame,
    descriptor: &IndicatorDescriptor,
    base: GeographyBase,
) -> Result<DataFrame> {
    let height = df.height();

    let level: Vec<Option<&str>> = match base {
        GeographyBase::Municipios => vec![Some(GeographyLevel::Municipio.label()); height],
        GeographyBase::BrasilRegioesUfs => df
            .column(NO_GEOGRAFIA)?
            .str()?
            .into_iter()
            .map(|name| name.map(|n| GeographyLevel::classify(n).label()))
            .collect(),
    };

    df.with_column(Column::new(NO_PAIS.into(), vec![PAIS_BRASIL; height]))?;
    df.with_column(Column::new(TP_NIVEL_GEOGRAFICO.into(), level))?;
    df.with_column(Column::new(
        SG_INDICADOR.into(),
        vec![descriptor.code.as_str(); height],
    ))?;
    df.with_column(Column::new(
        NO_INDICADOR.into(),
        vec![descriptor.name.as_str(); height],
    ))?;

    // Canonical identifier order, trailing block untouched behind it.
    let trailing: Vec<&str> = df
        .get_column_names()
        .iter()
        .map(|n| n.as_str())
        .filter(|n| !LONG_ID_COLUMNS.contains(n))
        .collect();
    let ordered: Vec<&str> = LONG_ID_COLUMNS.iter().copied().chain(trailing).collect();
    Ok(df.select(ordered)?)
}

/// Melt the group block into (`TP_GRUPO`, `METRICA`) long rows.
///
/// Values stay untyped strings here; the coercer owns the float cast.
fn melt_groups(df: &DataFrame, block: &[String], labels: &[String]) -> Result<DataFrame> {
    let mut out: Option<DataFrame> = None;
    for (raw_name, label) in block.iter().zip(labels) {
        let mut part = df.select(LONG_ID_COLUMNS)?;
        part.with_column(Column::new(
            TP_GRUPO.into(),
            vec![label.as_str(); df.height()],
        ))?;
        let mut value = df.column(raw_name.as_str())?.clone();
        value.rename(METRICA.into());
        part.with_column(value)?;

        match out.as_mut() {
            None => out = Some(part),
            Some(acc) => acc.vstack_mut(&part).map(|_| ())?,
        }
    }
    out.ok_or_else(|| TransformError::Frame {
        message: "indicator era declares no groups".to_string(),
    })
}

/// Row-concatenate the normalized frames of every geography base for one
/// (indicator, year) cell.
pub fn concat_bases(frames: Vec<DataFrame>) -> Result<DataFrame> {
    let mut iter = frames.into_iter();
    let Some(mut acc) = iter.next() else {
        return Err(TransformError::Frame {
            message: "no geography base produced a frame".to_string(),
        });
    };
    for frame in iter {
        acc.vstack_mut(&frame).map(|_| ())?;
    }
    Ok(acc)
}

/// Microdados is already one row per school; normalization only checks the
/// partition key is present.
pub fn normalize_microdados(raw: DataFrame) -> Result<DataFrame> {
    if raw.column(NU_ANO_CENSO).is_err() {
        return Err(TransformError::MissingColumn {
            column: NU_ANO_CENSO.to_string(),
        });
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn descriptor(groups: &[&str]) -> IndicatorDescriptor {
        let groups: Vec<String> = groups.iter().map(|g| (*g).to_string()).collect();
        IndicatorDescriptor {
            code: "ATU".to_string(),
            name: "Média de Alunos por Turma".to_string(),
            skip_profile: censo_standards::SkipProfile::Rows8x6,
            source_file: "ATU".to_string(),
            eras: vec![censo_standards::Era {
                first_year: 2016,
                last_year: 2022,
                group_offset: 0,
                expected_trailing: None,
                groups,
            }],
        }
    }

    fn aggregate_raw() -> DataFrame {
        df![
            "Ano" => ["2016", "2016", "2016"],
            "Unidade Geográfica" => ["Brasil", "Norte", "Acre"],
            "Localização" => ["Urbana", "Urbana", "Rural"],
            "Dependência Administrativa" => ["Federal", "Total", "Estadual"],
            "Creche" => [Some("21.4"), None, Some("18.0")],
            "Pré-Escola" => [Some("17.8"), Some("16.1"), None],
        ]
        .unwrap()
    }

    #[test]
    fn aggregate_base_melts_to_long_rows() {
        let desc = descriptor(&["Creche", "Pré-Escola"]);
        let long =
            normalize_indicator(&aggregate_raw(), &desc, GeographyBase::BrasilRegioesUfs, 2016)
                .unwrap();

        assert_eq!(long.height(), 6);
        let names: Vec<&str> = long.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                NU_ANO_CENSO,
                NO_PAIS,
                NO_GEOGRAFIA,
                TP_NIVEL_GEOGRAFICO,
                NO_CATEGORIA,
                NO_DEPENDENCIA,
                SG_INDICADOR,
                NO_INDICADOR,
                TP_GRUPO,
                METRICA,
            ]
        );

        let level = long.column(TP_NIVEL_GEOGRAFICO).unwrap();
        let level: Vec<Option<&str>> = level.str().unwrap().into_iter().collect();
        assert_eq!(&level[..3], &[Some("País"), Some("Região"), Some("UF")]);

        let grupo = long.column(TP_GRUPO).unwrap();
        assert_eq!(grupo.str().unwrap().get(0), Some("Creche"));
        assert_eq!(grupo.str().unwrap().get(3), Some("Pré-Escola"));
    }

    #[test]
    fn extra_trailing_column_is_schema_drift() {
        let mut raw = aggregate_raw();
        raw.with_column(Column::new(
            "Série Nova".into(),
            vec!["1.0", "2.0", "3.0"],
        ))
        .unwrap();

        let desc = descriptor(&["Creche", "Pré-Escola"]);
        let err =
            normalize_indicator(&raw, &desc, GeographyBase::BrasilRegioesUfs, 2016).unwrap_err();
        match err {
            TransformError::GroupCountMismatch {
                expected, actual, ..
            } => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn municipality_base_drops_extras_and_tags_level() {
        let raw = df![
            "Ano" => ["2016"],
            "Região" => ["Norte"],
            "UF" => ["RO"],
            "Código do Município" => ["1100023"],
            "Nome do Município" => ["Ariquemes"],
            "Localização" => ["Urbana"],
            "Dependência" => ["Municipal"],
            "Creche" => ["19.5"],
            "Pré-Escola" => ["17.0"],
        ]
        .unwrap();

        let desc = descriptor(&["Creche", "Pré-Escola"]);
        let long = normalize_indicator(&raw, &desc, GeographyBase::Municipios, 2016).unwrap();

        assert_eq!(long.height(), 2);
        let geo = long.column(NO_GEOGRAFIA).unwrap();
        assert_eq!(geo.str().unwrap().get(0), Some("Ariquemes"));
        let level = long.column(TP_NIVEL_GEOGRAFICO).unwrap();
        assert_eq!(level.str().unwrap().get(0), Some("Município"));
    }

    #[test]
    fn shared_workbook_slices_by_offset() {
        let raw = df![
            "Ano" => ["2016"],
            "Unidade Geográfica" => ["Brasil"],
            "Localização" => ["Total"],
            "Dependência" => ["Total"],
            "Fundamental" => ["91.0"],
            "Médio" => ["84.2"],
            "Fundamental.1" => ["6.5"],
            "Médio.1" => ["10.1"],
        ]
        .unwrap();

        let mut desc = descriptor(&["Ensino Fundamental", "Ensino Médio"]);
        desc.code = "TRP".to_string();
        desc.eras[0].group_offset = 2;
        desc.eras[0].expected_trailing = Some(4);

        let long =
            normalize_indicator(&raw, &desc, GeographyBase::BrasilRegioesUfs, 2016).unwrap();
        assert_eq!(long.height(), 2);
        let metrica = long.column(METRICA).unwrap();
        assert_eq!(metrica.str().unwrap().get(0), Some("6.5"));
        assert_eq!(metrica.str().unwrap().get(1), Some("10.1"));
    }

    #[test]
    fn concat_bases_stacks_rows() {
        let desc = descriptor(&["Creche", "Pré-Escola"]);
        let a = normalize_indicator(&aggregate_raw(), &desc, GeographyBase::BrasilRegioesUfs, 2016)
            .unwrap();
        let b = a.clone();
        let combined = concat_bases(vec![a, b]).unwrap();
        assert_eq!(combined.height(), 12);
    }

    #[test]
    fn microdados_requires_partition_key() {
        let raw = df!["CO_ENTIDADE" => ["1"]].unwrap();
        assert!(matches!(
            normalize_microdados(raw),
            Err(TransformError::MissingColumn { .. })
        ));
    }
}
