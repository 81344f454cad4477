//! End-to-end normalize → coerce scenarios for indicator frames.

use polars::df;
use polars::prelude::DataType;

use censo_model::{DatasetKind, GeographyBase};
use censo_standards::{Era, IndicatorDescriptor, Registry, SkipProfile};
use censo_transform::{coerce, normalize_indicator};

fn two_group_descriptor() -> IndicatorDescriptor {
    IndicatorDescriptor {
        code: "ATU".to_string(),
        name: "Média de Alunos por Turma".to_string(),
        skip_profile: SkipProfile::Rows8x6,
        source_file: "ATU".to_string(),
        eras: vec![Era {
            first_year: 2016,
            last_year: 2022,
            group_offset: 0,
            expected_trailing: None,
            groups: vec!["Nível 1".to_string(), "Nível 2".to_string()],
        }],
    }
}

#[test]
fn aggregate_row_becomes_two_typed_long_rows() {
    // Raw header text is whatever the yearly workbook says; only positions
    // matter.
    let raw = df![
        "2016" => ["2016"],
        "Brasil" => ["Brasil"],
        "Urbana" => ["Urbana"],
        "Federal" => ["Federal"],
        "Grupo 1" => ["10.5"],
        "Grupo 2" => ["20.5"],
    ]
    .unwrap();

    let descriptor = two_group_descriptor();
    let long =
        normalize_indicator(&raw, &descriptor, GeographyBase::BrasilRegioesUfs, 2016).unwrap();
    let registry = Registry::load().unwrap();
    let typed = coerce(long, DatasetKind::Indicator, &registry).unwrap();

    assert_eq!(typed.height(), 2);
    assert_eq!(
        typed.column("NU_ANO_CENSO").unwrap().dtype(),
        &DataType::Int16
    );

    let years: Vec<Option<i16>> = typed
        .column("NU_ANO_CENSO")
        .unwrap()
        .i16()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(years, vec![Some(2016), Some(2016)]);

    let geo = typed.column("NO_GEOGRAFIA").unwrap();
    assert_eq!(geo.str().unwrap().get(0), Some("Brasil"));
    let level = typed.column("TP_NIVEL_GEOGRAFICO").unwrap();
    assert_eq!(level.str().unwrap().get(0), Some("País"));
    let categoria = typed.column("NO_CATEGORIA").unwrap();
    assert_eq!(categoria.str().unwrap().get(0), Some("Urbana"));
    let dependencia = typed.column("NO_DEPENDENCIA").unwrap();
    assert_eq!(dependencia.str().unwrap().get(0), Some("Federal"));

    let grupos: Vec<Option<&str>> = typed
        .column("TP_GRUPO")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(grupos, vec![Some("Nível 1"), Some("Nível 2")]);

    let metricas: Vec<Option<f64>> = typed
        .column("METRICA")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(metricas, vec![Some(10.5), Some(20.5)]);
}

#[test]
fn missing_metric_sentinel_stays_null_through_typing() {
    let raw = df![
        "Ano" => ["2016", "2016"],
        "Unidade" => ["Norte", "Sul"],
        "Local" => ["Total", "Total"],
        "Dep" => ["Total", "Total"],
        "Grupo 1" => [Some("88.1"), None],
        "Grupo 2" => [None, Some("91.3")],
    ]
    .unwrap();

    let descriptor = two_group_descriptor();
    let long =
        normalize_indicator(&raw, &descriptor, GeographyBase::BrasilRegioesUfs, 2016).unwrap();
    let registry = Registry::load().unwrap();
    let typed = coerce(long, DatasetKind::Indicator, &registry).unwrap();

    assert_eq!(typed.height(), 4);
    assert_eq!(typed.column("METRICA").unwrap().null_count(), 2);
}
