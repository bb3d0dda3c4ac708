use std::collections::BTreeSet;

use super::*;

fn classifier() -> SignalClassifier {
    SignalClassifier::new().expect("signal tables should compile")
}

fn periods(values: &[u32]) -> BTreeSet<u32> {
    values.iter().copied().collect()
}

#[test]
fn hazard_terms_match_regardless_of_case_and_inflection() {
    let classifier = classifier();
    for text in ["FLOOD", "Flooding", "floods", "flooded areas"] {
        assert_eq!(classifier.classify(text).hazards, vec![Hazard::Flood], "{text}");
    }
}

#[test]
fn hazard_terms_require_word_boundaries() {
    let classifier = classifier();
    assert!(classifier.classify("floodplain mapping").hazards.is_empty());
    assert!(classifier.classify("volcanology lab").hazards.is_empty());
}

#[test]
fn multi_word_triggers_tolerate_missing_or_extra_whitespace() {
    let classifier = classifier();
    assert_eq!(
        classifier.classify("forest fires").hazards,
        vec![Hazard::Wildfire]
    );
    assert_eq!(
        classifier.classify("ForestFire perimeter").hazards,
        vec![Hazard::Wildfire]
    );
    assert_eq!(
        classifier.classify("affected    people").exposure,
        vec![Exposure::Population]
    );
    assert_eq!(
        classifier.classify("Average Annual\tLoss").analysis_types,
        vec![AnalysisType::Probabilistic]
    );
}

#[test]
fn labels_follow_table_order_and_are_not_exclusive() {
    let classifier = classifier();
    let signals =
        classifier.classify("Typhoon, landslide and earthquake; volcanic eruption; drought");

    assert_eq!(
        signals.hazards,
        vec![
            Hazard::Earthquake,
            Hazard::Cyclone,
            Hazard::Drought,
            Hazard::Landslide,
            Hazard::Volcanic,
        ]
    );
}

#[test]
fn repeated_terms_yield_a_single_label() {
    let signals = classifier().classify("flood flood FLOODS school schools");
    assert_eq!(signals.hazards, vec![Hazard::Flood]);
    assert_eq!(signals.exposure, vec![Exposure::Infrastructure]);
}

#[test]
fn exposure_table_covers_each_category() {
    let signals =
        classifier().classify("housing stock, bridges, local residents and livestock herds");
    assert_eq!(
        signals.exposure,
        vec![
            Exposure::Building,
            Exposure::Infrastructure,
            Exposure::Population,
            Exposure::Agriculture,
        ]
    );
}

#[test]
fn analysis_types_cover_each_methodology() {
    let classifier = classifier();
    assert_eq!(
        classifier.classify("AEP curves").analysis_types,
        vec![AnalysisType::Probabilistic]
    );
    assert_eq!(
        classifier.classify("RP100 depth grid").analysis_types,
        vec![AnalysisType::Probabilistic]
    );
    assert_eq!(
        classifier.classify("scenario based impact").analysis_types,
        vec![AnalysisType::Deterministic]
    );
    assert_eq!(
        classifier.classify("Historical Data from gauges").analysis_types,
        vec![AnalysisType::Empirical]
    );
    assert_eq!(
        classifier
            .classify("deterministic single event compared with observed losses")
            .analysis_types,
        vec![AnalysisType::Deterministic, AnalysisType::Empirical]
    );
}

#[test]
fn empty_text_yields_empty_signals() {
    let signals = classifier().classify("");
    assert!(signals.is_empty());
    assert_eq!(signals, Signals::default());
}

#[test]
fn return_periods_read_both_orientations() {
    let classifier = classifier();
    assert_eq!(
        classifier.classify("RP 100 year flood").return_periods,
        periods(&[100])
    );
    assert_eq!(
        classifier.classify("Return Period: 250").return_periods,
        periods(&[250])
    );
    assert_eq!(
        classifier.classify("the 50-year return period map").return_periods,
        periods(&[50])
    );
    assert_eq!(
        classifier.classify("a 20 year return period").return_periods,
        periods(&[20])
    );
}

#[test]
fn return_periods_are_deduplicated_per_text() {
    let signals = classifier().classify("RP 50, RP 50, 50-year return period, rp25");
    assert_eq!(signals.return_periods, periods(&[25, 50]));
}

#[test]
fn return_period_range_is_inclusive_at_both_ends() {
    let classifier = classifier();
    assert_eq!(
        classifier.classify("RP 1 and RP 10000").return_periods,
        periods(&[1, 10_000])
    );
    assert!(classifier.classify("RP 0").return_periods.is_empty());
    assert!(classifier.classify("RP 10001").return_periods.is_empty());
    assert!(
        classifier
            .classify("RP 99999999999999999999999")
            .return_periods
            .is_empty()
    );
}

#[test]
fn return_periods_ignore_unanchored_numbers() {
    let classifier = classifier();
    assert!(classifier.classify("sharp 5 year decline").return_periods.is_empty());
    assert!(classifier.classify("10 year flood history").return_periods.is_empty());
    assert!(classifier.classify("return period of unknown length").return_periods.is_empty());
}

#[test]
fn classify_record_matches_reference_example() {
    let record: MetadataRecord = serde_json::from_str(
        r#"{"id":"abc","title":"2020 Flood Risk","notes":"Probabilistic flood model, RP 100 year return period affecting population and buildings"}"#,
    )
    .expect("example record should deserialize");

    let result = classifier().classify_record(&record);

    assert_eq!(result.id, "abc");
    assert_eq!(result.title, "2020 Flood Risk");
    assert_eq!(result.signals.hazards, vec![Hazard::Flood]);
    assert_eq!(
        result.signals.exposure,
        vec![Exposure::Building, Exposure::Population]
    );
    assert_eq!(
        result.signals.analysis_types,
        vec![AnalysisType::Probabilistic]
    );
    assert_eq!(result.signals.return_periods, periods(&[100]));
    assert!(result.signals.is_detail_worthy());
}

#[test]
fn classify_record_defaults_missing_identity_to_empty_strings() {
    let record: MetadataRecord =
        serde_json::from_str(r#"{"notes":"drought"}"#).expect("record should deserialize");
    let result = classifier().classify_record(&record);
    assert_eq!(result.id, "");
    assert_eq!(result.title, "");
    assert_eq!(result.signals.hazards, vec![Hazard::Drought]);
}

#[test]
fn return_periods_read_underscore_joined_resource_names() {
    let signals = classifier().classify("fathom_flood_RP100_depth.tif");
    assert_eq!(signals.return_periods, periods(&[100]));
    assert_eq!(signals.analysis_types, vec![AnalysisType::Probabilistic]);

    let signals = classifier().classify("depth_rp_25.tif and RP:500");
    assert_eq!(signals.return_periods, periods(&[500]));
}

#[test]
fn extracted_return_periods_always_count_as_probabilistic() {
    let classifier = classifier();
    for text in [
        "RP100yr",
        "fathom_flood_RP100_depth.tif",
        "RP 100 year flood",
        "the 50-year return period map",
        "observed rp250 depth",
        "Return Period: 250",
    ] {
        let signals = classifier.classify(text);
        assert!(!signals.return_periods.is_empty(), "{text}");
        assert!(
            signals
                .analysis_types
                .contains(&AnalysisType::Probabilistic),
            "{text}"
        );
    }
}

#[test]
fn probabilistic_stays_first_when_added_from_return_periods() {
    let signals = classifier().classify("observed RP100yr grid");
    assert_eq!(signals.return_periods, periods(&[100]));
    assert_eq!(
        signals.analysis_types,
        vec![AnalysisType::Probabilistic, AnalysisType::Empirical]
    );
}

#[test]
fn classify_record_renders_null_identity_as_empty_strings() {
    let record: MetadataRecord =
        serde_json::from_str(r#"{"id":null,"title":null,"notes":"tsunami"}"#)
            .expect("record should deserialize");
    let result = classifier().classify_record(&record);
    assert_eq!(result.id, "");
    assert_eq!(result.title, "");
    assert_eq!(result.signals.hazards, vec![Hazard::Tsunami]);
}
