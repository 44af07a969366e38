// File: crates/screener-chart/tests/scene.rs
// Purpose: Bars, labels, title and reference average decided by ComparisonChart::build.

use approx::assert_relative_eq;
use screener_chart::{ComparisonChart, Dataset, Instrument, Metric, MetricKey, RenderOptions, SectorFilter};

fn tech(ticker: &str, pe: f64) -> Instrument {
    Instrument::new(ticker, "Tech").with(MetricKey::Pe, pe)
}

fn build(screened: &Dataset, universe: &Dataset, metric: &Metric, sectors: &SectorFilter) -> ComparisonChart {
    ComparisonChart::build(screened, universe, metric, sectors, &RenderOptions::default())
}

#[test]
fn single_sector_round_trip() {
    let screened = Dataset::new(vec![tech("AAA", 10.0), tech("BBB", 20.0)]);
    let universe = Dataset::new(vec![tech("AAA", 10.0), tech("BBB", 20.0), tech("CCC", 30.0)]);
    let chart = build(&screened, &universe, &Metric::parse("pe"), &SectorFilter::new(["Tech"]));

    assert_eq!(chart.title, "P/E Ratio Comparison for Tech Sector");
    assert_eq!(chart.y_label, "P/E Ratio");
    let labels: Vec<_> = chart.bars.iter().map(|b| b.label.as_deref()).collect();
    assert_eq!(labels, [Some("10.00"), Some("20.00")]);

    let reference = chart.reference.expect("average line");
    assert_relative_eq!(reference.value, 20.0);
    assert_eq!(reference.legend, "Industry Average: 20.00");
}

#[test]
fn bars_follow_screened_order() {
    let screened = Dataset::new(vec![tech("ZZZ", 3.0), tech("AAA", 1.0), tech("MMM", 2.0)]);
    let chart = build(&screened, &Dataset::default(), &MetricKey::Pe.into(), &SectorFilter::all());
    assert_eq!(chart.bars.len(), screened.len());
    for (bar, inst) in chart.bars.iter().zip(screened.iter()) {
        assert_eq!(bar.ticker, inst.ticker);
        assert_eq!(bar.value, inst.pe);
    }
}

#[test]
fn bar_colors_cycle_through_palette() {
    let screened: Dataset = (0..12).map(|i| tech(&format!("T{i:02}"), i as f64)).collect();
    let chart = build(&screened, &Dataset::default(), &MetricKey::Pe.into(), &SectorFilter::all());
    assert_ne!(chart.bars[0].color, chart.bars[1].color);
    assert_eq!(chart.bars[0].color, chart.bars[10].color);
    assert_eq!(chart.bars[1].color, chart.bars[11].color);
}

#[test]
fn empty_screened_has_no_bars_for_every_metric() {
    let universe = Dataset::new(vec![tech("AAA", 10.0)]);
    for key in MetricKey::ALL {
        let chart = build(&Dataset::default(), &universe, &key.into(), &SectorFilter::all());
        assert!(chart.bars.is_empty());
        assert!(chart.bars.iter().all(|b| b.label.is_none()));
    }
}

#[test]
fn missing_values_draw_nothing_and_do_not_count() {
    let screened = Dataset::new(vec![Instrument::new("AAA", "Tech"), tech("BBB", 4.0)]);
    let universe = Dataset::new(vec![Instrument::new("AAA", "Tech"), tech("BBB", 4.0), tech("CCC", 8.0)]);
    let chart = build(&screened, &universe, &MetricKey::Pe.into(), &SectorFilter::all());
    assert_eq!(chart.bars[0].value, None);
    assert_eq!(chart.bars[0].label, None);
    assert_eq!(chart.average.population, 3);
    assert_eq!(chart.average.defined, 2);
    assert_relative_eq!(chart.reference.unwrap().value, 6.0);
}

#[test]
fn no_defined_values_means_no_reference_line() {
    let screened = Dataset::new(vec![tech("AAA", 1.0)]);
    let universe = Dataset::new(vec![Instrument::new("AAA", "Tech"), Instrument::new("BBB", "Energy")]);
    let chart = build(&screened, &universe, &MetricKey::Pe.into(), &SectorFilter::all());
    assert!(chart.reference.is_none());

    let chart = build(&screened, &Dataset::default(), &MetricKey::Pe.into(), &SectorFilter::all());
    assert!(chart.reference.is_none());
}

#[test]
fn sector_filter_excluding_everything_drops_reference_line() {
    let universe = Dataset::new(vec![tech("AAA", 1.0)]);
    let chart = build(&Dataset::default(), &universe, &MetricKey::Pe.into(), &SectorFilter::new(["Energy"]));
    assert!(chart.reference.is_none());
    assert_eq!(chart.title, "P/E Ratio Comparison for Energy Sector");
}

#[test]
fn averaging_ignores_screened_membership() {
    let universe = Dataset::new(vec![tech("AAA", 2.0), tech("BBB", 4.0)]);
    let metric: Metric = MetricKey::Pe.into();
    let a = build(&Dataset::default(), &universe, &metric, &SectorFilter::all());
    let b = build(&Dataset::new(vec![tech("XYZ", 100.0)]), &universe, &metric, &SectorFilter::all());
    assert_eq!(a.reference, b.reference);
}

#[test]
fn title_suffixes_by_selection_size() {
    let universe = Dataset::new(vec![
        Instrument::new("AAA", "Tech").with(MetricKey::Pb, 1.0),
        Instrument::new("BBB", "Energy").with(MetricKey::Pb, 3.0),
    ]);
    let metric: Metric = MetricKey::Pb.into();

    let none = build(&Dataset::default(), &universe, &metric, &SectorFilter::all());
    assert_eq!(none.title, "P/B Ratio Comparison for FTSE 250");
    assert_relative_eq!(none.reference.unwrap().value, 2.0);

    let two = build(&Dataset::default(), &universe, &metric, &SectorFilter::new(["Tech", "Energy"]));
    assert_eq!(two.title, "P/B Ratio Comparison for 2 Selected Sectors");
}

#[test]
fn universe_label_is_configurable() {
    let opts = RenderOptions { universe_label: "FTSE 100".into(), ..RenderOptions::default() };
    let chart = ComparisonChart::build(
        &Dataset::default(),
        &Dataset::default(),
        &MetricKey::Roe.into(),
        &SectorFilter::all(),
        &opts,
    );
    assert_eq!(chart.title, "ROE (%) Comparison for FTSE 100");
}

#[test]
fn unknown_metric_uses_raw_values_and_empty_label() {
    let json = r#"[{"ticker": "AAA", "sector": "Tech", "ev": 5.5}]"#;
    let screened = Dataset::from_json_str(screener_chart::DatasetKind::Screened, json).unwrap();
    let chart = build(&screened, &screened, &Metric::parse("ev"), &SectorFilter::all());
    assert_eq!(chart.y_label, "");
    assert_eq!(chart.title, " Comparison for FTSE 250");
    assert_eq!(chart.bars[0].label.as_deref(), Some("5.50"));
    assert_eq!(chart.reference.unwrap().legend, "Industry Average: 5.50");
}

#[test]
fn labels_round_to_two_decimals() {
    let screened = Dataset::new(vec![tech("AAA", 1.0 / 3.0), tech("BBB", -2.005), tech("CCC", 1234.5)]);
    let chart = build(&screened, &Dataset::default(), &MetricKey::Pe.into(), &SectorFilter::all());
    let labels: Vec<_> = chart.bars.iter().filter_map(|b| b.label.clone()).collect();
    assert_eq!(labels[0], "0.33");
    assert_eq!(labels[2], "1234.50");
    assert!(labels[1].starts_with("-2.0"));
}
