// File: crates/screener-chart/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders deterministic charts (no text) to PNG bytes.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note; the render is still checked for size and determinism.

use screener_chart::{render_with, Dataset, Instrument, MetricKey, RenderOptions, SectorFilter};

fn bless_mode() -> bool {
    std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn write_or_compare(path: &std::path::Path, bytes: &[u8]) {
    if bless_mode() {
        if let Some(parent) = path.parent() { std::fs::create_dir_all(parent).ok(); }
        std::fs::write(path, bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", path.display(), bytes.len());
        return;
    }
    if path.exists() {
        let want = std::fs::read(path).expect("read snapshot");
        let got_img = image::load_from_memory(bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "Pixels differ: {}", path.display());
    } else {
        eprintln!("[snapshot] Missing {}; set UPDATE_SNAPSHOTS=1 to bless.", path.display());
    }
}

fn snapshot_path(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__").join(name)
}

fn render_bytes(screened: &Dataset, universe: &Dataset, key: MetricKey, sectors: &SectorFilter) -> Vec<u8> {
    let opts = RenderOptions { draw_labels: false, ..RenderOptions::default() }; // deterministic
    let first = render_with(screened, universe, &key.into(), sectors, &opts).expect("render");
    let again = render_with(screened, universe, &key.into(), sectors, &opts).expect("render again");
    assert_eq!(first.as_bytes(), again.as_bytes(), "PNG output is not deterministic");

    let decoded = image::load_from_memory(first.as_bytes()).expect("decode png");
    assert_eq!((decoded.width(), decoded.height()), (1500, 600));
    first.into_bytes()
}

#[test]
fn golden_sector_comparison() {
    let universe: Dataset = [("AAA", 10.0), ("BBB", 20.0), ("CCC", 30.0), ("DDD", 14.5)]
        .into_iter()
        .map(|(t, v)| Instrument::new(t, "Tech").with(MetricKey::Pe, v))
        .collect();
    let screened = Dataset::new(universe.as_slice()[..2].to_vec());
    let bytes = render_bytes(&screened, &universe, MetricKey::Pe, &SectorFilter::new(["Tech"]));
    write_or_compare(&snapshot_path("sector_comparison.png"), &bytes);
}

#[test]
fn golden_mixed_signs_without_average() {
    let screened: Dataset = [("AAA", 12.0), ("BBB", -6.5), ("CCC", 3.0)]
        .into_iter()
        .map(|(t, v)| Instrument::new(t, "Energy").with(MetricKey::Roe, v))
        .collect();
    let bytes = render_bytes(&screened, &Dataset::default(), MetricKey::Roe, &SectorFilter::all());
    write_or_compare(&snapshot_path("mixed_signs.png"), &bytes);
}
