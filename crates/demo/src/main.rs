// File: crates/demo/src/main.rs
// Summary: Demo host: loads screened + universe datasets (JSON or CSV), renders the
//          metric comparison chart and writes a PNG, or prints it as base64 / data URI.
//
// Usage:
//   screener-demo <screened.json|csv> <universe.json|csv> <pe|pb|de|roe>
//                 [--sector NAME]... [--out PATH] [--base64 | --data-uri]
//                 [--theme dark|light] [--universe-label TEXT]

use anyhow::{bail, Context, Result};
use log::info;
use screener_chart::{render_with, theme, Dataset, DatasetKind, Metric, RenderOptions, SectorFilter};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transport {
    File,
    Base64,
    DataUri,
}

struct Args {
    screened: PathBuf,
    universe: PathBuf,
    metric: String,
    sectors: Vec<String>,
    out: Option<PathBuf>,
    transport: Transport,
    theme: Option<String>,
    universe_label: Option<String>,
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = parse_args(std::env::args().skip(1))?;

    let screened = load_dataset(DatasetKind::Screened, &args.screened)?;
    let universe = load_dataset(DatasetKind::Universe, &args.universe)?;
    info!("loaded {} screened and {} universe records", screened.len(), universe.len());

    let mut opts = RenderOptions::default();
    if let Some(name) = &args.theme {
        opts.theme = theme::find(name);
    }
    if let Some(label) = &args.universe_label {
        opts.universe_label = label.clone();
    }

    let metric = Metric::parse(&args.metric);
    let sectors = SectorFilter::new(args.sectors.iter().cloned());
    let image = render_with(&screened, &universe, &metric, &sectors, &opts)
        .context("rendering comparison chart")?;

    match args.transport {
        Transport::Base64 => println!("{}", image.to_base64()),
        Transport::DataUri => println!("{}", image.to_data_uri()),
        Transport::File => {
            let out = args.out.unwrap_or_else(|| out_name_with(&args.screened, metric.field()));
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&out, image.as_bytes())
                .with_context(|| format!("writing {}", out.display()))?;
            println!("Wrote {} ({}x{})", out.display(), image.width(), image.height());
        }
    }
    Ok(())
}

fn parse_args(mut it: impl Iterator<Item = String>) -> Result<Args> {
    let mut positional = Vec::new();
    let mut sectors = Vec::new();
    let mut out = None;
    let mut transport = Transport::File;
    let mut theme = None;
    let mut universe_label = None;

    while let Some(arg) = it.next() {
        let mut value = |flag: &str| it.next().with_context(|| format!("{flag} needs a value"));
        match arg.as_str() {
            "--sector" => sectors.push(value("--sector")?),
            "--out" => out = Some(PathBuf::from(value("--out")?)),
            "--theme" => theme = Some(value("--theme")?),
            "--universe-label" => universe_label = Some(value("--universe-label")?),
            "--base64" => transport = Transport::Base64,
            "--data-uri" => transport = Transport::DataUri,
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            _ => positional.push(arg.clone()),
        }
    }

    let [screened, universe, metric]: [String; 3] = positional.try_into().map_err(|p: Vec<String>| {
        anyhow::anyhow!(
            "expected <screened> <universe> <metric>, got {} positional argument(s)",
            p.len()
        )
    })?;
    Ok(Args {
        screened: screened.into(),
        universe: universe.into(),
        metric,
        sectors,
        out,
        transport,
        theme,
        universe_label,
    })
}

/// Load a dataset, picking the decoder from the file extension (JSON by default).
fn load_dataset(kind: DatasetKind, path: &Path) -> Result<Dataset> {
    let is_csv = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    let dataset = if is_csv {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        Dataset::from_csv_reader(kind, file)
    } else {
        let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Dataset::from_json_str(kind, &json)
    };
    dataset.with_context(|| format!("failed to load {kind} data '{}'", path.display()))
}

/// Produce output file name like target/out/chart_<stem>_<metric>.png
fn out_name_with(input: &Path, metric: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    let mut out = PathBuf::from("target/out");
    out.push(format!("chart_{stem}_{metric}.png"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Result<Args> {
        parse_args(v.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_positional_and_repeated_sectors() {
        let a = args(&["s.json", "u.csv", "pe", "--sector", "Tech", "--sector", "Energy", "--base64"]).unwrap();
        assert_eq!(a.metric, "pe");
        assert_eq!(a.sectors, ["Tech", "Energy"]);
        assert_eq!(a.transport, Transport::Base64);
        assert_eq!(a.universe, PathBuf::from("u.csv"));
    }

    #[test]
    fn rejects_missing_positionals_and_unknown_flags() {
        assert!(args(&["s.json", "pe"]).is_err());
        assert!(args(&["s.json", "u.json", "pe", "--nope"]).is_err());
        assert!(args(&["s.json", "u.json", "pe", "--sector"]).is_err());
    }

    #[test]
    fn default_output_name_uses_stem_and_metric() {
        assert_eq!(
            out_name_with(Path::new("data/screened.json"), "roe"),
            PathBuf::from("target/out/chart_screened_roe.png")
        );
    }
}
