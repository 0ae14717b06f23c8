use log::info;
use rayon::prelude::*;
use std::env;
use std::error::Error;
use std::path::Path;
use std::time::Instant;
use xray_edges::config::panels::{load_config, FigureConfig, PanelSource, PanelToolConfig};
use xray_edges::diagnostics::{elapsed_ms, EdgeMapReport, FigureReport, RunReport, TimingBreakdown};
use xray_edges::image::io::{load_image, write_json_file};
use xray_edges::{EdgeMap, EdgeMapComputer, Panel, PlanarImage, PngRenderer, Renderer};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;
    let total_start = Instant::now();
    let mut timing = TimingBreakdown::default();

    let image = timing.time("load", || load_image(&config.input))?;
    info!(
        "loaded {} shape={:?}",
        config.input.display(),
        image.shape()
    );

    let computer = EdgeMapComputer::new(config.options);
    let compute_start = Instant::now();
    let maps = config
        .figures
        .par_iter()
        .map(|figure| compute_figure(&computer, &image, figure))
        .collect::<Result<Vec<_>, _>>()?;
    timing.push("compute", elapsed_ms(compute_start));

    let render_start = Instant::now();
    let mut figures = Vec::with_capacity(config.figures.len());
    for (figure, map) in config.figures.iter().zip(&maps) {
        figures.push(render_figure(&config, figure, &image, map.as_ref())?);
    }
    timing.push("render", elapsed_ms(render_start));
    timing.total_ms = elapsed_ms(total_start);

    let report = RunReport {
        input: config.input.display().to_string(),
        input_shape: image.shape(),
        figures,
        timing,
    };
    let report_path = config.report_path();
    write_json_file(&report_path, &report)?;

    for fig in &report.figures {
        println!("Saved {} ({} panel(s))", fig.image_path, fig.panel_titles.len());
    }
    println!(
        "Saved run report to {} ({:.1} ms total)",
        report_path.display(),
        report.timing.total_ms
    );
    Ok(())
}

fn usage() -> String {
    "Usage: edge_panels <config.json>".to_string()
}

struct ComputedMap {
    map: EdgeMap,
    elapsed_ms: f64,
}

fn compute_figure(
    computer: &EdgeMapComputer,
    image: &PlanarImage,
    figure: &FigureConfig,
) -> Result<Option<ComputedMap>, xray_edges::EdgeError> {
    let Some(method) = figure.method else {
        return Ok(None);
    };
    let start = Instant::now();
    let map = computer.compute(image, method)?;
    Ok(Some(ComputedMap {
        map,
        elapsed_ms: elapsed_ms(start),
    }))
}

fn render_figure(
    config: &PanelToolConfig,
    figure: &FigureConfig,
    image: &PlanarImage,
    computed: Option<&ComputedMap>,
) -> Result<FigureReport, Box<dyn Error>> {
    let specs = figure.panel_specs();
    let mut panels = Vec::with_capacity(specs.len());
    for spec in &specs {
        let grid = match (spec.source, computed) {
            (PanelSource::Original, _) => image,
            (PanelSource::EdgeMap, Some(c)) => c.map.grid(),
            (PanelSource::EdgeMap, None) => {
                return Err(format!("figure {:?} has no edge map to show", figure.name).into())
            }
        };
        panels.push(Panel::new(grid, spec.colormap, &spec.title));
    }

    let path = config.figure_path(figure);
    PngRenderer::new(&path)
        .with_gutter(config.gutter)
        .render(&panels)?;

    Ok(FigureReport {
        name: figure.name.clone(),
        image_path: path.display().to_string(),
        edge_map: computed.map(|c| EdgeMapReport::new(&c.map, c.elapsed_ms)),
        panel_titles: specs.into_iter().map(|s| s.title).collect(),
    })
}

