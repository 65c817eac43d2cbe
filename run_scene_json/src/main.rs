use reflect2d_json::{deserialize_scene, serde_json, JsonSer};

use std::{error::Error, format as f, fs::File, io};

fn run_scene(max_depth: Option<usize>, json: &serde_json::Value) -> Result<(), Box<dyn Error>> {
    let mut scene = deserialize_scene(json)?;

    if let Some(max_depth) = max_depth {
        log::info!("overriding max_depth: {} -> {max_depth}", scene.config.max_depth);
        scene.config.max_depth = max_depth;
    }

    let report = scene.evaluate()?;

    log::info!(
        "{} virtual images, {} ray segments, {} sight lines",
        report.objects.iter().map(|o| o.images.len()).sum::<usize>(),
        report.rays.iter().map(|r| r.segments.len()).sum::<usize>(),
        report.sight_lines.len(),
    );

    serde_json::to_writer_pretty(io::stdout().lock(), &report.to_json())?;
    println!();

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args = std::env::args().skip(1);

    let file_path = args
        .next()
        .ok_or("expected a file path as a first argument.")?;

    let max_depth = args
        .next()
        .map(|arg| {
            arg.parse()
                .map_err(|_| f!("expected a number as second argument, got {arg:?}"))
        })
        .transpose()?;

    log::debug!("reading scene from {file_path}");

    run_scene(max_depth, &serde_json::from_reader(File::open(file_path)?)?)
}
