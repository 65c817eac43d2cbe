use std::{env, error::Error, fs::File};

use reflect2d_json::{serde_json, serialize_scene};
use reflect2d_random::{rand, random_scene};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);

    let file_path = args
        .next()
        .ok_or("please provide a path to serialize the scene json data")?;

    let num_mirrors = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(12);

    let num_rays = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(4);

    let num_objects = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(1);

    let scene = random_scene(&mut rand::thread_rng(), num_mirrors, num_rays, num_objects);

    serde_json::to_writer_pretty(File::create(&file_path)?, &serialize_scene(&scene))?;

    log::info!("wrote {num_mirrors} mirrors, {num_rays} rays and {num_objects} objects to {file_path}");

    Ok(())
}
