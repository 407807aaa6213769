// Load a json file that specifies which experiment we are going to run and
// set's it's parameters

use std::io::{Error, Read, ErrorKind};
use std::fs::{File, create_dir_all};
use std::env;
use std::path::Path;

use image::RgbImage;
use json::JsonValue;
use log::info;

mod leja;
mod sweep;

fn make_directory_for_image(path_str : &str) -> std::io::Result<()> {
    let path = Path::new(path_str);
    if let Some(dir) = path.parent() {
        create_dir_all(dir)
    } else {
        Ok(())
    }
}

fn make_images(input : &JsonValue) -> std::io::Result<Vec<(String, RgbImage)>> {
    let algorithm = input["algorithm"].as_str().unwrap_or("none");
    match algorithm {
        "leja-julia" => leja::generate(input),
        _ => Err(Error::new(ErrorKind::InvalidData, "Unknown algorithm"))
    }
}

fn save_images(images : &[(String, RgbImage)], out_filename_base : &str) -> std::io::Result<()> {
    for (name, image) in images.iter() {
        let out_filename = format!("{} - {}.png", out_filename_base, name);
        info!("Writing output to {}", out_filename);
        make_directory_for_image(&out_filename)?;
        image.save(&out_filename).map_err(
            |_| Error::new(ErrorKind::InvalidData, "Couldn't write image")
        )?;
    }
    Ok(())
}

fn main() -> std::io::Result<()> {
    env_logger::init();
    // Get file to use else default
    let in_filename = env::args().nth(1).unwrap_or("input.json".to_string());
    let out_filename = env::args().nth(2).unwrap_or("output.png".to_string());
    info!("Loading input file: {}", in_filename);
    let mut file = File::open(in_filename)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    info!("Parsing input file");
    let input = json::parse(&contents).map_err(
        |_| Error::new(ErrorKind::InvalidData, "Couldn't parse input")
    )?;
    let algorithm = input["algorithm"].as_str().unwrap_or("none");
    let out_filename_base = out_filename.strip_suffix(".png").unwrap_or(&out_filename);
    if algorithm == "sweep" {
        let configs = sweep::make_configs(&input)?;
        for (i, config) in configs.iter().enumerate() {
            info!("Experiment {} of {}", i+1, configs.len());
            let images = make_images(config)?;
            save_images(&images, &format!("{}/{}", out_filename_base, i))?;
        }
    } else {
        let images = make_images(&input)?;
        save_images(&images, out_filename_base)?;
    };
    info!("All experiments complete");
    Ok(())
}
