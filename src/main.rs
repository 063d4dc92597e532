use gblur::{gaussian_blur, Opts};

use anyhow::{Context, Result};
use log::info;
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let Opts {
        path,
        image_name,
        processed_image_name,
        kernel_width,
        kernel_height,
        sigma_x,
    } = Opts::parse(env::args())?;

    // Plain concatenation, as the CLI contract demands: the path argument
    // carries its own trailing separator.
    let input = format!("{path}{image_name}");
    let output = format!("{path}{processed_image_name}");

    let original_img = image::open(&input)
        .with_context(|| format!("failed to load {input}"))?
        .to_rgb8();
    info!(
        "loaded {input}: {}x{}",
        original_img.width(),
        original_img.height()
    );

    let img_buf = gaussian_blur(&original_img, (kernel_width, kernel_height), sigma_x as f64)?;

    img_buf
        .save(&output)
        .with_context(|| format!("failed to save {output}"))?;
    info!("wrote {output}");

    Ok(())
}
