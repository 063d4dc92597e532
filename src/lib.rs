use anyhow::{bail, Context, Result};
use image::{ImageBuffer, Rgb, RgbImage};
use log::debug;
use std::str::FromStr;

mod kernel;

/// The six positional arguments:
/// `gblur <path> <imageName> <processedImageName> <kernelWidth> <kernelHeight> <sigmaX>`
#[derive(Debug)]
pub struct Opts {
    pub path: String,
    pub image_name: String,
    pub processed_image_name: String,
    pub kernel_width: i32,
    pub kernel_height: i32,
    pub sigma_x: i32,
}

impl Opts {
    /// Reads the arguments at their fixed positions. There are no flags,
    /// no defaults and no range checks; an out-of-range kernel size is
    /// only rejected later by [`gaussian_blur`].
    pub fn parse(args: impl Iterator<Item = String>) -> Result<Opts> {
        let mut args = args.skip(1);

        let path = args.next().context("missing argument: path")?;
        let image_name = args.next().context("missing argument: imageName")?;
        let processed_image_name = args
            .next()
            .context("missing argument: processedImageName")?;
        let kernel_width = next_number(&mut args, "kernelWidth")?;
        let kernel_height = next_number(&mut args, "kernelHeight")?;
        let sigma_x = next_number(&mut args, "sigmaX")?;

        Ok(Opts {
            path,
            image_name,
            processed_image_name,
            kernel_width,
            kernel_height,
            sigma_x,
        })
    }
}

fn next_number<T>(args: &mut impl Iterator<Item = String>, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = args
        .next()
        .with_context(|| format!("missing argument: {name}"))?;
    raw.parse()
        .with_context(|| format!("invalid {name}: {raw:?}"))
}

/// Separable Gaussian convolution with `cv2.GaussianBlur` semantics:
/// kernel dimensions must be odd positive integers, the vertical sigma
/// falls back to `sigma_x`, and out-of-bounds taps reflect about the
/// edge pixel without repeating it (BORDER_REFLECT_101).
///
/// The output has the same dimensions and channel count as the input.
pub fn gaussian_blur(
    src: &RgbImage,
    (kernel_width, kernel_height): (i32, i32),
    sigma_x: f64,
) -> Result<RgbImage> {
    if kernel_width <= 0 || kernel_width % 2 == 0 || kernel_height <= 0 || kernel_height % 2 == 0 {
        bail!(
            "kernel dimensions must be odd positive integers, got {kernel_width}x{kernel_height}"
        );
    }

    let (width, height) = src.dimensions();
    let sigma_y = sigma_x;

    let kx = kernel::gaussian_kernel(kernel_width as u32, sigma_x);
    let ky = kernel::gaussian_kernel(kernel_height as u32, sigma_y);
    debug!("{width}x{height} image, {kernel_width}x{kernel_height} kernel, sigma {sigma_x}");

    let radius_x = (kernel_width / 2) as i64;
    let radius_y = (kernel_height / 2) as i64;
    let row_len = width as usize * 3;

    // Horizontal pass into a float plane, so quantization happens once
    // at the final 8-bit store.
    let mut rows = vec![0.0f64; row_len * height as usize];
    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f64; 3];
            for (tap, weight) in kx.iter().enumerate() {
                let sx = mirror(x as i64 + tap as i64 - radius_x, width as i64);
                let pixel = src.get_pixel(sx as u32, y);
                for c in 0..3 {
                    acc[c] += pixel[c] as f64 * weight;
                }
            }
            let i = y as usize * row_len + x as usize * 3;
            rows[i..i + 3].copy_from_slice(&acc);
        }
    }

    // Vertical pass.
    let mut img_buf = ImageBuffer::new(width, height);
    for (x, y, pixel) in img_buf.enumerate_pixels_mut() {
        let mut acc = [0.0f64; 3];
        for (tap, weight) in ky.iter().enumerate() {
            let sy = mirror(y as i64 + tap as i64 - radius_y, height as i64);
            let i = sy as usize * row_len + x as usize * 3;
            acc[0] += rows[i] * weight;
            acc[1] += rows[i + 1] * weight;
            acc[2] += rows[i + 2] * weight;
        }
        *pixel = Rgb(acc.map(|v| v.round().clamp(0.0, 255.0) as u8));
    }

    Ok(img_buf)
}

// Reflects an out-of-range index about the edge pixel: -1 -> 1, len -> len - 2.
fn mirror(i: i64, len: i64) -> i64 {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let i = i.rem_euclid(period);
    if i < len {
        i
    } else {
        period - i
    }
}
