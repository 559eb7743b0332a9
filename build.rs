use image::GenericImageView;
use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Profile picture edge length in pixels, must match `page::PICTURE_SIZE`
const PICTURE_SIZE: u32 = 80;

/// Convert a PNG image to a square 1-bit picture at build time
fn convert_picture(
    input_path: &str,
    output_path: &str,
    size: u32,
    threshold: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={}", input_path);

    if !Path::new(input_path).exists() {
        println!(
            "cargo:warning=Picture '{}' not found, page renders without it",
            input_path
        );
        // Empty file keeps include_bytes! working
        File::create(output_path)?.write_all(&[])?;
        return Ok(());
    }

    let img = image::open(input_path)?;
    let (orig_width, orig_height) = img.dimensions();

    // Fit the longer side, keep aspect ratio
    let (new_width, new_height) = if orig_width > orig_height {
        (size, (size as f32 * orig_height as f32 / orig_width as f32) as u32)
    } else {
        ((size as f32 * orig_width as f32 / orig_height as f32) as u32, size)
    };

    let gray = img
        .resize(new_width, new_height, image::imageops::FilterType::Lanczos3)
        .to_luma8();

    let bytes_per_row = size.div_ceil(8);
    let mut buffer = vec![0u8; (bytes_per_row * size) as usize];

    let offset_x = (size - new_width) / 2;
    let offset_y = (size - new_height) / 2;

    for y in 0..size {
        for x in 0..size {
            let brightness = match (x.checked_sub(offset_x), y.checked_sub(offset_y)) {
                (Some(ix), Some(iy)) if ix < new_width && iy < new_height => {
                    gray.get_pixel(ix, iy)[0]
                }
                _ => 255,
            };

            // bit set = black, MSB is the leftmost pixel
            if brightness < threshold {
                let byte_index = (y * bytes_per_row + x / 8) as usize;
                buffer[byte_index] |= 1 << (7 - (x % 8));
            }
        }
    }

    File::create(output_path)?.write_all(&buffer)?;
    println!(
        "cargo:warning=Picture converted to {}x{} ({} bytes)",
        size,
        size,
        buffer.len()
    );
    Ok(())
}

fn main() {
    if env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let picture_output = format!("{}/pfp.bin", out_dir);

    if let Err(e) = convert_picture("pfp.png", &picture_output, PICTURE_SIZE, 128) {
        println!("cargo:warning=Failed to convert pfp.png: {}", e);
        // Fall back to no picture rather than failing the build
        let _ = File::create(&picture_output).and_then(|mut f| f.write_all(&[]));
    }

    println!("cargo:rerun-if-env-changed=BADGE_NAME");
}
