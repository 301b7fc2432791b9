use std::path::PathBuf;

use qoi_codec::Image;

fn main() -> Result<(), ()> {
    let mut args = std::env::args();

    if args.len() < 2 {
        eprintln!("Usage: qoiconv <input-path> [<output-path>]");
        eprintln!("Example: qoiconv images/foo.png images/foo.qoi");
        return Err(());
    }

    args.next();

    let input = PathBuf::from(args.next().unwrap());
    let decode = input.extension().map_or(false, |ext| ext == "qoi");

    let output = args.next().map(PathBuf::from).unwrap_or_else(|| {
        if decode {
            input.with_extension("png")
        } else {
            input.with_extension("qoi")
        }
    });

    if output.exists() {
        eprintln!("Output path '{}' already occupied", output.display());
        return Err(());
    }

    if decode {
        let image = qoi_codec::io::load(&input).map_err(|err| {
            eprintln!("Failed to load QOI file '{}'. {}", input.display(), err)
        })?;

        let color = if image.has_alpha() { image::ColorType::Rgba8 } else { image::ColorType::Rgb8 };
        image::save_buffer(&output, image.raster(), image.width(), image.height(), color)
            .map_err(|err| eprintln!("Failed to save decoded image into '{}'. {}", output.display(), err))?;
    } else {
        let decoded = image::open(&input)
            .map_err(|err| eprintln!("Failed to open input image '{}'. {}", input.display(), err))?;

        let rgba = decoded.to_rgba8();
        let image = Image::from_raster(rgba.width(), rgba.height(), 4, 0, rgba.into_raw())
            .map_err(|err| eprintln!("Failed to build image from '{}'. {}", input.display(), err))?;

        qoi_codec::io::save(&output, &image)
            .map_err(|err| eprintln!("Failed to write QOI image into '{}'. {}", output.display(), err))?;
    }

    Ok(())
}
