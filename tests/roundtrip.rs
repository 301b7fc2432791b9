use qoi_codec::{decode_stream, encode_stream, DecodeError, Image};

fn gradient(width: u32, height: u32, channels: u8) -> Image {
    let mut raster = Vec::with_capacity(width as usize * height as usize * channels as usize);
    for y in 0..height {
        for x in 0..width {
            raster.push((x * 7) as u8);
            raster.push((y * 11) as u8);
            raster.push((x.wrapping_add(y)) as u8);
            if channels == 4 {
                raster.push((255 - x.min(255)) as u8);
            }
        }
    }
    Image::from_raster(width, height, channels, 0, raster).unwrap()
}

fn pseudo_random(width: u32, height: u32, channels: u8, seed: u32) -> Image {
    let mut state = seed.wrapping_mul(2654435761).wrapping_add(1);
    let mut next = move || {
        state = state.wrapping_mul(1103515245).wrapping_add(12345);
        (state >> 16) as u8
    };
    let mut raster = Vec::with_capacity(width as usize * height as usize * channels as usize);
    for _ in 0..(width as usize * height as usize) {
        raster.push(next());
        raster.push(next());
        raster.push(next());
        if channels == 4 {
            raster.push(next());
        }
    }
    Image::from_raster(width, height, channels, 0, raster).unwrap()
}

#[test]
fn round_trips_a_gradient_rgba_image() {
    let image = gradient(64, 48, 4);
    let bytes = encode_stream(&image).unwrap();
    let decoded = decode_stream(&bytes).unwrap();
    assert_eq!(decoded.raster(), image.raster());
    assert_eq!(decoded.width(), 64);
    assert_eq!(decoded.height(), 48);
}

#[test]
fn round_trips_a_gradient_rgb_image() {
    let image = gradient(31, 17, 3);
    let bytes = encode_stream(&image).unwrap();
    let decoded = decode_stream(&bytes).unwrap();
    assert_eq!(decoded.raster(), image.raster());
    assert!(!decoded.has_alpha());
}

#[test]
fn round_trips_pseudo_random_noise_with_no_repeated_runs() {
    // High-entropy input exercises RGB/RGBA opcodes almost exclusively,
    // with occasional DIFF/LUMA/INDEX hits from incidental collisions.
    let image = pseudo_random(40, 40, 4, 0x9e3779b9);
    let bytes = encode_stream(&image).unwrap();
    let decoded = decode_stream(&bytes).unwrap();
    assert_eq!(decoded.raster(), image.raster());
}

#[test]
fn round_trips_a_single_pixel_image() {
    let image = Image::from_raster(1, 1, 4, 1, vec![128, 64, 32, 16]).unwrap();
    let bytes = encode_stream(&image).unwrap();
    let decoded = decode_stream(&bytes).unwrap();
    assert_eq!(decoded.raster(), image.raster());
    assert_eq!(decoded.colorspace(), 1);
}

#[test]
fn round_trips_a_single_row() {
    let image = gradient(257, 1, 4);
    let bytes = encode_stream(&image).unwrap();
    let decoded = decode_stream(&bytes).unwrap();
    assert_eq!(decoded.raster(), image.raster());
}

#[test]
fn round_trips_a_single_column() {
    let image = gradient(1, 257, 3);
    let bytes = encode_stream(&image).unwrap();
    let decoded = decode_stream(&bytes).unwrap();
    assert_eq!(decoded.raster(), image.raster());
}

#[test]
fn encoded_output_ends_with_the_qoi_end_marker() {
    let image = gradient(5, 5, 4);
    let bytes = encode_stream(&image).unwrap();
    assert_eq!(&bytes[bytes.len() - 8..], &[0, 0, 0, 0, 0, 0, 0, 1]);
}

#[test]
fn a_run_spanning_an_entire_large_image_decodes_correctly() {
    let raster = vec![9u8; 500 * 4 * 3];
    let image = Image::from_raster(500, 3, 3, 0, raster).unwrap();
    let bytes = encode_stream(&image).unwrap();
    let decoded = decode_stream(&bytes).unwrap();
    assert_eq!(decoded.raster(), image.raster());
}

#[test]
fn corrupted_magic_bytes_are_rejected_before_any_decoding_work() {
    let image = gradient(4, 4, 4);
    let mut bytes = encode_stream(&image).unwrap();
    bytes[0] = b'X';
    assert_eq!(decode_stream(&bytes), Err(DecodeError::NotAQoiFile));
}

#[cfg(feature = "io")]
#[test]
fn round_trips_through_the_file_adapter() {
    let image = gradient(12, 9, 4);
    let dir = std::env::temp_dir();
    let path = dir.join(format!("qoi-codec-roundtrip-test-{}.qoi", std::process::id()));
    qoi_codec::io::save(&path, &image).unwrap();
    let loaded = qoi_codec::io::load(&path).unwrap();
    assert_eq!(loaded.raster(), image.raster());
    std::fs::remove_file(&path).ok();
}
