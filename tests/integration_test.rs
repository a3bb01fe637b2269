//! End-to-end decoding of multi-strip images through every built-in codec

use std::io::{Cursor, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::{Rgba, RgbaImage};

use stripkit::tiff::constants::{compression, photometric};
use stripkit::{ByteOrder, ByteSourceArray, ByteSourceFile, PredictorMode, StripDataReader, TiffError};

const WIDTH: u32 = 4;
const HEIGHT: u32 = 5;
const ROWS_PER_STRIP: u32 = 2;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// RGB test image, one row of 12 bytes per image row
fn rgb_rows() -> Vec<Vec<u8>> {
    (0..HEIGHT)
        .map(|y| {
            (0..WIDTH)
                .flat_map(|x| [(x * 60) as u8, (y * 50) as u8, (x * 10 + y) as u8])
                .collect()
        })
        .collect()
}

fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// PackBits with literal runs only
fn packbits(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for chunk in data.chunks(128) {
        out.push((chunk.len() - 1) as u8);
        out.extend_from_slice(chunk);
    }
    out
}

fn lzw(data: &[u8]) -> Vec<u8> {
    weezl::encode::Encoder::with_tiff_size_switch(weezl::BitOrder::Msb, 8)
        .encode(data)
        .unwrap()
}

/// Lay out the compressed strips behind an 8 byte header
fn assemble(strips: &[Vec<u8>]) -> (Vec<u8>, Vec<u64>, Vec<u64>) {
    let mut file = b"MM\x00\x2a\x00\x00\x00\x00".to_vec();
    let mut offsets = Vec::new();
    let mut counts = Vec::new();

    for strip in strips {
        offsets.push(file.len() as u64);
        counts.push(strip.len() as u64);
        file.extend_from_slice(strip);
    }
    (file, offsets, counts)
}

fn compressed_strips(code: u16, rows: &[Vec<u8>]) -> Vec<Vec<u8>> {
    rows.chunks(ROWS_PER_STRIP as usize)
        .map(|strip_rows| {
            let raw = strip_rows.concat();
            match code {
                compression::NONE => raw,
                compression::LZW => lzw(&raw),
                compression::DEFLATE | compression::DEFLATE_OLD => deflate(&raw),
                compression::PACKBITS => packbits(&raw),
                compression::ZSTD => zstd::encode_all(raw.as_slice(), 3).unwrap(),
                other => panic!("no test encoder for compression {}", other),
            }
        })
        .collect()
}

fn assert_rgb_image(raster: &RgbaImage) {
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let expected = Rgba([(x * 60) as u8, (y * 50) as u8, (x * 10 + y) as u8, 255]);
            assert_eq!(raster.get_pixel(x, y), &expected, "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_rgb_strips_through_every_codec() {
    init_logger();

    for &code in &[
        compression::NONE,
        compression::LZW,
        compression::DEFLATE,
        compression::DEFLATE_OLD,
        compression::PACKBITS,
        compression::ZSTD,
    ] {
        let (file, offsets, counts) = assemble(&compressed_strips(code, &rgb_rows()));
        assert_eq!(offsets.len(), 3);

        let reader = StripDataReader::builder(WIDTH, HEIGHT)
            .bits_per_sample(&[8, 8, 8])
            .bits_per_pixel(24)
            .photometric(photometric::RGB)
            .rows_per_strip(ROWS_PER_STRIP)
            .strip_offsets(offsets)
            .strip_byte_counts(counts)
            .compression(code)
            .build()
            .unwrap();

        let mut source = ByteSourceFile::new(Cursor::new(file));
        let mut raster = RgbaImage::new(WIDTH, HEIGHT);
        reader.read_image_data(&mut raster, &mut source)
            .unwrap_or_else(|e| panic!("compression {} failed: {}", code, e));

        assert_rgb_image(&raster);
    }
}

#[test]
fn test_deflate_with_predictor() {
    init_logger();

    // 16-bit little-endian grayscale, differenced along each row
    let values: Vec<Vec<u16>> = (0..HEIGHT)
        .map(|y| (0..WIDTH).map(|x| (y * 4000 + x * 9000) as u16).collect())
        .collect();
    let rows: Vec<Vec<u8>> = values
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(x, &v)| if x == 0 { v } else { v.wrapping_sub(row[x - 1]) })
                .flat_map(|v| v.to_le_bytes())
                .collect()
        })
        .collect();

    let (file, offsets, counts) = assemble(&compressed_strips(compression::DEFLATE, &rows));
    let reader = StripDataReader::builder(WIDTH, HEIGHT)
        .bits_per_sample(&[16])
        .byte_order(ByteOrder::LittleEndian)
        .predictor(PredictorMode::HorizontalDifferencing)
        .rows_per_strip(ROWS_PER_STRIP)
        .strip_offsets(offsets)
        .strip_byte_counts(counts)
        .compression(compression::DEFLATE)
        .build()
        .unwrap();

    let mut source = ByteSourceArray::new(file);
    let mut raster = RgbaImage::new(WIDTH, HEIGHT);
    reader.read_image_data(&mut raster, &mut source).unwrap();

    for (y, row) in values.iter().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            let gray = (v >> 8) as u8;
            assert_eq!(raster.get_pixel(x as u32, y as u32), &Rgba([gray, gray, gray, 255]));
        }
    }
}

#[test]
fn test_palette_image_from_file() {
    init_logger();

    // 2-bit indices, 4 entries: black, red, green, blue
    let color_map: Vec<u16> = vec![
        0, 0xFFFF, 0, 0,
        0, 0, 0xFFFF, 0,
        0, 0, 0, 0xFFFF,
    ];
    // Row: indices 0 1 2 3 -> 0b00_01_10_11
    let rows = vec![vec![0b0001_1011], vec![0b1110_0100]];
    let (file, offsets, counts) = assemble(&[packbits(&rows.concat())]);

    let path = std::env::temp_dir().join(format!("stripkit-palette-{}.tif", std::process::id()));
    std::fs::write(&path, &file).unwrap();

    let reader = StripDataReader::builder(4, 2)
        .bits_per_sample(&[2])
        .photometric(photometric::PALETTE)
        .color_map(color_map)
        .strip_offsets(offsets)
        .strip_byte_counts(counts)
        .compression(compression::PACKBITS)
        .build()
        .unwrap();

    let mut source = ByteSourceFile::open(&path).unwrap();
    let mut raster = RgbaImage::new(4, 2);
    let result = reader.read_image_data(&mut raster, &mut source);
    std::fs::remove_file(&path).unwrap();
    result.unwrap();

    let black = Rgba([0, 0, 0, 255]);
    let red = Rgba([255, 0, 0, 255]);
    let green = Rgba([0, 255, 0, 255]);
    let blue = Rgba([0, 0, 255, 255]);
    let decoded: Vec<Rgba<u8>> = raster.pixels().copied().collect();
    assert_eq!(decoded, vec![black, red, green, blue, blue, green, red, black]);
}

#[test]
fn test_corrupt_strip_reports_location() {
    init_logger();

    let mut strips = compressed_strips(compression::DEFLATE, &rgb_rows());
    strips[1] = vec![0x78, 0x9C, 0xFF, 0xFF, 0xFF];
    let (file, offsets, counts) = assemble(&strips);

    let reader = StripDataReader::builder(WIDTH, HEIGHT)
        .bits_per_sample(&[8, 8, 8])
        .photometric(photometric::RGB)
        .rows_per_strip(ROWS_PER_STRIP)
        .strip_offsets(offsets)
        .strip_byte_counts(counts)
        .compression(compression::DEFLATE)
        .build()
        .unwrap();

    let mut source = ByteSourceArray::new(file);
    let mut raster = RgbaImage::new(WIDTH, HEIGHT);
    let err = reader.read_image_data(&mut raster, &mut source).unwrap_err();

    assert!(matches!(err, TiffError::DecompressionError { .. }));
    assert_eq!(err.location().map(|l| l.strip), Some(1));
}

#[test]
fn test_oversized_strip_is_cut_at_target_length() {
    init_logger();

    // One byte of image data, 16 MiB once inflated
    let mut inflated = vec![0u8; 16 * 1024 * 1024];
    inflated[0] = 200;
    let strip = deflate(&inflated);
    assert!(strip.len() < 1024 * 1024);
    let (file, offsets, counts) = assemble(&[strip]);

    let reader = StripDataReader::builder(1, 1)
        .bits_per_sample(&[8])
        .strip_offsets(offsets)
        .strip_byte_counts(counts)
        .compression(compression::DEFLATE)
        .build()
        .unwrap();

    let mut source = ByteSourceArray::new(file);
    let mut raster = RgbaImage::new(1, 1);
    reader.read_image_data(&mut raster, &mut source).unwrap();

    assert_eq!(raster.get_pixel(0, 0), &Rgba([200, 200, 200, 255]));
}
