use crate::math::stats::StatsHelper;
use crate::prelude::{PlotError, PlotResult};
use std::io::Cursor;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{colortype, TiffEncoder};
use tiff::ColorType;

/// One 8-bit grayscale page of the packed cube, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> PlotResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected || expected == 0 {
            return Err(PlotError::InvalidData(format!(
                "frame {}x{} needs {} pixels, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn extrema(&self) -> Option<(u8, u8)> {
        StatsHelper::extrema(&self.pixels)
    }
}

/// Packs frames as the pages of a single multi-page Gray8 TIFF.
pub fn encode_frames(frames: &[Frame]) -> PlotResult<Vec<u8>> {
    if frames.is_empty() {
        return Err(PlotError::InvalidData("no frames to encode".into()));
    }

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut encoder = TiffEncoder::new(&mut cursor).map_err(encoding_error)?;
        for frame in frames {
            encoder
                .write_image::<colortype::Gray8>(frame.width, frame.height, &frame.pixels)
                .map_err(encoding_error)?;
        }
    }
    Ok(cursor.into_inner())
}

/// Reads every page of a Gray8 TIFF back into frames.
pub fn decode_frames(bytes: &[u8]) -> PlotResult<Vec<Frame>> {
    let mut decoder = Decoder::new(Cursor::new(bytes)).map_err(encoding_error)?;
    let mut frames = Vec::new();

    loop {
        let color = decoder.colortype().map_err(encoding_error)?;
        if color != ColorType::Gray(8) {
            return Err(PlotError::Encoding(format!(
                "page {} has color type {:?}, expected 8-bit grayscale",
                frames.len(),
                color
            )));
        }
        let (width, height) = decoder.dimensions().map_err(encoding_error)?;
        let pixels = match decoder.read_image().map_err(encoding_error)? {
            DecodingResult::U8(pixels) => pixels,
            _ => return Err(PlotError::Encoding("unexpected sample format".into())),
        };
        frames.push(Frame::new(width, height, pixels)?);

        if !decoder.more_images() {
            break;
        }
        decoder.next_image().map_err(encoding_error)?;
    }

    Ok(frames)
}

fn encoding_error(err: tiff::TiffError) -> PlotError {
    PlotError::Encoding(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: u32, height: u32, offset: u8) -> Frame {
        let pixels = (0..width * height)
            .map(|i| (i as u8).wrapping_add(offset))
            .collect();
        Frame::new(width, height, pixels).unwrap()
    }

    #[test]
    fn frame_rejects_wrong_pixel_count() {
        assert!(Frame::new(2, 2, vec![0; 3]).is_err());
        assert!(Frame::new(0, 4, Vec::new()).is_err());
    }

    #[test]
    fn encoded_pages_decode_in_order() {
        let frames = vec![ramp(3, 2, 0), ramp(3, 2, 10), ramp(3, 2, 20)];
        let bytes = encode_frames(&frames).unwrap();
        assert!(bytes.starts_with(b"II") || bytes.starts_with(b"MM"));

        let decoded = decode_frames(&bytes).unwrap();
        assert_eq!(decoded, frames);
    }

    #[test]
    fn encoding_nothing_is_an_error() {
        assert!(matches!(
            encode_frames(&[]),
            Err(PlotError::InvalidData(_))
        ));
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(matches!(
            decode_frames(b"not a tiff"),
            Err(PlotError::Encoding(_))
        ));
    }
}
