use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

use crate::models::error::CaptureError;
use crate::models::media::VideoFrame;

/// Encode an RGB8 frame as JPEG.
///
/// An empty or malformed frame is reported as `NoLiveFrame`: the camera has
/// not rendered anything usable yet.
pub fn encode_jpeg(frame: &VideoFrame, quality: u8) -> Result<Vec<u8>, CaptureError> {
    if !frame.is_valid() {
        return Err(CaptureError::NoLiveFrame);
    }

    let mut buffer = Vec::new();
    let mut cursor = Cursor::new(&mut buffer);
    let mut encoder = JpegEncoder::new_with_quality(&mut cursor, quality);
    encoder
        .encode(&frame.data, frame.width, frame.height, ExtendedColorType::Rgb8)
        .map_err(|e| CaptureError::EncodingFailed(format!("JPEG encoding failed: {}", e)))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> VideoFrame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 4) as u8, (y * 4) as u8, 128]);
            }
        }
        VideoFrame::new(width, height, data)
    }

    #[test]
    fn produces_jpeg_markers() {
        let jpeg = encode_jpeg(&gradient(32, 24), 92).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn decodes_back_to_same_dimensions() {
        let jpeg = encode_jpeg(&gradient(40, 30), 92).unwrap();
        let decoded = image::load_from_memory_with_format(&jpeg, image::ImageFormat::Jpeg).unwrap();
        assert_eq!(decoded.width(), 40);
        assert_eq!(decoded.height(), 30);
    }

    #[test]
    fn empty_frame_is_no_live_frame() {
        let frame = VideoFrame::new(0, 0, Vec::new());
        assert_eq!(encode_jpeg(&frame, 92), Err(CaptureError::NoLiveFrame));
    }

    #[test]
    fn short_buffer_is_no_live_frame() {
        let frame = VideoFrame::new(4, 4, vec![0; 10]);
        assert_eq!(encode_jpeg(&frame, 92), Err(CaptureError::NoLiveFrame));
    }
}
