//! 입력 이미지 디코딩.
//!
//! 인식기에 들어오는 바이트가 실제로 열 수 있는 이미지인지 확인한다.
//! 여기서의 실패는 "텍스트 없음"과 구분되는 `CoreError::ImageDecode`로 보고된다.

use image::{DynamicImage, GenericImageView, ImageFormat};
use vnlive_core::error::CoreError;

/// 이미지 바이트 디코딩
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::ImageDecode("빈 입력".to_string()));
    }

    let img = image::load_from_memory(bytes)
        .map_err(|e| CoreError::ImageDecode(format!("{e}")))?;

    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(CoreError::ImageDecode(format!("크기가 0인 이미지: {w}x{h}")));
    }

    Ok(img)
}

/// 바이트에서 추정한 이미지 형식의 파일 확장자 (알 수 없으면 "png")
pub fn file_extension(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .ok()
        .and_then(|format: ImageFormat| format.extensions_str().first().copied())
        .unwrap_or("png")
}


#[cfg(test)]
mod tests {
    use super::test_support::png_bytes;
    use super::*;

    #[test]
    fn decodes_valid_png() {
        let img = decode_image(&png_bytes(8, 4)).unwrap();
        assert_eq!(img.dimensions(), (8, 4));
    }

    #[test]
    fn garbage_is_image_decode_error() {
        let err = decode_image(b"fake-image").unwrap_err();
        assert!(err.is_image_decode());
    }

    #[test]
    fn empty_input_is_image_decode_error() {
        assert!(decode_image(&[]).unwrap_err().is_image_decode());
    }

    #[test]
    fn truncated_png_is_image_decode_error() {
        let bytes = png_bytes(16, 16);
        let truncated = &bytes[..bytes.len() / 2];
        assert!(decode_image(truncated).unwrap_err().is_image_decode());
    }

    #[test]
    fn extension_from_magic_bytes() {
        assert_eq!(file_extension(&png_bytes(1, 1)), "png");
        assert_eq!(file_extension(b"???"), "png");
    }
}
