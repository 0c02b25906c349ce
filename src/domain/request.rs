use image::ImageFormat;
use serde::Serialize;

/// Image embedded in a request, already base64 encoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineImage {
    pub mime_type: &'static str,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InspectionRequest {
    pub instruction: &'static str,
    pub image: InlineImage,
}

/// HEIF family brands found in the `ftyp` box of phone camera photos.
const HEIF_BRANDS: [(&[u8; 4], &str); 5] = [
    (b"heic", "image/heic"),
    (b"heix", "image/heic"),
    (b"hevc", "image/heic"),
    (b"mif1", "image/heif"),
    (b"msf1", "image/heif"),
];

/// MIME type accepted by the model, read from the file's leading bytes.
/// The file name plays no part: a text file called `strip.jpg` is `None`.
pub fn sniff_mime_type(bytes: &[u8]) -> Option<&'static str> {
    if let Some(mime) = heif_mime_type(bytes) {
        return Some(mime);
    }

    match image::guess_format(bytes).ok()? {
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Png => Some("image/png"),
        ImageFormat::WebP => Some("image/webp"),
        ImageFormat::Gif => Some("image/gif"),
        other => {
            tracing::debug!("Recognized {:?} image, not accepted by the model", other);
            None
        }
    }
}

fn heif_mime_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.get(4..8)? != b"ftyp" {
        return None;
    }
    let brand = bytes.get(8..12)?;
    HEIF_BRANDS
        .iter()
        .find(|(b, _)| brand == b.as_slice())
        .map(|(_, mime)| *mime)
}
