#![forbid(unsafe_code)]

use crate::render::{Portrait, SheetError};
use base64::Engine as _;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("invalid background color for JPG rendering")]
    JpegBackground,
    #[error("JPG rendering requires an opaque background color (e.g. white)")]
    JpegOpaqueBackgroundRequired,
    #[error("failed to encode JPG")]
    JpegEncode,
    #[error("failed to convert SVG to PDF")]
    PdfConvert,
    #[error("unsupported portrait image format (expected PNG or JPEG)")]
    PortraitFormat,
    #[error("failed to decode portrait: {message}")]
    PortraitDecode { message: String },
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    /// Fill behind the sheet. The sheet paints its own theme background, so this only shows
    /// through where the SVG leaves pixels transparent.
    pub background: Option<String>,
    pub jpeg_quality: u8,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
            jpeg_quality: 90,
        }
    }
}

/// Reads the size of a PNG or JPEG and wraps the original bytes in a `data:` URI.
pub fn decode_portrait(bytes: &[u8]) -> Result<Portrait> {
    let format = image::guess_format(bytes).map_err(|_| RasterError::PortraitFormat)?;
    let mime = match format {
        image::ImageFormat::Png => "image/png",
        image::ImageFormat::Jpeg => "image/jpeg",
        _ => return Err(RasterError::PortraitFormat),
    };
    let (width, height) = image::ImageReader::with_format(std::io::Cursor::new(bytes), format)
        .into_dimensions()
        .map_err(|e| RasterError::PortraitDecode {
            message: e.to_string(),
        })?;
    let href = format!(
        "data:{mime};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    );
    Ok(Portrait::new(width, height, href))
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

pub fn svg_to_jpeg(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let bg = options.background.as_deref().unwrap_or("white");
    let Some(color) = parse_tiny_skia_color(bg) else {
        return Err(RasterError::JpegBackground);
    };
    if color.alpha() != 1.0 {
        return Err(RasterError::JpegOpaqueBackgroundRequired);
    }

    let pixmap = svg_to_pixmap(svg, options.scale, Some(bg))?;
    let (w, h) = (pixmap.width(), pixmap.height());

    // Opaque background means every alpha byte is 255.
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut out = Vec::new();
    let mut enc =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, options.jpeg_quality);
    enc.encode(&rgb, w, h, image::ExtendedColorType::Rgb8)
        .map_err(|_| RasterError::JpegEncode)?;
    Ok(out)
}

pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = svg2pdf::usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|_| RasterError::PdfConvert)
}

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;
    let size = tree.size();
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;
    tracing::trace!(width_px, height_px, "rasterizing sheet");

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;
    if let Some(color) = background.and_then(parse_tiny_skia_color) {
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

/// `transparent`, `white`, `black`, or `#rgb` / `#rgba` / `#rrggbb` / `#rrggbbaa`.
fn parse_tiny_skia_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0)),
        "white" => return Some(tiny_skia::Color::from_rgba8(255, 255, 255, 255)),
        "black" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 255)),
        _ => {}
    }

    let hex = s.strip_prefix('#')?;
    // `from_str_radix` alone would accept a sign byte such as `#+f+f+f`.
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok();
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let short = |i: usize| nibble(i).map(|v| (v << 4) | v);

    let [r, g, b, a] = match hex.len() {
        3 => [short(0)?, short(1)?, short(2)?, 255],
        4 => [short(0)?, short(1)?, short(2)?, short(3)?],
        6 => [byte(0)?, byte(2)?, byte(4)?, 255],
        8 => [byte(0)?, byte(2)?, byte(4)?, byte(6)?],
        _ => return None,
    };
    Some(tiny_skia::Color::from_rgba8(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10"><rect width="10" height="10" fill="#2c3e50"/></svg>"##;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 100, 50]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn svg_to_png_produces_png_signature() {
        let bytes = svg_to_png(SQUARE, &RasterOptions::default()).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn svg_to_jpeg_requires_opaque_background() {
        let bytes = svg_to_jpeg(SQUARE, &RasterOptions::default()).unwrap();
        assert!(bytes.starts_with(&[0xff, 0xd8]));

        let opts = RasterOptions {
            background: Some("transparent".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            svg_to_jpeg(SQUARE, &opts),
            Err(RasterError::JpegOpaqueBackgroundRequired)
        ));
    }

    #[test]
    fn svg_to_pdf_produces_pdf_signature() {
        let bytes = svg_to_pdf(SQUARE).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn parses_background_colors() {
        let c = parse_tiny_skia_color("#f9f9f9").unwrap();
        assert_eq!(c.to_color_u8().red(), 0xf9);
        assert_eq!(parse_tiny_skia_color("#fff8").unwrap().to_color_u8().alpha(), 0x88);
        assert!(parse_tiny_skia_color("#+f+f+f").is_none());
        assert!(parse_tiny_skia_color("#+fffff").is_none());
        assert!(parse_tiny_skia_color("#ggg").is_none());
        assert!(parse_tiny_skia_color("#12345").is_none());
        assert!(parse_tiny_skia_color("#ééé").is_none());
    }

    #[test]
    fn decode_portrait_reads_size_and_embeds_bytes() {
        let bytes = png_bytes(4, 3);
        let portrait = decode_portrait(&bytes).unwrap();
        assert_eq!((portrait.width, portrait.height), (4, 3));
        assert!(portrait.href.starts_with("data:image/png;base64,iVBOR"));
    }

    #[test]
    fn decode_portrait_rejects_non_images() {
        assert!(matches!(
            decode_portrait(b"not an image"),
            Err(RasterError::PortraitFormat)
        ));
    }
}
