//! Minimal single-page PDF writer.
//!
//! Covers what an invoice needs from PDF 1.4: text in the two standard
//! Helvetica faces, ruled lines and one 8-bit grayscale image. Streams are
//! stored uncompressed.

use std::fmt::Write as _;

use image::GrayImage;

/// A4 portrait, in points
pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// Drawing operations for one page. Coordinates are PDF user space, origin
/// at the bottom left.
#[derive(Debug, Default)]
pub struct Page {
    content: String,
    image: Option<GrayImage>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, font: Font, size: f32, x: f32, y: f32, text: &str) {
        let _ = writeln!(
            self.content,
            "BT /{} {} Tf {} {} Td ({}) Tj ET",
            font.resource(),
            size,
            x,
            y,
            escape_text(text)
        );
    }

    pub fn rule(&mut self, x1: f32, x2: f32, y: f32) {
        let _ = writeln!(self.content, "0.5 w {} {} m {} {} l S", x1, y, x2, y);
    }

    /// Place `image` as a `size` x `size` square with its lower left corner
    /// at (`x`, `y`). A page holds one image; a second call replaces it.
    pub fn image(&mut self, image: GrayImage, x: f32, y: f32, size: f32) {
        let _ = writeln!(self.content, "q {} 0 0 {} {} {} cm /Im1 Do Q", size, size, x, y);
        self.image = Some(image);
    }

    /// Serialize the page as a complete PDF file
    pub fn finish(self) -> Vec<u8> {
        let mut objects: Vec<Vec<u8>> = vec![
            b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
            b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_vec(),
        ];

        let xobject = if self.image.is_some() {
            " /XObject << /Im1 7 0 R >>"
        } else {
            ""
        };
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 4 0 R /F2 5 0 R >>{} >> /Contents 6 0 R >>",
                PAGE_WIDTH, PAGE_HEIGHT, xobject
            )
            .into_bytes(),
        );
        objects.push(
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_vec(),
        );
        objects.push(
            b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
                .to_vec(),
        );
        objects.push(stream_object("", self.content.as_bytes()));
        if let Some(image) = &self.image {
            let dict = format!(
                "/Type /XObject /Subtype /Image /Width {} /Height {} \
                 /ColorSpace /DeviceGray /BitsPerComponent 8 ",
                image.width(),
                image.height()
            );
            objects.push(stream_object(&dict, image.as_raw()));
        }

        let mut out = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        let mut offsets = Vec::with_capacity(objects.len());
        for (index, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }

        // Cross-reference entries are fixed at 20 bytes each
        let xref_start = out.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            let _ = writeln!(xref, "{:010} 00000 n ", offset);
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_start
        );
        out.extend_from_slice(xref.as_bytes());
        out
    }
}

fn stream_object(dict: &str, data: &[u8]) -> Vec<u8> {
    let mut object = format!("<< {}/Length {} >>\nstream\n", dict, data.len()).into_bytes();
    object.extend_from_slice(data);
    object.extend_from_slice(b"\nendstream");
    object
}

/// Escape `text` for a PDF literal string in WinAnsiEncoding.
///
/// Latin-1 and the common typographic punctuation are written as octal
/// escapes; anything else the encoding cannot show becomes `?`.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                escaped.push('\\');
                escaped.push(c);
            }
            ' '..='~' => escaped.push(c),
            _ => match win_ansi_code(c) {
                Some(code) => {
                    let _ = write!(escaped, "\\{:03o}", code);
                }
                None => escaped.push('?'),
            },
        }
    }
    escaped
}

fn win_ansi_code(c: char) -> Option<u8> {
    let code = match c {
        '\u{20AC}' => 0x80,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
        _ => return None,
    };
    Some(code)
}

/// Greedy word wrap at `width` characters. Words longer than `width` get a
/// line of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    fn startxref(pdf: &[u8]) -> usize {
        let at = find(pdf, b"startxref\n").unwrap() + "startxref\n".len();
        let digits: String = pdf[at..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .map(|&b| b as char)
            .collect();
        digits.parse().unwrap()
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("Printer (100 Shots)"), "Printer \\(100 Shots\\)");
        assert_eq!(escape_text("a\\b"), "a\\\\b");
        assert_eq!(escape_text("Café"), "Caf\\351");
        assert_eq!(escape_text("10:00 \u{2013} 2:00"), "10:00 \\226 2:00");
        assert_eq!(escape_text("写真"), "??");
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three four", 9), vec!["one two", "three", "four"]);
        assert_eq!(wrap("  ", 10), Vec::<String>::new());
        assert_eq!(wrap("supercalifragilistic ok", 5), vec!["supercalifragilistic", "ok"]);
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut page = Page::new();
        page.text(Font::Bold, 20.0, 50.0, 792.0, "Invoice");
        page.rule(50.0, 545.0, 700.0);
        page.image(GrayImage::from_pixel(4, 4, image::Luma([0u8])), 400.0, 650.0, 100.0);
        let pdf = page.finish();

        assert!(pdf.starts_with(b"%PDF-1.4\n"));
        assert!(pdf.ends_with(b"%%EOF\n"));

        let xref = startxref(&pdf);
        assert!(pdf[xref..].starts_with(b"xref\n0 8\n0000000000 65535 f \n"));

        let table = &pdf[xref + "xref\n0 8\n".len() + 20..];
        for object in 1..=7 {
            let entry = &table[(object - 1) * 20..object * 20];
            let offset: usize = std::str::from_utf8(&entry[..10]).unwrap().parse().unwrap();
            let header = format!("{} 0 obj\n", object);
            assert!(pdf[offset..].starts_with(header.as_bytes()), "object {}", object);
        }
    }

    #[test]
    fn test_page_without_image_has_six_objects() {
        let mut page = Page::new();
        page.text(Font::Regular, 11.0, 50.0, 700.0, "Total");
        let pdf = page.finish();

        assert!(find(&pdf, b"/XObject").is_none());
        assert!(find(&pdf, b"(Total) Tj").is_some());
        let xref = startxref(&pdf);
        assert!(pdf[xref..].starts_with(b"xref\n0 7\n"));
    }
}
