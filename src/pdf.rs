//! PDF drawing backend for `plotters`
//!
//! Records drawing calls as PDF content-stream operators and writes a
//! single-page document with `lopdf` on `present`. Backend coordinates are
//! points with the origin at the top left; they are flipped to PDF's
//! bottom-left origin when recorded. Text is set in the standard Helvetica
//! faces, so no system font is needed.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
    FontStyle, FontTransform,
};
use thiserror::Error;

/// Average Helvetica advance width, in em
const AVG_GLYPH_WIDTH: f64 = 0.52;

/// Bezier control distance for a quarter circle of radius 1
const KAPPA: f64 = 0.552_284_8;

/// PDF backend errors
#[derive(Error, Debug)]
pub enum PdfError {
    /// Content stream could not be encoded
    #[error("PDF encode error: {0}")]
    Encode(String),

    /// Document could not be written
    #[error("PDF write error: {0}")]
    Write(String),
}

type DrawResult = Result<(), DrawingErrorKind<PdfError>>;

/// Single-page PDF target sized in points.
pub struct PdfBackend<'a> {
    path: &'a Path,
    size: (u32, u32),
    operations: Vec<Operation>,
}

impl<'a> PdfBackend<'a> {
    /// Create a backend that writes to `path` on `present`.
    pub fn new<T: AsRef<Path> + ?Sized>(path: &'a T, size: (u32, u32)) -> Self {
        Self {
            path: path.as_ref(),
            size,
            operations: Vec::new(),
        }
    }

    /// Assemble the document from the recorded operations.
    ///
    /// # Errors
    ///
    /// Returns `PdfError::Encode` if the content stream cannot be encoded
    pub fn document(&self) -> Result<Document, PdfError> {
        let content = Content {
            operations: self.operations.clone(),
        }
        .encode()
        .map_err(|e| PdfError::Encode(e.to_string()))?;

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id,
            },
        });
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let media_box: Vec<Object> = vec![
            0_i64.into(),
            0_i64.into(),
            i64::from(self.size.0).into(),
            i64::from(self.size.1).into(),
        ];
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::from(page_id)],
                "Count" => 1_i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();
        Ok(doc)
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    fn flip(&self, y: i32) -> f64 {
        f64::from(self.size.1) - f64::from(y)
    }

    fn point(&mut self, operator: &str, (x, y): BackendCoord) {
        let y = self.flip(y);
        self.op(operator, vec![real(f64::from(x)), real(y)]);
    }

    fn stroke_color(&mut self, color: BackendColor, width: u32) {
        self.op("RG", rgb(color).to_vec());
        self.op("w", vec![Object::Integer(i64::from(width))]);
    }

    fn fill_color(&mut self, color: BackendColor) {
        self.op("rg", rgb(color).to_vec());
    }

    fn curve(&mut self, coords: [f64; 6]) {
        self.op("c", coords.iter().map(|&v| real(v)).collect());
    }
}

#[allow(clippy::cast_possible_truncation)]
fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

/// Color over a white page; the page has no transparency groups.
#[allow(clippy::cast_possible_truncation)]
fn rgb(color: BackendColor) -> [Object; 3] {
    let alpha = color.alpha.clamp(0.0, 1.0);
    let blend = |c: u8| real(alpha.mul_add(f64::from(c), (1.0 - alpha) * 255.0) / 255.0);
    let (r, g, b) = color.rgb;
    [blend(r), blend(g), blend(b)]
}

/// Approximate (width, height) of `text` at `size` points.
#[allow(clippy::cast_precision_loss)]
fn text_extent(text: &str, size: f64) -> (f64, f64) {
    (text.chars().count() as f64 * AVG_GLYPH_WIDTH * size, size)
}

impl DrawingBackend for PdfBackend<'_> {
    type ErrorType = PdfError;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> DrawResult {
        Ok(())
    }

    fn present(&mut self) -> DrawResult {
        let mut doc = self.document().map_err(DrawingErrorKind::DrawingError)?;
        doc.save(self.path)
            .map_err(|e| DrawingErrorKind::DrawingError(PdfError::Write(e.to_string())))?;
        Ok(())
    }

    fn draw_pixel(&mut self, point: BackendCoord, color: BackendColor) -> DrawResult {
        if color.alpha <= 0.0 {
            return Ok(());
        }
        self.fill_color(color);
        let y = self.flip(point.1 + 1);
        self.op(
            "re",
            vec![real(f64::from(point.0)), real(y), real(1.0), real(1.0)],
        );
        self.op("f", vec![]);
        Ok(())
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> DrawResult {
        self.draw_path([from, to], style)
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> DrawResult {
        let color = style.color();
        if color.alpha <= 0.0 {
            return Ok(());
        }
        let x = f64::from(upper_left.0);
        let y = self.flip(bottom_right.1);
        let width = f64::from(bottom_right.0 - upper_left.0);
        let height = f64::from(bottom_right.1 - upper_left.1);
        if fill {
            self.fill_color(color);
        } else {
            self.stroke_color(color, style.stroke_width());
        }
        self.op("re", vec![real(x), real(y), real(width), real(height)]);
        self.op(if fill { "f" } else { "S" }, vec![]);
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> DrawResult {
        let color = style.color();
        if color.alpha <= 0.0 {
            return Ok(());
        }
        let mut points = path.into_iter();
        let Some(first) = points.next() else {
            return Ok(());
        };
        self.stroke_color(color, style.stroke_width());
        self.point("m", first);
        for p in points {
            self.point("l", p);
        }
        self.op("S", vec![]);
        Ok(())
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> DrawResult {
        let color = style.color();
        if color.alpha <= 0.0 {
            return Ok(());
        }
        let mut points = vert.into_iter();
        let Some(first) = points.next() else {
            return Ok(());
        };
        self.fill_color(color);
        self.point("m", first);
        for p in points {
            self.point("l", p);
        }
        self.op("h", vec![]);
        self.op("f", vec![]);
        Ok(())
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> DrawResult {
        let color = style.color();
        if color.alpha <= 0.0 {
            return Ok(());
        }
        if fill {
            self.fill_color(color);
        } else {
            self.stroke_color(color, style.stroke_width());
        }
        let (cx, cy) = (f64::from(center.0), self.flip(center.1));
        let r = f64::from(radius);
        let k = KAPPA * r;
        self.op("m", vec![real(cx + r), real(cy)]);
        self.curve([cx + r, cy + k, cx + k, cy + r, cx, cy + r]);
        self.curve([cx - k, cy + r, cx - r, cy + k, cx - r, cy]);
        self.curve([cx - r, cy - k, cx - k, cy - r, cx, cy - r]);
        self.curve([cx + k, cy - r, cx + r, cy - k, cx + r, cy]);
        self.op(if fill { "f" } else { "S" }, vec![]);
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<PdfError>> {
        let (width, height) = text_extent(text, style.size());
        Ok((width.ceil() as u32, height.ceil() as u32))
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> DrawResult {
        let color = style.color();
        if color.alpha <= 0.0 || text.is_empty() {
            return Ok(());
        }
        let size = style.size();
        let (width, _) = text_extent(text, size);
        let anchor = style.anchor();

        // Baseline origin relative to the anchor, in text space (y up)
        let dx = match anchor.h_pos {
            HPos::Left => 0.0,
            HPos::Center => -width / 2.0,
            HPos::Right => -width,
        };
        let dy = match anchor.v_pos {
            VPos::Top => -0.75 * size,
            VPos::Center => -0.35 * size,
            VPos::Bottom => 0.2 * size,
        };
        let (a, b, c, d): (f64, f64, f64, f64) = match style.transform() {
            FontTransform::None => (1.0, 0.0, 0.0, 1.0),
            FontTransform::Rotate90 => (0.0, -1.0, 1.0, 0.0),
            FontTransform::Rotate180 => (-1.0, 0.0, 0.0, -1.0),
            FontTransform::Rotate270 => (0.0, 1.0, -1.0, 0.0),
        };
        let x = a.mul_add(dx, c * dy) + f64::from(pos.0);
        let y = b.mul_add(dx, d * dy) + self.flip(pos.1);
        let font = if matches!(style.style(), FontStyle::Bold) {
            "F2"
        } else {
            "F1"
        };

        self.fill_color(color);
        self.op("BT", vec![]);
        self.op("Tf", vec![font.into(), real(size)]);
        self.op(
            "Tm",
            vec![real(a), real(b), real(c), real(d), real(x), real(y)],
        );
        self.op("Tj", vec![Object::string_literal(text)]);
        self.op("ET", vec![]);
        Ok(())
    }
}
