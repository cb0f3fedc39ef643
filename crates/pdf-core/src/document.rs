//! PDF Document builder

use crate::font::deflate;
use crate::text::{
    generate_line_operators, generate_rect_operators, generate_text_operators, TextRenderContext,
};
use crate::{Align, FontData, PdfError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::{BTreeMap, HashMap};

/// A4 portrait width in points
pub const A4_WIDTH: f64 = 595.28;
/// A4 portrait height in points
pub const A4_HEIGHT: f64 = 841.89;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Red color
    pub fn red() -> Self {
        Self::rgb(1.0, 0.0, 0.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// PDF Document builder providing high-level drawing operations
///
/// Coordinates passed to drawing methods are measured from the top-left
/// corner of the page; they are flipped to PDF's bottom-left origin here.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Object ID of the root Pages node
    pages_id: ObjectId,
    /// Page object IDs and sizes in page order
    pages: Vec<(ObjectId, f64, f64)>,
    /// Loaded fonts (font name -> data)
    fonts: HashMap<String, FontData>,
    /// Current font name
    current_font: Option<String>,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Current stroke color
    current_stroke_color: Color,
    /// Current stroke width
    current_line_width: f64,
    /// Page font resources (page number -> font name -> resource name)
    page_font_resources: HashMap<usize, BTreeMap<String, String>>,
    /// Next font resource number
    next_font_resource: u32,
    /// Buffered content operators per page (page number -> operators)
    page_content_buffer: HashMap<usize, Vec<u8>>,
}

impl PdfDocument {
    /// Create an empty document with a single blank page
    ///
    /// # Arguments
    /// * `width` - Page width in points
    /// * `height` - Page height in points
    ///
    /// # Example
    /// ```ignore
    /// let mut doc = PdfDocument::new(A4_WIDTH, A4_HEIGHT)?;
    /// doc.add_font("gothic", &std::fs::read("IPAexGothic.ttf")?)?;
    /// doc.set_font("gothic", 10.0)?;
    /// doc.insert_text("事業内容報告書", 1, 297.64, 90.0, Align::Center)?;
    /// let bytes = doc.to_bytes()?;
    /// ```
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(PdfError::InvalidPageSize(width, height));
        }

        let mut inner = Document::with_version("1.7");

        let pages_id = inner.add_object(Dictionary::from_iter(vec![
            ("Type", Object::from("Pages")),
            ("Kids", Object::Array(vec![])),
            ("Count", Object::Integer(0)),
        ]));

        let catalog_id = inner.add_object(Dictionary::from_iter(vec![
            ("Type", Object::from("Catalog")),
            ("Pages", Object::Reference(pages_id)),
        ]));
        inner.trailer.set("Root", Object::Reference(catalog_id));

        let mut doc = Self {
            inner,
            pages_id,
            pages: Vec::new(),
            fonts: HashMap::new(),
            current_font: None,
            current_font_size: 12.0,
            current_text_color: Color::default(),
            current_stroke_color: Color::default(),
            current_line_width: 0.5,
            page_font_resources: HashMap::new(),
            next_font_resource: 1,
            page_content_buffer: HashMap::new(),
        };

        doc.add_blank_page(width, height)?;
        Ok(doc)
    }

    /// Create an empty A4 portrait document
    pub fn a4() -> Result<Self> {
        Self::new(A4_WIDTH, A4_HEIGHT)
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append a blank page and return its page number (1-indexed)
    pub fn add_blank_page(&mut self, width: f64, height: f64) -> Result<usize> {
        if !(width > 0.0 && height > 0.0) {
            return Err(PdfError::InvalidPageSize(width, height));
        }

        let page_id = self.inner.add_object(Dictionary::from_iter(vec![
            ("Type", Object::from("Page")),
            ("Parent", Object::Reference(self.pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(width as f32),
                    Object::Real(height as f32),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
        ]));

        self.pages.push((page_id, width, height));

        let kids: Vec<Object> = self
            .pages
            .iter()
            .map(|(id, _, _)| Object::Reference(*id))
            .collect();

        let pages_dict = self
            .inner
            .get_object_mut(self.pages_id)?
            .as_dict_mut()
            .map_err(|_| PdfError::ParseError("Pages object is not a dictionary".to_string()))?;
        pages_dict.set("Kids", Object::Array(kids));
        pages_dict.set("Count", Object::Integer(self.pages.len() as i64));

        Ok(self.pages.len())
    }

    /// Add a TrueType font to the document
    ///
    /// # Arguments
    /// * `name` - Font identifier (used in set_font)
    /// * `ttf_data` - TrueType font file bytes
    pub fn add_font(&mut self, name: &str, ttf_data: &[u8]) -> Result<()> {
        let font_data = FontData::from_ttf(name, ttf_data)?;
        self.add_font_data(font_data)
    }

    /// Add an already parsed font to the document
    pub fn add_font_data(&mut self, font_data: FontData) -> Result<()> {
        if self.fonts.contains_key(&font_data.name) {
            return Err(PdfError::FontAlreadyExists(font_data.name));
        }

        self.fonts.insert(font_data.name.clone(), font_data);
        Ok(())
    }

    /// Set the current font and size
    ///
    /// # Arguments
    /// * `name` - Font identifier
    /// * `size` - Font size in points
    pub fn set_font(&mut self, name: &str, size: f32) -> Result<()> {
        if !self.fonts.contains_key(name) {
            return Err(PdfError::FontNotFound(name.to_string()));
        }

        self.current_font = Some(name.to_string());
        self.current_font_size = size;
        Ok(())
    }

    /// Set only the font size (keeps current font)
    pub fn set_font_size(&mut self, size: f32) -> Result<()> {
        if self.current_font.is_none() {
            return Err(PdfError::FontNotFound("No font set".to_string()));
        }

        self.current_font_size = size;
        Ok(())
    }

    /// Set the text color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Set the stroke color and width used by rectangles and lines
    pub fn set_stroke(&mut self, color: Color, line_width: f64) {
        self.current_stroke_color = color;
        self.current_line_width = line_width;
    }

    /// Get the current font data
    fn current_font_data(&self) -> Result<&FontData> {
        let name = self
            .current_font
            .as_ref()
            .ok_or_else(|| PdfError::FontNotFound("No font set".to_string()))?;
        self.fonts
            .get(name)
            .ok_or_else(|| PdfError::FontNotFound(name.clone()))
    }

    /// Get a loaded font by name
    pub fn font(&self, name: &str) -> Option<&FontData> {
        self.fonts.get(name)
    }

    /// Look up a page's ID and height
    fn page_info(&self, page: usize) -> Result<(ObjectId, f64)> {
        if page == 0 || page > self.pages.len() {
            return Err(PdfError::InvalidPage(page, self.pages.len()));
        }
        let (id, _, height) = self.pages[page - 1];
        Ok((id, height))
    }

    /// Insert text at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert (a single line)
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Baseline Y coordinate in points (from top)
    /// * `align` - Text alignment relative to `x`
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        let (_, page_height) = self.page_info(page)?;

        if text.is_empty() {
            return Ok(());
        }

        let font_name = self
            .current_font
            .clone()
            .ok_or_else(|| PdfError::FontNotFound("No font set".to_string()))?;

        let (text_hex, text_width) = {
            let font_data = self
                .fonts
                .get_mut(&font_name)
                .ok_or_else(|| PdfError::FontNotFound(font_name.clone()))?;
            font_data.add_chars(text);
            (
                font_data.encode_text_hex(text),
                font_data.text_width_points(text, self.current_font_size) as f64,
            )
        };

        let font_resource_name = self.get_or_create_font_ref(&font_name, page);

        let ctx = TextRenderContext {
            font_name: font_resource_name,
            font_size: self.current_font_size,
            text_width,
            color: self.current_text_color,
        };

        // Convert Y coordinate from top-origin to PDF bottom-origin
        let operators = generate_text_operators(&text_hex, x, page_height - y, align, &ctx);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Draw a stroked rectangle
    ///
    /// # Arguments
    /// * `page` - Page number (1-indexed)
    /// * `x` - Left edge in points
    /// * `y` - Top edge in points (from top)
    /// * `width` - Width in points
    /// * `height` - Height in points (extends downwards)
    pub fn draw_rect(&mut self, page: usize, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        let (_, page_height) = self.page_info(page)?;

        let operators = generate_rect_operators(
            x,
            page_height - y - height,
            width,
            height,
            self.current_line_width,
            self.current_stroke_color,
        );
        self.buffer_content(page, &operators);
        Ok(())
    }

    /// Draw a straight line between two top-origin points
    pub fn draw_line(&mut self, page: usize, from: (f64, f64), to: (f64, f64)) -> Result<()> {
        let (_, page_height) = self.page_info(page)?;

        let operators = generate_line_operators(
            (from.0, page_height - from.1),
            (to.0, page_height - to.1),
            self.current_line_width,
            self.current_stroke_color,
        );
        self.buffer_content(page, &operators);
        Ok(())
    }

    /// Get current font's text width for a string, in points
    pub fn get_text_width(&self, text: &str) -> Result<f64> {
        let font_data = self.current_font_data()?;
        Ok(font_data.text_width_points(text, self.current_font_size) as f64)
    }

    /// Get or create a font reference for a specific page
    ///
    /// Returns the resource name (e.g., "F1", "F2") for use in content streams
    pub fn get_or_create_font_ref(&mut self, font_name: &str, page: usize) -> String {
        let page_resources = self.page_font_resources.entry(page).or_default();

        if let Some(resource_name) = page_resources.get(font_name) {
            return resource_name.clone();
        }

        let resource_name = format!("F{}", self.next_font_resource);
        self.next_font_resource += 1;

        page_resources.insert(font_name.to_string(), resource_name.clone());
        resource_name
    }

    /// Buffer content operators for a page (written at save time)
    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        self.page_content_buffer
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        // 1. Embed fonts with their complete character sets
        let embedded = self.embed_fonts()?;

        // 2. Attach font resources to pages
        self.finalize_page_font_resources(&embedded)?;

        // 3. Flush buffered content streams to pages
        self.flush_content_buffers()?;

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Embed every font that has been used
    fn embed_fonts(&mut self) -> Result<HashMap<String, ObjectId>> {
        let mut font_names: Vec<String> = self
            .fonts
            .values()
            .filter(|font| !font.used_chars.is_empty())
            .map(|font| font.name.clone())
            .collect();
        font_names.sort();

        let mut embedded = HashMap::new();
        for font_name in font_names {
            let id = self.embed_font_object(&font_name)?;
            embedded.insert(font_name, id);
        }

        Ok(embedded)
    }

    /// Embed a single font object into the PDF
    fn embed_font_object(&mut self, font_name: &str) -> Result<ObjectId> {
        let font_objects = self
            .fonts
            .get(font_name)
            .ok_or_else(|| PdfError::FontNotFound(font_name.to_string()))?
            .to_pdf_objects()?;

        let font_file_id = self.inner.add_object(font_objects.font_file_stream);

        let mut font_descriptor = font_objects.font_descriptor;
        font_descriptor.set("FontFile2", Object::Reference(font_file_id));
        let font_descriptor_id = self.inner.add_object(font_descriptor);

        let mut cid_font = font_objects.cid_font;
        cid_font.set("FontDescriptor", Object::Reference(font_descriptor_id));
        let cid_font_id = self.inner.add_object(cid_font);

        let tounicode_id = self.inner.add_object(font_objects.tounicode_stream);

        let mut type0_font = font_objects.type0_font;
        type0_font.set(
            "DescendantFonts",
            Object::Array(vec![Object::Reference(cid_font_id)]),
        );
        type0_font.set("ToUnicode", Object::Reference(tounicode_id));

        Ok(self.inner.add_object(type0_font))
    }

    /// Add font references to each page's Resources dictionary
    fn finalize_page_font_resources(&mut self, embedded: &HashMap<String, ObjectId>) -> Result<()> {
        let page_resources: Vec<(usize, BTreeMap<String, String>)> =
            self.page_font_resources.drain().collect();

        for (page, fonts) in page_resources {
            let (page_id, _) = self.page_info(page)?;

            let mut font_dict = Dictionary::new();
            for (font_name, resource_name) in &fonts {
                let font_ref = embedded
                    .get(font_name)
                    .ok_or_else(|| PdfError::FontNotFound(font_name.clone()))?;
                font_dict.set(resource_name.as_bytes(), Object::Reference(*font_ref));
            }

            let page_dict = self
                .inner
                .get_object_mut(page_id)?
                .as_dict_mut()
                .map_err(|_| PdfError::SaveError("Page object is not a dictionary".to_string()))?;

            let mut resources = match page_dict.get(b"Resources") {
                Ok(Object::Dictionary(dict)) => dict.clone(),
                _ => Dictionary::new(),
            };
            resources.set("Font", Object::Dictionary(font_dict));
            page_dict.set("Resources", Object::Dictionary(resources));
        }

        Ok(())
    }

    /// Write each page's buffered operators as one compressed content stream
    fn flush_content_buffers(&mut self) -> Result<()> {
        let buffers: Vec<(usize, Vec<u8>)> = self.page_content_buffer.drain().collect();

        for (page, content) in buffers {
            if content.is_empty() {
                continue;
            }
            let (page_id, _) = self.page_info(page)?;

            let stream = Stream::new(
                Dictionary::from_iter(vec![("Filter", Object::from("FlateDecode"))]),
                deflate(&content)?,
            );
            let stream_id = self.inner.add_object(stream);

            let page_dict = self
                .inner
                .get_object_mut(page_id)?
                .as_dict_mut()
                .map_err(|_| PdfError::SaveError("Page object is not a dictionary".to_string()))?;
            page_dict.set("Contents", Object::Reference(stream_id));
        }

        Ok(())
    }

    /// Get the page IDs in page order
    pub fn get_page_ids(&self) -> Vec<ObjectId> {
        self.pages.iter().map(|(id, _, _)| *id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_one_page() {
        let doc = PdfDocument::a4().unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.get_page_ids().len(), 1);
    }

    #[test]
    fn test_rejects_bad_page_size() {
        assert!(matches!(
            PdfDocument::new(0.0, 100.0),
            Err(PdfError::InvalidPageSize(_, _))
        ));
    }

    #[test]
    fn test_add_blank_page_numbers() {
        let mut doc = PdfDocument::a4().unwrap();
        assert_eq!(doc.add_blank_page(A4_WIDTH, A4_HEIGHT).unwrap(), 2);
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_insert_text_without_font() {
        let mut doc = PdfDocument::a4().unwrap();
        let result = doc.insert_text("総会", 1, 50.0, 50.0, Align::Left);
        assert!(matches!(result, Err(PdfError::FontNotFound(_))));
    }

    #[test]
    fn test_insert_text_invalid_page() {
        let mut doc = PdfDocument::a4().unwrap();
        let result = doc.insert_text("総会", 2, 50.0, 50.0, Align::Left);
        assert!(matches!(result, Err(PdfError::InvalidPage(2, 1))));
    }

    #[test]
    fn test_font_ref_reused_per_page() {
        let mut doc = PdfDocument::a4().unwrap();
        assert_eq!(doc.get_or_create_font_ref("gothic", 1), "F1");
        assert_eq!(doc.get_or_create_font_ref("gothic", 1), "F1");
        assert_eq!(doc.get_or_create_font_ref("mincho", 1), "F2");
    }

    #[test]
    fn test_draw_rect_buffers_flipped_coordinates() {
        let mut doc = PdfDocument::new(200.0, 300.0).unwrap();
        doc.draw_rect(1, 10.0, 20.0, 50.0, 30.0).unwrap();

        let ops = String::from_utf8(doc.page_content_buffer[&1].clone()).unwrap();
        // bottom edge = 300 - 20 - 30
        assert!(ops.contains("10 250 50 30 re"));
    }
}
