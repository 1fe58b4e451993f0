//! Stateful PDF rotation session
//!
//! Holds the uploaded document and the per-page rotation map in Rust, so the
//! page only forwards clicks and renders thumbnails.

use crate::{format_bytes, to_js};
use lopdf::Document;
use pdfrotate_core::{
    apply_rotations, validation, PageInfo, PageOrientation, PdfInfo, Rotation, RotationMap,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Uploaded document with metadata
struct LoadedDocument {
    name: String,
    bytes: Vec<u8>,
    info: PdfInfo,
    pages: Vec<PageInfo>,
}

/// File record shown above the page grid
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FileInfo {
    pub name: String,
    pub size_bytes: usize,
    pub size_label: String,
    pub page_count: u32,
    pub version: String,
    pub encrypted: bool,
    pub title: Option<String>,
    pub author: Option<String>,
}

/// One thumbnail's state
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageView {
    pub page_num: u32,
    pub width: f32,
    pub height: f32,
    /// Rotation stored in the PDF
    pub original_rotation: i64,
    /// Rotation the user added in this session
    pub added_rotation: i64,
    /// What the page will display with after saving
    pub effective_rotation: i64,
    pub orientation: PageOrientation,
}

#[wasm_bindgen]
#[derive(Default)]
pub struct RotateSession {
    document: Option<LoadedDocument>,
    rotations: RotationMap,
    progress_callback: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl RotateSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a progress callback function
    /// Callback signature: (current: number, total: number, message: string) => void
    #[wasm_bindgen(js_name = setProgressCallback)]
    pub fn set_progress_callback(&mut self, callback: js_sys::Function) {
        self.progress_callback = Some(callback);
    }

    /// Load a PDF, replacing any previous one and clearing rotations
    #[wasm_bindgen(js_name = loadDocument)]
    pub fn load_document(&mut self, name: &str, bytes: &[u8]) -> Result<JsValue, JsValue> {
        let info = self
            .load_document_internal(name, bytes)
            .map_err(|e| JsValue::from_str(&e))?;
        to_js(&info)
    }

    /// Drop the document and all rotations
    pub fn clear(&mut self) {
        self.document = None;
        self.rotations.reset();
    }

    #[wasm_bindgen(getter, js_name = pageCount)]
    pub fn page_count(&self) -> u32 {
        self.document.as_ref().map_or(0, |d| d.info.page_count)
    }

    #[wasm_bindgen(js_name = hasDocument)]
    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    /// Rotate one page by `degrees` (multiple of 90, negative = counter-clockwise).
    /// Returns the page's added rotation afterwards.
    #[wasm_bindgen(js_name = rotatePage)]
    pub fn rotate_page(&mut self, page: u32, degrees: i32) -> Result<i32, JsValue> {
        self.rotate_page_internal(page, degrees as i64)
            .map(|r| r as i32)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Rotate every page by `degrees`
    #[wasm_bindgen(js_name = rotateAll)]
    pub fn rotate_all(&mut self, degrees: i32) -> Result<(), JsValue> {
        self.rotate_all_internal(degrees as i64)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Replace the added rotation of one page
    #[wasm_bindgen(js_name = setPageRotation)]
    pub fn set_page_rotation(&mut self, page: u32, degrees: i32) -> Result<(), JsValue> {
        self.set_page_rotation_internal(page, degrees as i64)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Added rotation for a page (0 if untouched)
    #[wasm_bindgen(js_name = getPageRotation)]
    pub fn get_page_rotation(&self, page: u32) -> i32 {
        self.rotations.get(page).degrees() as i32
    }

    #[wasm_bindgen(js_name = getPageInfo)]
    pub fn get_page_info(&self, page: u32) -> Result<JsValue, JsValue> {
        let view = self.page_view(page).map_err(|e| JsValue::from_str(&e))?;
        to_js(&view)
    }

    /// Every page's state, for drawing the grid
    #[wasm_bindgen(js_name = getAllPages)]
    pub fn get_all_pages(&self) -> Result<JsValue, JsValue> {
        let views: Vec<PageView> = (1..=self.page_count())
            .map(|page| self.page_view(page))
            .collect::<Result<_, _>>()
            .map_err(|e| JsValue::from_str(&e))?;
        to_js(&views)
    }

    #[wasm_bindgen(js_name = getFileInfo)]
    pub fn get_file_info(&self) -> Result<JsValue, JsValue> {
        let info = self
            .file_info()
            .ok_or_else(|| JsValue::from_str("No document loaded"))?;
        to_js(&info)
    }

    #[wasm_bindgen(js_name = resetRotations)]
    pub fn reset_rotations(&mut self) {
        self.rotations.reset();
    }

    #[wasm_bindgen(js_name = hasChanges)]
    pub fn has_changes(&self) -> bool {
        !self.rotations.is_identity()
    }

    /// Pages the user rotated, ascending
    #[wasm_bindgen(js_name = getChangedPages)]
    pub fn get_changed_pages(&self) -> Vec<u32> {
        self.rotations.changed_pages()
    }

    #[wasm_bindgen(js_name = canExecute)]
    pub fn can_execute(&self) -> bool {
        self.document.is_some() && self.has_changes()
    }

    /// Suggested download name, e.g. `report-rotated.pdf`
    #[wasm_bindgen(js_name = outputFileName)]
    pub fn output_file_name(&self) -> String {
        let name = self.document.as_ref().map_or("document.pdf", |d| d.name.as_str());
        let stem = name
            .strip_suffix(".pdf")
            .or_else(|| name.strip_suffix(".PDF"))
            .unwrap_or(name);
        format!("{}-rotated.pdf", stem)
    }

    /// Apply rotations and return the new PDF as Uint8Array
    pub fn execute(&self) -> Result<js_sys::Uint8Array, JsValue> {
        let result = self.execute_internal().map_err(|e| JsValue::from_str(&e))?;
        Ok(js_sys::Uint8Array::from(result.as_slice()))
    }

    /// Apply rotations and return an object URL for the resulting blob.
    /// The page is responsible for revoking it.
    #[wasm_bindgen(js_name = createDownloadUrl)]
    pub fn create_download_url(&self) -> Result<String, JsValue> {
        let result = self.execute_internal().map_err(|e| JsValue::from_str(&e))?;
        crate::bytes_to_object_url(&result, "application/pdf")
    }
}

impl RotateSession {
    fn load_document_internal(&mut self, name: &str, bytes: &[u8]) -> Result<FileInfo, String> {
        let version = validation::extract_version(bytes);
        validation::quick_validate(bytes).map_err(|e| e.to_string())?;

        let document =
            Document::load_mem(bytes).map_err(|e| format!("Failed to parse PDF: {}", e))?;
        let info = validation::info_from_document(&document, version, bytes.len())
            .map_err(|e| e.to_string())?;
        let pages = PageInfo::all_from_document(&document).map_err(|e| e.to_string())?;

        self.document = Some(LoadedDocument {
            name: name.to_string(),
            bytes: bytes.to_vec(),
            info,
            pages,
        });
        self.rotations.reset();

        self.file_info()
            .ok_or_else(|| "Document failed to load".to_string())
    }

    fn file_info(&self) -> Option<FileInfo> {
        self.document.as_ref().map(|d| FileInfo {
            name: d.name.clone(),
            size_bytes: d.bytes.len(),
            size_label: format_bytes(d.bytes.len()),
            page_count: d.info.page_count,
            version: d.info.version.clone(),
            encrypted: d.info.encrypted,
            title: d.info.title.clone(),
            author: d.info.author.clone(),
        })
    }

    fn check_page(&self, page: u32) -> Result<(), String> {
        let count = self.page_count();
        if self.document.is_none() {
            return Err("No document loaded".to_string());
        }
        if page == 0 || page > count {
            return Err(format!("Page {} is out of range (1-{})", page, count));
        }
        Ok(())
    }

    fn rotate_page_internal(&mut self, page: u32, degrees: i64) -> Result<i64, String> {
        self.check_page(page)?;
        let delta = Rotation::from_degrees(degrees).map_err(|e| e.to_string())?;
        Ok(self.rotations.rotate(page, delta).degrees())
    }

    fn rotate_all_internal(&mut self, degrees: i64) -> Result<(), String> {
        if self.document.is_none() {
            return Err("No document loaded".to_string());
        }
        let delta = Rotation::from_degrees(degrees).map_err(|e| e.to_string())?;
        self.rotations.rotate_all(1..=self.page_count(), delta);
        Ok(())
    }

    fn set_page_rotation_internal(&mut self, page: u32, degrees: i64) -> Result<(), String> {
        self.check_page(page)?;
        let rotation = Rotation::from_degrees(degrees).map_err(|e| e.to_string())?;
        self.rotations.set(page, rotation);
        Ok(())
    }

    fn page_view(&self, page: u32) -> Result<PageView, String> {
        self.check_page(page)?;
        let info = self
            .document
            .as_ref()
            .and_then(|d| d.pages.get(page as usize - 1))
            .ok_or_else(|| format!("Page {} not found", page))?;

        let added = self.rotations.get(page);
        let effective = info.rotation.compose(added);

        Ok(PageView {
            page_num: page,
            width: info.width,
            height: info.height,
            original_rotation: info.rotation.degrees(),
            added_rotation: added.degrees(),
            effective_rotation: effective.degrees(),
            orientation: PageOrientation::of(info.width as f64, info.height as f64, effective),
        })
    }

    fn execute_internal(&self) -> Result<Vec<u8>, String> {
        let document = self
            .document
            .as_ref()
            .ok_or_else(|| "No document loaded".to_string())?;

        self.report_progress(0, 100, "Rotating pages...");
        let result = apply_rotations(&document.bytes, &self.rotations)
            .map_err(|e| format!("Rotation failed: {}", e))?;
        self.report_progress(100, 100, "Complete");

        Ok(result)
    }

    /// Report progress to JavaScript callback
    fn report_progress(&self, current: u32, total: u32, message: &str) {
        if let Some(ref callback) = self.progress_callback {
            let _ = callback.call3(
                &JsValue::null(),
                &JsValue::from(current),
                &JsValue::from(total),
                &JsValue::from_str(message),
            );
        }
    }
}
