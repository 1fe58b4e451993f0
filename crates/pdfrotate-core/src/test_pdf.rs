//! Fixture PDFs built with lopdf
//!
//! Compiled for this crate's tests and, with the `test-utils` feature,
//! for the apps that drive rotation end to end.

use lopdf::{content::Content, content::Operation, Dictionary, Document, Object, Stream};

/// Create a valid PDF with `num_pages` US Letter pages
pub fn create_test_pdf(num_pages: u32) -> Vec<u8> {
    build(num_pages, None, &[])
}

/// Same as [`create_test_pdf`] but with `/Rotate` on the page tree root,
/// so every page inherits it
pub fn create_test_pdf_with_inherited_rotation(num_pages: u32, degrees: i64) -> Vec<u8> {
    build(num_pages, Some(degrees), &[])
}

/// Pages carrying their own `/Rotate` entries, `(page index from 1, degrees)`
pub fn create_test_pdf_with_page_rotations(num_pages: u32, rotations: &[(u32, i64)]) -> Vec<u8> {
    build(num_pages, None, rotations)
}

fn build(num_pages: u32, inherited: Option<i64>, rotations: &[(u32, i64)]) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut page_ids = Vec::new();

    for i in 0..num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                ),
                Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("Page {}", i + 1).into_bytes(),
                        lopdf::StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

        let mut page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]);
        if let Some((_, degrees)) = rotations.iter().find(|(page, _)| *page == i + 1) {
            page.set("Rotate", Object::Integer(*degrees));
        }
        page_ids.push(doc.add_object(page));
    }

    let mut pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    if let Some(degrees) = inherited {
        pages.set("Rotate", Object::Integer(degrees));
    }
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]);
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}
