use std::collections::BTreeMap;
use std::io::{Error, ErrorKind};
use std::path::Path;

use lopdf::{Document, Object};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

static IGNORE: &[&[u8]] = &[
    b"Length",
    b"BBox",
    b"FormType",
    b"Matrix",
    b"Type",
    b"XObject",
    b"Subtype",
    b"Filter",
    b"ColorSpace",
    b"Width",
    b"Height",
    b"BitsPerComponent",
    b"Length1",
    b"Length2",
    b"Length3",
    b"PTEX.FileName",
    b"PTEX.PageNumber",
    b"PTEX.InfoDict",
    b"FontDescriptor",
    b"ExtGState",
    b"MediaBox",
    b"Annot",
];

fn filter_func(object_id: (u32, u16), object: &mut Object) -> Option<((u32, u16), Object)> {
    if IGNORE.contains(&object.type_name().unwrap_or_default()) {
        return None;
    }
    if let Ok(d) = object.as_dict_mut() {
        d.remove(b"Producer");
        d.remove(b"ModDate");
        d.remove(b"Creator");
        d.remove(b"ProcSet");
        d.remove(b"Procset");
        d.remove(b"XObject");
        d.remove(b"MediaBox");
        d.remove(b"Annots");
        if d.is_empty() {
            return None;
        }
    }
    Some((object_id, object.to_owned()))
}

/// Extracts the text of every page and concatenates the pages in order.
/// A page that yields no text contributes an empty line rather than failing
/// the whole document.
pub fn extract_pdf_text<P: AsRef<Path>>(path: P) -> Result<String, Error> {
    let mut doc = Document::load_filtered(path.as_ref(), filter_func)
        .map_err(|e| Error::new(ErrorKind::Other, e.to_string()))?;

    if doc.is_encrypted() {
        doc.decrypt("")
            .map_err(|_err| Error::new(ErrorKind::InvalidInput, "Failed to decrypt"))?;
    }

    let pages = doc.get_pages();

    let extracted_pages: Vec<(u32, String)> = pages
        .into_par_iter()
        .map(|(page_num, _page_id): (u32, (u32, u16))| {
            let text = doc.extract_text(&[page_num]).unwrap_or_default();
            (page_num, text.trim_end().to_string())
        })
        .collect();

    let by_page: BTreeMap<u32, String> = extracted_pages.into_iter().collect();

    Ok(by_page.into_values().collect::<Vec<String>>().join("\n"))
}
