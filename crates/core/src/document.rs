//! Printable request-form documents.
//!
//! Lays a form and its line items out into pages. The first page carries
//! the metadata block and at most [`FIRST_PAGE_ITEMS`] rows; the rest flow
//! onto continuation pages of [`CONTINUATION_PAGE_ITEMS`] rows each. The
//! signature block is placed only on the page holding the last row.
//!
//! The output is a layout model. Drawing it (PDF, HTML print view) is left
//! to the client.

use serde::Serialize;

use crate::forms::{form_status_label, form_type_label};
use crate::types::Date;

/// Rows on the first page, below the metadata block.
pub const FIRST_PAGE_ITEMS: usize = 6;

/// Rows on each continuation page.
pub const CONTINUATION_PAGE_ITEMS: usize = 15;

/// Roles shown in the signature block, left to right.
pub const SIGNATURE_ROLES: &[&str] = &["Diajukan oleh", "Disetujui oleh", "Vendor"];

/// Everything the layout needs to know about the form itself.
#[derive(Debug, Clone)]
pub struct FormHeaderInput {
    pub form_number: String,
    pub form_type: String,
    pub status: String,
    pub request_date: Date,
    pub project_name: String,
    pub project_location: Option<String>,
    pub officer_name: String,
    pub vendor_name: Option<String>,
    pub notes: Option<String>,
}

/// One line item as stored, before numbering.
#[derive(Debug, Clone)]
pub struct FormLineInput {
    pub item_name: String,
    pub unit: String,
    pub quantity: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    pub title: String,
    pub form_number: String,
    pub total_items: usize,
    pub pages: Vec<DocumentPage>,
}

/// Metadata block printed at the top of the first page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataBlock {
    pub form_number: String,
    pub request_date: Date,
    pub form_type: String,
    pub form_type_label: String,
    pub status: String,
    pub status_label: String,
    pub project_name: String,
    pub project_location: Option<String>,
    pub officer_name: String,
    pub vendor_name: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRow {
    /// 1-based, continuous across pages.
    pub number: usize,
    pub item_name: String,
    pub unit: String,
    pub quantity: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureBlock {
    pub roles: Vec<String>,
    pub officer_name: String,
    pub vendor_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPage {
    /// 1-based page number.
    pub number: usize,
    /// Running title repeated on every page.
    pub running_title: String,
    pub metadata: Option<MetadataBlock>,
    pub rows: Vec<DocumentRow>,
    pub signature: Option<SignatureBlock>,
    pub footer: String,
}

impl DocumentPage {
    pub fn has_signature(&self) -> bool {
        self.signature.is_some()
    }
}

/// Split `total` rows into per-page counts.
///
/// Always returns at least one page, so an empty form still prints its
/// header and signature block.
pub fn page_sizes(total: usize) -> Vec<usize> {
    let first = total.min(FIRST_PAGE_ITEMS);
    let mut sizes = vec![first];
    let mut remaining = total - first;
    while remaining > 0 {
        let n = remaining.min(CONTINUATION_PAGE_ITEMS);
        sizes.push(n);
        remaining -= n;
    }
    sizes
}

/// Lay out a form into pages.
pub fn build_form_document(header: &FormHeaderInput, lines: &[FormLineInput]) -> FormDocument {
    let type_label = form_type_label(&header.form_type);
    let title = format!("{} {}", type_label, header.form_number);
    let sizes = page_sizes(lines.len());
    let total_pages = sizes.len();

    let mut rows = lines.iter().enumerate().map(|(idx, line)| DocumentRow {
        number: idx + 1,
        item_name: line.item_name.clone(),
        unit: line.unit.clone(),
        quantity: line.quantity,
        notes: line.notes.clone(),
    });

    let pages = sizes
        .iter()
        .enumerate()
        .map(|(idx, &size)| {
            let number = idx + 1;
            let metadata = (number == 1).then(|| MetadataBlock {
                form_number: header.form_number.clone(),
                request_date: header.request_date,
                form_type: header.form_type.clone(),
                form_type_label: type_label.clone(),
                status: header.status.clone(),
                status_label: form_status_label(&header.status),
                project_name: header.project_name.clone(),
                project_location: header.project_location.clone(),
                officer_name: header.officer_name.clone(),
                vendor_name: header.vendor_name.clone(),
                notes: header.notes.clone(),
            });
            let signature = (number == total_pages).then(|| SignatureBlock {
                roles: SIGNATURE_ROLES.iter().map(|r| r.to_string()).collect(),
                officer_name: header.officer_name.clone(),
                vendor_name: header.vendor_name.clone(),
            });
            DocumentPage {
                number,
                running_title: title.clone(),
                metadata,
                rows: rows.by_ref().take(size).collect(),
                signature,
                footer: format!("Halaman {number} dari {total_pages}"),
            }
        })
        .collect();

    FormDocument {
        title,
        form_number: header.form_number.clone(),
        total_items: lines.len(),
        pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> FormHeaderInput {
        FormHeaderInput {
            form_number: "FORM-2026-004".into(),
            form_type: "MATERIAL".into(),
            status: "SUBMITTED".into(),
            request_date: Date::from_ymd_opt(2026, 3, 14).unwrap(),
            project_name: "Gudang Cikarang".into(),
            project_location: Some("Cikarang".into()),
            officer_name: "Budi Santoso".into(),
            vendor_name: Some("CV Sumber Makmur".into()),
            notes: None,
        }
    }

    fn lines(n: usize) -> Vec<FormLineInput> {
        (1..=n)
            .map(|i| FormLineInput {
                item_name: format!("Item {i}"),
                unit: "sak".into(),
                quantity: i as i32,
                notes: None,
            })
            .collect()
    }

    fn numbers(page: &DocumentPage) -> Vec<usize> {
        page.rows.iter().map(|r| r.number).collect()
    }

    #[test]
    fn six_items_fit_on_one_page_with_signature() {
        for n in 0..=FIRST_PAGE_ITEMS {
            let doc = build_form_document(&header(), &lines(n));
            assert_eq!(doc.pages.len(), 1, "{n} items");
            assert!(doc.pages[0].has_signature());
            assert!(doc.pages[0].metadata.is_some());
            assert_eq!(doc.pages[0].rows.len(), n);
        }
    }

    #[test]
    fn seventh_item_moves_to_page_two() {
        let doc = build_form_document(&header(), &lines(7));
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(numbers(&doc.pages[0]), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(numbers(&doc.pages[1]), vec![7]);
        assert!(!doc.pages[0].has_signature());
        assert!(doc.pages[1].has_signature());
        assert!(doc.pages[1].metadata.is_none());
    }

    #[test]
    fn many_items_span_several_continuation_pages() {
        let n = FIRST_PAGE_ITEMS + 2 * CONTINUATION_PAGE_ITEMS + 1;
        let doc = build_form_document(&header(), &lines(n));
        assert_eq!(doc.pages.len(), 4);
        assert_eq!(doc.pages[1].rows.len(), CONTINUATION_PAGE_ITEMS);
        assert_eq!(doc.pages[3].rows.len(), 1);
        assert_eq!(doc.pages[3].rows[0].number, n);

        let signed: Vec<usize> = doc
            .pages
            .iter()
            .filter(|p| p.has_signature())
            .map(|p| p.number)
            .collect();
        assert_eq!(signed, vec![4]);
    }

    #[test]
    fn every_row_appears_once_in_order() {
        let n = 40;
        let doc = build_form_document(&header(), &lines(n));
        let all: Vec<usize> = doc.pages.iter().flat_map(numbers).collect();
        assert_eq!(all, (1..=n).collect::<Vec<_>>());
        assert_eq!(doc.total_items, n);
    }

    #[test]
    fn footer_and_title_repeat_on_each_page() {
        let doc = build_form_document(&header(), &lines(8));
        assert_eq!(doc.pages[0].footer, "Halaman 1 dari 2");
        assert_eq!(doc.pages[1].footer, "Halaman 2 dari 2");
        for page in &doc.pages {
            assert_eq!(page.running_title, "Permintaan Material FORM-2026-004");
        }
    }

    #[test]
    fn metadata_maps_codes_to_labels() {
        let doc = build_form_document(&header(), &lines(1));
        let meta = doc.pages[0].metadata.as_ref().unwrap();
        assert_eq!(meta.form_type_label, "Permintaan Material");
        assert_eq!(meta.status_label, "Diajukan");
    }

    #[test]
    fn page_sizes_boundaries() {
        assert_eq!(page_sizes(0), vec![0]);
        assert_eq!(page_sizes(6), vec![6]);
        assert_eq!(page_sizes(7), vec![6, 1]);
        assert_eq!(page_sizes(21), vec![6, 15]);
        assert_eq!(page_sizes(22), vec![6, 15, 1]);
    }
}
