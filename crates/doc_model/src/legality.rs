//! Nesting legality tables
//!
//! Which element kinds may be added to which containers, and the doc-part
//! restrictions that apply on top. The tables are const data; the only
//! logic is the lookup in [`check_nesting`].

use crate::error::{DocModelError, Result};
use crate::node::{DocPart, DocPartKind, ElementKind};

use ElementKind::*;

/// Containers that accept every general-purpose inline or block kind
const ALL_CONTAINERS: &[ElementKind] = &[
    Section,
    Header,
    Footer,
    Footnote,
    Endnote,
    Cell,
    TextRun,
    TextBox,
    ListItemRun,
    TrackChangeRun,
    Comment,
];

const BLOCK_CONTAINERS: &[ElementKind] = &[Section, Header, Footer, Cell, TextBox];

/// Allowed containers per child kind
const NESTING: &[(ElementKind, &[ElementKind])] = &[
    (Text, ALL_CONTAINERS),
    (Bookmark, ALL_CONTAINERS),
    (Link, ALL_CONTAINERS),
    (TextBreak, ALL_CONTAINERS),
    (Image, ALL_CONTAINERS),
    (Object, ALL_CONTAINERS),
    (Field, ALL_CONTAINERS),
    (Line, ALL_CONTAINERS),
    (Shape, ALL_CONTAINERS),
    (FormField, ALL_CONTAINERS),
    (Sdt, ALL_CONTAINERS),
    (TrackChangeRun, ALL_CONTAINERS),
    (TextRun, BLOCK_CONTAINERS),
    (ListItem, BLOCK_CONTAINERS),
    (ListItemRun, BLOCK_CONTAINERS),
    (Table, BLOCK_CONTAINERS),
    (CheckBox, &[Section, Header, Footer, Cell, TextRun]),
    (TextBox, &[Section, Header, Footer, Cell]),
    (Footnote, &[Section, TextRun, Cell, ListItemRun]),
    (Endnote, &[Section, TextRun, Cell]),
    (PreserveText, &[Header, Footer, Cell]),
    (Title, &[Section, Cell]),
    (Toc, &[Section]),
    (PageBreak, &[Section]),
    (Chart, &[Section, Cell]),
    (Row, &[Table]),
    (Cell, &[Row]),
];

/// Doc-part restrictions layered over the container table. Notes may only
/// originate from section bodies; preserve-text cells must sit inside a
/// header or footer.
fn doc_part_allowed(child: ElementKind, container: ElementKind, doc_part: DocPart) -> bool {
    match child {
        Footnote | Endnote => doc_part.kind == DocPartKind::Section,
        PreserveText if container == Cell => {
            matches!(doc_part.kind, DocPartKind::Header | DocPartKind::Footer)
        }
        _ => true,
    }
}

/// Check that `child` may be added to `container` in the given doc part
pub fn check_nesting(child: ElementKind, container: ElementKind, doc_part: DocPart) -> Result<()> {
    let allowed = NESTING
        .iter()
        .find(|(kind, _)| *kind == child)
        .map(|(_, containers)| containers.contains(&container))
        .unwrap_or(false);
    if !allowed || !doc_part_allowed(child, container, doc_part) {
        return Err(DocModelError::InvalidNesting {
            element: child.name(),
            container: container.name(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section() -> DocPart {
        DocPart::new(DocPartKind::Section, 1)
    }

    fn header() -> DocPart {
        DocPart::new(DocPartKind::Header, 1)
    }

    #[test]
    fn test_text_everywhere() {
        for container in ALL_CONTAINERS {
            assert!(check_nesting(Text, *container, section()).is_ok());
        }
    }

    #[test]
    fn test_title_placement() {
        assert!(check_nesting(Title, Section, section()).is_ok());
        assert!(check_nesting(Title, Cell, section()).is_ok());
        assert!(check_nesting(Title, Header, header()).is_err());
        assert!(check_nesting(Toc, Cell, section()).is_err());
    }

    #[test]
    fn test_footnote_doc_part_restriction() {
        assert!(check_nesting(Footnote, Section, section()).is_ok());
        assert!(check_nesting(Footnote, TextRun, section()).is_ok());
        // a text run inside a header cannot carry a footnote
        assert!(check_nesting(Footnote, TextRun, header()).is_err());
        assert!(check_nesting(Footnote, Header, header()).is_err());
    }

    #[test]
    fn test_preserve_text_cell_restriction() {
        assert!(check_nesting(PreserveText, Cell, header()).is_ok());
        assert!(check_nesting(PreserveText, Cell, section()).is_err());
        assert!(check_nesting(PreserveText, Header, header()).is_ok());
        assert!(check_nesting(PreserveText, Section, section()).is_err());
    }

    #[test]
    fn test_structural_kinds() {
        assert!(check_nesting(Row, Table, section()).is_ok());
        assert!(check_nesting(Cell, Row, section()).is_ok());
        assert!(check_nesting(Row, Section, section()).is_err());
        assert!(check_nesting(Cell, Table, section()).is_err());
    }

    #[test]
    fn test_error_message_names_both_sides() {
        let err = check_nesting(Toc, Cell, section()).unwrap_err();
        assert_eq!(err.to_string(), "Cannot add TOC in Cell");
    }
}
