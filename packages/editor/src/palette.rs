//! # Component Palette
//!
//! Default templates for every insertable kind: what lands in a container
//! when the user drops a palette item on it. Templates carry placeholder ids;
//! AddElement replaces them all.

use pagesmith_model::{Element, ElementKind, LeafContent, StyleValue, Styles};

const PLACEHOLDER_ID: &str = "template";

const TEXT_PLACEHOLDER: &str = "This is some text inside of a div block.";

const PARAGRAPH_PLACEHOLDER: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
Suspendisse varius enim in eros elementum tristique. Duis cursus, mi quis viverra ornare, eros \
dolor interdum nulla, ut commodo diam libero vitae erat. Aenean faucibus nibh et justo cursus id \
rutrum lorem imperdiet. Nunc ut sem vitae risus tristique posuere.";

const VIDEO_PLACEHOLDER: &str = "https://res.cloudinary.com/df2m5kqib/video/upload/v1737025065/WizShop_product_dem_secreen_recording_video_compressed_fomunn.mp4";

const IMAGE_PLACEHOLDER: &str = "/placeholder.svg";

/// Style set shared by every palette item
pub fn default_styles() -> Styles {
    [
        ("backgroundPosition", "center"),
        ("objectFit", "cover"),
        ("backgroundRepeat", "no-repeat"),
        ("textAlign", "left"),
        ("opacity", "100%"),
    ]
    .into_iter()
    .map(|(property, value)| (property.to_string(), StyleValue::from(value)))
    .collect()
}

/// Default template for `kind`, `None` for the page root
pub fn template(kind: ElementKind) -> Option<Element> {
    let element = match kind {
        ElementKind::PageRoot => return None,

        ElementKind::Text => leaf(kind, LeafContent::text(TEXT_PLACEHOLDER)).with_style("color", "black"),
        ElementKind::Heading => leaf(kind, LeafContent::text("Heading"))
            .with_style("color", "black")
            .with_style("fontSize", 36u32)
            .with_style("fontWeight", "bolder"),
        ElementKind::Paragraph => {
            leaf(kind, LeafContent::text(PARAGRAPH_PLACEHOLDER)).with_style("color", "black")
        }
        ElementKind::RichText => leaf(kind, LeafContent::text("Rich text")),
        ElementKind::Button => leaf(kind, LeafContent::text("Button")),
        ElementKind::Link => {
            leaf(kind, LeafContent::link("Link Element", "#")).with_style("color", "black")
        }
        ElementKind::Image => leaf(kind, LeafContent::source(IMAGE_PLACEHOLDER)),
        ElementKind::Video => {
            let mut video = leaf(kind, LeafContent::source(VIDEO_PLACEHOLDER));
            video.styles.clear();
            video
        }
        ElementKind::Input
        | ElementKind::TextArea
        | ElementKind::Checkbox
        | ElementKind::Radio
        | ElementKind::Select
        | ElementKind::FileUpload => leaf(kind, LeafContent::text("")),

        ElementKind::Container => column(),
        ElementKind::TwoColumn | ElementKind::HorizontalFlex => {
            layout(kind, columns(2)).with_style("display", "flex")
        }
        ElementKind::ThreeColumn => layout(kind, columns(3)).with_style("display", "flex"),
        ElementKind::VerticalFlex => layout(kind, columns(2)).with_style("display", "block"),
        ElementKind::Grid => layout(
            kind,
            vec![
                grid_row(1, ElementKind::VerticalFlex),
                grid_row(2, ElementKind::Grid),
            ],
        )
        .with_style("display", "block"),
    };

    Some(element)
}

/// Kinds that have a palette entry, in palette order
pub fn palette_kinds() -> impl Iterator<Item = ElementKind> {
    ElementKind::ALL
        .into_iter()
        .filter(|kind| *kind != ElementKind::PageRoot)
}

fn leaf(kind: ElementKind, content: LeafContent) -> Element {
    let mut element = Element::new(PLACEHOLDER_ID, kind).with_styles(default_styles());
    if let Some(leaf) = element.leaf_content_mut() {
        *leaf = content;
    }
    element
}

fn layout(kind: ElementKind, children: Vec<Element>) -> Element {
    let mut element = Element::new(PLACEHOLDER_ID, kind).with_styles(default_styles());
    if let Some(slot) = element.children_mut() {
        *slot = children;
    }
    element
}

fn column() -> Element {
    Element::new(PLACEHOLDER_ID, ElementKind::Container).with_styles(default_styles())
}

/// Full-width child containers of the column and flex layouts
fn columns(count: usize) -> Vec<Element> {
    (0..count)
        .map(|_| column().with_style("width", "100%"))
        .collect()
}

/// The second grid row is itself a `Grid`, as stored by existing documents
fn grid_row(row: usize, kind: ElementKind) -> Element {
    let first = (row - 1) * 2 + 1;
    let cells = (first..first + 2)
        .map(|n| column().with_name(format!("Container {}", n)).with_style("width", "50%"))
        .collect();

    layout(kind, cells)
        .with_name(format!("Row {}", row))
        .with_style("display", "flex")
        .with_style("width", "100%")
}
