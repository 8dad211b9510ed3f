//! Image handling for xdoc → AsciiDoc conversion
//!
//! xdoc images carry a source and three further attribute groups
//! (`img[src][..][..][..]`). Only the source survives; every image is
//! emitted as an inline image macro centred on the page.

use crate::data::constants::IMAGE_ATTRIBUTES;

/// `image:src[align="center"]`
pub fn render_image(source: &str) -> String {
    format!("image:{}[{}]", source.trim(), IMAGE_ATTRIBUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_image() {
        assert_eq!(render_image("pic.png"), "image:pic.png[align=\"center\"]");
    }

    #[test]
    fn test_render_image_trims_source() {
        assert_eq!(
            render_image(" figures/a b.png "),
            "image:figures/a b.png[align=\"center\"]"
        );
    }
}
