//! Rendering: composition → layout → display list → raster.
//!
//! A [`Surface`] is the captured, read-consistent render of one session
//! snapshot. The live display and export both read from it.

pub mod layout;
pub mod paint;
pub mod raster;
#[cfg(feature = "raster")]
pub mod text;

use crate::compose::{compose, Composition};
use crate::session::Session;
use crate::Viewport;
use layout::LayoutNode;
use paint::PaintCommand;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub viewport: Viewport,
    pub composition: Composition,
    pub layout: Vec<LayoutNode>,
    pub display_list: Vec<PaintCommand>,
}

impl Surface {
    /// Render `session` as it is right now.
    pub fn capture(session: &Session, viewport: Viewport) -> Self {
        Self::from_composition(compose(session), viewport)
    }

    pub fn from_composition(composition: Composition, viewport: Viewport) -> Self {
        let layout = layout::layout_frame(&composition, viewport);
        let display_list = paint::build_display_list(&composition, &layout);
        Self { viewport, composition, layout, display_list }
    }

    /// Content digest of the display list (hex SHA-256).
    pub fn digest(&self) -> String {
        let bytes = serde_json::to_vec(&self.display_list).unwrap_or_default();
        hex::encode(Sha256::digest(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Edit;

    #[test]
    fn digest_tracks_content() {
        let v = Viewport::default();
        let a = Surface::capture(&Session::new(), v);
        let b = Surface::capture(&Session::new(), v);
        assert_eq!(a.digest(), b.digest());

        let c = Surface::capture(&Session::new().apply(Edit::Caption("Ada".into())), v);
        assert_ne!(a.digest(), c.digest());
        assert_eq!(a.digest().len(), 64);
    }
}
