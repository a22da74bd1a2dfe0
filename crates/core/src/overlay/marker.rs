/// DOM attribute carrying the overlay id on every element the overlay owns.
pub const MARKER_ATTRIBUTE: &str = "data-folio-overlay";

/// Stable identity of an overlay's own DOM, used for outside-click checks.
///
/// Every element the overlay renders (trigger, panel, backdrop-less content)
/// carries `data-folio-overlay="<id>"`. A click is inside when any ancestor of
/// the target carries the same id, however often the elements re-rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OverlayMarker(String);

impl OverlayMarker {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    /// CSS selector matching this overlay's elements.
    pub fn selector(&self) -> String {
        format!("[{MARKER_ATTRIBUTE}=\"{}\"]", self.0.replace('"', "\\\""))
    }

    /// `markers` are the attribute values along the click target's ancestor
    /// chain, target first; `None` for elements without the attribute.
    pub fn contains<'a, I>(&self, markers: I) -> bool
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        markers.into_iter().flatten().any(|m| m == self.0)
    }
}
