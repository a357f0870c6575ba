/// Routing behavior of a destination.
///
/// Skipping an unknown destination and collecting an ignored region into a
/// side buffer are both `Discard` from the reader's point of view; only the
/// semantic layer distinguishes them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Route {
    #[default]
    Deliver,
    Discard,
}

/// Logical sink that decoded characters currently flow to.
///
/// The reader only knows two destinations, [`Destination::TEXT`] and
/// [`Destination::SKIP`]. The set is open: the semantic layer mints
/// additional ids for its own destinations (font tables, document
/// information fields, ...) and tags each with the [`Route`] the reader
/// should apply. Ids 0 and 1 are reserved for the built-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Destination {
    pub id: u16,
    pub route: Route,
}

impl Destination {
    /// The main document text.
    pub const TEXT: Destination = Destination::delivering(0);

    /// A region whose characters are thrown away.
    pub const SKIP: Destination = Destination::discarding(1);

    /// A destination whose characters reach the actor.
    #[must_use]
    pub const fn delivering(id: u16) -> Self {
        Self { id, route: Route::Deliver }
    }

    /// A destination whose characters are dropped by the router.
    #[must_use]
    pub const fn discarding(id: u16) -> Self {
        Self { id, route: Route::Discard }
    }

    /// Whether characters routed here reach the actor.
    #[must_use]
    pub const fn delivers(self) -> bool {
        matches!(self.route, Route::Deliver)
    }
}

impl Default for Destination {
    fn default() -> Self {
        Self::TEXT
    }
}
