/// A cross-cutting concern a request type opts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Capability {
    /// Run registered validators before the handler.
    Validation,
}

impl Capability {
    const fn bit(self) -> u32 {
        1 << self as u32
    }
}

/// The set of [`Capability`] tags declared by a request type.
///
/// Usable in `const` position so that a request type can declare its tags in
/// [`Request::CAPABILITIES`](crate::Request::CAPABILITIES).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities(u32);

impl Capabilities {
    /// No capabilities.
    pub const NONE: Self = Self(0);

    /// A set holding only `capability`.
    pub const fn of(capability: Capability) -> Self {
        Self(capability.bit())
    }

    /// This set plus `capability`.
    pub const fn with(self, capability: Capability) -> Self {
        Self(self.0 | capability.bit())
    }

    /// Whether `capability` is in the set.
    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    /// Whether the set is empty.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_tracks_membership() {
        assert!(!Capabilities::NONE.contains(Capability::Validation));
        assert!(Capabilities::NONE.is_empty());
        assert!(Capabilities::of(Capability::Validation).contains(Capability::Validation));
        assert_eq!(
            [Capability::Validation].into_iter().collect::<Capabilities>(),
            Capabilities::NONE.with(Capability::Validation)
        );
    }
}
